//! Demo data for a fresh board.

use chrono::{DateTime, Duration, Utc};
use taskboard_proto::task::{TaskCreate, TaskPriority, TaskStatus};

use crate::board::{Board, BoardError};

struct Sample {
    title: &'static str,
    description: &'static str,
    status: TaskStatus,
    priority: TaskPriority,
    assignee: &'static str,
    due_in_days: i64,
}

const SAMPLES: &[Sample] = &[
    Sample {
        title: "Draft project plan",
        description: "Write the Q1 plan and share it with stakeholders.\n\nCover goals, timeline, staffing and risks.",
        status: TaskStatus::Todo,
        priority: TaskPriority::High,
        assignee: "Taro Tanaka",
        due_in_days: 3,
    },
    Sample {
        title: "Gather requirements for new feature",
        description: "Sort through user requests and write up the detailed behaviour.",
        status: TaskStatus::Todo,
        priority: TaskPriority::Medium,
        assignee: "Hanako Sato",
        due_in_days: 7,
    },
    Sample {
        title: "UI/UX design review",
        description: "Walk through the current screens and list usability fixes.",
        status: TaskStatus::Todo,
        priority: TaskPriority::Low,
        assignee: "Jiro Yamada",
        due_in_days: 14,
    },
    Sample {
        title: "Implement task API endpoints",
        description: "List and create are done. Update and delete remain.",
        status: TaskStatus::InProgress,
        priority: TaskPriority::High,
        assignee: "Ichiro Suzuki",
        due_in_days: 2,
    },
    Sample {
        title: "Tune database indexes",
        description: "Add indexes and rework the slow queries.",
        status: TaskStatus::InProgress,
        priority: TaskPriority::Medium,
        assignee: "Misaki Takahashi",
        due_in_days: 5,
    },
    Sample {
        title: "Security audit",
        description: "Check the application against the OWASP Top 10 and fix findings.",
        status: TaskStatus::Review,
        priority: TaskPriority::Urgent,
        assignee: "Kenta Watanabe",
        due_in_days: 1,
    },
    Sample {
        title: "Add unit tests",
        description: "Raise coverage toward 80%.",
        status: TaskStatus::Review,
        priority: TaskPriority::Medium,
        assignee: "Ai Ito",
        due_in_days: 4,
    },
    Sample {
        title: "Set up project environment",
        description: "Containerized dev setup and CI pipeline are in place.",
        status: TaskStatus::Done,
        priority: TaskPriority::High,
        assignee: "Yuko Nakamura",
        due_in_days: -2,
    },
    Sample {
        title: "Define brand guidelines",
        description: "Logo and visual identity guide finished.",
        status: TaskStatus::Done,
        priority: TaskPriority::Low,
        assignee: "Takuya Kobayashi",
        due_in_days: -10,
    },
];

/// Adds the demo tasks to `board`, due dates relative to `now`.
///
/// # Errors
///
/// Returns [`BoardError`] if a sample fails validation.
pub fn seed(board: &mut Board, now: DateTime<Utc>) -> Result<usize, BoardError> {
    for sample in SAMPLES {
        board.create_at(
            TaskCreate {
                title: sample.title.to_string(),
                description: Some(sample.description.to_string()),
                status: Some(sample.status),
                priority: Some(sample.priority),
                assignee: Some(sample.assignee.to_string()),
                due_date: Some(now + Duration::days(sample.due_in_days)),
            },
            now,
        )?;
    }
    tracing::info!(count = SAMPLES.len(), "seeded sample tasks");
    Ok(SAMPLES.len())
}
