//! Editable task form state and its normalization into payloads.
//!
//! A [`TaskDraft`] holds the raw strings a user typed. Submitting it runs the
//! validation rules and produces a [`TaskCreate`] or [`TaskUpdate`] in which:
//!
//! - empty-string optional fields are omitted rather than sent as `""`, and
//! - a date-only due date (`YYYY-MM-DD`) is pinned to the end of that day in
//!   UTC (`T23:59:59Z`).

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::task::{
    MAX_ASSIGNEE_LENGTH, MAX_DESCRIPTION_LENGTH, Task, TaskCreate, TaskPriority, TaskStatus,
    TaskUpdate,
};
use crate::validation::{ValidationError, ValidationErrors, check_optional, check_title};

/// Raw form input for creating or editing a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Title text.
    pub title: String,
    /// Description text; empty means none.
    pub description: String,
    /// Selected column.
    pub status: TaskStatus,
    /// Selected priority.
    pub priority: TaskPriority,
    /// Assignee text; empty means none.
    pub assignee: String,
    /// Due date text (`YYYY-MM-DD` or RFC 3339); empty means none.
    pub due_date: String,
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            assignee: String::new(),
            due_date: String::new(),
        }
    }
}

impl TaskDraft {
    /// Prefills a draft from an existing task for editing. The due date is
    /// reduced to its date part.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            status: task.status,
            priority: task.priority,
            assignee: task.assignee.clone().unwrap_or_default(),
            due_date: task
                .due_date
                .map(|due| due.date_naive().format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }

    /// Runs the validation rules without building a payload.
    ///
    /// # Errors
    ///
    /// Returns every violated rule.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        self.normalized().map(|_| ())
    }

    /// Validates and builds a create payload.
    ///
    /// # Errors
    ///
    /// Returns every violated rule; nothing should be submitted in that case.
    pub fn to_create(&self) -> Result<TaskCreate, ValidationErrors> {
        let fields = self.normalized()?;
        Ok(TaskCreate {
            title: fields.title,
            description: fields.description,
            status: Some(self.status),
            priority: Some(self.priority),
            assignee: fields.assignee,
            due_date: fields.due_date,
        })
    }

    /// Validates and builds an update payload carrying every form field.
    ///
    /// Empty optional fields are omitted, so clearing a field in the form
    /// leaves the stored value unchanged.
    ///
    /// # Errors
    ///
    /// Returns every violated rule; nothing should be submitted in that case.
    pub fn to_update(&self) -> Result<TaskUpdate, ValidationErrors> {
        let fields = self.normalized()?;
        Ok(TaskUpdate {
            title: Some(fields.title),
            description: fields.description,
            status: Some(self.status),
            priority: Some(self.priority),
            assignee: fields.assignee,
            due_date: fields.due_date,
        })
    }

    fn normalized(&self) -> Result<NormalizedFields, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(e) = check_title(&self.title) {
            errors.push(e);
        }
        let description = non_empty(&self.description);
        let assignee = non_empty(&self.assignee);
        check_optional(
            &mut errors,
            description.as_deref(),
            MAX_DESCRIPTION_LENGTH,
            ValidationError::DescriptionTooLong,
        );
        check_optional(
            &mut errors,
            assignee.as_deref(),
            MAX_ASSIGNEE_LENGTH,
            ValidationError::AssigneeTooLong,
        );
        let due_date = match parse_due_date(&self.due_date) {
            Ok(due) => due,
            Err(e) => {
                errors.push(e);
                None
            }
        };
        errors.into_result()?;
        Ok(NormalizedFields {
            title: self.title.clone(),
            description,
            assignee,
            due_date,
        })
    }
}

struct NormalizedFields {
    title: String,
    description: Option<String>,
    assignee: Option<String>,
    due_date: Option<DateTime<Utc>>,
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Parses due-date input. Empty input means no due date; `YYYY-MM-DD` is
/// pinned to `23:59:59` UTC; RFC 3339 timestamps are taken as-is.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDueDate`] for anything else.
pub fn parse_due_date(input: &str) -> Result<Option<DateTime<Utc>>, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(Some(end_of_day(date)));
    }
    DateTime::parse_from_rfc3339(input)
        .map(|dt| Some(dt.with_timezone(&Utc)))
        .map_err(|_| ValidationError::InvalidDueDate)
}

/// The last second of `date` in UTC.
#[must_use]
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    let end = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    date.and_time(end).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskId;
    use chrono::TimeZone;

    fn draft(title: &str) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            ..TaskDraft::default()
        }
    }

    #[test]
    fn empty_optionals_are_omitted() {
        let payload = draft("Write spec").to_create().unwrap();
        assert_eq!(payload.title, "Write spec");
        assert!(payload.description.is_none());
        assert!(payload.assignee.is_none());
        assert!(payload.due_date.is_none());
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("description").is_none());
        assert!(json.get("assignee").is_none());
    }

    #[test]
    fn date_only_input_is_end_of_day_utc() {
        let mut d = draft("Ship it");
        d.due_date = "2025-03-14".to_string();
        let payload = d.to_create().unwrap();
        assert_eq!(
            payload.due_date,
            Some(Utc.with_ymd_and_hms(2025, 3, 14, 23, 59, 59).unwrap())
        );
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["due_date"], "2025-03-14T23:59:59Z");
    }

    #[test]
    fn rfc3339_due_date_passes_through() {
        assert_eq!(
            parse_due_date("2025-03-14T10:00:00+02:00").unwrap(),
            Some(Utc.with_ymd_and_hms(2025, 3, 14, 8, 0, 0).unwrap())
        );
    }

    #[test]
    fn bad_due_date_is_a_field_error() {
        let mut d = draft("Ship it");
        d.due_date = "next tuesday".to_string();
        let errors = d.to_create().unwrap_err();
        assert_eq!(
            errors.message_for("due_date").as_deref(),
            Some("due date must be YYYY-MM-DD")
        );
    }

    #[test]
    fn overlong_title_blocks_submission() {
        let errors = draft(&"t".repeat(256)).to_create().unwrap_err();
        assert_eq!(
            errors.message_for("title").as_deref(),
            Some("title exceeds maximum length")
        );
    }

    #[test]
    fn overlong_optionals_are_reported_with_title() {
        let mut d = draft("");
        d.description = "d".repeat(1001);
        d.assignee = "a".repeat(101);
        let errors = d.validate().unwrap_err();
        assert_eq!(errors.iter().count(), 3);
        assert!(errors.contains(&ValidationError::DescriptionTooLong));
        assert!(errors.contains(&ValidationError::AssigneeTooLong));
        assert!(!errors.contains(&ValidationError::TitleTooLong));
    }

    #[test]
    fn whitespace_title_is_required_error() {
        let errors = draft("   ").validate().unwrap_err();
        assert!(errors.contains(&ValidationError::TitleRequired));
    }

    #[test]
    fn from_task_round_trips_into_update() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();
        let task = Task {
            id: TaskId::new(4),
            title: "Review PR".to_string(),
            description: Some("check tests".to_string()),
            status: TaskStatus::Review,
            priority: TaskPriority::High,
            assignee: None,
            due_date: Some(Utc.with_ymd_and_hms(2025, 2, 10, 23, 59, 59).unwrap()),
            position: 1,
            created_at: ts,
            updated_at: ts,
        };
        let d = TaskDraft::from_task(&task);
        assert_eq!(d.due_date, "2025-02-10");
        assert!(d.assignee.is_empty());

        let update = d.to_update().unwrap();
        assert_eq!(update.title.as_deref(), Some("Review PR"));
        assert_eq!(update.status, Some(TaskStatus::Review));
        assert_eq!(update.due_date, task.due_date);
        assert!(update.assignee.is_none());
    }
}
