//! Property-based tests for payload validation and form normalization.
//!
//! Uses proptest to verify:
//! 1. Titles are accepted exactly when 1..=255 characters and not blank.
//! 2. Submitted drafts never carry empty-string optional fields.
//! 3. Any calendar date typed into the form becomes that day at 23:59:59 UTC.

use chrono::{Datelike, NaiveDate, Timelike};
use proptest::prelude::*;
use taskboard_proto::task::{MAX_TITLE_LENGTH, TaskCreate};
use taskboard_proto::validation::ValidationError;
use taskboard_proto::TaskDraft;

proptest! {
    #[test]
    fn title_length_rule(title in "[a-zA-Z0-9 ]{0,300}") {
        let result = TaskCreate::new(title.clone()).validate();
        let chars = title.chars().count();
        let ok = !title.trim().is_empty() && chars <= MAX_TITLE_LENGTH;
        prop_assert_eq!(result.is_ok(), ok);
        if chars > MAX_TITLE_LENGTH {
            prop_assert!(result.unwrap_err().contains(&ValidationError::TitleTooLong));
        }
    }

    #[test]
    fn empty_fields_never_submitted(
        title in "[a-z]{1,20}",
        description in prop_oneof![Just(String::new()), "[a-z ]{1,40}"],
        assignee in prop_oneof![Just(String::new()), "[a-z]{1,20}"],
    ) {
        let draft = TaskDraft {
            title,
            description: description.clone(),
            assignee: assignee.clone(),
            ..TaskDraft::default()
        };
        let payload = draft.to_create().unwrap();
        prop_assert_eq!(payload.description.is_none(), description.is_empty());
        prop_assert_eq!(payload.assignee.is_none(), assignee.is_empty());
        let json = serde_json::to_value(&payload).unwrap();
        prop_assert!(json.as_object().unwrap().values().all(|v| v != ""));
    }

    #[test]
    fn date_only_is_end_of_day(days in 0i64..40_000) {
        let date = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap() + chrono::Duration::days(days);
        let draft = TaskDraft {
            title: "due".to_string(),
            due_date: date.format("%Y-%m-%d").to_string(),
            ..TaskDraft::default()
        };
        let due = draft.to_create().unwrap().due_date.unwrap();
        prop_assert_eq!(due.date_naive(), date);
        prop_assert_eq!((due.hour(), due.minute(), due.second()), (23, 59, 59));
        prop_assert_eq!(due.year(), date.year());
    }
}
