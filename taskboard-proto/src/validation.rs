//! Field-level validation rules for task payloads.
//!
//! The same rules run in the client before anything is submitted and in the
//! service before anything is stored, so an invalid payload never reaches the
//! network from a well-behaved client.

use std::fmt;

use crate::error::FieldError;
use crate::task::{
    MAX_ASSIGNEE_LENGTH, MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH, PositionUpdate, TaskCreate,
    TaskUpdate,
};

/// A single rule violation on one field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Title is empty or whitespace only.
    #[error("title is required")]
    TitleRequired,
    /// Title is longer than [`MAX_TITLE_LENGTH`] characters.
    #[error("title exceeds maximum length")]
    TitleTooLong,
    /// Description is longer than [`MAX_DESCRIPTION_LENGTH`] characters.
    #[error("description exceeds maximum length")]
    DescriptionTooLong,
    /// Assignee is longer than [`MAX_ASSIGNEE_LENGTH`] characters.
    #[error("assignee exceeds maximum length")]
    AssigneeTooLong,
    /// Due date input could not be parsed.
    #[error("due date must be YYYY-MM-DD")]
    InvalidDueDate,
    /// Reposition target is zero.
    #[error("position must be at least 1")]
    PositionOutOfRange,
}

impl ValidationError {
    /// Name of the offending field, as used in the JSON payload.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::TitleRequired | Self::TitleTooLong => "title",
            Self::DescriptionTooLong => "description",
            Self::AssigneeTooLong => "assignee",
            Self::InvalidDueDate => "due_date",
            Self::PositionOutOfRange => "position",
        }
    }
}

/// One or more validation failures, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Creates an empty error set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Records a violation.
    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    /// Whether no violation was recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the recorded violations.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// First message recorded for the given field, if any.
    #[must_use]
    pub fn message_for(&self, field: &str) -> Option<String> {
        self.0
            .iter()
            .find(|e| e.field() == field)
            .map(ToString::to_string)
    }

    /// Whether the given violation was recorded.
    #[must_use]
    pub fn contains(&self, error: &ValidationError) -> bool {
        self.0.contains(error)
    }

    /// Converts to wire-level field errors.
    #[must_use]
    pub fn to_field_errors(&self) -> Vec<FieldError> {
        self.0
            .iter()
            .map(|e| FieldError::new(e.field(), e.to_string()))
            .collect()
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns the collected violations when there is at least one.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Checks a title against the required and length rules.
#[must_use]
pub fn check_title(title: &str) -> Option<ValidationError> {
    if title.trim().is_empty() {
        Some(ValidationError::TitleRequired)
    } else if title.chars().count() > MAX_TITLE_LENGTH {
        Some(ValidationError::TitleTooLong)
    } else {
        None
    }
}

/// Records `error` when `value` is present and longer than `max` characters.
pub(crate) fn check_optional(
    errors: &mut ValidationErrors,
    value: Option<&str>,
    max: usize,
    error: ValidationError,
) {
    if value.is_some_and(|v| v.chars().count() > max) {
        errors.push(error);
    }
}

impl TaskCreate {
    /// Validates the payload before it is submitted or stored.
    ///
    /// # Errors
    ///
    /// Returns every violated rule.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(e) = check_title(&self.title) {
            errors.push(e);
        }
        check_optional(
            &mut errors,
            self.description.as_deref(),
            MAX_DESCRIPTION_LENGTH,
            ValidationError::DescriptionTooLong,
        );
        check_optional(
            &mut errors,
            self.assignee.as_deref(),
            MAX_ASSIGNEE_LENGTH,
            ValidationError::AssigneeTooLong,
        );
        errors.into_result()
    }
}

impl TaskUpdate {
    /// Validates the supplied fields; absent fields are not checked.
    ///
    /// # Errors
    ///
    /// Returns every violated rule.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(e) = self.title.as_deref().and_then(check_title) {
            errors.push(e);
        }
        check_optional(
            &mut errors,
            self.description.as_deref(),
            MAX_DESCRIPTION_LENGTH,
            ValidationError::DescriptionTooLong,
        );
        check_optional(
            &mut errors,
            self.assignee.as_deref(),
            MAX_ASSIGNEE_LENGTH,
            ValidationError::AssigneeTooLong,
        );
        errors.into_result()
    }
}

impl PositionUpdate {
    /// Validates the reposition target.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::PositionOutOfRange`] for position zero.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        if self.position == 0 {
            Err(ValidationError::PositionOutOfRange.into())
        } else {
            Ok(())
        }
    }
}
