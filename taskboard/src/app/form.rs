//! Modal task form: create or edit a single task.

use crossterm::event::{KeyCode, KeyEvent};
use taskboard_proto::draft::TaskDraft;
use taskboard_proto::task::{KANBAN_COLUMNS, Task, TaskId, TaskPriority, TaskStatus};
use taskboard_proto::validation::ValidationErrors;

use crate::worker::StoreCommand;

/// Whether the form creates a new task or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// New task.
    Create,
    /// Existing task.
    Edit(TaskId),
}

/// Form fields in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Title text.
    Title,
    /// Description text.
    Description,
    /// Status selector.
    Status,
    /// Priority selector.
    Priority,
    /// Assignee text.
    Assignee,
    /// Due date text.
    DueDate,
}

impl FormField {
    /// Every field, in tab order.
    pub const ALL: [Self; 6] = [
        Self::Title,
        Self::Description,
        Self::Status,
        Self::Priority,
        Self::Assignee,
        Self::DueDate,
    ];

    /// Label shown next to the input.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::Status => "Status",
            Self::Priority => "Priority",
            Self::Assignee => "Assignee",
            Self::DueDate => "Due date",
        }
    }

    /// Payload field name, matching [`taskboard_proto::ValidationError::field`].
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Status => "status",
            Self::Priority => "priority",
            Self::Assignee => "assignee",
            Self::DueDate => "due_date",
        }
    }

    /// Selector fields cycle with left/right instead of taking text.
    #[must_use]
    pub const fn is_selector(self) -> bool {
        matches!(self, Self::Status | Self::Priority)
    }

    const fn index(self) -> usize {
        match self {
            Self::Title => 0,
            Self::Description => 1,
            Self::Status => 2,
            Self::Priority => 3,
            Self::Assignee => 4,
            Self::DueDate => 5,
        }
    }

    const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    const fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// What a key press did to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// Still editing.
    Editing,
    /// Dismissed without saving.
    Cancelled,
    /// Valid submission; send this command.
    Submitted(StoreCommand),
}

/// Open form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    /// Create or edit.
    pub mode: FormMode,
    /// Raw field values.
    pub draft: TaskDraft,
    /// Field with keyboard focus.
    pub focus: FormField,
    /// Violations from the last submit attempt.
    pub errors: ValidationErrors,
}

impl TaskForm {
    /// Empty create form, with the status preselected.
    #[must_use]
    pub fn create(status: TaskStatus) -> Self {
        Self {
            mode: FormMode::Create,
            draft: TaskDraft {
                status,
                ..TaskDraft::default()
            },
            focus: FormField::Title,
            errors: ValidationErrors::new(),
        }
    }

    /// Edit form prefilled from `task`.
    #[must_use]
    pub fn edit(task: &Task) -> Self {
        Self {
            mode: FormMode::Edit(task.id),
            draft: TaskDraft::from_task(task),
            focus: FormField::Title,
            errors: ValidationErrors::new(),
        }
    }

    /// Modal title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "New task",
            FormMode::Edit(_) => "Edit task",
        }
    }

    /// Display value of a field.
    #[must_use]
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.draft.title,
            FormField::Description => &self.draft.description,
            FormField::Status => self.draft.status.label(),
            FormField::Priority => self.draft.priority.label(),
            FormField::Assignee => &self.draft.assignee,
            FormField::DueDate => &self.draft.due_date,
        }
    }

    /// Validation message for a field from the last submit attempt.
    #[must_use]
    pub fn error_for(&self, field: FormField) -> Option<String> {
        self.errors.message_for(field.key())
    }

    /// Applies one key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
        match key.code {
            KeyCode::Esc => return FormOutcome::Cancelled,
            KeyCode::Enter => return self.submit(),
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Left if self.focus.is_selector() => self.cycle(-1),
            KeyCode::Right | KeyCode::Char(' ') if self.focus.is_selector() => self.cycle(1),
            KeyCode::Char(c) if !self.focus.is_selector() => {
                if let Some(text) = self.text_mut() {
                    text.push(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(text) = self.text_mut() {
                    text.pop();
                }
            }
            _ => {}
        }
        FormOutcome::Editing
    }

    /// Validates the draft. On failure the errors stay on the form and
    /// nothing is submitted.
    pub fn submit(&mut self) -> FormOutcome {
        let command = match self.mode {
            FormMode::Create => self.draft.to_create().map(StoreCommand::CreateTask),
            FormMode::Edit(id) => self
                .draft
                .to_update()
                .map(|data| StoreCommand::UpdateTask { id, data }),
        };
        match command {
            Ok(command) => {
                self.errors = ValidationErrors::new();
                FormOutcome::Submitted(command)
            }
            Err(errors) => {
                tracing::debug!(%errors, "form rejected");
                self.errors = errors;
                FormOutcome::Editing
            }
        }
    }

    const fn text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Title => Some(&mut self.draft.title),
            FormField::Description => Some(&mut self.draft.description),
            FormField::Assignee => Some(&mut self.draft.assignee),
            FormField::DueDate => Some(&mut self.draft.due_date),
            FormField::Status | FormField::Priority => None,
        }
    }

    fn cycle(&mut self, delta: isize) {
        match self.focus {
            FormField::Status => {
                let i = wrap(self.draft.status.column_index(), delta, KANBAN_COLUMNS.len());
                self.draft.status = KANBAN_COLUMNS[i];
            }
            FormField::Priority => {
                let current = TaskPriority::ALL
                    .iter()
                    .position(|p| *p == self.draft.priority)
                    .unwrap_or(0);
                let i = wrap(current, delta, TaskPriority::ALL.len());
                self.draft.priority = TaskPriority::ALL[i];
            }
            _ => {}
        }
    }
}

const fn wrap(index: usize, delta: isize, len: usize) -> usize {
    (index + len).saturating_add_signed(delta) % len
}
