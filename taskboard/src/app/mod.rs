//! Application state and key handling.
//!
//! [`App`] is pure: it renders from the last [`StoreState`] it was given and
//! turns key presses into [`StoreCommand`]s for the store worker. It never
//! talks to the repository or edits task data itself.

pub mod form;

use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskboard_proto::task::{KANBAN_COLUMNS, Task, TaskId, TaskPriority, TaskStatus};

use crate::board::{KanbanCursor, plan_drop};
use crate::store::StoreState;
use crate::views::dashboard::DashboardSummary;
use crate::views::format::DEFAULT_DATE_FORMAT;
use crate::views::list::{PageView, TaskFilter, paginate};
use crate::worker::StoreCommand;

use self::form::{FormOutcome, TaskForm};

/// Top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Counts, completion, recent and due tasks.
    Dashboard,
    /// Four-column board with drag and drop.
    Kanban,
    /// Filterable, paged task list.
    List,
}

impl Screen {
    /// Tab title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Kanban => "Board",
            Self::List => "Tasks",
        }
    }

    /// Fetches a screen needs when it is shown.
    #[must_use]
    pub fn fetches(self) -> Vec<StoreCommand> {
        match self {
            Self::Dashboard => vec![StoreCommand::FetchTasks, StoreCommand::FetchTasksByStatus],
            Self::Kanban => vec![StoreCommand::FetchTasksByStatus],
            Self::List => vec![StoreCommand::FetchTasks],
        }
    }
}

/// List text filter currently receiving keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterInput {
    /// Title/description search.
    Search,
    /// Assignee substring.
    Assignee,
}

/// List screen state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    /// Active filters.
    pub filter: TaskFilter,
    /// 1-based page.
    pub page: usize,
    /// Selected row on the current page.
    pub selected: usize,
    /// Text filter being typed into, if any.
    pub input: Option<FilterInput>,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            filter: TaskFilter::default(),
            page: 1,
            selected: 0,
            input: None,
        }
    }
}

/// A pending delete awaiting `y`/`n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirm {
    /// Task to delete.
    pub id: TaskId,
    /// Title shown in the prompt.
    pub title: String,
}

/// Main application state.
pub struct App {
    /// Visible screen.
    pub screen: Screen,
    /// Latest store snapshot.
    pub state: StoreState,
    /// Kanban selection and drag state.
    pub kanban: KanbanCursor,
    /// List screen state.
    pub list: ListState,
    /// Open task form.
    pub form: Option<TaskForm>,
    /// Open delete prompt.
    pub confirm_delete: Option<DeleteConfirm>,
    /// Transient message from the event loop (queue full and similar).
    pub notice: Option<String>,
    /// Date display format.
    pub date_format: String,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates an app on the dashboard with no data yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            screen: Screen::Dashboard,
            state: StoreState::default(),
            kanban: KanbanCursor::new(),
            list: ListState::default(),
            form: None,
            confirm_delete: None,
            notice: None,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            should_quit: false,
        }
    }

    /// Sets the date display format.
    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Commands to send before the first frame.
    #[must_use]
    pub fn startup_commands(&self) -> Vec<StoreCommand> {
        self.screen.fetches()
    }

    /// Replaces the store snapshot and keeps selections on real rows.
    pub fn apply_state(&mut self, state: StoreState) {
        self.state = state;
        self.kanban.clamp(&self.state.tasks_by_status);
        let page = self.list_page();
        self.list.page = page.page;
        self.list.selected = self.list.selected.min(page.items.len().saturating_sub(1));
    }

    /// Dashboard figures for the current snapshot.
    #[must_use]
    pub fn dashboard(&self, now: DateTime<Utc>) -> DashboardSummary {
        DashboardSummary::compute(&self.state.tasks, &self.state.tasks_by_status, now)
    }

    /// The visible page of the filtered list.
    #[must_use]
    pub fn list_page(&self) -> PageView<Task> {
        paginate(&self.list.filter.apply(&self.state.tasks), self.list.page)
    }

    /// Task under the cursor on the current screen.
    #[must_use]
    pub fn selected_task(&self) -> Option<Task> {
        match self.screen {
            Screen::Dashboard => None,
            Screen::Kanban => {
                let id = self.kanban.selected(&self.state.tasks_by_status)?;
                self.state.tasks_by_status.iter().find(|t| t.id == id).cloned()
            }
            Screen::List => self.list_page().items.get(self.list.selected).cloned(),
        }
    }

    /// Handles a key press and returns the commands it produced.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Vec<StoreCommand> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Vec::new();
        }
        self.notice = None;

        if let Some(form) = self.form.as_mut() {
            return match form.handle_key(key) {
                FormOutcome::Editing => Vec::new(),
                FormOutcome::Cancelled => {
                    self.form = None;
                    Vec::new()
                }
                FormOutcome::Submitted(command) => {
                    self.form = None;
                    self.write(command)
                }
            };
        }

        if let Some(confirm) = self.confirm_delete.take() {
            return match key.code {
                KeyCode::Char('y' | 'Y') => self.write(StoreCommand::DeleteTask(confirm.id)),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Vec::new(),
                _ => {
                    self.confirm_delete = Some(confirm);
                    Vec::new()
                }
            };
        }

        if self.screen == Screen::List && self.list.input.is_some() {
            self.handle_filter_input(key);
            return Vec::new();
        }

        if self.kanban.is_dragging() {
            return self.handle_drag_key(key);
        }

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                Vec::new()
            }
            KeyCode::Char('1') => self.switch_to(Screen::Dashboard),
            KeyCode::Char('2') => self.switch_to(Screen::Kanban),
            KeyCode::Char('3') => self.switch_to(Screen::List),
            KeyCode::Char('r') => self.screen.fetches(),
            KeyCode::Char('x') => vec![StoreCommand::ClearError],
            KeyCode::Char('n') => {
                let status = match self.screen {
                    Screen::Kanban => self.kanban.column(),
                    _ => TaskStatus::Todo,
                };
                self.form = Some(TaskForm::create(status));
                Vec::new()
            }
            KeyCode::Char('e') => {
                if let Some(task) = self.selected_task() {
                    self.form = Some(TaskForm::edit(&task));
                }
                Vec::new()
            }
            KeyCode::Char('d') => {
                if let Some(task) = self.selected_task() {
                    self.confirm_delete = Some(DeleteConfirm {
                        id: task.id,
                        title: task.title,
                    });
                }
                Vec::new()
            }
            _ => {
                match self.screen {
                    Screen::Dashboard => {}
                    Screen::Kanban => self.handle_kanban_key(key),
                    Screen::List => self.handle_list_key(key),
                }
                Vec::new()
            }
        }
    }

    /// Records a message from the event loop.
    pub fn set_notice(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    fn switch_to(&mut self, screen: Screen) -> Vec<StoreCommand> {
        self.screen = screen;
        screen.fetches()
    }

    /// The store refetches only the projection after a write; screens that
    /// read the flat list also ask for it.
    fn write(&self, command: StoreCommand) -> Vec<StoreCommand> {
        let mut commands = vec![command];
        if self.screen != Screen::Kanban {
            commands.push(StoreCommand::FetchTasks);
        }
        commands
    }

    fn handle_kanban_key(&mut self, key: KeyEvent) {
        let board = &self.state.tasks_by_status;
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.kanban.left(board),
            KeyCode::Right | KeyCode::Char('l') => self.kanban.right(board),
            KeyCode::Up | KeyCode::Char('k') => self.kanban.up(board),
            KeyCode::Down | KeyCode::Char('j') => self.kanban.down(board),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.kanban.grab(board);
            }
            _ => {}
        }
    }

    fn handle_drag_key(&mut self, key: KeyEvent) -> Vec<StoreCommand> {
        let board = &self.state.tasks_by_status;
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.kanban.left(board),
            KeyCode::Right | KeyCode::Char('l') => self.kanban.right(board),
            KeyCode::Up | KeyCode::Char('k') => self.kanban.up(board),
            KeyCode::Down | KeyCode::Char('j') => self.kanban.down(board),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let plan = self.kanban.drop_card().as_ref().and_then(plan_drop);
                return plan.map(StoreCommand::from).into_iter().collect();
            }
            KeyCode::Esc => {
                self.kanban.cancel();
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        let page = self.list_page();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.list.selected = self.list.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let last = page.items.len().saturating_sub(1);
                self.list.selected = (self.list.selected + 1).min(last);
            }
            KeyCode::Right | KeyCode::PageDown | KeyCode::Char(']') => {
                self.set_page(page.page + 1);
            }
            KeyCode::Left | KeyCode::PageUp | KeyCode::Char('[') => {
                self.set_page(page.page.saturating_sub(1));
            }
            KeyCode::Char('/') => self.list.input = Some(FilterInput::Search),
            KeyCode::Char('a') => self.list.input = Some(FilterInput::Assignee),
            KeyCode::Char('s') => {
                self.list.filter.status = next_option(self.list.filter.status, &KANBAN_COLUMNS);
                self.set_page(1);
            }
            KeyCode::Char('p') => {
                self.list.filter.priority =
                    next_option(self.list.filter.priority, &TaskPriority::ALL);
                self.set_page(1);
            }
            KeyCode::Char('c') => {
                self.list.filter = TaskFilter::default();
                self.set_page(1);
            }
            _ => {}
        }
    }

    fn handle_filter_input(&mut self, key: KeyEvent) {
        let Some(input) = self.list.input else {
            return;
        };
        let text = match input {
            FilterInput::Search => &mut self.list.filter.search,
            FilterInput::Assignee => &mut self.list.filter.assignee,
        };
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.list.input = None,
            KeyCode::Backspace => {
                text.pop();
                self.set_page(1);
            }
            KeyCode::Char(c) => {
                text.push(c);
                self.set_page(1);
            }
            _ => {}
        }
    }

    fn set_page(&mut self, page: usize) {
        self.list.page = page;
        self.list.page = self.list_page().page;
        self.list.selected = 0;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Cycles `None -> first -> ... -> last -> None`.
fn next_option<T: Copy + PartialEq>(current: Option<T>, all: &[T]) -> Option<T> {
    match current {
        None => all.first().copied(),
        Some(value) => {
            let i = all.iter().position(|v| *v == value)?;
            all.get(i + 1).copied()
        }
    }
}
