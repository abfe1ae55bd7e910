//! Integration tests for the TUI wiring: key presses on `App` become
//! `StoreCommand`s, the store worker runs them against the service, and the
//! resulting `StoreState` flows back into `App` and onto the screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};

use taskboard::app::{App, Screen};
use taskboard::repository::http::HttpTaskRepository;
use taskboard::store::{StoreState, TaskStore};
use taskboard::ui;
use taskboard::worker::{StoreCommand, StoreHandle, spawn_store};
use taskboard_proto::task::TaskStatus;
use url::Url;

async fn start_worker() -> StoreHandle {
    let (addr, _handle) = taskboard_server::api::start_server("127.0.0.1:0")
        .await
        .expect("failed to start task service");
    let url = Url::parse(&format!("http://{addr}")).unwrap();
    spawn_store(TaskStore::new(HttpTaskRepository::new(url).unwrap()), 16)
}

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(app: &mut App, handle_commands: &mut Vec<StoreCommand>, text: &str) {
    for c in text.chars() {
        handle_commands.extend(app.handle_key_event(press(KeyCode::Char(c))));
    }
}

/// Runs `commands` in order and waits for the worker to finish them.
async fn run(handle: StoreHandle, commands: Vec<StoreCommand>) -> StoreState {
    for command in commands {
        handle.commands.send(command).await.unwrap();
    }
    handle.commands.send(StoreCommand::Shutdown).await.unwrap();
    handle.task.await.unwrap();
    handle.state.borrow().clone()
}

fn render(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
    terminal.draw(|frame| ui::draw(frame, app)).unwrap();
    let buffer = terminal.backend().buffer().clone();
    buffer
        .content()
        .chunks(usize::from(buffer.area.width))
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[tokio::test]
async fn test_create_from_form_reaches_board() {
    let handle = start_worker().await;
    let mut app = App::new();
    let mut commands = app.startup_commands();

    commands.extend(app.handle_key_event(press(KeyCode::Char('2'))));
    commands.extend(app.handle_key_event(press(KeyCode::Char('n'))));
    type_text(&mut app, &mut commands, "Write spec");
    commands.extend(app.handle_key_event(press(KeyCode::Enter)));
    assert!(app.form.is_none());
    assert!(matches!(
        commands.last(),
        Some(StoreCommand::CreateTask(data)) if data.title == "Write spec"
    ));

    let state = run(handle, commands).await;
    app.apply_state(state);

    let todo = app.state.tasks_by_status.column(TaskStatus::Todo);
    assert_eq!(todo.len(), 1);
    assert_eq!(todo[0].position, 1);
    assert_eq!(app.selected_task().unwrap().title, "Write spec");

    let screen = render(&app);
    assert!(screen.contains("Write spec"));
    assert!(screen.contains("To Do (1)"));
}

#[tokio::test]
async fn test_invalid_form_sends_nothing() {
    let mut app = App::new();
    app.handle_key_event(press(KeyCode::Char('n')));
    let commands = app.handle_key_event(press(KeyCode::Enter));
    assert!(commands.is_empty());

    let screen = render(&app);
    assert!(screen.contains("title is required"));
}

#[tokio::test]
async fn test_error_banner_and_dismiss() {
    let handle = start_worker().await;
    let mut app = App::new();
    app.screen = Screen::List;

    // Deleting a task the service never had surfaces its 404 message.
    let commands = vec![StoreCommand::DeleteTask(taskboard_proto::task::TaskId::new(7))];
    let state = run(handle, commands).await;
    app.apply_state(state);

    assert_eq!(
        app.state.error.as_deref(),
        Some("failed to delete task: task 7 not found (HTTP 404)")
    );
    let screen = render(&app);
    assert!(screen.contains("task 7 not found"));
    assert!(screen.contains("x to dismiss"));

    assert_eq!(
        app.handle_key_event(press(KeyCode::Char('x'))),
        vec![StoreCommand::ClearError]
    );
}

#[tokio::test]
async fn test_dashboard_counts_after_fetch() {
    let handle = start_worker().await;
    let mut app = App::new();
    let mut commands = Vec::new();
    for title in ["one", "two"] {
        commands.extend(app.handle_key_event(press(KeyCode::Char('n'))));
        type_text(&mut app, &mut commands, title);
        commands.extend(app.handle_key_event(press(KeyCode::Enter)));
    }
    // Writes from the dashboard also refresh the flat list.
    assert_eq!(
        commands
            .iter()
            .filter(|c| **c == StoreCommand::FetchTasks)
            .count(),
        2
    );

    let state = run(handle, commands).await;
    app.apply_state(state);
    let summary = app.dashboard(chrono::Utc::now());
    assert_eq!(summary.total, 2);
    assert_eq!(summary.status_count(TaskStatus::Todo), 2);
    assert_eq!(summary.completion_percent, 0);

    let screen = render(&app);
    assert!(screen.contains("Dashboard"));
    assert!(screen.contains("Recently updated"));
}
