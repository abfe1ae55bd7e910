//! End-to-end tests for the task store against an in-process service.
//!
//! Each test starts the REST service on an ephemeral port and drives a
//! `TaskStore<HttpTaskRepository>` through it, checking:
//! - create on an empty board lands at todo/1 and shows in the projection
//! - invalid payloads never reach the service
//! - fetched list and projection describe the same task set
//! - delete-then-refetch removes the task everywhere
//! - a failed write leaves the cached projection intact

use std::collections::BTreeSet;

use taskboard::repository::TaskRepository;
use taskboard::repository::http::HttpTaskRepository;
use taskboard::store::{StoreError, TaskStore};
use taskboard_proto::task::{TaskCreate, TaskId, TaskStatus, TaskUpdate};
use taskboard_proto::validation::ValidationError;
use url::Url;

async fn start_service() -> (Url, tokio::task::JoinHandle<()>) {
    let (addr, handle) = taskboard_server::api::start_server("127.0.0.1:0")
        .await
        .expect("failed to start task service");
    (Url::parse(&format!("http://{addr}")).unwrap(), handle)
}

fn store_for(url: &Url) -> TaskStore<HttpTaskRepository> {
    TaskStore::new(HttpTaskRepository::new(url.clone()).unwrap())
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn create_on_empty_board() {
    let (url, _handle) = start_service().await;
    let mut store = store_for(&url);

    let task = store
        .create_task(TaskCreate::new("Write spec"))
        .await
        .unwrap();
    assert_eq!(task.id, TaskId::new(1));
    assert_eq!(task.status, TaskStatus::Todo);
    assert_eq!(task.position, 1);

    let state = store.state();
    assert_eq!(state.tasks_by_status.todo, vec![task]);
    assert!(!state.loading);
    assert!(state.error.is_none());
}

#[tokio::test]
async fn long_title_is_rejected_before_the_network() {
    let (url, _handle) = start_service().await;
    let mut store = store_for(&url);

    let err = store
        .create_task(TaskCreate::new("x".repeat(256)))
        .await
        .unwrap_err();
    assert!(matches!(
        &err,
        StoreError::Validation(errors) if errors.contains(&ValidationError::TitleTooLong)
    ));
    assert_eq!(
        store.state().error.as_deref(),
        Some("title exceeds maximum length")
    );

    // Nothing was created on the service.
    let probe = HttpTaskRepository::new(url).unwrap();
    assert_eq!(probe.list().await.unwrap().total, 0);
}

// =============================================================================
// Fetch consistency
// =============================================================================

#[tokio::test]
async fn list_and_projection_agree() {
    let (url, _handle) = start_service().await;
    let mut store = store_for(&url);

    for (title, status) in [
        ("A", TaskStatus::Todo),
        ("B", TaskStatus::Review),
        ("C", TaskStatus::Todo),
        ("D", TaskStatus::Done),
    ] {
        store
            .create_task(TaskCreate {
                status: Some(status),
                ..TaskCreate::new(title)
            })
            .await
            .unwrap();
    }
    let moved = store.state().tasks_by_status.todo[0].id;
    store
        .update_task(
            moved,
            TaskUpdate {
                status: Some(TaskStatus::InProgress),
                ..TaskUpdate::default()
            },
        )
        .await
        .unwrap();

    store.fetch_tasks().await.unwrap();
    store.fetch_tasks_by_status().await.unwrap();
    let state = store.state();

    let from_list: BTreeSet<TaskId> = state.tasks.iter().map(|t| t.id).collect();
    let from_columns: BTreeSet<TaskId> = state.tasks_by_status.iter().map(|t| t.id).collect();
    assert_eq!(from_list, from_columns);
    assert_eq!(state.tasks.len(), state.tasks_by_status.len());

    for (status, column) in state.tasks_by_status.columns() {
        assert!(column.iter().all(|t| t.status == status));
        assert!(column.windows(2).all(|w| w[0].position <= w[1].position));
    }
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn delete_then_refetch() {
    let (url, _handle) = start_service().await;
    let mut store = store_for(&url);
    let keep = store.create_task(TaskCreate::new("keep")).await.unwrap();
    let gone = store.create_task(TaskCreate::new("gone")).await.unwrap();

    store.delete_task(gone.id).await.unwrap();
    store.fetch_tasks().await.unwrap();

    let state = store.state();
    assert!(state.tasks.iter().all(|t| t.id != gone.id));
    assert!(!state.tasks_by_status.contains(gone.id));
    assert_eq!(state.tasks_by_status.todo[0].id, keep.id);
    assert_eq!(state.tasks_by_status.todo[0].position, 1);
}

#[tokio::test]
async fn deleting_missing_task_reports_service_message() {
    let (url, _handle) = start_service().await;
    let mut store = store_for(&url);

    let err = store.delete_task(TaskId::new(42)).await.unwrap_err();
    assert_eq!(err.to_string(), "failed to delete task: task 42 not found (HTTP 404)");
    assert_eq!(store.state().error, Some(err.to_string()));
    assert!(!store.state().loading);
}

// =============================================================================
// Error isolation
// =============================================================================

#[tokio::test]
async fn failed_write_keeps_previous_projection() {
    let (url, _handle) = start_service().await;
    let mut store = store_for(&url);
    store.create_task(TaskCreate::new("A")).await.unwrap();
    let before = store.state().tasks_by_status;

    let err = store
        .update_task(TaskId::new(99), TaskUpdate {
            title: Some("ghost".to_string()),
            ..TaskUpdate::default()
        })
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to update task: task 99 not found (HTTP 404)"
    );
    let state = store.state();
    assert_eq!(state.error, Some(err.to_string()));
    assert_eq!(state.tasks_by_status, before);
    assert!(!state.loading);

    store.clear_error();
    assert!(store.state().error.is_none());
    assert_eq!(store.state().tasks_by_status, before);
}

#[tokio::test]
async fn unreachable_service_sets_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let mut store = store_for(&Url::parse(&format!("http://{addr}")).unwrap());

    assert!(store.fetch_tasks_by_status().await.is_err());
    let state = store.state();
    assert!(
        state
            .error
            .as_deref()
            .unwrap()
            .starts_with("failed to fetch tasks by status:")
    );
    assert!(!state.loading);
    assert!(state.tasks_by_status.is_empty());
}
