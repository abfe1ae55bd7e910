//! Drag-and-drop reordering end to end: keyboard drag on a `KanbanCursor`,
//! `plan_drop`, the store worker queue, and the real service.

use taskboard::board::{DragOutcome, KanbanCursor, Slot, plan_drop};
use taskboard::repository::http::HttpTaskRepository;
use taskboard::store::{StoreState, TaskStore};
use taskboard::worker::{StoreCommand, spawn_store};
use taskboard_proto::task::{TaskCreate, TaskId, TaskStatus, TasksByStatus};
use url::Url;

async fn start_board(
    titles: &[(&str, TaskStatus)],
) -> (TaskStore<HttpTaskRepository>, Vec<TaskId>) {
    let (addr, _handle) = taskboard_server::api::start_server("127.0.0.1:0")
        .await
        .expect("failed to start task service");
    let url = Url::parse(&format!("http://{addr}")).unwrap();
    let mut store = TaskStore::new(HttpTaskRepository::new(url).unwrap());

    let mut ids = Vec::new();
    for (title, status) in titles {
        let task = store
            .create_task(TaskCreate {
                status: Some(*status),
                ..TaskCreate::new(*title)
            })
            .await
            .unwrap();
        ids.push(task.id);
    }
    (store, ids)
}

/// Moves `store` into a worker, queues `commands` followed by `Shutdown`,
/// and returns the state once the worker has drained the queue.
async fn drain(store: TaskStore<HttpTaskRepository>, commands: Vec<StoreCommand>) -> StoreState {
    let handle = spawn_store(store, 16);
    for command in commands {
        handle.commands.send(command).await.unwrap();
    }
    handle.commands.send(StoreCommand::Shutdown).await.unwrap();
    handle.task.await.unwrap();
    handle.state.borrow().clone()
}

fn todo_ids(state: &StoreState) -> Vec<TaskId> {
    todo_ids_of(&state.tasks_by_status)
}

fn todo_ids_of(board: &TasksByStatus) -> Vec<TaskId> {
    board.todo.iter().map(|t| t.id).collect()
}

fn reposition(outcome: &DragOutcome) -> Vec<StoreCommand> {
    plan_drop(outcome).map(StoreCommand::from).into_iter().collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn drag_b_above_a() {
    let (mut store, ids) = start_board(&[("A", TaskStatus::Todo), ("B", TaskStatus::Todo)]).await;
    let (a, b) = (ids[0], ids[1]);

    store.fetch_tasks_by_status().await.unwrap();
    let board = store.state().tasks_by_status;

    let mut cursor = KanbanCursor::new();
    cursor.down(&board);
    assert!(cursor.grab(&board));
    cursor.up(&board);
    let outcome = cursor.drop_card().unwrap();
    let commands = reposition(&outcome);
    assert_eq!(
        commands,
        vec![StoreCommand::UpdateTaskPosition {
            id: b,
            status: TaskStatus::Todo,
            position: 1,
        }]
    );

    let state = drain(store, commands).await;
    assert_eq!(todo_ids(&state), vec![b, a]);
    let positions: Vec<u32> = state.tasks_by_status.todo.iter().map(|t| t.position).collect();
    assert_eq!(positions, vec![1, 2]);
}

#[test]
fn drop_on_source_issues_nothing() {
    let outcome = DragOutcome {
        task_id: TaskId::new(1),
        source: Slot::new(TaskStatus::Review, 2),
        destination: Some(Slot::new(TaskStatus::Review, 2)),
    };
    assert!(reposition(&outcome).is_empty());
}

#[tokio::test]
async fn move_to_end_of_other_column() {
    let (store, ids) = start_board(&[
        ("A", TaskStatus::Todo),
        ("B", TaskStatus::Todo),
        ("C", TaskStatus::Done),
    ])
    .await;
    // Every create refetched the projection.
    let board = store.state().tasks_by_status;

    let mut cursor = KanbanCursor::new();
    cursor.grab(&board);
    for _ in 0..3 {
        cursor.right(&board);
    }
    cursor.down(&board);
    let commands = reposition(&cursor.drop_card().unwrap());

    let state = drain(store, commands).await;
    assert_eq!(todo_ids(&state), vec![ids[1]]);
    assert_eq!(state.tasks_by_status.todo[0].position, 1);
    let done: Vec<(TaskId, u32)> = state
        .tasks_by_status
        .done
        .iter()
        .map(|t| (t.id, t.position))
        .collect();
    assert_eq!(done, vec![(ids[2], 1), (ids[0], 2)]);
    assert_eq!(state.tasks_by_status.done[1].status, TaskStatus::Done);
}

// =============================================================================
// Laws
// =============================================================================

#[tokio::test]
async fn repeated_reposition_is_idempotent() {
    let (mut store, ids) = start_board(&[
        ("A", TaskStatus::Todo),
        ("B", TaskStatus::Todo),
        ("C", TaskStatus::Todo),
    ])
    .await;

    store
        .update_task_position(ids[2], TaskStatus::Todo, 2)
        .await
        .unwrap();
    let once = store.state().tasks_by_status;
    store
        .update_task_position(ids[2], TaskStatus::Todo, 2)
        .await
        .unwrap();
    let twice = store.state().tasks_by_status;

    assert_eq!(todo_ids_of(&once), vec![ids[0], ids[2], ids[1]]);
    let ranks = |board: &TasksByStatus| -> Vec<(TaskId, u32)> {
        board.todo.iter().map(|t| (t.id, t.position)).collect()
    };
    assert_eq!(ranks(&once), ranks(&twice));
}

#[tokio::test]
async fn rapid_drags_apply_in_order() {
    let (store, ids) = start_board(&[
        ("A", TaskStatus::Todo),
        ("B", TaskStatus::Todo),
        ("C", TaskStatus::Todo),
    ])
    .await;
    let to_top = |id| StoreCommand::UpdateTaskPosition {
        id,
        status: TaskStatus::Todo,
        position: 1,
    };

    let state = drain(store, vec![to_top(ids[2]), to_top(ids[1])]).await;
    assert_eq!(todo_ids(&state), vec![ids[1], ids[2], ids[0]]);
    assert!(!state.loading);
    assert!(state.error.is_none());
}

#[tokio::test]
async fn reposition_of_missing_task_sets_error_only() {
    let (store, _ids) = start_board(&[("A", TaskStatus::Todo)]).await;
    let handle = spawn_store(store, 4);
    let mut state = handle.state.clone();

    handle
        .commands
        .send(StoreCommand::UpdateTaskPosition {
            id: TaskId::new(404),
            status: TaskStatus::Todo,
            position: 1,
        })
        .await
        .unwrap();
    let failed = state
        .wait_for(|s| s.error.is_some())
        .await
        .unwrap()
        .clone();
    assert_eq!(
        failed.error.as_deref(),
        Some("failed to update task position: task 404 not found (HTTP 404)")
    );
    assert!(!failed.loading);
}
