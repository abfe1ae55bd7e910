//! Property-based tests for the service board's position bookkeeping.
//!
//! Uses proptest to verify:
//! 1. After any sequence of create / update / reposition / delete, every
//!    column's positions are exactly `1..=n`.
//! 2. Repeating a reposition leaves the board unchanged.
//! 3. A reposition lands the task at the requested slot, clamped to the end.

use proptest::prelude::*;
use taskboard_proto::task::{
    KANBAN_COLUMNS, PositionUpdate, TaskCreate, TaskId, TaskStatus, TaskUpdate, TasksByStatus,
};
use taskboard_server::board::Board;

#[derive(Debug, Clone)]
enum Op {
    Create(TaskStatus),
    ChangeStatus(i64, TaskStatus),
    Reposition(i64, TaskStatus, u32),
    Delete(i64),
}

fn arb_status() -> impl Strategy<Value = TaskStatus> {
    prop::sample::select(KANBAN_COLUMNS.to_vec())
}

/// Ids in `1..=12` so operations often hit existing tasks and sometimes miss.
fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => arb_status().prop_map(Op::Create),
        1 => (1..=12i64, arb_status()).prop_map(|(id, s)| Op::ChangeStatus(id, s)),
        3 => (1..=12i64, arb_status(), 1..=15u32).prop_map(|(id, s, p)| Op::Reposition(id, s, p)),
        1 => (1..=12i64).prop_map(Op::Delete),
    ]
}

fn apply(board: &mut Board, op: &Op) {
    // Unknown ids are expected to fail; only the invariant matters here.
    let _ = match *op {
        Op::Create(status) => board
            .create(TaskCreate {
                status: Some(status),
                ..TaskCreate::new("generated")
            })
            .map(|_| ()),
        Op::ChangeStatus(id, status) => board
            .update(
                TaskId::new(id),
                TaskUpdate {
                    status: Some(status),
                    ..TaskUpdate::default()
                },
            )
            .map(|_| ()),
        Op::Reposition(id, status, position) => board
            .reposition(TaskId::new(id), PositionUpdate { status, position })
            .map(|_| ()),
        Op::Delete(id) => board.delete(TaskId::new(id)).map(|_| ()),
    };
}

fn layout(projection: &TasksByStatus) -> Vec<Vec<(i64, u32)>> {
    projection
        .columns()
        .map(|(_, tasks)| tasks.iter().map(|t| (t.id.get(), t.position)).collect())
        .collect()
}

proptest! {
    #[test]
    fn positions_stay_dense(ops in prop::collection::vec(arb_op(), 0..60)) {
        let mut board = Board::new();
        for op in &ops {
            apply(&mut board, op);
        }
        let projection = board.by_status();
        prop_assert_eq!(projection.len(), board.len());
        for (_, tasks) in projection.columns() {
            let positions: Vec<u32> = tasks.iter().map(|t| t.position).collect();
            let expected: Vec<u32> = (1..=u32::try_from(tasks.len()).unwrap()).collect();
            prop_assert_eq!(positions, expected);
        }
    }

    #[test]
    fn reposition_is_idempotent(
        ops in prop::collection::vec(arb_op(), 0..40),
        id in 1..=12i64,
        status in arb_status(),
        position in 1..=15u32,
    ) {
        let mut board = Board::new();
        for op in &ops {
            apply(&mut board, op);
        }
        let update = PositionUpdate { status, position };
        if board.reposition(TaskId::new(id), update).is_ok() {
            let once = layout(&board.by_status());
            board.reposition(TaskId::new(id), update).unwrap();
            prop_assert_eq!(once, layout(&board.by_status()));
        }
    }

    #[test]
    fn reposition_lands_on_clamped_target(
        ops in prop::collection::vec(arb_op(), 1..40),
        id in 1..=12i64,
        status in arb_status(),
        position in 1..=15u32,
    ) {
        let mut board = Board::new();
        for op in &ops {
            apply(&mut board, op);
        }
        if let Ok(task) = board.reposition(TaskId::new(id), PositionUpdate { status, position }) {
            let column = board.by_status();
            let column = column.column(status);
            let n = u32::try_from(column.len()).unwrap();
            prop_assert_eq!(task.position, position.min(n));
            let index = usize::try_from(task.position - 1).unwrap();
            prop_assert_eq!(column[index].id, task.id);
        }
    }
}
