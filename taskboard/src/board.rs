//! Kanban drag-and-drop reorder protocol.
//!
//! A drag ends in a [`DragOutcome`]: where the card started and where (if
//! anywhere) it was dropped. [`plan_drop`] turns that into at most one
//! reposition request. The board never reorders its own copy of the
//! columns; it waits for the store's next projection refetch.
//!
//! [`KanbanCursor`] is the keyboard rendition of a pointer drag: select a
//! card, grab it, move a hover slot between and within columns, then drop
//! or cancel. The hover slot is presentation state only.

use taskboard_proto::task::{KANBAN_COLUMNS, TaskId, TaskStatus, TasksByStatus};

/// A 0-based slot within a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Column.
    pub column: TaskStatus,
    /// 0-based index within the column.
    pub index: usize,
}

impl Slot {
    /// Creates a slot.
    #[must_use]
    pub const fn new(column: TaskStatus, index: usize) -> Self {
        Self { column, index }
    }
}

/// How a drag gesture ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragOutcome {
    /// The dragged task.
    pub task_id: TaskId,
    /// Where the card was picked up.
    pub source: Slot,
    /// Where it was dropped; `None` when cancelled or dropped outside any
    /// column.
    pub destination: Option<Slot>,
}

/// A reposition request derived from a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reposition {
    /// Task to move.
    pub task_id: TaskId,
    /// Destination column.
    pub status: TaskStatus,
    /// Destination 1-based position.
    pub position: u32,
}

/// Decides what a finished drag should do.
///
/// Returns `None` when there is no destination or the card was dropped back
/// where it started; otherwise a reposition to `destination.index + 1`.
#[must_use]
pub fn plan_drop(outcome: &DragOutcome) -> Option<Reposition> {
    let destination = outcome.destination?;
    if destination == outcome.source {
        return None;
    }
    let position = u32::try_from(destination.index + 1).ok()?;
    Some(Reposition {
        task_id: outcome.task_id,
        status: destination.column,
        position,
    })
}

/// Keyboard-driven selection and drag state over the kanban columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KanbanCursor {
    column: usize,
    row: usize,
    drag: Option<Drag>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Drag {
    task_id: TaskId,
    source: Slot,
    hover: Slot,
}

impl KanbanCursor {
    /// Creates a cursor on the first card of the first column.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Column under the cursor.
    #[must_use]
    pub const fn column(&self) -> TaskStatus {
        KANBAN_COLUMNS[self.column]
    }

    /// Row under the cursor in its column.
    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Whether a card is currently grabbed.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// The grabbed task, if any.
    #[must_use]
    pub fn dragged_task(&self) -> Option<TaskId> {
        self.drag.map(|d| d.task_id)
    }

    /// Where the grabbed card would land if dropped now.
    #[must_use]
    pub fn hover(&self) -> Option<Slot> {
        self.drag.map(|d| d.hover)
    }

    /// The selected task, if the cursor is on a card.
    #[must_use]
    pub fn selected(&self, board: &TasksByStatus) -> Option<TaskId> {
        board.column(self.column()).get(self.row).map(|t| t.id)
    }

    /// Keeps the cursor on a real card after the board changed under it.
    pub fn clamp(&mut self, board: &TasksByStatus) {
        let len = board.column(self.column()).len();
        self.row = self.row.min(len.saturating_sub(1));
        if let Some(drag) = self.drag
            && !board.contains(drag.task_id)
        {
            self.drag = None;
        }
    }

    /// Moves the cursor (or the hover slot while dragging) one column left.
    pub fn left(&mut self, board: &TasksByStatus) {
        self.shift_column(board, -1);
    }

    /// Moves the cursor (or the hover slot while dragging) one column right.
    pub fn right(&mut self, board: &TasksByStatus) {
        self.shift_column(board, 1);
    }

    /// Moves the cursor (or the hover slot while dragging) one row up.
    pub fn up(&mut self, board: &TasksByStatus) {
        if let Some(drag) = self.drag.as_mut() {
            drag.hover.index = drag.hover.index.saturating_sub(1);
        } else {
            self.row = self.row.saturating_sub(1);
        }
        self.clamp(board);
    }

    /// Moves the cursor (or the hover slot while dragging) one row down.
    pub fn down(&mut self, board: &TasksByStatus) {
        if let Some(drag) = self.drag.as_mut() {
            let max = drop_range(board, drag.hover.column, drag.source.column);
            drag.hover.index = (drag.hover.index + 1).min(max);
        } else {
            self.row += 1;
            self.clamp(board);
        }
    }

    /// Picks up the selected card. Returns `false` on an empty column.
    pub fn grab(&mut self, board: &TasksByStatus) -> bool {
        let Some(task_id) = self.selected(board) else {
            return false;
        };
        let source = Slot::new(self.column(), self.row);
        self.drag = Some(Drag {
            task_id,
            source,
            hover: source,
        });
        true
    }

    /// Drops the grabbed card at the hover slot.
    pub fn drop_card(&mut self) -> Option<DragOutcome> {
        let drag = self.drag.take()?;
        self.column = drag.hover.column.column_index();
        self.row = drag.hover.index;
        Some(DragOutcome {
            task_id: drag.task_id,
            source: drag.source,
            destination: Some(drag.hover),
        })
    }

    /// Abandons the drag; the outcome has no destination.
    pub fn cancel(&mut self) -> Option<DragOutcome> {
        let drag = self.drag.take()?;
        Some(DragOutcome {
            task_id: drag.task_id,
            source: drag.source,
            destination: None,
        })
    }

    fn shift_column(&mut self, board: &TasksByStatus, delta: isize) {
        let last = KANBAN_COLUMNS.len() - 1;
        if let Some(drag) = self.drag.as_mut() {
            let next = drag.hover.column.column_index().saturating_add_signed(delta).min(last);
            let column = KANBAN_COLUMNS[next];
            let max = drop_range(board, column, drag.source.column);
            drag.hover = Slot::new(column, drag.hover.index.min(max));
            self.column = next;
        } else {
            self.column = self.column.saturating_add_signed(delta).min(last);
            self.clamp(board);
        }
    }
}

/// Last valid 0-based drop index in `column` for a card coming from
/// `source`: the end of a foreign column, or the last slot of its own.
fn drop_range(board: &TasksByStatus, column: TaskStatus, source: TaskStatus) -> usize {
    let len = board.column(column).len();
    if column == source {
        len.saturating_sub(1)
    } else {
        len
    }
}
