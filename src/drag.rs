//! Drag buffering and raw pointer gesture tracking.
//!
//! A node drag produces a stream of position changes. [`DragTracker`] keeps
//! only the latest one and turns it into a single `drop` intent when the
//! pointer is released. [`PointerGesture`] follows one press-move-release
//! sequence so the controller can tell a click from a drag.

use crate::events::DiagramEvent;
use crate::hit_test::CellHit;
use crate::snapshot::Position;

/// Last recorded position of the node being dragged.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDrag {
    pub id: String,
    pub position: Position,
}

impl PendingDrag {
    pub fn into_event(self) -> DiagramEvent {
        DiagramEvent::drop(self.id, self.position.x, self.position.y)
    }
}

/// Holds at most one [`PendingDrag`].
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    pending: Option<PendingDrag>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a position change, replacing whatever was pending.
    pub fn record(&mut self, id: &str, position: Position) {
        self.pending = Some(PendingDrag {
            id: id.to_string(),
            position,
        });
    }

    pub fn pending(&self) -> Option<&PendingDrag> {
        self.pending.as_ref()
    }

    /// Flush on pointer release: the pending drag becomes a `drop` intent.
    ///
    /// Returns `None` (and does nothing) if no drag is pending.
    pub fn release(&mut self) -> Option<DiagramEvent> {
        self.pending.take().map(PendingDrag::into_event)
    }

    /// Discard the pending drag if it belongs to a node that no longer exists.
    pub fn retain_if(&mut self, node_exists: impl Fn(&str) -> bool) {
        if let Some(pending) = &self.pending {
            if !node_exists(&pending.id) {
                self.pending = None;
            }
        }
    }
}

/// One pointer press followed until release.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerGesture {
    hit: Option<CellHit>,
    origin: (f32, f32),
    grab_offset: (f32, f32),
    moved: bool,
}

impl PointerGesture {
    /// Start a gesture at `(x, y)` over `hit`.
    ///
    /// `node_position` is the top-left corner of the pressed node, used to
    /// keep the grab point under the pointer while dragging.
    pub fn press(hit: Option<CellHit>, x: f32, y: f32, node_position: Option<Position>) -> Self {
        let grab_offset = node_position
            .map(|p| (x - p.x, y - p.y))
            .unwrap_or((0.0, 0.0));
        Self {
            hit,
            origin: (x, y),
            grab_offset,
            moved: false,
        }
    }

    pub fn hit(&self) -> Option<&CellHit> {
        self.hit.as_ref()
    }

    /// A gesture that never left its press point is a click.
    pub fn is_click(&self) -> bool {
        !self.moved
    }

    /// Follow the pointer.
    ///
    /// Returns the dragged node and its new top-left position when the press
    /// started on a node and the pointer actually moved.
    pub fn move_to(&mut self, x: f32, y: f32) -> Option<(&str, Position)> {
        if !self.moved && (x, y) == self.origin {
            return None;
        }
        self.moved = true;

        match &self.hit {
            Some(CellHit::Node(id)) => Some((
                id.as_str(),
                Position::new(x - self.grab_offset.0, y - self.grab_offset.1),
            )),
            _ => None,
        }
    }
}
