//! Pointer-driven selection state and gesture classification.
//!
//! [`InteractionState`] is a small state machine over [`Selection`]:
//!
//! | Selection      | Input             | Result                                   |
//! |----------------|-------------------|------------------------------------------|
//! | `Idle`         | click edge `e`    | `Edge(e)`                                |
//! | any other      | click edge        | `Idle`                                   |
//! | `Idle`         | click node `n`    | `Element(n)`                             |
//! | `Element(p)`   | click node `n≠p`  | emit `connect {p, n}`, `Idle`            |
//! | `Element(p)`   | click node `p`    | `Idle`                                   |
//! | `Edge(_)`      | click node        | `Idle`                                   |
//! | not `Idle`     | delete key        | emit `delete {selected}`, unchanged      |
//!
//! Highlighting is derived from the selection: the selected cell is the
//! only highlighted one.
//!
//! The state machine does not emit anything itself; methods return the
//! intent (if any) and the caller hands it to the [`crate::events::EventRegistry`].

use crate::config::DeleteKey;
use crate::drag::{DragTracker, PendingDrag};
use crate::events::DiagramEvent;
use crate::graph::DiagramGraph;
use crate::snapshot::Position;

/// What the user last clicked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Idle,
    /// A node, waiting for a second node click to connect to.
    Element(String),
    Edge(String),
}

impl Selection {
    /// Id of the selected cell, if any.
    pub fn id(&self) -> Option<&str> {
        match self {
            Selection::Idle => None,
            Selection::Element(id) | Selection::Edge(id) => Some(id),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Selection::Idle)
    }
}

/// Selection plus the in-flight drag of one diagram instance.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    selection: Selection,
    drag: DragTracker,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Node currently highlighted, if any.
    pub fn highlighted_node(&self) -> Option<&str> {
        match &self.selection {
            Selection::Element(id) => Some(id),
            _ => None,
        }
    }

    /// Edge currently highlighted, if any.
    pub fn highlighted_edge(&self) -> Option<&str> {
        match &self.selection {
            Selection::Edge(id) => Some(id),
            _ => None,
        }
    }

    pub fn pending_drag(&self) -> Option<&PendingDrag> {
        self.drag.pending()
    }

    /// Handle a click on a node.
    ///
    /// Returns a `connect` intent when this click completes a two-click
    /// gesture between two different nodes.
    pub fn click_node(&mut self, id: &str) -> Option<DiagramEvent> {
        match std::mem::take(&mut self.selection) {
            Selection::Idle => {
                self.selection = Selection::Element(id.to_string());
                None
            }
            Selection::Element(previous) if previous != id => {
                Some(DiagramEvent::connect(previous, id))
            }
            // Self-click, or a node click after an edge: just clear.
            Selection::Element(_) | Selection::Edge(_) => None,
        }
    }

    /// Handle a click on an edge.
    ///
    /// Edges never start a connect gesture: from `Idle` the edge becomes
    /// selected, otherwise the selection is cleared.
    pub fn click_edge(&mut self, id: &str) {
        self.selection = match self.selection {
            Selection::Idle => Selection::Edge(id.to_string()),
            _ => Selection::Idle,
        };
    }

    /// Handle a key press.
    ///
    /// The delete key emits a `delete` intent for the selected cell. The
    /// selection itself is left as it is; only a click clears it.
    pub fn key_pressed(&self, text: &str, delete_key: DeleteKey) -> Option<DiagramEvent> {
        if !delete_key.matches(text) {
            return None;
        }
        self.selection.id().map(DiagramEvent::delete)
    }

    /// Record a node position change, whatever the selection.
    pub fn node_moved(&mut self, id: &str, position: Position) {
        self.drag.record(id, position);
    }

    /// Handle pointer release: flush the pending drag as a `drop` intent.
    pub fn pointer_released(&mut self) -> Option<DiagramEvent> {
        self.drag.release()
    }

    /// Forget selection and drag state that refers to cells no longer in `graph`.
    pub fn retain_in(&mut self, graph: &DiagramGraph) {
        let stale = match &self.selection {
            Selection::Idle => false,
            Selection::Element(id) => !graph.contains_node(id),
            Selection::Edge(id) => !graph.contains_edge(id),
        };
        if stale {
            self.selection = Selection::Idle;
        }
        self.drag.retain_if(|id| graph.contains_node(id));
    }
}
