//! # Solution Diagram
//!
//! Interactive diagram synchronizer for solution component graphs.
//!
//! The diagram is a pure view over a domain store. Components become node
//! boxes, connections become directed edges, and user gestures are turned
//! into semantic intents (`connect`, `drop`, `delete`) that the application
//! persists before handing the new snapshot back.
//!
//! ## Features
//!
//! - **Full rebuilds** - Every snapshot replaces the whole graph
//! - **Idempotent creation** - Nodes by id, edges by endpoints
//! - **Two-click connect** - Click a node, then another, to request an edge
//! - **Drag buffering** - One `drop` intent per drag, on pointer release
//! - **Typed intents** - Closed [`DiagramEvent`] set with one handler per kind
//! - **Slint models** - Node and edge rows pushed into `VecModel`s
//!
//! ## Quick Start
//!
//! ```
//! use solution_diagram::{Component, Connection, DiagramController, Layout};
//!
//! let ctrl = DiagramController::new();
//! ctrl.on_delete(|event| println!("delete {}", event.id));
//!
//! ctrl.update_graph(
//!     &[Component::new("c1", "Web"), Component::new("c2", "Database")],
//!     &[Connection::new("e1", "c1", "c2")],
//!     &Layout::new(),
//! );
//!
//! assert_eq!(ctrl.graph().borrow().node_count(), 2);
//! ```
//!
//! ## Modules
//!
//! - [`controller`] - [`DiagramController`], the synchronizer and gesture entry points
//! - [`shape`] - [`ShapeFactory`] and the node/edge cells it builds
//! - [`graph`] - [`DiagramGraph`], the backing cell store
//! - [`selection`] - [`InteractionState`], the click/keyboard state machine
//! - [`drag`] - Drag buffering and raw pointer gestures
//! - [`events`] - [`DiagramEvent`] and the [`EventRegistry`]
//! - [`models`] - Row types and Slint model binding
//! - [`snapshot`] - Domain documents and layout
//! - [`config`] - [`DiagramConfig`], loadable from TOML

pub mod config;
pub mod controller;
pub mod drag;
pub mod error;
pub mod events;
pub mod graph;
pub mod models;
pub mod path;
pub mod selection;
pub mod shape;
pub mod snapshot;

pub use config::{DeleteKey, DiagramConfig, EdgeStyle, NodeStyle};
pub use controller::DiagramController;
pub use drag::{DragTracker, PendingDrag, PointerGesture};
pub use error::{DiagramError, Endpoint};
pub use events::{ConnectEvent, DeleteEvent, DiagramEvent, DropEvent, EventKind, EventRegistry};
pub use graph::{DiagramGraph, Insertion};
pub use hit_test::{cell_at, find_edge_at, find_node_at, CellHit};
pub use models::{CanvasModels, EdgeRow, NodeRow};
pub use path::{generate_arrow_path, generate_edge_path, EdgeGeometry};
pub use selection::{InteractionState, Selection};
pub use shape::{EdgeCell, NodeCell, ShapeFactory, Size};
pub use snapshot::{
    Component, ComponentRecord, Connection, ConnectionRecord, Layout, LayoutEntry, Position,
    Snapshot,
};
