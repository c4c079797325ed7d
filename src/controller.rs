//! High-level controller that keeps a canvas in sync with a domain snapshot.
//!
//! The [`DiagramController`] owns the backing graph, the selection state
//! machine and the intent handlers of one diagram, and exposes both the
//! rebuild entry point ([`update_graph`](DiagramController::update_graph))
//! and the gesture inputs a canvas feeds it.
//!
//! # Example
//!
//! ```ignore
//! use solution_diagram::{DiagramController, NodeRow, EdgeRow};
//!
//! slint::include_modules!();
//!
//! fn main() {
//!     let window = MainWindow::new().unwrap();
//!     let ctrl = DiagramController::new();
//!
//!     // Canvas rows
//!     let nodes = Rc::new(VecModel::default());
//!     ctrl.bind_node_model(nodes.clone(), |row: &NodeRow| NodeData::from(row));
//!     window.set_nodes(ModelRc::from(nodes));
//!
//!     // Gestures from the UI
//!     window.on_node_clicked(ctrl.node_clicked_callback());
//!     window.on_edge_clicked(ctrl.edge_clicked_callback());
//!     window.on_node_moved(ctrl.node_moved_callback());
//!     window.on_pointer_released(ctrl.pointer_released_callback());
//!     window.on_key_pressed(ctrl.key_pressed_callback());
//!
//!     // Intents back to the domain store
//!     ctrl.on_connect(move |event| store.add_connection(&event.source, &event.destination));
//!     ctrl.on_drop(move |event| store.set_position(&event.id, event.x, event.y));
//!     ctrl.on_delete(move |event| store.remove(&event.id));
//!
//!     // Whenever the store changes
//!     ctrl.update_graph(&store.components(), &store.connections(), &store.layout());
//!
//!     window.run().unwrap();
//! }
//! ```

use log::{debug, error, info, trace};
use slint::{Color, SharedString, VecModel};
use std::cell::RefCell;
use std::rc::Rc;

use crate::config::DiagramConfig;
use crate::drag::{PendingDrag, PointerGesture};
use crate::error::DiagramError;
use crate::events::{ConnectEvent, DeleteEvent, DiagramEvent, DropEvent, EventRegistry};
use crate::graph::{DiagramGraph, Insertion};
use crate::hit_test::{cell_at, CellHit};
use crate::models::{CanvasModels, EdgeRow, NodeRow};
use crate::selection::{InteractionState, Selection};
use crate::shape::{EdgeCell, NodeCell, ShapeFactory};
use crate::snapshot::{ComponentRecord, ConnectionRecord, Layout, Position, Snapshot};

/// Controller that synchronizes a diagram canvas with the domain store.
///
/// This handles:
/// - Full rebuilds of the backing graph from a snapshot
/// - Idempotent node/edge creation
/// - Selection, two-click connect and delete-key handling
/// - Drag buffering and `drop` intents on pointer release
/// - Emitting intents to the registered handlers
/// - Pushing rows to bound Slint models
///
/// All state lives behind `Rc<RefCell<_>>`; clone this controller to share
/// it across callbacks. Handlers are always invoked with no internal borrow
/// held, so they may call back into the controller (including
/// [`update_graph`](Self::update_graph)).
#[derive(Clone)]
pub struct DiagramController {
    config: Rc<DiagramConfig>,
    factory: Rc<ShapeFactory>,
    graph: Rc<RefCell<DiagramGraph>>,
    interaction: Rc<RefCell<InteractionState>>,
    gesture: Rc<RefCell<Option<PointerGesture>>>,
    events: Rc<RefCell<EventRegistry>>,
    models: Rc<RefCell<CanvasModels>>,
}

impl Default for DiagramController {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagramController {
    /// Create a new controller with default settings.
    pub fn new() -> Self {
        Self::with_config(DiagramConfig::default())
    }

    pub fn with_config(config: DiagramConfig) -> Self {
        let factory = ShapeFactory::new(&config);
        Self {
            config: Rc::new(config),
            factory: Rc::new(factory),
            graph: Rc::new(RefCell::new(DiagramGraph::new())),
            interaction: Rc::new(RefCell::new(InteractionState::new())),
            gesture: Rc::new(RefCell::new(None)),
            events: Rc::new(RefCell::new(EventRegistry::new())),
            models: Rc::new(RefCell::new(CanvasModels::new())),
        }
    }

    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    /// Get access to the backing graph.
    pub fn graph(&self) -> Rc<RefCell<DiagramGraph>> {
        self.graph.clone()
    }

    /// Current selection.
    pub fn selection(&self) -> Selection {
        self.interaction.borrow().selection().clone()
    }

    /// Position change waiting for pointer release, if any.
    pub fn pending_drag(&self) -> Option<PendingDrag> {
        self.interaction.borrow().pending_drag().cloned()
    }

    // === Intent handlers ===

    /// Register the `connect` handler, replacing any previous one.
    pub fn on_connect(&self, handler: impl Fn(&ConnectEvent) + 'static) {
        self.events.borrow_mut().on_connect(handler);
    }

    /// Register the `drop` handler, replacing any previous one.
    pub fn on_drop(&self, handler: impl Fn(&DropEvent) + 'static) {
        self.events.borrow_mut().on_drop(handler);
    }

    /// Register the `delete` handler, replacing any previous one.
    pub fn on_delete(&self, handler: impl Fn(&DeleteEvent) + 'static) {
        self.events.borrow_mut().on_delete(handler);
    }

    fn emit(&self, event: DiagramEvent) {
        debug!(kind = event.kind().name(); "Emitting intent");
        let registry = self.events.borrow().clone();
        registry.emit(event);
    }

    // === Canvas models ===

    /// Bind a Slint model that receives one item per node, and fill it.
    pub fn bind_node_model<P, F>(&self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(&NodeRow) -> P + 'static,
    {
        self.models.borrow_mut().bind_nodes(model, constructor);
        self.sync_models();
    }

    /// Bind a Slint model that receives one item per edge, and fill it.
    pub fn bind_edge_model<P, F>(&self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(&EdgeRow) -> P + 'static,
    {
        self.models.borrow_mut().bind_edges(model, constructor);
        self.sync_models();
    }

    fn sync_models(&self) {
        let models = self.models.borrow();
        if !models.is_bound() {
            return;
        }
        models.sync(&self.graph.borrow(), &self.interaction.borrow(), &self.factory);
    }

    // === Graph synchronization ===

    /// Rebuild the whole graph from a domain snapshot.
    ///
    /// Clears every cell, then creates all nodes, then all edges. Positions
    /// come from `layout`, or the configured default when a component has
    /// no entry. A connection whose endpoints cannot be resolved is skipped
    /// and a `delete` intent is emitted for it once the rebuild is done.
    pub fn update_graph<C, E>(&self, components: &[C], connections: &[E], layout: &Layout)
    where
        C: ComponentRecord,
        E: ConnectionRecord,
    {
        let mut dangling = Vec::new();
        {
            let mut graph = self.graph.borrow_mut();
            graph.clear();

            for component in components {
                let position = layout
                    .get(component.id())
                    .map(|entry| entry.position)
                    .unwrap_or(self.config.default_position);
                self.add_node(&mut graph, component.id(), position, component.name());
            }

            for connection in connections {
                let result = self.add_edge(
                    &mut graph,
                    connection.id(),
                    connection.source(),
                    connection.destination(),
                    connection.color(),
                );
                if let Err(err) = result {
                    let edge_id = err.edge_id().unwrap_or(connection.id()).to_string();
                    error!(edge = edge_id.as_str(); "Dropping connection: {err}");
                    dangling.push(edge_id);
                }
            }

            info!(
                nodes = graph.node_count(),
                edges = graph.edge_count(),
                dangling = dangling.len();
                "Graph rebuilt"
            );
            self.interaction.borrow_mut().retain_in(&graph);
        }

        self.sync_models();
        for id in dangling {
            self.emit(DiagramEvent::delete(id));
        }
    }

    /// Rebuild the graph from a deserialized [`Snapshot`].
    pub fn apply_snapshot(&self, snapshot: &Snapshot) {
        self.update_graph(&snapshot.components, &snapshot.connections, &snapshot.layout);
    }

    /// Create a node at `(x, y)`.
    ///
    /// If a node with this id already exists it is returned unchanged.
    pub fn create_node(&self, id: &str, x: f32, y: f32, label: &str) -> NodeCell {
        let cell = {
            let mut graph = self.graph.borrow_mut();
            self.add_node(&mut graph, id, Position::new(x, y), label)
        };
        self.sync_models();
        cell
    }

    /// Create a directed edge from `source` to `target`.
    ///
    /// If an edge already connects `source` to `target` it is returned
    /// unchanged. Fails with [`DiagramError::MissingEndpoint`] if either node
    /// is absent, in which case nothing is added.
    pub fn create_edge(
        &self,
        id: &str,
        source: &str,
        target: &str,
        color: Option<Color>,
    ) -> Result<EdgeCell, DiagramError> {
        let cell = {
            let mut graph = self.graph.borrow_mut();
            self.add_edge(&mut graph, id, source, target, color)?
        };
        self.sync_models();
        Ok(cell)
    }

    fn add_node(
        &self,
        graph: &mut DiagramGraph,
        id: &str,
        position: Position,
        label: &str,
    ) -> NodeCell {
        if let Some(existing) = graph.node(id) {
            debug!(id = id; "Node already present");
            return existing.clone();
        }

        let cell = self.factory.node(id, position, label);
        graph.insert_node(cell.clone());
        debug!(id = id, x = position.x, y = position.y, label = label; "Node created");
        cell
    }

    fn add_edge(
        &self,
        graph: &mut DiagramGraph,
        id: &str,
        source: &str,
        target: &str,
        color: Option<Color>,
    ) -> Result<EdgeCell, DiagramError> {
        let cell = self.factory.edge(id, source, target, color);
        match graph.insert_edge(cell.clone())? {
            Insertion::Created => {
                debug!(id = id, source = source, target = target; "Edge created");
                Ok(cell)
            }
            Insertion::Existing(existing) => {
                debug!(id = id, existing = existing.as_str(); "Edge already present");
                Ok(graph.edge(&existing).cloned().unwrap_or(cell))
            }
        }
    }

    // === Gesture inputs ===

    /// Handle a click on a node.
    pub fn node_clicked(&self, id: &str) {
        if !self.graph.borrow().contains_node(id) {
            trace!(id = id; "Click on unknown node ignored");
            return;
        }
        let event = self.interaction.borrow_mut().click_node(id);
        debug!(id = id, selection:? = self.selection(); "Node clicked");
        self.sync_models();
        if let Some(event) = event {
            self.emit(event);
        }
    }

    /// Handle a click on an edge.
    pub fn edge_clicked(&self, id: &str) {
        if !self.graph.borrow().contains_edge(id) {
            trace!(id = id; "Click on unknown edge ignored");
            return;
        }
        self.interaction.borrow_mut().click_edge(id);
        debug!(id = id, selection:? = self.selection(); "Edge clicked");
        self.sync_models();
    }

    /// Handle a key press. Returns `true` if it produced an intent.
    pub fn key_pressed(&self, text: &str) -> bool {
        let event = self
            .interaction
            .borrow()
            .key_pressed(text, self.config.delete_key);
        match event {
            Some(event) => {
                self.emit(event);
                true
            }
            None => false,
        }
    }

    /// Handle a node position change reported by the canvas.
    ///
    /// Only nodes created by this controller are tracked; changes for
    /// anything else are ignored.
    pub fn node_moved(&self, id: &str, x: f32, y: f32) {
        let position = Position::new(x, y);
        let tracked = self.graph.borrow_mut().set_node_position(id, position);
        if !tracked {
            trace!(id = id; "Position change for unknown node ignored");
            return;
        }
        self.interaction.borrow_mut().node_moved(id, position);
        self.sync_models();
    }

    /// Handle pointer release: emits `drop` if a drag is pending.
    pub fn pointer_released(&self) {
        let event = self.interaction.borrow_mut().pointer_released();
        if let Some(event) = event {
            self.emit(event);
        }
    }

    // === Raw pointer input ===
    //
    // For canvases that only report pointer positions. The controller hit
    // tests, moves dragged nodes and decides whether a release was a click.

    /// Pointer pressed at `(x, y)`.
    pub fn pointer_down(&self, x: f32, y: f32) {
        let gesture = {
            let graph = self.graph.borrow();
            let hit = cell_at(&graph, x, y, self.config.edge_hit_tolerance);
            let node_position = match &hit {
                Some(CellHit::Node(id)) => graph.node(id).map(|node| node.position),
                _ => None,
            };
            PointerGesture::press(hit, x, y, node_position)
        };
        *self.gesture.borrow_mut() = Some(gesture);
    }

    /// Pointer moved to `(x, y)`. Drags the pressed node, if any.
    pub fn pointer_move(&self, x: f32, y: f32) {
        let dragged = self
            .gesture
            .borrow_mut()
            .as_mut()
            .and_then(|gesture| gesture.move_to(x, y))
            .map(|(id, position)| (id.to_string(), position));
        if let Some((id, position)) = dragged {
            self.node_moved(&id, position.x, position.y);
        }
    }

    /// Pointer released at `(x, y)`.
    ///
    /// Flushes any pending drag, then treats a press that never moved as a
    /// click on the cell it started on.
    pub fn pointer_up(&self, x: f32, y: f32) {
        self.pointer_move(x, y);
        let gesture = self.gesture.borrow_mut().take();
        self.pointer_released();

        let Some(gesture) = gesture else {
            return;
        };
        if !gesture.is_click() {
            return;
        }
        match gesture.hit() {
            Some(CellHit::Node(id)) => self.node_clicked(id),
            Some(CellHit::Edge(id)) => self.edge_clicked(id),
            None => {}
        }
    }

    // === Callback factories ===

    /// Returns a callback for a node click (`id`).
    pub fn node_clicked_callback(&self) -> impl Fn(SharedString) {
        let ctrl = self.clone();
        move |id| ctrl.node_clicked(&id)
    }

    /// Returns a callback for an edge click (`id`).
    pub fn edge_clicked_callback(&self) -> impl Fn(SharedString) {
        let ctrl = self.clone();
        move |id| ctrl.edge_clicked(&id)
    }

    /// Returns a callback for node position changes (`id, x, y`).
    pub fn node_moved_callback(&self) -> impl Fn(SharedString, f32, f32) {
        let ctrl = self.clone();
        move |id, x, y| ctrl.node_moved(&id, x, y)
    }

    /// Returns a callback for pointer release.
    pub fn pointer_released_callback(&self) -> impl Fn() {
        let ctrl = self.clone();
        move || ctrl.pointer_released()
    }

    /// Returns a callback for key presses (`text`), reporting whether the
    /// key was handled.
    pub fn key_pressed_callback(&self) -> impl Fn(SharedString) -> bool {
        let ctrl = self.clone();
        move |text| ctrl.key_pressed(&text)
    }
}
