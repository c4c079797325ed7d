//! Test harness with an in-memory domain store.
//!
//! Wires a [`DiagramController`] to a tiny store the same way an application
//! would: intents are recorded, applied to the store, and [`settle`]
//! re-runs `update_graph` until no more intents come back.
//!
//! [`settle`]: DiagramHarness::settle

#![allow(dead_code)]

use super::{init_logging, CallbackTracker};
use slint::{Model, VecModel};
use solution_diagram::{
    Component, Connection, DiagramConfig, DiagramController, EdgeRow, Layout, LayoutEntry,
    NodeRow, Position,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Domain store the diagram is a view of.
#[derive(Debug, Default)]
pub struct DomainStore {
    pub components: Vec<Component>,
    pub connections: Vec<Connection>,
    pub layout: Layout,
    next_connection: usize,
    /// Set whenever an intent changed the store.
    dirty: bool,
}

impl DomainStore {
    pub fn add_connection(&mut self, source: &str, destination: &str) {
        self.next_connection += 1;
        let id = format!("new{}", self.next_connection);
        self.connections.push(Connection::new(id, source, destination));
        self.dirty = true;
    }

    pub fn set_position(&mut self, id: &str, x: f32, y: f32) {
        self.layout
            .insert(id.to_string(), LayoutEntry::from(Position::new(x, y)));
        self.dirty = true;
    }

    /// Remove a component or connection. Connections of a removed component
    /// are left behind on purpose; the next rebuild reports them.
    pub fn remove(&mut self, id: &str) {
        self.components.retain(|c| c.id != id);
        self.connections.retain(|c| c.id != id);
        self.layout.remove(id);
        self.dirty = true;
    }
}

/// Controller, store, bound models and tracker for one diagram.
pub struct DiagramHarness {
    pub ctrl: DiagramController,
    pub store: Rc<RefCell<DomainStore>>,
    pub nodes: Rc<VecModel<NodeRow>>,
    pub edges: Rc<VecModel<EdgeRow>>,
    pub tracker: CallbackTracker,
}

impl DiagramHarness {
    /// Two components `c1` ("A") and `c2` ("B") joined by `e1`.
    pub fn new() -> Self {
        let harness = Self::empty();
        {
            let mut store = harness.store.borrow_mut();
            store.components = vec![Component::new("c1", "A"), Component::new("c2", "B")];
            store.connections = vec![Connection::new("e1", "c1", "c2")];
            store
                .layout
                .insert("c1".to_string(), LayoutEntry::from(Position::new(0.0, 0.0)));
            store
                .layout
                .insert("c2".to_string(), LayoutEntry::from(Position::new(200.0, 0.0)));
        }
        harness.settle();
        harness
    }

    pub fn empty() -> Self {
        Self::with_config(DiagramConfig::default())
    }

    pub fn with_config(config: DiagramConfig) -> Self {
        init_logging();
        let ctrl = DiagramController::with_config(config);
        let store = Rc::new(RefCell::new(DomainStore::default()));
        let tracker = CallbackTracker::new();

        ctrl.on_connect({
            let store = store.clone();
            let tracker = tracker.clone();
            move |event| {
                tracker.connect.borrow_mut().push(event.clone());
                store
                    .borrow_mut()
                    .add_connection(&event.source, &event.destination);
            }
        });
        ctrl.on_drop({
            let store = store.clone();
            let tracker = tracker.clone();
            move |event| {
                tracker.drop.borrow_mut().push(event.clone());
                store.borrow_mut().set_position(&event.id, event.x, event.y);
            }
        });
        ctrl.on_delete({
            let store = store.clone();
            let tracker = tracker.clone();
            move |event| {
                tracker.delete.borrow_mut().push(event.clone());
                store.borrow_mut().remove(&event.id);
            }
        });

        let nodes = Rc::new(VecModel::default());
        ctrl.bind_node_model(nodes.clone(), |row: &NodeRow| row.clone());
        let edges = Rc::new(VecModel::default());
        ctrl.bind_edge_model(edges.clone(), |row: &EdgeRow| row.clone());

        Self {
            ctrl,
            store,
            nodes,
            edges,
            tracker,
        }
    }

    /// Push the store into the diagram once.
    pub fn sync(&self) {
        let (components, connections, layout) = {
            let mut store = self.store.borrow_mut();
            store.dirty = false;
            (
                store.components.clone(),
                store.connections.clone(),
                store.layout.clone(),
            )
        };
        self.ctrl.update_graph(&components, &connections, &layout);
    }

    /// Sync until the store stops changing. Returns the number of rebuilds.
    pub fn settle(&self) -> usize {
        let mut rounds = 0;
        loop {
            self.sync();
            rounds += 1;
            if !self.store.borrow().dirty || rounds >= 10 {
                return rounds;
            }
        }
    }

    pub fn node_row(&self, id: &str) -> Option<NodeRow> {
        self.nodes.iter().find(|row| row.id == id)
    }

    pub fn edge_row(&self, id: &str) -> Option<EdgeRow> {
        self.edges.iter().find(|row| row.id == id)
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.iter().map(|row| row.id.to_string()).collect()
    }

    pub fn edge_ids(&self) -> Vec<String> {
        self.edges.iter().map(|row| row.id.to_string()).collect()
    }

    /// Press and release without moving.
    pub fn click_at(&self, x: f32, y: f32) {
        self.ctrl.pointer_down(x, y);
        self.ctrl.pointer_up(x, y);
    }

    /// Press at `from`, move in `steps` increments, release at `to`.
    pub fn drag(&self, from: (f32, f32), to: (f32, f32), steps: usize) {
        self.ctrl.pointer_down(from.0, from.1);
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            self.ctrl
                .pointer_move(from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t);
        }
        self.ctrl.pointer_up(to.0, to.1);
    }

    pub fn press_delete(&self) -> bool {
        let key = self.ctrl.config().delete_key.text();
        self.ctrl.key_pressed(&key)
    }
}
