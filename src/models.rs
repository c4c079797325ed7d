//! Canvas binding for the diagram.
//!
//! This module provides [`CanvasModels`], which turns the backing graph and
//! the current highlight into flat rows and pushes them into Slint
//! `VecModel`s for rendering.
//!
//! # Example
//!
//! ```ignore
//! use solution_diagram::{CanvasModels, EdgeRow, NodeRow};
//! use slint::{ModelRc, VecModel};
//! use std::rc::Rc;
//!
//! let nodes = Rc::new(VecModel::<NodeData>::default());
//! ctrl.bind_node_model(nodes.clone(), |row: &NodeRow| NodeData {
//!     id: row.id.clone(),
//!     label: row.label.clone(),
//!     x: row.x,
//!     y: row.y,
//!     highlighted: row.highlighted,
//! });
//! window.set_nodes(ModelRc::from(nodes));
//!
//! // Every rebuild, drag step and selection change now updates `nodes`.
//! ```

use slint::{Color, Model, SharedString, VecModel};
use std::rc::Rc;

use crate::graph::DiagramGraph;
use crate::path::{generate_arrow_path, generate_edge_path, EdgeGeometry};
use crate::selection::InteractionState;
use crate::shape::ShapeFactory;

/// Render data for one node box.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRow {
    pub id: SharedString,
    pub label: SharedString,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f32,
    pub corner_radius: f32,
    pub label_color: Color,
    pub highlighted: bool,
}

/// Render data for one directed edge.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRow {
    pub id: SharedString,
    /// SVG path of the edge line
    pub path_commands: SharedString,
    /// SVG path of the arrow terminator at the target
    pub arrow_commands: SharedString,
    pub color: Color,
    pub stroke_width: f32,
    pub highlighted: bool,
}

/// Internal trait for syncing rows into a Slint model.
trait ModelSyncer<R> {
    fn sync(&self, rows: &[R]);
}

/// Concrete implementation of ModelSyncer for a specific item type.
struct ConcreteModelSyncer<P, F> {
    model: Rc<VecModel<P>>,
    constructor: F,
}

impl<R, P, F> ModelSyncer<R> for ConcreteModelSyncer<P, F>
where
    P: Clone + 'static,
    F: Fn(&R) -> P,
{
    fn sync(&self, rows: &[R]) {
        // Update existing rows or add new ones
        for (i, row) in rows.iter().enumerate() {
            let item = (self.constructor)(row);
            if i < self.model.row_count() {
                self.model.set_row_data(i, item);
            } else {
                self.model.push(item);
            }
        }
        // Remove excess rows
        while self.model.row_count() > rows.len() {
            self.model.remove(self.model.row_count() - 1);
        }
    }
}

/// Node and edge models bound to a Slint UI.
///
/// Nothing is synced until a model is bound with
/// [`bind_nodes`](Self::bind_nodes) or [`bind_edges`](Self::bind_edges).
#[derive(Default)]
pub struct CanvasModels {
    nodes: Option<Box<dyn ModelSyncer<NodeRow>>>,
    edges: Option<Box<dyn ModelSyncer<EdgeRow>>>,
}

impl CanvasModels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a model that receives one item per node.
    ///
    /// # Arguments
    ///
    /// * `model` - The VecModel to sync to
    /// * `constructor` - Builds a model item from a [`NodeRow`]
    pub fn bind_nodes<P, F>(&mut self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(&NodeRow) -> P + 'static,
    {
        self.nodes = Some(Box::new(ConcreteModelSyncer { model, constructor }));
    }

    /// Bind a model that receives one item per edge.
    pub fn bind_edges<P, F>(&mut self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(&EdgeRow) -> P + 'static,
    {
        self.edges = Some(Box::new(ConcreteModelSyncer { model, constructor }));
    }

    pub fn is_bound(&self) -> bool {
        self.nodes.is_some() || self.edges.is_some()
    }

    /// Push the current graph into every bound model.
    pub fn sync(&self, graph: &DiagramGraph, state: &InteractionState, factory: &ShapeFactory) {
        if let Some(nodes) = &self.nodes {
            nodes.sync(&node_rows(graph, state, factory));
        }
        if let Some(edges) = &self.edges {
            edges.sync(&edge_rows(graph, state, factory));
        }
    }
}

/// Node rows in graph order.
pub fn node_rows(
    graph: &DiagramGraph,
    state: &InteractionState,
    factory: &ShapeFactory,
) -> Vec<NodeRow> {
    let highlighted = state.highlighted_node();
    let style = factory.node_style();
    graph
        .nodes()
        .map(|node| NodeRow {
            id: node.id.as_str().into(),
            label: node.label.as_str().into(),
            x: node.position.x,
            y: node.position.y,
            width: node.size.width,
            height: node.size.height,
            fill: style.fill,
            stroke: style.stroke,
            stroke_width: style.stroke_width,
            corner_radius: style.corner_radius,
            label_color: style.label_color,
            highlighted: highlighted == Some(node.id.as_str()),
        })
        .collect()
}

/// Edge rows in graph order, with paths computed from the current node positions.
pub fn edge_rows(
    graph: &DiagramGraph,
    state: &InteractionState,
    factory: &ShapeFactory,
) -> Vec<EdgeRow> {
    let highlighted = state.highlighted_edge();
    let arrow_size = factory.edge_style().arrow_size;
    graph
        .edges()
        .filter_map(|edge| {
            let source = graph.node(&edge.source)?;
            let target = graph.node(&edge.target)?;
            let geometry = EdgeGeometry::between(source.rect(), target.rect());
            Some(EdgeRow {
                id: edge.id.as_str().into(),
                path_commands: generate_edge_path(&geometry).into(),
                arrow_commands: generate_arrow_path(&geometry, arrow_size).into(),
                color: edge.color,
                stroke_width: edge.stroke_width,
                highlighted: highlighted == Some(edge.id.as_str()),
            })
        })
        .collect()
}
