//! The two primitive visual cells of a diagram and the factory that builds them.

use slint::Color;

use crate::config::{DiagramConfig, EdgeStyle, NodeStyle};
use crate::snapshot::Position;

/// Width and height of a node box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

/// A rounded box representing one domain component.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeCell {
    pub id: String,
    pub position: Position,
    pub size: Size,
    pub label: String,
}

impl NodeCell {
    /// Bounding box as `(x, y, width, height)`.
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        (
            self.position.x,
            self.position.y,
            self.size.width,
            self.size.height,
        )
    }

    pub fn center(&self) -> (f32, f32) {
        (
            self.position.x + self.size.width / 2.0,
            self.position.y + self.size.height / 2.0,
        )
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        let (rx, ry, w, h) = self.rect();
        x >= rx && x <= rx + w && y >= ry && y <= ry + h
    }
}

/// A directed connection between two nodes, drawn with an arrow at `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeCell {
    pub id: String,
    pub source: String,
    pub target: String,
    pub color: Color,
    pub stroke_width: f32,
}

/// Builds [`NodeCell`]s and [`EdgeCell`]s with the configured geometry and style.
///
/// The factory only constructs cells; looking up an existing cell for an
/// identifier is done by [`crate::graph::DiagramGraph`].
#[derive(Debug, Clone)]
pub struct ShapeFactory {
    node: NodeStyle,
    edge: EdgeStyle,
}

impl Default for ShapeFactory {
    fn default() -> Self {
        Self::new(&DiagramConfig::default())
    }
}

impl ShapeFactory {
    pub fn new(config: &DiagramConfig) -> Self {
        Self {
            node: config.node.clone(),
            edge: config.edge.clone(),
        }
    }

    pub fn node_style(&self) -> &NodeStyle {
        &self.node
    }

    pub fn edge_style(&self) -> &EdgeStyle {
        &self.edge
    }

    /// Create a node box at `position`.
    pub fn node(&self, id: &str, position: Position, label: &str) -> NodeCell {
        NodeCell {
            id: id.to_string(),
            position,
            size: Size {
                width: self.node.width,
                height: self.node.height,
            },
            label: label.to_string(),
        }
    }

    /// Create a directed edge, falling back to the configured edge color.
    pub fn edge(&self, id: &str, source: &str, target: &str, color: Option<Color>) -> EdgeCell {
        EdgeCell {
            id: id.to_string(),
            source: source.to_string(),
            target: target.to_string(),
            color: color.unwrap_or(self.edge.color),
            stroke_width: self.edge.stroke_width,
        }
    }
}
