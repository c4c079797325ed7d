//! Domain records consumed by the synchronizer.
//!
//! The synchronizer only needs a handful of fields from the domain store, so
//! it reads components and connections through the [`ComponentRecord`] and
//! [`ConnectionRecord`] traits. [`Component`] and [`Connection`] are ready-made
//! implementations that deserialize straight from document-store JSON, where
//! the identifier is usually stored as `_id`.
//!
//! # Example
//!
//! ```
//! use solution_diagram::snapshot::Snapshot;
//!
//! let snapshot = Snapshot::from_json_str(
//!     r#"{
//!         "components": [{"_id": "c1", "name": "Gateway"}, {"_id": "c2", "name": "Queue"}],
//!         "connections": [{"_id": "e1", "source": "c1", "destination": "c2"}],
//!         "layout": {"c1": {"position": {"x": 120, "y": 40}}}
//!     }"#,
//! )
//! .unwrap();
//!
//! assert_eq!(snapshot.components.len(), 2);
//! assert_eq!(snapshot.layout["c1"].position.x, 120.0);
//! ```

use std::collections::HashMap;

use log::warn;
use serde::{Deserialize, Serialize};
use slint::Color;

use crate::config::parse_hex_color;
use crate::error::DiagramError;

/// Canvas coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Layout entry for one component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutEntry {
    pub position: Position,
}

impl From<Position> for LayoutEntry {
    fn from(position: Position) -> Self {
        Self { position }
    }
}

/// Externally supplied positions, keyed by component id.
pub type Layout = HashMap<String, LayoutEntry>;

/// Trait for component data rendered as a node.
///
/// Implement this for your own document type to pass it to
/// [`crate::DiagramController::update_graph`] without copying.
pub trait ComponentRecord {
    /// Stable domain identifier
    fn id(&self) -> &str;
    /// Display label
    fn name(&self) -> &str;
}

/// Trait for connection data rendered as a directed edge.
pub trait ConnectionRecord {
    /// Stable domain identifier
    fn id(&self) -> &str;
    /// Component id the edge starts from
    fn source(&self) -> &str;
    /// Component id the edge points to
    fn destination(&self) -> &str;
    /// Edge color (default: the configured edge color)
    fn color(&self) -> Option<Color> {
        None
    }
}

/// Component document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Component {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl Component {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl ComponentRecord for Component {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

/// Connection document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub source: String,
    pub destination: String,
    /// Optional hex color (`#rgb`, `#rrggbb`, `#rrggbbaa`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Connection {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            destination: destination.into(),
            color: None,
        }
    }

    /// Set the display color of this connection.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

impl ConnectionRecord for Connection {
    fn id(&self) -> &str {
        &self.id
    }
    fn source(&self) -> &str {
        &self.source
    }
    fn destination(&self) -> &str {
        &self.destination
    }
    fn color(&self) -> Option<Color> {
        let value = self.color.as_deref()?;
        match parse_hex_color(value) {
            Ok(color) => Some(color),
            Err(err) => {
                warn!(connection = self.id.as_str(); "Ignoring connection color: {err}");
                None
            }
        }
    }
}

/// A complete `(components, connections, layout)` triple passed to a rebuild.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub connections: Vec<Connection>,
    #[serde(default)]
    pub layout: Layout,
}

impl Snapshot {
    /// Parse a snapshot from JSON.
    pub fn from_json_str(source: &str) -> Result<Self, DiagramError> {
        Ok(serde_json::from_str(source)?)
    }
}
