//! Backing graph model of the canvas.
//!
//! [`DiagramGraph`] stores node and edge cells keyed by their domain id, in
//! insertion order. Insertion is idempotent: adding a cell whose id (or, for
//! edges, whose endpoints) already exists returns [`Insertion::Existing`] and
//! leaves the graph untouched.

use indexmap::IndexMap;

use crate::error::{DiagramError, Endpoint};
use crate::shape::{EdgeCell, NodeCell};
use crate::snapshot::Position;

/// Outcome of adding a cell to the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insertion {
    /// The cell was added.
    Created,
    /// A matching cell was already present; carries its id.
    Existing(String),
}

impl Insertion {
    pub fn is_created(&self) -> bool {
        matches!(self, Insertion::Created)
    }
}

/// Node and edge cells currently on the canvas.
#[derive(Debug, Clone, Default)]
pub struct DiagramGraph {
    nodes: IndexMap<String, NodeCell>,
    edges: IndexMap<String, EdgeCell>,
}

impl DiagramGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every cell.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    pub fn node(&self, id: &str) -> Option<&NodeCell> {
        self.nodes.get(id)
    }

    pub fn edge(&self, id: &str) -> Option<&EdgeCell> {
        self.edges.get(id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn contains_edge(&self, id: &str) -> bool {
        self.edges.contains_key(id)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeCell> {
        self.nodes.values()
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &EdgeCell> {
        self.edges.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Find the edge running from `source` to `target`.
    ///
    /// Matches by endpoint identity, not by edge id. Direction matters.
    pub fn edge_between(&self, source: &str, target: &str) -> Option<&EdgeCell> {
        self.edges
            .values()
            .find(|edge| edge.source == source && edge.target == target)
    }

    /// Add a node unless one with the same id exists.
    pub fn insert_node(&mut self, node: NodeCell) -> Insertion {
        if self.nodes.contains_key(&node.id) {
            return Insertion::Existing(node.id);
        }
        self.nodes.insert(node.id.clone(), node);
        Insertion::Created
    }

    /// Add an edge after checking duplicates and endpoints.
    ///
    /// An edge already connecting the same endpoints is returned as
    /// [`Insertion::Existing`]. Otherwise both endpoints must be live nodes,
    /// or [`DiagramError::MissingEndpoint`] is returned and nothing is added.
    /// Only then does an id already in use count as existing.
    pub fn insert_edge(&mut self, edge: EdgeCell) -> Result<Insertion, DiagramError> {
        if let Some(existing) = self.edge_between(&edge.source, &edge.target) {
            return Ok(Insertion::Existing(existing.id.clone()));
        }

        for (endpoint, node_id) in [
            (Endpoint::Source, &edge.source),
            (Endpoint::Target, &edge.target),
        ] {
            if !self.nodes.contains_key(node_id) {
                return Err(DiagramError::MissingEndpoint {
                    edge_id: edge.id.clone(),
                    endpoint,
                    node_id: node_id.clone(),
                });
            }
        }

        if self.edges.contains_key(&edge.id) {
            return Ok(Insertion::Existing(edge.id));
        }
        self.edges.insert(edge.id.clone(), edge);
        Ok(Insertion::Created)
    }

    /// Move a node. Returns `false` if the node does not exist.
    pub fn set_node_position(&mut self, id: &str, position: Position) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.position = position;
                true
            }
            None => false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
