//! Error types for diagram synchronization.

use std::fmt;

use thiserror::Error;

/// Which end of an edge failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Target => write!(f, "target"),
        }
    }
}

/// Errors produced by the diagram crate.
///
/// Creating a node or edge whose identifier already exists is *not* an
/// error: the existing cell is returned (see [`crate::graph::Insertion`]).
#[derive(Debug, Error)]
pub enum DiagramError {
    /// An edge references a node that is not in the graph.
    ///
    /// [`crate::DiagramController::update_graph`] recovers from this locally
    /// by skipping the edge and emitting a `delete` intent for it.
    #[error("edge `{edge_id}` references missing {endpoint} node `{node_id}`")]
    MissingEndpoint {
        edge_id: String,
        endpoint: Endpoint,
        node_id: String,
    },

    #[error("invalid color `{0}`")]
    InvalidColor(String),

    #[error("invalid snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl DiagramError {
    /// Identifier of the domain connection this error is about, if any.
    pub fn edge_id(&self) -> Option<&str> {
        match self {
            Self::MissingEndpoint { edge_id, .. } => Some(edge_id),
            _ => None,
        }
    }
}
