//! Error handling for the graph IR
//!
//! Nodes themselves never fail; these errors are raised by the graph
//! container when a caller breaks one of its structural rules.

use crate::types::{NodeId, NodeType};
use thiserror::Error;

/// Main error type for graph construction and mutation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node {id} is not part of this graph")]
    NodeNotFound { id: NodeId },

    #[error("Variable name '{name}' is reserved")]
    ReservedName { name: String },

    #[error("Node {id} is a {found} node, expected {expected}")]
    KindMismatch {
        id: NodeId,
        expected: NodeType,
        found: NodeType,
    },

    #[error("Edge {from} -> {to} points outside the graph")]
    DanglingEdge { from: NodeId, to: NodeId },

    #[error("Edge {from} -> {to} is not recorded on both endpoints")]
    AsymmetricEdge { from: NodeId, to: NodeId },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {message}")]
    IoError { message: String },
}

impl GraphError {
    pub fn not_found(id: NodeId) -> Self {
        GraphError::NodeNotFound { id }
    }

    pub fn reserved_name(name: &str) -> Self {
        GraphError::ReservedName {
            name: name.to_string(),
        }
    }

    pub fn kind_mismatch(id: NodeId, expected: NodeType, found: NodeType) -> Self {
        GraphError::KindMismatch { id, expected, found }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for GraphError {
    fn from(err: std::io::Error) -> Self {
        GraphError::IoError {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn id(raw: u64) -> NodeId {
        NodeId::new(raw).unwrap()
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GraphError::not_found(id(4)).to_string(),
            "Node #4 is not part of this graph"
        );
        assert_eq!(
            GraphError::reserved_name("__control_var").to_string(),
            "Variable name '__control_var' is reserved"
        );
        assert_eq!(
            GraphError::kind_mismatch(id(2), NodeType::Operation, NodeType::Variable).to_string(),
            "Node #2 is a var node, expected op"
        );
        assert_eq!(
            GraphError::DanglingEdge { from: id(1), to: id(9) }.to_string(),
            "Edge #1 -> #9 points outside the graph"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: GraphError = io.into();
        assert!(matches!(err, GraphError::IoError { ref message } if message == "missing"));
    }
}
