//! Graph IR - Node Primitive and Graph Container
//!
//! This crate defines the node type at the bottom of the graph IR and the
//! arena-backed graph that owns nodes and keeps their edges consistent.
//! Operator and variable semantics, rewrite passes, and execution live in
//! the layers built on top.

pub mod config;
pub mod desc;
pub mod graph;
pub mod node;

pub use config::{GraphConfig, RemovePolicy};
pub use desc::{OpDesc, VarDesc};
pub use graph::Graph;
pub use node::{
    control_dep_var_name, is_control_dep_var_name, is_reserved_var_name, Node, NodePayload,
    NodeType, CONTROL_DEP_VAR_NAME,
};
#[cfg(any(test, feature = "test-util"))]
pub use node::create_node_for_test;
pub use gir_common::{AttrValue, DataType, GraphError, NodeId};
