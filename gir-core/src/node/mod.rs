//! Graph Node
//!
//! A node is one vertex of the graph IR: either an operation or a
//! variable. It carries a process-unique id, a fixed kind with its
//! descriptor payload, and ordered input/output edge lists.
//!
//! ## Ownership
//!
//! Edges are stored as `NodeId`s and resolved through the owning
//! `Graph`. The node never checks that the other endpoint records the
//! reciprocal edge; keeping both sides consistent is the container's job.

mod marker;


pub use marker::{
    control_dep_var_name, is_control_dep_var_name, is_reserved_var_name,
    CONTROL_DEP_VAR_NAME, RESERVED_PREFIX,
};
pub use gir_common::NodeType;

use crate::desc::{OpDesc, VarDesc};
use gir_common::NodeId;
use log::trace;
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Next id to hand out. Ids are never reused, even after a node is dropped.
static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

fn next_node_id() -> NodeId {
    let raw = NEXT_NODE_ID
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1))
        .unwrap_or_else(|_| panic!("node id space exhausted"));
    match NodeId::new(raw) {
        Some(id) => id,
        None => unreachable!("node id counter starts at 1"),
    }
}

/// Kind-specific payload
#[derive(Debug)]
pub enum NodePayload {
    Operation(OpDesc),
    Variable(VarDesc),
}

impl NodePayload {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodePayload::Operation(_) => NodeType::Operation,
            NodePayload::Variable(_) => NodeType::Variable,
        }
    }
}

/// A vertex in the graph IR
///
/// Not `Clone`: a copy would share the original's id.
#[derive(Debug)]
pub struct Node {
    id: NodeId,
    name: String,
    payload: NodePayload,
    inputs: Vec<NodeId>,
    outputs: Vec<NodeId>,
}

impl Node {
    /// Create a node with a default descriptor for its kind
    ///
    /// Any name is accepted, including the empty string.
    pub fn new(name: impl Into<String>, node_type: NodeType) -> Self {
        let payload = match node_type {
            NodeType::Operation => NodePayload::Operation(OpDesc::default()),
            NodeType::Variable => NodePayload::Variable(VarDesc::default()),
        };
        Self::with_payload(name.into(), payload)
    }

    pub fn operation(name: impl Into<String>, desc: OpDesc) -> Self {
        Self::with_payload(name.into(), NodePayload::Operation(desc))
    }

    pub fn variable(name: impl Into<String>, desc: VarDesc) -> Self {
        Self::with_payload(name.into(), NodePayload::Variable(desc))
    }

    fn with_payload(name: String, payload: NodePayload) -> Self {
        let id = next_node_id();
        trace!("Created {} node '{}' {}", payload.node_type(), name, id);
        Self {
            id,
            name,
            payload,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn node_type(&self) -> NodeType {
        self.payload.node_type()
    }

    pub fn payload(&self) -> &NodePayload {
        &self.payload
    }

    pub fn is_operation(&self) -> bool {
        matches!(self.payload, NodePayload::Operation(_))
    }

    pub fn is_variable(&self) -> bool {
        matches!(self.payload, NodePayload::Variable(_))
    }

    /// Variable carrying the control-dependency marker
    pub fn is_control_dep_var(&self) -> bool {
        self.is_variable() && is_control_dep_var_name(&self.name)
    }

    pub fn op(&self) -> Option<&OpDesc> {
        match &self.payload {
            NodePayload::Operation(desc) => Some(desc),
            NodePayload::Variable(_) => None,
        }
    }

    pub fn op_mut(&mut self) -> Option<&mut OpDesc> {
        match &mut self.payload {
            NodePayload::Operation(desc) => Some(desc),
            NodePayload::Variable(_) => None,
        }
    }

    pub fn var(&self) -> Option<&VarDesc> {
        match &self.payload {
            NodePayload::Variable(desc) => Some(desc),
            NodePayload::Operation(_) => None,
        }
    }

    pub fn var_mut(&mut self) -> Option<&mut VarDesc> {
        match &mut self.payload {
            NodePayload::Variable(desc) => Some(desc),
            NodePayload::Operation(_) => None,
        }
    }

    // ===== Edges =====

    /// Inputs in operand order
    pub fn inputs(&self) -> &[NodeId] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[NodeId] {
        &self.outputs
    }

    pub fn add_input(&mut self, input: NodeId) {
        self.inputs.push(input);
    }

    pub fn add_output(&mut self, output: NodeId) {
        self.outputs.push(output);
    }

    /// Remove the first occurrence of `input`; absent is a no-op
    pub fn remove_input(&mut self, input: NodeId) {
        remove_first(&mut self.inputs, input);
    }

    /// Remove the first occurrence of `output`; absent is a no-op
    pub fn remove_output(&mut self, output: NodeId) {
        remove_first(&mut self.outputs, output);
    }

    /// Remove every occurrence of `input`
    pub fn purge_input(&mut self, input: NodeId) {
        self.inputs.retain(|&id| id != input);
    }

    /// Remove every occurrence of `output`
    pub fn purge_output(&mut self, output: NodeId) {
        self.outputs.retain(|&id| id != output);
    }

    pub fn clear_edges(&mut self) {
        self.inputs.clear();
        self.outputs.clear();
    }

    /// Keep only the first occurrence of each edge, preserving order
    pub(crate) fn dedup_edges(&mut self) {
        dedup_in_order(&mut self.inputs);
        dedup_in_order(&mut self.outputs);
    }
}

fn dedup_in_order(edges: &mut Vec<NodeId>) {
    let mut seen = HashSet::new();
    edges.retain(|&id| seen.insert(id));
}

fn remove_first(edges: &mut Vec<NodeId>, target: NodeId) {
    if let Some(pos) = edges.iter().position(|&id| id == target) {
        edges.remove(pos);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} ({})", self.name, self.id, self.node_type())
    }
}

/// Build a standalone node for unit tests
///
/// The node is not attached to any graph. Production code goes through
/// `Node::new` or the `Graph` creation methods instead.
#[cfg(any(test, feature = "test-util"))]
pub fn create_node_for_test(name: &str, node_type: NodeType) -> Box<Node> {
    Box::new(Node::new(name, node_type))
}
