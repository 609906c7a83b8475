//! Graph Container
//!
//! The graph owns every node in an id-keyed arena. Edges are plain
//! `NodeId`s resolved through the graph, so removing a node can never
//! leave a dangling pointer behind: the graph strips every reference to
//! it from the remaining nodes.
//!
//! ## Invariants kept here, not in `Node`
//! - every edge endpoint is a node owned by this graph
//! - every edge is recorded on both endpoints
//! - user-named variables stay out of the reserved `__` namespace, so only
//!   `create_control_dep_var` can produce the control-dependency marker


use crate::config::{GraphConfig, RemovePolicy};
use crate::desc::{OpDesc, VarDesc};
use crate::node::{is_reserved_var_name, Node, NodeType, CONTROL_DEP_VAR_NAME};
use gir_common::{GraphError, NodeId};
use log::{debug, trace};
use std::collections::BTreeMap;

fn check_user_var_name(name: &str) -> Result<(), GraphError> {
    if is_reserved_var_name(name) {
        return Err(GraphError::reserved_name(name));
    }
    Ok(())
}

fn count(edges: &[NodeId], target: NodeId) -> usize {
    edges.iter().filter(|&&id| id == target).count()
}

#[derive(Debug, Default)]
pub struct Graph {
    nodes: BTreeMap<NodeId, Node>,
    config: GraphConfig,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            nodes: BTreeMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    fn insert(&mut self, node: Node) -> NodeId {
        let id = node.id();
        debug!("Added {node} to graph");
        self.nodes.insert(id, node);
        id
    }

    // ===== Creation =====

    pub fn create_op_node(&mut self, name: impl Into<String>, desc: OpDesc) -> NodeId {
        self.insert(Node::operation(name, desc))
    }

    pub fn create_var_node(&mut self, name: impl Into<String>, desc: VarDesc) -> Result<NodeId, GraphError> {
        let name = name.into();
        check_user_var_name(&name)?;
        Ok(self.insert(Node::variable(name, desc)))
    }

    /// Create a node with a default descriptor for its kind
    pub fn create_empty_node(&mut self, name: impl Into<String>, node_type: NodeType) -> Result<NodeId, GraphError> {
        let name = name.into();
        if node_type == NodeType::Variable {
            check_user_var_name(&name)?;
        }
        Ok(self.insert(Node::new(name, node_type)))
    }

    /// Create a synthetic variable that carries a control dependency
    pub fn create_control_dep_var(&mut self) -> NodeId {
        self.insert(Node::new(CONTROL_DEP_VAR_NAME, NodeType::Variable))
    }

    // ===== Ownership transfer =====

    /// Take ownership of a standalone node
    ///
    /// Edges the node already records must point at nodes in this graph
    /// or at the node itself; they are mirrored onto the other endpoint.
    /// Repeated edges are collapsed when the graph disallows duplicates.
    pub fn add_node(&mut self, mut node: Node) -> Result<NodeId, GraphError> {
        let id = node.id();
        if node.is_variable() {
            check_user_var_name(node.name())?;
        }
        let resolves = |other: NodeId| other == id || self.contains(other);
        if let Some(&from) = node.inputs().iter().find(|&&input| !resolves(input)) {
            return Err(GraphError::DanglingEdge { from, to: id });
        }
        if let Some(&to) = node.outputs().iter().find(|&&output| !resolves(output)) {
            return Err(GraphError::DanglingEdge { from: id, to });
        }

        if !self.config.allow_duplicate_edges {
            node.dedup_edges();
        }

        // Self-loops live on this node only; record each one on both lists
        let self_in = count(node.inputs(), id);
        let self_out = count(node.outputs(), id);
        for _ in self_out..self_in {
            node.add_output(id);
        }
        for _ in self_in..self_out {
            node.add_input(id);
        }

        for &input in node.inputs().iter().filter(|&&input| input != id) {
            if let Some(source) = self.nodes.get_mut(&input) {
                source.add_output(id);
            }
        }
        for &output in node.outputs().iter().filter(|&&output| output != id) {
            if let Some(target) = self.nodes.get_mut(&output) {
                target.add_input(id);
            }
        }
        Ok(self.insert(node))
    }

    /// Detach a node, removing every edge that references it
    ///
    /// The returned node has empty edge lists and keeps its id.
    pub fn remove_node(&mut self, id: NodeId) -> Result<Node, GraphError> {
        let mut node = self.nodes.remove(&id).ok_or_else(|| GraphError::not_found(id))?;
        for other in self.nodes.values_mut() {
            other.purge_input(id);
            other.purge_output(id);
        }
        node.clear_edges();
        debug!("Removed {node} from graph");
        Ok(node)
    }

    // ===== Wiring =====

    /// Record the edge `from -> to` on both endpoints
    pub fn link(&mut self, from: NodeId, to: NodeId) -> Result<(), GraphError> {
        self.get(to)?;
        let allow_duplicates = self.config.allow_duplicate_edges;
        let source = self.get_mut(from)?;
        if !allow_duplicates && source.outputs().contains(&to) {
            trace!("Edge {from} -> {to} already present");
            return Ok(());
        }
        source.add_output(to);
        self.get_mut(to)?.add_input(from);
        debug!("Linked {from} -> {to}");
        Ok(())
    }

    /// Drop the edge `from -> to` from both endpoints
    ///
    /// Unlinking an edge that does not exist is a no-op.
    pub fn unlink(&mut self, from: NodeId, to: NodeId) -> Result<(), GraphError> {
        self.get(from)?;
        self.get(to)?;
        let policy = self.config.remove_policy;
        if let Some(source) = self.nodes.get_mut(&from) {
            match policy {
                RemovePolicy::First => source.remove_output(to),
                RemovePolicy::All => source.purge_output(to),
            }
        }
        if let Some(target) = self.nodes.get_mut(&to) {
            match policy {
                RemovePolicy::First => target.remove_input(from),
                RemovePolicy::All => target.purge_input(from),
            }
        }
        debug!("Unlinked {from} -> {to} ({policy:?})");
        Ok(())
    }

    // ===== Control dependencies =====

    /// Order `before` ahead of `after` without any data flowing between them
    ///
    /// Returns the id of the control variable inserted between the two.
    pub fn add_control_dep(&mut self, before: NodeId, after: NodeId) -> Result<NodeId, GraphError> {
        self.expect_kind(before, NodeType::Operation)?;
        self.expect_kind(after, NodeType::Operation)?;
        let ctrl = self.create_control_dep_var();
        self.link(before, ctrl)?;
        self.link(ctrl, after)?;
        Ok(ctrl)
    }

    /// Operations that must run before `op` purely through control edges
    pub fn control_predecessors(&self, op: NodeId) -> Result<Vec<NodeId>, GraphError> {
        let node = self.expect_kind(op, NodeType::Operation)?;
        let mut preds = Vec::new();
        for input in node.inputs() {
            let Some(var) = self.nodes.get(input) else { continue };
            if !var.is_control_dep_var() {
                continue;
            }
            preds.extend(
                var.inputs()
                    .iter()
                    .copied()
                    .filter(|id| self.nodes.get(id).is_some_and(Node::is_operation)),
            );
        }
        Ok(preds)
    }

    /// Inputs of `op` that carry data, in operand order
    pub fn data_inputs(&self, op: NodeId) -> Result<Vec<NodeId>, GraphError> {
        let node = self.expect_kind(op, NodeType::Operation)?;
        Ok(node
            .inputs()
            .iter()
            .copied()
            .filter(|id| !self.nodes.get(id).is_some_and(Node::is_control_dep_var))
            .collect())
    }

    pub fn rename_var(&mut self, id: NodeId, new_name: impl Into<String>) -> Result<(), GraphError> {
        let new_name = new_name.into();
        check_user_var_name(&new_name)?;
        let node = self.get_mut(id)?;
        if !node.is_variable() {
            return Err(GraphError::kind_mismatch(id, NodeType::Variable, node.node_type()));
        }
        // A renamed control var would silently turn into a data edge
        if node.is_control_dep_var() {
            return Err(GraphError::reserved_name(node.name()));
        }
        debug!("Renamed {node} to '{new_name}'");
        node.set_name(new_name);
        Ok(())
    }

    // ===== Queries =====

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn get(&self, id: NodeId) -> Result<&Node, GraphError> {
        self.nodes.get(&id).ok_or_else(|| {
            trace!("Lookup of {id} failed");
            GraphError::not_found(id)
        })
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut Node, GraphError> {
        self.nodes.get_mut(&id).ok_or_else(|| GraphError::not_found(id))
    }

    fn expect_kind(&self, id: NodeId, expected: NodeType) -> Result<&Node, GraphError> {
        let node = self.get(id)?;
        if node.node_type() != expected {
            return Err(GraphError::kind_mismatch(id, expected, node.node_type()));
        }
        Ok(node)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in creation order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn op_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes().filter(|n| n.is_operation())
    }

    pub fn var_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes().filter(|n| n.is_variable())
    }

    pub fn control_dep_vars(&self) -> impl Iterator<Item = &Node> {
        self.nodes().filter(|n| n.is_control_dep_var())
    }

    /// Check that every edge resolves and is recorded on both endpoints
    pub fn validate(&self) -> Result<(), GraphError> {
        for node in self.nodes.values() {
            let id = node.id();
            for &to in node.outputs() {
                let target = self.nodes.get(&to).ok_or(GraphError::DanglingEdge { from: id, to })?;
                if count(node.outputs(), to) != count(target.inputs(), id) {
                    return Err(GraphError::AsymmetricEdge { from: id, to });
                }
            }
            for &from in node.inputs() {
                let source = self.nodes.get(&from).ok_or(GraphError::DanglingEdge { from, to: id })?;
                if count(node.inputs(), from) != count(source.outputs(), id) {
                    return Err(GraphError::AsymmetricEdge { from, to: id });
                }
            }
        }
        Ok(())
    }
}
