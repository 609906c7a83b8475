//! End-to-end scenarios for the graph and the nodes it owns

use gir_core::{DataType, Graph, GraphError, Node, OpDesc, VarDesc};
use pretty_assertions::assert_eq;

#[test]
fn test_standalone_nodes_transfer_into_graph() {
    let mut graph = Graph::new();
    let x = graph
        .create_var_node("x", VarDesc::new(vec![1, 3, 224, 224], DataType::Float32))
        .unwrap();
    let w = graph
        .create_var_node("w", VarDesc::new(vec![64, 3, 7, 7], DataType::Float32).persistable())
        .unwrap();

    let mut conv = Node::operation(
        "conv2d_op",
        OpDesc::new("conv2d")
            .with_attr("strides", vec![2i64, 2])
            .with_attr("paddings", vec![3i64, 3]),
    );
    conv.add_input(x);
    conv.add_input(w);
    let conv_id = conv.id();

    assert_eq!(graph.add_node(conv).unwrap(), conv_id);
    assert_eq!(graph.get(conv_id).unwrap().inputs(), &[x, w]);
    assert_eq!(graph.get(w).unwrap().outputs(), &[conv_id]);
    graph.validate().unwrap();
}

#[test]
fn test_small_network_with_control_edge() {
    let mut graph = Graph::new();
    let x = graph.create_var_node("x", VarDesc::default()).unwrap();
    let h = graph.create_var_node("h", VarDesc::default()).unwrap();
    let y = graph.create_var_node("y", VarDesc::default()).unwrap();
    let fc = graph.create_op_node("fc", OpDesc::new("mul"));
    let act = graph.create_op_node("act", OpDesc::new("relu"));
    let save = graph.create_op_node("save", OpDesc::new("save"));

    graph.link(x, fc).unwrap();
    graph.link(fc, h).unwrap();
    graph.link(h, act).unwrap();
    graph.link(act, y).unwrap();
    let ctrl = graph.add_control_dep(act, save).unwrap();
    graph.validate().unwrap();

    assert_eq!(graph.control_predecessors(save).unwrap(), vec![act]);
    assert!(graph.data_inputs(save).unwrap().is_empty());
    assert_eq!(graph.control_dep_vars().map(Node::id).collect::<Vec<_>>(), vec![ctrl]);

    // Dropping the activation takes its edges with it, ctrl var included
    graph.remove_node(act).unwrap();
    graph.validate().unwrap();
    assert!(graph.get(h).unwrap().outputs().is_empty());
    assert!(graph.get(ctrl).unwrap().inputs().is_empty());
    assert!(graph.control_predecessors(save).unwrap().is_empty());
    assert_eq!(graph.control_predecessors(act), Err(GraphError::not_found(act)));
}

#[test]
fn test_ids_not_reused_after_removal() {
    let mut graph = Graph::new();
    let first = graph.create_op_node("tmp", OpDesc::default());
    drop(graph.remove_node(first).unwrap());

    let second = graph.create_op_node("tmp", OpDesc::default());
    assert_ne!(first, second);
    assert!(second > first);
}
