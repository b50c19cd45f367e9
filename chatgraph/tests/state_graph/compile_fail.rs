//! StateGraph compile failure cases: entry, unknown nodes, reachability, termination.

use chatgraph::{BuildError, GraphValidationError, StateGraph, StateSchema, END};

use crate::common::SayNode;

fn graph() -> StateGraph {
    StateGraph::new(StateSchema::conversation())
}

#[tokio::test]
async fn compile_fails_without_entry() {
    let mut graph = graph();
    graph.add_node("a", SayNode::new("A")).unwrap().add_edge("a", END);

    let err = graph.compile().unwrap_err();
    assert_eq!(err, GraphValidationError::MissingEntry);
    assert_eq!(err.rule(), "entry");
}

#[tokio::test]
async fn set_entry_rejects_unknown_node() {
    let mut graph = graph();
    assert_eq!(
        graph.set_entry("ghost").err().unwrap(),
        BuildError::UnknownNode("ghost".into())
    );
}

#[tokio::test]
async fn add_node_rejects_duplicate() {
    let mut graph = graph();
    graph.add_node("a", SayNode::new("A")).unwrap();
    assert_eq!(
        graph.add_node("a", SayNode::new("B")).err(),
        Some(BuildError::DuplicateNode("a".into()))
    );
}

#[tokio::test]
async fn compile_fails_when_edge_refers_to_unknown_node() {
    let mut graph = graph();
    graph.add_node("echo", SayNode::new("x")).unwrap();
    graph.add_edge("echo", "missing");
    graph.set_entry("echo").unwrap();

    match graph.compile() {
        Err(GraphValidationError::NodeNotFound { from, to, missing }) => {
            assert_eq!(from, "echo");
            assert_eq!(to, "missing");
            assert_eq!(missing, "missing");
        }
        other => panic!("expected NodeNotFound, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn compile_fails_when_conditional_target_is_unknown() {
    let mut graph = graph();
    graph.add_node("route", SayNode::new("x")).unwrap();
    graph.add_conditional_edges("route", |_s| END.to_string(), [END, "nowhere"]);
    graph.set_entry("route").unwrap();

    let err = graph.compile().unwrap_err();
    assert_eq!(err.rule(), "edges");
}

#[tokio::test]
async fn compile_reports_unreachable_nodes_in_registration_order() {
    let mut graph = graph();
    graph.add_node("a", SayNode::new("A")).unwrap();
    graph.add_node("island2", SayNode::new("I2")).unwrap();
    graph.add_node("island1", SayNode::new("I1")).unwrap();
    graph
        .add_edge("a", END)
        .add_edge("island1", END)
        .add_edge("island2", END);
    graph.set_entry("a").unwrap();

    assert_eq!(
        graph.compile().unwrap_err(),
        GraphValidationError::Unreachable(vec!["island2".into(), "island1".into()])
    );
}

#[tokio::test]
async fn compile_fails_when_no_path_reaches_end() {
    let mut graph = graph();
    graph.add_node("a", SayNode::new("A")).unwrap();
    graph.add_node("b", SayNode::new("B")).unwrap();
    graph.add_edge("a", "b").add_edge("b", "a");
    graph.set_entry("a").unwrap();

    let err = graph.compile().unwrap_err();
    assert_eq!(err, GraphValidationError::NoPathToEnd);
    assert_eq!(err.rule(), "termination");
}

#[tokio::test]
async fn compile_fails_on_dead_end_node() {
    let mut graph = graph();
    graph.add_node("a", SayNode::new("A")).unwrap();
    graph.add_node("stuck", SayNode::new("S")).unwrap();
    graph.add_edge("a", END).add_edge("a", "stuck");
    graph.set_entry("a").unwrap();

    assert_eq!(
        graph.compile().unwrap_err(),
        GraphValidationError::DeadEnd("stuck".into())
    );
}
