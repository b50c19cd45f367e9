//! Fan-out: several edges from one node run their targets in the same super-step.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;

use chatgraph::state::{FieldSpec, ValueKind};
use chatgraph::{AgentError, ConversationState, StateGraph, StateSchema, StateUpdate, END};

use crate::common::{contents, start, FailNode, SayNode};

/// Branches merge in edge declaration order, whichever finishes first.
#[tokio::test]
async fn fan_out_merges_in_declaration_order() {
    let mut graph = StateGraph::new(StateSchema::conversation());
    graph.add_node("split", SayNode::new("split")).unwrap();
    graph
        .add_node("left", SayNode::slow("left", Duration::from_millis(60)))
        .unwrap();
    graph.add_node("right", SayNode::new("right")).unwrap();
    graph
        .add_edge("split", "left")
        .add_edge("split", "right")
        .add_edge("left", END)
        .add_edge("right", END);
    graph.set_entry("split").unwrap();
    let compiled = graph.compile().unwrap();

    let out = compiled
        .invoke(start(compiled.schema(), "go"), None)
        .await
        .unwrap();
    assert_eq!(contents(&out), vec!["go", "split", "left", "right"]);
}

/// Branches in one step run concurrently, not one after another.
#[tokio::test]
async fn fan_out_runs_branches_concurrently() {
    let mut graph = StateGraph::new(StateSchema::conversation());
    graph.add_node("split", SayNode::new("split")).unwrap();
    for name in ["a", "b", "c"] {
        graph
            .add_node(name, SayNode::slow(name, Duration::from_millis(100)))
            .unwrap();
        graph.add_edge("split", name).add_edge(name, END);
    }
    graph.set_entry("split").unwrap();
    let compiled = graph.compile().unwrap();

    let started = Instant::now();
    let out = compiled
        .invoke(start(compiled.schema(), "go"), None)
        .await
        .unwrap();
    assert!(started.elapsed() < Duration::from_millis(280));
    assert_eq!(contents(&out), vec!["go", "split", "a", "b", "c"]);
}

/// Two branches overwriting the same field: the later-declared branch wins.
#[tokio::test]
async fn fan_out_overwrite_last_declared_wins() {
    let mut schema = StateSchema::conversation();
    schema
        .add_field("winner", FieldSpec::overwrite(ValueKind::String))
        .unwrap();
    let mut graph = StateGraph::new(schema);
    graph
        .add_fn_node("split", |_s: ConversationState| async move {
            Ok::<_, AgentError>(StateUpdate::new())
        })
        .unwrap();
    graph
        .add_fn_node("first", |_s: ConversationState| async move {
            tokio::time::sleep(Duration::from_millis(40)).await;
            Ok::<_, AgentError>(StateUpdate::new().set("winner", json!("first")))
        })
        .unwrap();
    graph
        .add_fn_node("second", |_s: ConversationState| async move {
            Ok::<_, AgentError>(StateUpdate::new().set("winner", json!("second")))
        })
        .unwrap();
    graph
        .add_edge("split", "first")
        .add_edge("split", "second")
        .add_edge("first", END)
        .add_edge("second", END);
    graph.set_entry("split").unwrap();
    let compiled = graph.compile().unwrap();

    let out = compiled
        .invoke(start(compiled.schema(), "go"), None)
        .await
        .unwrap();
    assert_eq!(out.get("winner"), Some(&json!("second")));
}

/// Branches converging on one node run it once in the next step.
#[tokio::test]
async fn fan_in_runs_join_node_once() {
    let mut graph = StateGraph::new(StateSchema::conversation());
    graph.add_node("split", SayNode::new("split")).unwrap();
    graph.add_node("a", SayNode::new("a")).unwrap();
    graph.add_node("b", SayNode::new("b")).unwrap();
    graph.add_node("join", SayNode::new("join")).unwrap();
    graph
        .add_edge("split", "a")
        .add_edge("split", "b")
        .add_edge("a", "join")
        .add_edge("b", "join")
        .add_edge("join", END);
    graph.set_entry("split").unwrap();
    let compiled = graph.compile().unwrap();

    let out = compiled
        .invoke(start(compiled.schema(), "go"), None)
        .await
        .unwrap();
    assert_eq!(contents(&out), vec!["go", "split", "a", "b", "join"]);
}

/// A failing branch aborts the step at once; the slow sibling is dropped unfinished.
#[tokio::test]
async fn fan_out_failure_drops_sibling_branches() {
    let finished = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&finished);

    let mut graph = StateGraph::new(StateSchema::conversation());
    graph.add_node("split", SayNode::new("split")).unwrap();
    graph
        .add_fn_node("slow", move |_s: ConversationState| {
            let flag = Arc::clone(&flag);
            async move {
                tokio::time::sleep(Duration::from_secs(5)).await;
                flag.store(true, Ordering::SeqCst);
                Ok::<_, AgentError>(StateUpdate::assistant("slow"))
            }
        })
        .unwrap();
    graph.add_node("bad", Arc::new(FailNode)).unwrap();
    graph
        .add_edge("split", "slow")
        .add_edge("split", "bad")
        .add_edge("slow", END)
        .add_edge("bad", END);
    graph.set_entry("split").unwrap();
    let compiled = graph.compile().unwrap();

    let started = Instant::now();
    let err = compiled
        .invoke(start(compiled.schema(), "go"), None)
        .await
        .unwrap_err();
    assert!(started.elapsed() < Duration::from_secs(1));
    assert!(
        matches!(err, AgentError::NodeExecution { ref node, .. } if node == "bad"),
        "{:?}",
        err
    );
    assert!(!finished.load(Ordering::SeqCst));
}
