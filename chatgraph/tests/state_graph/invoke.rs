//! StateGraph invoke: output state, node failures, routing, limits.

use std::time::Duration;

use serde_json::json;

use chatgraph::state::CONTEXT;
use chatgraph::{
    AgentError, CancellationToken, ConversationState, RunnableConfig, StateGraph, StateSchema,
    StateUpdate, END,
};

use crate::common::{contents, start, FailNode, SayNode};

#[tokio::test]
async fn invoke_single_node_appends_reply() {
    let mut graph = StateGraph::new(StateSchema::conversation());
    graph.add_node("respond", SayNode::new("hello back")).unwrap();
    graph.add_edge("respond", END);
    graph.set_entry("respond").unwrap();
    let compiled = graph.compile().unwrap();

    let out = compiled
        .invoke(start(compiled.schema(), "hello"), None)
        .await
        .unwrap();
    assert_eq!(contents(&out), vec!["hello", "hello back"]);
    assert_eq!(out.context(), "");
}

#[tokio::test]
async fn invoke_node_failure_names_node() {
    let mut graph = StateGraph::new(StateSchema::conversation());
    graph.add_node("first", SayNode::new("ok")).unwrap();
    graph.add_node("broken", std::sync::Arc::new(FailNode)).unwrap();
    graph.add_edge("first", "broken").add_edge("broken", END);
    graph.set_entry("first").unwrap();
    let compiled = graph.compile().unwrap();

    let err = compiled
        .invoke(start(compiled.schema(), "x"), None)
        .await
        .unwrap_err();
    assert_eq!(err.node(), Some("broken"));
    assert!(err.to_string().contains("node broke"), "{}", err);
}

#[tokio::test]
async fn invoke_rejects_update_for_undeclared_field() {
    let mut graph = StateGraph::new(StateSchema::conversation());
    graph
        .add_fn_node("rogue", |_s: ConversationState| async move {
            Ok::<_, AgentError>(StateUpdate::new().set("secret", json!(1)))
        })
        .unwrap()
        .add_edge("rogue", END);
    graph.set_entry("rogue").unwrap();
    let compiled = graph.compile().unwrap();

    let err = compiled
        .invoke(start(compiled.schema(), "x"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::Schema(_)), "{:?}", err);
}

#[tokio::test]
async fn invoke_overwrite_field_replaces_value() {
    let mut graph = StateGraph::new(StateSchema::conversation());
    graph
        .add_fn_node("tag", |_s: ConversationState| async move {
            Ok::<_, AgentError>(StateUpdate::new().set(CONTEXT, json!("tagged")))
        })
        .unwrap()
        .add_edge("tag", END);
    graph.set_entry("tag").unwrap();
    let compiled = graph.compile().unwrap();

    let out = compiled
        .invoke(start(compiled.schema(), "x"), None)
        .await
        .unwrap();
    assert_eq!(out.context(), "tagged");
    assert_eq!(contents(&out), vec!["x"]);
}

#[tokio::test]
async fn invoke_conditional_loop_hits_recursion_limit() {
    let mut graph = StateGraph::new(StateSchema::conversation());
    graph.add_node("again", SayNode::new("again")).unwrap();
    graph.add_conditional_edges("again", |_s| "again".to_string(), ["again", END]);
    graph.set_entry("again").unwrap();
    let compiled = graph.compile().unwrap();

    let err = compiled
        .invoke(start(compiled.schema(), "x"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::RecursionLimit(25)), "{:?}", err);
}

#[tokio::test]
async fn invoke_router_outside_declared_targets_fails() {
    let mut graph = StateGraph::new(StateSchema::conversation());
    graph.add_node("a", SayNode::new("A")).unwrap();
    graph.add_node("b", SayNode::new("B")).unwrap();
    graph.add_conditional_edges("a", |_s| "b".to_string(), [END]);
    graph.add_edge("b", END).add_edge("a", "b");
    graph.set_entry("a").unwrap();
    let compiled = graph.compile().unwrap();

    let err = compiled
        .invoke(start(compiled.schema(), "x"), None)
        .await
        .unwrap_err();
    assert!(
        matches!(err, AgentError::InvalidRoute { ref from, ref to } if from == "a" && to == "b"),
        "{:?}",
        err
    );
}

#[tokio::test]
async fn invoke_cancel_mid_run_drops_state() {
    let mut graph = StateGraph::new(StateSchema::conversation());
    graph
        .add_node("slow", SayNode::slow("late", Duration::from_secs(5)))
        .unwrap()
        .add_edge("slow", END);
    graph.set_entry("slow").unwrap();
    let compiled = graph.compile().unwrap();

    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        canceller.cancel();
    });
    let err = compiled
        .invoke_with_cancel(start(compiled.schema(), "x"), None, token)
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::Cancelled));
}

#[tokio::test]
async fn invoke_timeout_config() {
    let mut graph = StateGraph::new(StateSchema::conversation());
    graph
        .add_node("slow", SayNode::slow("late", Duration::from_secs(5)))
        .unwrap()
        .add_edge("slow", END);
    graph.set_entry("slow").unwrap();
    let compiled = graph.compile().unwrap();

    let err = compiled
        .invoke(
            start(compiled.schema(), "x"),
            Some(RunnableConfig::default().with_timeout(Duration::from_millis(20))),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::Timeout(d) if d == Duration::from_millis(20)));
}
