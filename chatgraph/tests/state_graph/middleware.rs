//! Node middleware: with_middleware().compile() wraps every node call.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use chatgraph::graph::{NodeCall, NodeResult};
use chatgraph::{ConversationState, NodeMiddleware, StateGraph, StateSchema, StateUpdate, Next, END};

use crate::common::{contents, start, SayNode};

/// Records enter/exit events per node.
#[derive(Default)]
struct RecordingMiddleware {
    events: Mutex<Vec<String>>,
}

#[async_trait]
impl NodeMiddleware for RecordingMiddleware {
    async fn around_run(
        &self,
        node_id: &str,
        state: Arc<ConversationState>,
        inner: NodeCall,
    ) -> NodeResult {
        self.events.lock().unwrap().push(format!("enter:{}", node_id));
        let result = inner(state).await;
        self.events.lock().unwrap().push(format!("exit:{}", node_id));
        result
    }
}

/// Answers without calling the node.
struct ShortCircuit;

#[async_trait]
impl NodeMiddleware for ShortCircuit {
    async fn around_run(
        &self,
        node_id: &str,
        _state: Arc<ConversationState>,
        _inner: NodeCall,
    ) -> NodeResult {
        Ok((StateUpdate::assistant(format!("skipped {}", node_id)), Next::Continue))
    }
}

#[tokio::test]
async fn middleware_wraps_every_node_in_order() {
    let recorder = Arc::new(RecordingMiddleware::default());
    let mut graph = StateGraph::new(StateSchema::conversation());
    graph.add_node("a", SayNode::new("A")).unwrap();
    graph.add_node("b", SayNode::new("B")).unwrap();
    graph.add_edge("a", "b").add_edge("b", END);
    graph.set_entry("a").unwrap();
    let compiled = graph.with_middleware(recorder.clone()).compile().unwrap();

    let out = compiled
        .invoke(start(compiled.schema(), "x"), None)
        .await
        .unwrap();
    assert_eq!(contents(&out), vec!["x", "A", "B"]);
    assert_eq!(
        *recorder.events.lock().unwrap(),
        vec!["enter:a", "exit:a", "enter:b", "exit:b"]
    );
}

#[tokio::test]
async fn middleware_can_replace_node_result() {
    let mut graph = StateGraph::new(StateSchema::conversation());
    graph.add_node("a", SayNode::new("A")).unwrap();
    graph.add_edge("a", END);
    graph.set_entry("a").unwrap();
    let compiled = graph.with_middleware(Arc::new(ShortCircuit)).compile().unwrap();

    let out = compiled
        .invoke(start(compiled.schema(), "x"), None)
        .await
        .unwrap();
    assert_eq!(contents(&out), vec!["x", "skipped a"]);
}
