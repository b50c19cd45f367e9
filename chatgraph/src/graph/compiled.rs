//! Compiled state graph: immutable, supports invoke only.
//!
//! Built by `StateGraph::compile`. Holds the schema, nodes, edges and entry point; read-only
//! after compilation so one instance can serve many concurrent runs. Each run owns its
//! own `ConversationState`.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::{try_join_all, BoxFuture};
use tokio_util::sync::CancellationToken;

use crate::error::AgentError;
use crate::state::{ConversationState, StateSchema, StateUpdate};

use super::logging::{
    log_graph_cancelled, log_graph_complete, log_graph_error, log_graph_start, log_node_complete,
    log_node_start, log_state_update,
};
use super::node_middleware::{NodeCall, NodeMiddleware, NodeResult};
use super::state_graph::{ConditionalEdges, END};
use super::{Next, Node, RunnableConfig};

/// Compiled graph: immutable structure, supports invoke only.
///
/// Runs in super-steps: every node of the current frontier runs concurrently on the same
/// state snapshot, their updates are merged in frontier order (edge declaration order), then
/// each node's routing decides the next frontier. The run ends when no branch is left.
#[derive(Clone)]
pub struct CompiledStateGraph {
    pub(super) schema: Arc<StateSchema>,
    pub(super) nodes: HashMap<String, Arc<dyn Node>>,
    pub(super) node_order: Vec<String>,
    /// Static edges per source, in declaration order.
    pub(super) edges: HashMap<String, Vec<String>>,
    pub(super) conditional: HashMap<String, ConditionalEdges>,
    pub(super) entry: String,
    pub(super) middleware: Option<Arc<dyn NodeMiddleware>>,
}

impl std::fmt::Debug for CompiledStateGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledStateGraph")
            .field("entry", &self.entry)
            .field("nodes", &self.node_order)
            .field("edges", &self.edges)
            .finish_non_exhaustive()
    }
}

impl CompiledStateGraph {
    /// Schema used to merge node updates.
    pub fn schema(&self) -> &StateSchema {
        &self.schema
    }

    /// Entry node id.
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Node ids in registration order.
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.node_order.iter().map(String::as_str)
    }

    /// Runs the graph from the entry node until every branch reaches END.
    ///
    /// Pass `None` for config to use the defaults (recursion limit 25, no timeout).
    pub async fn invoke(
        &self,
        state: ConversationState,
        config: Option<RunnableConfig>,
    ) -> Result<ConversationState, AgentError> {
        self.invoke_with_cancel(state, config, CancellationToken::new())
            .await
    }

    /// Like [`invoke`](Self::invoke), but stops with `Cancelled` as soon as `cancel` fires.
    ///
    /// On cancellation or timeout the in-flight node calls are dropped and nothing is
    /// merged; the caller never sees a partial state.
    pub async fn invoke_with_cancel(
        &self,
        state: ConversationState,
        config: Option<RunnableConfig>,
        cancel: CancellationToken,
    ) -> Result<ConversationState, AgentError> {
        let config = config.unwrap_or_default();
        let run = async {
            let run_loop = self.run_loop(state, config.recursion_limit);
            match config.timeout {
                Some(limit) => match tokio::time::timeout(limit, run_loop).await {
                    Ok(result) => result,
                    Err(_) => {
                        log_graph_cancelled("timeout");
                        Err(AgentError::Timeout(limit))
                    }
                },
                None => run_loop.await,
            }
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                log_graph_cancelled("cancelled by caller");
                Err(AgentError::Cancelled)
            }
            result = run => result,
        }
    }

    async fn run_loop(
        &self,
        state: ConversationState,
        recursion_limit: usize,
    ) -> Result<ConversationState, AgentError> {
        log_graph_start(&self.entry);
        let result = self.run_steps(state, recursion_limit).await;
        match &result {
            Ok((_, steps)) => log_graph_complete(*steps),
            Err(e) => log_graph_error(e),
        }
        result.map(|(state, _)| state)
    }

    async fn run_steps(
        &self,
        mut state: ConversationState,
        recursion_limit: usize,
    ) -> Result<(ConversationState, usize), AgentError> {
        self.schema.validate(&state)?;

        // (node, predecessor) pairs; the entry's predecessor is the entry itself
        let mut frontier = vec![(self.entry.clone(), self.entry.clone())];
        let mut steps = 0;
        while !frontier.is_empty() {
            if steps >= recursion_limit {
                return Err(AgentError::RecursionLimit(recursion_limit));
            }
            steps += 1;

            let snapshot = Arc::new(state.clone());
            let outputs = try_join_all(
                frontier
                    .iter()
                    .map(|(id, from)| self.run_node(id, from, Arc::clone(&snapshot))),
            )
            .await?;

            let mut nexts = Vec::with_capacity(outputs.len());
            for ((id, _), (update, next)) in frontier.iter().zip(outputs) {
                self.schema.apply(&mut state, &update)?;
                log_state_update(id, update.len());
                nexts.push(next);
            }

            let mut next_frontier: Vec<(String, String)> = Vec::new();
            for ((id, _), next) in frontier.iter().zip(nexts) {
                for target in self.route(id, next, &state)? {
                    if !next_frontier.iter().any(|(t, _)| *t == target) {
                        next_frontier.push((target, id.clone()));
                    }
                }
            }
            frontier = next_frontier;
        }
        Ok((state, steps))
    }

    /// Runs one node (through middleware when set); failures are wrapped with the node id.
    ///
    /// `from` is the node whose routing scheduled `id`. `route` only yields registered
    /// nodes, so a missing node means the graph was built by hand around the compiler.
    async fn run_node(
        &self,
        id: &str,
        from: &str,
        snapshot: Arc<ConversationState>,
    ) -> Result<(StateUpdate, Next), AgentError> {
        let node = self
            .nodes
            .get(id)
            .cloned()
            .ok_or_else(|| AgentError::InvalidRoute {
                from: from.to_string(),
                to: id.to_string(),
            })?;
        log_node_start(id);

        let result: NodeResult = match &self.middleware {
            Some(middleware) => {
                let call: NodeCall = Box::new(
                    move |s: Arc<ConversationState>| -> BoxFuture<'static, NodeResult> {
                        Box::pin(async move { node.run(&s).await })
                    },
                );
                middleware.around_run(id, snapshot, call).await
            }
            None => node.run(&snapshot).await,
        };

        match result {
            Ok((update, next)) => {
                log_node_complete(id, &next);
                Ok((update, next))
            }
            Err(e) => Err(AgentError::NodeExecution {
                node: id.to_string(),
                source: Box::new(e),
            }),
        }
    }

    /// Destinations after `id` returned `next`, END markers dropped.
    fn route(
        &self,
        id: &str,
        next: Next,
        state: &ConversationState,
    ) -> Result<Vec<String>, AgentError> {
        match next {
            Next::End => Ok(Vec::new()),
            Next::Node(target) => {
                if target == END {
                    Ok(Vec::new())
                } else if self.nodes.contains_key(&target) {
                    Ok(vec![target])
                } else {
                    Err(AgentError::InvalidRoute {
                        from: id.to_string(),
                        to: target,
                    })
                }
            }
            Next::Continue => {
                let mut targets: Vec<String> = self
                    .edges
                    .get(id)
                    .map(|ts| ts.iter().filter(|t| *t != END).cloned().collect())
                    .unwrap_or_default();
                if let Some(cond) = self.conditional.get(id) {
                    let picked = (cond.router)(state);
                    if !cond.targets.contains(&picked) {
                        return Err(AgentError::InvalidRoute {
                            from: id.to_string(),
                            to: picked,
                        });
                    }
                    if picked != END {
                        targets.push(picked);
                    }
                }
                Ok(targets)
            }
        }
    }
}
