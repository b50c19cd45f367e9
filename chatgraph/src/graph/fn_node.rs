//! Closure-backed node for `StateGraph::add_fn_node`.

use std::future::Future;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::state::{ConversationState, StateUpdate};

use super::{Next, Node};

/// Node built from an async closure returning a plain partial update.
///
/// The closure gets its own copy of the state snapshot, and the node always
/// continues along its declared edges.
pub struct FnNode<F> {
    f: F,
}

impl<F, Fut> FnNode<F>
where
    F: Fn(ConversationState) -> Fut + Send + Sync,
    Fut: Future<Output = Result<StateUpdate, AgentError>> + Send,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F, Fut> Node for FnNode<F>
where
    F: Fn(ConversationState) -> Fut + Send + Sync,
    Fut: Future<Output = Result<StateUpdate, AgentError>> + Send,
{
    async fn run(&self, state: &ConversationState) -> Result<(StateUpdate, Next), AgentError> {
        let update = (self.f)(state.clone()).await?;
        Ok((update, Next::Continue))
    }
}
