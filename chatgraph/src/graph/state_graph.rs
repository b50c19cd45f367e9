//! State graph builder: nodes, edges, entry point, then compile.
//!
//! Add nodes with `add_node`, connect them with `add_edge(from, to)` (use `END` as the
//! terminal marker), pick the first node with `set_entry`, then `compile` to get a
//! `CompiledStateGraph`. Edges may be declared before their nodes; endpoints are checked
//! at compile time.

use std::collections::{HashMap, HashSet, VecDeque};
use std::future::Future;
use std::sync::Arc;

use crate::error::AgentError;
use crate::graph::compile_error::{BuildError, GraphValidationError};
use crate::graph::compiled::CompiledStateGraph;
use crate::graph::fn_node::FnNode;
use crate::graph::node::Node;
use crate::graph::node_middleware::NodeMiddleware;
use crate::state::{ConversationState, StateSchema, StateUpdate};

/// Terminal marker: use as `to` in `add_edge(last_node, END)`.
pub const END: &str = "__end__";

/// Picks one destination from the accumulated state. Must return one of the targets
/// declared in `add_conditional_edges` (or `END`).
pub type Router = Arc<dyn Fn(&ConversationState) -> String + Send + Sync>;

/// Router plus the destinations it may pick.
#[derive(Clone)]
pub(crate) struct ConditionalEdges {
    pub(crate) router: Router,
    pub(crate) targets: Vec<String>,
}

/// State graph builder.
///
/// Mutable until `compile`, which consumes it and returns an immutable
/// `CompiledStateGraph`; there is no way back from the compiled type to the builder.
///
/// **Interaction**: Accepts `Arc<dyn Node>`; produces `CompiledStateGraph`.
pub struct StateGraph {
    schema: StateSchema,
    nodes: HashMap<String, Arc<dyn Node>>,
    /// Registration order, for deterministic diagnostics.
    node_order: Vec<String>,
    /// Edges (from, to) in declaration order. Declaration order is fan-out merge order.
    edges: Vec<(String, String)>,
    conditional: HashMap<String, ConditionalEdges>,
    entry: Option<String>,
    middleware: Option<Arc<dyn NodeMiddleware>>,
}

impl StateGraph {
    /// Creates an empty graph over `schema`.
    pub fn new(schema: StateSchema) -> Self {
        Self {
            schema,
            nodes: HashMap::new(),
            node_order: Vec::new(),
            edges: Vec::new(),
            conditional: HashMap::new(),
            entry: None,
            middleware: None,
        }
    }

    /// Adds a node. Fails with `DuplicateNode` if `id` is already registered.
    pub fn add_node(
        &mut self,
        id: impl Into<String>,
        node: Arc<dyn Node>,
    ) -> Result<&mut Self, BuildError> {
        let id = id.into();
        if self.nodes.contains_key(&id) {
            return Err(BuildError::DuplicateNode(id));
        }
        self.node_order.push(id.clone());
        self.nodes.insert(id, node);
        Ok(self)
    }

    /// Adds a node from an async closure that returns a plain partial update.
    pub fn add_fn_node<F, Fut>(
        &mut self,
        id: impl Into<String>,
        f: F,
    ) -> Result<&mut Self, BuildError>
    where
        F: Fn(ConversationState) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<StateUpdate, AgentError>> + Send + 'static,
    {
        self.add_node(id, Arc::new(FnNode::new(f)))
    }

    /// Adds an edge from `from_id` to `to_id` (a node or `END`).
    ///
    /// Several edges from one node fan out: all targets run concurrently in the next step.
    pub fn add_edge(&mut self, from_id: impl Into<String>, to_id: impl Into<String>) -> &mut Self {
        self.edges.push((from_id.into(), to_id.into()));
        self
    }

    /// Adds a router on `from_id` that picks one of `targets` from the accumulated state.
    ///
    /// Replaces any router previously set on `from_id`.
    pub fn add_conditional_edges<R, I, T>(
        &mut self,
        from_id: impl Into<String>,
        router: R,
        targets: I,
    ) -> &mut Self
    where
        R: Fn(&ConversationState) -> String + Send + Sync + 'static,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.conditional.insert(
            from_id.into(),
            ConditionalEdges {
                router: Arc::new(router),
                targets: targets.into_iter().map(Into::into).collect(),
            },
        );
        self
    }

    /// Sets the entry node. Fails with `UnknownNode` if `id` is not registered.
    pub fn set_entry(&mut self, id: impl Into<String>) -> Result<&mut Self, BuildError> {
        let id = id.into();
        if !self.nodes.contains_key(&id) {
            return Err(BuildError::UnknownNode(id));
        }
        self.entry = Some(id);
        Ok(self)
    }

    /// Attaches node middleware; the compiled graph wraps every node call with it.
    pub fn with_middleware(self, middleware: Arc<dyn NodeMiddleware>) -> Self {
        Self {
            middleware: Some(middleware),
            ..self
        }
    }

    /// Outgoing destinations of `id`: static edges in declaration order, then
    /// conditional targets.
    fn successors<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let statics = self
            .edges
            .iter()
            .filter(move |(f, _)| f == id)
            .map(|(_, t)| t.as_str());
        let conditional = self
            .conditional
            .get(id)
            .into_iter()
            .flat_map(|c| c.targets.iter().map(String::as_str));
        statics.chain(conditional)
    }

    /// Validates and freezes the graph.
    ///
    /// Rules, checked in order: entry set and registered; every edge endpoint registered;
    /// every node reachable from the entry; some path reaches `END`; every node has an
    /// outgoing edge. The first violation is returned; nothing is compiled on failure.
    pub fn compile(self) -> Result<CompiledStateGraph, GraphValidationError> {
        let entry = self.entry.clone().ok_or(GraphValidationError::MissingEntry)?;
        if !self.nodes.contains_key(&entry) {
            return Err(GraphValidationError::UnknownEntry(entry));
        }

        let all_edges = self.edges.iter().cloned().chain(
            self.conditional
                .iter()
                .flat_map(|(f, c)| c.targets.iter().map(move |t| (f.clone(), t.clone()))),
        );
        for (from, to) in all_edges {
            if !self.nodes.contains_key(&from) {
                return Err(GraphValidationError::NodeNotFound {
                    missing: from.clone(),
                    from,
                    to,
                });
            }
            if to != END && !self.nodes.contains_key(&to) {
                return Err(GraphValidationError::NodeNotFound {
                    missing: to.clone(),
                    from,
                    to,
                });
            }
        }

        let mut visited: HashSet<&str> = HashSet::new();
        let mut reaches_end = false;
        let mut queue = VecDeque::from([entry.as_str()]);
        visited.insert(entry.as_str());
        while let Some(id) = queue.pop_front() {
            for next in self.successors(id) {
                if next == END {
                    reaches_end = true;
                } else if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        let unreachable: Vec<String> = self
            .node_order
            .iter()
            .filter(|id| !visited.contains(id.as_str()))
            .cloned()
            .collect();
        if !unreachable.is_empty() {
            return Err(GraphValidationError::Unreachable(unreachable));
        }
        if !reaches_end {
            return Err(GraphValidationError::NoPathToEnd);
        }
        if let Some(dead) = self
            .node_order
            .iter()
            .find(|id| self.successors(id).next().is_none())
        {
            return Err(GraphValidationError::DeadEnd(dead.clone()));
        }

        let mut edges: HashMap<String, Vec<String>> = HashMap::new();
        for (from, to) in self.edges {
            edges.entry(from).or_default().push(to);
        }

        Ok(CompiledStateGraph {
            schema: Arc::new(self.schema),
            nodes: self.nodes,
            node_order: self.node_order,
            edges,
            conditional: self.conditional,
            entry,
            middleware: self.middleware,
        })
    }
}
