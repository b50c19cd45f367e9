//! Next-step result from a graph node: follow edges, jump to a node, or end.
//!
//! The executor uses this to build the next frontier after merging a node's update.

/// Next step after running a node.
///
/// - **Continue**: follow the node's declared edges (static, then conditional router).
/// - **Node(id)**: jump to the given node instead (conditional routing from inside a node).
/// - **End**: stop this branch.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub enum Next {
    /// Follow the declared edges.
    #[default]
    Continue,
    /// Run the node with the given id next.
    Node(String),
    /// Stop this branch; the run ends once no branch is left.
    End,
}
