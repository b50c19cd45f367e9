//! Invoke config: per-run limits.
//!
//! Passed to `CompiledStateGraph::invoke`; `None` means the defaults.

use std::time::Duration;

/// Default maximum number of super-steps per run.
pub const DEFAULT_RECURSION_LIMIT: usize = 25;

/// Config for a single invoke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnableConfig {
    /// Maximum number of super-steps before the run fails with `RecursionLimit`.
    pub recursion_limit: usize,
    /// When set, the run is cancelled and fails with `Timeout` after this long.
    pub timeout: Option<Duration>,
}

impl Default for RunnableConfig {
    fn default() -> Self {
        Self {
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            timeout: None,
        }
    }
}

impl RunnableConfig {
    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
