//! Optional overrides for one chat run (CLI args or programmatic).
//!
//! Used by [`RunConfig::apply_options`](super::RunConfig::apply_options) and
//! [`run_with_options`](crate::run_with_options).

/// Optional overrides for a run: context, temperature, limits, mock LLM, verbosity.
///
/// All fields are optional; only set fields override the base config (from env).
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Conversation context passed alongside the message.
    pub context: Option<String>,
    /// Override sampling temperature (0–2).
    pub temperature: Option<f32>,
    /// Override the run timeout, in seconds.
    pub timeout_secs: Option<u64>,
    /// Override the recursion limit.
    pub recursion_limit: Option<usize>,
    /// Answer with the mock LLM (echo) instead of calling OpenAI.
    pub mock: bool,
    /// Show node enter/exit and graph events on stderr.
    pub verbose: bool,
}
