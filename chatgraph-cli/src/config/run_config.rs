//! Run config: API base, key, model, temperature and run limits. Filled from env / .env.
//!
//! Interacts with [`RunOptions`](super::RunOptions), [`run_with_config`](crate::run_with_config)
//! and chatgraph's [`RunnableConfig`](chatgraph::RunnableConfig).

use std::time::Duration;

use chatgraph::graph::DEFAULT_RECURSION_LIMIT;
use chatgraph::RunnableConfig;

use super::RunOptions;

/// Error type used for config loading and runs.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Default OpenAI API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Run config: API base, key, model, temperature, context and limits.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// OpenAI API base URL, e.g. `https://api.openai.com/v1`.
    pub api_base: String,
    /// OpenAI API key. Empty for mock runs.
    pub api_key: String,
    /// Model name, e.g. `gpt-4`.
    pub model: String,
    /// Sampling temperature 0–2. Default: unset (use API default).
    pub temperature: Option<f32>,
    /// Conversation context sent with every message.
    pub context: String,
    /// Upper bound on one run; unset means no timeout.
    pub timeout: Option<Duration>,
    /// Maximum super-steps per run.
    pub recursion_limit: usize,
    /// When true, answer with the mock LLM; no API key needed.
    pub mock: bool,
    /// When true, show debug logs (node enter/exit, graph execution).
    pub verbose: bool,
}

impl RunConfig {
    /// Fill config from env vars (and .env). Requires `dotenv::dotenv().ok()` or load inside `run()`.
    ///
    /// `OPENAI_API_KEY` required; `OPENAI_API_BASE`, `OPENAI_MODEL` have defaults.
    /// `OPENAI_TEMPERATURE`, `CHAT_TIMEOUT_SECS`, `RECURSION_LIMIT` optional; unparsable
    /// values are ignored.
    pub fn from_env() -> Result<Self, Error> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "OPENAI_API_KEY is not set; please configure it in .env",
            )
        })?;
        let mut config = Self::mock();
        config.api_key = api_key;
        config.mock = false;
        if let Ok(base) = std::env::var("OPENAI_API_BASE") {
            config.api_base = base;
        }
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            config.model = model;
        }
        config.temperature = std::env::var("OPENAI_TEMPERATURE")
            .ok()
            .and_then(|s| s.parse().ok());
        config.timeout = std::env::var("CHAT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs);
        if let Some(limit) = std::env::var("RECURSION_LIMIT")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.recursion_limit = limit;
        }
        Ok(config)
    }

    /// Config for offline runs with the mock LLM: defaults everywhere, no API key.
    pub fn mock() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            temperature: None,
            context: String::new(),
            timeout: None,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            mock: true,
            verbose: false,
        }
    }

    /// Apply optional overrides from `RunOptions` to this config.
    ///
    /// Only set fields in `options` override; `mock` can only be switched on.
    pub fn apply_options(&mut self, options: &RunOptions) {
        if let Some(ctx) = &options.context {
            self.context = ctx.clone();
        }
        if let Some(t) = options.temperature {
            self.temperature = Some(t);
        }
        if let Some(secs) = options.timeout_secs {
            self.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(limit) = options.recursion_limit {
            self.recursion_limit = limit;
        }
        if options.mock {
            self.mock = true;
        }
        self.verbose = options.verbose;
    }

    /// Engine run config (recursion limit, timeout) for this CLI config.
    pub fn runnable_config(&self) -> RunnableConfig {
        let config = RunnableConfig::default().with_recursion_limit(self.recursion_limit);
        match self.timeout {
            Some(t) => config.with_timeout(t),
            None => config,
        }
    }
}
