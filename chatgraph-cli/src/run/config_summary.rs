//! Config summary printed to stderr before a verbose run.
//!
//! Used by [`run_with_config`](super::run_with_config) when `config.verbose` is true. The
//! API key is never included.

use crate::config::RunConfig;

/// One `key: value` line per setting that shapes the run.
pub(crate) fn summary_lines(config: &RunConfig) -> Vec<String> {
    let llm = if config.mock {
        "mock (echo)".to_string()
    } else {
        format!("{} @ {}", config.model, config.api_base)
    };
    let temperature = config
        .temperature
        .map(|t| t.to_string())
        .unwrap_or_else(|| "default".to_string());
    let timeout = config
        .timeout
        .map(|t| format!("{}s", t.as_secs()))
        .unwrap_or_else(|| "none".to_string());
    let context = if config.context.is_empty() {
        "(empty)".to_string()
    } else {
        config.context.clone()
    };
    vec![
        format!("llm: {}", llm),
        format!("temperature: {}", temperature),
        format!("context: {}", context),
        format!("recursion_limit: {}", config.recursion_limit),
        format!("timeout: {}", timeout),
    ]
}

pub(crate) fn print_to_stderr(config: &RunConfig) {
    eprintln!("[config]");
    for line in summary_lines(config) {
        eprintln!("  {}", line);
    }
}
