//! Run entry points: run with default config, run_with_config, or run_with_options.
//!
//! Re-exports [`run`], [`run_with_config`], [`run_with_options`], [`build_agent`] and [`Error`].

pub use crate::config::Error;

pub(crate) mod config_summary;
mod run_with_config;

use crate::config::{RunConfig, RunOptions};

pub use run_with_config::{build_agent, run_with_config};

/// Sends one message with config from `.env` / env and returns the reply.
pub async fn run(user_message: &str) -> Result<String, Error> {
    dotenv::dotenv().ok();
    let config = RunConfig::from_env()?;
    run_with_config(&config, user_message).await
}

/// Sends one message with config from env plus `options` and returns the reply.
///
/// With `options.mock` set, the environment is not required to hold an API key.
pub async fn run_with_options(user_message: &str, options: &RunOptions) -> Result<String, Error> {
    dotenv::dotenv().ok();
    let mut config = if options.mock {
        RunConfig::mock()
    } else {
        RunConfig::from_env()?
    };
    config.apply_options(options);
    run_with_config(&config, user_message).await
}
