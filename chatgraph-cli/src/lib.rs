//! chatgraph-cli library: reusable chat run logic for other crates.
//!
//! Reads OpenAI config from .env, builds the `respond → END` graph with node logging,
//! sends one message and returns the reply.
//!
//! ## Usage
//!
//! ```rust,no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), chatgraph_cli::Error> {
//! let reply = chatgraph_cli::run("hello").await?;
//! println!("{}", reply);
//! # Ok(())
//! # }
//! ```

mod config;
mod logging;
mod middleware;
mod run;

pub use chatgraph::{ChatAgent, Message};
pub use config::{Error, RunConfig, RunOptions};
pub use logging::init_tracing;
pub use middleware::{LoggingMiddleware, WithNodeLogging};
pub use run::{build_agent, run, run_with_config, run_with_options};
