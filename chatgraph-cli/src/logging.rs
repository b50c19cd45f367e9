//! Tracing setup for the binary.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::config::Error;

/// Initializes tracing on stderr. `RUST_LOG` wins when set; otherwise `verbose` selects
/// debug logs for the engine and the CLI, and warnings only without it.
pub fn init_tracing(verbose: bool) -> Result<(), Error> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            tracing_subscriber::EnvFilter::new("warn,chatgraph=debug,chatgraph_cli=debug")
        } else {
            tracing_subscriber::EnvFilter::new("warn")
        }
    });

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(stderr_layer).try_init()?;
    Ok(())
}
