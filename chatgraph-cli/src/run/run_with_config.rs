//! Run the chat graph with a given config; does not read .env.
//!
//! Builds the LLM (OpenAI or mock), the `respond → END` graph with node logging, and the
//! [`ChatAgent`](chatgraph::ChatAgent) around it.

use chatgraph::{ChatAgent, LlmClient, MockLlm};

use crate::config::RunConfig;
use crate::middleware::WithNodeLogging;

use super::config_summary;
use super::Error;

/// Sends `user_message` with the given config and returns the reply text.
///
/// With `config.verbose` set, prints the config summary to stderr first.
pub async fn run_with_config(config: &RunConfig, user_message: &str) -> Result<String, Error> {
    if config.verbose {
        config_summary::print_to_stderr(config);
    }
    let agent = build_agent(config)?;
    let reply = agent.chat(user_message, &config.context).await?;
    Ok(reply)
}

/// Builds the chat agent for `config`: LLM, node logging middleware and run limits.
pub fn build_agent(config: &RunConfig) -> Result<ChatAgent, Error> {
    let llm = build_llm(config)?;
    let graph = ChatAgent::graph_builder(llm)?
        .with_node_logging()
        .compile()?;
    Ok(ChatAgent::from_graph(graph).with_config(config.runnable_config()))
}

fn build_llm(config: &RunConfig) -> Result<Box<dyn LlmClient>, Error> {
    if config.mock {
        return Ok(Box::new(MockLlm::echo()));
    }
    openai_llm(config)
}

#[cfg(feature = "openai")]
fn openai_llm(config: &RunConfig) -> Result<Box<dyn LlmClient>, Error> {
    use async_openai::config::OpenAIConfig;
    use chatgraph::ChatOpenAI;

    let openai_config = OpenAIConfig::new()
        .with_api_base(&config.api_base)
        .with_api_key(config.api_key.clone());
    let mut llm = ChatOpenAI::with_config(openai_config, config.model.clone());
    if let Some(t) = config.temperature {
        llm = llm.with_temperature(t);
    }
    Ok(Box::new(llm))
}

#[cfg(not(feature = "openai"))]
fn openai_llm(_config: &RunConfig) -> Result<Box<dyn LlmClient>, Error> {
    Err("built without the `openai` feature; use --mock".into())
}
