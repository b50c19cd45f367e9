//! chatgraph binary: parse the message from the command line, run the chat agent, print the reply.

use clap::Parser;
use chatgraph_cli::{init_tracing, run_with_options, RunOptions};

#[derive(Parser, Debug)]
#[command(name = "chatgraph")]
#[command(about = "Chat agent: send one message through the respond graph and print the reply")]
struct Args {
    /// User message (can also be given as positional arguments)
    #[arg(short, long, value_name = "TEXT")]
    message: Option<String>,

    /// Conversation context passed alongside the message
    #[arg(short, long, value_name = "TEXT")]
    context: Option<String>,

    /// Answer with the offline mock LLM (echo); no API key needed
    #[arg(long)]
    mock: bool,

    /// Show node enter/exit and graph events on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Positional: user message (when -m/--message is not used)
    #[arg(trailing_var_arg = true)]
    rest: Vec<String>,
}

fn get_message(args: &Args) -> String {
    if let Some(ref m) = args.message {
        return m.clone();
    }
    if args.rest.is_empty() {
        return "Hello!".to_string();
    }
    args.rest.join(" ").trim().to_string()
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    if let Err(e) = init_tracing(args.verbose) {
        eprintln!("warning: tracing not initialized: {}", e);
    }
    let input = get_message(&args);
    let options = RunOptions {
        context: args.context.clone(),
        mock: args.mock,
        verbose: args.verbose,
        ..Default::default()
    };

    println!("User: {}", input);
    println!("---");

    match run_with_options(&input, &options).await {
        Ok(reply) => println!("Assistant: {}", reply),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
