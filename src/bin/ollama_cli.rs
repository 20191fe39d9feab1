use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use tracing::debug;

use quill::backend::OllamaBackend;
use quill::config::Config;
use quill::context::{ContextBundle, OLLAMA_CONTEXT_SOURCES};
use quill::prompt::SystemFramedPrompt;
use quill::providers::ollama;
use quill::{logging, session};

/// Context-aware terminal interface for local Ollama models.
#[derive(Parser)]
#[command(name = "ollama-cli")]
struct Args {
    /// Direct prompt (non-interactive)
    #[arg(short, long)]
    prompt: Option<String>,

    /// Model to use (default: deepseek-coder:latest)
    #[arg(short, long)]
    model: Option<String>,

    /// List available models
    #[arg(long)]
    list: bool,

    /// Skip loading context files
    #[arg(long)]
    no_context: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let args = Args::parse();
    let cfg = Config::from_env();

    if args.list {
        let listing = ollama::list_models(&cfg.ollama_bin).await?;
        println!("{listing}");
        return Ok(());
    }

    let model = args.model.unwrap_or_else(|| cfg.ollama_model.clone());

    let bundle = if args.no_context {
        ContextBundle::empty()
    } else {
        let cwd = env::current_dir().context("Failed to resolve working directory")?;
        ContextBundle::load(&cwd, OLLAMA_CONTEXT_SOURCES)?
    };

    let backend = OllamaBackend {
        bin: cfg.ollama_bin.clone(),
        model: model.clone(),
    };

    if let Some(raw) = args.prompt {
        let framed = SystemFramedPrompt::frame(&bundle, &raw);
        debug!(
            has_system_instruction = framed.system_instruction().is_some(),
            "dispatching one-shot prompt"
        );
        println!("\nUsing model: {model}");
        println!("Sending prompt to Ollama...\n");
        return session::run_once(&backend, &framed.flatten()).await;
    }

    println!("\nOllama CLI ({model})");
    println!("Type your prompt (Ctrl+D to send, Ctrl+C to exit)");
    if !bundle.is_empty() {
        println!("Context loaded from project files\n");
    }

    session::install_interrupt_handler()?;
    session::run_interactive(&backend, &|raw| {
        SystemFramedPrompt::frame(&bundle, raw).flatten()
    })
    .await
}
