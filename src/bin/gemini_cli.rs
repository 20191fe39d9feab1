use anyhow::{Context, Result};
use clap::Parser;
use reqwest::Client;
use std::env;
use std::time::Duration;
use tracing::warn;

use quill::backend::GeminiBackend;
use quill::config::Config;
use quill::context::{ContextBundle, GEMINI_CONTEXT_SOURCES};
use quill::{logging, prompt, session};

/// Context-aware terminal interface for Gemini models.
#[derive(Parser)]
#[command(name = "gemini-cli")]
struct Args {
    /// Direct prompt (non-interactive)
    #[arg(short, long)]
    prompt: Option<String>,

    /// Model to use (default: gemini-2.0-flash-exp)
    #[arg(short, long)]
    model: Option<String>,

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

    let Some(api_key) = cfg.gemini_api_key.clone() else {
        warn!("GEMINI_API_KEY is not set; refusing to dispatch");
        println!("Error: GEMINI_API_KEY environment variable not set");
        println!("\nSet it with:");
        println!("  export GEMINI_API_KEY='your-api-key-here'");
        println!("\nOr add to ~/.bashrc for persistence:");
        println!("  echo 'export GEMINI_API_KEY=\"your-key\"' >> ~/.bashrc");
        std::process::exit(1);
    };

    let model = args.model.unwrap_or_else(|| cfg.gemini_model.clone());
    let client = Client::builder()
        .timeout(Duration::from_secs(cfg.model_timeout_secs))
        .build()
        .context("Failed to initialize HTTP client")?;

    let bundle = if args.no_context {
        ContextBundle::empty()
    } else {
        let cwd = env::current_dir().context("Failed to resolve working directory")?;
        ContextBundle::load(&cwd, GEMINI_CONTEXT_SOURCES)?
    };

    let backend = GeminiBackend {
        client: &client,
        cfg: &cfg,
        api_key,
        model: model.clone(),
    };

    if let Some(raw) = args.prompt {
        let composed = prompt::compose(&bundle, &raw);
        return session::run_once(&backend, &composed).await;
    }

    println!("\nGemini CLI ({model})");
    println!("Type your prompt (Ctrl+D to send, Ctrl+C to exit)");
    if !bundle.is_empty() {
        println!("Context loaded from project files\n");
    }

    session::install_interrupt_handler()?;
    session::run_interactive(&backend, &|raw| prompt::compose(&bundle, raw)).await
}
