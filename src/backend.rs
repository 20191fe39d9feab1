use anyhow::Result;
use reqwest::Client;
use std::future::Future;
use std::pin::Pin;

use crate::config::Config;
use crate::providers;

/// What one dispatch produced. The local runtime writes straight to the
/// inherited stdout, so there is no text to hand back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutput {
    Text(String),
    Streamed,
}

pub type DispatchFuture<'a> = Pin<Box<dyn Future<Output = Result<TurnOutput>> + 'a>>;

/// One dispatch per composed prompt; no retries, no memory across calls.
pub trait Backend {
    fn dispatch<'a>(&'a self, prompt: &'a str) -> DispatchFuture<'a>;
}

/// Hosted front-end: one generateContent call per prompt.
pub struct GeminiBackend<'a> {
    pub client: &'a Client,
    pub cfg: &'a Config,
    pub api_key: String,
    pub model: String,
}

impl<'a> Backend for GeminiBackend<'a> {
    fn dispatch<'b>(&'b self, prompt: &'b str) -> DispatchFuture<'b> {
        Box::pin(async move {
            let text =
                providers::gemini::generate(self.client, self.cfg, &self.api_key, &self.model, prompt)
                    .await?;
            Ok(TurnOutput::Text(text))
        })
    }
}

/// Local front-end: spawns the runtime and lets it stream its own output.
pub struct OllamaBackend {
    pub bin: String,
    pub model: String,
}

impl Backend for OllamaBackend {
    fn dispatch<'a>(&'a self, prompt: &'a str) -> DispatchFuture<'a> {
        Box::pin(async move {
            providers::ollama::run(&self.bin, &self.model, prompt).await?;
            Ok(TurnOutput::Streamed)
        })
    }
}
