use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::providers::http_errors::model_api_request_error;

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

fn generate_url(base_url: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        model
    )
}

fn extract_text(response: GenerateContentResponse) -> Result<String> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("Model response contained no candidates"))?;
    Ok(candidate
        .content
        .parts
        .into_iter()
        .map(|part| part.text)
        .collect())
}

pub async fn generate(
    client: &Client,
    cfg: &Config,
    api_key: &str,
    model: &str,
    prompt: &str,
) -> Result<String> {
    let api_url = generate_url(&cfg.gemini_base_url, model);
    let body = GenerateContentRequest {
        contents: vec![Content {
            parts: vec![RequestPart {
                text: prompt.to_string(),
            }],
        }],
    };
    debug!(
        api_url = %api_url,
        model = %model,
        prompt_len = prompt.len(),
        "sending generateContent request"
    );

    let response = client
        .post(&api_url)
        .header("x-goog-api-key", api_key)
        .json(&body)
        .send()
        .await
        .map_err(|err| {
            warn!(
                api_url = %api_url,
                model = %model,
                error = %err,
                "generateContent request failed"
            );
            model_api_request_error(err, &api_url, cfg.model_timeout_secs)
        })?;

    if !response.status().is_success() {
        let status = response.status();
        let response_body = response
            .text()
            .await
            .unwrap_or_else(|_| "<failed to read response body>".to_string());
        warn!(
            api_url = %api_url,
            model = %model,
            status = %status,
            response_body_len = response_body.len(),
            "generateContent returned non-success status"
        );
        return Err(anyhow!(
            "Model request failed with status {}: {}",
            status,
            response_body
        ));
    }

    let parsed: GenerateContentResponse = response
        .json()
        .await
        .context("Failed to parse model response")?;
    let text = extract_text(parsed)?;
    debug!(model = %model, response_len = text.len(), "received generateContent response");
    Ok(text)
}
