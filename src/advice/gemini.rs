use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{AdviceRequest, Advisor};
use crate::config::AdviceConfig;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Tip generator backed by the Gemini `generateContent` endpoint.
pub(crate) struct GeminiAdvisor {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
}

impl GeminiAdvisor {
    pub(crate) fn new(api_key: String, model: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            api_key,
            model,
        })
    }

    /// Build from config; `None` when no API key is set.
    pub(crate) fn from_config(config: &AdviceConfig) -> Result<Option<Self>> {
        match &config.api_key {
            Some(key) => Ok(Some(Self::new(
                key.clone(),
                config.model.clone(),
                config.timeout,
            )?)),
            None => Ok(None),
        }
    }
}

pub(crate) fn prompt(request: &AdviceRequest) -> String {
    format!(
        "You are a cheerful Ghanaian financial advisor. The user earns {} GHS a month and has \
         {} GHS left after rent, food and transport. Give one short, fun tip about saving or \
         smart spending, with a little local slang. Under 20 words.",
        request.salary.round_dp(2),
        request.remaining.round_dp(2),
    )
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Default)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
}

#[derive(Deserialize, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Default)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

/// Concatenated text of the first candidate; empty when there is none.
fn response_text(response: GenerateResponse) -> String {
    response
        .candidates
        .into_iter()
        .next()
        .map(|c| {
            c.content
                .parts
                .into_iter()
                .map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default()
}

impl Advisor for GeminiAdvisor {
    fn advise(&self, request: &AdviceRequest) -> Result<String> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt(request),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.8,
                top_k: 40,
                top_p: 0.95,
            },
        };

        let url = format!("{API_BASE}/{}:generateContent", self.model);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .context("Tip request failed")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            anyhow::bail!("Tip service returned {status}: {}", text.trim());
        }

        let parsed: GenerateResponse = response.json().context("Failed to parse tip response")?;
        Ok(response_text(parsed))
    }
}
