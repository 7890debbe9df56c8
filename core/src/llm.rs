use anyhow::{Context, Result};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::EstimatorConfig;
use crate::error::EstimateError;
use crate::parse::{leading_number, truthy};
use crate::prompt::{build_prompt, Activity};

// Cheapest option on OpenRouter
pub const MODEL: &str = "openai/gpt-4o-mini";

pub const MAX_TOKENS: u32 = 50;

pub const APP_TITLE: &str = "Carbon Footprint Game";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

// kg CO2e; -1.0 (the model's "impossible" answer) is passed through as a value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub value: f64,
}

pub struct Estimator {
    client: Client,
    config: EstimatorConfig,
}

impl Estimator {
    pub fn new(config: EstimatorConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("failed to build HTTP client")?;

        info!("Estimator ready. Model: {}", MODEL);
        Ok(Self { client, config })
    }

    // One round trip, never retried
    pub async fn estimate(&self, activity: &Activity) -> Result<Estimate, EstimateError> {
        let prompt = build_prompt(activity);
        let body = ChatRequest {
            model: MODEL,
            messages: [ChatMessage {
                role: "user",
                content: &prompt,
            }],
            max_tokens: MAX_TOKENS,
        };

        let mut request = self
            .client
            .post(self.config.completions_url())
            .header("HTTP-Referer", &self.config.site_url)
            .header("X-Title", APP_TITLE)
            .json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        debug!("Upstream answered {}", response.status());

        // OpenRouter can put an error object in a 200 body, so the status alone
        // says nothing; the payload decides.
        let raw = response.text().await?;
        let data: Value = serde_json::from_str(&raw)
            .map_err(|e| EstimateError::MalformedResponse(format!("body is not JSON: {}", e)))?;
        let text = reply_text(&data)?;
        parse_reply(text)
    }
}

fn reply_text(data: &Value) -> Result<&str, EstimateError> {
    if let Some(err) = data.get("error").filter(|e| truthy(e)) {
        error!("OpenRouter error: {}", err);
        return Err(EstimateError::Upstream(err.clone()));
    }

    let choice = data
        .get("choices")
        .and_then(|c| c.get(0))
        .ok_or_else(|| EstimateError::MalformedResponse("response has no choices".into()))?;

    choice
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
        .ok_or_else(|| {
            EstimateError::MalformedResponse("first choice has no message content".into())
        })
}

fn parse_reply(text: &str) -> Result<Estimate, EstimateError> {
    let text = text.trim();
    match leading_number(text) {
        Some(value) => Ok(Estimate { value }),
        None => Err(EstimateError::InvalidResult(text.to_string())),
    }
}
