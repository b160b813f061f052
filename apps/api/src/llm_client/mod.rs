/// LLM Client — the single point of entry for all OpenAI calls in the grader.
///
/// No other module may call the provider directly. Handlers depend on the
/// `GradingProvider` trait so tests can substitute a stub without network access.
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::grading::schema::ScoreSchema;

pub mod prompts;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error (status {status})")]
    Status { status: u16, body: Value },

    #[error("Provider returned no output text")]
    Empty { raw: Value },
}

/// The narrow seam between the grading handler and the completion provider.
/// Returns the textual answer; JSON parsing is the caller's concern.
#[async_trait]
pub trait GradingProvider: Send + Sync {
    async fn complete(
        &self,
        instructions: &str,
        payload: &str,
        schema: &ScoreSchema,
    ) -> Result<String, ProviderError>;
}

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: [InputTurn<'a>; 2],
    text: TextOptions,
}

#[derive(Debug, Serialize)]
struct InputTurn<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct TextOptions {
    format: JsonSchemaFormat,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
    name: &'static str,
    schema: Value,
    strict: bool,
}

/// OpenAI Responses API client. One attempt per call, no retries,
/// no timeout beyond reqwest's defaults.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/responses", self.base_url)
    }
}

#[async_trait]
impl GradingProvider for OpenAiClient {
    async fn complete(
        &self,
        instructions: &str,
        payload: &str,
        schema: &ScoreSchema,
    ) -> Result<String, ProviderError> {
        let request_body = ResponsesRequest {
            model: &self.model,
            input: [
                InputTurn {
                    role: "developer",
                    content: instructions,
                },
                InputTurn {
                    role: "user",
                    content: payload,
                },
            ],
            text: TextOptions {
                format: JsonSchemaFormat {
                    format_type: "json_schema",
                    name: schema.name,
                    schema: schema.json_schema(),
                    strict: true,
                },
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        // Keep the raw payload even when it is not JSON, it goes into the error detail.
        let raw: Value = serde_json::from_str(&body).unwrap_or(Value::String(body));

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: raw,
            });
        }

        let text = extract_output_text(&raw);
        if text.is_empty() {
            return Err(ProviderError::Empty { raw });
        }

        debug!(
            "Provider call succeeded: schema={}, output_chars={}",
            schema.name,
            text.chars().count()
        );

        Ok(text)
    }
}

/// Pulls the textual answer out of a Responses API payload.
///
/// Strategies, first non-blank wins:
/// 1. top-level `output_text`
/// 2. every `output[].content[].text`, joined with newlines
/// 3. top-level `text`, when it is a string
///
/// Returns an empty string when none apply.
pub fn extract_output_text(raw: &Value) -> String {
    if let Some(text) = non_blank(raw.get("output_text")) {
        return text;
    }

    if let Some(items) = raw.get("output").and_then(Value::as_array) {
        let texts: Vec<&str> = items
            .iter()
            .filter_map(|item| item.get("content").and_then(Value::as_array))
            .flatten()
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect();
        let joined = texts.join("\n");
        let joined = joined.trim();
        if !joined.is_empty() {
            return joined.to_string();
        }
    }

    non_blank(raw.get("text")).unwrap_or_default()
}

fn non_blank(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
