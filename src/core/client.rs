use std::error::Error as StdError;
use std::fmt;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::api::{GenerateContentRequest, GenerateContentResponse};
use crate::core::constants::FALLBACK_REPLY;
use crate::utils::url::generate_content_url;

/// Errors surfaced to the turn controller when a completion fails.
///
/// A response that arrives with a success status never produces an error;
/// missing fields resolve to [`FALLBACK_REPLY`] instead.
#[derive(Debug)]
pub enum ApiError {
    /// The request could not be sent or the body could not be read.
    Transport(reqwest::Error),

    /// The endpoint answered with a non-success status.
    Status {
        status: StatusCode,
        /// Summary taken from the error body, possibly empty.
        message: String,
    },

    /// The task driving the request ended without producing a result.
    Aborted(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(source) => write!(f, "{source}"),
            ApiError::Status { status, message } if message.is_empty() => {
                write!(f, "Request failed with status code {}", status.as_u16())
            }
            ApiError::Status { status, message } => {
                write!(
                    f,
                    "Request failed with status code {}: {}",
                    status.as_u16(),
                    message
                )
            }
            ApiError::Aborted(reason) => write!(f, "Request aborted: {reason}"),
        }
    }
}

impl StdError for ApiError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ApiError::Transport(source) => Some(source),
            _ => None,
        }
    }
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send one prompt and return the assistant text.
    async fn complete(&self, prompt: &str) -> Result<String, ApiError>;

    fn model(&self) -> &str;
}

#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl GeminiClient {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url, model, api_key)
    }

    pub fn with_http_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, ApiError> {
        let url = generate_content_url(&self.base_url, &self.model);
        debug!(model = %self.model, prompt_chars = prompt.chars().count(), "sending generateContent");

        // The key travels in the query string; strip the URL from transport
        // errors so it never reaches notifications or logs.
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = summarize_error_body(&body);
            debug!(status = status.as_u16(), %message, "generateContent failed");
            return Err(ApiError::Status { status, message });
        }

        let body = response
            .text()
            .await
            .map_err(|err| ApiError::Transport(err.without_url()))?;

        let text = match serde_json::from_str::<GenerateContentResponse>(&body) {
            Ok(decoded) => decoded.into_first_text(),
            Err(err) => {
                warn!(error = %err, "response body did not decode");
                None
            }
        };

        Ok(text.unwrap_or_else(|| {
            debug!("response carried no candidate text, using fallback reply");
            FALLBACK_REPLY.to_string()
        }))
    }

    fn model(&self) -> &str {
        &self.model
    }
}

fn extract_error_summary(value: &serde_json::Value) -> Option<String> {
    let summary = value
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .or_else(|| {
            value.get("error").and_then(|v| match v {
                serde_json::Value::String(s) => Some(s.to_string()),
                _ => None,
            })
        })
        .or_else(|| {
            value
                .get("message")
                .and_then(|v| v.as_str().map(str::to_owned))
        });

    summary.map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Reduce an error body to one line suitable for a notification.
fn summarize_error_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<no body>".to_string();
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        if let Some(summary) = extract_error_summary(&value) {
            if !summary.is_empty() {
                return summary;
            }
        }
    }

    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}
