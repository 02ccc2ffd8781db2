use colored::Colorize;
use reqwest::StatusCode;
use thiserror::Error;

use crate::config::{normalize_chat_url, ClientConfig};
use crate::models::{ChatRequest, ChatResponse, Reference};

/// A failed backend call. Exactly one of these surfaces per call; the
/// conversation state is never partially applied.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("could not reach backend: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("request failed ({status}): {body}")]
    Http { status: StatusCode, body: String },
    #[error("malformed backend response: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

/// Normalized backend reply, independent of which wire field carried the
/// text.
#[derive(Debug)]
pub struct ChatReply {
    pub text: String,
    pub references: Vec<Reference>,
}

/// Thin client for the backend `/chat` endpoint.
pub struct BackendGateway {
    client: reqwest::Client,
    chat_url: String,
    verbose: bool,
}

impl BackendGateway {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            chat_url: normalize_chat_url(&config.backend_url),
            verbose: config.verbose,
        }
    }

    /// POST the request and parse the reply. Non-2xx statuses and
    /// unparseable bodies surface as a single `GatewayError`; missing
    /// optional fields are defaulted during parsing instead.
    pub async fn call(&self, request: &ChatRequest) -> Result<ChatReply, GatewayError> {
        if self.verbose {
            println!(
                "{}",
                format!(
                    "→ POST {} ({} history entries)",
                    self.chat_url,
                    request.conversation_history.len()
                )
                .bright_black()
            );
        }

        let response = self
            .client
            .post(&self.chat_url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            return Err(GatewayError::Http { status, body });
        }

        let body = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body)?;

        if self.verbose {
            println!(
                "{}",
                format!(
                    "← {} ({} references, model {})",
                    status,
                    parsed.references.len(),
                    parsed.used_model.as_deref().unwrap_or("unknown")
                )
                .bright_black()
            );
        }

        Ok(ChatReply {
            text: parsed.reply_text(),
            references: parsed.references,
        })
    }
}
