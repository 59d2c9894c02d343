use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure modes of the text-generation endpoint. None of them carry partial output.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("request timed out")]
    Timeout,

    #[error("endpoint returned status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GenerationError::Timeout
        } else {
            GenerationError::Transport(err.to_string())
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Client for a locally running text-generation service. Calls are never retried.
pub struct GenerationService {
    http: reqwest::Client,
    endpoint: String,
    model: String,
}

impl GenerationService {
    /// `timeout` bounds the whole exchange, body included.
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            model: model.into(),
        })
    }

    pub async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        tracing::debug!("Sending prompt ({} chars) to {}", prompt.len(), self.endpoint);
        let resp = self.http.post(&self.endpoint).json(&request).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GenerationError::Status(status.as_u16()));
        }

        let body = resp.bytes().await?;
        let parsed: GenerateResponse = serde_json::from_slice(&body)
            .map_err(|e| GenerationError::Malformed(e.to_string()))?;

        Ok(parsed.response)
    }
}
