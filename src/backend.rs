use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::config::ChatConfig;
use crate::error::ExchangeError;

/// Body of a `POST /chat` request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub input: String,
}

/// Body of a successful `POST /chat` reply.
///
/// Both fields are optional: a reply without `response` still counts as a
/// success and is shown as "No response".
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ChatReply {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub time_taken: Option<f64>,
}

impl ChatReply {
    pub fn new(response: impl Into<String>, time_taken: f64) -> Self {
        Self {
            response: Some(response.into()),
            time_taken: Some(time_taken),
        }
    }
}

/// Anything that can carry one chat exchange.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn exchange(&self, input: &str) -> Result<ChatReply, ExchangeError>;
}

/// Talks to the chat endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    url: String,
}

impl HttpBackend {
    pub fn new(config: &ChatConfig) -> reqwest::Result<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;
        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn exchange(&self, input: &str) -> Result<ChatReply, ExchangeError> {
        let payload = ChatRequest {
            input: input.to_string(),
        };

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|source| ExchangeError::Transport {
                url: self.url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            error!(%status, %body, "Chat backend request failed");
            return Err(ExchangeError::Status {
                url: self.url.clone(),
                status,
                body,
            });
        }

        let reply = response
            .json::<ChatReply>()
            .await
            .map_err(|source| ExchangeError::Decode {
                url: self.url.clone(),
                source,
            })?;

        debug!(?reply, "Received chat reply");
        Ok(reply)
    }
}
