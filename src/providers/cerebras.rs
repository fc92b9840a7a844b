//! Cerebras Cloud Chat Completions client.
//!
//! The API is OpenAI-compatible: `POST {base_url}/chat/completions` with a
//! bearer token, answering with one JSON object or an SSE stream.
//! See: <https://inference-docs.cerebras.ai/api-reference/chat-completions>

use async_trait::async_trait;
use nonempty::NonEmpty;
use tracing::{debug, warn};

use crate::client::{Client, ClientError, StreamingClient};
use crate::config::{self, ConfigOverrides, ResolvedConfig};
use crate::http::authorized_post;
use crate::model::{ChatRequest, ChatResponse, Message};
use crate::options::{HttpTransport, ModelOptions};
use crate::sse::SSEResponseExt;
use crate::stream::FragmentStream;

const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// Client for Cerebras Cloud inference.
#[derive(Debug, Clone)]
pub struct CerebrasClient {
    model: String,
    transport: HttpTransport,
}

impl CerebrasClient {
    /// Create a client from resolved configuration.
    ///
    /// Fails with [`ClientError::Config`] when no API key was found.
    pub fn new(config: ResolvedConfig) -> Result<Self, ClientError> {
        let api_key = config.require_api_key()?;
        Ok(Self {
            model: config.model,
            transport: HttpTransport::new(api_key, config.base_url),
        })
    }

    /// Resolve configuration from the environment and config file, letting
    /// `api_key` and `model` override both.
    pub fn from_env(api_key: Option<String>, model: Option<String>) -> Result<Self, ClientError> {
        let overrides = ConfigOverrides {
            api_key,
            model,
            base_url: None,
        };
        Self::new(config::resolve_with_overrides(&overrides))
    }

    /// Create a client over a prepared transport.
    pub fn with_transport(model: impl Into<String>, transport: HttpTransport) -> Self {
        Self {
            model: model.into(),
            transport,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.transport.base_url
    }

    /// Send the request and fail on any non-200 status, keeping the body
    /// verbatim.
    async fn send(
        &self,
        messages: NonEmpty<Message>,
        options: &ModelOptions,
        stream: bool,
    ) -> Result<reqwest::Response, ClientError> {
        options.validate()?;

        let body = ChatRequest::new(&self.model, messages, options, stream);
        debug!(
            base_url = %self.transport.base_url,
            model = %self.model,
            messages = body.messages.len(),
            stream,
            "sending chat completion"
        );

        let response = authorized_post(&self.transport, CHAT_COMPLETIONS_PATH)?
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        debug!(status = status.as_u16(), "chat completion response");

        if status != reqwest::StatusCode::OK {
            return Err(api_error(status, response.text().await));
        }

        Ok(response)
    }
}

/// Error for a non-200 answer. The body is kept verbatim; if it cannot be
/// read, the transport error is reported instead.
fn api_error(status: reqwest::StatusCode, body: Result<String, reqwest::Error>) -> ClientError {
    match body {
        Ok(body) => ClientError::Api {
            status: status.as_u16(),
            body,
        },
        Err(e) => {
            warn!(status = status.as_u16(), error = %e, "could not read error body");
            ClientError::Http(e)
        }
    }
}

#[async_trait]
impl Client for CerebrasClient {
    async fn chat(
        &self,
        messages: NonEmpty<Message>,
        options: &ModelOptions,
    ) -> Result<String, ClientError> {
        let response = self.send(messages, options, false).await?;
        let text = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&text)?;

        parsed.into_content().ok_or_else(|| {
            ClientError::Protocol("missing choices[0].message.content".to_string())
        })
    }
}

#[async_trait]
impl StreamingClient for CerebrasClient {
    async fn chat_stream(
        &self,
        messages: NonEmpty<Message>,
        options: &ModelOptions,
    ) -> Result<FragmentStream, ClientError> {
        let response = self.send(messages, options, true).await?;
        Ok(FragmentStream::from_sse(response.sse()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::SecretString;

    #[test]
    fn test_new_requires_api_key() {
        let err = CerebrasClient::new(ResolvedConfig {
            api_key: None,
            model: "llama3.1-8b".to_string(),
            base_url: config::DEFAULT_BASE_URL.to_string(),
        })
        .unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("CEREBRAS_API_KEY"));
    }

    #[test]
    fn test_new_keeps_model_and_base_url() {
        let client = CerebrasClient::new(ResolvedConfig {
            api_key: Some(SecretString::from("abc")),
            model: "qwen-3-32b".to_string(),
            base_url: "http://localhost:8080/v1/".to_string(),
        })
        .unwrap();
        assert_eq!(client.model(), "qwen-3-32b");
        assert_eq!(client.base_url(), "http://localhost:8080/v1");
    }

    #[test]
    fn test_api_error_keeps_body() {
        let err = api_error(
            reqwest::StatusCode::UNAUTHORIZED,
            Ok("{\"message\":\"Wrong API Key\"}".to_string()),
        );
        match err {
            ClientError::Api { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "{\"message\":\"Wrong API Key\"}");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[test]
    fn test_unreadable_error_body_is_http_error() {
        let read_failure = reqwest::Client::new()
            .get("not a url")
            .build()
            .unwrap_err();
        let err = api_error(reqwest::StatusCode::INTERNAL_SERVER_ERROR, Err(read_failure));
        assert!(matches!(err, ClientError::Http(_)));
    }

    #[test]
    fn test_explicit_key_override() {
        let client = CerebrasClient::from_env(Some("explicit".to_string()), Some("m".to_string()))
            .unwrap();
        assert_eq!(client.transport.api_key.expose_secret(), "explicit");
        assert_eq!(client.model(), "m");
    }
}
