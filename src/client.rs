//! Core client traits and error types.

use async_trait::async_trait;
use nonempty::NonEmpty;
use thiserror::Error;

use crate::model::{conversation, Message};
use crate::options::{ModelOptions, CODE_TEMPERATURE};
use crate::prompts;
use crate::stream::FragmentStream;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Cerebras API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Unexpected response shape: {0}")]
    Protocol(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    pub fn is_config(&self) -> bool {
        matches!(self, ClientError::Config(_))
    }
}

/// Blocking chat completions.
///
/// Implementors provide [`Client::chat`]; the prompt-level helpers are built
/// on top of it.
///
/// # Example
/// ```rust,ignore
/// struct Echo;
///
/// #[async_trait]
/// impl Client for Echo {
///     async fn chat(
///         &self,
///         messages: NonEmpty<Message>,
///         _options: &ModelOptions,
///     ) -> Result<String, ClientError> {
///         Ok(messages.last().content.clone())
///     }
/// }
/// ```
#[async_trait]
pub trait Client: Send + Sync {
    /// Send a conversation and return the assistant's reply text.
    async fn chat(
        &self,
        messages: NonEmpty<Message>,
        options: &ModelOptions,
    ) -> Result<String, ClientError>;

    /// Single prompt with an optional system message.
    async fn complete(
        &self,
        prompt: &str,
        system: Option<&str>,
        options: &ModelOptions,
    ) -> Result<String, ClientError> {
        self.chat(conversation(prompt, system), options).await
    }

    /// Code generation with a coding-tuned system prompt.
    ///
    /// `context`, when present, is embedded as a fenced block ahead of the task.
    async fn code(
        &self,
        task: &str,
        context: Option<&str>,
        language: &str,
    ) -> Result<String, ClientError> {
        let system = prompts::code_system_prompt(language);
        let prompt = prompts::code_prompt(task, context);
        let options = ModelOptions::default().with_temperature(CODE_TEMPERATURE);
        self.complete(&prompt, Some(system.as_str()), &options).await
    }
}

/// Extension trait for streaming support.
#[async_trait]
pub trait StreamingClient: Client {
    /// Send a conversation with `stream: true` and return the text deltas as
    /// they arrive.
    async fn chat_stream(
        &self,
        messages: NonEmpty<Message>,
        options: &ModelOptions,
    ) -> Result<FragmentStream, ClientError>;

    /// Streaming counterpart of [`Client::complete`].
    async fn stream(
        &self,
        prompt: &str,
        system: Option<&str>,
        options: &ModelOptions,
    ) -> Result<FragmentStream, ClientError> {
        self.chat_stream(conversation(prompt, system), options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records what reached `chat` and answers with a fixed reply.
    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<(Vec<Message>, ModelOptions)>>,
    }

    #[async_trait]
    impl Client for Recorder {
        async fn chat(
            &self,
            messages: NonEmpty<Message>,
            options: &ModelOptions,
        ) -> Result<String, ClientError> {
            self.calls.lock().unwrap().push((messages.into(), *options));
            Ok("ok".to_string())
        }
    }

    #[tokio::test]
    async fn test_complete_passes_system_then_user() {
        let client = Recorder::default();
        let reply = client
            .complete("Hi", Some("Be terse"), &ModelOptions::default())
            .await
            .unwrap();
        assert_eq!(reply, "ok");

        let calls = client.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].0,
            vec![Message::system("Be terse"), Message::user("Hi")]
        );
        assert_eq!(calls[0].1, ModelOptions::default());
    }

    #[tokio::test]
    async fn test_complete_with_empty_system_sends_only_user() {
        let client = Recorder::default();
        client
            .complete("Hi", Some(""), &ModelOptions::default())
            .await
            .unwrap();

        let calls = client.calls.lock().unwrap();
        assert_eq!(calls[0].0, vec![Message::user("Hi")]);
    }

    #[tokio::test]
    async fn test_code_with_empty_context_sends_bare_task() {
        let client = Recorder::default();
        client.code("t", Some(""), "Python").await.unwrap();

        let calls = client.calls.lock().unwrap();
        assert_eq!(calls[0].0[1].content, "t");
    }

    #[tokio::test]
    async fn test_code_uses_language_and_low_temperature() {
        let client = Recorder::default();
        client.code("reverse a list", None, "Go").await.unwrap();

        let calls = client.calls.lock().unwrap();
        let (messages, options) = &calls[0];
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, crate::model::Role::System);
        assert!(messages[0].content.contains("Go"));
        assert_eq!(messages[1].content, "reverse a list");
        assert!(!messages[1].content.contains("Context:"));
        assert_eq!(options.temperature, 0.3);
        assert_eq!(options.max_tokens, 4096);
    }

    #[tokio::test]
    async fn test_code_embeds_context_block() {
        let client = Recorder::default();
        client
            .code("add a test", Some("fn main() {}"), "rust")
            .await
            .unwrap();

        let calls = client.calls.lock().unwrap();
        assert_eq!(
            calls[0].0[1].content,
            "Context:\n```\nfn main() {}\n```\n\nTask: add a test"
        );
    }

    #[test]
    fn test_api_error_message_carries_status_and_body() {
        let err = ClientError::Api {
            status: 401,
            body: "{\"message\":\"bad key\"}".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("401"));
        assert!(message.contains("bad key"));
        assert!(!err.is_config());
    }
}
