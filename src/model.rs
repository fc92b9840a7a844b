//! Chat Completions wire types.

use nonempty::NonEmpty;
use serde::{Deserialize, Serialize};

use crate::options::ModelOptions;

/// Model used when neither the environment nor the config file names one.
pub const DEFAULT_MODEL: &str = "zai-glm-4.7";

/// Models served by Cerebras Cloud that this client knows about.
pub const KNOWN_MODELS: &[&str] = &[
    "zai-glm-4.7",
    "llama-3.3-70b",
    "llama3.1-8b",
    "qwen-3-32b",
    "gpt-oss-120b",
];

/// Role of the message sender.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Build the conversation for a single prompt: the optional system message
/// first, then the user prompt. An empty system string counts as absent.
pub fn conversation(prompt: &str, system: Option<&str>) -> NonEmpty<Message> {
    match system.filter(|system| !system.is_empty()) {
        Some(system) => NonEmpty::from((Message::system(system), vec![Message::user(prompt)])),
        None => NonEmpty::new(Message::user(prompt)),
    }
}

/// Body of `POST /chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: NonEmpty<Message>,
    pub max_tokens: u32,
    pub temperature: f32,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub stream: bool,
}

impl ChatRequest {
    pub fn new(
        model: impl Into<String>,
        messages: NonEmpty<Message>,
        options: &ModelOptions,
        stream: bool,
    ) -> Self {
        Self {
            model: model.into(),
            messages,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            stream,
        }
    }
}

// --- Response Types ---

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseMessage {
    pub content: Option<String>,
}

impl ChatResponse {
    /// `choices[0].message.content`, if the server sent it.
    pub fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
    }
}

// --- Stream Types ---

#[derive(Debug, Deserialize)]
pub(crate) struct StreamFrame {
    #[serde(default)]
    pub choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StreamChoice {
    pub delta: Option<Delta>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Delta {
    pub content: Option<String>,
}

impl StreamFrame {
    /// `choices[0].delta.content`, if this frame carries text.
    pub fn into_delta(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.delta)
            .and_then(|delta| delta.content)
    }
}
