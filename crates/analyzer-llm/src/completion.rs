//! Chat completion request and response types

use crate::Message;
use serde::{Deserialize, Serialize};

const DEFAULT_MAX_TOKENS: usize = 256;

/// One chat completion call
///
/// A system prompt, when present, is the first message.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    /// Model identifier, e.g. `gpt-4o-mini`
    pub model: String,

    pub messages: Vec<Message>,

    /// Upper bound on generated tokens
    pub max_tokens: usize,

    /// Sampling temperature, provider default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    pub fn builder(model: impl Into<String>) -> CompletionRequestBuilder {
        CompletionRequestBuilder::new(model)
    }
}

/// What the model wrote and why it stopped
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub message: Message,
    pub finish_reason: FinishReason,
    pub usage: TokenUsage,
}

impl CompletionResponse {
    /// Trimmed reply text, `None` when the model returned nothing
    pub fn text(&self) -> Option<&str> {
        self.message.text()
    }
}

/// Why generation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    #[default]
    Stop,
    /// The token budget ran out mid-reply
    Length,
    ContentFilter,
}

impl FinishReason {
    /// Map the `finish_reason` field of a chat completion choice
    pub fn from_wire(reason: &str) -> Self {
        match reason {
            "length" => Self::Length,
            "content_filter" => Self::ContentFilter,
            _ => Self::Stop,
        }
    }

    pub fn is_truncated(self) -> bool {
        self == Self::Length
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: usize,
    pub completion_tokens: usize,
}

impl TokenUsage {
    pub fn total(&self) -> usize {
        self.prompt_tokens + self.completion_tokens
    }
}

/// Builder for CompletionRequest
pub struct CompletionRequestBuilder {
    model: String,
    system: Option<String>,
    messages: Vec<Message>,
    max_tokens: usize,
    temperature: Option<f32>,
}

impl CompletionRequestBuilder {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system: None,
            messages: Vec::new(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: None,
        }
    }

    /// Set the system prompt, replacing any earlier one
    pub fn system(mut self, prompt: impl Into<String>) -> Self {
        self.system = Some(prompt.into());
        self
    }

    /// Append a user turn
    pub fn user(self, text: impl Into<String>) -> Self {
        self.add_message(Message::user(text))
    }

    pub fn add_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn build(self) -> CompletionRequest {
        let messages = self
            .system
            .map(Message::system)
            .into_iter()
            .chain(self.messages)
            .collect();

        CompletionRequest {
            model: self.model,
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}
