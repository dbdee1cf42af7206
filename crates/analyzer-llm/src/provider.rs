//! LLM provider trait definition

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// Trait for LLM providers
///
/// Implementations of this trait provide access to different LLM services
/// (OpenAI, Azure OpenAI, local OpenAI-compatible servers).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Generate a completion from the LLM
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Get the provider name (e.g., "openai")
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FinishReason, LLMError, Message, TokenUsage};

    #[tokio::test]
    async fn test_mock_provider_round_trip() {
        let mut provider = MockLLMProvider::new();
        provider.expect_complete().times(1).returning(|req| {
            Ok(CompletionResponse {
                message: Message::assistant(format!("echo: {}", req.messages.len())),
                finish_reason: FinishReason::Stop,
                usage: TokenUsage {
                    prompt_tokens: 3,
                    completion_tokens: 2,
                },
            })
        });

        let request = CompletionRequest::builder("gpt-4o-mini")
            .user("hi")
            .build();
        let response = provider.complete(request).await.unwrap();
        assert_eq!(response.text(), Some("echo: 1"));
        assert_eq!(response.usage.total(), 5);
    }

    #[test]
    fn test_mock_provider_error() {
        let mut provider = MockLLMProvider::new();
        provider
            .expect_complete()
            .returning(|_| Err(LLMError::Unauthorized));

        let request = CompletionRequest::builder("gpt-4o-mini").build();
        let err = tokio_test::block_on(provider.complete(request)).unwrap_err();
        assert!(matches!(err, LLMError::Unauthorized));
    }
}
