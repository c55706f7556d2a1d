//! services/api/src/adapters/completion_llm.rs
//!
//! This module contains the adapter for the letter-writing LLM.
//! It implements the `CompletionService` port from the `core` crate against any
//! OpenAI-compatible chat-completions endpoint (Groq by default).

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use complaint_intake_core::ports::{CompletionService, PortError, PortResult};
use std::time::Duration;
use tracing::debug;

const TEMPERATURE: f32 = 0.7;
const MAX_COMPLETION_TOKENS: u32 = 2048;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `CompletionService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiCompletionAdapter {
    client: Client<OpenAIConfig>,
    model: String,
    timeout: Duration,
}

impl OpenAiCompletionAdapter {
    /// Creates a new `OpenAiCompletionAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String, timeout: Duration) -> Self {
        Self {
            client,
            model,
            timeout,
        }
    }

    /// Builds a client for `api_base` (e.g. `https://api.groq.com/openai/v1`).
    pub fn client_for(api_key: &str, api_base: &str) -> Client<OpenAIConfig> {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);
        Client::with_config(config)
    }
}

//=========================================================================================
// `CompletionService` Trait Implementation
//=========================================================================================

#[async_trait]
impl CompletionService for OpenAiCompletionAdapter {
    /// Sends the prompt as a single user message and returns the first choice's text.
    async fn complete(&self, prompt: &str) -> PortResult<String> {
        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![ChatCompletionRequestMessage::User(message)])
            .temperature(TEMPERATURE)
            .max_completion_tokens(MAX_COMPLETION_TOKENS)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        debug!(model = %self.model, prompt_len = prompt.len(), "Requesting complaint letter");

        // Bound the whole exchange, including the client's own retries.
        let response = tokio::time::timeout(self.timeout, self.client.chat().create(request))
            .await
            .map_err(|_| PortError::Timeout)?
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        let choice = response.choices.into_iter().next().ok_or_else(|| {
            PortError::Unexpected("Letter LLM returned no choices in its response.".to_string())
        })?;

        choice.message.content.ok_or_else(|| {
            PortError::Unexpected("Letter LLM response contained no text content.".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn adapter(api_base: &str, timeout: Duration) -> OpenAiCompletionAdapter {
        OpenAiCompletionAdapter::new(
            OpenAiCompletionAdapter::client_for("gsk_test", api_base),
            "llama-3.3-70b-versatile".to_string(),
            timeout,
        )
    }

    #[test]
    fn adapter_is_object_safe() {
        let service: Arc<dyn CompletionService> =
            Arc::new(adapter("https://api.groq.com/openai/v1", Duration::from_secs(5)));
        drop(service);
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_an_error() {
        let service = adapter("http://127.0.0.1:9/v1", Duration::from_secs(3));
        assert!(service.complete("CATEGORY: test").await.is_err());
    }
}
