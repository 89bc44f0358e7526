mod client;
pub(crate) mod types;

use async_trait::async_trait;

use crate::error::AiError;
use crate::traits::{CompletionModel, CompletionRequest};
use client::OpenAiClient;
use types::{uses_max_completion_tokens, ChatRequest, WireMessage};

/// OpenAI-backed completion agent.
///
/// Also works against OpenAI-compatible endpoints via [`OpenAi::with_base_url`].
#[derive(Clone)]
pub struct OpenAi {
    api_key: String,
    model: String,
    base_url: Option<String>,
}

impl OpenAi {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: None,
        }
    }

    /// Reads the API key from `OPENAI_API_KEY`.
    pub fn from_env(model: impl Into<String>) -> Result<Self, AiError> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            AiError::Config("OPENAI_API_KEY environment variable not set".to_string())
        })?;
        Ok(Self::new(api_key, model))
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn client(&self) -> OpenAiClient {
        let client = OpenAiClient::new(&self.api_key);
        match &self.base_url {
            Some(url) => client.with_base_url(url),
            None => client,
        }
    }
}

#[async_trait]
impl CompletionModel for OpenAi {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AiError> {
        let mut chat_request =
            ChatRequest::new(&self.model).message(WireMessage::user(&request.prompt));

        // Reasoning models reject the classic parameter names.
        if uses_max_completion_tokens(&self.model) {
            chat_request = chat_request.max_completion_tokens(request.max_tokens);
        } else {
            chat_request = chat_request
                .max_tokens(request.max_tokens)
                .temperature(request.temperature);
        }

        let response = self.client().chat(&chat_request).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AiError::Api("no completion choices in response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_stores_model_and_key() {
        let agent = OpenAi::new("sk-test", "gpt-4o-mini");
        assert_eq!(agent.model(), "gpt-4o-mini");
        assert_eq!(agent.api_key, "sk-test");
        assert!(agent.base_url.is_none());
    }

    #[test]
    fn with_base_url_overrides_endpoint() {
        let agent = OpenAi::new("sk-test", "gpt-4o-mini").with_base_url("http://localhost:8080/v1");
        assert_eq!(agent.base_url.as_deref(), Some("http://localhost:8080/v1"));
    }
}
