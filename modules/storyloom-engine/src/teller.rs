//! Story generation: category routing plus the three model calls
//! (generate, improve, modify).

use std::sync::Arc;

use ai_client::{AiError, CompletionModel, CompletionRequest};
use storyloom_common::{CategoryConfig, OpenAiSettings};
use tracing::debug;

use crate::prompts::PromptRegistry;

/// Strategy used when no category keyword matches the request.
pub const DEFAULT_STRATEGY: &str = "warm, comforting universal story";

pub struct StoryTeller {
    model: Arc<dyn CompletionModel>,
    prompts: PromptRegistry,
    settings: OpenAiSettings,
    categories: Vec<CategoryConfig>,
}

impl StoryTeller {
    pub fn new(
        model: Arc<dyn CompletionModel>,
        prompts: PromptRegistry,
        settings: OpenAiSettings,
        categories: Vec<CategoryConfig>,
    ) -> Self {
        Self {
            model,
            prompts,
            settings,
            categories,
        }
    }

    /// Match the request against the configured categories.
    /// First category with any keyword present wins, config order.
    pub fn categorize(&self, request: &str) -> Option<&CategoryConfig> {
        let lowered = request.to_lowercase();
        self.categories.iter().find(|category| {
            category
                .keywords
                .iter()
                .any(|keyword| lowered.contains(keyword.as_str()))
        })
    }

    /// Generate a fresh story for the request in the given strategy.
    pub async fn generate(&self, request: &str, strategy: &str) -> Result<String, AiError> {
        debug!(strategy, "Generating story");
        let prompt = self.prompts.story_prompt(request, strategy);
        let request = CompletionRequest::new(prompt)
            .max_tokens(self.settings.max_tokens)
            .temperature(self.settings.temperature);
        let story = self.model.complete(&request).await?;
        Ok(story.trim().to_string())
    }

    /// Revise a story against the policy directives. With no
    /// directives there is nothing to ask for, the story is returned
    /// unchanged without a model call.
    pub async fn improve(&self, story: &str, directives: &[String]) -> Result<String, AiError> {
        if directives.is_empty() {
            return Ok(story.to_string());
        }
        debug!(directives = directives.len(), "Improving story");
        let prompt = self.prompts.improve_prompt(story, &directives.join("; "));
        // Revisions run cooler than generation to stay close to the draft.
        let request = CompletionRequest::new(prompt)
            .max_tokens(self.settings.max_tokens)
            .temperature((self.settings.temperature - 0.2).max(0.0));
        self.model.complete(&request).await
    }

    /// Rework a story according to reader feedback, holding on to the
    /// category strategy when one applied.
    pub async fn modify(
        &self,
        story: &str,
        feedback: &str,
        strategy: Option<&str>,
    ) -> Result<String, AiError> {
        let context = match strategy {
            Some(strategy) => format!("while maintaining the {strategy}"),
            None => "while maintaining the story's essence".to_string(),
        };
        debug!(feedback, "Modifying story");
        let prompt = self.prompts.modify_prompt(story, feedback, &context);
        let request = CompletionRequest::new(prompt)
            .max_tokens(self.settings.max_tokens)
            .temperature(self.settings.temperature);
        self.model.complete(&request).await
    }
}
