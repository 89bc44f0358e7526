// Test support for the story pipeline.
//
// MockModel scripts completion responses in call order and records
// every request it receives, so tests can assert on prompts and
// sampling parameters without a live endpoint.
//
// Plus canned constructors for the config sections the pipeline needs.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use ai_client::{AiError, CompletionModel, CompletionRequest};
use storyloom_common::{
    AgeLevelScoring, CategoryConfig, CompositeWeights, DisplaySettings, EvaluationConfig,
    FileConfig, LlmScores, OpenAiSettings, PromptsConfig, QualityThresholds, SafetyFilters,
    StorySettings, VocabularySettings,
};

use crate::prompts::PromptRegistry;

// ---------------------------------------------------------------------------
// MockModel
// ---------------------------------------------------------------------------

/// Scripted completion model. Replies are consumed in the order they
/// were queued; an unscripted call returns an API error.
pub struct MockModel {
    replies: Mutex<VecDeque<Result<String, String>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockModel {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful completion.
    pub fn reply(self, text: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(text.to_string()));
        self
    }

    /// Queue a failed completion.
    pub fn fail(self, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
        self
    }

    /// Every request received so far, in call order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionModel for MockModel {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AiError> {
        self.requests.lock().unwrap().push(request.clone());
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(AiError::Api(message)),
            None => Err(AiError::Api("MockModel: no reply scripted".to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Canned config sections
// ---------------------------------------------------------------------------

pub fn test_openai_settings() -> OpenAiSettings {
    OpenAiSettings {
        model: "gpt-4o-mini".to_string(),
        max_tokens: 800,
        temperature: 0.7,
        judge_max_tokens: 50,
        judge_temperature: 0.3,
    }
}

/// All six judge defaults set to 75.
pub fn test_default_scores() -> LlmScores {
    LlmScores {
        age_appropriateness: 75.0,
        bedtime_suitability: 75.0,
        story_structure: 75.0,
        engagement: 75.0,
        originality: 75.0,
        educational_value: 75.0,
    }
}

pub fn test_evaluation_config() -> EvaluationConfig {
    EvaluationConfig {
        weights: CompositeWeights {
            predictability: 0.3,
            vocabulary: 0.2,
            age_level: 0.3,
            safety: 0.2,
        },
        thresholds: QualityThresholds {
            min_composite_score: 70.0,
            min_safety_score: 70.0,
            min_word_count: 150,
            max_word_count: 400,
            min_reading_level: 1.0,
            max_reading_level: 5.0,
        },
        vocabulary: VocabularySettings {
            richness_multiplier: 1.5,
            max_vocabulary_score: 100.0,
        },
        age_level: AgeLevelScoring {
            target_grade: 3.0,
            penalty_per_grade_diff: 10.0,
            min_age_score: 20.0,
            max_age_score: 100.0,
        },
        default_llm_scores: test_default_scores(),
    }
}

pub fn test_story_settings() -> StorySettings {
    StorySettings {
        min_word_count: 100,
        max_word_count: 500,
        min_grade_level: 0.0,
        max_grade_level: 6.0,
    }
}

pub fn test_filters() -> SafetyFilters {
    SafetyFilters {
        calming_words: [
            "sleep", "dream", "soft", "gentle", "quiet", "peaceful", "cozy", "warm", "star",
            "moon",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
        unsafe_words: ["monster", "scary", "dark", "afraid", "nightmare"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        safety_penalty_per_word: 20.0,
    }
}

pub fn test_categories() -> Vec<CategoryConfig> {
    vec![
        CategoryConfig {
            name: "animals".to_string(),
            keywords: ["animal", "cat", "dog", "bunny", "bird"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            strategy: "gentle animal adventure with friendship".to_string(),
        },
        CategoryConfig {
            name: "magic".to_string(),
            keywords: ["magic", "wizard", "fairy", "spell"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            strategy: "whimsical magical tale with gentle wonder".to_string(),
        },
    ]
}

/// Registry with minimal inline templates, all runtime vars present.
pub fn test_registry() -> PromptRegistry {
    PromptRegistry::from_templates(
        "Write a {{strategy}} about: {{request}}",
        "Improve ({{directives}}):\n{{story}}",
        "Modify per {{feedback}} {{context}}:\n{{story}}",
    )
}

/// Full config assembled from the canned sections.
pub fn test_config() -> FileConfig {
    FileConfig {
        openai: test_openai_settings(),
        evaluation: test_evaluation_config(),
        story: test_story_settings(),
        filters: test_filters(),
        categories: test_categories(),
        prompts: PromptsConfig {
            story: "prompts/story.txt".into(),
            improve: "prompts/improve.txt".into(),
            modify: "prompts/modify.txt".into(),
        },
        display: DisplaySettings {
            show_detailed_metrics: true,
        },
    }
}
