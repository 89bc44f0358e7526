//! TOML file configuration.
//!
//! All tunable behavior lives in one file loaded at startup. Prompt
//! templates referenced here may interpolate any of these values with
//! `{{config.section.key}}` placeholders.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::warn;

use crate::quality::LlmScores;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub openai: OpenAiSettings,
    pub evaluation: EvaluationConfig,
    pub story: StorySettings,
    pub filters: SafetyFilters,
    pub categories: Vec<CategoryConfig>,
    pub prompts: PromptsConfig,
    pub display: DisplaySettings,
}

/// Model name and sampling parameters for the two call sites.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiSettings {
    pub model: String,
    /// Token budget for story generation and revision calls.
    pub max_tokens: u32,
    pub temperature: f32,
    /// Token budget for the judge call. Small, the reply is six numbers.
    pub judge_max_tokens: u32,
    pub judge_temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationConfig {
    pub weights: CompositeWeights,
    pub thresholds: QualityThresholds,
    pub vocabulary: VocabularySettings,
    pub age_level: AgeLevelScoring,
    /// Substituted when the judge call fails or returns garbage.
    pub default_llm_scores: LlmScores,
}

/// Relative weight of each component in the composite score.
///
/// Expected to sum to 1.0; a differing sum rescales the composite.
#[derive(Debug, Clone, Deserialize)]
pub struct CompositeWeights {
    pub predictability: f64,
    pub vocabulary: f64,
    pub age_level: f64,
    pub safety: f64,
}

/// Quality gates used by scoring and by the improvement policy.
#[derive(Debug, Clone, Deserialize)]
pub struct QualityThresholds {
    pub min_composite_score: f64,
    pub min_safety_score: f64,
    pub min_word_count: usize,
    pub max_word_count: usize,
    pub min_reading_level: f64,
    pub max_reading_level: f64,
}

/// Acceptance band checked after evaluation. Wider than the scoring
/// band in `QualityThresholds` so borderline stories still pass.
#[derive(Debug, Clone, Deserialize)]
pub struct StorySettings {
    pub min_word_count: usize,
    pub max_word_count: usize,
    pub min_grade_level: f64,
    pub max_grade_level: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VocabularySettings {
    /// Richness percentage is scaled by this before capping.
    pub richness_multiplier: f64,
    pub max_vocabulary_score: f64,
}

/// Distance-from-target scoring for the reading level component.
#[derive(Debug, Clone, Deserialize)]
pub struct AgeLevelScoring {
    pub target_grade: f64,
    pub penalty_per_grade_diff: f64,
    pub min_age_score: f64,
    pub max_age_score: f64,
}

/// Word lists driving the predictability and safety metrics.
#[derive(Debug, Clone, Deserialize)]
pub struct SafetyFilters {
    pub calming_words: Vec<String>,
    pub unsafe_words: Vec<String>,
    pub safety_penalty_per_word: f64,
}

/// One story category: request keywords and the narrative strategy
/// applied when a request matches. Order matters, first match wins.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    pub keywords: Vec<String>,
    pub strategy: String,
}

/// Prompt template paths, relative to the config file's directory.
#[derive(Debug, Clone, Deserialize)]
pub struct PromptsConfig {
    pub story: PathBuf,
    pub improve: PathBuf,
    pub modify: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplaySettings {
    pub show_detailed_metrics: bool,
}

impl FileConfig {
    fn validate(&self) -> Result<()> {
        if self.story.min_word_count > self.story.max_word_count {
            bail!(
                "story.min_word_count ({}) exceeds story.max_word_count ({})",
                self.story.min_word_count,
                self.story.max_word_count
            );
        }
        if self.story.min_grade_level > self.story.max_grade_level {
            bail!(
                "story.min_grade_level ({}) exceeds story.max_grade_level ({})",
                self.story.min_grade_level,
                self.story.max_grade_level
            );
        }
        let thresholds = &self.evaluation.thresholds;
        if thresholds.min_word_count > thresholds.max_word_count {
            bail!(
                "thresholds.min_word_count ({}) exceeds thresholds.max_word_count ({})",
                thresholds.min_word_count,
                thresholds.max_word_count
            );
        }
        if thresholds.min_reading_level > thresholds.max_reading_level {
            bail!(
                "thresholds.min_reading_level ({}) exceeds thresholds.max_reading_level ({})",
                thresholds.min_reading_level,
                thresholds.max_reading_level
            );
        }
        if self.categories.is_empty() {
            bail!("at least one [[categories]] entry is required");
        }
        for category in &self.categories {
            if category.keywords.is_empty() {
                bail!("category {:?} has no keywords", category.name);
            }
        }

        let weights = &self.evaluation.weights;
        let sum = weights.predictability + weights.vocabulary + weights.age_level + weights.safety;
        if (sum - 1.0).abs() > 0.01 {
            warn!(
                sum,
                "composite weights do not sum to 1.0, composite scores will be rescaled"
            );
        }
        Ok(())
    }
}

/// Load and validate the TOML configuration file.
pub fn load_config(path: &Path) -> Result<FileConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: FileConfig = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Load the same file as a raw TOML tree, for `{{config.*}}` template
/// resolution.
pub fn load_toml_value(path: &Path) -> Result<toml::Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    raw.parse::<toml::Value>()
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_CONFIG: &str = r#"
        [openai]
        model = "gpt-4o-mini"
        max_tokens = 800
        temperature = 0.7
        judge_max_tokens = 50
        judge_temperature = 0.3

        [evaluation.weights]
        predictability = 0.3
        vocabulary = 0.2
        age_level = 0.3
        safety = 0.2

        [evaluation.thresholds]
        min_composite_score = 70.0
        min_safety_score = 70.0
        min_word_count = 150
        max_word_count = 400
        min_reading_level = 1.0
        max_reading_level = 5.0

        [evaluation.vocabulary]
        richness_multiplier = 1.5
        max_vocabulary_score = 100.0

        [evaluation.age_level]
        target_grade = 3.0
        penalty_per_grade_diff = 10.0
        min_age_score = 20.0
        max_age_score = 100.0

        [evaluation.default_llm_scores]
        age_appropriateness = 75.0
        bedtime_suitability = 75.0
        story_structure = 75.0
        engagement = 75.0
        originality = 75.0
        educational_value = 75.0

        [story]
        min_word_count = 100
        max_word_count = 500
        min_grade_level = 0.0
        max_grade_level = 6.0

        [filters]
        calming_words = ["sleep", "dream"]
        unsafe_words = ["monster"]
        safety_penalty_per_word = 20.0

        [[categories]]
        name = "animals"
        keywords = ["cat", "dog"]
        strategy = "gentle animal adventure"

        [prompts]
        story = "prompts/story.txt"
        improve = "prompts/improve.txt"
        modify = "prompts/modify.txt"

        [display]
        show_detailed_metrics = true
    "#;

    #[test]
    fn full_config_parses_and_validates() {
        let config: FileConfig = toml::from_str(FULL_CONFIG).unwrap();
        config.validate().unwrap();
        assert_eq!(config.openai.model, "gpt-4o-mini");
        assert_eq!(config.evaluation.thresholds.min_word_count, 150);
        assert_eq!(config.categories[0].name, "animals");
        assert_eq!(config.evaluation.default_llm_scores.engagement, 75.0);
    }

    #[test]
    fn unknown_top_level_key_is_rejected() {
        let raw = format!("{FULL_CONFIG}\n[surprise]\nkey = 1\n");
        assert!(toml::from_str::<FileConfig>(&raw).is_err());
    }

    #[test]
    fn inverted_word_band_fails_validation() {
        // The [story] band; the thresholds band uses different values.
        let raw = FULL_CONFIG.replace("min_word_count = 100", "min_word_count = 600");
        let config: FileConfig = toml::from_str(&raw).unwrap();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("min_word_count"), "unexpected error: {err}");
    }

    #[test]
    fn category_without_keywords_fails_validation() {
        let raw = FULL_CONFIG.replace(r#"keywords = ["cat", "dog"]"#, "keywords = []");
        let config: FileConfig = toml::from_str(&raw).unwrap();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("keywords"), "unexpected error: {err}");
    }

    #[test]
    fn empty_categories_fail_validation() {
        let start = FULL_CONFIG.find("[[categories]]").unwrap();
        let end = FULL_CONFIG.find("[prompts]").unwrap();
        // A bare top-level key must precede any table header in TOML.
        let raw = format!(
            "categories = []\n{}{}",
            &FULL_CONFIG[..start],
            &FULL_CONFIG[end..]
        );
        let config: FileConfig = toml::from_str(&raw).unwrap();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("categories"), "unexpected error: {err}");
    }
}
