//! Evaluation value types shared between the engine and its callers.

use serde::{Deserialize, Serialize};

use crate::error::JudgeFailure;

/// Deterministic text measurements computed locally from the story text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Whitespace-separated word count.
    pub word_count: usize,
    /// Flesch-Kincaid grade level. Can be negative for very simple text.
    pub grade_level: f64,
    /// Distinct words as a percentage of total words, 0-100.
    pub vocabulary_richness: f64,
    /// Share of calming vocabulary present in the story, 0-100.
    pub predictability: f64,
    /// Content safety score, 0-100. Each flagged word costs a fixed penalty.
    pub safety: f64,
}

/// The six qualitative aspects scored by the judge model.
///
/// Scores are nominally 0-100 but are stored as parsed, so an
/// out-of-range judge response is visible to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmScores {
    pub age_appropriateness: f64,
    pub bedtime_suitability: f64,
    pub story_structure: f64,
    pub engagement: f64,
    pub originality: f64,
    pub educational_value: f64,
}

impl LlmScores {
    /// Unweighted mean of the six aspect scores.
    pub fn mean(&self) -> f64 {
        (self.age_appropriateness
            + self.bedtime_suitability
            + self.story_structure
            + self.engagement
            + self.originality
            + self.educational_value)
            / 6.0
    }

    /// Scores paired with their field names, in prompt order.
    pub fn named_scores(&self) -> [(&'static str, f64); 6] {
        [
            ("age_appropriateness", self.age_appropriateness),
            ("bedtime_suitability", self.bedtime_suitability),
            ("story_structure", self.story_structure),
            ("engagement", self.engagement),
            ("originality", self.originality),
            ("educational_value", self.educational_value),
        ]
    }
}

/// The four weighted components that feed the composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentBreakdown {
    pub predictability: f64,
    pub vocabulary: f64,
    pub age_level: f64,
    pub safety: f64,
}

/// Where a judgment's scores came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JudgmentSource {
    /// Parsed from a live judge response.
    Model,
    /// Configured defaults substituted after a judge failure.
    Fallback(JudgeFailure),
}

impl JudgmentSource {
    pub fn is_fallback(&self) -> bool {
        matches!(self, JudgmentSource::Fallback(_))
    }
}

/// Qualitative scores plus their provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Judgment {
    pub scores: LlmScores,
    pub source: JudgmentSource,
}

/// Complete evaluation of one story: judge scores, local metrics, and
/// the weighted composite derived from both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub llm_judge: LlmScores,
    /// Unweighted mean of the six judge scores.
    pub overall_score: f64,
    pub metrics: Metrics,
    /// Weighted blend of the component breakdown, 0-100.
    pub composite_score: f64,
    pub component_breakdown: ComponentBreakdown,
    pub judgment_source: JudgmentSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores() -> LlmScores {
        LlmScores {
            age_appropriateness: 90.0,
            bedtime_suitability: 84.0,
            story_structure: 78.0,
            engagement: 72.0,
            originality: 66.0,
            educational_value: 60.0,
        }
    }

    #[test]
    fn mean_averages_all_six_aspects() {
        assert!((scores().mean() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn named_scores_follow_prompt_order() {
        let named = scores().named_scores();
        assert_eq!(named[0].0, "age_appropriateness");
        assert_eq!(named[1].0, "bedtime_suitability");
        assert_eq!(named[5].0, "educational_value");
        assert_eq!(named[3].1, 72.0);
    }

    #[test]
    fn fallback_source_is_detectable() {
        let model = JudgmentSource::Model;
        let fallback = JudgmentSource::Fallback(JudgeFailure::WrongCount(5));
        assert!(!model.is_fallback());
        assert!(fallback.is_fallback());
    }
}
