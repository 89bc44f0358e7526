//! Composite scoring: pure functions turning metrics and a judgment
//! into one weighted quality score.
//!
//! Kept free of I/O so the scoring rules can be tested exactly and
//! shared by the session loop and any batch callers.

use storyloom_common::{
    AgeLevelScoring, ComponentBreakdown, CompositeWeights, Evaluation, EvaluationConfig, Judgment,
    Metrics, QualityThresholds, VocabularySettings,
};

/// Score the reading level against the target band.
///
/// Inside the band (inclusive on both ends) earns the full score.
/// Outside, the score drops by a fixed penalty per grade of distance
/// from the target, floored at the configured minimum.
pub fn age_level_score(
    grade_level: f64,
    thresholds: &QualityThresholds,
    scoring: &AgeLevelScoring,
) -> f64 {
    if grade_level >= thresholds.min_reading_level && grade_level <= thresholds.max_reading_level {
        return scoring.max_age_score;
    }
    let distance = (grade_level - scoring.target_grade).abs();
    (scoring.max_age_score - distance * scoring.penalty_per_grade_diff).max(scoring.min_age_score)
}

/// Scale vocabulary richness into a score, capped at the configured max.
pub fn vocabulary_score(richness: f64, vocab: &VocabularySettings) -> f64 {
    (richness * vocab.richness_multiplier).min(vocab.max_vocabulary_score)
}

/// Weighted blend of the four components.
///
/// Weights are applied as configured, not renormalized, so a weight
/// set summing to less than 1.0 caps the reachable composite.
pub fn composite_score(breakdown: &ComponentBreakdown, weights: &CompositeWeights) -> f64 {
    breakdown.predictability * weights.predictability
        + breakdown.vocabulary * weights.vocabulary
        + breakdown.age_level * weights.age_level
        + breakdown.safety * weights.safety
}

/// Assemble the full evaluation from metrics and a judgment.
pub fn evaluate(metrics: Metrics, judgment: Judgment, config: &EvaluationConfig) -> Evaluation {
    let breakdown = ComponentBreakdown {
        predictability: metrics.predictability,
        vocabulary: vocabulary_score(metrics.vocabulary_richness, &config.vocabulary),
        age_level: age_level_score(metrics.grade_level, &config.thresholds, &config.age_level),
        safety: metrics.safety,
    };
    let composite = composite_score(&breakdown, &config.weights);
    let Judgment { scores, source } = judgment;

    Evaluation {
        overall_score: scores.mean(),
        llm_judge: scores,
        metrics,
        composite_score: composite,
        component_breakdown: breakdown,
        judgment_source: source,
    }
}
