//! Improvement policy: decides when a freshly generated story gets an
//! automatic revision pass and what that revision should fix.

use storyloom_common::{Evaluation, QualityThresholds, StorySettings};

/// Whether a story falls short of the acceptance bands.
///
/// The acceptance bands in `StorySettings` are wider than the scoring
/// bands, so a story can score full marks for reading level yet still
/// trip the acceptance check on length.
pub fn needs_improvement(
    evaluation: &Evaluation,
    thresholds: &QualityThresholds,
    story: &StorySettings,
) -> bool {
    let metrics = &evaluation.metrics;
    evaluation.composite_score < thresholds.min_composite_score
        || metrics.word_count < story.min_word_count
        || metrics.word_count > story.max_word_count
        || metrics.grade_level > story.max_grade_level
        || metrics.grade_level < story.min_grade_level
}

/// Concrete directives for the improvement prompt, one per detected
/// shortfall. Can be empty even when `needs_improvement` is true; in
/// that case there is nothing actionable to tell the model and the
/// story is kept as generated.
pub fn improvement_directives(
    evaluation: &Evaluation,
    thresholds: &QualityThresholds,
) -> Vec<String> {
    let mut directives = Vec::new();

    if evaluation.metrics.word_count < thresholds.min_word_count {
        directives.push(format!(
            "expand to {}-{} words with more details",
            thresholds.min_word_count, thresholds.max_word_count
        ));
    }
    if evaluation.metrics.grade_level > thresholds.max_reading_level {
        directives.push(format!(
            "use simpler vocabulary for Grade {}-{}",
            thresholds.min_reading_level, thresholds.max_reading_level
        ));
    }
    if evaluation.llm_judge.bedtime_suitability < thresholds.min_safety_score {
        directives.push("make more calming and bedtime suitable".to_string());
    }

    directives
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{test_evaluation_config, test_story_settings};
    use storyloom_common::{ComponentBreakdown, JudgmentSource, LlmScores, Metrics};

    fn evaluation(word_count: usize, grade_level: f64, composite: f64) -> Evaluation {
        let scores = LlmScores {
            age_appropriateness: 85.0,
            bedtime_suitability: 85.0,
            story_structure: 85.0,
            engagement: 85.0,
            originality: 85.0,
            educational_value: 85.0,
        };
        Evaluation {
            overall_score: scores.mean(),
            llm_judge: scores,
            metrics: Metrics {
                word_count,
                grade_level,
                vocabulary_richness: 60.0,
                predictability: 70.0,
                safety: 100.0,
            },
            composite_score: composite,
            component_breakdown: ComponentBreakdown {
                predictability: 70.0,
                vocabulary: 90.0,
                age_level: 100.0,
                safety: 100.0,
            },
            judgment_source: JudgmentSource::Model,
        }
    }

    // --- needs_improvement tests ---

    #[test]
    fn passing_story_needs_nothing() {
        let config = test_evaluation_config();
        let eval = evaluation(250, 3.0, 85.0);
        assert!(!needs_improvement(&eval, &config.thresholds, &test_story_settings()));
        assert!(improvement_directives(&eval, &config.thresholds).is_empty());
    }

    #[test]
    fn low_composite_triggers_improvement() {
        let config = test_evaluation_config();
        let eval = evaluation(250, 3.0, 55.0);
        assert!(needs_improvement(&eval, &config.thresholds, &test_story_settings()));
    }

    #[test]
    fn short_story_triggers_improvement_despite_high_composite() {
        let config = test_evaluation_config();
        let eval = evaluation(40, 3.0, 95.0);
        assert!(needs_improvement(&eval, &config.thresholds, &test_story_settings()));
    }

    #[test]
    fn overlong_story_triggers_improvement() {
        let config = test_evaluation_config();
        let eval = evaluation(900, 3.0, 95.0);
        assert!(needs_improvement(&eval, &config.thresholds, &test_story_settings()));
    }

    #[test]
    fn grade_outside_acceptance_band_triggers_improvement() {
        let config = test_evaluation_config();
        let settings = test_story_settings();
        assert!(needs_improvement(&evaluation(250, 8.0, 95.0), &config.thresholds, &settings));
        assert!(needs_improvement(&evaluation(250, -1.0, 95.0), &config.thresholds, &settings));
    }

    // --- improvement_directives tests ---

    #[test]
    fn short_story_gets_expand_directive() {
        let config = test_evaluation_config();
        let directives = improvement_directives(&evaluation(40, 3.0, 95.0), &config.thresholds);
        assert_eq!(directives, vec!["expand to 150-400 words with more details"]);
    }

    #[test]
    fn high_grade_gets_vocabulary_directive() {
        let config = test_evaluation_config();
        let directives = improvement_directives(&evaluation(250, 8.0, 95.0), &config.thresholds);
        assert_eq!(directives, vec!["use simpler vocabulary for Grade 1-5"]);
    }

    #[test]
    fn low_bedtime_suitability_gets_calming_directive() {
        let config = test_evaluation_config();
        let mut eval = evaluation(250, 3.0, 95.0);
        eval.llm_judge.bedtime_suitability = 40.0;
        let directives = improvement_directives(&eval, &config.thresholds);
        assert_eq!(directives, vec!["make more calming and bedtime suitable"]);
    }

    #[test]
    fn directives_stack_in_check_order() {
        let config = test_evaluation_config();
        let mut eval = evaluation(40, 8.0, 30.0);
        eval.llm_judge.bedtime_suitability = 40.0;
        let directives = improvement_directives(&eval, &config.thresholds);
        assert_eq!(directives.len(), 3);
        assert!(directives[0].starts_with("expand"));
        assert!(directives[1].starts_with("use simpler"));
        assert!(directives[2].starts_with("make more calming"));
    }

    #[test]
    fn overlong_story_has_no_matching_directive() {
        // The acceptance band flags it, but no directive covers
        // shortening, so the directive list stays empty.
        let config = test_evaluation_config();
        let eval = evaluation(900, 3.0, 95.0);
        assert!(needs_improvement(&eval, &config.thresholds, &test_story_settings()));
        assert!(improvement_directives(&eval, &config.thresholds).is_empty());
    }
}
