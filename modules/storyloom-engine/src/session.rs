//! Session orchestration: one request in, one evaluated story out,
//! with the automatic improvement pass in between.

use ai_client::AiError;
use storyloom_common::{
    CategoryConfig, Evaluation, EvaluationConfig, FileConfig, SafetyFilters, StorySettings,
};
use tracing::{debug, info};

use crate::judge::QualitativeJudge;
use crate::teller::{StoryTeller, DEFAULT_STRATEGY};
use crate::{metrics, policy, scorer};

/// Result of one generate-evaluate-refine cycle.
#[derive(Debug, Clone)]
pub struct StoryCycle {
    pub story: String,
    pub category: Option<CategoryConfig>,
    pub evaluation: Evaluation,
    /// Whether the automatic improvement pass rewrote the story.
    pub improved: bool,
}

impl StoryCycle {
    pub fn category_label(&self) -> &str {
        self.category
            .as_ref()
            .map(|category| category.name.as_str())
            .unwrap_or("general")
    }
}

pub struct StorySession {
    teller: StoryTeller,
    judge: QualitativeJudge,
    filters: SafetyFilters,
    evaluation: EvaluationConfig,
    story_settings: StorySettings,
}

impl StorySession {
    pub fn new(teller: StoryTeller, judge: QualitativeJudge, config: &FileConfig) -> Self {
        Self {
            teller,
            judge,
            filters: config.filters.clone(),
            evaluation: config.evaluation.clone(),
            story_settings: config.story.clone(),
        }
    }

    /// Evaluate one story. The deterministic metrics and the judge
    /// call are independent, so they run concurrently.
    pub async fn evaluate(&self, story: &str) -> Evaluation {
        let (metrics, judgment) = tokio::join!(
            async { metrics::analyze(story, &self.filters) },
            self.judge.judge(story),
        );
        scorer::evaluate(metrics, judgment, &self.evaluation)
    }

    /// Generate a story for the request, evaluate it, and run one
    /// improvement pass if the evaluation falls short and the policy
    /// has something actionable to ask for.
    pub async fn run_cycle(&self, request: &str) -> Result<StoryCycle, AiError> {
        let category = self.teller.categorize(request).cloned();
        match &category {
            Some(category) => info!(category = %category.name, "Request matched a story category"),
            None => debug!("Request matched no category, using the default strategy"),
        }
        let strategy = category
            .as_ref()
            .map(|category| category.strategy.as_str())
            .unwrap_or(DEFAULT_STRATEGY);

        let mut story = self.teller.generate(request, strategy).await?;
        let mut evaluation = self.evaluate(&story).await;
        let mut improved = false;

        if policy::needs_improvement(&evaluation, &self.evaluation.thresholds, &self.story_settings)
        {
            let directives =
                policy::improvement_directives(&evaluation, &self.evaluation.thresholds);
            if directives.is_empty() {
                debug!(
                    composite = evaluation.composite_score,
                    "Story below thresholds but no directive applies, keeping as generated"
                );
            } else {
                info!(
                    directives = directives.len(),
                    composite = evaluation.composite_score,
                    "Story below thresholds, running improvement pass"
                );
                story = self.teller.improve(&story, &directives).await?;
                evaluation = self.evaluate(&story).await;
                improved = true;
            }
        }

        Ok(StoryCycle {
            story,
            category,
            evaluation,
            improved,
        })
    }

    /// Rework a story per reader feedback and re-evaluate the result.
    pub async fn revise(
        &self,
        story: &str,
        feedback: &str,
        category: Option<&CategoryConfig>,
    ) -> Result<(String, Evaluation), AiError> {
        let strategy = category.map(|category| category.strategy.as_str());
        let modified = self.teller.modify(story, feedback, strategy).await?;
        let evaluation = self.evaluate(&modified).await;
        Ok((modified, evaluation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyloom_common::{ComponentBreakdown, JudgmentSource, LlmScores, Metrics};

    fn cycle(category: Option<CategoryConfig>) -> StoryCycle {
        let scores = LlmScores {
            age_appropriateness: 75.0,
            bedtime_suitability: 75.0,
            story_structure: 75.0,
            engagement: 75.0,
            originality: 75.0,
            educational_value: 75.0,
        };
        StoryCycle {
            story: "Once upon a time.".to_string(),
            category,
            evaluation: Evaluation {
                overall_score: scores.mean(),
                llm_judge: scores,
                metrics: Metrics {
                    word_count: 4,
                    grade_level: 1.0,
                    vocabulary_richness: 100.0,
                    predictability: 0.0,
                    safety: 100.0,
                },
                composite_score: 80.0,
                component_breakdown: ComponentBreakdown {
                    predictability: 0.0,
                    vocabulary: 100.0,
                    age_level: 100.0,
                    safety: 100.0,
                },
                judgment_source: JudgmentSource::Model,
            },
            improved: false,
        }
    }

    #[test]
    fn uncategorized_cycle_labels_as_general() {
        assert_eq!(cycle(None).category_label(), "general");
    }

    #[test]
    fn categorized_cycle_labels_with_the_category_name() {
        let category = CategoryConfig {
            name: "animals".to_string(),
            keywords: vec!["cat".to_string()],
            strategy: "gentle animal adventure".to_string(),
        };
        assert_eq!(cycle(Some(category)).category_label(), "animals");
    }
}
