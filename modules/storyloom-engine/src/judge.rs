//! LLM judge for qualitative story aspects.
//!
//! The judge rates six aspects the deterministic metrics cannot see
//! (engagement, originality, and so on). A failed or malformed judge
//! call never aborts an evaluation: configured default scores are
//! substituted and the substitution is recorded on the judgment.

use std::sync::Arc;

use ai_client::{CompletionModel, CompletionRequest};
use storyloom_common::{JudgeFailure, Judgment, JudgmentSource, LlmScores, OpenAiSettings};
use tracing::{debug, warn};

fn format_judge_prompt(story: &str) -> String {
    format!(
        "Rate this bedtime story for children ages 5-10 (0-100 each):\n\n\
         Story: {story}\n\n\
         Rate these aspects:\n\
         1. Age Appropriateness\n\
         2. Bedtime Suitability\n\
         3. Story Structure\n\
         4. Engagement\n\
         5. Originality\n\
         6. Educational Value\n\n\
         Respond with only numbers separated by commas in this order."
    )
}

pub struct QualitativeJudge {
    model: Arc<dyn CompletionModel>,
    settings: OpenAiSettings,
    defaults: LlmScores,
}

impl QualitativeJudge {
    pub fn new(model: Arc<dyn CompletionModel>, settings: OpenAiSettings, defaults: LlmScores) -> Self {
        Self {
            model,
            settings,
            defaults,
        }
    }

    /// Rate one story. Always returns a judgment; failures fall back
    /// to the configured default scores with the cause attached.
    pub async fn judge(&self, story: &str) -> Judgment {
        let request = CompletionRequest::new(format_judge_prompt(story))
            .max_tokens(self.settings.judge_max_tokens)
            .temperature(self.settings.judge_temperature);

        let response = match self.model.complete(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Judge call failed, using default scores");
                return Judgment {
                    scores: self.defaults.clone(),
                    source: JudgmentSource::Fallback(JudgeFailure::Call(e.to_string())),
                };
            }
        };

        match parse_scores(&response) {
            Ok(scores) => {
                debug!(overall = scores.mean(), "Judge scores parsed");
                Judgment {
                    scores,
                    source: JudgmentSource::Model,
                }
            }
            Err(failure) => {
                warn!(%failure, "Judge response unusable, using default scores");
                Judgment {
                    scores: self.defaults.clone(),
                    source: JudgmentSource::Fallback(failure),
                }
            }
        }
    }
}

/// Parse a judge response of six comma-separated numbers, in prompt
/// order. Values are kept as parsed, out-of-range scores included.
fn parse_scores(response: &str) -> Result<LlmScores, JudgeFailure> {
    let mut values = Vec::new();
    for token in response.split(',') {
        let token = token.trim();
        let value: f64 = token
            .parse()
            .map_err(|_| JudgeFailure::NonNumeric(token.to_string()))?;
        values.push(value);
    }
    if values.len() != 6 {
        return Err(JudgeFailure::WrongCount(values.len()));
    }
    Ok(LlmScores {
        age_appropriateness: values[0],
        bedtime_suitability: values[1],
        story_structure: values[2],
        engagement: values[3],
        originality: values[4],
        educational_value: values[5],
    })
}
