//! Judge fallback tests.
//!
//! The judge must never abort an evaluation: call failures and
//! malformed responses substitute the configured default scores and
//! record why on the judgment.
//!
//! Run with: cargo test -p storyloom-engine --test judge_fallback_test

use std::sync::Arc;

use storyloom_common::{JudgeFailure, JudgmentSource};
use storyloom_engine::testing::{test_default_scores, test_openai_settings, MockModel};
use storyloom_engine::QualitativeJudge;

fn judge(model: Arc<MockModel>) -> QualitativeJudge {
    QualitativeJudge::new(model, test_openai_settings(), test_default_scores())
}

// ---------------------------------------------------------------------------
// Call failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failed_call_substitutes_the_defaults() {
    let model = Arc::new(MockModel::new().fail("rate limit exceeded"));
    let judgment = judge(model).judge("Once upon a time.").await;

    assert_eq!(judgment.scores, test_default_scores());
    match judgment.source {
        JudgmentSource::Fallback(JudgeFailure::Call(message)) => {
            assert!(message.contains("rate limit exceeded"), "got {message:?}");
        }
        other => panic!("expected call fallback, got {other:?}"),
    }
}

#[tokio::test]
async fn failures_do_not_poison_later_calls() {
    let model = Arc::new(
        MockModel::new()
            .fail("rate limit exceeded")
            .reply("85, 90, 80, 88, 75, 82"),
    );
    let judge = judge(model);

    let first = judge.judge("Once upon a time.").await;
    let second = judge.judge("Once upon a time.").await;

    assert!(first.source.is_fallback());
    assert_eq!(second.source, JudgmentSource::Model);
    assert_eq!(second.scores.age_appropriateness, 85.0);
}

// ---------------------------------------------------------------------------
// Malformed responses
// ---------------------------------------------------------------------------

#[tokio::test]
async fn five_scores_fall_back_with_the_count() {
    let model = Arc::new(MockModel::new().reply("85, 90, 80, 88, 75"));
    let judgment = judge(model).judge("Once upon a time.").await;

    assert_eq!(judgment.scores, test_default_scores());
    assert_eq!(
        judgment.source,
        JudgmentSource::Fallback(JudgeFailure::WrongCount(5))
    );
}

#[tokio::test]
async fn seven_scores_fall_back_with_the_count() {
    let model = Arc::new(MockModel::new().reply("85, 90, 80, 88, 75, 82, 99"));
    let judgment = judge(model).judge("Once upon a time.").await;

    assert_eq!(
        judgment.source,
        JudgmentSource::Fallback(JudgeFailure::WrongCount(7))
    );
}

#[tokio::test]
async fn prose_response_falls_back_with_the_token() {
    let model = Arc::new(MockModel::new().reply("85, ninety, 80, 88, 75, 82"));
    let judgment = judge(model).judge("Once upon a time.").await;

    assert_eq!(judgment.scores, test_default_scores());
    assert_eq!(
        judgment.source,
        JudgmentSource::Fallback(JudgeFailure::NonNumeric("ninety".to_string()))
    );
}

// ---------------------------------------------------------------------------
// Parsed responses
// ---------------------------------------------------------------------------

#[tokio::test]
async fn out_of_range_scores_pass_through_unclamped() {
    let model = Arc::new(MockModel::new().reply("120, -5, 80, 88, 75, 82"));
    let judgment = judge(model).judge("Once upon a time.").await;

    assert_eq!(judgment.source, JudgmentSource::Model);
    assert_eq!(judgment.scores.age_appropriateness, 120.0);
    assert_eq!(judgment.scores.bedtime_suitability, -5.0);
}

#[tokio::test]
async fn judge_sends_the_story_with_judge_sampling() {
    let model = Arc::new(MockModel::new().reply("85, 90, 80, 88, 75, 82"));
    let judge = judge(model.clone());

    judge.judge("A fox curled up under the ferns.").await;

    let requests = model.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].prompt.contains("A fox curled up under the ferns."));
    assert!(requests[0].prompt.contains("Respond with only numbers"));
    assert_eq!(requests[0].max_tokens, 50);
    assert!((requests[0].temperature - 0.3).abs() < 1e-6);
}
