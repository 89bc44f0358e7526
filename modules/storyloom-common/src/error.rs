//! Typed errors shared across the storyloom crates.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a judge response was discarded in favor of the default scores.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum JudgeFailure {
    /// The completion call itself failed.
    #[error("completion call failed: {0}")]
    Call(String),

    /// The response parsed, but did not contain exactly six scores.
    #[error("expected 6 comma-separated scores, got {0}")]
    WrongCount(usize),

    /// A token in the response was not a number.
    #[error("score is not a number: {0:?}")]
    NonNumeric(String),
}
