//! Deterministic text metrics.
//!
//! Everything here is computed locally from the story text and the
//! configured word lists. No model calls, same input always yields the
//! same `Metrics`.

use std::collections::HashSet;

use storyloom_common::{Metrics, SafetyFilters};

use crate::readability;

/// Compute all deterministic metrics for one story.
pub fn analyze(story: &str, filters: &SafetyFilters) -> Metrics {
    let words: Vec<&str> = story.split_whitespace().collect();
    let word_count = words.len();

    let vocabulary_richness = if word_count == 0 {
        0.0
    } else {
        let distinct: HashSet<String> = words.iter().map(|w| w.to_lowercase()).collect();
        distinct.len() as f64 / word_count as f64 * 100.0
    };

    Metrics {
        word_count,
        grade_level: readability::flesch_kincaid_grade(story),
        vocabulary_richness,
        predictability: predictability(story, &filters.calming_words),
        safety: safety(story, &filters.unsafe_words, filters.safety_penalty_per_word),
    }
}

/// Share of the calming word list present in the story, 0-100.
///
/// Substring match on the lowercased story, so "moonlight" counts for
/// "moon". Capped at 100 even if the list somehow over-counts.
pub fn predictability(story: &str, calming_words: &[String]) -> f64 {
    if calming_words.is_empty() {
        return 0.0;
    }
    let lowered = story.to_lowercase();
    let found = calming_words
        .iter()
        .filter(|word| lowered.contains(word.as_str()))
        .count();
    (found as f64 / calming_words.len() as f64 * 100.0).min(100.0)
}

/// Content safety score: 100 minus a fixed penalty per flagged word
/// present, floored at 0.
pub fn safety(story: &str, unsafe_words: &[String], penalty_per_word: f64) -> f64 {
    let lowered = story.to_lowercase();
    let hits = unsafe_words
        .iter()
        .filter(|word| lowered.contains(word.as_str()))
        .count();
    (100.0 - hits as f64 * penalty_per_word).max(0.0)
}
