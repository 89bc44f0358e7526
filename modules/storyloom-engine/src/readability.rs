//! Flesch-Kincaid grade level estimation.
//!
//! Heuristic syllable counting keeps this dependency-free and fast; it
//! is accurate enough to steer stories toward a target reading band,
//! not to grade arbitrary prose.

/// Flesch-Kincaid grade level of the text.
///
/// Returns 0.0 for empty input. Very simple text can land below zero,
/// which is kept as-is so comparisons against a grade band stay honest.
pub fn flesch_kincaid_grade(text: &str) -> f64 {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }

    let sentences = count_sentences(text).max(1) as f64;
    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();

    let word_count = words.len() as f64;
    0.39 * (word_count / sentences) + 11.8 * (syllables as f64 / word_count) - 15.59
}

/// Counts sentence-ending punctuation runs, so "..." ends one sentence.
fn count_sentences(text: &str) -> usize {
    let mut count = 0;
    let mut prev_was_terminator = false;
    for ch in text.chars() {
        let is_terminator = matches!(ch, '.' | '!' | '?');
        if is_terminator && !prev_was_terminator {
            count += 1;
        }
        prev_was_terminator = is_terminator;
    }
    count
}

/// Vowel-group syllable estimate with a silent-e adjustment.
fn count_syllables(word: &str) -> usize {
    let letters: String = word
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect::<String>()
        .to_lowercase();
    if letters.is_empty() {
        return 1;
    }

    let mut count = 0;
    let mut prev_was_vowel = false;
    for ch in letters.chars() {
        let is_vowel = matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if is_vowel && !prev_was_vowel {
            count += 1;
        }
        prev_was_vowel = is_vowel;
    }

    // Silent trailing e ("cake"), unless it anchors an -le syllable ("table").
    if letters.ends_with('e') && !letters.ends_with("le") && count > 1 {
        count -= 1;
    }

    count.max(1)
}
