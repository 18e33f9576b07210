//! Text comparison primitives shared by the scorer and pronunciation checks.
//!
//! Everything here works on normalized text:
//! - Unicode NFC composition (so `o` + combining acute equals `ó`)
//! - Lowercase
//! - Only letters, digits, `_` and whitespace are kept
//! - Whitespace runs collapse to one space, ends trimmed

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

// ============================================================================
// Normalization
// ============================================================================

/// Normalize a response or expected answer for comparison
pub fn normalize_text(input: &str) -> String {
  input
    .nfc()
    .flat_map(char::to_lowercase)
    .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
    .collect::<String>()
    .split_whitespace()
    .collect::<Vec<_>>()
    .join(" ")
}

/// Case, punctuation and spacing insensitive equality
pub fn texts_match(a: &str, b: &str) -> bool {
  normalize_text(a) == normalize_text(b)
}

// ============================================================================
// Edit distance
// ============================================================================

/// Levenshtein distance between two strings, counted in chars.
///
/// Symmetric: `levenshtein_distance(a, b) == levenshtein_distance(b, a)`.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
  let a_chars: Vec<char> = a.chars().collect();
  let b_chars: Vec<char> = b.chars().collect();

  if a_chars.is_empty() {
    return b_chars.len();
  }
  if b_chars.is_empty() {
    return a_chars.len();
  }

  // Two rolling rows of the DP table
  let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
  let mut current = vec![0usize; b_chars.len() + 1];

  for (i, a_char) in a_chars.iter().enumerate() {
    current[0] = i + 1;
    for (j, b_char) in b_chars.iter().enumerate() {
      let substitution = previous[j] + usize::from(a_char != b_char);
      current[j + 1] = (previous[j + 1] + 1).min(current[j] + 1).min(substitution);
    }
    std::mem::swap(&mut previous, &mut current);
  }

  previous[b_chars.len()]
}

/// Similarity in [0, 1]: `1 - distance / max(len)` over already normalized text.
/// Two empty strings are identical.
pub fn raw_similarity(a: &str, b: &str) -> f64 {
  let max_len = a.chars().count().max(b.chars().count());
  if max_len == 0 {
    return 1.0;
  }
  let distance = levenshtein_distance(a, b);
  (1.0 - distance as f64 / max_len as f64).clamp(0.0, 1.0)
}

/// Similarity of two texts after normalization
pub fn similarity(a: &str, b: &str) -> f64 {
  raw_similarity(&normalize_text(a), &normalize_text(b))
}

// ============================================================================
// Pronunciation
// ============================================================================

/// Per-word pronunciation score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordScore {
  pub word: String,
  pub score: f64,
}

/// Pronunciation score as produced by a speech recognizer or the basic
/// evaluator below. `overall` is in [0, 1].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PronunciationScore {
  pub overall: f64,
  #[serde(default)]
  pub word_scores: Vec<WordScore>,
}

impl PronunciationScore {
  pub fn new(overall: f64) -> Self {
    Self {
      overall,
      word_scores: Vec::new(),
    }
  }
}

/// Compare a transcript against the expected text.
///
/// Words are compared by position; an expected word with no spoken
/// counterpart scores 0.
pub fn evaluate_pronunciation(spoken_text: &str, expected_text: &str) -> PronunciationScore {
  let spoken = normalize_text(spoken_text);
  let expected = normalize_text(expected_text);

  let spoken_words: Vec<&str> = spoken.split_whitespace().collect();
  let word_scores = expected
    .split_whitespace()
    .enumerate()
    .map(|(i, word)| WordScore {
      word: word.to_string(),
      score: spoken_words
        .get(i)
        .map_or(0.0, |spoken_word| raw_similarity(spoken_word, word)),
    })
    .collect();

  PronunciationScore {
    overall: raw_similarity(&spoken, &expected),
    word_scores,
  }
}
