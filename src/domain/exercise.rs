//! Concrete exercise instances produced by the session builder.
//!
//! Exercises are created fresh per session and discarded afterwards. Each
//! kind is its own variant so the scorer and any renderer must handle every
//! kind explicitly.

use serde::{Deserialize, Serialize};

use crate::scoring::ScoringKind;

/// Exercise kinds, in the order the session builder cycles through them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
  Vocabulary,
  Listening,
  WordBuilder,
  FillBlank,
  Matching,
  TranslatePhrase,
}

impl ExerciseType {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Vocabulary => "vocabulary",
      Self::Listening => "listening",
      Self::WordBuilder => "word_builder",
      Self::FillBlank => "fill_blank",
      Self::Matching => "matching",
      Self::TranslatePhrase => "translate_phrase",
    }
  }

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "vocabulary" => Some(Self::Vocabulary),
      "listening" => Some(Self::Listening),
      "word_builder" => Some(Self::WordBuilder),
      "fill_blank" => Some(Self::FillBlank),
      "matching" => Some(Self::Matching),
      "translate_phrase" => Some(Self::TranslatePhrase),
      _ => None,
    }
  }
}

/// Which language the learner is shown and which one they answer in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationDirection {
  EnToEs,
  EsToEn,
}

/// Fields shared by every exercise built from a single content item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
  pub content_id: String,
  /// English headword of the source item (what the learner is learning)
  pub word: String,
  pub emoji: String,
  /// English text shown or spoken for this exercise
  pub english: String,
  pub spanish: String,
  pub hint: Option<String>,
  pub question_es: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultipleChoice {
  #[serde(flatten)]
  pub prompt: Prompt,
  pub direction: TranslationDirection,
  pub options: Vec<String>,
  pub correct_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordBuilder {
  #[serde(flatten)]
  pub prompt: Prompt,
  /// Shuffled letter tiles: the answer's letters plus distractor letters
  pub letters: Vec<char>,
  /// Uppercase target word
  pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillBlank {
  #[serde(flatten)]
  pub prompt: Prompt,
  /// Sentence with the target replaced by `___`
  pub sentence: String,
  pub options: Vec<String>,
  pub correct_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPair {
  pub en: String,
  pub es: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matching {
  pub emoji: String,
  /// Fixed labels; matching has no single source item
  pub english: String,
  pub spanish: String,
  pub pairs: Vec<MatchPair>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslatePhrase {
  #[serde(flatten)]
  pub prompt: Prompt,
  /// Answer words and distractors, shuffled
  pub tiles: Vec<String>,
  /// Answer words in order
  pub answer: Vec<String>,
  pub distractors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Exercise {
  Vocabulary(MultipleChoice),
  Listening(MultipleChoice),
  WordBuilder(WordBuilder),
  FillBlank(FillBlank),
  Matching(Matching),
  TranslatePhrase(TranslatePhrase),
}

impl Exercise {
  pub fn exercise_type(&self) -> ExerciseType {
    match self {
      Self::Vocabulary(_) => ExerciseType::Vocabulary,
      Self::Listening(_) => ExerciseType::Listening,
      Self::WordBuilder(_) => ExerciseType::WordBuilder,
      Self::FillBlank(_) => ExerciseType::FillBlank,
      Self::Matching(_) => ExerciseType::Matching,
      Self::TranslatePhrase(_) => ExerciseType::TranslatePhrase,
    }
  }

  /// How a response to this exercise is graded
  pub fn scoring_kind(&self) -> ScoringKind {
    match self {
      Self::Vocabulary(_) | Self::Listening(_) | Self::FillBlank(_) | Self::Matching(_) => {
        ScoringKind::SpyMission
      }
      // Letter and word ordering get partial credit for near misses
      Self::WordBuilder(_) | Self::TranslatePhrase(_) => ScoringKind::WordBuilder,
    }
  }

  /// Canonical response string the scorer compares against.
  ///
  /// Matching responses are `en=es` pairs joined by `; ` in exercise order.
  pub fn expected_response(&self) -> String {
    match self {
      Self::Vocabulary(mc) | Self::Listening(mc) => {
        mc.options.get(mc.correct_index).cloned().unwrap_or_default()
      }
      Self::FillBlank(fb) => fb.options.get(fb.correct_index).cloned().unwrap_or_default(),
      Self::WordBuilder(wb) => wb.answer.clone(),
      Self::Matching(m) => format_match_pairs(&m.pairs),
      Self::TranslatePhrase(tp) => tp.answer.join(" "),
    }
  }

  pub fn prompt(&self) -> Option<&Prompt> {
    match self {
      Self::Vocabulary(mc) | Self::Listening(mc) => Some(&mc.prompt),
      Self::WordBuilder(wb) => Some(&wb.prompt),
      Self::FillBlank(fb) => Some(&fb.prompt),
      Self::TranslatePhrase(tp) => Some(&tp.prompt),
      Self::Matching(_) => None,
    }
  }

  /// Options for multiple-choice style exercises
  pub fn options(&self) -> Option<(&[String], usize)> {
    match self {
      Self::Vocabulary(mc) | Self::Listening(mc) => Some((&mc.options, mc.correct_index)),
      Self::FillBlank(fb) => Some((&fb.options, fb.correct_index)),
      _ => None,
    }
  }
}

pub fn format_match_pairs(pairs: &[MatchPair]) -> String {
  pairs
    .iter()
    .map(|p| format!("{}={}", p.en, p.es))
    .collect::<Vec<_>>()
    .join("; ")
}

#[cfg(test)]
mod tests {
  use super::*;

  fn prompt(word: &str) -> Prompt {
    Prompt {
      content_id: "g-001".to_string(),
      word: word.to_string(),
      emoji: "🐉".to_string(),
      english: word.to_string(),
      spanish: "dragón".to_string(),
      hint: None,
      question_es: "¿Qué significa?".to_string(),
    }
  }

  #[test]
  fn test_expected_response_multiple_choice() {
    let ex = Exercise::Vocabulary(MultipleChoice {
      prompt: prompt("dragon"),
      direction: TranslationDirection::EnToEs,
      options: vec!["espada".into(), "dragón".into(), "héroe".into(), "nivel".into()],
      correct_index: 1,
    });
    assert_eq!(ex.expected_response(), "dragón");
    assert_eq!(ex.exercise_type(), ExerciseType::Vocabulary);
    assert_eq!(ex.scoring_kind(), ScoringKind::SpyMission);
  }

  #[test]
  fn test_expected_response_matching() {
    let ex = Exercise::Matching(Matching {
      emoji: "🎯".to_string(),
      english: "matching".to_string(),
      spanish: "emparejar".to_string(),
      pairs: vec![
        MatchPair { en: "sword".into(), es: "espada".into() },
        MatchPair { en: "hero".into(), es: "héroe".into() },
      ],
    });
    assert_eq!(ex.expected_response(), "sword=espada; hero=héroe");
    assert!(ex.prompt().is_none());
    assert!(ex.options().is_none());
  }

  #[test]
  fn test_expected_response_translate_phrase() {
    let ex = Exercise::TranslatePhrase(TranslatePhrase {
      prompt: prompt("game over"),
      tiles: vec!["over".into(), "the".into(), "Game".into()],
      answer: vec!["Game".into(), "over".into()],
      distractors: vec!["the".into()],
    });
    assert_eq!(ex.expected_response(), "Game over");
    assert_eq!(ex.scoring_kind(), ScoringKind::WordBuilder);
  }

  #[test]
  fn test_serialized_tag() {
    let ex = Exercise::WordBuilder(WordBuilder {
      prompt: prompt("dragon"),
      letters: vec!['D', 'R', 'A', 'G', 'O', 'N', 'X', 'Q'],
      answer: "DRAGON".to_string(),
    });
    let json = serde_json::to_value(&ex).unwrap();
    assert_eq!(json["type"], "word_builder");
    assert_eq!(json["answer"], "DRAGON");
    assert_eq!(json["word"], "dragon");
  }

  #[test]
  fn test_exercise_type_strings() {
    for ty in [
      ExerciseType::Vocabulary,
      ExerciseType::Listening,
      ExerciseType::WordBuilder,
      ExerciseType::FillBlank,
      ExerciseType::Matching,
      ExerciseType::TranslatePhrase,
    ] {
      assert_eq!(ExerciseType::from_str(ty.as_str()), Some(ty));
    }
  }
}
