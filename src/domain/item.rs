use serde::{Deserialize, Serialize};

/// Whether an item is a single word or a full phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
  Vocabulary,
  Phrase,
}

impl ContentKind {
  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "vocabulary" => Some(Self::Vocabulary),
      "phrase" => Some(Self::Phrase),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Vocabulary => "vocabulary",
      Self::Phrase => "phrase",
    }
  }
}

/// Difficulty band of a content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
  Beginner,
  Elementary,
  Intermediate,
  Upper,
  Advanced,
}

impl Level {
  pub const ALL: [Level; 5] = [
    Self::Beginner,
    Self::Elementary,
    Self::Intermediate,
    Self::Upper,
    Self::Advanced,
  ];

  pub fn from_str(s: &str) -> Option<Self> {
    match s.trim().to_lowercase().as_str() {
      "beginner" => Some(Self::Beginner),
      "elementary" => Some(Self::Elementary),
      "intermediate" => Some(Self::Intermediate),
      "upper" => Some(Self::Upper),
      "advanced" => Some(Self::Advanced),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Beginner => "beginner",
      Self::Elementary => "elementary",
      Self::Intermediate => "intermediate",
      Self::Upper => "upper",
      Self::Advanced => "advanced",
    }
  }
}

/// An atomic learning unit from the content bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
  pub id: String,
  pub english: String,
  pub spanish: String,
  #[serde(rename = "type")]
  pub kind: ContentKind,
  pub theme: String,
  pub level: Level,
  #[serde(default)]
  pub hint: Option<String>,
  /// Precomputed English distractors (used for ES → EN questions)
  #[serde(default)]
  pub distractors_en: Option<Vec<String>>,
  /// Precomputed Spanish distractors (used for EN → ES questions)
  #[serde(default)]
  pub distractors_es: Option<Vec<String>>,
  #[serde(default)]
  pub example_en: Option<String>,
  #[serde(default)]
  pub example_es: Option<String>,
}

impl ContentItem {
  pub fn new(
    id: impl Into<String>,
    english: impl Into<String>,
    spanish: impl Into<String>,
    kind: ContentKind,
    theme: impl Into<String>,
    level: Level,
  ) -> Self {
    Self {
      id: id.into(),
      english: english.into(),
      spanish: spanish.into(),
      kind,
      theme: theme.into(),
      level,
      hint: None,
      distractors_en: None,
      distractors_es: None,
      example_en: None,
      example_es: None,
    }
  }

  pub fn with_example(mut self, english: impl Into<String>, spanish: impl Into<String>) -> Self {
    self.example_en = Some(english.into());
    self.example_es = Some(spanish.into());
    self
  }

  pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
    self.hint = Some(hint.into());
    self
  }

  pub fn with_distractors(mut self, english: &[&str], spanish: &[&str]) -> Self {
    self.distractors_en = Some(english.iter().map(|s| s.to_string()).collect());
    self.distractors_es = Some(spanish.iter().map(|s| s.to_string()).collect());
    self
  }

  pub fn is_vocabulary(&self) -> bool {
    self.kind == ContentKind::Vocabulary
  }

  /// Example sentence pair, falling back to the item's own text
  pub fn example_pair(&self) -> (&str, &str) {
    match (&self.example_en, &self.example_es) {
      (Some(en), Some(es)) if !en.trim().is_empty() && !es.trim().is_empty() => {
        (en.as_str(), es.as_str())
      }
      _ => (self.english.as_str(), self.spanish.as_str()),
    }
  }

  /// Sentence pair used by listening and phrase-ordering exercises.
  /// Phrases use themselves; vocabulary uses its example sentence.
  pub fn sentence_pair(&self) -> (&str, &str) {
    match self.kind {
      ContentKind::Phrase => (self.english.as_str(), self.spanish.as_str()),
      ContentKind::Vocabulary => self.example_pair(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_level_round_trip_strings() {
    for level in Level::ALL {
      assert_eq!(Level::from_str(level.as_str()), Some(level));
    }
    assert_eq!(Level::from_str(" Beginner "), Some(Level::Beginner));
    assert_eq!(Level::from_str("expert"), None);
  }

  #[test]
  fn test_sentence_pair_for_phrase() {
    let item = ContentItem::new("p1", "Game over", "Fin del juego", ContentKind::Phrase, "gaming", Level::Beginner)
      .with_example("The game is over", "El juego ha terminado");
    assert_eq!(item.sentence_pair(), ("Game over", "Fin del juego"));
  }

  #[test]
  fn test_sentence_pair_for_vocabulary_uses_example() {
    let item = ContentItem::new("v1", "dragon", "dragón", ContentKind::Vocabulary, "gaming", Level::Beginner)
      .with_example("The dragon is red", "El dragón es rojo");
    assert_eq!(item.sentence_pair(), ("The dragon is red", "El dragón es rojo"));
  }

  #[test]
  fn test_example_pair_falls_back_to_item_text() {
    let item = ContentItem::new("v1", "sword", "espada", ContentKind::Vocabulary, "gaming", Level::Beginner);
    assert_eq!(item.example_pair(), ("sword", "espada"));
  }

  #[test]
  fn test_deserialize_minimal_item() {
    let json = r#"{
      "id": "g-001",
      "english": "dragon",
      "spanish": "dragón",
      "type": "vocabulary",
      "theme": "gaming",
      "level": "beginner"
    }"#;
    let item: ContentItem = serde_json::from_str(json).unwrap();
    assert_eq!(item.kind, ContentKind::Vocabulary);
    assert_eq!(item.level, Level::Beginner);
    assert!(item.hint.is_none());
    assert!(item.distractors_es.is_none());
  }
}
