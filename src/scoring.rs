//! Exercise scoring.
//!
//! Grades one learner response and produces correctness, a 0-1 accuracy, an
//! SM-2 quality rating (0-5), base XP and bilingual feedback. Scoring never
//! fails: a missing pronunciation score counts as 0 and out-of-range numbers
//! are clamped.

use serde::{Deserialize, Serialize};

use crate::config::{
  MULTIPLE_CHOICE_FAST_MS, PRONUNCIATION_HINT_PENALTY, PRONUNCIATION_PASS_THRESHOLD, READING_FAST_MS,
  TYPING_CLOSE_THRESHOLD,
};
use crate::validation::{PronunciationScore, normalize_text, raw_similarity};

/// Grading policy for a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringKind {
  /// Repeat a sentence aloud (pronunciation graded)
  EchoChallenge,
  /// Tongue twister (pronunciation graded)
  TongueTwister,
  /// Multiple choice (exact match)
  SpyMission,
  /// Reading comprehension (exact match, more time allowed)
  SpeedReader,
  /// Typed answer with partial credit
  WordBuilder,
  /// Free conversation, judged externally
  BossChallenge,
}

impl ScoringKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::EchoChallenge => "echo_challenge",
      Self::TongueTwister => "tongue_twister",
      Self::SpyMission => "spy_mission",
      Self::SpeedReader => "speed_reader",
      Self::WordBuilder => "word_builder",
      Self::BossChallenge => "boss_challenge",
    }
  }

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "echo_challenge" => Some(Self::EchoChallenge),
      "tongue_twister" => Some(Self::TongueTwister),
      "spy_mission" => Some(Self::SpyMission),
      "speed_reader" => Some(Self::SpeedReader),
      "word_builder" => Some(Self::WordBuilder),
      "boss_challenge" => Some(Self::BossChallenge),
      _ => None,
    }
  }

  /// Parse a kind name, grading unknown kinds as typed answers
  pub fn from_str_lossy(s: &str) -> Self {
    Self::from_str(s).unwrap_or(Self::WordBuilder)
  }
}

/// Everything the scorer needs to grade one response
#[derive(Debug, Clone, Copy)]
pub struct ScoreInput<'a> {
  pub kind: ScoringKind,
  pub user_response: &'a str,
  pub expected_response: &'a str,
  pub time_taken_ms: u64,
  pub hints_used: u32,
  pub pronunciation: Option<&'a PronunciationScore>,
}

impl<'a> ScoreInput<'a> {
  pub fn new(kind: ScoringKind, user_response: &'a str, expected_response: &'a str) -> Self {
    Self {
      kind,
      user_response,
      expected_response,
      time_taken_ms: 0,
      hints_used: 0,
      pronunciation: None,
    }
  }

  pub fn time_taken_ms(mut self, ms: u64) -> Self {
    self.time_taken_ms = ms;
    self
  }

  pub fn hints_used(mut self, hints: u32) -> Self {
    self.hints_used = hints;
    self
  }

  pub fn pronunciation(mut self, score: &'a PronunciationScore) -> Self {
    self.pronunciation = Some(score);
    self
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
  pub message_en: String,
  pub message_es: String,
  pub encouragement: String,
}

impl Feedback {
  fn new(message_en: impl Into<String>, message_es: impl Into<String>, encouragement: impl Into<String>) -> Self {
    Self {
      message_en: message_en.into(),
      message_es: message_es.into(),
      encouragement: encouragement.into(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
  pub is_correct: bool,
  /// In [0, 1]
  pub accuracy: f64,
  /// SM-2 quality rating, 0-5
  pub quality: u8,
  pub xp_base: u32,
  pub feedback: Feedback,
}

/// Grade one response
pub fn score_exercise(input: &ScoreInput<'_>) -> ScoreResult {
  match input.kind {
    ScoringKind::EchoChallenge | ScoringKind::TongueTwister => score_pronunciation(input),
    ScoringKind::SpyMission => score_exact(input, MULTIPLE_CHOICE_FAST_MS, ExactStyle::MultipleChoice),
    ScoringKind::SpeedReader => score_exact(input, READING_FAST_MS, ExactStyle::Reading),
    ScoringKind::WordBuilder => score_typing(input),
    ScoringKind::BossChallenge => score_conversation(),
  }
}

/// Bucket a 0-1 pronunciation score into an SM-2 quality
pub fn pronunciation_quality(score: f64) -> u8 {
  match score {
    s if s >= 0.95 => 5,
    s if s >= 0.85 => 4,
    s if s >= 0.7 => 3,
    s if s >= 0.5 => 2,
    s if s >= 0.3 => 1,
    _ => 0,
  }
}

fn score_pronunciation(input: &ScoreInput<'_>) -> ScoreResult {
  let score = input
    .pronunciation
    .map(|p| p.overall)
    .filter(|s| s.is_finite())
    .unwrap_or(0.0)
    .clamp(0.0, 1.0);
  let is_correct = score >= PRONUNCIATION_PASS_THRESHOLD;

  let feedback = if score >= 0.9 {
    Feedback::new("Perfect pronunciation!", "¡Pronunciación perfecta!", "You sound amazing!")
  } else if score >= 0.7 {
    Feedback::new("Good pronunciation!", "¡Buena pronunciación!", "Almost perfect, keep going!")
  } else if score >= 0.5 {
    Feedback::new("Getting there!", "¡Vas por buen camino!", "Try listening again and repeat.")
  } else {
    Feedback::new(
      "Let's try again!",
      "¡Vamos a intentarlo de nuevo!",
      "Listen carefully and try once more.",
    )
  };

  let xp_base = match (is_correct, score) {
    (false, _) => 5,
    (true, s) if s >= 0.9 => 25,
    (true, s) if s >= 0.7 => 15,
    (true, _) => 10,
  };

  let hint_penalty = f64::from(input.hints_used) * PRONUNCIATION_HINT_PENALTY;

  ScoreResult {
    is_correct,
    accuracy: (score - hint_penalty).max(0.0),
    quality: pronunciation_quality(score),
    xp_base,
    feedback,
  }
}

#[derive(Clone, Copy)]
enum ExactStyle {
  MultipleChoice,
  Reading,
}

fn score_exact(input: &ScoreInput<'_>, fast_ms: u64, style: ExactStyle) -> ScoreResult {
  let is_correct = normalize_text(input.user_response) == normalize_text(input.expected_response);

  let quality = match (is_correct, input.time_taken_ms < fast_ms) {
    (true, true) => 5,
    (true, false) => 4,
    (false, _) => 1,
  };

  let feedback = match (is_correct, style) {
    (true, ExactStyle::MultipleChoice) => Feedback::new("Correct!", "¡Correcto!", "Great job!"),
    (true, ExactStyle::Reading) => Feedback::new("You got it!", "¡Lo tienes!", "Fast reader!"),
    (false, style) => Feedback::new(
      format!("The answer was: {}", input.expected_response),
      format!("La respuesta era: {}", input.expected_response),
      match style {
        ExactStyle::MultipleChoice => "Don't worry, you'll get it next time!",
        ExactStyle::Reading => "Try reading it one more time.",
      },
    ),
  };

  ScoreResult {
    is_correct,
    accuracy: if is_correct { 1.0 } else { 0.0 },
    quality,
    xp_base: if is_correct { 15 } else { 5 },
    feedback,
  }
}

fn score_typing(input: &ScoreInput<'_>) -> ScoreResult {
  let typed = normalize_text(input.user_response);
  let expected = normalize_text(input.expected_response);

  if typed == expected {
    let clean = input.hints_used == 0;
    return ScoreResult {
      is_correct: true,
      accuracy: 1.0,
      quality: if clean { 5 } else { 4 },
      xp_base: if clean { 15 } else { 10 },
      feedback: Feedback::new("Perfect!", "¡Perfecto!", "You spelled it right!"),
    };
  }

  let similarity = raw_similarity(&typed, &expected);
  let is_close = similarity >= TYPING_CLOSE_THRESHOLD;

  let feedback = if is_close {
    Feedback::new(
      format!("Close! The correct answer is: {}", input.expected_response),
      format!("¡Casi! La respuesta correcta es: {}", input.expected_response),
      "So close! Try again.",
    )
  } else {
    Feedback::new(
      format!("The answer is: {}", input.expected_response),
      format!("La respuesta es: {}", input.expected_response),
      "No worries, learning takes time!",
    )
  };

  ScoreResult {
    is_correct: false,
    accuracy: similarity,
    quality: if is_close { 2 } else { 0 },
    xp_base: 5,
    feedback,
  }
}

// TODO: replace with the external conversation judge's verdict once it reports a score
fn score_conversation() -> ScoreResult {
  ScoreResult {
    is_correct: true,
    accuracy: 0.8,
    quality: 4,
    xp_base: 20,
    feedback: Feedback::new(
      "Good conversation!",
      "¡Buena conversación!",
      "You're getting better at talking!",
    ),
  }
}
