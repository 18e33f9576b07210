//! Session tallying and the aggregated outcome handed to the profile store.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::config::{
  ANSWER_XP, BONUS_PACK_PERCENTAGE, COMBO_BONUS_XP, COMBO_THRESHOLD, HINT_XP_PENALTY, MAX_HINTS_PER_SESSION,
  MIN_ANSWER_XP, SESSION_PACK_CARDS,
};
use crate::domain::{Exercise, Pack, PackSource, PackType};

/// XP for a correct answer given the combo length it brings the learner to
pub fn answer_xp(combo: u32, used_hint: bool) -> u32 {
  let mut xp = ANSWER_XP;
  if combo >= COMBO_THRESHOLD {
    xp += COMBO_BONUS_XP;
  }
  if used_hint {
    xp = xp.saturating_sub(HINT_XP_PENALTY).max(MIN_ANSWER_XP);
  }
  xp
}

/// Running score of a session in progress. Owned by the session runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTally {
  pub correct: u32,
  pub answered: u32,
  pub combo: u32,
  pub best_combo: u32,
  pub xp_earned: u32,
  pub hints_remaining: u32,
}

impl Default for SessionTally {
  fn default() -> Self {
    Self {
      correct: 0,
      answered: 0,
      combo: 0,
      best_combo: 0,
      xp_earned: 0,
      hints_remaining: MAX_HINTS_PER_SESSION,
    }
  }
}

impl SessionTally {
  pub fn new() -> Self {
    Self::default()
  }

  /// Spend one hint if any remain
  pub fn use_hint(&mut self) -> bool {
    if self.hints_remaining == 0 {
      return false;
    }
    self.hints_remaining -= 1;
    true
  }

  /// Record one answer; returns the XP it earned
  pub fn record_answer(&mut self, is_correct: bool, used_hint: bool) -> u32 {
    self.answered += 1;

    if !is_correct {
      self.combo = 0;
      return 0;
    }

    self.correct += 1;
    self.combo += 1;
    self.best_combo = self.best_combo.max(self.combo);

    let xp = answer_xp(self.combo, used_hint);
    self.xp_earned += xp;
    xp
  }

  /// Close the session and compute its rewards.
  pub fn finish<R: Rng + ?Sized>(&self, exercises: &[Exercise], now: DateTime<Utc>, rng: &mut R) -> SessionOutcome {
    let total = self.answered.max(exercises.len() as u32);
    let percentage = session_percentage(self.correct, total);

    let mut seen = HashSet::new();
    let words_learned: Vec<String> = exercises
      .iter()
      .filter_map(Exercise::prompt)
      .map(|prompt| prompt.word.clone())
      .filter(|word| seen.insert(word.clone()))
      .collect();

    let mut packs_earned = vec![new_pack(PackType::Basic, PackSource::SessionComplete, now, rng)];
    if percentage >= BONUS_PACK_PERCENTAGE {
      packs_earned.push(new_pack(PackType::Rare, PackSource::BonusScore, now, rng));
    }

    tracing::debug!(
      "Session finished: {}/{} correct, {} XP, {} packs",
      self.correct,
      total,
      self.xp_earned,
      packs_earned.len()
    );

    SessionOutcome {
      xp_earned: self.xp_earned,
      words_learned,
      session_complete: true,
      packs_earned,
      correct: self.correct,
      total,
      percentage,
      stars: stars_for(percentage),
      best_combo: self.best_combo,
    }
  }
}

/// What a finished session hands to the profile store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOutcome {
  pub xp_earned: u32,
  pub words_learned: Vec<String>,
  pub session_complete: bool,
  pub packs_earned: Vec<Pack>,
  pub correct: u32,
  pub total: u32,
  pub percentage: u32,
  pub stars: u8,
  pub best_combo: u32,
}

/// Rounded percent correct; 0 for an empty session
pub fn session_percentage(correct: u32, total: u32) -> u32 {
  if total == 0 {
    return 0;
  }
  (f64::from(correct) / f64::from(total) * 100.0).round() as u32
}

pub fn stars_for(percentage: u32) -> u8 {
  match percentage {
    p if p >= 90 => 3,
    p if p >= 70 => 2,
    p if p >= 40 => 1,
    _ => 0,
  }
}

fn new_pack<R: Rng + ?Sized>(pack_type: PackType, source: PackSource, now: DateTime<Utc>, rng: &mut R) -> Pack {
  Pack {
    id: format!("pack-{}-{:08x}", now.timestamp_millis(), rng.random::<u32>()),
    pack_type,
    card_count: SESSION_PACK_CARDS,
    earned_at: now,
    source,
  }
}
