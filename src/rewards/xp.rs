//! Experience points and rank progression.

use serde::{Deserialize, Serialize};

use crate::domain::Rank;

/// Events that award XP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XpEvent {
  ExerciseAttempt,
  ExerciseCorrect,
  ExercisePerfectPronunciation,
  #[serde(rename = "exercise_streak_3")]
  ExerciseStreak3,
  ExerciseFirstWord,
  SessionComplete,
  DailyLogin,
  QuestDaily,
  QuestWeekly,
  QuestSpecial,
  AlbumComplete,
}

impl XpEvent {
  pub fn base_amount(&self) -> u32 {
    match self {
      Self::ExerciseAttempt => 5,
      Self::ExerciseCorrect => 15,
      Self::ExercisePerfectPronunciation => 25,
      Self::ExerciseStreak3 => 10,
      Self::ExerciseFirstWord => 20,
      Self::SessionComplete => 50,
      Self::DailyLogin => 10,
      Self::QuestDaily => 50,
      Self::QuestWeekly => 150,
      Self::QuestSpecial => 300,
      Self::AlbumComplete => 100,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::ExerciseAttempt => "exercise_attempt",
      Self::ExerciseCorrect => "exercise_correct",
      Self::ExercisePerfectPronunciation => "exercise_perfect_pronunciation",
      Self::ExerciseStreak3 => "exercise_streak_3",
      Self::ExerciseFirstWord => "exercise_first_word",
      Self::SessionComplete => "session_complete",
      Self::DailyLogin => "daily_login",
      Self::QuestDaily => "quest_daily",
      Self::QuestWeekly => "quest_weekly",
      Self::QuestSpecial => "quest_special",
      Self::AlbumComplete => "album_complete",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpAward {
  pub amount: u64,
  pub new_total: u64,
  pub rank_up: bool,
  pub previous_rank: Rank,
  pub new_rank: Rank,
}

/// Highest rank whose threshold `xp_total` meets
pub fn calculate_rank(xp_total: u64) -> Rank {
  Rank::ALL
    .iter()
    .rev()
    .copied()
    .find(|rank| xp_total >= rank.threshold())
    .unwrap_or_default()
}

/// XP needed for the rank after `current`, `None` at the top
pub fn next_rank_threshold(current: Rank) -> Option<u64> {
  current.next().map(|rank| rank.threshold())
}

/// Award an event's XP scaled by `multiplier`, rounded.
///
/// Non-finite multipliers count as 1 and negative ones as 0.
pub fn award_xp(current_total: u64, event: XpEvent, multiplier: f64) -> XpAward {
  let amount = scaled_amount(event.base_amount(), multiplier);
  let new_total = current_total.saturating_add(amount);

  let previous_rank = calculate_rank(current_total);
  let new_rank = calculate_rank(new_total);

  XpAward {
    amount,
    new_total,
    rank_up: new_rank != previous_rank,
    previous_rank,
    new_rank,
  }
}

fn scaled_amount(base: u32, multiplier: f64) -> u64 {
  let multiplier = if multiplier.is_finite() { multiplier.max(0.0) } else { 1.0 };
  (f64::from(base) * multiplier).round() as u64
}

/// XP multiplier earned by a streak of `days`
pub fn streak_multiplier(days: u32) -> f64 {
  match days {
    0..=1 => 1.0,
    2..=7 => 1.1,
    8..=14 => 1.2,
    15..=30 => 1.3,
    _ => 1.5,
  }
}
