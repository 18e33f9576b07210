//! Daily quests and their progress.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::session::SessionOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestType {
  Daily,
  Weekly,
}

/// What a quest counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestGoal {
  CompleteSessions,
  LearnWords,
  /// Tracks the best combo reached, not a running sum
  ReachCombo,
}

impl QuestGoal {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::CompleteSessions => "complete_sessions",
      Self::LearnWords => "learn_words",
      Self::ReachCombo => "reach_combo",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestProgress {
  pub id: String,
  pub quest_type: QuestType,
  pub goal: QuestGoal,
  pub description: String,
  pub emoji: String,
  pub current: u32,
  pub target: u32,
  pub xp_reward: u32,
  pub completed: bool,
  pub completed_at: Option<NaiveDate>,
}

impl QuestProgress {
  fn daily(today: NaiveDate, goal: QuestGoal, description: &str, emoji: &str, target: u32, xp_reward: u32) -> Self {
    Self {
      id: format!("daily-{}-{}", today.format("%Y%m%d"), goal.as_str()),
      quest_type: QuestType::Daily,
      goal,
      description: description.to_string(),
      emoji: emoji.to_string(),
      current: 0,
      target,
      xp_reward,
      completed: false,
      completed_at: None,
    }
  }

  /// Apply a measurement for this quest's goal, capped at the target.
  /// Returns the XP reward when this call completes the quest.
  pub fn advance(&mut self, value: u32, today: NaiveDate) -> u32 {
    if self.completed {
      return 0;
    }

    let next = match self.goal {
      QuestGoal::ReachCombo => self.current.max(value),
      QuestGoal::CompleteSessions | QuestGoal::LearnWords => self.current.saturating_add(value),
    };
    self.current = next.min(self.target);

    if self.current >= self.target {
      self.completed = true;
      self.completed_at = Some(today);
      tracing::debug!("Quest {} completed, +{} XP", self.id, self.xp_reward);
      return self.xp_reward;
    }
    0
  }
}

/// The three quests offered on `today`
pub fn daily_quests(today: NaiveDate) -> Vec<QuestProgress> {
  vec![
    QuestProgress::daily(today, QuestGoal::CompleteSessions, "Completa 1 sesion de ejercicios", "🎮", 1, 50),
    QuestProgress::daily(today, QuestGoal::LearnWords, "Aprende 5 palabras nuevas", "📚", 5, 30),
    QuestProgress::daily(today, QuestGoal::ReachCombo, "Consigue una racha de 3", "🔥", 3, 20),
  ]
}

/// Advance every quest from a finished session; returns the XP of newly
/// completed quests.
pub fn apply_session(quests: &mut [QuestProgress], outcome: &SessionOutcome, today: NaiveDate) -> u32 {
  quests
    .iter_mut()
    .map(|quest| {
      let value = match quest.goal {
        QuestGoal::CompleteSessions => u32::from(outcome.session_complete),
        QuestGoal::LearnWords => outcome.words_learned.len() as u32,
        QuestGoal::ReachCombo => outcome.best_combo,
      };
      quest.advance(value, today)
    })
    .sum()
}
