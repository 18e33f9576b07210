//! Daily streak continuation with shield forgiveness.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::days_between;
use crate::config::{MAX_SHIELDS, SHIELD_EARN_INTERVAL, STREAK_MILESTONES};
use crate::domain::Streak;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakAction {
  Continued,
  AlreadyActive,
  ShieldUsed,
  Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakUpdate {
  pub action: StreakAction,
  pub streak: Streak,
  pub shield_used: bool,
  /// Set when the new streak length is exactly a milestone
  pub milestone: Option<u32>,
}

fn milestone_for(days: u32) -> Option<u32> {
  STREAK_MILESTONES.iter().copied().find(|m| *m == days)
}

/// Apply today's activity to a streak. At most one change per calendar day.
pub fn check_streak(current: &Streak, today: NaiveDate) -> StreakUpdate {
  let shields = current.shields.min(MAX_SHIELDS);
  let best = current.best.max(current.current);

  let Some(last) = current.last_activity_date else {
    let streak = Streak {
      current: 1,
      best: best.max(1),
      shields,
      last_activity_date: Some(today),
    };
    tracing::debug!("First activity on {}", today);
    return StreakUpdate {
      action: StreakAction::Continued,
      streak,
      shield_used: false,
      milestone: None,
    };
  };

  let gap = days_between(last, today);

  // Same day, or a clock that went backwards
  if gap <= 0 {
    return StreakUpdate {
      action: StreakAction::AlreadyActive,
      streak: Streak {
        best,
        shields,
        ..*current
      },
      shield_used: false,
      milestone: None,
    };
  }

  let (action, streak) = match gap {
    1 => {
      let next = current.current.saturating_add(1);
      let earned_shield = next % SHIELD_EARN_INTERVAL == 0 && shields < MAX_SHIELDS;
      (
        StreakAction::Continued,
        Streak {
          current: next,
          best: best.max(next),
          shields: if earned_shield { shields + 1 } else { shields },
          last_activity_date: Some(today),
        },
      )
    }
    2 if shields > 0 => {
      let next = current.current.saturating_add(1);
      (
        StreakAction::ShieldUsed,
        Streak {
          current: next,
          best: best.max(next),
          shields: shields - 1,
          last_activity_date: Some(today),
        },
      )
    }
    _ => (
      StreakAction::Reset,
      Streak {
        current: 1,
        best: best.max(1),
        shields,
        last_activity_date: Some(today),
      },
    ),
  };

  let milestone = match action {
    StreakAction::Continued | StreakAction::ShieldUsed => milestone_for(streak.current),
    _ => None,
  };

  tracing::debug!(
    "Streak {:?} after {} day gap: {} -> {}",
    action,
    gap,
    current.current,
    streak.current
  );

  StreakUpdate {
    action,
    streak,
    shield_used: action == StreakAction::ShieldUsed,
    milestone,
  }
}

/// Spanish title and message for a streak update
pub fn streak_message(update: &StreakUpdate) -> (String, String) {
  match update.action {
    StreakAction::Continued => match update.milestone {
      Some(days) => (
        format!("{} días seguidos", days),
        format!("¡Increíble! Llevas {} días seguidos aprendiendo.", days),
      ),
      None => (
        format!("{} días seguidos", update.streak.current),
        "¡Sigue así! Cada día cuenta.".to_string(),
      ),
    },
    StreakAction::ShieldUsed => (
      "Escudo activado".to_string(),
      format!(
        "Se usó un escudo protector. Tu racha de {} días sigue activa.",
        update.streak.current
      ),
    ),
    StreakAction::Reset => (
      "¡Nueva aventura!".to_string(),
      "Vamos a por otra racha. ¡Tú puedes!".to_string(),
    ),
    StreakAction::AlreadyActive => (
      format!("{} días seguidos", update.streak.current),
      "Ya has practicado hoy. ¡Genial!".to_string(),
    ),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn streak(current: u32, best: u32, shields: u32, last: Option<NaiveDate>) -> Streak {
    Streak {
      current,
      best,
      shields,
      last_activity_date: last,
    }
  }

  #[test]
  fn test_first_activity() {
    let today = date(2025, 3, 10);
    let update = check_streak(&Streak::default(), today);
    assert_eq!(update.action, StreakAction::Continued);
    assert_eq!(update.streak.current, 1);
    assert_eq!(update.streak.best, 1);
    assert_eq!(update.streak.last_activity_date, Some(today));
  }

  #[test]
  fn test_already_active_today() {
    let today = date(2025, 3, 10);
    let current = streak(4, 9, 1, Some(today));
    let update = check_streak(&current, today);
    assert_eq!(update.action, StreakAction::AlreadyActive);
    assert_eq!(update.streak, current);
  }

  #[test]
  fn test_future_last_activity_is_already_active() {
    let current = streak(4, 9, 1, Some(date(2025, 3, 12)));
    let update = check_streak(&current, date(2025, 3, 10));
    assert_eq!(update.action, StreakAction::AlreadyActive);
    assert_eq!(update.streak.current, 4);
  }

  #[test]
  fn test_consecutive_day_continues() {
    let update = check_streak(&streak(2, 5, 0, Some(date(2025, 3, 9))), date(2025, 3, 10));
    assert_eq!(update.action, StreakAction::Continued);
    assert_eq!(update.streak.current, 3);
    assert_eq!(update.streak.best, 5);
    assert_eq!(update.milestone, Some(3));
  }

  #[test]
  fn test_consecutive_across_month_boundary() {
    let update = check_streak(&streak(1, 1, 0, Some(date(2025, 2, 28))), date(2025, 3, 1));
    assert_eq!(update.action, StreakAction::Continued);
    assert_eq!(update.streak.current, 2);
    assert_eq!(update.milestone, None);
  }

  #[test]
  fn test_shield_earned_every_seventh_day() {
    let update = check_streak(&streak(6, 6, 0, Some(date(2025, 3, 9))), date(2025, 3, 10));
    assert_eq!(update.streak.current, 7);
    assert_eq!(update.streak.shields, 1);
    assert_eq!(update.milestone, Some(7));

    // Capped at three
    let update = check_streak(&streak(13, 13, 3, Some(date(2025, 3, 9))), date(2025, 3, 10));
    assert_eq!(update.streak.shields, 3);
  }

  #[test]
  fn test_shield_forgives_one_missed_day() {
    let update = check_streak(&streak(5, 5, 1, Some(date(2025, 3, 8))), date(2025, 3, 10));
    assert_eq!(update.action, StreakAction::ShieldUsed);
    assert!(update.shield_used);
    assert_eq!(update.streak.shields, 0);
    assert_eq!(update.streak.current, 6);
    assert_eq!(update.streak.best, 6);
  }

  #[test]
  fn test_missed_day_without_shield_resets() {
    let update = check_streak(&streak(5, 8, 0, Some(date(2025, 3, 8))), date(2025, 3, 10));
    assert_eq!(update.action, StreakAction::Reset);
    assert_eq!(update.streak.current, 1);
    assert_eq!(update.streak.best, 8);
  }

  #[test]
  fn test_long_gap_resets_even_with_shields() {
    let update = check_streak(&streak(20, 20, 2, Some(date(2025, 3, 1))), date(2025, 3, 10));
    assert_eq!(update.action, StreakAction::Reset);
    assert_eq!(update.streak.current, 1);
    assert_eq!(update.streak.best, 20);
    assert_eq!(update.streak.shields, 2);
    assert!(!update.shield_used);
  }

  #[test]
  fn test_invariants_restored() {
    let update = check_streak(&streak(10, 4, 9, Some(date(2025, 3, 9))), date(2025, 3, 10));
    assert!(update.streak.current <= update.streak.best);
    assert!(update.streak.shields <= MAX_SHIELDS);
  }

  #[test]
  fn test_streak_messages() {
    let update = check_streak(&streak(2, 2, 0, Some(date(2025, 3, 9))), date(2025, 3, 10));
    let (title, message) = streak_message(&update);
    assert_eq!(title, "3 días seguidos");
    assert!(message.contains("Llevas 3 días"));

    let update = check_streak(&streak(5, 5, 1, Some(date(2025, 3, 8))), date(2025, 3, 10));
    assert_eq!(streak_message(&update).0, "Escudo activado");

    let update = check_streak(&streak(5, 5, 0, Some(date(2025, 3, 1))), date(2025, 3, 10));
    assert_eq!(streak_message(&update).0, "¡Nueva aventura!");
  }
}
