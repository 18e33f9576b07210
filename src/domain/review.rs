use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::INITIAL_EASE_FACTOR;

/// SM-2 review state for one learner and one item.
///
/// Created on first exposure, updated after every graded attempt and never
/// deleted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
  /// Consecutive correct reviews; resets to 0 on failure
  pub repetitions: u32,
  pub ease_factor: f64,
  pub interval_days: u32,
}

impl Default for ReviewState {
  fn default() -> Self {
    Self {
      repetitions: 0,
      ease_factor: INITIAL_EASE_FACTOR,
      interval_days: 0,
    }
  }
}

impl ReviewState {
  pub fn new() -> Self {
    Self::default()
  }
}

/// A review state together with the date it next comes due
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledReview {
  pub state: ReviewState,
  pub next_review: NaiveDate,
}

impl ScheduledReview {
  pub fn is_due(&self, today: NaiveDate) -> bool {
    self.next_review <= today
  }
}
