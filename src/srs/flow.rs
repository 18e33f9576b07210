//! Flow-channel difficulty controller.
//!
//! Keeps the learner's recent success rate inside a target band: a run of
//! easy wins nudges the difficulty score up, a run of misses nudges it down,
//! anything in between holds steady.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::config::{
  DIFFICULTY_STEP, FLOW_HISTORY_SIZE, FLOW_MAX, FLOW_MIN, FLOW_MIN_SAMPLES, FLOW_WINDOW_SIZE, MAX_DIFFICULTY,
  MIN_DIFFICULTY,
};

/// Starting difficulty for a fresh track
pub const DEFAULT_DIFFICULTY: u8 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowState {
  /// Most recent results, oldest first, at most `FLOW_HISTORY_SIZE`
  pub recent_results: VecDeque<bool>,
  /// Always within `MIN_DIFFICULTY..=MAX_DIFFICULTY`
  pub current_difficulty_score: u8,
  pub adjustment_count: u32,
}

impl Default for FlowState {
  fn default() -> Self {
    Self::new(DEFAULT_DIFFICULTY)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowDirection {
  Up,
  Down,
  Maintain,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyAdjustment {
  pub direction: FlowDirection,
  pub new_score: u8,
  pub reason: String,
}

impl FlowState {
  pub fn new(start_score: u8) -> Self {
    Self {
      recent_results: VecDeque::with_capacity(FLOW_HISTORY_SIZE),
      current_difficulty_score: start_score.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY),
      adjustment_count: 0,
    }
  }

  /// Fraction correct over the evaluation window, if there are enough samples
  pub fn window_accuracy(&self) -> Option<f64> {
    if self.recent_results.len() < FLOW_MIN_SAMPLES {
      return None;
    }
    let window: Vec<bool> = self
      .recent_results
      .iter()
      .rev()
      .take(FLOW_WINDOW_SIZE)
      .copied()
      .collect();
    let correct = window.iter().filter(|r| **r).count();
    Some(correct as f64 / window.len() as f64)
  }

  /// Record one graded answer and apply any resulting adjustment
  pub fn record(mut self, is_correct: bool) -> (Self, DifficultyAdjustment) {
    self.recent_results.push_back(is_correct);
    while self.recent_results.len() > FLOW_HISTORY_SIZE {
      self.recent_results.pop_front();
    }

    let adjustment = adjust_difficulty(&self);
    if adjustment.direction != FlowDirection::Maintain {
      tracing::debug!(
        "Difficulty {:?}: {} -> {} ({})",
        adjustment.direction,
        self.current_difficulty_score,
        adjustment.new_score,
        adjustment.reason
      );
      self.adjustment_count += 1;
    }
    self.current_difficulty_score = adjustment.new_score;

    (self, adjustment)
  }
}

/// Decide how the difficulty score should move given the current window
pub fn adjust_difficulty(state: &FlowState) -> DifficultyAdjustment {
  let score = state.current_difficulty_score.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY);

  let Some(accuracy) = state.window_accuracy() else {
    return DifficultyAdjustment {
      direction: FlowDirection::Maintain,
      new_score: score,
      reason: "Not enough data yet".to_string(),
    };
  };

  let percent = (accuracy * 100.0).round();

  if accuracy > FLOW_MAX {
    let new_score = score.saturating_add(DIFFICULTY_STEP).min(MAX_DIFFICULTY);
    if new_score != score {
      return DifficultyAdjustment {
        direction: FlowDirection::Up,
        new_score,
        reason: format!("Accuracy {percent}% is above the flow channel"),
      };
    }
  } else if accuracy < FLOW_MIN {
    let new_score = score.saturating_sub(DIFFICULTY_STEP).max(MIN_DIFFICULTY);
    if new_score != score {
      return DifficultyAdjustment {
        direction: FlowDirection::Down,
        new_score,
        reason: format!("Accuracy {percent}% is below the flow channel"),
      };
    }
  }

  DifficultyAdjustment {
    direction: FlowDirection::Maintain,
    new_score: score,
    reason: format!("In flow at {percent}%"),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn feed(mut state: FlowState, results: &[bool]) -> FlowState {
    for r in results {
      state = state.record(*r).0;
    }
    state
  }

  #[test]
  fn test_needs_minimum_samples() {
    let state = FlowState::new(50);
    let (state, adj) = state.record(true);
    assert_eq!(adj.direction, FlowDirection::Maintain);
    let (state, adj) = state.record(true);
    assert_eq!(adj.direction, FlowDirection::Maintain);
    assert_eq!(state.current_difficulty_score, 50);

    let (state, adj) = state.record(true);
    assert_eq!(adj.direction, FlowDirection::Up);
    assert_eq!(state.current_difficulty_score, 55);
    assert_eq!(state.adjustment_count, 1);
  }

  #[test]
  fn test_struggling_lowers_difficulty() {
    let state = feed(FlowState::new(50), &[false, false]);
    let (state, adj) = state.record(false);
    assert_eq!(adj.direction, FlowDirection::Down);
    assert_eq!(adj.new_score, 45);
    assert_eq!(state.current_difficulty_score, 45);
  }

  #[test]
  fn test_in_flow_holds_steady() {
    // Every five-result window holds exactly one miss: 0.8 accuracy
    let mut state = FlowState::new(50);
    for r in [false, true, true, true, true].iter().cycle().take(40) {
      let (next, adj) = state.record(*r);
      assert_eq!(adj.direction, FlowDirection::Maintain);
      state = next;
    }
    assert_eq!(state.current_difficulty_score, 50);
    assert_eq!(state.adjustment_count, 0);
  }

  #[test]
  fn test_bounds_respected() {
    let state = feed(FlowState::new(50), &[true; 100]);
    assert_eq!(state.current_difficulty_score, MAX_DIFFICULTY);

    let state = feed(state, &[false; 100]);
    assert_eq!(state.current_difficulty_score, MIN_DIFFICULTY);
  }

  #[test]
  fn test_pinned_at_bound_is_not_a_move() {
    let state = feed(FlowState::new(95), &[true; 3]);
    assert_eq!(state.current_difficulty_score, 95);
    assert_eq!(state.adjustment_count, 0);
  }

  #[test]
  fn test_history_is_bounded() {
    let state = feed(FlowState::new(50), &[true; 25]);
    assert_eq!(state.recent_results.len(), FLOW_HISTORY_SIZE);
  }

  #[test]
  fn test_record_clamps_out_of_range_score() {
    let mut state = FlowState::default();
    state.current_difficulty_score = 200;
    let (state, adjustment) = state.record(true);
    assert_eq!(adjustment.direction, FlowDirection::Maintain);
    assert_eq!(state.current_difficulty_score, MAX_DIFFICULTY);
    assert_eq!(state.adjustment_count, 0);

    let mut state = FlowState::default();
    state.current_difficulty_score = 0;
    let (state, _) = state.record(false);
    assert_eq!(state.current_difficulty_score, MIN_DIFFICULTY);
  }

  #[test]
  fn test_new_clamps_start_score() {
    assert_eq!(FlowState::new(0).current_difficulty_score, MIN_DIFFICULTY);
    assert_eq!(FlowState::new(200).current_difficulty_score, MAX_DIFFICULTY);
  }

  #[test]
  fn test_window_uses_most_recent_five() {
    // Five misses followed by five hits: window sees only hits
    let mut state = FlowState::new(50);
    state.recent_results = [false, false, false, false, false, true, true, true, true, true]
      .into_iter()
      .collect();
    assert_eq!(state.window_accuracy(), Some(1.0));
    assert_eq!(adjust_difficulty(&state).direction, FlowDirection::Up);
  }
}
