use chrono::{Days, NaiveDate};

use crate::config::{INITIAL_EASE_FACTOR, MAX_INTERVAL_DAYS, MIN_EASE_FACTOR};
use crate::domain::ReviewState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sm2Result {
  pub state: ReviewState,
  pub next_review: NaiveDate,
  pub is_correct: bool,
}

/// Round and clamp a raw quality rating into 0..=5. NaN rates as 0.
pub fn clamp_quality(quality: f64) -> u8 {
  if quality.is_nan() {
    return 0;
  }
  quality.round().clamp(0.0, 5.0) as u8
}

pub fn calculate_sm2(current: &ReviewState, quality: f64, today: NaiveDate) -> Sm2Result {
  let quality = clamp_quality(quality);
  let q = f64::from(quality);
  let is_correct = quality >= 3;

  // Stored state may predate the floor
  let ease = if current.ease_factor.is_finite() {
    current.ease_factor.max(MIN_EASE_FACTOR)
  } else {
    INITIAL_EASE_FACTOR
  };

  let (interval_days, repetitions) = if is_correct {
    // The interval grows by the ease factor held before this review
    let interval = match current.repetitions {
      0 => 1,
      1 => 6,
      _ => {
        let grown = (f64::from(current.interval_days) * ease).round();
        grown.clamp(1.0, f64::from(MAX_INTERVAL_DAYS)) as u32
      }
    };
    (interval, current.repetitions.saturating_add(1))
  } else {
    // Failed review: reset
    (1, 0)
  };

  // EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))
  let ease_delta = 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
  let ease_factor = (ease + ease_delta).max(MIN_EASE_FACTOR);

  let next_review = today
    .checked_add_days(Days::new(u64::from(interval_days)))
    .unwrap_or(NaiveDate::MAX);

  Sm2Result {
    state: ReviewState {
      repetitions,
      ease_factor,
      interval_days,
    },
    next_review,
    is_correct,
  }
}

/// Map an exercise's accuracy and response time to an SM-2 quality rating.
///
/// Below 0.7 accuracy the rating depends on accuracy alone. Above it, speed
/// counts for 30%: full marks under `target_time_ms`, decaying linearly to
/// zero at twice the target.
pub fn accuracy_to_quality(accuracy: f64, time_taken_ms: u64, target_time_ms: u64) -> u8 {
  let accuracy = if accuracy.is_nan() { 0.0 } else { accuracy.clamp(0.0, 1.0) };

  if accuracy < 0.3 {
    return 0;
  }
  if accuracy < 0.5 {
    return 1;
  }
  if accuracy < 0.7 {
    return 2;
  }

  let speed_factor = if time_taken_ms <= target_time_ms || target_time_ms == 0 {
    1.0
  } else {
    let over = (time_taken_ms - target_time_ms) as f64;
    (1.0 - over / target_time_ms as f64).max(0.0)
  };

  let combined = accuracy * 0.7 + speed_factor * 0.3;
  if combined < 0.75 {
    3
  } else if combined < 0.9 {
    4
  } else {
    5
  }
}
