//! Injectable time source and calendar-day arithmetic.

use chrono::{DateTime, NaiveDate, Utc};

/// Source of "now" for anything that depends on the calendar
pub trait Clock {
  fn now(&self) -> DateTime<Utc>;

  fn today(&self) -> NaiveDate {
    self.now().date_naive()
  }
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// A clock stuck at one instant, for tests and replays
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
  fn now(&self) -> DateTime<Utc> {
    self.0
  }
}

/// Whole calendar days from `from` to `to`; negative when `to` is earlier
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
  (to - from).num_days()
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  #[test]
  fn test_days_between() {
    let a = NaiveDate::from_ymd_opt(2025, 2, 27).unwrap();
    let b = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    assert_eq!(days_between(a, b), 2);
    assert_eq!(days_between(b, a), -2);
    assert_eq!(days_between(a, a), 0);
  }

  #[test]
  fn test_fixed_clock_today() {
    let clock = FixedClock(Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap());
    assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
  }
}
