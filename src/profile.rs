//! Learner profile: the state a profile store persists between sessions.

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::domain::{CollectedCard, Pack, Rank, ReviewState, ScheduledReview, Streak};
use crate::rewards::{
  CardVocab, QuestProgress, StreakUpdate, XpAward, XpEvent, apply_session, award_xp, calculate_rank, check_streak,
  daily_quests, open_pack, streak_multiplier,
};
use crate::session::SessionOutcome;
use crate::srs::calculate_sm2;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearnerProfile {
  pub xp_total: u64,
  pub rank: Rank,
  pub words_learned: Vec<String>,
  pub sessions_completed: u32,
  pub streak: Streak,
  pub cards: Vec<CollectedCard>,
  pub unopened_packs: Vec<Pack>,
  pub daily_quests: Vec<QuestProgress>,
  pub last_quest_refresh: Option<NaiveDate>,
  /// Keyed by English word
  pub reviews: BTreeMap<String, ScheduledReview>,
}

/// What changed when a session was applied to a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
  pub streak: StreakUpdate,
  pub completion: XpAward,
  pub quest_xp: u32,
  pub total_xp_gained: u64,
  pub new_words: Vec<String>,
  pub rank_up: bool,
}

impl LearnerProfile {
  pub fn new() -> Self {
    Self::default()
  }

  /// Grade one review of `word` and reschedule it.
  pub fn record_review(mut self, word: &str, quality: f64, today: NaiveDate) -> Self {
    let current = self.reviews.get(word).map(|r| r.state).unwrap_or_else(ReviewState::new);
    let result = calculate_sm2(&current, quality, today);

    tracing::debug!(
      "Review '{}' q={} -> interval {}d, next {}",
      word,
      quality,
      result.state.interval_days,
      result.next_review
    );

    self.reviews.insert(
      word.to_string(),
      ScheduledReview {
        state: result.state,
        next_review: result.next_review,
      },
    );
    self
  }

  /// Replace the daily quests when the calendar day has changed
  pub fn refresh_quests(mut self, today: NaiveDate) -> Self {
    if self.last_quest_refresh == Some(today) && !self.daily_quests.is_empty() {
      return self;
    }
    self.daily_quests = daily_quests(today);
    self.last_quest_refresh = Some(today);
    self
  }

  /// Apply a finished session: streak, XP and rank, words, packs and quests.
  pub fn complete_session(self, outcome: &SessionOutcome, today: NaiveDate) -> (Self, SessionSummary) {
    let mut profile = self.refresh_quests(today);
    let previous_rank = profile.rank;
    let starting_xp = profile.xp_total;

    let streak = check_streak(&profile.streak, today);
    profile.streak = streak.streak;

    profile.xp_total = profile.xp_total.saturating_add(u64::from(outcome.xp_earned));
    let completion = award_xp(
      profile.xp_total,
      XpEvent::SessionComplete,
      streak_multiplier(profile.streak.current),
    );
    profile.xp_total = completion.new_total;

    let quest_xp = apply_session(&mut profile.daily_quests, outcome, today);
    profile.xp_total = profile.xp_total.saturating_add(u64::from(quest_xp));
    profile.rank = calculate_rank(profile.xp_total);

    let known: HashSet<String> = profile.words_learned.iter().cloned().collect();
    let new_words: Vec<String> = outcome
      .words_learned
      .iter()
      .filter(|w| !known.contains(*w))
      .cloned()
      .collect();
    profile.words_learned.extend(new_words.iter().cloned());

    profile.unopened_packs.extend(outcome.packs_earned.iter().cloned());
    if outcome.session_complete {
      profile.sessions_completed += 1;
    }

    let summary = SessionSummary {
      streak,
      completion,
      quest_xp,
      total_xp_gained: profile.xp_total - starting_xp,
      new_words,
      rank_up: profile.rank != previous_rank,
    };

    if summary.rank_up {
      tracing::info!("Rank up: {} -> {}", previous_rank.name(), profile.rank.name());
    }

    (profile, summary)
  }

  /// Open an unopened pack by id. An unknown id yields no cards.
  pub fn open_pack<R: Rng + ?Sized>(
    mut self,
    pack_id: &str,
    card_pool: &[CardVocab],
    now: DateTime<Utc>,
    rng: &mut R,
  ) -> (Self, Vec<CollectedCard>) {
    let Some(index) = self.unopened_packs.iter().position(|p| p.id == pack_id) else {
      tracing::warn!("No unopened pack with id {}", pack_id);
      return (self, Vec::new());
    };

    let pack = self.unopened_packs.remove(index);
    let cards = open_pack(&pack, &self.cards, card_pool, now, rng);
    self.cards.extend(cards.iter().cloned());
    (self, cards)
  }

  pub fn mark_cards_seen(mut self) -> Self {
    for card in &mut self.cards {
      card.is_new = false;
    }
    self
  }

  /// Learned words that are scheduled and not yet due
  pub fn words_to_exclude(&self, today: NaiveDate) -> Vec<String> {
    self
      .words_learned
      .iter()
      .filter(|word| self.reviews.get(*word).is_some_and(|r| !r.is_due(today)))
      .cloned()
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{PackSource, PackType};
  use crate::rewards::StreakAction;
  use chrono::TimeZone;
  use rand::SeedableRng;
  use rand::rngs::StdRng;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 18, 0, 0).unwrap()
  }

  fn pack(id: &str, pack_type: PackType) -> Pack {
    Pack {
      id: id.to_string(),
      pack_type,
      card_count: 3,
      earned_at: now(),
      source: PackSource::SessionComplete,
    }
  }

  fn outcome(words: &[&str], xp: u32, best_combo: u32) -> SessionOutcome {
    SessionOutcome {
      xp_earned: xp,
      words_learned: words.iter().map(|w| w.to_string()).collect(),
      session_complete: true,
      packs_earned: vec![pack("pack-1", PackType::Basic)],
      correct: 6,
      total: 7,
      percentage: 86,
      stars: 2,
      best_combo,
    }
  }

  fn pool() -> Vec<CardVocab> {
    ["dragon", "sword", "hero", "castle"]
      .iter()
      .map(|w| CardVocab {
        word: w.to_string(),
        translation: format!("{w}-es"),
        theme: "gaming".to_string(),
      })
      .collect()
  }

  #[test]
  fn test_record_review_schedules() {
    let today = date(2025, 3, 10);
    let profile = LearnerProfile::new().record_review("dragon", 5.0, today);
    let review = profile.reviews["dragon"];
    assert_eq!(review.state.repetitions, 1);
    assert_eq!(review.next_review, date(2025, 3, 11));

    let profile = profile.record_review("dragon", 5.0, date(2025, 3, 11));
    assert_eq!(profile.reviews["dragon"].state.repetitions, 2);
    assert_eq!(profile.reviews["dragon"].next_review, date(2025, 3, 17));
  }

  #[test]
  fn test_complete_session_first_day() {
    let today = date(2025, 3, 10);
    let (profile, summary) = LearnerProfile::new().complete_session(&outcome(&["dragon", "sword"], 120, 4), today);

    assert_eq!(summary.streak.action, StreakAction::Continued);
    assert_eq!(profile.streak.current, 1);
    // 120 session + 50 completion + 50 session quest + 20 combo quest
    assert_eq!(summary.quest_xp, 70);
    assert_eq!(profile.xp_total, 240);
    assert_eq!(summary.total_xp_gained, 240);
    assert_eq!(profile.sessions_completed, 1);
    assert_eq!(profile.words_learned, vec!["dragon", "sword"]);
    assert_eq!(profile.unopened_packs.len(), 1);
    assert_eq!(profile.last_quest_refresh, Some(today));
    assert!(!summary.rank_up);
  }

  #[test]
  fn test_complete_session_rank_up_and_word_dedup() {
    let today = date(2025, 3, 10);
    let mut profile = LearnerProfile::new();
    profile.xp_total = 900;
    profile.words_learned = vec!["dragon".to_string()];

    let (profile, summary) = profile.complete_session(&outcome(&["dragon", "hero"], 30, 1), today);
    assert!(summary.rank_up);
    assert_eq!(profile.rank, Rank::Player);
    assert_eq!(summary.new_words, vec!["hero"]);
    assert_eq!(profile.words_learned, vec!["dragon", "hero"]);
  }

  #[test]
  fn test_streak_multiplier_applies_to_completion() {
    let mut profile = LearnerProfile::new();
    profile.streak = Streak {
      current: 9,
      best: 9,
      shields: 1,
      last_activity_date: Some(date(2025, 3, 9)),
    };

    let (profile, summary) = profile.complete_session(&outcome(&[], 0, 0), date(2025, 3, 10));
    assert_eq!(profile.streak.current, 10);
    assert_eq!(summary.completion.amount, 60);
  }

  #[test]
  fn test_quests_refresh_on_new_day() {
    let (profile, _) = LearnerProfile::new().complete_session(&outcome(&[], 0, 0), date(2025, 3, 10));
    assert!(profile.daily_quests[0].completed);

    let profile = profile.refresh_quests(date(2025, 3, 11));
    assert!(profile.daily_quests.iter().all(|q| !q.completed));
    assert_eq!(profile.last_quest_refresh, Some(date(2025, 3, 11)));
  }

  #[test]
  fn test_open_pack_moves_cards_into_collection() {
    let mut profile = LearnerProfile::new();
    profile.unopened_packs = vec![pack("pack-a", PackType::Epic), pack("pack-b", PackType::Basic)];
    let mut rng = StdRng::seed_from_u64(11);

    let (profile, cards) = profile.open_pack("pack-a", &pool(), now(), &mut rng);
    assert_eq!(cards.len(), 3);
    assert_eq!(cards[0].rarity, crate::domain::Rarity::Epic);
    assert_eq!(profile.cards.len(), 3);
    assert_eq!(profile.unopened_packs.len(), 1);

    let (profile, cards) = profile.open_pack("pack-missing", &pool(), now(), &mut rng);
    assert!(cards.is_empty());
    assert_eq!(profile.cards.len(), 3);

    let profile = profile.mark_cards_seen();
    assert!(profile.cards.iter().all(|c| !c.is_new));
  }

  #[test]
  fn test_words_to_exclude() {
    let today = date(2025, 3, 10);
    let mut profile = LearnerProfile::new()
      .record_review("dragon", 5.0, today)
      .record_review("sword", 1.0, today);
    profile.words_learned = vec!["dragon".to_string(), "sword".to_string(), "hero".to_string()];

    // Both reviewed today are due tomorrow; hero was never scheduled
    assert_eq!(profile.words_to_exclude(today), vec!["dragon", "sword"]);
    assert!(profile.words_to_exclude(date(2025, 3, 11)).is_empty());
  }
}
