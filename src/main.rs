use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use speakquest::clock::{Clock, SystemClock};
use speakquest::config::{DEFAULT_TARGET_TIME_MS, EngineConfig};
use speakquest::content::{ContentBank, MemoryBank, load_bank_from_dir, starter_bank};
use speakquest::domain::{CollectedCard, Exercise, PackType};
use speakquest::profile::{LearnerProfile, SessionSummary};
use speakquest::rewards::card_pool_from_items;
use speakquest::scoring::{ScoreInput, score_exercise};
use speakquest::session::{SessionOutcome, SessionTally, build_session};
use speakquest::srs::{FlowState, accuracy_to_quality};

/// Everything one simulated run produced, written to stdout as JSON
#[derive(Serialize)]
struct RunReport {
  seed: Option<u64>,
  exercises: Vec<Exercise>,
  outcome: SessionOutcome,
  summary: SessionSummary,
  opened_cards: Vec<CollectedCard>,
  flow: FlowState,
  profile: LearnerProfile,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "speakquest=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();

  let config = EngineConfig::load()?;
  let bank = load_bank(&config);
  let clock = SystemClock;

  let mut rng = match config.seed {
    Some(seed) => StdRng::seed_from_u64(seed),
    None => StdRng::from_rng(&mut rand::rng()),
  };

  let today = clock.today();
  let profile = LearnerProfile::new().refresh_quests(today);
  let exclude = profile.words_to_exclude(today);

  let exercises = build_session(
    &bank,
    &config.theme,
    config.level,
    config.session_size,
    &exclude,
    &mut rng,
  );
  tracing::info!(
    "Built {} exercises for theme '{}' ({})",
    exercises.len(),
    config.theme,
    config.level.as_str()
  );

  let mut tally = SessionTally::new();
  let mut flow = FlowState::default();
  let mut profile = profile;

  for exercise in &exercises {
    let expected = exercise.expected_response();
    let answered_correctly = rng.random_bool(config.simulated_accuracy.clamp(0.0, 1.0));
    let response = if answered_correctly {
      expected.clone()
    } else {
      wrong_response(exercise, &expected, &mut rng)
    };
    let time_taken_ms = rng.random_range(1_500..9_000);

    let result = score_exercise(
      &ScoreInput::new(exercise.scoring_kind(), &response, &expected).time_taken_ms(time_taken_ms),
    );
    tracing::debug!(
      "{} answered {:?}: correct={} accuracy={:.2}",
      exercise.exercise_type().as_str(),
      response,
      result.is_correct,
      result.accuracy
    );

    let (next_flow, _) = flow.record(result.is_correct);
    flow = next_flow;
    tally.record_answer(result.is_correct, false);

    if let Some(prompt) = exercise.prompt() {
      let quality = accuracy_to_quality(result.accuracy, time_taken_ms, DEFAULT_TARGET_TIME_MS);
      profile = profile.record_review(&prompt.word, f64::from(quality), today);
    }
  }

  let now = clock.now();
  let outcome = tally.finish(&exercises, now, &mut rng);
  let (mut profile, summary) = profile.complete_session(&outcome, today);

  let pool = card_pool_from_items(&bank.all());
  let packs: Vec<(String, PackType)> = profile
    .unopened_packs
    .iter()
    .map(|p| (p.id.clone(), p.pack_type))
    .collect();
  let mut opened_cards = Vec::new();
  for (pack_id, pack_type) in packs {
    let (next, cards) = profile.open_pack(&pack_id, &pool, now, &mut rng);
    profile = next;
    tracing::info!("{} {}", pack_type.emoji(), pack_type.display_name_es());
    for card in &cards {
      tracing::info!(
        "  {} {} = {} ({})",
        card.rarity.emoji(),
        card.word,
        card.translation,
        card.rarity.label_es()
      );
    }
    opened_cards.extend(cards);
  }

  tracing::info!(
    "Session done: {}% ({} stars), +{} XP, {} cards",
    outcome.percentage,
    outcome.stars,
    summary.total_xp_gained,
    opened_cards.len()
  );
  tracing::info!("Rank: {} {} ({} XP)", profile.rank.emoji(), profile.rank.name(), profile.xp_total);

  let report = RunReport {
    seed: config.seed,
    exercises,
    outcome,
    summary,
    opened_cards,
    flow,
    profile,
  };
  println!("{}", serde_json::to_string_pretty(&report)?);

  Ok(())
}

fn load_bank(config: &EngineConfig) -> MemoryBank {
  let Some(dir) = &config.content_dir else {
    return starter_bank();
  };

  match load_bank_from_dir(dir) {
    Ok(bank) if !bank.is_empty() => bank,
    Ok(_) => {
      tracing::warn!("No content in {}, using the starter bank", dir.display());
      starter_bank()
    }
    Err(e) => {
      tracing::warn!("Failed to load content from {}: {}", dir.display(), e);
      starter_bank()
    }
  }
}

/// A plausible wrong answer for the simulated learner
fn wrong_response<R: Rng + ?Sized>(exercise: &Exercise, expected: &str, rng: &mut R) -> String {
  if let Some((options, correct_index)) = exercise.options() {
    let wrong: Vec<&String> = options
      .iter()
      .enumerate()
      .filter(|(i, _)| *i != correct_index)
      .map(|(_, option)| option)
      .collect();
    if let Some(choice) = wrong.choose(rng) {
      return (*choice).clone();
    }
  }
  expected.chars().rev().collect()
}
