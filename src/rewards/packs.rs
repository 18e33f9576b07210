//! Card packs: rarity rolls and pack opening.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::{CollectedCard, ContentItem, Pack, Rarity};

/// A word that can appear on a collectible card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardVocab {
  pub word: String,
  pub translation: String,
  pub theme: String,
}

/// Card pool built from the vocabulary items of a bank, one entry per word
pub fn card_pool_from_items(items: &[ContentItem]) -> Vec<CardVocab> {
  let mut seen = HashSet::new();
  items
    .iter()
    .filter(|item| item.is_vocabulary())
    .filter(|item| seen.insert(item.english.to_lowercase()))
    .map(|item| CardVocab {
      word: item.english.clone(),
      translation: item.spanish.clone(),
      theme: item.theme.clone(),
    })
    .collect()
}

/// Roll a rarity, or return `guaranteed` unchanged when given
pub fn roll_rarity<R: Rng + ?Sized>(rng: &mut R, guaranteed: Option<Rarity>) -> Rarity {
  if let Some(rarity) = guaranteed {
    return rarity;
  }

  let roll: f64 = rng.random();
  let mut cumulative = 0.0;
  for rarity in Rarity::ALL {
    cumulative += rarity.weight();
    if roll < cumulative {
      return rarity;
    }
  }
  Rarity::Common
}

/// Open a pack into new cards.
///
/// The first card of a rare or epic pack takes the pack's guaranteed rarity.
/// Words are drawn from uncollected words first, then any word not already in
/// this opening, then the whole pool.
pub fn open_pack<R: Rng + ?Sized>(
  pack: &Pack,
  existing_cards: &[CollectedCard],
  card_pool: &[CardVocab],
  now: DateTime<Utc>,
  rng: &mut R,
) -> Vec<CollectedCard> {
  if card_pool.is_empty() {
    tracing::warn!("Card pool is empty, pack {} yields no cards", pack.id);
    return Vec::new();
  }

  let collected: HashSet<&str> = existing_cards.iter().map(|c| c.word.as_str()).collect();
  let mut opened: HashSet<String> = HashSet::new();
  let mut cards = Vec::with_capacity(pack.card_count as usize);

  for i in 0..pack.card_count {
    let guaranteed = if i == 0 { pack.pack_type.guaranteed_rarity() } else { None };
    let rarity = roll_rarity(rng, guaranteed);

    let uncollected: Vec<&CardVocab> = card_pool
      .iter()
      .filter(|v| !collected.contains(v.word.as_str()) && !opened.contains(&v.word))
      .collect();
    let unopened: Vec<&CardVocab> = card_pool.iter().filter(|v| !opened.contains(&v.word)).collect();

    let choice = if !uncollected.is_empty() {
      uncollected.choose(rng).copied()
    } else if !unopened.is_empty() {
      unopened.choose(rng).copied()
    } else {
      card_pool.choose(rng)
    };
    let Some(vocab) = choice else {
      break;
    };

    opened.insert(vocab.word.clone());
    cards.push(CollectedCard {
      id: format!("card-{}-{}-{:04x}", now.timestamp_millis(), i, rng.random::<u16>()),
      word: vocab.word.clone(),
      translation: vocab.translation.clone(),
      theme: vocab.theme.clone(),
      rarity,
      collected_at: now,
      is_new: true,
    });
  }

  tracing::debug!(
    "Opened {} pack {}: {}",
    pack.pack_type.display_name_es(),
    pack.id,
    cards
      .iter()
      .map(|c| format!("{} ({})", c.word, c.rarity.as_str()))
      .collect::<Vec<_>>()
      .join(", ")
  );

  cards
}
