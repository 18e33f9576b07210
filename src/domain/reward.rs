use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Daily practice streak.
///
/// Invariants: `current <= best` and `shields <= MAX_SHIELDS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Streak {
  pub current: u32,
  pub best: u32,
  pub shields: u32,
  pub last_activity_date: Option<NaiveDate>,
}

/// Learner rank, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
  #[default]
  Rookie,
  Player,
  Pro,
  Champion,
  Legend,
}

impl Rank {
  pub const ALL: [Rank; 5] = [Self::Rookie, Self::Player, Self::Pro, Self::Champion, Self::Legend];

  /// Total XP needed to reach this rank
  pub fn threshold(&self) -> u64 {
    match self {
      Self::Rookie => 0,
      Self::Player => 1_000,
      Self::Pro => 5_000,
      Self::Champion => 15_000,
      Self::Legend => 50_000,
    }
  }

  pub fn name(&self) -> &'static str {
    match self {
      Self::Rookie => "Rookie",
      Self::Player => "Player",
      Self::Pro => "Pro",
      Self::Champion => "Champion",
      Self::Legend => "Legend",
    }
  }

  pub fn emoji(&self) -> &'static str {
    match self {
      Self::Rookie => "🥉",
      Self::Player => "🥈",
      Self::Pro => "🥇",
      Self::Champion => "👑",
      Self::Legend => "🏆",
    }
  }

  pub fn next(&self) -> Option<Rank> {
    match self {
      Self::Rookie => Some(Self::Player),
      Self::Player => Some(Self::Pro),
      Self::Pro => Some(Self::Champion),
      Self::Champion => Some(Self::Legend),
      Self::Legend => None,
    }
  }
}

/// Collectible card rarity, ordered from most to least common
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
  Common,
  Rare,
  Epic,
  Legendary,
}

impl Rarity {
  pub const ALL: [Rarity; 4] = [Self::Common, Self::Rare, Self::Epic, Self::Legendary];

  /// Probability of rolling this rarity on an unguaranteed slot
  pub fn weight(&self) -> f64 {
    match self {
      Self::Common => 0.60,
      Self::Rare => 0.25,
      Self::Epic => 0.12,
      Self::Legendary => 0.03,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Common => "common",
      Self::Rare => "rare",
      Self::Epic => "epic",
      Self::Legendary => "legendary",
    }
  }

  pub fn label_es(&self) -> &'static str {
    match self {
      Self::Common => "Comun",
      Self::Rare => "Rara",
      Self::Epic => "Epica",
      Self::Legendary => "Legendaria",
    }
  }

  pub fn emoji(&self) -> &'static str {
    match self {
      Self::Common => "⚪",
      Self::Rare => "🔵",
      Self::Epic => "🟣",
      Self::Legendary => "🌟",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackType {
  Basic,
  Rare,
  Epic,
}

impl PackType {
  /// Rarity forced onto the first card of the pack
  pub fn guaranteed_rarity(&self) -> Option<Rarity> {
    match self {
      Self::Basic => None,
      Self::Rare => Some(Rarity::Rare),
      Self::Epic => Some(Rarity::Epic),
    }
  }

  pub fn emoji(&self) -> &'static str {
    match self {
      Self::Basic => "🎴",
      Self::Rare => "💎",
      Self::Epic => "🌟",
    }
  }

  pub fn display_name_es(&self) -> &'static str {
    match self {
      Self::Basic => "Sobre Basico",
      Self::Rare => "Sobre Raro",
      Self::Epic => "Sobre Epico",
    }
  }
}

/// Why a pack was granted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackSource {
  SessionComplete,
  BonusScore,
  Milestone,
}

/// An unopened reward pack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pack {
  pub id: String,
  pub pack_type: PackType,
  pub card_count: u32,
  pub earned_at: DateTime<Utc>,
  pub source: PackSource,
}

/// A card in the learner's collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectedCard {
  pub id: String,
  pub word: String,
  pub translation: String,
  pub theme: String,
  pub rarity: Rarity,
  pub collected_at: DateTime<Utc>,
  pub is_new: bool,
}
