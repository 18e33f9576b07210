//! Reward engine: streaks, XP and ranks, card packs, daily quests.

pub mod packs;
pub mod quests;
pub mod streak;
pub mod xp;

pub use packs::{CardVocab, card_pool_from_items, open_pack, roll_rarity};
pub use quests::{QuestGoal, QuestProgress, QuestType, apply_session, daily_quests};
pub use streak::{StreakAction, StreakUpdate, check_streak, streak_message};
pub use xp::{XpAward, XpEvent, award_xp, calculate_rank, next_rank_threshold, streak_multiplier};
