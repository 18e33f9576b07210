pub mod exercise;
pub mod item;
pub mod review;
pub mod reward;

pub use exercise::{
  Exercise, ExerciseType, FillBlank, MatchPair, Matching, MultipleChoice, Prompt, TranslationDirection,
  TranslatePhrase, WordBuilder,
};
pub use item::{ContentItem, ContentKind, Level};
pub use review::{ReviewState, ScheduledReview};
pub use reward::{CollectedCard, Pack, PackSource, PackType, Rank, Rarity, Streak};
