//! Session building: turns bank content into a shuffled, type-varied list of
//! concrete exercises.
//!
//! Content is chosen with graceful widening:
//! 1. Theme and level, minus excluded words
//! 2. Whole theme, minus excluded words (when fewer than `2 × count` items)
//! 3. Whole theme, exclusions ignored (when fewer than `count` items)

use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

use super::prompts;
use crate::config::{DISTRACTOR_COUNT, MATCHING_PAIRS, PLACEHOLDER_OPTIONS};
use crate::content::ContentBank;
use crate::domain::{
  ContentItem, Exercise, ExerciseType, FillBlank, Level, MatchPair, Matching, MultipleChoice, Prompt,
  TranslatePhrase, TranslationDirection, WordBuilder,
};
use crate::validation::normalize_text;

/// Exercise kinds in session order, repeated or truncated to the session size
pub const TYPE_CYCLE: [ExerciseType; 7] = [
  ExerciseType::Vocabulary,
  ExerciseType::WordBuilder,
  ExerciseType::FillBlank,
  ExerciseType::Matching,
  ExerciseType::TranslatePhrase,
  ExerciseType::Listening,
  ExerciseType::Vocabulary,
];

/// Filler words offered as wrong tiles in phrase ordering
const CLOSED_CLASS_WORDS: [&str; 14] = [
  "the", "a", "is", "are", "was", "it", "at", "on", "in", "to", "for", "my", "we", "they",
];

const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Type for each slot of a session of `count` exercises
pub fn type_distribution(count: usize) -> Vec<ExerciseType> {
  TYPE_CYCLE.iter().copied().cycle().take(count).collect()
}

/// Build a session of `count` exercises for a theme and level.
///
/// `exclude_words` holds English text of items to skip (already learned and
/// not yet due); matching ignores case and punctuation. Returns an empty list
/// only when the theme has no content at all.
pub fn build_session<B, R>(
  bank: &B,
  theme: &str,
  level: Level,
  count: usize,
  exclude_words: &[String],
  rng: &mut R,
) -> Vec<Exercise>
where
  B: ContentBank + ?Sized,
  R: Rng + ?Sized,
{
  if count == 0 {
    return Vec::new();
  }

  let mut pool = select_pool(bank, theme, level, count, exclude_words);
  if pool.is_empty() {
    tracing::warn!("No content for theme '{}', returning an empty session", theme);
    return Vec::new();
  }

  pool.shuffle(rng);

  let mut exercises: Vec<Exercise> = type_distribution(count)
    .into_iter()
    .enumerate()
    .map(|(i, exercise_type)| {
      let item = &pool[i % pool.len()];
      create_exercise(exercise_type, item, &pool, theme, rng)
    })
    .collect();

  exercises.shuffle(rng);

  tracing::debug!(
    "Built {} exercises for {}/{} from a pool of {}",
    exercises.len(),
    theme,
    level.as_str(),
    pool.len()
  );

  exercises
}

fn select_pool<B: ContentBank + ?Sized>(
  bank: &B,
  theme: &str,
  level: Level,
  count: usize,
  exclude_words: &[String],
) -> Vec<ContentItem> {
  let excluded: HashSet<String> = exclude_words.iter().map(|w| normalize_text(w)).collect();
  let allowed = |item: &ContentItem| answerable(item) && !excluded.contains(&normalize_text(&item.english));

  let mut pool: Vec<ContentItem> = bank
    .by_theme_and_level(theme, level)
    .into_iter()
    .filter(|item| allowed(item))
    .collect();

  if pool.len() < count.saturating_mul(2) {
    tracing::debug!(
      "Only {} items at {}/{}, widening to all levels",
      pool.len(),
      theme,
      level.as_str()
    );
    pool = bank.by_theme(theme).into_iter().filter(|item| allowed(item)).collect();
  }

  if pool.len() < count {
    tracing::debug!("Only {} unexcluded items in {}, ignoring exclusions", pool.len(), theme);
    pool = bank.by_theme(theme).into_iter().filter(answerable).collect();
  }

  pool
}

/// Punctuation-only text would be graded equal to the placeholder options
fn answerable(item: &ContentItem) -> bool {
  !normalize_text(&item.english).is_empty() && !normalize_text(&item.spanish).is_empty()
}

fn create_exercise<R: Rng + ?Sized>(
  exercise_type: ExerciseType,
  item: &ContentItem,
  pool: &[ContentItem],
  theme: &str,
  rng: &mut R,
) -> Exercise {
  match exercise_type {
    ExerciseType::Vocabulary => vocabulary_exercise(item, pool, theme, rng),
    ExerciseType::Listening => listening_exercise(item, pool, rng),
    ExerciseType::WordBuilder => word_builder_exercise(item, theme, rng),
    ExerciseType::FillBlank => fill_blank_exercise(item, pool, theme, rng),
    ExerciseType::Matching => matching_exercise(pool, rng),
    ExerciseType::TranslatePhrase => translate_phrase_exercise(item, theme, rng),
  }
}

// ============================================================================
// Exercise kinds
// ============================================================================

fn vocabulary_exercise<R: Rng + ?Sized>(
  item: &ContentItem,
  pool: &[ContentItem],
  theme: &str,
  rng: &mut R,
) -> Exercise {
  let direction = if rng.random_bool(0.5) {
    TranslationDirection::EnToEs
  } else {
    TranslationDirection::EsToEn
  };

  let others = pool.iter().filter(|c| c.id != item.id);
  let (correct, precomputed, candidates, question_es) = match direction {
    TranslationDirection::EnToEs => (
      &item.spanish,
      item.distractors_es.as_deref(),
      others.map(|c| c.spanish.clone()).collect::<Vec<_>>(),
      prompts::vocab_question_en_to_es(&item.english, rng),
    ),
    TranslationDirection::EsToEn => (
      &item.english,
      item.distractors_en.as_deref(),
      others.map(|c| c.english.clone()).collect::<Vec<_>>(),
      prompts::vocab_question_es_to_en(&item.spanish, rng),
    ),
  };

  let distractors = pick_distractors(correct, precomputed.unwrap_or_default(), candidates, rng);
  let (options, correct_index) = shuffle_with_correct(correct, distractors, rng);

  Exercise::Vocabulary(MultipleChoice {
    prompt: Prompt {
      content_id: item.id.clone(),
      word: item.english.clone(),
      emoji: prompts::theme_emoji(theme, rng),
      english: item.english.clone(),
      spanish: item.spanish.clone(),
      hint: item.hint.clone(),
      question_es,
    },
    direction,
    options,
    correct_index,
  })
}

/// Listen to the English sentence, pick its Spanish meaning
fn listening_exercise<R: Rng + ?Sized>(item: &ContentItem, pool: &[ContentItem], rng: &mut R) -> Exercise {
  let (text, answer) = item.sentence_pair();

  let candidates = pool
    .iter()
    .filter(|c| c.id != item.id)
    .map(|c| c.sentence_pair().1.to_string())
    .collect();
  let distractors = pick_distractors(answer, &[], candidates, rng);
  let (options, correct_index) = shuffle_with_correct(answer, distractors, rng);

  let hint = item
    .hint
    .clone()
    .unwrap_or_else(|| format!("\"{}\" = {}", item.english, item.spanish));

  Exercise::Listening(MultipleChoice {
    prompt: Prompt {
      content_id: item.id.clone(),
      word: item.english.clone(),
      emoji: prompts::LISTENING_EMOJI.to_string(),
      english: text.to_string(),
      spanish: answer.to_string(),
      hint: Some(hint),
      question_es: prompts::listening_question(rng),
    },
    direction: TranslationDirection::EnToEs,
    options,
    correct_index,
  })
}

fn word_builder_exercise<R: Rng + ?Sized>(item: &ContentItem, theme: &str, rng: &mut R) -> Exercise {
  let answer = item
    .english
    .split_whitespace()
    .next()
    .unwrap_or_default()
    .to_uppercase();
  let target: Vec<char> = answer.chars().collect();

  let distractor_count = 8usize.saturating_sub(target.len()).clamp(2, 3);
  let mut extra: Vec<char> = ALPHABET.chars().filter(|c| !target.contains(c)).collect();
  extra.shuffle(rng);
  extra.truncate(distractor_count);

  let mut letters = target.clone();
  letters.extend(extra);
  letters.shuffle(rng);

  let hint = item
    .hint
    .clone()
    .unwrap_or_else(|| format!("💡 Tiene {} letras", target.len()));

  Exercise::WordBuilder(WordBuilder {
    prompt: Prompt {
      content_id: item.id.clone(),
      word: item.english.clone(),
      emoji: prompts::theme_emoji(theme, rng),
      english: item.english.clone(),
      spanish: item.spanish.clone(),
      hint: Some(hint),
      question_es: prompts::word_builder_question(&item.spanish, rng),
    },
    letters,
    answer,
  })
}

fn fill_blank_exercise<R: Rng + ?Sized>(
  item: &ContentItem,
  pool: &[ContentItem],
  theme: &str,
  rng: &mut R,
) -> Exercise {
  let sentence = item
    .example_en
    .as_deref()
    .and_then(|example| blank_out_word(example, &item.english))
    .unwrap_or_else(|| format!("I like ___. ({})", item.spanish));

  let candidates = pool
    .iter()
    .filter(|c| c.id != item.id && c.is_vocabulary())
    .map(|c| c.english.clone())
    .collect();
  let distractors = pick_distractors(&item.english, &[], candidates, rng);
  let (options, correct_index) = shuffle_with_correct(&item.english, distractors, rng);

  Exercise::FillBlank(FillBlank {
    prompt: Prompt {
      content_id: item.id.clone(),
      word: item.english.clone(),
      emoji: prompts::theme_emoji(theme, rng),
      english: item.english.clone(),
      spanish: item.spanish.clone(),
      hint: item.hint.clone(),
      question_es: prompts::fill_blank_question(rng),
    },
    sentence,
    options,
    correct_index,
  })
}

fn matching_exercise<R: Rng + ?Sized>(pool: &[ContentItem], rng: &mut R) -> Exercise {
  let mut vocab: Vec<&ContentItem> = pool.iter().filter(|c| c.is_vocabulary()).collect();
  vocab.shuffle(rng);

  let mut chosen: Vec<&ContentItem> = Vec::with_capacity(MATCHING_PAIRS);
  let mut seen = HashSet::new();

  // Vocabulary first, then pad from the rest of the pool
  for item in vocab.into_iter().chain(pool.iter()) {
    if chosen.len() == MATCHING_PAIRS {
      break;
    }
    if seen.insert(normalize_text(&item.english)) {
      chosen.push(item);
    }
  }

  Exercise::Matching(Matching {
    emoji: prompts::MATCHING_EMOJI.to_string(),
    english: "matching".to_string(),
    spanish: "emparejar".to_string(),
    pairs: chosen
      .into_iter()
      .map(|item| MatchPair {
        en: item.english.clone(),
        es: item.spanish.clone(),
      })
      .collect(),
  })
}

fn translate_phrase_exercise<R: Rng + ?Sized>(item: &ContentItem, theme: &str, rng: &mut R) -> Exercise {
  let (phrase, spanish) = item.sentence_pair();
  let answer = phrase_tokens(phrase);

  let lowered: HashSet<String> = answer.iter().map(|w| w.to_lowercase()).collect();
  let mut distractors: Vec<String> = CLOSED_CLASS_WORDS
    .iter()
    .filter(|w| !lowered.contains(**w))
    .map(|w| w.to_string())
    .collect();
  distractors.shuffle(rng);
  distractors.truncate(6usize.saturating_sub(answer.len()).clamp(2, 3));

  let mut tiles = answer.clone();
  tiles.extend(distractors.iter().cloned());
  tiles.shuffle(rng);

  Exercise::TranslatePhrase(TranslatePhrase {
    prompt: Prompt {
      content_id: item.id.clone(),
      word: item.english.clone(),
      emoji: prompts::theme_emoji(theme, rng),
      english: phrase.to_string(),
      spanish: spanish.to_string(),
      hint: item.hint.clone(),
      question_es: prompts::translate_question(spanish, rng),
    },
    tiles,
    answer,
    distractors,
  })
}

// ============================================================================
// Helpers
// ============================================================================

/// Split a phrase into word tiles, dropping `! ? . ,`
pub fn phrase_tokens(phrase: &str) -> Vec<String> {
  phrase
    .chars()
    .filter(|c| !matches!(c, '!' | '?' | '.' | ','))
    .collect::<String>()
    .split_whitespace()
    .map(str::to_string)
    .collect()
}

/// Replace the first whole-word, case-insensitive occurrence of `word` in
/// `sentence` with `___`. `None` when the word does not appear.
pub fn blank_out_word(sentence: &str, word: &str) -> Option<String> {
  let haystack: Vec<char> = sentence.chars().collect();
  let needle: Vec<char> = word.trim().chars().collect();
  if needle.is_empty() || needle.len() > haystack.len() {
    return None;
  }

  let is_word_char = |c: char| c.is_alphanumeric() || c == '_';
  let same = |a: char, b: char| a == b || a.to_lowercase().eq(b.to_lowercase());

  (0..=haystack.len() - needle.len())
    .find(|&start| {
      let end = start + needle.len();
      let matches = haystack[start..end].iter().zip(&needle).all(|(a, b)| same(*a, *b));
      let left_ok = start == 0 || !is_word_char(haystack[start - 1]);
      let right_ok = end == haystack.len() || !is_word_char(haystack[end]);
      matches && left_ok && right_ok
    })
    .map(|start| {
      let end = start + needle.len();
      let mut out: String = haystack[..start].iter().collect();
      out.push_str("___");
      out.extend(&haystack[end..]);
      out
    })
}

/// Choose up to `DISTRACTOR_COUNT` distractors.
///
/// Precomputed distractors come first in their given order, then random pool
/// candidates. The correct answer and duplicates are skipped (normalized).
fn pick_distractors<R: Rng + ?Sized>(
  correct: &str,
  precomputed: &[String],
  mut candidates: Vec<String>,
  rng: &mut R,
) -> Vec<String> {
  let mut seen: HashSet<String> = HashSet::new();
  seen.insert(normalize_text(correct));

  let mut distractors = Vec::with_capacity(DISTRACTOR_COUNT);

  // --- Phase 1: Precomputed on the item ---
  for option in precomputed {
    if distractors.len() == DISTRACTOR_COUNT {
      return distractors;
    }
    if !option.trim().is_empty() && seen.insert(normalize_text(option)) {
      distractors.push(option.clone());
    }
  }

  // --- Phase 2: Random pool answers ---
  candidates.shuffle(rng);
  for option in candidates {
    if distractors.len() == DISTRACTOR_COUNT {
      break;
    }
    if !option.trim().is_empty() && seen.insert(normalize_text(&option)) {
      distractors.push(option);
    }
  }

  distractors
}

/// Pad to exactly four options and shuffle, tracking where the answer lands
pub fn shuffle_with_correct<R: Rng + ?Sized>(
  correct: &str,
  mut distractors: Vec<String>,
  rng: &mut R,
) -> (Vec<String>, usize) {
  distractors.truncate(DISTRACTOR_COUNT);

  let missing = DISTRACTOR_COUNT - distractors.len();
  let padding: Vec<String> = PLACEHOLDER_OPTIONS
    .iter()
    .map(|p| p.to_string())
    .chain((4..).map(|n| ".".repeat(n)))
    .filter(|p| p != correct && !distractors.contains(p))
    .take(missing)
    .collect();
  distractors.extend(padding);

  let mut tagged: Vec<(bool, String)> = Vec::with_capacity(DISTRACTOR_COUNT + 1);
  tagged.push((true, correct.to_string()));
  tagged.extend(distractors.into_iter().map(|d| (false, d)));
  tagged.shuffle(rng);

  let correct_index = tagged.iter().position(|(is_correct, _)| *is_correct).unwrap_or(0);
  let options = tagged.into_iter().map(|(_, option)| option).collect();
  (options, correct_index)
}
