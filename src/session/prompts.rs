//! Cosmetic prompt text: theme emoji and varied Spanish question templates.

use rand::Rng;
use rand::seq::IndexedRandom;

const DEFAULT_EMOJI: &str = "📚";
pub const LISTENING_EMOJI: &str = "🎧";
pub const MATCHING_EMOJI: &str = "🎯";

fn theme_emojis(theme: &str) -> &'static [&'static str] {
  match theme {
    "gaming" => &["🎮", "🕹️", "👾", "🏆", "⚡", "💎", "🎯", "🐉"],
    "sports" => &["⚽", "🏀", "🏃", "🥇", "💪", "⚡", "🏟️", "🔥"],
    "movies" => &["🎬", "🍿", "🎭", "⭐", "🎥", "🦸", "👻", "🤖"],
    "music" => &["🎵", "🎸", "🥁", "🎤", "🎶", "💃", "🎧", "🌟"],
    "daily-life" => &["🏠", "☀️", "😊", "🌈", "🐶", "💛", "🌸", "✨"],
    "school" => &["🎓", "📚", "✏️", "🧠", "🌟", "💡", "🎒", "🔬"],
    "food" => &["🍕", "🍰", "🍎", "🧁", "🍔", "🥤", "🌮", "🍫"],
    "travel" => &["✈️", "🗺️", "🏖️", "🌍", "🚀", "🧳", "🏔️", "🌅"],
    _ => &[DEFAULT_EMOJI],
  }
}

/// Random emoji for a theme, `📚` for unknown themes
pub fn theme_emoji<R: Rng + ?Sized>(theme: &str, rng: &mut R) -> String {
  pick(theme_emojis(theme), rng).to_string()
}

// Templates use `{}` as the single substitution point

const VOCAB_EN_TO_ES: &[&str] = &[
  "🤔 ¿Qué significa \"{}\"?",
  "🧠 ¡Piensa rápido! ¿\"{}\" es...?",
  "🔎 Descubre: ¿qué es \"{}\"?",
  "💡 ¿Sabes qué quiere decir \"{}\"?",
  "🎯 Apunta bien: \"{}\" significa...",
];

const VOCAB_ES_TO_EN: &[&str] = &[
  "🇬🇧 ¿Cómo se dice \"{}\" en inglés?",
  "🚀 ¡Traduce! \"{}\" es...",
  "🧩 Elige la traducción de \"{}\"",
  "⭐ ¿\"{}\" en inglés? ¡Tú puedes!",
  "🎮 ¡Power-up! Traduce \"{}\"",
];

const LISTENING: &[&str] = &[
  "🎧 ¡Escucha con atención! ¿Qué significa?",
  "👂 ¡Abre bien los oídos! ¿Qué han dicho?",
  "🔊 Escucha y elige la respuesta correcta",
  "🎵 ¡Presta atención! ¿Qué significa lo que oyes?",
];

const FILL_BLANK: &[&str] = &[
  "✏️ ¡Completa la frase!",
  "🧩 ¿Qué palabra falta aquí?",
  "🔮 Adivina la palabra que falta",
  "💡 ¡Pon la pieza que falta!",
];

const WORD_BUILDER: &[&str] = &[
  "🔤 ¡Construye la palabra! ({})",
  "🧱 ¡Ordena las letras! ({})",
  "🏗️ Forma la palabra: \"{}\"",
  "✨ ¡Las letras están revueltas! ({})",
];

const TRANSLATE: &[&str] = &[
  "🔄 Traduce: \"{}\"",
  "🧩 Ordena las palabras: \"{}\"",
  "🚀 ¡Traduce como un pro! \"{}\"",
  "⚡ ¡Rapidez! Traduce: \"{}\"",
];

pub fn vocab_question_en_to_es<R: Rng + ?Sized>(english: &str, rng: &mut R) -> String {
  fill(pick(VOCAB_EN_TO_ES, rng), english)
}

pub fn vocab_question_es_to_en<R: Rng + ?Sized>(spanish: &str, rng: &mut R) -> String {
  fill(pick(VOCAB_ES_TO_EN, rng), spanish)
}

pub fn listening_question<R: Rng + ?Sized>(rng: &mut R) -> String {
  pick(LISTENING, rng).to_string()
}

pub fn fill_blank_question<R: Rng + ?Sized>(rng: &mut R) -> String {
  pick(FILL_BLANK, rng).to_string()
}

pub fn word_builder_question<R: Rng + ?Sized>(spanish: &str, rng: &mut R) -> String {
  fill(pick(WORD_BUILDER, rng), spanish)
}

pub fn translate_question<R: Rng + ?Sized>(spanish: &str, rng: &mut R) -> String {
  fill(pick(TRANSLATE, rng), spanish)
}

fn pick<'a, R: Rng + ?Sized>(options: &'a [&'static str], rng: &mut R) -> &'a str {
  options.choose(rng).copied().unwrap_or(DEFAULT_EMOJI)
}

fn fill(template: &str, value: &str) -> String {
  template.replacen("{}", value, 1)
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::SeedableRng;
  use rand::rngs::StdRng;

  #[test]
  fn test_theme_emoji_known_and_unknown() {
    let mut rng = StdRng::seed_from_u64(1);
    let emoji = theme_emoji("gaming", &mut rng);
    assert!(theme_emojis("gaming").contains(&emoji.as_str()));
    assert_eq!(theme_emoji("knitting", &mut rng), "📚");
  }

  #[test]
  fn test_questions_include_word() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
      assert!(vocab_question_en_to_es("dragon", &mut rng).contains("dragon"));
      assert!(vocab_question_es_to_en("dragón", &mut rng).contains("dragón"));
      assert!(word_builder_question("espada", &mut rng).contains("espada"));
      assert!(translate_question("¡Fin del juego!", &mut rng).contains("¡Fin del juego!"));
    }
  }

  #[test]
  fn test_fixed_questions_come_from_templates() {
    let mut rng = StdRng::seed_from_u64(3);
    assert!(LISTENING.contains(&listening_question(&mut rng).as_str()));
    assert!(FILL_BLANK.contains(&fill_blank_question(&mut rng).as_str()));
  }
}
