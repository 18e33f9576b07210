//! JSON content loading.
//!
//! A content directory holds any number of `*.json` files, each containing an
//! array of content items. Files are read in name order so the resulting bank
//! is stable across runs.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::bank::MemoryBank;
use crate::domain::ContentItem;
use crate::validation::normalize_text;

/// Error loading content files.
#[derive(Debug, thiserror::Error)]
pub enum ContentLoadError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid content: {0}")]
    Invalid(String),
}

impl ContentLoadError {
    /// Returns a user-friendly message without exposing internal paths.
    pub fn user_message(&self) -> &'static str {
        match self {
            ContentLoadError::Io { .. } => "Failed to read content file",
            ContentLoadError::Parse { .. } => "Failed to parse content file",
            ContentLoadError::Invalid(_) => "Content file contains an invalid item",
        }
    }
}

/// Load every `*.json` file in `dir` into one bank.
///
/// Unreadable or invalid files are skipped with a warning; only a missing or
/// unreadable directory is an error.
pub fn load_bank_from_dir(dir: &Path) -> Result<MemoryBank, ContentLoadError> {
    let entries = fs::read_dir(dir).map_err(|source| ContentLoadError::Io {
        path: dir.display().to_string(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("json"))
        .collect();
    paths.sort();

    let mut bank = MemoryBank::default();
    let mut seen_ids = HashSet::new();

    for path in paths {
        match load_items_from_file(&path) {
            Ok(items) => {
                let before = bank.len();
                bank.extend(items.into_iter().filter(|item| {
                    let fresh = seen_ids.insert(item.id.clone());
                    if !fresh {
                        tracing::warn!("Duplicate content id {} in {}, skipping", item.id, path.display());
                    }
                    fresh
                }));
                tracing::debug!("Loaded {} items from {}", bank.len() - before, path.display());
            }
            Err(e) => {
                tracing::warn!("Failed to load content from {}: {}", path.display(), e);
            }
        }
    }

    Ok(bank)
}

/// Load a single JSON file as a bank.
pub fn load_bank_from_file(path: &Path) -> Result<MemoryBank, ContentLoadError> {
    load_items_from_file(path).map(MemoryBank::from_items)
}

fn load_items_from_file(path: &Path) -> Result<Vec<ContentItem>, ContentLoadError> {
    let content = fs::read_to_string(path).map_err(|source| ContentLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let items: Vec<ContentItem> = serde_json::from_str(&content).map_err(|source| ContentLoadError::Parse {
        path: path.display().to_string(),
        source,
    })?;

    for item in &items {
        validate_item(item)?;
    }

    Ok(items)
}

/// Validate a content item definition.
fn validate_item(item: &ContentItem) -> Result<(), ContentLoadError> {
    if item.id.trim().is_empty() {
        return Err(ContentLoadError::Invalid("Content item missing ID".to_string()));
    }
    if normalize_text(&item.english).is_empty() {
        return Err(ContentLoadError::Invalid(format!(
            "Content item {} missing English text",
            item.id
        )));
    }
    if normalize_text(&item.spanish).is_empty() {
        return Err(ContentLoadError::Invalid(format!(
            "Content item {} missing Spanish text",
            item.id
        )));
    }
    if item.theme.trim().is_empty() {
        return Err(ContentLoadError::Invalid(format!("Content item {} missing theme", item.id)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentBank;
    use crate::domain::{ContentKind, Level};
    use tempfile::TempDir;

    const GAMING_JSON: &str = r#"[
        {
            "id": "g-001",
            "english": "dragon",
            "spanish": "dragón",
            "type": "vocabulary",
            "theme": "gaming",
            "level": "beginner",
            "example_en": "The dragon guards the castle.",
            "example_es": "El dragón protege el castillo."
        },
        {
            "id": "g-002",
            "english": "Game over!",
            "spanish": "¡Fin del juego!",
            "type": "phrase",
            "theme": "gaming",
            "level": "beginner",
            "distractors_en": ["Level up!", "Press start!", "New record!"]
        }
    ]"#;

    #[test]
    fn test_parse_content_item_json() {
        let items: Vec<ContentItem> = serde_json::from_str(GAMING_JSON).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].kind, ContentKind::Vocabulary);
        assert_eq!(items[0].level, Level::Beginner);
        assert_eq!(items[0].example_pair().1, "El dragón protege el castillo.");
        assert_eq!(items[1].kind, ContentKind::Phrase);
        assert_eq!(items[1].distractors_en.as_ref().map(Vec::len), Some(3));
        assert!(items[1].hint.is_none());
    }

    #[test]
    fn test_load_bank_from_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("gaming.json"), GAMING_JSON).unwrap();
        fs::write(dir.path().join("notes.txt"), "not content").unwrap();
        fs::write(dir.path().join("broken.json"), "{ nope").unwrap();

        let bank = load_bank_from_dir(dir.path()).unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.by_theme("gaming").len(), 2);
    }

    #[test]
    fn test_load_bank_skips_duplicate_ids() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.json"), GAMING_JSON).unwrap();
        fs::write(dir.path().join("b.json"), GAMING_JSON).unwrap();

        let bank = load_bank_from_dir(dir.path()).unwrap();
        assert_eq!(bank.len(), 2);
    }

    #[test]
    fn test_load_bank_missing_dir() {
        let dir = TempDir::new().unwrap();
        let err = load_bank_from_dir(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, ContentLoadError::Io { .. }));
        assert_eq!(err.user_message(), "Failed to read content file");
    }

    #[test]
    fn test_load_bank_from_file_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "[{\"id\": 1}]").unwrap();

        let err = load_bank_from_file(&path).unwrap_err();
        assert!(matches!(err, ContentLoadError::Parse { .. }));
        assert!(!err.user_message().contains("bad.json"));
    }

    #[test]
    fn test_validate_item_rejects_blank_fields() {
        let item = ContentItem::new("g-1", "", "dragón", ContentKind::Vocabulary, "gaming", Level::Beginner);
        assert!(matches!(validate_item(&item), Err(ContentLoadError::Invalid(_))));

        let item = ContentItem::new(" ", "dragon", "dragón", ContentKind::Vocabulary, "gaming", Level::Beginner);
        assert!(validate_item(&item).is_err());

        // Punctuation alone cannot be told apart from placeholder options
        let item = ContentItem::new("g-1", "...", "¿?", ContentKind::Vocabulary, "gaming", Level::Beginner);
        assert!(validate_item(&item).is_err());

        let item = ContentItem::new("g-1", "dragon", "dragón", ContentKind::Vocabulary, "gaming", Level::Beginner);
        assert!(validate_item(&item).is_ok());
    }
}
