//! Read-only access to learning content.

use std::collections::BTreeSet;

use crate::domain::{ContentItem, Level};

/// Source of content items for the session builder.
///
/// Implementations may be stale or remote; the builder only reads.
pub trait ContentBank {
    fn by_theme_and_level(&self, theme: &str, level: Level) -> Vec<ContentItem>;
    fn by_theme(&self, theme: &str) -> Vec<ContentItem>;
    fn all(&self) -> Vec<ContentItem>;
}

/// Content bank held entirely in memory, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryBank {
    items: Vec<ContentItem>,
}

impl MemoryBank {
    pub fn from_items(items: Vec<ContentItem>) -> Self {
        Self { items }
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = ContentItem>) {
        self.items.extend(items);
    }

    /// Distinct theme slugs, sorted
    pub fn themes(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|item| item.theme.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ContentBank for MemoryBank {
    fn by_theme_and_level(&self, theme: &str, level: Level) -> Vec<ContentItem> {
        self.items
            .iter()
            .filter(|item| item.theme == theme && item.level == level)
            .cloned()
            .collect()
    }

    fn by_theme(&self, theme: &str) -> Vec<ContentItem> {
        self.items
            .iter()
            .filter(|item| item.theme == theme)
            .cloned()
            .collect()
    }

    fn all(&self) -> Vec<ContentItem> {
        self.items.clone()
    }
}
