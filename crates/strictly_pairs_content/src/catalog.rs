//! Built-in offline catalog.

use async_trait::async_trait;
use strictly_pairs::{CardContent, ContentError, ContentSource, Theme};
use tracing::{debug, instrument};

/// Glyph cards shipped with the game: (id, name, glyph).
const BUILTIN: [(&str, &str, &str); 24] = [
    ("anchor", "Anchor", "⚓"),
    ("atom", "Atom", "⚛"),
    ("bolt", "Bolt", "⚡"),
    ("castle", "Castle", "♜"),
    ("club", "Club", "♣"),
    ("comet", "Comet", "☄"),
    ("crown", "Crown", "♛"),
    ("diamond", "Diamond", "♦"),
    ("dice", "Dice", "⚄"),
    ("flag", "Flag", "⚑"),
    ("flower", "Flower", "✿"),
    ("gear", "Gear", "⚙"),
    ("heart", "Heart", "♥"),
    ("hourglass", "Hourglass", "⌛"),
    ("key", "Key", "⚿"),
    ("knight", "Knight", "♞"),
    ("moon", "Moon", "☾"),
    ("music", "Music", "♫"),
    ("skull", "Skull", "☠"),
    ("snowflake", "Snowflake", "❄"),
    ("spade", "Spade", "♠"),
    ("star", "Star", "★"),
    ("sun", "Sun", "☀"),
    ("umbrella", "Umbrella", "☂"),
];

/// Serves content from a fixed in-memory list.
///
/// The built-in list is rotated per theme so each theme deals a different
/// selection; custom lists are served as given.
#[derive(Debug, Clone)]
pub struct CatalogSource {
    items: Vec<CardContent>,
    rotate_by_theme: bool,
}

impl CatalogSource {
    /// The shipped glyph catalog (24 items, enough for the largest level).
    pub fn builtin() -> Self {
        Self {
            items: BUILTIN
                .iter()
                .map(|(id, name, glyph)| CardContent::new(*id, *name, format!("glyph:{glyph}")))
                .collect(),
            rotate_by_theme: true,
        }
    }

    /// Serves exactly `items`, in order, regardless of theme.
    pub fn from_items(items: Vec<CardContent>) -> Self {
        Self {
            items,
            rotate_by_theme: false,
        }
    }

    /// Number of items available.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the catalog has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn offset(&self, theme: Theme) -> usize {
        if !self.rotate_by_theme || self.items.is_empty() {
            return 0;
        }
        (theme as usize * 5) % self.items.len()
    }
}

impl Default for CatalogSource {
    fn default() -> Self {
        Self::builtin()
    }
}

#[async_trait]
impl ContentSource for CatalogSource {
    #[instrument(skip(self), fields(available = self.items.len()))]
    async fn fetch_content(&self, count: usize, theme: Theme) -> Result<Vec<CardContent>, ContentError> {
        let offset = self.offset(theme);
        let items: Vec<CardContent> = self
            .items
            .iter()
            .cycle()
            .skip(offset)
            .take(count.min(self.items.len()))
            .cloned()
            .collect();
        debug!(served = items.len(), offset, "Served catalog content");
        Ok(items)
    }
}

/// Extracts the glyph from a `glyph:` image reference.
pub fn glyph(image_ref: &str) -> Option<&str> {
    image_ref.strip_prefix("glyph:")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_builtin_covers_largest_level() {
        let catalog = CatalogSource::builtin();
        let items = catalog.fetch_content(20, Theme::Vaporwave).await.expect("served");
        assert_eq!(items.len(), 20);
        let ids: HashSet<_> = items.iter().map(|c| c.content_id.clone()).collect();
        assert_eq!(ids.len(), 20);
    }

    #[tokio::test]
    async fn test_themes_rotate_selection() {
        let catalog = CatalogSource::builtin();
        let a = catalog.fetch_content(8, Theme::Vaporwave).await.expect("served");
        let b = catalog.fetch_content(8, Theme::Horror).await.expect("served");
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_short_catalog_under_supplies() {
        let catalog = CatalogSource::from_items(vec![CardContent::new("only", "Only", "img")]);
        let items = catalog.fetch_content(8, Theme::Retro).await.expect("served");
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_glyph_prefix() {
        assert_eq!(glyph("glyph:★"), Some("★"));
        assert_eq!(glyph("https://img"), None);
    }
}
