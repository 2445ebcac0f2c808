//! Core domain types for the pairs game.

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};

/// Opaque identifier of a piece of card content (one per pair).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    /// Creates a content id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for ContentId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// Identifier of a single card instance.
///
/// Two cards share a [`ContentId`] but never a `CardId`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Creates a card id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Builds the id of the `ordinal`-th copy (1 or 2) of a piece of content.
    pub fn for_copy(content_id: &ContentId, ordinal: u8) -> Self {
        Self(format!("{}-{}", content_id, ordinal))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Inert payload supplied by a content source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct CardContent {
    /// Identity shared by both cards of a pair.
    #[new(into)]
    pub content_id: ContentId,
    /// Name shown on the card face.
    #[new(into)]
    pub display_name: String,
    /// Reference to the card artwork (URL or glyph).
    #[new(into)]
    pub image_ref: String,
}

/// A single card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique id of this card instance.
    pub card_id: CardId,
    /// Identity shared with the other card of the pair.
    pub content_id: ContentId,
    /// Name shown on the card face.
    pub display_name: String,
    /// Reference to the card artwork.
    pub image_ref: String,
    /// Face up.
    pub is_flipped: bool,
    /// Part of a resolved matching pair.
    pub is_matched: bool,
}

impl Card {
    /// Creates a face-down, unmatched copy of `content`.
    pub fn face_down(content: &CardContent, ordinal: u8) -> Self {
        Self {
            card_id: CardId::for_copy(&content.content_id, ordinal),
            content_id: content.content_id.clone(),
            display_name: content.display_name.clone(),
            image_ref: content.image_ref.clone(),
            is_flipped: false,
            is_matched: false,
        }
    }

    /// Face up or matched.
    pub fn is_visible(&self) -> bool {
        self.is_flipped || self.is_matched
    }
}

/// Visual theme, also used as the hint passed to content sources.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    /// Neon cyberpunk look (default).
    #[default]
    Vaporwave,
    /// Magic and medieval.
    Fantasy,
    /// Survival horror.
    Horror,
    /// Classic arcade.
    Oldstyle,
    /// Pixel-art platformers.
    Retro,
}

impl Theme {
    /// Upper-case name used in edition banners.
    pub fn display_name(self) -> &'static str {
        match self {
            Theme::Vaporwave => "VAPORWAVE",
            Theme::Fantasy => "FANTASY",
            Theme::Horror => "HORROR",
            Theme::Oldstyle => "OLD STYLE",
            Theme::Retro => "RETRO",
        }
    }
}
