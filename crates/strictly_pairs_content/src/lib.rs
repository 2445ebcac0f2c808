//! Content sources for Strictly Pairs
//!
//! Implementations of [`strictly_pairs::ContentSource`]:
//!
//! - [`CatalogSource`]: built-in glyph catalog, works offline
//! - [`RawgSource`]: top-rated games from the RAWG database, per theme
//! - [`FallbackSource`]: chains a primary source with a backup

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod catalog;
mod fallback;
mod rawg;

// Crate-level exports
pub use catalog::{CatalogSource, glyph};
pub use fallback::FallbackSource;
pub use rawg::{DEFAULT_BASE_URL, PLACEHOLDER_IMAGE, RawgConfig, RawgSource, parse_games, theme_query};
