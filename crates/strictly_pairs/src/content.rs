//! Content source boundary: where card names and artwork come from.

use crate::types::{CardContent, Theme};
use async_trait::async_trait;
use derive_more::{Display, Error};
use tracing::{error, instrument};

/// Supplies themed card content.
///
/// Sources should return at least `count` items with distinct content ids.
/// Returning fewer is allowed; the session then refuses to start the level.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetches up to `count` items for `theme`.
    async fn fetch_content(&self, count: usize, theme: Theme) -> Result<Vec<CardContent>, ContentError>;
}

#[async_trait]
impl<C: ContentSource + ?Sized> ContentSource for Box<C> {
    async fn fetch_content(&self, count: usize, theme: Theme) -> Result<Vec<CardContent>, ContentError> {
        (**self).fetch_content(count, theme).await
    }
}

#[async_trait]
impl<C: ContentSource + ?Sized> ContentSource for std::sync::Arc<C> {
    async fn fetch_content(&self, count: usize, theme: Theme) -> Result<Vec<CardContent>, ContentError> {
        (**self).fetch_content(count, theme).await
    }
}

/// Content source failure.
#[derive(Debug, Clone, Display, Error)]
#[display("Content error: {} at {}:{}", message, file, line)]
pub struct ContentError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ContentError {
    /// Creates a new content error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        let message = message.into();
        error!(error_message = %message, "Content error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
