//! Primary/secondary content chaining.

use async_trait::async_trait;
use std::collections::HashSet;
use strictly_pairs::{CardContent, ContentError, ContentSource, Theme};
use tracing::{instrument, warn};

/// Tries `primary` first and tops up from `secondary`.
///
/// A primary failure is logged and treated as an empty result. Only items
/// with distinct content ids count towards `count`, from either source.
#[derive(Debug, Clone, derive_new::new)]
pub struct FallbackSource<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> FallbackSource<P, S> {
    /// The preferred source.
    pub fn primary(&self) -> &P {
        &self.primary
    }

    /// The source used to fill gaps.
    pub fn secondary(&self) -> &S {
        &self.secondary
    }
}

#[async_trait]
impl<P, S> ContentSource for FallbackSource<P, S>
where
    P: ContentSource,
    S: ContentSource,
{
    #[instrument(skip(self))]
    async fn fetch_content(&self, count: usize, theme: Theme) -> Result<Vec<CardContent>, ContentError> {
        let mut items = match self.primary.fetch_content(count, theme).await {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "Primary content source failed, using fallback");
                Vec::new()
            }
        };
        let mut seen = HashSet::new();
        items.retain(|c| seen.insert(c.content_id.clone()));
        items.truncate(count);

        if items.len() >= count {
            return Ok(items);
        }

        let missing = count - items.len();
        warn!(missing, "Topping up content from fallback source");

        let extra = self.secondary.fetch_content(count, theme).await?;
        items.extend(
            extra
                .into_iter()
                .filter(|c| seen.insert(c.content_id.clone()))
                .take(missing),
        );
        Ok(items)
    }
}
