//! RAWG video-game database as a content source.
//!
//! Each theme maps to a RAWG genre and tag query; the top-rated games with
//! a Metacritic score of at least 75 become the card faces.

use async_trait::async_trait;
use derive_getters::Getters;
use serde::Deserialize;
use strictly_pairs::{CardContent, ContentError, ContentSource, Theme};
use tracing::{debug, info, instrument, warn};

/// Public RAWG API root.
pub const DEFAULT_BASE_URL: &str = "https://api.rawg.io/api";

/// Artwork used when a game has no background image.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x300?text=No+Image";

/// RAWG genre id and tag list for a theme.
pub fn theme_query(theme: Theme) -> (u32, &'static str) {
    match theme {
        Theme::Vaporwave => (51, "cyberpunk,synthwave"),
        Theme::Fantasy => (51, "fantasy,magic,medieval"),
        Theme::Horror => (3, "horror,survival-horror,zombie"),
        Theme::Oldstyle => (4, "retro,classic,arcade"),
        Theme::Retro => (83, "platformer,indie,pixel-graphics"),
    }
}

/// Connection settings for RAWG.
#[derive(Debug, Clone, Getters, derive_new::new)]
pub struct RawgConfig {
    /// API root, without trailing slash.
    #[new(into)]
    base_url: String,
    /// RAWG API key.
    #[new(into)]
    api_key: String,
}

/// Content source backed by the RAWG `/games` endpoint.
#[derive(Debug, Clone)]
pub struct RawgSource {
    config: RawgConfig,
    client: reqwest::Client,
}

impl RawgSource {
    /// Creates a source with its own HTTP client.
    #[instrument(skip(config), fields(base_url = %config.base_url()))]
    pub fn new(config: RawgConfig) -> Self {
        info!("Creating RAWG content source");
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Request URL for `count` games of `theme`.
    pub fn games_url(&self, count: usize, theme: Theme) -> String {
        let (genre, tags) = theme_query(theme);
        format!(
            "{}/games?key={}&genres={}&tags={}&page_size={}&ordering=-rating&metacritic=75,100",
            self.config.base_url().trim_end_matches('/'),
            self.config.api_key(),
            genre,
            tags,
            count
        )
    }
}

#[async_trait]
impl ContentSource for RawgSource {
    #[instrument(skip(self))]
    async fn fetch_content(&self, count: usize, theme: Theme) -> Result<Vec<CardContent>, ContentError> {
        let url = self.games_url(count, theme);
        debug!("Sending request to RAWG");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ContentError::new(format!("RAWG request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ContentError::new(format!("Failed to read RAWG response: {}", e)))?;

        if !status.is_success() {
            return Err(ContentError::new(format!(
                "RAWG returned {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let items = parse_games(&body)?;
        if items.len() < count {
            warn!(requested = count, received = items.len(), "RAWG returned fewer games than requested");
        }
        info!(received = items.len(), "Fetched games from RAWG");
        Ok(items)
    }
}

/// One game in a RAWG `/games` page. Every field may be missing.
#[derive(Debug, Deserialize)]
struct RawgGame {
    id: Option<u64>,
    name: Option<String>,
    background_image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GamesPage {
    #[serde(default)]
    results: Vec<RawgGame>,
}

/// Parses a RAWG `/games` response body into card content.
///
/// Missing ids fall back to the result index, missing names to
/// `"Game {n}"` and missing artwork to [`PLACEHOLDER_IMAGE`].
pub fn parse_games(body: &str) -> Result<Vec<CardContent>, ContentError> {
    let page: GamesPage = serde_json::from_str(body)
        .map_err(|e| ContentError::new(format!("Failed to parse RAWG response: {}", e)))?;

    Ok(page
        .results
        .into_iter()
        .enumerate()
        .map(|(index, game)| {
            CardContent::new(
                game.id.unwrap_or(index as u64),
                game.name.unwrap_or_else(|| format!("Game {}", index + 1)),
                game.background_image
                    .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_pairs::ContentId;

    #[test]
    fn test_url_per_theme() {
        let source = RawgSource::new(RawgConfig::new("https://rawg.test/api/", "k3y"));
        assert_eq!(
            source.games_url(8, Theme::Horror),
            "https://rawg.test/api/games?key=k3y&genres=3&tags=horror,survival-horror,zombie&page_size=8&ordering=-rating&metacritic=75,100"
        );
        assert!(source.games_url(20, Theme::Retro).contains("genres=83"));
    }

    #[test]
    fn test_config_accessors() {
        let config = RawgConfig::new(DEFAULT_BASE_URL, "k3y");
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.api_key(), "k3y");
    }

    #[test]
    fn test_parse_full_results() {
        let body = r#"{"count": 2, "results": [
            {"id": 3328, "name": "The Witcher 3", "background_image": "https://media/w3.jpg"},
            {"id": 4200, "name": "Portal 2", "background_image": "https://media/p2.jpg"}
        ]}"#;
        let items = parse_games(body).expect("parses");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].content_id, ContentId::from("3328"));
        assert_eq!(items[1].display_name, "Portal 2");
    }

    #[test]
    fn test_parse_fills_missing_fields() {
        let body = r#"{"results": [{"id": null, "name": null, "background_image": null}, {}]}"#;
        let items = parse_games(body).expect("parses");
        assert_eq!(items[0].content_id, ContentId::from("0"));
        assert_eq!(items[0].display_name, "Game 1");
        assert_eq!(items[0].image_ref, PLACEHOLDER_IMAGE);
        assert_eq!(items[1].content_id, ContentId::from("1"));
        assert_eq!(items[1].display_name, "Game 2");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_games("<html>rate limited</html>").is_err());
    }

    #[test]
    fn test_missing_results_is_empty() {
        assert!(parse_games("{}").expect("parses").is_empty());
    }
}
