//! The built-in catalog can deal every level in every theme.

use strictly_pairs::{CardContent, GameSession, LevelSpec, ManualScheduler, SessionConfig, Theme};
use strictly_pairs_content::{CatalogSource, FallbackSource, RawgConfig, RawgSource, glyph};
use strum::IntoEnumIterator;

#[tokio::test]
async fn test_every_theme_deals_the_largest_board() {
    for theme in Theme::iter() {
        let config = SessionConfig::default().with_theme(theme).with_level(13).with_seed(3);
        let session = GameSession::start(config, CatalogSource::builtin(), ManualScheduler::new())
            .await
            .expect("catalog covers the largest level");
        let spec = LevelSpec::for_level(13);
        assert_eq!(session.state().cards().len(), spec.card_count());
        assert!(
            session
                .state()
                .cards()
                .iter()
                .all(|c| glyph(&c.image_ref).is_some())
        );
    }
}

#[tokio::test]
async fn test_unreachable_rawg_falls_back_to_catalog() {
    // Port 9 on localhost refuses connections, so the primary always fails.
    let rawg = RawgSource::new(RawgConfig::new("http://127.0.0.1:9/api", "none"));
    let source = FallbackSource::new(rawg, CatalogSource::builtin());
    let session = GameSession::start(SessionConfig::default().with_seed(1), source, ManualScheduler::new())
        .await
        .expect("fallback supplies the board");
    assert_eq!(session.state().cards().len(), 16);
}

#[tokio::test]
async fn test_duplicate_primary_content_is_topped_up_from_catalog() {
    // Eight items but only seven distinct ids.
    let primary = CatalogSource::from_items(
        ["a", "b", "c", "d", "e", "f", "g", "a"]
            .iter()
            .map(|id| CardContent::new(*id, *id, "img"))
            .collect(),
    );
    let source = FallbackSource::new(primary, CatalogSource::builtin());
    let session = GameSession::start(SessionConfig::default().with_seed(8), source, ManualScheduler::new())
        .await
        .expect("catalog fills the missing pair");
    assert_eq!(session.state().cards().len(), 16);
}
