//! Fixtures for unit tests.
//!
//! Builds items, stores and a ready-to-drive engine over [`SimSurface`] with
//! the HTML renderer.

use crate::config::EngineConfig;
use crate::model::{Author, Content, Item, Media, MediaKind};
use crate::source::ItemStore;
use crate::state::FeedEngine;
use crate::view::{HtmlRenderer, SimConfig, SimSurface};
use crate::view_state::Viewport;

/// Engine type every unit test drives.
pub type SimEngine = FeedEngine<SimSurface, HtmlRenderer>;

/// Viewport used by default in tests.
pub const VIEWPORT: Viewport = Viewport {
    width: 1280.0,
    height: 800.0,
};

/// Height of a one-line text item in the default [`SimConfig`].
pub const TEXT_ITEM_HEIGHT: f64 = 120.0;

/// A post with a single short line of text.
pub fn text_item(text: &str) -> Item {
    Item {
        author: Author {
            name: "Tester".into(),
            screen_name: "tester".into(),
            ..Author::default()
        },
        content: Content {
            text: Some(text.into()),
            ..Content::default()
        },
        created_at: Some("2024-03-01T08:00:00.000Z".into()),
        ..Item::default()
    }
}

/// A post with a translation.
pub fn translated_item(text: &str, translation: &str) -> Item {
    let mut item = text_item(text);
    item.content.translation = Some(translation.into());
    item
}

/// A post with one media element of `kind`.
pub fn media_item(text: &str, kind: MediaKind) -> Item {
    let mut item = text_item(text);
    item.media.push(Media {
        kind,
        path: format!("media/{text}.bin"),
        thumb_path: None,
        aspect_ratio: None,
    });
    item
}

/// `n` one-line text posts.
pub fn text_items(n: usize) -> Vec<Item> {
    (0..n).map(|i| text_item(&format!("post {i}"))).collect()
}

/// Initialized engine over `items` with `config`, at scroll 0 and time 0.
pub fn engine_with(items: Vec<Item>, config: EngineConfig) -> SimEngine {
    let mut engine = FeedEngine::new(
        ItemStore::new(items),
        SimSurface::new(SimConfig::default()),
        HtmlRenderer,
        config,
    );
    engine.init(VIEWPORT, 0);
    engine
}

/// Single-column config with the given batch size.
pub fn single_column(batch_size: usize) -> EngineConfig {
    EngineConfig {
        columns: 1,
        batch_size,
        ..EngineConfig::default()
    }
}
