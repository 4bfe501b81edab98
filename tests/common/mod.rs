//! Shared fixtures for integration tests.

#![allow(dead_code)]

use feedwall::config::EngineConfig;
use feedwall::model::{Author, Content, Item, Media, MediaKind};
use feedwall::source::ItemStore;
use feedwall::state::FeedEngine;
use feedwall::view::{HtmlRenderer, SimConfig, SimSurface};
use feedwall::view_state::Viewport;

pub type Engine = FeedEngine<SimSurface, HtmlRenderer>;

pub const VIEWPORT: Viewport = Viewport {
    width: 1280.0,
    height: 800.0,
};

/// A post with `text` and no attachments.
pub fn post(text: &str) -> Item {
    Item {
        author: Author {
            name: "Fixture".into(),
            screen_name: "fixture".into(),
            ..Author::default()
        },
        content: Content {
            text: Some(text.into()),
            ..Content::default()
        },
        created_at: Some("2024-05-10T12:30:00.000Z".into()),
        ..Item::default()
    }
}

/// A post carrying one attachment of `kind`.
pub fn post_with_media(text: &str, kind: MediaKind) -> Item {
    let mut item = post(text);
    item.media.push(Media {
        kind,
        path: format!("media/{}.bin", text.replace(' ', "_")),
        thumb_path: None,
        aspect_ratio: None,
    });
    item
}

/// A post with a translation.
pub fn translated_post(text: &str, translation: &str) -> Item {
    let mut item = post(text);
    item.content.translation = Some(translation.into());
    item
}

/// `n` posts cycling through text, video, translation, photo and gif.
pub fn mixed_feed(n: usize) -> Vec<Item> {
    (0..n)
        .map(|i| match i % 5 {
            0 => post(&format!("post number {i}")),
            1 => post_with_media(&format!("clip {i}"), MediaKind::Video),
            2 => translated_post(&format!("hola {i}"), &format!("hello {i}")),
            3 => post_with_media(&format!("photo {i}"), MediaKind::Photo),
            _ => post_with_media(&format!("loop {i}"), MediaKind::AnimatedGif),
        })
        .collect()
}

/// Like [`mixed_feed`], but every translation wraps over many lines, so
/// flipping the display mode changes item heights.
pub fn mixed_feed_with_long_translations(n: usize) -> Vec<Item> {
    let long = "a translation that wraps ".repeat(30);
    let mut items = mixed_feed(n);
    for item in &mut items {
        if item.content.translation.is_some() {
            item.content.translation = Some(long.clone());
        }
    }
    items
}

/// `n` one-line text posts.
pub fn text_feed(n: usize) -> Vec<Item> {
    (0..n).map(|i| post(&format!("post {i}"))).collect()
}

/// Engine initialized at scroll 0, time 0.
pub fn started(items: Vec<Item>, config: EngineConfig) -> Engine {
    let mut engine = FeedEngine::new(
        ItemStore::new(items),
        SimSurface::new(SimConfig::default()),
        HtmlRenderer,
        config,
    );
    engine.init(VIEWPORT, 0);
    engine
}

pub fn columns(columns: usize, batch_size: usize) -> EngineConfig {
    EngineConfig {
        columns,
        batch_size,
        ..EngineConfig::default()
    }
}
