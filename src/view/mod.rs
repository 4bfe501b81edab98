//! View layer - rendering collaborators and the host surface.
//!
//! - `ItemRenderer`: the opaque pure markup function `(item, context) -> Fragment`
//! - `Surface`: element tree operations the engine drives
//! - `html`: the default HTML renderer
//! - `sim`: a deterministic in-memory surface

pub mod html;
pub mod sim;
pub mod surface;

pub use html::HtmlRenderer;
pub use sim::{SimConfig, SimSurface};
pub use surface::{DisplayMode, ListenerKind, Playback, Surface, VideoBox, VideoInfo};

use crate::model::{Item, ItemId, MediaKind};

/// Nesting context an item is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderContext {
    /// Rendered inside another item as a quote.
    pub quote: bool,
    /// Rendered inside a reply thread.
    pub reply: bool,
}

impl RenderContext {
    /// A feed item at the top level.
    pub const TOP_LEVEL: RenderContext = RenderContext {
        quote: false,
        reply: false,
    };
}

/// One element inside a media container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaElement {
    /// What kind of element.
    pub kind: MediaKind,
    /// Height over width of the element box.
    pub height_ratio: f64,
    /// Download failed; a fixed-height notice is shown instead.
    pub unavailable: bool,
}

impl MediaElement {
    /// Whether this element is a video that autoplays when scrolled into view.
    pub fn autoplay(&self) -> bool {
        self.kind == MediaKind::Video && !self.unavailable
    }

    /// Whether this element is a `<video>` at all.
    pub fn is_video(&self) -> bool {
        matches!(self.kind, MediaKind::Video | MediaKind::AnimatedGif) && !self.unavailable
    }
}

/// A media container and its elements.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaGroup {
    /// Belongs to a quoted item.
    pub quoted: bool,
    /// Elements in display order.
    pub elements: Vec<MediaElement>,
}

/// Output of an [`ItemRenderer`].
///
/// `html` is opaque to the engine. The remaining fields describe the
/// structure a surface needs to build the container.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fragment {
    /// Rendered markup.
    pub html: String,
    /// Original text.
    pub source_text: String,
    /// Translated text, when the item has one.
    pub translation: Option<String>,
    /// Media containers, own media first, then the quote's.
    pub media: Vec<MediaGroup>,
    /// Fixed-height blocks (card, quote header, reply thread).
    pub extra_blocks: usize,
    /// Has a reply thread that can be expanded.
    pub has_replies: bool,
}

impl Fragment {
    /// Structural description of `item` with empty markup.
    pub fn structure_of(item: &Item) -> Self {
        let mut media = Vec::new();
        if let Some(group) = media_group(item, false) {
            media.push(group);
        }
        let mut extra_blocks = 0;
        if item.card.is_some() {
            extra_blocks += 1;
        }
        if let Some(quote) = &item.quote {
            extra_blocks += 1;
            if let Some(group) = media_group(quote, true) {
                media.push(group);
            }
        }
        if !item.replies.is_empty() {
            extra_blocks += 1;
        }

        Self {
            html: String::new(),
            source_text: item.content.text.clone().unwrap_or_default(),
            translation: item
                .content
                .translation
                .clone()
                .filter(|t| !t.is_empty()),
            media,
            extra_blocks,
            has_replies: !item.replies.is_empty(),
        }
    }

    /// Whether a translation toggle is rendered.
    pub fn has_translation(&self) -> bool {
        self.translation.is_some()
    }
}

fn media_group(item: &Item, quoted: bool) -> Option<MediaGroup> {
    if item.media.is_empty() {
        return None;
    }
    let elements = item
        .media
        .iter()
        .map(|m| MediaElement {
            kind: m.kind,
            height_ratio: m.height_ratio(),
            unavailable: m.is_unavailable(),
        })
        .collect();
    Some(MediaGroup { quoted, elements })
}

/// Renders an item into a fragment.
///
/// Must be a pure function of its inputs: re-rendering an item on promotion
/// has to produce the same fragment as the first render.
pub trait ItemRenderer {
    /// Render `item` (stored under `id`) in `context`.
    fn render(&self, item: &Item, id: ItemId, context: RenderContext) -> Fragment;
}
