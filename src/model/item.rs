//! Feed item records.
//!
//! Items are immutable once loaded. The shape follows the JSON emitted by the
//! scraper: every field except the author block is optional, and unknown
//! fields are ignored so older dumps keep loading.

use serde::Deserialize;

/// Path marker the scraper writes when a media download failed.
pub const MEDIA_UNAVAILABLE: &str = "media unavailable";

/// One social-media post.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct Item {
    /// Platform identifier of the post.
    #[serde(default)]
    pub rest_id: Option<String>,

    /// Permalink to the original post.
    #[serde(default)]
    pub url: Option<String>,

    /// Creation timestamp as written by the scraper.
    #[serde(default)]
    pub created_at: Option<String>,

    /// Who posted it.
    #[serde(default)]
    pub author: Author,

    /// Text and optional translation.
    #[serde(default)]
    pub content: Content,

    /// Attached photos and videos, in display order.
    #[serde(default)]
    pub media: Vec<Media>,

    /// Link preview card.
    #[serde(default)]
    pub card: Option<Card>,

    /// Quoted post. Quotes never nest further.
    #[serde(default)]
    pub quote: Option<Box<Item>>,

    /// Reply thread under this post.
    #[serde(default)]
    pub replies: Vec<Item>,
}

impl Item {
    /// Whether the post carries a translation that can be toggled.
    pub fn has_translation(&self) -> bool {
        self.content
            .translation
            .as_deref()
            .is_some_and(|t| !t.is_empty())
    }

    /// Whether any media (own or quoted) is attached.
    pub fn has_media(&self) -> bool {
        !self.media.is_empty() || self.quote.as_ref().is_some_and(|q| !q.media.is_empty())
    }
}

/// Post author.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct Author {
    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Handle without the leading `@`.
    #[serde(default)]
    pub screen_name: String,

    /// Avatar image.
    #[serde(default)]
    pub avatar: Avatar,
}

/// Avatar image reference.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct Avatar {
    /// Local path or URL of the image.
    #[serde(default)]
    pub path: String,
}

/// Post body.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct Content {
    /// Original text.
    #[serde(default)]
    pub text: Option<String>,

    /// Machine translation of `text`.
    #[serde(default)]
    pub translation: Option<String>,

    /// Expanded URLs that appear in the text.
    #[serde(default)]
    pub expanded_urls: Vec<String>,
}

/// Kind of attached media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// Still image.
    Photo,
    /// Video with controls; participates in viewport autoplay.
    Video,
    /// Looping muted clip; plays on its own.
    AnimatedGif,
}

/// One media attachment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Media {
    /// Kind of media.
    #[serde(rename = "type")]
    pub kind: MediaKind,

    /// Local path, or [`MEDIA_UNAVAILABLE`].
    #[serde(default)]
    pub path: String,

    /// Poster image for videos.
    #[serde(default)]
    pub thumb_path: Option<String>,

    /// `[width, height]` as reported by the platform.
    #[serde(default)]
    pub aspect_ratio: Option<[f64; 2]>,
}

impl Media {
    /// Whether the download failed and only a notice is shown.
    pub fn is_unavailable(&self) -> bool {
        self.path.is_empty() || self.path == MEDIA_UNAVAILABLE
    }

    /// Height over width of the rendered box.
    ///
    /// Videos default to 16:9, photos to 4:3. The box is never taller than it
    /// is wide.
    pub fn height_ratio(&self) -> f64 {
        let (w, h) = match (self.aspect_ratio, self.kind) {
            (Some([w, h]), _) if w > 0.0 && h > 0.0 => (w, h),
            (_, MediaKind::Photo) => (4.0, 3.0),
            _ => (16.0, 9.0),
        };
        (h / w).min(1.0)
    }
}

/// Link preview card.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct Card {
    /// Target URL.
    #[serde(default)]
    pub url: String,

    /// Headline.
    #[serde(default)]
    pub title: Option<String>,

    /// Summary line.
    #[serde(default)]
    pub description: Option<String>,
}
