//! Default HTML renderer.
//!
//! Produces the post markup used by the feed page: header, text with an
//! optional hidden translation, media, link card, quoted post, reply thread
//! and footer. Text is escaped; paths and URLs are attribute-escaped.

use super::{Fragment, ItemRenderer, RenderContext};
use crate::model::{Item, ItemId, Media, MediaKind};
use chrono::NaiveDateTime;
use std::fmt::Write;

/// Timestamp layout written by the scraper.
const SOURCE_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%S%.fZ";
/// Timestamp layout shown in the footer.
const DISPLAY_TIMESTAMP: &str = "%Y-%m-%d %H:%M";

/// Renders items as HTML fragments.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl ItemRenderer for HtmlRenderer {
    fn render(&self, item: &Item, id: ItemId, context: RenderContext) -> Fragment {
        let mut fragment = Fragment::structure_of(item);
        let mut html = String::new();
        write_item(&mut html, item, Some(id), context);
        fragment.html = html;
        fragment
    }
}

/// Escape text for element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Reformat a scraper timestamp for display, passing unknown formats through.
pub fn format_timestamp(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw, SOURCE_TIMESTAMP)
        .map(|dt| dt.format(DISPLAY_TIMESTAMP).to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn write_item(out: &mut String, item: &Item, id: Option<ItemId>, context: RenderContext) {
    let class = match (context.quote, context.reply) {
        (true, _) => "quote-tweet",
        (false, true) => "tweet reply",
        (false, false) => "tweet",
    };
    match id {
        Some(id) => {
            let _ = write!(out, r#"<div class="{class}" id="{}">"#, id.get());
        }
        None => {
            let _ = write!(out, r#"<div class="{class}">"#);
        }
    }

    write_header(out, item, context);
    write_content(out, item, context);
    write_media(out, &item.media, context.quote);

    if !context.quote {
        if let Some(card) = &item.card {
            let _ = write!(
                out,
                r#"<a href="{}" target="_blank"><div class="card"><div class="card-title">{}</div>"#,
                escape(&card.url),
                escape(card.title.as_deref().unwrap_or_default())
            );
            if let Some(description) = card.description.as_deref().filter(|d| !d.is_empty()) {
                let _ = write!(out, r#"<div class="card-description">{}</div>"#, escape(description));
            }
            out.push_str("</div></a>");
        }
        if let Some(quote) = &item.quote {
            write_item(
                out,
                quote,
                None,
                RenderContext {
                    quote: true,
                    reply: context.reply,
                },
            );
        }
        if !item.replies.is_empty() && !context.reply {
            out.push_str(r#"<div class="replies" hidden>"#);
            for reply in &item.replies {
                write_item(
                    out,
                    reply,
                    None,
                    RenderContext {
                        quote: false,
                        reply: true,
                    },
                );
            }
            out.push_str("</div>");
        }
        write_footer(out, item);
    }

    out.push_str("</div>");
}

fn write_header(out: &mut String, item: &Item, context: RenderContext) {
    let _ = write!(
        out,
        r#"<div class="tweet-header"><div class="user"><img src="{}" alt="Avatar" class="avatar"><div class="user-info"><span class="name">{}</span><span class="username">@{}</span></div></div>"#,
        escape(&item.author.avatar.path),
        escape(&item.author.name),
        escape(&item.author.screen_name)
    );
    if context.quote {
        out.push_str(r#"<span class="timestamp"></span>"#);
    } else {
        out.push_str(r#"<span class="tool">"#);
        if item.has_translation() {
            out.push_str(r#"<div class="language"></div>"#);
        }
        if !item.replies.is_empty() && !context.reply {
            out.push_str(r#"<div class="reply-toggle"></div>"#);
        }
        out.push_str(r#"<div class="pin"></div></span>"#);
    }
    out.push_str("</div>");
}

fn write_content(out: &mut String, item: &Item, context: RenderContext) {
    let Some(text) = item.content.text.as_deref() else {
        return;
    };
    let _ = write!(
        out,
        r#"<div class="tweet-content"><span class="src">{}</span>"#,
        escape(text)
    );
    if !context.quote {
        if let Some(translation) = item.content.translation.as_deref().filter(|t| !t.is_empty()) {
            let _ = write!(
                out,
                r#"<span class="trs" hidden>{}</span>"#,
                escape(translation)
            );
        }
    }
    out.push_str("</div>");
}

fn write_media(out: &mut String, media: &[Media], quoted: bool) {
    if media.is_empty() {
        return;
    }
    out.push_str(r#"<div class="media-container">"#);
    for m in media {
        if m.is_unavailable() {
            out.push_str(r#"<div class="media-unavailable">Media Unavailable</div>"#);
            continue;
        }
        let padding = m.height_ratio() * 100.0;
        match m.kind {
            MediaKind::Photo => {
                let class = if quoted { "quote-media-item" } else { "media-item" };
                let _ = write!(
                    out,
                    r#"<img class="{class}" src="{}" loading="lazy" />"#,
                    escape(&m.path)
                );
            }
            MediaKind::Video => {
                let class = if quoted {
                    "quote-video-player"
                } else {
                    "video-player"
                };
                let _ = write!(
                    out,
                    r#"<div class="video-container" style="position: relative; padding-bottom: {padding:.3}%"><video class="{class}" controls preload="none" playsinline poster="{}"><source src="{}" type="video/mp4" /></video></div>"#,
                    escape(m.thumb_path.as_deref().unwrap_or_default()),
                    escape(&m.path)
                );
            }
            MediaKind::AnimatedGif => {
                let class = if quoted {
                    "quote-animated-gif-player"
                } else {
                    "animated-gif-player"
                };
                let _ = write!(
                    out,
                    r#"<div class="video-container" style="position: relative; padding-bottom: {padding:.3}%"><video class="{class}" autoplay loop muted playsinline preload="auto"><source src="{}" type="video/mp4" /></video></div>"#,
                    escape(&m.path)
                );
            }
        }
    }
    out.push_str("</div>");
}

fn write_footer(out: &mut String, item: &Item) {
    let timestamp = item
        .created_at
        .as_deref()
        .map(format_timestamp)
        .unwrap_or_default();
    let _ = write!(
        out,
        r#"<div class="footer"><span class="timestamp">{}</span>"#,
        escape(&timestamp)
    );
    if let Some(url) = item.url.as_deref() {
        let _ = write!(
            out,
            r#"<a href="{}" class="link2x" target="_blank">View original</a>"#,
            escape(url)
        );
    }
    out.push_str("</div>");
}
