//! Deterministic in-memory surface.
//!
//! `SimSurface` keeps a model of the element tree: per column an ordered list
//! of containers and placeholders, the media containers and video elements
//! inside each container, and every attached listener and watch. Heights are
//! computed from the fragment: wrapped text (by display width), media boxes
//! and fixed-height blocks.
//!
//! Media starts out pending and only reaches its aspect-ratio height once
//! [`SimSurface::complete_pending_loads`] runs, like images and video
//! metadata arriving over the network. Loaded sources stay cached per item,
//! so a re-mounted container shows them at full size straight away.
//!
//! Listeners, watches and videos are *not* cleaned up when a container is
//! swapped out. Whatever the engine forgets to release stays visible through
//! [`SimSurface::live_listener_count`], [`SimSurface::live_watch_count`] and
//! [`SimSurface::leaked_video_count`].

use super::surface::{DisplayMode, ListenerKind, Playback, Surface, VideoBox, VideoInfo};
use super::{Fragment, MediaElement};
use crate::model::{
    ColumnIndex, ContainerHandle, ItemId, ListenerHandle, MediaHandle, MediaKind,
    PlaceholderHandle, PlaybackError, VideoHandle, WatchHandle,
};
use crate::view_state::types::{Px, Size};
use std::collections::{HashMap, HashSet};
use unicode_width::UnicodeWidthStr;

/// Metrics used to lay out simulated containers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    /// Width of every column.
    pub column_width: f64,
    /// Inner padding on each side of a container.
    pub padding: f64,
    /// Avatar and name row.
    pub header_height: f64,
    /// Timestamp and link row.
    pub footer_height: f64,
    /// One wrapped text line.
    pub line_height: f64,
    /// Width of one display column of text.
    pub char_width: f64,
    /// Card, quote header or reply-thread block.
    pub block_height: f64,
    /// Media element whose source has not loaded yet.
    pub pending_media_height: f64,
    /// "Media unavailable" notice.
    pub unavailable_height: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            column_width: 360.0,
            padding: 12.0,
            header_height: 48.0,
            footer_height: 28.0,
            line_height: 20.0,
            char_width: 8.0,
            block_height: 72.0,
            pending_media_height: 40.0,
            unavailable_height: 48.0,
        }
    }
}

impl SimConfig {
    /// Default metrics with a different column width.
    pub fn with_column_width(column_width: f64) -> Self {
        Self {
            column_width,
            ..Self::default()
        }
    }

    fn inner_width(&self) -> f64 {
        (self.column_width - 2.0 * self.padding).max(self.char_width)
    }

    fn text_height(&self, text: &str) -> f64 {
        let per_line = (self.inner_width() / self.char_width).floor().max(1.0) as usize;
        wrapped_lines(text, per_line) as f64 * self.line_height
    }

    fn element_height(&self, element: &MediaElement, loaded: bool) -> f64 {
        if element.unavailable {
            self.unavailable_height
        } else if loaded {
            self.inner_width() * element.height_ratio
        } else {
            self.pending_media_height
        }
    }
}

/// Number of lines `text` wraps to at `per_line` display columns.
///
/// Words are kept whole unless a single word is wider than a line.
fn wrapped_lines(text: &str, per_line: usize) -> usize {
    if text.trim().is_empty() {
        return 0;
    }
    text.split('\n')
        .map(|paragraph| {
            let mut lines = 1;
            let mut used = 0;
            for word in paragraph.split_whitespace() {
                let width = word.width();
                let needed = if used == 0 { width } else { used + 1 + width };
                if needed <= per_line {
                    used = needed;
                } else if width <= per_line {
                    lines += 1;
                    used = width;
                } else {
                    // Hard-break an overlong word.
                    if used > 0 {
                        lines += 1;
                    }
                    lines += (width - 1) / per_line;
                    used = width - (width - 1) / per_line * per_line;
                }
            }
            lines
        })
        .sum()
}

/// A node in a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimNode {
    /// A materialized container.
    Container(ContainerHandle),
    /// A placeholder block.
    Placeholder(PlaceholderHandle),
}

#[derive(Debug)]
struct ContainerNode {
    id: ItemId,
    column: ColumnIndex,
    fragment: Fragment,
    translation_shown: bool,
    media: Vec<MediaHandle>,
}

#[derive(Debug)]
struct PlaceholderNode {
    id: ItemId,
    size: Size,
}

#[derive(Debug)]
struct MediaNode {
    container: ContainerHandle,
    item: ItemId,
    group: usize,
    elements: Vec<MediaElement>,
    loaded: Vec<bool>,
    videos: Vec<Option<VideoHandle>>,
}

#[derive(Debug)]
struct VideoNode {
    container: ContainerHandle,
    media: MediaHandle,
    element: usize,
    autoplay: bool,
    attached: bool,
    paused: bool,
    ended: bool,
    muted: bool,
    released: bool,
}

/// In-memory [`Surface`] implementation.
#[derive(Debug)]
pub struct SimSurface {
    config: SimConfig,
    next_handle: u64,
    columns: Vec<Vec<SimNode>>,
    containers: HashMap<ContainerHandle, ContainerNode>,
    placeholders: HashMap<PlaceholderHandle, PlaceholderNode>,
    media: HashMap<MediaHandle, MediaNode>,
    videos: HashMap<VideoHandle, VideoNode>,
    listeners: HashMap<ListenerHandle, (ContainerHandle, ListenerKind)>,
    watches: HashMap<WatchHandle, MediaHandle>,
    loaded_sources: HashSet<(ItemId, usize, usize)>,
    busy: HashSet<ContainerHandle>,
    autoplay_blocked: bool,
    animations: usize,
}

impl SimSurface {
    /// Empty surface.
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            next_handle: 1,
            columns: Vec::new(),
            containers: HashMap::new(),
            placeholders: HashMap::new(),
            media: HashMap::new(),
            videos: HashMap::new(),
            listeners: HashMap::new(),
            watches: HashMap::new(),
            loaded_sources: HashSet::new(),
            busy: HashSet::new(),
            autoplay_blocked: false,
            animations: 0,
        }
    }

    /// Layout metrics.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Make every `play` call fail as if autoplay were blocked.
    pub fn set_autoplay_blocked(&mut self, blocked: bool) {
        self.autoplay_blocked = blocked;
    }

    /// Mark a container busy (collaborator animation in flight) or idle.
    pub fn set_busy(&mut self, container: ContainerHandle, busy: bool) {
        if busy {
            self.busy.insert(container);
        } else {
            self.busy.remove(&container);
        }
    }

    /// Pull a container out of its column while keeping the element alive, as
    /// when another script removes it from the document. Swaps involving it
    /// then fail.
    pub fn detach_from_tree(&mut self, container: ContainerHandle) -> bool {
        let Some(column) = self.containers.get(&container).map(|node| node.column) else {
            return false;
        };
        let Some(nodes) = self.columns.get_mut(column.get()) else {
            return false;
        };
        let before = nodes.len();
        nodes.retain(|node| *node != SimNode::Container(container));
        nodes.len() != before
    }

    /// Finish loading every pending media source in the tree.
    ///
    /// Returns the watched media containers whose height changed, in handle
    /// order. These are what the host would report as media-changed signals.
    pub fn complete_pending_loads(&mut self) -> Vec<MediaHandle> {
        let mut handles: Vec<MediaHandle> = self.media.keys().copied().collect();
        handles.sort();
        handles
            .into_iter()
            .filter(|&media| self.complete_load(media))
            .collect()
    }

    /// Finish loading every source in one media container.
    ///
    /// Returns true when the container is watched and its height changed.
    pub fn complete_load(&mut self, media: MediaHandle) -> bool {
        let Some(node) = self.media.get_mut(&media) else {
            return false;
        };
        let mut changed = false;
        for (index, element) in node.elements.iter().enumerate() {
            if element.unavailable || node.loaded[index] {
                continue;
            }
            node.loaded[index] = true;
            self.loaded_sources.insert((node.item, node.group, index));
            changed = true;
        }
        changed && self.watches.values().any(|&watched| watched == media)
    }

    /// Mark a video as played to the end.
    pub fn end_video(&mut self, video: VideoHandle) {
        if let Some(node) = self.videos.get_mut(&video) {
            node.paused = true;
            node.ended = true;
        }
    }

    /// Nodes of one column in tree order.
    pub fn column_nodes(&self, column: ColumnIndex) -> &[SimNode] {
        self.columns
            .get(column.get())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Markup a container was built from.
    pub fn container_html(&self, container: ContainerHandle) -> Option<&str> {
        self.containers
            .get(&container)
            .map(|node| node.fragment.html.as_str())
    }

    /// Item a container belongs to.
    pub fn container_item(&self, container: ContainerHandle) -> Option<ItemId> {
        self.containers.get(&container).map(|node| node.id)
    }

    /// Item and size of a placeholder.
    pub fn placeholder(&self, placeholder: PlaceholderHandle) -> Option<(ItemId, Size)> {
        self.placeholders
            .get(&placeholder)
            .map(|node| (node.id, node.size))
    }

    /// Whether a container currently shows its translation.
    pub fn shows_translation(&self, container: ContainerHandle) -> Option<bool> {
        self.containers
            .get(&container)
            .map(|node| node.translation_shown)
    }

    /// Number of containers in the tree.
    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    /// Number of placeholders in the tree.
    pub fn placeholder_count(&self) -> usize {
        self.placeholders.len()
    }

    /// Listeners attached and not yet detached.
    pub fn live_listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Listeners attached to one container.
    pub fn listeners_on(&self, container: ContainerHandle) -> Vec<ListenerKind> {
        let mut kinds: Vec<(ListenerHandle, ListenerKind)> = self
            .listeners
            .iter()
            .filter(|(_, (owner, _))| *owner == container)
            .map(|(handle, (_, kind))| (*handle, *kind))
            .collect();
        kinds.sort_by_key(|(handle, _)| *handle);
        kinds.into_iter().map(|(_, kind)| kind).collect()
    }

    /// Watches attached and not yet removed.
    pub fn live_watch_count(&self) -> usize {
        self.watches.len()
    }

    /// Videos no longer in the tree whose source was never released.
    pub fn leaked_video_count(&self) -> usize {
        self.videos
            .values()
            .filter(|video| !video.attached && !video.released)
            .count()
    }

    /// Videos currently playing.
    pub fn playing_videos(&self) -> Vec<VideoHandle> {
        let mut playing: Vec<VideoHandle> = self
            .videos
            .iter()
            .filter(|(_, video)| video.attached && !video.paused)
            .map(|(handle, _)| *handle)
            .collect();
        playing.sort();
        playing
    }

    /// Whether a video is muted.
    pub fn is_muted(&self, video: VideoHandle) -> Option<bool> {
        self.videos.get(&video).map(|node| node.muted)
    }

    /// Whether a video's source was released.
    pub fn is_released(&self, video: VideoHandle) -> Option<bool> {
        self.videos.get(&video).map(|node| node.released)
    }

    /// Display mode changes that were animated.
    pub fn animation_count(&self) -> usize {
        self.animations
    }

    fn allocate(&mut self) -> u64 {
        let raw = self.next_handle;
        self.next_handle += 1;
        raw
    }

    fn build_container(&mut self, id: ItemId, column: ColumnIndex, fragment: &Fragment) -> ContainerHandle {
        let container = ContainerHandle::from_raw(self.allocate());
        let mut media_handles = Vec::with_capacity(fragment.media.len());

        for (group_index, group) in fragment.media.iter().enumerate() {
            let media = MediaHandle::from_raw(self.allocate());
            let loaded: Vec<bool> = (0..group.elements.len())
                .map(|index| self.loaded_sources.contains(&(id, group_index, index)))
                .collect();
            let mut videos = Vec::with_capacity(group.elements.len());
            for (index, element) in group.elements.iter().enumerate() {
                if !element.is_video() {
                    videos.push(None);
                    continue;
                }
                let video = VideoHandle::from_raw(self.allocate());
                self.videos.insert(
                    video,
                    VideoNode {
                        container,
                        media,
                        element: index,
                        autoplay: element.autoplay(),
                        attached: true,
                        // Looping clips start on their own.
                        paused: element.autoplay(),
                        ended: false,
                        muted: !element.autoplay(),
                        released: false,
                    },
                );
                videos.push(Some(video));
            }
            self.media.insert(
                media,
                MediaNode {
                    container,
                    item: id,
                    group: group_index,
                    elements: group.elements.clone(),
                    loaded,
                    videos,
                },
            );
            media_handles.push(media);
        }

        self.containers.insert(
            container,
            ContainerNode {
                id,
                column,
                fragment: fragment.clone(),
                translation_shown: false,
                media: media_handles,
            },
        );
        container
    }

    fn drop_container(&mut self, container: ContainerHandle) -> Option<ContainerNode> {
        let node = self.containers.remove(&container)?;
        for media in &node.media {
            self.media.remove(media);
        }
        for video in self.videos.values_mut() {
            if video.container == container {
                video.attached = false;
            }
        }
        self.busy.remove(&container);
        Some(node)
    }

    fn replace_in_column(&mut self, column: ColumnIndex, old: SimNode, new: SimNode) -> bool {
        let Some(nodes) = self.columns.get_mut(column.get()) else {
            return false;
        };
        match nodes.iter_mut().find(|node| **node == old) {
            Some(slot) => {
                *slot = new;
                true
            }
            None => false,
        }
    }

    fn column_of_placeholder(&self, placeholder: PlaceholderHandle) -> Option<ColumnIndex> {
        self.columns
            .iter()
            .position(|nodes| nodes.contains(&SimNode::Placeholder(placeholder)))
            .map(ColumnIndex::new)
    }

    fn media_node_height(&self, node: &MediaNode) -> f64 {
        node.elements
            .iter()
            .zip(&node.loaded)
            .map(|(element, loaded)| self.config.element_height(element, *loaded))
            .sum()
    }

    fn container_height(&self, node: &ContainerNode) -> f64 {
        let text = match (&node.fragment.translation, node.translation_shown) {
            (Some(translation), true) => translation.as_str(),
            _ => node.fragment.source_text.as_str(),
        };
        let media: f64 = node
            .media
            .iter()
            .filter_map(|handle| self.media.get(handle))
            .map(|media| self.media_node_height(media))
            .sum();
        2.0 * self.config.padding
            + self.config.header_height
            + self.config.text_height(text)
            + media
            + node.fragment.extra_blocks as f64 * self.config.block_height
            + self.config.footer_height
    }
}

impl Default for SimSurface {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

impl Surface for SimSurface {
    fn mount(&mut self, id: ItemId, column: ColumnIndex, fragment: &Fragment) -> ContainerHandle {
        let container = self.build_container(id, column, fragment);
        if self.columns.len() <= column.get() {
            self.columns.resize_with(column.get() + 1, Vec::new);
        }
        self.columns[column.get()].push(SimNode::Container(container));
        container
    }

    fn swap_to_placeholder(
        &mut self,
        container: ContainerHandle,
        size: Size,
    ) -> Option<PlaceholderHandle> {
        let column = self.containers.get(&container)?.column;
        let placeholder = PlaceholderHandle::from_raw(self.allocate());
        if !self.replace_in_column(
            column,
            SimNode::Container(container),
            SimNode::Placeholder(placeholder),
        ) {
            return None;
        }
        let node = self.drop_container(container)?;
        self.placeholders
            .insert(placeholder, PlaceholderNode { id: node.id, size });
        Some(placeholder)
    }

    fn swap_to_container(
        &mut self,
        placeholder: PlaceholderHandle,
        id: ItemId,
        fragment: &Fragment,
    ) -> Option<ContainerHandle> {
        if !self.placeholders.contains_key(&placeholder) {
            return None;
        }
        let column = self.column_of_placeholder(placeholder)?;
        let container = self.build_container(id, column, fragment);
        self.replace_in_column(
            column,
            SimNode::Placeholder(placeholder),
            SimNode::Container(container),
        );
        self.placeholders.remove(&placeholder);
        Some(container)
    }

    fn measure(&self, container: ContainerHandle) -> Option<Size> {
        let node = self.containers.get(&container)?;
        Some(Size::new(self.config.column_width, self.container_height(node)))
    }

    fn media_containers(&self, container: ContainerHandle) -> Vec<MediaHandle> {
        self.containers
            .get(&container)
            .map(|node| node.media.clone())
            .unwrap_or_default()
    }

    fn media_height(&self, media: MediaHandle) -> Option<Px> {
        self.media
            .get(&media)
            .map(|node| Px::new(self.media_node_height(node)))
    }

    fn watch_media(&mut self, media: MediaHandle) -> Option<WatchHandle> {
        if !self.media.contains_key(&media) {
            return None;
        }
        let watch = WatchHandle::from_raw(self.allocate());
        self.watches.insert(watch, media);
        Some(watch)
    }

    fn unwatch(&mut self, watch: WatchHandle) {
        self.watches.remove(&watch);
    }

    fn videos(&self, container: ContainerHandle) -> Vec<VideoInfo> {
        let Some(node) = self.containers.get(&container) else {
            return Vec::new();
        };
        node.media
            .iter()
            .filter_map(|handle| self.media.get(handle))
            .flat_map(|media| media.videos.iter().flatten())
            .filter_map(|handle| {
                self.videos.get(handle).map(|video| VideoInfo {
                    handle: *handle,
                    autoplay: video.autoplay,
                })
            })
            .collect()
    }

    fn video_box(&self, video: VideoHandle) -> Option<VideoBox> {
        let video = self.videos.get(&video)?;
        if !video.attached {
            return None;
        }
        let container = self.containers.get(&video.container)?;
        let text = match (&container.fragment.translation, container.translation_shown) {
            (Some(translation), true) => translation.as_str(),
            _ => container.fragment.source_text.as_str(),
        };
        let mut offset =
            self.config.padding + self.config.header_height + self.config.text_height(text);

        for handle in &container.media {
            let media = self.media.get(handle)?;
            if *handle != video.media {
                offset += self.media_node_height(media);
                continue;
            }
            for index in 0..video.element {
                offset += self
                    .config
                    .element_height(&media.elements[index], media.loaded[index]);
            }
            let height = self
                .config
                .element_height(&media.elements[video.element], media.loaded[video.element]);
            return Some(VideoBox {
                offset: Px::new(offset),
                height: Px::new(height),
            });
        }
        None
    }

    fn playback(&self, video: VideoHandle) -> Option<Playback> {
        self.videos
            .get(&video)
            .filter(|node| node.attached)
            .map(|node| Playback {
                paused: node.paused,
                ended: node.ended,
            })
    }

    fn rewind(&mut self, video: VideoHandle) {
        if let Some(node) = self.videos.get_mut(&video) {
            node.ended = false;
        }
    }

    fn set_muted(&mut self, video: VideoHandle, muted: bool) {
        if let Some(node) = self.videos.get_mut(&video) {
            node.muted = muted;
        }
    }

    fn play(&mut self, video: VideoHandle) -> Result<(), PlaybackError> {
        let blocked = self.autoplay_blocked;
        let node = self
            .videos
            .get_mut(&video)
            .filter(|node| node.attached && !node.released)
            .ok_or(PlaybackError::Detached)?;
        if blocked {
            return Err(PlaybackError::AutoplayBlocked);
        }
        node.paused = false;
        node.ended = false;
        Ok(())
    }

    fn pause(&mut self, video: VideoHandle) {
        if let Some(node) = self.videos.get_mut(&video) {
            node.paused = true;
        }
    }

    fn release_video(&mut self, video: VideoHandle) {
        if let Some(node) = self.videos.get_mut(&video) {
            node.paused = true;
            node.released = true;
        }
    }

    fn attach_listener(
        &mut self,
        container: ContainerHandle,
        kind: ListenerKind,
    ) -> Option<ListenerHandle> {
        let node = self.containers.get(&container)?;
        let has_target = match kind {
            ListenerKind::LanguageToggle => node.fragment.has_translation(),
            ListenerKind::ReplyExpand => node.fragment.has_replies,
            ListenerKind::LightboxClick => node.fragment.media.iter().any(|group| {
                group
                    .elements
                    .iter()
                    .any(|element| element.kind == MediaKind::Photo && !element.unavailable)
            }),
        };
        if !has_target {
            return None;
        }
        let listener = ListenerHandle::from_raw(self.allocate());
        self.listeners.insert(listener, (container, kind));
        Some(listener)
    }

    fn detach_listener(&mut self, listener: ListenerHandle) {
        self.listeners.remove(&listener);
    }

    fn apply_display_mode(&mut self, container: ContainerHandle, mode: DisplayMode, animate: bool) {
        let Some(node) = self.containers.get_mut(&container) else {
            return;
        };
        if !node.fragment.has_translation() || node.translation_shown == mode.translation_shown {
            return;
        }
        node.translation_shown = mode.translation_shown;
        if animate {
            self.animations += 1;
        }
    }

    fn is_busy(&self, container: ContainerHandle) -> bool {
        self.busy.contains(&container)
    }
}
