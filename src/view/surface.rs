//! The host surface the engine drives.
//!
//! A `Surface` is whatever owns the real element tree: a browser DOM behind
//! bindings, a GPU scene, or the in-crate [`SimSurface`]. The engine decides
//! *what* should happen (mount, swap, measure, bind, release) and the surface
//! performs it. Lookups that find nothing return `None` or an empty list; the
//! engine treats that as a silent no-op.
//!
//! [`SimSurface`]: super::sim::SimSurface

use super::Fragment;
use crate::model::{
    ColumnIndex, ContainerHandle, ItemId, ListenerHandle, MediaHandle, PlaceholderHandle,
    PlaybackError, VideoHandle, WatchHandle,
};
use crate::view_state::types::{Px, Size};
use serde::{Deserialize, Serialize};

/// Feature listeners a materialized container can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListenerKind {
    /// Click on the translation toggle.
    LanguageToggle,
    /// Expand or collapse the reply thread.
    ReplyExpand,
    /// Click on a photo to open the lightbox.
    LightboxClick,
}

impl ListenerKind {
    /// Every kind, in attach order.
    pub const ALL: [ListenerKind; 3] = [
        ListenerKind::LanguageToggle,
        ListenerKind::ReplyExpand,
        ListenerKind::LightboxClick,
    ];
}

/// Global display mode applied to every materialized item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DisplayMode {
    /// Show the translation instead of the original text.
    pub translation_shown: bool,
}

/// A video element found in a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoInfo {
    /// The element.
    pub handle: VideoHandle,
    /// Whether it takes part in viewport-driven autoplay. Looping clips that
    /// play by themselves do not, but are still released on demotion.
    pub autoplay: bool,
}

/// Vertical box of a video relative to its container's top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoBox {
    /// Distance from the container top.
    pub offset: Px,
    /// Rendered height.
    pub height: Px,
}

/// Playback status of a video element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Playback {
    /// Not currently playing.
    pub paused: bool,
    /// Reached the end.
    pub ended: bool,
}

/// Host element tree operations used by the engine.
pub trait Surface {
    // ===== Tree =====

    /// Build a container for `id` from `fragment` and append it to `column`.
    fn mount(&mut self, id: ItemId, column: ColumnIndex, fragment: &Fragment) -> ContainerHandle;

    /// Atomically replace `container` with a fixed-size placeholder block.
    ///
    /// Returns `None` when the container no longer exists.
    fn swap_to_placeholder(
        &mut self,
        container: ContainerHandle,
        size: Size,
    ) -> Option<PlaceholderHandle>;

    /// Atomically replace `placeholder` with a new container built from `fragment`.
    ///
    /// Returns `None` when the placeholder no longer exists.
    fn swap_to_container(
        &mut self,
        placeholder: PlaceholderHandle,
        id: ItemId,
        fragment: &Fragment,
    ) -> Option<ContainerHandle>;

    /// Exact rendered size of a container.
    fn measure(&self, container: ContainerHandle) -> Option<Size>;

    // ===== Media =====

    /// Media containers inside a container, in document order.
    fn media_containers(&self, container: ContainerHandle) -> Vec<MediaHandle>;

    /// Rendered height of a media container.
    fn media_height(&self, media: MediaHandle) -> Option<Px>;

    /// Attach load and child-list observers to a media container.
    ///
    /// The host later reports changes through the engine's
    /// `on_media_changed`.
    fn watch_media(&mut self, media: MediaHandle) -> Option<WatchHandle>;

    /// Detach observers attached by [`Surface::watch_media`].
    fn unwatch(&mut self, watch: WatchHandle);

    // ===== Video =====

    /// Every video element inside a container.
    fn videos(&self, container: ContainerHandle) -> Vec<VideoInfo>;

    /// Where a video sits inside its container.
    fn video_box(&self, video: VideoHandle) -> Option<VideoBox>;

    /// Current playback status.
    fn playback(&self, video: VideoHandle) -> Option<Playback>;

    /// Seek to the start.
    fn rewind(&mut self, video: VideoHandle);

    /// Mute or unmute.
    fn set_muted(&mut self, video: VideoHandle, muted: bool);

    /// Start playback.
    ///
    /// # Errors
    ///
    /// Returns `PlaybackError` when the environment refuses playback.
    fn play(&mut self, video: VideoHandle) -> Result<(), PlaybackError>;

    /// Pause playback.
    fn pause(&mut self, video: VideoHandle);

    /// Pause, clear the source and drop buffered data.
    fn release_video(&mut self, video: VideoHandle);

    // ===== Listeners and display =====

    /// Attach a feature listener. `None` when the container has no element
    /// for that feature (e.g. no translation toggle on an untranslated post).
    fn attach_listener(
        &mut self,
        container: ContainerHandle,
        kind: ListenerKind,
    ) -> Option<ListenerHandle>;

    /// Detach a listener attached by [`Surface::attach_listener`].
    fn detach_listener(&mut self, listener: ListenerHandle);

    /// Show or hide the translation in a container.
    fn apply_display_mode(&mut self, container: ContainerHandle, mode: DisplayMode, animate: bool);

    /// True while a collaborator animation runs in the container. The engine
    /// never swaps a busy container.
    fn is_busy(&self, _container: ContainerHandle) -> bool {
        false
    }
}
