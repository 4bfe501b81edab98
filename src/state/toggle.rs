//! Per-item language toggle.
//!
//! The toggle animation is cosmetic, but while it runs the engine must not
//! swap the item out. At most one animation is in flight per item.

use crate::view::DisplayMode;

/// Which text an item shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shown {
    /// Original text.
    Source,
    /// Translated text.
    Translation,
}

impl Shown {
    /// The other text.
    pub fn flipped(self) -> Self {
        match self {
            Shown::Source => Shown::Translation,
            Shown::Translation => Shown::Source,
        }
    }

    /// Text shown under a global display mode.
    pub fn from_mode(mode: DisplayMode) -> Self {
        if mode.translation_shown {
            Shown::Translation
        } else {
            Shown::Source
        }
    }

    /// Display mode that shows this text.
    pub fn as_mode(self) -> DisplayMode {
        DisplayMode {
            translation_shown: self == Shown::Translation,
        }
    }
}

/// `Idle(shown) -> Animating { to } -> Idle(to)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageToggle {
    /// No animation running.
    Idle(Shown),
    /// Switching to `to`.
    Animating {
        /// Text shown once the animation ends.
        to: Shown,
    },
}

impl LanguageToggle {
    /// Idle toggle matching the global display mode.
    pub fn new(mode: DisplayMode) -> Self {
        LanguageToggle::Idle(Shown::from_mode(mode))
    }

    /// True while an animation is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self, LanguageToggle::Animating { .. })
    }

    /// Start switching text. Returns the target, or `None` when an animation
    /// is already running.
    pub fn start(&mut self) -> Option<Shown> {
        match *self {
            LanguageToggle::Idle(shown) => {
                let to = shown.flipped();
                *self = LanguageToggle::Animating { to };
                Some(to)
            }
            LanguageToggle::Animating { .. } => None,
        }
    }

    /// End the running animation. Returns the text now shown, or `None` when
    /// nothing was animating.
    pub fn finish(&mut self) -> Option<Shown> {
        match *self {
            LanguageToggle::Animating { to } => {
                *self = LanguageToggle::Idle(to);
                Some(to)
            }
            LanguageToggle::Idle(_) => None,
        }
    }

    /// Text shown now, or the target of a running animation.
    pub fn shown(&self) -> Shown {
        match *self {
            LanguageToggle::Idle(shown) => shown,
            LanguageToggle::Animating { to } => to,
        }
    }
}
