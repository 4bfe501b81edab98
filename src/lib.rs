//! feedwall
//!
//! Viewport-driven virtualization engine for a multi-column social feed.
//!
//! The engine keeps every loaded post in one of two representations: a full
//! materialized container while it is near the viewport, or a sized
//! placeholder once it has scrolled far away. It is headless: the host tree is
//! reached through the [`view::Surface`] trait and markup through
//! [`view::ItemRenderer`].

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;

// Scripted session driver used by the binary
pub mod integration;

#[cfg(test)]
mod test_harness;
