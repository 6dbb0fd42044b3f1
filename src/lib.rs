//! Gesture-driven playback control for short-video feeds.
//!
//! [`playback::PlaybackInteractionController`] turns taps, holds and
//! progress-bar drags into play/pause/seek commands on a [`engine::MediaEngine`],
//! and publishes a [`core::RenderSnapshot`] for the view to draw.

pub mod core;
pub mod engine;
pub mod input;
pub mod playback;
pub mod settings;

pub use crate::core::{OverlayIcon, ProgressSnapshot, RenderSnapshot, SeekDirection};
pub use crate::engine::{MediaEngine, MediaSource, PlaybackHandle};
pub use crate::playback::{ControllerError, PlaybackConfig, PlaybackInteractionController};
