//! Default gesture thresholds, in logical pixels and milliseconds.
//!
//! For very high-density touch screens these should be scaled by the device's
//! DPI factor before being put into a [`crate::SwipeConfig`].

/// Distance the pointer must travel before a drag direction counts as intentional.
///
/// Below it a press-and-release is a tap. Matches the usual platform touch
/// slop (Android's ViewConfiguration uses ~8dp).
pub const DRAG_THRESHOLD: f32 = 8.0;

/// Share of the container width a row must be dragged past to dismiss on release.
pub const DISMISS_FRACTION: f32 = 0.5;

/// Horizontal release speed, px/s, that dismisses a row regardless of distance.
pub const FLING_VELOCITY_THRESHOLD: f32 = 800.0;

/// Velocity estimates are clamped to this, px/s.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Duration of each row animation phase (slide, collapse, settle).
pub const SHORT_ANIMATION_MILLIS: u64 = 200;

/// Band around a zero horizontal delta in which the edge indicator keeps its side.
pub const INDICATOR_DEAD_ZONE: f32 = 4.0;
