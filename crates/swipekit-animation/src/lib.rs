//! Animation system for swipekit
//!
//! Time-based tweens with easing curves, driven by the frame clock of
//! `swipekit-core`. Every animation reports exactly one end signal, either
//! because it reached its target or because something interrupted it.

pub mod animation;
pub mod easing;

pub use animation::{Animatable, AnimationEndReason, AnimationSpec, Lerp};
pub use easing::Easing;

pub mod prelude {
    pub use crate::animation::{Animatable, AnimationEndReason, AnimationSpec, Lerp};
    pub use crate::easing::Easing;
}
