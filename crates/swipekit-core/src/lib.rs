//! Single-threaded frame runtime for swipekit.
//!
//! Pointer events, animation frames and animation completion callbacks are all
//! delivered serially on one event loop. This crate owns the frame-callback
//! queue that animations schedule themselves on, and the [`FrameClock`] handle
//! they use to do it.

mod frame_clock;
mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use runtime::{FrameCallbackId, Runtime, RuntimeHandle};

pub mod prelude {
    pub use crate::frame_clock::{FrameCallbackRegistration, FrameClock};
    pub use crate::runtime::{Runtime, RuntimeHandle};
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
