//! Input primitives and gesture decisions for swipekit.
//!
//! Everything here is independent of any list: pointer events, the
//! touch-slop and fling constants, a velocity tracker and the pure policy
//! functions that classify a drag and decide dismiss-versus-settle.

pub mod gesture_constants;
pub mod gestures;
pub mod input;
pub mod swipe_config;
pub mod uptime_clock;
pub mod velocity_tracker;

pub use gestures::{GestureMode, SwipeDirection, SwipeVerdict};
pub use input::{PointerDispatcher, PointerEvent, PointerEventKind, PointerId};
pub use swipe_config::{ConfigError, SwipeConfig};
pub use swipekit_ui_graphics::{Point, Rect, Size};
pub use uptime_clock::UptimeClock;
pub use velocity_tracker::{AxisVelocityTracker, Velocity, VelocityTracker};

pub mod prelude {
    pub use crate::gestures::{GestureMode, SwipeDirection, SwipeVerdict};
    pub use crate::input::{PointerEvent, PointerEventKind};
    pub use crate::swipe_config::SwipeConfig;
    pub use crate::velocity_tracker::{Velocity, VelocityTracker};
    pub use swipekit_ui_graphics::Point;
}
