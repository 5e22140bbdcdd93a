pub mod swipe_policy;

pub use swipe_policy::{
    dismiss_offset, resolve_mode, resolve_verdict, swipe_alpha, GestureMode, SwipeDirection,
    SwipeVerdict,
};
