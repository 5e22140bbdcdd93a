//! Swipe-to-dismiss for vertically stacked, scrollable lists.
//!
//! [`SwipeDismissController`] sits between a list's pointer stream and the
//! list itself. It tells a horizontal dismiss drag apart from a vertical
//! scroll, animates the dragged row, and reports removals through
//! [`DismissCallbacks`] in one descending batch per burst so indices stay
//! valid while the list shrinks.

pub mod batcher;
pub mod controller;
pub mod host;
pub mod indicator;
pub mod row_animator;
pub mod session;

pub use batcher::DismissalBatcher;
pub use controller::{RowState, SwipeDismissController, SwipePhase};
pub use host::{DismissCallbacks, ListScrollState, RowGeometry, RowSurface, SwipeHost};
pub use indicator::{EdgeIndicator, IndicatorPlacement, IndicatorSide};
pub use row_animator::{RowAnimationKind, RowAnimator, RowVisual};
pub use session::{GestureSession, SessionRejected, SessionTracker, SessionUpdate};

pub use swipekit_foundation::{
    GestureMode, PointerEvent, PointerEventKind, SwipeConfig, SwipeDirection, SwipeVerdict,
};

pub mod prelude {
    pub use crate::controller::{RowState, SwipeDismissController, SwipePhase};
    pub use crate::host::{DismissCallbacks, ListScrollState, RowGeometry, RowSurface, SwipeHost};
    pub use crate::indicator::{EdgeIndicator, IndicatorPlacement, IndicatorSide};
    pub use swipekit_foundation::prelude::*;
}
