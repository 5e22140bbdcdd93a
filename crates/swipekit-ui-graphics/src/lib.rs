//! Pure geometry data for swipekit.
//!
//! Positions and sizes are logical pixels in the coordinate space of the
//! list container, with `y` growing downward.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{Point, Rect, Size};
}
