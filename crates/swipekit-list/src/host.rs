//! Seams between the controller and the list it drives.
//!
//! The list implements [`SwipeHost`] so the controller can hit-test and
//! measure rows, and [`DismissCallbacks`] to hear about moves, releases and
//! removals. Both take `&self`; implementations keep their own state behind
//! `Cell`/`RefCell`.

use std::rc::Rc;

/// Vertical placement of a row in list coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowGeometry {
    pub top: f32,
    pub height: f32,
}

impl RowGeometry {
    pub const fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }
}

/// The visual of one row, as far as swiping needs it.
pub trait RowSurface {
    fn set_translation_x(&self, offset: f32);

    fn set_alpha(&self, alpha: f32);

    /// `1.0` is the measured height, `0.0` fully collapsed.
    fn set_height_scale(&self, scale: f32);

    /// Back to offset 0, alpha 1 and full height.
    fn reset(&self) {
        self.set_translation_x(0.0);
        self.set_alpha(1.0);
        self.set_height_scale(1.0);
    }
}

/// Queries and commands the controller issues to the list.
///
/// Implementations may call back into the controller from any method.
pub trait SwipeHost {
    /// Row under the given point, if any.
    fn row_at(&self, x: f32, y: f32) -> Option<usize>;

    fn can_dismiss(&self, _row: usize) -> bool {
        true
    }

    fn row_geometry(&self, row: usize) -> Option<RowGeometry>;

    /// Width of the list container; `0.0` while not laid out.
    fn container_width(&self) -> f32;

    fn row_surface(&self, row: usize) -> Option<Rc<dyn RowSurface>>;

    /// Called once a drag is classified as a swipe.
    fn suppress_scroll(&self);

    /// Called when a suppressed session ends.
    fn restore_scroll(&self);
}

/// Notifications published to the owner of the list.
pub trait DismissCallbacks {
    /// Rows to remove, strictly descending. Exactly once per burst.
    fn on_dismiss(&self, rows_descending: &[usize]);

    /// Horizontal displacement since pointer-down of the row being swiped.
    fn on_item_move(&self, delta_x: f32, row: usize);

    /// A session ended, or an up/cancel arrived with no session (`None`).
    fn on_action_up(&self, row: Option<usize>);

    fn on_click(&self, _row: usize) {}
}

/// Scroll activity of the list itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListScrollState {
    #[default]
    Idle,
    TouchScroll,
    Fling,
}

impl ListScrollState {
    pub fn is_scrolling(self) -> bool {
        !matches!(self, ListScrollState::Idle)
    }
}
