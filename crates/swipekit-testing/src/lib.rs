//! Testing utilities for swipekit
//!
//! [`FakeList`] is an in-memory list implementing both sides of the
//! controller's seams. [`SwipeRobot`] scripts pointer gestures against a
//! real [`swipekit_list::SwipeDismissController`] and pumps the frame runtime.

pub mod fake_list;
pub mod robot;

pub use fake_list::{FakeList, FakeSurface, ListEvent};
pub use robot::SwipeRobot;

pub mod prelude {
    pub use crate::fake_list::{FakeList, FakeSurface, ListEvent};
    pub use crate::robot::SwipeRobot;
}
