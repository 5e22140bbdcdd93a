//! Pure decisions behind swipe-to-dismiss.
//!
//! Nothing here holds state. The session tracker feeds the current
//! displacement in, and the controller acts on what comes back.

use crate::swipe_config::SwipeConfig;
use crate::velocity_tracker::Velocity;

/// How a pointer session has been classified so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureMode {
    /// Still within touch slop; could become a tap.
    Undecided,
    /// Horizontal drag that owns the row.
    Swiping,
    /// Vertical drag handed to the list; dismissal is off for the session.
    Scrolling,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    /// `None` for zero and NaN.
    pub fn from_sign(value: f32) -> Option<Self> {
        if value > 0.0 {
            Some(SwipeDirection::Right)
        } else if value < 0.0 {
            Some(SwipeDirection::Left)
        } else {
            None
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            SwipeDirection::Left => -1.0,
            SwipeDirection::Right => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeVerdict {
    Dismiss(SwipeDirection),
    Settle,
}

impl SwipeVerdict {
    pub fn is_dismiss(self) -> bool {
        matches!(self, SwipeVerdict::Dismiss(_))
    }
}

/// Classifies an undecided drag from its displacement since pointer-down.
///
/// Horizontal wins only when strictly dominant; ties past the slop scroll.
pub fn resolve_mode(dx: f32, dy: f32, touch_slop: f32) -> GestureMode {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ax > touch_slop && ax > ay {
        GestureMode::Swiping
    } else if ay > touch_slop && ay >= ax {
        GestureMode::Scrolling
    } else {
        GestureMode::Undecided
    }
}

/// Dismiss-versus-settle for a swipe released at `dx` with `velocity`.
///
/// The distance rule needs a known container width; with `width <= 0` only
/// a fling can dismiss.
pub fn resolve_verdict(
    dx: f32,
    velocity: Velocity,
    width: f32,
    config: &SwipeConfig,
) -> SwipeVerdict {
    if width > 0.0 && dx.abs() > width * config.dismiss_fraction {
        if let Some(direction) = SwipeDirection::from_sign(dx) {
            return SwipeVerdict::Dismiss(direction);
        }
    }

    let vx = velocity.x;
    let is_fling = vx.abs() > config.fling_velocity_threshold && velocity.y.abs() < vx.abs();
    if is_fling {
        match (SwipeDirection::from_sign(dx), SwipeDirection::from_sign(vx)) {
            (Some(drag), Some(fling)) if drag == fling => return SwipeVerdict::Dismiss(fling),
            _ => {}
        }
    }

    SwipeVerdict::Settle
}

/// Row opacity for a live swipe: fully transparent at half the width.
pub fn swipe_alpha(dx: f32, width: f32) -> f32 {
    if width <= 0.0 || !dx.is_finite() {
        return 1.0;
    }
    (1.0 - 2.0 * dx.abs() / width).clamp(0.0, 1.0)
}

/// Resting offset of a dismissed row, just past the container edge.
pub fn dismiss_offset(direction: SwipeDirection, width: f32) -> f32 {
    direction.sign() * width.max(0.0)
}

#[cfg(test)]
#[path = "../tests/swipe_policy_tests.rs"]
mod tests;
