//! The single pointer session a controller tracks at a time.

use std::fmt;
use std::rc::Rc;

use swipekit_foundation::gestures::resolve_mode;
use swipekit_foundation::{GestureMode, Point, PointerEvent, PointerId, Velocity, VelocityTracker};

use crate::host::{RowGeometry, RowSurface, SwipeHost};

/// Why a pointer-down did not open a session.
///
/// None of these are failures: the event simply passes through to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRejected {
    NoRowAtPosition,
    NotDismissable(usize),
    /// The row is still animating or waiting to be removed.
    RowBusy(usize),
    SessionActive,
    /// Disabled explicitly or paused by list scrolling.
    Disabled,
}

impl fmt::Display for SessionRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionRejected::NoRowAtPosition => write!(f, "no row under pointer"),
            SessionRejected::NotDismissable(row) => write!(f, "row {row} cannot be dismissed"),
            SessionRejected::RowBusy(row) => write!(f, "row {row} is animating"),
            SessionRejected::SessionActive => write!(f, "another pointer session is active"),
            SessionRejected::Disabled => write!(f, "swipe detection is paused"),
        }
    }
}

impl std::error::Error for SessionRejected {}

pub struct GestureSession {
    pub pointer: PointerId,
    pub row: usize,
    pub surface: Option<Rc<dyn RowSurface>>,
    pub start: Point,
    pub last_x: f32,
    pub mode: GestureMode,
    pub geometry: Option<RowGeometry>,
    pub container_width: f32,
    velocity: VelocityTracker,
}

impl GestureSession {
    /// Hit-tests and measures the row under a pointer-down.
    ///
    /// Only queries `host`; admission against the controller's own state is
    /// [`SessionTracker::admit`].
    pub fn begin(event: &PointerEvent, host: &dyn SwipeHost) -> Result<Self, SessionRejected> {
        let position = event.position;
        let row = host
            .row_at(position.x, position.y)
            .ok_or(SessionRejected::NoRowAtPosition)?;
        if !host.can_dismiss(row) {
            return Err(SessionRejected::NotDismissable(row));
        }

        let mut velocity = VelocityTracker::new();
        velocity.add_position(event.time_ms, position);
        Ok(Self {
            pointer: event.id,
            row,
            surface: host.row_surface(row),
            start: position,
            last_x: position.x,
            mode: GestureMode::Undecided,
            geometry: host.row_geometry(row),
            container_width: host.container_width(),
            velocity,
        })
    }

    /// Horizontal displacement since pointer-down.
    pub fn delta_x(&self) -> f32 {
        self.last_x - self.start.x
    }

    pub fn velocity(&self, max: f32) -> Velocity {
        self.velocity.velocity(max)
    }

    fn record(&mut self, event: &PointerEvent) {
        self.velocity.add_position(event.time_ms, event.position);
        self.last_x = event.position.x;
    }

    /// Takes layout inputs measured after the list was laid out again.
    pub fn set_layout(&mut self, container_width: f32, geometry: Option<RowGeometry>) {
        self.container_width = container_width;
        self.geometry = geometry;
    }
}

impl fmt::Debug for GestureSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureSession")
            .field("pointer", &self.pointer)
            .field("row", &self.row)
            .field("start", &self.start)
            .field("last_x", &self.last_x)
            .field("mode", &self.mode)
            .field("container_width", &self.container_width)
            .finish_non_exhaustive()
    }
}

/// What a move did to the active session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionUpdate {
    /// No session, or the event belongs to another pointer.
    Ignored,
    Undecided,
    /// The move that crossed the slop horizontally.
    StartedSwiping { delta_x: f32 },
    Swiping { delta_x: f32 },
    /// The move that crossed the slop vertically.
    StartedScrolling,
    Scrolling,
}

#[derive(Default)]
pub struct SessionTracker {
    active: Option<GestureSession>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self { active: None }
    }

    pub fn active(&self) -> Option<&GestureSession> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut GestureSession> {
        self.active.as_mut()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Whether `event` comes from the pointer that owns the session.
    pub fn owns(&self, event: &PointerEvent) -> bool {
        self.active
            .as_ref()
            .is_some_and(|session| session.pointer == event.id)
    }

    /// Installs a session built by [`GestureSession::begin`].
    ///
    /// `accepting` is the controller's enabled state; `is_busy` reports rows
    /// that are animating or pending removal.
    pub fn admit(
        &mut self,
        session: GestureSession,
        accepting: bool,
        is_busy: impl Fn(usize) -> bool,
    ) -> Result<&GestureSession, SessionRejected> {
        if self.active.is_some() {
            return Err(SessionRejected::SessionActive);
        }
        if !accepting {
            return Err(SessionRejected::Disabled);
        }
        if is_busy(session.row) {
            return Err(SessionRejected::RowBusy(session.row));
        }
        let session: &GestureSession = self.active.insert(session);
        Ok(session)
    }

    /// Feeds a move of the owning pointer and advances the mode.
    pub fn track(&mut self, event: &PointerEvent, touch_slop: f32) -> SessionUpdate {
        let Some(session) = self.active.as_mut() else {
            return SessionUpdate::Ignored;
        };
        if session.pointer != event.id {
            return SessionUpdate::Ignored;
        }
        session.record(event);

        match session.mode {
            GestureMode::Swiping => SessionUpdate::Swiping {
                delta_x: session.delta_x(),
            },
            GestureMode::Scrolling => SessionUpdate::Scrolling,
            GestureMode::Undecided => {
                let delta = event.position.delta_from(session.start);
                session.mode = resolve_mode(delta.x, delta.y, touch_slop);
                match session.mode {
                    GestureMode::Undecided => SessionUpdate::Undecided,
                    GestureMode::Swiping => SessionUpdate::StartedSwiping { delta_x: delta.x },
                    GestureMode::Scrolling => SessionUpdate::StartedScrolling,
                }
            }
        }
    }

    /// Closes the session of the owning pointer, recording the final sample.
    ///
    /// A session still undecided is classified from the release position, so
    /// a lift far from the press is never taken for a tap.
    pub fn close(&mut self, event: &PointerEvent, touch_slop: f32) -> Option<GestureSession> {
        if !self.owns(event) {
            return None;
        }
        let mut session = self.active.take()?;
        session.record(event);
        if session.mode == GestureMode::Undecided {
            let delta = event.position.delta_from(session.start);
            session.mode = resolve_mode(delta.x, delta.y, touch_slop);
        }
        Some(session)
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
