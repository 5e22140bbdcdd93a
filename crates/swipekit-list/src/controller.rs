//! The swipe-to-dismiss state machine.
//!
//! One [`SwipeDismissController`] per list. It consumes the list's pointer
//! events, tracks at most one gesture session, runs terminal row animations
//! on the frame clock and publishes removals in descending batches.
//!
//! The host is never called while the controller's state is borrowed.
//! Hit testing and measuring happen before the borrow; scroll commands and
//! [`DismissCallbacks`] notifications are queued and delivered afterwards.
//! Both the host and the callbacks may call back into the controller.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use swipekit_core::FrameClock;
use swipekit_foundation::gestures::resolve_verdict;
use swipekit_foundation::{
    ConfigError, GestureMode, PointerEvent, PointerEventKind, SwipeConfig, SwipeDirection,
    SwipeVerdict,
};

use crate::batcher::{DismissalBatcher, RowBatch};
use crate::host::{DismissCallbacks, ListScrollState, RowSurface, SwipeHost};
use crate::row_animator::{RowAnimationKind, RowAnimator, RowVisual};
use crate::session::{GestureSession, SessionRejected, SessionTracker, SessionUpdate};

/// Coarse state of the whole controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipePhase {
    Idle,
    /// A pointer session is open.
    Tracking(GestureMode),
    /// No session, but row animations are still running.
    Animating,
}

/// What the controller is doing with a particular row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowState {
    Idle,
    Tracking(GestureMode),
    SettleAnimating,
    DismissAnimating(SwipeDirection),
    /// Animation done; waiting for the rest of the burst.
    PendingRemoval,
}

enum Notification {
    SuppressScroll,
    RestoreScroll,
    ItemMove {
        delta_x: f32,
        row: usize,
    },
    ActionUp(Option<usize>),
    Click(usize),
    Dismiss {
        rows: RowBatch,
        surfaces: Vec<Rc<dyn RowSurface>>,
    },
}

struct ControllerState {
    config: SwipeConfig,
    enabled: bool,
    scroll_state: ListScrollState,
    sessions: SessionTracker,
    animator: RowAnimator,
    batcher: DismissalBatcher,
    outbox: VecDeque<Notification>,
}

impl ControllerState {
    fn accepting(&self) -> bool {
        self.enabled && !self.scroll_state.is_scrolling()
    }

    fn row_is_busy(&self, row: usize) -> bool {
        self.animator.contains(row) || self.batcher.is_pending(row)
    }

    /// Publishes the pending batch once nothing animates and no session
    /// holds a row index.
    fn flush_if_ready(&mut self) {
        if self.sessions.is_active() {
            return;
        }
        let Some(rows) = self.batcher.take_ready() else {
            return;
        };
        let surfaces = rows
            .iter()
            .filter_map(|&row| self.animator.release(row))
            .collect();
        log::debug!("publishing dismissal batch {rows:?}");
        self.outbox.push_back(Notification::Dismiss { rows, surfaces });
    }

    fn apply_swipe(&mut self, delta_x: f32) {
        let Some(session) = self.sessions.active() else {
            return;
        };
        let row = session.row;
        if let Some(surface) = session.surface.as_deref() {
            RowVisual::swiping(delta_x, session.container_width).apply(surface);
        }
        log::trace!("row {row} swiped to {delta_x}");
        self.outbox
            .push_back(Notification::ItemMove { delta_x, row });
    }
}

struct ControllerInner {
    host: Rc<dyn SwipeHost>,
    callbacks: Rc<dyn DismissCallbacks>,
    state: RefCell<ControllerState>,
}

impl ControllerInner {
    fn handle_pointer(this: &Rc<Self>, event: &PointerEvent) -> bool {
        match event.kind {
            PointerEventKind::Down => {
                Self::on_down(this, event);
                false
            }
            PointerEventKind::Move => Self::on_move(&mut this.state.borrow_mut(), event),
            PointerEventKind::Up | PointerEventKind::Cancel => {
                Self::on_release(this, &mut this.state.borrow_mut(), event)
            }
        }
    }

    fn on_down(this: &Rc<Self>, event: &PointerEvent) {
        match Self::open_session(this, event) {
            Ok(()) => log::debug!(
                "session opened at ({}, {})",
                event.position.x,
                event.position.y
            ),
            Err(reason) => log::debug!("pointer down passed through: {reason}"),
        }
    }

    fn open_session(this: &Rc<Self>, event: &PointerEvent) -> Result<(), SessionRejected> {
        {
            let state = this.state.borrow();
            if state.sessions.is_active() {
                return Err(SessionRejected::SessionActive);
            }
            if !state.accepting() {
                return Err(SessionRejected::Disabled);
            }
        }
        let session = GestureSession::begin(event, this.host.as_ref())?;

        // The host may have changed the controller while it was queried.
        let mut state = this.state.borrow_mut();
        let accepting = state.accepting();
        let ControllerState {
            sessions,
            animator,
            batcher,
            ..
        } = &mut *state;
        sessions.admit(session, accepting, |row| {
            animator.contains(row) || batcher.is_pending(row)
        })?;
        Ok(())
    }

    fn on_move(state: &mut ControllerState, event: &PointerEvent) -> bool {
        let touch_slop = state.config.touch_slop;
        match state.sessions.track(event, touch_slop) {
            SessionUpdate::Ignored | SessionUpdate::Undecided | SessionUpdate::Scrolling => false,
            SessionUpdate::StartedScrolling => {
                log::debug!("session classified as scroll");
                false
            }
            SessionUpdate::StartedSwiping { delta_x } => {
                log::debug!("session classified as swipe");
                state.outbox.push_back(Notification::SuppressScroll);
                state.apply_swipe(delta_x);
                true
            }
            SessionUpdate::Swiping { delta_x } => {
                state.apply_swipe(delta_x);
                true
            }
        }
    }

    fn on_release(this: &Rc<Self>, state: &mut ControllerState, event: &PointerEvent) -> bool {
        if state.sessions.is_active() && !state.sessions.owns(event) {
            return false;
        }
        let scroll_suppressed = state
            .sessions
            .active()
            .is_some_and(|session| session.mode == GestureMode::Swiping);
        let touch_slop = state.config.touch_slop;
        let Some(session) = state.sessions.close(event, touch_slop) else {
            state.outbox.push_back(Notification::ActionUp(None));
            return false;
        };

        let row = session.row;
        let cancelled = event.kind == PointerEventKind::Cancel;
        let mut click = None;
        let consumed = match session.mode {
            GestureMode::Undecided => {
                if !cancelled {
                    click = Some(row);
                }
                false
            }
            GestureMode::Scrolling => false,
            // A lift that crosses the slop with no move in between is judged
            // like any other swipe, without ever having suppressed scrolling.
            GestureMode::Swiping => {
                if scroll_suppressed {
                    state.outbox.push_back(Notification::RestoreScroll);
                }
                let verdict = if cancelled {
                    SwipeVerdict::Settle
                } else {
                    let velocity = session.velocity(state.config.max_fling_velocity);
                    resolve_verdict(
                        session.delta_x(),
                        velocity,
                        session.container_width,
                        &state.config,
                    )
                };
                log::debug!(
                    "row {row} released at {} ({}): {verdict:?}",
                    session.delta_x(),
                    if cancelled { "cancel" } else { "up" }
                );
                Self::start_terminal_animation(this, state, &session, verdict);
                true
            }
        };

        state.outbox.push_back(Notification::ActionUp(Some(row)));
        if let Some(row) = click {
            state.outbox.push_back(Notification::Click(row));
        }
        state.flush_if_ready();
        consumed
    }

    fn start_terminal_animation(
        this: &Rc<Self>,
        state: &mut ControllerState,
        session: &GestureSession,
        verdict: SwipeVerdict,
    ) {
        let row = session.row;
        let width = session.container_width;
        let from = RowVisual::swiping(session.delta_x(), width);
        let surface = session.surface.clone();
        let weak = Rc::downgrade(this);
        let on_done = move |row| {
            if let Some(inner) = weak.upgrade() {
                Self::on_animation_end(&inner, row);
            }
        };

        state.batcher.animation_started();
        match verdict {
            SwipeVerdict::Dismiss(direction) => {
                state.batcher.add_pending(row);
                state
                    .animator
                    .dismiss(row, surface, from, direction, width, on_done);
            }
            SwipeVerdict::Settle => state.animator.settle(row, surface, from, on_done),
        }
    }

    fn on_animation_end(this: &Rc<Self>, row: usize) {
        {
            let mut state = this.state.borrow_mut();
            if state.animator.kind(row) == Some(RowAnimationKind::Settle) {
                state.animator.release(row);
            }
            state.batcher.animation_finished();
            log::trace!(
                "row {row} animation ended, {} still live",
                state.batcher.live_animations()
            );
            state.flush_if_ready();
        }
        Self::dispatch(this);
    }

    fn dispatch(this: &Rc<Self>) {
        loop {
            let next = this.state.borrow_mut().outbox.pop_front();
            let Some(notification) = next else {
                break;
            };
            match notification {
                Notification::SuppressScroll => this.host.suppress_scroll(),
                Notification::RestoreScroll => this.host.restore_scroll(),
                Notification::ItemMove { delta_x, row } => {
                    this.callbacks.on_item_move(delta_x, row)
                }
                Notification::ActionUp(row) => this.callbacks.on_action_up(row),
                Notification::Click(row) => this.callbacks.on_click(row),
                Notification::Dismiss { rows, surfaces } => {
                    this.callbacks.on_dismiss(&rows);
                    for surface in surfaces {
                        surface.reset();
                    }
                }
            }
        }
    }
}

/// Recognizes swipe-to-dismiss gestures over a list and drives the rows.
///
/// Cloning shares the same controller.
#[derive(Clone)]
pub struct SwipeDismissController {
    inner: Rc<ControllerInner>,
}

impl SwipeDismissController {
    pub fn new(
        host: Rc<dyn SwipeHost>,
        callbacks: Rc<dyn DismissCallbacks>,
        clock: FrameClock,
        config: SwipeConfig,
    ) -> Result<Self, ConfigError> {
        let config = config.validate()?;
        let state = ControllerState {
            config,
            enabled: true,
            scroll_state: ListScrollState::Idle,
            sessions: SessionTracker::new(),
            animator: RowAnimator::new(clock, config.animation_millis),
            batcher: DismissalBatcher::new(),
            outbox: VecDeque::new(),
        };
        Ok(Self {
            inner: Rc::new(ControllerInner {
                host,
                callbacks,
                state: RefCell::new(state),
            }),
        })
    }

    /// Feeds one pointer event from the list.
    ///
    /// Returns `true` and marks the event consumed when the swipe owns it;
    /// the list should then skip its own scroll and click handling.
    pub fn on_pointer_event(&self, event: &PointerEvent) -> bool {
        let consumed = ControllerInner::handle_pointer(&self.inner, event);
        ControllerInner::dispatch(&self.inner);
        if consumed {
            event.consume();
        }
        consumed
    }

    /// Re-reads container width and row geometry after a layout pass.
    pub fn on_layout(&self) {
        let Some(row) = self.inner.state.borrow().sessions.active().map(|s| s.row) else {
            return;
        };
        let host = self.inner.host.as_ref();
        let (width, geometry) = (host.container_width(), host.row_geometry(row));
        let mut state = self.inner.state.borrow_mut();
        if let Some(session) = state.sessions.active_mut().filter(|s| s.row == row) {
            session.set_layout(width, geometry);
        }
    }

    /// Disabling only affects new sessions; an open one runs to completion.
    pub fn set_enabled(&self, enabled: bool) {
        self.inner.state.borrow_mut().enabled = enabled;
    }

    /// Whether a pointer-down would currently be considered.
    pub fn is_enabled(&self) -> bool {
        self.inner.state.borrow().accepting()
    }

    /// Pauses swipe detection while the list itself scrolls or flings.
    pub fn on_scroll_state_changed(&self, scroll_state: ListScrollState) {
        let mut state = self.inner.state.borrow_mut();
        if state.scroll_state != scroll_state {
            log::debug!("list scroll state {scroll_state:?}");
            state.scroll_state = scroll_state;
        }
    }

    pub fn phase(&self) -> SwipePhase {
        let state = self.inner.state.borrow();
        if let Some(session) = state.sessions.active() {
            SwipePhase::Tracking(session.mode)
        } else if state.batcher.live_animations() > 0 {
            SwipePhase::Animating
        } else {
            SwipePhase::Idle
        }
    }

    pub fn row_state(&self, row: usize) -> RowState {
        let state = self.inner.state.borrow();
        if let Some(session) = state.sessions.active().filter(|s| s.row == row) {
            return RowState::Tracking(session.mode);
        }
        match state.animator.kind(row) {
            Some(RowAnimationKind::Settle) => RowState::SettleAnimating,
            Some(RowAnimationKind::Dismiss(direction)) if state.animator.is_running(row) => {
                RowState::DismissAnimating(direction)
            }
            Some(RowAnimationKind::Dismiss(_)) => RowState::PendingRemoval,
            None if state.row_is_busy(row) => RowState::PendingRemoval,
            None => RowState::Idle,
        }
    }

    /// Rows with a dismiss verdict not yet published, in verdict order.
    pub fn pending_dismissals(&self) -> Vec<usize> {
        self.inner.state.borrow().batcher.pending().to_vec()
    }

    pub fn config(&self) -> SwipeConfig {
        self.inner.state.borrow().config
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
