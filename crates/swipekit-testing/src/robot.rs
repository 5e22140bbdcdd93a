//! Scripted pointer gestures against a real controller.
//!
//! # Example
//!
//! ```
//! use swipekit_testing::SwipeRobot;
//!
//! let mut robot = SwipeRobot::new(20);
//! robot.swipe(3, 600.0);
//! robot.run_until_idle();
//! assert_eq!(robot.list().dismiss_batches(), vec![vec![3]]);
//! ```

use std::rc::Rc;

use swipekit_core::Runtime;
use swipekit_foundation::{PointerEvent, PointerId, SwipeConfig};
use swipekit_list::SwipeDismissController;

use crate::fake_list::FakeList;

pub const DEFAULT_ROW_HEIGHT: f32 = 100.0;
pub const DEFAULT_WIDTH: f32 = 1000.0;

const FRAME_NANOS: u64 = 16_666_667;
const MOVE_INTERVAL_MS: i64 = 16;
/// Longer than the velocity tracker's stop detection.
const HOLD_MS: i64 = 100;
/// Upper bound for `run_until_idle`; ten seconds of frames.
const MAX_IDLE_FRAMES: usize = 600;

/// Drives a [`SwipeDismissController`] over a [`FakeList`].
///
/// Pointer time and frame time advance independently: gestures move the
/// pointer clock, frame pumping moves the frame clock.
pub struct SwipeRobot {
    runtime: Runtime,
    list: Rc<FakeList>,
    controller: SwipeDismissController,
    pointer: PointerId,
    x: f32,
    y: f32,
    time_ms: i64,
    frame_nanos: u64,
}

impl SwipeRobot {
    /// `rows` rows of 100 px in a list 1000 px wide, default thresholds.
    pub fn new(rows: usize) -> Self {
        Self::with_config(rows, SwipeConfig::default())
    }

    /// # Panics
    ///
    /// If `config` does not validate.
    pub fn with_config(rows: usize, config: SwipeConfig) -> Self {
        let runtime = Runtime::new();
        let list = FakeList::new(rows, DEFAULT_ROW_HEIGHT, DEFAULT_WIDTH);
        let controller =
            SwipeDismissController::new(list.clone(), list.clone(), runtime.frame_clock(), config)
                .unwrap_or_else(|err| panic!("invalid swipe config: {err}"));
        Self {
            runtime,
            list,
            controller,
            pointer: 0,
            x: 0.0,
            y: 0.0,
            time_ms: 0,
            frame_nanos: 0,
        }
    }

    pub fn list(&self) -> &Rc<FakeList> {
        &self.list
    }

    pub fn controller(&self) -> &SwipeDismissController {
        &self.controller
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// Pointer clock in milliseconds.
    pub fn time_ms(&self) -> i64 {
        self.time_ms
    }

    /// Uses `pointer` for the gestures that follow.
    pub fn with_pointer(&mut self, pointer: PointerId) -> &mut Self {
        self.pointer = pointer;
        self
    }

    /// Sends a raw event stamped with the robot's pointer id and clock.
    pub fn send(&mut self, event: PointerEvent) -> bool {
        let event = event.with_id(self.pointer);
        self.x = event.position.x;
        self.y = event.position.y;
        self.controller.on_pointer_event(&event)
    }

    /// Presses in the middle of `row`.
    pub fn press(&mut self, row: usize) -> bool {
        let x = self.list.width() / 2.0;
        let y = self.list.row_center_y(row);
        self.press_at(x, y)
    }

    pub fn press_at(&mut self, x: f32, y: f32) -> bool {
        self.send(PointerEvent::down(x, y, self.time_ms))
    }

    /// Moves by `(dx, dy)` in `steps` evenly timed events.
    ///
    /// Returns whether the last move was consumed.
    pub fn move_by(&mut self, dx: f32, dy: f32, steps: usize) -> bool {
        self.move_by_every(dx, dy, steps, MOVE_INTERVAL_MS)
    }

    pub fn move_by_every(&mut self, dx: f32, dy: f32, steps: usize, interval_ms: i64) -> bool {
        let steps = steps.max(1);
        let (start_x, start_y) = (self.x, self.y);
        let mut consumed = false;
        for step in 1..=steps {
            let fraction = step as f32 / steps as f32;
            self.time_ms += interval_ms;
            consumed = self.send(PointerEvent::moved(
                start_x + dx * fraction,
                start_y + dy * fraction,
                self.time_ms,
            ));
        }
        consumed
    }

    /// Lifts immediately, keeping whatever velocity the last moves had.
    pub fn release(&mut self) -> bool {
        self.time_ms += 1;
        self.send(PointerEvent::up(self.x, self.y, self.time_ms))
    }

    /// Holds still until the pointer reads as stopped, then lifts.
    pub fn release_after_pause(&mut self) -> bool {
        self.time_ms += HOLD_MS;
        self.send(PointerEvent::up(self.x, self.y, self.time_ms))
    }

    pub fn cancel(&mut self) -> bool {
        self.time_ms += 1;
        self.send(PointerEvent::cancel(self.x, self.y, self.time_ms))
    }

    pub fn tap(&mut self, row: usize) -> bool {
        self.press(row);
        self.time_ms += 40;
        self.send(PointerEvent::up(self.x, self.y, self.time_ms))
    }

    /// Slow horizontal drag of `dx` on `row`, released without velocity.
    pub fn swipe(&mut self, row: usize, dx: f32) -> bool {
        self.press(row);
        self.move_by(dx, 0.0, 8);
        self.release_after_pause()
    }

    /// Quick horizontal flick of `dx` on `row`, released mid-motion.
    pub fn fling(&mut self, row: usize, dx: f32) -> bool {
        self.press(row);
        self.move_by_every(dx, 0.0, 6, 8);
        self.release()
    }

    /// Vertical drag of `dy` starting on `row`.
    pub fn scroll(&mut self, row: usize, dy: f32) -> bool {
        self.press(row);
        self.move_by(0.0, dy, 6);
        self.release()
    }

    /// Advances the pointer clock without sending anything.
    pub fn wait_ms(&mut self, millis: i64) {
        self.time_ms += millis;
    }

    /// Delivers `frames` frames, returning how many had callbacks to run.
    pub fn pump_frames(&mut self, frames: usize) -> usize {
        let mut busy = 0;
        for _ in 0..frames {
            self.frame_nanos += FRAME_NANOS;
            if self.runtime.drain_frame_callbacks(self.frame_nanos) > 0 {
                busy += 1;
            }
        }
        busy
    }

    /// Delivers frames until no animation asks for another one.
    pub fn run_until_idle(&mut self) -> usize {
        let mut frames = 0;
        while self.runtime.has_frame_callbacks() && frames < MAX_IDLE_FRAMES {
            self.frame_nanos += FRAME_NANOS;
            self.runtime.drain_frame_callbacks(self.frame_nanos);
            frames += 1;
        }
        if frames == MAX_IDLE_FRAMES {
            log::warn!("frame callbacks still pending after {frames} frames");
        }
        frames
    }
}
