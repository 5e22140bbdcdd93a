//! Pointer velocity estimation for fling detection.
//!
//! Uses the impulse strategy: every pair of consecutive samples imparts
//! kinetic energy, and the release velocity is the speed that energy
//! corresponds to. Compared with a least-squares fit it reacts faster to a
//! flick at the very end of a drag, which is what a dismiss fling is.

use swipekit_ui_graphics::Point;

/// Ring buffer size for velocity tracking samples.
const HISTORY_SIZE: usize = 20;

/// Only samples this recent relative to the newest one are used.
const HORIZON_MS: i64 = 100;

/// A gap this long between consecutive samples means the pointer stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Debug, Default)]
struct Sample {
    time_ms: i64,
    position: f32,
}

/// Velocity along a single axis.
#[derive(Clone, Debug)]
pub struct AxisVelocityTracker {
    samples: [Sample; HISTORY_SIZE],
    newest: usize,
    len: usize,
}

impl Default for AxisVelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl AxisVelocityTracker {
    pub fn new() -> Self {
        Self {
            samples: [Sample::default(); HISTORY_SIZE],
            newest: HISTORY_SIZE - 1,
            len: 0,
        }
    }

    /// Records the absolute position at `time_ms`.
    pub fn add_position(&mut self, time_ms: i64, position: f32) {
        self.newest = (self.newest + 1) % HISTORY_SIZE;
        self.samples[self.newest] = Sample { time_ms, position };
        self.len = (self.len + 1).min(HISTORY_SIZE);
    }

    /// Velocity in units per second; `0.0` without enough recent movement.
    pub fn velocity(&self) -> f32 {
        if self.len < 2 {
            return 0.0;
        }

        let newest = self.samples[self.newest];
        let mut positions = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut count = 0;
        let mut previous_time = newest.time_ms;

        // Walk newest to oldest, stopping at the horizon or at a pause.
        for step in 0..self.len {
            let sample = self.samples[(self.newest + HISTORY_SIZE - step) % HISTORY_SIZE];
            let age = newest.time_ms - sample.time_ms;
            let gap = previous_time - sample.time_ms;
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }
            positions[count] = sample.position;
            times[count] = -(age as f32);
            previous_time = sample.time_ms;
            count += 1;
        }

        if count < 2 {
            return 0.0;
        }

        // Oldest first for the energy accumulation.
        positions[..count].reverse();
        times[..count].reverse();
        impulse_velocity(&positions[..count], &times[..count]) * 1000.0
    }

    /// Velocity clamped to `[-max, max]`; non-finite results become `0.0`.
    pub fn velocity_with_max(&self, max: f32) -> f32 {
        if !max.is_finite() || max <= 0.0 {
            return 0.0;
        }
        let velocity = self.velocity();
        if !velocity.is_finite() {
            log::warn!("non-finite velocity estimate, treating pointer as stopped");
            return 0.0;
        }
        velocity.clamp(-max, max)
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Velocity per millisecond from samples ordered oldest to newest.
fn impulse_velocity(positions: &[f32], times: &[f32]) -> f32 {
    let mut work = 0.0f32;
    for i in 1..positions.len() {
        let dt = times[i] - times[i - 1];
        if dt == 0.0 {
            continue;
        }
        let v_curr = (positions[i] - positions[i - 1]) / dt;
        let v_prev = kinetic_energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == 1 {
            work *= 0.5;
        }
    }
    kinetic_energy_to_velocity(work)
}

/// E = ½·m·v² with m = 1, keeping the sign of the energy.
#[inline]
fn kinetic_energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Two-axis tracker fed with pointer positions.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    x: AxisVelocityTracker,
    y: AxisVelocityTracker,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_position(&mut self, time_ms: i64, position: Point) {
        self.x.add_position(time_ms, position.x);
        self.y.add_position(time_ms, position.y);
    }

    /// Current estimate with each axis clamped to `max`.
    pub fn velocity(&self, max: f32) -> Velocity {
        Velocity::new(self.x.velocity_with_max(max), self.y.velocity_with_max(max))
    }

    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
    }
}

#[cfg(test)]
#[path = "tests/velocity_tracker_tests.rs"]
mod tests;
