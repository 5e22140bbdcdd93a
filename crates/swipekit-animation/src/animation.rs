//! Tween animations on the frame clock.

use std::cell::RefCell;
use std::rc::Rc;

use swipekit_core::{FrameCallbackRegistration, FrameClock};

use crate::easing::Easing;

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for f64 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction as f64
    }
}

/// Duration, easing and start delay of a tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration_millis: u64,
    pub easing: Easing,
    pub delay_millis: u64,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }

    fn delay_nanos(&self) -> u64 {
        self.delay_millis.saturating_mul(1_000_000)
    }

    fn duration_nanos(&self) -> u64 {
        self.duration_millis.saturating_mul(1_000_000).max(1)
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowIn)
    }
}

/// Why an animation stopped. Delivered exactly once per `animate_to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEndReason {
    /// The value reached the target.
    Finished,
    /// A newer `animate_to`, `snap_to` or `stop` took over first.
    Interrupted,
}

type EndCallback = Box<dyn FnOnce(AnimationEndReason) + 'static>;
type UpdateListener<T> = Rc<dyn Fn(&T) + 'static>;

/// A value that tweens toward a target on frame callbacks.
///
/// Cloning shares the same underlying animation.
pub struct Animatable<T: Lerp + Clone + 'static> {
    inner: Rc<RefCell<AnimatableInner<T>>>,
}

struct AnimatableInner<T: Lerp + Clone + 'static> {
    clock: FrameClock,
    current: T,
    start: T,
    target: T,
    spec: AnimationSpec,
    start_time_nanos: Option<u64>,
    /// Bumped on every retarget so stale frames and listeners can tell.
    generation: u64,
    running: bool,
    registration: Option<FrameCallbackRegistration>,
    on_update: Option<UpdateListener<T>>,
    on_end: Option<EndCallback>,
}

impl<T: Lerp + Clone + 'static> Animatable<T> {
    pub fn new(initial: T, clock: FrameClock) -> Self {
        let inner = AnimatableInner {
            clock,
            current: initial.clone(),
            start: initial.clone(),
            target: initial,
            spec: AnimationSpec::default(),
            start_time_nanos: None,
            generation: 0,
            running: false,
            registration: None,
            on_update: None,
            on_end: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Registers a listener invoked with every new value, including snaps.
    pub fn set_on_update(&self, listener: impl Fn(&T) + 'static) {
        self.inner.borrow_mut().on_update = Some(Rc::new(listener));
    }

    pub fn value(&self) -> T {
        self.inner.borrow().current.clone()
    }

    pub fn target(&self) -> T {
        self.inner.borrow().target.clone()
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().running
    }

    /// Animates from the current value to `target`.
    ///
    /// A running animation is interrupted first and its end callback receives
    /// [`AnimationEndReason::Interrupted`].
    pub fn animate_to(
        &self,
        target: T,
        spec: AnimationSpec,
        on_end: impl FnOnce(AnimationEndReason) + 'static,
    ) {
        let interrupted = {
            let mut inner = self.inner.borrow_mut();
            let interrupted = inner.interrupt();
            inner.start = inner.current.clone();
            inner.target = target;
            inner.spec = spec;
            inner.running = true;
            inner.on_end = Some(Box::new(on_end));
            interrupted
        };
        if let Some(callback) = interrupted {
            log::trace!("animation retargeted before finishing");
            callback(AnimationEndReason::Interrupted);
        }
        if self.inner.borrow().running {
            Self::schedule_frame(&self.inner);
        }
    }

    /// Jumps to `target` without animating.
    pub fn snap_to(&self, target: T) {
        let (interrupted, listener) = {
            let mut inner = self.inner.borrow_mut();
            let interrupted = inner.interrupt();
            inner.current = target.clone();
            inner.start = target.clone();
            inner.target = target.clone();
            (interrupted, inner.on_update.clone())
        };
        if let Some(callback) = interrupted {
            callback(AnimationEndReason::Interrupted);
        }
        if let Some(listener) = listener {
            listener(&target);
        }
    }

    /// Stops at the current value.
    pub fn stop(&self) {
        let interrupted = {
            let mut inner = self.inner.borrow_mut();
            let interrupted = inner.interrupt();
            inner.target = inner.current.clone();
            interrupted
        };
        if let Some(callback) = interrupted {
            callback(AnimationEndReason::Interrupted);
        }
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner<T>>>) {
        let clock = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            inner.clock.clone()
        };
        let generation = this.borrow().generation;
        let weak = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, generation, time);
            }
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner<T>>>, generation: u64, frame_time_nanos: u64) {
        let (value, listener, finished) = {
            let mut inner = this.borrow_mut();
            if inner.generation != generation || !inner.running {
                return;
            }
            inner.registration = None;

            let spec = inner.spec;
            let start_time = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
            let elapsed = frame_time_nanos.saturating_sub(start_time);
            if elapsed < spec.delay_nanos() {
                (None, None, false)
            } else {
                let linear =
                    ((elapsed - spec.delay_nanos()) as f64 / spec.duration_nanos() as f64) as f32;
                let linear = linear.clamp(0.0, 1.0);
                let finished = linear >= 1.0;
                inner.current = if finished {
                    inner.target.clone()
                } else {
                    inner.start.lerp(&inner.target, spec.easing.transform(linear))
                };
                if finished {
                    inner.running = false;
                    inner.start = inner.target.clone();
                    inner.start_time_nanos = None;
                }
                (Some(inner.current.clone()), inner.on_update.clone(), finished)
            }
        };

        if let (Some(value), Some(listener)) = (value.as_ref(), listener) {
            listener(value);
        }

        // The listener may have retargeted this animation.
        if this.borrow().generation != generation {
            return;
        }

        if finished {
            let on_end = this.borrow_mut().on_end.take();
            if let Some(on_end) = on_end {
                on_end(AnimationEndReason::Finished);
            }
        } else {
            Self::schedule_frame(this);
        }
    }
}

impl<T: Lerp + Clone + 'static> AnimatableInner<T> {
    /// Cancels the pending frame and returns the end callback that must be told.
    fn interrupt(&mut self) -> Option<EndCallback> {
        self.generation += 1;
        self.start_time_nanos = None;
        if let Some(registration) = self.registration.take() {
            registration.cancel();
        }
        let was_running = std::mem::replace(&mut self.running, false);
        let on_end = self.on_end.take();
        if was_running {
            on_end
        } else {
            None
        }
    }
}

impl<T: Lerp + Clone + 'static> Clone for Animatable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
