//! Terminal animations of swiped rows.
//!
//! A settled row slides back to rest. A dismissed row slides past the
//! container edge while fading out, then collapses its height. Each row gets
//! exactly one completion signal, after its last phase.

use std::cell::Cell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use swipekit_animation::{Animatable, AnimationSpec, Easing, Lerp};
use swipekit_core::FrameClock;
use swipekit_foundation::gestures::{dismiss_offset, swipe_alpha};
use swipekit_foundation::SwipeDirection;

use crate::host::RowSurface;

/// Horizontal offset and opacity of a row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowVisual {
    pub offset_x: f32,
    pub alpha: f32,
}

impl RowVisual {
    pub const REST: RowVisual = RowVisual {
        offset_x: 0.0,
        alpha: 1.0,
    };

    /// Visual of a row dragged `delta_x` in a container `width` wide.
    pub fn swiping(delta_x: f32, width: f32) -> Self {
        Self {
            offset_x: delta_x,
            alpha: swipe_alpha(delta_x, width),
        }
    }

    pub fn dismissed(direction: SwipeDirection, width: f32) -> Self {
        Self {
            offset_x: dismiss_offset(direction, width),
            alpha: 0.0,
        }
    }

    pub fn apply(&self, surface: &dyn RowSurface) {
        surface.set_translation_x(self.offset_x);
        surface.set_alpha(self.alpha);
    }
}

impl Lerp for RowVisual {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Self {
            offset_x: Lerp::lerp(&self.offset_x, &target.offset_x, fraction),
            alpha: Lerp::lerp(&self.alpha, &target.alpha, fraction),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowAnimationKind {
    Settle,
    Dismiss(SwipeDirection),
}

/// Animations bound to one row surface.
struct RowAnimationHandle {
    kind: RowAnimationKind,
    surface: Option<Rc<dyn RowSurface>>,
    // Kept alive here; the frame callbacks only hold weak references.
    _visual: Animatable<RowVisual>,
    _height: Option<Animatable<f32>>,
    running: Rc<Cell<bool>>,
}

/// Owns every in-flight row animation, keyed by row index.
///
/// Dismissed rows stay registered after their animation ends until the
/// batch containing them is published and [`RowAnimator::release`] is called.
pub struct RowAnimator {
    clock: FrameClock,
    slide: AnimationSpec,
    settle: AnimationSpec,
    collapse: AnimationSpec,
    rows: FxHashMap<usize, RowAnimationHandle>,
}

impl RowAnimator {
    pub fn new(clock: FrameClock, duration_millis: u64) -> Self {
        Self {
            clock,
            slide: AnimationSpec::tween(duration_millis, Easing::AccelerateDecelerate),
            settle: AnimationSpec::tween(duration_millis, Easing::LinearOutSlowIn),
            collapse: AnimationSpec::tween(duration_millis, Easing::FastOutLinearIn),
            rows: FxHashMap::default(),
        }
    }

    /// Slides `row` from `from` back to rest and fades it in.
    pub fn settle(
        &mut self,
        row: usize,
        surface: Option<Rc<dyn RowSurface>>,
        from: RowVisual,
        on_done: impl FnOnce(usize) + 'static,
    ) {
        let running = Rc::new(Cell::new(true));
        let visual = self.visual_animation(from, surface.clone());

        let done_flag = Rc::clone(&running);
        visual.animate_to(RowVisual::REST, self.settle, move |_| {
            done_flag.set(false);
            on_done(row);
        });

        self.insert(
            row,
            RowAnimationHandle {
                kind: RowAnimationKind::Settle,
                surface,
                _visual: visual,
                _height: None,
                running,
            },
        );
    }

    /// Slides `row` out toward `direction`, then collapses it.
    pub fn dismiss(
        &mut self,
        row: usize,
        surface: Option<Rc<dyn RowSurface>>,
        from: RowVisual,
        direction: SwipeDirection,
        width: f32,
        on_done: impl FnOnce(usize) + 'static,
    ) {
        let running = Rc::new(Cell::new(true));
        let visual = self.visual_animation(from, surface.clone());

        let height = Animatable::new(1.0f32, self.clock.clone());
        if let Some(surface) = surface.clone() {
            height.set_on_update(move |scale| surface.set_height_scale(*scale));
        }

        let collapse = self.collapse;
        let collapsing = height.clone();
        let done_flag = Rc::clone(&running);
        visual.animate_to(
            RowVisual::dismissed(direction, width),
            self.slide,
            move |_| {
                log::trace!("row {row} slid out, collapsing");
                collapsing.animate_to(0.0, collapse, move |_| {
                    done_flag.set(false);
                    on_done(row);
                });
            },
        );

        self.insert(
            row,
            RowAnimationHandle {
                kind: RowAnimationKind::Dismiss(direction),
                surface,
                _visual: visual,
                _height: Some(height),
                running,
            },
        );
    }

    pub fn kind(&self, row: usize) -> Option<RowAnimationKind> {
        self.rows.get(&row).map(|handle| handle.kind)
    }

    /// Registered, whether still moving or waiting for removal.
    pub fn contains(&self, row: usize) -> bool {
        self.rows.contains_key(&row)
    }

    pub fn is_running(&self, row: usize) -> bool {
        self.rows
            .get(&row)
            .is_some_and(|handle| handle.running.get())
    }

    pub fn running_count(&self) -> usize {
        self.rows
            .values()
            .filter(|handle| handle.running.get())
            .count()
    }

    /// Drops the handle for `row` and hands back its surface.
    pub fn release(&mut self, row: usize) -> Option<Rc<dyn RowSurface>> {
        self.rows.remove(&row).and_then(|handle| handle.surface)
    }

    fn visual_animation(
        &self,
        from: RowVisual,
        surface: Option<Rc<dyn RowSurface>>,
    ) -> Animatable<RowVisual> {
        let visual = Animatable::new(from, self.clock.clone());
        if let Some(surface) = surface {
            visual.set_on_update(move |value: &RowVisual| value.apply(surface.as_ref()));
        }
        visual
    }

    fn insert(&mut self, row: usize, handle: RowAnimationHandle) {
        if let Some(previous) = self.rows.insert(row, handle) {
            log::warn!(
                "row {row} restarted while {:?} was registered; its completion is lost",
                previous.kind
            );
        }
    }
}

#[cfg(test)]
#[path = "tests/row_animator_tests.rs"]
mod tests;
