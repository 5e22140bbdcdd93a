use super::*;

use std::cell::Cell;
use swipekit_core::Runtime;

use crate::host::RowGeometry;

const FRAME_NANOS: u64 = 16_666_667;
const ROW_HEIGHT: f32 = 100.0;
const WIDTH: f32 = 1000.0;

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Move(f32, usize),
    Up(Option<usize>),
    Click(usize),
    Dismiss(Vec<usize>),
}

#[derive(Default)]
struct Surface {
    offset: Cell<f32>,
    alpha: Cell<f32>,
    height: Cell<f32>,
}

impl RowSurface for Surface {
    fn set_translation_x(&self, offset: f32) {
        self.offset.set(offset);
    }

    fn set_alpha(&self, alpha: f32) {
        self.alpha.set(alpha);
    }

    fn set_height_scale(&self, scale: f32) {
        self.height.set(scale);
    }
}

/// Fixed-height rows that never shrink; removals are only recorded.
struct TestList {
    surfaces: Vec<Rc<Surface>>,
    events: RefCell<Vec<Event>>,
    scroll_suppressed: Cell<bool>,
    controller: RefCell<Option<SwipeDismissController>>,
    pending_seen_on_dismiss: RefCell<Vec<usize>>,
    /// Makes the host side query and reconfigure the controller.
    reentrant: Cell<bool>,
    states_seen: RefCell<Vec<RowState>>,
    phases_seen: RefCell<Vec<SwipePhase>>,
}

impl TestList {
    fn new(rows: usize) -> Rc<Self> {
        Rc::new(Self {
            surfaces: (0..rows)
                .map(|_| {
                    let surface = Surface::default();
                    surface.alpha.set(1.0);
                    surface.height.set(1.0);
                    Rc::new(surface)
                })
                .collect(),
            events: RefCell::new(Vec::new()),
            scroll_suppressed: Cell::new(false),
            controller: RefCell::new(None),
            pending_seen_on_dismiss: RefCell::new(Vec::new()),
            reentrant: Cell::new(false),
            states_seen: RefCell::new(Vec::new()),
            phases_seen: RefCell::new(Vec::new()),
        })
    }

    fn take_events(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    fn with_controller(&self, f: impl FnOnce(&SwipeDismissController)) {
        if !self.reentrant.get() {
            return;
        }
        if let Some(controller) = self.controller.borrow().as_ref() {
            f(controller);
        }
    }

    fn dismissals(&self) -> Vec<Vec<usize>> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::Dismiss(rows) => Some(rows.clone()),
                _ => None,
            })
            .collect()
    }
}

impl SwipeHost for TestList {
    fn row_at(&self, _x: f32, y: f32) -> Option<usize> {
        if y < 0.0 {
            return None;
        }
        let row = (y / ROW_HEIGHT) as usize;
        (row < self.surfaces.len()).then_some(row)
    }

    fn can_dismiss(&self, row: usize) -> bool {
        self.with_controller(|controller| {
            self.states_seen.borrow_mut().push(controller.row_state(row))
        });
        true
    }

    fn row_geometry(&self, row: usize) -> Option<RowGeometry> {
        (row < self.surfaces.len())
            .then(|| RowGeometry::new(row as f32 * ROW_HEIGHT, ROW_HEIGHT))
    }

    fn container_width(&self) -> f32 {
        WIDTH
    }

    fn row_surface(&self, row: usize) -> Option<Rc<dyn RowSurface>> {
        self.surfaces
            .get(row)
            .map(|surface| surface.clone() as Rc<dyn RowSurface>)
    }

    fn suppress_scroll(&self) {
        self.with_controller(|controller| self.phases_seen.borrow_mut().push(controller.phase()));
        self.scroll_suppressed.set(true);
    }

    fn restore_scroll(&self) {
        self.with_controller(|controller| controller.set_enabled(false));
        self.scroll_suppressed.set(false);
    }
}

impl DismissCallbacks for TestList {
    fn on_dismiss(&self, rows_descending: &[usize]) {
        if let Some(controller) = self.controller.borrow().as_ref() {
            *self.pending_seen_on_dismiss.borrow_mut() = controller.pending_dismissals();
        }
        self.events
            .borrow_mut()
            .push(Event::Dismiss(rows_descending.to_vec()));
    }

    fn on_item_move(&self, delta_x: f32, row: usize) {
        self.events.borrow_mut().push(Event::Move(delta_x, row));
    }

    fn on_action_up(&self, row: Option<usize>) {
        self.events.borrow_mut().push(Event::Up(row));
    }

    fn on_click(&self, row: usize) {
        self.events.borrow_mut().push(Event::Click(row));
    }
}

struct Harness {
    runtime: Runtime,
    list: Rc<TestList>,
    controller: SwipeDismissController,
    frame_time: u64,
}

impl Harness {
    fn new(rows: usize) -> Self {
        let runtime = Runtime::new();
        let list = TestList::new(rows);
        let controller = SwipeDismissController::new(
            list.clone(),
            list.clone(),
            runtime.frame_clock(),
            SwipeConfig::default(),
        )
        .expect("default config");
        *list.controller.borrow_mut() = Some(controller.clone());
        Self {
            runtime,
            list,
            controller,
            frame_time: 0,
        }
    }

    fn send(&self, event: PointerEvent) -> bool {
        let consumed = self.controller.on_pointer_event(&event);
        assert_eq!(consumed, event.is_consumed());
        consumed
    }

    /// Presses on `row`, drags horizontally by `dx` in eight 16 ms steps.
    /// Returns the time of the last move.
    fn drag(&self, row: usize, dx: f32, start_ms: i64) -> i64 {
        let y = row as f32 * ROW_HEIGHT + ROW_HEIGHT / 2.0;
        self.send(PointerEvent::down(500.0, y, start_ms));
        let mut time = start_ms;
        for step in 1..=8 {
            time += 16;
            self.send(PointerEvent::moved(500.0 + dx * step as f32 / 8.0, y, time));
        }
        time
    }

    /// Holds still long enough for the velocity to read as zero, then lifts.
    fn release_slowly(&self, row: usize, dx: f32, last_ms: i64) -> bool {
        let y = row as f32 * ROW_HEIGHT + ROW_HEIGHT / 2.0;
        self.send(PointerEvent::up(500.0 + dx, y, last_ms + 100))
    }

    fn run_until_idle(&mut self) {
        let mut frames = 0;
        while self.runtime.has_frame_callbacks() && frames < 500 {
            self.frame_time += FRAME_NANOS;
            self.runtime.drain_frame_callbacks(self.frame_time);
            frames += 1;
        }
    }

    fn pump(&mut self, frames: usize) {
        for _ in 0..frames {
            self.frame_time += FRAME_NANOS;
            self.runtime.drain_frame_callbacks(self.frame_time);
        }
    }
}

#[test]
fn tap_clicks_and_passes_through() {
    let harness = Harness::new(5);
    assert!(!harness.send(PointerEvent::down(300.0, 150.0, 0)));
    assert!(!harness.send(PointerEvent::moved(303.0, 152.0, 16)));
    assert!(!harness.send(PointerEvent::up(303.0, 152.0, 40)));

    assert_eq!(
        harness.list.take_events(),
        vec![Event::Up(Some(1)), Event::Click(1)]
    );
    assert_eq!(harness.controller.phase(), SwipePhase::Idle);
}

#[test]
fn swipe_moves_row_and_reports_displacement() {
    let harness = Harness::new(5);
    harness.send(PointerEvent::down(500.0, 250.0, 0));
    assert!(!harness.send(PointerEvent::moved(505.0, 250.0, 16)));
    assert!(harness.send(PointerEvent::moved(380.0, 252.0, 32)));
    assert!(harness.send(PointerEvent::moved(250.0, 255.0, 48)));

    assert!(harness.list.scroll_suppressed.get());
    assert_eq!(
        harness.controller.phase(),
        SwipePhase::Tracking(GestureMode::Swiping)
    );
    assert_eq!(
        harness.controller.row_state(2),
        RowState::Tracking(GestureMode::Swiping)
    );
    assert_eq!(
        harness.list.take_events(),
        vec![Event::Move(-120.0, 2), Event::Move(-250.0, 2)]
    );
    let surface = &harness.list.surfaces[2];
    assert_eq!(surface.offset.get(), -250.0);
    assert_eq!(surface.alpha.get(), 0.5);
}

#[test]
fn far_release_without_moves_is_not_a_tap() {
    let mut harness = Harness::new(5);
    harness.send(PointerEvent::down(150.0, 350.0, 0));
    assert!(harness.send(PointerEvent::up(850.0, 350.0, 50)));

    assert_eq!(harness.list.take_events(), vec![Event::Up(Some(3))]);
    assert_eq!(
        harness.controller.row_state(3),
        RowState::DismissAnimating(SwipeDirection::Right)
    );
    assert!(!harness.list.scroll_suppressed.get());

    harness.run_until_idle();
    assert_eq!(harness.list.dismissals(), vec![vec![3]]);
}

#[test]
fn far_vertical_release_without_moves_passes_through() {
    let harness = Harness::new(5);
    harness.send(PointerEvent::down(500.0, 50.0, 0));
    assert!(!harness.send(PointerEvent::up(504.0, 290.0, 50)));

    assert_eq!(harness.list.take_events(), vec![Event::Up(Some(0))]);
    assert_eq!(harness.controller.phase(), SwipePhase::Idle);
}

#[test]
fn vertical_drag_is_left_to_the_list() {
    let harness = Harness::new(5);
    harness.send(PointerEvent::down(500.0, 150.0, 0));
    assert!(!harness.send(PointerEvent::moved(502.0, 190.0, 16)));
    assert!(!harness.send(PointerEvent::moved(800.0, 260.0, 32)));
    assert!(!harness.send(PointerEvent::up(800.0, 260.0, 48)));

    assert_eq!(harness.list.take_events(), vec![Event::Up(Some(1))]);
    assert!(!harness.list.scroll_suppressed.get());
    assert_eq!(harness.list.surfaces[1].offset.get(), 0.0);
}

#[test]
fn up_without_session_still_reports_action_up() {
    let harness = Harness::new(2);
    // Below the last row: nothing to track.
    harness.send(PointerEvent::down(10.0, 900.0, 0));
    harness.send(PointerEvent::up(10.0, 900.0, 10));
    harness.send(PointerEvent::cancel(10.0, 900.0, 20));
    assert_eq!(
        harness.list.take_events(),
        vec![Event::Up(None), Event::Up(None)]
    );
}

#[test]
fn slow_release_past_half_width_dismisses() {
    let mut harness = Harness::new(5);
    let last = harness.drag(3, 600.0, 0);
    assert!(harness.release_slowly(3, 600.0, last));
    assert!(!harness.list.scroll_suppressed.get());
    assert_eq!(
        harness.controller.row_state(3),
        RowState::DismissAnimating(SwipeDirection::Right)
    );
    assert_eq!(harness.controller.pending_dismissals(), vec![3]);
    assert_eq!(harness.controller.phase(), SwipePhase::Animating);

    harness.run_until_idle();

    assert_eq!(harness.list.dismissals(), vec![vec![3]]);
    assert_eq!(harness.controller.row_state(3), RowState::Idle);
    assert_eq!(harness.controller.phase(), SwipePhase::Idle);
    // Surfaces come back clean for reuse.
    let surface = &harness.list.surfaces[3];
    assert_eq!(surface.offset.get(), 0.0);
    assert_eq!(surface.alpha.get(), 1.0);
    assert_eq!(surface.height.get(), 1.0);
}

#[test]
fn short_slow_release_settles() {
    let mut harness = Harness::new(5);
    let last = harness.drag(0, -300.0, 0);
    harness.release_slowly(0, -300.0, last);
    assert_eq!(harness.controller.row_state(0), RowState::SettleAnimating);

    harness.run_until_idle();
    assert!(harness.list.dismissals().is_empty());
    assert_eq!(harness.list.surfaces[0].offset.get(), 0.0);
    assert_eq!(harness.controller.row_state(0), RowState::Idle);
}

#[test]
fn cancel_forces_settle_even_past_threshold() {
    let mut harness = Harness::new(5);
    let last = harness.drag(1, -900.0, 0);
    assert!(harness.send(PointerEvent::cancel(-400.0, 150.0, last + 5)));
    assert_eq!(harness.controller.row_state(1), RowState::SettleAnimating);
    assert!(!harness.list.scroll_suppressed.get());

    harness.run_until_idle();
    assert!(harness.list.dismissals().is_empty());
    assert_eq!(harness.list.events.borrow().last(), Some(&Event::Up(Some(1))));
}

#[test]
fn animating_rows_reject_new_sessions() {
    let mut harness = Harness::new(5);
    let last = harness.drag(2, 700.0, 0);
    harness.release_slowly(2, 700.0, last);
    harness.pump(2);
    harness.list.take_events();

    harness.send(PointerEvent::down(500.0, 250.0, 500));
    assert_eq!(
        harness.controller.row_state(2),
        RowState::DismissAnimating(SwipeDirection::Right)
    );
    assert!(!harness.send(PointerEvent::moved(100.0, 250.0, 520)));
    harness.send(PointerEvent::up(100.0, 250.0, 540));
    assert_eq!(harness.list.take_events(), vec![Event::Up(None)]);
}

#[test]
fn finished_dismissal_waits_for_other_animations() {
    let mut harness = Harness::new(6);
    let last = harness.drag(4, 800.0, 0);
    harness.release_slowly(4, 800.0, last);
    harness.pump(4);

    let last = harness.drag(1, 100.0, 1_000);
    harness.release_slowly(1, 100.0, last);

    // Row 1 has settled; row 4 is still collapsing.
    harness.pump(20);
    assert_eq!(harness.controller.row_state(1), RowState::Idle);
    assert_eq!(harness.controller.phase(), SwipePhase::Animating);
    assert!(harness.list.dismissals().is_empty());

    harness.run_until_idle();
    assert_eq!(harness.list.dismissals(), vec![vec![4]]);
}

#[test]
fn open_session_defers_publication() {
    let mut harness = Harness::new(6);
    let last = harness.drag(5, 900.0, 0);
    harness.release_slowly(5, 900.0, last);

    // Finger rests on row 0 while row 5 finishes.
    harness.send(PointerEvent::down(500.0, 50.0, 400));
    harness.run_until_idle();
    assert_eq!(harness.controller.row_state(5), RowState::PendingRemoval);
    assert!(harness.list.dismissals().is_empty());

    harness.send(PointerEvent::up(500.0, 50.0, 900));
    assert_eq!(harness.list.dismissals(), vec![vec![5]]);
}

#[test]
fn paused_controller_ignores_new_gestures() {
    let harness = Harness::new(3);
    harness.controller.on_scroll_state_changed(ListScrollState::Fling);
    assert!(!harness.controller.is_enabled());
    harness.drag(0, 600.0, 0);
    assert_eq!(harness.controller.phase(), SwipePhase::Idle);

    harness.controller.on_scroll_state_changed(ListScrollState::Idle);
    harness.controller.set_enabled(false);
    assert!(!harness.controller.is_enabled());
    harness.send(PointerEvent::up(0.0, 0.0, 200));

    harness.controller.set_enabled(true);
    assert!(harness.controller.is_enabled());
    harness.send(PointerEvent::down(500.0, 50.0, 300));
    assert_eq!(
        harness.controller.phase(),
        SwipePhase::Tracking(GestureMode::Undecided)
    );
}

#[test]
fn second_pointer_is_ignored_while_session_open() {
    let harness = Harness::new(4);
    harness.send(PointerEvent::down(500.0, 50.0, 0));
    harness.send(PointerEvent::down(500.0, 250.0, 5).with_id(1));
    assert!(!harness.send(PointerEvent::moved(100.0, 250.0, 10).with_id(1)));
    assert!(!harness.send(PointerEvent::up(100.0, 250.0, 15).with_id(1)));

    assert!(harness.list.take_events().is_empty());
    assert_eq!(
        harness.controller.row_state(0),
        RowState::Tracking(GestureMode::Undecided)
    );
}

#[test]
fn callbacks_may_query_controller() {
    let mut harness = Harness::new(3);
    let last = harness.drag(1, 700.0, 0);
    harness.release_slowly(1, 700.0, last);
    harness.run_until_idle();
    assert_eq!(harness.list.dismissals(), vec![vec![1]]);
    assert!(harness.list.pending_seen_on_dismiss.borrow().is_empty());
    // Break the list <-> controller cycle.
    harness.list.controller.borrow_mut().take();
}

#[test]
fn host_may_query_controller() {
    let mut harness = Harness::new(3);
    harness.list.reentrant.set(true);
    let last = harness.drag(1, 700.0, 0);
    harness.release_slowly(1, 700.0, last);

    assert_eq!(*harness.list.states_seen.borrow(), vec![RowState::Idle]);
    assert_eq!(
        *harness.list.phases_seen.borrow(),
        vec![SwipePhase::Tracking(GestureMode::Swiping)]
    );
    // Disabled from restore_scroll; the running dismissal still finishes.
    assert!(!harness.controller.is_enabled());
    harness.run_until_idle();
    assert_eq!(harness.list.dismissals(), vec![vec![1]]);

    harness.list.controller.borrow_mut().take();
}

#[test]
fn invalid_config_is_rejected() {
    let runtime = Runtime::new();
    let list = TestList::new(1);
    let result = SwipeDismissController::new(
        list.clone(),
        list,
        runtime.frame_clock(),
        SwipeConfig::default().with_dismiss_fraction(0.0),
    );
    assert!(matches!(
        result,
        Err(ConfigError::OutOfRange {
            field: "dismiss_fraction",
            ..
        })
    ));
}
