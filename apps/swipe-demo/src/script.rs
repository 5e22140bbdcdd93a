//! The gesture session the demo replays.

use swipekit_foundation::{Point, PointerEventKind};
use swipekit_list::ListScrollState;

#[derive(Clone, Copy, Debug)]
pub enum Action {
    Pointer(PointerEventKind, Point),
    ScrollState(ListScrollState),
}

/// An action due at `at_ms` after the replay starts.
#[derive(Clone, Copy, Debug)]
pub struct Step {
    pub at_ms: i64,
    pub action: Action,
}

/// Builds a timeline of pointer actions on a list of fixed-height rows.
pub struct ScriptBuilder {
    steps: Vec<Step>,
    time_ms: i64,
    row_height: f32,
    x: f32,
    y: f32,
}

impl ScriptBuilder {
    pub fn new(row_height: f32, width: f32) -> Self {
        Self {
            steps: Vec::new(),
            time_ms: 0,
            row_height,
            x: width / 2.0,
            y: 0.0,
        }
    }

    fn push(&mut self, action: Action) {
        self.steps.push(Step {
            at_ms: self.time_ms,
            action,
        });
    }

    fn pointer(&mut self, kind: PointerEventKind) {
        self.push(Action::Pointer(kind, Point::new(self.x, self.y)));
    }

    pub fn pause(&mut self, millis: i64) -> &mut Self {
        self.time_ms += millis;
        self
    }

    pub fn press(&mut self, row: usize) -> &mut Self {
        self.y = row as f32 * self.row_height + self.row_height / 2.0;
        self.pointer(PointerEventKind::Down);
        self
    }

    pub fn drag(&mut self, dx: f32, dy: f32, steps: usize, interval_ms: i64) -> &mut Self {
        let steps = steps.max(1);
        let step_x = dx / steps as f32;
        let step_y = dy / steps as f32;
        for _ in 0..steps {
            self.time_ms += interval_ms;
            self.x += step_x;
            self.y += step_y;
            self.pointer(PointerEventKind::Move);
        }
        self
    }

    pub fn release(&mut self) -> &mut Self {
        self.time_ms += 1;
        self.pointer(PointerEventKind::Up);
        self
    }

    pub fn cancel(&mut self) -> &mut Self {
        self.time_ms += 1;
        self.pointer(PointerEventKind::Cancel);
        self
    }

    /// Returns the pointer to the horizontal centre for the next gesture.
    pub fn recenter(&mut self, width: f32) -> &mut Self {
        self.x = width / 2.0;
        self
    }

    pub fn scroll_state(&mut self, state: ListScrollState) -> &mut Self {
        self.push(Action::ScrollState(state));
        self
    }

    pub fn build(&mut self) -> Vec<Step> {
        std::mem::take(&mut self.steps)
    }
}

/// Tap, slow dismiss, fling, a two-row burst, a scroll, a paused swipe and a
/// cancelled swipe, with enough pause between them for animations to end.
pub fn demo_script(row_height: f32, width: f32) -> Vec<Step> {
    let mut script = ScriptBuilder::new(row_height, width);
    script
        // Tap on "Item 1".
        .press(0)
        .pause(60)
        .release()
        .pause(400)
        // Slow swipe of row 3 past half the width, held before lifting.
        .press(3)
        .drag(width * 0.6, 0.0, 12, 16)
        .pause(120)
        .release()
        .recenter(width)
        .pause(600)
        // Short fast fling to the left on row 7.
        .press(7)
        .drag(-width * 0.2, 0.0, 6, 8)
        .release()
        .recenter(width)
        .pause(600)
        // Burst: row 2 is still animating when row 5 is released.
        .press(2)
        .drag(width * 0.7, 0.0, 8, 16)
        .pause(100)
        .release()
        .recenter(width)
        .pause(80)
        .press(5)
        .drag(width * 0.6, 0.0, 8, 16)
        .pause(100)
        .release()
        .recenter(width)
        .pause(700)
        // Vertical drag: the list scrolls, nothing is swiped.
        .press(4)
        .drag(4.0, 240.0, 8, 16)
        .release()
        .recenter(width)
        .pause(200)
        // While the list flings, swipes are ignored.
        .scroll_state(ListScrollState::Fling)
        .press(1)
        .drag(width * 0.8, 0.0, 8, 16)
        .pause(100)
        .release()
        .recenter(width)
        .scroll_state(ListScrollState::Idle)
        .pause(200)
        // Cancelled swipe settles back.
        .press(6)
        .drag(-width * 0.7, 0.0, 8, 16)
        .cancel()
        .recenter(width)
        .pause(400);
    script.build()
}
