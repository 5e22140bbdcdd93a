//! Replays a scripted gesture session against a 20 row list in real time.
//!
//! Run with `RUST_LOG=debug` to see session decisions, or `trace` for every
//! move and frame.

mod list;
mod script;

use std::thread;
use std::time::Duration;

use anyhow::{ensure, Context};
use swipekit_core::Runtime;
use swipekit_foundation::{PointerDispatcher, PointerEvent, SwipeConfig, UptimeClock};
use swipekit_list::SwipeDismissController;

use crate::list::DemoList;
use crate::script::{demo_script, Action};

const ITEM_COUNT: usize = 20;
const ROW_HEIGHT: f32 = 80.0;
const LIST_WIDTH: f32 = 1080.0;
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let config = SwipeConfig::default();
    let runtime = Runtime::new();
    let list = DemoList::new(ITEM_COUNT, ROW_HEIGHT, LIST_WIDTH, config.indicator_dead_zone);
    let controller =
        SwipeDismissController::new(list.clone(), list.clone(), runtime.frame_clock(), config)
            .context("building swipe controller")?;

    let steps = demo_script(ROW_HEIGHT, list.width());
    log::info!("replaying {} scripted actions on {} rows", steps.len(), list.len());

    let clock = UptimeClock::new();
    let mut dispatcher = PointerDispatcher::new();
    let mut timeline = steps.into_iter().peekable();

    loop {
        let now = clock.now_ms();
        while let Some(step) = timeline.next_if(|step| step.at_ms <= now) {
            match step.action {
                Action::Pointer(kind, position) => {
                    dispatcher.push(PointerEvent::new(kind, position, step.at_ms));
                }
                Action::ScrollState(state) => controller.on_scroll_state_changed(state),
            }
        }

        let consumed = dispatcher.drain(|_, event| controller.on_pointer_event(event));
        if consumed > 0 {
            log::trace!("{consumed} pointer events consumed by swipe");
        }
        runtime.drain_frame_callbacks(clock.now_nanos());

        if timeline.peek().is_none() && !runtime.has_frame_callbacks() {
            break;
        }
        thread::sleep(FRAME_INTERVAL);
    }

    log::info!("remaining: {}", list.texts().join(", "));
    ensure!(
        list.len() + list.removed() == ITEM_COUNT,
        "list lost track of rows: {} left, {} removed",
        list.len(),
        list.removed()
    );
    ensure!(list.all_at_rest(), "a remaining row was left mid-animation");
    ensure!(
        controller.pending_dismissals().is_empty(),
        "dismissals still pending after replay"
    );
    Ok(())
}
