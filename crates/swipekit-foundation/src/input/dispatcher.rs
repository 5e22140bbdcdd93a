//! Queue between a platform event source and the swipe controller.
//!
//! Platform integrations push events as they arrive and the event loop drains
//! them in order once per iteration, before running frame callbacks.

use super::types::{PointerEvent, PointerId};

#[derive(Default)]
pub struct PointerDispatcher {
    queue: Vec<(PointerId, PointerEvent)>,
}

impl PointerDispatcher {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    pub fn push(&mut self, event: PointerEvent) {
        self.queue.push((event.id, event));
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Hands every queued event to `handler` in arrival order.
    ///
    /// Returns how many of them the handler reported as consumed.
    pub fn drain<F>(&mut self, mut handler: F) -> usize
    where
        F: FnMut(PointerId, &PointerEvent) -> bool,
    {
        let mut consumed = 0;
        for (id, event) in self.queue.drain(..) {
            if handler(id, &event) {
                consumed += 1;
            }
        }
        consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_in_arrival_order() {
        let mut dispatcher = PointerDispatcher::new();
        dispatcher.push(PointerEvent::down(1.0, 1.0, 0));
        dispatcher.push(PointerEvent::moved(2.0, 1.0, 8).with_id(4));
        dispatcher.push(PointerEvent::up(3.0, 1.0, 16));
        assert_eq!(dispatcher.len(), 3);

        let mut seen = Vec::new();
        let consumed = dispatcher.drain(|id, event| {
            seen.push((id, event.time_ms));
            event.time_ms > 0
        });

        assert_eq!(seen, vec![(0, 0), (4, 8), (0, 16)]);
        assert_eq!(consumed, 2);
        assert!(dispatcher.is_empty());
    }
}
