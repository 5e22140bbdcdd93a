//! Collects dismissed rows of a burst and releases them as one batch.

use smallvec::SmallVec;

pub type RowBatch = SmallVec<[usize; 8]>;

/// Pending dismissals plus the number of row animations still running.
///
/// A burst is every swipe whose animation overlaps another's. The batch is
/// only handed out once nothing animates any more, so every index in it still
/// refers to the row it was captured for.
#[derive(Debug, Default)]
pub struct DismissalBatcher {
    pending: RowBatch,
    live_animations: usize,
}

impl DismissalBatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a dismiss verdict. Duplicates are dropped.
    pub fn add_pending(&mut self, row: usize) -> bool {
        if self.pending.contains(&row) {
            log::warn!("row {row} is already pending dismissal");
            return false;
        }
        self.pending.push(row);
        true
    }

    pub fn animation_started(&mut self) {
        self.live_animations += 1;
    }

    pub fn animation_finished(&mut self) {
        match self.live_animations.checked_sub(1) {
            Some(live) => self.live_animations = live,
            None => log::warn!("animation finished with no live animations"),
        }
    }

    pub fn live_animations(&self) -> usize {
        self.live_animations
    }

    pub fn is_pending(&self, row: usize) -> bool {
        self.pending.contains(&row)
    }

    /// Pending rows in the order their verdicts were issued.
    pub fn pending(&self) -> &[usize] {
        &self.pending
    }

    pub fn is_ready(&self) -> bool {
        self.live_animations == 0 && !self.pending.is_empty()
    }

    /// Takes the batch, sorted descending, if the burst has settled.
    pub fn take_ready(&mut self) -> Option<RowBatch> {
        if !self.is_ready() {
            return None;
        }
        let mut batch = std::mem::take(&mut self.pending);
        batch.sort_unstable_by(|a, b| b.cmp(a));
        Some(batch)
    }
}
