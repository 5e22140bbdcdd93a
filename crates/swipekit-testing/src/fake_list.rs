//! In-memory list that records everything the controller tells it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use swipekit_list::{DismissCallbacks, RowGeometry, RowSurface, SwipeHost};

/// A notification as the list received it.
#[derive(Clone, Debug, PartialEq)]
pub enum ListEvent {
    ItemMove { delta_x: f32, row: usize },
    ActionUp(Option<usize>),
    Click(usize),
    Dismiss(Vec<usize>),
}

/// Row visual that remembers what it was last set to.
#[derive(Debug)]
pub struct FakeSurface {
    translation_x: Cell<f32>,
    alpha: Cell<f32>,
    height_scale: Cell<f32>,
    resets: Cell<usize>,
}

impl FakeSurface {
    pub fn new() -> Self {
        Self {
            translation_x: Cell::new(0.0),
            alpha: Cell::new(1.0),
            height_scale: Cell::new(1.0),
            resets: Cell::new(0),
        }
    }

    pub fn translation_x(&self) -> f32 {
        self.translation_x.get()
    }

    pub fn alpha(&self) -> f32 {
        self.alpha.get()
    }

    pub fn height_scale(&self) -> f32 {
        self.height_scale.get()
    }

    pub fn reset_count(&self) -> usize {
        self.resets.get()
    }

    pub fn is_at_rest(&self) -> bool {
        self.translation_x() == 0.0 && self.alpha() == 1.0 && self.height_scale() == 1.0
    }
}

impl Default for FakeSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RowSurface for FakeSurface {
    fn set_translation_x(&self, offset: f32) {
        self.translation_x.set(offset);
    }

    fn set_alpha(&self, alpha: f32) {
        self.alpha.set(alpha);
    }

    fn set_height_scale(&self, scale: f32) {
        self.height_scale.set(scale);
    }

    fn reset(&self) {
        self.resets.set(self.resets.get() + 1);
        self.set_translation_x(0.0);
        self.set_alpha(1.0);
        self.set_height_scale(1.0);
    }
}

struct FakeRow {
    label: String,
    surface: Rc<FakeSurface>,
}

/// Fixed-height rows stacked from the top of the list.
///
/// Dismissed rows are removed in the order the batch lists them, the same
/// way a real adapter would. An index that no longer exists at that point is
/// recorded as a violation instead of panicking.
pub struct FakeList {
    rows: RefCell<Vec<FakeRow>>,
    row_height: f32,
    width: Cell<f32>,
    scroll_offset: Cell<f32>,
    locked: RefCell<Vec<String>>,
    scroll_suppressed: Cell<bool>,
    events: RefCell<Vec<ListEvent>>,
    violations: RefCell<Vec<usize>>,
}

impl FakeList {
    /// `count` rows labelled "Item 1" … "Item {count}".
    pub fn new(count: usize, row_height: f32, width: f32) -> Rc<Self> {
        let rows = (1..=count)
            .map(|n| FakeRow {
                label: format!("Item {n}"),
                surface: Rc::new(FakeSurface::new()),
            })
            .collect();
        Rc::new(Self {
            rows: RefCell::new(rows),
            row_height,
            width: Cell::new(width),
            scroll_offset: Cell::new(0.0),
            locked: RefCell::new(Vec::new()),
            scroll_suppressed: Cell::new(false),
            events: RefCell::new(Vec::new()),
            violations: RefCell::new(Vec::new()),
        })
    }

    pub fn len(&self) -> usize {
        self.rows.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.borrow().is_empty()
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    pub fn labels(&self) -> Vec<String> {
        self.rows
            .borrow()
            .iter()
            .map(|row| row.label.clone())
            .collect()
    }

    pub fn label(&self, row: usize) -> Option<String> {
        self.rows.borrow().get(row).map(|row| row.label.clone())
    }

    pub fn surface(&self, row: usize) -> Option<Rc<FakeSurface>> {
        self.rows.borrow().get(row).map(|row| Rc::clone(&row.surface))
    }

    /// Vertical centre of `row` in list coordinates.
    pub fn row_center_y(&self, row: usize) -> f32 {
        row as f32 * self.row_height - self.scroll_offset.get() + self.row_height / 2.0
    }

    pub fn width(&self) -> f32 {
        self.width.get()
    }

    /// Simulates a relayout at a new width; call the controller's `on_layout` after.
    pub fn set_width(&self, width: f32) {
        self.width.set(width);
    }

    pub fn set_scroll_offset(&self, offset: f32) {
        self.scroll_offset.set(offset);
    }

    /// Makes the row currently labelled `label` refuse dismissal.
    pub fn lock(&self, label: &str) {
        self.locked.borrow_mut().push(label.to_owned());
    }

    pub fn is_scroll_suppressed(&self) -> bool {
        self.scroll_suppressed.get()
    }

    pub fn events(&self) -> Vec<ListEvent> {
        self.events.borrow().clone()
    }

    pub fn take_events(&self) -> Vec<ListEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn dismiss_batches(&self) -> Vec<Vec<usize>> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                ListEvent::Dismiss(rows) => Some(rows.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clicks(&self) -> Vec<usize> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                ListEvent::Click(row) => Some(*row),
                _ => None,
            })
            .collect()
    }

    pub fn item_moves(&self) -> Vec<(f32, usize)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                ListEvent::ItemMove { delta_x, row } => Some((*delta_x, *row)),
                _ => None,
            })
            .collect()
    }

    /// Indices that were already gone when a batch asked to remove them.
    pub fn violations(&self) -> Vec<usize> {
        self.violations.borrow().clone()
    }

    fn record(&self, event: ListEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl SwipeHost for FakeList {
    fn row_at(&self, _x: f32, y: f32) -> Option<usize> {
        let content_y = y + self.scroll_offset.get();
        if content_y < 0.0 || self.row_height <= 0.0 {
            return None;
        }
        let row = (content_y / self.row_height) as usize;
        (row < self.len()).then_some(row)
    }

    fn can_dismiss(&self, row: usize) -> bool {
        let locked = self.locked.borrow();
        self.label(row)
            .is_some_and(|label| !locked.iter().any(|l| *l == label))
    }

    fn row_geometry(&self, row: usize) -> Option<RowGeometry> {
        (row < self.len()).then(|| {
            RowGeometry::new(
                row as f32 * self.row_height - self.scroll_offset.get(),
                self.row_height,
            )
        })
    }

    fn container_width(&self) -> f32 {
        self.width.get()
    }

    fn row_surface(&self, row: usize) -> Option<Rc<dyn RowSurface>> {
        self.surface(row)
            .map(|surface| surface as Rc<dyn RowSurface>)
    }

    fn suppress_scroll(&self) {
        self.scroll_suppressed.set(true);
    }

    fn restore_scroll(&self) {
        self.scroll_suppressed.set(false);
    }
}

impl DismissCallbacks for FakeList {
    fn on_dismiss(&self, rows_descending: &[usize]) {
        {
            let mut rows = self.rows.borrow_mut();
            for &row in rows_descending {
                if row < rows.len() {
                    let removed = rows.remove(row);
                    log::debug!("removed {} at {row}", removed.label);
                } else {
                    self.violations.borrow_mut().push(row);
                }
            }
        }
        self.record(ListEvent::Dismiss(rows_descending.to_vec()));
    }

    fn on_item_move(&self, delta_x: f32, row: usize) {
        self.record(ListEvent::ItemMove { delta_x, row });
    }

    fn on_action_up(&self, row: Option<usize>) {
        self.record(ListEvent::ActionUp(row));
    }

    fn on_click(&self, row: usize) {
        self.record(ListEvent::Click(row));
    }
}
