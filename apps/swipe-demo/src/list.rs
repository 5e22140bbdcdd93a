//! The demo's list: twenty text rows and two edge indicators.
//!
//! Rows stack at their current height scale, so a collapsed row waiting for
//! removal no longer takes hits.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use swipekit_list::{
    DismissCallbacks, EdgeIndicator, IndicatorPlacement, RowGeometry, RowSurface, SwipeHost,
};

/// Offset of the list inside the screen, for indicator placement.
pub const LIST_TOP_OFFSET: f32 = 0.0;

/// Visual state of one bound row view.
#[derive(Default)]
pub struct RowView {
    translation_x: Cell<f32>,
    alpha: Cell<f32>,
    height_scale: Cell<f32>,
}

impl RowView {
    pub fn is_at_rest(&self) -> bool {
        self.translation_x.get() == 0.0 && self.alpha.get() == 1.0 && self.height_scale.get() == 1.0
    }
}

impl RowSurface for RowView {
    fn set_translation_x(&self, offset: f32) {
        self.translation_x.set(offset);
    }

    fn set_alpha(&self, alpha: f32) {
        self.alpha.set(alpha);
    }

    fn set_height_scale(&self, scale: f32) {
        self.height_scale.set(scale);
    }
}

pub struct RowItem {
    pub text: String,
    pub view: Rc<RowView>,
}

impl RowItem {
    pub fn new(text: impl Into<String>) -> Self {
        let view = RowView::default();
        view.reset();
        Self {
            text: text.into(),
            view: Rc::new(view),
        }
    }
}

pub struct DemoList {
    items: RefCell<Vec<RowItem>>,
    row_height: f32,
    width: f32,
    indicator: RefCell<EdgeIndicator>,
    shown: Cell<Option<IndicatorPlacement>>,
    scroll_locked: Cell<bool>,
    removed: Cell<usize>,
}

impl DemoList {
    pub fn new(count: usize, row_height: f32, width: f32, dead_zone: f32) -> Rc<Self> {
        let items = (0..count)
            .map(|i| RowItem::new(format!("Item {}", i + 1)))
            .collect();
        Rc::new(Self {
            items: RefCell::new(items),
            row_height,
            width,
            indicator: RefCell::new(
                EdgeIndicator::new(dead_zone).with_list_top_offset(LIST_TOP_OFFSET),
            ),
            shown: Cell::new(None),
            scroll_locked: Cell::new(false),
            removed: Cell::new(0),
        })
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn removed(&self) -> usize {
        self.removed.get()
    }

    pub fn texts(&self) -> Vec<String> {
        self.items
            .borrow()
            .iter()
            .map(|item| item.text.clone())
            .collect()
    }

    /// Whether every remaining row is drawn untranslated and opaque.
    pub fn all_at_rest(&self) -> bool {
        self.items.borrow().iter().all(|item| item.view.is_at_rest())
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Placement of every row at its current height scale.
    fn layout(&self) -> Vec<RowGeometry> {
        let mut top = 0.0;
        self.items
            .borrow()
            .iter()
            .map(|item| {
                let geometry =
                    RowGeometry::new(top, self.row_height * item.view.height_scale.get());
                top += geometry.height;
                geometry
            })
            .collect()
    }

    fn text(&self, row: usize) -> String {
        self.items
            .borrow()
            .get(row)
            .map(|item| item.text.clone())
            .unwrap_or_else(|| format!("<row {row}>"))
    }
}

impl SwipeHost for DemoList {
    fn row_at(&self, _x: f32, y: f32) -> Option<usize> {
        self.layout()
            .iter()
            .position(|row| y >= row.top && y < row.top + row.height)
    }

    fn row_geometry(&self, row: usize) -> Option<RowGeometry> {
        self.layout().get(row).copied()
    }

    fn container_width(&self) -> f32 {
        self.width
    }

    fn row_surface(&self, row: usize) -> Option<Rc<dyn RowSurface>> {
        self.items
            .borrow()
            .get(row)
            .map(|item| Rc::clone(&item.view) as Rc<dyn RowSurface>)
    }

    fn suppress_scroll(&self) {
        self.scroll_locked.set(true);
        log::debug!("list scrolling locked");
    }

    fn restore_scroll(&self) {
        self.scroll_locked.set(false);
        log::debug!("list scrolling unlocked");
    }
}

impl DismissCallbacks for DemoList {
    fn on_dismiss(&self, rows_descending: &[usize]) {
        let mut items = self.items.borrow_mut();
        for &row in rows_descending {
            if row < items.len() {
                let item = items.remove(row);
                log::info!("Removed {} (row {row})", item.text);
            }
        }
        self.removed.set(self.removed.get() + rows_descending.len());
        log::info!("{} rows left", items.len());
    }

    fn on_item_move(&self, delta_x: f32, row: usize) {
        let Some(geometry) = self.row_geometry(row) else {
            return;
        };
        let placement = self
            .indicator
            .borrow_mut()
            .update(delta_x, geometry, self.width);
        if placement.map(|p| p.side) != self.shown.get().map(|p| p.side) {
            match placement {
                Some(p) => log::info!(
                    "{:?} indicator at ({}, {}) size {}",
                    p.side,
                    p.left,
                    p.top,
                    p.size
                ),
                None => log::info!("indicator hidden"),
            }
        }
        self.shown.set(placement);
        log::trace!("{} moved {delta_x:.1}", self.text(row));
    }

    fn on_action_up(&self, row: Option<usize>) {
        self.indicator.borrow_mut().hide();
        if self.shown.take().is_some() {
            log::info!("indicator hidden");
        }
        log::debug!("action up on {row:?}");
    }

    fn on_click(&self, row: usize) {
        log::info!("Clicked {}", self.text(row));
    }
}
