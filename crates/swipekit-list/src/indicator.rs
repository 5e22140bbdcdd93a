//! Placement of the directional indicator shown beside a swiped row.

use crate::host::RowGeometry;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndicatorSide {
    Left,
    Right,
}

/// Where to draw the indicator, in the coordinates of the list's parent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorPlacement {
    pub side: IndicatorSide,
    pub left: f32,
    pub top: f32,
    /// Square edge length; follows the row height.
    pub size: f32,
}

/// Tracks which edge indicator is visible while a row is dragged.
///
/// Within `dead_zone` of zero displacement the last side stays visible, so a
/// finger hovering around the start point does not flicker between edges.
#[derive(Clone, Debug)]
pub struct EdgeIndicator {
    dead_zone: f32,
    list_top_offset: f32,
    shown: Option<IndicatorSide>,
}

impl EdgeIndicator {
    pub fn new(dead_zone: f32) -> Self {
        Self {
            dead_zone: dead_zone.max(0.0),
            list_top_offset: 0.0,
            shown: None,
        }
    }

    /// Offset of the list's top edge inside the parent the indicators live in.
    pub fn with_list_top_offset(mut self, offset: f32) -> Self {
        self.list_top_offset = offset;
        self
    }

    pub fn side(&self) -> Option<IndicatorSide> {
        self.shown
    }

    /// Recomputes the indicator for a row dragged `delta_x`.
    pub fn update(
        &mut self,
        delta_x: f32,
        geometry: RowGeometry,
        container_width: f32,
    ) -> Option<IndicatorPlacement> {
        if delta_x.abs() > self.dead_zone {
            self.shown = Some(if delta_x < 0.0 {
                IndicatorSide::Left
            } else {
                IndicatorSide::Right
            });
        }
        let side = self.shown?;

        let size = geometry.height;
        let left = match side {
            IndicatorSide::Left => 0.0,
            IndicatorSide::Right => container_width - size,
        };
        Some(IndicatorPlacement {
            side,
            left,
            top: geometry.top + self.list_top_offset - size / 2.0,
            size,
        })
    }

    pub fn hide(&mut self) {
        self.shown = None;
    }
}

impl Default for EdgeIndicator {
    fn default() -> Self {
        Self::new(swipekit_foundation::gesture_constants::INDICATOR_DEAD_ZONE)
    }
}
