//! Tunable thresholds for swipe-to-dismiss.

use std::fmt;

use crate::gesture_constants::{
    DISMISS_FRACTION, DRAG_THRESHOLD, FLING_VELOCITY_THRESHOLD, INDICATOR_DEAD_ZONE,
    MAX_FLING_VELOCITY, SHORT_ANIMATION_MILLIS,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeConfig {
    /// Minimum travel before a drag is classified as a swipe or a scroll.
    pub touch_slop: f32,
    /// Share of the container width that dismisses on a slow release.
    pub dismiss_fraction: f32,
    /// Horizontal release speed (px/s) that dismisses regardless of distance.
    pub fling_velocity_threshold: f32,
    /// Upper clamp for velocity estimates (px/s).
    pub max_fling_velocity: f32,
    /// Duration of each row animation phase.
    pub animation_millis: u64,
    pub indicator_dead_zone: f32,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            touch_slop: DRAG_THRESHOLD,
            dismiss_fraction: DISMISS_FRACTION,
            fling_velocity_threshold: FLING_VELOCITY_THRESHOLD,
            max_fling_velocity: MAX_FLING_VELOCITY,
            animation_millis: SHORT_ANIMATION_MILLIS,
            indicator_dead_zone: INDICATOR_DEAD_ZONE,
        }
    }
}

impl SwipeConfig {
    pub fn with_touch_slop(mut self, touch_slop: f32) -> Self {
        self.touch_slop = touch_slop;
        self
    }

    pub fn with_dismiss_fraction(mut self, dismiss_fraction: f32) -> Self {
        self.dismiss_fraction = dismiss_fraction;
        self
    }

    pub fn with_fling_velocity(mut self, threshold: f32, max: f32) -> Self {
        self.fling_velocity_threshold = threshold;
        self.max_fling_velocity = max;
        self
    }

    pub fn with_animation_millis(mut self, animation_millis: u64) -> Self {
        self.animation_millis = animation_millis;
        self
    }

    pub fn with_indicator_dead_zone(mut self, dead_zone: f32) -> Self {
        self.indicator_dead_zone = dead_zone;
        self
    }

    /// Checks every threshold and returns the config unchanged if usable.
    pub fn validate(self) -> Result<Self, ConfigError> {
        let fields = [
            ("touch_slop", self.touch_slop),
            ("dismiss_fraction", self.dismiss_fraction),
            ("fling_velocity_threshold", self.fling_velocity_threshold),
            ("max_fling_velocity", self.max_fling_velocity),
            ("indicator_dead_zone", self.indicator_dead_zone),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::NonFinite { field: *field });
        }

        if self.touch_slop < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "touch_slop",
                value: self.touch_slop,
                expected: ">= 0",
            });
        }
        if self.dismiss_fraction <= 0.0 || self.dismiss_fraction > 1.0 {
            return Err(ConfigError::OutOfRange {
                field: "dismiss_fraction",
                value: self.dismiss_fraction,
                expected: "in (0, 1]",
            });
        }
        if self.fling_velocity_threshold <= 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "fling_velocity_threshold",
                value: self.fling_velocity_threshold,
                expected: "> 0",
            });
        }
        if self.max_fling_velocity < self.fling_velocity_threshold {
            return Err(ConfigError::OutOfRange {
                field: "max_fling_velocity",
                value: self.max_fling_velocity,
                expected: ">= fling_velocity_threshold",
            });
        }
        if self.indicator_dead_zone < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "indicator_dead_zone",
                value: self.indicator_dead_zone,
                expected: ">= 0",
            });
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonFinite {
        field: &'static str,
    },
    OutOfRange {
        field: &'static str,
        value: f32,
        expected: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonFinite { field } => write!(f, "{field} must be finite"),
            ConfigError::OutOfRange {
                field,
                value,
                expected,
            } => write!(f, "{field} = {value} is out of range; expected {expected}"),
        }
    }
}

impl std::error::Error for ConfigError {}
