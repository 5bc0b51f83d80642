use serde::{Deserialize, Serialize};

use crate::core::{ElementSize, Instant, TimeTier};
use crate::error::{TimelineError, TimelineResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridlineKind {
    Primary,
    Sub,
}

/// Vertical gridline at a tier boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gridline {
    pub kind: GridlineKind,
    pub tier: TimeTier,
    pub x: f64,
    pub instant: Instant,
    pub ordinal: usize,
}

impl Gridline {
    pub fn validate(self) -> TimelineResult<()> {
        if !self.x.is_finite() {
            return Err(TimelineError::InvalidData(
                "gridline x must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Text placed under a primary gridline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierLabel {
    pub text: String,
    pub tier: TimeTier,
    pub left: f64,
    pub width: f64,
    pub instant: Instant,
}

impl TierLabel {
    pub fn validate(&self) -> TimelineResult<()> {
        if !self.left.is_finite() {
            return Err(TimelineError::InvalidData(
                "tier label left must be finite".to_owned(),
            ));
        }
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(TimelineError::InvalidData(
                "tier label width must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Resolved geometry of one point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointLayout {
    pub left: f64,
    /// Horizontal extent of the point's span; zero for instant events.
    pub span_width: f64,
    pub row: u32,
    /// Top edge in pixels (`row` times the grid cell height).
    pub top: f64,
    pub size: ElementSize,
    pub date_label: String,
}

impl PointLayout {
    pub fn validate(&self) -> TimelineResult<()> {
        for (name, value) in [
            ("left", self.left),
            ("span_width", self.span_width),
            ("top", self.top),
        ] {
            if !value.is_finite() {
                return Err(TimelineError::InvalidData(format!(
                    "point layout `{name}` must be finite"
                )));
            }
        }
        if self.span_width < 0.0 {
            return Err(TimelineError::InvalidData(
                "point layout span_width must be >= 0".to_owned(),
            ));
        }
        if !self.size.is_valid() {
            return Err(TimelineError::InvalidData(
                "point layout size must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}
