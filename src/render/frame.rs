use crate::core::{TimelinePoint, Viewport};
use crate::error::{TimelineError, TimelineResult};
use crate::render::{Gridline, PointLayout, TierLabel};

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPoint<'a, C> {
    pub point: &'a TimelinePoint<C>,
    pub layout: &'a PointLayout,
    pub active: bool,
}

/// Backend-agnostic scene for one timeline draw pass.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineFrame<'a, C> {
    pub viewport: Viewport,
    pub content_width: f64,
    pub scroll_offset: f64,
    pub compact: bool,
    pub points: Vec<PlacedPoint<'a, C>>,
    pub gridlines: &'a [Gridline],
    pub labels: &'a [TierLabel],
}

impl<'a, C> TimelineFrame<'a, C> {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            content_width: f64::from(viewport.width),
            scroll_offset: 0.0,
            compact: false,
            points: Vec::new(),
            gridlines: &[],
            labels: &[],
        }
    }

    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.points
            .iter()
            .position(|placed| placed.active)
    }

    pub fn validate(&self) -> TimelineResult<()> {
        if !self.viewport.is_valid() {
            return Err(TimelineError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.content_width.is_finite() || self.content_width < 0.0 {
            return Err(TimelineError::InvalidData(
                "frame content_width must be finite and >= 0".to_owned(),
            ));
        }
        if !self.scroll_offset.is_finite() {
            return Err(TimelineError::InvalidData(
                "frame scroll_offset must be finite".to_owned(),
            ));
        }
        if self.points.iter().filter(|placed| placed.active).count() > 1 {
            return Err(TimelineError::InvalidData(
                "frame must contain at most one active point".to_owned(),
            ));
        }

        for placed in &self.points {
            placed.layout.validate()?;
        }
        for gridline in self.gridlines {
            gridline.validate()?;
        }
        for label in self.labels {
            label.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.gridlines.is_empty() && self.labels.is_empty()
    }
}
