use serde::{Deserialize, Serialize};

use crate::core::{Instant, PointId, TierSelection, TimeRange, Viewport};
use crate::render::{Gridline, PointLayout, Surface, TierLabel};

use super::TimelineEngine;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSnapshot {
    pub id: PointId,
    pub index: usize,
    pub instant: Instant,
    pub end_instant: Instant,
    pub weight: f64,
    pub source: String,
    pub layout: Option<PointLayout>,
}

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSnapshot {
    pub viewport: Viewport,
    pub compact: bool,
    pub pixels_per_hour: f64,
    pub content_width: f64,
    pub scroll_offset: f64,
    pub range: Option<TimeRange>,
    pub padded_range: Option<TimeRange>,
    pub primary_tier: Option<TierSelection>,
    pub sub_tier: Option<TierSelection>,
    pub active_index: Option<usize>,
    pub points: Vec<PointSnapshot>,
    pub gridlines: Vec<Gridline>,
    pub labels: Vec<TierLabel>,
}

impl<S: Surface> TimelineEngine<S> {
    /// Captures the current derived state. Pending tasks are not run.
    #[must_use]
    pub fn snapshot(&self) -> TimelineSnapshot {
        let points = self
            .points
            .iter()
            .map(|point| PointSnapshot {
                id: point.id,
                index: point.index,
                instant: point.instant,
                end_instant: point.end_instant,
                weight: point.weight,
                source: point.source.clone(),
                layout: self.layouts.get(point.index).cloned(),
            })
            .collect();

        TimelineSnapshot {
            viewport: self.config.viewport,
            compact: self.is_compact(),
            pixels_per_hour: self.scale.pixels_per_hour,
            content_width: self.scale.content_width,
            scroll_offset: self.scroll_offset,
            range: self.points.range(),
            padded_range: self.scale.padded_range,
            primary_tier: self.scale.primary_tier,
            sub_tier: self.scale.sub_tier,
            active_index: self.active_index(),
            points,
            gridlines: self.gridlines.clone(),
            labels: self.labels.clone(),
        }
    }
}
