use serde::{Deserialize, Serialize};

use crate::core::{PointId, PointSet, SpatialGrid, TierSelection, TimeRange, TimelinePoint};
use crate::error::TimelineResult;
use crate::interaction::ScrollActivationTracker;
use crate::render::{Gridline, PlacedPoint, PointLayout, Surface, TierLabel, TimelineFrame};

use super::{TaskQueue, TimelineConfig};

/// Host callback observing activation changes.
pub type IndexChangeCallback<C> = Box<dyn FnMut(usize, &TimelinePoint<C>)>;

/// Derived horizontal scale of the last relayout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutScale {
    pub pixels_per_hour: f64,
    pub hour_range: f64,
    pub content_width: f64,
    pub padded_range: Option<TimeRange>,
    pub primary_tier: Option<TierSelection>,
    pub sub_tier: Option<TierSelection>,
}

impl LayoutScale {
    #[must_use]
    pub fn empty(viewport_width: f64) -> Self {
        Self {
            pixels_per_hour: 0.0,
            hour_range: 0.0,
            content_width: viewport_width,
            padded_range: None,
            primary_tier: None,
            sub_tier: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ActivePoint {
    pub(super) id: PointId,
    pub(super) index: usize,
}

/// Main orchestration facade consumed by host applications.
///
/// `TimelineEngine` owns the ordered points and every piece of state derived
/// from them: pixel scale, row packing, gridlines and labels, and the
/// activation zones that map scroll offsets to the active point.
pub struct TimelineEngine<S: Surface> {
    pub(super) surface: S,
    pub(super) config: TimelineConfig,
    pub(super) points: PointSet<S::Content>,
    pub(super) layouts: Vec<PointLayout>,
    pub(super) grid: SpatialGrid,
    pub(super) tracker: ScrollActivationTracker,
    pub(super) tasks: TaskQueue,
    pub(super) gridlines: Vec<Gridline>,
    pub(super) labels: Vec<TierLabel>,
    pub(super) scale: LayoutScale,
    pub(super) scroll_offset: f64,
    pub(super) active: Option<ActivePoint>,
    pub(super) on_index_change: Option<IndexChangeCallback<S::Content>>,
}

impl<S: Surface> TimelineEngine<S> {
    /// Runs pending layout work, then hands the resolved frame to the surface.
    pub fn render(&mut self) -> TimelineResult<()> {
        self.run_pending_tasks();
        let active_index = self.active_index();
        let compact = self.is_compact();

        let points = self
            .points
            .points()
            .iter()
            .zip(&self.layouts)
            .map(|(point, layout)| PlacedPoint {
                point,
                layout,
                active: active_index == Some(point.index),
            })
            .collect();
        let frame = TimelineFrame {
            viewport: self.config.viewport,
            content_width: self.scale.content_width,
            scroll_offset: self.scroll_offset,
            compact,
            points,
            gridlines: &self.gridlines,
            labels: &self.labels,
        };
        self.surface.render(&frame)
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }
}
