use tracing::debug;

use crate::core::{TierSelection, TimeRange, TimelinePoint, Viewport};
use crate::error::TimelineResult;
use crate::interaction::TrackerState;
use crate::render::{Gridline, PointLayout, Surface, TierLabel};

use super::validation::validate_viewport;
use super::{TaskKind, TimelineConfig, TimelineEngine};

impl<S: Surface> TimelineEngine<S> {
    #[must_use]
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    #[must_use]
    pub fn points(&self) -> &[TimelinePoint<S::Content>] {
        self.points.points()
    }

    #[must_use]
    pub fn point(&self, index: usize) -> Option<&TimelinePoint<S::Content>> {
        self.points.get(index)
    }

    /// Per-point geometry from the last relayout, in point order.
    #[must_use]
    pub fn layout(&self) -> &[PointLayout] {
        &self.layouts
    }

    #[must_use]
    pub fn gridlines(&self) -> &[Gridline] {
        &self.gridlines
    }

    #[must_use]
    pub fn labels(&self) -> &[TierLabel] {
        &self.labels
    }

    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.active.map(|active| active.index)
    }

    #[must_use]
    pub fn active_point(&self) -> Option<&TimelinePoint<S::Content>> {
        self.active_index().and_then(|index| self.points.get(index))
    }

    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    #[must_use]
    pub fn pixels_per_hour(&self) -> f64 {
        self.scale.pixels_per_hour
    }

    #[must_use]
    pub fn content_width(&self) -> f64 {
        self.scale.content_width
    }

    #[must_use]
    pub fn padded_range(&self) -> Option<TimeRange> {
        self.scale.padded_range
    }

    /// Unpadded span of the current points.
    #[must_use]
    pub fn range(&self) -> Option<TimeRange> {
        self.points.range()
    }

    #[must_use]
    pub fn primary_tier(&self) -> Option<TierSelection> {
        self.scale.primary_tier
    }

    #[must_use]
    pub fn sub_tier(&self) -> Option<TierSelection> {
        self.scale.sub_tier
    }

    #[must_use]
    pub fn tracker_state(&self) -> TrackerState {
        self.tracker.state()
    }

    #[must_use]
    pub fn has_pending_tasks(&self) -> bool {
        !self.tasks.is_empty()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    /// Narrow viewports drop row packing and sub-tier gridlines.
    #[must_use]
    pub fn is_compact(&self) -> bool {
        self.config.viewport.width < self.config.compact_breakpoint_px
    }

    /// Updates viewport dimensions; relayout follows when `respond` is set.
    pub fn set_viewport(&mut self, viewport: Viewport) -> TimelineResult<()> {
        let viewport = validate_viewport(viewport)?;
        if viewport == self.config.viewport {
            return Ok(());
        }
        debug!(
            width = viewport.width,
            height = viewport.height,
            respond = self.config.respond,
            "set viewport"
        );
        self.config.viewport = viewport;
        if self.config.respond {
            self.tasks.schedule(TaskKind::Relayout);
        }
        Ok(())
    }

    /// Installs the callback invoked when the active point changes.
    pub fn set_on_index_change(
        &mut self,
        callback: impl FnMut(usize, &TimelinePoint<S::Content>) + 'static,
    ) {
        self.on_index_change = Some(Box::new(callback));
    }

    pub fn clear_on_index_change(&mut self) {
        self.on_index_change = None;
    }
}
