use chrono::TimeDelta;
use tracing::{debug, trace};

use crate::core::spatial_grid::max_row_for_height;
use crate::core::{
    CellSize, Footprint, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, TimeRange, TimeTier, TimelinePoint,
    enumerate_boundaries, select_sub_tier, select_tier,
};
use crate::render::{Gridline, GridlineKind, PointLayout, Surface, TierLabel};

use super::engine::ActivePoint;
use super::label_format::{point_date_label, tier_label_text};
use super::{LayoutScale, MinHour, TaskKind, TimelineEngine};

/// Visible width, in multiples of the average point gap, for automatic scale.
const AUTO_SCALE_GAP_MULTIPLIER: f64 = 5.0;
/// An average gap this many times the smallest one is pulled toward it.
const AUTO_SCALE_SKEW_LIMIT: f64 = 20.0;
/// Sub-tier gridlines may sit this many times closer than primary ones.
const SUB_TIER_SPACING_DIVISOR: f64 = 6.0;

impl<S: Surface> TimelineEngine<S> {
    /// Drains deferred layout work, including tasks scheduled while draining.
    ///
    /// Returns the number of tasks executed.
    pub fn run_pending_tasks(&mut self) -> usize {
        let mut executed = 0;
        while let Some(task) = self.tasks.pop() {
            trace!(?task, "run task");
            match task {
                TaskKind::Relayout => self.relayout(),
                TaskKind::PackRows => self.pack_rows(),
                TaskKind::RegenerateGridlines => self.regenerate_gridlines(),
                TaskKind::RebuildActivationZones => self.rebuild_activation_zones(),
            }
            executed += 1;
        }
        executed
    }

    fn relayout(&mut self) {
        let width = f64::from(self.config.viewport.width);
        let Some(range) = self.points.range() else {
            self.reset_layout(width);
            return;
        };

        let pixels_per_hour = match self.config.min_hour {
            MinHour::Fixed { pixels_per_hour } => pixels_per_hour,
            MinHour::Auto => auto_pixels_per_hour(self.points.points(), range, width),
        };
        let padding_hours = self.config.padding * width / pixels_per_hour;
        let padded = if padding_hours.is_finite() && padding_hours > 0.0 {
            range.padded(hours_to_delta(padding_hours))
        } else {
            range
        };
        let hour_range = match padded.hours() {
            hours if hours.is_finite() && hours != 0.0 => hours,
            _ => 1.0,
        };
        let content_width = width.max(hour_range * pixels_per_hour);

        let layouts: Vec<PointLayout> = self
            .points
            .iter()
            .map(|point| PointLayout {
                left: point.instant.hours_since(padded.start) * pixels_per_hour,
                span_width: (point.end_instant.hours_since(point.instant) * pixels_per_hour)
                    .max(0.0),
                row: 0,
                top: 0.0,
                size: self.surface.measure(&point.content),
                date_label: point_date_label(point.instant, &self.config),
            })
            .collect();
        self.layouts = layouts;
        self.scale = LayoutScale {
            pixels_per_hour,
            hour_range,
            content_width,
            padded_range: Some(padded),
            primary_tier: None,
            sub_tier: None,
        };

        self.remap_active();
        self.recenter_on_active();
        debug!(
            points = self.points.len(),
            pixels_per_hour,
            content_width,
            compact = self.is_compact(),
            "relayout"
        );

        self.tasks.schedule(TaskKind::PackRows);
        self.tasks.schedule(TaskKind::RegenerateGridlines);
        self.tasks.schedule(TaskKind::RebuildActivationZones);
    }

    fn reset_layout(&mut self, width: f64) {
        self.layouts.clear();
        self.gridlines.clear();
        self.labels.clear();
        self.grid.clear();
        self.tracker.rebuild(&[], self.config.activation_dist);
        self.tracker.clear_active();
        self.active = None;
        self.scale = LayoutScale::empty(width);
        self.scroll_offset = 0.0;
        debug!("relayout with no points");
    }

    /// Re-resolves the active point by identity. A removed active point hands
    /// over to whichever point now holds its index; no callback fires.
    pub(super) fn remap_active(&mut self) {
        let last = self.points.len().saturating_sub(1);
        let index = match self.active {
            Some(active) => self
                .points
                .index_of(active.id)
                .unwrap_or(active.index.min(last)),
            None => 0,
        };
        self.active = self
            .points
            .get(index)
            .map(|point| ActivePoint { id: point.id, index });
        match self.active {
            Some(active) => self.tracker.set_active(active.index),
            None => self.tracker.clear_active(),
        }
    }

    fn recenter_on_active(&mut self) {
        let Some(layout) = self
            .active
            .and_then(|active| self.layouts.get(active.index))
        else {
            return;
        };
        self.scroll_offset = layout.left - f64::from(self.config.viewport.width) / 2.0;
        self.tracker.record_offset(self.scroll_offset);
    }

    fn pack_rows(&mut self) {
        self.grid.clear();
        let cell = CellSize::default();
        if self.is_compact() {
            for layout in &mut self.layouts {
                layout.row = 0;
                layout.top = 0.0;
            }
            return;
        }

        let max_row = max_row_for_height(f64::from(self.config.viewport.height), cell);
        for layout in &mut self.layouts {
            let footprint = Footprint::from_pixels(layout.left, layout.size, cell);
            let row = self.grid.place(footprint, max_row);
            layout.row = row;
            layout.top = f64::from(row) * cell.height;
        }
        trace!(points = self.layouts.len(), max_row, "packed rows");
    }

    fn regenerate_gridlines(&mut self) {
        self.gridlines.clear();
        self.labels.clear();
        self.scale.primary_tier = None;
        self.scale.sub_tier = None;
        let Some(padded) = self.scale.padded_range else {
            return;
        };

        let pixels_per_hour = self.scale.pixels_per_hour;
        let extent = self.scale.content_width;
        let spacing = self.config.min_plot_spacing;
        let primary = select_tier(pixels_per_hour, spacing);
        for boundary in &enumerate_boundaries(padded.start, primary.tier, pixels_per_hour, extent) {
            self.gridlines.push(Gridline {
                kind: GridlineKind::Primary,
                tier: primary.tier,
                x: boundary.offset_px,
                instant: boundary.instant,
                ordinal: boundary.ordinal,
            });
            if let Some(text) = tier_label_text(primary.tier, &boundary, &self.config) {
                self.labels.push(TierLabel {
                    text,
                    tier: primary.tier,
                    left: boundary.offset_px - spacing / 2.0,
                    width: spacing,
                    instant: boundary.instant,
                });
            }
        }
        self.scale.primary_tier = Some(primary);

        let wants_sub = self.config.sub_plots && !self.is_compact() && primary.tier != TimeTier::Hours;
        if wants_sub {
            let sub = select_sub_tier(pixels_per_hour, spacing / SUB_TIER_SPACING_DIVISOR);
            if sub.tier != primary.tier {
                for boundary in &enumerate_boundaries(padded.start, sub.tier, pixels_per_hour, extent)
                {
                    self.gridlines.push(Gridline {
                        kind: GridlineKind::Sub,
                        tier: sub.tier,
                        x: boundary.offset_px,
                        instant: boundary.instant,
                        ordinal: boundary.ordinal,
                    });
                }
                self.scale.sub_tier = Some(sub);
            }
        }
        debug!(
            primary = primary.tier.name(),
            sub = ?self.scale.sub_tier.map(|sub| sub.tier.name()),
            gridlines = self.gridlines.len(),
            "regenerated gridlines"
        );
    }

    fn rebuild_activation_zones(&mut self) {
        let positions: Vec<f64> = self.layouts.iter().map(|layout| layout.left).collect();
        self.tracker
            .rebuild(&positions, self.config.activation_dist);
        if let Some(active) = self.active {
            self.tracker.set_active(active.index);
        }
    }
}

fn hours_to_delta(hours: f64) -> TimeDelta {
    let millis = (hours * MILLIS_PER_HOUR as f64).round();
    TimeDelta::milliseconds((millis as i64).max(-i64::MAX))
}

/// Pixels per hour that fit a few average point gaps into `width`.
///
/// Gaps of a minute or less are ignored. When the points are strongly
/// clustered, the geometric mean of the average and smallest gap is used
/// instead of the average.
pub(super) fn auto_pixels_per_hour<C>(
    points: &[TimelinePoint<C>],
    range: TimeRange,
    width: f64,
) -> f64 {
    let mut total = 0.0;
    let mut significant = 0_usize;
    let mut min_gap = f64::INFINITY;
    for pair in points.windows(2) {
        let gap = pair[1].end_instant.millis() as f64 - pair[0].end_instant.millis() as f64;
        if gap > MILLIS_PER_MINUTE as f64 {
            total += gap;
            significant += 1;
            min_gap = min_gap.min(gap);
        }
    }

    let mut average = if significant > 0 {
        total / significant as f64
    } else {
        0.0
    };
    if average < 1.0 {
        let range_hours = match range.hours() {
            hours if hours > 0.0 => hours,
            _ => 1.0,
        };
        average = range_hours * MILLIS_PER_HOUR as f64;
    }
    if min_gap.is_finite() && average > AUTO_SCALE_SKEW_LIMIT * min_gap {
        average = ((average.ln() + min_gap.ln()) / 2.0).exp();
    }

    width / (AUTO_SCALE_GAP_MULTIPLIER * average) * MILLIS_PER_HOUR as f64
}
