use tracing::{debug, warn};

use crate::core::{DateInput, PointId, TimelinePoint};
use crate::error::TimelineResult;
use crate::render::Surface;

use super::{TaskKind, TimelineEngine};

/// One entry for [`TimelineEngine::add_points`].
#[derive(Debug, Clone, PartialEq)]
pub struct PointSpec<C> {
    pub date: DateInput,
    pub content: C,
    pub end_date: Option<DateInput>,
    pub weight: Option<f64>,
}

impl<C> PointSpec<C> {
    #[must_use]
    pub fn new(date: impl Into<DateInput>, content: C) -> Self {
        Self {
            date: date.into(),
            content,
            end_date: None,
            weight: None,
        }
    }

    #[must_use]
    pub fn with_end_date(mut self, end_date: impl Into<DateInput>) -> Self {
        self.end_date = Some(end_date.into());
        self
    }

    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }
}

impl<S: Surface> TimelineEngine<S> {
    /// Inserts one point and schedules a relayout.
    ///
    /// An unparseable start date is rejected without mutating the timeline.
    /// The active point keeps its identity across the re-sort.
    pub fn add_point(
        &mut self,
        date: impl Into<DateInput>,
        content: S::Content,
        end_date: Option<DateInput>,
        weight: Option<f64>,
    ) -> TimelineResult<PointId> {
        let id = self
            .points
            .insert(date, end_date, weight.unwrap_or(0.0), content)?;
        debug!(point = %id, count = self.points.len(), "add point");
        self.remap_active();
        self.tasks.schedule(TaskKind::Relayout);
        Ok(id)
    }

    /// Inserts every valid entry; rejected entries are logged and skipped.
    ///
    /// All accepted points share one relayout.
    pub fn add_points<I>(&mut self, entries: I) -> Vec<PointId>
    where
        I: IntoIterator<Item = PointSpec<S::Content>>,
    {
        let mut accepted = Vec::new();
        let mut rejected = 0_usize;
        for entry in entries {
            match self.points.insert(
                entry.date,
                entry.end_date,
                entry.weight.unwrap_or(0.0),
                entry.content,
            ) {
                Ok(id) => accepted.push(id),
                Err(err) => {
                    rejected += 1;
                    warn!(error = %err, "skipping timeline point");
                }
            }
        }
        debug!(
            accepted = accepted.len(),
            rejected,
            count = self.points.len(),
            "add points"
        );
        if !accepted.is_empty() {
            self.remap_active();
            self.tasks.schedule(TaskKind::Relayout);
        }
        accepted
    }

    pub fn remove_point(&mut self, id: PointId) -> Option<TimelinePoint<S::Content>> {
        let index = self.points.index_of(id)?;
        self.remove_point_by_index(index)
    }

    pub fn remove_point_by_index(&mut self, index: usize) -> Option<TimelinePoint<S::Content>> {
        let removed = self.points.remove_at(index)?;
        debug!(point = %removed.id, index, count = self.points.len(), "remove point");
        self.remap_active();
        self.tasks.schedule(TaskKind::Relayout);
        Some(removed)
    }
}
