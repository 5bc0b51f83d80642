use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{DateInput, DateNormalizer, Instant, TimeRange};
use crate::error::{TimelineError, TimelineResult};

/// Stable identity of a point across re-sorts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointId(u64);

impl PointId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelinePoint<C> {
    pub id: PointId,
    pub instant: Instant,
    pub end_instant: Instant,
    pub weight: f64,
    pub content: C,
    /// Position in the ordered set, reassigned after every structural change.
    pub index: usize,
    /// The start date exactly as supplied, kept for diagnostics.
    pub source: String,
}

impl<C> TimelinePoint<C> {
    #[must_use]
    pub fn is_span(&self) -> bool {
        self.end_instant > self.instant
    }
}

/// Points ordered by `(instant, weight)`.
///
/// Ties on both keys keep insertion order.
#[derive(Debug, Clone)]
pub struct PointSet<C> {
    points: Vec<TimelinePoint<C>>,
    next_id: u64,
    normalizer: DateNormalizer,
}

impl<C> Default for PointSet<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> PointSet<C> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_normalizer(DateNormalizer::default())
    }

    #[must_use]
    pub fn with_normalizer(normalizer: DateNormalizer) -> Self {
        Self {
            points: Vec::new(),
            next_id: 0,
            normalizer,
        }
    }

    #[must_use]
    pub fn normalizer(&self) -> DateNormalizer {
        self.normalizer
    }

    /// Normalizes and inserts a point.
    ///
    /// A start date that cannot be normalized rejects the insert without
    /// touching the set. An end date that cannot be normalized, or that lies
    /// before the start, collapses to the start instant.
    pub fn insert(
        &mut self,
        date: impl Into<DateInput>,
        end_date: Option<DateInput>,
        weight: f64,
        content: C,
    ) -> TimelineResult<PointId> {
        if !weight.is_finite() {
            return Err(TimelineError::InvalidData(
                "point weight must be finite".to_owned(),
            ));
        }
        let date = date.into();
        let source = date.to_string();
        let instant = self.normalizer.normalize(date)?;
        let end_instant = match end_date {
            Some(end_date) => match self.normalizer.normalize(end_date) {
                Ok(end) if end >= instant => end,
                Ok(end) => {
                    debug!(start = %instant, end = %end, "end date precedes start; collapsing span");
                    instant
                }
                Err(err) => {
                    debug!(error = %err, "unparseable end date; collapsing span");
                    instant
                }
            },
            None => instant,
        };

        let id = PointId(self.next_id);
        self.next_id += 1;
        self.points.push(TimelinePoint {
            id,
            instant,
            end_instant,
            weight,
            content,
            index: 0,
            source,
        });
        self.reorder();
        trace!(point = %id, instant = %instant, count = self.points.len(), "insert point");
        Ok(id)
    }

    pub fn remove_at(&mut self, index: usize) -> Option<TimelinePoint<C>> {
        if index >= self.points.len() {
            return None;
        }
        let removed = self.points.remove(index);
        self.reindex();
        trace!(point = %removed.id, count = self.points.len(), "remove point");
        Some(removed)
    }

    pub fn remove(&mut self, id: PointId) -> Option<TimelinePoint<C>> {
        let index = self.index_of(id)?;
        self.remove_at(index)
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    #[must_use]
    pub fn points(&self) -> &[TimelinePoint<C>] {
        &self.points
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TimelinePoint<C>> {
        self.points.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimelinePoint<C>> {
        self.points.iter()
    }

    #[must_use]
    pub fn index_of(&self, id: PointId) -> Option<usize> {
        self.points.iter().position(|point| point.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Earliest start to latest end; `None` for an empty set.
    #[must_use]
    pub fn range(&self) -> Option<TimeRange> {
        let start = self.points.first()?.instant;
        let end = self
            .points
            .iter()
            .map(|point| point.end_instant)
            .max()
            .unwrap_or(start);
        Some(TimeRange::new(start, end))
    }

    fn reorder(&mut self) {
        self.points
            .sort_by_key(|point| (point.instant, OrderedFloat(point.weight)));
        self.reindex();
    }

    fn reindex(&mut self) {
        for (index, point) in self.points.iter_mut().enumerate() {
            point.index = index;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PointSet;
    use crate::core::{DateInput, DateNormalizer};

    #[test]
    fn weight_breaks_ties_between_equal_instants() {
        let mut set = PointSet::with_normalizer(DateNormalizer::with_reference_year(2024));
        set.insert("March 1, 2020", None, 2.0, "heavy").expect("insert");
        set.insert("March 1, 2020", None, 1.0, "light").expect("insert");
        let order: Vec<_> = set.iter().map(|point| point.content).collect();
        assert_eq!(order, vec!["light", "heavy"]);
    }

    #[test]
    fn reversed_span_collapses_to_start() {
        let mut set = PointSet::new();
        let id = set
            .insert("2020-05-01", Some(DateInput::from("2020-01-01")), 0.0, ())
            .expect("insert");
        let point = &set.points()[set.index_of(id).expect("present")];
        assert_eq!(point.end_instant, point.instant);
        assert!(!point.is_span());
    }
}
