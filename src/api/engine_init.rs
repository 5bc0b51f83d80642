use tracing::debug;

use crate::core::{DateNormalizer, PointSet, SpatialGrid};
use crate::error::TimelineResult;
use crate::interaction::ScrollActivationTracker;
use crate::render::Surface;

use super::validation::validate_timeline_config;
use super::{LayoutScale, TaskQueue, TimelineConfig, TimelineEngine};

impl<S: Surface> TimelineEngine<S> {
    /// Creates an empty engine.
    pub fn new(surface: S, config: TimelineConfig) -> TimelineResult<Self> {
        Self::with_normalizer(surface, config, DateNormalizer::default())
    }

    /// Creates an empty engine whose year-less dates resolve through
    /// `normalizer`.
    pub fn with_normalizer(
        surface: S,
        config: TimelineConfig,
        normalizer: DateNormalizer,
    ) -> TimelineResult<Self> {
        validate_timeline_config(&config)?;
        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            min_hour = ?config.min_hour,
            "create timeline engine"
        );

        Ok(Self {
            surface,
            scale: LayoutScale::empty(f64::from(config.viewport.width)),
            config,
            points: PointSet::with_normalizer(normalizer),
            layouts: Vec::new(),
            grid: SpatialGrid::new(),
            tracker: ScrollActivationTracker::new(),
            tasks: TaskQueue::new(),
            gridlines: Vec::new(),
            labels: Vec::new(),
            scroll_offset: 0.0,
            active: None,
            on_index_change: None,
        })
    }
}
