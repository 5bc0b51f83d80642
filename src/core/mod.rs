pub mod date_normalizer;
pub mod instant;
pub mod point_set;
pub mod spatial_grid;
pub mod types;
pub mod unit_scale;

pub use date_normalizer::{DateInput, DateNormalizer, format_instant};
pub use instant::{Instant, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, TimeRange};
pub use point_set::{PointId, PointSet, TimelinePoint};
pub use spatial_grid::{CellSize, Footprint, SpatialGrid};
pub use types::{ElementSize, Viewport};
pub use unit_scale::{
    Boundary, BoundarySequence, TierSelection, TimeTier, enumerate_boundaries, next_boundary,
    select_sub_tier, select_tier,
};
