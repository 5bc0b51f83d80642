//! timeline-rs: headless layout engine for scrollable historical timelines.
//!
//! Points carry loosely formatted dates (including BCE/CE eras). The engine
//! derives their pixel positions, stacks overlapping labels into rows, picks
//! gridline tiers from hours to millennia, and tracks which point is active
//! as the host scrolls. Drawing stays with the host through `render::Surface`.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{TimelineConfig, TimelineEngine};
pub use error::{TimelineError, TimelineResult};
