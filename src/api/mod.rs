mod data_controller;
mod engine;
mod engine_accessors;
mod engine_config;
mod engine_init;
mod engine_snapshot;
mod json_contract;
mod label_format;
mod layout_coordinator;
mod scroll_controller;
mod task_queue;
mod validation;

pub use data_controller::PointSpec;
pub use engine::{IndexChangeCallback, LayoutScale, TimelineEngine};
pub use engine_config::{MinHour, TimelineConfig};
pub use engine_snapshot::{PointSnapshot, TimelineSnapshot};
pub use json_contract::{
    TIMELINE_CONFIG_JSON_SCHEMA_V1, TIMELINE_SNAPSHOT_JSON_SCHEMA_V1,
    TimelineConfigJsonContractV1, TimelineSnapshotJsonContractV1,
};
pub use scroll_controller::ScrollRequest;
pub use task_queue::{TaskKind, TaskQueue};
