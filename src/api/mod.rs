mod engine;
mod engine_config;
mod engine_init;
mod engine_snapshot;
mod interaction_controller;
mod json_contract;
mod narrative;
mod story_frame_builder;

pub use engine::{StoryCursor, StoryEngine};
pub use engine_config::StoryEngineConfig;
pub use engine_snapshot::EngineSnapshot;
pub use json_contract::{
    ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshotJsonContractV1, STORY_TABLES_JSON_SCHEMA_V1,
    StoryTablesJsonContractV1,
};
pub use narrative::Narrative;
pub use story_frame_builder::{
    AXIS_COLOR, BOUNCE_COLOR, CONVERSION_COLOR, CURVE_STROKE_WIDTH, GRID_COLOR, MARKER_RADIUS,
    TICK_LABEL_COLOR,
};
