mod axis_config;
mod axis_engine;
mod bucket_store;
mod domain_controller;
mod engine_init;
mod engine_snapshot;
mod json_contract;
mod label_measurement;
mod layout_engine;
mod level_controller;
mod range_labels;
mod view_controller;
mod viewport_controller;

pub use axis_config::{
    AxisConfiguration, AxisStyle, HorizontalRangeSide, RangeLabelBehavior, VerticalRangeSide,
};
pub use axis_engine::AxisEngine;
pub use bucket_store::{Bucket, BucketStore, LabelPart, TickPart};
pub use engine_snapshot::AxisSnapshot;
pub use json_contract::{AXIS_SNAPSHOT_JSON_SCHEMA_V1, AxisSnapshotJsonContractV1};
pub use label_measurement::LabelMetrics;
pub use level_controller::{FadeAlphas, LevelState};
pub use range_labels::RangeFormatter;
pub use viewport_controller::{ViewportState, cur_scale_for, exited_segments, scale_bounds};
