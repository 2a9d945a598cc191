//! axis-lod: continuous level-of-detail axis layout.
//!
//! The engine decides, for every pan and zoom step, which tick and label
//! buckets of a label, number or date axis are visible at which granularity,
//! and drives a rendering backend through incremental add/update/remove calls.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{AxisConfiguration, AxisEngine};
pub use error::{AxisError, AxisResult};
