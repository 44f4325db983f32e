//! Pipeline orchestration module.

mod orchestrator;
mod stats;

pub use orchestrator::{Mode, Pipeline, PipelineConfig};
pub use stats::PipelineStats;
