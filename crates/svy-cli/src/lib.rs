//! CLI library components for the survey query tool.

pub mod logging;
pub mod pipeline;
pub mod render;
