//! CLI library components for the samplesheet converter.

pub mod logging;
pub mod report;
