//! CLI library components for the test case import preview harness.

pub mod logging;
pub mod pipeline;
