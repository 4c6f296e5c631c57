//! Output formatting module
//!
//! Renders the run report and the scenario catalog.

mod formatter;

pub use formatter::{format_scenarios, OutputFormat, ResultFormatter};
