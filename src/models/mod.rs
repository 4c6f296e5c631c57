//! Data models for API smoke testing
//!
//! This module contains the scenario catalog, request payloads and result types.

mod payload;
mod scenario;
mod test_result;

pub use payload::{ContactMessageRequest, StatusCheckRequest};
pub use scenario::{HttpMethod, Scenario};
pub use test_result::{RunSummary, TestResult};

#[cfg(test)]
pub use test_result::ActualStatus;
