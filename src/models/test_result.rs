//! Test result models for API smoke testing
//!
//! Defines per-check results and the run summary.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

use super::HttpMethod;

/// Status observed for a check
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActualStatus {
    /// A response arrived with this status code
    Code(u16),
    /// No response: the request failed in transport
    Error,
}

impl fmt::Display for ActualStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActualStatus::Code(code) => write!(f, "{code}"),
            ActualStatus::Error => write!(f, "ERROR"),
        }
    }
}

impl Serialize for ActualStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ActualStatus::Code(code) => serializer.serialize_u16(*code),
            ActualStatus::Error => serializer.serialize_str("ERROR"),
        }
    }
}

/// Result of a single check
#[derive(Clone, Debug, Serialize)]
pub struct TestResult {
    pub name: String,
    pub method: HttpMethod,
    pub endpoint: String,
    pub expected_status: u16,
    pub actual_status: ActualStatus,
    pub success: bool,
    pub response_preview: String,
    pub duration_ms: u64,
}

impl TestResult {
    /// A response arrived; success is decided on the status code alone
    pub fn completed(
        name: impl Into<String>,
        method: HttpMethod,
        endpoint: impl Into<String>,
        expected_status: u16,
        actual_status: u16,
        preview: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        let success = actual_status == expected_status;
        Self {
            name: name.into(),
            method,
            endpoint: endpoint.into(),
            expected_status,
            actual_status: ActualStatus::Code(actual_status),
            success,
            response_preview: if success {
                "OK".to_string()
            } else {
                preview.into()
            },
            duration_ms,
        }
    }

    /// The request never produced a response
    pub fn transport_error(
        name: impl Into<String>,
        method: HttpMethod,
        endpoint: impl Into<String>,
        expected_status: u16,
        error: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            name: name.into(),
            method,
            endpoint: endpoint.into(),
            expected_status,
            actual_status: ActualStatus::Error,
            success: false,
            response_preview: error.into(),
            duration_ms,
        }
    }

    pub fn symbol(&self) -> &'static str {
        if self.success {
            "✅"
        } else {
            "❌"
        }
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} (expected {})",
            self.symbol(),
            self.name,
            self.actual_status,
            self.expected_status
        )
    }
}

/// Summary of one harness run
#[derive(Clone, Debug, Serialize)]
pub struct RunSummary {
    pub base_url: String,
    pub started_at: DateTime<Utc>,
    pub tests_run: usize,
    pub tests_passed: usize,
    /// The gating root check failed and later scenarios were skipped
    pub aborted: bool,
    pub results: Vec<TestResult>,
}

impl RunSummary {
    pub fn failed(&self) -> usize {
        self.tests_run - self.tests_passed
    }

    pub fn is_all_passed(&self) -> bool {
        !self.aborted && self.tests_passed == self.tests_run
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_all_passed() {
            0
        } else {
            1
        }
    }
}
