//! Scenario catalog
//!
//! The five checks run against the API, in run order.

use serde::Serialize;
use std::fmt;

use super::{ContactMessageRequest, StatusCheckRequest};

/// HTTP verbs the harness issues
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// All scenarios exercised against the API
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scenario {
    ApiRoot,

    // Contact endpoints
    CreateContactMessage,
    GetContactMessages,

    // Status endpoints
    CreateStatusCheck,
    GetStatusChecks,
}

impl Scenario {
    /// Get scenario number (1-5)
    pub fn number(&self) -> u8 {
        match self {
            Scenario::ApiRoot => 1,
            Scenario::CreateContactMessage => 2,
            Scenario::GetContactMessages => 3,
            Scenario::CreateStatusCheck => 4,
            Scenario::GetStatusChecks => 5,
        }
    }

    /// Get scenario name
    pub fn name(&self) -> &'static str {
        match self {
            Scenario::ApiRoot => "API Root",
            Scenario::CreateContactMessage => "Create Contact Message",
            Scenario::GetContactMessages => "Get Contact Messages",
            Scenario::CreateStatusCheck => "Create Status Check",
            Scenario::GetStatusChecks => "Get Status Checks",
        }
    }

    pub fn method(&self) -> HttpMethod {
        match self {
            Scenario::CreateContactMessage | Scenario::CreateStatusCheck => HttpMethod::Post,
            _ => HttpMethod::Get,
        }
    }

    /// Endpoint relative to the API root; empty for the root itself
    pub fn endpoint(&self) -> &'static str {
        match self {
            Scenario::ApiRoot => "",
            Scenario::CreateContactMessage | Scenario::GetContactMessages => "contact",
            Scenario::CreateStatusCheck | Scenario::GetStatusChecks => "status",
        }
    }

    pub fn expected_status(&self) -> u16 {
        200
    }

    /// Get scenario category
    pub fn category(&self) -> &'static str {
        match self {
            Scenario::ApiRoot => "Root",
            Scenario::CreateContactMessage | Scenario::GetContactMessages => "Contact",
            Scenario::CreateStatusCheck | Scenario::GetStatusChecks => "Status",
        }
    }

    /// Whether a failure of this scenario stops the run
    pub fn is_gating(&self) -> bool {
        matches!(self, Scenario::ApiRoot)
    }

    /// Request body sent with the scenario, if any
    pub fn payload(&self) -> Option<serde_json::Value> {
        match self {
            Scenario::CreateContactMessage => {
                serde_json::to_value(ContactMessageRequest::sample()).ok()
            }
            Scenario::CreateStatusCheck => serde_json::to_value(StatusCheckRequest::sample()).ok(),
            _ => None,
        }
    }

    /// Get all scenarios in run order
    pub fn all() -> Vec<Scenario> {
        vec![
            Scenario::ApiRoot,
            Scenario::CreateContactMessage,
            Scenario::GetContactMessages,
            Scenario::CreateStatusCheck,
            Scenario::GetStatusChecks,
        ]
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.name())
    }
}
