//! HTTP client module for API testing
//!
//! Provides the request wrapper used by every scenario.

mod client;

pub use client::{truncate, HttpClient, HttpRequest};
