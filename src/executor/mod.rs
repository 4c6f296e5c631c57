//! Test execution engine
//!
//! Runs the scenarios sequentially against a single backend.

mod runner;

pub use runner::ApiTester;
