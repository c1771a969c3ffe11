//! Shared test utilities for spoofscan integration tests.
//!
//! This module provides:
//! - `TestHarness` for isolated test execution with temp directories
//! - `MockBackend`, a one-shot HTTP responder standing in for the analysis API
//! - Builders for docx fixtures, configs and scripted analyzers

pub mod builders;
pub mod harness;

pub use builders::*;
pub use harness::{MockBackend, TestHarness};
