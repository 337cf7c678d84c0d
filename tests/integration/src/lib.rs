//! Integration tests for the EchoTrace verification loop
//!
//! This test suite validates:
//! - End-to-end correlation: dispatcher → edge handler → ingestion, one
//!   token on every hop
//! - Per-destination failure isolation inside one cycle
//! - The unknown-method fallback across the call boundary
//! - The connection monitor's recoverable-vs-fatal split

pub mod test_utils;

#[cfg(test)]
mod monitor_tests;

#[cfg(test)]
mod pipeline_tests;
