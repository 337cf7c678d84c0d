//! Probe dispatch for the EchoTrace verification loop
//!
//! This crate provides the cloud-side fan-out engine:
//! - One fresh correlation token per cycle, embedded in every payload
//! - One method invocation per configured destination, concurrently
//! - Per-destination failure isolation and three-way outcome classification
//! - A cycle report aggregating the per-destination outcomes

pub mod cycle;
pub mod invoker;

pub use cycle::{CycleReport, Dispatcher, DEFAULT_CALL_TIMEOUT};
pub use invoker::{InvokeError, MethodInvoker};
