//! promfile core: metric values, the registry and the text exposition renderer.
//!
//! This crate carries no async runtime or I/O. Everything here is an in-memory
//! total function: creating metrics, mutating their values and rendering the
//! registry never fail. Scheduling, sinks and process sampling live in
//! `promfile-agent`.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metric;
pub mod registry;

mod render;

/// Shared result type.
pub use error::{Result, PromfileError};
pub use metric::{Labels, Metric, MetricHandle, MetricKind, MetricValue};
pub use registry::Registry;
