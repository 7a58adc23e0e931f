//! Top-level facade crate for promfile.
//!
//! Re-exports the core registry and the agent library so users can depend on a single crate.

pub mod core {
    pub use promfile_core::*;
}

pub mod agent {
    pub use promfile_agent::*;
}

pub use promfile_core::{MetricHandle, MetricKind, Registry};
