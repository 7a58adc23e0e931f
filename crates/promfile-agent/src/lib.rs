//! promfile agent library entry.
//!
//! Wires the core registry to its timer-driven collaborators: a dump scheduler
//! that publishes the rendering to a sink, and a sampler that copies process
//! and runtime statistics into the registry. Consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod agent;
pub mod config;
pub mod dump;
pub mod runtime_stats;

pub use agent::Agent;
