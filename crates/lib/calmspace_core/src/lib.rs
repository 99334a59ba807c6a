//! # calmspace_core
//!
//! Core domain logic for CalmSpace.

pub mod crisis;
pub mod dataset;
pub mod emotion;
pub mod llm;
pub mod memory;
pub mod responder;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
