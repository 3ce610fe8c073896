//! Tools module - local operations the collaborator can request
//!
//! Contains the tool trait, the registry, and the built-in filesystem and
//! python tools.

pub mod fs;
pub mod python;
pub mod registry;

pub use registry::{Tool, ToolRegistry};
