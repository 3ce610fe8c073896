//! Agent module - loop controller and session management
//!
//! Contains the analyze/execute/verify/retry loop, directive parsing, and
//! the per-session transcript and state.

pub mod directive;
pub mod orchestrator;
pub mod session;
pub mod transcript;

pub use directive::{parse_directive, Directive};
pub use orchestrator::Agent;
pub use session::{Session, SessionReport, SessionStatus, Task};
pub use transcript::Transcript;
