//! Ana - Bounded Task Agent
//!
//! A Rust task agent that runs a bounded analyze/execute/verify/retry loop,
//! delegating reasoning to a Groq-hosted model and side effects to a small
//! registry of local tools.
//!
//! # Architecture
//!
//! - **Core**: Shared types, configuration, and error handling
//! - **LLM**: Collaborator abstraction with a Groq implementation
//! - **Tools**: Tool trait, registry, filesystem and python tools
//! - **Agent**: Loop controller, directive parsing, session state
//! - **CLI**: Command-line interface and REPL
//!
//! # Usage
//!
//! ```rust,no_run
//! use ana::{Agent, Config, Task};
//!
//! #[tokio::main]
//! async fn main() {
//!     let agent = Agent::from_config(Config::load()).unwrap();
//!
//!     let task = Task::new("List the files in the docs directory");
//!     let report = agent.run_task(&task).await;
//!     println!("{:?}: {:?}", report.status, report.answer);
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod core;
pub mod llm;
pub mod tools;

// Re-export commonly used items
pub use agent::{Agent, SessionReport, SessionStatus, Task};
pub use cli::Repl;
pub use core::{AnaError, Config, Result};
pub use llm::Collaborator;
pub use tools::{Tool, ToolRegistry};
