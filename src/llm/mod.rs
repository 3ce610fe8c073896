//! LLM module - the external text-completion collaborator
//!
//! Provides the collaborator abstraction with Groq as the primary backend.

pub mod groq;
pub mod traits;

pub use groq::GroqClient;
pub use traits::{Collaborator, CompleteOptions, TokenCallback};
