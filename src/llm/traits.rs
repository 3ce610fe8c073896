//! Collaborator trait for abstracting the text-completion service
//!
//! The agent loop treats the model as an opaque collaborator: ordered
//! role-tagged messages in, one free-text message out. Implementations can
//! be swapped for scripted fakes in tests.

use async_trait::async_trait;

use crate::core::{Message, Result};

/// Options for a single completion call
#[derive(Debug, Clone, Default)]
pub struct CompleteOptions {
    /// Temperature for sampling (0.0 - 2.0)
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Stop sequences
    pub stop: Option<Vec<String>>,
}

/// Callback function for streaming tokens
pub type TokenCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Trait for text-completion collaborators
#[async_trait]
pub trait Collaborator: Send + Sync {
    /// Generate a response from the given transcript
    async fn complete(
        &self,
        messages: &[Message],
        options: Option<CompleteOptions>,
    ) -> Result<String>;

    /// Generate a response, invoking the callback for each token as it arrives
    ///
    /// The default implementation falls back to a blocking completion and
    /// delivers the full text through the callback in one piece.
    async fn complete_stream(
        &self,
        messages: &[Message],
        options: Option<CompleteOptions>,
        on_token: TokenCallback,
    ) -> Result<String> {
        let content = self.complete(messages, options).await?;
        on_token(&content);
        Ok(content)
    }

    /// Get the collaborator name
    fn name(&self) -> &str;
}
