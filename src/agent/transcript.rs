//! Conversation transcript
//!
//! Append-only, role-tagged message history owned by a single session.

use crate::core::{Message, Role};

/// Transcript of a single agent session
///
/// Messages only accumulate; nothing is evicted while the session runs.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    /// Message history
    messages: Vec<Message>,
    /// System prompt (always first)
    system_prompt: Option<String>,
}

impl Transcript {
    /// Create a new empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the system prompt
    pub fn set_system_prompt(&mut self, prompt: impl Into<String>) {
        self.system_prompt = Some(prompt.into());
    }

    /// Add a human message
    pub fn push_human(&mut self, content: impl Into<String>) {
        self.messages.push(Message::human(content));
    }

    /// Add an assistant message
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// Get all messages including the system prompt
    pub fn messages(&self) -> Vec<Message> {
        let mut result = Vec::with_capacity(self.messages.len() + 1);

        if let Some(ref prompt) = self.system_prompt {
            result.push(Message::system(prompt.clone()));
        }

        result.extend(self.messages.iter().cloned());
        result
    }

    /// Get the last assistant message
    pub fn last_assistant_message(&self) -> Option<&Message> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::Assistant)
    }

    /// Whether any human message has been appended yet
    pub fn has_human_messages(&self) -> bool {
        self.messages.iter().any(|m| m.role == Role::Human)
    }

    /// Get message count (system prompt excluded)
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Render the full transcript as labelled text for reports
    pub fn render(&self) -> String {
        let mut output = String::new();

        if let Some(ref prompt) = self.system_prompt {
            output.push_str(&format!("[system]\n{}\n\n", prompt));
        }

        for msg in &self.messages {
            output.push_str(&format!("[{}]\n{}\n\n", msg.role, msg.content));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_basic() {
        let mut transcript = Transcript::new();
        transcript.push_human("Hello");
        transcript.push_assistant("Hi there!");

        assert_eq!(transcript.len(), 2);
        assert_eq!(
            transcript.last_assistant_message().unwrap().content,
            "Hi there!"
        );
    }

    #[test]
    fn test_system_prompt_first() {
        let mut transcript = Transcript::new();
        transcript.set_system_prompt("You are Ana");
        transcript.push_human("Hello");

        let messages = transcript.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::Human);
    }

    #[test]
    fn test_append_only_growth() {
        let mut transcript = Transcript::new();
        for i in 0..100 {
            transcript.push_human(format!("msg {}", i));
        }
        assert_eq!(transcript.len(), 100);
    }

    #[test]
    fn test_has_human_messages() {
        let mut transcript = Transcript::new();
        assert!(!transcript.has_human_messages());
        transcript.push_assistant("unprompted");
        assert!(!transcript.has_human_messages());
        transcript.push_human("task");
        assert!(transcript.has_human_messages());
    }

    #[test]
    fn test_render_labels_roles() {
        let mut transcript = Transcript::new();
        transcript.set_system_prompt("sys");
        transcript.push_human("ask");
        transcript.push_assistant("reply");

        let rendered = transcript.render();
        assert!(rendered.contains("[system]\nsys"));
        assert!(rendered.contains("[human]\nask"));
        assert!(rendered.contains("[assistant]\nreply"));
    }
}
