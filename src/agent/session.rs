//! Agent session state
//!
//! Tracks one bounded run of the analyze/execute/verify/retry loop.

use serde::{Deserialize, Serialize};

use crate::agent::transcript::Transcript;

/// A task handed to the agent
#[derive(Debug, Clone)]
pub struct Task {
    /// Free-text goal description
    pub goal: String,
    /// Maximum analyze/execute/verify cycles
    pub max_attempts: u32,
}

impl Task {
    /// Create a task with the default attempt ceiling
    pub fn new(goal: impl Into<String>) -> Self {
        Self {
            goal: goal.into(),
            max_attempts: 3,
        }
    }

    /// Override the attempt ceiling
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

/// Stage of the agent loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Waiting on the collaborator to pick the next step
    Analyzing,
    /// Carrying out the parsed directive
    Executing,
    /// Waiting on the collaborator's completion judgment
    Verifying,
    /// Judged incomplete; another cycle will start if attempts remain
    Retry,
    /// Terminal: the task was accomplished
    Success,
    /// Terminal: collaborator failure or attempts exhausted
    Failed,
}

impl SessionStatus {
    /// Whether the loop stops at this status
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Success | SessionStatus::Failed)
    }
}

impl Default for SessionStatus {
    fn default() -> Self {
        SessionStatus::Analyzing
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SessionStatus::Analyzing => "analyzing",
            SessionStatus::Executing => "executing",
            SessionStatus::Verifying => "verifying",
            SessionStatus::Retry => "retry",
            SessionStatus::Success => "success",
            SessionStatus::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// Mutable state of one running session
///
/// Created at task start, mutated once per loop stage, dropped when the
/// loop terminates. Never shared across tasks.
#[derive(Debug, Default)]
pub struct Session {
    /// Conversation so far
    pub transcript: Transcript,
    /// Completed verify cycles
    pub attempts: u32,
    /// Current loop stage
    pub status: SessionStatus,
    /// Most recent tool observation text
    pub last_observation: Option<String>,
}

impl Session {
    /// Create a fresh session in the analyzing stage
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observation to the transcript and retain it for verify
    pub fn record_observation(&mut self, tool_name: &str, text: &str) {
        self.transcript
            .push_human(format!("OBSERVATION ({}): {}", tool_name, text));
        self.last_observation = Some(text.to_string());
    }
}

/// Result record returned by the agent entry point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Terminal status (`success` or `failed`)
    pub status: SessionStatus,
    /// Verify cycles completed before termination
    pub attempts_used: u32,
    /// Final answer, when the session succeeded
    pub answer: Option<String>,
    /// Failure reason, when the session failed
    pub failure: Option<String>,
    /// Full rendered transcript for diagnostics
    pub transcript: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_defaults() {
        let task = Task::new("list files");
        assert_eq!(task.goal, "list files");
        assert_eq!(task.max_attempts, 3);

        let task = Task::new("x").with_max_attempts(5);
        assert_eq!(task.max_attempts, 5);
    }

    #[test]
    fn test_status_terminality() {
        assert!(SessionStatus::Success.is_terminal());
        assert!(SessionStatus::Failed.is_terminal());
        assert!(!SessionStatus::Analyzing.is_terminal());
        assert!(!SessionStatus::Retry.is_terminal());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(SessionStatus::Analyzing.to_string(), "analyzing");
        assert_eq!(SessionStatus::Success.to_string(), "success");
    }

    #[test]
    fn test_new_session() {
        let session = Session::new();
        assert_eq!(session.status, SessionStatus::Analyzing);
        assert_eq!(session.attempts, 0);
        assert!(session.transcript.is_empty());
        assert!(session.last_observation.is_none());
    }

    #[test]
    fn test_record_observation() {
        let mut session = Session::new();
        session.record_observation("list_directory", "a.txt\nb.txt");

        assert_eq!(session.last_observation.as_deref(), Some("a.txt\nb.txt"));
        let rendered = session.transcript.render();
        assert!(rendered.contains("OBSERVATION (list_directory): a.txt"));
    }
}
