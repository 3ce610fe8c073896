//! Agent orchestrator
//!
//! Runs the bounded analyze → execute → verify → retry cycle for one task,
//! delegating reasoning to the collaborator and side effects to the tool
//! registry.

use std::io::{self, Write};
use std::time::Duration;

use crate::agent::directive::{parse_directive, Directive};
use crate::agent::session::{Session, SessionReport, SessionStatus, Task};
use crate::core::{AnaError, Config, Message, Result};
use crate::llm::{Collaborator, CompleteOptions, GroqClient};
use crate::tools::ToolRegistry;

/// Instruction injected when a response carried neither action nor answer
const CORRECTIVE_INSTRUCTION: &str = "Your reply contained no usable ACTION or ANSWER. \
    Reply with either ACTION: followed by a single JSON object \
    {\"tool\": \"<name>\", \"args\": {...}}, or ANSWER: followed by the final answer.";

/// Main agent that runs tasks through the loop
pub struct Agent {
    /// Configuration
    config: Config,
    /// Text-completion collaborator
    collaborator: Box<dyn Collaborator>,
    /// Local tool registry
    tools: ToolRegistry,
}

impl Agent {
    /// Create an agent from configuration, with the Groq collaborator and
    /// the default tool registry
    pub fn from_config(config: Config) -> Result<Self> {
        let collaborator = GroqClient::from_config(&config)?;
        let tools = ToolRegistry::with_defaults(&config.tools);
        Ok(Self::new(config, Box::new(collaborator), tools))
    }

    /// Create an agent with an explicit collaborator and registry
    pub fn new(config: Config, collaborator: Box<dyn Collaborator>, tools: ToolRegistry) -> Self {
        Self {
            config,
            collaborator,
            tools,
        }
    }

    /// Get current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get mutable configuration
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Get the tool registry
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Get the collaborator name
    pub fn collaborator_name(&self) -> &str {
        self.collaborator.name()
    }

    /// Run a task through the analyze/execute/verify/retry loop
    ///
    /// The loop runs at most `task.max_attempts` full cycles. Tool faults
    /// and malformed responses are fed back into the transcript; only a
    /// collaborator transport failure terminates the session directly.
    pub async fn run_task(&self, task: &Task) -> SessionReport {
        let max_attempts = task.max_attempts.max(1);
        let mut session = Session::new();
        session.transcript.set_system_prompt(self.system_prompt());

        let mut answer: Option<String> = None;

        loop {
            // Analyze: let the collaborator pick the next step
            session.status = SessionStatus::Analyzing;
            println!(
                "[Attempt {}/{}] Analyzing...",
                session.attempts + 1,
                max_attempts
            );

            if !session.transcript.has_human_messages() {
                session.transcript.push_human(&task.goal);
            }

            let response = match self.call_collaborator(&session).await {
                Ok(response) => response,
                Err(e) => return self.fail(session, e.to_string()),
            };
            session.transcript.push_assistant(&response);

            // Execute: act on the parsed directive
            session.status = SessionStatus::Executing;
            let directive = parse_directive(&response);
            self.debug_directive(&directive);

            match directive.action {
                Some(call) => {
                    println!(
                        "[Attempt {}/{}] Executing {}...",
                        session.attempts + 1,
                        max_attempts,
                        call.name
                    );
                    let observation = self.tools.execute(&call).await;
                    session.record_observation(&call.name, &observation);
                }
                None => {
                    if let Some(text) = directive.answer {
                        // Terminal answer short-circuits tool execution and verify
                        session.status = SessionStatus::Success;
                        answer = Some(text);
                        break;
                    }
                    session.transcript.push_human(CORRECTIVE_INSTRUCTION);
                }
            }

            // Verify: ask the collaborator whether the task is done
            session.status = SessionStatus::Verifying;
            let accomplished = match self.verify(&session).await {
                Ok(accomplished) => accomplished,
                Err(e) => return self.fail(session, e.to_string()),
            };
            session.attempts += 1;

            if accomplished {
                session.status = SessionStatus::Success;
                break;
            }
            session.status = SessionStatus::Retry;

            // Retry gate
            if session.attempts >= max_attempts {
                return self.fail(
                    session,
                    format!("Attempts exhausted after {} cycles", max_attempts),
                );
            }
        }

        println!("[Agent] Complete ({} attempts)", session.attempts);

        let answer = answer.or_else(|| session.last_observation.clone());
        SessionReport {
            status: SessionStatus::Success,
            attempts_used: session.attempts,
            answer,
            failure: None,
            transcript: session.transcript.render(),
        }
    }

    /// Run a task with an external wall-clock ceiling around the whole loop
    ///
    /// The loop itself has no per-stage timeout; this is the outer bound for
    /// callers that need one.
    pub async fn run_task_with_timeout(
        &self,
        task: &Task,
        ceiling: Duration,
    ) -> Result<SessionReport> {
        tokio::time::timeout(ceiling, self.run_task(task))
            .await
            .map_err(|_| AnaError::TaskTimeout(ceiling.as_secs()))
    }

    /// Build the system prompt from the registry's tool list
    fn system_prompt(&self) -> String {
        let base = format!(
            "You are Ana, an assistant that completes tasks using local tools.\n\
             Work step by step. Structure every reply with these markers:\n\
             THOUGHT: your reasoning\n\
             ACTION: a single JSON object {{\"tool\": \"<name>\", \"args\": {{...}}}}\n\
             ANSWER: the final answer, only once the task is complete\n\n\
             Use exactly one ACTION or one ANSWER per reply, never both.\n\
             After each ACTION you receive an OBSERVATION with the result.\n\n\
             Available tools:\n{}",
            self.tools.describe()
        );

        match self.config.agent.system_prompt {
            Some(ref prefix) => format!("{}\n\n{}", prefix, base),
            None => base,
        }
    }

    /// Call the collaborator with the session transcript
    async fn call_collaborator(&self, session: &Session) -> Result<String> {
        let messages = session.transcript.messages();

        if self.config.streaming.enabled && self.config.streaming.print_tokens {
            let response = self
                .collaborator
                .complete_stream(
                    &messages,
                    None,
                    Box::new(|token| {
                        print!("{}", token);
                        let _ = io::stdout().flush();
                    }),
                )
                .await?;
            println!();
            Ok(response)
        } else {
            self.collaborator.complete(&messages, None).await
        }
    }

    /// Ask the collaborator for a completion judgment
    async fn verify(&self, session: &Session) -> Result<bool> {
        let mut messages = session.transcript.messages();
        messages.push(Message::human(build_verify_question(session)));

        let reply = self
            .collaborator
            .complete(
                &messages,
                Some(CompleteOptions {
                    temperature: Some(0.0),
                    ..Default::default()
                }),
            )
            .await?;

        if self.config.agent.debug {
            eprintln!("DEBUG verify reply: {}", reply);
        }

        Ok(is_affirmative(&reply))
    }

    fn debug_directive(&self, directive: &Directive) {
        if self.config.agent.debug {
            eprintln!(
                "DEBUG directive: action={:?} answer_present={}",
                directive.action.as_ref().map(|a| a.name.as_str()),
                directive.answer.is_some()
            );
        }
    }

    fn fail(&self, mut session: Session, reason: String) -> SessionReport {
        session.status = SessionStatus::Failed;
        println!("[Agent] Failed after {} attempts: {}", session.attempts, reason);
        SessionReport {
            status: SessionStatus::Failed,
            attempts_used: session.attempts,
            answer: None,
            failure: Some(reason),
            transcript: session.transcript.render(),
        }
    }
}

/// Build the verify question from the latest observation
fn build_verify_question(session: &Session) -> String {
    let observation = session
        .last_observation
        .as_deref()
        .unwrap_or("(no action was taken)");

    format!(
        "Result of the execution: {}\n\
         Is the task accomplished correctly?\n\
         Reply with JSON: {{\"success\": true/false, \"reason\": \"...\"}}",
        observation
    )
}

/// Loose affirmative check over a free-text verify reply
///
/// Any case-insensitive "true" token counts; the collaborator is not
/// guaranteed to emit valid JSON.
fn is_affirmative(text: &str) -> bool {
    text.to_lowercase().contains("true")
}
