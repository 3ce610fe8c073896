//! CLI commands
//!
//! Special commands that can be executed in the REPL.

use crate::agent::Agent;
use crate::core::Result;

/// Result of parsing a command
pub enum CommandResult {
    /// Continue processing as a normal task
    Continue(String),
    /// Command was handled, show output
    Handled(String),
    /// Exit the REPL
    Exit,
    /// No output needed
    None,
}

/// Parse and handle special commands
pub async fn handle_command(input: &str, agent: &mut Agent) -> Result<CommandResult> {
    let input = input.trim();
    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let args = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match cmd.as_str() {
        "exit" | "quit" | "q" => Ok(CommandResult::Exit),

        "help" | "?" => Ok(CommandResult::Handled(help_text())),

        "tools" => {
            let output = format!("Available tools:\n{}", agent.tools().describe());
            Ok(CommandResult::Handled(output))
        }

        "status" => {
            let config = agent.config();
            let status = format!(
                "Ana Status:\n\
                 ─────────────────────────────\n\
                 Collaborator: {} ({})\n\
                 Max attempts: {}\n\
                 Workspace:    {}\n\
                 Tools:        {}\n\
                 Streaming:    {}\n\
                 Debug:        {}",
                agent.collaborator_name(),
                config.groq.model,
                config.agent.max_attempts,
                config.tools.workspace_root.display(),
                agent.tools().names().join(", "),
                if config.streaming.enabled { "on" } else { "off" },
                if config.agent.debug { "on" } else { "off" }
            );
            Ok(CommandResult::Handled(status))
        }

        "set" => handle_set_command(args, agent),

        "debug" => {
            let new_state = !agent.config().agent.debug;
            agent.config_mut().agent.debug = new_state;
            Ok(CommandResult::Handled(format!(
                "Debug mode: {}",
                if new_state { "ON" } else { "OFF" }
            )))
        }

        _ => {
            // Not a command, treat as a task
            if input.starts_with('/') {
                Ok(CommandResult::Handled(format!(
                    "Unknown command: {}. Type 'help' for available commands.",
                    cmd
                )))
            } else {
                Ok(CommandResult::Continue(input.to_string()))
            }
        }
    }
}

/// Handle 'set' subcommands
fn handle_set_command(args: &str, agent: &mut Agent) -> Result<CommandResult> {
    let parts: Vec<&str> = args.splitn(2, ' ').collect();

    if parts.is_empty() || parts[0].is_empty() {
        return Ok(CommandResult::Handled(
            "Usage: set <attempts|debug|streaming> <value>\n\
             Examples:\n\
               set attempts 5\n\
               set debug on\n\
               set streaming off"
                .to_string(),
        ));
    }

    let key = parts[0].to_lowercase();
    let value = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match key.as_str() {
        "attempts" => {
            let Some(parsed) = value.parse::<u32>().ok().filter(|n| *n > 0) else {
                return Ok(CommandResult::Handled(format!(
                    "Current max attempts: {}",
                    agent.config().agent.max_attempts
                )));
            };
            agent.config_mut().agent.max_attempts = parsed;
            Ok(CommandResult::Handled(format!(
                "Max attempts set to: {}",
                parsed
            )))
        }

        "debug" => {
            let enabled = matches!(value.to_lowercase().as_str(), "on" | "true" | "1" | "yes");
            agent.config_mut().agent.debug = enabled;
            Ok(CommandResult::Handled(format!(
                "Debug mode: {}",
                if enabled { "ON" } else { "OFF" }
            )))
        }

        "streaming" => {
            let enabled = matches!(value.to_lowercase().as_str(), "on" | "true" | "1" | "yes");
            agent.config_mut().set_streaming(enabled);
            Ok(CommandResult::Handled(format!(
                "Streaming: {}",
                if enabled { "ON" } else { "OFF" }
            )))
        }

        _ => Ok(CommandResult::Handled(format!(
            "Unknown setting: {}. Available: attempts, debug, streaming",
            key
        ))),
    }
}

/// Generate help text
fn help_text() -> String {
    r#"Ana Commands:
─────────────────────────────────────────────
  help, ?          Show this help message
  exit, quit, q    Exit Ana
  status           Show current configuration
  tools            List registered tools
  debug            Toggle debug mode

  set attempts <n>         Set the attempt ceiling
  set debug <on|off>       Enable/disable debug output
  set streaming <on|off>   Enable/disable token streaming

Anything else is run as a task through the
analyze/execute/verify loop.
─────────────────────────────────────────────"#
        .to_string()
}
