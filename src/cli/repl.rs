//! Interactive REPL for Ana
//!
//! Provides the main user interaction loop.

use std::io::{self, BufRead, Write};

use crate::agent::{Agent, SessionStatus, Task};
use crate::cli::commands::{handle_command, CommandResult};
use crate::core::{Config, Result};

/// Interactive REPL (Read-Eval-Print Loop)
pub struct Repl {
    agent: Agent,
}

impl Repl {
    /// Create a REPL with custom configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self {
            agent: Agent::from_config(config)?,
        })
    }

    /// Run the REPL
    pub async fn run(&mut self) -> Result<()> {
        self.print_banner();

        let stdin = io::stdin();
        let mut stdout = io::stdout();

        loop {
            print!("Task: ");
            stdout.flush()?;

            let mut input = String::new();
            match stdin.lock().read_line(&mut input) {
                Ok(0) => {
                    // EOF (Ctrl+D)
                    println!("\nGoodbye!");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    eprintln!("Error reading input: {}", e);
                    continue;
                }
            }

            let input = input.trim();

            if input.is_empty() {
                continue;
            }

            match handle_command(input, &mut self.agent).await {
                Ok(CommandResult::Exit) => {
                    println!("\nGoodbye!");
                    break;
                }
                Ok(CommandResult::Handled(output)) => {
                    println!("{}\n", output);
                    continue;
                }
                Ok(CommandResult::None) => continue,
                Ok(CommandResult::Continue(goal)) => {
                    let task = Task::new(goal)
                        .with_max_attempts(self.agent.config().agent.max_attempts);
                    let report = self.agent.run_task(&task).await;

                    match report.status {
                        SessionStatus::Success => {
                            println!(
                                "\n✓ Success ({} attempt(s)):\n{}\n",
                                report.attempts_used,
                                report.answer.unwrap_or_default()
                            );
                        }
                        _ => {
                            println!(
                                "\n✗ Failed ({} attempt(s)): {}\n",
                                report.attempts_used,
                                report.failure.unwrap_or_default()
                            );
                        }
                    }
                }
                Err(e) => {
                    eprintln!("Command error: {}\n", e);
                }
            }
        }

        Ok(())
    }

    /// Print the startup banner
    fn print_banner(&self) {
        let config = self.agent.config();

        println!(
            r#"
╔═══════════════════════════════════════╗
║   ANA — task agent                    ║
║   analyze · execute · verify · retry  ║
╚═══════════════════════════════════════╝
"#
        );
        println!("Collaborator: {}", config.groq.model);
        println!("Max attempts: {}", config.agent.max_attempts);
        println!("Tools:        {}", self.agent.tools().names().join(", "));
        println!();
        println!("Commands: help, status, tools, debug, exit");
        println!("───────────────────────────────────────────");
    }
}
