//! Ana - Bounded Task Agent
//!
//! Main entry point for the CLI application.

use std::path::PathBuf;

use clap::Parser;

use ana::{Config, Repl, SessionStatus};

/// Ana - Bounded Task Agent
#[derive(Parser, Debug)]
#[command(name = "ana")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Collaborator model identifier
    #[arg(long, short = 'm')]
    model: Option<String>,

    /// Maximum analyze/execute/verify cycles per task
    #[arg(long, short = 'a')]
    max_attempts: Option<u32>,

    /// Workspace root for the file tools
    #[arg(long, short = 'w')]
    workspace: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'd')]
    debug: bool,

    /// Disable token streaming
    #[arg(long)]
    no_stream: bool,

    /// Single task mode (non-interactive)
    #[arg(long, short = 't')]
    task: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Build configuration
    let mut config = Config::load();

    // Apply CLI overrides
    if let Some(ref model) = args.model {
        config.groq.model = model.clone();
    }

    if let Some(max_attempts) = args.max_attempts {
        config.agent.max_attempts = max_attempts;
    }

    if let Some(ref workspace) = args.workspace {
        config.tools.workspace_root = workspace.clone();
    }

    if args.debug {
        config.agent.debug = true;
    }

    if args.no_stream {
        config.streaming.enabled = false;
    }

    // Single task mode
    if let Some(goal) = args.task {
        let max_attempts = config.agent.max_attempts;
        let agent = ana::Agent::from_config(config)?;

        let task = ana::Task::new(goal).with_max_attempts(max_attempts);
        let report = agent.run_task(&task).await;

        match report.status {
            SessionStatus::Success => {
                println!("{}", report.answer.unwrap_or_default());
                return Ok(());
            }
            _ => {
                anyhow::bail!(
                    "task failed after {} attempt(s): {}",
                    report.attempts_used,
                    report.failure.unwrap_or_default()
                );
            }
        }
    }

    // Interactive REPL mode
    let mut repl = Repl::with_config(config)?;
    repl.run().await?;

    Ok(())
}
