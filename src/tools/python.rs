//! Restricted code execution tool
//!
//! Runs collaborator-supplied Python through a subprocess with a hard
//! wall-clock limit.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::core::{AnaError, Result};
use crate::tools::registry::Tool;

/// Tool that executes a Python snippet
pub struct RunPythonTool {
    bin: String,
    timeout: Duration,
}

impl RunPythonTool {
    /// Create a python tool using the given interpreter
    pub fn new(bin: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            bin: bin.into(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

#[async_trait]
impl Tool for RunPythonTool {
    fn name(&self) -> &str {
        "run_python"
    }

    fn description(&self) -> &str {
        "Execute a short Python snippet and return its output. Args: code"
    }

    fn parameters(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "code": {
                    "type": "string",
                    "description": "Python source to execute"
                }
            },
            "required": ["code"]
        })
    }

    async fn invoke(&self, args: &serde_json::Value) -> Result<String> {
        let code = args
            .get("code")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AnaError::tool("missing 'code' argument"))?;

        let child = Command::new(&self.bin)
            .arg("-c")
            .arg(code)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, child)
            .await
            .map_err(|_| {
                AnaError::tool(format!(
                    "python timed out after {} seconds",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| AnaError::tool(format!("cannot run '{}': {}", self.bin, e)))?;

        if output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            if stdout.trim().is_empty() {
                Ok("(no output)".to_string())
            } else {
                Ok(stdout.into_owned())
            }
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(AnaError::tool(format!(
                "python exited with {}: {}",
                output.status,
                stderr.trim()
            )))
        }
    }
}
