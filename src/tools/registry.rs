//! Tool registry - manages and dispatches tool calls
//!
//! Central hub for registering tools and routing collaborator action
//! requests to handlers. Dispatch never surfaces an error to the loop:
//! unknown names and tool faults both come back as observation text.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::core::{Result, ToolCall};

/// A named side-effecting operation the collaborator can request
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name used for dispatch
    fn name(&self) -> &str;

    /// One-line description shown to the collaborator
    fn description(&self) -> &str;

    /// JSON Schema for the accepted arguments
    fn parameters(&self) -> serde_json::Value;

    /// Run the tool; the returned string becomes the observation
    async fn invoke(&self, args: &serde_json::Value) -> Result<String>;
}

/// Registry of available tools
///
/// Populated at startup and read-only afterwards.
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the default local tools
    pub fn with_defaults(config: &crate::core::config::ToolsConfig) -> Self {
        use crate::tools::fs::{ListDirectoryTool, ReadFileTool, WriteFileTool};
        use crate::tools::python::RunPythonTool;

        let mut registry = Self::new();
        registry.register(Box::new(ReadFileTool::new(
            &config.workspace_root,
            config.read_limit,
        )));
        registry.register(Box::new(WriteFileTool::new(&config.workspace_root)));
        registry.register(Box::new(ListDirectoryTool::new(&config.workspace_root)));
        registry.register(Box::new(RunPythonTool::new(
            &config.python_bin,
            config.python_timeout_secs,
        )));
        registry
    }

    /// Register a tool under its own name
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// All registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if no tools are registered
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Tool list formatted for the system prompt
    pub fn describe(&self) -> String {
        let mut output = String::new();
        for tool in self.tools.values() {
            output.push_str(&format!("- {}: {}\n", tool.name(), tool.description()));
        }
        output
    }

    /// Execute a tool call, converting every failure into observation text
    pub async fn execute(&self, call: &ToolCall) -> String {
        let Some(tool) = self.get(&call.name) else {
            return format!(
                "Unknown tool '{}'. Valid tools: {}",
                call.name,
                self.names().join(", ")
            );
        };

        match tool.invoke(&call.arguments).await {
            Ok(output) => output,
            Err(e) => format!("ERROR: {}", e),
        }
    }
}
