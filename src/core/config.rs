//! Configuration management for Ana
//!
//! Supports environment variables, config files, and runtime overrides.
//!
//! Config file location: ~/.config/ana/config.toml

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::core::error::{AnaError, Result};

/// Main configuration for Ana
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Groq API configuration
    pub groq: GroqConfig,
    /// Agent loop configuration
    pub agent: AgentConfig,
    /// Local tool configuration
    pub tools: ToolsConfig,
    /// Streaming configuration
    #[serde(default)]
    pub streaming: StreamingConfig,
}

/// Groq API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroqConfig {
    /// Base URL of the OpenAI-compatible endpoint
    pub api_url: String,
    /// API key; falls back to GROQ_API_KEY at client construction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Completion token ceiling
    pub max_tokens: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Agent loop behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Maximum analyze/execute/verify cycles before giving up
    /// Default: 3
    pub max_attempts: u32,
    /// Whether to show debug output
    pub debug: bool,
    /// Extra system prompt prepended to the built-in instructions
    pub system_prompt: Option<String>,
}

/// Local tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Directory the file tools are confined to
    pub workspace_root: PathBuf,
    /// Python interpreter used by run_python
    pub python_bin: String,
    /// Wall-clock limit for run_python in seconds
    pub python_timeout_secs: u64,
    /// Default character limit for read_file observations
    pub read_limit: usize,
}

/// Streaming configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamingConfig {
    /// Whether to stream collaborator responses in real-time
    pub enabled: bool,
    /// Print tokens as they arrive (vs buffering)
    pub print_tokens: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            groq: GroqConfig::default(),
            agent: AgentConfig::default(),
            tools: ToolsConfig::default(),
            streaming: StreamingConfig::default(),
        }
    }
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_url: env::var("GROQ_API_URL")
                .unwrap_or_else(|_| "https://api.groq.com/openai/v1".to_string()),
            api_key: env::var("GROQ_API_KEY").ok(),
            model: env::var("ANA_MODEL").unwrap_or_else(|_| "llama-3.3-70b-versatile".to_string()),
            temperature: 0.1,
            max_tokens: 2048,
            timeout_secs: 120,
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_attempts: env::var("ANA_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            debug: env::var("ANA_DEBUG")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            system_prompt: None,
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            workspace_root: env::var("ANA_WORKSPACE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            python_bin: env::var("ANA_PYTHON").unwrap_or_else(|_| "python3".to_string()),
            python_timeout_secs: 30,
            read_limit: 4000,
        }
    }
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            enabled: env::var("ANA_STREAMING")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
            print_tokens: true,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ana")
    }

    /// Get the config file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file, environment, and defaults
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load() -> Self {
        // Try to load .env file if it exists
        let _ = dotenvy::dotenv();

        // Try to load from config file
        if let Ok(config) = Self::load_from_file() {
            return config;
        }

        // Fall back to defaults (which respect env vars)
        Self::default()
    }

    /// Load configuration from file only
    pub fn load_from_file() -> Result<Self> {
        let config_path = Self::config_file();

        if !config_path.exists() {
            return Err(AnaError::config("Config file not found"));
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| AnaError::config(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| AnaError::config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir();
        let config_path = Self::config_file();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .map_err(|e| AnaError::config(format!("Failed to create config dir: {}", e)))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AnaError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, content)
            .map_err(|e| AnaError::config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Check if a config file exists
    pub fn config_exists() -> bool {
        Self::config_file().exists()
    }

    /// Resolve the API key from config or environment
    pub fn groq_api_key(&self) -> Result<String> {
        self.groq
            .api_key
            .clone()
            .or_else(|| env::var("GROQ_API_KEY").ok())
            .ok_or(AnaError::MissingApiKey)
    }

    /// Update the collaborator model
    pub fn set_model(&mut self, model: impl Into<String>) {
        self.groq.model = model.into();
    }

    /// Set streaming enabled/disabled
    pub fn set_streaming(&mut self, enabled: bool) {
        self.streaming.enabled = enabled;
    }

    /// Generate a default config file content for display
    pub fn default_config_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config)
            .unwrap_or_else(|_| String::from("# Error generating config"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.groq.model, "llama-3.3-70b-versatile");
        assert_eq!(config.groq.max_tokens, 2048);
        assert_eq!(config.agent.max_attempts, 3);
        assert_eq!(config.tools.read_limit, 4000);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("max_attempts"));
        assert!(toml_str.contains("workspace_root"));
    }

    #[test]
    fn test_config_dir() {
        let dir = Config::config_dir();
        assert!(dir.to_string_lossy().contains("ana"));
    }

    #[test]
    fn test_set_model() {
        let mut config = Config::default();
        config.set_model("llama-3.1-8b-instant");
        assert_eq!(config.groq.model, "llama-3.1-8b-instant");
    }
}
