//! Groq client implementation
//!
//! Async HTTP client for Groq's OpenAI-compatible chat completions API,
//! with streaming support.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::{AnaError, Config, Message, Result};
use crate::llm::traits::{Collaborator, CompleteOptions, TokenCallback};

/// Groq API client
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    debug: bool,
}

/// Chat completions request
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<Vec<String>>,
    stream: bool,
}

/// Message in the chat completions wire format
#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Chat completions response (non-streaming)
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Streaming chunk response (SSE data payload)
#[derive(Debug, Deserialize)]
struct StreamChunkResponse {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: StreamDelta,
}

#[derive(Debug, Deserialize)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}

impl GroqClient {
    /// Create a new Groq client from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.groq_api_key()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.groq.timeout_secs))
            .build()
            .map_err(|e| AnaError::collaborator(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.groq.api_url.clone(),
            api_key,
            model: config.groq.model.clone(),
            temperature: config.groq.temperature,
            max_tokens: config.groq.max_tokens,
            debug: config.agent.debug,
        })
    }

    /// Enable or disable debug output
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// The model this client sends requests to
    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request<'a>(
        &'a self,
        messages: &'a [Message],
        options: Option<CompleteOptions>,
        stream: bool,
    ) -> ChatRequest<'a> {
        let options = options.unwrap_or_default();
        ChatRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: options.temperature.or(Some(self.temperature)),
            max_tokens: options.max_tokens.or(Some(self.max_tokens)),
            stop: options.stop,
            stream,
        }
    }

    async fn post_chat(&self, request: &ChatRequest<'_>) -> Result<reqwest::Response> {
        let request_json = serde_json::to_string(request)?;
        self.debug_print("Request", &request_json);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    AnaError::collaborator(format!(
                        "Cannot connect to Groq at {}. Is the URL correct?",
                        self.base_url
                    ))
                } else {
                    AnaError::from(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AnaError::collaborator(format!(
                "Groq API error ({}): {}",
                status, error_text
            )));
        }

        Ok(response)
    }

    /// Debug print if enabled
    fn debug_print(&self, label: &str, content: &str) {
        if self.debug {
            if content.len() > 500 {
                eprintln!("DEBUG {}: {}...", label, &content[..500]);
            } else {
                eprintln!("DEBUG {}: {}", label, content);
            }
        }
    }
}

#[async_trait]
impl Collaborator for GroqClient {
    async fn complete(
        &self,
        messages: &[Message],
        options: Option<CompleteOptions>,
    ) -> Result<String> {
        let request = self.build_request(messages, options, false);
        let response = self.post_chat(&request).await?;

        let response_text = response.text().await?;
        self.debug_print("Response", &response_text);

        let chat_response: ChatResponse = serde_json::from_str(&response_text)
            .map_err(|e| AnaError::collaborator(format!("Failed to parse response: {}", e)))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AnaError::collaborator("Response contained no choices"))
    }

    async fn complete_stream(
        &self,
        messages: &[Message],
        options: Option<CompleteOptions>,
        on_token: TokenCallback,
    ) -> Result<String> {
        let request = self.build_request(messages, options, true);
        let response = self.post_chat(&request).await?;

        // Process the SSE stream line by line
        let mut full_content = String::new();
        let mut stream = response.bytes_stream();
        let mut buffer = String::new();

        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result
                .map_err(|e| AnaError::collaborator(format!("Stream error: {}", e)))?;
            buffer.push_str(&String::from_utf8_lossy(&chunk));

            while let Some(newline_pos) = buffer.find('\n') {
                let line = buffer[..newline_pos].trim().to_string();
                buffer = buffer[newline_pos + 1..].to_string();

                if line.is_empty() || line == "data: [DONE]" {
                    continue;
                }

                let Some(data) = line.strip_prefix("data: ") else {
                    continue;
                };

                match serde_json::from_str::<StreamChunkResponse>(data) {
                    Ok(chunk_response) => {
                        for choice in &chunk_response.choices {
                            if let Some(ref token) = choice.delta.content {
                                full_content.push_str(token);
                                on_token(token);
                            }
                        }
                    }
                    Err(e) => {
                        self.debug_print("Parse Error", &format!("{}: {}", e, line));
                    }
                }
            }
        }

        Ok(full_content)
    }

    fn name(&self) -> &str {
        "groq"
    }
}
