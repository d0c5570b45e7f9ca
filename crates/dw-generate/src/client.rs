//! Chat-completion client that turns a prompt (plus optional screenshots)
//! into generated component code.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{GenerationError, Result};
use crate::extract::extract_code_block;

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4-vision-preview";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Base URL of an OpenAI-compatible API
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    pub organization: Option<String>,
    #[serde(skip_serializing)]
    pub api_key: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: OPENAI_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 3000,
            temperature: 0.0,
            timeout_secs: 120,
            organization: None,
            api_key: String::new(),
        }
    }
}

impl GenerationConfig {
    /// Overrides credentials with `OPENAI_API_KEY` and `OPENAI_ORG_ID` when set.
    pub fn with_env(mut self) -> Self {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.is_empty() {
                self.api_key = key;
            }
        }
        if let Ok(org) = std::env::var("OPENAI_ORG_ID") {
            if !org.is_empty() {
                self.organization = Some(org);
            }
        }
        self
    }

    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    pub system_prompt: String,
    pub prompt: String,
    /// Image URLs (or data URLs) attached to the user message
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub code: String,
    pub description: String,
    pub usage: Usage,
}

pub struct GenerationClient {
    config: GenerationConfig,
    client: Client,
}

impl GenerationClient {
    pub fn new(config: GenerationConfig) -> Result<Self> {
        if !config.has_credentials() {
            return Err(GenerationError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Sends one chat completion and extracts the generated code.
    /// Failures are returned as-is; callers decide whether to retry.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<Generation> {
        let body = ChatRequest::new(&self.config, request);
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));

        let mut builder = self
            .client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&body);
        if let Some(org) = &self.config.organization {
            builder = builder.header("OpenAI-Organization", org);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GenerationError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatResponse = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(GenerationError::MissingContent)?;
        debug!(model = %self.config.model, output = %content, "raw generation output");

        let extracted = extract_code_block(&content)?;
        info!(
            prompt_tokens = completion.usage.prompt_tokens,
            completion_tokens = completion.usage.completion_tokens,
            total_tokens = completion.usage.total_tokens,
            "generation finished"
        );

        Ok(Generation {
            code: extracted.code,
            description: extracted.description,
            usage: completion.usage,
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

impl<'a> ChatRequest<'a> {
    pub(crate) fn new(config: &'a GenerationConfig, request: &'a GenerationRequest) -> Self {
        let mut content = vec![ContentPart::Text {
            text: &request.prompt,
        }];
        content.extend(request.images.iter().map(|url| ContentPart::ImageUrl {
            image_url: ImageUrl { url },
        }));

        Self {
            model: &config.model,
            messages: vec![
                ChatMessage::System {
                    content: &request.system_prompt,
                },
                ChatMessage::User { content },
            ],
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
enum ChatMessage<'a> {
    System { content: &'a str },
    User { content: Vec<ContentPart<'a>> },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Debug, Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    pub(crate) choices: Vec<Choice>,
    #[serde(default)]
    pub(crate) usage: Usage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub(crate) message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChoiceMessage {
    pub(crate) content: Option<String>,
}
