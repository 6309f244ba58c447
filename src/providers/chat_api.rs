/*!
 * HTTP client for a chat-completion translation endpoint.
 *
 * One request per translation call; 429 responses are retried per the
 * configured [`RetryPolicy`], everything else fails fast with a typed error.
 */

use async_trait::async_trait;
use anyhow::{anyhow, Context, Result};
use log::info;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::app_config::Config;
use crate::errors::ClientError;
use crate::providers::{Glossary, RetryPolicy, TranslationBackend};
use crate::record::LocaleCode;

/// Chat-completion API client
#[derive(Debug)]
pub struct ChatApi {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// Base URL of the API
    endpoint: String,
    /// Model identifier
    model: String,
    /// Sampling temperature
    temperature: f32,
    /// Retry schedule for rate-limited requests
    retry: RetryPolicy,
}

/// Chat-completion request body
#[derive(Debug, Serialize)]
struct ChatRequest {
    /// The model to use
    model: String,
    /// The messages for the conversation
    messages: Vec<ChatMessage>,
    /// Temperature for generation
    temperature: f32,
}

/// Chat message format
#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    /// Role of the message sender
    role: String,
    /// Content of the message
    content: String,
}

/// Chat-completion response body
#[derive(Debug, Deserialize)]
struct ChatResponse {
    /// Completion choices, the first one carries the translation
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

/// Individual choice in a chat-completion response
#[derive(Debug, Deserialize)]
struct ChatChoice {
    /// The generated message
    message: ChatChoiceMessage,
}

/// Message inside a completion choice
#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    /// The generated text, may be absent on malformed responses
    #[serde(default)]
    content: Option<String>,
}

impl ChatApi {
    /// Create a new client with explicit settings.
    ///
    /// Fails fast on a blank API key or an endpoint that is not a valid URL.
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(anyhow!("API key is required but was blank"));
        }
        let endpoint = endpoint.into();
        Url::parse(&endpoint).with_context(|| format!("Invalid API endpoint: {}", endpoint))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key,
            endpoint,
            model: model.into(),
            temperature,
            retry,
        })
    }

    /// Create a new client from the application configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.api_key()?,
            config.api.endpoint.clone(),
            config.api.model.clone(),
            config.api.temperature,
            config.timeout(),
            config.retry_policy(),
        )
    }

    /// Translate `text`, retrying rate-limited requests per the retry policy
    pub async fn translate(
        &self,
        text: &str,
        from: &LocaleCode,
        to: &LocaleCode,
        context: Option<&str>,
        glossary: Option<&Glossary>,
    ) -> Result<String, ClientError> {
        info!(
            "Translating {} characters ({} -> {})",
            text.chars().count(),
            from,
            to
        );
        let prompt = build_prompt(text, from, to, context, glossary);
        let content = self.retry.run(|| self.perform(&prompt)).await?;
        let translated = clean_translation(&content);
        info!(
            "Translation finished: {} characters",
            translated.chars().count()
        );
        Ok(translated)
    }

    /// One HTTP round trip: send the prompt, classify the response, extract
    /// the first choice's content.
    async fn perform(&self, prompt: &str) -> Result<String, ClientError> {
        let url = format!(
            "{}/v1/chat/completions",
            self.endpoint.trim_end_matches('/')
        );
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(header::CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClientError::Api(format!("Request timed out: {}", e))
                } else {
                    ClientError::Api(format!("Failed to send request: {}", e))
                }
            })?;

        classify_status(response.status().as_u16())?;

        let body: ChatResponse = response.json().await.map_err(|e| {
            ClientError::InvalidResponse(format!("Failed to parse API response: {}", e))
        })?;
        first_choice_content(body)
    }
}

/// Map an HTTP status code to its typed failure; success statuses pass.
///
/// 401 is fatal bad credentials, 429 is the only retryable condition, every
/// other 4xx/5xx is a generic API error.
fn classify_status(status: u16) -> Result<(), ClientError> {
    match status {
        401 => Err(ClientError::Authentication("Invalid API key".to_string())),
        429 => Err(ClientError::RateLimited("Too many requests".to_string())),
        400..=499 => Err(ClientError::Api(format!("Client error ({})", status))),
        500..=599 => Err(ClientError::Api(format!("Server error ({})", status))),
        _ => Ok(()),
    }
}

/// Extract the first choice's message content; a response without any usable
/// content is invalid.
fn first_choice_content(body: ChatResponse) -> Result<String, ClientError> {
    let content = body
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default();
    if content.is_empty() {
        return Err(ClientError::InvalidResponse(
            "API response contained no translation".to_string(),
        ));
    }
    Ok(content)
}

#[async_trait]
impl TranslationBackend for ChatApi {
    async fn translate(
        &self,
        text: &str,
        from: &LocaleCode,
        to: &LocaleCode,
        context: Option<&str>,
        glossary: Option<&Glossary>,
    ) -> Result<String, ClientError> {
        ChatApi::translate(self, text, from, to, context, glossary).await
    }
}

/// Build the single user prompt embedding instructions, optional context and
/// glossary, the source text, and the fixed formatting/tone rules.
pub fn build_prompt(
    text: &str,
    from: &LocaleCode,
    to: &LocaleCode,
    context: Option<&str>,
    glossary: Option<&Glossary>,
) -> String {
    let mut parts = Vec::new();
    parts.push(format!(
        "Translate the following text from {} to {}.",
        from, to
    ));

    if let Some(context) = context {
        parts.push(format!("\nCONTEXT: {}", context));
    }

    if let Some(rendered) = glossary.and_then(Glossary::render) {
        match glossary {
            Some(Glossary::Terms(_)) => {
                parts.push(format!("\nGLOSSARY (strictly follow): {}", rendered));
            }
            _ => parts.push(format!("\nGLOSSARY: {}", rendered)),
        }
    }

    parts.push("\n\nTEXT TO TRANSLATE:".to_string());
    parts.push(text.to_string());
    parts.push("\n\nRULES:".to_string());
    parts.push("- Preserve HTML formatting if present".to_string());
    parts.push("- Match the style and tone of the original text".to_string());
    parts.push("- Reply with the translation only, without commentary".to_string());

    parts.join("\n")
}

/// Trim surrounding whitespace and strip one matching pair of wrapping quotes
fn clean_translation(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    if let (Some(first), Some(last)) = (chars.next(), chars.next_back()) {
        if first == last && (first == '"' || first == '\'') {
            return trimmed[first.len_utf8()..trimmed.len() - last.len_utf8()].to_string();
        }
    }
    trimmed.to_string()
}
