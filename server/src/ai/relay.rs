//! Relay gateway: forwards the composed prompt to a hosted provider.
//!
//! Replacement tasks go to the OpenAI chat-completions API, analytical
//! tasks to the Anthropic messages API. The prompt is the sole user
//! message; the first text field of the response is extracted. When the
//! matching key is missing a placeholder string is returned instead of an
//! error, so the route still answers.

use async_trait::async_trait;
use serde_json::{json, Value};
use shared_types::{AiOutcome, ProviderFamily};
use std::time::Duration;

use super::{compose_prompt, AiGateway, AiGatewayError, AiRequest};

const ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_MODEL: &str = "claude-3-5-sonnet-20240620";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const ANTHROPIC_MAX_TOKENS: u32 = 500;

const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const OPENAI_MODEL: &str = "gpt-4o-mini";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const NO_KEY_PLACEHOLDER: &str =
    "No API key set. Please add ANTHROPIC_API_KEY or OPENAI_API_KEY.";
const ANTHROPIC_EMPTY: &str = "Claude returned no text.";
const OPENAI_EMPTY: &str = "OpenAI returned no text.";

pub struct RelayAiGateway {
    http: reqwest::Client,
    anthropic_key: Option<String>,
    openai_key: Option<String>,
}

impl RelayAiGateway {
    pub fn new(anthropic_key: Option<String>, openai_key: Option<String>) -> Self {
        // Built once at startup; a client without the timeout is worse
        // than failing here.
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");
        Self {
            http,
            anthropic_key,
            openai_key,
        }
    }

    pub fn from_env() -> Self {
        let anthropic_key = std::env::var("ANTHROPIC_API_KEY").ok().filter(|k| !k.is_empty());
        let openai_key = std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty());
        Self::new(anthropic_key, openai_key)
    }

    /// Whether any provider key is configured.
    pub fn has_keys(&self) -> bool {
        self.anthropic_key.is_some() || self.openai_key.is_some()
    }

    async fn call_anthropic(&self, key: &str, prompt: &str) -> Result<String, AiGatewayError> {
        let body = json!({
            "model": ANTHROPIC_MODEL,
            "max_tokens": ANTHROPIC_MAX_TOKENS,
            "messages": [{ "role": "user", "content": prompt }]
        });
        let response: Value = self
            .http
            .post(ANTHROPIC_URL)
            .header("x-api-key", key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        let text = response["content"][0]["text"]
            .as_str()
            .unwrap_or(ANTHROPIC_EMPTY)
            .to_string();
        Ok(text)
    }

    async fn call_openai(&self, key: &str, prompt: &str) -> Result<String, AiGatewayError> {
        let body = json!({
            "model": OPENAI_MODEL,
            "messages": [{ "role": "user", "content": prompt }]
        });
        let response: Value = self
            .http
            .post(OPENAI_URL)
            .bearer_auth(key)
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        let text = response["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or(OPENAI_EMPTY)
            .to_string();
        Ok(text)
    }
}

#[async_trait]
impl AiGateway for RelayAiGateway {
    async fn run(&self, request: AiRequest) -> Result<AiOutcome, AiGatewayError> {
        let prompt = compose_prompt(&request);
        let text = match request.task.provider_family() {
            ProviderFamily::Anthropic => match self.anthropic_key.as_deref() {
                Some(key) => self.call_anthropic(key, &prompt).await?,
                None => NO_KEY_PLACEHOLDER.to_string(),
            },
            ProviderFamily::OpenAi => match self.openai_key.as_deref() {
                Some(key) => self.call_openai(key, &prompt).await?,
                None => NO_KEY_PLACEHOLDER.to_string(),
            },
        };
        Ok(AiOutcome::Text(text))
    }
}
