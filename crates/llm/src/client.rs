use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use frontdesk_core::config::{AppConfig, CompletionProvider};
use frontdesk_core::Turn;

use crate::error::{classify_status, LlmError};
use crate::proto::{
    flatten_turns, ChatCompletionRequest, ChatCompletionResponse, GenerateRequest,
    GenerateResponse,
};

// Fixed sampling parameters for both providers.
const TEMPERATURE: f32 = 1.0;
const TOP_P: f32 = 1.0;

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends the assembled turn sequence and returns the trimmed text of
    /// the model's reply.
    async fn complete(&self, turns: &[Turn]) -> Result<String, LlmError>;
}

/// Builds the configured provider client. The persona supplies model and
/// token-bound defaults when `[llm]` leaves them unset.
pub fn build_client(config: &AppConfig) -> Result<Box<dyn CompletionClient>, LlmError> {
    let persona = config.assistant.persona;
    let llm = &config.llm;

    match llm.provider {
        CompletionProvider::ChatCompletions => {
            let api_key = llm.api_key.clone().ok_or_else(|| {
                LlmError::NotConfigured("chat_completions provider requires an api key".to_string())
            })?;
            Ok(Box::new(ChatCompletionsClient::new(
                llm.effective_base_url(),
                api_key,
                llm.model_for(persona),
                llm.max_tokens_for(persona),
                llm.timeout_secs,
            )?))
        }
        CompletionProvider::Generate => Ok(Box::new(GenerateClient::new(
            llm.effective_base_url(),
            llm.model_for(persona),
            llm.timeout_secs,
        )?)),
    }
}

/// OpenAI-compatible chat-completions client. One blocking call per turn,
/// no streaming, no retry.
pub struct ChatCompletionsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: SecretString,
    model: String,
    max_tokens: u32,
}

impl ChatCompletionsClient {
    pub fn new(
        base_url: &str,
        api_key: SecretString,
        model: String,
        max_tokens: u32,
        timeout_secs: u64,
    ) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            max_tokens,
        })
    }
}

#[async_trait]
impl CompletionClient for ChatCompletionsClient {
    async fn complete(&self, turns: &[Turn]) -> Result<String, LlmError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: turns,
            temperature: TEMPERATURE,
            max_tokens: self.max_tokens,
            top_p: TOP_P,
            stream: false,
        };

        debug!(
            event_name = "llm.chat_completions.request",
            model = %self.model,
            turn_count = turns.len(),
            "sending chat completion request"
        );

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status.as_u16(), body));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| LlmError::MalformedResponse(err.to_string()))?;

        parsed.first_choice_text().ok_or_else(|| {
            LlmError::MalformedResponse("response contained no usable choices".to_string())
        })
    }
}

/// Ollama-style generate client: the turn sequence is flattened into a
/// single prompt string because the endpoint has no message-list concept.
pub struct GenerateClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl GenerateClient {
    pub fn new(base_url: &str, model: String, timeout_secs: u64) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_string(), model })
    }
}

#[async_trait]
impl CompletionClient for GenerateClient {
    async fn complete(&self, turns: &[Turn]) -> Result<String, LlmError> {
        let prompt = flatten_turns(turns);
        let request = GenerateRequest { model: &self.model, prompt: &prompt, stream: false };

        debug!(
            event_name = "llm.generate.request",
            model = %self.model,
            prompt_chars = prompt.len(),
            "sending generate request"
        );

        let response = self
            .http
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status.as_u16(), body));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|err| LlmError::MalformedResponse(err.to_string()))?;

        let text = parsed.response.trim().to_string();
        if text.is_empty() {
            return Err(LlmError::MalformedResponse(
                "generate response carried no text".to_string(),
            ));
        }
        Ok(text)
    }
}
