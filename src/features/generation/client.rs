//! Chat completion client for course generation
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Transport moved behind `CompletionBackend`; explicit credentials per call
//! - 1.0.0: Initial release

use async_trait::async_trait;
use log::{debug, error, info};
use openai::chat::{ChatCompletion, ChatCompletionMessage, ChatCompletionMessageRole};
use openai::Credentials;
use uuid::Uuid;

use super::{ApiKey, GenerationFailure};
use crate::features::quest::{build_prompt, CourseRequest, PromptPair};

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u64 = 3000;
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/";

/// Fixed request parameters for every generation
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Transport for a single chat completion
///
/// Returns the first choice's content, `None` when the service sent no text.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(
        &self,
        api_key: &ApiKey,
        prompt: &PromptPair,
        settings: &GenerationSettings,
    ) -> Result<Option<String>, GenerationFailure>;
}

/// Backend calling the OpenAI chat completions endpoint
#[derive(Debug, Clone)]
pub struct OpenAiBackend {
    base_url: String,
}

impl OpenAiBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for OpenAiBackend {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn message(role: ChatCompletionMessageRole, content: &str) -> ChatCompletionMessage {
    ChatCompletionMessage {
        role,
        content: Some(content.to_string()),
        name: None,
        function_call: None,
        tool_call_id: None,
        tool_calls: None,
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(
        &self,
        api_key: &ApiKey,
        prompt: &PromptPair,
        settings: &GenerationSettings,
    ) -> Result<Option<String>, GenerationFailure> {
        let messages = vec![
            message(ChatCompletionMessageRole::System, &prompt.system_instruction),
            message(ChatCompletionMessageRole::User, &prompt.user_instruction),
        ];
        let credentials = Credentials::new(api_key.expose(), self.base_url.as_str());

        let completion = ChatCompletion::builder(&settings.model, messages)
            .credentials(credentials)
            .temperature(settings.temperature)
            .max_tokens(settings.max_tokens)
            .create()
            .await
            .map_err(|e| GenerationFailure::from_message(e.to_string()))?;

        if let Some(usage) = &completion.usage {
            debug!(
                "Completion usage: prompt={} completion={} total={}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        Ok(completion
            .choices
            .first()
            .and_then(|c| c.message.content.clone()))
    }
}

/// Builds the prompt for a request and runs one completion
pub struct GenerationClient {
    backend: Box<dyn CompletionBackend>,
    settings: GenerationSettings,
}

impl GenerationClient {
    pub fn new(backend: Box<dyn CompletionBackend>, settings: GenerationSettings) -> Self {
        Self { backend, settings }
    }

    /// Client talking to OpenAI at `base_url`
    pub fn openai(base_url: impl Into<String>, settings: GenerationSettings) -> Self {
        Self::new(Box::new(OpenAiBackend::new(base_url)), settings)
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Generate the course text.
    ///
    /// Exactly one backend call, no retry. The returned text is the
    /// completion content unmodified; missing or blank content is an
    /// `EmptyResponse` failure.
    pub async fn generate(
        &self,
        request_id: Uuid,
        api_key: &ApiKey,
        request: &CourseRequest,
    ) -> Result<String, GenerationFailure> {
        let prompt = build_prompt(request);
        info!(
            "[{request_id}] Generating quest '{}' with {} (temperature {}, max_tokens {})",
            request.title, self.settings.model, self.settings.temperature, self.settings.max_tokens
        );
        debug!(
            "[{request_id}] Prompt sizes: system={} user={}",
            prompt.system_instruction.len(),
            prompt.user_instruction.len()
        );

        let content = self
            .backend
            .complete(api_key, &prompt, &self.settings)
            .await
            .map_err(|e| {
                error!("[{request_id}] Generation failed ({}): {e}", e.kind());
                e
            })?;

        match content {
            Some(text) if !text.trim().is_empty() => {
                info!("[{request_id}] Generation complete: {} characters", text.len());
                Ok(text)
            }
            _ => {
                error!("[{request_id}] Generation returned no content");
                Err(GenerationFailure::EmptyResponse(
                    "la réponse du modèle ne contient aucun texte".to_string(),
                ))
            }
        }
    }
}
