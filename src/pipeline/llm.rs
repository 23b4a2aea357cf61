//! Model interaction: prompt + images → raw reply text.
//!
//! The vision model is reached only through the [`ReplyGenerator`] trait so
//! the rest of the pipeline can run against canned text. The production
//! implementation, [`LlmReplyGenerator`], wraps an `edgequake-llm` provider.
//!
//! ## Failure policy
//!
//! One attempt by default. `max_retries` enables exponential backoff
//! (`retry_backoff_ms * 2^attempt`); every exhausted or timed-out call
//! surfaces as [`ClearCueError::UpstreamUnavailable`]. Interpreting the reply
//! is not this module's job: any text that comes back is returned as-is.

use crate::config::{AnalysisConfig, DEFAULT_MODEL};
use crate::error::ClearCueError;
use crate::pipeline::encode::ImageAttachment;
use async_trait::async_trait;
use edgequake_llm::{ChatMessage, CompletionOptions, ImageData, LLMProvider, ProviderFactory};
use std::sync::Arc;
use std::time::Instant;
use tokio::time::{sleep, timeout, Duration};
use tracing::{debug, warn};

/// Turns a prompt and its images into the model's raw text reply.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        images: &[ImageAttachment],
    ) -> Result<String, ClearCueError>;
}

/// [`ReplyGenerator`] backed by an `edgequake-llm` vision provider.
pub struct LlmReplyGenerator {
    provider: Arc<dyn LLMProvider>,
    options: CompletionOptions,
    api_timeout: Duration,
    max_retries: u32,
    retry_backoff_ms: u64,
}

impl LlmReplyGenerator {
    pub fn new(provider: Arc<dyn LLMProvider>, config: &AnalysisConfig) -> Self {
        Self {
            provider,
            options: build_options(config),
            api_timeout: Duration::from_secs(config.api_timeout_secs),
            max_retries: config.max_retries,
            retry_backoff_ms: config.retry_backoff_ms,
        }
    }

    /// Resolve the provider from `config` and the environment, then wrap it.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self, ClearCueError> {
        let provider = resolve_provider(config)?;
        Ok(Self::new(provider, config))
    }
}

#[async_trait]
impl ReplyGenerator for LlmReplyGenerator {
    async fn generate(
        &self,
        prompt: &str,
        images: &[ImageAttachment],
    ) -> Result<String, ClearCueError> {
        let start = Instant::now();
        let attachments: Vec<ImageData> = images
            .iter()
            .map(|img| {
                ImageData::new(img.data.clone(), img.mime_type.clone()).with_detail("high")
            })
            .collect();
        let messages = if attachments.is_empty() {
            vec![ChatMessage::user(prompt)]
        } else {
            vec![ChatMessage::user_with_images(prompt, attachments)]
        };

        let mut last_err: Option<String> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let backoff = backoff_ms(self.retry_backoff_ms, attempt);
                warn!(
                    "Model call: retry {}/{} after {}ms",
                    attempt, self.max_retries, backoff
                );
                sleep(Duration::from_millis(backoff)).await;
            }

            let call = self.provider.chat(&messages, Some(&self.options));
            match timeout(self.api_timeout, call).await {
                Ok(Ok(response)) => {
                    debug!(
                        "Model reply: {} input tokens, {} output tokens, {} images, {:?}",
                        response.prompt_tokens,
                        response.completion_tokens,
                        images.len(),
                        start.elapsed()
                    );
                    return Ok(response.content);
                }
                Ok(Err(e)) => {
                    let err_msg = format!("{}", e);
                    warn!("Model call: attempt {} failed: {}", attempt + 1, err_msg);
                    last_err = Some(err_msg);
                }
                Err(_) => {
                    let err_msg = format!("timed out after {}s", self.api_timeout.as_secs());
                    warn!("Model call: attempt {} {}", attempt + 1, err_msg);
                    last_err = Some(err_msg);
                }
            }
        }

        Err(ClearCueError::UpstreamUnavailable {
            reason: last_err.unwrap_or_else(|| "Unknown error".to_string()),
        })
    }
}

/// Delay before retry `attempt` (1-based), doubling each time.
fn backoff_ms(base_ms: u64, attempt: u32) -> u64 {
    base_ms.saturating_mul(2u64.saturating_pow(attempt.saturating_sub(1)))
}

/// Build `CompletionOptions` from the analysis config.
fn build_options(config: &AnalysisConfig) -> CompletionOptions {
    CompletionOptions {
        temperature: Some(config.temperature),
        max_tokens: Some(config.max_tokens),
        ..Default::default()
    }
}

/// A generator that always answers with the same reply (or failure).
///
/// Used by tests and by the CLI's offline mode to replay a saved reply
/// through the real extraction path.
#[derive(Debug, Clone)]
pub struct CannedReplyGenerator {
    reply: Result<String, String>,
}

impl CannedReplyGenerator {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
        }
    }

    /// A generator whose every call fails as if the model were unreachable.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            reply: Err(reason.into()),
        }
    }
}

#[async_trait]
impl ReplyGenerator for CannedReplyGenerator {
    async fn generate(
        &self,
        _prompt: &str,
        _images: &[ImageAttachment],
    ) -> Result<String, ClearCueError> {
        self.reply
            .clone()
            .map_err(|reason| ClearCueError::UpstreamUnavailable { reason })
    }
}

// ── Provider resolution ──────────────────────────────────────────────────

fn create_vision_provider(
    provider_name: &str,
    model: &str,
) -> Result<Arc<dyn LLMProvider>, ClearCueError> {
    ProviderFactory::create_llm_provider(provider_name, model).map_err(|e| {
        ClearCueError::ProviderNotConfigured {
            provider: provider_name.to_string(),
            hint: format!("{e}"),
        }
    })
}

/// Resolve the LLM provider, from most-specific to least-specific.
///
/// 1. **Pre-built provider** (`config.provider`), used as-is.
/// 2. **Named provider** (`config.provider_name`) with `config.model` or
///    [`DEFAULT_MODEL`].
/// 3. **Environment pair** `EDGEQUAKE_LLM_PROVIDER` + `EDGEQUAKE_MODEL`.
/// 4. **Gemini key**: `GEMINI_API_KEY` selects the gemini provider.
/// 5. **Auto-detection** via [`ProviderFactory::from_env`].
pub fn resolve_provider(config: &AnalysisConfig) -> Result<Arc<dyn LLMProvider>, ClearCueError> {
    if let Some(ref provider) = config.provider {
        return Ok(Arc::clone(provider));
    }

    let model = config.model.as_deref().unwrap_or(DEFAULT_MODEL);

    if let Some(ref name) = config.provider_name {
        return create_vision_provider(name, model);
    }

    if let (Ok(prov), Ok(env_model)) = (
        std::env::var("EDGEQUAKE_LLM_PROVIDER"),
        std::env::var("EDGEQUAKE_MODEL"),
    ) {
        if !prov.is_empty() && !env_model.is_empty() {
            return create_vision_provider(&prov, &env_model);
        }
    }

    if let Ok(key) = std::env::var("GEMINI_API_KEY") {
        if !key.is_empty() {
            return create_vision_provider("gemini", model);
        }
    }

    let (llm_provider, _embedding) =
        ProviderFactory::from_env().map_err(|e| ClearCueError::ProviderNotConfigured {
            provider: "auto".to_string(),
            hint: format!(
                "No LLM provider could be auto-detected from environment.\n\
                Set GEMINI_API_KEY, OPENAI_API_KEY, or configure a provider.\n\
                Error: {}",
                e
            ),
        })?;

    Ok(llm_provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_options_defaults() {
        let config = AnalysisConfig::default();
        let opts = build_options(&config);
        assert_eq!(opts.temperature, Some(0.4));
        assert_eq!(opts.max_tokens, Some(4096));
    }

    #[test]
    fn backoff_doubles_and_saturates() {
        assert_eq!(backoff_ms(500, 1), 500);
        assert_eq!(backoff_ms(500, 3), 2000);
        assert_eq!(backoff_ms(500, 64), u64::MAX);
        assert_eq!(backoff_ms(500, u32::MAX), u64::MAX);
    }

    #[test]
    fn canned_generator_replays_text() {
        let generator = CannedReplyGenerator::new("{\"diagnosis\":\"x\"}");
        let reply = tokio_test::block_on(generator.generate("prompt", &[])).unwrap();
        assert_eq!(reply, "{\"diagnosis\":\"x\"}");
    }

    #[test]
    fn failing_generator_is_upstream_unavailable() {
        let generator = CannedReplyGenerator::failing("503 from provider");
        let err = tokio_test::block_on(generator.generate("prompt", &[])).unwrap_err();
        match err {
            ClearCueError::UpstreamUnavailable { reason } => assert_eq!(reason, "503 from provider"),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
