//! Configuration types for consultations and the HTTP service.
//!
//! Model-facing behaviour is controlled through [`AnalysisConfig`], built via
//! its [`AnalysisConfigBuilder`]. The HTTP listener has its own small
//! [`ServerConfig`]. Neither affects extraction or layout, which are fixed
//! by the record schema.

use crate::error::ClearCueError;
use edgequake_llm::LLMProvider;
use std::fmt;
use std::sync::Arc;

/// Model used when neither the caller nor the environment names one.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Hard ceiling on images forwarded with a single diagnosis request.
pub const MAX_IMAGES: usize = 4;

/// Configuration for a consultation round-trip to the vision model.
///
/// Built via [`AnalysisConfig::builder()`] or using
/// [`AnalysisConfig::default()`].
///
/// # Example
/// ```rust
/// use clearcue::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .model("gemini-2.0-flash")
///     .api_timeout_secs(30)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct AnalysisConfig {
    /// LLM model identifier, e.g. "gemini-2.0-flash", "gpt-4.1-mini".
    /// If None, uses [`DEFAULT_MODEL`] for named providers.
    pub model: Option<String>,

    /// LLM provider name (e.g. "gemini", "openai", "ollama").
    /// If None along with `provider`, the provider is detected from the environment.
    pub provider_name: Option<String>,

    /// Pre-constructed LLM provider. Takes precedence over `provider_name`.
    pub provider: Option<Arc<dyn LLMProvider>>,

    /// Sampling temperature. Default: 0.4.
    ///
    /// The reply must be a JSON object of a fixed shape; low temperature keeps
    /// the model on the requested format without making advice repetitive.
    pub temperature: f32,

    /// Maximum tokens the model may generate. Default: 4096.
    pub max_tokens: usize,

    /// Per-call timeout in seconds. Default: 60.
    pub api_timeout_secs: u64,

    /// Retry attempts after a failed model call. Default: 0.
    pub max_retries: u32,

    /// Initial retry delay in milliseconds (exponential backoff). Default: 500.
    pub retry_backoff_ms: u64,

    /// Images forwarded with a diagnosis request (1–4). Default: 4.
    ///
    /// Skincare-plan requests always forward at most one face image.
    pub max_images: usize,

    /// Largest accepted upload, in bytes. Default: 10 MiB.
    pub max_image_bytes: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            model: None,
            provider_name: None,
            provider: None,
            temperature: 0.4,
            max_tokens: 4096,
            api_timeout_secs: 60,
            max_retries: 0,
            retry_backoff_ms: 500,
            max_images: MAX_IMAGES,
            max_image_bytes: 10 * 1024 * 1024,
        }
    }
}

impl fmt::Debug for AnalysisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisConfig")
            .field("model", &self.model)
            .field("provider_name", &self.provider_name)
            .field("provider", &self.provider.as_ref().map(|_| "<dyn LLMProvider>"))
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("max_images", &self.max_images)
            .field("max_image_bytes", &self.max_image_bytes)
            .finish()
    }
}

impl AnalysisConfig {
    /// Create a new builder for `AnalysisConfig`.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`AnalysisConfig`].
#[derive(Debug)]
pub struct AnalysisConfigBuilder {
    config: AnalysisConfig,
}

impl AnalysisConfigBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = Some(model.into());
        self
    }

    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.config.provider_name = Some(name.into());
        self
    }

    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.config.provider = Some(provider);
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_tokens(mut self, n: usize) -> Self {
        self.config.max_tokens = n;
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs;
        self
    }

    pub fn max_retries(mut self, n: u32) -> Self {
        self.config.max_retries = n;
        self
    }

    pub fn retry_backoff_ms(mut self, ms: u64) -> Self {
        self.config.retry_backoff_ms = ms;
        self
    }

    pub fn max_images(mut self, n: usize) -> Self {
        self.config.max_images = n.clamp(1, MAX_IMAGES);
        self
    }

    pub fn max_image_bytes(mut self, bytes: usize) -> Self {
        self.config.max_image_bytes = bytes;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<AnalysisConfig, ClearCueError> {
        let c = &self.config;
        if c.api_timeout_secs == 0 {
            return Err(ClearCueError::InvalidConfig(
                "API timeout must be ≥ 1 second".into(),
            ));
        }
        if c.max_tokens == 0 {
            return Err(ClearCueError::InvalidConfig(
                "max_tokens must be ≥ 1".into(),
            ));
        }
        if c.max_image_bytes == 0 {
            return Err(ClearCueError::InvalidConfig(
                "max_image_bytes must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}

/// Listener settings for [`crate::server::serve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Maximum request body (multipart uploads included). Default: 25 MiB.
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            body_limit_bytes: 25 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_single_attempt_policy() {
        let config = AnalysisConfig::default();
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.max_images, 4);
        assert_eq!(config.api_timeout_secs, 60);
    }

    #[test]
    fn builder_clamps_image_budget() {
        let config = AnalysisConfig::builder().max_images(9).build().unwrap();
        assert_eq!(config.max_images, MAX_IMAGES);
        let config = AnalysisConfig::builder().max_images(0).build().unwrap();
        assert_eq!(config.max_images, 1);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = AnalysisConfig::builder().api_timeout_secs(0).build().unwrap_err();
        assert!(matches!(err, ClearCueError::InvalidConfig(_)));
    }

    #[test]
    fn debug_hides_provider() {
        let rendered = format!("{:?}", AnalysisConfig::default());
        assert!(rendered.contains("AnalysisConfig"));
        assert!(rendered.contains("provider: None"));
    }

    #[test]
    fn server_addr_joins_host_and_port() {
        assert_eq!(ServerConfig::default().addr(), "127.0.0.1:3000");
    }
}
