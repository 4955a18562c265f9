use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_aux::prelude::deserialize_vec_from_string_or_vec;

/// Application configuration loaded from multiple sources.
///
/// Configuration is loaded in priority order (lowest to highest):
/// 1. Struct defaults
/// 2. config.yaml file (if exists)
/// 3. Environment variables with PULSE_ prefix (always wins)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub congress: CongressConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// HTTP server bind address.
    #[serde(default = "default_host")]
    pub host: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level filter (debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CongressConfig {
    /// Root of the congress.gov v3 API.
    #[serde(default = "default_congress_base_url")]
    pub base_url: String,

    /// congress.gov API key (required, no compiled-in default).
    #[serde(default)]
    pub api_key: String,

    /// Congress whose bills are listed when a request does not name one.
    #[serde(default = "default_congress")]
    pub congress: u32,

    /// Number of recent bills fetched per listing (congress.gov caps this at 250).
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Maximum number of actions fetched for a bill's journey.
    #[serde(default = "default_actions_limit")]
    pub actions_limit: u32,

    /// Seconds to wait for a congress.gov response.
    #[serde(default = "default_congress_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    /// Root of an OpenAI-compatible API.
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    /// API key. When empty, analysis and representative lookup are unavailable.
    #[serde(default)]
    pub api_key: String,

    /// Model used for every completion.
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature for bill analysis.
    #[serde(default = "default_analysis_temperature")]
    pub analysis_temperature: f32,

    /// Token cap for bill analysis.
    #[serde(default = "default_analysis_max_tokens")]
    pub analysis_max_tokens: u32,

    /// Sampling temperature for representative lookup.
    #[serde(default = "default_lookup_temperature")]
    pub lookup_temperature: f32,

    /// Seconds to wait for a completion.
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// Whether an API key has been configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Allowed origins for CORS requests.
    /// Use `"*"` to allow any origin (not recommended for production).
    /// Accepts either an array or comma-separated string.
    /// Example: `["http://localhost:5173"]` or `"http://localhost:5173,https://app.example.com"`
    #[serde(
        default = "default_allowed_origins",
        deserialize_with = "deserialize_origins"
    )]
    pub allowed_origins: Vec<String>,
}

/// Deserialize origins from comma-separated string or array, filtering empty values.
fn deserialize_origins<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let origins: Vec<String> = deserialize_vec_from_string_or_vec(deserializer)?;
    Ok(origins.into_iter().filter(|s| !s.is_empty()).collect())
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SwaggerConfig {
    /// Enable Swagger UI at /swagger-ui.
    /// Enable in development via `PULSE_SWAGGER__ENABLED=true`
    #[serde(default)]
    pub enabled: bool,
}

// These functions cannot be const because serde uses function pointers for defaults
#[allow(clippy::missing_const_for_fn)]
fn default_port() -> u16 {
    8080
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_congress_base_url() -> String {
    "https://api.congress.gov/v3".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_congress() -> u32 {
    119
}

#[allow(clippy::missing_const_for_fn)]
fn default_page_size() -> u32 {
    50
}

#[allow(clippy::missing_const_for_fn)]
fn default_actions_limit() -> u32 {
    250
}

#[allow(clippy::missing_const_for_fn)]
fn default_congress_timeout_secs() -> u64 {
    10
}

fn default_llm_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4.1-nano".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_analysis_temperature() -> f32 {
    0.7
}

#[allow(clippy::missing_const_for_fn)]
fn default_analysis_max_tokens() -> u32 {
    1500
}

#[allow(clippy::missing_const_for_fn)]
fn default_lookup_temperature() -> f32 {
    0.3
}

#[allow(clippy::missing_const_for_fn)]
fn default_llm_timeout_secs() -> u64 {
    60
}

#[allow(clippy::missing_const_for_fn)]
fn default_allowed_origins() -> Vec<String> {
    // Default to empty (no cross-origin requests allowed)
    // Configure explicitly via PULSE_CORS__ALLOWED_ORIGINS or config.yaml
    vec![]
}

impl Default for CongressConfig {
    fn default() -> Self {
        Self {
            base_url: default_congress_base_url(),
            api_key: String::new(),
            congress: default_congress(),
            page_size: default_page_size(),
            actions_limit: default_actions_limit(),
            timeout_secs: default_congress_timeout_secs(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            api_key: String::new(),
            model: default_model(),
            analysis_temperature: default_analysis_temperature(),
            analysis_max_tokens: default_analysis_max_tokens(),
            lookup_temperature: default_lookup_temperature(),
            timeout_secs: default_llm_timeout_secs(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: default_port(),
                host: default_host(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
            },
            congress: CongressConfig::default(),
            llm: LlmConfig::default(),
            cors: CorsConfig::default(),
            swagger: SwaggerConfig::default(),
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

/// congress.gov rejects listing requests above this page size.
const MAX_PAGE_SIZE: u32 = 250;
const MAX_TIMEOUT_SECS: u64 = 300;

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Sources are merged in priority order:
    /// 1. Struct defaults (lowest)
    /// 2. config.yaml file (if exists)
    /// 3. Environment variables with PULSE_ prefix (highest)
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config.yaml")
    }

    /// Load configuration with a custom YAML file path.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load_from(yaml_path: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml_path))
            .merge(Env::prefixed("PULSE_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.congress.api_key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "congress.api_key is required. Set PULSE_CONGRESS__API_KEY environment variable or configure in config.yaml.".into(),
            ));
        }

        if !is_http_url(&self.congress.base_url) {
            return Err(ConfigError::Validation(format!(
                "congress.base_url must start with http:// or https://, got: '{}'",
                self.congress.base_url
            )));
        }

        if self.congress.page_size == 0 || self.congress.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::Validation(format!(
                "congress.page_size must be between 1 and {MAX_PAGE_SIZE}, got: {}",
                self.congress.page_size
            )));
        }

        if self.congress.actions_limit == 0 || self.congress.actions_limit > MAX_PAGE_SIZE {
            return Err(ConfigError::Validation(format!(
                "congress.actions_limit must be between 1 and {MAX_PAGE_SIZE}, got: {}",
                self.congress.actions_limit
            )));
        }

        for (name, value) in [
            ("congress.timeout_secs", self.congress.timeout_secs),
            ("llm.timeout_secs", self.llm.timeout_secs),
        ] {
            if value == 0 || value > MAX_TIMEOUT_SECS {
                return Err(ConfigError::Validation(format!(
                    "{name} must be between 1 and {MAX_TIMEOUT_SECS}, got: {value}"
                )));
            }
        }

        if !is_http_url(&self.llm.base_url) {
            return Err(ConfigError::Validation(format!(
                "llm.base_url must start with http:// or https://, got: '{}'",
                self.llm.base_url
            )));
        }

        for (name, value) in [
            ("llm.analysis_temperature", self.llm.analysis_temperature),
            ("llm.lookup_temperature", self.llm.lookup_temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "{name} must be between 0 and 2, got: {value}"
                )));
            }
        }

        if self.server.port == 0 {
            return Err(ConfigError::Validation("server.port cannot be 0".into()));
        }

        // CORS origins must be valid URLs or "*"
        for origin in &self.cors.allowed_origins {
            if origin != "*" && !is_http_url(origin) {
                return Err(ConfigError::Validation(format!(
                    "cors.allowed_origins contains invalid origin '{origin}'. Must be '*' or start with http:// or https://"
                )));
            }
        }

        Ok(())
    }
}
