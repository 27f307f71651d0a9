use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::language_utils::LanguagePair;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Output document settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    /// Public Google Translate web endpoint
    #[default]
    Google,
    /// Local Ollama server
    Ollama,
}

impl TranslationProvider {
    pub fn display_name(&self) -> &str {
        match self {
            Self::Google => "Google Translate",
            Self::Ollama => "Ollama",
        }
    }

    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Google => "google".to_string(),
            Self::Ollama => "ollama".to_string(),
        }
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "ollama" => Ok(Self::Ollama),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// What to do when a single unit cannot be translated
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Keep the original text only and continue
    #[default]
    Fallback,
    /// Stop the run without writing output
    Abort,
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    /// Model name, unused by Google
    #[serde(default = "String::new")]
    pub model: String,

    /// Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Max concurrent requests
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,

    /// Max chars per request, longer texts are split
    #[serde(default = "default_max_chars_per_request")]
    pub max_chars_per_request: usize,

    /// Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Rate limit (requests per minute)
    #[serde(default)]
    pub rate_limit: Option<u32>,
}

impl ProviderConfig {
    /// Provider config with defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        match provider_type {
            TranslationProvider::Google => Self {
                provider_type: "google".to_string(),
                model: String::new(),
                endpoint: default_google_endpoint(),
                concurrent_requests: default_google_concurrent_requests(),
                max_chars_per_request: default_google_max_chars_per_request(),
                timeout_secs: default_timeout_secs(),
                rate_limit: default_google_rate_limit(),
            },
            TranslationProvider::Ollama => Self {
                provider_type: "ollama".to_string(),
                model: default_ollama_model(),
                endpoint: default_ollama_endpoint(),
                concurrent_requests: default_concurrent_requests(),
                max_chars_per_request: default_max_chars_per_request(),
                timeout_secs: default_ollama_timeout_secs(),
                rate_limit: None,
            },
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Available translation providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

/// Common translation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// System prompt template for LLM providers
    /// Placeholders: {source_language}, {target_language}
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Retry count for failed requests
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Backoff multiplier for retries (in milliseconds)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Temperature parameter for text generation (0.0 to 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Behaviour when a unit fails to translate
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Memoize translations of repeated texts
    #[serde(default = "default_true")]
    pub cache_enabled: bool,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            temperature: default_temperature(),
            failure_policy: FailurePolicy::default(),
            cache_enabled: true,
        }
    }
}

/// Where the bilingual document is written
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Output file name for single-file runs
    #[serde(default = "default_output_file_name")]
    pub file_name: String,

    /// Output directory, the current directory when unset
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_name: default_output_file_name(),
            directory: None,
        }
    }
}

impl OutputConfig {
    /// Full path of the single-file output
    pub fn path(&self) -> PathBuf {
        match &self.directory {
            Some(dir) => dir.join(&self.file_name),
            None => PathBuf::from(&self.file_name),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<&LogLevel> for log::LevelFilter {
    fn from(level: &LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_target_language() -> String {
    "hi".to_string()
}

fn default_concurrent_requests() -> usize {
    4
}

fn default_google_concurrent_requests() -> usize {
    8
}

fn default_max_chars_per_request() -> usize {
    2000
}

fn default_google_max_chars_per_request() -> usize {
    crate::providers::google::MAX_CHARS_PER_REQUEST
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_ollama_timeout_secs() -> u64 {
    120
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    1000 // 1 second base backoff time, doubled on each retry
}

fn default_temperature() -> f32 {
    0.3
}

fn default_true() -> bool {
    true
}

fn default_google_endpoint() -> String {
    crate::providers::google::DEFAULT_ENDPOINT.to_string()
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2:3b".to_string()
}

fn default_google_rate_limit() -> Option<u32> {
    // The web endpoint starts answering 429 well before 300 rpm
    Some(120)
}

fn default_system_prompt() -> String {
    "You are a professional translator. Translate the following text from {source_language} to {target_language}. Only respond with the translated text, without any explanations or notes.".to_string()
}

fn default_output_file_name() -> String {
    "bilingual_output.docx".to_string()
}

impl Config {
    /// Load the configuration at `path`, writing a default one when it does not exist.
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;
            let config: Config = serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json =
            serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {:?}", path))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        self.language_pair().validate()?;

        if self.translation.get_active_provider_config().is_none()
            && !self.translation.available_providers.is_empty()
        {
            warn!(
                "No settings for provider '{}', using defaults",
                self.translation.provider
            );
        }

        if self.translation.optimal_concurrent_requests() == 0 {
            return Err(anyhow!("concurrent_requests must be at least 1"));
        }

        if self.translation.get_max_chars_per_request() < 100 {
            return Err(anyhow!("max_chars_per_request must be at least 100"));
        }

        let file_name = self.output.file_name.trim();
        if file_name.is_empty() {
            return Err(anyhow!("Output file name cannot be empty"));
        }
        if Path::new(file_name).file_name().map(|n| n.to_string_lossy() != file_name).unwrap_or(true) {
            return Err(anyhow!("Output file name must not contain a directory: {}", file_name));
        }
        if !file_name.to_lowercase().ends_with(".docx") {
            return Err(anyhow!("Output file name must end with .docx: {}", file_name));
        }

        Ok(())
    }

    /// Source and target language of the run
    pub fn language_pair(&self) -> LanguagePair {
        LanguagePair::new(self.source_language.trim(), self.target_language.trim())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            translation: TranslationConfig::default(),
            output: OutputConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl TranslationConfig {
    pub fn optimal_concurrent_requests(&self) -> usize {
        if let Some(provider_config) = self.get_active_provider_config() {
            return provider_config.concurrent_requests;
        }

        crate::translation::concurrency::ProviderProfile::for_provider(self.provider)
            .max_concurrent_requests
    }

    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        self.get_provider_config(&self.provider)
    }

    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: &TranslationProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers
            .iter()
            .find(|p| p.provider_type.eq_ignore_ascii_case(&provider_str))
    }

    /// Get a mutable provider configuration, inserting defaults when missing
    pub fn provider_config_mut(&mut self, provider_type: TranslationProvider) -> &mut ProviderConfig {
        let provider_str = provider_type.to_lowercase_string();
        let index = match self
            .available_providers
            .iter()
            .position(|p| p.provider_type.eq_ignore_ascii_case(&provider_str))
        {
            Some(index) => index,
            None => {
                self.available_providers.push(ProviderConfig::new(provider_type));
                self.available_providers.len() - 1
            }
        };
        &mut self.available_providers[index]
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        match self.get_active_provider_config() {
            Some(config) if !config.model.is_empty() => config.model.clone(),
            _ => ProviderConfig::new(self.provider).model,
        }
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        match self.get_active_provider_config() {
            Some(config) if !config.endpoint.is_empty() => config.endpoint.clone(),
            _ => ProviderConfig::new(self.provider).endpoint,
        }
    }

    /// Get the max chars per request for the active provider
    pub fn get_max_chars_per_request(&self) -> usize {
        match self.get_active_provider_config() {
            Some(config) if config.max_chars_per_request > 0 => config.max_chars_per_request,
            _ => ProviderConfig::new(self.provider).max_chars_per_request,
        }
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        match self.get_active_provider_config() {
            Some(config) if config.timeout_secs > 0 => config.timeout_secs,
            _ => ProviderConfig::new(self.provider).timeout_secs,
        }
    }

    /// Get the rate limit for the active provider
    pub fn get_rate_limit(&self) -> Option<u32> {
        match self.get_active_provider_config() {
            Some(config) => config.rate_limit,
            None => ProviderConfig::new(self.provider).rate_limit,
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            available_providers: vec![
                ProviderConfig::new(TranslationProvider::Google),
                ProviderConfig::new(TranslationProvider::Ollama),
            ],
            common: TranslationCommonConfig::default(),
        }
    }
}
