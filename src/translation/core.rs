/*!
 * Core translation service implementation.
 *
 * This module contains the main TranslationService struct and its implementation,
 * which is responsible for translating text using the configured provider.
 */

use async_trait::async_trait;
use log::{debug, info};
use url::Url;

use super::Translator;
use super::cache::TranslationCache;
use crate::app_config::{TranslationConfig, TranslationProvider as ConfigTranslationProvider};
use crate::errors::TranslationError;
use crate::language_utils::{self, LanguagePair};
use crate::providers::Provider;
use crate::providers::google::{GoogleRequest, GoogleTranslate};
use crate::providers::ollama::{GenerationRequest, Ollama};

/// Phrase sent by `test_connection`
pub const PROBE_TEXT: &str = "This is a test message.";

/// Parse an endpoint string into host and port
fn parse_endpoint(endpoint: &str) -> Result<(String, u16), TranslationError> {
    if endpoint.is_empty() {
        return Err(TranslationError::Unavailable("Endpoint cannot be empty".to_string()));
    }

    let raw = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("http://{}", endpoint)
    };
    let url = Url::parse(&raw)
        .map_err(|e| TranslationError::Unavailable(format!("Invalid endpoint '{}': {}", endpoint, e)))?;

    let host = url
        .host_str()
        .ok_or_else(|| TranslationError::Unavailable(format!("Invalid host in endpoint: {}", endpoint)))?
        .to_string();

    let port = url
        .port()
        .unwrap_or(if url.scheme() == "https" { 443 } else { 80 });

    let host = if url.scheme() == "https" {
        format!("https://{}", host)
    } else {
        host
    };

    Ok((host, port))
}

/// Translation provider implementation variants
#[derive(Debug)]
enum TranslationProviderImpl {
    /// Google web translate
    Google {
        /// Client instance
        client: GoogleTranslate,
    },

    /// Ollama LLM service
    Ollama {
        /// Client instance
        client: Ollama,
    },
}

/// Main translation service, one per run, shared between workers
#[derive(Debug)]
pub struct TranslationService {
    /// Provider implementation
    provider: TranslationProviderImpl,

    /// Configuration for the translation service
    pub config: TranslationConfig,

    /// Translation cache for storing and retrieving translations
    cache: TranslationCache,

    /// Texts longer than this are split before sending
    max_chars_per_request: usize,
}

impl TranslationService {
    /// Create a new translation service with the given configuration
    pub fn new(config: TranslationConfig) -> Result<Self, TranslationError> {
        let retry_count = config.common.retry_count;
        let retry_backoff_ms = config.common.retry_backoff_ms;
        let rate_limit = config.get_rate_limit();
        let timeout_secs = config.get_timeout_secs();

        let provider = match config.provider {
            ConfigTranslationProvider::Google => TranslationProviderImpl::Google {
                client: GoogleTranslate::new_with_config(
                    config.get_endpoint(),
                    timeout_secs,
                    retry_count,
                    retry_backoff_ms,
                    rate_limit,
                ),
            },
            ConfigTranslationProvider::Ollama => {
                let (host, port) = parse_endpoint(&config.get_endpoint())?;
                TranslationProviderImpl::Ollama {
                    client: Ollama::new_with_config(
                        host,
                        port,
                        timeout_secs,
                        retry_count,
                        retry_backoff_ms,
                        rate_limit,
                    ),
                }
            }
        };

        Ok(Self {
            provider,
            cache: TranslationCache::new(config.common.cache_enabled),
            max_chars_per_request: config.get_max_chars_per_request(),
            config,
        })
    }

    /// Shared translation cache
    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    /// Check that the provider answers, then translate a probe phrase.
    pub async fn test_connection(&self, languages: &LanguagePair) -> Result<String, TranslationError> {
        info!(
            "Testing connection to {} ({})",
            self.config.provider.display_name(),
            languages
        );

        match &self.provider {
            TranslationProviderImpl::Google { client } => client.test_connection().await?,
            TranslationProviderImpl::Ollama { client } => client.test_connection().await?,
        }

        let translated = self.translate_text(PROBE_TEXT, languages).await?;
        debug!("Probe translated to '{}'", translated);
        Ok(translated)
    }

    /// Translate a single text string
    ///
    /// Blank text is returned empty without a request. Long text is split into
    /// chunks, translated in order and rejoined with single spaces.
    pub async fn translate_text(&self, text: &str, languages: &LanguagePair) -> Result<String, TranslationError> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        if let Some(cached_translation) = self.cache.get(text, languages) {
            return Ok(cached_translation);
        }

        let chunks = split_into_chunks(text, self.max_chars_per_request);
        if chunks.len() > 1 {
            debug!(
                "Splitting {} chars into {} requests",
                text.chars().count(),
                chunks.len()
            );
        }

        let mut parts = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            parts.push(self.translate_chunk(chunk, languages).await?);
        }

        let translated = parts.join(" ");
        if translated.trim().is_empty() {
            return Err(TranslationError::EmptyTranslation(text.to_string()));
        }

        self.cache.store(text, languages, &translated);
        Ok(translated)
    }

    async fn translate_chunk(&self, chunk: &str, languages: &LanguagePair) -> Result<String, TranslationError> {
        match &self.provider {
            TranslationProviderImpl::Google { client } => {
                // The web endpoint only knows the short codes
                let source = language_utils::normalize_to_part1_or_part2t(&languages.source)
                    .unwrap_or_else(|_| languages.source.clone());
                let target = language_utils::normalize_to_part1_or_part2t(&languages.target)
                    .unwrap_or_else(|_| languages.target.clone());

                let response = client.complete(GoogleRequest::new(chunk, source, target)).await?;
                Ok(GoogleTranslate::extract_text(&response))
            }
            TranslationProviderImpl::Ollama { client } => {
                let request = GenerationRequest::new(self.config.get_model(), chunk)
                    .system(self.system_prompt(languages))
                    .temperature(self.config.common.temperature);

                let response = client.complete(request).await?;
                Ok(Ollama::extract_text(&response))
            }
        }
    }

    /// System prompt with language placeholders filled in
    fn system_prompt(&self, languages: &LanguagePair) -> String {
        let name = |code: &str| language_utils::get_language_name(code).unwrap_or_else(|_| code.to_string());

        self.config
            .common
            .system_prompt
            .replace("{source_language}", &name(&languages.source))
            .replace("{target_language}", &name(&languages.target))
    }
}

#[async_trait]
impl Translator for TranslationService {
    async fn translate(&self, text: &str, languages: &LanguagePair) -> Result<String, TranslationError> {
        self.translate_text(text, languages).await
    }
}

/// Split text at whitespace into chunks of at most `max_chars` characters.
///
/// A word longer than `max_chars` is cut into pieces on character boundaries.
/// Text that already fits is returned as a single unchanged chunk.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            chunks.extend(chars.chunks(max_chars).map(|piece| piece.iter().collect::<String>()));
            continue;
        }

        let needed = if current.is_empty() {
            word_len
        } else {
            current_len + 1 + word_len
        };

        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_len = needed;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
