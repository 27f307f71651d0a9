/*!
 * Provider-specific concurrency tuning.
 *
 * This module provides concurrency settings based on provider characteristics
 * such as rate limits and response times.
 */

use crate::app_config::TranslationProvider;

/// Provider-specific concurrency profile with tuned defaults
#[derive(Debug, Clone)]
pub struct ProviderProfile {
    /// Maximum concurrent requests
    pub max_concurrent_requests: usize,
}

impl ProviderProfile {
    /// Get the profile for a given provider
    pub fn for_provider(provider: TranslationProvider) -> Self {
        match provider {
            TranslationProvider::Google => Self {
                // Short requests, throttled by the endpoint rather than by latency
                max_concurrent_requests: 8,
            },
            TranslationProvider::Ollama => Self {
                // Local model, every request competes for the same GPU
                max_concurrent_requests: 4,
            },
        }
    }

    /// Get effective concurrent requests, respecting any user override
    pub fn effective_concurrent_requests(&self, user_override: Option<usize>) -> usize {
        user_override
            .filter(|n| *n > 0)
            .unwrap_or(self.max_concurrent_requests)
    }
}
