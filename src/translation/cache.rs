/*!
 * Translation caching functionality.
 *
 * Documents repeat themselves: table headers, unit labels, "Total". The cache
 * keeps one answer per distinct text and language pair for the lifetime of a
 * translation service.
 */

use log::debug;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::language_utils::LanguagePair;

/// Cache key combining source text and language pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    source_text: String,
    languages: LanguagePair,
}

impl CacheKey {
    fn new(source_text: &str, languages: &LanguagePair) -> Self {
        Self {
            source_text: source_text.to_string(),
            languages: languages.clone(),
        }
    }
}

/// Cache statistics snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub entries: usize,
}

impl CacheStats {
    /// Fraction of lookups answered from the cache
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// Translation cache for storing and retrieving translations
///
/// Clones share storage and counters.
#[derive(Debug, Clone)]
pub struct TranslationCache {
    /// Internal cache storage
    cache: Arc<RwLock<HashMap<CacheKey, String>>>,

    /// Cache hit counter
    hits: Arc<AtomicUsize>,

    /// Cache miss counter
    misses: Arc<AtomicUsize>,

    /// Whether caching is enabled
    enabled: bool,
}

impl TranslationCache {
    /// Create a new translation cache
    pub fn new(enabled: bool) -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
            hits: Arc::new(AtomicUsize::new(0)),
            misses: Arc::new(AtomicUsize::new(0)),
            enabled,
        }
    }

    /// Get a translation from the cache
    pub fn get(&self, source_text: &str, languages: &LanguagePair) -> Option<String> {
        if !self.enabled {
            return None;
        }

        let key = CacheKey::new(source_text, languages);
        let found = self.cache.read().get(&key).cloned();

        match &found {
            Some(_) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Cache hit for '{}' ({})", truncate_text(source_text, 30), languages);
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
            }
        }

        found
    }

    /// Store a translation in the cache
    pub fn store(&self, source_text: &str, languages: &LanguagePair, translation: &str) {
        if !self.enabled {
            return;
        }

        let key = CacheKey::new(source_text, languages);
        self.cache.write().insert(key, translation.to_string());
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }

    /// Get the number of entries in the cache
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Truncate text to a maximum number of characters with ellipsis
fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => format!("{}...", &text[..index]),
        None => text.to_string(),
    }
}
