/*!
 * Translation of document text.
 *
 * This module contains the translation seam used by the rebuilder and the
 * service that backs it in production. It is split into several submodules:
 *
 * - `core`: the provider-backed `TranslationService`
 * - `batch`: bounded-concurrency translation of many units
 * - `cache`: caching of repeated texts
 * - `concurrency`: per-provider concurrency defaults
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::TranslationError;
use crate::language_utils::LanguagePair;

/// Anything that turns text in one language into text in another.
///
/// Implementations must be safe to call concurrently.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    async fn translate(&self, text: &str, languages: &LanguagePair) -> Result<String, TranslationError>;
}

// Re-export main types for easier usage
pub use self::batch::BatchTranslator;
pub use self::cache::TranslationCache;
pub use self::core::TranslationService;

// Submodules
pub mod batch;
pub mod cache;
pub mod concurrency;
pub mod core;
