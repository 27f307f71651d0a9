/*!
 * Tests for translation cache functionality
 */

use bidocx::language_utils::LanguagePair;
use bidocx::translation::cache::TranslationCache;

#[test]
fn test_cache_store_with_enabled_cache_should_return_translation() {
    let cache = TranslationCache::new(true);
    let languages = LanguagePair::new("en", "fr");

    cache.store("hello", &languages, "bonjour");

    assert_eq!(cache.get("hello", &languages), Some("bonjour".to_string()));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_cache_store_with_disabled_cache_should_keep_nothing() {
    let cache = TranslationCache::new(false);
    let languages = LanguagePair::new("en", "fr");

    cache.store("hello", &languages, "bonjour");

    assert!(cache.get("hello", &languages).is_none());
    assert!(cache.is_empty());
}

#[test]
fn test_cache_get_with_different_languages_should_miss() {
    let cache = TranslationCache::new(true);
    cache.store("hello", &LanguagePair::new("en", "fr"), "bonjour");

    assert!(cache.get("hello", &LanguagePair::new("de", "fr")).is_none());
    assert!(cache.get("hello", &LanguagePair::new("en", "es")).is_none());
}

#[test]
fn test_cache_stats_should_count_hits_and_misses() {
    let cache = TranslationCache::new(true);
    let languages = LanguagePair::default();

    cache.store("Name", &languages, "naam");
    let _ = cache.get("Name", &languages);
    let _ = cache.get("Name", &languages);
    let _ = cache.get("Price", &languages);

    let stats = cache.stats();
    assert_eq!(stats.hits, 2);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.entries, 1);
}

#[test]
fn test_cache_clone_should_share_entries() {
    let cache = TranslationCache::new(true);
    let shared = cache.clone();
    let languages = LanguagePair::default();

    shared.store("Name", &languages, "naam");

    assert_eq!(cache.get("Name", &languages), Some("naam".to_string()));
    assert_eq!(shared.stats().hits, 1);
}
