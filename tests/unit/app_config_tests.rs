/*!
 * Tests for application configuration
 */

use bidocx::app_config::{Config, FailurePolicy, LogLevel, TranslationProvider};
use std::path::PathBuf;

use crate::common;

#[test]
fn test_default_config_should_translate_english_to_hindi_with_google() {
    let config = Config::default();
    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_language, "hi");
    assert_eq!(config.translation.provider, TranslationProvider::Google);
    assert_eq!(config.translation.common.failure_policy, FailurePolicy::Fallback);
    assert_eq!(config.output.path(), PathBuf::from("bilingual_output.docx"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_with_same_languages_should_fail() {
    let mut config = Config::default();
    config.target_language = "eng".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_with_unknown_language_should_fail() {
    let mut config = Config::default();
    config.source_language = "xx".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_with_bad_output_name_should_fail() {
    let mut config = Config::default();
    config.output.file_name = "out.txt".to_string();
    assert!(config.validate().is_err());

    config.output.file_name = "nested/out.docx".to_string();
    assert!(config.validate().is_err());

    config.output.file_name = "  ".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_with_zero_concurrency_should_fail() {
    let mut config = Config::default();
    config
        .translation
        .provider_config_mut(TranslationProvider::Google)
        .concurrent_requests = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_load_or_create_with_missing_file_should_write_defaults() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_create(&path).unwrap();

    assert!(path.exists());
    assert_eq!(config.target_language, "hi");
    let reloaded = Config::load_or_create(&path).unwrap();
    assert_eq!(reloaded.translation.provider, config.translation.provider);
}

#[test]
fn test_load_or_create_with_partial_file_should_fill_defaults() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{
            "target_language": "de",
            "translation": { "provider": "ollama", "common": { "failure_policy": "abort" } },
            "log_level": "debug"
        }"#,
    )
    .unwrap();

    let config = Config::load_or_create(&path).unwrap();

    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_language, "de");
    assert_eq!(config.translation.provider, TranslationProvider::Ollama);
    assert_eq!(config.translation.common.failure_policy, FailurePolicy::Abort);
    assert_eq!(config.translation.common.retry_count, 3);
    assert_eq!(config.log_level, LogLevel::Debug);
    // No provider entries in the file, so the Ollama defaults apply
    assert_eq!(config.translation.get_endpoint(), "http://localhost:11434");
    assert_eq!(config.translation.get_model(), "llama3.2:3b");
}

#[test]
fn test_load_or_create_with_invalid_json_should_fail() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json").unwrap();
    assert!(Config::load_or_create(&path).is_err());
}

#[test]
fn test_provider_config_mut_with_missing_provider_should_insert_defaults() {
    let mut config = Config::default();
    config.translation.available_providers.clear();

    config
        .translation
        .provider_config_mut(TranslationProvider::Ollama)
        .model = "mistral".to_string();

    assert_eq!(config.translation.available_providers.len(), 1);
    config.translation.provider = TranslationProvider::Ollama;
    assert_eq!(config.translation.get_model(), "mistral");
}

#[test]
fn test_language_pair_should_trim_codes() {
    let mut config = Config::default();
    config.source_language = " en ".to_string();
    config.target_language = "fr\n".to_string();

    let pair = config.language_pair();
    assert_eq!(pair.source, "en");
    assert_eq!(pair.target, "fr");
}
