/*!
 * Tests for ISO language code utilities
 */

use bidocx::language_utils::{
    LanguageCodeType, LanguagePair, get_language_name, language_codes_match,
    normalize_to_part1_or_part2t, normalize_to_part2t, validate_language_code,
};

#[test]
fn test_validate_language_code_should_report_code_type() {
    assert_eq!(validate_language_code("hi").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("hin").unwrap(), LanguageCodeType::Part2T);
    assert_eq!(validate_language_code("ger").unwrap(), LanguageCodeType::Part2B);
    assert!(validate_language_code("zz").is_err());
    assert!(validate_language_code("").is_err());
}

#[test]
fn test_normalize_should_map_between_forms() {
    assert_eq!(normalize_to_part2t("EN").unwrap(), "eng");
    assert_eq!(normalize_to_part2t("fre").unwrap(), "fra");
    assert_eq!(normalize_to_part1_or_part2t("hin").unwrap(), "hi");
    assert_eq!(normalize_to_part1_or_part2t("ger").unwrap(), "de");
}

#[test]
fn test_language_codes_match_should_ignore_form() {
    assert!(language_codes_match("en", "eng"));
    assert!(language_codes_match("de", "ger"));
    assert!(!language_codes_match("en", "hi"));
    assert!(!language_codes_match("en", "??"));
}

#[test]
fn test_get_language_name_should_return_english_name() {
    assert_eq!(get_language_name("hi").unwrap(), "Hindi");
    assert_eq!(get_language_name("fra").unwrap(), "French");
}

#[test]
fn test_language_pair_should_default_to_english_hindi() {
    let pair = LanguagePair::default();
    assert_eq!(pair, LanguagePair::new("en", "hi"));
    assert_eq!(pair.to_string(), "en -> hi");
    assert!(pair.validate().is_ok());
}

#[test]
fn test_language_pair_validate_should_reject_same_language() {
    assert!(LanguagePair::new("en", "eng").validate().is_err());
    assert!(LanguagePair::new("en", "nope").validate().is_err());
}
