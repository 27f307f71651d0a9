/*!
 * Tests for numeric/textual classification of cell text
 */

use bidocx::classifier::{UnitKind, classify, is_numeric};

#[test]
fn test_classify_with_table_numbers_should_return_numeric() {
    assert_eq!(classify("42"), UnitKind::Numeric);
    assert_eq!(classify("-3.14"), UnitKind::Numeric);
    assert_eq!(classify("0"), UnitKind::Numeric);
    assert_eq!(classify("19.99"), UnitKind::Numeric);
}

#[test]
fn test_classify_with_labels_should_return_textual() {
    assert_eq!(classify("Name"), UnitKind::Textual);
    assert_eq!(classify("Price"), UnitKind::Textual);
    assert_eq!(classify("Room 101"), UnitKind::Textual);
}

#[test]
fn test_classify_with_formatted_amounts_should_return_textual() {
    // Currency, grouping and units are left to the translator
    assert!(!is_numeric("$19.99"));
    assert!(!is_numeric("1,234"));
    assert!(!is_numeric("10 %"));
}

#[test]
fn test_classify_with_surrounding_whitespace_should_ignore_it() {
    assert!(is_numeric("\t 7 \n"));
}

#[test]
fn test_classify_called_twice_should_be_deterministic() {
    for text in ["42", "Name", "", "1e3", "abc123"] {
        assert_eq!(classify(text), classify(text));
    }
}
