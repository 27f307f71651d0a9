/*!
 * Content classification.
 *
 * Decides whether a piece of cell text is a number to be copied verbatim or
 * prose to be translated.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Kind of a translation unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    /// A decimal number, passed through untouched
    Numeric,
    /// Anything else, sent to the translator
    Textual,
}

/// Optional sign, digits with an optional fraction (or a bare fraction), optional exponent.
/// ASCII digits only.
static NUMERIC_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
        .expect("numeric pattern is a valid regex")
});

/// Classify a text unit.
///
/// The text is trimmed first, so `" 42 "` is numeric. Empty text is textual;
/// callers handle blank units before classification.
pub fn classify(text: &str) -> UnitKind {
    if NUMERIC_PATTERN.is_match(text.trim()) {
        UnitKind::Numeric
    } else {
        UnitKind::Textual
    }
}

/// Shorthand for `classify(text) == UnitKind::Numeric`.
pub fn is_numeric(text: &str) -> bool {
    classify(text) == UnitKind::Numeric
}
