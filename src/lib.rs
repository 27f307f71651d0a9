/*!
 * # bidocx - bilingual Word documents
 *
 * A Rust library that turns a monolingual `.docx` file into a bilingual one:
 * every translated block is followed by its original.
 *
 * ## Features
 *
 * - Read paragraphs (style, alignment, run formatting) and tables from `.docx` packages
 * - Translate through Google web translate or a local Ollama model
 * - Bounded-concurrency translation with retries, rate limiting and caching
 * - Fallback to the original text when a block fails, or abort the run
 * - Atomic output writing
 * - Batch conversion of whole folders
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document`: In-memory document model, `.docx` reader and writer
 * - `classifier`: Numeric/textual classification of table cells
 * - `rebuilder`: Construction of the bilingual document
 * - `translation`: Translation services:
 *   - `translation::core`: Provider-backed translation service
 *   - `translation::batch`: Concurrent translation of many units
 *   - `translation::cache`: Caching of repeated texts
 *   - `translation::concurrency`: Per-provider concurrency defaults
 * - `providers`: Clients for the translation backends:
 *   - `providers::google`: Google web translate client
 *   - `providers::ollama`: Ollama API client
 *   - `providers::mock`: Scriptable provider for tests
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod classifier;
pub mod document;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod rebuilder;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::{Config, FailurePolicy, TranslationProvider};
pub use app_controller::Controller;
pub use document::{Document, DocxReader, DocxWriter};
pub use errors::{AppError, LoadError, ProviderError, SerializationError, TranslationError};
pub use language_utils::{LanguagePair, get_language_name, language_codes_match, normalize_to_part2t};
pub use rebuilder::Rebuilder;
pub use translation::{TranslationService, Translator};
