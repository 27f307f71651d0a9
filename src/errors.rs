/*!
 * Error types for the bidocx application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),
}

impl ProviderError {
    /// Whether retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ConnectionError(_) | Self::RateLimitExceeded(_) => true,
            Self::ApiError { status_code, .. } => *status_code >= 500,
            Self::RequestFailed(_) | Self::ParseError(_) => false,
        }
    }
}

/// Errors that can occur while opening a source document
#[derive(Error, Debug)]
pub enum LoadError {
    /// The source path does not exist
    #[error("Document not found: {0:?}")]
    NotFound(PathBuf),

    /// The source could not be read
    #[error("Failed to read document: {0}")]
    Io(#[from] std::io::Error),

    /// The source is not a zip package
    #[error("Not a valid .docx package: {0}")]
    Archive(String),

    /// A required package part is absent
    #[error("Missing package part: {0}")]
    MissingPart(String),

    /// The main document part is not well-formed XML
    #[error("Malformed document XML: {0}")]
    Xml(String),
}

/// Errors that can occur during translation of a text unit
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The provider answered with nothing for a non-blank source
    #[error("Empty translation returned for: {0}")]
    EmptyTranslation(String),

    /// The translation backend could not be set up
    #[error("Translation backend unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur while writing the output document
#[derive(Error, Debug)]
pub enum SerializationError {
    /// Writing the file failed
    #[error("Failed to write document: {0}")]
    Io(#[from] std::io::Error),

    /// Building the zip package failed
    #[error("Failed to build .docx package: {0}")]
    Archive(String),

    /// Moving the finished file into place failed
    #[error("Failed to persist document to {path:?}: {reason}")]
    Persist {
        /// Destination path
        path: PathBuf,
        /// Underlying cause
        reason: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error loading the source document
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Error writing the output document
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<ProviderError> for AppError {
    fn from(error: ProviderError) -> Self {
        Self::Translation(TranslationError::Provider(error))
    }
}
