//! Unified error types for ticketpack.
//!
//! The two core transformations, [`segment_and_redact`](crate::core::segmenter::segment_and_redact)
//! and [`Classifier::classify`](crate::core::classifier::Classifier::classify), are total and
//! never fail. Errors only come from two places:
//!
//! - **Configuration** - a knowledge base whose regexes do not compile or whose
//!   category table is malformed
//! - **I/O boundary** - missing files, non-UTF-8 input, output writers

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for ticketpack operations.
///
/// # Example
///
/// ```rust
/// use ticketpack::error::Result;
/// use ticketpack::config::KnowledgeBase;
///
/// fn load() -> Result<ticketpack::Classifier> {
///     KnowledgeBase::builtin()?.compile()
/// }
/// # load().unwrap();
/// ```
pub type Result<T> = std::result::Result<T, TicketpackError>;

/// The error type for all ticketpack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TicketpackError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - An input chat export doesn't exist
    /// - Permission denied
    /// - The output directory is not writable
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON parsing/serialization error.
    ///
    /// Raised when a knowledge-base file is not valid JSON or when the
    /// JSON result writer fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A detection pattern or identifier grammar failed to compile.
    #[error("Invalid pattern for '{category}': {source}")]
    InvalidPattern {
        /// Category name, or the grammar name for identifier grammars
        category: String,
        /// The underlying regex error
        #[source]
        source: regex::Error,
    },

    /// The category table is structurally invalid.
    ///
    /// This occurs when:
    /// - Two categories share a name
    /// - A category is named like the catch-all bucket
    /// - A category or the catch-all has an empty name
    #[error("Invalid knowledge base: {message}")]
    InvalidKnowledgeBase {
        /// Description of what's wrong
        message: String,
    },

    /// Unknown or disabled output format.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// What was being selected (e.g. "output")
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// Two artifacts of one run resolve to the same file name.
    ///
    /// Happens when inputs in different directories share a file name, or
    /// when an input's artifact name equals the combined artifact.
    #[error("Artifact '{name}' would be written twice; rename one of the inputs")]
    ArtifactCollision {
        /// The colliding artifact file name
        name: String,
    },

    /// Input content is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl From<std::string::FromUtf8Error> for TicketpackError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        TicketpackError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl TicketpackError {
    /// Creates an invalid pattern error.
    pub fn invalid_pattern(category: impl Into<String>, source: regex::Error) -> Self {
        TicketpackError::InvalidPattern {
            category: category.into(),
            source,
        }
    }

    /// Creates an invalid knowledge base error.
    pub fn invalid_knowledge_base(message: impl Into<String>) -> Self {
        TicketpackError::InvalidKnowledgeBase {
            message: message.into(),
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        TicketpackError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an artifact collision error.
    pub fn artifact_collision(name: impl Into<String>) -> Self {
        TicketpackError::ArtifactCollision { name: name.into() }
    }

    /// Creates a UTF-8 decode error for an input file.
    pub fn undecodable(path: impl Into<PathBuf>, source: std::string::FromUtf8Error) -> Self {
        TicketpackError::Utf8 {
            context: path.into().display().to_string(),
            source,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, TicketpackError::Io(_))
    }

    /// Returns `true` if a pattern failed to compile.
    pub fn is_invalid_pattern(&self) -> bool {
        matches!(self, TicketpackError::InvalidPattern { .. })
    }

    /// Returns `true` if the category table is malformed.
    pub fn is_invalid_knowledge_base(&self) -> bool {
        matches!(self, TicketpackError::InvalidKnowledgeBase { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, TicketpackError::InvalidFormat { .. })
    }

    /// Returns `true` if two artifacts share a file name.
    pub fn is_artifact_collision(&self) -> bool {
        matches!(self, TicketpackError::ArtifactCollision { .. })
    }

    /// Returns `true` if input was not valid UTF-8.
    pub fn is_utf8(&self) -> bool {
        matches!(self, TicketpackError::Utf8 { .. })
    }
}
