//! # Ticketpack
//!
//! A Rust library for turning raw chat-log exports from a field-operations
//! group into a categorised list of trouble-ticket and case identifiers.
//!
//! ## Overview
//!
//! Processing runs in two stages:
//!
//! 1. **Clean** - split the export into timestamped message blocks, drop every
//!    block posted by a configured staff member, then trim and lowercase the rest
//! 2. **Classify** - split text into units at timestamp boundaries, match each
//!    unit against an ordered table of issue patterns, and extract ticket
//!    numbers and case IDs into the first matching category (or the catch-all)
//!
//! Every identifier is reported at most once per run.
//!
//! ## Quick Start
//!
//! ```rust
//! use ticketpack::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let raw = "[08:00, 1/2/2024] Tina: looking\n\
//!                [08:03, 1/2/2024] Site: Full capping at A1 Q123456\n\
//!                [08:05, 1/2/2024] Site: link flap 1-123456789";
//!
//!     let cleaned = segment_and_redact(raw, &RedactionNames::parse_list("Tina")?);
//!     let result = KnowledgeBase::builtin()?.compile()?.classify(cleaned.as_str());
//!
//!     assert_eq!(result.identifiers("Full Capping"), vec!["q123456"]);
//!     assert_eq!(result.identifiers("Other"), vec!["1-123456789"]);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`config`] - [`RedactionNames`](config::RedactionNames), [`KnowledgeBase`](config::KnowledgeBase)
//! - [`core`] - Core types and functionality
//!   - [`core::segmenter`] - [`segment`](crate::core::segment), [`segment_and_redact`](crate::core::segment_and_redact)
//!   - [`core::classifier`] - [`Classifier`], [`ClaimSet`](crate::core::ClaimSet)
//!   - [`core::processor`] - [`process_batch`](crate::core::process_batch), [`Stage`](crate::core::Stage)
//!   - [`core::output`] - text, JSON and CSV writers
//! - [`format`] - [`OutputFormat`](format::OutputFormat), artifact naming
//! - [`cli`] - CLI arguments (feature `cli`)
//! - [`error`] - Unified error types ([`TicketpackError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;

// Re-export the main types at the crate root for convenience
pub use crate::core::classifier::Classifier;
pub use crate::core::models::ClassificationResult;
pub use error::{Result, TicketpackError};

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use ticketpack::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{Result, TicketpackError};

    // Configuration
    pub use crate::config::{KnowledgeBase, RedactionNames};

    // Models
    pub use crate::core::models::{
        CategoryItems, ClassificationResult, CleanedText, ExtractedItem, MessageBlock,
        OutputConfig,
    };

    // Cleaning
    pub use crate::core::segmenter::{Segmenter, segment, segment_and_redact};

    // Classification
    pub use crate::core::classifier::{ClaimSet, Classifier, classify};
    pub use crate::core::patterns::Extraction;

    // Batch processing
    pub use crate::core::processor::{BatchOptions, InputFile, ProcessingStats, Stage, process_batch};

    // Output
    pub use crate::format::{OutputFormat, to_format_string, write_to_format};
}
