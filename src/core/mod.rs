//! Core processing logic for ticketpack.
//!
//! This module contains:
//! - [`models`] - Data structures for blocks, cleaned text and results
//! - [`segmenter`] - Block segmentation and own-staff redaction
//! - [`patterns`] - Compiled issue patterns and identifier grammars
//! - [`classifier`] - Issue classification with identifier extraction
//! - [`processor`] - Batch processing over several files
//! - [`output`] - Result writers (text, JSON, CSV)
//!
//! # Quick Start
//!
//! ```rust
//! use ticketpack::core::{Classifier, RedactionNames, segment_and_redact};
//!
//! let raw = "[08:00, 1/2/2024] Tina: checking\n[08:02, 1/2/2024] Site: full capping Q123456";
//! let cleaned = segment_and_redact(raw, &RedactionNames::parse_list("Tina")?);
//! let result = Classifier::builtin()?.classify(cleaned.as_str());
//!
//! assert_eq!(result.identifiers("Full Capping"), vec!["q123456"]);
//! # Ok::<(), ticketpack::TicketpackError>(())
//! ```

pub mod classifier;
pub mod models;
pub mod output;
pub mod patterns;
pub mod processor;
pub mod segmenter;

// Re-export main types for convenience
pub use classifier::{ClaimSet, Classifier, classify, split_units};
pub use models::{
    CategoryItems, ClassificationResult, CleanedText, ExtractedItem, MessageBlock, OutputConfig,
};
pub use patterns::{Extraction, IdentifierGrammars, IssuePattern};
pub use processor::{BatchOptions, BatchReport, FileReport, InputFile, ProcessingStats, Stage, process_batch};
pub use segmenter::{Segmenter, segment, segment_and_redact};

pub use crate::config::{KnowledgeBase, RedactionNames};

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, write_json};
pub use output::{to_text, write_text};
