//! Result writers.
//!
//! - [`write_text`] / [`to_text`] - `"<Category>: <items>"` lines, the `processed_<name>` artifact
//! - [`write_json`] / [`to_json`] - ordered JSON array of categories - requires `json-output` feature
//! - [`write_csv`] / [`to_csv`] - one row per identifier, `;` delimited - requires `csv-output` feature
//!
//! # Example
//!
//! ```rust
//! use ticketpack::core::output::to_text;
//! use ticketpack::core::models::OutputConfig;
//! use ticketpack::Classifier;
//!
//! let classifier = Classifier::builtin()?;
//! let result = classifier.classify("full capping Q123456");
//!
//! let text = to_text(&result, &OutputConfig::new());
//! assert_eq!(text, "Full Capping: Q123456\nOther: ");
//! # Ok::<(), ticketpack::TicketpackError>(())
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
mod text_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
pub use text_writer::{to_text, write_text};
