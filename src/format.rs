//! Output format types and artifact naming.
//!
//! # Example
//!
//! ```rust
//! use ticketpack::format::{OutputFormat, artifact_name};
//!
//! assert_eq!(artifact_name("processed", "chat.txt", OutputFormat::Text), "processed_chat.txt");
//! assert_eq!(artifact_name("processed", "chat.txt", OutputFormat::Json), "processed_chat.json");
//!
//! let format = OutputFormat::from_path("report.csv")?;
//! assert_eq!(format, OutputFormat::Csv);
//! # Ok::<(), ticketpack::TicketpackError>(())
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::models::{ClassificationResult, OutputConfig};
use crate::error::TicketpackError;

/// Output format for classification results.
///
/// - [`Text`](OutputFormat::Text) - `"<Category>: <items>"` lines (default)
/// - [`Json`](OutputFormat::Json) - ordered array of categories
/// - [`Csv`](OutputFormat::Csv) - one `;`-delimited row per identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Grouped plain text
    #[default]
    #[cfg_attr(feature = "cli", value(alias = "txt"))]
    Text,

    /// JSON array of `{category, items}`
    Json,

    /// CSV with semicolon delimiter
    Csv,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["text", "txt", "json", "csv"]
    }

    /// Detects format from a file path based on extension.
    pub fn from_path(path: &str) -> Result<Self, TicketpackError> {
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(TicketpackError::invalid_format(
                "output",
                format!("Unknown file extension: '.{ext}'. Expected one of: txt, json, csv"),
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "Text"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Builds the artifact file name for an input file.
///
/// Text artifacts keep the original name (`cleaned_chat.txt`); other formats
/// swap the extension (`processed_chat.json`). Only the file name of
/// `original` is used.
pub fn artifact_name(prefix: &str, original: &str, format: OutputFormat) -> String {
    let path = Path::new(original);
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(original);

    match format {
        OutputFormat::Text => format!("{prefix}_{file_name}"),
        _ => {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(file_name);
            format!("{prefix}_{stem}.{}", format.extension())
        }
    }
}

/// Builds the file name of the merged batch artifact.
pub fn combined_artifact_name(format: OutputFormat) -> String {
    format!("processed_combined.{}", format.extension())
}

/// Artifact file names already claimed by one run.
///
/// Every name must be reserved before anything is written, so a collision
/// fails the run instead of overwriting an earlier artifact.
///
/// # Example
///
/// ```rust
/// use ticketpack::format::{ArtifactNames, OutputFormat, artifact_name, combined_artifact_name};
///
/// let mut names = ArtifactNames::new();
/// names.reserve(artifact_name("processed", "day1.txt", OutputFormat::Text))?;
/// names.reserve(combined_artifact_name(OutputFormat::Text))?;
///
/// let err = names
///     .reserve(artifact_name("processed", "other/day1.txt", OutputFormat::Text))
///     .unwrap_err();
/// assert!(err.is_artifact_collision());
/// # Ok::<(), ticketpack::TicketpackError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArtifactNames {
    names: HashSet<String>,
}

impl ArtifactNames {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `name` and hands it back.
    ///
    /// # Errors
    ///
    /// Returns [`TicketpackError::ArtifactCollision`] if `name` was already
    /// reserved.
    pub fn reserve(&mut self, name: String) -> Result<String, TicketpackError> {
        if self.names.contains(&name) {
            return Err(TicketpackError::artifact_collision(name));
        }
        self.names.insert(name.clone());
        Ok(name)
    }

    /// Number of reserved names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if nothing is reserved.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Writes a result to a file in the specified format.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The file cannot be written
#[allow(unused_variables)]
pub fn write_to_format(
    result: &ClassificationResult,
    path: impl AsRef<Path>,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<(), TicketpackError> {
    match format {
        OutputFormat::Text => crate::core::output::write_text(result, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(result, path, config),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(result, path, config),
        #[allow(unreachable_patterns)]
        _ => Err(disabled(format)),
    }
}

/// Converts a result to a string in the specified format.
#[allow(unused_variables)]
pub fn to_format_string(
    result: &ClassificationResult,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String, TicketpackError> {
    match format {
        OutputFormat::Text => Ok(crate::core::output::to_text(result, config)),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(result, config),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(result, config),
        #[allow(unreachable_patterns)]
        _ => Err(disabled(format)),
    }
}

fn disabled(format: OutputFormat) -> TicketpackError {
    TicketpackError::invalid_format(
        "output",
        format!(
            "Output format {:?} requires the '{}' feature to be enabled",
            format,
            match format {
                OutputFormat::Csv => "csv-output",
                _ => "json-output",
            }
        ),
    )
}
