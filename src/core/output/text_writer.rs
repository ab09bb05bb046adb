//! Plain-text output writer.

use std::fs;
use std::path::Path;

use crate::core::models::{ClassificationResult, OutputConfig};
use crate::error::Result;

/// Writes the text rendering of `result` to `output_path`.
pub fn write_text(
    result: &ClassificationResult,
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    fs::write(output_path, to_text(result, config))?;
    Ok(())
}

/// Renders one line per category.
///
/// # Format
/// ```text
/// Full Capping: Q123456, TM12345
/// Other: 1-234567890 (please check 1-234567890)
/// ```
pub fn to_text(result: &ClassificationResult, config: &OutputConfig) -> String {
    config
        .visible(result)
        .map(|category| {
            let items = category
                .items
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}: {}", category.category, items)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
