//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::core::models::{ClassificationResult, OutputConfig};
use crate::error::Result;

/// Writes `result` to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Category`, `Identifier`, `Message`
/// - `Message` is only filled for catch-all rows
/// - Categories without items get one row with an empty identifier unless
///   [`OutputConfig::skip_empty`] is set
pub fn write_csv(
    result: &ClassificationResult,
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let csv = to_csv(result, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(csv.as_bytes())?;
    Ok(())
}

/// Converts `result` to a CSV string.
pub fn to_csv(result: &ClassificationResult, config: &OutputConfig) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new());

    writer.write_record(["Category", "Identifier", "Message"])?;

    for category in config.visible(result) {
        if category.items.is_empty() {
            writer.write_record([category.category.as_str(), "", ""])?;
            continue;
        }
        for item in &category.items {
            writer.write_record([
                category.category.as_str(),
                item.identifier(),
                item.message().unwrap_or_default(),
            ])?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}
