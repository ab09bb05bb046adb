//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::core::models::{ClassificationResult, ExtractedItem, OutputConfig};
use crate::error::Result;

#[derive(Serialize)]
struct JsonCategory<'a> {
    category: &'a str,
    items: &'a [ExtractedItem],
}

/// Writes `result` to a JSON file.
///
/// # Format
/// ```json
/// [
///   {"category": "Full Capping", "items": ["Q123456"]},
///   {"category": "Other", "items": [{"identifier": "1-234567890", "message": "..."}]}
/// ]
/// ```
pub fn write_json(
    result: &ClassificationResult,
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let json = to_json(result, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts `result` to a pretty-printed JSON array, categories in order.
pub fn to_json(result: &ClassificationResult, config: &OutputConfig) -> Result<String> {
    let categories: Vec<JsonCategory<'_>> = config
        .visible(result)
        .map(|c| JsonCategory {
            category: &c.category,
            items: &c.items,
        })
        .collect();

    Ok(serde_json::to_string_pretty(&categories)?)
}
