//! Core data models for the cleaning and classification pipeline.
//!
//! - [`MessageBlock`] - one timestamped chat entry with its continuation lines
//! - [`CleanedText`] - the redacted, normalised blob produced per file
//! - [`ExtractedItem`] - an identifier, optionally paired with its source message
//! - [`ClassificationResult`] - ordered category to items mapping
//! - [`OutputConfig`] - rendering options for result writers

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::core::segmenter::parse_header_timestamp;

/// A contiguous run of lines starting at a recognised timestamp header.
///
/// The first block of a document may have no header (an orphan block made of
/// lines that precede the first header).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MessageBlock {
    /// The header line, `None` for a leading orphan block.
    pub header: Option<String>,
    /// Continuation lines following the header.
    pub body: Vec<String>,
}

impl MessageBlock {
    /// Creates a block opened by `header`.
    pub fn with_header(header: impl Into<String>) -> Self {
        Self {
            header: Some(header.into()),
            body: Vec::new(),
        }
    }

    /// Creates a headerless block.
    pub fn orphan() -> Self {
        Self::default()
    }

    /// Returns `true` if this block has no header line.
    pub fn is_orphan(&self) -> bool {
        self.header.is_none()
    }

    /// Iterates over the original lines (header first).
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.header
            .iter()
            .map(String::as_str)
            .chain(self.body.iter().map(String::as_str))
    }

    /// Number of original lines in this block.
    pub fn line_count(&self) -> usize {
        usize::from(self.header.is_some()) + self.body.len()
    }

    /// Trimmed, lowercased lines joined by single spaces.
    pub fn normalized(&self) -> String {
        let joined = self
            .lines()
            .map(|line| line.trim().to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        joined.trim().to_string()
    }

    /// Parses the header timestamp.
    ///
    /// Returns `None` for orphan blocks and for headers whose calendar values
    /// don't form a valid date (e.g. day 31 of February).
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.header.as_deref().and_then(parse_header_timestamp)
    }
}

/// Cleaned text for one input file.
///
/// Surviving blocks are normalised and joined with a blank line. The counters
/// describe what the segmenter saw while producing it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CleanedText {
    text: String,
    /// Blocks found in the raw input, including the orphan block.
    pub blocks_seen: usize,
    /// Blocks dropped because their header named own staff.
    pub blocks_redacted: usize,
    /// Blocks present in [`as_str`](Self::as_str).
    pub blocks_emitted: usize,
}

impl CleanedText {
    pub(crate) fn new(
        text: String,
        blocks_seen: usize,
        blocks_redacted: usize,
        blocks_emitted: usize,
    ) -> Self {
        Self {
            text,
            blocks_seen,
            blocks_redacted,
            blocks_emitted,
        }
    }

    /// Returns the cleaned text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consumes the value and returns the cleaned text.
    pub fn into_string(self) -> String {
        self.text
    }

    /// Returns `true` if nothing survived cleaning.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for CleanedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for CleanedText {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// An identifier extracted from a message unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractedItem {
    /// Ticket/order number or case ID attributed to a named category.
    Identifier(String),
    /// Identifier from a unit that matched no category, with the unit text.
    Unmatched {
        /// The ticket/order number or case ID
        identifier: String,
        /// The originating message unit
        message: String,
    },
}

impl ExtractedItem {
    /// Returns the identifier string.
    pub fn identifier(&self) -> &str {
        match self {
            ExtractedItem::Identifier(id) => id,
            ExtractedItem::Unmatched { identifier, .. } => identifier,
        }
    }

    /// Returns the originating message for catch-all items.
    pub fn message(&self) -> Option<&str> {
        match self {
            ExtractedItem::Identifier(_) => None,
            ExtractedItem::Unmatched { message, .. } => Some(message),
        }
    }
}

impl fmt::Display for ExtractedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractedItem::Identifier(id) => f.write_str(id),
            ExtractedItem::Unmatched {
                identifier,
                message,
            } => write!(f, "{identifier} ({message})"),
        }
    }
}

/// One category with its extracted items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryItems {
    /// Category name
    pub category: String,
    /// Items in extraction order
    pub items: Vec<ExtractedItem>,
}

/// Category to items mapping produced by one classification pass.
///
/// Categories appear in table order with the catch-all bucket last. Every
/// category of the table is present, even when its list is empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassificationResult {
    categories: Vec<CategoryItems>,
    units_scanned: usize,
}

impl ClassificationResult {
    /// Creates an empty result for the given category names.
    ///
    /// `catch_all` is appended after `names`.
    pub fn empty<'a>(names: impl IntoIterator<Item = &'a str>, catch_all: &'a str) -> Self {
        let categories = names
            .into_iter()
            .chain(std::iter::once(catch_all))
            .map(|name| CategoryItems {
                category: name.to_string(),
                items: Vec::new(),
            })
            .collect();
        Self {
            categories,
            units_scanned: 0,
        }
    }

    pub(crate) fn push(&mut self, index: usize, item: ExtractedItem) {
        self.categories[index].items.push(item);
    }

    pub(crate) fn record_unit(&mut self) {
        self.units_scanned += 1;
    }

    /// Items for a category, `None` if the category is unknown.
    pub fn get(&self, category: &str) -> Option<&[ExtractedItem]> {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.items.as_slice())
    }

    /// Identifier strings for a category (empty if unknown).
    pub fn identifiers(&self, category: &str) -> Vec<&str> {
        self.get(category)
            .map(|items| items.iter().map(ExtractedItem::identifier).collect())
            .unwrap_or_default()
    }

    /// The catch-all bucket.
    pub fn catch_all(&self) -> Option<&CategoryItems> {
        self.categories.last()
    }

    /// Iterates categories in table order, catch-all last.
    pub fn iter(&self) -> impl Iterator<Item = &CategoryItems> {
        self.categories.iter()
    }

    /// Total number of extracted items across all categories.
    pub fn total_items(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    /// Number of non-blank message units scanned.
    pub fn units_scanned(&self) -> usize {
        self.units_scanned
    }

    /// Returns `true` if no identifiers were extracted.
    pub fn is_empty(&self) -> bool {
        self.total_items() == 0
    }

    /// Appends another result category by category.
    ///
    /// Categories unknown to `self` are inserted before the catch-all. This
    /// does not deduplicate: run files through a shared
    /// [`ClaimSet`](crate::core::classifier::ClaimSet) for that.
    pub fn merge(&mut self, other: ClassificationResult) {
        if self.categories.is_empty() {
            *self = other;
            return;
        }
        self.units_scanned += other.units_scanned;

        let catch_all = other.categories.len().saturating_sub(1);
        for (i, incoming) in other.categories.into_iter().enumerate() {
            if let Some(existing) = self
                .categories
                .iter_mut()
                .find(|c| c.category == incoming.category)
            {
                existing.items.extend(incoming.items);
            } else if i == catch_all {
                self.categories.push(incoming);
            } else {
                let at = self.categories.len() - 1;
                self.categories.insert(at, incoming);
            }
        }
    }
}

impl<'a> IntoIterator for &'a ClassificationResult {
    type Item = &'a CategoryItems;
    type IntoIter = std::slice::Iter<'a, CategoryItems>;

    fn into_iter(self) -> Self::IntoIter {
        self.categories.iter()
    }
}

/// Configuration for rendering classification results.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Leave out categories with no items
    pub skip_empty: bool,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_skip_empty(mut self) -> Self {
        self.skip_empty = true;
        self
    }

    pub(crate) fn visible<'a>(
        &self,
        result: &'a ClassificationResult,
    ) -> impl Iterator<Item = &'a CategoryItems> {
        let skip_empty = self.skip_empty;
        result
            .iter()
            .filter(move |c| !skip_empty || !c.items.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ExtractedItem {
        ExtractedItem::Identifier(s.to_string())
    }

    #[test]
    fn test_block_lines_and_normalized() {
        let mut block = MessageBlock::with_header("[08:00, 1/2/2024] Ali: Line ONE ");
        block.body.push("  Second Line".to_string());
        assert_eq!(block.line_count(), 2);
        assert_eq!(
            block.normalized(),
            "[08:00, 1/2/2024] ali: line one second line"
        );
    }

    #[test]
    fn test_orphan_block() {
        let mut block = MessageBlock::orphan();
        assert!(block.is_orphan());
        assert_eq!(block.normalized(), "");
        block.body.push("stray".into());
        assert_eq!(block.lines().collect::<Vec<_>>(), vec!["stray"]);
        assert!(block.timestamp().is_none());
    }

    #[test]
    fn test_extracted_item_display() {
        assert_eq!(id("Q123456").to_string(), "Q123456");
        let other = ExtractedItem::Unmatched {
            identifier: "1-234567890".into(),
            message: "please check".into(),
        };
        assert_eq!(other.to_string(), "1-234567890 (please check)");
        assert_eq!(other.message(), Some("please check"));
    }

    #[test]
    fn test_empty_result_has_all_categories() {
        let result = ClassificationResult::empty(["A", "B"], "Other");
        let names: Vec<_> = result.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "Other"]);
        assert!(result.is_empty());
        assert_eq!(result.catch_all().unwrap().category, "Other");
    }

    #[test]
    fn test_empty_result_from_borrowed_names() {
        let table = vec!["Port Down".to_string(), "Link Flap".to_string()];
        let catch_all = String::from("Misc");
        let result = ClassificationResult::empty(table.iter().map(String::as_str), &catch_all);
        let names: Vec<_> = result.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Port Down", "Link Flap", "Misc"]);
    }

    #[test]
    fn test_merge_appends_by_category() {
        let mut left = ClassificationResult::empty(["A"], "Other");
        left.push(0, id("Q111111"));
        let mut right = ClassificationResult::empty(["A", "B"], "Other");
        right.push(0, id("Q222222"));
        right.push(1, id("TM12345"));

        left.merge(right);

        assert_eq!(left.identifiers("A"), vec!["Q111111", "Q222222"]);
        assert_eq!(left.identifiers("B"), vec!["TM12345"]);
        assert_eq!(left.catch_all().unwrap().category, "Other");
    }

    #[test]
    fn test_merge_into_default() {
        let mut combined = ClassificationResult::default();
        let mut one = ClassificationResult::empty(["A"], "Other");
        one.push(0, id("Q111111"));
        combined.merge(one.clone());
        assert_eq!(combined, one);
    }

    #[test]
    fn test_output_config_skip_empty() {
        let mut result = ClassificationResult::empty(["A", "B"], "Other");
        result.push(1, id("Q123456"));
        let config = OutputConfig::new().with_skip_empty();
        let visible: Vec<_> = config.visible(&result).map(|c| &c.category).collect();
        assert_eq!(visible, vec!["B"]);
    }
}
