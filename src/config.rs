//! Configuration types for cleaning and classification.
//!
//! - [`RedactionNames`] - own-staff names whose messages are removed during cleaning
//! - [`KnowledgeBase`] - the versioned issue-pattern table and identifier grammars
//!
//! # Example
//!
//! ```rust
//! use ticketpack::config::{KnowledgeBase, RedactionNames};
//! use ticketpack::core::patterns::Extraction;
//!
//! let names = RedactionNames::parse_list("Tina, Pom, ")?;
//! assert_eq!(names.len(), 2);
//!
//! let classifier = KnowledgeBase::builtin()?
//!     .with_category("Port Down", [r"\bport down\b"], Extraction::TicketsAndCaseIds)
//!     .compile()?;
//! assert_eq!(classifier.category_names().count(), 2);
//! # Ok::<(), ticketpack::TicketpackError>(())
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::core::classifier::Classifier;
use crate::core::patterns::{CASE_ID_GRAMMAR, Extraction, IdentifierGrammars, IssuePattern, TICKET_GRAMMAR};
use crate::error::{Result, TicketpackError};

/// Staff names pre-filled by the reporting desk.
pub const DEFAULT_NAMES: &str = "Hartina, Tina, Normah, Pom, Afizan, Pijan, Ariff, Dheffirdaus, Dhef, \
     Hazrina, Rina, Nurul, Huda, Zazarida, Zaza, Eliasaph Wan, Wan, ] : ";

/// Built-in knowledge base.
const BUILTIN_KNOWLEDGE_BASE: &str = include_str!("../data/knowledge_base.json");

/// Set of own-staff names matched as case-insensitive whole words.
///
/// Names are literal text: regex metacharacters in a name are escaped.
/// Empty entries are dropped.
#[derive(Debug, Clone, Default)]
pub struct RedactionNames {
    names: Vec<String>,
    matcher: Option<Regex>,
}

impl RedactionNames {
    /// Builds the set from any list of names.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();

        if names.is_empty() {
            return Ok(Self::default());
        }

        let alternation = names
            .iter()
            .map(|n| regex::escape(n))
            .collect::<Vec<_>>()
            .join("|");
        let matcher = RegexBuilder::new(&format!(r"\b(?:{alternation})\b"))
            .case_insensitive(true)
            .build()
            .map_err(|e| TicketpackError::invalid_pattern("redaction names", e))?;

        Ok(Self {
            names,
            matcher: Some(matcher),
        })
    }

    /// Builds the set from a comma-separated list.
    pub fn parse_list(list: &str) -> Result<Self> {
        Self::new(list.split(','))
    }

    /// The default comma-separated staff list.
    pub fn default_list() -> &'static str {
        DEFAULT_NAMES
    }

    /// Builds the set from [`default_list`](Self::default_list).
    pub fn builtin() -> Result<Self> {
        Self::parse_list(DEFAULT_NAMES)
    }

    /// Returns `true` if `line` contains any name as a whole word.
    pub fn matches(&self, line: &str) -> bool {
        self.matcher.as_ref().is_some_and(|m| m.is_match(line))
    }

    /// The trimmed names.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// One category entry of the knowledge base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpec {
    /// Category name, unique within the table
    pub name: String,

    /// Detection expressions; any match selects the category
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Identifier grammars to extract (default: tickets and case IDs)
    #[serde(default)]
    pub extract: Extraction,
}

/// Versioned issue-pattern table plus identifier grammars.
///
/// Category order is priority order: the first category whose patterns match
/// a message unit claims it. Loaded from JSON:
///
/// ```json
/// {
///   "version": 1,
///   "catch_all": "Other",
///   "categories": [
///     { "name": "Full Capping", "patterns": ["\\bfull cap[p]?ing\\b"], "extract": "case-ids" }
///   ]
/// }
/// ```
///
/// Omitted grammars fall back to [`TICKET_GRAMMAR`] and [`CASE_ID_GRAMMAR`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    /// Table version (default: 1)
    #[serde(default = "default_version")]
    pub version: u32,

    /// Name of the bucket for units matching no category (default: "Other")
    #[serde(default = "default_catch_all")]
    pub catch_all: String,

    /// Ticket/order number grammar
    #[serde(default = "default_ticket_grammar")]
    pub ticket_grammar: String,

    /// Case-ID grammar
    #[serde(default = "default_case_id_grammar")]
    pub case_id_grammar: String,

    /// Categories in priority order
    #[serde(default)]
    pub categories: Vec<CategorySpec>,
}

fn default_version() -> u32 {
    1
}

fn default_catch_all() -> String {
    "Other".to_string()
}

fn default_ticket_grammar() -> String {
    TICKET_GRAMMAR.to_string()
}

fn default_case_id_grammar() -> String {
    CASE_ID_GRAMMAR.to_string()
}

impl Default for KnowledgeBase {
    /// An empty table: every unit falls into the catch-all.
    fn default() -> Self {
        Self {
            version: default_version(),
            catch_all: default_catch_all(),
            ticket_grammar: default_ticket_grammar(),
            case_id_grammar: default_case_id_grammar(),
            categories: Vec::new(),
        }
    }
}

impl KnowledgeBase {
    /// Creates an empty table with the default grammars.
    pub fn new() -> Self {
        Self::default()
    }

    /// The embedded table shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_KNOWLEDGE_BASE)
    }

    /// Parses a table from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a table from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Appends a category at the lowest priority.
    #[must_use]
    pub fn with_category<I, S>(mut self, name: impl Into<String>, patterns: I, extract: Extraction) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories.push(CategorySpec {
            name: name.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
            extract,
        });
        self
    }

    /// Sets the catch-all bucket name.
    #[must_use]
    pub fn with_catch_all(mut self, name: impl Into<String>) -> Self {
        self.catch_all = name.into();
        self
    }

    /// Checks category names: non-empty, unique, distinct from the catch-all.
    pub fn validate(&self) -> Result<()> {
        if self.catch_all.trim().is_empty() {
            return Err(TicketpackError::invalid_knowledge_base(
                "catch-all category name is empty",
            ));
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            if category.name.trim().is_empty() {
                return Err(TicketpackError::invalid_knowledge_base(
                    "category name is empty",
                ));
            }
            if category.name == self.catch_all {
                return Err(TicketpackError::invalid_knowledge_base(format!(
                    "category '{}' collides with the catch-all bucket",
                    category.name
                )));
            }
            if !seen.insert(category.name.as_str()) {
                return Err(TicketpackError::invalid_knowledge_base(format!(
                    "duplicate category '{}'",
                    category.name
                )));
            }
        }

        Ok(())
    }

    /// Validates and precompiles the table into a [`Classifier`].
    pub fn compile(&self) -> Result<Classifier> {
        self.validate()?;

        let grammars = IdentifierGrammars::compile(&self.ticket_grammar, &self.case_id_grammar)?;
        let patterns = self
            .categories
            .iter()
            .map(|c| IssuePattern::compile(c.name.clone(), &c.patterns, c.extract))
            .collect::<Result<Vec<_>>>()?;

        Ok(Classifier::new(patterns, self.catch_all.clone(), grammars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_trims_and_drops_empty() {
        let names = RedactionNames::parse_list(" Tina ,, Pom , ").unwrap();
        assert_eq!(names.names(), &["Tina".to_string(), "Pom".to_string()]);
    }

    #[test]
    fn test_empty_names_match_nothing() {
        let names = RedactionNames::parse_list(" , ").unwrap();
        assert!(names.is_empty());
        assert!(!names.matches("[08:00, 1/2/2024] anyone: hi"));
    }

    #[test]
    fn test_names_match_whole_words_case_insensitive() {
        let names = RedactionNames::new(["Tina"]).unwrap();
        assert!(names.matches("[08:00, 1/2/2024] TINA: hello"));
        assert!(!names.matches("[08:00, 1/2/2024] Martina: hello"));
        assert!(!names.matches("[08:00, 1/2/2024] Tinaz: hello"));
    }

    #[test]
    fn test_multi_word_name() {
        let names = RedactionNames::new(["Eliasaph Wan"]).unwrap();
        assert!(names.matches("[08:00, 1/2/2024] eliasaph wan: ok"));
        assert!(!names.matches("[08:00, 1/2/2024] eliasaph: ok"));
    }

    #[test]
    fn test_builtin_names() {
        let names = RedactionNames::builtin().unwrap();
        assert!(names.matches("[08:00, 1/2/2024] Hazrina: done"));
        assert!(names.names().iter().any(|n| n == "Eliasaph Wan"));
    }

    #[test]
    fn test_builtin_knowledge_base() {
        let kb = KnowledgeBase::builtin().unwrap();
        assert_eq!(kb.version, 1);
        assert_eq!(kb.catch_all, "Other");
        assert_eq!(kb.ticket_grammar, TICKET_GRAMMAR);
        assert_eq!(kb.case_id_grammar, CASE_ID_GRAMMAR);
        assert_eq!(kb.categories.len(), 1);
        assert_eq!(kb.categories[0].name, "Full Capping");
        assert_eq!(kb.categories[0].extract, Extraction::CaseIds);
        assert!(kb.compile().is_ok());
    }

    #[test]
    fn test_from_json_defaults() {
        let kb = KnowledgeBase::from_json(r#"{"categories": [{"name": "Port Down", "patterns": ["port down"]}]}"#)
            .unwrap();
        assert_eq!(kb.catch_all, "Other");
        assert_eq!(kb.categories[0].extract, Extraction::TicketsAndCaseIds);
        assert_eq!(kb.ticket_grammar, TICKET_GRAMMAR);
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let kb = KnowledgeBase::new()
            .with_category("A", ["a"], Extraction::default())
            .with_category("A", ["b"], Extraction::default());
        assert!(kb.compile().unwrap_err().is_invalid_knowledge_base());
    }

    #[test]
    fn test_catch_all_collision_rejected() {
        let kb = KnowledgeBase::new().with_category("Other", ["x"], Extraction::default());
        assert!(kb.validate().unwrap_err().is_invalid_knowledge_base());
    }

    #[test]
    fn test_invalid_regex_rejected() {
        let kb = KnowledgeBase::new().with_category("Bad", ["(unclosed"], Extraction::default());
        let err = kb.compile().unwrap_err();
        assert!(err.is_invalid_pattern());
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kb.json");
        fs::write(&path, r#"{"catch_all": "Misc", "categories": []}"#).unwrap();
        let kb = KnowledgeBase::from_path(&path).unwrap();
        assert_eq!(kb.catch_all, "Misc");
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(KnowledgeBase::from_json("not json").is_err());
    }
}
