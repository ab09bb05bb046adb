//! Compiled issue patterns and identifier grammars.
//!
//! The category table is data (see [`KnowledgeBase`](crate::config::KnowledgeBase));
//! this module holds its compiled form. All expressions are compiled once and
//! never mutated while classifying.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TicketpackError};

/// Ticket/order number grammar, matched case-insensitively.
///
/// `1-` + 9..=11 digits, `T-` + 9 digits, `t-` + 10 digits, `1-` + 7
/// alphanumerics, or the bare word `inc`.
pub const TICKET_GRAMMAR: &str =
    r"\b1-\d{9,11}\b|\bT-\d{9}\b|\bt-\d{10}\b|\b1-[a-z0-9]{7}\b|\binc\b";

/// Case-ID grammar: `Q`/`q` + 6 digits or `TM`/`tm` + 5 digits.
pub const CASE_ID_GRAMMAR: &str = r"\bQ\d{6}\b|\bq\d{6}\b|\bTM\d{5}\b|\btm\d{5}\b";

/// Which identifier grammars a category extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Extraction {
    /// Ticket/order numbers followed by case IDs.
    #[default]
    TicketsAndCaseIds,
    /// Case IDs only (capping-style categories).
    CaseIds,
}

impl Extraction {
    /// Returns `true` if ticket/order numbers are extracted.
    pub fn includes_tickets(self) -> bool {
        matches!(self, Extraction::TicketsAndCaseIds)
    }
}

/// A named category with its compiled detection expressions.
#[derive(Debug, Clone)]
pub struct IssuePattern {
    name: String,
    detectors: Vec<Regex>,
    extraction: Extraction,
}

impl IssuePattern {
    /// Compiles `patterns` case-insensitively.
    ///
    /// A category with no patterns never matches.
    pub fn compile<S: AsRef<str>>(
        name: impl Into<String>,
        patterns: &[S],
        extraction: Extraction,
    ) -> Result<Self> {
        let name = name.into();
        let detectors = patterns
            .iter()
            .map(|p| {
                RegexBuilder::new(p.as_ref())
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| TicketpackError::invalid_pattern(name.clone(), e))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name,
            detectors,
            extraction,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn extraction(&self) -> Extraction {
        self.extraction
    }

    /// Returns `true` if any detector matches anywhere in `unit`.
    pub fn is_match(&self, unit: &str) -> bool {
        self.detectors.iter().any(|d| d.is_match(unit))
    }
}

/// The two identifier grammars, compiled.
#[derive(Debug, Clone)]
pub struct IdentifierGrammars {
    pub(crate) tickets: Regex,
    pub(crate) case_ids: Regex,
}

impl IdentifierGrammars {
    /// Compiles custom grammars.
    ///
    /// The ticket grammar is case-insensitive; the case-ID grammar is used
    /// exactly as written.
    pub fn compile(ticket_grammar: &str, case_id_grammar: &str) -> Result<Self> {
        let tickets = RegexBuilder::new(ticket_grammar)
            .case_insensitive(true)
            .build()
            .map_err(|e| TicketpackError::invalid_pattern("ticket grammar", e))?;
        let case_ids = Regex::new(case_id_grammar)
            .map_err(|e| TicketpackError::invalid_pattern("case-ID grammar", e))?;
        Ok(Self { tickets, case_ids })
    }

    /// Ticket/order numbers in `text`, first-seen order, duplicates kept.
    pub fn tickets<'t>(&self, text: &'t str) -> impl Iterator<Item = &'t str> {
        self.tickets.find_iter(text).map(|m| m.as_str())
    }

    /// Case IDs in `text`, first-seen order, duplicates kept.
    pub fn case_ids<'t>(&self, text: &'t str) -> impl Iterator<Item = &'t str> {
        self.case_ids.find_iter(text).map(|m| m.as_str())
    }
}

impl Default for IdentifierGrammars {
    fn default() -> Self {
        Self::compile(TICKET_GRAMMAR, CASE_ID_GRAMMAR)
            .expect("built-in identifier grammars are valid")
    }
}
