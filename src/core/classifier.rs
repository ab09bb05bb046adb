//! Issue classification with identifier extraction.
//!
//! Text is re-split into message units, each unit is matched against the
//! category table in priority order, and ticket/order numbers and case IDs are
//! pulled out of it. A [`ClaimSet`] records every identifier already
//! attributed so that no identifier is reported twice.
//!
//! # Unit boundaries
//!
//! Two boundary forms are recognised so the classifier works on both raw
//! exports and cleaned text:
//!
//! - a line starting with `[D/M/YYYY H:MM am|pm]` starts a new unit that
//!   includes the timestamp
//! - any `[HH:MM, D/M/YYYY]` ends the current unit; the timestamp itself is
//!   dropped and the next unit starts right after it
//!
//! # Example
//!
//! ```rust
//! use ticketpack::config::KnowledgeBase;
//!
//! let classifier = KnowledgeBase::builtin()?.compile()?;
//! let result = classifier.classify("Full capping Q123456 tmf order 1-234567890");
//!
//! assert_eq!(result.identifiers("Full Capping"), vec!["Q123456"]);
//! assert!(result.identifiers("Other").is_empty());
//! # Ok::<(), ticketpack::TicketpackError>(())
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::KnowledgeBase;
use crate::core::models::{ClassificationResult, ExtractedItem};
use crate::core::patterns::{IdentifierGrammars, IssuePattern};
use crate::error::Result;

/// Message-unit boundary grammar.
///
/// Group `lead` marks a line-leading boundary kept in the next unit.
static UNIT_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)(?P<lead>^\[\d{1,2}/\d{1,2}/\d{4} \d{1,2}:\d{2} [AaPp][Mm]\])|\[\d{2}:\d{2}, \d{1,2}/\d{1,2}/\d{4}\]",
    )
    .expect("UNIT_BOUNDARY: invalid pattern")
});

/// Splits text into message units.
///
/// Units are trimmed; blank units are skipped since they cannot carry
/// identifiers.
pub fn split_units(text: &str) -> Vec<&str> {
    let mut units = Vec::new();
    let mut start = 0;

    for caps in UNIT_BOUNDARY.captures_iter(text) {
        let Some(boundary) = caps.get(0) else {
            continue;
        };
        units.push(&text[start..boundary.start()]);
        start = if caps.name("lead").is_some() {
            boundary.start()
        } else {
            boundary.end()
        };
    }
    units.push(&text[start..]);

    units
        .into_iter()
        .map(str::trim)
        .filter(|unit| !unit.is_empty())
        .collect()
}

/// Identifiers already attributed during a classification pass.
///
/// Ticket/order numbers and case IDs are tracked separately. A fresh set per
/// file gives per-file deduplication; threading one set through several
/// files deduplicates across them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimSet {
    tickets: HashSet<String>,
    case_ids: HashSet<String>,
}

impl ClaimSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims a ticket/order number; `false` if it was already claimed.
    pub fn claim_ticket(&mut self, ticket: &str) -> bool {
        claim(&mut self.tickets, ticket)
    }

    /// Claims a case ID; `false` if it was already claimed.
    pub fn claim_case_id(&mut self, case_id: &str) -> bool {
        claim(&mut self.case_ids, case_id)
    }

    pub fn has_ticket(&self, ticket: &str) -> bool {
        self.tickets.contains(ticket)
    }

    pub fn has_case_id(&self, case_id: &str) -> bool {
        self.case_ids.contains(case_id)
    }

    /// Total number of claimed identifiers.
    pub fn len(&self) -> usize {
        self.tickets.len() + self.case_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.tickets.clear();
        self.case_ids.clear();
    }
}

fn claim(set: &mut HashSet<String>, id: &str) -> bool {
    if set.contains(id) {
        return false;
    }
    set.insert(id.to_string())
}

/// Precompiled category table and identifier grammars.
///
/// Built by [`KnowledgeBase::compile`]; immutable and reusable across files.
#[derive(Debug, Clone)]
pub struct Classifier {
    patterns: Vec<IssuePattern>,
    catch_all: String,
    grammars: IdentifierGrammars,
}

impl Classifier {
    pub(crate) fn new(
        patterns: Vec<IssuePattern>,
        catch_all: String,
        grammars: IdentifierGrammars,
    ) -> Self {
        Self {
            patterns,
            catch_all,
            grammars,
        }
    }

    /// Compiles the embedded knowledge base.
    pub fn builtin() -> Result<Self> {
        KnowledgeBase::builtin()?.compile()
    }

    /// Category names in priority order (catch-all excluded).
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(IssuePattern::name)
    }

    /// Name of the catch-all bucket.
    pub fn catch_all_name(&self) -> &str {
        &self.catch_all
    }

    pub fn grammars(&self) -> &IdentifierGrammars {
        &self.grammars
    }

    /// Index of the first category matching `unit`.
    pub fn match_category(&self, unit: &str) -> Option<usize> {
        self.patterns.iter().position(|p| p.is_match(unit))
    }

    /// Classifies one text blob with fresh claim sets.
    pub fn classify(&self, text: &str) -> ClassificationResult {
        let mut claims = ClaimSet::new();
        self.classify_with_claims(text, &mut claims)
    }

    /// Classifies one text blob against caller-owned claims.
    ///
    /// Identifiers already in `claims` are skipped; newly found ones are
    /// added.
    pub fn classify_with_claims(&self, text: &str, claims: &mut ClaimSet) -> ClassificationResult {
        let mut result = ClassificationResult::empty(self.category_names(), &self.catch_all);
        let catch_all = self.patterns.len();

        for unit in split_units(text) {
            result.record_unit();

            if let Some(index) = self.match_category(unit) {
                let pattern = &self.patterns[index];
                let mut found = Vec::new();
                if pattern.extraction().includes_tickets() {
                    self.claim_tickets(unit, claims, &mut found);
                }
                self.claim_case_ids(unit, claims, &mut found);

                for id in found {
                    result.push(index, ExtractedItem::Identifier(id));
                }
            } else {
                let mut found = Vec::new();
                self.claim_tickets(unit, claims, &mut found);
                self.claim_case_ids(unit, claims, &mut found);

                for identifier in found {
                    result.push(
                        catch_all,
                        ExtractedItem::Unmatched {
                            identifier,
                            message: unit.to_string(),
                        },
                    );
                }
            }
        }

        result
    }

    fn claim_tickets(&self, unit: &str, claims: &mut ClaimSet, found: &mut Vec<String>) {
        for ticket in self.grammars.tickets(unit) {
            if claims.claim_ticket(ticket) {
                found.push(ticket.to_string());
            }
        }
    }

    fn claim_case_ids(&self, unit: &str, claims: &mut ClaimSet, found: &mut Vec<String>) {
        for case_id in self.grammars.case_ids(unit) {
            if claims.claim_case_id(case_id) {
                found.push(case_id.to_string());
            }
        }
    }
}

/// Classifies `text` with `classifier` using fresh claim sets.
pub fn classify(text: &str, classifier: &Classifier) -> ClassificationResult {
    classifier.classify(text)
}
