//! Batch processing over several chat exports.
//!
//! Each file is cleaned and/or classified on its own. Two opt-in behaviours
//! work across files:
//!
//! - `shared_claims` threads one [`ClaimSet`] through every file, so an
//!   identifier claimed in an earlier file is dropped from later ones
//! - `combined` merges all per-file results into one result by category

use serde::{Deserialize, Serialize};

use crate::core::classifier::{ClaimSet, Classifier};
use crate::core::models::{ClassificationResult, CleanedText};
use crate::core::segmenter::Segmenter;

/// Which pipeline stages to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Segment and redact only
    #[cfg_attr(feature = "cli", value(alias = "c"))]
    Clean,

    /// Classify the input as given
    #[cfg_attr(feature = "cli", value(alias = "cl"))]
    Classify,

    /// Clean, then classify the cleaned text
    #[default]
    #[cfg_attr(feature = "cli", value(alias = "p"))]
    Pipeline,
}

impl Stage {
    pub fn cleans(self) -> bool {
        matches!(self, Stage::Clean | Stage::Pipeline)
    }

    pub fn classifies(self) -> bool {
        matches!(self, Stage::Classify | Stage::Pipeline)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Clean => write!(f, "Clean"),
            Stage::Classify => write!(f, "Classify"),
            Stage::Pipeline => write!(f, "Clean + Classify"),
        }
    }
}

/// Options for [`process_batch`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    pub stage: Stage,
    /// Deduplicate identifiers across files
    pub shared_claims: bool,
    /// Merge per-file results into one
    pub combined: bool,
}

impl BatchOptions {
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_shared_claims(mut self, shared: bool) -> Self {
        self.shared_claims = shared;
        self
    }

    #[must_use]
    pub fn with_combined(mut self, combined: bool) -> Self {
        self.combined = combined;
        self
    }
}

/// One named input, already decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub name: String,
    pub content: String,
}

impl InputFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Per-file output.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub name: String,
    /// Set when the stage cleans
    pub cleaned: Option<CleanedText>,
    /// Set when the stage classifies
    pub result: Option<ClassificationResult>,
}

/// Statistics about a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    pub files: usize,
    pub blocks_seen: usize,
    pub blocks_redacted: usize,
    pub blocks_emitted: usize,
    pub identifiers: usize,
}

impl ProcessingStats {
    /// Percentage of blocks removed by redaction.
    pub fn redaction_ratio(&self) -> f64 {
        if self.blocks_seen == 0 {
            return 0.0;
        }
        (self.blocks_redacted as f64 / self.blocks_seen as f64) * 100.0
    }

    fn add_cleaned(&mut self, cleaned: &CleanedText) {
        self.blocks_seen += cleaned.blocks_seen;
        self.blocks_redacted += cleaned.blocks_redacted;
        self.blocks_emitted += cleaned.blocks_emitted;
    }
}

/// Output of [`process_batch`].
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
    /// Merged result, set when `combined` was requested and the stage classifies
    pub combined: Option<ClassificationResult>,
    pub stats: ProcessingStats,
}

/// Runs the requested stages over `inputs` in order.
pub fn process_batch(
    inputs: &[InputFile],
    segmenter: &Segmenter,
    classifier: &Classifier,
    options: BatchOptions,
) -> BatchReport {
    let mut report = BatchReport::default();
    let mut shared = ClaimSet::new();
    let mut combined = ClassificationResult::default();

    for input in inputs {
        report.stats.files += 1;

        let cleaned = options.stage.cleans().then(|| segmenter.clean(&input.content));
        if let Some(cleaned) = &cleaned {
            report.stats.add_cleaned(cleaned);
        }

        let result = options.stage.classifies().then(|| {
            let text = cleaned.as_ref().map_or(input.content.as_str(), CleanedText::as_str);
            if options.shared_claims {
                classifier.classify_with_claims(text, &mut shared)
            } else {
                classifier.classify(text)
            }
        });

        if let Some(result) = &result {
            report.stats.identifiers += result.total_items();
            if options.combined {
                combined.merge(result.clone());
            }
        }

        report.files.push(FileReport {
            name: input.name.clone(),
            cleaned,
            result,
        });
    }

    if options.combined && options.stage.classifies() {
        if combined.iter().next().is_none() {
            combined = ClassificationResult::empty(classifier.category_names(), classifier.catch_all_name());
        }
        report.combined = Some(combined);
    }

    report
}
