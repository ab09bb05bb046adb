//! Command-line interface definition using clap.
//!
//! [`Args`] reuses the library's [`Stage`] and [`OutputFormat`] enums
//! directly, so the same values work from code and from the shell:
//!
//! ```rust
//! use clap::Parser;
//! use ticketpack::cli::Args;
//! use ticketpack::core::Stage;
//! use ticketpack::format::OutputFormat;
//!
//! let args = Args::parse_from(["ticketpack", "p", "chat.txt", "--format", "json"]);
//! assert_eq!(args.stage, Stage::Pipeline);
//! assert_eq!(args.format, OutputFormat::Json);
//! ```

use clap::Parser;

use crate::config::DEFAULT_NAMES;
use crate::core::models::OutputConfig;
use crate::core::processor::{BatchOptions, Stage};
use crate::format::OutputFormat;

/// Clean WhatsApp-style chat exports and sort trouble-ticket
/// and case identifiers into issue categories.
#[derive(Parser, Debug, Clone)]
#[command(name = "ticketpack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    ticketpack clean chat.txt
    ticketpack classify cleaned_chat.txt --format csv
    ticketpack pipeline day1.txt day2.txt --combined --shared-claims
    ticketpack p chat.txt --names \"Tina, Dhef\" -o out/
    ticketpack p chat.txt --patterns my_categories.json")]
pub struct Args {
    /// Which stages to run
    #[arg(value_enum)]
    pub stage: Stage,

    /// Input chat exports (UTF-8 text)
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Comma-separated staff names whose messages are redacted
    #[arg(long, value_name = "LIST", default_value = DEFAULT_NAMES)]
    pub names: String,

    /// Knowledge base JSON with the issue categories (defaults to the built-in one)
    #[arg(long, value_name = "FILE")]
    pub patterns: Option<String>,

    /// Directory for output artifacts
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: String,

    /// Output format for classification results
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Also write one merged result for all inputs
    #[arg(long)]
    pub combined: bool,

    /// Drop identifiers already claimed by an earlier input
    #[arg(long)]
    pub shared_claims: bool,

    /// Leave categories with no identifiers out of the results
    #[arg(long)]
    pub skip_empty: bool,
}

impl Args {
    /// Batch options selected by the flags.
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions::new(self.stage)
            .with_shared_claims(self.shared_claims)
            .with_combined(self.combined)
    }

    /// Output options selected by the flags.
    pub fn output_config(&self) -> OutputConfig {
        let config = OutputConfig::new();
        if self.skip_empty {
            config.with_skip_empty()
        } else {
            config
        }
    }
}
