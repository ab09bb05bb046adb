//! # ticketpack CLI
//!
//! Command-line interface for the ticketpack library.

use std::fs;
use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use ticketpack::cli::Args;
use ticketpack::config::{KnowledgeBase, RedactionNames};
use ticketpack::core::{BatchReport, CleanedText, InputFile, Segmenter, process_batch};
use ticketpack::format::{
    ArtifactNames, OutputFormat, artifact_name, combined_artifact_name, write_to_format,
};
use ticketpack::{ClassificationResult, TicketpackError};

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), TicketpackError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    // Print header
    println!("📦 ticketpack v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("🔧 Stage:   {}", args.stage);
    println!("📂 Inputs:  {}", args.inputs.join(", "));
    println!("💾 Output:  {}", args.output_dir);
    if args.stage.classifies() {
        println!("📄 Format:  {}", args.format);
    }
    if args.shared_claims {
        println!("🔗 Claims:  shared across inputs");
    }
    println!();

    // Step 1: Configuration
    let names = RedactionNames::parse_list(&args.names)?;
    let knowledge_base = match &args.patterns {
        Some(path) => {
            println!("📚 Loading knowledge base from {}...", path);
            KnowledgeBase::from_path(path)?
        }
        None => KnowledgeBase::builtin()?,
    };
    let classifier = knowledge_base.compile()?;
    let segmenter = Segmenter::new(names);
    if args.stage.cleans() {
        println!("🙈 Redacting {} staff names", segmenter.names().len());
    }
    if args.stage.classifies() {
        println!(
            "🏷️  {} categories + '{}'",
            classifier.category_names().count(),
            classifier.catch_all_name()
        );
    }

    // Step 2: Read inputs
    println!("⏳ Reading {} file(s)...", args.inputs.len());
    let read_start = Instant::now();
    let inputs = args
        .inputs
        .iter()
        .map(|path| read_input(path))
        .collect::<Result<Vec<_>, _>>()?;
    let bytes: usize = inputs.iter().map(|i| i.content.len()).sum();
    println!(
        "   Read {} bytes ({:.2}s)",
        bytes,
        read_start.elapsed().as_secs_f64()
    );

    // Step 3: Process
    println!("🔍 Processing...");
    let process_start = Instant::now();
    let report = process_batch(&inputs, &segmenter, &classifier, args.batch_options());
    println!("   Done in {:.2}s", process_start.elapsed().as_secs_f64());

    // Step 4: Write artifacts
    let output_dir = Path::new(&args.output_dir);
    let output_config = args.output_config();
    let artifacts = plan_artifacts(&report, &args.inputs, args.format)?;
    fs::create_dir_all(output_dir)?;
    let write_start = Instant::now();
    let mut written = Vec::with_capacity(artifacts.len());

    for (name, artifact) in artifacts {
        let target = output_dir.join(name);
        match artifact {
            Artifact::Cleaned(cleaned) => fs::write(&target, cleaned.as_str())?,
            Artifact::Result(result) => {
                write_to_format(result, &target, args.format, &output_config)?;
            }
        }
        written.push(target);
    }
    println!(
        "💾 Wrote {} file(s) ({:.2}s)",
        written.len(),
        write_start.elapsed().as_secs_f64()
    );
    for path in &written {
        println!("   {}", path.display());
    }

    let total_time = total_start.elapsed();

    println!();
    println!("✅ Done!");

    // Summary
    let stats = report.stats;
    println!();
    println!("📊 Summary:");
    println!("   Files:       {}", stats.files);
    if args.stage.cleans() {
        println!("   Blocks:      {}", stats.blocks_seen);
        println!(
            "   Redacted:    {} ({:.1}%)",
            stats.blocks_redacted,
            stats.redaction_ratio()
        );
        println!("   Kept:        {}", stats.blocks_emitted);
    }
    if args.stage.classifies() {
        println!("   Identifiers: {}", stats.identifiers);
    }

    // Performance stats
    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_time.as_secs_f64());

    Ok(())
}

/// Content of one output file.
enum Artifact<'a> {
    Cleaned(&'a CleanedText),
    Result(&'a ClassificationResult),
}

/// Names every artifact of the run, failing on the first name used twice.
fn plan_artifacts<'a>(
    report: &'a BatchReport,
    inputs: &[String],
    format: OutputFormat,
) -> Result<Vec<(String, Artifact<'a>)>, TicketpackError> {
    let mut names = ArtifactNames::new();
    let mut artifacts = Vec::new();

    for (file, path) in report.files.iter().zip(inputs) {
        if let Some(cleaned) = &file.cleaned {
            let name = names.reserve(artifact_name("cleaned", path, OutputFormat::Text))?;
            artifacts.push((name, Artifact::Cleaned(cleaned)));
        }
        if let Some(result) = &file.result {
            let name = names.reserve(artifact_name("processed", path, format))?;
            artifacts.push((name, Artifact::Result(result)));
        }
    }

    if let Some(combined) = &report.combined {
        let name = names.reserve(combined_artifact_name(format))?;
        artifacts.push((name, Artifact::Result(combined)));
    }

    Ok(artifacts)
}

/// Reads one input as bytes and decodes it as UTF-8.
fn read_input(path: &str) -> Result<InputFile, TicketpackError> {
    let bytes = fs::read(path)?;
    let content = String::from_utf8(bytes).map_err(|e| TicketpackError::undecodable(path, e))?;
    Ok(InputFile::new(path, content))
}
