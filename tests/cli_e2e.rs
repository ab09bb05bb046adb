//! End-to-end CLI tests for ticketpack.
//!
//! These tests run the actual binary against temporary chat exports and
//! check the written artifacts.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

const DAY1: &str = "[08:00, 1/2/2024] Tina: Noted, checking now
[08:02, 1/2/2024] Ali Site: Full capping at KLCC
Q123456 and TM12345
[08:05, 1/2/2024] Martina: link down 1-123456789 pls check
[08:07, 1/2/2024] Dhef: ok Q123456";

const DAY2: &str = "[1/2/2024 9:00 AM] Ali Site: full capping again Q123456 Q654321";

fn setup_fixtures() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("day1.txt"), DAY1).unwrap();
    fs::write(dir.path().join("day2.txt"), DAY2).unwrap();
    fs::write(dir.path().join("binary.txt"), [0xff, 0xfe, 0x00, 0x41]).unwrap();
    dir
}

fn ticketpack_cmd() -> Command {
    let cmd = std::process::Command::new(env!("CARGO_BIN_EXE_ticketpack"));
    Command::from_std(cmd)
}

fn input(dir: &TempDir, name: &str) -> String {
    dir.path().join(name).to_str().unwrap().to_string()
}

fn out_dir(dir: &TempDir) -> String {
    dir.path().join("out").to_str().unwrap().to_string()
}

fn read(dir: &TempDir, name: &str) -> String {
    fs::read_to_string(Path::new(&out_dir(dir)).join(name)).unwrap()
}

// ============================================================================
// Stages
// ============================================================================

mod stages {
    use super::*;

    #[test]
    fn test_clean_stage() {
        let fixtures = setup_fixtures();

        ticketpack_cmd()
            .args(["clean", &input(&fixtures, "day1.txt"), "-o", &out_dir(&fixtures)])
            .assert()
            .success()
            .stdout(predicate::str::contains("Done"))
            .stdout(predicate::str::contains("Redacted"));

        let cleaned = read(&fixtures, "cleaned_day1.txt");
        assert!(!cleaned.contains("noted"));
        assert!(!cleaned.contains("dhef"));
        assert!(cleaned.contains("martina: link down"));
        assert!(!Path::new(&out_dir(&fixtures)).join("processed_day1.txt").exists());
    }

    #[test]
    fn test_classify_stage_uses_raw_text() {
        let fixtures = setup_fixtures();

        ticketpack_cmd()
            .args(["cl", &input(&fixtures, "day1.txt"), "-o", &out_dir(&fixtures)])
            .assert()
            .success();

        let processed = read(&fixtures, "processed_day1.txt");
        assert!(processed.starts_with("Full Capping: Q123456, TM12345"));
        assert!(!Path::new(&out_dir(&fixtures)).join("cleaned_day1.txt").exists());
    }

    #[test]
    fn test_pipeline_stage() {
        let fixtures = setup_fixtures();

        ticketpack_cmd()
            .args(["pipeline", &input(&fixtures, "day1.txt"), "-o", &out_dir(&fixtures)])
            .assert()
            .success()
            .stdout(predicate::str::contains("Identifiers: 3"));

        assert_eq!(
            read(&fixtures, "processed_day1.txt"),
            "Full Capping: q123456, tm12345\n\
             Other: 1-123456789 (martina: link down 1-123456789 pls check)"
        );
        assert!(Path::new(&out_dir(&fixtures)).join("cleaned_day1.txt").exists());
    }

    #[test]
    fn test_custom_names() {
        let fixtures = setup_fixtures();

        ticketpack_cmd()
            .args([
                "p",
                &input(&fixtures, "day1.txt"),
                "-o",
                &out_dir(&fixtures),
                "--names",
                "Martina",
            ])
            .assert()
            .success();

        let cleaned = read(&fixtures, "cleaned_day1.txt");
        assert!(cleaned.contains("tina: noted"));
        assert!(!cleaned.contains("martina"));
    }
}

// ============================================================================
// Output Formats
// ============================================================================

mod formats {
    use super::*;

    #[test]
    fn test_json_output() {
        let fixtures = setup_fixtures();

        ticketpack_cmd()
            .args(["p", &input(&fixtures, "day1.txt"), "-o", &out_dir(&fixtures), "-f", "json"])
            .assert()
            .success();

        let json: serde_json::Value =
            serde_json::from_str(&read(&fixtures, "processed_day1.json")).unwrap();
        assert_eq!(json[0]["category"], "Full Capping");
        assert_eq!(json[1]["items"][0]["identifier"], "1-123456789");
    }

    #[test]
    fn test_csv_output() {
        let fixtures = setup_fixtures();

        ticketpack_cmd()
            .args(["p", &input(&fixtures, "day1.txt"), "-o", &out_dir(&fixtures), "--format", "csv"])
            .assert()
            .success();

        let csv = read(&fixtures, "processed_day1.csv");
        assert!(csv.starts_with("Category;Identifier;Message"));
        assert!(csv.contains("Full Capping;q123456;"));
    }

    #[test]
    fn test_skip_empty() {
        let fixtures = setup_fixtures();

        ticketpack_cmd()
            .args(["p", &input(&fixtures, "day2.txt"), "-o", &out_dir(&fixtures), "--skip-empty"])
            .assert()
            .success();

        assert_eq!(read(&fixtures, "processed_day2.txt"), "Full Capping: q123456, q654321");
    }
}

// ============================================================================
// Multiple Inputs
// ============================================================================

mod batch {
    use super::*;

    fn run(fixtures: &TempDir, extra: &[&str]) {
        let day1 = input(fixtures, "day1.txt");
        let day2 = input(fixtures, "day2.txt");
        let out = out_dir(fixtures);
        let mut args = vec!["p", day1.as_str(), day2.as_str(), "-o", out.as_str()];
        args.extend_from_slice(extra);

        ticketpack_cmd().args(&args).assert().success();
    }

    #[test]
    fn test_one_artifact_per_input() {
        let fixtures = setup_fixtures();
        run(&fixtures, &[]);

        assert!(read(&fixtures, "processed_day1.txt").contains("q123456"));
        assert!(read(&fixtures, "processed_day2.txt").contains("q654321"));
        assert!(!Path::new(&out_dir(&fixtures)).join("processed_combined.txt").exists());
    }

    #[test]
    fn test_combined_per_file_dedup() {
        let fixtures = setup_fixtures();
        run(&fixtures, &["--combined"]);

        assert!(
            read(&fixtures, "processed_combined.txt")
                .starts_with("Full Capping: q123456, tm12345, q123456, q654321")
        );
    }

    #[test]
    fn test_combined_shared_claims() {
        let fixtures = setup_fixtures();
        run(&fixtures, &["--combined", "--shared-claims"]);

        assert!(
            read(&fixtures, "processed_combined.txt")
                .starts_with("Full Capping: q123456, tm12345, q654321\n")
        );
        assert_eq!(read(&fixtures, "processed_day2.txt"), "Full Capping: q654321\nOther: ");
    }
}

// ============================================================================
// Knowledge Base
// ============================================================================

mod knowledge_base {
    use super::*;

    #[test]
    fn test_custom_patterns_file() {
        let fixtures = setup_fixtures();
        let kb = fixtures.path().join("kb.json");
        fs::write(
            &kb,
            r#"{ "catch_all": "Misc", "categories": [ { "name": "Link Down", "patterns": ["\\blink down\\b"] } ] }"#,
        )
        .unwrap();

        ticketpack_cmd()
            .args([
                "p",
                &input(&fixtures, "day1.txt"),
                "-o",
                &out_dir(&fixtures),
                "--patterns",
                kb.to_str().unwrap(),
            ])
            .assert()
            .success();

        let processed = read(&fixtures, "processed_day1.txt");
        assert!(processed.starts_with("Link Down: 1-123456789\nMisc: "));
    }

    #[test]
    fn test_invalid_patterns_file() {
        let fixtures = setup_fixtures();
        let kb = fixtures.path().join("kb.json");
        fs::write(&kb, r#"{ "categories": [ { "name": "Bad", "patterns": ["(oops"] } ] }"#).unwrap();

        ticketpack_cmd()
            .args(["p", &input(&fixtures, "day1.txt"), "--patterns", kb.to_str().unwrap()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid pattern for 'Bad'"));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

mod errors {
    use super::*;

    #[test]
    fn test_missing_input() {
        ticketpack_cmd()
            .args(["p", "/definitely/not/here.txt"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error"));
    }

    #[test]
    fn test_non_utf8_input() {
        let fixtures = setup_fixtures();

        ticketpack_cmd()
            .args(["p", &input(&fixtures, "binary.txt"), "-o", &out_dir(&fixtures)])
            .assert()
            .failure()
            .stderr(predicate::str::contains("UTF-8"))
            .stderr(predicate::str::contains("binary.txt"));
    }

    #[test]
    fn test_input_named_combined_collides() {
        let fixtures = setup_fixtures();
        fs::write(fixtures.path().join("combined.txt"), DAY2).unwrap();

        ticketpack_cmd()
            .args([
                "p",
                &input(&fixtures, "day1.txt"),
                &input(&fixtures, "combined.txt"),
                "-o",
                &out_dir(&fixtures),
                "--combined",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("'processed_combined.txt' would be written twice"));

        assert!(!Path::new(&out_dir(&fixtures)).exists());
    }

    #[test]
    fn test_same_file_name_in_two_directories() {
        let fixtures = setup_fixtures();
        let nested = fixtures.path().join("site");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("day1.txt"), DAY2).unwrap();

        ticketpack_cmd()
            .args([
                "clean",
                &input(&fixtures, "day1.txt"),
                nested.join("day1.txt").to_str().unwrap(),
                "-o",
                &out_dir(&fixtures),
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("'cleaned_day1.txt' would be written twice"));

        assert!(!Path::new(&out_dir(&fixtures)).join("cleaned_day1.txt").exists());
    }

    #[test]
    fn test_no_inputs() {
        ticketpack_cmd().args(["clean"]).assert().failure();
    }

    #[test]
    fn test_unknown_stage() {
        ticketpack_cmd()
            .args(["sort", "a.txt"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid value"));
    }

    #[test]
    fn test_help() {
        ticketpack_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("EXAMPLES"))
            .stdout(predicate::str::contains("--shared-claims"));
    }
}
