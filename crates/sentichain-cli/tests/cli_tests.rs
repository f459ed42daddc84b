//! Integration tests for the sentichain CLI
//!
//! None of these need a running model: they cover offline commands,
//! configuration handling, and failures against a closed local port.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

// Nothing listens on the discard port in test environments.
const DEAD_LLM_URL: &str = "http://127.0.0.1:9";

fn sentichain_cmd(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sentichain").unwrap();
    cmd.env("SENTICHAIN_CONFIG", config_dir.path().join("config.yml"))
        .env("SENTICHAIN_LLM_URL", DEAD_LLM_URL)
        .env_remove("SENTICHAIN_LLM_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_extract_json() {
    let dir = TempDir::new().unwrap();
    sentichain_cmd(&dir)
        .args(["--format", "json", "extract", "Sure! Sentiment: Positive (Score: 0.87)"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"sentiment_label\": \"Positive\""))
        .stdout(predicate::str::contains("\"sentiment_score\": 0.87"));
}

#[test]
fn test_extract_no_match_prints_empty_object() {
    let dir = TempDir::new().unwrap();
    sentichain_cmd(&dir)
        .args(["extract", "I would say it is fairly positive."])
        .assert()
        .success()
        .stdout("{}\n");
}

#[test]
fn test_extract_with_label_map_and_no_score() {
    let dir = TempDir::new().unwrap();
    sentichain_cmd(&dir)
        .args([
            "extract",
            "Sentiment: Very Negative (Score: 0.05)",
            "--label-map",
            "Very Negative=VNEG",
            "--no-score",
        ])
        .assert()
        .success()
        .stdout("{\"sentiment_label\":\"VNEG\"}\n");
}

#[test]
fn test_extract_reads_stdin() {
    let dir = TempDir::new().unwrap();
    sentichain_cmd(&dir)
        .args(["extract", "-"])
        .write_stdin("line one\nSentiment: Neutral (Score: 0.5)\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Neutral"));
}

#[test]
fn test_extract_malformed_score_fails() {
    let dir = TempDir::new().unwrap();
    sentichain_cmd(&dir)
        .args(["extract", "Sentiment: Positive (Score: 1.2.3)"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid sentiment score"));
}

#[test]
fn test_extract_uses_config_label_mapping() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.yml"),
        "sentiment:\n  label_mapping:\n    Positive: good\n",
    )
    .unwrap();

    sentichain_cmd(&dir)
        .args(["extract", "Sentiment: Positive (Score: 0.9)"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"sentiment_label\":\"good\""));
}

#[test]
fn test_analyze_unsupported_format() {
    let dir = TempDir::new().unwrap();
    sentichain_cmd(&dir)
        .args(["analyze", "great movie", "--output-format", "xml"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Unsupported output format: xml"));
}

#[test]
fn test_analyze_without_text() {
    let dir = TempDir::new().unwrap();
    sentichain_cmd(&dir)
        .arg("analyze")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("No text given"));
}

#[test]
fn test_analyze_unreachable_model() {
    let dir = TempDir::new().unwrap();
    sentichain_cmd(&dir)
        .args(["analyze", "great movie", "--timeout", "5"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Model invocation error"));
}

#[test]
fn test_analyze_batch_reports_errors_inline() {
    let dir = TempDir::new().unwrap();
    sentichain_cmd(&dir)
        .args(["--format", "json", "analyze", "first", "second", "--timeout", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"error\"").count(2));
}

#[test]
fn test_prompt_renders_default_template() {
    let dir = TempDir::new().unwrap();
    sentichain_cmd(&dir)
        .args(["prompt", "The battery lasts all day."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Text: The battery lasts all day."))
        .stdout(predicate::str::contains("Sentiment: <label> (Score: <score>)"));
}

#[test]
fn test_prompt_file_without_slot() {
    let dir = TempDir::new().unwrap();
    let prompt_path = dir.path().join("prompt.txt");
    fs::write(&prompt_path, "Classify the mood.").unwrap();

    sentichain_cmd(&dir)
        .args(["prompt", "hello", "--prompt-file", prompt_path.to_str().unwrap()])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("{question}"));
}

#[test]
fn test_config_init_then_show() {
    let dir = TempDir::new().unwrap();

    sentichain_cmd(&dir)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yml"));
    assert!(dir.path().join("config.yml").exists());

    sentichain_cmd(&dir)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    sentichain_cmd(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("output_format: json"))
        .stdout(predicate::str::contains("input_key: question"));
}

#[test]
fn test_unknown_config_field_rejected() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.yml"), "sentiment:\n  colour: blue\n").unwrap();

    sentichain_cmd(&dir)
        .args(["config", "show"])
        .assert()
        .failure()
        .code(3);
}
