//! CLI contract tests for the `faqbot` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;

fn bundled_seed() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/faq.json")
}

/// Write a config whose database lives next to it and whose seed is `seed`.
fn write_config(dir: &Path, seed: &Path) -> PathBuf {
    let path = dir.join("config.toml");
    let contents = format!(
        "[catalog]\ndatabase = \"faq.db\"\nseed_path = {seed:?}\n\n[search]\nkeyword_match = \"substring\"\n",
        seed = seed.display().to_string()
    );
    fs::write(&path, contents).expect("should write config");
    path
}

fn faqbot(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("faqbot").expect("binary should build");
    cmd.env_remove("RUST_LOG").arg("--config").arg(config);
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("command should run");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout should be utf-8")
}

#[test]
fn seed_populates_once() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let config = write_config(tmp.path(), &bundled_seed());

    let first = stdout_of(faqbot(&config).arg("seed"));
    assert_eq!(first.trim(), "seeded 13 records");
    assert!(tmp.path().join("faq.db").exists());

    let second = stdout_of(faqbot(&config).arg("seed"));
    assert_eq!(
        second.trim(),
        "catalog already holds 13 records, seed not loaded"
    );
}

#[test]
fn seed_with_missing_file_fails() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let config = write_config(tmp.path(), &tmp.path().join("absent.json"));

    faqbot(&config).arg("seed").assert().failure();
}

#[test]
fn seed_file_flag_overrides_config() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let config = write_config(tmp.path(), &tmp.path().join("absent.json"));

    let out = stdout_of(
        faqbot(&config)
            .arg("seed")
            .arg("--file")
            .arg(bundled_seed()),
    );
    assert_eq!(out.trim(), "seeded 13 records");
}

#[test]
fn search_prints_matching_questions() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let config = write_config(tmp.path(), &bundled_seed());

    let out = stdout_of(faqbot(&config).args(["search", "visa", "--lang", "en"]));
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("\tVISA\tWhich visa do I need to study?"));

    let out = stdout_of(faqbot(&config).args(["search", "виза"]));
    assert!(out.contains("Какая виза нужна для учёбы?"));
}

#[test]
fn search_without_matches_says_so() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let config = write_config(tmp.path(), &bundled_seed());

    let out = stdout_of(faqbot(&config).args(["search", "zzzz", "--lang", "en"]));
    assert_eq!(out.trim(), "no matches");
}

#[test]
fn search_rejects_unknown_language() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let config = write_config(tmp.path(), &bundled_seed());

    faqbot(&config)
        .args(["search", "visa", "--lang", "it"])
        .assert()
        .failure();
}

#[test]
fn chat_answers_on_the_console() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let config = write_config(tmp.path(), &bundled_seed());

    // Pick English, then ask by free text.
    let out = stdout_of(
        faqbot(&config)
            .arg("chat")
            .write_stdin("2\nWhich visa\nquit\n"),
    );
    assert!(out.contains("Please select your language"));
    assert!(out.contains("Main Menu:"));
    assert!(out.contains("A national type D study visa."));
}

#[test]
fn start_without_token_fails() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let config = write_config(tmp.path(), &bundled_seed());

    faqbot(&config)
        .env_remove("FAQBOT_TELEGRAM_TOKEN")
        .arg("start")
        .assert()
        .failure();
}
