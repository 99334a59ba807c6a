use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn calmspace() -> Command {
    let mut cmd = Command::cargo_bin("calmspace").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn version_prints_package() {
    calmspace()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("calmspace_cli"))
        .stdout(predicate::str::contains(format!(
            "(calmspace_core {})",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn check_accepts_configured_key() {
    let dir = tempfile::tempdir().unwrap();
    let env_file = dir.path().join(".env");
    fs::write(&env_file, "GROQ_API_KEY=gsk_test_key\n").unwrap();

    calmspace()
        .args(["check", "--env-file"])
        .arg(&env_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Environment file configured"));
}

#[test]
fn check_rejects_placeholder_key() {
    let dir = tempfile::tempdir().unwrap();
    let env_file = dir.path().join(".env");
    fs::write(&env_file, "GROQ_API_KEY=your_groq_api_key_here\n").unwrap();

    calmspace()
        .args(["check", "--env-file"])
        .arg(&env_file)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Set GROQ_API_KEY"));
}

#[test]
fn check_copies_template_when_env_missing() {
    let dir = tempfile::tempdir().unwrap();
    let env_file = dir.path().join(".env");
    let template = dir.path().join("env_template.txt");
    fs::write(&template, "GROQ_API_KEY=your_groq_api_key_here\n").unwrap();

    calmspace()
        .args(["check", "--env-file"])
        .arg(&env_file)
        .arg("--template")
        .arg(&template)
        .assert()
        .failure();

    assert_eq!(
        fs::read_to_string(&env_file).unwrap(),
        "GROQ_API_KEY=your_groq_api_key_here\n"
    );
}

#[test]
fn check_fails_without_env_or_template() {
    let dir = tempfile::tempdir().unwrap();

    calmspace()
        .args(["check", "--env-file"])
        .arg(dir.path().join(".env"))
        .arg("--template")
        .arg(dir.path().join("missing.txt"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("not found"));
}

#[test]
fn classify_flags_high_crisis() {
    calmspace()
        .args(["classify", "I want to end my life", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"crisis_level\": \"high\""))
        .stdout(predicate::str::contains("\"escalation_needed\": true"));
}

#[test]
fn classify_prints_emotion() {
    calmspace()
        .args(["classify", "I feel so anxious and worried"])
        .assert()
        .success()
        .stdout(predicate::str::contains("emotion:      anxious"))
        .stdout(predicate::str::contains("crisis level: low"));
}

#[test]
fn dataset_stats_on_empty_dir() {
    let dir = tempfile::tempdir().unwrap();

    calmspace()
        .args(["dataset-stats", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_entries\": 0"));
}

#[test]
fn dataset_stats_counts_rows() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("MentalChat_6K.csv"),
        "input,output\nI cannot sleep,Try a routine.\nI cannot focus,Take breaks.\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("MentalChat_10K.csv"),
        "input,output\nWork is hard,Set boundaries.\n",
    )
    .unwrap();

    calmspace()
        .args(["dataset-stats", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mental\""))
        .stdout(predicate::str::contains("\"total_entries\": 3"));
}
