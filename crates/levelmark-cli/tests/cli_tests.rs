//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn levelmark() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("levelmark").unwrap()
}

#[test]
fn validate_placement_bank() {
    levelmark()
        .arg("validate")
        .arg("--bank")
        .arg("../../banks/placement.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("18 questions"))
        .stdout(predicate::str::contains("All banks valid"));
}

#[test]
fn validate_quiz_bank() {
    levelmark()
        .arg("validate")
        .arg("--bank")
        .arg("../../banks/quiz.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("12 questions"))
        .stdout(predicate::str::contains("All banks valid"));
}

#[test]
fn validate_nonexistent_file() {
    levelmark()
        .arg("validate")
        .arg("--bank")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn assess_finish_immediately_places_at_a1() {
    levelmark()
        .arg("assess")
        .arg("--bank")
        .arg("../../banks/placement.toml")
        .arg("--seed")
        .arg("7")
        .write_stdin("f\ny\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("unanswered"))
        .stdout(predicate::str::contains("Your level: A1 (Beginner)"))
        .stdout(predicate::str::contains("Recommendations:"))
        .stdout(predicate::str::contains("Profile updated: level A1"));
}

#[test]
fn assess_can_be_abandoned() {
    levelmark()
        .arg("assess")
        .arg("--bank")
        .arg("../../banks/placement.toml")
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Assessment abandoned"));
}

#[test]
fn assess_rejects_empty_input() {
    levelmark()
        .arg("assess")
        .arg("--bank")
        .arg("../../banks/placement.toml")
        .write_stdin("\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Please type an option number or a command",
        ));
}

#[test]
fn assess_writes_a_report() {
    let dir = TempDir::new().unwrap();
    let report = dir.path().join("report.json");

    levelmark()
        .arg("assess")
        .arg("--bank")
        .arg("../../banks/placement.toml")
        .arg("--seed")
        .arg("1")
        .arg("--output")
        .arg(&report)
        .write_stdin("f\ny\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Report saved to"));

    assert!(report.exists());
    let content = std::fs::read_to_string(&report).unwrap();
    assert!(content.contains("\"level\": \"A1\""));
}

#[test]
fn quiz_runs_to_completion() {
    // 2 questions per level in the bank: 2 + 2 + 2 around B1.
    levelmark()
        .arg("quiz")
        .arg("--bank")
        .arg("../../banks/quiz.toml")
        .arg("--level")
        .arg("B1")
        .arg("--seed")
        .arg("3")
        .write_stdin("1\n1\n1\n1\n1\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Quiz at B1: 6 questions"))
        .stdout(predicate::str::contains("Difficulty so far:"))
        .stdout(predicate::str::contains("Quiz complete"))
        .stdout(predicate::str::contains("Feedback:"));
}

#[test]
fn quiz_rejects_bad_level() {
    levelmark()
        .arg("quiz")
        .arg("--bank")
        .arg("../../banks/quiz.toml")
        .arg("--level")
        .arg("Z9")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown CEFR level"));
}

#[test]
fn study_session_marks_words() {
    levelmark()
        .arg("study")
        .arg("--vocab")
        .arg("../../banks/vocabulary.toml")
        .arg("--level")
        .arg("B1")
        .arg("--seed")
        .arg("5")
        .write_stdin("f\nl\ni\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Studying 9 cards up to B1"))
        .stdout(predicate::str::contains("Marked"))
        .stdout(predicate::str::contains("1 learned"));
}

#[test]
fn read_shows_passages_and_preview() {
    levelmark()
        .arg("read")
        .arg("--passages")
        .arg("../../banks/passages.toml")
        .arg("--level")
        .arg("A2")
        .assert()
        .success()
        .stdout(predicate::str::contains("The New Café"))
        .stdout(predicate::str::contains("新咖啡馆"))
        .stdout(predicate::str::contains("Up next at B1"));
}

#[test]
fn read_falls_back_to_lower_level() {
    levelmark()
        .arg("read")
        .arg("--passages")
        .arg("../../banks/passages.toml")
        .arg("--level")
        .arg("C2")
        .assert()
        .success()
        .stdout(predicate::str::contains("No passages at C2; showing C1"));
}

#[test]
fn read_english_only_hides_translations() {
    levelmark()
        .arg("read")
        .arg("--passages")
        .arg("../../banks/passages.toml")
        .arg("--level")
        .arg("A1")
        .arg("--mode")
        .arg("english")
        .assert()
        .success()
        .stdout(predicate::str::contains("I get up at seven"))
        .stdout(predicate::str::contains("我七点起床").not());
}

#[test]
fn poster_renders_with_defaults() {
    levelmark()
        .arg("poster")
        .arg("--level")
        .arg("B2")
        .assert()
        .success()
        .stdout(predicate::str::contains("CEFR B2"))
        .stdout(predicate::str::contains("Word Collector"))
        .stdout(predicate::str::contains("CEFR-"));
}

#[test]
fn poster_uses_a_saved_report() {
    let dir = TempDir::new().unwrap();
    let report = dir.path().join("report.json");

    levelmark()
        .arg("assess")
        .arg("--bank")
        .arg("../../banks/placement.toml")
        .arg("--seed")
        .arg("1")
        .arg("--output")
        .arg(&report)
        .write_stdin("f\ny\n")
        .assert()
        .success();

    levelmark()
        .arg("poster")
        .arg("--report")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("CEFR A1"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    levelmark()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created banks/placement.toml"))
        .stdout(predicate::str::contains("Created banks/vocabulary.toml"));

    assert!(dir.path().join("banks/placement.toml").exists());
    assert!(dir.path().join("banks/quiz.toml").exists());
    assert!(dir.path().join("banks/vocabulary.toml").exists());
    assert!(dir.path().join("banks/passages.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    levelmark()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    levelmark()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    levelmark()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("CEFR placement and study companion"));
}

#[test]
fn version_output() {
    levelmark()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("levelmark"));
}
