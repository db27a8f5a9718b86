use assert_cmd::Command as AssertCommand;
use indoc::indoc;
use serde_json::Value;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

const RECORDS: &str = indoc! {r#"
    [
        {
            "id": "app-1",
            "product_stage": "idea",
            "date_of_birth": "2001-02-03",
            "answers": { "problem": "Permits are slow", "team": "Two engineers" }
        },
        {
            "id": "app-2",
            "product_stage": "idea",
            "answers": { "idea_problem": "Late buses", "mrr": "$3k" }
        }
    ]
"#};

fn write_records(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("records.json");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_parse_writes_json_report() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_records(&temp_dir, RECORDS);
    let output_path = temp_dir.path().join("report.json");

    let output = Command::new(env!("CARGO_BIN_EXE_answermap"))
        .current_dir(temp_dir.path())
        .args([
            "parse",
            input.to_str().unwrap(),
            "--format",
            "json",
            "--output",
            output_path.to_str().unwrap(),
            "--today",
            "2024-06-15",
        ])
        .output()
        .expect("Failed to execute parse command");

    assert!(
        output.status.success(),
        "parse failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report: Value = serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    let results = report.as_array().expect("batch output should be an array");
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["recordId"], "app-1");
    assert_eq!(results[0]["detectedStage"], "IdeaStage");
    assert_eq!(results[0]["answeredQuestions"], 2);
    assert_eq!(results[0]["validationFlags"]["age"]["age"], 23);
    assert_eq!(results[1]["stageValidation"]["isValid"], false);
    assert_eq!(
        results[1]["stageValidation"]["violations"][0]["rawKey"],
        "mrr"
    );
}

#[test]
fn test_parse_single_record_prints_object() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_records(
        &temp_dir,
        r#"{"product_stage": "early revenue", "answers": {"traction": "40 customers"}}"#,
    );

    let output = Command::new(env!("CARGO_BIN_EXE_answermap"))
        .current_dir(temp_dir.path())
        .args(["parse", input.to_str().unwrap(), "-f", "json"])
        .output()
        .expect("Failed to execute parse command");

    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["detectedStage"], "EarlyRevenueStage");
    assert_eq!(report["totalQuestions"], 8);
}

#[test]
fn test_parse_uses_config_word_limit() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_records(
        &temp_dir,
        r#"{"product_stage": "idea", "answers": {"problem": "one two three four"}}"#,
    );
    fs::write(
        temp_dir.path().join(".answermap.toml"),
        "[validation]\nword_limit = 3\n\n[output]\ndefault_format = \"json\"\n",
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_answermap"))
        .current_dir(temp_dir.path())
        .args(["parse", input.to_str().unwrap()])
        .output()
        .expect("Failed to execute parse command");

    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        report["validationFlags"]["overLimitQuestions"][0],
        "idea_problem"
    );
}

#[test]
fn test_parse_rejects_non_record_input() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_records(&temp_dir, "42");

    AssertCommand::cargo_bin("answermap")
        .unwrap()
        .current_dir(temp_dir.path())
        .args(["parse", input.to_str().unwrap()])
        .assert()
        .failure();
}

#[test]
fn test_check_strict_fails_on_contamination() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_records(&temp_dir, RECORDS);

    AssertCommand::cargo_bin("answermap")
        .unwrap()
        .current_dir(temp_dir.path())
        .args(["check", input.to_str().unwrap()])
        .assert()
        .success();

    let assert = AssertCommand::cargo_bin("answermap")
        .unwrap()
        .current_dir(temp_dir.path())
        .args(["check", input.to_str().unwrap(), "--strict"])
        .assert()
        .failure();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("app-2"));
    assert!(stdout.contains("1 contaminated"));
}

#[test]
fn test_registry_lists_questions() {
    let output = Command::new(env!("CARGO_BIN_EXE_answermap"))
        .args(["registry", "--stage", "idea"])
        .output()
        .expect("Failed to execute registry command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[idea_problem]"));
    assert!(!stdout.contains("[early_revenue_problem]"));
}

#[test]
fn test_init_creates_config_once() {
    let temp_dir = TempDir::new().unwrap();

    let first = Command::new(env!("CARGO_BIN_EXE_answermap"))
        .current_dir(temp_dir.path())
        .arg("init")
        .output()
        .unwrap();
    assert!(first.status.success());
    assert!(temp_dir.path().join(".answermap.toml").exists());

    let second = Command::new(env!("CARGO_BIN_EXE_answermap"))
        .current_dir(temp_dir.path())
        .arg("init")
        .output()
        .unwrap();
    assert!(!second.status.success());
}
