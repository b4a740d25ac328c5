use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SCHEDULE: &str = r#"[
  {"code": "CS101", "name": "Intro", "date": "01.01.2040", "time": "09:00", "classes": "A1, B2"},
  {"code": "MATH200", "name": "Calculus", "date": "15.12.2039", "time": "13:30"},
  {"code": "OLD1", "name": "History", "date": "01.01.2020", "time": "08:00"}
]"#;

/// Helper to convert path to forward slashes for TOML compatibility on Windows
fn path_to_toml_string(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}

/// Config pointing storage into the temp dir, plus a schedule file next to it
fn setup(temp_dir: &TempDir) -> (PathBuf, PathBuf) {
    let config_path = temp_dir.path().join("exam-countdown.toml");
    let storage_path = temp_dir.path().join("storage.json");
    fs::write(
        &config_path,
        format!(
            "[storage]\npath = \"{}\"\n\n[display]\ntick_interval_ms = 50\n",
            path_to_toml_string(&storage_path)
        ),
    )
    .unwrap();

    let schedule_path = temp_dir.path().join("exams.json");
    fs::write(&schedule_path, SCHEDULE).unwrap();
    (config_path, schedule_path)
}

fn run(config_path: &Path, args: &[&str]) -> assert_cmd::assert::Assert {
    cargo::cargo_bin_cmd!("exam-countdown")
        .env("NO_COLOR", "1")
        .arg("--config")
        .arg(config_path)
        .args(args)
        .assert()
}

fn stored(temp_dir: &TempDir) -> serde_json::Map<String, serde_json::Value> {
    let content = fs::read_to_string(temp_dir.path().join("storage.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn test_config_init() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("exam-countdown.toml");

    cargo::cargo_bin_cmd!("exam-countdown")
        .args(["config", "init", "--path", config_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file created"));

    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[storage]"));
    assert!(content.contains("tick_interval_ms = 1000"));
}

#[test]
fn test_import_select_show_export_reset() {
    let temp_dir = TempDir::new().unwrap();
    let (config_path, schedule_path) = setup(&temp_dir);

    run(&config_path, &["import", "file", schedule_path.to_str().unwrap()])
        .success()
        .stdout(predicate::str::contains("Imported 3 exam(s) from file."))
        .stdout(predicate::str::contains("exam-countdown select"));

    let slots = stored(&temp_dir);
    assert!(slots.contains_key("customExamsData"));
    assert!(!slots.contains_key("selectedExams"));

    run(&config_path, &["select", "--codes", "CS101,OLD1"])
        .success()
        .stdout(predicate::str::contains("Tracking 2 exam(s)."));

    run(&config_path, &["show"])
        .success()
        .stdout(predicate::str::contains("## CS101-Intro"))
        .stdout(predicate::str::contains("Date: 1 January 2040 at 09:00"))
        .stdout(predicate::str::contains("Classes: A1, B2"))
        .stdout(predicate::str::contains("Exam time has passed."))
        .stdout(predicate::str::contains("MATH200").not());

    let csv_path = temp_dir.path().join("out/calendar.csv");
    run(&config_path, &["export", "--output", csv_path.to_str().unwrap()])
        .success()
        .stdout(predicate::str::contains("Exported 2 exam(s)"));
    assert_eq!(
        fs::read_to_string(&csv_path).unwrap(),
        "Subject, Start date, Start time, Location\n\
         \"OLD1-History\",\"01/01/2020\",\"08:00 AM\",\"\"\n\
         \"CS101-Intro\",\"01/01/2040\",\"09:00 AM\",\"A1, B2\"\n"
    );

    run(&config_path, &["reset"])
        .success()
        .stdout(predicate::str::contains("Schedule and selection cleared."));
    assert!(stored(&temp_dir).is_empty());

    run(&config_path, &["show"])
        .success()
        .stdout(predicate::str::contains("No schedule loaded"));
}

#[test]
fn test_import_clears_previous_selection() {
    let temp_dir = TempDir::new().unwrap();
    let (config_path, schedule_path) = setup(&temp_dir);

    run(&config_path, &["import", "file", schedule_path.to_str().unwrap()]).success();
    run(&config_path, &["select", "--all"]).success();
    assert!(stored(&temp_dir).contains_key("selectedExams"));

    run(&config_path, &["import", "file", schedule_path.to_str().unwrap()]).success();
    assert!(!stored(&temp_dir).contains_key("selectedExams"));

    run(&config_path, &["show"])
        .success()
        .stdout(predicate::str::contains("No exams chosen yet"));
}

#[test]
fn test_import_paste_fenced_text_and_stdin() {
    let temp_dir = TempDir::new().unwrap();
    let (config_path, _) = setup(&temp_dir);

    let fenced = format!("```json\n{}\n```", SCHEDULE);
    run(&config_path, &["import", "paste", "--text", &fenced])
        .success()
        .stdout(predicate::str::contains("Imported 3 exam(s) from pasted text."));

    cargo::cargo_bin_cmd!("exam-countdown")
        .arg("--config")
        .arg(&config_path)
        .args(["import", "paste"])
        .write_stdin(format!("```\n{}\n```\n", SCHEDULE))
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 3 exam(s)"));
}

#[test]
fn test_invalid_paste_leaves_schedule_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let (config_path, schedule_path) = setup(&temp_dir);

    run(&config_path, &["import", "file", schedule_path.to_str().unwrap()]).success();
    run(&config_path, &["select", "--codes", "CS101"]).success();

    run(&config_path, &["import", "paste", "--text", "here are your exams!"])
        .failure()
        .stderr(predicate::str::starts_with("Error: Format error"));

    run(
        &config_path,
        &["import", "paste", "--text", r#"[{"code": "X1", "name": "No time", "date": "01.01.2040"}]"#],
    )
    .failure()
    .stderr(predicate::str::contains("missing the 'time' field"));

    run(&config_path, &["show"])
        .success()
        .stdout(predicate::str::contains("## CS101-Intro"));
}

#[test]
fn test_select_none_and_unknown_code() {
    let temp_dir = TempDir::new().unwrap();
    let (config_path, schedule_path) = setup(&temp_dir);

    run(&config_path, &["select", "--all"])
        .failure()
        .stderr(predicate::str::contains("No schedule loaded"));

    run(&config_path, &["import", "file", schedule_path.to_str().unwrap()]).success();

    run(&config_path, &["select", "--codes", "NOPE"])
        .failure()
        .stderr(predicate::str::contains("Unknown exam code 'NOPE'"));

    run(&config_path, &["select", "--none"]).success();
    run(&config_path, &["show"])
        .success()
        .stdout(predicate::str::contains("No exams selected"));

    run(&config_path, &["export"])
        .failure()
        .stderr(predicate::str::contains("No exams selected to export"));
}

#[test]
fn test_interactive_select_from_stdin() {
    let temp_dir = TempDir::new().unwrap();
    let (config_path, schedule_path) = setup(&temp_dir);
    run(&config_path, &["import", "file", schedule_path.to_str().unwrap()]).success();

    // Sorted by exam time: OLD1, MATH200, CS101
    cargo::cargo_bin_cmd!("exam-countdown")
        .env("NO_COLOR", "1")
        .arg("--config")
        .arg(&config_path)
        .arg("select")
        .write_stdin("2\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. OLD1 - History (01.01.2020)"))
        .stdout(predicate::str::contains("Tracking 1 exam(s)."))
        .stdout(predicate::str::contains("## MATH200-Calculus"));

    cargo::cargo_bin_cmd!("exam-countdown")
        .arg("--config")
        .arg(&config_path)
        .arg("select")
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Selection unchanged."));
}

#[test]
fn test_stale_selection_notice() {
    let temp_dir = TempDir::new().unwrap();
    let (config_path, _) = setup(&temp_dir);

    let mut slots = serde_json::Map::new();
    slots.insert("customExamsData".into(), SCHEDULE.into());
    slots.insert("selectedExams".into(), r#"["GHOST"]"#.into());
    fs::write(
        temp_dir.path().join("storage.json"),
        serde_json::to_string(&slots).unwrap(),
    )
    .unwrap();

    run(&config_path, &["show"])
        .success()
        .stdout(predicate::str::contains("doesn't match the current exam list"));
}

#[test]
fn test_watch_runs_requested_ticks() {
    let temp_dir = TempDir::new().unwrap();
    let (config_path, schedule_path) = setup(&temp_dir);
    run(&config_path, &["import", "file", schedule_path.to_str().unwrap()]).success();
    run(&config_path, &["select", "--codes", "CS101"]).success();

    run(&config_path, &["watch", "--ticks", "2"])
        .success()
        .stdout(predicate::str::contains("## CS101-Intro"));
}

#[test]
fn test_watch_returns_when_every_exam_has_passed() {
    let temp_dir = TempDir::new().unwrap();
    let (config_path, schedule_path) = setup(&temp_dir);
    run(&config_path, &["import", "file", schedule_path.to_str().unwrap()]).success();
    run(&config_path, &["select", "--codes", "OLD1"]).success();

    cargo::cargo_bin_cmd!("exam-countdown")
        .env("NO_COLOR", "1")
        .arg("--config")
        .arg(&config_path)
        .arg("watch")
        .timeout(std::time::Duration::from_secs(20))
        .assert()
        .success()
        .stdout(predicate::str::contains("Exam time has passed."));
}

#[test]
fn test_watch_without_selection_returns() {
    let temp_dir = TempDir::new().unwrap();
    let (config_path, _) = setup(&temp_dir);

    run(&config_path, &["watch"])
        .success()
        .stdout(predicate::str::contains("No schedule loaded"));
}

#[test]
fn test_remote_import_requires_endpoint() {
    let temp_dir = TempDir::new().unwrap();
    let (config_path, _) = setup(&temp_dir);
    let document = temp_dir.path().join("schedule.pdf");
    fs::write(&document, b"%PDF-1.7").unwrap();

    run(&config_path, &["import", "remote", document.to_str().unwrap()])
        .failure()
        .stderr(predicate::str::contains("No conversion endpoint configured"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let temp_dir = TempDir::new().unwrap();

    run(&temp_dir.path().join("missing.toml"), &["show"])
        .failure()
        .stderr(predicate::str::contains("Run 'exam-countdown config init'"));
}

#[test]
fn test_prompt_prints_template() {
    cargo::cargo_bin_cmd!("exam-countdown")
        .arg("prompt")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"code\""))
        .stdout(predicate::str::contains("DD.MM.YYYY"));
}
