use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("badgekit").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("badgekit"));
}

#[test]
fn format_prints_compact_values() {
    let mut cmd = Command::cargo_bin("badgekit").unwrap();
    cmd.args(["format", "1500"]);
    cmd.assert().success().stdout("1.50K\n");

    let mut cmd = Command::cargo_bin("badgekit").unwrap();
    cmd.args(["format", "2048", "--bytes"]);
    cmd.assert().success().stdout("2.00 KB\n");
}

#[test]
fn downloads_from_csv_with_options() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("dl.csv");
    fs::write(
        &input,
        "day,downloads\n2024-01-01,1000\n2024-01-02,500\n2024-01-03,0\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("badgekit").unwrap();
    cmd.args(["downloads", "--name", "left-pad", "--opt", "label={total} dl"])
        .arg("--input")
        .arg(&input);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"label\": \"1.50K dl\""))
        .stdout(predicate::str::contains("left-pad: 1500 downloads"));
}

#[test]
fn missing_profile_input_gives_placeholder() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("profile.json");

    let mut cmd = Command::cargo_bin("badgekit").unwrap();
    cmd.arg("profile").arg("--out").arg(&out);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Saved layout"));

    let body = fs::read_to_string(&out).unwrap();
    assert!(body.contains("\"kind\": \"invalid\""));
    assert!(body.contains("\"label\": \"invalid\""));
}

#[test]
fn contributions_writes_preview() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("cal.csv");
    let mut csv = String::from("date,value\n");
    for d in 1..=29 {
        csv.push_str(&format!("2024-02-{d:02},{}\n", d % 5));
    }
    for d in 1..=10 {
        csv.push_str(&format!("2024-03-{d:02},{}\n", d % 3));
    }
    fs::write(&input, csv).unwrap();
    let svg = dir.path().join("preview.svg");

    let mut cmd = Command::cargo_bin("badgekit").unwrap();
    cmd.args(["contributions", "--name", "octo", "--opt", "width=400"])
        .arg("--input")
        .arg(&input)
        .arg("--preview")
        .arg(&svg);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("octo - 70 contributions past year"));
    assert!(fs::read_to_string(&svg).unwrap().contains("<svg"));
}

#[test]
fn unreadable_input_fails() {
    let mut cmd = Command::cargo_bin("badgekit").unwrap();
    cmd.args(["languages", "--input", "/definitely/not/here.json"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("opening"));
}
