// tests/cli.rs
use assert_cmd::Command;
use predicates::prelude::*;
use std::error::Error;
use tempfile::tempdir;

/// Configuration that keeps the test runs deterministic: no subprocess
/// probe, so no baseline flag in the output.
const NO_PROBE_CONFIG: &str = "toolchain:\n  probe: false\n";

#[test]
fn test_makelog_help() -> Result<(), Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("makelog")?;
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage: makelog"));
    Ok(())
}

#[test]
fn test_extracts_events_from_a_build_log() -> Result<(), Box<dyn Error>> {
    let work_dir = tempdir()?;
    let log_path = work_dir.path().join("build.log");
    let config_path = work_dir.path().join("makelog.yml");

    std::fs::write(
        &log_path,
        "make[1]: Entering directory '/build/sub'\n\
         gcc -Iinc -DFOO -c main.c -o main.o\n",
    )?;
    std::fs::write(&config_path, NO_PROBE_CONFIG)?;

    let mut cmd = Command::cargo_bin("makelog")?;
    cmd.current_dir(work_dir.path());
    cmd.args(["-c", "makelog.yml", "-o", "-", "build.log"]);

    let assert = cmd.assert().success();
    let output = assert.get_output();
    let events: serde_json::Value = serde_json::from_slice(&output.stdout)?;

    let events = events.as_array().expect("output should be a JSON array");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["directory"], "/build/sub");
    assert_eq!(events[0]["file"], "/build/sub/main.c");
    assert_eq!(
        events[0]["flags"],
        serde_json::json!(["-I/build/sub/inc", "-DFOO"])
    );

    work_dir.close()?;
    Ok(())
}

#[test]
fn test_writes_the_event_file() -> Result<(), Box<dyn Error>> {
    let work_dir = tempdir()?;
    std::fs::write(
        work_dir.path().join("build.log"),
        "clang -DBAR -c module.c\n",
    )?;
    std::fs::write(work_dir.path().join("makelog.yml"), NO_PROBE_CONFIG)?;

    let mut cmd = Command::cargo_bin("makelog")?;
    cmd.current_dir(work_dir.path());
    cmd.args(["-c", "makelog.yml", "build.log"]);
    cmd.assert().success();

    let written = std::fs::read(work_dir.path().join("events.json"))?;
    let events: serde_json::Value = serde_json::from_slice(&written)?;
    assert_eq!(events.as_array().map(Vec::len), Some(1));

    work_dir.close()?;
    Ok(())
}

#[test]
fn test_repeated_log_files_yield_events_once() -> Result<(), Box<dyn Error>> {
    let work_dir = tempdir()?;
    std::fs::write(work_dir.path().join("build.log"), "gcc -DFOO -c main.c\n")?;
    std::fs::write(work_dir.path().join("makelog.yml"), NO_PROBE_CONFIG)?;

    let mut cmd = Command::cargo_bin("makelog")?;
    cmd.current_dir(work_dir.path());
    cmd.args(["-c", "makelog.yml", "-o", "-", "build.log", "build.log"]);

    let assert = cmd.assert().success();
    let events: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(events.as_array().map(Vec::len), Some(1));

    work_dir.close()?;
    Ok(())
}

#[test]
fn test_invalid_utf8_log_fails_but_others_are_scanned() -> Result<(), Box<dyn Error>> {
    let work_dir = tempdir()?;
    std::fs::write(work_dir.path().join("bad.log"), b"gcc -c main.c\n\xff\xfe\n")?;
    std::fs::write(work_dir.path().join("good.log"), "gcc -DFOO -c good.c\n")?;
    std::fs::write(work_dir.path().join("makelog.yml"), NO_PROBE_CONFIG)?;

    let mut cmd = Command::cargo_bin("makelog")?;
    cmd.current_dir(work_dir.path());
    cmd.args(["-c", "makelog.yml", "-o", "-", "bad.log", "good.log"]);

    let assert = cmd
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad.log"));
    let events: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;

    let events = events.as_array().expect("output should be a JSON array");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["file"], "./good.c");

    work_dir.close()?;
    Ok(())
}

#[test]
fn test_missing_log_file_fails_with_its_name() -> Result<(), Box<dyn Error>> {
    let work_dir = tempdir()?;
    std::fs::write(work_dir.path().join("makelog.yml"), NO_PROBE_CONFIG)?;

    let mut cmd = Command::cargo_bin("makelog")?;
    cmd.current_dir(work_dir.path());
    cmd.args(["-c", "makelog.yml", "-o", "-", "nonexistent.log"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("nonexistent.log"));

    work_dir.close()?;
    Ok(())
}
