use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;
fn textsweep() -> Command {
    Command::cargo_bin("textsweep").unwrap()
}
#[test]
fn collects_into_output_file() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    fs::create_dir(&src).unwrap();
    fs::write(src.join("a.txt"), "alpha").unwrap();
    fs::write(src.join("b.bin"), [0u8, 159, 146, 150]).unwrap();
    let out = dir.path().join("out.txt");
    textsweep()
        .arg(&src)
        .arg("-o")
        .arg(&out)
        .arg("--no-progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("Files processed:  1"))
        .stdout(predicate::str::contains("Skipped (binary-like): 1"))
        .stdout(predicate::str::contains("Done."));
    let content = fs::read_to_string(&out).unwrap();
    assert!(content.contains("\n\n----\nsrc/a.txt\nalpha"));
    assert!(!content.contains("b.bin"));
}
#[test]
fn empty_input_exits_cleanly() {
    let dir = tempdir().unwrap();
    let empty = dir.path().join("empty");
    fs::create_dir(&empty).unwrap();
    textsweep()
        .arg(&empty)
        .arg("-o")
        .arg(dir.path().join("out.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("No files found to process. Exiting."));
    assert!(!dir.path().join("out.txt").exists());
}
#[test]
fn debug_discovery_writes_nothing() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    fs::create_dir(&src).unwrap();
    fs::write(src.join("a.txt"), "alpha").unwrap();
    textsweep()
        .arg(&src)
        .arg("-o")
        .arg(dir.path().join("out.txt"))
        .arg("--debug-discovery")
        .assert()
        .success()
        .stdout(predicate::str::contains("WOULD-PROCESS:"))
        .stdout(predicate::str::contains("a.txt"));
    assert!(!dir.path().join("out.txt").exists());
}
#[test]
fn output_directory_gets_timestamped_file() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    let outdir = dir.path().join("outdir");
    fs::create_dir(&src).unwrap();
    fs::create_dir(&outdir).unwrap();
    fs::write(src.join("a.txt"), "alpha").unwrap();
    textsweep()
        .arg(&src)
        .arg("-o")
        .arg(&outdir)
        .arg("--no-progress")
        .assert()
        .success();
    let names: Vec<String> = fs::read_dir(&outdir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("collected_files_"));
    assert!(names[0].ends_with(".txt"));
}
#[test]
fn json_summary() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    fs::create_dir(&src).unwrap();
    fs::write(src.join("a.txt"), "alpha").unwrap();
    textsweep()
        .arg(&src)
        .arg("-o")
        .arg(dir.path().join("out.txt"))
        .args(["--summary", "json", "--no-progress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"processed\": 1"))
        .stdout(predicate::str::contains("\"encoding\": \"utf-8\""));
}
#[test]
fn rejects_unknown_binary_detection() {
    textsweep()
        .args([".", "--binary-detection", "magic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid binary detection method"));
}
#[test]
fn requires_an_input() {
    textsweep().assert().failure();
}
#[test]
fn append_keeps_earlier_run_and_single_banner() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    fs::create_dir(&src).unwrap();
    fs::write(src.join("a.txt"), "first").unwrap();
    let out = dir.path().join("out.txt");
    textsweep()
        .arg(&src)
        .arg("-o")
        .arg(&out)
        .args(["--append", "--no-progress"])
        .assert()
        .success();
    fs::write(src.join("a.txt"), "second").unwrap();
    textsweep()
        .arg(&src)
        .arg("-o")
        .arg(&out)
        .args(["--append", "--no-progress"])
        .assert()
        .success();
    let content = fs::read_to_string(&out).unwrap();
    assert_eq!(content.matches("# Collected files").count(), 1);
    assert!(content.starts_with("# Collected files outputs generated on "));
    assert!(content.ends_with("\n\n----\nsrc/a.txt\nfirst\n\n----\nsrc/a.txt\nsecond"));
}
#[test]
fn depth_and_scale_limit_descent() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    fs::create_dir_all(src.join("one/two")).unwrap();
    fs::write(src.join("root.txt"), "0").unwrap();
    fs::write(src.join("one/a.txt"), "1").unwrap();
    fs::write(src.join("one/two/b.txt"), "2").unwrap();
    for flag in ["--depth", "--scale"] {
        let out = dir.path().join(format!("out{}.txt", flag));
        textsweep()
            .arg(&src)
            .arg("-o")
            .arg(&out)
            .args([flag, "1", "--no-progress"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Files discovered: 2"));
        let content = fs::read_to_string(&out).unwrap();
        assert!(content.contains("src/one/a.txt"));
        assert!(!content.contains("b.txt"));
    }
}
#[test]
fn max_size_gates_in_megabytes() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    fs::create_dir(&src).unwrap();
    fs::write(src.join("big.txt"), "x".repeat(2048)).unwrap();
    // 0.001 MB is 1048 bytes.
    let limited = dir.path().join("limited.txt");
    textsweep()
        .arg(&src)
        .arg("-o")
        .arg(&limited)
        .args(["--max-size", "0.001", "--no-progress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped (too large): 1"));
    assert!(!fs::read_to_string(&limited).unwrap().contains("big.txt"));

    let unlimited = dir.path().join("unlimited.txt");
    textsweep()
        .arg(&src)
        .arg("-o")
        .arg(&unlimited)
        .args(["--max-size", "0", "--no-progress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files processed:  1"));
    assert!(fs::read_to_string(&unlimited).unwrap().contains("src/big.txt"));
}
