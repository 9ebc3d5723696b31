use std::fs;
use std::process::Command;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_digest2graph"))
}

#[test]
fn cli_writes_tables_and_prints_summary() {
    let dir = tempfile::TempDir::new().unwrap();
    let digest = dir.path().join("digest.txt");
    fs::write(
        &digest,
        "FILE: app.py\ndef main():\n    run()\n\nFILE: notes.txt\nhello\n",
    )
    .unwrap();
    let out = dir.path().join("graph");

    let output = bin().arg(&digest).arg(&out).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout.trim(),
        format!("Written 3 nodes and 2 relationships to {}", out.display())
    );
    for name in ["nodes.csv", "contains.csv", "inherits.csv", "calls.csv", "import.cypher"] {
        assert!(out.join(name).exists(), "missing {name}");
    }
}

#[test]
fn cli_json_format() {
    let dir = tempfile::TempDir::new().unwrap();
    let digest = dir.path().join("digest.txt");
    fs::write(&digest, "FILE: app.py\nclass A:\n    pass\n").unwrap();
    let out = dir.path().join("graph");

    let status = bin()
        .arg(&digest)
        .arg(&out)
        .args(["--format", "json"])
        .status()
        .unwrap();

    assert!(status.success());
    assert!(out.join("graph.json").exists());
    assert!(!out.join("nodes.csv").exists());
}

#[test]
fn cli_rejects_missing_digest() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = dir.path().join("graph");

    let output = bin()
        .arg(dir.path().join("absent.txt"))
        .arg(&out)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Digest not found"));
    assert!(!out.exists());
}

#[test]
fn cli_requires_both_arguments() {
    let output = bin().arg("digest.txt").output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Usage"));
}

#[test]
fn cli_rejects_invalid_entity_label() {
    let dir = tempfile::TempDir::new().unwrap();
    let digest = dir.path().join("digest.txt");
    fs::write(&digest, "FILE: a.py\npass\n").unwrap();

    let status = bin()
        .arg(&digest)
        .arg(dir.path().join("out"))
        .args(["--entity-label", "Bad Label"])
        .status()
        .unwrap();

    assert!(!status.success());
}
