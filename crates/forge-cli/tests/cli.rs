use assert_cmd::Command;
use tempfile::tempdir;

fn forge(store: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("forge").unwrap();
    cmd.arg("--store").arg(store).arg("--owner").arg("ops@example.com").arg("--quiet");
    cmd
}

#[test]
fn log_then_verify_succeeds() {
    let dir = tempdir().unwrap();

    forge(dir.path())
        .args(["log", "apt update"])
        .assert()
        .success();

    forge(dir.path()).arg("verify").assert().success();
}

#[test]
fn verify_on_empty_store_is_vacuously_valid() {
    let dir = tempdir().unwrap();
    forge(dir.path()).arg("verify").assert().success();
}

#[test]
fn seal_then_witness_reports_self_level() {
    let dir = tempdir().unwrap();

    forge(dir.path()).args(["log", "apt update"]).assert().success();
    forge(dir.path()).arg("seal").assert().success();

    let output = forge(dir.path()).arg("witness").assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("\"level\": 1"));
}

#[test]
fn witness_without_a_sealed_block_fails() {
    let dir = tempdir().unwrap();
    forge(dir.path()).arg("witness").assert().failure();
}

#[test]
fn status_reports_atom_and_block_counts() {
    let dir = tempdir().unwrap();

    forge(dir.path()).args(["log", "apt update"]).assert().success();
    forge(dir.path()).args(["log", "install nginx"]).assert().success();
    forge(dir.path()).arg("seal").assert().success();

    let output = forge(dir.path()).arg("status").assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("\"atom_count\": 2"));
    assert!(stdout.contains("\"block_count\": 1"));
}

#[test]
fn bilateral_witness_raises_level_to_two() {
    let dir = tempdir().unwrap();

    forge(dir.path()).args(["log", "apt update"]).assert().success();
    forge(dir.path()).arg("seal").assert().success();
    forge(dir.path())
        .args(["witness", "--bilateral", "ops@other.example"])
        .assert()
        .success();

    let output = forge(dir.path()).arg("witness").assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("\"level\": 2"));
}

#[test]
fn export_writes_a_json_document_without_merkle_layers() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");

    forge(dir.path()).args(["log", "apt update"]).assert().success();
    forge(dir.path()).arg("seal").assert().success();
    forge(dir.path())
        .args(["export", "--out"])
        .arg(&out_path)
        .assert()
        .success();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["atom_count"], 1);
    assert!(parsed["blocks"][0].get("layers").is_none());
}

#[test]
fn history_lists_recorded_actions() {
    let dir = tempdir().unwrap();

    forge(dir.path()).args(["log", "apt update"]).assert().success();
    forge(dir.path()).args(["log", "install nginx"]).assert().success();

    let output = forge(dir.path()).args(["history", "1"]).assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
    assert_eq!(parsed[0]["action_text"], "install nginx");
}

#[test]
fn verify_detects_a_tampered_store() {
    let dir = tempdir().unwrap();
    forge(dir.path()).args(["log", "apt update"]).assert().success();

    let chain_path = dir.path().join("chain.json");
    let contents = std::fs::read_to_string(&chain_path).unwrap();
    let mut doc: serde_json::Value = serde_json::from_str(&contents).unwrap();
    doc["atoms"][0]["proof"] = serde_json::Value::String("0".repeat(64));
    std::fs::write(&chain_path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();

    forge(dir.path()).arg("verify").assert().failure();
}
