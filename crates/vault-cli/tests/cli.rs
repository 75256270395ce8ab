use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;

const OWNER: &str = "700000001";

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../vault-core/tests/fixtures/showcase.json")
}

fn run_cli(data_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vault"))
        .arg("--data-dir")
        .arg(data_dir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run vault CLI")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "cli exited with {}: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
}

fn scan(data_dir: &Path, extra: &[&str]) -> Output {
    let payload = fixture();
    let payload = payload.to_string_lossy().to_string();
    let mut args = vec!["scan", "--owner", OWNER, "--payload", payload.as_str()];
    args.extend_from_slice(extra);
    run_cli(data_dir, &args)
}

#[test]
fn cli_scan_reports_json_summary() {
    let dir = tempfile::tempdir().unwrap();
    let output = scan(dir.path(), &["--json"]);
    assert_success(&output);

    let summary: Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(summary["owner"], OWNER);
    assert_eq!(summary["nickname"], "Traveler");
    assert_eq!(summary["characters"]["version"], 1);
    assert_eq!(summary["characters"]["stats"]["added"], 2);
    assert_eq!(summary["artifacts"]["stats"]["added"], 3);
    assert_eq!(summary["combined"]["written"], true);
    assert!(dir.path().join(OWNER).join("characters_v1.csv").is_file());
}

#[test]
fn cli_rescan_is_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    assert_success(&scan(dir.path(), &[]));

    let output = scan(dir.path(), &["--json"]);
    assert_success(&output);
    let summary: Value = serde_json::from_slice(&output.stdout).unwrap();
    for series in ["characters", "artifacts", "combined"] {
        assert_eq!(summary[series]["written"], false, "{series}");
        assert_eq!(summary[series]["version"], 1, "{series}");
    }

    let output = run_cli(dir.path(), &["versions", "--owner", OWNER]);
    assert_success(&output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec!["characters: v1", "artifacts: v1", "combined: v1"]
    );
}

#[test]
fn cli_show_prints_snapshot_rows() {
    let dir = tempfile::tempdir().unwrap();
    assert_success(&scan(dir.path(), &[]));

    let output = run_cli(
        dir.path(),
        &["show", "--owner", OWNER, "--series", "characters", "--limit", "1"],
    );
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "characters v1 (2 rows)");
    assert!(lines[2].starts_with("Owner\tCharacter\tLevel"));
    assert!(lines[4].starts_with("700000001\tAmber\t90\t15034"));
    assert_eq!(lines[5], "... (1 more rows)");
}

#[test]
fn cli_export_writes_csv_and_json() {
    let dir = tempfile::tempdir().unwrap();
    assert_success(&scan(dir.path(), &[]));

    let csv_path = dir.path().join("artifacts.csv");
    let output = run_cli(
        dir.path(),
        &[
            "export",
            "--owner",
            OWNER,
            "--series",
            "artifacts",
            "--output",
            csv_path.to_str().unwrap(),
        ],
    );
    assert_success(&output);
    let content = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("Owner,Character,Slot,Set"));

    let json_path = dir.path().join("combined.json");
    let output = run_cli(
        dir.path(),
        &[
            "export",
            "--owner",
            OWNER,
            "--series",
            "combined",
            "--format",
            "json",
            "--output",
            json_path.to_str().unwrap(),
        ],
    );
    assert_success(&output);
    let exported: Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(exported["series"], "combined");
    assert_eq!(exported["records"].as_array().unwrap().len(), 2);
}

#[test]
fn cli_history_lists_scans() {
    let dir = tempfile::tempdir().unwrap();
    assert_success(&scan(dir.path(), &[]));
    assert_success(&scan(dir.path(), &[]));

    let output = run_cli(dir.path(), &["history", "--owner", OWNER]);
    assert_success(&output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Scans (2):"));
    assert_eq!(stdout.matches("written").count(), 3);
    assert_eq!(stdout.matches("unchanged").count(), 3);
}

#[test]
fn cli_rejects_unsafe_owner() {
    let dir = tempfile::tempdir().unwrap();
    let payload = fixture();
    let output = run_cli(
        dir.path(),
        &["scan", "--owner", "../etc", "--payload", payload.to_str().unwrap()],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: invalid owner identifier"), "{stderr}");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn cli_show_without_snapshots_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli(dir.path(), &["show", "--owner", OWNER, "--series", "combined"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no combined snapshots stored"), "{stderr}");
}

#[test]
fn cli_rejects_unknown_series() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli(dir.path(), &["versions", "--owner", OWNER, "--series", "weapons"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown series 'weapons'"), "{stderr}");
}

#[test]
fn cli_reads_data_dir_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("store");
    let config_path = dir.path().join("vault.json");
    fs::write(
        &config_path,
        serde_json::json!({ "data_dir": data_dir, "log_level": "warn" }).to_string(),
    )
    .unwrap();

    let payload = fixture();
    let output = Command::new(env!("CARGO_BIN_EXE_vault"))
        .args(["--config", config_path.to_str().unwrap()])
        .args(["scan", "--owner", OWNER, "--payload", payload.to_str().unwrap()])
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run vault CLI");

    assert_success(&output);
    assert!(data_dir.join(OWNER).join("combined_v1.csv").is_file());
    // warn level keeps the scan quiet
    assert!(output.stderr.is_empty(), "{}", String::from_utf8_lossy(&output.stderr));
}
