use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const RESOLVABLE: &str = r#"
flags = ["server"]

[[features]]
id = "db"
dependencies = [{ kind = "flag", flag = "server" }]

[[features]]
id = "api"
dependencies = [{ kind = "feature", target = "db" }]
"#;

const DEADLOCKED: &str = r#"
[[features]]
id = "left"
dependencies = [{ kind = "feature", target = "right" }]

[[features]]
id = "right"
dependencies = [{ kind = "feature", target = "left" }]
"#;

fn manifest(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn fgate() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_fgate"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_resolve_succeeds() {
    let file = manifest(RESOLVABLE);

    fgate()
        .arg("resolve")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("db   resolved (round 1)"))
        .stdout(predicate::str::contains("api  resolved (round 2)"))
        .stdout(predicate::str::contains("2 resolved, 0 failed in 2 rounds"));
}

#[test]
fn test_resolve_reports_deadlock_with_exit_code() {
    let file = manifest(DEADLOCKED);

    fgate()
        .arg("resolve")
        .arg(file.path())
        .assert()
        .code(2)
        .stdout(predicate::str::contains("left   failed"))
        .stdout(predicate::str::contains("[deadlock] attempts to resolve this dependency resulted in a deadlock"));
}

#[test]
fn test_resolve_json_report() {
    let file = manifest(DEADLOCKED);

    fgate()
        .args(["resolve", "--json", "--order", "reversed"])
        .arg(file.path())
        .assert()
        .code(2)
        .stdout(predicate::str::contains(r#""success": false"#))
        .stdout(predicate::str::contains(r#""order": "reversed""#));
}

#[test]
fn test_resolve_in_resolution_order() {
    let file = manifest(
        r#"
flags = ["server"]

[[features]]
id = "api"
dependencies = [{ kind = "feature", target = "db" }]

[[features]]
id = "db"
dependencies = [{ kind = "flag", flag = "server" }]
"#,
    );

    fgate()
        .args(["resolve", "--order", "resolution"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?s)db .*api ").unwrap());
}

#[test]
fn test_check_rejects_duplicates() {
    let file = manifest(
        r#"
[[features]]
id = "db"

[[features]]
id = "db"
"#,
    );

    fgate()
        .arg("check")
        .arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Duplicate feature: 'db' is declared more than once"));
}

#[test]
fn test_check_accepts_valid_manifest() {
    let file = manifest(RESOLVABLE);

    fgate()
        .arg("check")
        .arg(file.path())
        .assert()
        .success()
        .stdout("manifest ok: 2 features (0 active), 1 flags\n");
}

#[test]
fn test_explain_feature() {
    let file = manifest(RESOLVABLE);

    fgate()
        .arg("explain")
        .arg(file.path())
        .arg("api")
        .assert()
        .success()
        .stdout("api: resolved in round 2\n  feature 'db': satisfied by db\n");
}

#[test]
fn test_explain_unknown_feature() {
    let file = manifest(RESOLVABLE);

    fgate()
        .arg("explain")
        .arg(file.path())
        .arg("ghost")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown feature: 'ghost'"));
}

#[test]
fn test_missing_manifest() {
    fgate()
        .args(["check", "/no/such/manifest.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config error"));
}

#[test]
fn test_log_level_from_environment() {
    let file = manifest(RESOLVABLE);

    fgate()
        .env("FGATE__LOGGING__LEVEL", "info")
        .arg("resolve")
        .arg(file.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Loading config from"))
        .stderr(predicate::str::contains("resolution finished"));

    fgate().arg("resolve").arg(file.path()).assert().success().stderr(predicate::str::is_empty());
}

#[test]
fn test_log_level_flag_and_log_dir() {
    let file = manifest(RESOLVABLE);
    let logs = tempfile::tempdir().unwrap();

    fgate()
        .args(["--log-level", "debug", "--log-dir"])
        .arg(logs.path())
        .arg("resolve")
        .arg(file.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("round finished"));

    let written = std::fs::read_dir(logs.path()).unwrap().count();
    assert_eq!(written, 1);
}

#[test]
fn test_invalid_log_level() {
    let file = manifest(RESOLVABLE);

    fgate()
        .args(["--log-level", "chatty", "check"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid log level 'chatty'"));
}

#[test]
fn test_json_report_stays_clean_with_debug_logging() {
    let file = manifest(RESOLVABLE);

    let output = fgate().args(["--log-level", "debug", "resolve", "--json"]).arg(file.path()).output().unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["success"], true);
    assert!(String::from_utf8_lossy(&output.stderr).contains("round finished"));
}
