mod common;

use common::{file_set, fixture_path};
use std::fs;
use std::process::Command;

fn crudgen() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_crudgen"));
    cmd.env_remove("CRUDGEN_SEED").env("CRUDGEN_LOG_LEVEL", "error");
    cmd
}

#[test]
fn test_cli_generate_creates_project() {
    let dir = tempfile::tempdir().unwrap();
    let output = crudgen()
        .arg("generate")
        .arg(fixture_path("shop.json"))
        .arg("--output-dir")
        .arg(dir.path())
        .arg("--seed")
        .arg("3")
        .output()
        .expect("run cli");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Generated 12 files"), "{stdout}");
    let project = dir.path().join("shop");
    assert!(project.join("go.mod").exists());
    assert!(project.join("cmd/server/main.go").exists());
}

#[test]
fn test_cli_seed_env_is_reproducible() {
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();
    for dir in [a.path(), b.path()] {
        let status = crudgen()
            .env("CRUDGEN_SEED", "99")
            .args(["generate", "-o"])
            .arg(dir)
            .arg(fixture_path("shop.json"))
            .status()
            .expect("run cli");
        assert!(status.success());
    }
    let config_a = fs::read_to_string(a.path().join("shop/config.yaml")).unwrap();
    let config_b = fs::read_to_string(b.path().join("shop/config.yaml")).unwrap();
    assert_eq!(config_a, config_b);
}

#[test]
fn test_cli_generate_unknown_backend_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = crudgen()
        .arg("generate")
        .arg(fixture_path("unknown_backend.json"))
        .arg("-o")
        .arg(dir.path())
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("template redis not found"), "{stderr}");
    assert!(file_set(dir.path()).is_empty());
}

#[test]
fn test_cli_validate() {
    let ok = crudgen()
        .arg("validate")
        .arg(fixture_path("catalog.yaml"))
        .output()
        .expect("run cli");
    assert!(ok.status.success());
    assert!(String::from_utf8_lossy(&ok.stdout).contains("project 'catalog', 2 entities"));

    let bad = crudgen()
        .arg("validate")
        .arg(fixture_path("malformed.json"))
        .status()
        .expect("run cli");
    assert!(!bad.success());
}

#[test]
fn test_cli_lint_exit_codes() {
    let lenient = crudgen()
        .arg("lint")
        .arg(fixture_path("unknown_backend.json"))
        .status()
        .expect("run cli");
    assert!(lenient.success());

    let strict = crudgen()
        .arg("lint")
        .arg(fixture_path("unknown_backend.json"))
        .arg("--fail-on-error")
        .status()
        .expect("run cli");
    assert!(!strict.success());

    let clean = crudgen()
        .arg("lint")
        .arg(fixture_path("shop.json"))
        .arg("--fail-on-error")
        .status()
        .expect("run cli");
    assert!(clean.success());
}
