#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Unit tests for CLI commands

use crate::cli::{run_cli, Cli, Commands};
use clap::Parser;
use std::fs;

const SHOP: &str = r#"{
    "name": "shop",
    "module": "shop",
    "entities": [{"name": "Order", "fields": [{"name": "Total", "type": "float64"}]}],
    "repositories": ["postgres"],
    "features": {"rest": true, "migrations": true}
}"#;

#[test]
fn test_generate_command_parses() {
    let cli = Cli::try_parse_from([
        "crudgen", "generate", "shop.json", "-o", "out", "--seed", "7", "--port", "9000", "--fmt",
    ])
    .unwrap();

    match cli.command {
        Commands::Generate {
            config,
            output_dir,
            seed,
            port,
            fmt,
        } => {
            assert_eq!(config.to_string_lossy(), "shop.json");
            assert_eq!(output_dir.to_string_lossy(), "out");
            assert_eq!(seed, Some(7));
            assert_eq!(port, Some(9000));
            assert!(fmt);
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_generate_defaults() {
    let cli = Cli::try_parse_from(["crudgen", "generate", "shop.json"]).unwrap();
    match cli.command {
        Commands::Generate {
            output_dir, fmt, port, ..
        } => {
            assert_eq!(output_dir.to_string_lossy(), ".");
            assert!(!fmt);
            assert_eq!(port, None);
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_lint_command_with_flags() {
    let cli = Cli::try_parse_from([
        "crudgen",
        "lint",
        "shop.yaml",
        "--fail-on-error",
        "--errors-only",
    ])
    .unwrap();

    match cli.command {
        Commands::Lint {
            config,
            fail_on_error,
            errors_only,
        } => {
            assert_eq!(config.to_string_lossy(), "shop.yaml");
            assert!(fail_on_error);
            assert!(errors_only);
        }
        _ => panic!("Expected Lint command"),
    }
}

#[test]
fn test_missing_config_is_rejected() {
    assert!(Cli::try_parse_from(["crudgen", "validate"]).is_err());
    assert!(Cli::try_parse_from(["crudgen", "generate", "x.json", "--port", "70000"]).is_err());
}

#[test]
fn test_run_generate_writes_project() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("shop.json");
    fs::write(&config, SHOP).unwrap();
    let out = dir.path().join("out");

    let cli = Cli::try_parse_from([
        "crudgen",
        "generate",
        config.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
        "--seed",
        "1",
    ])
    .unwrap();
    run_cli(cli).unwrap();

    assert!(out.join("shop/go.mod").is_file());
    assert!(out.join("shop/internal/controller/order.go").is_file());
}

#[test]
fn test_run_validate_reports_bad_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bad.json");
    fs::write(&config, r#"{"name": "", "module": "shop"}"#).unwrap();

    let cli = Cli::try_parse_from(["crudgen", "validate", config.to_str().unwrap()]).unwrap();
    let err = run_cli(cli).unwrap_err();
    assert!(format!("{err:#}").contains("name must not be empty"));
}

#[test]
fn test_run_lint_fail_on_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("shop.json");
    fs::write(&config, SHOP.replace("\"postgres\"", "\"redis\"")).unwrap();

    let path = config.to_str().unwrap();

    let lenient = Cli::try_parse_from(["crudgen", "lint", path]).unwrap();
    assert!(run_cli(lenient).is_ok());

    let strict = Cli::try_parse_from(["crudgen", "lint", path, "--fail-on-error"]).unwrap();
    assert!(run_cli(strict).is_err());
}
