use std::path::Path;
use std::process::Command;

use anyhow::Context;

/// Run `gofmt -w .` inside a generated project.
///
/// The binary can be overridden with `CRUDGEN_GOFMT_BIN`.
pub fn format_project(dir: &Path) -> anyhow::Result<()> {
    let gofmt_bin = std::env::var("CRUDGEN_GOFMT_BIN").unwrap_or_else(|_| "gofmt".to_string());

    let status = Command::new(&gofmt_bin)
        .args(["-w", "."])
        .current_dir(dir)
        .status()
        .with_context(|| format!("failed to run {gofmt_bin}"))?;
    if !status.success() {
        anyhow::bail!("gofmt failed in {}", dir.display());
    }
    tracing::info!(dir = %dir.display(), "formatted generated sources");
    Ok(())
}
