use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::load_config;
use crate::generator::{format_project, generate_project, GenerateOptions};
use crate::linter::{has_errors, lint_config, print_lint_issues, LintSeverity};

/// Command-line interface for crudgen
///
/// Generates layered CRUD service projects from a declarative entity model.
#[derive(Parser)]
#[command(name = "crudgen")]
#[command(about = "CRUD service project generator", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a project from a configuration document
    Generate {
        /// Path to the project configuration (JSON, YAML or TOML)
        config: PathBuf,

        /// Directory the project root is created in
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Seed for the port default, for reproducible output
        #[arg(long, env = "CRUDGEN_SEED")]
        seed: Option<u64>,

        /// Port of the generated service (overrides the configuration)
        #[arg(long)]
        port: Option<u16>,

        /// Run gofmt over the generated project
        #[arg(long, default_value_t = false)]
        fmt: bool,
    },
    /// Parse and validate a configuration without generating anything
    Validate {
        /// Path to the project configuration (JSON, YAML or TOML)
        config: PathBuf,
    },
    /// Lint a configuration
    ///
    /// Reports unknown backends, duplicate entities, unknown field types,
    /// empty entities and inert features.
    Lint {
        /// Path to the project configuration (JSON, YAML or TOML)
        config: PathBuf,

        /// Exit with error code if any errors are found
        #[arg(long, default_value_t = false)]
        fail_on_error: bool,

        /// Show only errors (hide warnings and info)
        #[arg(long, default_value_t = false)]
        errors_only: bool,
    },
}

/// Execute a parsed command line.
///
/// # Errors
///
/// Returns an error if loading, generation or formatting fails, or if
/// `lint --fail-on-error` finds error-level issues.
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            config,
            output_dir,
            seed,
            port,
            fmt,
        } => {
            let mut project = load_config(&config)
                .with_context(|| format!("failed to load {}", config.display()))?;
            let options = GenerateOptions {
                output_dir,
                seed,
                port,
            };
            let report = generate_project(&mut project, &options)
                .with_context(|| format!("failed to generate project '{}'", project.name))?;
            if fmt {
                format_project(&report.root)?;
            }
            println!(
                "✅ Generated {} files in {} (port {})",
                report.files.len(),
                report.root.display(),
                report.port
            );
            Ok(())
        }
        Commands::Validate { config } => {
            let project = load_config(&config)
                .with_context(|| format!("failed to load {}", config.display()))?;
            println!(
                "✅ {} is valid: project '{}', {} entit{}, {} repositor{}",
                config.display(),
                project.name,
                project.entities.len(),
                if project.entities.len() == 1 { "y" } else { "ies" },
                project.repositories.len(),
                if project.repositories.len() == 1 { "y" } else { "ies" },
            );
            Ok(())
        }
        Commands::Lint {
            config,
            fail_on_error,
            errors_only,
        } => {
            let project = load_config(&config)
                .with_context(|| format!("failed to load {}", config.display()))?;
            let mut issues = lint_config(&project);
            if errors_only {
                issues.retain(|i| i.severity == LintSeverity::Error);
            }
            print_lint_issues(&issues);
            if fail_on_error && has_errors(&issues) {
                anyhow::bail!("lint found errors in {}", config.display());
            }
            Ok(())
        }
    }
}
