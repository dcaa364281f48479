//! # Config Linter Module
//!
//! Checks a project configuration for problems the generator tolerates but a
//! user almost certainly did not intend.
//!
//! ## Checks Performed
//!
//! 1. **Unknown backend** - repository identifiers without storage templates (error)
//! 2. **Duplicate entity** - two entities share a name; later files overwrite earlier ones
//! 3. **Unknown field type** - type tokens outside the closed vocabulary fall back to text
//! 4. **Empty entity** - entities without fields
//! 5. **Inert feature** - `events` is accepted but generates nothing
//! 6. **No entities** - only project-wide files will be generated
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crudgen::config::load_config;
//! use crudgen::linter::{lint_config, print_lint_issues};
//!
//! let config = load_config("shop.json".as_ref())?;
//! print_lint_issues(&lint_config(&config));
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::config::ProjectConfig;
use crate::generator::mapping::{to_snake_case, FieldType};
use crate::generator::TemplateRegistry;


/// Severity level for lint issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LintSeverity {
    /// Error - Will cause generation to fail
    Error,
    /// Warning - Generation succeeds but the output is probably not what was meant
    Warning,
    /// Info - Worth knowing
    Info,
}

impl fmt::Display for LintSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LintSeverity::Error => "error",
            LintSeverity::Warning => "warning",
            LintSeverity::Info => "info",
        })
    }
}

/// A lint issue found in a project configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintIssue {
    /// Where the issue occurred (e.g., "repositories[1]", "entities[0].fields[2]")
    pub location: String,
    /// Severity of the issue
    pub severity: LintSeverity,
    /// Type of lint issue (e.g., "unknown_backend", "duplicate_entity")
    pub kind: String,
    /// Human-readable description of the problem
    pub message: String,
    /// Optional suggestion for how to fix it
    pub suggestion: Option<String>,
}

impl LintIssue {
    /// Create a new lint issue
    pub fn new(
        location: impl Into<String>,
        severity: LintSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        LintIssue {
            location: location.into(),
            severity,
            kind: kind.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Add a suggestion for fixing the issue
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Lint a project configuration.
///
/// Issues are returned in document order: repositories, features, then
/// entities and their fields.
pub fn lint_config(config: &ProjectConfig) -> Vec<LintIssue> {
    let mut issues = Vec::new();
    let registry = TemplateRegistry::new();

    for (i, id) in config.repositories.iter().enumerate() {
        if registry.resolve_backend(id).is_err() {
            issues.push(
                LintIssue::new(
                    format!("repositories[{i}]"),
                    LintSeverity::Error,
                    "unknown_backend",
                    format!("no storage templates for backend '{id}'"),
                )
                .with_suggestion(format!(
                    "use one of: {}",
                    registry.backend_ids().join(", ")
                )),
            );
        }
    }

    if config.features.events {
        issues.push(LintIssue::new(
            "features.events",
            LintSeverity::Info,
            "inert_feature",
            "the events feature is reserved and generates no artifacts",
        ));
    }

    if config.entities.is_empty() {
        issues.push(LintIssue::new(
            "entities",
            LintSeverity::Info,
            "no_entities",
            "no entities declared; only project-wide files will be generated",
        ));
    }

    // Entities whose output files would collide share a snake-case stem.
    let mut seen: HashMap<String, usize> = HashMap::new();
    for (i, entity) in config.entities.iter().enumerate() {
        let stem = to_snake_case(&entity.name);
        if let Some(first) = seen.get(&stem) {
            issues.push(
                LintIssue::new(
                    format!("entities[{i}]"),
                    LintSeverity::Warning,
                    "duplicate_entity",
                    format!(
                        "entity '{}' collides with entities[{first}]; its files overwrite the earlier ones",
                        entity.name
                    ),
                )
                .with_suggestion("rename or merge the entities"),
            );
        } else {
            seen.insert(stem, i);
        }

        if entity.fields.is_empty() {
            issues.push(LintIssue::new(
                format!("entities[{i}]"),
                LintSeverity::Warning,
                "empty_entity",
                format!("entity '{}' has no fields besides the implicit id", entity.name),
            ));
        }

        for (j, field) in entity.fields.iter().enumerate() {
            if !FieldType::is_known(&field.ty) {
                issues.push(
                    LintIssue::new(
                        format!("entities[{i}].fields[{j}]"),
                        LintSeverity::Warning,
                        "unknown_field_type",
                        format!(
                            "field '{}' has type '{}', which is generated as text",
                            field.name, field.ty
                        ),
                    )
                    .with_suggestion(
                        "use string, int, int32, int64, float32, float64 or bool",
                    ),
                );
            }
        }
    }

    issues
}

/// Whether any issue is an error.
pub fn has_errors(issues: &[LintIssue]) -> bool {
    issues.iter().any(|i| i.severity == LintSeverity::Error)
}

/// Print lint issues grouped by severity
pub fn print_lint_issues(issues: &[LintIssue]) {
    if issues.is_empty() {
        println!("✅ No lint issues found!");
        return;
    }

    let count = |severity| issues.iter().filter(|i| i.severity == severity).count();
    println!("\n📋 Lint Results:");
    println!(
        "   {} error(s), {} warning(s), {} info(s)\n",
        count(LintSeverity::Error),
        count(LintSeverity::Warning),
        count(LintSeverity::Info)
    );

    for (severity, heading) in [
        (LintSeverity::Error, "❌ Errors (must fix):"),
        (LintSeverity::Warning, "⚠️  Warnings (should fix):"),
        (LintSeverity::Info, "ℹ️  Info:"),
    ] {
        let group: Vec<_> = issues.iter().filter(|i| i.severity == severity).collect();
        if group.is_empty() {
            continue;
        }
        println!("{heading}");
        for issue in group {
            println!("   [{}] {}", issue.kind, issue.location);
            println!("      {}", issue.message);
            if let Some(suggestion) = &issue.suggestion {
                println!("      💡 Suggestion: {suggestion}");
            }
        }
        println!();
    }
}
