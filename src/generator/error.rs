use std::path::PathBuf;

use crate::config::ConfigError;

/// Errors produced by a generation run.
///
/// None of these are retried: a run either writes every planned artifact or
/// stops at the first failure, leaving whatever was already written in place.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The configuration was unreadable, malformed or invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No template is registered under the requested name (e.g. a storage
    /// backend identifier the registry does not know)
    #[error("template {name} not found")]
    UnknownTemplate {
        /// The identifier that was looked up
        name: String,
    },

    /// A template failed while rendering its context
    #[error("failed to render {artifact}: {source}")]
    Render {
        /// Artifact kind and owning entity, e.g. `domain (Order)`
        artifact: String,
        #[source]
        source: askama::Error,
    },

    /// A directory could not be created or a file could not be written
    #[error("failed to write {}: {source}", path.display())]
    Io {
        /// Target path of the failed operation
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Wraps a failure with the generation step it happened in
    #[error("failed to {step}: {source}")]
    Step {
        /// Step description, e.g. `generate code for entity Order`
        step: String,
        #[source]
        source: Box<GenerateError>,
    },
}

impl GenerateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenerateError::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach the step that was running when `self` occurred.
    pub fn in_step(self, step: impl Into<String>) -> Self {
        GenerateError::Step {
            step: step.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with every [`GenerateError::Step`] layer removed.
    pub fn root_cause(&self) -> &GenerateError {
        match self {
            GenerateError::Step { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_wrapping_display() {
        let err = GenerateError::UnknownTemplate {
            name: "redis".into(),
        }
        .in_step("generate code for entity Order");
        assert_eq!(
            err.to_string(),
            "failed to generate code for entity Order: template redis not found"
        );
        assert!(matches!(
            err.root_cause(),
            GenerateError::UnknownTemplate { name } if name == "redis"
        ));
    }

    #[test]
    fn test_io_names_path() {
        let err = GenerateError::io(
            "/tmp/out/go.mod",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/tmp/out/go.mod"));
    }
}
