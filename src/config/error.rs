use std::path::PathBuf;

/// Errors raised while reading, parsing or validating a project configuration.
///
/// Every variant is fatal to the run and is surfaced before any output is
/// written.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        /// File that was requested
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The document is not well-formed for its format
    #[error("failed to parse config file {}: {message}", path.display())]
    Parse {
        /// File that was parsed
        path: PathBuf,
        /// Parser diagnostic
        message: String,
    },
    /// A well-formed document violates a configuration invariant
    #[error("invalid config: {field} {reason}")]
    Invalid {
        /// Dotted location of the offending value (e.g. `entities[0].name`)
        field: String,
        /// What is wrong with it
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
