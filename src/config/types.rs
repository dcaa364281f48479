use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::ConfigError;

/// Range the port backfill draws from when the document leaves `port` unset.
pub const DEFAULT_PORT_RANGE: Range<u16> = 8000..18000;

#[allow(clippy::unwrap_used)]
static PROJECT_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-][A-Za-z0-9._-]*$").unwrap());

#[allow(clippy::unwrap_used)]
static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^_*[A-Za-z][A-Za-z0-9_]*$").unwrap());

/// Root of the configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name; becomes the root output directory and container names
    pub name: String,
    /// Go module path used for every emitted import
    pub module: String,
    /// Entities in generation order
    #[serde(default)]
    pub entities: Vec<Entity>,
    /// Storage backend identifiers (`postgres`, `mongodb`) in generation order
    #[serde(default)]
    pub repositories: Vec<String>,
    /// Feature switches
    #[serde(default)]
    pub features: Features,
    /// HTTP port of the generated service; `None` or `0` means "pick one"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

/// A named record type; the generator produces a full CRUD stack per entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// A typed entity attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    /// Logical type token (`string`, `int`, `int32`, `int64`, `float32`,
    /// `float64`, `bool`); anything else is rendered as text
    #[serde(rename = "type")]
    pub ty: String,
    /// Raw struct tags emitted verbatim (e.g. `json:"total"`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// `NOT NULL` in relational migrations
    #[serde(default)]
    pub required: bool,
    /// `UNIQUE` in relational migrations
    #[serde(default)]
    pub unique: bool,
}

/// Boolean switches gating optional artifact classes.
///
/// `events` is accepted and preserved but gates nothing. Keys are also
/// accepted capitalised (`Rest`) or upper-case (`REST`); any other key is a
/// parse error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Features {
    #[serde(alias = "Rest", alias = "REST")]
    pub rest: bool,
    #[serde(alias = "rpc", alias = "Grpc", alias = "GRPC", alias = "gRPC", alias = "RPC")]
    pub grpc: bool,
    #[serde(alias = "Events", alias = "EVENTS")]
    pub events: bool,
    #[serde(alias = "Tests", alias = "TESTS")]
    pub tests: bool,
    #[serde(alias = "Docker", alias = "DOCKER")]
    pub docker: bool,
    #[serde(alias = "Migrations", alias = "MIGRATIONS")]
    pub migrations: bool,
    #[serde(alias = "Swagger", alias = "SWAGGER")]
    pub swagger: bool,
}

impl ProjectConfig {
    /// Check the invariants the generator relies on.
    ///
    /// Entity-name uniqueness is deliberately not checked here; see
    /// [`crate::linter::lint_config`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::invalid("name", "must not be empty"));
        }
        if !PROJECT_NAME.is_match(&self.name) {
            return Err(ConfigError::invalid(
                "name",
                format!(
                    "'{}' must be a single path segment of letters, digits, '.', '_' or '-'",
                    self.name
                ),
            ));
        }
        if self.module.trim().is_empty() {
            return Err(ConfigError::invalid("module", "must not be empty"));
        }
        if self.module.chars().any(char::is_whitespace) {
            return Err(ConfigError::invalid(
                "module",
                format!("'{}' must not contain whitespace", self.module),
            ));
        }
        for (i, entity) in self.entities.iter().enumerate() {
            if !IDENTIFIER.is_match(&entity.name) {
                return Err(ConfigError::invalid(
                    format!("entities[{i}].name"),
                    format!("'{}' is not a valid identifier", entity.name),
                ));
            }
            for (j, field) in entity.fields.iter().enumerate() {
                if !IDENTIFIER.is_match(&field.name) {
                    return Err(ConfigError::invalid(
                        format!("entities[{i}].fields[{j}].name"),
                        format!("'{}' is not a valid identifier", field.name),
                    ));
                }
            }
        }
        Ok(())
    }

    /// The configured port, if one was given.
    pub fn explicit_port(&self) -> Option<u16> {
        self.port.filter(|p| *p != 0)
    }

    /// Backfill `port` when unset and return the effective value.
    ///
    /// With a seed the chosen port is reproducible; without one it is drawn
    /// from the thread RNG.
    pub fn resolve_port(&mut self, seed: Option<u64>) -> u16 {
        if let Some(port) = self.explicit_port() {
            return port;
        }
        let port = match seed {
            Some(seed) => StdRng::seed_from_u64(seed).gen_range(DEFAULT_PORT_RANGE),
            None => rand::thread_rng().gen_range(DEFAULT_PORT_RANGE),
        };
        self.port = Some(port);
        port
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn config() -> ProjectConfig {
        ProjectConfig {
            name: "shop".into(),
            module: "github.com/acme/shop".into(),
            entities: vec![Entity {
                name: "Order".into(),
                fields: vec![Field {
                    name: "Total".into(),
                    ty: "float64".into(),
                    tags: vec![],
                    required: true,
                    unique: false,
                }],
            }],
            repositories: vec!["postgres".into()],
            features: Features::default(),
            port: None,
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_name_and_module() {
        let mut cfg = config();
        cfg.name = "  ".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("name"));

        let mut cfg = config();
        cfg.module = String::new();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("module"));
    }

    #[test]
    fn test_validate_rejects_nested_project_name() {
        let mut cfg = config();
        cfg.name = "../escape".into();
        assert!(cfg.validate().is_err());
        cfg.name = "a/b".into();
        assert!(cfg.validate().is_err());
        cfg.name = "my-shop_v2.1".into();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_identifiers() {
        let mut cfg = config();
        cfg.entities[0].fields[0].name = "total amount".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("entities[0].fields[0].name"));

        let mut cfg = config();
        cfg.entities[0].name = "9Order".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_names_without_letters() {
        for name in ["_", "__", "_1"] {
            let mut cfg = config();
            cfg.entities[0].name = name.into();
            let err = cfg.validate().unwrap_err();
            assert!(err.to_string().contains("entities[0].name"), "{name}: {err}");

            let mut cfg = config();
            cfg.entities[0].fields[0].name = name.into();
            let err = cfg.validate().unwrap_err();
            assert!(err.to_string().contains("entities[0].fields[0].name"), "{name}: {err}");
        }

        let mut cfg = config();
        cfg.entities[0].name = "_Order".into();
        cfg.entities[0].fields[0].name = "total_".into();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_empty_entities_is_valid() {
        let mut cfg = config();
        cfg.entities.clear();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_resolve_port_keeps_explicit() {
        let mut cfg = config();
        cfg.port = Some(9090);
        assert_eq!(cfg.resolve_port(Some(1)), 9090);
        assert_eq!(cfg.port, Some(9090));
    }

    #[test]
    fn test_resolve_port_zero_means_unset() {
        let mut cfg = config();
        cfg.port = Some(0);
        let port = cfg.resolve_port(Some(7));
        assert!(DEFAULT_PORT_RANGE.contains(&port));
        assert_eq!(cfg.port, Some(port));
    }

    #[test]
    fn test_resolve_port_seeded_is_reproducible() {
        let a = config().resolve_port(Some(42));
        let b = config().resolve_port(Some(42));
        assert_eq!(a, b);
        assert!(DEFAULT_PORT_RANGE.contains(&a));
    }

    #[test]
    fn test_resolve_port_unseeded_in_range() {
        for _ in 0..32 {
            let port = config().resolve_port(None);
            assert!(DEFAULT_PORT_RANGE.contains(&port));
        }
    }

    #[test]
    fn test_features_accept_rpc_alias() {
        let features: Features = serde_json::from_str(r#"{"rpc": true}"#).unwrap();
        assert!(features.grpc);
        assert!(!features.rest);
    }

    #[test]
    fn test_features_accept_capitalised_keys() {
        let features: Features =
            serde_json::from_str(r#"{"REST": true, "Tests": true, "gRPC": true}"#).unwrap();
        assert!(features.rest);
        assert!(features.tests);
        assert!(features.grpc);
        assert!(!features.docker);
    }

    #[test]
    fn test_features_reject_unknown_keys() {
        let result: Result<Features, _> = serde_json::from_str(r#"{"graphql": true}"#);
        assert!(result.is_err());
    }
}
