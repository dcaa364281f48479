use askama::Template;
use std::fmt;

use super::error::GenerateError;
use super::mapping::{
    to_go_type, to_lower, to_pascal_case, to_plural_snake, to_snake_case, to_storage_type,
    to_test_value, to_wire_type,
};
use crate::config::{Entity, Features, Field, ProjectConfig};

/// Storage technology with a parallel repository implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Backend {
    /// Relational storage over `database/sql`
    Postgres,
    /// Document storage over the official MongoDB driver
    Mongodb,
}

impl Backend {
    /// Every backend with storage and migration templates.
    pub const ALL: [Backend; 2] = [Backend::Postgres, Backend::Mongodb];

    /// Identifier used in configuration documents and output paths.
    pub fn id(self) -> &'static str {
        match self {
            Backend::Postgres => "postgres",
            Backend::Mongodb => "mongodb",
        }
    }

    /// Extension of the migration artifact.
    pub fn migration_extension(self) -> &'static str {
        match self {
            Backend::Postgres => "sql",
            Backend::Mongodb => "json",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Artifact kinds generated once per entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityArtifact {
    Domain,
    RepositoryInterface,
    UseCase,
    RestController,
    RpcContract,
    TestSuite,
    Storage(Backend),
    Migration(Backend),
}

impl fmt::Display for EntityArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityArtifact::Domain => f.write_str("domain"),
            EntityArtifact::RepositoryInterface => f.write_str("repository"),
            EntityArtifact::UseCase => f.write_str("usecase"),
            EntityArtifact::RestController => f.write_str("rest controller"),
            EntityArtifact::RpcContract => f.write_str("proto"),
            EntityArtifact::TestSuite => f.write_str("test"),
            EntityArtifact::Storage(backend) => write!(f, "{backend} repository"),
            EntityArtifact::Migration(backend) => write!(f, "{backend} migration"),
        }
    }
}

/// Templated artifact kinds generated once per project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectArtifact {
    Entrypoint,
    ConfigFile,
    Dockerfile,
    DockerCompose,
}

impl fmt::Display for ProjectArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProjectArtifact::Entrypoint => "main",
            ProjectArtifact::ConfigFile => "config_yaml",
            ProjectArtifact::Dockerfile => "dockerfile",
            ProjectArtifact::DockerCompose => "docker_compose",
        })
    }
}

/// A template bound to the context it renders.
///
/// Entity artifacts can only be built with an entity and project artifacts
/// only without one, so a template never sees the wrong context shape.
#[derive(Debug, Clone, Copy)]
pub enum Artifact<'a> {
    Entity {
        kind: EntityArtifact,
        entity: &'a EntityView,
    },
    Project(ProjectArtifact),
}

impl Artifact<'_> {
    /// Identity used in logs and error messages, e.g. `postgres repository (Order)`.
    pub fn describe(&self) -> String {
        match self {
            Artifact::Entity { kind, entity } => format!("{kind} ({})", entity.name),
            Artifact::Project(kind) => kind.to_string(),
        }
    }
}

/// Render-time view of a field with every derived name precomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    /// Exported Go field name
    pub name: String,
    /// Column / document key
    pub column: String,
    /// Logical type token as configured
    pub ty: String,
    pub tags: Vec<String>,
    pub required: bool,
    pub unique: bool,
}

impl FieldView {
    pub fn new(field: &Field) -> Self {
        FieldView {
            name: to_pascal_case(&field.name),
            column: to_snake_case(&field.name),
            ty: field.ty.clone(),
            tags: field.tags.clone(),
            required: field.required,
            unique: field.unique,
        }
    }

    pub fn go_type(&self) -> &'static str {
        to_go_type(&self.ty)
    }

    pub fn storage_type(&self) -> &'static str {
        to_storage_type(&self.ty)
    }

    pub fn wire_type(&self) -> &'static str {
        to_wire_type(&self.ty)
    }

    pub fn test_value(&self) -> &'static str {
        to_test_value(&self.ty)
    }

    pub fn has_tags(&self) -> bool {
        !self.tags.is_empty()
    }

    /// Raw tags joined into a single struct tag body.
    pub fn tag_string(&self) -> String {
        self.tags.join(" ")
    }
}

/// Render-time view of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityView {
    /// Exported type name (`OrderItem`)
    pub name: String,
    /// Lower-case name for unexported identifiers and proto packages (`orderitem`)
    pub lower: String,
    /// File stem (`order_item`)
    pub snake: String,
    /// Table, collection and route segment (`order_items`)
    pub table: String,
    /// Configured fields, minus any explicit `id` (the key is implicit)
    pub fields: Vec<FieldView>,
}

impl EntityView {
    pub fn new(entity: &Entity) -> Self {
        let fields = entity
            .fields
            .iter()
            .filter(|field| {
                let implicit = field.name.eq_ignore_ascii_case("id");
                if implicit {
                    tracing::warn!(
                        entity = %entity.name,
                        "field '{}' folded into the implicit ID key",
                        field.name
                    );
                }
                !implicit
            })
            .map(FieldView::new)
            .collect();
        EntityView {
            name: to_pascal_case(&entity.name),
            lower: to_lower(&entity.name),
            snake: to_snake_case(&entity.name),
            table: to_plural_snake(&entity.name),
            fields,
        }
    }

    /// Full column list in storage order: `id, <fields>, created_at, updated_at`.
    pub fn columns(&self) -> String {
        let mut cols = vec!["id"];
        cols.extend(self.fields.iter().map(|f| f.column.as_str()));
        cols.extend(["created_at", "updated_at"]);
        cols.join(", ")
    }

    /// `$1 .. $n` placeholders matching [`EntityView::columns`].
    pub fn insert_placeholders(&self) -> String {
        (1..=self.fields.len() + 3)
            .map(|i| format!("${i}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `SET` clause for updates; `$1` is reserved for the id.
    pub fn update_assignments(&self) -> String {
        self.fields
            .iter()
            .map(|f| f.column.as_str())
            .chain(std::iter::once("updated_at"))
            .enumerate()
            .map(|(i, col)| format!("{col} = ${}", i + 2))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Proto field number following the configured fields.
    pub fn tag_after_fields(&self, offset: usize) -> usize {
        self.fields.len() + offset
    }
}

/// Render-time view of the whole project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectView {
    pub name: String,
    pub lower_name: String,
    pub module: String,
    pub port: u16,
    pub features: Features,
    /// Resolved, de-duplicated backends in configuration order
    pub backends: Vec<Backend>,
    pub entities: Vec<EntityView>,
}

impl ProjectView {
    pub fn new(config: &ProjectConfig, port: u16, backends: Vec<Backend>) -> Self {
        ProjectView {
            name: config.name.clone(),
            lower_name: to_lower(&config.name),
            module: config.module.clone(),
            port,
            features: config.features,
            backends,
            entities: config.entities.iter().map(EntityView::new).collect(),
        }
    }

    /// Backend the entrypoint wires repositories against.
    pub fn primary_backend(&self) -> Option<Backend> {
        self.backends.first().copied()
    }

    pub fn primary_is_postgres(&self) -> bool {
        self.primary_backend() == Some(Backend::Postgres)
    }

    pub fn primary_is_mongodb(&self) -> bool {
        self.primary_backend() == Some(Backend::Mongodb)
    }

    pub fn has_postgres(&self) -> bool {
        self.backends.contains(&Backend::Postgres)
    }

    pub fn has_mongodb(&self) -> bool {
        self.backends.contains(&Backend::Mongodb)
    }

    /// Whether the entrypoint constructs repositories and use-cases.
    pub fn wires_entities(&self) -> bool {
        !self.entities.is_empty() && self.primary_backend().is_some()
    }

    /// Whether the entrypoint mounts REST controllers.
    pub fn wires_rest(&self) -> bool {
        self.wires_entities() && self.features.rest
    }
}

/// Template for the domain struct
#[derive(Template)]
#[template(path = "domain.go.txt", escape = "none")]
pub struct DomainTemplate<'a> {
    pub entity: &'a EntityView,
    pub project: &'a ProjectView,
}

/// Template for the repository interface
#[derive(Template)]
#[template(path = "repository.go.txt", escape = "none")]
pub struct RepositoryTemplate<'a> {
    pub entity: &'a EntityView,
    pub project: &'a ProjectView,
}

/// Template for the relational repository implementation
#[derive(Template)]
#[template(path = "postgres_repository.go.txt", escape = "none")]
pub struct PostgresRepositoryTemplate<'a> {
    pub entity: &'a EntityView,
    pub project: &'a ProjectView,
}

/// Template for the document repository implementation
#[derive(Template)]
#[template(path = "mongodb_repository.go.txt", escape = "none")]
pub struct MongodbRepositoryTemplate<'a> {
    pub entity: &'a EntityView,
    pub project: &'a ProjectView,
}

/// Template for the use-case layer
#[derive(Template)]
#[template(path = "usecase.go.txt", escape = "none")]
pub struct UseCaseTemplate<'a> {
    pub entity: &'a EntityView,
    pub project: &'a ProjectView,
}

/// Template for the REST controller; swagger annotations follow `features.swagger`
#[derive(Template)]
#[template(path = "rest_controller.go.txt", escape = "none")]
pub struct RestControllerTemplate<'a> {
    pub entity: &'a EntityView,
    pub project: &'a ProjectView,
}

/// Template for the proto3 service contract
#[derive(Template)]
#[template(path = "service.proto.txt", escape = "none")]
pub struct ProtoTemplate<'a> {
    pub entity: &'a EntityView,
    pub project: &'a ProjectView,
}

/// Template for the controller unit tests
#[derive(Template)]
#[template(path = "controller_test.go.txt", escape = "none")]
pub struct ControllerTestTemplate<'a> {
    pub entity: &'a EntityView,
    pub project: &'a ProjectView,
}

/// Template for the relational migration; the only consumer of `required`/`unique`
#[derive(Template)]
#[template(path = "postgres_migration.sql.txt", escape = "none")]
pub struct PostgresMigrationTemplate<'a> {
    pub entity: &'a EntityView,
    pub project: &'a ProjectView,
}

/// Template for the document collection migration
#[derive(Template)]
#[template(path = "mongodb_migration.json.txt", escape = "none")]
pub struct MongodbMigrationTemplate<'a> {
    pub entity: &'a EntityView,
    pub project: &'a ProjectView,
}

/// Template for `cmd/server/main.go`
#[derive(Template)]
#[template(path = "main.go.txt", escape = "none")]
pub struct MainTemplate<'a> {
    pub project: &'a ProjectView,
}

/// Template for `config.yaml`
#[derive(Template)]
#[template(path = "config.yaml.txt", escape = "none")]
pub struct ConfigYamlTemplate<'a> {
    pub project: &'a ProjectView,
}

/// Template for the multi-stage `Dockerfile`
#[derive(Template)]
#[template(path = "Dockerfile.txt", escape = "none")]
pub struct DockerfileTemplate<'a> {
    pub project: &'a ProjectView,
}

/// Template for `docker-compose.yml`
#[derive(Template)]
#[template(path = "docker-compose.yml.txt", escape = "none")]
pub struct DockerComposeTemplate<'a> {
    pub project: &'a ProjectView,
}

/// The set of compiled templates, one per artifact kind.
///
/// Template bodies are compiled into the binary, so a malformed body is a
/// build failure and a constructed registry always holds valid templates.
/// The only runtime lookup left is resolving a storage backend identifier.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    backends: Vec<Backend>,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRegistry {
    pub fn new() -> Self {
        TemplateRegistry {
            backends: Backend::ALL.to_vec(),
        }
    }

    /// Identifiers of every backend with storage templates.
    pub fn backend_ids(&self) -> Vec<&'static str> {
        self.backends.iter().map(|b| b.id()).collect()
    }

    /// Map a configured backend identifier to its templates.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::UnknownTemplate`] for an unregistered identifier.
    pub fn resolve_backend(&self, id: &str) -> Result<Backend, GenerateError> {
        self.backends
            .iter()
            .copied()
            .find(|b| b.id() == id)
            .ok_or_else(|| GenerateError::UnknownTemplate {
                name: id.to_string(),
            })
    }

    /// Render one artifact against the project view.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Render`] naming the artifact if the template
    /// fails while rendering.
    pub fn render(
        &self,
        artifact: Artifact<'_>,
        project: &ProjectView,
    ) -> Result<String, GenerateError> {
        let rendered = match artifact {
            Artifact::Entity { kind, entity } => match kind {
                EntityArtifact::Domain => DomainTemplate { entity, project }.render(),
                EntityArtifact::RepositoryInterface => {
                    RepositoryTemplate { entity, project }.render()
                }
                EntityArtifact::UseCase => UseCaseTemplate { entity, project }.render(),
                EntityArtifact::RestController => {
                    RestControllerTemplate { entity, project }.render()
                }
                EntityArtifact::RpcContract => ProtoTemplate { entity, project }.render(),
                EntityArtifact::TestSuite => ControllerTestTemplate { entity, project }.render(),
                EntityArtifact::Storage(Backend::Postgres) => {
                    PostgresRepositoryTemplate { entity, project }.render()
                }
                EntityArtifact::Storage(Backend::Mongodb) => {
                    MongodbRepositoryTemplate { entity, project }.render()
                }
                EntityArtifact::Migration(Backend::Postgres) => {
                    PostgresMigrationTemplate { entity, project }.render()
                }
                EntityArtifact::Migration(Backend::Mongodb) => {
                    MongodbMigrationTemplate { entity, project }.render()
                }
            },
            Artifact::Project(kind) => match kind {
                ProjectArtifact::Entrypoint => MainTemplate { project }.render(),
                ProjectArtifact::ConfigFile => ConfigYamlTemplate { project }.render(),
                ProjectArtifact::Dockerfile => DockerfileTemplate { project }.render(),
                ProjectArtifact::DockerCompose => DockerComposeTemplate { project }.render(),
            },
        };
        rendered.map_err(|source| GenerateError::Render {
            artifact: artifact.describe(),
            source,
        })
    }
}
