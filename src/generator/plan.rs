//! Artifact planning.
//!
//! [`plan_project`] turns a configuration into the complete, ordered list of
//! directories and files a run will produce. Everything that can fail without
//! touching the filesystem (backend resolution in particular) fails here, so
//! a bad configuration never leaves a half-written tree behind.

use std::path::PathBuf;

use super::error::GenerateError;
use super::scaffold::StaticFile;
use super::templates::{Backend, EntityArtifact, ProjectArtifact, ProjectView, TemplateRegistry};
use crate::config::{Features, ProjectConfig};

/// Directories created for every project regardless of features.
pub const SKELETON_DIRS: &[&str] = &[
    "cmd/server",
    "internal/domain",
    "internal/repository",
    "internal/usecase",
    "internal/controller",
    "pkg/api",
    "pkg/database",
    "pkg/grpc/controller",
    "pkg/proto",
    "migrations/postgres",
    "migrations/mongodb",
    "tests",
    "docs",
];

/// Step label for the structure phase.
pub const STRUCTURE_STEP: &str = "create project structure";

/// Step label for the project-wide file phase.
pub const PROJECT_FILES_STEP: &str = "generate project files";

/// Step label for one entity.
pub fn entity_step(name: &str) -> String {
    format!("generate code for entity {name}")
}

/// One file to render for an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedArtifact {
    pub kind: EntityArtifact,
    /// Path relative to the project root
    pub path: PathBuf,
}

/// Every artifact of one entity, in generation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityPlan {
    /// Index into [`ProjectView::entities`]
    pub index: usize,
    /// Entity name as configured, used to label errors
    pub name: String,
    pub artifacts: Vec<PlannedArtifact>,
}

/// The full output of a run, computed before anything is written.
#[derive(Debug, Clone)]
pub struct ProjectPlan {
    pub view: ProjectView,
    /// Directories relative to the project root, skeleton first
    pub dirs: Vec<PathBuf>,
    pub entities: Vec<EntityPlan>,
    /// Templated project-wide files in generation order
    pub project_files: Vec<(ProjectArtifact, PathBuf)>,
    /// Untemplated files written after the project-wide templates
    pub static_files: Vec<StaticFile>,
}

impl ProjectPlan {
    /// Every file path the plan writes, in write order.
    pub fn file_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![StaticFile::GoMod.path().to_path_buf()];
        for entity in &self.entities {
            paths.extend(entity.artifacts.iter().map(|a| a.path.clone()));
        }
        paths.extend(self.project_files.iter().map(|(_, p)| p.clone()));
        paths.extend(self.static_files.iter().map(|f| f.path().to_path_buf()));
        paths
    }
}

/// Output path of an entity artifact, from the entity's snake-case stem.
pub fn entity_artifact_path(kind: EntityArtifact, snake: &str) -> PathBuf {
    match kind {
        EntityArtifact::Domain => PathBuf::from(format!("internal/domain/{snake}.go")),
        EntityArtifact::RepositoryInterface => {
            PathBuf::from(format!("internal/repository/{snake}.go"))
        }
        EntityArtifact::UseCase => PathBuf::from(format!("internal/usecase/{snake}.go")),
        EntityArtifact::RestController => PathBuf::from(format!("internal/controller/{snake}.go")),
        EntityArtifact::RpcContract => PathBuf::from(format!("proto/{snake}.proto")),
        EntityArtifact::TestSuite => {
            PathBuf::from(format!("tests/unit/{snake}_controller_test.go"))
        }
        EntityArtifact::Storage(backend) => {
            PathBuf::from(format!("internal/repository/{backend}/{snake}.go"))
        }
        EntityArtifact::Migration(backend) => PathBuf::from(format!(
            "migrations/{backend}/001_create_{snake}.up.{}",
            backend.migration_extension()
        )),
    }
}

/// Output path of a templated project-wide artifact.
pub fn project_artifact_path(kind: ProjectArtifact) -> PathBuf {
    PathBuf::from(match kind {
        ProjectArtifact::Entrypoint => "cmd/server/main.go",
        ProjectArtifact::ConfigFile => "config.yaml",
        ProjectArtifact::Dockerfile => "Dockerfile",
        ProjectArtifact::DockerCompose => "docker-compose.yml",
    })
}

/// Entity artifact kinds in generation order for the given features and backends.
///
/// Migrations are written for every known backend, not just the configured ones.
pub fn entity_artifacts(features: Features, backends: &[Backend]) -> Vec<EntityArtifact> {
    let mut kinds = vec![
        EntityArtifact::Domain,
        EntityArtifact::RepositoryInterface,
        EntityArtifact::UseCase,
    ];
    if features.rest {
        kinds.push(EntityArtifact::RestController);
    }
    if features.grpc {
        kinds.push(EntityArtifact::RpcContract);
    }
    if features.tests {
        kinds.push(EntityArtifact::TestSuite);
    }
    kinds.extend(backends.iter().map(|b| EntityArtifact::Storage(*b)));
    if features.migrations {
        kinds.extend(Backend::ALL.iter().map(|b| EntityArtifact::Migration(*b)));
    }
    kinds
}

fn project_dirs(features: Features, backends: &[Backend]) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = SKELETON_DIRS.iter().map(PathBuf::from).collect();
    if features.grpc {
        dirs.push(PathBuf::from("proto"));
    }
    if features.tests {
        dirs.push(PathBuf::from("tests/unit"));
        dirs.push(PathBuf::from("tests/integration"));
    }
    for backend in backends {
        dirs.push(PathBuf::from(format!("internal/repository/{backend}")));
    }
    dirs
}

/// Resolve configured backend identifiers, dropping repeats.
///
/// An unknown identifier is reported against the first entity (the first
/// artifact that would need it). Without entities nothing needs a storage
/// template, so unknown identifiers are skipped.
fn resolve_backends(
    config: &ProjectConfig,
    registry: &TemplateRegistry,
) -> Result<Vec<Backend>, GenerateError> {
    let mut backends = Vec::with_capacity(config.repositories.len());
    for id in &config.repositories {
        let backend = match (registry.resolve_backend(id), config.entities.first()) {
            (Ok(backend), _) => backend,
            (Err(err), Some(entity)) => return Err(err.in_step(entity_step(&entity.name))),
            (Err(_), None) => {
                tracing::warn!(backend = %id, "unknown repository skipped; no entities use it");
                continue;
            }
        };
        if backends.contains(&backend) {
            tracing::warn!(backend = %backend, "repository listed more than once");
            continue;
        }
        backends.push(backend);
    }
    Ok(backends)
}

/// Compute the complete plan for `config` with the already-resolved `port`.
///
/// # Errors
///
/// Returns [`GenerateError::Step`] wrapping [`GenerateError::UnknownTemplate`]
/// when a repository identifier has no storage templates and at least one
/// entity would need them.
pub fn plan_project(
    config: &ProjectConfig,
    port: u16,
    registry: &TemplateRegistry,
) -> Result<ProjectPlan, GenerateError> {
    let backends = resolve_backends(config, registry)?;
    let features = config.features;
    let view = ProjectView::new(config, port, backends.clone());

    let kinds = entity_artifacts(features, &backends);
    let entities = config
        .entities
        .iter()
        .zip(&view.entities)
        .enumerate()
        .map(|(index, (entity, ev))| EntityPlan {
            index,
            name: entity.name.clone(),
            artifacts: kinds
                .iter()
                .map(|kind| PlannedArtifact {
                    kind: *kind,
                    path: entity_artifact_path(*kind, &ev.snake),
                })
                .collect(),
        })
        .collect();

    let mut project_kinds = vec![ProjectArtifact::Entrypoint, ProjectArtifact::ConfigFile];
    if features.docker {
        project_kinds.extend([ProjectArtifact::Dockerfile, ProjectArtifact::DockerCompose]);
    }
    let project_files = project_kinds
        .into_iter()
        .map(|kind| (kind, project_artifact_path(kind)))
        .collect();

    Ok(ProjectPlan {
        view,
        dirs: project_dirs(features, &backends),
        entities,
        project_files,
        static_files: vec![StaticFile::Readme, StaticFile::Makefile],
    })
}
