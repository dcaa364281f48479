use std::path::{Path, PathBuf};

use crate::config::{load_config, ProjectConfig};
use crate::generator::emit::Emitter;
use crate::generator::error::GenerateError;
use crate::generator::plan::{
    entity_step, plan_project, ProjectPlan, PROJECT_FILES_STEP, STRUCTURE_STEP,
};
use crate::generator::scaffold::StaticFile;
use crate::generator::templates::{Artifact, TemplateRegistry};

/// Knobs for a generation run that do not belong in the project document.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Parent directory of the project root (`<output_dir>/<name>`)
    pub output_dir: PathBuf,
    /// Seed for the port backfill; `None` draws from the thread RNG
    pub seed: Option<u64>,
    /// Port override taking precedence over the document
    pub port: Option<u16>,
}

impl GenerateOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        GenerateOptions {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Project root directory
    pub root: PathBuf,
    /// Written files relative to `root`, in write order
    pub files: Vec<PathBuf>,
    /// Port the generated service listens on
    pub port: u16,
}

/// Generate a full project tree from `config`.
///
/// The port is backfilled into `config` when unset. Planning completes
/// before the first directory is created, so configuration problems
/// (unknown backends included) never leave partial output. Once writing
/// starts, the first failure aborts the run and already-written files stay.
///
/// # Errors
///
/// Returns [`GenerateError`] wrapped in a [`GenerateError::Step`] naming the
/// phase or entity that failed.
pub fn generate_project(
    config: &mut ProjectConfig,
    options: &GenerateOptions,
) -> Result<GenerationReport, GenerateError> {
    config.validate()?;
    if let Some(port) = options.port.filter(|p| *p != 0) {
        config.port = Some(port);
    }
    let port = config.resolve_port(options.seed);

    let registry = TemplateRegistry::new();
    let plan = plan_project(config, port, &registry)?;
    let root = options.output_dir.join(&config.name);

    tracing::info!(
        project = %config.name,
        root = %root.display(),
        entities = plan.entities.len(),
        port,
        "generating project"
    );

    let mut emitter = Emitter::new(&root, &registry);
    create_structure(&mut emitter, &plan).map_err(|e| e.in_step(STRUCTURE_STEP))?;

    for entity in &plan.entities {
        tracing::info!(entity = %entity.name, artifacts = entity.artifacts.len(), "generating entity");
        let view = &plan.view.entities[entity.index];
        for artifact in &entity.artifacts {
            emitter
                .emit(
                    Artifact::Entity {
                        kind: artifact.kind,
                        entity: view,
                    },
                    &plan.view,
                    &artifact.path,
                )
                .map_err(|e| e.in_step(entity_step(&entity.name)))?;
        }
    }

    write_project_files(&mut emitter, &plan).map_err(|e| e.in_step(PROJECT_FILES_STEP))?;

    let files = emitter.into_written();
    tracing::info!(root = %root.display(), files = files.len(), "project generated");
    Ok(GenerationReport { root, files, port })
}

/// Load a configuration file and generate it.
///
/// # Errors
///
/// Returns [`GenerateError::Config`] before touching the filesystem if the
/// file cannot be loaded, otherwise whatever [`generate_project`] returns.
pub fn generate_project_from_path(
    config_path: &Path,
    options: &GenerateOptions,
) -> Result<GenerationReport, GenerateError> {
    let mut config = load_config(config_path)?;
    generate_project(&mut config, options)
}

fn create_structure(emitter: &mut Emitter<'_>, plan: &ProjectPlan) -> Result<(), GenerateError> {
    for dir in &plan.dirs {
        emitter.create_dir(dir)?;
    }
    emitter.write_static(
        StaticFile::GoMod.path(),
        &StaticFile::GoMod.render(&plan.view),
    )
}

fn write_project_files(emitter: &mut Emitter<'_>, plan: &ProjectPlan) -> Result<(), GenerateError> {
    for (kind, path) in &plan.project_files {
        emitter.emit(Artifact::Project(*kind), &plan.view, path)?;
    }
    for file in &plan.static_files {
        emitter.write_static(file.path(), &file.render(&plan.view))?;
    }
    Ok(())
}
