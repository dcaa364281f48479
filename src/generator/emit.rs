use std::fs;
use std::path::{Path, PathBuf};

use super::error::GenerateError;
use super::templates::{Artifact, ProjectView, TemplateRegistry};

/// Renders artifacts and writes them under a project root.
///
/// Every write is an unconditional overwrite; parent directories are created
/// on demand. The emitter keeps the list of files it wrote so callers can
/// report them.
#[derive(Debug)]
pub struct Emitter<'a> {
    root: PathBuf,
    registry: &'a TemplateRegistry,
    written: Vec<PathBuf>,
}

impl<'a> Emitter<'a> {
    pub fn new(root: impl Into<PathBuf>, registry: &'a TemplateRegistry) -> Self {
        Emitter {
            root: root.into(),
            registry,
            written: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create `rel` and any missing parents under the root.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Io`] naming the directory on failure.
    pub fn create_dir(&self, rel: &Path) -> Result<(), GenerateError> {
        let dir = self.root.join(rel);
        fs::create_dir_all(&dir).map_err(|e| GenerateError::io(&dir, e))
    }

    /// Render `artifact` and write it to `rel`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Render`] if the template fails and
    /// [`GenerateError::Io`] if the file cannot be written.
    pub fn emit(
        &mut self,
        artifact: Artifact<'_>,
        project: &ProjectView,
        rel: &Path,
    ) -> Result<(), GenerateError> {
        let rendered = self.registry.render(artifact, project)?;
        self.write(rel, &rendered)?;
        tracing::debug!(path = %rel.display(), artifact = %artifact.describe(), "emitted artifact");
        Ok(())
    }

    /// Write precomputed text to `rel`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Io`] if the file cannot be written.
    pub fn write_static(&mut self, rel: &Path, contents: &str) -> Result<(), GenerateError> {
        self.write(rel, contents)?;
        tracing::debug!(path = %rel.display(), "wrote static file");
        Ok(())
    }

    /// Files written so far, relative to the root, in write order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn into_written(self) -> Vec<PathBuf> {
        self.written
    }

    fn write(&mut self, rel: &Path, contents: &str) -> Result<(), GenerateError> {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| GenerateError::io(parent, e))?;
        }
        fs::write(&path, contents).map_err(|e| GenerateError::io(&path, e))?;
        self.written.push(rel.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::config::{Entity, Features, Field, ProjectConfig};
    use crate::generator::templates::{Backend, EntityArtifact, ProjectArtifact};

    fn project() -> ProjectView {
        let config = ProjectConfig {
            name: "shop".into(),
            module: "shop".into(),
            entities: vec![Entity {
                name: "Order".into(),
                fields: vec![Field {
                    name: "Total".into(),
                    ty: "float64".into(),
                    tags: vec![],
                    required: false,
                    unique: false,
                }],
            }],
            repositories: vec!["postgres".into()],
            features: Features::default(),
            port: Some(8080),
        };
        ProjectView::new(&config, 8080, vec![Backend::Postgres])
    }

    #[test]
    fn test_emit_creates_parents_and_records_path() {
        let dir = tempfile::tempdir().unwrap();
        let registry = TemplateRegistry::new();
        let view = project();
        let mut emitter = Emitter::new(dir.path(), &registry);
        let rel = Path::new("internal/repository/postgres/order.go");
        emitter
            .emit(
                Artifact::Entity {
                    kind: EntityArtifact::Storage(Backend::Postgres),
                    entity: &view.entities[0],
                },
                &view,
                rel,
            )
            .unwrap();
        let text = fs::read_to_string(dir.path().join(rel)).unwrap();
        assert!(text.starts_with("package postgres"));
        assert_eq!(emitter.written(), &[rel.to_path_buf()]);
    }

    #[test]
    fn test_emit_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.yaml"), "stale: true\n").unwrap();
        let registry = TemplateRegistry::new();
        let view = project();
        let mut emitter = Emitter::new(dir.path(), &registry);
        emitter
            .emit(
                Artifact::Project(ProjectArtifact::ConfigFile),
                &view,
                Path::new("config.yaml"),
            )
            .unwrap();
        let text = fs::read_to_string(dir.path().join("config.yaml")).unwrap();
        assert!(text.starts_with("port: 8080"));
        assert!(!text.contains("stale"));
    }

    #[test]
    fn test_write_failure_names_path() {
        let dir = tempfile::tempdir().unwrap();
        // a file where a directory is expected
        fs::write(dir.path().join("internal"), "").unwrap();
        let registry = TemplateRegistry::new();
        let mut emitter = Emitter::new(dir.path(), &registry);
        let err = emitter
            .write_static(Path::new("internal/domain/order.go"), "package domain\n")
            .unwrap_err();
        assert!(matches!(err, GenerateError::Io { .. }));
        assert!(err.to_string().contains("internal"));
        assert!(emitter.written().is_empty());
    }
}
