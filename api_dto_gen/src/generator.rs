//! Writes generated DTOs to the output tree.

use std::path::PathBuf;

use crate::error::DtoGenError;
use crate::fs::{Filesystem, LocalFilesystem};
use crate::ir::{Artifact, CollectionDef, ShapeDef};
use crate::render::{self, FILE_EXTENSION};
use crate::schema::ApiDoc;
use crate::settings::GenerateSettings;
use crate::walker;

/// Owns the output tree: clears it, recreates it and fills it with one file
/// per shape and per collection wrapper.
#[derive(Debug, Clone)]
pub struct Generator<F: Filesystem = LocalFilesystem> {
    settings: GenerateSettings,
    fs: F,
}

impl Generator<LocalFilesystem> {
    #[must_use]
    pub fn new(settings: GenerateSettings) -> Self {
        Self {
            settings,
            fs: LocalFilesystem,
        }
    }
}

impl<F: Filesystem> Generator<F> {
    #[must_use]
    pub fn with_filesystem(settings: GenerateSettings, fs: F) -> Self {
        Self { settings, fs }
    }

    /// Remove the output directory. Missing directories are not an error.
    ///
    /// # Errors
    ///
    /// Returns `DtoGenError::Filesystem` if the directory cannot be removed.
    pub fn clear(&self) -> Result<(), DtoGenError> {
        let root: &PathBuf = &self.settings.output_dir;
        if self.fs.is_dir(root) {
            self.fs.remove_dir_all(root)?;
            tracing::info!(path = %root.display(), "cleared output directory");
        } else {
            tracing::debug!(path = %root.display(), "output directory already absent");
        }
        Ok(())
    }

    /// Create the output directory and its parents.
    ///
    /// # Errors
    ///
    /// Returns `DtoGenError::Filesystem` if the directory cannot be created.
    pub fn prepare(&self) -> Result<(), DtoGenError> {
        self.fs.create_dir_all(&self.settings.output_dir)
    }

    /// Walk `doc` without touching the output tree.
    ///
    /// # Errors
    ///
    /// Returns `DtoGenError::InvalidSchema` if a node cannot be interpreted.
    pub fn plan(&self, doc: &ApiDoc) -> Result<Vec<Artifact>, DtoGenError> {
        walker::walk_doc(doc, &self.settings.namespace)
    }

    /// Regenerate the whole output tree from `doc` and return the written
    /// paths in write order.
    ///
    /// The schema is walked before anything is removed, so an invalid schema
    /// leaves the previous output in place. A filesystem failure aborts the
    /// run and keeps whatever was already written.
    ///
    /// # Errors
    ///
    /// Returns `DtoGenError::InvalidSchema` for a malformed schema or
    /// `DtoGenError::Filesystem` for a failed storage operation.
    pub fn generate(&self, doc: &ApiDoc) -> Result<Vec<PathBuf>, DtoGenError> {
        let artifacts: Vec<Artifact> = self.plan(doc)?;

        self.clear()?;
        self.prepare()?;

        let mut written: Vec<PathBuf> = Vec::with_capacity(artifacts.len());
        for artifact in &artifacts {
            let path: PathBuf = match artifact {
                Artifact::Shape(shape) => self.emit_shape(shape)?,
                Artifact::Collection(collection) => self.emit_collection(collection)?,
            };
            written.push(path);
        }

        tracing::info!(
            files = written.len(),
            path = %self.settings.output_dir.display(),
            "generated DTOs"
        );
        Ok(written)
    }

    /// Render and write one DTO class.
    ///
    /// # Errors
    ///
    /// Returns `DtoGenError::Filesystem` if the file cannot be written.
    pub fn emit_shape(&self, shape: &ShapeDef) -> Result<PathBuf, DtoGenError> {
        let mut contents: Vec<u8> = Vec::new();
        render::emit_shape(shape, &self.settings.dto_base_class, &mut contents)?;
        self.write_artifact(&shape.dir, &shape.name, &contents)
    }

    /// Render and write one collection wrapper.
    ///
    /// # Errors
    ///
    /// Returns `DtoGenError::Filesystem` if the file cannot be written.
    pub fn emit_collection(&self, collection: &CollectionDef) -> Result<PathBuf, DtoGenError> {
        let mut contents: Vec<u8> = Vec::new();
        render::emit_collection(
            collection,
            &self.settings.collection_base_class,
            &mut contents,
        )?;
        self.write_artifact(&collection.dir, &collection.name, &contents)
    }

    fn write_artifact(
        &self,
        dir: &std::path::Path,
        name: &str,
        contents: &[u8],
    ) -> Result<PathBuf, DtoGenError> {
        let dir: PathBuf = self.settings.output_dir.join(dir);
        if !self.fs.is_dir(&dir) {
            self.fs.create_dir_all(&dir)?;
        }
        let path: PathBuf = dir.join(format!("{name}.{FILE_EXTENSION}"));
        self.fs.write(&path, contents)?;
        tracing::debug!(path = %path.display(), "wrote file");
        Ok(path)
    }
}
