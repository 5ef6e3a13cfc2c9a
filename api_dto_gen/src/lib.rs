//! Generate PHP data-transfer objects from declarative API request/response
//! descriptions.
//!
//! A schema document maps document names to optional `request` and
//! `response` sections. Every section becomes a DTO class; nested maps become
//! nested classes and lists of maps become a nested class plus a typed
//! collection wrapper, all placed under `Nested` subdirectories.

mod error;
mod fs;
mod generator;
mod ir;
mod json_pointer;
mod naming;
mod render;
mod schema;
mod settings;
mod walker;

pub use error::DtoGenError;
pub use fs::{Filesystem, LocalFilesystem};
pub use generator::Generator;
pub use ir::{Artifact, CollectionDef, Literal, PropertyDef, ShapeDef};
pub use json_pointer::Pointer;
pub use render::{FILE_EXTENSION, emit_collection, emit_shape};
pub use schema::{ApiDoc, DocSettings, SchemaNode};
pub use settings::{DEFAULT_NAMESPACE, DEFAULT_OUTPUT_DIR, GenerateSettings, resolve_output_dir};
pub use walker::{walk, walk_doc, walk_document};

use std::path::{Path, PathBuf};

/// Read a schema document from a JSON file.
///
/// # Errors
///
/// Returns `DtoGenError::Filesystem` if reading the file fails, or another
/// `DtoGenError` if the JSON is invalid or the root or `settings` entry is
/// malformed.
pub fn load_schema(path: impl AsRef<Path>) -> Result<ApiDoc, DtoGenError> {
    let path: &Path = path.as_ref();
    let schema_json: String =
        std::fs::read_to_string(path).map_err(|source| DtoGenError::Filesystem {
            path: path.to_path_buf(),
            source,
        })?;
    ApiDoc::from_json(&schema_json)
}

/// Load a schema file, apply its `settings` entry on top of `settings`, and
/// regenerate the output tree. Returns the written paths.
///
/// # Errors
///
/// Returns `DtoGenError` if the schema cannot be loaded or interpreted, or a
/// filesystem operation fails.
pub fn generate_from_file(
    schema_path: impl AsRef<Path>,
    settings: GenerateSettings,
    base_dir: &Path,
) -> Result<Vec<PathBuf>, DtoGenError> {
    let doc: ApiDoc = load_schema(schema_path)?;
    let settings: GenerateSettings = match &doc.settings {
        Some(doc_settings) => settings.with_doc_settings(doc_settings, base_dir)?,
        None => settings,
    };
    Generator::new(settings).generate(&doc)
}
