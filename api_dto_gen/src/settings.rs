//! Settings for DTO generation.

use std::path::{Component, Path, PathBuf};

use crate::error::DtoGenError;
use crate::json_pointer::Pointer;
use crate::schema::{DocSettings, SETTINGS_KEY};

pub const DEFAULT_OUTPUT_DIR: &str = "src/Dto/Api";
pub const DEFAULT_NAMESPACE: &str = "App\\Dto\\Api";
pub const DEFAULT_DTO_BASE_CLASS: &str = "Eva\\Common\\NestedDto";
pub const DEFAULT_COLLECTION_BASE_CLASS: &str = "Eva\\Common\\ObjectCollection";

/// Settings that control where and how DTOs are generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSettings {
    /// Directory removed by `clear` and filled by `generate`.
    pub output_dir: PathBuf,

    /// Root namespace of the generated classes.
    pub namespace: String,

    /// Class every DTO extends; reads `EXCLUDE_PROPERTIES`.
    pub dto_base_class: String,

    /// Class every collection wrapper extends.
    pub collection_base_class: String,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            namespace: DEFAULT_NAMESPACE.to_string(),
            dto_base_class: DEFAULT_DTO_BASE_CLASS.to_string(),
            collection_base_class: DEFAULT_COLLECTION_BASE_CLASS.to_string(),
        }
    }
}

impl GenerateSettings {
    /// Default settings with the output directory resolved against `base_dir`.
    #[must_use]
    pub fn in_dir(base_dir: &Path) -> Self {
        Self {
            output_dir: base_dir.join(DEFAULT_OUTPUT_DIR),
            ..Self::default()
        }
    }

    /// Apply the schema document's `settings` entry.
    ///
    /// `path` is taken relative to `base_dir`, also when written with a
    /// leading `/`.
    ///
    /// # Errors
    ///
    /// Returns `DtoGenError::InvalidSchema` at `/settings/path` if the path
    /// would resolve to `base_dir` itself, one of its ancestors, or leave it
    /// through `..`.
    pub fn with_doc_settings(
        mut self,
        doc_settings: &DocSettings,
        base_dir: &Path,
    ) -> Result<Self, DtoGenError> {
        if let Some(path) = &doc_settings.path {
            self.output_dir = resolve_output_dir(base_dir, Path::new(path.trim_start_matches('/')))
                .ok_or_else(|| {
                    DtoGenError::invalid_schema(
                        Pointer::root().child(SETTINGS_KEY).child("path").as_str(),
                        format!("output path {path:?} must name a directory below the base directory"),
                    )
                })?;
        }
        if let Some(namespace) = &doc_settings.namespace {
            self.namespace = namespace.trim_matches('\\').to_string();
        }
        Ok(self)
    }
}

/// Join `output` onto `base_dir`, refusing any result that `clear` could not
/// safely remove: no named component, a `..` component, or a directory that
/// contains `base_dir`.
#[must_use]
pub fn resolve_output_dir(base_dir: &Path, output: &Path) -> Option<PathBuf> {
    let mut named: bool = false;
    for component in output.components() {
        match component {
            Component::ParentDir => return None,
            Component::Normal(_) => named = true,
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
        }
    }
    if !named {
        return None;
    }

    let resolved: PathBuf = base_dir.join(output);
    if base_dir.starts_with(&resolved) {
        return None;
    }
    Some(resolved)
}
