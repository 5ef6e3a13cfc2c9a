//! Intermediate representation handed from the walker to the renderers.

use std::path::{Path, PathBuf};

/// Literal default value of a property.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

/// One public field of a generated class.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDef {
    pub name: String,
    /// Primitive type name or a fully-qualified class reference.
    pub type_ref: String,
    pub default: Option<Literal>,
    /// `None` means required.
    pub required: Option<bool>,
}

impl PropertyDef {
    /// True when the property belongs on the exclusion list.
    #[must_use]
    pub const fn is_excluded(&self) -> bool {
        matches!(self.required, Some(false))
    }
}

/// A DTO class to emit.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeDef {
    pub name: String,
    pub namespace: String,
    /// Directory relative to the output root; empty for top-level shapes.
    pub dir: PathBuf,
    pub properties: Vec<PropertyDef>,
}

/// A typed collection wrapper around one nested shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionDef {
    pub name: String,
    /// Fully-qualified reference to the element class.
    pub element_type: String,
    pub namespace: String,
    pub dir: PathBuf,
}

/// Anything that becomes one output file.
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    Shape(ShapeDef),
    Collection(CollectionDef),
}

impl Artifact {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Shape(shape) => &shape.name,
            Self::Collection(collection) => &collection.name,
        }
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        match self {
            Self::Shape(shape) => &shape.namespace,
            Self::Collection(collection) => &collection.namespace,
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        match self {
            Self::Shape(shape) => &shape.dir,
            Self::Collection(collection) => &collection.dir,
        }
    }

    /// Path of the output file relative to the output root, e.g.
    /// `Nested/OrderDtoRequestItems.php`.
    #[must_use]
    pub fn relative_path(&self, extension: &str) -> PathBuf {
        self.dir().join(format!("{}.{extension}", self.name()))
    }
}
