use serde::Deserialize;

use crate::error::DtoGenError;
use crate::json_pointer::Pointer;

/// Key of the optional settings entry at the top of the schema document.
pub const SETTINGS_KEY: &str = "settings";

/// One node of the schema tree.
///
/// Leaves are tagged with their kind when the document is loaded, so an
/// integer and a float never get confused later on. Maps keep the key order of
/// the source document; that order becomes the field order of the generated
/// class.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<SchemaNode>),
    Map(Vec<(String, SchemaNode)>),
}

impl SchemaNode {
    /// Looks up `key` when this node is a map.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short kind name used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }
}

impl From<serde_json::Value> for SchemaNode {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => n.as_f64().map_or(Self::Null, Self::Float),
            },
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

/// The `settings` entry of a schema document.
///
/// `path` is relative to the generator's base directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DocSettings {
    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub namespace: Option<String>,
}

/// A whole schema document: named API documents plus optional settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiDoc {
    pub settings: Option<DocSettings>,
    pub documents: Vec<(String, SchemaNode)>,
}

impl ApiDoc {
    /// Parse a schema document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `DtoGenError::JsonError` if the text is not JSON, or
    /// `DtoGenError::InvalidSchema` if the root is not an object or the
    /// `settings` entry is malformed.
    pub fn from_json(schema_json: &str) -> Result<Self, DtoGenError> {
        let value: serde_json::Value = serde_json::from_str(schema_json)?;
        Self::from_value(value)
    }

    /// Build a schema document from an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns `DtoGenError::InvalidSchema` if the root is not an object or the
    /// `settings` entry is malformed.
    pub fn from_value(value: serde_json::Value) -> Result<Self, DtoGenError> {
        let serde_json::Value::Object(root) = value else {
            return Err(DtoGenError::invalid_schema(
                Pointer::root().as_str(),
                "schema root must be an object",
            ));
        };

        let mut doc: Self = Self::default();
        for (name, config) in root {
            if name == SETTINGS_KEY {
                let settings: DocSettings = serde_json::from_value(config).map_err(|e| {
                    DtoGenError::invalid_schema(
                        Pointer::root().child(SETTINGS_KEY).as_str(),
                        e.to_string(),
                    )
                })?;
                doc.settings = Some(settings);
            } else {
                doc.documents.push((name, SchemaNode::from(config)));
            }
        }
        Ok(doc)
    }
}
