//! Turns schema documents into shapes and collection wrappers.
//!
//! Walking is depth-first: every nested shape (and its collection wrapper) is
//! collected before the shape that references it, because a child's name is
//! built from its parent's name.

use std::path::{Path, PathBuf};

use crate::error::DtoGenError;
use crate::ir::{Artifact, CollectionDef, Literal, PropertyDef, ShapeDef};
use crate::json_pointer::Pointer;
use crate::naming;
use crate::schema::{ApiDoc, SchemaNode};

/// Only these request sections become properties of the request shape.
pub const REQUEST_SECTIONS: &[&str] = &["headers", "params", "body"];

/// Walk every document of `doc` and return all artifacts in emission order.
///
/// # Errors
///
/// Returns `DtoGenError::InvalidSchema` if a node cannot be interpreted or two
/// artifacts would share a class name and file.
pub fn walk_doc(doc: &ApiDoc, namespace: &str) -> Result<Vec<Artifact>, DtoGenError> {
    let mut collected: Vec<Artifact> = Vec::new();
    for (name, config) in &doc.documents {
        walk_document(
            name,
            config,
            namespace,
            &Pointer::root().child(name),
            &mut collected,
        )?;
    }
    Ok(collected)
}

/// Walk one document: its request shape and one shape per response status.
///
/// # Errors
///
/// Returns `DtoGenError::InvalidSchema` if a section or node is malformed.
pub fn walk_document(
    name: &str,
    config: &SchemaNode,
    namespace: &str,
    pointer: &Pointer,
    collected: &mut Vec<Artifact>,
) -> Result<(), DtoGenError> {
    let dto_class: String = naming::dto_class_name(name);

    if let Some(request) = config.get("request").filter(|r| !r.is_null()) {
        let request_pointer: Pointer = pointer.child("request");
        let entries: &[(String, SchemaNode)] = expect_map(request, &request_pointer)?;
        let sections: Vec<(String, SchemaNode)> = entries
            .iter()
            .filter(|(key, _)| REQUEST_SECTIONS.contains(&key.as_str()))
            .cloned()
            .collect();
        walk_shape(
            &format!("{dto_class}Request"),
            &sections,
            namespace,
            Path::new(""),
            &request_pointer,
            collected,
        )?;
    }

    if let Some(response) = config.get("response").filter(|r| !r.is_null()) {
        let response_pointer: Pointer = pointer.child("response");
        for (status_code, status_config) in expect_map(response, &response_pointer)? {
            if status_config.is_null() {
                continue;
            }
            let status_pointer: Pointer = response_pointer.child(status_code);
            let entries: &[(String, SchemaNode)] = expect_map(status_config, &status_pointer)?;
            walk_shape(
                &format!("{dto_class}Response{status_code}"),
                entries,
                namespace,
                Path::new(""),
                &status_pointer,
                collected,
            )?;
        }
    }

    Ok(())
}

/// Walk `entries` and collect the resulting shape after all of its children.
fn walk_shape(
    shape_name: &str,
    entries: &[(String, SchemaNode)],
    namespace: &str,
    dir: &Path,
    pointer: &Pointer,
    collected: &mut Vec<Artifact>,
) -> Result<(), DtoGenError> {
    ensure_unique(collected, namespace, shape_name, pointer)?;
    let properties: Vec<PropertyDef> = walk(shape_name, entries, namespace, dir, pointer, collected)?;
    tracing::debug!(shape = shape_name, properties = properties.len(), "collected shape");
    collected.push(Artifact::Shape(ShapeDef {
        name: shape_name.to_string(),
        namespace: namespace.to_string(),
        dir: dir.to_path_buf(),
        properties,
    }));
    Ok(())
}

/// Two artifacts with one name in one namespace would be written to the same
/// file.
fn ensure_unique(
    collected: &[Artifact],
    namespace: &str,
    name: &str,
    pointer: &Pointer,
) -> Result<(), DtoGenError> {
    if collected
        .iter()
        .any(|a| a.namespace() == namespace && a.name() == name)
    {
        return Err(DtoGenError::invalid_schema(
            pointer.as_str(),
            format!("duplicate shape name {namespace}\\{name}"),
        ));
    }
    Ok(())
}

/// Build the property list of `shape_name`.
///
/// Nested maps and lists of maps register their own shapes (and wrappers) in
/// `collected` under the `Nested` namespace and directory.
///
/// # Errors
///
/// Returns `DtoGenError::InvalidSchema` if a node cannot be interpreted or two
/// nested shapes end up with the same name.
pub fn walk(
    shape_name: &str,
    entries: &[(String, SchemaNode)],
    namespace: &str,
    dir: &Path,
    pointer: &Pointer,
    collected: &mut Vec<Artifact>,
) -> Result<Vec<PropertyDef>, DtoGenError> {
    let mut properties: Vec<PropertyDef> = Vec::with_capacity(entries.len());
    let nested: Location = Location {
        namespace: naming::nested_namespace(namespace),
        dir: dir.join(naming::NESTED),
    };

    for (key, value) in entries {
        let name: String = naming::field_name(key);
        let node_pointer: Pointer = pointer.child(key);
        let child: String = naming::child_shape_name(shape_name, &name);

        let property: PropertyDef = match value {
            SchemaNode::Map(map) => {
                if let Some(type_node) = value.get("type").filter(|t| !t.is_null()) {
                    explicit_property(name, type_node, value, &node_pointer)?
                } else if let Some(element) = value.get("0").filter(|e| !e.is_null()) {
                    // A map keyed "0" is read as a positional collection.
                    collection_property(
                        name,
                        &child,
                        element,
                        &node_pointer.child("0"),
                        &nested,
                        collected,
                    )?
                } else {
                    walk_shape(
                        &child,
                        map,
                        &nested.namespace,
                        &nested.dir,
                        &node_pointer,
                        collected,
                    )?;
                    reference_property(name, naming::qualified(&nested.namespace, &child))
                }
            }
            SchemaNode::List(items) => match items.first() {
                Some(element) => collection_property(
                    name,
                    &child,
                    element,
                    &node_pointer.index(0),
                    &nested,
                    collected,
                )?,
                // An empty list carries no element shape; it degrades to an
                // empty nested class.
                None => {
                    walk_shape(
                        &child,
                        &[],
                        &nested.namespace,
                        &nested.dir,
                        &node_pointer,
                        collected,
                    )?;
                    reference_property(name, naming::qualified(&nested.namespace, &child))
                }
            },
            scalar => scalar_property(name, scalar),
        };

        upsert(&mut properties, property);
    }

    Ok(properties)
}

/// Namespace and directory that nested shapes of one parent share.
struct Location {
    namespace: String,
    dir: PathBuf,
}

/// Walk `element` as shape `child` and register `<child>Collection` next to
/// it. The property is typed with the collection.
fn collection_property(
    name: String,
    child: &str,
    element: &SchemaNode,
    element_pointer: &Pointer,
    nested: &Location,
    collected: &mut Vec<Artifact>,
) -> Result<PropertyDef, DtoGenError> {
    let SchemaNode::Map(element_entries) = element else {
        return Err(DtoGenError::invalid_schema(
            element_pointer.as_str(),
            format!(
                "collection element must be a map of properties, found {}",
                element.kind()
            ),
        ));
    };
    walk_shape(
        child,
        element_entries,
        &nested.namespace,
        &nested.dir,
        element_pointer,
        collected,
    )?;

    let collection: String = naming::collection_name(child);
    ensure_unique(collected, &nested.namespace, &collection, element_pointer)?;
    collected.push(Artifact::Collection(CollectionDef {
        name: collection.clone(),
        element_type: naming::qualified(&nested.namespace, child),
        namespace: nested.namespace.clone(),
        dir: nested.dir.clone(),
    }));
    Ok(reference_property(
        name,
        naming::qualified(&nested.namespace, &collection),
    ))
}

/// Keys that normalize to the same field name keep the first position and the
/// last definition.
fn upsert(properties: &mut Vec<PropertyDef>, property: PropertyDef) {
    if let Some(existing) = properties.iter_mut().find(|p| p.name == property.name) {
        *existing = property;
    } else {
        properties.push(property);
    }
}

fn expect_map<'a>(
    node: &'a SchemaNode,
    pointer: &Pointer,
) -> Result<&'a [(String, SchemaNode)], DtoGenError> {
    match node {
        SchemaNode::Map(entries) => Ok(entries),
        other => Err(DtoGenError::invalid_schema(
            pointer.as_str(),
            format!("expected a map, found {}", other.kind()),
        )),
    }
}

fn reference_property(name: String, type_ref: String) -> PropertyDef {
    PropertyDef {
        name,
        type_ref,
        default: None,
        required: None,
    }
}

/// A map with a `type` key is taken as already resolved.
fn explicit_property(
    name: String,
    type_node: &SchemaNode,
    node: &SchemaNode,
    pointer: &Pointer,
) -> Result<PropertyDef, DtoGenError> {
    let SchemaNode::String(type_ref) = type_node else {
        return Err(DtoGenError::invalid_schema(
            pointer.child("type").as_str(),
            format!("type must be a string, found {}", type_node.kind()),
        ));
    };

    let default: Option<Literal> = match node.get("default") {
        None | Some(SchemaNode::Null) => None,
        Some(value) => Some(literal(value).ok_or_else(|| {
            DtoGenError::invalid_schema(
                pointer.child("default").as_str(),
                format!("default must be a scalar, found {}", value.kind()),
            )
        })?),
    };

    let required: Option<bool> = match node.get("required") {
        None | Some(SchemaNode::Null) => None,
        Some(SchemaNode::Bool(b)) => Some(*b),
        Some(other) => {
            return Err(DtoGenError::invalid_schema(
                pointer.child("required").as_str(),
                format!("required must be a boolean, found {}", other.kind()),
            ));
        }
    };

    Ok(PropertyDef {
        name,
        type_ref: type_ref.clone(),
        default,
        required,
    })
}

/// A scalar leaf: the type comes from the leaf's kind, the value becomes the
/// default.
fn scalar_property(name: String, node: &SchemaNode) -> PropertyDef {
    let type_ref: &str = match node {
        SchemaNode::Bool(_) => "bool",
        SchemaNode::Integer(_) => "int",
        SchemaNode::Float(_) => "float",
        SchemaNode::String(_) => "string",
        _ => "null",
    };
    PropertyDef {
        name,
        type_ref: type_ref.to_string(),
        default: literal(node),
        required: None,
    }
}

fn literal(node: &SchemaNode) -> Option<Literal> {
    match node {
        SchemaNode::Bool(b) => Some(Literal::Bool(*b)),
        SchemaNode::Integer(i) => Some(Literal::Integer(*i)),
        SchemaNode::Float(f) => Some(Literal::Float(*f)),
        SchemaNode::String(s) => Some(Literal::String(s.clone())),
        SchemaNode::Null | SchemaNode::List(_) | SchemaNode::Map(_) => None,
    }
}
