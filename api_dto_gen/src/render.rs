//! PHP renderers for the two kinds of generated files.

use std::io::Write;

use crate::ir::{CollectionDef, Literal, ShapeDef};

/// Extension of every generated file.
pub const FILE_EXTENSION: &str = "php";

const GENERATED_BANNER: &str = "// Generated by api-dto-gen. Do not edit manually.";

/// Last segment of a class path: `Eva\Common\NestedDto` -> `NestedDto`.
fn short_class_name(class: &str) -> &str {
    class.rsplit('\\').next().unwrap_or(class)
}

/// Quote a string as a PHP single-quoted literal.
fn php_string(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn php_literal(literal: &Literal) -> String {
    match literal {
        Literal::Bool(b) => b.to_string(),
        Literal::Integer(i) => i.to_string(),
        // Debug keeps the fractional part (`2.0`), so the value stays a float.
        Literal::Float(f) => format!("{f:?}"),
        Literal::String(s) => php_string(s),
    }
}

/// Emit the file preamble shared by both file kinds.
fn emit_header<W: Write>(writer: &mut W, namespace: &str, base_class: &str) -> std::io::Result<()> {
    writeln!(writer, "<?php")?;
    writeln!(writer)?;
    writeln!(writer, "{GENERATED_BANNER}")?;
    writeln!(writer)?;
    writeln!(writer, "declare(strict_types=1);")?;
    writeln!(writer)?;
    writeln!(writer, "namespace {};", namespace.trim_start_matches('\\'))?;
    writeln!(writer)?;
    writeln!(writer, "use {};", base_class.trim_start_matches('\\'))?;
    writeln!(writer)?;
    Ok(())
}

/// Emit a DTO class extending `dto_base_class`.
///
/// Properties keep their order; those marked `required: false` are listed in
/// `EXCLUDE_PROPERTIES`, which the base class reads when serializing.
///
/// # Errors
///
/// Returns any error from `writer`.
pub fn emit_shape<W: Write>(
    shape: &ShapeDef,
    dto_base_class: &str,
    writer: &mut W,
) -> std::io::Result<()> {
    emit_header(writer, &shape.namespace, dto_base_class)?;

    let excluded: Vec<String> = shape
        .properties
        .iter()
        .filter(|p| p.is_excluded())
        .map(|p| php_string(&p.name))
        .collect();

    writeln!(
        writer,
        "class {} extends {}",
        shape.name,
        short_class_name(dto_base_class)
    )?;
    writeln!(writer, "{{")?;
    writeln!(
        writer,
        "    protected const EXCLUDE_PROPERTIES = [{}];",
        excluded.join(", ")
    )?;
    if !shape.properties.is_empty() {
        writeln!(writer)?;
    }
    for property in &shape.properties {
        write!(writer, "    public {} ${}", property.type_ref, property.name)?;
        if let Some(default) = &property.default {
            write!(writer, " = {}", php_literal(default))?;
        }
        writeln!(writer, ";")?;
    }
    writeln!(writer, "}}")?;
    Ok(())
}

/// Emit a collection wrapper that hands its element class to the base
/// collection constructor.
///
/// # Errors
///
/// Returns any error from `writer`.
pub fn emit_collection<W: Write>(
    collection: &CollectionDef,
    collection_base_class: &str,
    writer: &mut W,
) -> std::io::Result<()> {
    emit_header(writer, &collection.namespace, collection_base_class)?;
    writeln!(
        writer,
        "class {} extends {}",
        collection.name,
        short_class_name(collection_base_class)
    )?;
    writeln!(writer, "{{")?;
    writeln!(writer, "    public function __construct(array $collection)")?;
    writeln!(writer, "    {{")?;
    writeln!(
        writer,
        "        parent::__construct('{}', $collection);",
        collection.element_type
    )?;
    writeln!(writer, "    }}")?;
    writeln!(writer, "}}")?;
    Ok(())
}
