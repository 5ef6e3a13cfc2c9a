//! Example matching the README: every supported schema node kind.
//!
//! Contains only the input schema and the conversion logic; the generated PHP
//! is written to stdout instead of the output tree.

use std::io;

use api_dto_gen::{
    ApiDoc, Artifact, FILE_EXTENSION, GenerateSettings, emit_collection, emit_shape, walk_doc,
};

const SCHEMA_JSON: &str = r#"{
  "order": {
    "request": {
      "headers": { "x-api-key": "secret" },
      "body": {
        "user-name": "bob",
        "express": false,
        "weight": 1.5,
        "note": { "type": "string", "required": false },
        "shipping-address": { "city": "Oslo", "zip": "0150" },
        "items": [{ "sku": "A1", "qty": 1 }]
      }
    },
    "response": {
      "201": { "id": 1 },
      "422": { "message": "invalid order" }
    }
  }
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings: GenerateSettings = GenerateSettings::default();
    let doc: ApiDoc = ApiDoc::from_json(SCHEMA_JSON)?;
    let mut stdout: io::Stdout = io::stdout();

    for artifact in walk_doc(&doc, &settings.namespace)? {
        println!("// {}", artifact.relative_path(FILE_EXTENSION).display());
        match &artifact {
            Artifact::Shape(shape) => emit_shape(shape, &settings.dto_base_class, &mut stdout)?,
            Artifact::Collection(collection) => {
                emit_collection(collection, &settings.collection_base_class, &mut stdout)?;
            }
        }
        println!();
    }
    Ok(())
}
