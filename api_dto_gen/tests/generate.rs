//! End-to-end tests: generate DTOs into a temporary directory and inspect the
//! resulting tree.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use api_dto_gen::{ApiDoc, DtoGenError, GenerateSettings, Generator, generate_from_file, load_schema};
use tempfile::TempDir;

const ORDER_SCHEMA: &str = r#"{
    "order": {
        "request": {
            "method": "POST",
            "headers": { "x-request-id": "abc" },
            "body": {
                "user-name": "bob",
                "gift": false,
                "note": { "type": "string", "required": false },
                "coupon": { "type": "string", "required": true },
                "items": [{ "sku": "A1", "qty": 1, "price": 9.5 }]
            }
        },
        "response": {
            "200": { "id": 1, "status": "created" },
            "404": { "message": "not found" }
        }
    },
    "ping": { "summary": "no request or response" }
}"#;

/// Every file below `root`, relative to it, with `/` separators.
fn tree(root: &Path) -> BTreeSet<String> {
    fn visit(root: &Path, dir: &Path, files: &mut BTreeSet<String>) {
        for entry in fs::read_dir(dir).expect("read_dir") {
            let path: PathBuf = entry.expect("dir entry").path();
            if path.is_dir() {
                visit(root, &path, files);
            } else {
                let relative: &Path = path.strip_prefix(root).expect("path under root");
                let parts: Vec<String> = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                files.insert(parts.join("/"));
            }
        }
    }

    let mut files: BTreeSet<String> = BTreeSet::new();
    visit(root, root, &mut files);
    files
}

fn generator_in(temp_dir: &TempDir) -> Generator {
    Generator::new(GenerateSettings::in_dir(temp_dir.path()))
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap_or_else(|e| panic!("read {relative}: {e}"))
}

#[test]
fn generates_one_file_per_shape_and_collection() {
    let temp_dir: TempDir = TempDir::new().expect("Failed to create temp directory");
    let generator: Generator = generator_in(&temp_dir);
    let doc: ApiDoc = ApiDoc::from_json(ORDER_SCHEMA).expect("schema should parse");

    let written: Vec<PathBuf> = generator.generate(&doc).expect("generate should succeed");

    let expected: BTreeSet<String> = [
        "OrderDtoRequest.php",
        "OrderDtoResponse200.php",
        "OrderDtoResponse404.php",
        "Nested/OrderDtoRequestHeaders.php",
        "Nested/OrderDtoRequestBody.php",
        "Nested/Nested/OrderDtoRequestBodyItems.php",
        "Nested/Nested/OrderDtoRequestBodyItemsCollection.php",
    ]
    .into_iter()
    .map(String::from)
    .collect();
    let root: PathBuf = temp_dir.path().join("src/Dto/Api");
    assert_eq!(expected, tree(&root));
    assert_eq!(expected.len(), written.len());
}

#[test]
fn generated_request_body_matches_expected_php() {
    let temp_dir: TempDir = TempDir::new().expect("Failed to create temp directory");
    generator_in(&temp_dir)
        .generate(&ApiDoc::from_json(ORDER_SCHEMA).expect("schema should parse"))
        .expect("generate should succeed");
    let root: PathBuf = temp_dir.path().join("src/Dto/Api");

    let expected: &str = r"<?php

// Generated by api-dto-gen. Do not edit manually.

declare(strict_types=1);

namespace App\Dto\Api\Nested;

use Eva\Common\NestedDto;

class OrderDtoRequestBody extends NestedDto
{
    protected const EXCLUDE_PROPERTIES = ['note'];

    public string $userName = 'bob';
    public bool $gift = false;
    public string $note;
    public string $coupon;
    public \App\Dto\Api\Nested\Nested\OrderDtoRequestBodyItemsCollection $items;
}
";
    assert_eq!(expected, read(&root, "Nested/OrderDtoRequestBody.php"));

    let items: String = read(&root, "Nested/Nested/OrderDtoRequestBodyItems.php");
    assert!(items.contains("namespace App\\Dto\\Api\\Nested\\Nested;"));
    assert!(items.contains("    public string $sku = 'A1';\n"));
    assert!(items.contains("    public int $qty = 1;\n"));
    assert!(items.contains("    public float $price = 9.5;\n"));

    let collection: String = read(&root, "Nested/Nested/OrderDtoRequestBodyItemsCollection.php");
    assert!(collection.contains("class OrderDtoRequestBodyItemsCollection extends ObjectCollection"));
    assert!(collection.contains(
        "parent::__construct('\\App\\Dto\\Api\\Nested\\Nested\\OrderDtoRequestBodyItems', $collection);"
    ));

    let request: String = read(&root, "OrderDtoRequest.php");
    assert!(request.contains("    public \\App\\Dto\\Api\\Nested\\OrderDtoRequestHeaders $headers;\n"));
    assert!(!request.contains("method"), "unknown request sections must be skipped");
}

#[test]
fn stale_files_are_removed_by_generate() {
    let temp_dir: TempDir = TempDir::new().expect("Failed to create temp directory");
    let root: PathBuf = temp_dir.path().join("src/Dto/Api");
    fs::create_dir_all(root.join("Nested")).expect("create stale dir");
    fs::write(root.join("Nested/Stale.php"), "<?php\n").expect("write stale file");
    fs::write(root.join("Unrelated.txt"), "left over").expect("write stale file");

    generator_in(&temp_dir)
        .generate(&ApiDoc::from_json(r#"{"ping": {"response": {"204": {}}}}"#).expect("parse"))
        .expect("generate should succeed");

    let expected: BTreeSet<String> = std::iter::once("PingDtoResponse204.php".to_string()).collect();
    assert_eq!(expected, tree(&root));
}

#[test]
fn clear_twice_is_not_an_error() {
    let temp_dir: TempDir = TempDir::new().expect("Failed to create temp directory");
    let generator: Generator = generator_in(&temp_dir);
    generator
        .generate(&ApiDoc::from_json(ORDER_SCHEMA).expect("parse"))
        .expect("generate should succeed");

    generator.clear().expect("first clear");
    assert!(!temp_dir.path().join("src/Dto/Api").exists());
    generator.clear().expect("second clear on absent directory");
}

#[test]
fn document_without_sections_writes_only_the_root() {
    let temp_dir: TempDir = TempDir::new().expect("Failed to create temp directory");
    let written: Vec<PathBuf> = generator_in(&temp_dir)
        .generate(&ApiDoc::from_json(r#"{"ping": {"summary": "x"}}"#).expect("parse"))
        .expect("generate should succeed");
    assert!(written.is_empty());
    let root: PathBuf = temp_dir.path().join("src/Dto/Api");
    assert!(root.is_dir(), "prepare must still create the output root");
    assert!(tree(&root).is_empty());
}

#[test]
fn schema_settings_override_output_and_namespace() {
    let temp_dir: TempDir = TempDir::new().expect("Failed to create temp directory");
    let schema_path: PathBuf = temp_dir.path().join("api-doc.json");
    fs::write(
        &schema_path,
        r#"{
            "settings": { "path": "/generated/Dto", "namespace": "Shop\\Dto" },
            "user": { "response": { "200": { "id": 7 } } }
        }"#,
    )
    .expect("write schema");

    let written: Vec<PathBuf> = generate_from_file(
        &schema_path,
        GenerateSettings::in_dir(temp_dir.path()),
        temp_dir.path(),
    )
    .expect("generate_from_file should succeed");

    let expected_path: PathBuf = temp_dir.path().join("generated/Dto/UserDtoResponse200.php");
    assert_eq!(vec![expected_path.clone()], written);
    let contents: String = fs::read_to_string(expected_path).expect("read generated file");
    assert!(contents.contains("namespace Shop\\Dto;"));
    assert!(!temp_dir.path().join("src").exists());
}

#[test]
fn schema_path_pointing_at_base_dir_leaves_project_intact() {
    let temp_dir: TempDir = TempDir::new().expect("Failed to create temp directory");
    let schema_path: PathBuf = temp_dir.path().join("api-doc.json");
    fs::write(
        &schema_path,
        r#"{
            "settings": { "path": "/" },
            "user": { "response": { "200": { "id": 7 } } }
        }"#,
    )
    .expect("write schema");
    fs::write(temp_dir.path().join("composer.json"), "{}").expect("write project file");

    let err: DtoGenError = generate_from_file(
        &schema_path,
        GenerateSettings::in_dir(temp_dir.path()),
        temp_dir.path(),
    )
    .expect_err("output directory equal to the base directory must be refused");

    assert!(
        matches!(err, DtoGenError::InvalidSchema { ref path, .. } if path == "/settings/path"),
        "unexpected error: {err}"
    );
    assert!(schema_path.is_file());
    assert!(temp_dir.path().join("composer.json").is_file());
}

#[test]
fn missing_schema_file_reports_its_path() {
    let temp_dir: TempDir = TempDir::new().expect("Failed to create temp directory");
    let schema_path: PathBuf = temp_dir.path().join("absent.json");

    let err: DtoGenError = load_schema(&schema_path).expect_err("missing file must fail");

    match &err {
        DtoGenError::Filesystem { path, .. } => assert_eq!(&schema_path, path),
        other => panic!("expected Filesystem error, got {other}"),
    }
    assert!(err.to_string().contains("absent.json"));
}
