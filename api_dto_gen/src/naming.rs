//! Naming rules for generated classes and fields.

use heck::{ToLowerCamelCase, ToUpperCamelCase};

/// Suffix appended to the `PascalCase` document name.
pub const DTO_SUFFIX: &str = "Dto";

/// Suffix of generated collection wrappers.
pub const COLLECTION_SUFFIX: &str = "Collection";

/// Sub-namespace and subdirectory holding nested shapes.
pub const NESTED: &str = "Nested";

/// Base class name for a document: `user-profile` -> `UserProfileDto`.
#[must_use]
pub fn dto_class_name(document: &str) -> String {
    format!("{}{DTO_SUFFIX}", document.to_upper_camel_case())
}

/// Field name used in the generated class.
///
/// Hyphenated keys are camelCased (`user-name` -> `userName`); every other key
/// is kept as written.
#[must_use]
pub fn field_name(key: &str) -> String {
    if key.contains('-') {
        key.to_lower_camel_case()
    } else {
        key.to_string()
    }
}

/// Name of the shape generated for a nested property:
/// `OrderDtoRequest` + `shipping_address` -> `OrderDtoRequestShippingAddress`.
#[must_use]
pub fn child_shape_name(parent: &str, property: &str) -> String {
    let camel: String = property.to_lower_camel_case();
    format!("{parent}{}", camel.to_upper_camel_case())
}

#[must_use]
pub fn collection_name(element_shape: &str) -> String {
    format!("{element_shape}{COLLECTION_SUFFIX}")
}

/// `App\Dto\Api` -> `App\Dto\Api\Nested`.
#[must_use]
pub fn nested_namespace(namespace: &str) -> String {
    format!("{namespace}\\{NESTED}")
}

/// Fully-qualified class reference: `\App\Dto\Api\Nested\OrderDtoRequestItems`.
#[must_use]
pub fn qualified(namespace: &str, class: &str) -> String {
    format!("\\{}\\{class}", namespace.trim_start_matches('\\'))
}
