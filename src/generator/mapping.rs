//! Type and name mapping helpers bound into every template.
//!
//! All functions are total: an unrecognised type token falls back to a
//! textual representation instead of failing, so an odd field never aborts a
//! generation run.

use heck::{ToSnakeCase, ToUpperCamelCase};

/// The closed vocabulary of logical field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Int,
    Int32,
    Int64,
    Float32,
    Float64,
    Bool,
    /// Anything outside the vocabulary
    Text,
}

impl FieldType {
    /// Classify a type token. Matching is exact (`Int64` is not `int64`).
    pub fn from_token(token: &str) -> Self {
        match token {
            "string" => FieldType::String,
            "int" => FieldType::Int,
            "int32" => FieldType::Int32,
            "int64" => FieldType::Int64,
            "float32" => FieldType::Float32,
            "float64" => FieldType::Float64,
            "bool" => FieldType::Bool,
            _ => FieldType::Text,
        }
    }

    /// Whether the token belongs to the known vocabulary.
    pub fn is_known(token: &str) -> bool {
        FieldType::from_token(token) != FieldType::Text
    }
}

/// Relational column type for a field type token.
pub fn to_storage_type(token: &str) -> &'static str {
    match FieldType::from_token(token) {
        FieldType::String => "VARCHAR(255)",
        FieldType::Int | FieldType::Int32 | FieldType::Int64 => "INTEGER",
        FieldType::Float32 | FieldType::Float64 => "FLOAT",
        FieldType::Bool => "BOOLEAN",
        FieldType::Text => "TEXT",
    }
}

/// proto3 scalar type for a field type token.
pub fn to_wire_type(token: &str) -> &'static str {
    match FieldType::from_token(token) {
        FieldType::Int | FieldType::Int32 => "int32",
        FieldType::Int64 => "int64",
        FieldType::Float32 => "float",
        FieldType::Float64 => "double",
        FieldType::Bool => "bool",
        FieldType::String | FieldType::Text => "string",
    }
}

/// Go literal used as fixture data in generated tests.
pub fn to_test_value(token: &str) -> &'static str {
    match FieldType::from_token(token) {
        FieldType::Int | FieldType::Int32 | FieldType::Int64 => "123",
        FieldType::Float32 | FieldType::Float64 => "123.45",
        FieldType::Bool => "true",
        FieldType::String | FieldType::Text => "\"test-value\"",
    }
}

/// Go type of the generated struct field.
pub fn to_go_type(token: &str) -> &'static str {
    match FieldType::from_token(token) {
        FieldType::String | FieldType::Text => "string",
        FieldType::Int => "int",
        FieldType::Int32 => "int32",
        FieldType::Int64 => "int64",
        FieldType::Float32 => "float32",
        FieldType::Float64 => "float64",
        FieldType::Bool => "bool",
    }
}

/// Exported type name.
///
/// Names that are already a single word keep their casing apart from the
/// first letter (`ProductID` stays `ProductID`); separated names are
/// camel-cased (`order_item` becomes `OrderItem`).
pub fn to_pascal_case(s: &str) -> String {
    if s.contains(|c: char| c == '_' || c == '-' || c.is_whitespace()) {
        return s.to_upper_camel_case();
    }
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

pub fn to_lower(s: &str) -> String {
    s.to_lowercase()
}

/// Acronym-aware snake case (`ProductID` -> `product_id`).
pub fn to_snake_case(s: &str) -> String {
    s.to_snake_case()
}

/// Table, collection and route segment name (`OrderItem` -> `order_items`).
pub fn to_plural_snake(s: &str) -> String {
    format!("{}s", to_snake_case(s))
}
