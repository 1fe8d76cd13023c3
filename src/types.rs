//! Common types used throughout pagegate
//!
//! Shared type aliases and small utilities used across multiple modules.

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// A single record as returned by a datasource: a flat key -> value mapping
/// with string keys and heterogeneously-typed JSON values. Nested attributes
/// are handed downstream unmodified; flattening is the caller's concern.
pub type Record = JsonObject;

// ============================================================================
// Utilities
// ============================================================================

/// Human-readable name of a JSON value's shape, for error messages
pub fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
