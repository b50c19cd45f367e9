//! Schema violation error.
//!
//! Returned when a state value or a partial update does not fit the state schema.

use thiserror::Error;

use super::ValueKind;

/// A value did not match the schema: unknown field, wrong JSON type, or a reducer applied
/// to the wrong shape.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaViolation {
    /// The field is not declared in the schema.
    #[error("unknown state field: {0}")]
    UnknownField(String),

    /// The same field was declared twice.
    #[error("state field declared twice: {0}")]
    DuplicateField(String),

    /// A value's JSON type does not match the field's declared kind.
    #[error("field '{field}' expects {expected:?}, got {found}")]
    TypeMismatch {
        field: String,
        expected: ValueKind,
        found: &'static str,
    },

    /// An append reducer met a value that is not an array.
    #[error("append on field '{0}' requires arrays on both sides")]
    AppendRequiresArray(String),

    /// A field could not be decoded into the requested Rust type.
    #[error("field '{field}' could not be decoded: {message}")]
    Decode { field: String, message: String },
}
