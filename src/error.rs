//! Error types for schema construction and the binary codec

use thiserror::Error;

/// Result type for schema construction and loading
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Errors raised while building or loading a schema.
///
/// All of these surface at construction time; a schema that constructs
/// successfully never raises during validation.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("unknown schema kind: {0}")]
    UnknownKind(String),

    #[error("unknown format: {0}")]
    UnknownFormat(String),

    #[error("constraint '{constraint}' is not valid for kind '{kind}'")]
    ConstraintKindMismatch { constraint: String, kind: String },

    #[error("contradictory bounds for '{constraint}': minimum {min} exceeds maximum {max}")]
    ContradictoryBounds {
        constraint: String,
        min: String,
        max: String,
    },

    #[error("required property '{0}' is not declared and additional properties are denied")]
    UnsatisfiableRequired(String),

    #[error("invalid schema structure: {0}")]
    InvalidStructure(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by `codec::encode`.
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("unsupported value type: {0}")]
    UnsupportedType(String),

    #[error("length {0} exceeds the u32 length prefix")]
    LengthOverflow(usize),
}

/// Errors raised by `codec::decode`.
///
/// Decoding is all-or-nothing: any of these aborts the call with no
/// partial result.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("buffer truncated: needed {needed} more bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    #[error("unrecognized type tag: 0x{0:02x}")]
    UnknownTag(u8),

    #[error("invalid UTF-8 in string payload: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("map key has non-string tag 0x{0:02x}")]
    InvalidKey(u8),

    #[error("float payload is not a finite IEEE-754 value")]
    NonFiniteFloat,

    #[error("nesting depth exceeds the decoder limit of {0}")]
    DepthLimitExceeded(usize),

    #[error("{0} trailing bytes after the root value")]
    TrailingBytes(usize),
}
