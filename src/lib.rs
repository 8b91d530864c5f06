//! Interlace
//!
//! Schema-driven validation and self-describing binary encoding for
//! untyped document trees (`serde_json::Value`).
//!
//! ## Features
//!
//! - **Schema Validator**: a declarative constraint tree checked against
//!   a document, collecting every violation in one pass
//! - **Construction-Time Checking**: malformed schemas fail when built,
//!   never as silent false negatives during validation
//! - **Binary Codec**: compact, deterministic, tag-prefixed encoding
//!   with lossless round-trip fidelity and schema-free decoding
//! - **Structured Errors**: violations are returned as serializable data
//!   with path, constraint, expected and actual values
//!
//! The two components are independent; callers compose them ("validate
//! then encode"). Both are pure, stateless, and synchronous: calls may
//! run in parallel with no coordination, and cost is linear in the size
//! of the input.
//!
//! ## Example
//!
//! ```
//! use interlace::{Schema, codec};
//! use serde_json::json;
//!
//! let schema = Schema::parse(r#"{
//!     "type": "object",
//!     "properties": {
//!         "username": {"type": "string", "minLength": 3},
//!         "email": {"type": "string", "format": "email"}
//!     },
//!     "required": ["username", "email"]
//! }"#).unwrap();
//!
//! let doc = json!({"username": "alice", "email": "alice@example.com"});
//! assert!(schema.validate(&doc).is_empty());
//!
//! let bytes = codec::encode(&doc).unwrap();
//! assert_eq!(codec::decode(&bytes).unwrap(), doc);
//! ```

pub mod codec;
pub mod error;
pub mod format;
pub mod schema;
pub mod validate;

pub use codec::{decode, encode};
pub use error::{DecodeError, EncodeError, Result, SchemaError};
pub use format::Format;
pub use schema::{Schema, SchemaKind, SchemaNode};
pub use validate::{ConstraintKind, DocumentPath, PathSegment, ValidationError};
