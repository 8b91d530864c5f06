//! Self-describing binary codec for document trees
//!
//! Every value is a one-byte type tag followed by its payload; multi-byte
//! integers are big-endian. The layout is the wire format other systems
//! must match:
//!
//! ```text
//! +------+-------------+----------------------------------------+
//! | tag  | value       | payload                                |
//! +------+-------------+----------------------------------------+
//! | 0xC0 | null        | (none)                                 |
//! | 0xC2 | false       | (none)                                 |
//! | 0xC3 | true        | (none)                                 |
//! | 0xD0 | int8        | 1 byte, two's complement               |
//! | 0xD1 | int16       | 2 bytes BE                             |
//! | 0xD2 | int32       | 4 bytes BE                             |
//! | 0xD3 | int64       | 8 bytes BE                             |
//! | 0xCB | float64     | 8 bytes IEEE-754 BE                    |
//! | 0xDB | string      | u32 BE byte length + UTF-8 bytes       |
//! | 0xDD | array       | u32 BE count + count encoded values    |
//! | 0xDF | map         | u32 BE count + count (string key, val) |
//! +------+-------------+----------------------------------------+
//! ```
//!
//! Integers are encoded at the smallest signed width that holds the
//! value and always decode back to the same i64, so the logical value is
//! independent of the chosen width. Map entries keep insertion order.
//! Encoding the same logical value twice yields byte-identical output.
//!
//! Decoding is all-or-nothing: truncation, an unrecognized tag, invalid
//! UTF-8, a non-string map key, or trailing bytes after the root value
//! abort with a [`DecodeError`](crate::error::DecodeError) and no
//! partial result.

mod decode;
mod encode;

pub use decode::decode;
pub use encode::encode;

pub(crate) const TAG_NULL: u8 = 0xC0;
pub(crate) const TAG_FALSE: u8 = 0xC2;
pub(crate) const TAG_TRUE: u8 = 0xC3;
pub(crate) const TAG_INT8: u8 = 0xD0;
pub(crate) const TAG_INT16: u8 = 0xD1;
pub(crate) const TAG_INT32: u8 = 0xD2;
pub(crate) const TAG_INT64: u8 = 0xD3;
pub(crate) const TAG_FLOAT64: u8 = 0xCB;
pub(crate) const TAG_STRING: u8 = 0xDB;
pub(crate) const TAG_ARRAY: u8 = 0xDD;
pub(crate) const TAG_MAP: u8 = 0xDF;

/// Maximum container nesting the decoder accepts. Bounds stack use on
/// adversarial buffers; no legitimate document comes close.
pub(crate) const MAX_DEPTH: usize = 128;
