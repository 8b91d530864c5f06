//! Decoder: tagged bytes back to a document tree

use serde_json::{Map, Number, Value};

use super::{
    MAX_DEPTH, TAG_ARRAY, TAG_FALSE, TAG_FLOAT64, TAG_INT16, TAG_INT32, TAG_INT64, TAG_INT8,
    TAG_MAP, TAG_NULL, TAG_STRING, TAG_TRUE,
};
use crate::error::DecodeError;

/// Decode a single value from a buffer.
///
/// The buffer must contain exactly one encoded value; anything shorter
/// or longer is an error, never a partial result.
pub fn decode(bytes: &[u8]) -> Result<Value, DecodeError> {
    let mut reader = Reader::new(bytes);
    let value = decode_value(&mut reader, 0)?;
    let trailing = reader.remaining();
    if trailing > 0 {
        return Err(DecodeError::TrailingBytes(trailing));
    }
    Ok(value)
}

/// Bounds-checked cursor over the input buffer.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < n {
            return Err(DecodeError::Truncated {
                needed: n - self.remaining(),
                remaining: self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn byte(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    fn u32(&mut self) -> Result<u32, DecodeError> {
        let bytes = self.take(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

fn decode_value(reader: &mut Reader<'_>, depth: usize) -> Result<Value, DecodeError> {
    if depth > MAX_DEPTH {
        return Err(DecodeError::DepthLimitExceeded(MAX_DEPTH));
    }

    let tag = reader.byte()?;
    match tag {
        TAG_NULL => Ok(Value::Null),
        TAG_FALSE => Ok(Value::Bool(false)),
        TAG_TRUE => Ok(Value::Bool(true)),
        // Every width decodes to the same i64, so the logical value is
        // independent of the width chosen at encode time.
        TAG_INT8 => Ok(Value::from(i8::from_be_bytes(fixed(reader.take(1)?)) as i64)),
        TAG_INT16 => Ok(Value::from(i16::from_be_bytes(fixed(reader.take(2)?)) as i64)),
        TAG_INT32 => Ok(Value::from(i32::from_be_bytes(fixed(reader.take(4)?)) as i64)),
        TAG_INT64 => Ok(Value::from(i64::from_be_bytes(fixed(reader.take(8)?)))),
        TAG_FLOAT64 => {
            let f = f64::from_be_bytes(fixed(reader.take(8)?));
            Number::from_f64(f)
                .map(Value::Number)
                .ok_or(DecodeError::NonFiniteFloat)
        }
        TAG_STRING => Ok(Value::String(decode_string_body(reader)?)),
        TAG_ARRAY => {
            let count = reader.u32()? as usize;
            // Count comes from the wire; don't preallocate it.
            let mut items = Vec::new();
            for _ in 0..count {
                items.push(decode_value(reader, depth + 1)?);
            }
            Ok(Value::Array(items))
        }
        TAG_MAP => {
            let count = reader.u32()? as usize;
            let mut entries = Map::new();
            for _ in 0..count {
                let key_tag = reader.byte()?;
                if key_tag != TAG_STRING {
                    return Err(DecodeError::InvalidKey(key_tag));
                }
                let key = decode_string_body(reader)?;
                let value = decode_value(reader, depth + 1)?;
                entries.insert(key, value);
            }
            Ok(Value::Object(entries))
        }
        other => Err(DecodeError::UnknownTag(other)),
    }
}

fn decode_string_body(reader: &mut Reader<'_>) -> Result<String, DecodeError> {
    let len = reader.u32()? as usize;
    let bytes = reader.take(len)?;
    Ok(std::str::from_utf8(bytes)?.to_string())
}

fn fixed<const N: usize>(slice: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(slice);
    out
}
