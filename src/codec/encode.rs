//! Encoder: document tree to tagged bytes

use serde_json::Value;

use super::{
    TAG_ARRAY, TAG_FALSE, TAG_FLOAT64, TAG_INT16, TAG_INT32, TAG_INT64, TAG_INT8, TAG_MAP,
    TAG_NULL, TAG_STRING, TAG_TRUE,
};
use crate::error::EncodeError;

/// Encode a document into its binary form.
///
/// The output is owned by the caller and deterministic: the same logical
/// value always yields byte-identical output.
pub fn encode(value: &Value) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::new();
    encode_value(value, &mut buf)?;
    Ok(buf)
}

fn encode_value(value: &Value, buf: &mut Vec<u8>) -> Result<(), EncodeError> {
    match value {
        Value::Null => buf.push(TAG_NULL),
        Value::Bool(false) => buf.push(TAG_FALSE),
        Value::Bool(true) => buf.push(TAG_TRUE),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                encode_integer(i, buf);
            } else if n.is_u64() {
                // u64 above i64::MAX has no signed-width representation.
                return Err(EncodeError::UnsupportedType(format!(
                    "unsigned integer {n} exceeds the signed 64-bit range"
                )));
            } else if let Some(f) = n.as_f64() {
                buf.push(TAG_FLOAT64);
                buf.extend_from_slice(&f.to_be_bytes());
            } else {
                return Err(EncodeError::UnsupportedType(format!(
                    "unrepresentable number {n}"
                )));
            }
        }
        Value::String(s) => encode_string(s, buf)?,
        Value::Array(items) => {
            buf.push(TAG_ARRAY);
            buf.extend_from_slice(&count_prefix(items.len())?);
            for item in items {
                encode_value(item, buf)?;
            }
        }
        Value::Object(entries) => {
            buf.push(TAG_MAP);
            buf.extend_from_slice(&count_prefix(entries.len())?);
            // Insertion order, so re-encoding a decoded map is identical.
            for (key, entry) in entries {
                encode_string(key, buf)?;
                encode_value(entry, buf)?;
            }
        }
    }
    Ok(())
}

/// Write an integer at the smallest signed width that holds it.
fn encode_integer(value: i64, buf: &mut Vec<u8>) {
    if let Ok(v) = i8::try_from(value) {
        buf.push(TAG_INT8);
        buf.extend_from_slice(&v.to_be_bytes());
    } else if let Ok(v) = i16::try_from(value) {
        buf.push(TAG_INT16);
        buf.extend_from_slice(&v.to_be_bytes());
    } else if let Ok(v) = i32::try_from(value) {
        buf.push(TAG_INT32);
        buf.extend_from_slice(&v.to_be_bytes());
    } else {
        buf.push(TAG_INT64);
        buf.extend_from_slice(&value.to_be_bytes());
    }
}

fn encode_string(s: &str, buf: &mut Vec<u8>) -> Result<(), EncodeError> {
    buf.push(TAG_STRING);
    buf.extend_from_slice(&count_prefix(s.len())?);
    buf.extend_from_slice(s.as_bytes());
    Ok(())
}

fn count_prefix(len: usize) -> Result<[u8; 4], EncodeError> {
    u32::try_from(len)
        .map(|n| n.to_be_bytes())
        .map_err(|_| EncodeError::LengthOverflow(len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_layouts() {
        assert_eq!(encode(&json!(null)).unwrap(), [TAG_NULL]);
        assert_eq!(encode(&json!(false)).unwrap(), [TAG_FALSE]);
        assert_eq!(encode(&json!(true)).unwrap(), [TAG_TRUE]);
        assert_eq!(encode(&json!(0)).unwrap(), [TAG_INT8, 0x00]);
        assert_eq!(encode(&json!(-1)).unwrap(), [TAG_INT8, 0xFF]);
    }

    #[test]
    fn test_width_selection_at_boundaries() {
        assert_eq!(encode(&json!(127)).unwrap()[0], TAG_INT8);
        assert_eq!(encode(&json!(128)).unwrap()[0], TAG_INT16);
        assert_eq!(encode(&json!(-128)).unwrap()[0], TAG_INT8);
        assert_eq!(encode(&json!(-129)).unwrap()[0], TAG_INT16);
        assert_eq!(encode(&json!(32767)).unwrap()[0], TAG_INT16);
        assert_eq!(encode(&json!(32768)).unwrap()[0], TAG_INT32);
        assert_eq!(encode(&json!(2147483647)).unwrap()[0], TAG_INT32);
        assert_eq!(encode(&json!(2147483648i64)).unwrap()[0], TAG_INT64);
        assert_eq!(encode(&json!(i64::MIN)).unwrap()[0], TAG_INT64);
    }

    #[test]
    fn test_string_layout() {
        assert_eq!(
            encode(&json!("hi")).unwrap(),
            [TAG_STRING, 0, 0, 0, 2, b'h', b'i']
        );
        assert_eq!(encode(&json!("")).unwrap(), [TAG_STRING, 0, 0, 0, 0]);
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(encode(&json!([])).unwrap(), [TAG_ARRAY, 0, 0, 0, 0]);
        assert_eq!(encode(&json!({})).unwrap(), [TAG_MAP, 0, 0, 0, 0]);
    }

    #[test]
    fn test_float_layout() {
        let bytes = encode(&json!(1.5)).unwrap();
        assert_eq!(bytes[0], TAG_FLOAT64);
        assert_eq!(bytes[1..], 1.5f64.to_be_bytes());
    }

    #[test]
    fn test_map_preserves_insertion_order() {
        let a = encode(&serde_json::from_str::<Value>(r#"{"b":1,"a":2}"#).unwrap()).unwrap();
        // Key "b" is encoded first: map tag + count, then its string tag
        // and 4-byte length, so the key byte sits at offset 10.
        assert_eq!(a[10], b'b');
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let doc = json!({"id": 123, "tags": ["a", "b"], "active": true, "score": 1.25});
        assert_eq!(encode(&doc).unwrap(), encode(&doc).unwrap());
    }

    #[test]
    fn test_u64_beyond_i64_is_unsupported() {
        let err = encode(&json!(u64::MAX)).unwrap_err();
        assert!(matches!(err, EncodeError::UnsupportedType(_)));
    }
}
