//! Loosely-typed entry points for the text codec.
//!
//! [`utf8_encode`] and [`utf8_decode`] accept whatever a caller holding
//! dynamic data has on hand: nothing at all, `null`, a string, or a number.
//! Absent values, `null` and the empty string pass straight through; numbers
//! are coerced to their decimal form; anything else is rejected.
//!
//! ## Examples
//!
//! ```rust
//! use flatline::{utf8_decode, utf8_encode};
//! use serde_json::{Value, json};
//!
//! assert_eq!(utf8_encode(Some(&json!("test"))).unwrap(), Some(json!("test")));
//! assert_eq!(utf8_encode(Some(&json!(12345))).unwrap(), Some(json!("12345")));
//! assert_eq!(utf8_encode(Some(&Value::Null)).unwrap(), Some(Value::Null));
//! assert_eq!(utf8_encode(None).unwrap(), None);
//!
//! assert_eq!(
//!     utf8_decode(Some(&json!("TÃ©lÃ©com"))).unwrap(),
//!     Some(json!("Télécom"))
//! );
//! ```

use serde_json::{Number, Value};
use tracing::debug;

use crate::codec::{self, CodePointString};
use crate::error::{CodecError, Result};

/// Encodes a dynamic value to its UTF-8 byte string, rendered one `char`
/// per byte.
///
/// ## Errors
///
/// Returns [`CodecError::InvalidInputType`] for booleans, arrays and objects,
/// and [`CodecError::MalformedSurrogate`] if the text holds unpaired
/// surrogates.
pub fn utf8_encode(input: Option<&Value>) -> Result<Option<Value>> {
    let Some(text) = coerce(input, "utf8_encode")? else {
        return Ok(input.cloned());
    };

    let units: Vec<u16> = text.encode_utf16().collect();
    let bytes = codec::encode_units(&units)?;

    Ok(Some(Value::String(bytes.to_latin1_string())))
}

/// Decodes a dynamic value whose characters are UTF-8 byte values.
///
/// Decoding never fails on malformed sequences; where the result would hold
/// an unpaired surrogate it is replaced with U+FFFD. Use
/// [`codec::decode_units`] to keep the raw units.
///
/// ## Errors
///
/// Returns [`CodecError::InvalidInputType`] for booleans, arrays and objects.
pub fn utf8_decode(input: Option<&Value>) -> Result<Option<Value>> {
    let Some(text) = coerce(input, "utf8_decode")? else {
        return Ok(input.cloned());
    };

    let units = CodePointString::from(text.as_str());
    let decoded = codec::decode_units(units.as_units());

    Ok(Some(Value::String(decoded.to_string_lossy())))
}

/// Yields the text to process, or `None` for values that pass through.
fn coerce(input: Option<&Value>, operation: &'static str) -> Result<Option<String>> {
    match input {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(number_to_string(n))),
        Some(other) => {
            let found = type_name(other);
            debug!(operation, found, "rejected non-string input");
            Err(CodecError::InvalidInputType { operation, found })
        }
    }
}

/// Renders a number the way a JavaScript `String(n)` would: integral
/// floats lose their `.0`, and magnitudes outside `[1e-6, 1e21)` switch to
/// exponent form with an explicit sign.
fn number_to_string(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }

    let Some(f) = n.as_f64() else {
        return n.to_string();
    };

    if f == 0.0 {
        return "0".to_string();
    }

    let magnitude = f.abs();
    if (1e-6..1e21).contains(&magnitude) {
        // f64's Display is already the shortest round-trip decimal.
        return f.to_string();
    }

    let exp = format!("{f:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
