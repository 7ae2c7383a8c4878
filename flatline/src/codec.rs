//! UTF-8 text codec with legacy 8-bit string semantics.
//!
//! Converts between a string of UTF-16 code units (a [`CodePointString`]) and
//! a [`ByteString`] holding its UTF-8 encoding, one byte per element. This is
//! the `utf8_encode` / `utf8_decode` pair found in PHP and in older scripting
//! libraries, where the "encoded" form is itself a string whose characters
//! all lie in U+0000..=U+00FF.
//!
//! ## Encode and decode are not symmetric validators
//!
//! [`encode_units`] rejects unpaired surrogates. [`decode_units`] never fails:
//! a multi-byte lead whose continuation units are missing reads them as zero,
//! and units wider than a byte are classified by the same lead-byte
//! thresholds. Malformed input therefore decodes to *something* rather than
//! to an error, which existing stored digests depend on.
//!
//! ## Examples
//!
//! ```rust
//! use flatline::codec::{decode, encode};
//!
//! let bytes = encode("Télécom");
//! assert_eq!(bytes.as_bytes(), "Télécom".as_bytes());
//! assert_eq!(bytes.to_latin1_string(), "TÃ©lÃ©com");
//!
//! assert_eq!(decode(&bytes).to_string_lossy(), "Télécom");
//! ```

use std::fmt;
use std::string::FromUtf16Error;

use tracing::debug;

use crate::error::{CodecError, Result, Surrogate};

/// A sequence of byte values, the output of [`encode`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ByteString(Vec<u8>);

impl ByteString {
    /// Wraps raw bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Renders each byte as the `char` with the same value, the way an 8-bit
    /// string would display it.
    ///
    /// ```rust
    /// use flatline::codec::ByteString;
    ///
    /// let bytes = ByteString::new(vec![0x54, 0xC3, 0xA9]);
    /// assert_eq!(bytes.to_latin1_string(), "TÃ©");
    /// ```
    pub fn to_latin1_string(&self) -> String {
        self.0.iter().copied().map(char::from).collect()
    }

    /// The bytes widened to code units, as [`decode_units`] consumes them.
    pub fn to_units(&self) -> Vec<u16> {
        self.0.iter().copied().map(u16::from).collect()
    }
}

impl From<Vec<u8>> for ByteString {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for ByteString {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl AsRef<[u8]> for ByteString {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_latin1_string())
    }
}

/// A sequence of UTF-16 code units.
///
/// Unlike `String` this may hold unpaired surrogates, which is what
/// [`decode_units`] produces for some malformed inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CodePointString(Vec<u16>);

impl CodePointString {
    pub fn new(units: Vec<u16>) -> Self {
        Self(units)
    }

    pub fn as_units(&self) -> &[u16] {
        &self.0
    }

    pub fn into_units(self) -> Vec<u16> {
        self.0
    }

    /// Number of code units (not chars).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Converts to a `String`, failing on unpaired surrogates.
    pub fn into_string(self) -> std::result::Result<String, FromUtf16Error> {
        String::from_utf16(&self.0)
    }

    /// Converts to a `String`, replacing unpaired surrogates with U+FFFD.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.0)
    }
}

impl From<&str> for CodePointString {
    fn from(s: &str) -> Self {
        Self(s.encode_utf16().collect())
    }
}

/// Encodes a string into its UTF-8 [`ByteString`].
///
/// A `&str` cannot contain unpaired surrogates, so this never fails and the
/// result is exactly the string's UTF-8 bytes. Use [`encode_units`] for raw
/// UTF-16 input.
///
/// ```rust
/// use flatline::codec::encode;
///
/// assert_eq!(encode("test").as_bytes(), b"test");
/// assert_eq!(encode("é").as_bytes(), &[0xC3, 0xA9]);
/// ```
pub fn encode(input: &str) -> ByteString {
    ByteString(input.as_bytes().to_vec())
}

/// Encodes UTF-16 code units into a UTF-8 [`ByteString`].
///
/// ## Errors
///
/// Returns [`CodecError::MalformedSurrogate`] when a low surrogate has no
/// preceding high surrogate (`Trail`), or a high surrogate is not followed by
/// a low surrogate (`Lead`).
///
/// ```rust
/// use flatline::codec::encode_units;
///
/// let units: Vec<u16> = "😀".encode_utf16().collect();
/// assert_eq!(encode_units(&units).unwrap().as_bytes(), "😀".as_bytes());
///
/// assert!(encode_units(&[0xD800]).is_err());
/// ```
pub fn encode_units(units: &[u16]) -> Result<ByteString> {
    let mut out = Vec::with_capacity(units.len());
    let mut n = 0;

    while n < units.len() {
        let c1 = u32::from(units[n]);

        if c1 < 0x80 {
            out.push(c1 as u8);
        } else if c1 < 0x800 {
            out.extend_from_slice(&[(0xC0 | (c1 >> 6)) as u8, (0x80 | (c1 & 0x3F)) as u8]);
        } else if c1 & 0xF800 != 0xD800 {
            out.extend_from_slice(&[
                (0xE0 | (c1 >> 12)) as u8,
                (0x80 | ((c1 >> 6) & 0x3F)) as u8,
                (0x80 | (c1 & 0x3F)) as u8,
            ]);
        } else {
            if c1 & 0xFC00 != 0xD800 {
                debug!(index = n, unit = c1, "unmatched trail surrogate");
                return Err(CodecError::MalformedSurrogate {
                    kind: Surrogate::Trail,
                    index: n,
                });
            }

            n += 1;
            let c2 = match units.get(n).copied().map(u32::from) {
                Some(c2) if c2 & 0xFC00 == 0xDC00 => c2,
                _ => {
                    debug!(index = n - 1, unit = c1, "unmatched lead surrogate");
                    return Err(CodecError::MalformedSurrogate {
                        kind: Surrogate::Lead,
                        index: n - 1,
                    });
                }
            };

            let cp = ((c1 & 0x3FF) << 10) + (c2 & 0x3FF) + 0x10000;
            out.extend_from_slice(&[
                (0xF0 | (cp >> 18)) as u8,
                (0x80 | ((cp >> 12) & 0x3F)) as u8,
                (0x80 | ((cp >> 6) & 0x3F)) as u8,
                (0x80 | (cp & 0x3F)) as u8,
            ]);
        }

        n += 1;
    }

    Ok(ByteString(out))
}

/// Decodes a UTF-8 [`ByteString`] back into code units.
///
/// ```rust
/// use flatline::codec::{ByteString, decode};
///
/// let bytes = ByteString::new("Grüße".as_bytes().to_vec());
/// assert_eq!(decode(&bytes).to_string_lossy(), "Grüße");
/// ```
pub fn decode(input: &ByteString) -> CodePointString {
    decode_units(&input.to_units())
}

/// Decodes a sequence of units, each treated as one UTF-8 byte.
///
/// Leads are classified by value alone: `<= 191` passes through, `<= 223`
/// starts a 2-unit sequence, `<= 239` a 3-unit sequence, anything larger a
/// 4-unit sequence re-emitted as a surrogate pair. Continuation units are
/// masked to their low six bits and read as zero past the end of the input.
pub fn decode_units(units: &[u16]) -> CodePointString {
    let at = |i: usize| units.get(i).map_or(0, |&u| i32::from(u));

    let mut out = Vec::with_capacity(units.len());
    let mut i = 0;

    while i < units.len() {
        let c1 = i32::from(units[i]);

        if c1 <= 191 {
            out.push(c1 as u16);
            i += 1;
        } else if c1 <= 223 {
            out.push((((c1 & 0x1F) << 6) | (at(i + 1) & 0x3F)) as u16);
            i += 2;
        } else if c1 <= 239 {
            out.push((((c1 & 0x0F) << 12) | ((at(i + 1) & 0x3F) << 6) | (at(i + 2) & 0x3F)) as u16);
            i += 3;
        } else {
            // May go negative for a zero payload; the masks below wrap it.
            let v = (((c1 & 0x07) << 18)
                | ((at(i + 1) & 0x3F) << 12)
                | ((at(i + 2) & 0x3F) << 6)
                | (at(i + 3) & 0x3F))
                - 0x10000;
            out.push((0xD800 | ((v >> 10) & 0x3FF)) as u16);
            out.push((0xDC00 | (v & 0x3FF)) as u16);
            i += 4;
        }
    }

    CodePointString(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn test_encode_ascii_unchanged() {
        assert_eq!(encode("test").as_bytes(), b"test");
        assert_eq!(encode_units(&units("Hello World")).unwrap().as_bytes(), b"Hello World");
    }

    #[test]
    fn test_encode_units_matches_str_encoding() {
        for s in ["", "é", "Télécom", "€ 20", "日本語", "😀 emoji 🔐", "\u{7FF}\u{800}\u{FFFF}"] {
            assert_eq!(encode_units(&units(s)).unwrap(), encode(s), "input {s:?}");
        }
    }

    #[test]
    fn test_encode_byte_lengths() {
        assert_eq!(encode_units(&[0x7F]).unwrap().len(), 1);
        assert_eq!(encode_units(&[0x80]).unwrap().len(), 2);
        assert_eq!(encode_units(&[0x7FF]).unwrap().len(), 2);
        assert_eq!(encode_units(&[0x800]).unwrap().len(), 3);
        assert_eq!(encode_units(&[0xFFFF]).unwrap().len(), 3);
        assert_eq!(encode_units(&[0xD83D, 0xDE00]).unwrap().len(), 4);
    }

    #[test]
    fn test_encode_already_encoded_text() {
        let encoded = encode("TÃ©lÃ©com");
        assert_eq!(
            encoded.to_latin1_string(),
            "T\u{C3}\u{83}\u{C2}\u{A9}l\u{C3}\u{83}\u{C2}\u{A9}com"
        );
    }

    #[test]
    fn test_encode_lone_high_surrogate() {
        let err = encode_units(&[0xD800]).unwrap_err();
        assert_eq!(
            err,
            CodecError::MalformedSurrogate {
                kind: Surrogate::Lead,
                index: 0
            }
        );
        assert_eq!(err.to_string(), "unmatched lead surrogate at 0");
    }

    #[test]
    fn test_encode_high_surrogate_followed_by_non_surrogate() {
        let err = encode_units(&[0x61, 0xD83D, 0x61]).unwrap_err();
        assert_eq!(
            err,
            CodecError::MalformedSurrogate {
                kind: Surrogate::Lead,
                index: 1
            }
        );
    }

    #[test]
    fn test_encode_lone_low_surrogate() {
        let err = encode_units(&[0x61, 0x62, 0xDC00]).unwrap_err();
        assert_eq!(
            err,
            CodecError::MalformedSurrogate {
                kind: Surrogate::Trail,
                index: 2
            }
        );
        assert_eq!(err.to_string(), "unmatched trail surrogate at 2");
    }

    #[test]
    fn test_decode_round_trip() {
        for s in ["test", "Télécom", "Grüße", "€", "日本語", "😀🔐"] {
            assert_eq!(decode(&encode(s)).into_string().unwrap(), s);
        }
    }

    #[test]
    fn test_decode_latin1_view() {
        // "TÃ©lÃ©com" is the UTF-8 bytes of "Télécom" read as Latin-1.
        assert_eq!(decode_units(&units("TÃ©lÃ©com")).to_string_lossy(), "Télécom");
    }

    #[test]
    fn test_decode_continuation_bytes_pass_through() {
        // 128..=191 are below every lead threshold.
        assert_eq!(decode_units(&[0x80, 0xBF]).as_units(), &[0x80, 0xBF]);
    }

    #[test]
    fn test_decode_truncated_sequences_read_zero() {
        assert_eq!(decode_units(&[0xC3]).as_units(), &[0xC0]);
        assert_eq!(decode_units(&[0xE2, 0x82]).as_units(), &[0x2080]);
    }

    #[test]
    fn test_decode_wide_units_use_lead_thresholds() {
        // '€' (0x20AC) is above 239, so it starts a 4-unit sequence.
        assert_eq!(decode_units(&units("€")).as_units(), &[0xDBC0, 0xDC00]);
        // 'é' (0xE9) consumes the two units after it.
        assert_eq!(decode_units(&units("Télécom")).as_units(), &[84, 39721, 99, 111, 109]);
    }

    #[test]
    fn test_decode_negative_payload_wraps() {
        assert_eq!(decode_units(&[0xF0]).as_units(), &[0xDBC0, 0xDC00]);
    }

    #[test]
    fn test_encode_decode_encode_is_stable() {
        let bytes = encode("mixed ascii, 日本語 and 😀");
        assert_eq!(encode_units(decode(&bytes).as_units()).unwrap(), bytes);
    }

    #[test]
    fn test_empty_input() {
        assert!(encode("").is_empty());
        assert!(encode_units(&[]).unwrap().is_empty());
        assert!(decode_units(&[]).is_empty());
    }
}
