//! MD5 digests with legacy input normalization.
//!
//! [`md5`] passes its input through [`codec::decode_units`] before hashing,
//! so for plain ASCII it is the standard MD5 and for text that is really
//! UTF-8 read as Latin-1 (`"TÃ©lÃ©com"`) it hashes the decoded Latin-1 bytes.
//! Other non-ASCII input goes through the same unvalidated decode and then
//! packs each resulting code unit into its byte lane, letting wide units
//! spill into the neighbouring lane. Digests stored by older systems were
//! produced this way, so the behavior is kept as is. [`md5_bytes`] is the
//! plain MD5 of a byte slice.
//!
//! Output is always 32 lowercase hex characters.
//!
//! ## Examples
//!
//! ```rust
//! use flatline::{md5, md5_bytes};
//!
//! assert_eq!(md5("Hello World"), "b10a8db164e0754105b7a99be72e3fe5");
//! assert_eq!(md5("Hello World"), md5_bytes(b"Hello World"));
//! ```

use tracing::trace;

use crate::codec::{self, CodePointString};

/// Length of a hex-encoded MD5 digest.
pub const MD5_HEX_LEN: usize = 32;

const IV: [u32; 4] = [0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476];

#[rustfmt::skip]
const K: [u32; 64] = [
    0xD76AA478, 0xE8C7B756, 0x242070DB, 0xC1BDCEEE, 0xF57C0FAF, 0x4787C62A, 0xA8304613, 0xFD469501,
    0x698098D8, 0x8B44F7AF, 0xFFFF5BB1, 0x895CD7BE, 0x6B901122, 0xFD987193, 0xA679438E, 0x49B40821,
    0xF61E2562, 0xC040B340, 0x265E5A51, 0xE9B6C7AA, 0xD62F105D, 0x02441453, 0xD8A1E681, 0xE7D3FBC8,
    0x21E1CDE6, 0xC33707D6, 0xF4D50D87, 0x455A14ED, 0xA9E3E905, 0xFCEFA3F8, 0x676F02D9, 0x8D2A4C8A,
    0xFFFA3942, 0x8771F681, 0x6D9D6122, 0xFDE5380C, 0xA4BEEA44, 0x4BDECFA9, 0xF6BB4B60, 0xBEBFBC70,
    0x289B7EC6, 0xEAA127FA, 0xD4EF3085, 0x04881D05, 0xD9D4D039, 0xE6DB99E5, 0x1FA27CF8, 0xC4AC5665,
    0xF4292244, 0x432AFF97, 0xAB9423A7, 0xFC93A039, 0x655B59C3, 0x8F0CCC92, 0xFFEFF47D, 0x85845DD1,
    0x6FA87E4F, 0xFE2CE6E0, 0xA3014314, 0x4E0811A1, 0xF7537E82, 0xBD3AF235, 0x2AD7D2BB, 0xEB86D391,
];

#[rustfmt::skip]
const S: [u32; 16] = [
    7, 12, 17, 22,
    5, 9, 14, 20,
    4, 11, 16, 23,
    6, 10, 15, 21,
];

/// Computes the MD5 digest of a string after legacy UTF-8 decoding.
///
/// ```rust
/// use flatline::md5;
///
/// // UTF-8 bytes seen as Latin-1 decode to "Télécom" in Latin-1.
/// assert_eq!(md5("TÃ©lÃ©com"), "e9110e4bfec350c15773923d0b9b7897");
/// ```
pub fn md5(input: &str) -> String {
    let decoded = codec::decode_units(CodePointString::from(input).as_units());
    md5_units(decoded.as_units())
}

/// Computes the MD5 digest of code units, one unit per byte lane.
pub fn md5_units(units: &[u16]) -> String {
    let units: Vec<u32> = units.iter().copied().map(u32::from).collect();
    digest(&units)
}

/// Computes the standard MD5 digest of raw bytes, bypassing the codec.
pub fn md5_bytes(data: &[u8]) -> String {
    let units: Vec<u32> = data.iter().copied().map(u32::from).collect();
    digest(&units)
}

fn digest(units: &[u32]) -> String {
    trace!(len = units.len(), "md5");

    let words = pad_message(units);
    let mut state = IV;

    for block in words.chunks_exact(16) {
        compress(&mut state, block);
    }

    state
        .iter()
        .flat_map(|word| word.to_le_bytes())
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

/// Packs units little-endian into words, appends the `0x80` terminator and
/// the 64-bit bit length, sized to a multiple of 16 words.
fn pad_message(units: &[u32]) -> Vec<u32> {
    let len = units.len();
    let word_count = ((len + 8) / 64 + 1) * 16;
    let mut words = vec![0u32; word_count];

    for (i, &unit) in units.iter().enumerate() {
        // Bits shifted past 32 are dropped.
        words[i / 4] |= unit << ((i % 4) * 8);
    }
    words[len / 4] |= 0x80 << ((len % 4) * 8);

    let bit_len = (len as u64).wrapping_mul(8);
    words[word_count - 2] = bit_len as u32;
    words[word_count - 1] = (bit_len >> 32) as u32;

    words
}

fn compress(state: &mut [u32; 4], block: &[u32]) {
    let [mut a, mut b, mut c, mut d] = *state;

    for i in 0..64 {
        let (f, g) = match i {
            0..=15 => ((b & c) | (!b & d), i),
            16..=31 => ((b & d) | (c & !d), (5 * i + 1) % 16),
            32..=47 => (b ^ c ^ d, (3 * i + 5) % 16),
            _ => (c ^ (b | !d), (7 * i) % 16),
        };

        let shift = S[(i / 16) * 4 + i % 4];
        let rotated = a
            .wrapping_add(f)
            .wrapping_add(K[i])
            .wrapping_add(block[g])
            .rotate_left(shift);

        a = d;
        d = c;
        c = b;
        b = b.wrapping_add(rotated);
    }

    for (h, v) in state.iter_mut().zip([a, b, c, d]) {
        *h = h.wrapping_add(v);
    }
}
