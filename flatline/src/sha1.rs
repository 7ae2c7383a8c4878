//! SHA-1 digests over UTF-8 encoded text.
//!
//! The input is first passed through [`codec::encode`], so `sha1(s)` equals
//! the SHA-1 of the UTF-8 bytes of `s` (what PHP's `sha1()` returns for a
//! UTF-8 string). Output is always 40 lowercase hex characters.
//!
//! SHA-1 is broken for collision resistance. Use it for compatibility with
//! existing digests, not for anything security sensitive.
//!
//! ## Examples
//!
//! ```rust
//! use flatline::sha1;
//!
//! assert_eq!(sha1("Hello World"), "0a4d55a8d778e5022fab701977c5d840bbc486d0");
//! assert_eq!(sha1("").len(), 40);
//! ```

use tracing::trace;

use crate::codec;
use crate::error::Result;

/// Length of a hex-encoded SHA-1 digest.
pub const SHA1_HEX_LEN: usize = 40;

const IV: [u32; 5] = [0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476, 0xC3D2E1F0];

const K: [u32; 4] = [0x5A827999, 0x6ED9EBA1, 0x8F1BBCDC, 0xCA62C1D6];

/// Computes the SHA-1 digest of a string's UTF-8 encoding.
///
/// ```rust
/// use flatline::sha1;
///
/// assert_eq!(sha1("Télécom"), "1f7baa5ae8ecbfc67e817518a7c1b672089716ea");
/// ```
pub fn sha1(input: &str) -> String {
    sha1_bytes(codec::encode(input).as_bytes())
}

/// Computes the SHA-1 digest of raw UTF-16 code units.
///
/// ## Errors
///
/// Returns [`crate::CodecError::MalformedSurrogate`] if the units hold an
/// unpaired surrogate.
pub fn sha1_units(units: &[u16]) -> Result<String> {
    let bytes = codec::encode_units(units)?;
    Ok(sha1_bytes(bytes.as_bytes()))
}

/// Computes the SHA-1 digest of raw bytes, bypassing the codec.
pub fn sha1_bytes(data: &[u8]) -> String {
    trace!(len = data.len(), "sha1");

    let words = pad_message(data);
    let mut state = IV;

    for block in words.chunks_exact(16) {
        compress(&mut state, block);
    }

    state.iter().map(|word| format!("{word:08x}")).collect()
}

/// Packs the message into big-endian words with the `0x80` terminator,
/// zero fill and the 64-bit bit length, to a multiple of 16 words.
fn pad_message(data: &[u8]) -> Vec<u32> {
    let len = data.len();
    let mut words = Vec::with_capacity(len / 4 + 18);

    let mut chunks = data.chunks_exact(4);
    for chunk in chunks.by_ref() {
        words.push(u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }

    // 0..=3 trailing bytes, then the terminator bit right after them.
    let rem = chunks.remainder();
    let mut tail = [0u8; 4];
    tail[..rem.len()].copy_from_slice(rem);
    tail[rem.len()] = 0x80;
    words.push(u32::from_be_bytes(tail));

    while words.len() % 16 != 14 {
        words.push(0);
    }

    let bit_len = (len as u64).wrapping_mul(8);
    words.push((bit_len >> 32) as u32);
    words.push(bit_len as u32);

    words
}

fn compress(state: &mut [u32; 5], block: &[u32]) {
    let mut w = [0u32; 80];
    w[..16].copy_from_slice(block);
    for i in 16..80 {
        w[i] = (w[i - 3] ^ w[i - 8] ^ w[i - 14] ^ w[i - 16]).rotate_left(1);
    }

    let [mut a, mut b, mut c, mut d, mut e] = *state;

    for (i, &wi) in w.iter().enumerate() {
        let (f, k) = match i {
            0..=19 => ((b & c) | (!b & d), K[0]),
            20..=39 => (b ^ c ^ d, K[1]),
            40..=59 => ((b & c) | (b & d) | (c & d), K[2]),
            _ => (b ^ c ^ d, K[3]),
        };

        let temp = a
            .rotate_left(5)
            .wrapping_add(f)
            .wrapping_add(e)
            .wrapping_add(wi)
            .wrapping_add(k);
        e = d;
        d = c;
        c = b.rotate_left(30);
        b = a;
        a = temp;
    }

    for (h, v) in state.iter_mut().zip([a, b, c, d, e]) {
        *h = h.wrapping_add(v);
    }
}
