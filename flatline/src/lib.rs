//! Legacy text codec and digest helpers.
//!
//! This crate reproduces the string utilities older PHP-style code bases
//! rely on, bit for bit, so that digests and encodings stored by those
//! systems can still be produced and checked:
//!
//! - **`codec`**: UTF-8 encode/decode with 8-bit string semantics
//! - **`sha1`**: SHA-1 over the UTF-8 encoding of a string
//! - **`md5`**: MD5 over the legacy UTF-8 decoding of a string
//! - **`salted`**: salted SHA-512 hashes and 108-char password hashes
//! - **`distance`**: Levenshtein edit distance
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `sha1` | Yes | SHA-1 hex digests |
//! | `md5` | Yes | MD5 hex digests |
//! | `salted` | Yes | Salted SHA-512 and password hashes (`sha2`, `base64`, `rand`) |
//!
//! The codec, the dynamic-value wrappers and the distance helpers are always
//! available.
//!
//! ## Examples
//!
//! ```rust
//! use flatline::{levenshtein, utf8_encode};
//! use serde_json::json;
//!
//! assert_eq!(utf8_encode(Some(&json!("é"))).unwrap(), Some(json!("Ã©")));
//! assert_eq!(levenshtein("kitten", "sitting"), Some(3));
//! ```
//!
//! With the default features:
//!
//! ```rust
//! # #[cfg(all(feature = "sha1", feature = "md5"))]
//! # {
//! use flatline::{md5, sha1};
//!
//! assert_eq!(sha1("Hello World"), "0a4d55a8d778e5022fab701977c5d840bbc486d0");
//! assert_eq!(md5("Hello World"), "b10a8db164e0754105b7a99be72e3fe5");
//! # }
//! ```

pub mod codec;
pub mod distance;
mod error;
mod value;

#[cfg(feature = "sha1")]
pub mod sha1;

#[cfg(feature = "md5")]
pub mod md5;

#[cfg(feature = "salted")]
pub mod salted;

pub use codec::{ByteString, CodePointString};
pub use distance::{levenshtein, str_dist};
pub use error::{CodecError, Result, Surrogate};
pub use value::{utf8_decode, utf8_encode};

#[cfg(feature = "sha1")]
pub use sha1::{SHA1_HEX_LEN, sha1, sha1_bytes, sha1_units};

#[cfg(feature = "md5")]
pub use md5::{MD5_HEX_LEN, md5, md5_bytes, md5_units};

#[cfg(feature = "salted")]
pub use salted::{
    PASSWORD_HASH_LEN, PasswordError, SALT_ALPHABET, SALT_LEN, password_hash,
    password_hash_with_salt, password_verify, salted_hash,
};
