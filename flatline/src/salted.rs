//! Salted SHA-512 hashing and self-describing password hashes.
//!
//! A password hash is a 20-character random salt followed by the base64
//! SHA-512 of `password ‖ salt`, 108 characters in all. Storing the salt in
//! front of the digest means verification needs nothing but the stored
//! string.
//!
//! These hashes are fast by construction. They exist so that hashes already
//! stored in this format keep verifying; new systems should prefer a slow
//! password KDF such as Argon2id.
//!
//! ## Examples
//!
//! ```rust
//! use flatline::{password_hash, password_verify};
//!
//! let stored = password_hash("my-secret-password").unwrap();
//! assert_eq!(stored.len(), 108);
//!
//! assert!(password_verify("my-secret-password", &stored).unwrap());
//! assert!(!password_verify("wrong-password", &stored).unwrap());
//! ```

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::Rng;
use rand::rngs::OsRng;
use sha2::{Digest, Sha512};
use thiserror::Error;
use tracing::debug;

/// Number of salt characters at the front of a password hash.
pub const SALT_LEN: usize = 20;

/// Characters a generated salt is drawn from.
pub const SALT_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789$./";

/// Length of a complete password hash: the salt plus 88 base64 characters.
pub const PASSWORD_HASH_LEN: usize = 108;

/// Errors that can occur while creating or checking password hashes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    /// No password was given to hash.
    #[error("no password was given to hash")]
    EmptyPassword,

    /// Verification needs both a password and a stored hash.
    #[error("need to provide both a password and a hash to verify")]
    MissingInput,

    /// The salt does not have the required length.
    #[error("salt must be {expected} characters, received {found}")]
    InvalidSalt { expected: usize, found: usize },

    /// The salt holds a character outside [`SALT_ALPHABET`].
    #[error("salt contains {0:?}, which is not a valid salt character")]
    InvalidSaltChar(char),
}

/// Hashes `value` with `salt`, returning base64 SHA-512 of the two
/// concatenated.
///
/// ```rust
/// use flatline::salted_hash;
///
/// assert_eq!(
///     salted_hash("secret-word", "3o3UnhWFB28hGYK"),
///     "WHJzvf0ZLXXOHW5uVlB/FWaAbsQFzkXgtG7CvDQGWplqlVd20WDZ4eYBX3062dRxJFf+4bx1IBn/LJBst6BN2w=="
/// );
/// ```
pub fn salted_hash(value: &str, salt: &str) -> String {
    let mut hasher = Sha512::new();
    hasher.update(value.as_bytes());
    hasher.update(salt.as_bytes());
    STANDARD.encode(hasher.finalize())
}

/// Creates a password hash with a freshly generated salt.
///
/// Two calls with the same password return different strings.
///
/// ## Errors
///
/// Returns [`PasswordError::EmptyPassword`] if `password` is empty.
pub fn password_hash(password: &str) -> Result<String, PasswordError> {
    if password.is_empty() {
        debug!("refusing to hash an empty password");
        return Err(PasswordError::EmptyPassword);
    }

    let salt = generate_salt();
    Ok(format!("{salt}{}", salted_hash(password, &salt)))
}

/// Creates a password hash with a caller-provided salt.
///
/// Prefer [`password_hash`]; this exists for tests and for migrating
/// hashes whose salt is already known.
///
/// ```rust
/// use flatline::{password_hash_with_salt, password_verify};
///
/// let stored = password_hash_with_salt("secret", "d3eXU3x/LcnvQskL.eDr").unwrap();
/// assert!(stored.starts_with("d3eXU3x/LcnvQskL.eDr"));
/// assert!(password_verify("secret", &stored).unwrap());
/// ```
///
/// ## Errors
///
/// Returns [`PasswordError::EmptyPassword`] if `password` is empty and
/// [`PasswordError::InvalidSalt`] unless `salt` is exactly [`SALT_LEN`]
/// characters. Returns [`PasswordError::InvalidSaltChar`] for characters
/// outside [`SALT_ALPHABET`], which [`password_verify`] could never accept.
pub fn password_hash_with_salt(password: &str, salt: &str) -> Result<String, PasswordError> {
    if password.is_empty() {
        return Err(PasswordError::EmptyPassword);
    }

    let found = salt.chars().count();
    if found != SALT_LEN {
        debug!(found, "rejected salt of wrong length");
        return Err(PasswordError::InvalidSalt {
            expected: SALT_LEN,
            found,
        });
    }

    let outside_alphabet = |c: &char| !c.is_ascii() || !SALT_ALPHABET.contains(&(*c as u8));
    if let Some(bad) = salt.chars().find(outside_alphabet) {
        debug!(%bad, "rejected salt character");
        return Err(PasswordError::InvalidSaltChar(bad));
    }

    Ok(format!("{salt}{}", salted_hash(password, salt)))
}

/// Checks `password` against a hash produced by [`password_hash`].
///
/// A stored hash of the wrong length is reported as a mismatch rather than
/// an error.
///
/// ## Errors
///
/// Returns [`PasswordError::MissingInput`] if either argument is empty.
pub fn password_verify(password: &str, stored: &str) -> Result<bool, PasswordError> {
    if password.is_empty() || stored.is_empty() {
        return Err(PasswordError::MissingInput);
    }

    // Generated hashes are pure ASCII, so a byte length check also rules out
    // a split inside a multi-byte char below.
    if stored.len() != PASSWORD_HASH_LEN || !stored.is_ascii() {
        debug!(len = stored.len(), "stored password hash has unexpected shape");
        return Ok(false);
    }

    let (salt, digest) = stored.split_at(SALT_LEN);
    Ok(salted_hash(password, salt) == digest)
}

fn generate_salt() -> String {
    let mut rng = OsRng;
    (0..SALT_LEN)
        .map(|_| char::from(SALT_ALPHABET[rng.gen_range(0..SALT_ALPHABET.len())]))
        .collect()
}
