//! # Password Key Derivation
//!
//! PBKDF2-HMAC-SHA256 with 100,000 iterations turns a password and a 16-byte
//! salt into a 32-byte AES-256 key. The iteration count is fixed: it is not
//! recorded in the envelope, so changing it would make existing images
//! unreadable.

use std::fmt;

use log::warn;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;
/// Derived key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;
/// PBKDF2 iteration count.
pub const KDF_ITERATIONS: u32 = 100_000;

pub type Salt = [u8; SALT_LEN];

/// Symmetric key derived from a password. Wiped from memory on drop and
/// never written anywhere.
pub struct DerivedKey(Zeroizing<[u8; KEY_LEN]>);

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Derive the encryption key for `password` and `salt`.
///
/// Deterministic: the same pair always yields the same key. An empty password
/// is accepted but produces a key anyone can reproduce.
pub fn derive_key(password: &str, salt: &Salt) -> DerivedKey {
    if password.is_empty() {
        warn!("Deriving a key from an empty password; the message is effectively unprotected");
    }
    DerivedKey(pbkdf2_sha256(password.as_bytes(), salt, KDF_ITERATIONS))
}

fn pbkdf2_sha256(password: &[u8], salt: &[u8], rounds: u32) -> Zeroizing<[u8; KEY_LEN]> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2_hmac::<Sha256>(password, salt, rounds, &mut key[..]);
    key
}
