//! # Authenticated Cipher
//!
//! AES-256-GCM over a derived key. Each sealed token is self-contained:
//!
//! ```text
//! [1 byte: version 0x01] [12 bytes: nonce] [N bytes: ciphertext] [16 bytes: tag]
//! ```
//!
//! The nonce is drawn from the OS RNG for every seal.

use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::Aes256Gcm;
use rand::rngs::OsRng;
use rand::RngCore;

use super::kdf::DerivedKey;
use crate::error::{StegError, StegResult};

/// Token format version.
pub const TOKEN_VERSION: u8 = 0x01;
/// AES-GCM nonce length in bytes.
pub const NONCE_LEN: usize = 12;
/// AES-GCM tag length in bytes.
pub const TAG_LEN: usize = 16;
/// Smallest well-formed token (empty plaintext).
pub const MIN_TOKEN_LEN: usize = 1 + NONCE_LEN + TAG_LEN;

/// Encrypt and authenticate `plaintext` under `key`.
pub fn seal(key: &DerivedKey, plaintext: &[u8]) -> StegResult<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| StegError::Encryption(format!("invalid key: {e}")))?;

    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);

    let ciphertext = cipher
        .encrypt(GenericArray::from_slice(&nonce), plaintext)
        .map_err(|e| StegError::Encryption(format!("AES-GCM seal failed: {e}")))?;

    let mut token = Vec::with_capacity(1 + NONCE_LEN + ciphertext.len());
    token.push(TOKEN_VERSION);
    token.extend_from_slice(&nonce);
    token.extend_from_slice(&ciphertext);
    Ok(token)
}

/// Verify and decrypt a token produced by [`seal`].
///
/// # Errors
/// - `StegError::Decryption`: Token is too short or has an unknown version byte
/// - `StegError::AuthenticationFailure`: Wrong key, or the token was modified
pub fn open(key: &DerivedKey, token: &[u8]) -> StegResult<Vec<u8>> {
    check_token(token)?;

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| StegError::Decryption(format!("invalid key: {e}")))?;
    let (nonce, ciphertext) = token[1..].split_at(NONCE_LEN);

    cipher
        .decrypt(GenericArray::from_slice(nonce), ciphertext)
        .map_err(|_| StegError::AuthenticationFailure)
}

/// Structural checks that need no key. Lets callers reject garbage before
/// paying for key derivation.
pub fn check_token(token: &[u8]) -> StegResult<()> {
    if token.len() < MIN_TOKEN_LEN {
        return Err(StegError::Decryption(format!(
            "cipher token too short ({} bytes, need at least {})",
            token.len(),
            MIN_TOKEN_LEN
        )));
    }
    if token[0] != TOKEN_VERSION {
        return Err(StegError::Decryption(format!(
            "unsupported cipher token version {:#04x}",
            token[0]
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encryption::kdf::derive_key;

    fn key(password: &str) -> DerivedKey {
        derive_key(password, b"0123456789abcdef")
    }

    #[test]
    fn test_seal_open_roundtrip() {
        let k = key("pw");
        let token = seal(&k, b"secret message").unwrap();
        assert_eq!(token[0], TOKEN_VERSION);
        assert_eq!(token.len(), MIN_TOKEN_LEN + 14);
        assert_eq!(open(&k, &token).unwrap(), b"secret message");
    }

    #[test]
    fn test_seal_empty_plaintext() {
        let k = key("pw");
        let token = seal(&k, b"").unwrap();
        assert_eq!(token.len(), MIN_TOKEN_LEN);
        assert!(open(&k, &token).unwrap().is_empty());
    }

    #[test]
    fn test_nonce_differs_per_seal() {
        let k = key("pw");
        let a = seal(&k, b"same").unwrap();
        let b = seal(&k, b"same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_wrong_key_is_authentication_failure() {
        let token = seal(&key("right"), b"secret").unwrap();
        assert!(matches!(
            open(&key("wrong"), &token),
            Err(StegError::AuthenticationFailure)
        ));
    }

    #[test]
    fn test_every_flipped_byte_is_detected() {
        let k = key("pw");
        let token = seal(&k, b"tamper me").unwrap();

        for i in 1..token.len() {
            let mut tampered = token.clone();
            tampered[i] ^= 0x01;
            assert!(
                matches!(open(&k, &tampered), Err(StegError::AuthenticationFailure)),
                "flip at byte {i} was not detected"
            );
        }
    }

    #[test]
    fn test_malformed_tokens_rejected_before_decrypt() {
        let k = key("pw");
        assert!(matches!(open(&k, &[]), Err(StegError::Decryption(_))));
        assert!(matches!(
            open(&k, &[TOKEN_VERSION; MIN_TOKEN_LEN - 1]),
            Err(StegError::Decryption(_))
        ));

        let mut token = seal(&k, b"x").unwrap();
        token[0] = 0x80;
        assert!(matches!(open(&k, &token), Err(StegError::Decryption(_))));
    }
}
