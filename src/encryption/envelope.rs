//! # Encryption Envelope
//!
//! Password protection for a text message. The envelope bundles the random
//! salt with the cipher token so the password is the only other input
//! needed to decrypt:
//!
//! ```text
//! envelope := base64url( salt[16] ++ cipher_token )
//! ```
//!
//! The result is plain ASCII and never contains a zero byte, so it is safe to
//! hand to the steganography codec as a payload.

use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use log::debug;
use rand::rngs::OsRng;
use rand::RngCore;

use super::cipher::{check_token, open, seal};
use super::kdf::{derive_key, Salt, SALT_LEN};
use crate::error::{StegError, StegResult};

/// Encrypt `message` under `password`.
///
/// A fresh salt and nonce are generated on every call, so encrypting the same
/// message twice yields two different envelopes.
///
/// # Example
/// ```ignore
/// let envelope = encrypt("secret message", "strongpassword")?;
/// assert_eq!(decrypt(&envelope, "strongpassword")?, "secret message");
/// ```
pub fn encrypt(message: &str, password: &str) -> StegResult<String> {
    let mut salt: Salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);

    let key = derive_key(password, &salt);
    let token = seal(&key, message.as_bytes())?;

    let mut envelope = Vec::with_capacity(SALT_LEN + token.len());
    envelope.extend_from_slice(&salt);
    envelope.extend_from_slice(&token);

    debug!("Sealed {} message bytes into a {} byte envelope", message.len(), envelope.len());
    Ok(URL_SAFE.encode(envelope))
}

/// Decrypt an envelope produced by [`encrypt`].
///
/// # Errors
/// - `StegError::Decryption`: Not base64, shorter than a salt, or a malformed token
/// - `StegError::AuthenticationFailure`: Wrong password or tampered envelope
/// - `StegError::InvalidUtf8`: Authenticated plaintext is not UTF-8
pub fn decrypt(envelope: &str, password: &str) -> StegResult<String> {
    let data = URL_SAFE
        .decode(envelope.trim())
        .map_err(|e| StegError::Decryption(format!("envelope is not valid base64: {e}")))?;

    if data.len() < SALT_LEN {
        return Err(StegError::Decryption(format!(
            "envelope too short ({} bytes, salt alone is {})",
            data.len(),
            SALT_LEN
        )));
    }

    let (salt, token) = data.split_at(SALT_LEN);
    check_token(token)?;

    let salt: Salt = salt
        .try_into()
        .map_err(|_| StegError::Decryption("malformed salt".to_string()))?;
    let key = derive_key(password, &salt);
    let plaintext = open(&key, token)?;

    String::from_utf8(plaintext).map_err(|_| StegError::InvalidUtf8)
}
