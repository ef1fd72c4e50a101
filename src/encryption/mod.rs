//! # Message Encryption
//!
//! Optional password protection applied to a message before it is embedded.
//!
//! - [`kdf`]: PBKDF2-HMAC-SHA256 password key derivation
//! - [`cipher`]: AES-256-GCM sealed tokens
//! - [`envelope`]: salt + token bundle, base64url encoded

pub mod cipher;
pub mod envelope;
pub mod kdf;

pub use envelope::{decrypt, encrypt};
pub use kdf::{derive_key, DerivedKey, KDF_ITERATIONS, KEY_LEN, SALT_LEN};
