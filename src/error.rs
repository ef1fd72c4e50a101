//! # Error Types
//!
//! Every fallible operation in the library returns [`StegResult`]. The binary
//! decides exit codes and user messaging from the variant it receives.

use thiserror::Error;

/// Result alias used throughout the library.
pub type StegResult<T> = Result<T, StegError>;

/// Errors produced while hiding or recovering a message.
#[derive(Debug, Error)]
pub enum StegError {
    /// Payload plus terminator needs more pixels than the image has.
    /// Nothing has been written when this is returned.
    #[error("image too small for this message: need {required_bits} bits but only have {available_bits} bits available")]
    CapacityExceeded {
        required_bits: usize,
        available_bits: usize,
    },

    /// The pixel sequence ran out before four consecutive zero bytes were read.
    #[error("no hidden message found (terminator missing)")]
    TerminatorNotFound,

    /// Tag verification failed. Deliberately does not say whether the
    /// password was wrong or the data was corrupted.
    #[error("could not recover message: wrong password or corrupted data")]
    AuthenticationFailure,

    /// The envelope or token is structurally invalid (bad base64, too short, unknown version).
    #[error("could not recover message: {0}")]
    Decryption(String),

    /// Plain message would not survive extraction: it ends with NUL or
    /// contains four NULs in a row, both of which read back as the terminator.
    #[error("message cannot be hidden without a password: {0}")]
    UnembeddableMessage(String),

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("recovered message is not valid UTF-8")]
    InvalidUtf8,

    /// Output format would not preserve least-significant bits.
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StegError {
    /// True for failures that mean "could not recover message" from an envelope.
    pub fn is_recovery_failure(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailure | Self::Decryption(_) | Self::InvalidUtf8
        )
    }
}
