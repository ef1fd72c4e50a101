//! # Hide / Reveal Pipeline
//!
//! Glue between the encryption envelope and the steganography codec.
//!
//! ## Hiding
//! 1. UTF-8 encode the message
//! 2. If a password is given, replace it with the base64url envelope
//! 3. Embed the bytes into channel 0 of the cover
//!
//! ## Revealing
//! 1. Extract bytes up to the terminator
//! 2. No terminator means no message: `Ok(None)`
//! 3. Decrypt the envelope if a password is given, otherwise decode as UTF-8
//!
//! An image that carries an empty message reveals `Some("")`, which is never
//! confused with `None`.

use std::path::{Path, PathBuf};

use log::debug;
use serde::Serialize;

use crate::encryption::{self, cipher::MIN_TOKEN_LEN, SALT_LEN};
use crate::error::{StegError, StegResult};
use crate::processing::image_io::{lossless_format_for, load_cover, save_cover};
use crate::processing::pixels::PixelGrid;
use crate::processing::steganography::{capacity_bytes, embed, extract};

/// Hide `message` in a copy of `grid`, encrypting it first when `password` is set.
pub fn hide_message<G: PixelGrid + Clone>(
    grid: &G,
    message: &str,
    password: Option<&str>,
) -> StegResult<G> {
    let payload = match password {
        Some(password) => encryption::encrypt(message, password)?.into_bytes(),
        None => {
            check_plain_message(message)?;
            message.as_bytes().to_vec()
        }
    };
    debug!(
        "Embedding {} payload bytes ({})",
        payload.len(),
        if password.is_some() { "encrypted" } else { "plain" }
    );
    embed(grid, &payload)
}

/// Reject plain text the terminator would cut short. A lone interior NUL is fine.
fn check_plain_message(message: &str) -> StegResult<()> {
    if message.ends_with('\0') {
        return Err(StegError::UnembeddableMessage(
            "trailing NUL characters would be lost".to_string(),
        ));
    }
    if message.contains("\0\0\0\0") {
        return Err(StegError::UnembeddableMessage(
            "a run of four NUL characters would end the message early".to_string(),
        ));
    }
    Ok(())
}

/// Recover a message hidden by [`hide_message`].
///
/// # Returns
/// - `Ok(Some(String))`: The recovered message
/// - `Ok(None)`: The image carries no message
/// - `Err`: A message was found but could not be decoded or decrypted
pub fn reveal_message<G: PixelGrid + ?Sized>(
    grid: &G,
    password: Option<&str>,
) -> StegResult<Option<String>> {
    let payload = match extract(grid) {
        Ok(payload) => payload,
        Err(StegError::TerminatorNotFound) => {
            debug!("No terminator in {} pixels, treating as no message", grid.pixel_count());
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    let text = String::from_utf8(payload).map_err(|_| StegError::InvalidUtf8)?;
    match password {
        Some(password) => encryption::decrypt(&text, password).map(Some),
        None => Ok(Some(text)),
    }
}

/// Load `input`, hide `message`, and save to `output` (or back over `input`).
///
/// The output format is checked before the image is loaded or the key derived.
/// Returns the path that was written.
pub fn hide_in_file(
    input: &Path,
    message: &str,
    output: Option<&Path>,
    password: Option<&str>,
) -> StegResult<PathBuf> {
    let output = output.unwrap_or(input);
    lossless_format_for(output)?;

    let cover = load_cover(input)?;
    let stego = hide_message(&cover, message, password)?;
    save_cover(&stego, output)?;
    Ok(output.to_path_buf())
}

/// Load `input` and recover its hidden message.
pub fn reveal_from_file(input: &Path, password: Option<&str>) -> StegResult<Option<String>> {
    let cover = load_cover(input)?;
    reveal_message(&cover, password)
}

/// How much text a cover can carry.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Capacity {
    pub pixels: usize,
    /// Bytes of plain UTF-8 message.
    pub max_message_bytes: usize,
    /// Bytes of UTF-8 message when a password is used.
    pub max_encrypted_message_bytes: usize,
}

impl Capacity {
    pub fn of<G: PixelGrid + ?Sized>(grid: &G) -> Self {
        let max_message_bytes = capacity_bytes(grid);
        // base64 turns every 3 envelope bytes into 4 payload bytes
        let max_envelope_bytes = max_message_bytes / 4 * 3;
        Self {
            pixels: grid.pixel_count(),
            max_message_bytes,
            max_encrypted_message_bytes: max_envelope_bytes.saturating_sub(SALT_LEN + MIN_TOKEN_LEN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn cover(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([255, 255, 255]))
    }

    #[test]
    fn test_plain_roundtrip() {
        let stego = hide_message(&cover(100, 100), "Hello, World!", None).unwrap();
        assert_eq!(
            reveal_message(&stego, None).unwrap().as_deref(),
            Some("Hello, World!")
        );
    }

    #[test]
    fn test_empty_message_is_not_no_message() {
        let stego = hide_message(&cover(10, 10), "", None).unwrap();
        assert_eq!(reveal_message(&stego, None).unwrap(), Some(String::new()));
        assert_eq!(reveal_message(&cover(10, 10), None).unwrap(), None);
    }

    #[test]
    fn test_encrypted_roundtrip() {
        let stego = hide_message(&cover(100, 100), "测试🙂", Some("pw")).unwrap();
        assert_eq!(
            reveal_message(&stego, Some("pw")).unwrap().as_deref(),
            Some("测试🙂")
        );

        // without the password the envelope text comes back verbatim
        let raw = reveal_message(&stego, None).unwrap().unwrap();
        assert_ne!(raw, "测试🙂");
        assert_eq!(encryption::decrypt(&raw, "pw").unwrap(), "测试🙂");
    }

    #[test]
    fn test_wrong_password_is_error_not_none() {
        let stego = hide_message(&cover(100, 100), "secret", Some("right")).unwrap();
        let err = reveal_message(&stego, Some("wrong")).unwrap_err();
        assert!(err.is_recovery_failure());
    }

    #[test]
    fn test_password_on_plain_message_fails() {
        let stego = hide_message(&cover(100, 100), "plain text", None).unwrap();
        assert!(matches!(
            reveal_message(&stego, Some("pw")),
            Err(StegError::Decryption(_))
        ));
    }

    #[test]
    fn test_nul_characters_in_plain_text() {
        let grid = cover(100, 100);

        for message in ["ab\0", "a\0\0\0\0b"] {
            assert!(matches!(
                hide_message(&grid, message, None),
                Err(StegError::UnembeddableMessage(_))
            ));
        }

        // a lone or short interior run reads back intact
        let stego = hide_message(&grid, "a\0b\0\0\0c", None).unwrap();
        assert_eq!(
            reveal_message(&stego, None).unwrap().as_deref(),
            Some("a\0b\0\0\0c")
        );

        // encrypted messages travel as base64 and keep every NUL
        let stego = hide_message(&grid, "a\0\0\0\0b\0", Some("pw")).unwrap();
        assert_eq!(
            reveal_message(&stego, Some("pw")).unwrap().as_deref(),
            Some("a\0\0\0\0b\0")
        );
    }

    #[test]
    fn test_capacity_exceeded_surfaces() {
        let message = "A".repeat(20);
        assert!(matches!(
            hide_message(&cover(10, 10), &message, None),
            Err(StegError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn test_capacity_report() {
        let grid = cover(100, 100);
        let capacity = Capacity::of(&grid);
        assert_eq!(capacity.pixels, 10_000);
        assert_eq!(capacity.max_message_bytes, 1246);
        assert_eq!(capacity.max_encrypted_message_bytes, 888);

        let message = "m".repeat(capacity.max_message_bytes);
        assert!(hide_message(&grid, &message, None).is_ok());
    }

    #[test]
    fn test_encrypted_capacity_is_exact_enough() {
        let grid = cover(100, 100);
        let capacity = Capacity::of(&grid);
        let message = "m".repeat(capacity.max_encrypted_message_bytes);
        let stego = hide_message(&grid, &message, Some("pw")).unwrap();
        assert_eq!(reveal_message(&stego, Some("pw")).unwrap(), Some(message));
    }
}
