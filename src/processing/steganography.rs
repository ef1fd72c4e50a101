//! # LSB Steganography Codec
//!
//! Hides a byte payload in the least significant bit of channel 0 of each
//! pixel, one bit per pixel.
//!
//! ## Bitstream Layout
//!
//! ```text
//! bits := MSB-first bits of ( payload ++ 00 00 00 00 )
//! pixel[i].channel0 = (pixel[i].channel0 & 0xFE) | bits[i]
//! ```
//!
//! The four zero bytes are the terminator. Extraction reads whole bytes and
//! stops at the first point where the last four completed bytes are all zero.
//!
//! ### Consequences of the terminator
//! - A payload containing a run of four zero bytes is truncated at that run.
//! - Trailing zero bytes of a payload merge into the terminator and are lost.
//!
//! Neither case occurs for base64 envelopes. Text can contain U+0000, so
//! plain messages are screened before embedding.
//!
//! ### Capacity
//! A grid of `n` pixels holds `n / 8 - 4` payload bytes. Pixels past the end
//! of the bitstream are never touched.

use log::{debug, trace};

use super::pixels::PixelGrid;
use crate::error::{StegError, StegResult};

/// End-of-message marker appended to every payload.
pub const TERMINATOR: [u8; 4] = [0x00; 4];

/// Number of pixels needed to carry `payload_len` bytes plus the terminator.
pub fn required_bits(payload_len: usize) -> usize {
    (payload_len + TERMINATOR.len()) * 8
}

/// Largest payload, in bytes, that fits into `grid`.
pub fn capacity_bytes<G: PixelGrid + ?Sized>(grid: &G) -> usize {
    (grid.pixel_count() / 8).saturating_sub(TERMINATOR.len())
}

/// Embed `payload` into a copy of `grid`.
///
/// # Arguments
/// - `grid`: Cover pixels, left untouched
/// - `payload`: Bytes to hide, may be empty
///
/// # Returns
/// - `Ok(G)`: A copy of `grid` carrying the payload
/// - `Err(StegError::CapacityExceeded)`: Payload plus terminator needs more pixels than `grid` has
///
/// # Example
/// ```ignore
/// let cover = image::RgbImage::new(100, 100);
/// let stego = embed(&cover, b"Hello, World!")?;
/// assert_eq!(extract(&stego)?, b"Hello, World!");
/// ```
pub fn embed<G: PixelGrid + Clone>(grid: &G, payload: &[u8]) -> StegResult<G> {
    check_capacity(grid, payload.len())?;

    let mut stego = grid.clone();
    write_bitstream(&mut stego, payload);
    Ok(stego)
}

/// Embed `payload` directly into `grid`.
///
/// The capacity check runs before the first write, so on error `grid` is
/// exactly as it was.
pub fn embed_in_place<G: PixelGrid + ?Sized>(grid: &mut G, payload: &[u8]) -> StegResult<()> {
    check_capacity(grid, payload.len())?;
    write_bitstream(grid, payload);
    Ok(())
}

/// Extract a payload previously written by [`embed`].
///
/// # Returns
/// - `Ok(Vec<u8>)`: Payload bytes with the terminator removed (possibly empty)
/// - `Err(StegError::TerminatorNotFound)`: Pixels ran out before a terminator was read;
///   the image most likely carries no message
pub fn extract<G: PixelGrid + ?Sized>(grid: &G) -> StegResult<Vec<u8>> {
    let mut bytes = Vec::new();
    let mut current = 0u8;
    let mut bit_index = 0;

    for index in 0..grid.pixel_count() {
        current = (current << 1) | (grid.channel0(index) & 1);
        bit_index += 1;

        if bit_index < 8 {
            continue;
        }

        bytes.push(current);
        current = 0;
        bit_index = 0;

        if bytes.ends_with(&TERMINATOR) {
            bytes.truncate(bytes.len() - TERMINATOR.len());
            debug!(
                "Terminator found after {} pixels, payload is {} bytes",
                index + 1,
                bytes.len()
            );
            return Ok(bytes);
        }
    }

    debug!(
        "Read all {} pixels ({} bytes) without finding a terminator",
        grid.pixel_count(),
        bytes.len()
    );
    Err(StegError::TerminatorNotFound)
}

fn check_capacity<G: PixelGrid + ?Sized>(grid: &G, payload_len: usize) -> StegResult<()> {
    let required_bits = required_bits(payload_len);
    let available_bits = grid.pixel_count();

    if required_bits > available_bits {
        return Err(StegError::CapacityExceeded {
            required_bits,
            available_bits,
        });
    }
    Ok(())
}

/// Caller has already checked capacity.
fn write_bitstream<G: PixelGrid + ?Sized>(grid: &mut G, payload: &[u8]) {
    let mut pixel_index = 0;

    for &byte in payload.iter().chain(TERMINATOR.iter()) {
        for bit_index in 0..8 {
            // MSB first
            let bit = (byte >> (7 - bit_index)) & 1;
            let value = grid.channel0(pixel_index);
            grid.set_channel0(pixel_index, (value & 0xFE) | bit);
            pixel_index += 1;
        }
    }

    trace!("Wrote {} bits into {} pixels", pixel_index, grid.pixel_count());
}
