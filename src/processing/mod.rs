//! # Image Processing and Steganography
//!
//! - [`pixels`]: the channel-0 pixel view the codec works against
//! - [`steganography`]: LSB embedding and extraction
//! - [`image_io`]: loading and saving cover images

pub mod image_io;
pub mod pixels;
pub mod steganography;

// Re-export main functions for convenience
pub use image_io::{load_cover, save_cover};
pub use pixels::{CoverImage, PixelGrid};
pub use steganography::{capacity_bytes, embed, embed_in_place, extract, TERMINATOR};
