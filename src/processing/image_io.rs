//! # Cover Image I/O
//!
//! Loading and saving cover images with the `image` crate. Any format the
//! crate can decode is accepted as input, but output is restricted to
//! lossless formats: a lossy encoder rewrites pixel values and destroys the
//! hidden bits.

use std::path::Path;

use image::{GenericImageView, ImageFormat};
use log::debug;

use super::pixels::CoverImage;
use crate::error::{StegError, StegResult};

/// Load a cover image from disk.
///
/// # Errors
/// - The file cannot be read
/// - The file is not an image format the `image` crate understands
pub fn load_cover<P: AsRef<Path>>(path: P) -> StegResult<CoverImage> {
    let path = path.as_ref();
    let image = image::open(path)?;
    let (width, height) = image.dimensions();
    debug!(
        "Loaded {} ({}x{}, {:?})",
        path.display(),
        width,
        height,
        image.color()
    );
    Ok(CoverImage::new(image))
}

/// Save a cover image, picking the encoder from the file extension.
///
/// The format is validated before anything is written, so a rejected path
/// never leaves a partial file behind.
pub fn save_cover<P: AsRef<Path>>(cover: &CoverImage, path: P) -> StegResult<()> {
    let path = path.as_ref();
    let format = lossless_format_for(path)?;
    cover.as_dynamic().save_with_format(path, format)?;
    debug!("Saved {} as {:?}", path.display(), format);
    Ok(())
}

/// Resolve the output format for `path`, rejecting anything lossy.
pub fn lossless_format_for(path: &Path) -> StegResult<ImageFormat> {
    let format = ImageFormat::from_path(path).map_err(|_| {
        StegError::UnsupportedFormat(format!("cannot infer format of {}", path.display()))
    })?;
    ensure_lossless(format)?;
    Ok(format)
}

fn ensure_lossless(format: ImageFormat) -> StegResult<()> {
    match format {
        ImageFormat::Png | ImageFormat::Bmp | ImageFormat::Tiff => Ok(()),
        other => Err(StegError::UnsupportedFormat(format!(
            "{other:?} does not preserve least significant bits, use PNG, BMP or TIFF"
        ))),
    }
}
