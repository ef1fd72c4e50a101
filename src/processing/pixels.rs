//! # Pixel Grid Abstraction
//!
//! The codec only needs three things from an image: how many pixels it has,
//! and read/write access to the first channel of each pixel (red for color
//! images, luma for grayscale). [`PixelGrid`] captures exactly that, so the
//! codec never depends on a particular container or file format.
//!
//! Pixels are addressed in row-major order, matching the order the `image`
//! crate stores them in.

use image::{DynamicImage, GenericImageView, ImageBuffer, Pixel};

/// Channel-0 view over an ordered sequence of 8-bit pixels.
pub trait PixelGrid {
    /// Number of pixels, i.e. the maximum number of bits the grid can carry.
    fn pixel_count(&self) -> usize;

    /// Channel-0 value of pixel `index`.
    ///
    /// # Panics
    /// If `index >= pixel_count()`.
    fn channel0(&self, index: usize) -> u8;

    /// Overwrite channel 0 of pixel `index`, leaving every other channel untouched.
    ///
    /// # Panics
    /// If `index >= pixel_count()`.
    fn set_channel0(&mut self, index: usize, value: u8);
}

impl<P> PixelGrid for ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    fn channel0(&self, index: usize) -> u8 {
        let raw: &[u8] = self;
        raw[index * P::CHANNEL_COUNT as usize]
    }

    fn set_channel0(&mut self, index: usize, value: u8) {
        let raw: &mut [u8] = self;
        raw[index * P::CHANNEL_COUNT as usize] = value;
    }
}

/// A decoded cover image with 8-bit channels.
///
/// Wraps a [`DynamicImage`] so the original color type survives an embed:
/// grayscale stays grayscale, RGB stays RGB. Images with 16-bit or float
/// channels are converted to RGBA8 on construction.
#[derive(Debug, Clone)]
pub struct CoverImage {
    image: DynamicImage,
}

impl CoverImage {
    pub fn new(image: DynamicImage) -> Self {
        let image = match image {
            DynamicImage::ImageLuma8(_)
            | DynamicImage::ImageLumaA8(_)
            | DynamicImage::ImageRgb8(_)
            | DynamicImage::ImageRgba8(_) => image,
            other => DynamicImage::ImageRgba8(other.to_rgba8()),
        };
        Self { image }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    fn stride(&self) -> usize {
        self.image.color().channel_count() as usize
    }

    fn raw_mut(&mut self) -> &mut [u8] {
        match &mut self.image {
            DynamicImage::ImageLuma8(buf) => &mut **buf,
            DynamicImage::ImageLumaA8(buf) => &mut **buf,
            DynamicImage::ImageRgb8(buf) => &mut **buf,
            DynamicImage::ImageRgba8(buf) => &mut **buf,
            _ => unreachable!("CoverImage::new normalizes to 8-bit"),
        }
    }
}

impl From<DynamicImage> for CoverImage {
    fn from(image: DynamicImage) -> Self {
        Self::new(image)
    }
}

impl PixelGrid for CoverImage {
    fn pixel_count(&self) -> usize {
        let (width, height) = self.image.dimensions();
        width as usize * height as usize
    }

    fn channel0(&self, index: usize) -> u8 {
        self.image.as_bytes()[index * self.stride()]
    }

    fn set_channel0(&mut self, index: usize, value: u8) {
        let offset = index * self.stride();
        self.raw_mut()[offset] = value;
    }
}
