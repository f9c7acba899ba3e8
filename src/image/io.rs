//! Decoding helpers built on the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Colour inputs are
//! reduced to 8-bit luma, matching the grayscale conversion signatures are
//! indexed with.

use crate::image::{GridView, PixelGrid};
use crate::util::{SigMatchError, SigMatchResult};
use std::path::Path;

/// Borrows a grayscale image buffer as a grid view.
pub fn view_from_gray_image(img: &image::GrayImage) -> SigMatchResult<GridView<'_>> {
    GridView::from_slice(img.as_raw(), img.width() as usize, img.height() as usize)
}

/// Copies a grayscale image buffer into an owned grid.
pub fn grid_from_gray_image(img: &image::GrayImage) -> SigMatchResult<PixelGrid> {
    PixelGrid::new(
        img.as_raw().clone(),
        img.width() as usize,
        img.height() as usize,
    )
}

/// Converts any decoded image to luma and copies it into a grid.
pub fn grid_from_dynamic_image(img: &image::DynamicImage) -> SigMatchResult<PixelGrid> {
    let gray = img.to_luma8();
    let (width, height) = (gray.width() as usize, gray.height() as usize);
    PixelGrid::new(gray.into_raw(), width, height)
}

/// Decodes an image file into a grayscale grid.
pub fn load_gray_grid<P: AsRef<Path>>(path: P) -> SigMatchResult<PixelGrid> {
    let img = image::open(path).map_err(|err| SigMatchError::ImageIo {
        reason: err.to_string(),
    })?;
    grid_from_dynamic_image(&img)
}

/// Decodes an in-memory encoded image (PNG, JPEG, BMP) into a grayscale grid.
pub fn decode_gray_grid(bytes: &[u8]) -> SigMatchResult<PixelGrid> {
    let img = image::load_from_memory(bytes).map_err(|err| SigMatchError::ImageIo {
        reason: err.to_string(),
    })?;
    grid_from_dynamic_image(&img)
}
