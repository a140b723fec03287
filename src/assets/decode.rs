use anyhow::Context;
use image::{RgbaImage, imageops::FilterType};

use crate::foundation::{core::Size, error::SheetResult};

/// Decode encoded image bytes into straight-alpha RGBA8.
pub fn decode_image(bytes: &[u8]) -> SheetResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Resample `img` to exactly `size`; returns the input untouched when it already matches.
pub fn fit_exact(img: RgbaImage, size: Size) -> RgbaImage {
    if img.dimensions() == (size.width, size.height) {
        return img;
    }
    image::imageops::resize(&img, size.width, size.height, FilterType::CatmullRom)
}

/// Fully transparent image of `size`.
pub fn transparent(size: Size) -> RgbaImage {
    RgbaImage::new(size.width, size.height)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
