use std::path::Path;

use anyhow::Context;

use crate::foundation::{
    core::Canvas,
    error::{QuoteCardError, QuoteCardResult},
};

/// Decoded raster in premultiplied RGBA8, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PremulImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes.
    pub rgba8_premul: Vec<u8>,
}

impl PremulImage {
    /// Wrap raw premultiplied bytes, checking the length against the dimensions.
    pub fn from_raw(width: u32, height: u32, rgba8_premul: Vec<u8>) -> QuoteCardResult<Self> {
        if rgba8_premul.len() != width as usize * height as usize * 4 {
            return Err(QuoteCardError::validation(
                "premultiplied image byte length mismatch",
            ));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul,
        })
    }
}

/// Read an image file and stretch it to exactly `canvas` (aspect ratio is not preserved).
pub fn load_background(path: &Path, canvas: Canvas) -> QuoteCardResult<PremulImage> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read background '{}'", path.display()))
        .map_err(|e| QuoteCardError::asset(format!("{e:#}")))?;
    decode_resized(&bytes, canvas)
}

/// Decode encoded image bytes, resize to `canvas` and convert to premultiplied RGBA8.
pub fn decode_resized(bytes: &[u8], canvas: Canvas) -> QuoteCardResult<PremulImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| QuoteCardError::asset(format!("decode image from memory: {e}")))?;
    let resized = dyn_img.resize_exact(
        canvas.width,
        canvas.height,
        image::imageops::FilterType::Triangle,
    );
    let mut rgba8_premul = resized.to_rgba8().into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    PremulImage::from_raw(canvas.width, canvas.height, rgba8_premul)
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 255 {
            continue;
        }
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
