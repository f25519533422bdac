use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{QuoteCardError, QuoteCardResult};

/// Encode tightly packed RGB8 pixels as PNG bytes.
pub fn encode_png(rgb: &[u8], width: u32, height: u32) -> QuoteCardResult<Vec<u8>> {
    check_len(rgb, width, height)?;
    let mut out = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut out);
    image::ImageEncoder::write_image(
        encoder,
        rgb,
        width,
        height,
        image::ExtendedColorType::Rgb8,
    )
    .map_err(|e| QuoteCardError::encode(format!("encode png: {e}")))?;
    Ok(out)
}

/// Write RGB8 pixels to `path` as PNG, creating missing parent directories.
///
/// An existing file at `path` is overwritten.
pub fn write_png(path: &Path, rgb: &[u8], width: u32, height: u32) -> QuoteCardResult<()> {
    check_len(rgb, width, height)?;
    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        rgb,
        width,
        height,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
    .map_err(|e| QuoteCardError::encode(format!("{e:#}")))
}

/// Create the parent directory of `path` if it has one and it is missing.
pub fn ensure_parent_dir(path: &Path) -> QuoteCardResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))
            .map_err(|e| QuoteCardError::encode(format!("{e:#}")))?;
    }
    Ok(())
}

fn check_len(rgb: &[u8], width: u32, height: u32) -> QuoteCardResult<()> {
    if rgb.len() != width as usize * height as usize * 3 {
        return Err(QuoteCardError::encode("rgb8 buffer length mismatch"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/encode.rs"]
mod tests;
