use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    effects::gradient::{
        GradientKind::{self, Linear, Radial},
        gradient_rgba8,
    },
    foundation::{
        core::{Canvas, Rgba8},
        error::{QuoteCardError, QuoteCardResult},
    },
};

/// One generated background file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BackgroundSpec {
    /// File name inside the backgrounds directory.
    pub file: &'static str,
    /// Start color (top, or center for radial).
    pub from: Rgba8,
    /// End color (bottom, or corners for radial).
    pub to: Rgba8,
    /// Gradient shape.
    pub kind: GradientKind,
}

const fn spec(file: &'static str, from: [u8; 3], to: [u8; 3], kind: GradientKind) -> BackgroundSpec {
    BackgroundSpec {
        file,
        from: Rgba8::new(from[0], from[1], from[2], 255),
        to: Rgba8::new(to[0], to[1], to[2], 255),
        kind,
    }
}

/// Every file named by a theme's candidate list.
pub const BACKGROUND_SET: [BackgroundSpec; 14] = [
    spec("mountain.jpg", [66, 103, 178], [24, 59, 107], Linear),
    spec("sunrise.jpg", [255, 153, 102], [204, 51, 51], Radial),
    spec("ocean.jpg", [0, 153, 204], [0, 51, 102], Linear),
    spec("stone.jpg", [102, 102, 102], [51, 51, 51], Linear),
    spec("ancient.jpg", [153, 132, 107], [77, 66, 54], Linear),
    spec("minimal.jpg", [230, 230, 230], [180, 180, 180], Radial),
    spec("achievement.jpg", [255, 215, 0], [204, 85, 0], Radial),
    spec("summit.jpg", [102, 153, 204], [51, 51, 153], Linear),
    spec("victory.jpg", [153, 204, 50], [51, 153, 102], Linear),
    spec("path.jpg", [102, 51, 153], [51, 0, 102], Linear),
    spec("horizon.jpg", [51, 153, 255], [0, 102, 204], Linear),
    spec("beach.jpg", [255, 204, 102], [255, 153, 51], Linear),
    spec("sunset.jpg", [255, 102, 102], [153, 51, 51], Radial),
    spec("flowers.jpg", [255, 153, 204], [204, 51, 153], Linear),
];

/// Write `spec` into `dir`. The encoding follows the file extension.
pub fn write_background(dir: &Path, spec: &BackgroundSpec, canvas: Canvas) -> QuoteCardResult<PathBuf> {
    canvas.validate()?;
    let rgba = gradient_rgba8(canvas, spec.from, spec.to, spec.kind);
    let rgb: Vec<u8> = rgba
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let path = dir.join(spec.file);
    image::save_buffer(&path, &rgb, canvas.width, canvas.height, image::ColorType::Rgb8)
        .with_context(|| format!("write background '{}'", path.display()))
        .map_err(|e| QuoteCardError::encode(format!("{e:#}")))?;
    Ok(path)
}

/// Write the whole [`BACKGROUND_SET`] into `dir`, creating it if needed. Existing files are
/// overwritten.
pub fn write_background_set(dir: &Path, canvas: Canvas) -> QuoteCardResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create backgrounds dir '{}'", dir.display()))
        .map_err(|e| QuoteCardError::encode(format!("{e:#}")))?;

    let mut written = Vec::with_capacity(BACKGROUND_SET.len());
    for spec in &BACKGROUND_SET {
        let path = write_background(dir, spec, canvas)?;
        tracing::debug!(path = %path.display(), kind = ?spec.kind, "background written");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/provision.rs"]
mod tests;
