use crate::foundation::core::{Canvas, Rgba8};

/// Shape of a two-stop gradient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    /// Top-to-bottom ramp; constant along each row.
    Linear,
    /// Center-outward ramp.
    Radial,
}

/// Top color of the fallback background.
pub const FALLBACK_TOP: Rgba8 = Rgba8::new(30, 30, 70, 255);
/// Bottom color of the fallback background.
pub const FALLBACK_BOTTOM: Rgba8 = Rgba8::new(70, 50, 100, 255);

/// Opaque RGBA8 buffer for a two-stop gradient from `from` to `to`.
///
/// Linear gradients depend only on the row. Output is opaque, so it is valid both as straight
/// and premultiplied RGBA8.
pub fn gradient_rgba8(canvas: Canvas, from: Rgba8, to: Rgba8, kind: GradientKind) -> Vec<u8> {
    match kind {
        GradientKind::Linear => linear(canvas, from, to),
        GradientKind::Radial => radial(canvas, from, to),
    }
}

/// Dark blue-black to warmer purple ramp used when no background image is available.
pub fn fallback_background(canvas: Canvas) -> Vec<u8> {
    linear(canvas, FALLBACK_TOP, FALLBACK_BOTTOM)
}

fn linear(canvas: Canvas, from: Rgba8, to: Rgba8) -> Vec<u8> {
    let mut out = Vec::with_capacity(canvas.pixel_count() * 4);
    let h = canvas.height as i64;
    for y in 0..h {
        let px = [
            lerp_channel(from.r, to.r, y, h),
            lerp_channel(from.g, to.g, y, h),
            lerp_channel(from.b, to.b, y, h),
            255,
        ];
        for _ in 0..canvas.width {
            out.extend_from_slice(&px);
        }
    }
    out
}

fn radial(canvas: Canvas, from: Rgba8, to: Rgba8) -> Vec<u8> {
    let mut out = Vec::with_capacity(canvas.pixel_count() * 4);
    let cx = f64::from(canvas.width / 2);
    let cy = f64::from(canvas.height / 2);
    let max_dist = (cx * cx + cy * cy).sqrt().max(1.0);
    for y in 0..canvas.height {
        for x in 0..canvas.width {
            let dx = f64::from(x) - cx;
            let dy = f64::from(y) - cy;
            let t = ((dx * dx + dy * dy).sqrt() / max_dist).min(1.0);
            out.extend_from_slice(&[
                mix(from.r, to.r, t),
                mix(from.g, to.g, t),
                mix(from.b, to.b, t),
                255,
            ]);
        }
    }
    out
}

fn lerp_channel(from: u8, to: u8, y: i64, h: i64) -> u8 {
    let delta = i64::from(to) - i64::from(from);
    (i64::from(from) + delta * y / h).clamp(0, 255) as u8
}

fn mix(from: u8, to: u8, t: f64) -> u8 {
    let v = f64::from(from) + (f64::from(to) - f64::from(from)) * t;
    v.trunc().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/gradient.rs"]
mod tests;
