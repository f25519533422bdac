use crate::foundation::{
    core::Rgba8,
    error::{QuoteCardError, QuoteCardResult},
    math::mul_div255_u8,
};

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Source-over compositing of premultiplied pixels with an extra opacity factor.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Composite a uniform color over every pixel of `dst`.
pub fn fill_over_in_place(dst: &mut [u8], color: Rgba8, opacity: f32) -> QuoteCardResult<()> {
    if !dst.len().is_multiple_of(4) {
        return Err(QuoteCardError::render(
            "fill_over_in_place expects an rgba8 buffer",
        ));
    }
    let src = color.premultiplied();
    for d in dst.chunks_exact_mut(4) {
        let out = over([d[0], d[1], d[2], d[3]], src, opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Darken `dst` with a black overlay of the given opacity (0.4 darkens by 40%).
pub fn darken_in_place(dst: &mut [u8], opacity: f32) -> QuoteCardResult<()> {
    fill_over_in_place(dst, Rgba8::BLACK, opacity)
}

/// Composite a premultiplied layer over `dst` pixel by pixel. Both buffers must match in length.
pub fn layer_over_in_place(dst: &mut [u8], layer: &[u8]) -> QuoteCardResult<()> {
    if dst.len() != layer.len() || !dst.len().is_multiple_of(4) {
        return Err(QuoteCardError::render(
            "layer_over_in_place expects equally sized rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(layer.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], 1.0);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Drop alpha from premultiplied RGBA8, compositing over opaque black.
pub fn flatten_to_rgb(rgba8_premul: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(rgba8_premul.len() / 4 * 3);
    for px in rgba8_premul.chunks_exact(4) {
        out.extend_from_slice(&px[..3]);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
