use std::path::PathBuf;

use crate::foundation::{
    core::{Canvas, Rgba8},
    error::{QuoteCardError, QuoteCardResult},
};

/// Brand string drawn by default when a watermark is requested.
pub const DEFAULT_WATERMARK: &str = "AutoQuoter.com";

/// Visual parameters of a card.
///
/// Every field has a default, so a partial JSON/TOML document deserializes into a complete
/// style.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CardStyle {
    /// Output dimensions.
    pub canvas: Canvas,
    /// Quote font size in pixels.
    pub quote_size_px: f32,
    /// Author font size in pixels.
    pub author_size_px: f32,
    /// Watermark font size in pixels.
    pub watermark_size_px: f32,
    /// Horizontal space withheld from the quote wrap width (split across both sides).
    pub wrap_margin_px: u32,
    /// Vertical space reserved below the quote block for the author line.
    pub author_reserve_px: u32,
    /// Gap between consecutive quote lines.
    pub line_gap_px: u32,
    /// Distance from the end of the quote block to the author line.
    pub author_gap_px: u32,
    /// Distance from the bottom edge to the top of the watermark.
    pub watermark_bottom_px: u32,
    /// Gaussian blur sigma applied to the background.
    pub blur_sigma: f32,
    /// Opacity of the black overlay drawn over the blurred background.
    pub darken_opacity: f32,
    /// Quote and author color.
    pub text_color: Rgba8,
    /// Shadow color.
    pub shadow_color: Rgba8,
    /// Shadow offsets, drawn in order before the text.
    pub shadow_offsets: Vec<(i32, i32)>,
    /// Watermark color.
    pub watermark_color: Rgba8,
    /// Watermark text.
    pub watermark_text: String,
    /// Prefix placed before the author name.
    pub author_prefix: String,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            canvas: Canvas::CARD,
            quote_size_px: 60.0,
            author_size_px: 40.0,
            watermark_size_px: 24.0,
            wrap_margin_px: 200,
            author_reserve_px: 120,
            line_gap_px: 10,
            author_gap_px: 40,
            watermark_bottom_px: 60,
            blur_sigma: 2.0,
            darken_opacity: 0.4,
            text_color: Rgba8::WHITE,
            shadow_color: Rgba8::BLACK.with_alpha(180),
            shadow_offsets: vec![(1, 1), (-1, -1), (1, -1), (-1, 1)],
            watermark_color: Rgba8::WHITE.with_alpha(180),
            watermark_text: DEFAULT_WATERMARK.to_string(),
            author_prefix: "\u{2014} ".to_string(),
        }
    }
}

impl CardStyle {
    /// Reject styles that cannot produce a card.
    pub fn validate(&self) -> QuoteCardResult<()> {
        self.canvas.validate()?;
        for (name, size) in [
            ("quote_size_px", self.quote_size_px),
            ("author_size_px", self.author_size_px),
            ("watermark_size_px", self.watermark_size_px),
        ] {
            if !size.is_finite() || size <= 0.0 {
                return Err(QuoteCardError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if self.wrap_margin_px >= self.canvas.width {
            return Err(QuoteCardError::validation(
                "wrap_margin_px must be smaller than the canvas width",
            ));
        }
        if !self.blur_sigma.is_finite() || self.blur_sigma < 0.0 {
            return Err(QuoteCardError::validation("blur_sigma must be finite and >= 0"));
        }
        if !(0.0..=1.0).contains(&self.darken_opacity) {
            return Err(QuoteCardError::validation("darken_opacity must be in [0, 1]"));
        }
        Ok(())
    }

    /// Maximum rendered width of a quote line.
    pub fn wrap_width_px(&self) -> f32 {
        self.canvas.width.saturating_sub(self.wrap_margin_px) as f32
    }
}

/// Directories the compositor reads assets from. Missing directories are valid.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AssetDirs {
    /// Background images.
    pub backgrounds: PathBuf,
    /// Font files named per role.
    pub fonts: PathBuf,
}

impl Default for AssetDirs {
    fn default() -> Self {
        Self::under("assets")
    }
}

impl AssetDirs {
    /// `<root>/backgrounds` and `<root>/fonts`.
    pub fn under(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            backgrounds: root.join("backgrounds"),
            fonts: root.join("fonts"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/style.rs"]
mod tests;
