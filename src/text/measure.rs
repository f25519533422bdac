/// Rendered size of a single line of text, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct TextExtent {
    /// Advance width.
    pub width: f32,
    /// Line box height.
    pub height: f32,
}

impl TextExtent {
    /// Extent of nothing.
    pub const ZERO: TextExtent = TextExtent {
        width: 0.0,
        height: 0.0,
    };
}

/// Measures single-line text for one font at one size.
pub trait TextMeasure {
    /// Measure `text` as a single unbroken line.
    fn extent(&mut self, text: &str) -> TextExtent;

    /// Width of `text` as a single unbroken line.
    fn width(&mut self, text: &str) -> f32 {
        self.extent(text).width
    }
}

/// Monospace measure: every char advances `advance` pixels, every line is `line_height` tall.
///
/// Handy for geometry checks that should not depend on a font backend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasure {
    /// Per-char advance in pixels.
    pub advance: f32,
    /// Line box height in pixels.
    pub line_height: f32,
}

impl TextMeasure for MonospaceMeasure {
    fn extent(&mut self, text: &str) -> TextExtent {
        let n = text.chars().count();
        if n == 0 {
            return TextExtent::ZERO;
        }
        TextExtent {
            width: n as f32 * self.advance,
            height: self.line_height,
        }
    }
}
