//! Card geometry.
//!
//! Everything here is computed from text measurements alone, before any pixel is touched, so the
//! same request always produces the same [`CardLayout`].

use crate::{
    foundation::core::Canvas,
    render::style::CardStyle,
    text::{
        measure::{TextExtent, TextMeasure},
        wrap::wrap_words,
    },
};

/// Which text block a measurement is for. Each block has its own font and size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextRole {
    /// Quote body.
    Quote,
    /// Author attribution.
    Author,
    /// Brand watermark.
    Watermark,
}

/// Measures single-line text per [`TextRole`].
pub trait CardMeasure {
    /// Extent of `text` drawn in the font for `role`.
    fn extent(&mut self, role: TextRole, text: &str) -> TextExtent;
}

/// One line of text placed on the canvas. `x`/`y` are the top-left of the line box.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PlacedLine {
    /// Text drawn on this line.
    pub text: String,
    /// Left edge; negative when a single word is wider than the canvas.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Measured width, rounded up to whole pixels.
    pub width: u32,
    /// Measured height, rounded up to whole pixels.
    pub height: u32,
}

/// Resolved positions of every text layer on a card.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CardLayout {
    /// Canvas the positions refer to.
    pub canvas: Canvas,
    /// Wrapped quote lines, top to bottom.
    pub quote_lines: Vec<PlacedLine>,
    /// Author line.
    pub author: PlacedLine,
    /// Watermark line, when requested.
    pub watermark: Option<PlacedLine>,
}

impl CardLayout {
    /// Sum of quote line heights (gaps excluded).
    pub fn quote_block_height(&self) -> u32 {
        self.quote_lines.iter().map(|l| l.height).sum()
    }
}

/// Text content of a card.
#[derive(Clone, Copy, Debug)]
pub struct CardText<'a> {
    /// Quote body; may be empty.
    pub quote: &'a str,
    /// Author name, without prefix.
    pub author: &'a str,
    /// Whether to place the watermark.
    pub watermark: bool,
}

/// Compute the card layout.
///
/// The quote is wrapped to the style's wrap width. The first quote line starts at
/// `(H - total - author_reserve) / 2` where `total` is the summed line height; lines advance by
/// their own height plus the line gap. The author line sits `author_gap` below the final cursor
/// and the watermark `watermark_bottom` above the bottom edge. Every line is centered
/// horizontally. Divisions floor.
pub fn layout_card<M>(style: &CardStyle, text: CardText<'_>, measure: &mut M) -> CardLayout
where
    M: CardMeasure + ?Sized,
{
    let canvas = style.canvas;
    let width = canvas.width as i32;
    let height = canvas.height as i32;

    let lines = {
        let mut quote_measure = RoleMeasure {
            inner: &mut *measure,
            role: TextRole::Quote,
        };
        wrap_words(text.quote, &mut quote_measure, style.wrap_width_px())
    };

    let measured: Vec<(String, u32, u32)> = lines
        .into_iter()
        .map(|line| {
            let (w, h) = pixel_extent(measure.extent(TextRole::Quote, &line));
            (line, w, h)
        })
        .collect();
    let total: i64 = measured.iter().map(|(_, _, h)| i64::from(*h)).sum();

    let mut cursor = floor_half(i64::from(height) - total - i64::from(style.author_reserve_px));
    let mut quote_lines = Vec::with_capacity(measured.len());
    for (line, w, h) in measured {
        quote_lines.push(PlacedLine {
            x: center_x(width, w),
            y: cursor,
            width: w,
            height: h,
            text: line,
        });
        cursor += h as i32 + style.line_gap_px as i32;
    }

    let author_text = format!("{}{}", style.author_prefix, text.author);
    let author = place(
        measure,
        TextRole::Author,
        author_text,
        width,
        cursor + style.author_gap_px as i32,
    );

    let watermark = text.watermark.then(|| {
        place(
            measure,
            TextRole::Watermark,
            style.watermark_text.clone(),
            width,
            height - style.watermark_bottom_px as i32,
        )
    });

    CardLayout {
        canvas,
        quote_lines,
        author,
        watermark,
    }
}

fn place<M>(measure: &mut M, role: TextRole, text: String, canvas_w: i32, y: i32) -> PlacedLine
where
    M: CardMeasure + ?Sized,
{
    let (w, h) = pixel_extent(measure.extent(role, &text));
    PlacedLine {
        x: center_x(canvas_w, w),
        y,
        width: w,
        height: h,
        text,
    }
}

fn pixel_extent(extent: TextExtent) -> (u32, u32) {
    let px = |v: f32| {
        if v.is_finite() && v > 0.0 {
            v.ceil() as u32
        } else {
            0
        }
    };
    (px(extent.width), px(extent.height))
}

fn center_x(canvas_w: i32, line_w: u32) -> i32 {
    floor_half(i64::from(canvas_w) - i64::from(line_w))
}

fn floor_half(v: i64) -> i32 {
    v.div_euclid(2).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

struct RoleMeasure<'a, M: ?Sized> {
    inner: &'a mut M,
    role: TextRole,
}

impl<M: CardMeasure + ?Sized> TextMeasure for RoleMeasure<'_, M> {
    fn extent(&mut self, text: &str) -> TextExtent {
        self.inner.extent(self.role, text)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
