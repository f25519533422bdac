use crate::{
    assets::{
        builtin_font::BuiltinFont,
        fonts::{OutlineFont, SizedFont},
    },
    foundation::{
        core::{Canvas, Rgba8},
        error::{QuoteCardError, QuoteCardResult},
    },
    render::layout::PlacedLine,
    text::engine::TextLayoutEngine,
};

/// Rasterizes text lines into a transparent premultiplied RGBA8 layer.
///
/// Draw calls are recorded in order and resolved by [`TextPainter::finish`], so later calls land
/// on top of earlier ones (shadows first, then the face).
pub(crate) struct TextPainter {
    canvas: Canvas,
    ctx: vello_cpu::RenderContext,
}

impl TextPainter {
    pub(crate) fn new(canvas: Canvas) -> QuoteCardResult<Self> {
        let (w, h) = surface_size(canvas)?;
        Ok(Self {
            canvas,
            ctx: vello_cpu::RenderContext::new(w, h),
        })
    }

    /// Draw `line` once per shadow offset in `shadow`, then in `color`.
    pub(crate) fn draw_with_shadow(
        &mut self,
        engine: &mut TextLayoutEngine,
        font: &SizedFont,
        line: &PlacedLine,
        color: Rgba8,
        shadow: Rgba8,
        offsets: &[(i32, i32)],
    ) -> QuoteCardResult<()> {
        for (dx, dy) in offsets {
            self.draw(engine, font, line, (*dx, *dy), shadow)?;
        }
        self.draw(engine, font, line, (0, 0), color)
    }

    /// Draw `line` shifted by `offset` in a single color.
    pub(crate) fn draw(
        &mut self,
        engine: &mut TextLayoutEngine,
        font: &SizedFont,
        line: &PlacedLine,
        offset: (i32, i32),
        color: Rgba8,
    ) -> QuoteCardResult<()> {
        if line.text.is_empty() || color.a == 0 {
            return Ok(());
        }
        let x = f64::from(line.x + offset.0);
        let y = f64::from(line.y + offset.1);
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(color.r, color.g, color.b, color.a));

        match engine.draws_outline(font) {
            Some(outline) => self.draw_outline(engine, &outline, font.size_px, &line.text, x, y),
            None => {
                self.draw_builtin(font.size_px, &line.text, x, y);
                Ok(())
            }
        }
    }

    fn draw_outline(
        &mut self,
        engine: &mut TextLayoutEngine,
        font: &OutlineFont,
        size_px: f32,
        text: &str,
        x: f64,
        y: f64,
    ) -> QuoteCardResult<()> {
        let Some(layout) = engine.layout_line(font, size_px, text)? else {
            self.draw_builtin(size_px, text, x, y);
            return Ok(());
        };
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((x, y)));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                // Each run carries the face the shaper picked for it.
                self.ctx
                    .glyph_run(run.run().font())
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }

    fn draw_builtin(&mut self, size_px: f32, text: &str, x: f64, y: f64) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        for cell in BuiltinFont::for_size(size_px).cells(text) {
            let x0 = x + f64::from(cell.x);
            let y0 = y + f64::from(cell.y);
            self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                x0,
                y0,
                x0 + f64::from(cell.w),
                y0 + f64::from(cell.h),
            ));
        }
    }

    /// Resolve all recorded draws into premultiplied RGBA8 bytes.
    pub(crate) fn finish(mut self) -> QuoteCardResult<Vec<u8>> {
        let (w, h) = surface_size(self.canvas)?;
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        Ok(pixmap.data_as_u8_slice().to_vec())
    }
}

fn surface_size(canvas: Canvas) -> QuoteCardResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| QuoteCardError::render("surface width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| QuoteCardError::render("surface height exceeds u16"))?;
    Ok((w, h))
}

#[cfg(test)]
#[path = "../../tests/unit/render/painter.rs"]
mod tests;
