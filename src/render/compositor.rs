use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    assets::{
        backgrounds::BackgroundResolver,
        decode::load_background,
        fonts::{FontBook, FontResolver, FontRole, SizedFont},
        theme::Theme,
    },
    effects::{
        blur::{blur_rgba8_premul, radius_for_sigma},
        composite::{darken_in_place, flatten_to_rgb, layer_over_in_place},
        gradient::fallback_background,
    },
    foundation::error::{QuoteCardError, QuoteCardResult},
    render::{
        encode::{encode_png, write_png},
        layout::{CardLayout, CardMeasure, CardText, TextRole, layout_card},
        painter::TextPainter,
        request::RenderRequest,
        style::{AssetDirs, CardStyle},
    },
    text::{
        engine::{ShaperFonts, TextLayoutEngine},
        measure::TextExtent,
    },
};

/// Where the background pixels of a card came from.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "path")]
pub enum BackgroundOrigin {
    /// Decoded from this file.
    Image(PathBuf),
    /// Built-in gradient, used when no image was available or decoding failed.
    Gradient,
}

/// A finished card: opaque RGB8, row-major.
#[derive(Clone, Debug)]
pub struct RenderedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes, three per pixel.
    pub rgb: Vec<u8>,
    /// Geometry the text was drawn with.
    pub layout: CardLayout,
    /// Background source.
    pub background: BackgroundOrigin,
}

impl RenderedImage {
    /// Encode as PNG bytes.
    pub fn to_png_bytes(&self) -> QuoteCardResult<Vec<u8>> {
        encode_png(&self.rgb, self.width, self.height)
    }

    /// Write as PNG, creating parent directories.
    pub fn save_png(&self, path: &Path) -> QuoteCardResult<()> {
        write_png(path, &self.rgb, self.width, self.height)
    }
}

/// Renders quote cards.
///
/// Holds only read-only state (style, resolved fonts, background directory), so one instance can
/// serve concurrent renders. Each render builds its own shaping context from a font collection
/// prepared once here.
#[derive(Clone, Debug)]
pub struct Compositor {
    style: CardStyle,
    backgrounds: BackgroundResolver,
    fonts: Arc<FontBook>,
    shaper: Arc<ShaperFonts>,
}

impl Compositor {
    /// Resolve fonts from `dirs.fonts` (then system fonts, then the built-in font) and pick
    /// backgrounds from `dirs.backgrounds`.
    pub fn new(dirs: &AssetDirs, style: CardStyle) -> QuoteCardResult<Self> {
        let fonts = FontResolver::standard(&dirs.fonts).resolve_book();
        Self::with_parts(style, BackgroundResolver::new(&dirs.backgrounds), fonts)
    }

    /// Assemble from already-built parts.
    pub fn with_parts(
        style: CardStyle,
        backgrounds: BackgroundResolver,
        fonts: FontBook,
    ) -> QuoteCardResult<Self> {
        style.validate()?;
        tracing::debug!(
            primary = %fonts.face(FontRole::Primary).describe(),
            secondary = %fonts.face(FontRole::Secondary).describe(),
            backgrounds = %backgrounds.dir().display(),
            "compositor ready"
        );
        let shaper = ShaperFonts::for_book(&fonts);
        Ok(Self {
            style,
            backgrounds,
            fonts: Arc::new(fonts),
            shaper: Arc::new(shaper),
        })
    }

    /// Card style.
    pub fn style(&self) -> &CardStyle {
        &self.style
    }

    /// Resolved fonts.
    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    /// Background resolver.
    pub fn backgrounds(&self) -> &BackgroundResolver {
        &self.backgrounds
    }

    /// Text geometry for `req`, without rendering pixels.
    pub fn layout(&self, req: &RenderRequest) -> CardLayout {
        let mut engine = TextLayoutEngine::with_fonts(&self.shaper);
        self.layout_with(&mut engine, req)
    }

    /// Render `req` into an RGB8 image.
    #[tracing::instrument(skip_all, fields(theme = %req.theme, watermark = req.add_watermark))]
    pub fn render(&self, req: &RenderRequest) -> QuoteCardResult<RenderedImage> {
        let canvas = self.style.canvas;
        let (background, origin) = self.background(&req.theme);

        let radius = radius_for_sigma(self.style.blur_sigma);
        let mut pixels = blur_rgba8_premul(
            &background,
            canvas.width,
            canvas.height,
            radius,
            self.style.blur_sigma,
        )?;
        darken_in_place(&mut pixels, self.style.darken_opacity)?;

        let mut engine = TextLayoutEngine::with_fonts(&self.shaper);
        let layout = self.layout_with(&mut engine, req);
        let layer = self.paint_text(&mut engine, &layout)?;
        layer_over_in_place(&mut pixels, &layer)?;

        tracing::debug!(
            lines = layout.quote_lines.len(),
            background = ?origin,
            "card rendered"
        );
        Ok(RenderedImage {
            width: canvas.width,
            height: canvas.height,
            rgb: flatten_to_rgb(&pixels),
            layout,
            background: origin,
        })
    }

    /// Render `req` and write it as PNG to `req.output`. Returns the written path.
    #[tracing::instrument(skip_all, fields(theme = %req.theme))]
    pub fn render_to_path(&self, req: &RenderRequest) -> QuoteCardResult<PathBuf> {
        let path = req
            .output
            .clone()
            .ok_or_else(|| QuoteCardError::validation("render request has no output path"))?;
        let image = self.render(req)?;
        image.save_png(&path)?;
        tracing::info!(path = %path.display(), "card written");
        Ok(path)
    }

    fn background(&self, theme: &Theme) -> (Vec<u8>, BackgroundOrigin) {
        let canvas = self.style.canvas;
        match self.backgrounds.resolve(theme) {
            Some(path) => match load_background(&path, canvas) {
                Ok(img) => return (img.rgba8_premul, BackgroundOrigin::Image(path)),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "background unusable, using gradient");
                }
            },
            None => tracing::debug!(%theme, "no background available, using gradient"),
        }
        (fallback_background(canvas), BackgroundOrigin::Gradient)
    }

    fn sized(&self, role: TextRole) -> SizedFont {
        match role {
            TextRole::Quote => self.fonts.sized(FontRole::Primary, self.style.quote_size_px),
            TextRole::Author => self
                .fonts
                .sized(FontRole::Secondary, self.style.author_size_px),
            TextRole::Watermark => self
                .fonts
                .sized(FontRole::Primary, self.style.watermark_size_px),
        }
    }

    fn layout_with(&self, engine: &mut TextLayoutEngine, req: &RenderRequest) -> CardLayout {
        let mut measure = EngineMeasure {
            engine,
            quote: self.sized(TextRole::Quote),
            author: self.sized(TextRole::Author),
            watermark: self.sized(TextRole::Watermark),
        };
        let text = CardText {
            quote: &req.quote_text,
            author: &req.author,
            watermark: req.add_watermark,
        };
        layout_card(&self.style, text, &mut measure)
    }

    fn paint_text(
        &self,
        engine: &mut TextLayoutEngine,
        layout: &CardLayout,
    ) -> QuoteCardResult<Vec<u8>> {
        let style = &self.style;
        let mut painter = TextPainter::new(layout.canvas)?;

        let quote_font = self.sized(TextRole::Quote);
        for line in &layout.quote_lines {
            painter.draw_with_shadow(
                engine,
                &quote_font,
                line,
                style.text_color,
                style.shadow_color,
                &style.shadow_offsets,
            )?;
        }

        painter.draw_with_shadow(
            engine,
            &self.sized(TextRole::Author),
            &layout.author,
            style.text_color,
            style.shadow_color,
            &style.shadow_offsets,
        )?;

        if let Some(watermark) = &layout.watermark {
            painter.draw(
                engine,
                &self.sized(TextRole::Watermark),
                watermark,
                (0, 0),
                style.watermark_color,
            )?;
        }

        painter.finish()
    }
}

struct EngineMeasure<'a> {
    engine: &'a mut TextLayoutEngine,
    quote: SizedFont,
    author: SizedFont,
    watermark: SizedFont,
}

impl CardMeasure for EngineMeasure<'_> {
    fn extent(&mut self, role: TextRole, text: &str) -> TextExtent {
        let font = match role {
            TextRole::Quote => &self.quote,
            TextRole::Author => &self.author,
            TextRole::Watermark => &self.watermark,
        };
        self.engine.measure(font, text)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
