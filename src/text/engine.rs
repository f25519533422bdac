use std::collections::HashMap;

use parley::fontique::{Collection, CollectionOptions, SourceCache};

use crate::{
    assets::{
        builtin_font::BuiltinFont,
        fonts::{FontBook, FontFace, FontRole, OutlineFont, SizedFont},
    },
    foundation::error::{QuoteCardError, QuoteCardResult},
    text::{
        measure::{TextExtent, TextMeasure},
        wrap::wrap_words,
    },
};

/// Font collection handed to the shaper.
///
/// System font discovery is off: only registered faces can be selected, so shaping never
/// substitutes a host font. Built once and cloned into each [`TextLayoutEngine`].
#[derive(Clone)]
pub struct ShaperFonts {
    collection: Collection,
    families: HashMap<u64, Option<String>>,
}

impl std::fmt::Debug for ShaperFonts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaperFonts")
            .field("registered", &self.families.len())
            .finish_non_exhaustive()
    }
}

impl Default for ShaperFonts {
    fn default() -> Self {
        Self {
            collection: Collection::new(CollectionOptions {
                shared: false,
                system_fonts: false,
            }),
            families: HashMap::new(),
        }
    }
}

impl ShaperFonts {
    /// Collection with every outline face of `book` registered.
    pub fn for_book(book: &FontBook) -> Self {
        let mut fonts = Self::default();
        for role in FontRole::ALL {
            if let FontFace::Outline(outline) = book.face(role) {
                fonts.register(outline);
            }
        }
        fonts
    }

    /// Family name the shaper knows `font` by, registering it on first use. `None` when the
    /// shaper rejects the font.
    pub fn register(&mut self, font: &OutlineFont) -> Option<String> {
        register_family(&mut self.collection, &mut self.families, font)
    }
}

fn register_family(
    collection: &mut Collection,
    families: &mut HashMap<u64, Option<String>>,
    font: &OutlineFont,
) -> Option<String> {
    if let Some(cached) = families.get(&font.id()) {
        return cached.clone();
    }

    let registered =
        collection.register_fonts(parley::fontique::Blob::from(font.bytes().to_vec()), None);
    // A collection file registers several families; prefer the one the face was loaded as.
    let names: Vec<String> = registered
        .iter()
        .filter_map(|(id, _)| collection.family_name(*id).map(str::to_string))
        .collect();
    let family = names
        .iter()
        .find(|name| name.as_str() == font.family())
        .or_else(|| names.first())
        .cloned();
    if family.is_none() {
        tracing::warn!(font = font.origin(), "shaper could not register font");
    }
    families.insert(font.id(), family.clone());
    family
}

/// Shaping and measurement state for one render.
///
/// Holds Parley contexts, which are mutable scratch space, so each render owns its own engine
/// and nothing mutable is shared between concurrent renders.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    families: HashMap<u64, Option<String>>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Engine with an empty font collection; outline fonts are registered on first use.
    pub fn new() -> Self {
        Self::with_fonts(&ShaperFonts::default())
    }

    /// Engine over a copy of a prepared collection.
    pub fn with_fonts(fonts: &ShaperFonts) -> Self {
        Self {
            font_ctx: parley::FontContext {
                collection: fonts.collection.clone(),
                source_cache: SourceCache::default(),
            },
            layout_ctx: parley::LayoutContext::new(),
            families: fonts.families.clone(),
        }
    }

    /// Measure `text` as a single line in `font`.
    pub fn measure(&mut self, font: &SizedFont, text: &str) -> TextExtent {
        if text.is_empty() {
            return TextExtent::ZERO;
        }
        match &font.face {
            FontFace::Outline(outline) => match self.layout_line(outline, font.size_px, text) {
                Ok(Some(layout)) => TextExtent {
                    width: layout.width(),
                    height: layout.height(),
                },
                Ok(None) => builtin_extent(font.size_px, text),
                Err(err) => {
                    tracing::warn!(error = %err, "outline measurement failed, using builtin metrics");
                    builtin_extent(font.size_px, text)
                }
            },
            FontFace::Builtin => builtin_extent(font.size_px, text),
        }
    }

    /// Wrap `text` into lines no wider than `max_width_px` when drawn in `font`.
    pub fn wrap(&mut self, text: &str, font: &SizedFont, max_width_px: f32) -> Vec<String> {
        let mut measure = self.measure_with(font);
        wrap_words(text, &mut measure, max_width_px)
    }

    /// Borrow the engine as a [`TextMeasure`] bound to one font.
    pub fn measure_with<'a>(&'a mut self, font: &'a SizedFont) -> FontMeasure<'a> {
        FontMeasure { engine: self, font }
    }

    /// Shape `text` as a single line. `Ok(None)` means the font could not be registered with the
    /// shaper and callers should treat it as the built-in font.
    pub(crate) fn layout_line(
        &mut self,
        font: &OutlineFont,
        size_px: f32,
        text: &str,
    ) -> QuoteCardResult<Option<parley::Layout<()>>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(QuoteCardError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        let Some(family) = self.family_for(font) else {
            return Ok(None);
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout.align(
            None,
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );
        Ok(Some(layout))
    }

    fn family_for(&mut self, font: &OutlineFont) -> Option<String> {
        register_family(&mut self.font_ctx.collection, &mut self.families, font)
    }

    /// Whether `font` will be drawn with outlines (as opposed to the bitmap fallback).
    pub(crate) fn draws_outline(&mut self, font: &SizedFont) -> Option<std::sync::Arc<OutlineFont>> {
        match &font.face {
            FontFace::Outline(outline) => self.family_for(outline).map(|_| outline.clone()),
            FontFace::Builtin => None,
        }
    }
}

fn builtin_extent(size_px: f32, text: &str) -> TextExtent {
    let (width, height) = BuiltinFont::for_size(size_px).measure(text);
    TextExtent {
        width: width as f32,
        height: height as f32,
    }
}

/// [`TextMeasure`] adapter over a [`TextLayoutEngine`] and a fixed font.
pub struct FontMeasure<'a> {
    engine: &'a mut TextLayoutEngine,
    font: &'a SizedFont,
}

impl TextMeasure for FontMeasure<'_> {
    fn extent(&mut self, text: &str) -> TextExtent {
        self.engine.measure(self.font, text)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/engine.rs"]
mod tests;
