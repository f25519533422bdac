//! quotecard renders square "quote card" images: a themed background photo, blurred and
//! darkened for legibility, with a centered quote, an author line and an optional watermark.
//!
//! The entry point is [`Compositor`]:
//!
//! - Build it once from [`AssetDirs`] and a [`CardStyle`]
//! - Render a [`RenderRequest`] into a [`RenderedImage`], or straight to a PNG file
//!
//! Missing backgrounds and fonts never fail a render. Backgrounds fall back to a built-in
//! gradient and fonts fall back to system fonts and then to a built-in bitmap font.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Backgrounds, fonts and themes.
pub mod assets;
/// Pixel effects.
pub mod effects;
/// Card rendering.
pub mod render;
/// Text measurement and wrapping.
pub mod text;

pub use crate::assets::backgrounds::{
    BackgroundResolver, Chooser, FixedChooser, SeededChooser, ThreadRngChooser, choose,
};
pub use crate::assets::fonts::{FontBook, FontResolver, FontRole};
pub use crate::assets::theme::Theme;
pub use crate::foundation::core::{CARD_SIZE_PX, Canvas, Rgba8};
pub use crate::foundation::error::{QuoteCardError, QuoteCardResult};
pub use crate::render::compositor::{BackgroundOrigin, Compositor, RenderedImage};
pub use crate::render::layout::{CardLayout, PlacedLine};
pub use crate::render::request::{QuoteRecord, RenderRequest, UNKNOWN_AUTHOR};
pub use crate::render::style::{AssetDirs, CardStyle};
