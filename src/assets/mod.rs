//! Backgrounds, fonts and themes.

/// Theme to background file resolution.
pub mod backgrounds;
/// Built-in bitmap font.
pub mod builtin_font;
/// Image decoding into premultiplied RGBA8.
pub mod decode;
/// Font sources and the fallback chain.
pub mod fonts;
/// Generated background set.
pub mod provision;
/// Card themes.
pub mod theme;
