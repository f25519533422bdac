//! Text measurement and line wrapping.

/// Parley-backed shaping with built-in font fallback.
pub mod engine;
/// Measurement trait.
pub mod measure;
/// Greedy word wrap.
pub mod wrap;
