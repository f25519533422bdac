//! Pixel operations on premultiplied RGBA8 buffers.

/// Separable Gaussian blur.
pub mod blur;
/// Source-over compositing and overlays.
pub mod composite;
/// Two-stop gradients.
pub mod gradient;
