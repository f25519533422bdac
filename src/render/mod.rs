//! Card rendering: geometry, rasterization and PNG output.

/// Background acquisition, legibility filter and text layering.
pub mod compositor;
/// PNG encoding and output files.
pub mod encode;
/// Pure text geometry.
pub mod layout;
pub(crate) mod painter;
/// Render inputs.
pub mod request;
/// Card style and asset locations.
pub mod style;
