//! CPU rendering of two-disk frames.

/// Frame composition with exact overlap handling.
pub mod compositor;
/// Immutable frame type and the scratch raster.
pub mod frame;
