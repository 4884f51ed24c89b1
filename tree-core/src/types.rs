use glam::DVec2;

/// A position on a drawing surface, in logical units.
///
/// The surface's origin is its top-left corner and `y` grows downwards, so
/// the bottom edge of a surface of height `h` is at `y = h`.
pub type Point = DVec2;
