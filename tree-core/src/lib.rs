//! Deterministic procedural fractal trees.
//!
//! Main components:
//! - [`random`] - seedable sfc32 generator with uniform and normal draws.
//! - [`tree`] - the randomized renderer: curved, subdivided branches, side
//!   shoots and leaves.
//! - [`simple`] - the plain binary fractal renderer.
//! - [`surface`] - the drawing-surface contract, colors and a recording surface.
//! - [`config`] - tree parameters, presets and slider ranges.
//! - [`geometry`] - bounds, coordinate stepping and blending helpers.
//! - [`error`] - parameter and sampling errors.
//! - [`types`] - shared type aliases.

pub mod config;
pub mod error;
pub mod geometry;
pub mod random;
pub mod simple;
pub mod surface;
pub mod tree;
pub mod types;

use config::{TreeParameters, TreeStyle};
use error::ParameterError;
use surface::Surface;
use tree::DrawStats;

/// Draws one frame of `style` onto `surface`.
///
/// Output depends only on `style`, `params` and the surface bounds.
pub fn draw<S: Surface + ?Sized>(
    surface: &mut S,
    style: TreeStyle,
    params: &TreeParameters,
) -> Result<DrawStats, ParameterError> {
    match style {
        TreeStyle::Simple => simple::draw_simple_tree(surface, params),
        TreeStyle::Fancy => tree::draw_tree(surface, params),
    }
}
