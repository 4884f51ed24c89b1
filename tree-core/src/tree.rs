//! The randomized ("fancy") tree renderer.
//!
//! A draw walks a conceptual branch tree depth-first:
//! 1. [`Grower::branch`] strokes one branch as a chain of short, slightly
//!    rotated segments, possibly sprouting side branches along the way.
//! 2. [`Grower::grow`] splits the branch tip into a left and a right child
//!    one generation deeper.
//! 3. Near the tips, [`Grower::leaf`] drops a translucent circle.
//!
//! Every stochastic quantity is drawn from a single [`SeededRandom`] in a
//! fixed order and then blended with its deterministic value by
//! [`TreeParameters::randomness`], so the same parameters always produce
//! the same primitives.

use std::f64::consts::FRAC_PI_2;

use crate::{
    config::TreeParameters,
    error::ParameterError,
    geometry::{circle_point, linear, round_half_up},
    random::SeededRandom,
    surface::{Color, LineCap, Stroke, Surface},
    types::Point,
};

/// Length of every full branch segment.
pub const SEGMENT_LENGTH: f64 = 10.0;

/// Leaves are drawn at the tips of branches with at most this much depth left.
pub const LEAF_DEPTH: u32 = 2;

const LEAF_HUE: f64 = 165.0;
const LEAF_SATURATION: f64 = 70.0;
const LEAF_LIGHTNESS: f64 = 65.0;
const LEAF_ALPHA: f64 = 0.5;
const LEAF_RADIUS: f64 = 5.0;

/// Segments [`draw_tree`] strokes before it stops growing.
///
/// Side branches multiply per generation, so a dense deep tree can ask for
/// far more work than any frame can afford.
pub const DEFAULT_SEGMENT_BUDGET: usize = 1_000_000;

/// What one draw emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Branches drawn, including side branches.
    pub branches: usize,
    /// Line segments stroked.
    pub segments: usize,
    /// Side branches sprouted mid-branch.
    pub side_branches: usize,
    pub leaves: usize,
    /// The segment budget ran out and growth stopped early.
    pub truncated: bool,
}

/// Draws a randomized tree onto `surface`.
///
/// The surface is cleared to white, then the trunk grows straight up from
/// the middle of its bottom edge.
///
/// ### Parameters
/// - `surface` - Drawing target; only written to.
/// - `params` - Tree shape; validated before anything is drawn.
///
/// ### Returns
/// Counts of what was drawn. A surface with empty bounds is left untouched
/// and yields zeroed stats.
///
/// ### Errors
/// [`ParameterError`] if `params` fails [`TreeParameters::validate`]; the
/// surface is not touched in that case.
pub fn draw_tree<S: Surface + ?Sized>(
    surface: &mut S,
    params: &TreeParameters,
) -> Result<DrawStats, ParameterError> {
    draw_tree_with_budget(surface, params, DEFAULT_SEGMENT_BUDGET)
}

/// [`draw_tree`] with an explicit cap on stroked segments.
///
/// Once `budget` segments are down, no further branch, segment or leaf is
/// drawn and the returned stats have `truncated` set. Everything drawn up to
/// that point is identical to the untruncated tree.
pub fn draw_tree_with_budget<S: Surface + ?Sized>(
    surface: &mut S,
    params: &TreeParameters,
    budget: usize,
) -> Result<DrawStats, ParameterError> {
    params.validate()?;

    let bounds = surface.bounds();
    if bounds.is_empty() {
        return Ok(DrawStats::default());
    }

    surface.fill_rect(Point::ZERO, bounds.size(), Color::WHITE);

    let mut grower = Grower {
        surface,
        params,
        rng: SeededRandom::new(params.seed),
        stats: DrawStats::default(),
        budget,
    };
    grower.grow(params.depth, FRAC_PI_2, bounds.bottom_center());

    let stats = grower.stats;
    tracing::debug!(
        seed = params.seed,
        depth = params.depth,
        branches = stats.branches,
        segments = stats.segments,
        side_branches = stats.side_branches,
        leaves = stats.leaves,
        truncated = stats.truncated,
        "drew tree"
    );
    if stats.truncated {
        tracing::warn!(budget, "tree exceeded its segment budget and was cut short");
    }
    Ok(stats)
}

/// State of one draw: the target, the parameters, and the draw's own PRNG.
struct Grower<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    params: &'a TreeParameters,
    rng: SeededRandom,
    stats: DrawStats,
    budget: usize,
}

impl<S: Surface + ?Sized> Grower<'_, S> {
    #[inline]
    fn blend(&self, deterministic: f64, randomized: f64) -> f64 {
        linear(deterministic, randomized, self.params.randomness)
    }

    /// Whether the segment budget is spent; latches `stats.truncated`.
    fn out_of_budget(&mut self) -> bool {
        if self.stats.segments >= self.budget {
            self.stats.truncated = true;
        }
        self.stats.truncated
    }

    /// `-1.0` or `1.0` with equal probability.
    #[inline]
    fn coin_sign(&mut self) -> f64 {
        if self.rng.uniform(0.0, 1.0) < 0.5 { -1.0 } else { 1.0 }
    }

    /// Grows the branch starting at `point` and everything above it.
    ///
    /// Recursion depth is bounded by `depth`: every call below this one,
    /// including side branches, has strictly less depth left.
    fn grow(&mut self, depth: u32, angle: f64, point: Point) {
        if depth == 0 || self.out_of_budget() {
            return;
        }

        let tip = self.branch(depth, angle, point);

        let spread = self.params.spread;
        let randomized = spread * self.rng.uniform(0.5, 1.5);
        let deviation = self.blend(spread, randomized);
        self.grow(depth - 1, angle - deviation, tip);
        self.grow(depth - 1, angle + deviation, tip);

        if depth <= LEAF_DEPTH && !self.stats.truncated {
            self.leaf(tip);
        }
    }

    /// Strokes one curved branch and returns its tip.
    ///
    /// The branch is split into [`SEGMENT_LENGTH`] pieces plus a leftover
    /// piece. After each full piece the heading drifts by a fixed increment
    /// (larger for thinner branches) and a side branch may sprout.
    fn branch(&mut self, depth: u32, angle: f64, start: Point) -> Point {
        let params = self.params;
        let depth_percent = f64::from(depth) / f64::from(params.depth);

        let typical_length = params.length * depth_percent;
        let variation = params.length_variation;
        let random_length = typical_length * self.rng.uniform(1.0 - variation, 1.0 + variation);
        let length = self.blend(typical_length, random_length);

        let segments = round_half_up(length / SEGMENT_LENGTH);
        let leftover = length - segments * SEGMENT_LENGTH;

        let default_direction = if angle > FRAC_PI_2 { 1.0 } else { -1.0 };
        let random_direction = self.coin_sign();
        let direction = self.blend(default_direction, random_direction);
        let increment = params.curviness * direction * (1.0 - depth_percent);

        let stroke = Stroke {
            width: params.width * depth_percent,
            color: Color::BARK,
            cap: LineCap::Round,
        };

        self.stats.branches += 1;
        let mut current = start;
        let mut curve_angle = angle;
        // Negative segment counts (possible with length variation > 1) draw
        // no full segments.
        let full_segments = if segments > 0.0 { segments as u64 } else { 0 };
        for _ in 0..full_segments {
            if self.out_of_budget() {
                return current;
            }
            let top = circle_point(current, SEGMENT_LENGTH, curve_angle);
            self.stroke(current, top, &stroke);

            let roll = self.rng.uniform(0.0, 1.0);
            let branch_random = linear(0.0, roll, params.randomness);
            if branch_random > 1.0 - params.density {
                let side = self.coin_sign();
                self.stats.side_branches += 1;
                self.grow(depth - 1, curve_angle + side * params.spread, top);
            }

            current = top;
            curve_angle += increment;
        }

        if leftover > 0.0 && !self.out_of_budget() {
            let top = circle_point(current, leftover, curve_angle);
            self.stroke(current, top, &stroke);
            current = top;
        }

        current
    }

    fn stroke(&mut self, from: Point, to: Point, stroke: &Stroke) {
        self.surface.stroke_line(from, to, stroke);
        self.stats.segments += 1;
    }

    /// Color and radius jitter are drawn in a fixed order: hue, saturation,
    /// lightness, alpha, radius.
    fn leaf(&mut self, at: Point) {
        let h = self.rng.uniform(LEAF_HUE - 5.0, LEAF_HUE + 5.0);
        let s = self.rng.uniform(LEAF_SATURATION - 5.0, LEAF_SATURATION + 5.0);
        let l = self.rng.uniform(LEAF_LIGHTNESS - 5.0, LEAF_LIGHTNESS + 5.0);
        let a = self.rng.uniform(LEAF_ALPHA - 0.25, LEAF_ALPHA + 0.5);
        let color = Color::Hsla {
            h: self.blend(LEAF_HUE, h),
            s: self.blend(LEAF_SATURATION, s),
            l: self.blend(LEAF_LIGHTNESS, l),
            a: self.blend(LEAF_ALPHA, a),
        };

        let random_radius = self.rng.normal(2.0, 7.0);
        let radius = self.blend(LEAF_RADIUS, random_radius);

        self.surface.fill_circle(at, radius, color);
        self.stats.leaves += 1;
    }
}
