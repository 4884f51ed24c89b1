//! Coordinate and interpolation helpers shared by the renderers.

use crate::types::Point;

/// Resolution-independent extent of a drawing surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Converts a physical pixel size into logical bounds.
    ///
    /// The pixel ratio is passed in by the host; a non-positive or
    /// non-finite ratio is treated as `1.0`.
    pub fn from_physical(pixel_width: f64, pixel_height: f64, pixel_ratio: f64) -> Self {
        let ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        Self::new(pixel_width / ratio, pixel_height / ratio)
    }

    /// `true` if nothing drawn on these bounds could be visible.
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }

    /// Where every tree is rooted: the middle of the bottom edge.
    pub fn bottom_center(&self) -> Point {
        Point::new(self.width / 2.0, self.height)
    }

    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }
}

/// Moves from `center` by `r` in direction `angle` (radians).
///
/// Angle `0` points right and `π/2` points straight up the surface, which
/// means `y` decreases as the angle approaches `π/2`.
#[inline]
pub fn circle_point(center: Point, r: f64, angle: f64) -> Point {
    Point::new(center.x + r * angle.cos(), center.y - r * angle.sin())
}

/// Linear interpolation `a·(1−t) + b·t`.
///
/// With `t` as the randomness knob this blends a deterministic value `a`
/// with its randomized variant `b`.
#[inline]
pub fn linear(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Rounds half-way cases towards positive infinity (`-2.5 → -2`).
#[inline]
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn close(a: Point, b: Point) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn circle_point_half_pi_points_up() {
        let p = circle_point(Point::new(100.0, 200.0), 10.0, FRAC_PI_2);
        assert!(close(p, Point::new(100.0, 190.0)), "got {p:?}");
    }

    #[test]
    fn circle_point_zero_and_pi_point_sideways() {
        let origin = Point::new(0.0, 0.0);
        assert!(close(circle_point(origin, 5.0, 0.0), Point::new(5.0, 0.0)));
        assert!(close(circle_point(origin, 5.0, PI), Point::new(-5.0, 0.0)));
    }

    #[test]
    fn linear_hits_endpoints() {
        assert_eq!(linear(3.0, 9.0, 0.0), 3.0);
        assert_eq!(linear(3.0, 9.0, 1.0), 9.0);
        assert_eq!(linear(3.0, 9.0, 0.5), 6.0);
    }

    #[test]
    fn round_half_up_matches_expected_ties() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
        assert_eq!(round_half_up(7.4), 7.0);
    }

    #[test]
    fn from_physical_divides_by_ratio() {
        let b = Bounds::from_physical(400.0, 300.0, 2.0);
        assert_eq!(b, Bounds::new(200.0, 150.0));
        assert_eq!(b.bottom_center(), Point::new(100.0, 150.0));
    }

    #[test]
    fn from_physical_ignores_bogus_ratio() {
        assert_eq!(Bounds::from_physical(10.0, 20.0, 0.0), Bounds::new(10.0, 20.0));
        assert_eq!(
            Bounds::from_physical(10.0, 20.0, f64::NAN),
            Bounds::new(10.0, 20.0)
        );
    }

    #[test]
    fn empty_bounds() {
        assert!(Bounds::new(0.0, 100.0).is_empty());
        assert!(Bounds::new(100.0, -1.0).is_empty());
        assert!(Bounds::new(f64::INFINITY, 1.0).is_empty());
        assert!(!Bounds::new(1.0, 1.0).is_empty());
    }
}
