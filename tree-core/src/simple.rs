//! The plain binary fractal: straight, equally long branches that only get
//! thinner with depth. Uses no randomness.

use std::f64::consts::FRAC_PI_2;

use crate::{
    config::TreeParameters,
    error::ParameterError,
    geometry::circle_point,
    surface::{Color, LineCap, Stroke, Surface},
    tree::DrawStats,
    types::Point,
};

/// Draws a white binary tree on a blue background.
///
/// Reads only `depth`, `length`, `width` and `spread` from `params`.
///
/// ### Errors
/// [`ParameterError`] if `params` fails validation; nothing is drawn.
pub fn draw_simple_tree<S: Surface + ?Sized>(
    surface: &mut S,
    params: &TreeParameters,
) -> Result<DrawStats, ParameterError> {
    params.validate()?;

    let bounds = surface.bounds();
    if bounds.is_empty() {
        return Ok(DrawStats::default());
    }

    surface.fill_rect(Point::ZERO, bounds.size(), Color::BLUE);

    let mut stats = DrawStats::default();
    branch(surface, params, params.depth, FRAC_PI_2, bounds.bottom_center(), &mut stats);
    tracing::debug!(
        depth = params.depth,
        branches = stats.branches,
        "drew simple tree"
    );
    Ok(stats)
}

fn branch<S: Surface + ?Sized>(
    surface: &mut S,
    params: &TreeParameters,
    depth: u32,
    angle: f64,
    from: Point,
    stats: &mut DrawStats,
) {
    if depth == 0 {
        return;
    }

    let depth_percent = f64::from(depth) / f64::from(params.depth);
    let top = circle_point(from, params.length, angle);
    surface.stroke_line(
        from,
        top,
        &Stroke {
            width: params.width * depth_percent,
            color: Color::WHITE,
            cap: LineCap::Round,
        },
    );
    stats.branches += 1;
    stats.segments += 1;

    branch(surface, params, depth - 1, angle - params.spread, top, stats);
    branch(surface, params, depth - 1, angle + params.spread, top, stats);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        geometry::Bounds,
        surface::{DrawCommand, Recorder},
    };

    fn params(depth: u32) -> TreeParameters {
        TreeParameters {
            depth,
            length: 20.0,
            width: 4.0,
            spread: 0.3,
            ..TreeParameters::ellies()
        }
    }

    #[test]
    fn full_binary_tree_of_lines() {
        let mut rec = Recorder::new(Bounds::new(200.0, 200.0));
        let stats = draw_simple_tree(&mut rec, &params(5)).unwrap();
        assert_eq!(stats.branches, 31);
        assert_eq!(stats.leaves, 0);
        assert_eq!(rec.lines().count(), 31);
        assert_eq!(rec.circles().count(), 0);
        assert!(matches!(
            rec.commands[0],
            DrawCommand::FillRect { color, .. } if color == Color::BLUE
        ));
    }

    #[test]
    fn trunk_points_up_and_children_split_by_spread() {
        let p = params(2);
        let mut rec = Recorder::new(Bounds::new(100.0, 100.0));
        draw_simple_tree(&mut rec, &p).unwrap();

        let lines: Vec<_> = rec.lines().collect();
        assert_eq!(lines.len(), 3);
        let (from, to, stroke) = lines[0];
        assert_eq!(*from, Point::new(50.0, 100.0));
        assert!((*to - Point::new(50.0, 80.0)).length() < 1e-9);
        assert_eq!(stroke.width, 4.0);
        assert_eq!(stroke.color, Color::WHITE);

        let left = circle_point(*to, 20.0, FRAC_PI_2 - 0.3);
        let right = circle_point(*to, 20.0, FRAC_PI_2 + 0.3);
        assert_eq!(*lines[1].1, left);
        assert_eq!(*lines[2].1, right);
        assert_eq!(lines[1].2.width, 2.0);
    }

    #[test]
    fn ignores_randomness_and_seed() {
        let mut a = Recorder::new(Bounds::new(100.0, 100.0));
        let mut b = Recorder::new(Bounds::new(100.0, 100.0));
        let mut p = params(4);
        draw_simple_tree(&mut a, &p).unwrap();
        p.seed = 99;
        p.randomness = 1.0;
        p.curviness = 2.0;
        draw_simple_tree(&mut b, &p).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn depth_zero_draws_only_the_background() {
        let mut rec = Recorder::new(Bounds::new(100.0, 100.0));
        draw_simple_tree(&mut rec, &params(0)).unwrap();
        assert_eq!(rec.commands.len(), 1);
        assert_eq!(rec.primitive_count(), 0);
    }
}
