//! The drawing-surface contract the renderers write into.
//!
//! A [`Surface`] is a write-only sink: renderers never read pixels back.
//! Hosts implement it over whatever they draw with; [`Recorder`] is the
//! in-memory implementation used for testing and replay.

use std::fmt;

use crate::{geometry::Bounds, types::Point};

/// A fill or stroke color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    /// 8-bit channels with fractional alpha in `[0, 1]`.
    Rgba { r: u8, g: u8, b: u8, a: f64 },
    /// Hue in degrees, saturation and lightness in percent, fractional alpha.
    Hsla { h: f64, s: f64, l: f64, a: f64 },
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLUE: Color = Color::rgb(0x00, 0x00, 0xff);
    pub const BARK: Color = Color::rgb(0x3c, 0x3c, 0x3c);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgba { r, g, b, a: 1.0 }
    }

    /// Converts to 8-bit RGBA (unmultiplied alpha).
    pub fn to_rgba8(self) -> [u8; 4] {
        match self {
            Color::Rgba { r, g, b, a } => [r, g, b, unit_to_u8(a)],
            Color::Hsla { h, s, l, a } => {
                let [r, g, b] = hsl_to_rgb(h, s / 100.0, l / 100.0);
                [unit_to_u8(r), unit_to_u8(g), unit_to_u8(b), unit_to_u8(a)]
            }
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Color::Rgba { r, g, b, a } => write!(f, "rgba({r}, {g}, {b}, {a})"),
            Color::Hsla { h, s, l, a } => write!(f, "hsla({h}, {s}%, {l}%, {a})"),
        }
    }
}

fn unit_to_u8(x: f64) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Standard HSL → RGB with `s`, `l` in `[0, 1]`; hue wraps.
fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [f64; 3] {
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);
    let h = h.rem_euclid(360.0) / 360.0;
    if s == 0.0 {
        return [l, l, l];
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let channel = |mut t: f64| {
        t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };
    [channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0)]
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// How a line segment is stroked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub width: f64,
    pub color: Color,
    pub cap: LineCap,
}

/// A write-only 2D drawing target.
pub trait Surface {
    /// Logical (resolution-independent) bounds.
    fn bounds(&self) -> Bounds;

    /// Fills the axis-aligned rectangle at `origin` with extent `size`.
    fn fill_rect(&mut self, origin: Point, size: Point, color: Color);

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke);

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color);
}

/// One recorded primitive.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    FillRect {
        origin: Point,
        size: Point,
        color: Color,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Circle {
        center: Point,
        radius: f64,
        color: Color,
    },
}

/// A [`Surface`] that keeps every primitive it receives.
#[derive(Clone, Debug, PartialEq)]
pub struct Recorder {
    bounds: Bounds,
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            commands: Vec::new(),
        }
    }

    /// Number of line and circle primitives, ignoring background fills.
    pub fn primitive_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| !matches!(c, DrawCommand::FillRect { .. }))
            .count()
    }

    pub fn lines(&self) -> impl Iterator<Item = (&Point, &Point, &Stroke)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { from, to, stroke } => Some((from, to, stroke)),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = (&Point, f64, &Color)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => Some((center, *radius, color)),
            _ => None,
        })
    }

    /// Re-issues every recorded command onto `target` in order.
    pub fn replay(&self, target: &mut impl Surface) {
        for cmd in &self.commands {
            match cmd {
                DrawCommand::FillRect {
                    origin,
                    size,
                    color,
                } => target.fill_rect(*origin, *size, *color),
                DrawCommand::Line { from, to, stroke } => target.stroke_line(*from, *to, stroke),
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                } => target.fill_circle(*center, *radius, *color),
            }
        }
    }
}

impl Surface for Recorder {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn fill_rect(&mut self, origin: Point, size: Point, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            origin,
            size,
            color,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            stroke: *stroke,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsla_display_matches_css_shape() {
        let c = Color::Hsla {
            h: 165.0,
            s: 70.0,
            l: 65.0,
            a: 0.5,
        };
        assert_eq!(c.to_string(), "hsla(165, 70%, 65%, 0.5)");
    }

    #[test]
    fn rgba_display() {
        assert_eq!(Color::BARK.to_string(), "rgba(60, 60, 60, 1)");
    }

    #[test]
    fn hsla_primaries_convert_to_rgb() {
        let red = Color::Hsla {
            h: 0.0,
            s: 100.0,
            l: 50.0,
            a: 1.0,
        };
        assert_eq!(red.to_rgba8(), [255, 0, 0, 255]);

        let green = Color::Hsla {
            h: 120.0,
            s: 100.0,
            l: 50.0,
            a: 0.5,
        };
        assert_eq!(green.to_rgba8(), [0, 255, 0, 128]);

        let blue = Color::Hsla {
            h: 600.0, // wraps to 240
            s: 100.0,
            l: 50.0,
            a: 1.0,
        };
        assert_eq!(blue.to_rgba8(), [0, 0, 255, 255]);
    }

    #[test]
    fn grey_has_equal_channels() {
        let grey = Color::Hsla {
            h: 200.0,
            s: 0.0,
            l: 50.0,
            a: 1.0,
        };
        let [r, g, b, _] = grey.to_rgba8();
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn leaf_default_color_is_teal() {
        let leaf = Color::Hsla {
            h: 165.0,
            s: 70.0,
            l: 65.0,
            a: 0.5,
        };
        let [r, g, b, a] = leaf.to_rgba8();
        assert!(g > b && b > r, "expected teal, got {r},{g},{b}");
        assert_eq!(a, 128);
    }

    #[test]
    fn replay_reproduces_commands() {
        let mut src = Recorder::new(Bounds::new(10.0, 10.0));
        src.fill_rect(Point::ZERO, Point::new(10.0, 10.0), Color::WHITE);
        src.stroke_line(
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
            &Stroke {
                width: 1.0,
                color: Color::BARK,
                cap: LineCap::Round,
            },
        );
        src.fill_circle(Point::new(3.0, 3.0), 2.0, Color::BLUE);

        let mut dst = Recorder::new(Bounds::new(10.0, 10.0));
        src.replay(&mut dst);
        assert_eq!(src, dst);
        assert_eq!(dst.primitive_count(), 2);
        assert_eq!(dst.lines().count(), 1);
        assert_eq!(dst.circles().count(), 1);
    }
}
