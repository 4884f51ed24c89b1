//! Adapts an [`egui::Painter`] to the core [`Surface`] contract.

use tree_core::{
    geometry::Bounds,
    surface::{Color, LineCap, Stroke, Surface},
    types::Point,
};

/// Converts a core color into an egui color (unmultiplied alpha).
pub fn to_color32(color: Color) -> egui::Color32 {
    let [r, g, b, a] = color.to_rgba8();
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Maps a surface-local point into screen space.
pub fn to_pos(origin: egui::Pos2, p: Point) -> egui::Pos2 {
    egui::pos2(origin.x + p.x as f32, origin.y + p.y as f32)
}

/// Endpoints of a stroke after applying its cap.
///
/// Square caps extend the segment by half the width on both ends; butt and
/// round caps keep the endpoints (round caps are drawn as end discs).
pub fn capped_endpoints(from: Point, to: Point, stroke: &Stroke) -> (Point, Point) {
    match stroke.cap {
        LineCap::Square => {
            let dir = (to - from).normalize_or_zero() * (stroke.width / 2.0);
            (from - dir, to + dir)
        }
        LineCap::Butt | LineCap::Round => (from, to),
    }
}

/// A [`Surface`] that paints straight into an egui layer.
///
/// ### Fields
/// - `painter` - Painter clipped to the drawing area.
/// - `origin` - Screen position of the surface's top-left corner.
/// - `bounds` - Logical size of the drawing area.
pub struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    origin: egui::Pos2,
    bounds: Bounds,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a egui::Painter, origin: egui::Pos2, bounds: Bounds) -> Self {
        Self {
            painter,
            origin,
            bounds,
        }
    }
}

impl Surface for PainterSurface<'_> {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn fill_rect(&mut self, origin: Point, size: Point, color: Color) {
        let rect = egui::Rect::from_min_max(
            to_pos(self.origin, origin),
            to_pos(self.origin, origin + size),
        );
        self.painter
            .rect_filled(rect, egui::CornerRadius::ZERO, to_color32(color));
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        let color = to_color32(stroke.color);
        let (a, b) = capped_endpoints(from, to, stroke);
        let (a, b) = (to_pos(self.origin, a), to_pos(self.origin, b));
        self.painter
            .line_segment([a, b], egui::Stroke::new(stroke.width as f32, color));

        if stroke.cap == LineCap::Round {
            let r = stroke.width as f32 / 2.0;
            self.painter.circle_filled(a, r, color);
            self.painter.circle_filled(b, r, color);
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.painter.circle_filled(
            to_pos(self.origin, center),
            radius as f32,
            to_color32(color),
        );
    }
}
