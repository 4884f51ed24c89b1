//! Interactive fractal tree viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the tree parameters and the
//! selected style and implements [`eframe::App`] to expose them as sliders
//! next to a live drawing.

use eframe::App;
use rand::Rng;
use tree_core::{
    config::{Parameter, TreeParameters, TreeStyle},
    error::ParameterError,
    geometry::Bounds,
    surface::Recorder,
    tree::DrawStats,
};

use crate::canvas::PainterSurface;

/// The last drawing, kept until its inputs change.
struct CachedFrame {
    style: TreeStyle,
    params: TreeParameters,
    bounds: Bounds,
    recording: Recorder,
}

/// Main application state for the interactive viewer.
///
/// Drawing goes through a [`Recorder`]: a tree is generated once per change
/// of style, parameters or canvas size, and replayed onto the egui painter
/// on every other frame.
///
/// ### Fields
/// - `params` - Parameters edited by the sliders.
/// - `style` - Which renderer to use.
/// - `cache` - Last successful drawing and the inputs that produced it.
/// - `last_stats` - What the last generated drawing contained.
/// - `last_error` - Validation failure of the current parameters, if any.
/// - `rng` - Source for the "random seed" button.
pub struct Viewer {
    params: TreeParameters,
    style: TreeStyle,

    cache: Option<CachedFrame>,
    last_stats: DrawStats,
    last_error: Option<ParameterError>,

    rng: rand::rngs::ThreadRng,
}

impl Viewer {
    /// Creates a viewer showing Dave's tree in the fancy style.
    pub fn new() -> Self {
        Self {
            params: TreeParameters::daves(),
            style: TreeStyle::Fancy,
            cache: None,
            last_stats: DrawStats::default(),
            last_error: None,
            rng: rand::rng(),
        }
    }

    /// Loads a preset, keeping the selected style.
    fn load_preset(&mut self, params: TreeParameters) {
        self.params = params;
        self.last_error = None;
    }

    /// Picks a seed uniformly from the seed slider's range.
    fn randomize_seed(&mut self) {
        let range = Parameter::Seed.range();
        self.params.seed = self.rng.random_range(range.min as u32..=range.max as u32);
    }

    /// Returns the drawing for `bounds`, regenerating it if any input changed.
    ///
    /// ### Returns
    /// - `Some` with the recording to replay.
    /// - `None` if the current parameters are invalid; `last_error` then
    ///   holds the reason.
    fn frame(&mut self, bounds: Bounds) -> Option<&Recorder> {
        let stale = match &self.cache {
            Some(c) => c.style != self.style || c.params != self.params || c.bounds != bounds,
            None => true,
        };

        if stale {
            let mut recording = Recorder::new(bounds);
            match tree_core::draw(&mut recording, self.style, &self.params) {
                Ok(stats) => {
                    self.last_stats = stats;
                    self.last_error = None;
                    self.cache = Some(CachedFrame {
                        style: self.style,
                        params: self.params,
                        bounds,
                        recording,
                    });
                }
                Err(err) => {
                    if self.last_error.as_ref() != Some(&err) {
                        tracing::warn!(%err, "rejected tree parameters");
                    }
                    self.last_error = Some(err);
                    self.cache = None;
                }
            }
        }

        self.cache.as_ref().map(|c| &c.recording)
    }

    /// Builds the top panel (style toggle, presets, seed, clipboard).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for style in TreeStyle::ALL {
                    if ui.selectable_label(self.style == style, style.label()).clicked() {
                        self.style = style;
                    }
                }

                ui.separator();
                if ui.button("Dave's tree").clicked() {
                    self.load_preset(TreeParameters::daves());
                }
                if ui.button("Ellie's tree").clicked() {
                    self.load_preset(TreeParameters::ellies());
                }

                ui.separator();
                if ui.button("🎲 Seed").clicked() {
                    self.randomize_seed();
                }

                if ui.button("Copy JSON").clicked() {
                    match serde_json::to_string_pretty(&self.params) {
                        Ok(json) => ctx.copy_text(json),
                        Err(err) => tracing::warn!(%err, "could not serialize parameters"),
                    }
                }
            });
        });
    }

    /// Builds the bottom status bar (draw counts or the validation error).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(err) = &self.last_error {
                    ui.colored_label(egui::Color32::RED, err.to_string());
                    return;
                }
                if self.last_stats.truncated {
                    ui.colored_label(egui::Color32::YELLOW, "truncated");
                }
                ui.label(format!("leaves = {}", self.last_stats.leaves));
                ui.label(format!("side branches = {}", self.last_stats.side_branches));
                ui.label(format!("segments = {}", self.last_stats.segments));
                ui.label(format!("branches = {}", self.last_stats.branches));
            });
        });
    }

    /// Builds one slider per parameter the current style reads.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading("Tree");
                ui.separator();

                for &param in self.style.parameters() {
                    let range = param.range();
                    let mut value = self.params.get(param);
                    let mut slider = egui::Slider::new(&mut value, range.min..=range.max)
                        .step_by(range.step)
                        .text(range.label);
                    if range.step >= 1.0 {
                        slider = slider.integer();
                    }
                    if ui.add(slider).changed() {
                        self.params.set(param, value);
                    }
                }
            });
    }

    /// Builds the central panel and paints the current tree into it.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let response = ui.allocate_response(ui.available_size(), egui::Sense::hover());
                let rect = response.rect;
                let ppp = f64::from(ctx.pixels_per_point());
                let bounds = Bounds::from_physical(
                    f64::from(rect.width()) * ppp,
                    f64::from(rect.height()) * ppp,
                    ppp,
                );

                let painter = ui.painter_at(rect);
                if let Some(recording) = self.frame(bounds) {
                    let mut surface = PainterSurface::new(&painter, rect.min, bounds);
                    recording.replay(&mut surface);
                }
            });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds::new(400.0, 300.0)
    }

    #[test]
    fn frame_is_cached_until_inputs_change() {
        let mut viewer = Viewer::new();
        viewer.params.depth = 5;

        let first = viewer.frame(bounds()).cloned().unwrap();
        let stats = viewer.last_stats;
        assert!(stats.branches > 0);

        // Same inputs: same recording, stats untouched.
        viewer.last_stats = DrawStats::default();
        assert_eq!(viewer.frame(bounds()), Some(&first));
        assert_eq!(viewer.last_stats, DrawStats::default());

        // New seed: regenerated.
        viewer.params.seed += 1;
        let second = viewer.frame(bounds()).cloned().unwrap();
        assert_ne!(first, second);
        assert!(viewer.last_stats.branches > 0);
    }

    #[test]
    fn resizing_regenerates() {
        let mut viewer = Viewer::new();
        viewer.params.depth = 3;
        let small = viewer.frame(Bounds::new(100.0, 100.0)).cloned().unwrap();
        let large = viewer.frame(Bounds::new(200.0, 200.0)).cloned().unwrap();
        assert_ne!(small, large);
    }

    #[test]
    fn style_switch_regenerates() {
        let mut viewer = Viewer::new();
        viewer.params.depth = 4;
        viewer.frame(bounds());
        assert!(viewer.last_stats.leaves > 0);

        viewer.style = TreeStyle::Simple;
        viewer.frame(bounds());
        assert_eq!(viewer.last_stats.leaves, 0);
        assert_eq!(viewer.last_stats.branches, 15);
    }

    #[test]
    fn invalid_parameters_clear_the_frame() {
        let mut viewer = Viewer::new();
        viewer.params.depth = 3;
        assert!(viewer.frame(bounds()).is_some());

        viewer.params.width = 0.0;
        assert!(viewer.frame(bounds()).is_none());
        assert!(matches!(
            viewer.last_error,
            Some(ParameterError::NotPositive { name: "width", .. })
        ));

        viewer.load_preset(TreeParameters::ellies());
        assert!(viewer.last_error.is_none());
        assert_eq!(viewer.params, TreeParameters::ellies());
    }

    #[test]
    fn random_seed_stays_in_slider_range() {
        let mut viewer = Viewer::new();
        for _ in 0..100 {
            viewer.randomize_seed();
            assert!((1..=30).contains(&viewer.params.seed));
        }
    }
}
