//! Interactive rolling-wheel viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the simulation state
//! (wheel, active roll, path traces, configuration) and implements
//! [`eframe::App`] to drive and render it through an egui UI.

use eframe::App;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;
use tracing::{info, warn};
use wheel_core::{
    WheelError,
    config::Config,
    marker::{MarkerMorph, MarkerSpec},
    roll::{Pivot, RollFrame, RollOptions, RollPath, RollSession},
    trace::PathTrace,
    types::{Color, MarkerId},
    wheel::Wheel,
};

const CONFIG_PATH: &str = "wheel.toml";

/// Seconds a marker morph takes on screen.
const MORPH_SECONDS: f64 = 0.6;

const PALETTE: [Color; 4] = [Color::RED, Color::GREEN, Color::YELLOW, Color::PURPLE];

/// Which kind of track the wheel rolls on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RollTool {
    /// Along a horizontal line.
    Straight,
    /// Around the outside of the pivot circle.
    Outside,
    /// Around the inside of the pivot circle.
    Inside,
}

/// Main application state for the interactive viewer.
///
/// [`Viewer`] glues together:
/// - The kinematic core: [`Wheel`], [`RollSession`], [`PathTrace`], [`Config`].
/// - UI configuration (pan/zoom, roll tool, turns, pivot size).
/// - eframe/egui callbacks for drawing and user interaction.
///
/// The typical per-frame update is:
/// 1. Handle UI interactions / input.
/// 2. If a roll is active, advance it to the progress matching the elapsed
///    time and sample every trace.
/// 3. Render the track, traces, wheel and markers.
///
/// ### Fields
/// - `wheel` - The wheel being rolled.
/// - `session` - The roll currently driving the wheel, if any.
/// - `traces` - One path trace per marker.
/// - `cfg` - Shared configuration (radius, colors, roll duration, trace spacing).
///
/// - `rng` - Random number generator used for new markers and morph targets.
///
/// - `tool` - Track kind used by the next roll.
/// - `turns` - Full turns per roll (straight) or full sweeps around the pivot.
/// - `pivot_radius` - Radius of the fixed pivot circle centered at the origin.
/// - `reverse` - Flip the rotation sense of every roll.
/// - `running` - Whether a new roll starts automatically when one ends.
/// - `zoom` - Zoom factor for world-to-screen coordinate mapping.
/// - `pan` - Screen-space pan offset in pixels.
///
/// - `morphs` / `morph_started_at` - Marker morph being animated on screen.
/// - `roll_started_at` - egui time at which the active roll began.
/// - `last_frame` - Pose written by the last roll step (for display only).
/// - `last_error` - Last rejected operation, shown in the status bar.
pub struct Viewer {
    wheel: Wheel,
    session: Option<RollSession>,
    traces: Vec<PathTrace>,
    cfg: Config,

    rng: rand::rngs::ThreadRng,

    tool: RollTool,
    turns: f32,
    pivot_radius: f32,
    reverse: bool,
    running: bool,
    zoom: f32,
    pan: egui::Vec2,

    morphs: Vec<MarkerMorph>,
    morph_started_at: f64,

    roll_started_at: f64,
    last_frame: Option<RollFrame>,
    last_error: Option<String>,
}

impl Viewer {
    /// Creates a viewer from `wheel.toml` in the working directory, or the
    /// default configuration if that file is missing or invalid.
    pub fn new() -> Result<Self, WheelError> {
        let (cfg, err) = Config::load_or_default(CONFIG_PATH);
        match err {
            None => info!(path = CONFIG_PATH, "loaded config"),
            Some(e) => info!(path = CONFIG_PATH, error = %e, "using default config"),
        }
        Self::with_config(cfg)
    }

    /// Creates a viewer with a wheel resting on the straight track and two
    /// markers: one on the rim and one halfway to the center.
    pub fn with_config(cfg: Config) -> Result<Self, WheelError> {
        let wheel = Self::initial_wheel(&cfg)?;

        let mut viewer = Self {
            wheel,
            session: None,
            traces: Vec::new(),
            cfg,
            rng: rand::rng(),
            tool: RollTool::Straight,
            turns: 1.0,
            pivot_radius: 3.0 * cfg.radius,
            reverse: true,
            running: false,
            zoom: 60.0,
            pan: egui::vec2(0.0, 0.0),
            morphs: Vec::new(),
            morph_started_at: 0.0,
            roll_started_at: 0.0,
            last_frame: None,
            last_error: None,
        };
        viewer.place_for_tool();
        viewer.sync_traces();
        Ok(viewer)
    }

    fn initial_wheel(cfg: &Config) -> Result<Wheel, WheelError> {
        Wheel::with_markers(
            cfg.radius,
            Vec2::ZERO,
            [
                MarkerSpec::relative(1.0, -TAU / 4.0).with_color(cfg.marker_color),
                MarkerSpec::relative(0.5, TAU / 4.0).with_color(Color::YELLOW),
            ],
        )
        .map(|w| w.with_color(cfg.wheel_color))
    }

    /// Resets the wheel, traces and rolls, keeping `cfg` and the camera.
    fn reset(&mut self) {
        match Self::initial_wheel(&self.cfg) {
            Ok(wheel) => self.wheel = wheel,
            Err(e) => return self.report(e),
        }
        self.session = None;
        self.traces.clear();
        self.morphs.clear();
        self.last_frame = None;
        self.last_error = None;
        self.running = false;
        self.place_for_tool();
        self.sync_traces();
    }

    /// Cancels any roll and puts the wheel at the start of the current
    /// tool's track.
    fn place_for_tool(&mut self) {
        self.wheel.cancel_roll();
        self.session = None;

        let r = self.wheel.radius();
        match self.tool {
            RollTool::Straight => {
                let start = Vec2::new(-0.5 * TAU * r * self.turns, 0.0);
                let side = if self.reverse { Vec2::Y } else { -Vec2::Y };
                self.wheel.move_to(start, side);
            }
            RollTool::Outside => self.wheel.move_to(Vec2::new(0.0, self.pivot_radius), Vec2::Y),
            RollTool::Inside => self.wheel.move_to(Vec2::new(0.0, self.pivot_radius), -Vec2::Y),
        }

        for t in &mut self.traces {
            t.restart();
        }
    }

    fn roll_path(&self) -> RollPath {
        match self.tool {
            RollTool::Straight => {
                RollPath::Straight(Vec2::new(TAU * self.wheel.radius() * self.turns, 0.0))
            }
            RollTool::Outside | RollTool::Inside => RollPath::Around {
                pivot: Pivot::circle(Vec2::ZERO, self.pivot_radius),
                sweep: TAU * self.turns,
            },
        }
    }

    /// Starts a roll of the current tool from wherever the wheel is.
    ///
    /// In auto-run mode every roll begins with fresh traces, so only the
    /// latest lap is drawn.
    fn start_roll(&mut self, now: f64) {
        let mut options = RollOptions::from_config(&self.cfg);
        if self.reverse {
            options = options.reversed();
        }

        let path = self.roll_path();
        match self.wheel.roll(path, options) {
            Ok(session) => {
                self.session = Some(session);
                self.roll_started_at = now;
                self.last_error = None;
                if self.running {
                    for t in &mut self.traces {
                        t.restart();
                    }
                }
                self.sync_traces();
            }
            Err(e) => {
                self.running = false;
                self.report(e);
            }
        }
    }

    /// Advances the active roll to `progress` and samples all traces.
    fn step_to(&mut self, progress: f32) {
        let result = match self.session.as_mut() {
            Some(session) => session.advance(&mut self.wheel, progress),
            None => return,
        };

        match result {
            Ok(frame) => {
                self.last_frame = Some(frame);
                for t in &mut self.traces {
                    t.sample(&self.wheel);
                }
                if frame.finished {
                    self.session = None;
                }
            }
            Err(e) => {
                self.session = None;
                self.report(e);
            }
        }
    }

    /// Keeps exactly one trace per marker, preserving recorded points of
    /// markers that are still present.
    fn sync_traces(&mut self) {
        let wheel = &self.wheel;
        self.traces.retain(|t| wheel.marker_by_id(t.marker_id()).is_some());

        for m in self.wheel.markers() {
            if !self.traces.iter().any(|t| t.marker_id() == m.id) {
                self.traces
                    .push(PathTrace::new(m.id, m.color).with_min_step(self.cfg.trace_min_step));
            }
        }
    }

    fn random_color(&mut self) -> Color {
        PALETTE[self.rng.random_range(0..PALETTE.len())]
    }

    fn add_random_markers(&mut self, count: usize) {
        let reach = 1.25 * self.wheel.radius();
        let specs: Vec<MarkerSpec> = (0..count)
            .map(|_| {
                let color = self.random_color();
                MarkerSpec::random_in_disk(reach, color, &mut self.rng)
            })
            .collect();
        self.wheel.place_markers(specs);
        self.sync_traces();
    }

    /// Morphs every marker to a random placement, keeping its color.
    fn morph_random(&mut self, now: f64) {
        let reach = 1.25 * self.wheel.radius();
        let targets: Vec<MarkerSpec> = self
            .wheel
            .markers()
            .iter()
            .map(|m| MarkerSpec::random_in_disk(reach, m.color, &mut self.rng))
            .collect();

        match self.wheel.morph_markers(&targets, None) {
            Ok(morphs) => {
                self.morphs = morphs;
                self.morph_started_at = now;
            }
            Err(e) => self.report(e),
        }
    }

    fn remove_last_marker(&mut self) {
        let Some(last) = self.wheel.markers().len().checked_sub(1) else {
            return;
        };
        if let Err(e) = self.wheel.remove_markers(Some(&[last])) {
            self.report(e);
        }
        self.sync_traces();
    }

    fn clear_markers(&mut self) {
        if let Err(e) = self.wheel.remove_markers(None) {
            self.report(e);
        }
        self.morphs.clear();
        self.sync_traces();
    }

    fn report(&mut self, e: WheelError) {
        warn!(error = %e, "wheel operation rejected");
        self.last_error = Some(e.to_string());
    }

    /// Position at which a marker is drawn, following its morph arc while
    /// a morph animation is running.
    fn display_position(&self, id: MarkerId, now: f64) -> Option<Vec2> {
        let m = self.wheel.marker_by_id(id)?;
        let t = ((now - self.morph_started_at) / MORPH_SECONDS) as f32;
        if t < 1.0
            && let Some(morph) = self.morphs.iter().find(|mm| mm.to.id == id)
        {
            return Some(morph.position_at(self.wheel.center(), t.max(0.0)));
        }
        Some(self.wheel.position_of(m))
    }

    /// Converts a world-space position to screen-space.
    ///
    /// World coordinates are scaled by `zoom`, offset by `pan`, and then
    /// centered inside the given `rect`. The y-axis is flipped so that
    /// positive y goes up in world space.
    fn world_to_screen(&self, p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        let center = rect.center();
        egui::pos2(
            center.x + p.x * self.zoom + self.pan.x,
            center.y - p.y * self.zoom + self.pan.y,
        )
    }

    /// Converts a screen-space position back to world-space.
    ///
    /// This is the inverse of [`Viewer::world_to_screen`] (up to floating
    /// point rounding).
    fn screen_to_world(&self, p: egui::Pos2, rect: egui::Rect) -> Vec2 {
        let center = rect.center();
        let x = (p.x - center.x - self.pan.x) / self.zoom;
        let y = (center.y - p.y + self.pan.y) / self.zoom;
        Vec2::new(x, y)
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`].
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) -> bool {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed))
                .changed()
        })
        .inner
    }

    /// Builds the top panel UI (roll controls, reset, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                if ui.button("Roll").clicked() {
                    let now = ctx.input(|i| i.time);
                    self.start_roll(now);
                }

                if ui.button("Reset").clicked() {
                    self.reset();
                }

                if ui.button("Clear traces").clicked() {
                    for t in &mut self.traces {
                        t.restart();
                    }
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.zoom, 5.0..=300.0).text("Zoom"));
            });
        });
    }

    /// Builds the bottom status bar (marker count, rotation, roll state).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("orientation = {:.3} rad", self.wheel.orientation()));
                ui.label(format!("rotation = {:.3} rad", self.wheel.rotation()));
                if let Some(frame) = self.last_frame {
                    ui.label(format!("alpha = {:.3}", frame.alpha));
                }
                ui.separator();
                ui.label(format!("markers = {}", self.wheel.markers().len()));
                ui.label(if self.wheel.is_rolling() { "rolling" } else { "idle" });
                if let Some(err) = &self.last_error {
                    ui.separator();
                    ui.colored_label(egui::Color32::LIGHT_RED, err.as_str());
                }
            });
        });
    }

    /// Builds the right-hand panel for roll and marker settings.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Roll");

                let mut replace = false;
                replace |= Self::labeled_drag_f32(ui, "turns:", &mut self.turns, 0.05..=10.0, 0.05);
                replace |= Self::labeled_drag_f32(
                    ui,
                    "pivot_radius:",
                    &mut self.pivot_radius,
                    0.0..=20.0,
                    0.05,
                );
                replace |= ui.checkbox(&mut self.reverse, "reverse").changed();
                if replace && self.session.is_none() {
                    self.place_for_tool();
                }

                Self::labeled_drag_f32(
                    ui,
                    "roll_duration:",
                    &mut self.cfg.roll_duration,
                    0.1..=30.0,
                    0.1,
                );

                ui.separator();
                ui.heading("Markers");
                let now = ctx.input(|i| i.time);
                if ui.button("Add 3 random").clicked() {
                    self.add_random_markers(3);
                }
                if ui.button("Morph all").clicked() {
                    self.morph_random(now);
                }
                if ui.button("Remove last").clicked() {
                    self.remove_last_marker();
                }
                if ui.button("Clear markers").clicked() {
                    self.clear_markers();
                }

                ui.separator();
                ui.label("Traces");
                if Self::labeled_drag_f32(
                    ui,
                    "min_step:",
                    &mut self.cfg.trace_min_step,
                    0.0..=1.0,
                    0.005,
                ) {
                    self.traces.clear();
                    self.sync_traces();
                }

                ui.separator();
                if ui.button("Reset cfg to default").clicked() {
                    self.cfg = Config::default();
                    self.reset();
                }
            });
    }

    /// Builds the small floating toolbar for choosing the track.
    fn ui_toolbar(&mut self, ctx: &egui::Context) {
        egui::Area::new("toolbar".into())
            .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 100.0))
            .movable(false)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(0, 0, 0, 32))
                    .show(ui, |ui| {
                        ui.vertical(|ui| {
                            for (tool, label) in [
                                (RollTool::Straight, "― Line"),
                                (RollTool::Outside, "◯ Outside"),
                                (RollTool::Inside, "◎ Inside"),
                            ] {
                                if ui.selectable_label(self.tool == tool, label).clicked()
                                    && self.tool != tool
                                {
                                    self.tool = tool;
                                    self.place_for_tool();
                                }
                            }
                        });
                    });
            });
    }

    /// Draws the straight track line or the pivot circle.
    fn draw_track(&self, painter: &egui::Painter, rect: egui::Rect) {
        let stroke = egui::Stroke::new(2.0, egui::Color32::GRAY);
        match self.tool {
            RollTool::Straight => {
                let r = self.wheel.radius();
                let y = if self.reverse {
                    self.wheel.center().y - r
                } else {
                    self.wheel.center().y + r
                };
                let left = self.screen_to_world(rect.left_top(), rect).x;
                let right = self.screen_to_world(rect.right_top(), rect).x;
                painter.line_segment(
                    [
                        self.world_to_screen(Vec2::new(left, y), rect),
                        self.world_to_screen(Vec2::new(right, y), rect),
                    ],
                    stroke,
                );
            }
            RollTool::Outside | RollTool::Inside => {
                let c = self.world_to_screen(Vec2::ZERO, rect);
                painter.circle_stroke(c, self.pivot_radius * self.zoom, stroke);
                painter.circle_filled(c, 3.0, egui::Color32::GRAY);
            }
        }
    }

    /// Draws the rim as dashes turning with the wheel orientation.
    fn draw_wheel(&self, painter: &egui::Painter, rect: egui::Rect) {
        let color = to_color32(self.wheel.color());
        let stroke = egui::Stroke::new(3.0, color);
        let center = self.wheel.center();
        let r = self.wheel.radius();

        let dashes = self.cfg.dashes();
        let seg = TAU / dashes as f32;
        for i in 0..dashes {
            let start = self.wheel.orientation() + i as f32 * seg;
            let pts: Vec<egui::Pos2> = (0..=4)
                .map(|k| {
                    let a = start + 0.5 * seg * (k as f32 / 4.0);
                    self.world_to_screen(center + Vec2::from_angle(a) * r, rect)
                })
                .collect();
            painter.add(egui::Shape::line(pts, stroke));
        }

        painter.circle_filled(self.world_to_screen(center, rect), 4.0, color);
    }

    fn draw_markers(&self, painter: &egui::Painter, rect: egui::Rect, now: f64) {
        for t in &self.traces {
            if t.points().len() < 2 {
                continue;
            }
            let pts: Vec<egui::Pos2> = t
                .points()
                .iter()
                .map(|&p| self.world_to_screen(p, rect))
                .collect();
            painter.add(egui::Shape::line(
                pts,
                egui::Stroke::new(2.0, to_color32(t.color())),
            ));
        }

        for seg in self.wheel.connectors() {
            let end = self.display_position(seg.marker, now).unwrap_or(seg.end);
            painter.line_segment(
                [
                    self.world_to_screen(seg.start, rect),
                    self.world_to_screen(end, rect),
                ],
                egui::Stroke::new(2.0, to_color32(seg.color)),
            );
        }

        for m in self.wheel.markers() {
            if let Some(p) = self.display_position(m.id, now) {
                painter.circle_filled(self.world_to_screen(p, rect), 5.0, to_color32(m.color));
            }
        }
    }

    /// Builds the central panel where the wheel is driven and drawn.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);
            let now = ctx.input(|i| i.time);

            // Pan with drag.
            if response.dragged() {
                self.pan += response.drag_delta();
            }

            // Zoom around the mouse cursor.
            let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let pointer_screen = response.hover_pos().unwrap_or(rect.center());
                let world_before = self.screen_to_world(pointer_screen, rect);

                let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                self.zoom = (self.zoom * factor).clamp(5.0, 300.0);

                let screen_after = self.world_to_screen(world_before, rect);
                self.pan += pointer_screen - screen_after;
            }

            // Drive the active roll, or start the next one when running.
            if let Some(session) = &self.session {
                let progress = session.progress_at((now - self.roll_started_at) as f32);
                self.step_to(progress);
            } else if self.running {
                self.start_roll(now);
            }

            self.draw_track(&painter, rect);
            self.draw_markers(&painter, rect, now);
            self.draw_wheel(&painter, rect);

            let morphing = now - self.morph_started_at < MORPH_SECONDS && !self.morphs.is_empty();
            if self.session.is_some() || self.running || morphing {
                ctx.request_repaint();
            }
        });
    }
}

fn to_color32(c: Color) -> egui::Color32 {
    egui::Color32::from_rgb(c.r, c.g, c.b)
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
        self.ui_toolbar(ctx);
    }
}
