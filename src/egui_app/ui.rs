//! egui renderer for the README generator form.

use std::time::Duration;

use eframe::egui::{self, Align2, Color32, RichText, Vec2};

use crate::config;
use crate::egui_app::controller::FormController;

/// Minimum window size for the form.
pub const MIN_VIEWPORT_SIZE: Vec2 = Vec2::new(560.0, 420.0);

const URL_PLACEHOLDER: &str = "https://github.com/user/repository";

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: FormController,
    visuals_set: bool,
}

impl EguiApp {
    /// Create a new egui app, loading persisted configuration.
    pub fn new() -> Result<Self, String> {
        let cfg =
            config::load_or_default().map_err(|err| format!("Failed to load config: {err}"))?;
        let controller =
            FormController::new(cfg).map_err(|err| format!("Failed to load config: {err}"))?;
        Ok(Self {
            controller,
            visuals_set: false,
        })
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        visuals.window_fill = Color32::from_rgb(12, 12, 12);
        visuals.panel_fill = Color32::from_rgb(16, 16, 16);
        visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(16, 16, 16);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_header(&mut self, ui: &mut egui::Ui) {
        ui.heading(RichText::new("GitHub README Generator").color(Color32::from_rgb(96, 165, 250)));
        ui.label(
            RichText::new("Enter a GitHub repository URL to generate a README.")
                .color(Color32::GRAY),
        );
        ui.add_space(12.0);
    }

    fn render_input_row(&mut self, ui: &mut egui::Ui) {
        let busy = self.controller.state.loading;
        ui.horizontal(|ui| {
            let input_width = (ui.available_width() - 110.0).max(120.0);
            ui.add_sized(
                egui::vec2(input_width, 24.0),
                egui::TextEdit::singleline(&mut self.controller.state.repo_url)
                    .hint_text(URL_PLACEHOLDER),
            );
            let label = if busy { "Generating..." } else { "Generate" };
            if ui
                .add_enabled(!busy, egui::Button::new(label))
                .clicked()
            {
                self.controller.begin_fetch();
            }
        });
    }

    fn render_error(&mut self, ui: &mut egui::Ui) {
        if self.controller.state.error.is_empty() {
            return;
        }
        ui.add_space(10.0);
        ui.label(
            RichText::new(&self.controller.state.error).color(Color32::from_rgb(248, 113, 113)),
        );
    }

    fn render_result(&mut self, ui: &mut egui::Ui) {
        if self.controller.state.readme.is_empty() {
            return;
        }
        ui.add_space(14.0);
        ui.label(
            RichText::new("Generated README:")
                .strong()
                .color(Color32::from_rgb(96, 165, 250)),
        );
        ui.add_space(6.0);
        let editable = self.controller.allow_edit();
        egui::ScrollArea::vertical()
            .max_height((ui.available_height() - 44.0).max(120.0))
            .show(ui, |ui| {
                ui.add_sized(
                    egui::vec2(ui.available_width(), 240.0),
                    egui::TextEdit::multiline(&mut self.controller.state.readme)
                        .interactive(editable),
                );
            });
        if self.controller.allow_copy() {
            ui.add_space(8.0);
            if ui.button("Copy to Clipboard").clicked() {
                let ctx = ui.ctx().clone();
                self.controller.copy_readme_to_clipboard(&ctx);
            }
        }
    }

    fn render_copy_ack(&mut self, ctx: &egui::Context) {
        if !self.controller.state.copy_ack_open {
            return;
        }
        let mut open = true;
        let mut acknowledged = false;
        egui::Window::new("Copied")
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label("README copied to clipboard!");
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        acknowledged = true;
                    }
                });
            });
        if !open || acknowledged {
            self.controller.acknowledge_copy();
        }
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.poll_background_jobs();
        if self.controller.state.loading {
            // Keep polling for settlement even without input events.
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.set_max_width(640.0);
                ui.add_space(24.0);
                self.render_header(ui);
                self.render_input_row(ui);
                self.render_error(ui);
                self.render_result(ui);
            });
        });

        self.render_copy_ack(ctx);
    }
}
