//! GUI rendering functions.
//!
//! Contains UI layout and component rendering logic.

use eframe::egui::{self, Color32, RichText, Vec2};

use super::state::{swatch_lines, Controls};
use crate::calibration::CalibrationStep;
use crate::palette::Palette;

const SWATCH_SIZE: f32 = 96.0;

/// Buttons pressed in the toolbar this frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct ToolbarAction {
    pub generate: bool,
    pub calibrate: bool,
    pub toggle_favorites: bool,
}

/// Requests from the favorites panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FavoriteAction {
    Select(usize),
    Remove(usize),
}

/// Render the status line.
pub fn render_status(ui: &mut egui::Ui, status: &str, step: Option<CalibrationStep>) {
    let color = if status.starts_with("Error") {
        Color32::from_rgb(200, 0, 0)
    } else if step.is_some() {
        Color32::from_rgb(0, 120, 200)
    } else {
        Color32::GRAY
    };

    ui.horizontal(|ui| {
        if let Some(step) = step.filter(|s| s.is_awaiting()) {
            ui.label(
                RichText::new(format!(
                    "Calibrating {}/{}",
                    step.step_number(),
                    CalibrationStep::total_steps()
                ))
                .strong(),
            );
        }
        ui.label("Status:");
        ui.label(RichText::new(status).color(color));
    });
}

/// Render the main buttons.
pub fn render_toolbar(
    ui: &mut egui::Ui,
    controls: &Controls,
    show_favorites: bool,
) -> ToolbarAction {
    let mut action = ToolbarAction::default();

    ui.horizontal(|ui| {
        ui.add_enabled_ui(controls.can_generate, |ui| {
            if ui.button(RichText::new("Generate New Palette").size(16.0)).clicked() {
                action.generate = true;
            }
        });

        ui.add_space(12.0);

        let calibrate_label = if controls.calibrated {
            "Recalibrate"
        } else {
            "Calibrate"
        };
        ui.add_enabled_ui(controls.can_calibrate, |ui| {
            if ui.button(RichText::new(calibrate_label).size(16.0)).clicked() {
                action.calibrate = true;
            }
        });

        ui.add_space(12.0);

        let favorites_label = if show_favorites {
            "Hide Favorites"
        } else {
            "Favorites"
        };
        if ui.button(RichText::new(favorites_label).size(16.0)).clicked() {
            action.toggle_favorites = true;
        }
    });

    action
}

/// Render the active palette as five clickable swatches.
/// Returns (clicked_color_index, favorite_star_clicked).
pub fn render_palette(
    ui: &mut egui::Ui,
    palette: Option<&Palette>,
    is_applied: impl Fn(usize) -> bool,
    is_favorite: bool,
    controls: &Controls,
) -> (Option<usize>, bool) {
    let mut clicked = None;
    let mut star_clicked = false;

    let Some(palette) = palette else {
        ui.label(RichText::new("No palette selected").italics());
        return (None, false);
    };

    ui.horizontal(|ui| {
        ui.heading(&palette.name);
        ui.add_enabled_ui(controls.can_favorite, |ui| {
            let star = if is_favorite { "★" } else { "☆" };
            if ui
                .button(RichText::new(star).size(20.0))
                .on_hover_text("Save to favorites")
                .clicked()
            {
                star_clicked = true;
            }
        });
    });

    ui.add_space(8.0);

    ui.horizontal(|ui| {
        for (index, color) in palette.colors.iter().enumerate() {
            ui.vertical(|ui| {
                ui.set_width(SWATCH_SIZE);

                let sense = if controls.can_apply {
                    egui::Sense::click()
                } else {
                    egui::Sense::hover()
                };
                let (rect, response) =
                    ui.allocate_exact_size(Vec2::splat(SWATCH_SIZE), sense);

                let (r, g, b) = color.to_rgb();
                ui.painter().rect_filled(rect, 6.0, Color32::from_rgb(r, g, b));

                if is_applied(index) {
                    // Contrasting check mark
                    let mark = if color.v > 0.6 && color.s < 0.5 {
                        Color32::BLACK
                    } else {
                        Color32::WHITE
                    };
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        "✔",
                        egui::FontId::proportional(32.0),
                        mark,
                    );
                }

                if response.hovered() && controls.can_apply {
                    ui.painter().rect_stroke(
                        rect,
                        6.0,
                        egui::Stroke::new(2.0, Color32::from_gray(60)),
                    );
                }
                if response.clicked() {
                    clicked = Some(index);
                }

                for line in swatch_lines(*color) {
                    ui.label(RichText::new(line).size(11.0).monospace());
                }
            });
        }
    });

    (clicked, star_clicked)
}

/// Render the saved palettes with select and remove buttons.
pub fn render_favorites(ui: &mut egui::Ui, favorites: &[Palette]) -> Option<FavoriteAction> {
    let mut action = None;

    ui.add_space(8.0);
    ui.separator();
    ui.heading("Favorites");
    ui.add_space(4.0);

    if favorites.is_empty() {
        ui.label("No favorite palettes yet. Use ☆ to save one.");
        return None;
    }

    for (index, palette) in favorites.iter().enumerate() {
        ui.horizontal(|ui| {
            for color in &palette.colors {
                let (rect, _) = ui.allocate_exact_size(Vec2::splat(18.0), egui::Sense::hover());
                let (r, g, b) = color.to_rgb();
                ui.painter().rect_filled(rect, 2.0, Color32::from_rgb(r, g, b));
            }
            ui.add_space(8.0);

            if ui.link(&palette.name).clicked() {
                action = Some(FavoriteAction::Select(index));
            }
            if ui.small_button("Remove").clicked() {
                action = Some(FavoriteAction::Remove(index));
            }
        });
    }

    action
}
