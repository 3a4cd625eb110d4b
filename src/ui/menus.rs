//! Start, pause and end overlays.
//!
//! Pure sinks over session state: they display and report clicks through
//! [`UiActions`]; all state changes happen back in the app shell.

use super::style;
use super::UiActions;
use crate::events::EndReason;

pub fn draw_start_menu(ctx: &egui::Context, actions: &mut UiActions) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(egui::Color32::from_rgb(18, 20, 26)))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(160.0);
                ui.heading(
                    egui::RichText::new("Dusk Survivor")
                        .size(48.0)
                        .color(style::colors::TEXT_ACCENT),
                );
                ui.add_space(12.0);
                ui.label(
                    egui::RichText::new("WASD to move, E to pick up, click to attack, P to pause")
                        .color(style::colors::TEXT_MUTED),
                );
                ui.add_space(40.0);
                if ui
                    .add_sized([160.0, 40.0], egui::Button::new("Start"))
                    .clicked()
                {
                    actions.start = true;
                }
            });
        });
}

pub fn draw_pause_menu(ctx: &egui::Context, actions: &mut UiActions) {
    egui::Window::new("Paused")
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .frame(style::window_frame())
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Paused");
                ui.add_space(12.0);
                if ui
                    .add_sized([140.0, 32.0], egui::Button::new("Resume"))
                    .clicked()
                {
                    actions.resume = true;
                }
                ui.add_space(6.0);
                if ui
                    .add_sized([140.0, 32.0], egui::Button::new("Restart"))
                    .clicked()
                {
                    actions.restart = true;
                }
            });
        });
}

pub fn draw_end_menu(ctx: &egui::Context, score: u32, reason: EndReason, actions: &mut UiActions) {
    let headline = match reason {
        EndReason::PlayerDied => "You fell",
        EndReason::TimeUp => "Time ran out",
    };

    egui::Window::new("Game over")
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .frame(style::window_frame())
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(headline);
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new(format!("Final score: {score}"))
                        .color(style::colors::TEXT_ACCENT),
                );
                ui.add_space(12.0);
                if ui
                    .add_sized([140.0, 32.0], egui::Button::new("Restart"))
                    .clicked()
                {
                    actions.restart = true;
                }
            });
        });
}
