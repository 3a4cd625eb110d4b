//! In-game HUD: health bar, score, weapon, countdown clock, FPS.

use super::style;
use crate::constants::PLAYER_STARTING_HEALTH;
use crate::session::Session;

/// Data needed to render the HUD, extracted before egui runs.
pub struct HudData {
    pub health: i32,
    pub score: u32,
    pub weapon_name: Option<&'static str>,
    pub remaining_secs: u32,
    pub fps: u32,
}

impl HudData {
    pub fn from_session(session: &Session, fps: u32) -> Self {
        Self {
            health: session.player.health,
            score: session.player.score,
            weapon_name: session.player.weapon.as_ref().map(|w| w.name()),
            remaining_secs: session.remaining_secs,
            fps,
        }
    }
}

/// Countdown as m:ss, the way a wall clock would show it.
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

pub fn draw_hud(ctx: &egui::Context, data: &HudData) {
    // Health bar, top center. The internal value can dip below zero for a
    // frame before the end transition; never show that.
    let shown_health = data.health.max(0);
    let fraction = shown_health as f32 / PLAYER_STARTING_HEALTH as f32;

    egui::Window::new("health")
        .anchor(egui::Align2::CENTER_TOP, [0.0, 10.0])
        .fixed_size([400.0, 24.0])
        .title_bar(false)
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            ui.add_sized(
                [400.0, 14.0],
                egui::ProgressBar::new(fraction)
                    .fill(style::colors::HP_BAR)
                    .text(format!("{shown_health}/{PLAYER_STARTING_HEALTH}")),
            );
        });

    // Score, weapon and FPS, top left.
    egui::Window::new("status")
        .fixed_pos([10.0, 10.0])
        .title_bar(false)
        .frame(style::window_frame())
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(format!("Score: {}", data.score))
                    .color(style::colors::TEXT_ACCENT),
            );
            ui.label(match data.weapon_name {
                Some(name) => format!("Weapon: {name}"),
                None => "Unarmed".to_string(),
            });
            ui.label(
                egui::RichText::new(format!("FPS: {}", data.fps))
                    .color(style::colors::TEXT_MUTED)
                    .small(),
            );
        });

    // Countdown, top right.
    egui::Window::new("clock")
        .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
        .title_bar(false)
        .frame(style::window_frame())
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(format_clock(data.remaining_secs))
                    .size(22.0)
                    .color(style::colors::TEXT_PRIMARY),
            );
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_formats_minutes_and_seconds() {
        assert_eq!(format_clock(780), "13:00");
        assert_eq!(format_clock(61), "1:01");
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(0), "0:00");
    }
}
