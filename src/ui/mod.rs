//! egui chrome: HUD, overlays and their shared style.

mod hud;
mod menus;
pub mod style;

pub use hud::{draw_hud, format_clock, HudData};
pub use menus::{draw_end_menu, draw_pause_menu, draw_start_menu};

/// Clicks collected from one UI pass, applied by the app shell afterwards.
#[derive(Default)]
pub struct UiActions {
    pub start: bool,
    pub resume: bool,
    pub restart: bool,
}
