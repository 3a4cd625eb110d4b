//! Dusk-themed egui styling.
//!
//! Flat panels, hard borders, muted twilight colors - the chrome should sit
//! quietly over the field instead of looking like a desktop app.

use egui::epaint::Shadow;
use egui::style::{WidgetVisuals, Widgets};
use egui::{Color32, Frame, Margin, Rounding, Stroke, Style, Visuals};

/// Twilight color palette
pub mod colors {
    use egui::Color32;

    pub const PANEL_BG: Color32 = Color32::from_rgb(22, 24, 30);
    pub const PANEL_BORDER: Color32 = Color32::from_rgb(52, 56, 68);

    pub const BUTTON_BG: Color32 = Color32::from_rgb(30, 33, 42);
    pub const BUTTON_HOVER: Color32 = Color32::from_rgb(42, 46, 58);
    pub const BUTTON_ACTIVE: Color32 = Color32::from_rgb(55, 60, 75);
    pub const BUTTON_BORDER: Color32 = Color32::from_rgb(70, 76, 92);

    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(210, 212, 220);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(140, 144, 155);
    pub const TEXT_ACCENT: Color32 = Color32::from_rgb(235, 200, 120);

    pub const HP_BAR: Color32 = Color32::from_rgb(60, 160, 60);
    pub const HP_BAR_BG: Color32 = Color32::from_rgb(140, 35, 35);

    pub const SELECTED: Color32 = Color32::from_rgb(70, 90, 110);
}

/// Border width for panels and buttons
pub const BORDER_WIDTH: f32 = 1.0;

/// Create the dusk-themed visuals
pub fn dusk_visuals() -> Visuals {
    let mut visuals = Visuals::dark();

    visuals.window_rounding = Rounding::ZERO;
    visuals.menu_rounding = Rounding::ZERO;

    visuals.window_shadow = Shadow::NONE;
    visuals.popup_shadow = Shadow::NONE;

    visuals.window_fill = colors::PANEL_BG;
    visuals.window_stroke = Stroke::new(BORDER_WIDTH, colors::PANEL_BORDER);

    visuals.panel_fill = colors::PANEL_BG;
    visuals.extreme_bg_color = colors::PANEL_BG;
    visuals.faint_bg_color = Color32::from_rgb(28, 30, 38);

    visuals.widgets = dusk_widgets();

    visuals.selection.bg_fill = colors::SELECTED;
    visuals.selection.stroke = Stroke::new(1.0, colors::TEXT_ACCENT);

    visuals.override_text_color = Some(colors::TEXT_PRIMARY);

    visuals
}

fn dusk_widgets() -> Widgets {
    Widgets {
        noninteractive: WidgetVisuals {
            bg_fill: colors::PANEL_BG,
            weak_bg_fill: colors::PANEL_BG,
            bg_stroke: Stroke::new(BORDER_WIDTH, colors::PANEL_BORDER),
            rounding: Rounding::ZERO,
            fg_stroke: Stroke::new(1.0, colors::TEXT_MUTED),
            expansion: 0.0,
        },
        inactive: WidgetVisuals {
            bg_fill: colors::BUTTON_BG,
            weak_bg_fill: colors::BUTTON_BG,
            bg_stroke: Stroke::new(BORDER_WIDTH, colors::BUTTON_BORDER),
            rounding: Rounding::ZERO,
            fg_stroke: Stroke::new(1.0, colors::TEXT_PRIMARY),
            expansion: 0.0,
        },
        hovered: WidgetVisuals {
            bg_fill: colors::BUTTON_HOVER,
            weak_bg_fill: colors::BUTTON_HOVER,
            bg_stroke: Stroke::new(BORDER_WIDTH, colors::TEXT_ACCENT),
            rounding: Rounding::ZERO,
            fg_stroke: Stroke::new(1.0, colors::TEXT_PRIMARY),
            expansion: 0.0,
        },
        active: WidgetVisuals {
            bg_fill: colors::BUTTON_ACTIVE,
            weak_bg_fill: colors::BUTTON_ACTIVE,
            bg_stroke: Stroke::new(2.0, colors::TEXT_ACCENT),
            rounding: Rounding::ZERO,
            fg_stroke: Stroke::new(1.0, colors::TEXT_PRIMARY),
            expansion: 0.0,
        },
        open: WidgetVisuals {
            bg_fill: colors::BUTTON_ACTIVE,
            weak_bg_fill: colors::BUTTON_ACTIVE,
            bg_stroke: Stroke::new(BORDER_WIDTH, colors::BUTTON_BORDER),
            rounding: Rounding::ZERO,
            fg_stroke: Stroke::new(1.0, colors::TEXT_PRIMARY),
            expansion: 0.0,
        },
    }
}

/// Create a dusk-themed window frame
pub fn window_frame() -> Frame {
    Frame::none()
        .fill(colors::PANEL_BG)
        .stroke(Stroke::new(BORDER_WIDTH, colors::PANEL_BORDER))
        .inner_margin(Margin::same(8.0))
}

/// Create the dusk-themed style
pub fn dusk_style() -> Style {
    let mut style = Style::default();
    style.visuals = dusk_visuals();
    style
}
