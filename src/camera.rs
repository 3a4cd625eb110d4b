//! Screen-space anchoring for the player-centered view.
//!
//! The view never rotates or zooms: the player is pinned to the middle of the
//! window and the world slides underneath, so the camera is just the viewport
//! size plus the world-to-screen offset math.

use glam::{Mat4, Vec2};

pub struct Camera {
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Camera {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            viewport_width,
            viewport_height,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Screen center: where the player (and an equipped weapon) renders.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.viewport_width / 2.0, self.viewport_height / 2.0)
    }

    /// Map a world position to screen pixels, with `focus` (the player
    /// position) landing on the screen center.
    pub fn world_to_screen(&self, world: Vec2, focus: Vec2) -> Vec2 {
        world - focus + self.center()
    }

    /// Pixel-space orthographic projection, y growing downward like the
    /// input coordinates.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::orthographic_rh(
            0.0,
            self.viewport_width,
            self.viewport_height,
            0.0,
            -1.0,
            1.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_maps_to_center() {
        let camera = Camera::new(800.0, 600.0);
        let focus = Vec2::new(123.0, -45.0);
        assert_eq!(camera.world_to_screen(focus, focus), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn offsets_are_preserved() {
        let camera = Camera::new(800.0, 600.0);
        let focus = Vec2::new(100.0, 100.0);
        let screen = camera.world_to_screen(Vec2::new(150.0, 80.0), focus);
        assert_eq!(screen, Vec2::new(450.0, 280.0));
    }
}
