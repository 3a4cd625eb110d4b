//! Input state tracking.
//!
//! The window event handler feeds key transitions and pointer motion in;
//! the frame loop samples the held-key set once per frame. Movement is
//! held-key based (not edge based), so walking is continuous.

use std::collections::HashSet;

use glam::Vec2;
use winit::keyboard::KeyCode;

use crate::constants::PLAYER_WALKING_SPEED;
use crate::session::FrameInput;

pub struct InputState {
    pub keys_pressed: HashSet<KeyCode>,
    pub mouse_pos: (f32, f32),
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_pressed: HashSet::new(),
            mouse_pos: (0.0, 0.0),
        }
    }

    /// Per-axis movement at the fixed walking speed; zero when nothing is
    /// held. Opposite keys: the down/right key wins, matching the original
    /// sampling order.
    pub fn movement_vector(&self) -> Vec2 {
        let mut dx = 0.0;
        let mut dy = 0.0;
        if self.keys_pressed.contains(&KeyCode::KeyW) {
            dy = -PLAYER_WALKING_SPEED;
        }
        if self.keys_pressed.contains(&KeyCode::KeyA) {
            dx = -PLAYER_WALKING_SPEED;
        }
        if self.keys_pressed.contains(&KeyCode::KeyS) {
            dy = PLAYER_WALKING_SPEED;
        }
        if self.keys_pressed.contains(&KeyCode::KeyD) {
            dx = PLAYER_WALKING_SPEED;
        }
        Vec2::new(dx, dy)
    }

    pub fn pickup_held(&self) -> bool {
        self.keys_pressed.contains(&KeyCode::KeyE)
    }

    /// Snapshot for one simulation frame.
    pub fn frame_input(&self) -> FrameInput {
        FrameInput {
            movement: self.movement_vector(),
            pickup_held: self.pickup_held(),
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_maps_to_axes() {
        let mut input = InputState::new();
        assert_eq!(input.movement_vector(), Vec2::ZERO);

        input.keys_pressed.insert(KeyCode::KeyW);
        input.keys_pressed.insert(KeyCode::KeyD);
        assert_eq!(
            input.movement_vector(),
            Vec2::new(PLAYER_WALKING_SPEED, -PLAYER_WALKING_SPEED)
        );
    }

    #[test]
    fn opposite_keys_resolve_down_right() {
        let mut input = InputState::new();
        input.keys_pressed.insert(KeyCode::KeyW);
        input.keys_pressed.insert(KeyCode::KeyS);
        assert_eq!(input.movement_vector().y, PLAYER_WALKING_SPEED);
    }

    #[test]
    fn pickup_tracks_the_e_key() {
        let mut input = InputState::new();
        assert!(!input.frame_input().pickup_held);
        input.keys_pressed.insert(KeyCode::KeyE);
        assert!(input.frame_input().pickup_held);
    }
}
