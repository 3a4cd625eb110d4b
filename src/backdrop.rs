//! Speckle backdrop pattern.
//!
//! One tile of points is generated up front from the seeded [`PatternRng`]
//! and repeated across the infinite field, so the ground texture is stable
//! across frames and sessions and scrolls with the player.

use glam::Vec2;

use crate::constants::{BACKDROP_PATTERN_SIZE, BACKDROP_POINT_COUNT, BACKDROP_SEED};
use crate::rng::PatternRng;

pub struct Backdrop {
    points: Vec<Vec2>,
}

impl Backdrop {
    pub fn new() -> Self {
        let mut rng = PatternRng::new(BACKDROP_SEED);
        let points = (0..BACKDROP_POINT_COUNT)
            .map(|_| {
                let x = rng.next() as f32 * BACKDROP_PATTERN_SIZE;
                let y = rng.next() as f32 * BACKDROP_PATTERN_SIZE;
                Vec2::new(x, y)
            })
            .collect();
        Self { points }
    }

    /// Points inside one pattern tile, in [0, BACKDROP_PATTERN_SIZE)².
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }
}

impl Default for Backdrop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_is_deterministic() {
        let a = Backdrop::new();
        let b = Backdrop::new();
        assert_eq!(a.points().len(), BACKDROP_POINT_COUNT);
        assert_eq!(a.points(), b.points());
    }

    #[test]
    fn points_fit_in_one_tile() {
        for p in Backdrop::new().points() {
            assert!(p.x >= 0.0 && p.x < BACKDROP_PATTERN_SIZE);
            assert!(p.y >= 0.0 && p.y < BACKDROP_PATTERN_SIZE);
        }
    }
}
