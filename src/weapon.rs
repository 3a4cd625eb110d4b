//! Weapon variants and their bullets.
//!
//! A single `Weapon` struct carries the shared state (position, equip flag,
//! damage) and a tagged variant for the behavior that differs: a melee axe
//! with a timed swing, or a pistol owning the bullets it has fired. The swing
//! is not an animation callback; it is a start timestamp, and the deflection
//! angle is a pure function of elapsed time, so cancelling is just clearing
//! the timestamp.

use glam::Vec2;
use rand::Rng;

use crate::constants::*;
use crate::enemy::Enemy;

pub struct Bullet {
    pub pos: Vec2,
    pub angle: f32,
    pub speed: f32,
    pub radius: f32,
    pub damage: i32,
}

impl Bullet {
    pub fn new(pos: Vec2, angle: f32) -> Self {
        Self {
            pos,
            angle,
            speed: BULLET_SPEED,
            radius: BULLET_RADIUS,
            damage: PISTOL_DAMAGE,
        }
    }

    /// One simulation step along the firing angle.
    pub fn advance(&mut self) {
        self.pos += Vec2::from_angle(self.angle) * self.speed;
    }

    pub fn hits(&self, enemy: &Enemy) -> bool {
        self.pos.distance(enemy.pos) < self.radius + enemy.radius
    }
}

pub enum WeaponKind {
    Axe {
        /// Set while a swing is in flight; cleared on completion or hit.
        swing_started_ms: Option<f64>,
    },
    Pistol {
        bullets: Vec<Bullet>,
    },
}

pub struct Weapon {
    pub pos: Vec2,
    pub equipped: bool,
    pub damage: i32,
    /// Melee reach, added to the enemy radius in the hit test.
    pub range: f32,
    pub kind: WeaponKind,
}

impl Weapon {
    pub fn axe(pos: Vec2) -> Self {
        Self {
            pos,
            equipped: false,
            damage: AXE_DAMAGE,
            range: AXE_RANGE,
            kind: WeaponKind::Axe {
                swing_started_ms: None,
            },
        }
    }

    pub fn pistol(pos: Vec2) -> Self {
        Self {
            pos,
            equipped: false,
            damage: PISTOL_DAMAGE,
            range: AXE_RANGE,
            kind: WeaponKind::Pistol {
                bullets: Vec::new(),
            },
        }
    }

    /// Random variant placed a fixed distance along the player's movement
    /// direction, like enemy spawning.
    pub fn spawn_ahead(origin: Vec2, direction: f32, rng: &mut impl Rng) -> Self {
        let pos = origin + Vec2::from_angle(direction) * SPAWN_DISTANCE;
        if rng.gen_range(0..2) == 0 {
            Self::axe(pos)
        } else {
            Self::pistol(pos)
        }
    }

    pub fn name(&self) -> &'static str {
        match self.kind {
            WeaponKind::Axe { .. } => "Axe",
            WeaponKind::Pistol { .. } => "Pistol",
        }
    }

    /// Begin an attack: start the swing, or fire one bullet from the attack
    /// origin along the aim angle.
    pub fn attack(&mut self, origin: Vec2, angle: f32, now_ms: f64) {
        match &mut self.kind {
            WeaponKind::Axe { swing_started_ms } => *swing_started_ms = Some(now_ms),
            WeaponKind::Pistol { bullets } => bullets.push(Bullet::new(origin, angle)),
        }
    }

    /// Blade deflection for the current swing, a pure function of elapsed
    /// time: 0 at the start, `MAX_SWING_ANGLE` at the end of the window, and
    /// 0 again once the swing has completed or been cancelled.
    pub fn swing_angle(&self, now_ms: f64) -> f32 {
        match &self.kind {
            WeaponKind::Axe {
                swing_started_ms: Some(start),
            } => {
                let progress = (now_ms - start) / SWING_DURATION_MS;
                if (0.0..1.0).contains(&progress) {
                    MAX_SWING_ANGLE * progress as f32
                } else {
                    0.0
                }
            }
            _ => 0.0,
        }
    }

    /// Per-step upkeep: retire finished swings, fly the bullets.
    pub fn step(&mut self, now_ms: f64) {
        match &mut self.kind {
            WeaponKind::Axe { swing_started_ms } => {
                if let Some(start) = *swing_started_ms {
                    if now_ms - start >= SWING_DURATION_MS {
                        *swing_started_ms = None;
                    }
                }
            }
            WeaponKind::Pistol { bullets } => {
                for bullet in bullets {
                    bullet.advance();
                }
            }
        }
    }

    /// Hit test against one enemy, reporting the damage to apply.
    ///
    /// Axe: a circular range test at the weapon position, live for the whole
    /// attack window regardless of swing progress; a hit also cancels the
    /// swing. Pistol: consumes the first live bullet that touches this enemy,
    /// at most one per call, and delivers that bullet's damage.
    pub fn try_hit(&mut self, enemy: &Enemy) -> Option<i32> {
        match &mut self.kind {
            WeaponKind::Axe { swing_started_ms } => {
                if self.pos.distance(enemy.pos) < self.range + enemy.radius {
                    *swing_started_ms = None;
                    Some(self.damage)
                } else {
                    None
                }
            }
            WeaponKind::Pistol { bullets } => {
                let i = bullets.iter().position(|b| b.hits(enemy))?;
                Some(bullets.remove(i).damage)
            }
        }
    }

    pub fn bullets(&self) -> &[Bullet] {
        match &self.kind {
            WeaponKind::Pistol { bullets } => bullets,
            WeaponKind::Axe { .. } => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pistol_attack_fires_one_bullet_that_advances() {
        let mut pistol = Weapon::pistol(Vec2::ZERO);
        pistol.attack(Vec2::ZERO, 0.0, 0.0);
        assert_eq!(pistol.bullets().len(), 1);

        pistol.step(16.0);
        let bullet = &pistol.bullets()[0];
        assert!((bullet.pos.x - 5.0).abs() < 1e-5);
        assert!(bullet.pos.y.abs() < 1e-5);
    }

    #[test]
    fn pistol_consumes_one_bullet_per_hit() {
        let mut pistol = Weapon::pistol(Vec2::ZERO);
        pistol.attack(Vec2::ZERO, 0.0, 0.0);
        pistol.attack(Vec2::ZERO, 0.0, 0.0);

        let enemy = Enemy::new(Vec2::new(3.0, 0.0));
        assert_eq!(pistol.try_hit(&enemy), Some(PISTOL_DAMAGE));
        assert_eq!(pistol.bullets().len(), 1, "only the first bullet is spent");
        assert!(pistol.try_hit(&enemy).is_some());
        assert!(pistol.try_hit(&enemy).is_none(), "no bullets left");
    }

    #[test]
    fn pistol_misses_leave_bullets_alone() {
        let mut pistol = Weapon::pistol(Vec2::ZERO);
        pistol.attack(Vec2::ZERO, 0.0, 0.0);

        let far = Enemy::new(Vec2::new(500.0, 0.0));
        assert!(pistol.try_hit(&far).is_none());
        assert_eq!(pistol.bullets().len(), 1);
    }

    #[test]
    fn swing_angle_tracks_elapsed_time() {
        let mut axe = Weapon::axe(Vec2::ZERO);
        assert_eq!(axe.swing_angle(0.0), 0.0);

        axe.attack(Vec2::ZERO, 0.0, 1000.0);
        assert_eq!(axe.swing_angle(1000.0), 0.0);
        let mid = axe.swing_angle(1250.0);
        assert!((mid - MAX_SWING_ANGLE * 0.5).abs() < 1e-5);

        // Completed swings read as zero even before step() retires them.
        assert_eq!(axe.swing_angle(1500.0), 0.0);
        axe.step(1500.0);
        assert!(matches!(
            axe.kind,
            WeaponKind::Axe {
                swing_started_ms: None
            }
        ));
    }

    #[test]
    fn axe_hit_ignores_swing_progress_and_cancels_it() {
        let mut axe = Weapon::axe(Vec2::ZERO);
        axe.attack(Vec2::ZERO, 0.0, 0.0);

        // No swing time has elapsed, but the hitbox is already live.
        let near = Enemy::new(Vec2::new(25.0, 0.0)); // 25 < range 20 + radius 10
        assert_eq!(axe.try_hit(&near), Some(AXE_DAMAGE));
        assert!(matches!(
            axe.kind,
            WeaponKind::Axe {
                swing_started_ms: None
            }
        ));

        let far = Enemy::new(Vec2::new(35.0, 0.0));
        assert!(axe.try_hit(&far).is_none());
    }

    #[test]
    fn spawn_ahead_places_at_fixed_distance() {
        let mut rng = rand::rngs::mock::StepRng::new(0, 0);
        let weapon = Weapon::spawn_ahead(Vec2::ZERO, std::f32::consts::FRAC_PI_2, &mut rng);
        assert!(weapon.pos.x.abs() < 1e-2);
        assert!((weapon.pos.y - SPAWN_DISTANCE).abs() < 1e-2);
    }
}
