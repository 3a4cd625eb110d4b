//! Enemies: simple seekers that damage the player on contact.

use glam::Vec2;

use crate::constants::*;

pub struct Enemy {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub health: i32,
    /// Score credited to the player when this enemy dies.
    pub points: u32,
    pub attack_damage: i32,
    attack_cooldown_ms: f64,
    last_attack_ms: f64,
}

impl Enemy {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: ENEMY_RADIUS,
            speed: ENEMY_SPEED,
            health: ENEMY_STARTING_HEALTH,
            points: ENEMY_POINT_VALUE,
            attack_damage: ENEMY_ATTACK_DAMAGE,
            attack_cooldown_ms: ENEMY_ATTACK_COOLDOWN_MS,
            last_attack_ms: f64::NEG_INFINITY,
        }
    }

    /// Spawn-ahead placement: a fixed distance from `origin` along the
    /// direction angle the player last moved in.
    pub fn spawn_ahead(origin: Vec2, direction: f32) -> Self {
        Self::new(origin + Vec2::from_angle(direction) * SPAWN_DISTANCE)
    }

    /// Advance one step straight toward the target. No pathfinding, no
    /// avoidance; enemies happily overlap each other.
    pub fn seek(&mut self, target: Vec2) {
        let angle = (target.y - self.pos.y).atan2(target.x - self.pos.x);
        self.pos += Vec2::from_angle(angle) * self.speed;
    }

    pub fn apply_damage(&mut self, damage: i32) {
        self.health -= damage;
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Contact test against the player body. Reports true at most once per
    /// cooldown window; this is the only gate against damage spam.
    pub fn try_contact_attack(&mut self, player_pos: Vec2, now_ms: f64) -> bool {
        let touching = self.pos.distance(player_pos) < self.radius + PLAYER_RADIUS;
        if touching && now_ms - self.last_attack_ms > self.attack_cooldown_ms {
            self.last_attack_ms = now_ms;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seek_moves_straight_at_target() {
        let mut enemy = Enemy::new(Vec2::ZERO);
        enemy.seek(Vec2::new(10.0, 0.0));
        assert!((enemy.pos.x - ENEMY_SPEED).abs() < 1e-5);
        assert!(enemy.pos.y.abs() < 1e-5);

        let before = enemy.pos.distance(Vec2::new(10.0, 0.0));
        enemy.seek(Vec2::new(10.0, 0.0));
        assert!(enemy.pos.distance(Vec2::new(10.0, 0.0)) < before);
    }

    #[test]
    fn spawn_ahead_lands_on_the_movement_ray() {
        let enemy = Enemy::spawn_ahead(Vec2::new(5.0, 5.0), 0.0);
        assert!((enemy.pos.x - (5.0 + SPAWN_DISTANCE)).abs() < 1e-3);
        assert!((enemy.pos.y - 5.0).abs() < 1e-3);
    }

    #[test]
    fn contact_attack_respects_cooldown() {
        let mut enemy = Enemy::new(Vec2::ZERO);
        let player = Vec2::new(5.0, 0.0); // well inside radius + PLAYER_RADIUS

        assert!(enemy.try_contact_attack(player, 0.0));
        assert!(!enemy.try_contact_attack(player, 500.0), "still cooling down");
        assert!(enemy.try_contact_attack(player, 1500.0));
    }

    #[test]
    fn contact_attack_requires_touching() {
        let mut enemy = Enemy::new(Vec2::ZERO);
        assert!(!enemy.try_contact_attack(Vec2::new(100.0, 0.0), 0.0));
        // The miss must not consume the cooldown.
        assert!(enemy.try_contact_attack(Vec2::new(5.0, 0.0), 1.0));
    }

    #[test]
    fn damage_accumulates_to_death() {
        let mut enemy = Enemy::new(Vec2::ZERO);
        for _ in 0..8 {
            enemy.apply_damage(10);
        }
        assert_eq!(enemy.health, 20);
        assert!(!enemy.is_dead());

        enemy.apply_damage(20);
        assert!(enemy.is_dead());
    }
}
