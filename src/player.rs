//! The player: movement, health, score, and the one weapon slot.

use glam::Vec2;

use crate::constants::*;
use crate::weapon::Weapon;

pub struct Player {
    pub pos: Vec2,
    pub health: i32,
    pub score: u32,
    /// Exclusively owned; at most one weapon is ever equipped.
    pub weapon: Option<Weapon>,
    /// Start of the current attack window, if one is open.
    attack_started_ms: Option<f64>,
    /// Last movement vector; doubles as the spawn-ahead direction.
    pub facing: Vec2,
    /// Pointer position in screen pixels.
    pub pointer: Vec2,
    pub view_distance: f32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            health: PLAYER_STARTING_HEALTH,
            score: 0,
            weapon: None,
            attack_started_ms: None,
            facing: Vec2::ZERO,
            pointer: Vec2::ZERO,
            view_distance: PLAYER_VIEW_DISTANCE,
        }
    }

    /// Unconditionally applies the offset and records it as the facing
    /// vector. The session gates this on the pause state, not the player.
    pub fn update_position(&mut self, dx: f32, dy: f32) {
        self.pos += Vec2::new(dx, dy);
        self.facing = Vec2::new(dx, dy);
    }

    /// Angle of the last movement vector. An idle player faces east, since
    /// atan2(0, 0) is 0.
    pub fn direction(&self) -> f32 {
        self.facing.y.atan2(self.facing.x)
    }

    pub fn take_damage(&mut self, damage: i32) {
        self.health -= damage;
    }

    pub fn add_score(&mut self, points: u32) {
        self.score += points;
    }

    /// Pickup proximity test against a world weapon.
    pub fn collides_with(&self, weapon: &Weapon) -> bool {
        self.pos.distance(weapon.pos) < PICKUP_RADIUS
    }

    /// Equip `weapon`, returning the previously held one (if any) unequipped
    /// and relocated to the player's current position, ready to be dropped
    /// back into the world collection.
    pub fn pick_up_weapon(&mut self, mut weapon: Weapon) -> Option<Weapon> {
        let dropped = self.weapon.take().map(|mut old| {
            old.equipped = false;
            old.pos = self.pos;
            old
        });
        weapon.equipped = true;
        weapon.pos = self.pos;
        self.weapon = Some(weapon);
        dropped
    }

    /// Open the attack window and trigger the weapon. A no-op when unarmed.
    pub fn attack(&mut self, screen_center: Vec2, now_ms: f64) {
        let origin = self.pos;
        let angle = self.aim_angle(screen_center);
        if let Some(weapon) = &mut self.weapon {
            self.attack_started_ms = Some(now_ms);
            weapon.attack(origin, angle, now_ms);
        }
    }

    /// True while the attack window is open; the window and the melee swing
    /// share the same start and duration.
    pub fn is_attacking(&self, now_ms: f64) -> bool {
        self.attack_started_ms
            .is_some_and(|start| now_ms - start < ATTACK_WINDOW_MS)
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
    }

    /// Aim: the angle from the screen center (where the player renders) to
    /// the last recorded pointer position.
    pub fn aim_angle(&self, screen_center: Vec2) -> f32 {
        (self.pointer.y - screen_center.y).atan2(self.pointer.x - screen_center.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weapon::WeaponKind;

    #[test]
    fn movement_records_facing() {
        let mut player = Player::new(Vec2::ZERO);
        player.update_position(2.0, 0.0);
        player.update_position(2.0, 0.0);
        assert_eq!(player.pos, Vec2::new(4.0, 0.0));
        assert_eq!(player.facing, Vec2::new(2.0, 0.0));
        assert_eq!(player.direction(), 0.0);
    }

    #[test]
    fn weapon_collision_is_a_fixed_radius() {
        let player = Player::new(Vec2::ZERO);
        assert!(player.collides_with(&Weapon::axe(Vec2::new(10.0, 0.0))));
        assert!(!player.collides_with(&Weapon::axe(Vec2::new(20.0, 0.0))));
    }

    #[test]
    fn pick_up_swaps_and_drops_in_place() {
        let mut player = Player::new(Vec2::ZERO);
        assert!(player.pick_up_weapon(Weapon::axe(Vec2::new(5.0, 0.0))).is_none());
        assert!(player.weapon.as_ref().is_some_and(|w| w.equipped));

        player.update_position(30.0, 0.0);
        let dropped = player
            .pick_up_weapon(Weapon::pistol(Vec2::new(31.0, 0.0)))
            .expect("old weapon handed back");

        assert!(!dropped.equipped);
        assert_eq!(dropped.pos, Vec2::new(30.0, 0.0), "dropped where the player stood");
        assert!(matches!(dropped.kind, WeaponKind::Axe { .. }));
        assert!(matches!(
            player.weapon.as_ref().map(|w| &w.kind),
            Some(WeaponKind::Pistol { .. })
        ));
    }

    #[test]
    fn unarmed_attack_is_a_no_op() {
        let mut player = Player::new(Vec2::ZERO);
        player.attack(Vec2::new(400.0, 300.0), 0.0);
        assert!(!player.is_attacking(0.0));
    }

    #[test]
    fn attack_window_opens_and_expires() {
        let mut player = Player::new(Vec2::ZERO);
        player.pick_up_weapon(Weapon::axe(Vec2::ZERO));

        player.attack(Vec2::new(400.0, 300.0), 1000.0);
        assert!(player.is_attacking(1000.0));
        assert!(player.is_attacking(1499.0));
        assert!(!player.is_attacking(1500.0));
    }

    #[test]
    fn aim_angle_points_from_screen_center_to_pointer() {
        let mut player = Player::new(Vec2::ZERO);
        let center = Vec2::new(400.0, 300.0);

        player.set_pointer(400.0, 200.0);
        assert!((player.aim_angle(center) + std::f32::consts::FRAC_PI_2).abs() < 1e-5);

        player.set_pointer(500.0, 300.0);
        assert!(player.aim_angle(center).abs() < 1e-5);
    }
}
