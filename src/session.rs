//! Session state and the per-frame simulation step.
//!
//! The session is the single owner of all mutable game state: the player,
//! the enemy collection, the world weapon pickups, the pause/end state
//! machine and the countdown. Every frame the app shell calls
//! [`Session::frame`] with the sampled input, the clock and a random source;
//! nothing else mutates the world.

use glam::Vec2;
use rand::Rng;

use crate::constants::*;
use crate::enemy::Enemy;
use crate::events::{EndReason, EventQueue, GameEvent};
use crate::player::Player;
use crate::weapon::Weapon;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Paused,
    Ended,
}

/// Input sampled once per frame by the app shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Movement vector already scaled by the walking speed.
    pub movement: Vec2,
    /// Pickup key held this frame.
    pub pickup_held: bool,
}

pub struct Session {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// Unequipped weapons lying in the world.
    pub weapons: Vec<Weapon>,
    pub state: SessionState,
    pub remaining_secs: u32,
    pub end_reason: Option<EndReason>,
    pub events: EventQueue,
    last_countdown_ms: f64,
    last_pause_toggle_ms: f64,
}

impl Session {
    pub fn new() -> Self {
        Self {
            player: Player::new(Vec2::ZERO),
            enemies: Vec::new(),
            weapons: Vec::new(),
            state: SessionState::Running,
            remaining_secs: SESSION_SECONDS,
            end_reason: None,
            events: EventQueue::new(),
            last_countdown_ms: 0.0,
            last_pause_toggle_ms: f64::NEG_INFINITY,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// Flip Running <-> Paused. Debounced by a cooldown so a held pause key
    /// repeating at the OS rate cannot double-toggle. Ignored once ended.
    pub fn toggle_pause(&mut self, now_ms: f64) {
        if self.state == SessionState::Ended {
            return;
        }
        if now_ms - self.last_pause_toggle_ms < PAUSE_DEBOUNCE_MS {
            return;
        }
        self.last_pause_toggle_ms = now_ms;
        self.state = match self.state {
            SessionState::Running => SessionState::Paused,
            SessionState::Paused => SessionState::Running,
            SessionState::Ended => SessionState::Ended,
        };
    }

    /// Resume from an explicit menu action; not debounced.
    pub fn resume(&mut self) {
        if self.state == SessionState::Paused {
            self.state = SessionState::Running;
        }
    }

    /// Terminal transition. Idempotent: repeat calls while already ended
    /// change nothing.
    pub fn end(&mut self, reason: EndReason) {
        if self.state == SessionState::Ended {
            return;
        }
        self.state = SessionState::Ended;
        self.end_reason = Some(reason);
        self.events.push(GameEvent::SessionEnded { reason });
    }

    /// Back to a fresh Running session: player at the origin with full
    /// health, empty collections, full countdown.
    pub fn restart(&mut self, now_ms: f64) {
        self.player = Player::new(Vec2::ZERO);
        self.enemies.clear();
        self.weapons.clear();
        self.state = SessionState::Running;
        self.remaining_secs = SESSION_SECONDS;
        self.end_reason = None;
        self.last_countdown_ms = now_ms;
    }

    /// Attack trigger from the pointer. Suspended sessions swallow it.
    pub fn player_attack(&mut self, screen_center: Vec2, now_ms: f64) {
        if self.is_running() {
            self.player.attack(screen_center, now_ms);
        }
    }

    /// One simulation step, in the fixed order the loop has always run:
    /// movement, weapon upkeep, pickups, the enemy pass, the death sweep,
    /// spawning, countdown. Rendering happens elsewhere and always.
    pub fn frame(&mut self, input: &FrameInput, now_ms: f64, rng: &mut impl Rng) {
        puffin::profile_function!();

        if self.is_running() {
            self.player.update_position(input.movement.x, input.movement.y);
        }

        self.step_weapons(now_ms);

        if input.pickup_held {
            self.try_pickup();
        }

        self.enemy_pass(now_ms);
        self.sweep_dead_enemies();

        if self.player.health <= 0 {
            self.end(EndReason::PlayerDied);
        }

        if self.is_running() {
            self.roll_spawns(rng);
        }

        self.tick_countdown(now_ms);
    }

    /// Equipped weapons track the player; swings retire and bullets fly
    /// only while the session is running.
    fn step_weapons(&mut self, now_ms: f64) {
        if self.is_running() {
            if let Some(weapon) = &mut self.player.weapon {
                weapon.step(now_ms);
            }
            // Dropped pistols keep their in-flight bullets; those keep
            // flying too, they just never connect (only the equipped weapon
            // is consulted for damage).
            for weapon in &mut self.weapons {
                weapon.step(now_ms);
            }
        }
        if let Some(weapon) = &mut self.player.weapon {
            weapon.pos = self.player.pos;
        }
    }

    /// Transfer the first colliding world weapon to the player, dropping any
    /// held weapon back into the world at the player's position.
    fn try_pickup(&mut self) {
        let Some(index) = self
            .weapons
            .iter()
            .position(|w| self.player.collides_with(w))
        else {
            return;
        };
        let weapon = self.weapons.remove(index);
        let name = weapon.name();
        let dropped = self.player.pick_up_weapon(weapon);
        let swapped = dropped.is_some();
        if let Some(old) = dropped {
            self.weapons.push(old);
        }
        self.events.push(GameEvent::WeaponPickedUp { name, swapped });
    }

    /// Seek, weapon damage, contact damage - one pass over the enemies.
    fn enemy_pass(&mut self, now_ms: f64) {
        let running = self.is_running();
        let attacking = self.player.is_attacking(now_ms);
        let player_pos = self.player.pos;

        for enemy in &mut self.enemies {
            if running {
                enemy.seek(player_pos);
            }

            if running && attacking {
                if let Some(weapon) = &mut self.player.weapon {
                    if let Some(damage) = weapon.try_hit(enemy) {
                        enemy.apply_damage(damage);
                    }
                }
            }

            if running && enemy.try_contact_attack(player_pos, now_ms) {
                self.player.take_damage(enemy.attack_damage);
                self.events.push(GameEvent::PlayerDamaged {
                    amount: enemy.attack_damage,
                    health_after: self.player.health,
                });
            }
        }
    }

    /// Remove dead enemies and credit their points, after the iteration pass
    /// so nothing is spliced out from under the enemy loop. Safe to call
    /// again: already-removed enemies are simply gone.
    fn sweep_dead_enemies(&mut self) {
        let mut slain = Vec::new();
        self.enemies.retain(|enemy| {
            if enemy.is_dead() {
                slain.push((enemy.points, enemy.pos));
                false
            } else {
                true
            }
        });
        for (points, pos) in slain {
            self.player.add_score(points);
            self.events.push(GameEvent::EnemySlain { pos, points });
        }
    }

    fn roll_spawns(&mut self, rng: &mut impl Rng) {
        if self.enemies.len() < ENEMY_POPULATION_CAP && rng.gen::<f64>() < ENEMY_SPAWN_CHANCE {
            let enemy = Enemy::spawn_ahead(self.player.pos, self.player.direction());
            self.events.push(GameEvent::EnemySpawned { pos: enemy.pos });
            self.enemies.push(enemy);
        }
        if self.weapons.len() < WEAPON_POPULATION_CAP && rng.gen::<f64>() < WEAPON_SPAWN_CHANCE {
            let weapon = Weapon::spawn_ahead(self.player.pos, self.player.direction(), rng);
            self.events.push(GameEvent::WeaponSpawned {
                name: weapon.name(),
                pos: weapon.pos,
            });
            self.weapons.push(weapon);
        }
    }

    /// One decrement per elapsed wall second while running; the clock is
    /// frozen (re-anchored) while paused or ended. Hitting zero ends the
    /// session.
    fn tick_countdown(&mut self, now_ms: f64) {
        if !self.is_running() {
            self.last_countdown_ms = now_ms;
            return;
        }
        while now_ms - self.last_countdown_ms >= 1000.0 {
            self.last_countdown_ms += 1000.0;
            if self.remaining_secs > 0 {
                self.remaining_secs -= 1;
            }
            if self.remaining_secs == 0 {
                self.end(EndReason::TimeUp);
                return;
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    /// An rng whose `gen::<f64>()` is ~1.0, so no spawn roll ever passes.
    fn quiet_rng() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    /// An rng whose `gen::<f64>()` is 0.0, so every spawn roll passes.
    fn eager_rng() -> StepRng {
        StepRng::new(0, 0)
    }

    fn idle() -> FrameInput {
        FrameInput::default()
    }

    #[test]
    fn killing_an_enemy_scores_exactly_once() {
        let mut session = Session::new();
        session.enemies.push(Enemy::new(Vec2::new(500.0, 0.0)));
        session.enemies[0].apply_damage(ENEMY_STARTING_HEALTH);

        session.sweep_dead_enemies();
        assert!(session.enemies.is_empty());
        assert_eq!(session.player.score, ENEMY_POINT_VALUE);

        // Sweeping again is a no-op: no crash, no extra score.
        session.sweep_dead_enemies();
        assert_eq!(session.player.score, ENEMY_POINT_VALUE);
    }

    #[test]
    fn melee_attack_kills_adjacent_enemy_through_the_frame_loop() {
        let mut session = Session::new();
        session.player.pick_up_weapon(Weapon::axe(Vec2::ZERO));
        let mut enemy = Enemy::new(Vec2::new(15.0, 0.0));
        enemy.health = AXE_DAMAGE; // one connecting frame kills it
        session.enemies.push(enemy);

        session.player_attack(Vec2::new(400.0, 300.0), 0.0);
        session.frame(&idle(), 16.0, &mut quiet_rng());

        assert!(session.enemies.is_empty());
        assert_eq!(session.player.score, ENEMY_POINT_VALUE);
    }

    #[test]
    fn contact_damage_reaches_the_player_once_per_cooldown() {
        let mut session = Session::new();
        session.enemies.push(Enemy::new(Vec2::new(5.0, 0.0)));

        session.frame(&idle(), 0.0, &mut quiet_rng());
        assert_eq!(session.player.health, PLAYER_STARTING_HEALTH - ENEMY_ATTACK_DAMAGE);

        // Enemy is still on top of the player but the cooldown holds.
        session.frame(&idle(), 500.0, &mut quiet_rng());
        assert_eq!(session.player.health, PLAYER_STARTING_HEALTH - ENEMY_ATTACK_DAMAGE);

        session.frame(&idle(), 1500.0, &mut quiet_rng());
        assert_eq!(
            session.player.health,
            PLAYER_STARTING_HEALTH - 2 * ENEMY_ATTACK_DAMAGE
        );
    }

    #[test]
    fn player_death_ends_the_session_idempotently() {
        let mut session = Session::new();
        session.player.health = 1;
        session.enemies.push(Enemy::new(Vec2::ZERO));

        session.frame(&idle(), 0.0, &mut quiet_rng());
        assert_eq!(session.state, SessionState::Ended);
        assert_eq!(session.end_reason, Some(EndReason::PlayerDied));

        // A second end for a different reason must not overwrite anything.
        session.end(EndReason::TimeUp);
        assert_eq!(session.end_reason, Some(EndReason::PlayerDied));
    }

    #[test]
    fn countdown_reaching_zero_ends_and_suspends() {
        let mut session = Session::new();
        session.restart(0.0);
        session.remaining_secs = 1;

        session.frame(&idle(), 1000.0, &mut quiet_rng());
        assert_eq!(session.state, SessionState::Ended);
        assert_eq!(session.end_reason, Some(EndReason::TimeUp));

        // Movement is suspended on subsequent frames.
        let input = FrameInput {
            movement: Vec2::new(PLAYER_WALKING_SPEED, 0.0),
            pickup_held: false,
        };
        session.frame(&input, 2000.0, &mut quiet_rng());
        assert_eq!(session.player.pos, Vec2::ZERO);
    }

    #[test]
    fn pause_suspends_movement_enemies_and_spawning() {
        let mut session = Session::new();
        session.enemies.push(Enemy::new(Vec2::new(200.0, 0.0)));
        session.toggle_pause(0.0);
        assert_eq!(session.state, SessionState::Paused);

        let input = FrameInput {
            movement: Vec2::new(PLAYER_WALKING_SPEED, 0.0),
            pickup_held: false,
        };
        session.frame(&input, 16.0, &mut eager_rng());

        assert_eq!(session.player.pos, Vec2::ZERO);
        assert_eq!(session.enemies.len(), 1);
        assert_eq!(session.enemies[0].pos, Vec2::new(200.0, 0.0));
        assert!(session.weapons.is_empty(), "no spawns while paused");
    }

    #[test]
    fn pause_toggle_is_debounced() {
        let mut session = Session::new();
        session.toggle_pause(1000.0);
        assert_eq!(session.state, SessionState::Paused);

        // Key repeat inside the debounce window is swallowed.
        session.toggle_pause(1100.0);
        assert_eq!(session.state, SessionState::Paused);

        session.toggle_pause(1000.0 + PAUSE_DEBOUNCE_MS);
        assert_eq!(session.state, SessionState::Running);
    }

    #[test]
    fn bullets_freeze_while_paused() {
        let mut session = Session::new();
        session.player.pick_up_weapon(Weapon::pistol(Vec2::ZERO));
        session.player_attack(Vec2::new(500.0, 300.0), 0.0);

        session.toggle_pause(0.0);
        session.frame(&idle(), 16.0, &mut quiet_rng());
        let pos = session.player.weapon.as_ref().unwrap().bullets()[0].pos;
        assert_eq!(pos, Vec2::ZERO);

        session.toggle_pause(PAUSE_DEBOUNCE_MS);
        session.frame(&idle(), PAUSE_DEBOUNCE_MS + 16.0, &mut quiet_rng());
        let pos = session.player.weapon.as_ref().unwrap().bullets()[0].pos;
        assert!((pos.x - BULLET_SPEED).abs() < 1e-5);
    }

    #[test]
    fn spawns_respect_population_caps() {
        let mut session = Session::new();
        for _ in 0..ENEMY_POPULATION_CAP {
            session.enemies.push(Enemy::new(Vec2::new(1000.0, 0.0)));
        }
        for _ in 0..WEAPON_POPULATION_CAP {
            session.weapons.push(Weapon::axe(Vec2::new(1000.0, 0.0)));
        }

        session.frame(&idle(), 16.0, &mut eager_rng());
        assert_eq!(session.enemies.len(), ENEMY_POPULATION_CAP);
        assert_eq!(session.weapons.len(), WEAPON_POPULATION_CAP);
    }

    #[test]
    fn eager_rolls_spawn_ahead_of_travel() {
        let mut session = Session::new();
        let input = FrameInput {
            movement: Vec2::new(PLAYER_WALKING_SPEED, 0.0),
            pickup_held: false,
        };
        session.frame(&input, 16.0, &mut eager_rng());

        assert_eq!(session.enemies.len(), 1);
        let enemy_pos = session.enemies[0].pos;
        assert!(
            (enemy_pos.x - (session.player.pos.x + SPAWN_DISTANCE)).abs() < 1e-2,
            "spawned ahead along +x travel"
        );
    }

    #[test]
    fn pickup_swaps_weapons_through_the_frame_loop() {
        let mut session = Session::new();
        session.player.pick_up_weapon(Weapon::pistol(Vec2::ZERO));
        session.weapons.push(Weapon::axe(Vec2::new(5.0, 0.0)));

        let input = FrameInput {
            movement: Vec2::ZERO,
            pickup_held: true,
        };
        session.frame(&input, 16.0, &mut quiet_rng());

        assert!(matches!(
            session.player.weapon.as_ref().map(|w| w.name()),
            Some("Axe")
        ));
        assert_eq!(session.weapons.len(), 1, "pistol dropped back into the world");
        assert_eq!(session.weapons[0].name(), "Pistol");
        assert!(!session.weapons[0].equipped);
    }

    #[test]
    fn restart_resets_everything() {
        let mut session = Session::new();
        session.player.update_position(50.0, 0.0);
        session.player.take_damage(100);
        session.enemies.push(Enemy::new(Vec2::ZERO));
        session.weapons.push(Weapon::axe(Vec2::ZERO));
        session.end(EndReason::PlayerDied);

        session.restart(5000.0);
        assert_eq!(session.state, SessionState::Running);
        assert_eq!(session.player.pos, Vec2::ZERO);
        assert_eq!(session.player.health, PLAYER_STARTING_HEALTH);
        assert_eq!(session.player.score, 0);
        assert!(session.player.weapon.is_none());
        assert!(session.enemies.is_empty());
        assert!(session.weapons.is_empty());
        assert_eq!(session.remaining_secs, SESSION_SECONDS);
        assert!(session.end_reason.is_none());
    }

    #[test]
    fn equipped_weapon_tracks_the_player() {
        let mut session = Session::new();
        session.player.pick_up_weapon(Weapon::axe(Vec2::ZERO));

        let input = FrameInput {
            movement: Vec2::new(PLAYER_WALKING_SPEED, 0.0),
            pickup_held: false,
        };
        session.frame(&input, 16.0, &mut quiet_rng());
        assert_eq!(
            session.player.weapon.as_ref().unwrap().pos,
            session.player.pos
        );
    }
}
