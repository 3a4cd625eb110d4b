//! Game constants organized by category.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.

// =============================================================================
// WINDOW
// =============================================================================

/// Default window width
pub const WINDOW_DEFAULT_WIDTH: u32 = 1280;
/// Default window height
pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;
/// Window title
pub const WINDOW_TITLE: &str = "Dusk Survivor";

// =============================================================================
// PLAYER
// =============================================================================

/// Player's starting (and maximum) health
pub const PLAYER_STARTING_HEALTH: i32 = 100;
/// Per-axis walking speed in world units per frame
pub const PLAYER_WALKING_SPEED: f32 = 2.0;
/// Player body radius used for enemy contact tests
pub const PLAYER_RADIUS: f32 = 10.0;
/// Distance at which entities start fading into the dark
pub const PLAYER_VIEW_DISTANCE: f32 = 100.0;
/// Center-to-center radius for picking up a world weapon
pub const PICKUP_RADIUS: f32 = 15.0;
/// How long an attack keeps its hit window open (ms)
pub const ATTACK_WINDOW_MS: f64 = 500.0;
/// Player sprite quad size on screen (pixels)
pub const PLAYER_SPRITE_WIDTH: f32 = 24.0;
pub const PLAYER_SPRITE_HEIGHT: f32 = 30.0;

// =============================================================================
// ENEMIES
// =============================================================================

/// Enemy collision radius
pub const ENEMY_RADIUS: f32 = 10.0;
/// Enemy seek speed in world units per frame
pub const ENEMY_SPEED: f32 = 1.0;
/// Enemy starting health
pub const ENEMY_STARTING_HEALTH: i32 = 100;
/// Minimum time between two contact attacks from the same enemy (ms)
pub const ENEMY_ATTACK_COOLDOWN_MS: f64 = 1000.0;
/// Damage dealt by one enemy contact attack
pub const ENEMY_ATTACK_DAMAGE: i32 = 5;
/// Score credited to the player when an enemy dies
pub const ENEMY_POINT_VALUE: u32 = 10;

// =============================================================================
// WEAPONS
// =============================================================================

/// Axe damage per connecting frame
pub const AXE_DAMAGE: i32 = 10;
/// Axe reach, added to the enemy radius in the hit test
pub const AXE_RANGE: f32 = 20.0;
/// Maximum swing deflection of a melee blade (radians)
pub const MAX_SWING_ANGLE: f32 = std::f32::consts::PI / 15.0;
/// Melee swing duration; matches the attack window so the visual
/// animation and the hit window close together (ms)
pub const SWING_DURATION_MS: f64 = 500.0;
/// Pistol damage (carried by the bullets it fires)
pub const PISTOL_DAMAGE: i32 = 10;
/// Bullet speed in world units per simulation step
pub const BULLET_SPEED: f32 = 5.0;
/// Bullet collision radius
pub const BULLET_RADIUS: f32 = 2.0;

// =============================================================================
// SPAWNING
// =============================================================================

/// How far ahead of the player new entities appear
pub const SPAWN_DISTANCE: f32 = 400.0;
/// Per-frame probability of spawning an enemy
pub const ENEMY_SPAWN_CHANCE: f64 = 0.01;
/// Per-frame probability of spawning a weapon pickup
pub const WEAPON_SPAWN_CHANCE: f64 = 0.01;
/// Upper bound on live enemies
pub const ENEMY_POPULATION_CAP: usize = 25;
/// Upper bound on world weapon pickups
pub const WEAPON_POPULATION_CAP: usize = 5;

// =============================================================================
// SESSION
// =============================================================================

/// Countdown length: 13 minutes
pub const SESSION_SECONDS: u32 = 13 * 60;
/// Minimum time between pause toggles, so key-repeat can't double-fire (ms)
pub const PAUSE_DEBOUNCE_MS: f64 = 300.0;

// =============================================================================
// FOG / VISIBILITY
// =============================================================================

/// Distance over which fog opacity falls from 1 to 0 past the view distance
pub const FOG_FALLOFF: f32 = 100.0;
/// Radius of the on-screen visibility gradient, in view distances
pub const GRADIENT_RADIUS_FACTOR: f32 = 2.0;

// =============================================================================
// BACKDROP
// =============================================================================

/// Seed for the deterministic speckle pattern
pub const BACKDROP_SEED: u32 = 12345;
/// Side length of one repeating pattern tile (world units)
pub const BACKDROP_PATTERN_SIZE: f32 = 800.0;
/// Speckle points per pattern tile
pub const BACKDROP_POINT_COUNT: usize = 2000;
/// Speckle point radius (pixels)
pub const BACKDROP_POINT_RADIUS: f32 = 2.0;

// =============================================================================
// UI
// =============================================================================

/// Enemy health bar size (pixels)
pub const ENEMY_HEALTH_BAR_WIDTH: f32 = 50.0;
pub const ENEMY_HEALTH_BAR_HEIGHT: f32 = 5.0;
/// Gap between the top of an enemy and its health bar
pub const ENEMY_HEALTH_BAR_OFFSET: f32 = 10.0;
