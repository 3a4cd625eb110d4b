//! Frame composition: turns session state into renderer batches.
//!
//! Draw order matches the original loop: visibility gradient, backdrop
//! speckle, player sprite, weapons, enemies with their health bars, bullets.
//! The egui chrome paints on top of all of it afterwards.

use glam::Vec2;

use crate::backdrop::Backdrop;
use crate::camera::Camera;
use crate::constants::*;
use crate::renderer::{rotate_around, Renderer};
use crate::session::Session;
use crate::sprite::PlayerSprite;
use crate::weapon::{Weapon, WeaponKind};

const GRADIENT_COLOR: [f32; 4] = [0.55, 0.55, 0.55, 0.5];
const BACKDROP_COLOR: [f32; 4] = [0.08, 0.07, 0.035, 0.5];
const ENEMY_COLOR: [f32; 3] = [1.0, 0.0, 0.0];
const BULLET_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
const PLAYER_FALLBACK_COLOR: [f32; 4] = [0.15, 0.2, 0.45, 1.0];
const AXE_HANDLE_COLOR: [f32; 3] = [0.0, 0.47, 0.47];
const AXE_BLADE_COLOR: [f32; 3] = [0.47, 0.47, 0.47];
const PISTOL_COLOR: [f32; 3] = [0.0, 0.0, 0.0];

/// Distance-based alpha falloff: fully visible inside the view distance,
/// fading to nothing over the falloff band beyond it.
pub fn fog_opacity(distance: f32, view_distance: f32) -> f32 {
    (1.0 - (distance - view_distance) / FOG_FALLOFF).clamp(0.0, 1.0)
}

pub fn draw_session(
    renderer: &mut Renderer,
    camera: &Camera,
    session: &Session,
    backdrop: &Backdrop,
    sprite: Option<&PlayerSprite>,
    now_ms: f64,
) {
    puffin::profile_function!();

    let focus = session.player.pos;
    let view_distance = session.player.view_distance;

    renderer.begin_frame();
    renderer.draw_visibility_gradient(
        camera,
        view_distance * GRADIENT_RADIUS_FACTOR,
        GRADIENT_COLOR,
    );

    {
        puffin::profile_scope!("backdrop");
        draw_backdrop(renderer, camera, backdrop, focus);
        renderer.flush_circles(camera);
    }

    {
        puffin::profile_scope!("player");
        match sprite {
            Some(sprite) => renderer.draw_sprite(
                camera,
                sprite.current(now_ms),
                camera.center(),
                Vec2::new(PLAYER_SPRITE_WIDTH, PLAYER_SPRITE_HEIGHT),
            ),
            None => {
                renderer.push_circle(camera.center(), PLAYER_RADIUS, PLAYER_FALLBACK_COLOR);
                renderer.flush_circles(camera);
            }
        }
    }

    {
        puffin::profile_scope!("weapons");
        let aim = session.player.aim_angle(camera.center());
        for weapon in &session.weapons {
            draw_weapon(renderer, camera, weapon, focus, view_distance, aim, now_ms);
        }
        if let Some(weapon) = &session.player.weapon {
            draw_weapon(renderer, camera, weapon, focus, view_distance, aim, now_ms);
        }
        renderer.flush_shapes(camera);
    }

    {
        puffin::profile_scope!("enemies");
        for enemy in &session.enemies {
            let screen = camera.world_to_screen(enemy.pos, focus);
            let opacity = fog_opacity(enemy.pos.distance(focus), view_distance);
            renderer.push_circle(
                screen,
                enemy.radius,
                [ENEMY_COLOR[0], ENEMY_COLOR[1], ENEMY_COLOR[2], opacity],
            );
            draw_enemy_health_bar(renderer, screen, enemy.radius, enemy.health, opacity);
        }

        for weapon in session
            .weapons
            .iter()
            .chain(session.player.weapon.as_ref())
        {
            for bullet in weapon.bullets() {
                let screen = camera.world_to_screen(bullet.pos, focus);
                renderer.push_circle(screen, bullet.radius, BULLET_COLOR);
            }
        }

        renderer.flush_circles(camera);
        renderer.flush_shapes(camera);
    }
}

/// Repeat the speckle tile across the visible band of the infinite field.
fn draw_backdrop(renderer: &mut Renderer, camera: &Camera, backdrop: &Backdrop, focus: Vec2) {
    let center = camera.center();
    let min = focus - center;
    let max = focus + center;

    let tile_min_x = (min.x / BACKDROP_PATTERN_SIZE).floor() as i32;
    let tile_max_x = (max.x / BACKDROP_PATTERN_SIZE).floor() as i32;
    let tile_min_y = (min.y / BACKDROP_PATTERN_SIZE).floor() as i32;
    let tile_max_y = (max.y / BACKDROP_PATTERN_SIZE).floor() as i32;

    for ty in tile_min_y..=tile_max_y {
        for tx in tile_min_x..=tile_max_x {
            let origin = Vec2::new(tx as f32, ty as f32) * BACKDROP_PATTERN_SIZE;
            for point in backdrop.points() {
                let screen = camera.world_to_screen(origin + *point, focus);
                renderer.push_circle(screen, BACKDROP_POINT_RADIUS, BACKDROP_COLOR);
            }
        }
    }
}

fn draw_enemy_health_bar(
    renderer: &mut Renderer,
    enemy_screen: Vec2,
    enemy_radius: f32,
    health: i32,
    opacity: f32,
) {
    let top_left = Vec2::new(
        enemy_screen.x - ENEMY_HEALTH_BAR_WIDTH / 2.0,
        enemy_screen.y - enemy_radius - ENEMY_HEALTH_BAR_OFFSET,
    );
    let size = Vec2::new(ENEMY_HEALTH_BAR_WIDTH, ENEMY_HEALTH_BAR_HEIGHT);
    let fraction = (health.max(0) as f32 / ENEMY_STARTING_HEALTH as f32).min(1.0);

    renderer.push_rect(top_left, size, [1.0, 1.0, 1.0, opacity]);
    renderer.push_rect(
        top_left,
        Vec2::new(size.x * fraction, size.y),
        [0.0, 1.0, 0.0, opacity],
    );
    renderer.push_rect_outline(top_left, size, 1.0, [0.0, 0.0, 0.0, opacity]);
}

/// Weapon bodies, built from rects and triangles rotated around the weapon
/// position by the swing angle plus the shared aim angle (every weapon on
/// screen tracks the pointer, equipped or not).
fn draw_weapon(
    renderer: &mut Renderer,
    camera: &Camera,
    weapon: &Weapon,
    focus: Vec2,
    view_distance: f32,
    aim: f32,
    now_ms: f64,
) {
    let (screen, opacity) = if weapon.equipped {
        (camera.center(), 1.0)
    } else {
        (
            camera.world_to_screen(weapon.pos, focus),
            fog_opacity(weapon.pos.distance(focus), view_distance),
        )
    };
    let angle = weapon.swing_angle(now_ms) + aim;

    match &weapon.kind {
        WeaponKind::Axe { .. } => {
            // Handle: a thin upright bar through the grip
            renderer.push_rect_rotated(
                screen + Vec2::new(-2.5, -20.0),
                Vec2::new(5.0, 40.0),
                screen,
                angle,
                with_alpha(AXE_HANDLE_COLOR, opacity),
            );
            // Blade: a trapezoid flaring out above the handle
            let corners = [
                screen + Vec2::new(-2.5, -20.0),
                screen + Vec2::new(-10.0, -30.0),
                screen + Vec2::new(10.0, -30.0),
                screen + Vec2::new(2.5, -20.0),
            ]
            .map(|p| rotate_around(p, screen, angle));
            renderer.push_quad(
                corners[0],
                corners[1],
                corners[2],
                corners[3],
                with_alpha(AXE_BLADE_COLOR, opacity),
            );
        }
        WeaponKind::Pistol { .. } => {
            renderer.push_rect_rotated(
                screen + Vec2::new(-5.0, -10.0),
                Vec2::new(10.0, 20.0),
                screen,
                angle,
                with_alpha(PISTOL_COLOR, opacity),
            );
        }
    }
}

fn with_alpha(rgb: [f32; 3], alpha: f32) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], alpha]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fog_is_opaque_inside_the_view_distance() {
        assert_eq!(fog_opacity(0.0, 100.0), 1.0);
        assert_eq!(fog_opacity(100.0, 100.0), 1.0);
    }

    #[test]
    fn fog_fades_over_the_falloff_band() {
        let mid = fog_opacity(150.0, 100.0);
        assert!((mid - 0.5).abs() < 1e-5);
        assert_eq!(fog_opacity(200.0, 100.0), 0.0);
        assert_eq!(fog_opacity(1000.0, 100.0), 0.0);
    }
}
