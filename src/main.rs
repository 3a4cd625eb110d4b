#![allow(dead_code)]

mod app;
mod backdrop;
mod camera;
mod constants;
mod enemy;
mod events;
mod fps;
mod input;
mod player;
mod renderer;
mod rng;
mod scene;
mod session;
mod sprite;
mod ui;
mod weapon;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context as _;
use glutin::prelude::*;
use glutin::surface::WindowSurface;
use log::{debug, info, warn};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use egui_glow::EguiGlow;

use backdrop::Backdrop;
use camera::Camera;
use events::GameEvent;
use fps::FrameRateMonitor;
use input::InputState;
use renderer::Renderer;
use session::{Session, SessionState};
use sprite::PlayerSprite;

fn main() -> anyhow::Result<()> {
    setup_logging().context("failed to initialize logging")?;

    // Frame profiler; attach with a puffin viewer if you need timings.
    let profiler_addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
    let _puffin_server = match puffin_http::Server::new(&profiler_addr) {
        Ok(server) => {
            puffin::set_scopes_on(true);
            Some(server)
        }
        Err(err) => {
            warn!("profiler server unavailable on {profiler_addr}: {err}");
            None
        }
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new();
    event_loop.run_app(&mut app)?;
    Ok(())
}

fn setup_logging() -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .level_for("dusk_survivor", log::LevelFilter::Debug)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}

struct App {
    state: Option<AppState>,
}

struct AppState {
    // Window and GL
    window: Window,
    gl_surface: glutin::surface::Surface<WindowSurface>,
    gl_context: glutin::context::PossiblyCurrentContext,
    egui_glow: EguiGlow,

    // Rendering
    camera: Camera,
    renderer: Renderer,
    backdrop: Backdrop,
    sprite: Option<PlayerSprite>,

    // Game state
    session: Session,
    input: InputState,
    fps: FrameRateMonitor,
    /// False until the start overlay is dismissed; the simulation does not
    /// run before that.
    started: bool,

    // Timing
    epoch: Instant,
}

impl App {
    fn new() -> Self {
        Self { state: None }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let app::WindowContext {
            window,
            gl_surface,
            gl_context,
            gl,
            egui_glow,
        } = match app::create_window(event_loop) {
            Ok(ctx) => ctx,
            Err(err) => {
                log::error!("window setup failed: {err:#}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let camera = Camera::new(size.width as f32, size.height as f32);
        let renderer = match Renderer::new(Arc::clone(&gl)) {
            Ok(renderer) => renderer,
            Err(err) => {
                log::error!("renderer setup failed: {err}");
                event_loop.exit();
                return;
            }
        };

        // Missing sprite assets degrade to a drawn marker, not a crash.
        let sprite = match PlayerSprite::load(&gl, Path::new("assets/player/sprite.json")) {
            Ok(sprite) => Some(sprite),
            Err(err) => {
                warn!("player sprite unavailable, using fallback marker: {err}");
                None
            }
        };

        info!("window up, field ready");

        self.state = Some(AppState {
            window,
            gl_surface,
            gl_context,
            egui_glow,
            camera,
            renderer,
            backdrop: Backdrop::new(),
            sprite,
            session: Session::new(),
            input: InputState::new(),
            fps: FrameRateMonitor::new(0.0),
            started: false,
            epoch: Instant::now(),
        });
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let state = match &mut self.state {
            Some(s) => s,
            None => return,
        };

        // Let egui handle the event first
        let egui_consumed = state.egui_glow.on_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                app::resize_surface(&state.gl_surface, &state.gl_context, size.width, size.height);
                state.camera.resize(size.width as f32, size.height as f32);
                state.renderer.resize(size.width as i32, size.height as i32);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if !egui_consumed.consumed {
                    if let PhysicalKey::Code(key) = event.physical_key {
                        match event.state {
                            ElementState::Pressed => {
                                if (key == KeyCode::KeyP || key == KeyCode::Escape)
                                    && state.started
                                {
                                    state.session.toggle_pause(state.now_ms());
                                }
                                state.input.keys_pressed.insert(key);
                            }
                            ElementState::Released => {
                                state.input.keys_pressed.remove(&key);
                            }
                        }
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                state.input.mouse_pos = (position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput {
                state: btn_state,
                button,
                ..
            } => {
                if !egui_consumed.consumed
                    && button == MouseButton::Left
                    && btn_state == ElementState::Pressed
                    && state.started
                {
                    let center = state.camera.center();
                    state.session.player_attack(center, state.now_ms());
                }
            }
            WindowEvent::RedrawRequested => {
                state.update_and_render();
                state.window.request_redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }
}

impl AppState {
    fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    fn update_and_render(&mut self) {
        puffin::GlobalProfiler::lock().new_frame();
        puffin::profile_function!();

        let now_ms = self.now_ms();

        // Aim follows the pointer even while paused or on a menu.
        self.session
            .player
            .set_pointer(self.input.mouse_pos.0, self.input.mouse_pos.1);

        if self.started {
            let frame_input = self.input.frame_input();
            let mut rng = rand::thread_rng();
            self.session.frame(&frame_input, now_ms, &mut rng);
        }
        self.drain_events();
        self.fps.update(now_ms);

        scene::draw_session(
            &mut self.renderer,
            &self.camera,
            &self.session,
            &self.backdrop,
            self.sprite.as_ref(),
            now_ms,
        );

        let actions = self.run_ui();
        self.egui_glow.paint(&self.window);

        if let Err(err) = self.gl_surface.swap_buffers(&self.gl_context) {
            warn!("swap_buffers failed: {err}");
        }

        self.apply_ui_actions(actions, now_ms);
    }

    fn run_ui(&mut self) -> ui::UiActions {
        puffin::profile_function!();

        let mut actions = ui::UiActions::default();
        let hud = ui::HudData::from_session(&self.session, self.fps.fps);
        let started = self.started;
        let state = self.session.state;
        let score = self.session.player.score;
        let end_reason = self.session.end_reason;

        self.egui_glow.run(&self.window, |ctx| {
            if !started {
                ui::draw_start_menu(ctx, &mut actions);
                return;
            }

            ui::draw_hud(ctx, &hud);

            match state {
                SessionState::Paused => ui::draw_pause_menu(ctx, &mut actions),
                SessionState::Ended => {
                    if let Some(reason) = end_reason {
                        ui::draw_end_menu(ctx, score, reason, &mut actions);
                    }
                }
                SessionState::Running => {}
            }
        });

        actions
    }

    fn apply_ui_actions(&mut self, actions: ui::UiActions, now_ms: f64) {
        if actions.start {
            self.started = true;
            self.session.restart(now_ms);
            info!("session started");
        }
        if actions.resume {
            self.session.resume();
            info!("session resumed");
        }
        if actions.restart {
            self.session.restart(now_ms);
            info!("session restarted");
        }
    }

    /// Route simulation events into the log; the chrome reads session state
    /// directly, so nothing else consumes them.
    fn drain_events(&mut self) {
        for event in self.session.events.drain() {
            match event {
                GameEvent::EnemySpawned { pos } => {
                    debug!("enemy spawned at ({:.0}, {:.0})", pos.x, pos.y);
                }
                GameEvent::EnemySlain { pos, points } => {
                    debug!("enemy down at ({:.0}, {:.0}), +{points}", pos.x, pos.y);
                }
                GameEvent::WeaponSpawned { name, pos } => {
                    debug!("{name} dropped at ({:.0}, {:.0})", pos.x, pos.y);
                }
                GameEvent::WeaponPickedUp { name, swapped } => {
                    if swapped {
                        info!("picked up {name}, dropped the old weapon");
                    } else {
                        info!("picked up {name}");
                    }
                }
                GameEvent::PlayerDamaged {
                    amount,
                    health_after,
                } => {
                    debug!("player took {amount}, {health_after} health left");
                }
                GameEvent::SessionEnded { reason } => {
                    info!("session ended: {reason:?}");
                }
            }
        }
    }
}
