//! Dodgefall entry point
//!
//! Native winit shell: owns the window, GPU state, audio output, and the
//! fixed-timestep accumulator driving the deterministic simulation.

use std::path::Path;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use dodgefall::assets::Assets;
use dodgefall::audio::AudioOutput;
use dodgefall::consts::*;
use dodgefall::renderer::{
    DrawBatch, GlyphAtlas, GpuTexture, RenderState, colors, shapes,
};
use dodgefall::settings::Settings;
use dodgefall::sim::{GameEvent, GameState, TickInput, tick};

/// Circle tessellation for fallback shapes
const CIRCLE_SEGMENTS: u32 = 48;
/// HUD text sizes (pixels); the atlas is rasterized at the larger one
const HUD_PX: f32 = 24.0;
const HINT_PX: f32 = 14.0;

/// GPU-side resources created once the window exists
struct Gpu {
    window: Arc<Window>,
    render_state: RenderState,
    player_tex: Option<GpuTexture>,
    enemy_tex: Option<GpuTexture>,
    bg_tex: Option<GpuTexture>,
    hud: Option<Hud>,
}

/// Glyph atlas plus its GPU texture
struct Hud {
    atlas: GlyphAtlas,
    texture: GpuTexture,
}

struct App {
    settings: Settings,
    assets: Assets,
    audio: Option<AudioOutput>,
    state: GameState,
    input: TickInput,
    accumulator: f32,
    last_frame: Option<Instant>,
    start: Instant,
    gpu: Option<Gpu>,
    // FPS tracking over the last 60 frames
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
    last_title_score: Option<u64>,
}

impl App {
    fn new(settings: Settings, assets: Assets, audio: Option<AudioOutput>, seed: u64) -> Self {
        Self {
            settings,
            assets,
            audio,
            state: GameState::new(seed),
            input: TickInput::default(),
            accumulator: 0.0,
            last_frame: None,
            start: Instant::now(),
            gpu: None,
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
            last_title_score: None,
        }
    }

    /// Run simulation substeps, consume events, update FPS
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            for event in &self.state.events {
                match event {
                    GameEvent::Hit => {
                        log::info!("Collision! Score reset");
                        if let (Some(audio), Some(sound)) =
                            (self.audio.as_mut(), self.assets.hit_sound.as_deref())
                        {
                            if let Err(e) = audio.play(sound) {
                                log::warn!("Sound playback failed: {e}");
                            }
                        }
                    }
                    GameEvent::Dodged => {}
                }
            }
        }

        if let Some(audio) = self.audio.as_mut() {
            audio.update();
        }

        // FPS from oldest to newest frame in the ring
        let now = self.start.elapsed().as_secs_f64();
        self.frame_times[self.frame_index] = now;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = now - oldest;
            if elapsed > 0.0 {
                self.fps = (self.frame_times.len() as f64 / elapsed).round() as u32;
            }
        }
    }

    /// Assemble this frame's draw batches and render them
    fn render(&mut self) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        let mut batches: Vec<DrawBatch<'_>> = Vec::new();

        // Background fills the whole playfield
        if let Some(bg) = &gpu.bg_tex {
            batches.push(DrawBatch::Textured {
                texture: bg,
                vertices: shapes::textured_quad(
                    Vec2::ZERO,
                    Vec2::new(WINDOW_W, WINDOW_H),
                    Vec2::ZERO,
                    Vec2::ONE,
                    colors::WHITE,
                ),
            });
        }

        // Player: sprite when textured, filled circle otherwise
        match &gpu.player_tex {
            Some(tex) => batches.push(DrawBatch::Textured {
                texture: tex,
                vertices: shapes::sprite_quad(
                    self.state.player.pos,
                    PLAYER_SPRITE_SIZE,
                    colors::WHITE,
                ),
            }),
            None => batches.push(DrawBatch::Solid(shapes::circle(
                self.state.player.pos,
                self.state.player.radius,
                colors::PLAYER,
                CIRCLE_SEGMENTS,
            ))),
        }

        // Fallers share one batch per render mode
        match &gpu.enemy_tex {
            Some(tex) => {
                let mut vertices = Vec::new();
                for faller in &self.state.fallers {
                    vertices.extend(shapes::sprite_quad(
                        faller.pos,
                        FALLER_SPRITE_SIZE,
                        colors::WHITE,
                    ));
                }
                batches.push(DrawBatch::Textured {
                    texture: tex,
                    vertices,
                });
            }
            None => {
                let mut vertices = Vec::new();
                for faller in &self.state.fallers {
                    vertices.extend(shapes::circle(
                        faller.pos,
                        faller.radius,
                        colors::FALLER,
                        CIRCLE_SEGMENTS,
                    ));
                }
                batches.push(DrawBatch::Solid(vertices));
            }
        }

        // HUD
        match &gpu.hud {
            Some(hud) => {
                let mut text = hud.atlas.layout(
                    &format!("SCORE: {}", self.state.score),
                    Vec2::new(10.0, 10.0 + HUD_PX),
                    1.0,
                    colors::HUD_TEXT,
                );
                let hint_scale = HINT_PX / HUD_PX;
                text.extend(hud.atlas.layout(
                    "Move: WASD / Arrow keys. Esc to quit.",
                    Vec2::new(10.0, WINDOW_H - 10.0),
                    hint_scale,
                    colors::HUD_TEXT,
                ));
                if self.settings.show_fps {
                    let fps_text = format!("FPS: {}", self.fps);
                    let width = hud.atlas.measure(&fps_text, hint_scale);
                    text.extend(hud.atlas.layout(
                        &fps_text,
                        Vec2::new(WINDOW_W - 10.0 - width, 10.0 + HINT_PX),
                        hint_scale,
                        colors::HUD_TEXT,
                    ));
                }
                batches.push(DrawBatch::Textured {
                    texture: &hud.texture,
                    vertices: text,
                });
            }
            None => {
                // No font: backdrop rectangle where the score would be,
                // score mirrored into the window title
                batches.push(DrawBatch::Solid(shapes::quad(
                    Vec2::new(10.0, 10.0),
                    Vec2::new(140.0, 30.0),
                    colors::HUD_BACKDROP,
                )));
                if self.last_title_score != Some(self.state.score) {
                    gpu.window
                        .set_title(&format!("Dodgefall - score {}", self.state.score));
                    self.last_title_score = Some(self.state.score);
                }
            }
        }

        match gpu.render_state.render(&batches) {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost) => {
                let (w, h) = gpu.render_state.size;
                gpu.render_state.resize(w, h);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key: KeyCode, state: ElementState) {
        let pressed = state == ElementState::Pressed;
        match key {
            KeyCode::KeyA | KeyCode::ArrowLeft => self.input.left = pressed,
            KeyCode::KeyD | KeyCode::ArrowRight => self.input.right = pressed,
            KeyCode::KeyW | KeyCode::ArrowUp => self.input.up = pressed,
            KeyCode::KeyS | KeyCode::ArrowDown => self.input.down = pressed,
            KeyCode::Escape if pressed => event_loop.exit(),
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title("Dodgefall")
                        .with_inner_size(LogicalSize::new(WINDOW_W as f64, WINDOW_H as f64))
                        .with_resizable(false),
                )
                .expect("Failed to create window"),
        );

        let render_state = pollster::block_on(RenderState::new(
            window.clone(),
            (WINDOW_W, WINDOW_H),
        ));

        let player_tex = self
            .assets
            .player
            .as_ref()
            .map(|img| render_state.create_texture(img, "player"));
        let enemy_tex = self
            .assets
            .enemy
            .as_ref()
            .map(|img| render_state.create_texture(img, "enemy"));
        let bg_tex = self
            .assets
            .background
            .as_ref()
            .map(|img| render_state.create_texture(img, "background"));
        let hud = self.assets.font.as_ref().map(|font| {
            let atlas = GlyphAtlas::new(font, HUD_PX);
            let texture = render_state.create_texture(&atlas.image, "glyph_atlas");
            Hud { atlas, texture }
        });

        window.request_redraw();
        self.gpu = Some(Gpu {
            window,
            render_state,
            player_tex,
            enemy_tex,
            bg_tex,
            hud,
        });
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window closed; final score {}", self.state.score);
                self.settings.save();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.render_state.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.handle_key(event_loop, code, event.state);
                }
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = self
                    .last_frame
                    .map(|t| (now - t).as_secs_f32())
                    .unwrap_or(SIM_DT);
                self.last_frame = Some(now);

                self.update(dt);
                self.render();

                if let Some(gpu) = &self.gpu {
                    gpu.window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let settings = Settings::load();
    let assets = Assets::load(Path::new("."));

    let audio = match AudioOutput::new(settings.effective_sfx_volume()) {
        Ok(audio) => Some(audio),
        Err(e) => {
            log::warn!("Audio disabled: {e}");
            None
        }
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("Dodgefall starting with seed {seed}");

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(settings, assets, audio, seed);
    event_loop.run_app(&mut app).expect("Event loop error");
}
