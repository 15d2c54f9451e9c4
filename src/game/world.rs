// The driving world: one car, one coin, the skidmark trail and the camera
//
// `update` advances the simulation by one fixed step; `draw` describes the
// current state to a `Canvas` without mutating anything.

use glam::Vec2;
use log::{debug, info};

use super::car::{CarInput, CarState};
use super::coin::{Coin, Score};
use super::config::GameConfig;
use super::skidmarks::SkidmarkBuffer;
use crate::engine::renderer::{Camera, Canvas, Color, TextureHandle, TexturedQuad};

const BACKGROUND: Color = Color::rgb(186, 149, 127);
const SCORE_POSITION: Vec2 = Vec2::new(20.0, 20.0);
const SCORE_TEXT_SIZE: f32 = 40.0;

/// Textures the world draws with
#[derive(Debug, Clone, Copy)]
pub struct WorldTextures {
    /// Background tile repeated over the whole world
    pub soil: TextureHandle,
    pub car: TextureHandle,
}

/// What happened during one update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Points scored this step
    pub score_delta: u32,
    /// Whether a skidmark was laid this step
    pub drifting: bool,
}

/// All game state for a session
pub struct World {
    config: GameConfig,
    car: CarState,
    coin: Coin,
    score: Score,
    skidmarks: SkidmarkBuffer,
    camera: Camera,
    textures: WorldTextures,
    was_drifting: bool,
}

impl World {
    /// Place the car at its start position with a coin next to it
    pub fn new(config: GameConfig, textures: WorldTextures) -> Self {
        let start = config.car_start();
        let viewport = config.viewport_size();

        let mut camera = Camera::new(start, viewport.x, viewport.y);
        camera.follow(start, config.world_size());

        let world = Self {
            car: CarState::new(start),
            coin: Coin::spawn_near(start, &config.coin),
            score: Score::default(),
            skidmarks: SkidmarkBuffer::new(
                config.skidmarks.capacity,
                config.skidmarks.lifetime_seconds,
            ),
            camera,
            textures,
            was_drifting: false,
            config,
        };

        info!(
            "World ready: {}x{}, car at ({:.0}, {:.0})",
            world.config.world_width, world.config.world_height, start.x, start.y
        );
        world
    }

    /// Advance one fixed step of `dt` seconds; `now` timestamps new skidmarks
    pub fn update(&mut self, input: CarInput, dt: f32, now: f64) -> FrameReport {
        self.car.step(input, &self.config.car, dt);

        let score_delta = self.coin.update(
            self.car.position,
            self.config.car.collision_radius,
            &self.config.coin,
            &mut self.score,
        );

        self.camera
            .follow(self.car.position, self.config.world_size());

        let drifting = self.car.is_drifting(&self.config.car);
        if drifting {
            let (left, right) = self.car.tire_positions(self.config.car.length);
            self.skidmarks.append(left, right, now);
        }

        if drifting != self.was_drifting {
            debug!(
                "Drift {} at speed {:.2}, {} marks laid so far",
                if drifting { "started" } else { "ended" },
                self.car.speed,
                self.skidmarks.count()
            );
            self.was_drifting = drifting;
        }

        FrameReport {
            score_delta,
            drifting,
        }
    }

    /// Describe the frame: background, coin, skidmarks, car, then the score overlay
    pub fn draw(&self, canvas: &mut dyn Canvas, now: f64) {
        canvas.clear_background(BACKGROUND);

        canvas.begin_world(&self.camera);
        canvas.draw_tiled(self.textures.soil, self.config.world_size());

        if self.coin.is_visible() {
            canvas.draw_circle(self.coin.position, self.coin.radius, Color::GOLD);
        }

        let mark_radius = self.config.skidmarks.mark_radius;
        for mark in self.skidmarks.live(now) {
            canvas.draw_circle(mark.left, mark_radius, Color::BLACK);
            canvas.draw_circle(mark.right, mark_radius, Color::BLACK);
        }

        let size = Vec2::new(self.config.car.width, self.config.car.length);
        canvas.draw_texture(
            self.textures.car,
            TexturedQuad {
                position: self.car.position,
                size,
                origin: size / 2.0,
                rotation: self.car.angle,
                tint: Color::WHITE,
            },
        );
        canvas.end_world();

        canvas.draw_text(
            &format!("Score: {}", self.score.value()),
            SCORE_POSITION,
            SCORE_TEXT_SIZE,
            Color::BLACK,
        );
    }

    /// Follow a window resize
    pub fn resize_viewport(&mut self, width: f32, height: f32) {
        self.camera.resize(width, height);
        self.camera
            .follow(self.car.position, self.config.world_size());
    }

    pub fn score(&self) -> Score {
        self.score
    }
}
