use anyhow::Result;
use log::{debug, error, info};
use std::sync::Arc;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::assets::AssetLoader;
use engine::game_loop::GameLoop;
use engine::input::InputManager;
use engine::renderer::{Orientation, Renderer};
use game::{GameConfig, World, WorldTextures};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = GameConfig::default();
    config.validate()?;

    info!("Starting {}...", config.window.title);

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window.title)
            .with_inner_size(winit::dpi::PhysicalSize::new(
                config.window.width,
                config.window.height,
            ))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let mut renderer = pollster::block_on(Renderer::new(window.clone()))?;

    // Missing or corrupt textures are fatal
    let assets = AssetLoader::new(config.asset_dir);
    info!("Loading assets from {}", assets.base_path().display());
    let textures = WorldTextures {
        soil: renderer.load_texture(&assets, "soil_tile.png", Orientation::RotatedClockwise)?,
        car: renderer.load_texture(&assets, "car.png", Orientation::Upright)?,
    };

    let mut game_loop = GameLoop::new(config.window.target_fps);
    let mut input = InputManager::new();
    let mut world = World::new(config, textures);

    let size = window.inner_size();
    world.resize_viewport(size.width as f32, size.height as f32);

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    input.process_keyboard_event(&event);
                    if input.quit_requested() {
                        info!("Escape pressed, shutting down...");
                        elwt.exit();
                    }
                }
                WindowEvent::Focused(false) => {
                    // Key releases are not delivered while unfocused
                    input.reset_all();
                }
                WindowEvent::Resized(physical_size) => {
                    renderer.resize(physical_size);
                    if physical_size.width > 0 && physical_size.height > 0 {
                        world.resize_viewport(
                            physical_size.width as f32,
                            physical_size.height as f32,
                        );
                    }
                }
                WindowEvent::RedrawRequested => {
                    let updates = game_loop.begin_frame();
                    let dt = game_loop.fixed_timestep();
                    let car_input = input.car_input();

                    for _ in 0..updates {
                        let report = world.update(car_input, dt, game_loop.elapsed_secs());
                        if report.score_delta > 0 {
                            info!("Score: {}", world.score().value());
                        }
                    }

                    if game_loop.frame_count() % 600 == 0 {
                        debug!(
                            "{:.1} fps, {} updates",
                            game_loop.fps(),
                            game_loop.update_count()
                        );
                    }

                    let now = game_loop.elapsed_secs();
                    if let Err(e) = renderer.render(|canvas| world.draw(canvas, now)) {
                        error!("Render failed: {}", e);
                        elwt.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            Event::LoopExiting => {
                info!("Final score: {}", world.score().value());
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
