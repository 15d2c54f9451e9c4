// Rendering system using wgpu

mod camera;
pub mod canvas;
mod sprite;
mod text;
mod texture;
mod vertex;

pub use camera::Camera;
pub use canvas::{Canvas, Color, TexturedQuad};
pub use texture::{Orientation, TextureHandle};

use sprite::{FrameCanvas, SpriteBatch, SpriteRenderer};
use texture::TextureManager;

use anyhow::Result;
use glam::Vec2;
use log::{info, warn};
use std::sync::Arc;
use winit::window::Window;

use crate::engine::assets::AssetLoader;

/// Outcome of presenting one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Presented,
    /// The surface was lost or outdated and has been reconfigured
    Reconfigured,
    /// Frame skipped (timeout or minimised window)
    Skipped,
}

/// Main renderer responsible for initializing wgpu and coordinating rendering
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    sprite_renderer: SpriteRenderer,
    sprite_batch: SpriteBatch,
    texture_manager: TextureManager,
    white_texture: TextureHandle,
    /// Screen-space camera used for overlays
    camera: Camera,
}

impl Renderer {
    /// Create a new renderer for the given window
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();

        // Create wgpu instance
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Create surface
        let surface = instance.create_surface(window.clone())?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("Failed to find suitable GPU adapter"))?;

        info!("Using GPU: {}", adapter.get_info().name);

        // Request device and queue
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("Surface reports no supported formats"))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        // Create sprite renderer
        let sprite_renderer = SpriteRenderer::new(&device, &config)?;

        // Create texture manager with the white texture used by shapes and text
        let mut texture_manager = TextureManager::new();
        let white_texture = texture_manager.create_color_texture(
            &device,
            &queue,
            sprite_renderer.texture_bind_group_layout(),
            [255, 255, 255, 255],
            "White",
        );

        let camera = Camera::new(
            Vec2::ZERO,
            config.width as f32,
            config.height as f32,
        );

        info!(
            "Renderer initialized with {}x{} resolution",
            size.width, size.height
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            sprite_renderer,
            sprite_batch: SpriteBatch::new(),
            texture_manager,
            white_texture,
            camera,
        })
    }

    /// Load a texture from the asset directory
    pub fn load_texture(
        &mut self,
        loader: &AssetLoader,
        name: &str,
        orientation: Orientation,
    ) -> Result<TextureHandle> {
        self.texture_manager.load_texture(
            &self.device,
            &self.queue,
            self.sprite_renderer.texture_bind_group_layout(),
            loader,
            name,
            orientation,
        )
    }

    /// Resize the renderer
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.camera
                .resize(new_size.width as f32, new_size.height as f32);
            info!("Renderer resized to {}x{}", new_size.width, new_size.height);
        }
    }

    /// Render a frame, letting `draw` issue the draw commands
    pub fn render(&mut self, draw: impl FnOnce(&mut dyn Canvas)) -> Result<FrameStatus> {
        if self.size.width == 0 || self.size.height == 0 {
            return Ok(FrameStatus::Skipped);
        }

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(FrameStatus::Reconfigured);
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("Surface timed out, skipping frame");
                return Ok(FrameStatus::Skipped);
            }
            Err(e) => return Err(e.into()),
        };

        {
            let mut frame =
                FrameCanvas::new(&mut self.sprite_batch, &self.texture_manager, self.white_texture);
            let canvas: &mut dyn Canvas = &mut frame;
            draw(canvas);
        }

        self.sprite_renderer
            .prepare(&self.device, &self.queue, &self.sprite_batch, &self.camera);

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let clear = self.sprite_batch.clear_color().to_linear();

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear.x as f64,
                            g: clear.y as f64,
                            b: clear.z as f64,
                            a: clear.w as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.sprite_renderer
                .render(&mut render_pass, &self.sprite_batch, &self.texture_manager);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(FrameStatus::Presented)
    }
}
