// Sprite batching and rendering
//
// Draw calls are turned into triangles on the CPU and grouped into batches that
// share a coordinate space and a texture. Untextured shapes and text sample a
// 1x1 white texture and carry their color in the vertices.

use super::camera::{Camera, CameraUniform, Viewport};
use super::canvas::{Canvas, Color, TexturedQuad};
use super::text;
use super::texture::{TextureHandle, TextureManager};
use super::vertex::Vertex;
use anyhow::Result;
use glam::{Mat4, Vec2, Vec4};
use log::warn;
use std::f32::consts::PI;
use wgpu::util::DeviceExt;

/// Triangles per filled circle
const CIRCLE_SEGMENTS: u32 = 32;

/// Initial vertex buffer size, grown on demand
const INITIAL_VERTEX_CAPACITY: usize = 4096;

/// Coordinate space a batch is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Space {
    World,
    Screen,
}

/// A contiguous vertex range drawn with one texture and one camera
#[derive(Debug, Clone, Copy, PartialEq)]
struct Batch {
    space: Space,
    texture: TextureHandle,
    start: u32,
    end: u32,
}

/// CPU-side geometry for one frame
#[derive(Debug)]
pub struct SpriteBatch {
    vertices: Vec<Vertex>,
    batches: Vec<Batch>,
    clear_color: Color,
    world_camera: CameraUniform,
}

impl SpriteBatch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self {
            vertices: Vec::with_capacity(INITIAL_VERTEX_CAPACITY),
            batches: Vec::new(),
            clear_color: Color::BLACK,
            world_camera: CameraUniform {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            },
        }
    }

    /// Drop all geometry from the previous frame
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.batches.clear();
    }

    /// Background color requested for this frame
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Number of vertices queued
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Append triangles, extending the last batch when space and texture match
    fn push(&mut self, space: Space, texture: TextureHandle, vertices: &[Vertex]) {
        if vertices.is_empty() {
            return;
        }

        let start = self.vertices.len() as u32;
        self.vertices.extend_from_slice(vertices);
        let end = self.vertices.len() as u32;

        match self.batches.last_mut() {
            Some(last) if last.space == space && last.texture == texture && last.end == start => {
                last.end = end;
            }
            _ => self.batches.push(Batch {
                space,
                texture,
                start,
                end,
            }),
        }
    }
}

impl Default for SpriteBatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Two triangles covering a quad given clockwise corners from the top-left
fn quad_vertices(corners: [Vec2; 4], uv_min: Vec2, uv_max: Vec2, color: Vec4) -> [Vertex; 6] {
    let uvs = [
        uv_min,
        Vec2::new(uv_max.x, uv_min.y),
        uv_max,
        Vec2::new(uv_min.x, uv_max.y),
    ];
    let v = |i: usize| Vertex::new(corners[i], uvs[i], color);
    [v(0), v(1), v(2), v(0), v(2), v(3)]
}

fn rect_corners(min: Vec2, size: Vec2) -> [Vec2; 4] {
    [
        min,
        min + Vec2::new(size.x, 0.0),
        min + size,
        min + Vec2::new(0.0, size.y),
    ]
}

/// Generate vertices for a filled circle
fn circle_vertices(center: Vec2, radius: f32, color: Vec4) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((CIRCLE_SEGMENTS * 3) as usize);
    let uv = Vec2::splat(0.5);

    for i in 0..CIRCLE_SEGMENTS {
        let theta1 = (i as f32 / CIRCLE_SEGMENTS as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / CIRCLE_SEGMENTS as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center, uv, color));
        vertices.push(Vertex::new(center + Vec2::from_angle(theta1) * radius, uv, color));
        vertices.push(Vertex::new(center + Vec2::from_angle(theta2) * radius, uv, color));
    }

    vertices
}

/// Top-left corners of the tiles covering `[0, area]`, skipping tiles
/// outside `visible` when given
fn tile_origins(tile_size: Vec2, area: Vec2, visible: Option<&Viewport>) -> Vec<Vec2> {
    if tile_size.x <= 0.0 || tile_size.y <= 0.0 {
        return Vec::new();
    }

    let columns = (area.x / tile_size.x).ceil() as u32;
    let rows = (area.y / tile_size.y).ceil() as u32;
    let half = tile_size / 2.0;

    let mut origins = Vec::new();
    for column in 0..columns {
        for row in 0..rows {
            let origin = Vec2::new(column as f32, row as f32) * tile_size;
            if visible.map_or(true, |view| view.intersects_rect(origin + half, half)) {
                origins.push(origin);
            }
        }
    }
    origins
}

/// Canvas that records one frame into a `SpriteBatch`
pub struct FrameCanvas<'a> {
    batch: &'a mut SpriteBatch,
    textures: &'a TextureManager,
    white: TextureHandle,
    space: Space,
    visible: Option<Viewport>,
}

impl<'a> FrameCanvas<'a> {
    /// Start recording a frame in screen space
    pub fn new(
        batch: &'a mut SpriteBatch,
        textures: &'a TextureManager,
        white: TextureHandle,
    ) -> Self {
        batch.clear();
        Self {
            batch,
            textures,
            white,
            space: Space::Screen,
            visible: None,
        }
    }
}

impl Canvas for FrameCanvas<'_> {
    fn clear_background(&mut self, color: Color) {
        self.batch.clear_color = color;
    }

    fn begin_world(&mut self, camera: &Camera) {
        self.batch.world_camera = CameraUniform::world(camera);
        self.visible = Some(camera.viewport_bounds());
        self.space = Space::World;
    }

    fn end_world(&mut self) {
        self.visible = None;
        self.space = Space::Screen;
    }

    fn draw_tiled(&mut self, texture: TextureHandle, area: Vec2) {
        let Some(tile) = self.textures.get(texture) else {
            warn!("draw_tiled: unknown texture {:?}", texture);
            return;
        };

        let tile_size = Vec2::new(tile.width as f32, tile.height as f32);
        let color = Color::WHITE.to_linear();
        let mut vertices = Vec::new();
        for origin in tile_origins(tile_size, area, self.visible.as_ref()) {
            vertices.extend(quad_vertices(
                rect_corners(origin, tile_size),
                Vec2::ZERO,
                Vec2::ONE,
                color,
            ));
        }

        self.batch.push(self.space, texture, &vertices);
    }

    fn draw_texture(&mut self, texture: TextureHandle, quad: TexturedQuad) {
        let vertices = quad_vertices(quad.corners(), Vec2::ZERO, Vec2::ONE, quad.tint.to_linear());
        self.batch.push(self.space, texture, &vertices);
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let vertices = circle_vertices(center, radius, color.to_linear());
        self.batch.push(self.space, self.white, &vertices);
    }

    fn draw_text(&mut self, text: &str, position: Vec2, size: f32, color: Color) {
        let color = color.to_linear();
        let mut vertices = Vec::new();
        for cell in text::layout(text, position, size) {
            vertices.extend(quad_vertices(
                rect_corners(cell.min, Vec2::splat(cell.size)),
                Vec2::ZERO,
                Vec2::ONE,
                color,
            ));
        }

        self.batch.push(self.space, self.white, &vertices);
    }
}

/// GPU side of sprite rendering
pub struct SpriteRenderer {
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    world_camera_buffer: wgpu::Buffer,
    world_camera_bind_group: wgpu::BindGroup,
    screen_camera_buffer: wgpu::Buffer,
    screen_camera_bind_group: wgpu::BindGroup,
    texture_bind_group_layout: wgpu::BindGroupLayout,
}

impl SpriteRenderer {
    /// Create a new sprite renderer
    pub fn new(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) -> Result<Self> {
        // Create shader module
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sprite Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        // Create camera bind group layout
        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        // Create texture bind group layout
        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Texture Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            multisampled: false,
                            view_dimension: wgpu::TextureViewDimension::D2,
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        // Create pipeline layout
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sprite Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &texture_bind_group_layout],
            push_constant_ranges: &[],
        });

        // Create render pipeline
        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sprite Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[Vertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Rotated quads and the y-down projection mix windings
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Sprite Vertex Buffer"),
            size: (INITIAL_VERTEX_CAPACITY * std::mem::size_of::<Vertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let identity = CameraUniform {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
        };
        let (world_camera_buffer, world_camera_bind_group) =
            Self::camera_binding(device, &camera_bind_group_layout, identity, "World Camera");
        let (screen_camera_buffer, screen_camera_bind_group) =
            Self::camera_binding(device, &camera_bind_group_layout, identity, "Screen Camera");

        Ok(Self {
            render_pipeline,
            vertex_buffer,
            vertex_capacity: INITIAL_VERTEX_CAPACITY,
            world_camera_buffer,
            world_camera_bind_group,
            screen_camera_buffer,
            screen_camera_bind_group,
            texture_bind_group_layout,
        })
    }

    fn camera_binding(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        uniform: CameraUniform,
        label: &str,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        (buffer, bind_group)
    }

    /// Layout that texture bind groups must be created against
    pub fn texture_bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.texture_bind_group_layout
    }

    /// Upload this frame's geometry and camera matrices
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        batch: &SpriteBatch,
        screen_camera: &Camera,
    ) {
        queue.write_buffer(
            &self.world_camera_buffer,
            0,
            bytemuck::cast_slice(&[batch.world_camera]),
        );
        queue.write_buffer(
            &self.screen_camera_buffer,
            0,
            bytemuck::cast_slice(&[CameraUniform::screen(screen_camera)]),
        );

        if batch.vertices.is_empty() {
            return;
        }

        // Resize buffer if needed
        if batch.vertices.len() > self.vertex_capacity {
            self.vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Sprite Vertex Buffer"),
                contents: bytemuck::cast_slice(&batch.vertices),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            });
            self.vertex_capacity = batch.vertices.len();
        } else {
            queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&batch.vertices));
        }
    }

    /// Draw every batch recorded for this frame
    pub fn render<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        batch: &SpriteBatch,
        texture_manager: &'a TextureManager,
    ) {
        if batch.batches.is_empty() {
            return;
        }

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));

        for draw in &batch.batches {
            let Some(texture) = texture_manager.get(draw.texture) else {
                continue;
            };

            let camera = match draw.space {
                Space::World => &self.world_camera_bind_group,
                Space::Screen => &self.screen_camera_bind_group,
            };

            render_pass.set_bind_group(0, camera, &[]);
            render_pass.set_bind_group(1, &texture.bind_group, &[]);
            render_pass.draw(draw.start..draw.end, 0..1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(index: usize) -> TextureHandle {
        TextureHandle::from_index(index)
    }

    fn verts(n: usize) -> Vec<Vertex> {
        vec![Vertex::new(Vec2::ZERO, Vec2::ZERO, Vec4::ONE); n]
    }

    #[test]
    fn test_batches_merge_when_state_matches() {
        let mut batch = SpriteBatch::new();
        batch.push(Space::World, handle(0), &verts(6));
        batch.push(Space::World, handle(0), &verts(3));

        assert_eq!(batch.batches.len(), 1);
        assert_eq!(batch.batches[0].end, 9);
    }

    #[test]
    fn test_batches_split_on_texture_or_space() {
        let mut batch = SpriteBatch::new();
        batch.push(Space::World, handle(0), &verts(6));
        batch.push(Space::World, handle(1), &verts(6));
        batch.push(Space::Screen, handle(1), &verts(6));

        assert_eq!(batch.batches.len(), 3);
        assert_eq!(batch.batches[2].start, 12);
        assert_eq!(batch.vertex_count(), 18);
    }

    #[test]
    fn test_empty_push_adds_no_batch() {
        let mut batch = SpriteBatch::new();
        batch.push(Space::World, handle(0), &[]);
        assert!(batch.batches.is_empty());
    }

    #[test]
    fn test_clear_keeps_clear_color() {
        let mut batch = SpriteBatch::new();
        batch.clear_color = Color::GOLD;
        batch.push(Space::World, handle(0), &verts(3));
        batch.clear();

        assert_eq!(batch.vertex_count(), 0);
        assert_eq!(batch.clear_color(), Color::GOLD);
    }

    #[test]
    fn test_circle_has_segment_triangles() {
        let vertices = circle_vertices(Vec2::new(5.0, 5.0), 6.0, Vec4::ONE);
        assert_eq!(vertices.len(), (CIRCLE_SEGMENTS * 3) as usize);
        assert_eq!(vertices[0].position, [5.0, 5.0]);
    }

    #[test]
    fn test_tiles_cover_area() {
        let origins = tile_origins(Vec2::new(128.0, 128.0), Vec2::new(300.0, 200.0), None);
        // ceil(300/128) = 3 columns, ceil(200/128) = 2 rows
        assert_eq!(origins.len(), 6);
        assert!(origins.contains(&Vec2::new(256.0, 128.0)));
    }

    #[test]
    fn test_tiles_outside_view_are_culled() {
        let view = Viewport {
            min: Vec2::new(0.0, 0.0),
            max: Vec2::new(100.0, 100.0),
        };
        let origins = tile_origins(
            Vec2::new(128.0, 128.0),
            Vec2::new(5000.0, 5000.0),
            Some(&view),
        );
        assert_eq!(origins, vec![Vec2::ZERO]);
    }

    #[test]
    fn test_degenerate_tile_size_draws_nothing() {
        assert!(tile_origins(Vec2::ZERO, Vec2::new(10.0, 10.0), None).is_empty());
    }

    #[test]
    fn test_quad_uvs_follow_corners() {
        let vertices = quad_vertices(
            rect_corners(Vec2::ZERO, Vec2::new(2.0, 3.0)),
            Vec2::ZERO,
            Vec2::ONE,
            Vec4::ONE,
        );
        assert_eq!(vertices[2].position, [2.0, 3.0]);
        assert_eq!(vertices[2].tex_coords, [1.0, 1.0]);
        assert_eq!(vertices[5].tex_coords, [0.0, 1.0]);
    }
}
