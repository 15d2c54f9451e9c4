// Texture loading and management system

use anyhow::Result;
use image::GenericImageView;
use log::info;
use std::collections::HashMap;

use crate::engine::assets::{AssetError, AssetLoader, AssetType};

/// Handle to a loaded texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(usize);

/// How a source image is turned before upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Upright,
    /// Rotated a quarter turn clockwise
    RotatedClockwise,
}

impl Orientation {
    fn apply(self, img: image::DynamicImage) -> image::DynamicImage {
        match self {
            Orientation::Upright => img,
            Orientation::RotatedClockwise => img.rotate90(),
        }
    }
}

/// A loaded texture with GPU resources
pub struct Texture {
    // Owned for the lifetime of the bind group
    _texture: wgpu::Texture,
    _view: wgpu::TextureView,
    _sampler: wgpu::Sampler,
    pub bind_group: wgpu::BindGroup,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Create a texture from raw RGBA8 pixels
    fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        rgba: &[u8],
        (width, height): (u32, u32),
        filter: wgpu::FilterMode,
        label: Option<&str>,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: filter,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label,
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Self {
            _texture: texture,
            _view: view,
            _sampler: sampler,
            bind_group,
            width,
            height,
        }
    }

    /// Create a texture from an image
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        img: &image::DynamicImage,
        label: Option<&str>,
    ) -> Self {
        let rgba = img.to_rgba8();
        Self::from_rgba(
            device,
            queue,
            layout,
            &rgba,
            img.dimensions(),
            wgpu::FilterMode::Linear,
            label,
        )
    }

    /// Create a 1x1 solid color texture
    pub fn from_color(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        color: [u8; 4],
        label: Option<&str>,
    ) -> Self {
        Self::from_rgba(
            device,
            queue,
            layout,
            &color,
            (1, 1),
            wgpu::FilterMode::Nearest,
            label,
        )
    }
}

/// Manages texture loading and caching
pub struct TextureManager {
    textures: Vec<Texture>,
    name_to_handle: HashMap<String, TextureHandle>,
}

impl TextureManager {
    /// Create an empty texture manager
    pub fn new() -> Self {
        Self {
            textures: Vec::new(),
            name_to_handle: HashMap::new(),
        }
    }

    /// Load a texture through the asset loader, reusing it if already loaded
    pub fn load_texture(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        loader: &AssetLoader,
        name: &str,
        orientation: Orientation,
    ) -> Result<TextureHandle> {
        // Check if already loaded
        if let Some(&handle) = self.name_to_handle.get(name) {
            return Ok(handle);
        }

        let bytes = loader.load_bytes(AssetType::Texture, name)?;
        let img = image::load_from_memory(&bytes).map_err(|source| AssetError::Decode {
            name: name.to_string(),
            source,
        })?;
        let img = orientation.apply(img);

        let texture = Texture::from_image(device, queue, layout, &img, Some(name));
        info!(
            "Loaded texture {} ({}x{})",
            name, texture.width, texture.height
        );

        let handle = self.push(texture);
        self.name_to_handle.insert(name.to_string(), handle);

        Ok(handle)
    }

    /// Create a solid color texture
    pub fn create_color_texture(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        color: [u8; 4],
        label: &str,
    ) -> TextureHandle {
        let texture = Texture::from_color(device, queue, layout, color, Some(label));
        self.push(texture)
    }

    fn push(&mut self, texture: Texture) -> TextureHandle {
        let handle = TextureHandle(self.textures.len());
        self.textures.push(texture);
        handle
    }

    /// Get a texture by handle
    pub fn get(&self, handle: TextureHandle) -> Option<&Texture> {
        self.textures.get(handle.0)
    }
}

impl Default for TextureManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl TextureHandle {
    /// Handle for tests that never touch the GPU
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }
}
