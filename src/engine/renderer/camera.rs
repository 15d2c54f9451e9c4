// 2D follow camera and viewport math
//
// World coordinates are y-down like the screen: `target` is the world point
// drawn at the screen position `offset`.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

use crate::core::math::clamp;

/// 2D camera for world-space rendering
#[derive(Debug, Clone)]
pub struct Camera {
    /// Screen position (pixels) where the target is drawn
    pub offset: Vec2,
    /// World point the camera looks at
    pub target: Vec2,
    /// Rotation in degrees
    pub rotation: f32,
    /// Camera zoom level (1.0 = normal, 2.0 = zoomed in 2x)
    pub zoom: f32,
    /// Viewport width
    viewport_width: f32,
    /// Viewport height
    viewport_height: f32,
    /// View-projection matrix
    view_proj: Mat4,
}

impl Camera {
    /// Create a camera centred on the viewport, looking at `target`
    pub fn new(target: Vec2, viewport_width: f32, viewport_height: f32) -> Self {
        let mut camera = Self {
            offset: Vec2::new(viewport_width / 2.0, viewport_height / 2.0),
            target,
            rotation: 0.0,
            zoom: 1.0,
            viewport_width,
            viewport_height,
            view_proj: Mat4::IDENTITY,
        };
        camera.update_view_proj();
        camera
    }

    /// Update the view-projection matrix
    fn update_view_proj(&mut self) {
        let view = Mat4::from_translation(self.offset.extend(0.0))
            * Mat4::from_scale(Vec3::new(self.zoom, self.zoom, 1.0))
            * Mat4::from_rotation_z(self.rotation.to_radians())
            * Mat4::from_translation((-self.target).extend(0.0));

        self.view_proj = self.screen_proj_matrix() * view;
    }

    /// Half the visible world extents at the current zoom
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height) / (2.0 * self.zoom)
    }

    /// Look at `focus`, keeping the view inside `[0, world_size]`.
    ///
    /// Each axis is clamped independently. On an axis where the world is
    /// smaller than the view, the camera is pinned to the world centre.
    pub fn follow(&mut self, focus: Vec2, world_size: Vec2) {
        let half = self.half_extents();
        self.target = Vec2::new(
            clamp_axis(focus.x, half.x, world_size.x),
            clamp_axis(focus.y, half.y, world_size.y),
        );
        self.update_view_proj();
    }

    /// Resize the viewport, keeping the target at the screen centre
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
        self.offset = Vec2::new(width / 2.0, height / 2.0);
        self.update_view_proj();
    }

    /// Get the world view-projection matrix
    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }

    /// Projection for screen-space overlays (pixels, origin top-left)
    pub fn screen_proj_matrix(&self) -> Mat4 {
        Mat4::orthographic_rh(
            0.0,
            self.viewport_width,
            self.viewport_height,
            0.0,
            -100.0, // Near plane
            100.0,  // Far plane
        )
    }

    /// Get the viewport bounds in world coordinates (unrotated)
    pub fn viewport_bounds(&self) -> Viewport {
        let half = self.half_extents();
        let centre = self.target + (Vec2::new(self.viewport_width, self.viewport_height) / 2.0
            - self.offset)
            / self.zoom;

        Viewport {
            min: centre - half,
            max: centre + half,
        }
    }
}

fn clamp_axis(focus: f32, half_extent: f32, world_extent: f32) -> f32 {
    if world_extent < half_extent * 2.0 {
        world_extent / 2.0
    } else {
        clamp(focus, half_extent, world_extent - half_extent)
    }
}

/// Viewport bounds in world coordinates
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub min: Vec2,
    pub max: Vec2,
}

impl Viewport {
    /// Check if a rectangle intersects the viewport
    pub fn intersects_rect(&self, center: Vec2, half_size: Vec2) -> bool {
        let rect_min = center - half_size;
        let rect_max = center + half_size;

        rect_max.x >= self.min.x
            && rect_min.x <= self.max.x
            && rect_max.y >= self.min.y
            && rect_min.y <= self.max.y
    }
}

/// Camera uniform for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Uniform for world-space drawing through `camera`
    pub fn world(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj_matrix().to_cols_array_2d(),
        }
    }

    /// Uniform for screen-space overlays
    pub fn screen(camera: &Camera) -> Self {
        Self {
            view_proj: camera.screen_proj_matrix().to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use glam::Vec4;

    const WORLD: Vec2 = Vec2::new(5000.0, 5000.0);

    fn camera() -> Camera {
        Camera::new(Vec2::ZERO, 1300.0, 700.0)
    }

    fn world_to_screen(camera: &Camera, world_pos: Vec2) -> Vec2 {
        let clip = camera.view_proj_matrix() * Vec4::new(world_pos.x, world_pos.y, 0.0, 1.0);
        Vec2::new((clip.x + 1.0) * 1300.0 / 2.0, (1.0 - clip.y) * 700.0 / 2.0)
    }

    #[test]
    fn test_inside_range_tracks_exactly() {
        let mut camera = camera();
        let focus = Vec2::new(2500.0, 1234.5);
        camera.follow(focus, WORLD);
        assert_eq!(camera.target, focus);
    }

    #[test]
    fn test_clamps_to_lower_bounds() {
        let mut camera = camera();
        camera.follow(Vec2::new(610.0, 275.0), WORLD);
        assert_eq!(camera.target, Vec2::new(650.0, 350.0));

        camera.follow(Vec2::new(-100.0, -100.0), WORLD);
        assert_eq!(camera.target, Vec2::new(650.0, 350.0));
    }

    #[test]
    fn test_clamps_to_upper_bounds() {
        let mut camera = camera();
        camera.follow(Vec2::new(4990.0, 6000.0), WORLD);
        assert_eq!(camera.target, Vec2::new(4350.0, 4650.0));
    }

    #[test]
    fn test_axes_clamp_independently() {
        let mut camera = camera();
        camera.follow(Vec2::new(10.0, 2000.0), WORLD);
        assert_eq!(camera.target, Vec2::new(650.0, 2000.0));
    }

    #[test]
    fn test_small_world_pins_to_centre() {
        let mut camera = camera();
        camera.follow(Vec2::new(50.0, 2000.0), Vec2::new(1000.0, 5000.0));
        assert_eq!(camera.target, Vec2::new(500.0, 2000.0));
    }

    #[test]
    fn test_target_maps_to_screen_centre() {
        let mut camera = camera();
        camera.follow(Vec2::new(2000.0, 3000.0), WORLD);

        let screen = world_to_screen(&camera, camera.target);
        assert_abs_diff_eq!(screen.x, 650.0, epsilon = 1e-2);
        assert_abs_diff_eq!(screen.y, 350.0, epsilon = 1e-2);
    }

    #[test]
    fn test_world_is_y_down_on_screen() {
        let mut camera = camera();
        camera.follow(Vec2::new(2000.0, 3000.0), WORLD);

        let below = world_to_screen(&camera, Vec2::new(2000.0, 3100.0));
        assert_abs_diff_eq!(below.y, 450.0, epsilon = 1e-2);
    }

    #[test]
    fn test_viewport_bounds_follow_target() {
        let mut camera = camera();
        camera.follow(Vec2::new(2000.0, 3000.0), WORLD);

        let bounds = camera.viewport_bounds();
        assert_eq!(bounds.min, Vec2::new(1350.0, 2650.0));
        assert_eq!(bounds.max, Vec2::new(2650.0, 3350.0));
        assert!(bounds.intersects_rect(Vec2::new(2000.0, 3000.0), Vec2::ZERO));
        assert!(!bounds.intersects_rect(Vec2::new(0.0, 0.0), Vec2::splat(64.0)));
    }

    #[test]
    fn test_resize_recentres_offset() {
        let mut camera = camera();
        camera.resize(800.0, 600.0);
        assert_eq!(camera.offset, Vec2::new(400.0, 300.0));
        assert_eq!(camera.half_extents(), Vec2::new(400.0, 300.0));
    }
}
