//! Render surface sizing and pointer coordinate conversion

use glam::Vec2;

/// Size of the render surface in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    /// Width over height, as used for the camera projection
    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(f32::EPSILON)
    }
}

/// Bounding rectangle of the render surface in client coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub fn from_size(size: SurfaceSize) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: size.width,
            height: size.height,
        }
    }

    pub fn contains(&self, client: Vec2) -> bool {
        client.x >= self.left
            && client.x <= self.left + self.width
            && client.y >= self.top
            && client.y <= self.top + self.height
    }
}

/// Fractions of the host viewport given to the render surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width_fraction: f32,
    pub height_fraction: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width_fraction: 0.72,
            height_fraction: 0.82,
        }
    }
}

impl Viewport {
    pub fn new(width_fraction: f32, height_fraction: f32) -> Self {
        Self {
            width_fraction,
            height_fraction,
        }
    }

    /// Surface dimensions for a host viewport of the given size
    pub fn surface_size(&self, host_width: f32, host_height: f32) -> SurfaceSize {
        SurfaceSize {
            width: host_width * self.width_fraction,
            height: host_height * self.height_fraction,
        }
    }
}

/// Convert client coordinates to normalized device coordinates.
///
/// NDC x runs -1 (left) to +1 (right) and y runs -1 (bottom) to +1 (top).
pub fn client_to_ndc(client: Vec2, rect: SurfaceRect) -> Vec2 {
    let x = ((client.x - rect.left) / rect.width) * 2.0 - 1.0;
    let y = -((client.y - rect.top) / rect.height) * 2.0 + 1.0;
    Vec2::new(x, y)
}
