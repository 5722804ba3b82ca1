//! Perspective camera and orbit navigation math

use glam::{Vec2, Vec3};

use crate::ray::Ray;

/// Elevation limit keeping the orbit away from the poles
const MAX_ELEVATION: f32 = 1.55;

/// Pinhole camera with a Y-up look-at orientation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl PerspectiveCamera {
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y: fov_y_degrees.to_radians(),
            aspect,
            near,
            far,
            position: Vec3::new(0.0, 0.0, 1.0),
            target: Vec3::ZERO,
        }
    }

    pub fn look(&mut self, position: Vec3, target: Vec3) {
        self.position = position;
        self.target = target;
    }

    /// Orthonormal (right, up, forward) basis of the view
    fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = (self.target - self.position).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        (right, up, forward)
    }

    /// Ray from the camera through a point in normalized device coordinates
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let (right, up, forward) = self.basis();
        let half_height = (self.fov_y * 0.5).tan();
        let half_width = half_height * self.aspect;
        let direction = forward + right * (ndc.x * half_width) + up * (ndc.y * half_height);
        Ray::new(self.position, direction)
    }
}

/// Orbit state around a look-at target (azimuth about +Y, measured from +Z)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub azimuth: f32,
    pub elevation: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Radians per pixel of drag
    pub sensitivity: f32,
    /// Fraction of distance per scroll step
    pub zoom_speed: f32,
    /// Fraction of distance per pixel of pan drag
    pub pan_speed: f32,
}

impl OrbitCamera {
    /// Orbit that places the camera at `position` looking at `target`
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let distance = offset.length().max(f32::EPSILON);
        let elevation = (offset.y / distance).clamp(-1.0, 1.0).asin();
        let azimuth = offset.x.atan2(offset.z);
        Self {
            target,
            distance,
            azimuth,
            elevation: elevation.clamp(-MAX_ELEVATION, MAX_ELEVATION),
            min_distance: 0.5,
            max_distance: 50.0,
            sensitivity: 0.005,
            zoom_speed: 0.1,
            pan_speed: 0.002,
        }
    }

    pub fn with_distance_limits(mut self, min_distance: f32, max_distance: f32) -> Self {
        self.min_distance = min_distance;
        self.max_distance = max_distance;
        self.distance = self.distance.clamp(min_distance, max_distance);
        self
    }

    /// Camera position on the orbit sphere
    pub fn position(&self) -> Vec3 {
        let horizontal = self.distance * self.elevation.cos();
        self.target
            + Vec3::new(
                horizontal * self.azimuth.sin(),
                self.distance * self.elevation.sin(),
                horizontal * self.azimuth.cos(),
            )
    }

    /// Rotate around the target from a pointer drag delta in pixels
    pub fn rotate(&mut self, delta: Vec2) {
        self.azimuth -= delta.x * self.sensitivity;
        self.elevation =
            (self.elevation + delta.y * self.sensitivity).clamp(-MAX_ELEVATION, MAX_ELEVATION);
    }

    /// Move target and camera together in the view plane
    pub fn pan(&mut self, delta: Vec2) {
        let forward = (self.target - self.position()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        let speed = self.distance * self.pan_speed;
        // Content follows the pointer, so the target moves the other way
        self.target -= right * delta.x * speed;
        self.target += up * delta.y * speed;
    }

    /// Dolly toward (positive scroll) or away from the target
    pub fn zoom(&mut self, scroll: f32) {
        let factor = (1.0 - scroll * self.zoom_speed).max(0.1);
        self.distance = (self.distance * factor).clamp(self.min_distance, self.max_distance);
    }

    /// Copy the orbit pose into a perspective camera
    pub fn apply(&self, camera: &mut PerspectiveCamera) {
        camera.look(self.position(), self.target);
    }
}
