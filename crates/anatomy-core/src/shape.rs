//! Primitive shape descriptors and analytic ray intersection
//!
//! Shapes are centered on their local origin with their axis along +Y, the
//! same convention the mesh primitives use when they are tessellated for
//! rendering. All intersection routines take a ray already transformed into
//! the local frame and return the smallest non-negative ray parameter.

use glam::Vec3;

const EPSILON: f32 = 1e-6;

/// Geometric descriptor of a part
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Axis-aligned box with full edge lengths
    Cuboid { size: Vec3 },
    /// UV sphere; sectors/stacks only affect tessellation
    Sphere { radius: f32, sectors: u32, stacks: u32 },
    /// Possibly tapered cylinder, `radius_top` at +height/2
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        resolution: u32,
    },
    /// Cylinder of `length` capped by two hemispheres of `radius`
    Capsule {
        radius: f32,
        length: f32,
        cap_segments: u32,
        radial_segments: u32,
    },
}

impl Shape {
    pub fn cuboid(x: f32, y: f32, z: f32) -> Self {
        Shape::Cuboid { size: Vec3::new(x, y, z) }
    }

    pub fn sphere(radius: f32, sectors: u32, stacks: u32) -> Self {
        Shape::Sphere { radius, sectors, stacks }
    }

    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, resolution: u32) -> Self {
        Shape::Cylinder {
            radius_top,
            radius_bottom,
            height,
            resolution,
        }
    }

    pub fn capsule(radius: f32, length: f32, cap_segments: u32, radial_segments: u32) -> Self {
        Shape::Capsule {
            radius,
            length,
            cap_segments,
            radial_segments,
        }
    }

    /// Short name of the primitive kind, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Cuboid { .. } => "box",
            Shape::Sphere { .. } => "sphere",
            Shape::Cylinder { .. } => "cylinder",
            Shape::Capsule { .. } => "capsule",
        }
    }

    /// Whether a local-space point lies inside or on the surface
    pub fn contains_local(&self, point: Vec3) -> bool {
        match *self {
            Shape::Cuboid { size } => {
                let half = size * 0.5;
                point.x.abs() <= half.x && point.y.abs() <= half.y && point.z.abs() <= half.z
            }
            Shape::Sphere { radius, .. } => point.length_squared() <= radius * radius,
            Shape::Cylinder {
                radius_top,
                radius_bottom,
                height,
                ..
            } => {
                if point.y.abs() > height * 0.5 {
                    return false;
                }
                let t = point.y / height + 0.5;
                let radius = radius_bottom + (radius_top - radius_bottom) * t;
                point.x * point.x + point.z * point.z <= radius * radius
            }
            Shape::Capsule { radius, length, .. } => {
                let half_length = length * 0.5;
                let axis = Vec3::new(0.0, point.y.clamp(-half_length, half_length), 0.0);
                point.distance_squared(axis) <= radius * radius
            }
        }
    }

    /// Intersect a local-space ray (unit direction) with this shape.
    ///
    /// Only front faces count: a ray starting inside the shape misses it.
    pub fn intersect_local(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        if self.contains_local(origin) {
            return None;
        }
        match *self {
            Shape::Cuboid { size } => intersect_box(origin, direction, size * 0.5),
            Shape::Sphere { radius, .. } => {
                nearest(sphere_roots(origin, direction, Vec3::ZERO, radius))
            }
            Shape::Cylinder {
                radius_top,
                radius_bottom,
                height,
                ..
            } => intersect_cylinder(origin, direction, radius_top, radius_bottom, height),
            Shape::Capsule { radius, length, .. } => {
                intersect_capsule(origin, direction, radius, length)
            }
        }
    }
}

fn nearest(roots: impl IntoIterator<Item = f32>) -> Option<f32> {
    roots
        .into_iter()
        .filter(|t| t.is_finite() && *t >= 0.0)
        .min_by(|a, b| a.total_cmp(b))
}

/// Both roots of a ray/sphere intersection (may be negative)
fn sphere_roots(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Vec<f32> {
    let oc = origin - center;
    let b = oc.dot(direction);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return Vec::new();
    }
    let sq = disc.sqrt();
    vec![-b - sq, -b + sq]
}

/// Slab test against a box centered on the origin
fn intersect_box(origin: Vec3, direction: Vec3, half: Vec3) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        let h = half[axis];

        if d.abs() < EPSILON {
            // Parallel to this slab: must already be between the planes
            if o.abs() > h {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t0 = (-h - o) * inv;
        let mut t1 = (h - o) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }

    if t_min < 0.0 {
        None
    } else {
        Some(t_min)
    }
}

/// Side and caps of a (tapered) cylinder along Y
fn intersect_cylinder(
    origin: Vec3,
    direction: Vec3,
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
) -> Option<f32> {
    let half_height = height * 0.5;
    // Radius varies linearly with y: r(y) = mid + slope * y
    let slope = (radius_top - radius_bottom) / height;
    let mid = (radius_top + radius_bottom) * 0.5;

    let (ox, oy, oz) = (origin.x, origin.y, origin.z);
    let (dx, dy, dz) = (direction.x, direction.y, direction.z);
    let r0 = mid + slope * oy;

    let a = dx * dx + dz * dz - slope * slope * dy * dy;
    let b = 2.0 * (ox * dx + oz * dz - slope * dy * r0);
    let c = ox * ox + oz * oz - r0 * r0;

    let mut roots = Vec::with_capacity(4);
    if a.abs() < EPSILON {
        if b.abs() > EPSILON {
            roots.push(-c / b);
        }
    } else {
        let disc = b * b - 4.0 * a * c;
        if disc >= 0.0 {
            let sq = disc.sqrt();
            roots.push((-b - sq) / (2.0 * a));
            roots.push((-b + sq) / (2.0 * a));
        }
    }
    // Keep side hits within the height and on the real (non-mirrored) nappe
    roots.retain(|&t| {
        let y = oy + t * dy;
        y.abs() <= half_height && mid + slope * y >= 0.0
    });

    if dy.abs() > EPSILON {
        for (cap_y, cap_radius) in [(half_height, radius_top), (-half_height, radius_bottom)] {
            let t = (cap_y - oy) / dy;
            let p = origin + direction * t;
            if p.x * p.x + p.z * p.z <= cap_radius * cap_radius {
                roots.push(t);
            }
        }
    }

    nearest(roots)
}

/// Capsule along Y: a cylinder section of `length` plus two end spheres
fn intersect_capsule(origin: Vec3, direction: Vec3, radius: f32, length: f32) -> Option<f32> {
    let half_length = length * 0.5;
    let mut roots = Vec::with_capacity(6);

    let a = direction.x * direction.x + direction.z * direction.z;
    if a > EPSILON {
        let b = 2.0 * (origin.x * direction.x + origin.z * direction.z);
        let c = origin.x * origin.x + origin.z * origin.z - radius * radius;
        let disc = b * b - 4.0 * a * c;
        if disc >= 0.0 {
            let sq = disc.sqrt();
            for t in [(-b - sq) / (2.0 * a), (-b + sq) / (2.0 * a)] {
                if (origin.y + t * direction.y).abs() <= half_length {
                    roots.push(t);
                }
            }
        }
    }

    let top = Vec3::new(0.0, half_length, 0.0);
    for t in sphere_roots(origin, direction, top, radius) {
        if origin.y + t * direction.y >= half_length - EPSILON {
            roots.push(t);
        }
    }
    let bottom = -top;
    for t in sphere_roots(origin, direction, bottom, radius) {
        if origin.y + t * direction.y <= -half_length + EPSILON {
            roots.push(t);
        }
    }

    nearest(roots)
}
