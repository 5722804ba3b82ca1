//! Parts: named primitives with material, transform and visibility

use std::fmt;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::layer::Layer;
use crate::ray::Ray;
use crate::shape::Shape;

/// Index of a part inside an [`crate::Anatomy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartId(pub usize);

/// 24-bit RGB color written as `0xRRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0x000000);
    pub const WHITE: Rgb = Rgb(0xffffff);

    /// Channels as 0.0-1.0 sRGB floats
    pub fn to_f32_array(self) -> [f32; 3] {
        let r = ((self.0 >> 16) & 0xff) as f32 / 255.0;
        let g = ((self.0 >> 8) & 0xff) as f32 / 255.0;
        let b = (self.0 & 0xff) as f32 / 255.0;
        [r, g, b]
    }

    /// Parse "#rrggbb", "0xrrggbb" or "rrggbb"
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let hex = s
            .strip_prefix('#')
            .or_else(|| s.strip_prefix("0x"))
            .unwrap_or(s);
        if hex.len() != 6 {
            return None;
        }
        u32::from_str_radix(hex, 16).ok().map(Rgb)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::parse(&value).ok_or_else(|| format!("invalid color: {}", value))
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

/// Surface properties of a part
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartMaterial {
    pub color: Rgb,
    pub metalness: f32,
    pub roughness: f32,
    pub opacity: f32,
    /// Whether the renderer should blend this material
    pub transparent: bool,
    /// Self-illumination; `None` when the material has no emissive channel
    pub emissive: Option<Rgb>,
}

impl PartMaterial {
    /// Standard lit material with an emissive channel set to black
    pub fn standard(color: Rgb) -> Self {
        Self {
            color,
            metalness: 0.0,
            roughness: 1.0,
            opacity: 1.0,
            transparent: false,
            emissive: Some(Rgb::BLACK),
        }
    }

    pub fn with_metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness;
        self
    }

    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Material without an emissive channel
    pub fn without_emissive(mut self) -> Self {
        self.emissive = None;
        self
    }

    /// Whether the emissive channel currently glows
    pub fn is_emissive(&self) -> bool {
        matches!(self.emissive, Some(c) if c != Rgb::BLACK)
    }
}

/// Authoring description of a part, before it is placed in the scene
#[derive(Debug, Clone, PartialEq)]
pub struct PartSpec {
    pub name: String,
    pub layer: Layer,
    pub shape: Shape,
    pub material: PartMaterial,
    pub translation: Vec3,
    /// Rotation about Z in radians
    pub rotation_z: f32,
}

impl PartSpec {
    pub fn new(name: impl Into<String>, layer: Layer, shape: Shape, material: PartMaterial) -> Self {
        Self {
            name: name.into(),
            layer,
            shape,
            material,
            translation: Vec3::ZERO,
            rotation_z: 0.0,
        }
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.translation = Vec3::new(x, y, z);
        self
    }

    pub fn rotated_z(mut self, angle: f32) -> Self {
        self.rotation_z = angle;
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Left/right pair cloned from one template.
    ///
    /// Both sides share shape, material, height, depth and rotation; only the
    /// name and the x coordinate differ.
    pub fn pair(&self, left: (&str, f32), right: (&str, f32)) -> [PartSpec; 2] {
        let side = |(name, x): (&str, f32)| {
            let mut spec = self.clone().named(name);
            spec.translation.x = x;
            spec
        };
        [side(left), side(right)]
    }

    /// Left/right pair placed symmetrically about x = 0
    pub fn mirrored(&self, left: &str, right: &str, x: f32) -> [PartSpec; 2] {
        self.pair((left, -x.abs()), (right, x.abs()))
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_z(self.rotation_z)
    }
}

/// A part placed in the scene, with its mutable runtime state
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub name: String,
    pub layer: Layer,
    pub shape: Shape,
    pub material: PartMaterial,
    pub translation: Vec3,
    pub rotation: Quat,
    pub visible: bool,
}

impl From<PartSpec> for Part {
    fn from(spec: PartSpec) -> Self {
        let rotation = spec.rotation();
        Self {
            name: spec.name,
            layer: spec.layer,
            shape: spec.shape,
            material: spec.material,
            translation: spec.translation,
            rotation,
            visible: true,
        }
    }
}

impl Part {
    /// Label shown in the info panel
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Parte"
        } else {
            &self.name
        }
    }

    /// Ray parameter of the first intersection with this part, if any
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let inverse = self.rotation.inverse();
        let origin = inverse * (ray.origin - self.translation);
        let direction = inverse * ray.direction;
        self.shape.intersect_local(origin, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_parse_and_display() {
        assert_eq!(Rgb::parse("#f8fafc"), Some(Rgb(0xf8fafc)));
        assert_eq!(Rgb::parse("0x222222"), Some(Rgb(0x222222)));
        assert_eq!(Rgb::parse("ffa94d"), Some(Rgb(0xffa94d)));
        assert_eq!(Rgb::parse("#fff"), None);
        assert_eq!(Rgb::parse("#zzzzzz"), None);
        assert_eq!(Rgb(0x0000ff).to_string(), "#0000ff");
    }

    #[test]
    fn test_rgb_channels() {
        let [r, g, b] = Rgb(0xff8000).to_f32_array();
        assert_eq!(r, 1.0);
        assert!((g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(b, 0.0);
    }

    #[test]
    fn test_pair_only_changes_name_and_x() {
        let template = PartSpec::new(
            "template",
            Layer::Muscles,
            Shape::cylinder(0.1, 0.12, 0.9, 12),
            PartMaterial::standard(Rgb(0xff6b6b)),
        )
        .at(0.0, 1.0, 0.2)
        .rotated_z(0.4);

        let [left, right] = template.mirrored("izq", "der", 0.9);
        assert_eq!(left.name, "izq");
        assert_eq!(right.name, "der");
        assert_eq!(left.translation, Vec3::new(-0.9, 1.0, 0.2));
        assert_eq!(right.translation, Vec3::new(0.9, 1.0, 0.2));
        assert_eq!(left.shape, right.shape);
        assert_eq!(left.material, right.material);
        assert_eq!(left.rotation_z, right.rotation_z);
    }

    #[test]
    fn test_intersect_uses_part_transform() {
        let part: Part = PartSpec::new(
            "bar",
            Layer::Skeleton,
            Shape::cuboid(2.0, 0.2, 0.2),
            PartMaterial::standard(Rgb::WHITE),
        )
        .at(0.0, 1.0, 0.0)
        .rotated_z(std::f32::consts::FRAC_PI_2)
        .into();

        // Rotated upright, the bar now spans y in [0, 2] at x = 0
        let ray = Ray::new(Vec3::new(0.0, 1.8, 5.0), Vec3::NEG_Z);
        let t = part.intersect(&ray).unwrap();
        assert!((t - 4.9).abs() < 1e-4);

        let ray = Ray::new(Vec3::new(0.8, 1.0, 5.0), Vec3::NEG_Z);
        assert!(part.intersect(&ray).is_none());
    }

    #[test]
    fn test_empty_name_displays_placeholder() {
        let mut part: Part = PartSpec::new(
            "",
            Layer::Organs,
            Shape::sphere(0.1, 8, 8),
            PartMaterial::standard(Rgb::WHITE),
        )
        .into();
        assert_eq!(part.display_name(), "Parte");
        part.name = "Corazón".to_string();
        assert_eq!(part.display_name(), "Corazón");
    }
}
