//! The hand-authored body: four layers of primitive parts
//!
//! Geometry and placement are constants. Building is deterministic and total;
//! the only check is that every display name is unique, since names double as
//! description lookup keys.

use std::collections::HashSet;

use crate::error::BodyError;
use crate::layer::Layer;
use crate::part::{PartMaterial, PartSpec, Rgb};
use crate::shape::Shape;

const BONE: Rgb = Rgb(0xf2e8cf);
const MUSCLE: Rgb = Rgb(0xff6b6b);
const HEART: Rgb = Rgb(0xcc0000);
const LUNG: Rgb = Rgb(0x88c0ff);
const LIVER: Rgb = Rgb(0xffa94d);
const SKIN: Rgb = Rgb(0xffe0bd);
const BRAIN: Rgb = Rgb(0xffc0cb);
const EYE: Rgb = Rgb(0x222222);

/// Number of stacked vertebra boxes in the spine
pub const VERTEBRA_COUNT: usize = 10;

/// Ordered part specs for every layer
#[derive(Debug, Clone, PartialEq)]
pub struct BodyPlan {
    pub parts: Vec<PartSpec>,
}

impl BodyPlan {
    /// Parts belonging to one layer, in build order
    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &PartSpec> {
        self.parts.iter().filter(move |p| p.layer == layer)
    }

    pub fn count(&self, layer: Layer) -> usize {
        self.layer(layer).count()
    }

    /// Reject plans where two parts share a display name
    pub fn validate(&self) -> Result<(), BodyError> {
        let mut seen = HashSet::new();
        for part in &self.parts {
            if !seen.insert(part.name.as_str()) {
                return Err(BodyError::DuplicateName(part.name.clone()));
            }
        }
        Ok(())
    }
}

/// Build the full body plan
pub fn build_body() -> BodyPlan {
    let mut parts = Vec::new();
    parts.extend(skeleton());
    parts.extend(muscles());
    parts.extend(organs());
    parts.extend(head());
    BodyPlan { parts }
}

fn bone() -> PartMaterial {
    PartMaterial::standard(BONE)
        .with_metalness(0.1)
        .with_roughness(0.8)
}

fn muscle() -> PartMaterial {
    PartMaterial::standard(MUSCLE)
        .with_metalness(0.1)
        .with_roughness(0.7)
}

/// Spine, pelvis, skull and upper arm bones
pub fn skeleton() -> Vec<PartSpec> {
    let mut parts: Vec<PartSpec> = (0..VERTEBRA_COUNT)
        .map(|i| {
            PartSpec::new(
                format!("Vertebra {}", i + 1),
                Layer::Skeleton,
                Shape::cuboid(0.15, 0.22, 0.12),
                bone(),
            )
            .at(0.0, 0.9 - i as f32 * 0.18, 0.0)
        })
        .collect();

    parts.push(
        PartSpec::new("Pelvis", Layer::Skeleton, Shape::cuboid(0.6, 0.18, 0.35), bone())
            .at(0.0, -0.1, 0.0),
    );

    parts.push(
        PartSpec::new("Cráneo (hueso)", Layer::Skeleton, Shape::sphere(0.28, 16, 16), bone())
            .at(0.0, 1.9, 0.0),
    );

    let humerus = PartSpec::new(
        "Húmero",
        Layer::Skeleton,
        Shape::cylinder(0.06, 0.06, 0.8, 10),
        bone(),
    )
    .at(0.0, 1.0, 0.0)
    .rotated_z(0.4);
    parts.extend(humerus.mirrored("Húmero izquierdo", "Húmero derecho", 0.6));

    parts
}

/// Torso, legs and arms
pub fn muscles() -> Vec<PartSpec> {
    let mut parts = vec![PartSpec::new(
        "Músculos (torso)",
        Layer::Muscles,
        Shape::capsule(0.5, 1.0, 4, 8),
        muscle(),
    )
    .at(0.0, 0.8, 0.0)];

    let leg = PartSpec::new(
        "Músculo pierna",
        Layer::Muscles,
        Shape::cylinder(0.18, 0.22, 1.0, 12),
        muscle(),
    )
    .at(0.0, -0.8, 0.0);
    parts.extend(leg.mirrored("Músculo pierna izquierda", "Músculo pierna derecha", 0.26));

    let arm = PartSpec::new(
        "Músculo brazo",
        Layer::Muscles,
        Shape::cylinder(0.1, 0.12, 0.9, 12),
        muscle(),
    )
    .at(0.0, 1.0, 0.0)
    .rotated_z(0.4);
    parts.extend(arm.mirrored("Músculo brazo izquierdo", "Músculo brazo derecho", 0.9));

    parts
}

/// Heart, lungs and liver
pub fn organs() -> Vec<PartSpec> {
    let mut parts = vec![PartSpec::new(
        "Corazón",
        Layer::Organs,
        Shape::sphere(0.12, 16, 16),
        PartMaterial::standard(HEART).with_metalness(0.1),
    )
    .at(0.1, 0.9, 0.18)];

    // The lungs sit off-center around the heart, so the pair is not mirrored about x = 0
    let lung = PartSpec::new(
        "Pulmón",
        Layer::Organs,
        Shape::sphere(0.18, 16, 16),
        PartMaterial::standard(LUNG)
            .with_metalness(0.05)
            .with_roughness(0.7)
            .with_opacity(0.95),
    )
    .at(0.0, 1.02, 0.08);
    parts.extend(lung.pair(("Pulmón izquierdo", -0.18), ("Pulmón derecho", 0.38)));

    parts.push(
        PartSpec::new(
            "Hígado",
            Layer::Organs,
            Shape::cuboid(0.34, 0.16, 0.16),
            PartMaterial::standard(LIVER),
        )
        .at(0.35, 0.68, 0.12),
    );

    parts
}

/// Skin, brain and eyes
pub fn head() -> Vec<PartSpec> {
    let mut parts = vec![
        PartSpec::new(
            "Cabeza (piel)",
            Layer::Head,
            Shape::sphere(0.3, 24, 20),
            PartMaterial::standard(SKIN).with_metalness(0.05),
        )
        .at(0.0, 1.9, 0.0),
        // Nested inside the skin at the same center
        PartSpec::new(
            "Cerebro",
            Layer::Head,
            Shape::sphere(0.18, 18, 16),
            PartMaterial::standard(BRAIN).with_metalness(0.05),
        )
        .at(0.0, 1.9, 0.0),
    ];

    let eye = PartSpec::new(
        "Ojo",
        Layer::Head,
        Shape::sphere(0.03, 8, 8),
        PartMaterial::standard(EYE),
    )
    .at(0.0, 1.92, 0.27);
    parts.extend(eye.mirrored("Ojo izquierdo", "Ojo derecho", 0.08));

    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_kind(plan: &BodyPlan, layer: Layer, kind: &str) -> usize {
        plan.layer(layer).filter(|p| p.shape.kind() == kind).count()
    }

    #[test]
    fn test_layer_counts() {
        let plan = build_body();

        assert_eq!(plan.count(Layer::Skeleton), 14);
        assert_eq!(count_kind(&plan, Layer::Skeleton, "box"), 11);
        assert_eq!(count_kind(&plan, Layer::Skeleton, "sphere"), 1);
        assert_eq!(count_kind(&plan, Layer::Skeleton, "cylinder"), 2);

        assert_eq!(plan.count(Layer::Muscles), 5);
        assert_eq!(count_kind(&plan, Layer::Muscles, "capsule"), 1);
        assert_eq!(count_kind(&plan, Layer::Muscles, "cylinder"), 4);

        assert_eq!(plan.count(Layer::Organs), 4);
        assert_eq!(count_kind(&plan, Layer::Organs, "sphere"), 3);
        assert_eq!(count_kind(&plan, Layer::Organs, "box"), 1);

        assert_eq!(plan.count(Layer::Head), 4);
        assert_eq!(count_kind(&plan, Layer::Head, "sphere"), 4);
    }

    #[test]
    fn test_build_is_deterministic() {
        assert_eq!(build_body(), build_body());
    }

    #[test]
    fn test_names_are_unique() {
        assert!(build_body().validate().is_ok());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut plan = build_body();
        let dup = plan.parts[0].clone();
        plan.parts.push(dup);
        match plan.validate() {
            Err(BodyError::DuplicateName(name)) => assert_eq!(name, "Vertebra 1"),
            other => panic!("expected duplicate name error, got {:?}", other),
        }
    }

    #[test]
    fn test_vertebrae_are_stacked() {
        let plan = build_body();
        let ys: Vec<f32> = plan
            .layer(Layer::Skeleton)
            .filter(|p| p.name.starts_with("Vertebra"))
            .map(|p| p.translation.y)
            .collect();
        assert_eq!(ys.len(), VERTEBRA_COUNT);
        assert!((ys[0] - 0.9).abs() < 1e-6);
        assert!((ys[9] - (0.9 - 9.0 * 0.18)).abs() < 1e-5);
        assert!(ys.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_brain_nested_in_head() {
        let plan = build_body();
        let find = |name: &str| plan.parts.iter().find(|p| p.name == name).unwrap();
        assert_eq!(find("Cerebro").translation, find("Cabeza (piel)").translation);
    }

    #[test]
    fn test_lungs_keep_authored_offsets() {
        let plan = build_body();
        let find = |name: &str| plan.parts.iter().find(|p| p.name == name).unwrap();
        assert!((find("Pulmón izquierdo").translation.x + 0.18).abs() < 1e-6);
        assert!((find("Pulmón derecho").translation.x - 0.38).abs() < 1e-6);
        assert_eq!(find("Pulmón izquierdo").material.opacity, 0.95);
        assert!(!find("Pulmón izquierdo").material.transparent);
    }
}
