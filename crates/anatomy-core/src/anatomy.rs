//! Viewer state: parts, layer groups, opacity, highlight and info panel
//!
//! `Anatomy` is the single owner of everything the controls and the pick
//! handler mutate. Renderers read it and mirror it onto their own objects.

use tracing::debug;

use crate::body::{build_body, BodyPlan};
use crate::config::ViewerConfig;
use crate::describe::DescriptionIndex;
use crate::error::BodyError;
use crate::layer::Layer;
use crate::part::{Part, PartId, Rgb};
use crate::ray::{Hit, Ray};

/// Ordered members of one layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartGroup {
    pub layer: Layer,
    pub parts: Vec<PartId>,
}

/// Content of the info panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoCard {
    pub name: String,
    pub description: String,
}

/// Result of a successful pick
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub part: PartId,
    /// Part whose highlight was cleared to make room for this one
    pub previous: Option<PartId>,
    pub distance: f32,
    pub info: InfoCard,
}

#[derive(Debug, Clone)]
pub struct Anatomy {
    parts: Vec<Part>,
    groups: Vec<PartGroup>,
    descriptions: DescriptionIndex,
    highlight_tint: Rgb,
    include_hidden: bool,
    highlighted: Option<PartId>,
    opacity: f32,
    info: Option<InfoCard>,
}

impl Anatomy {
    /// Place every part of a plan; fails if two parts share a name
    pub fn new(plan: BodyPlan, descriptions: DescriptionIndex) -> Result<Self, BodyError> {
        plan.validate()?;

        let mut groups: Vec<PartGroup> = Layer::ALL
            .iter()
            .map(|&layer| PartGroup {
                layer,
                parts: Vec::new(),
            })
            .collect();

        let parts: Vec<Part> = plan.parts.into_iter().map(Part::from).collect();
        for (i, part) in parts.iter().enumerate() {
            groups[part.layer.index()].parts.push(PartId(i));
        }

        Ok(Self {
            parts,
            groups,
            descriptions,
            highlight_tint: Rgb(0x222222),
            include_hidden: true,
            highlighted: None,
            opacity: 1.0,
            info: None,
        })
    }

    /// Full body with descriptions, tint and pick settings from configuration
    pub fn from_config(config: &ViewerConfig) -> Result<Self, BodyError> {
        Ok(Self::new(build_body(), config.description_index())?
            .with_highlight_tint(config.scene.highlight)
            .with_include_hidden(config.picking.include_hidden))
    }

    pub fn with_highlight_tint(mut self, tint: Rgb) -> Self {
        self.highlight_tint = tint;
        self
    }

    pub fn with_include_hidden(mut self, include_hidden: bool) -> Self {
        self.include_hidden = include_hidden;
        self
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn part(&self, id: PartId) -> Option<&Part> {
        self.parts.get(id.0)
    }

    pub fn part_ids(&self) -> impl Iterator<Item = PartId> {
        (0..self.parts.len()).map(PartId)
    }

    pub fn group(&self, layer: Layer) -> &PartGroup {
        &self.groups[layer.index()]
    }

    /// Look up a part by exact display name
    pub fn find(&self, name: &str) -> Option<PartId> {
        self.parts.iter().position(|p| p.name == name).map(PartId)
    }

    pub fn descriptions(&self) -> &DescriptionIndex {
        &self.descriptions
    }

    /// Show or hide every part of one layer
    pub fn set_layer_visible(&mut self, layer: Layer, visible: bool) {
        let Self { parts, groups, .. } = self;
        for id in &groups[layer.index()].parts {
            parts[id.0].visible = visible;
        }
        debug!(%layer, visible, "Layer visibility changed");
    }

    /// Whether every part of the layer is visible
    pub fn is_layer_visible(&self, layer: Layer) -> bool {
        self.group(layer)
            .parts
            .iter()
            .all(|id| self.parts[id.0].visible)
    }

    /// Apply one opacity to every part; values are clamped to [0, 1]
    pub fn set_opacity(&mut self, value: f32) -> Result<f32, BodyError> {
        if value.is_nan() {
            return Err(BodyError::InvalidOpacity(value));
        }
        let opacity = value.clamp(0.0, 1.0);
        for part in &mut self.parts {
            part.material.transparent = opacity < 1.0;
            part.material.opacity = opacity;
        }
        self.opacity = opacity;
        debug!(opacity, "Opacity changed");
        Ok(opacity)
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Text for the numeric readout next to the slider
    pub fn opacity_readout(&self) -> String {
        format!("{}", self.opacity)
    }

    /// Nearest part hit by the ray
    pub fn pick(&self, ray: &Ray) -> Option<Hit> {
        self.parts
            .iter()
            .enumerate()
            .filter(|(_, part)| self.include_hidden || part.visible)
            .filter_map(|(i, part)| {
                part.intersect(ray).map(|distance| Hit {
                    part: PartId(i),
                    distance,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    /// Move the highlight to `id`, returning the part it was taken from
    pub fn highlight(&mut self, id: PartId) -> Option<PartId> {
        let previous = self.clear_highlight();

        let tint = self.highlight_tint;
        if let Some(part) = self.parts.get_mut(id.0) {
            match part.material.emissive.as_mut() {
                Some(emissive) => *emissive = tint,
                None => {
                    debug!(part = %part.name, "Material has no emissive channel, adding one");
                    part.material.emissive = Some(tint);
                }
            }
            self.highlighted = Some(id);
        }

        previous
    }

    /// Remove the current highlight, if any
    pub fn clear_highlight(&mut self) -> Option<PartId> {
        let previous = self.highlighted.take()?;
        if let Some(part) = self.parts.get_mut(previous.0) {
            if let Some(emissive) = part.material.emissive.as_mut() {
                *emissive = Rgb::BLACK;
            }
        }
        Some(previous)
    }

    pub fn highlighted(&self) -> Option<PartId> {
        self.highlighted
    }

    pub fn highlight_tint(&self) -> Rgb {
        self.highlight_tint
    }

    /// Pick with a ray and, on a hit, highlight the part and fill the info panel.
    ///
    /// A miss leaves highlight and info panel untouched.
    pub fn select(&mut self, ray: &Ray) -> Option<Selection> {
        let hit = self.pick(ray)?;
        let previous = self.highlight(hit.part);

        let part = &self.parts[hit.part.0];
        let info = InfoCard {
            name: part.display_name().to_string(),
            description: self.descriptions.describe(&part.name).to_string(),
        };
        debug!(part = %info.name, distance = hit.distance, "Part selected");
        self.info = Some(info.clone());

        Some(Selection {
            part: hit.part,
            previous,
            distance: hit.distance,
            info,
        })
    }

    pub fn info(&self) -> Option<&InfoCard> {
        self.info.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::FALLBACK_DESCRIPTION;
    use crate::part::{PartMaterial, PartSpec};
    use crate::shape::Shape;
    use glam::Vec3;

    fn anatomy() -> Anatomy {
        Anatomy::new(build_body(), DescriptionIndex::builtin()).unwrap()
    }

    /// Picks limited to visible parts, so hiding a layer isolates the rest
    fn visible_only() -> Anatomy {
        anatomy().with_include_hidden(false)
    }

    fn front_ray(x: f32, y: f32) -> Ray {
        Ray::new(Vec3::new(x, y, 5.0), Vec3::NEG_Z)
    }

    fn glowing(anatomy: &Anatomy) -> Vec<PartId> {
        anatomy
            .part_ids()
            .filter(|id| anatomy.part(*id).unwrap().material.is_emissive())
            .collect()
    }

    #[test]
    fn test_groups_partition_parts() {
        let anatomy = anatomy();
        let total: usize = Layer::ALL.iter().map(|l| anatomy.group(*l).parts.len()).sum();
        assert_eq!(total, anatomy.parts().len());
        for layer in Layer::ALL {
            for id in &anatomy.group(layer).parts {
                assert_eq!(anatomy.part(*id).unwrap().layer, layer);
            }
        }
    }

    #[test]
    fn test_toggle_layer_only_touches_its_group() {
        for layer in Layer::ALL {
            let mut anatomy = anatomy();
            anatomy.set_layer_visible(layer, false);
            for part in anatomy.parts() {
                assert_eq!(part.visible, part.layer != layer, "{}", part.name);
            }
            assert!(!anatomy.is_layer_visible(layer));

            anatomy.set_layer_visible(layer, true);
            assert!(anatomy.parts().iter().all(|p| p.visible));
        }
    }

    #[test]
    fn test_toggle_restores_only_that_group() {
        let mut anatomy = anatomy();
        anatomy.set_layer_visible(Layer::Organs, false);
        anatomy.set_layer_visible(Layer::Head, false);
        anatomy.set_layer_visible(Layer::Organs, true);
        assert!(anatomy.is_layer_visible(Layer::Organs));
        assert!(!anatomy.is_layer_visible(Layer::Head));
    }

    #[test]
    fn test_opacity_applies_to_every_part() {
        let mut anatomy = anatomy();
        for v in [0.0, 0.25, 0.5, 0.95, 1.0] {
            anatomy.set_opacity(v).unwrap();
            for part in anatomy.parts() {
                assert_eq!(part.material.opacity, v);
                assert_eq!(part.material.transparent, v < 1.0);
            }
        }
    }

    #[test]
    fn test_opacity_clamps_and_rejects_nan() {
        let mut anatomy = anatomy();
        assert_eq!(anatomy.set_opacity(1.7).unwrap(), 1.0);
        assert_eq!(anatomy.set_opacity(-0.2).unwrap(), 0.0);

        anatomy.set_opacity(0.5).unwrap();
        assert!(matches!(
            anatomy.set_opacity(f32::NAN),
            Err(BodyError::InvalidOpacity(_))
        ));
        assert_eq!(anatomy.opacity(), 0.5);
        assert!(anatomy.parts().iter().all(|p| p.material.opacity == 0.5));
    }

    #[test]
    fn test_opacity_readout() {
        let mut anatomy = anatomy();
        assert_eq!(anatomy.opacity_readout(), "1");
        anatomy.set_opacity(0.5).unwrap();
        assert_eq!(anatomy.opacity_readout(), "0.5");
    }

    #[test]
    fn test_pick_single_part_fills_info() {
        let mut anatomy = visible_only();
        anatomy.set_layer_visible(Layer::Muscles, false);

        let selection = anatomy.select(&front_ray(0.1, 0.9)).unwrap();
        let heart = anatomy.find("Corazón").unwrap();
        assert_eq!(selection.part, heart);
        assert_eq!(anatomy.highlighted(), Some(heart));
        assert_eq!(selection.info.name, "Corazón");
        assert_eq!(
            selection.info.description,
            DescriptionIndex::builtin().describe("Corazón")
        );
        assert_eq!(anatomy.info(), Some(&selection.info));
        assert_eq!(
            anatomy.part(heart).unwrap().material.emissive,
            Some(Rgb(0x222222))
        );
    }

    #[test]
    fn test_pick_unlisted_part_uses_fallback() {
        let mut anatomy = visible_only();
        anatomy.set_layer_visible(Layer::Muscles, false);
        anatomy.set_layer_visible(Layer::Organs, false);
        anatomy.set_layer_visible(Layer::Head, false);

        // Through the upper spine, below the skull
        let selection = anatomy.select(&front_ray(0.0, 0.9)).unwrap();
        assert_eq!(selection.info.name, "Vertebra 1");
        assert_eq!(selection.info.description, FALLBACK_DESCRIPTION);
    }

    #[test]
    fn test_nearest_part_wins() {
        let mut anatomy = anatomy();
        // The torso capsule wraps the heart
        let selection = anatomy.select(&front_ray(0.1, 0.9)).unwrap();
        assert_eq!(selection.info.name, "Músculos (torso)");

        // Skin is in front of the nested brain
        let selection = anatomy.select(&front_ray(0.0, 1.8)).unwrap();
        assert_eq!(selection.info.name, "Cabeza (piel)");
    }

    #[test]
    fn test_second_pick_moves_highlight() {
        let mut anatomy = visible_only();
        anatomy.set_layer_visible(Layer::Muscles, false);

        let first = anatomy.select(&front_ray(0.1, 0.9)).unwrap();
        assert_eq!(glowing(&anatomy), vec![first.part]);

        let second = anatomy.select(&front_ray(0.35, 0.68)).unwrap();
        assert_eq!(second.info.name, "Hígado");
        assert_eq!(second.previous, Some(first.part));
        assert_eq!(glowing(&anatomy), vec![second.part]);
        assert_eq!(
            anatomy.part(first.part).unwrap().material.emissive,
            Some(Rgb::BLACK)
        );
    }

    #[test]
    fn test_miss_changes_nothing() {
        let mut anatomy = visible_only();
        anatomy.set_layer_visible(Layer::Muscles, false);
        anatomy.select(&front_ray(0.1, 0.9)).unwrap();
        let before = anatomy.clone();

        let miss = Ray::new(Vec3::new(5.0, 5.0, 5.0), Vec3::X);
        assert!(anatomy.select(&miss).is_none());
        assert_eq!(anatomy.highlighted(), before.highlighted());
        assert_eq!(anatomy.info(), before.info());
        assert_eq!(anatomy.parts(), before.parts());
    }

    #[test]
    fn test_hidden_parts_are_pickable() {
        let mut anatomy = anatomy();
        anatomy.set_layer_visible(Layer::Muscles, false);
        let hit = anatomy.pick(&front_ray(0.0, -0.1)).unwrap();
        assert_eq!(anatomy.part(hit.part).unwrap().name, "Músculos (torso)");

        let mut anatomy = visible_only();
        anatomy.set_layer_visible(Layer::Muscles, false);
        let hit = anatomy.pick(&front_ray(0.0, -0.1)).unwrap();
        assert_eq!(anatomy.part(hit.part).unwrap().name, "Pelvis");
    }

    #[test]
    fn test_hidden_layer_still_selects_its_part() {
        let mut anatomy = anatomy();
        anatomy.set_layer_visible(Layer::Organs, false);
        anatomy.set_layer_visible(Layer::Muscles, false);

        // Right edge of the liver, just outside the torso
        let selection = anatomy.select(&front_ray(0.51, 0.68)).unwrap();
        assert_eq!(selection.info.name, "Hígado");
        assert_eq!(anatomy.highlighted(), Some(selection.part));

        let mut anatomy = visible_only();
        anatomy.set_layer_visible(Layer::Organs, false);
        assert!(anatomy.select(&front_ray(0.51, 0.68)).is_none());
    }

    #[test]
    fn test_origin_inside_torso_sees_past_it() {
        let anatomy = anatomy();
        // Straight down from inside the torso, behind the lung
        let ray = Ray::new(Vec3::new(0.45, 1.0, -0.1), Vec3::NEG_Y);
        let hit = anatomy.pick(&ray).unwrap();
        assert_eq!(
            anatomy.part(hit.part).unwrap().name,
            "Músculo pierna derecha"
        );
    }

    #[test]
    fn test_highlight_synthesizes_missing_emissive() {
        let plan = BodyPlan {
            parts: vec![PartSpec::new(
                "Bazo",
                Layer::Organs,
                Shape::sphere(0.1, 8, 8),
                PartMaterial::standard(Rgb(0x884488)).without_emissive(),
            )],
        };
        let mut anatomy = Anatomy::new(plan, DescriptionIndex::builtin()).unwrap();
        let id = anatomy.find("Bazo").unwrap();
        assert_eq!(anatomy.part(id).unwrap().material.emissive, None);

        anatomy.highlight(id);
        assert_eq!(
            anatomy.part(id).unwrap().material.emissive,
            Some(Rgb(0x222222))
        );
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut plan = build_body();
        plan.parts[1].name = plan.parts[0].name.clone();
        assert!(matches!(
            Anatomy::new(plan, DescriptionIndex::builtin()),
            Err(BodyError::DuplicateName(_))
        ));
    }

    #[test]
    fn test_from_config_applies_overrides() {
        let mut config = ViewerConfig::default();
        config.scene.highlight = Rgb(0x00ff00);
        config.picking.include_hidden = false;
        config
            .descriptions
            .insert("Vertebra 1".to_string(), "Primera vértebra.".to_string());

        let mut anatomy = Anatomy::from_config(&config).unwrap();
        anatomy.set_layer_visible(Layer::Muscles, false);
        anatomy.set_layer_visible(Layer::Organs, false);
        anatomy.set_layer_visible(Layer::Head, false);
        let selection = anatomy.select(&front_ray(0.0, 0.9)).unwrap();
        assert_eq!(selection.info.description, "Primera vértebra.");
        assert_eq!(
            anatomy.part(selection.part).unwrap().material.emissive,
            Some(Rgb(0x00ff00))
        );
    }
}
