//! Layer toggles and the opacity slider

use bevy::prelude::*;
use tracing::warn;

use crate::types::{AnatomyState, ControlEvent};

pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreUpdate, apply_control_events);
    }
}

/// Apply control input in arrival order; the last opacity value wins
pub fn apply_control_events(
    mut events: MessageReader<ControlEvent>,
    mut state: ResMut<AnatomyState>,
) {
    for event in events.read() {
        match *event {
            ControlEvent::LayerToggled { layer, visible } => {
                state.0.set_layer_visible(layer, visible);
            }
            ControlEvent::OpacityChanged(value) => {
                if let Err(e) = state.0.set_opacity(value) {
                    warn!("Ignoring opacity input: {}", e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anatomy_core::{Anatomy, Layer, ViewerConfig};
    use bevy::ecs::system::RunSystemOnce;

    fn world() -> World {
        let mut world = World::new();
        world.init_resource::<Messages<ControlEvent>>();
        world.insert_resource(AnatomyState(
            Anatomy::from_config(&ViewerConfig::default()).unwrap(),
        ));
        world
    }

    #[test]
    fn test_toggle_hides_only_that_layer() {
        let mut world = world();
        world.write_message(ControlEvent::LayerToggled {
            layer: Layer::Muscles,
            visible: false,
        });
        world.run_system_once(apply_control_events).unwrap();

        let state = &world.resource::<AnatomyState>().0;
        assert!(!state.is_layer_visible(Layer::Muscles));
        assert!(state.is_layer_visible(Layer::Skeleton));
        assert!(state.is_layer_visible(Layer::Organs));
        assert!(state.is_layer_visible(Layer::Head));
    }

    #[test]
    fn test_last_opacity_wins() {
        let mut world = world();
        world.write_message(ControlEvent::OpacityChanged(0.3));
        world.write_message(ControlEvent::OpacityChanged(0.6));
        world.run_system_once(apply_control_events).unwrap();

        let state = &world.resource::<AnatomyState>().0;
        assert_eq!(state.opacity(), 0.6);
        assert_eq!(state.opacity_readout(), "0.6");
    }

    #[test]
    fn test_invalid_opacity_is_ignored() {
        let mut world = world();
        world.write_message(ControlEvent::OpacityChanged(0.4));
        world.write_message(ControlEvent::OpacityChanged(f32::NAN));
        world.run_system_once(apply_control_events).unwrap();

        assert_eq!(world.resource::<AnatomyState>().0.opacity(), 0.4);
    }
}
