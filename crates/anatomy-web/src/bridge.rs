//! Queues between DOM callbacks and the Bevy schedule
//!
//! Browser event listeners run outside the ECS, so they push into shared
//! queues that systems drain once per frame.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anatomy_scene::{AnatomyState, ControlEvent, HostResized, PartSelected};
use bevy::prelude::*;
use tracing::warn;

use crate::dom;

/// Control input collected by the checkbox and slider listeners
#[derive(Resource, Clone, Default)]
pub struct PendingControls(pub Arc<Mutex<VecDeque<ControlEvent>>>);

impl PendingControls {
    pub fn push(&self, event: ControlEvent) {
        if let Ok(mut queue) = self.0.lock() {
            queue.push_back(event);
        }
    }
}

/// Latest host size reported by the window resize listener
#[derive(Resource, Clone, Default)]
pub struct PendingResize(pub Arc<Mutex<Option<HostResized>>>);

impl PendingResize {
    pub fn set(&self, width: f32, height: f32) {
        if let Ok(mut pending) = self.0.lock() {
            *pending = Some(HostResized { width, height });
        }
    }
}

/// Host page elements the viewer writes into
#[derive(Resource, Clone, Debug)]
pub struct HostOutputs {
    pub readout_id: String,
    pub info_id: String,
}

/// Slider values arrive as strings; unparsable input becomes NaN and is
/// rejected downstream
pub fn parse_opacity(raw: &str) -> f32 {
    raw.trim().parse().unwrap_or(f32::NAN)
}

pub struct BridgePlugin {
    pub controls: PendingControls,
    pub resize: PendingResize,
    pub outputs: Option<HostOutputs>,
}

impl Plugin for BridgePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.controls.clone())
            .insert_resource(self.resize.clone())
            .add_systems(First, (drain_controls, drain_resize));

        if let Some(outputs) = &self.outputs {
            app.insert_resource(outputs.clone()).add_systems(
                PostUpdate,
                (
                    write_readout.run_if(resource_changed::<AnatomyState>),
                    write_info,
                ),
            );
        }
    }
}

fn drain_controls(pending: Res<PendingControls>, mut controls: MessageWriter<ControlEvent>) {
    if let Ok(mut queue) = pending.0.lock() {
        controls.write_batch(queue.drain(..));
    }
}

fn drain_resize(pending: Res<PendingResize>, mut resized: MessageWriter<HostResized>) {
    if let Some(size) = pending.0.lock().ok().and_then(|mut p| p.take()) {
        resized.write(size);
    }
}

fn write_readout(state: Res<AnatomyState>, outputs: Res<HostOutputs>) {
    if let Err(e) = dom::set_text(&outputs.readout_id, &state.0.opacity_readout()) {
        warn!("Failed to update opacity readout: {}", e);
    }
}

fn write_info(mut selected: MessageReader<PartSelected>, outputs: Res<HostOutputs>) {
    let Some(selection) = selected.read().last() else {
        return;
    };
    if let Err(e) = dom::show_info(&outputs.info_id, &selection.info) {
        warn!("Failed to update info panel: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anatomy_core::Layer;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn test_parse_opacity() {
        assert_eq!(parse_opacity("0.35"), 0.35);
        assert_eq!(parse_opacity(" 1 "), 1.0);
        assert!(parse_opacity("").is_nan());
        assert!(parse_opacity("abc").is_nan());
    }

    #[test]
    fn test_drain_controls_keeps_order() {
        let pending = PendingControls::default();
        pending.push(ControlEvent::LayerToggled {
            layer: Layer::Head,
            visible: false,
        });
        pending.push(ControlEvent::OpacityChanged(0.2));

        let mut world = World::new();
        world.init_resource::<Messages<ControlEvent>>();
        world.insert_resource(pending.clone());
        world.run_system_once(drain_controls).unwrap();

        let messages = world.resource::<Messages<ControlEvent>>();
        let mut cursor = messages.get_cursor();
        let drained: Vec<_> = cursor.read(messages).copied().collect();
        assert_eq!(
            drained,
            vec![
                ControlEvent::LayerToggled {
                    layer: Layer::Head,
                    visible: false,
                },
                ControlEvent::OpacityChanged(0.2),
            ]
        );
        assert!(pending.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_drain_resize_takes_latest_once() {
        let pending = PendingResize::default();
        pending.set(800.0, 600.0);
        pending.set(1024.0, 768.0);

        let mut world = World::new();
        world.init_resource::<Messages<HostResized>>();
        world.insert_resource(pending.clone());
        world.run_system_once(drain_resize).unwrap();
        world.run_system_once(drain_resize).unwrap();

        let messages = world.resource::<Messages<HostResized>>();
        let mut cursor = messages.get_cursor();
        let drained: Vec<_> = cursor.read(messages).copied().collect();
        assert_eq!(
            drained,
            vec![HostResized {
                width: 1024.0,
                height: 768.0,
            }]
        );
    }
}
