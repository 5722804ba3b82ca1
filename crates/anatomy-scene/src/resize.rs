//! Fit the render surface to the host viewport

use bevy::camera::Viewport as CameraViewport;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};
use tracing::debug;

use crate::types::{
    HostResized, MainCamera, RenderSurface, SurfaceMode, ViewerCamera, ViewerSettings,
};

pub struct ResizePlugin;

impl Plugin for ResizePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PostStartup, announce_window_size)
            .add_systems(PreUpdate, (forward_window_resize, apply_host_resize).chain());
    }
}

/// In viewport mode the OS window is the host
fn announce_window_size(
    mode: Res<SurfaceMode>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut resized: MessageWriter<HostResized>,
) {
    if *mode != SurfaceMode::Viewport {
        return;
    }
    if let Ok(window) = windows.single() {
        resized.write(HostResized {
            width: window.width(),
            height: window.height(),
        });
    }
}

fn forward_window_resize(
    mode: Res<SurfaceMode>,
    mut window_resized: MessageReader<WindowResized>,
    primary: Query<Entity, With<PrimaryWindow>>,
    mut resized: MessageWriter<HostResized>,
) {
    // Canvas resizes come from the page; forwarding them would feed back
    if *mode != SurfaceMode::Viewport {
        window_resized.clear();
        return;
    }
    let Ok(primary) = primary.single() else {
        return;
    };
    if let Some(last) = window_resized.read().filter(|e| e.window == primary).last() {
        resized.write(HostResized {
            width: last.width,
            height: last.height,
        });
    }
}

/// Recompute the surface from the latest host size
pub fn apply_host_resize(
    mut events: MessageReader<HostResized>,
    mode: Res<SurfaceMode>,
    settings: Res<ViewerSettings>,
    mut surface: ResMut<RenderSurface>,
    mut viewer_camera: ResMut<ViewerCamera>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut cameras: Query<(&mut Camera, &mut Projection), With<MainCamera>>,
) {
    let Some(host) = events.read().last().copied() else {
        return;
    };
    if host.width <= 0.0 || host.height <= 0.0 {
        return;
    }

    let size = settings.0.viewport().surface_size(host.width, host.height);
    surface.host = Vec2::new(host.width, host.height);
    surface.size = size;
    viewer_camera.lens.aspect = size.aspect();
    debug!(
        host_width = host.width,
        host_height = host.height,
        width = size.width,
        height = size.height,
        "Surface resized"
    );

    let Ok(mut window) = windows.single_mut() else {
        return;
    };
    match *mode {
        SurfaceMode::Canvas => {
            window.resolution.set(size.width, size.height);
        }
        SurfaceMode::Viewport => {
            let scale = window.scale_factor();
            let physical = UVec2::new(
                ((size.width * scale).round() as u32).max(1),
                ((size.height * scale).round() as u32).max(1),
            );
            if let Ok((mut camera, _)) = cameras.single_mut() {
                camera.viewport = Some(CameraViewport {
                    physical_position: UVec2::ZERO,
                    physical_size: physical,
                    ..default()
                });
            }
        }
    }

    if let Ok((_, mut projection)) = cameras.single_mut() {
        if let Projection::Perspective(perspective) = &mut *projection {
            perspective.aspect_ratio = size.aspect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anatomy_core::ViewerConfig;
    use bevy::ecs::system::RunSystemOnce;

    fn world(mode: SurfaceMode) -> World {
        let config = ViewerConfig::default();
        let mut world = World::new();
        world.init_resource::<Messages<HostResized>>();
        world.insert_resource(mode);
        world.insert_resource(RenderSurface::new(&config));
        world.insert_resource(ViewerCamera::from_config(&config));
        world.insert_resource(ViewerSettings(config));
        world.spawn((Window::default(), PrimaryWindow));
        world.spawn((Camera::default(), Projection::default(), MainCamera));
        world
    }

    #[test]
    fn test_canvas_takes_host_fractions() {
        let mut world = world(SurfaceMode::Canvas);
        world.write_message(HostResized {
            width: 1000.0,
            height: 800.0,
        });
        world.run_system_once(apply_host_resize).unwrap();

        let surface = world.resource::<RenderSurface>();
        assert!((surface.size.width - 720.0).abs() < 1e-3);
        assert!((surface.size.height - 656.0).abs() < 1e-3);

        let window = world
            .query_filtered::<&Window, With<PrimaryWindow>>()
            .single(&world)
            .unwrap();
        assert!((window.width() - 720.0).abs() < 1e-3);
        assert!((window.height() - 656.0).abs() < 1e-3);

        let aspect = world.resource::<ViewerCamera>().lens.aspect;
        assert!((aspect - 720.0 / 656.0).abs() < 1e-4);
    }

    #[test]
    fn test_viewport_mode_sets_camera_viewport() {
        let mut world = world(SurfaceMode::Viewport);
        world.write_message(HostResized {
            width: 1000.0,
            height: 500.0,
        });
        world.run_system_once(apply_host_resize).unwrap();

        let camera = world
            .query_filtered::<&Camera, With<MainCamera>>()
            .single(&world)
            .unwrap();
        let viewport = camera.viewport.as_ref().unwrap();
        assert_eq!(viewport.physical_position, UVec2::ZERO);
        assert_eq!(viewport.physical_size, UVec2::new(720, 410));
    }

    #[test]
    fn test_only_latest_size_applies() {
        let mut world = world(SurfaceMode::Canvas);
        world.write_message(HostResized {
            width: 400.0,
            height: 400.0,
        });
        world.write_message(HostResized {
            width: 2000.0,
            height: 1000.0,
        });
        world.run_system_once(apply_host_resize).unwrap();

        let surface = world.resource::<RenderSurface>();
        assert_eq!(surface.host, Vec2::new(2000.0, 1000.0));
        assert!((surface.size.width - 1440.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_host_is_ignored() {
        let mut world = world(SurfaceMode::Canvas);
        let before = world.resource::<RenderSurface>().size;
        world.write_message(HostResized {
            width: 0.0,
            height: 600.0,
        });
        world.run_system_once(apply_host_resize).unwrap();

        assert_eq!(world.resource::<RenderSurface>().size, before);
    }
}
