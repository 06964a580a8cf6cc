use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;

use crate::config::WORLD_PLANE_Z;

/// Marker for the camera the HUD projects clicks through
#[derive(Component)]
pub struct MainCamera;

#[derive(Resource)]
pub struct CameraState {
    pub zoom: f32,
    pub position: Vec2,
    pub is_panning: bool,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            position: Vec2::ZERO,
            is_panning: false,
        }
    }
}

/// Everything needed to map a cursor position onto the world plane of an
/// orthographic 2D camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    /// Camera translation in world units
    pub position: Vec2,
    /// World units per logical pixel
    pub scale: f32,
    /// Viewport size in logical pixels
    pub viewport: Vec2,
}

impl CameraView {
    pub fn new(transform: &Transform, projection: &OrthographicProjection, viewport: Vec2) -> Self {
        Self {
            position: transform.translation.truncate(),
            scale: projection.scale,
            viewport,
        }
    }

    /// Convert a window cursor position (origin top-left, y down) to a point
    /// on the simulation plane.
    pub fn screen_to_world(&self, cursor: Vec2) -> Vec3 {
        let centered = cursor - self.viewport * 0.5;
        let world = self.position + Vec2::new(centered.x, -centered.y) * self.scale;
        world.extend(WORLD_PLANE_Z)
    }
}

pub fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        MainCamera,
        Transform::from_xyz(0.0, 0.0, 0.0),
        OrthographicProjection {
            scale: 1.0,
            ..OrthographicProjection::default_2d()
        },
    ));
}

pub fn camera_zoom(
    mut scroll_events: EventReader<MouseWheel>,
    mut camera_state: ResMut<CameraState>,
    mut query: Query<&mut OrthographicProjection, With<MainCamera>>,
) {
    for event in scroll_events.read() {
        let zoom_delta = -event.y * 0.1;
        camera_state.zoom = (camera_state.zoom + zoom_delta).clamp(0.1, 10.0);

        if let Ok(mut projection) = query.get_single_mut() {
            projection.scale = camera_state.zoom;
        }
    }
}

pub fn camera_pan(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut motion_events: EventReader<MouseMotion>,
    mut camera_state: ResMut<CameraState>,
    mut query: Query<&mut Transform, With<MainCamera>>,
) {
    if mouse_button.just_pressed(MouseButton::Middle) {
        camera_state.is_panning = true;
    }
    if mouse_button.just_released(MouseButton::Middle) {
        camera_state.is_panning = false;
    }

    if !camera_state.is_panning {
        return;
    }

    for event in motion_events.read() {
        if let Ok(mut transform) = query.get_single_mut() {
            // screen y grows downwards, world y upwards
            let pan_delta = Vec2::new(-event.delta.x, event.delta.y) * camera_state.zoom;
            camera_state.position += pan_delta;
            transform.translation.x = camera_state.position.x;
            transform.translation.y = camera_state.position.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(position: Vec2, scale: f32) -> CameraView {
        CameraView {
            position,
            scale,
            viewport: Vec2::new(800.0, 600.0),
        }
    }

    #[test]
    fn viewport_center_maps_to_camera_position() {
        let v = view(Vec2::new(12.0, -4.0), 2.0);
        assert_eq!(v.screen_to_world(Vec2::new(400.0, 300.0)), Vec3::new(12.0, -4.0, WORLD_PLANE_Z));
    }

    #[test]
    fn screen_y_is_flipped_and_scaled() {
        let v = view(Vec2::ZERO, 0.5);
        // top-left corner
        let world = v.screen_to_world(Vec2::ZERO);
        assert_eq!(world, Vec3::new(-200.0, 150.0, WORLD_PLANE_Z));
    }
}
