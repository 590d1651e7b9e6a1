use bevy::prelude::*;
use constants::render_settings::TOP_DOWN_CAMERA_HEIGHT;

use crate::engine::camera::orbit_camera::OrbitControls;
use crate::rpc::web_rpc::WebRpcInterface;

/// The two camera states: the free orbiting view and the axis-locked
/// top-down overlay view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraViewMode {
    #[default]
    ThreeD,
    TopDown,
}

/// Camera pose captured at construction. Restored exactly (bit-identical
/// position, up vector, and controls target) when leaving top-down view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavedCameraPose {
    pub position: Vec3,
    pub up: Vec3,
    pub target: Vec3,
}

#[derive(Resource)]
pub struct CameraViewState {
    pub mode: CameraViewMode,
    pub saved: SavedCameraPose,
}

impl CameraViewState {
    pub fn new(saved: SavedCameraPose) -> Self {
        Self {
            mode: CameraViewMode::ThreeD,
            saved,
        }
    }
}

/// Request to switch the camera view, from the settings panel or RPC.
#[derive(Event)]
pub struct SetCameraViewEvent {
    pub top_down: bool,
}

/// Apply one of the two camera states. Entering top-down uses the canonical
/// pose and locks rotation and panning (zoom stays available, the polar
/// angle collapses to a single value). Leaving restores the saved pose and
/// the full orbit bounds.
pub fn apply_camera_mode(
    mode: CameraViewMode,
    transform: &mut Transform,
    controls: &mut OrbitControls,
    saved: &SavedCameraPose,
) {
    match mode {
        CameraViewMode::TopDown => {
            transform.translation = Vec3::new(0.0, 0.0, TOP_DOWN_CAMERA_HEIGHT);
            transform.look_at(Vec3::ZERO, Vec3::Y);

            controls.target = Vec3::ZERO;
            controls.up = Vec3::Y;
            controls.enable_rotate = false;
            controls.enable_pan = false;
            controls.enable_zoom = true;
            controls.min_polar_angle = 0.0;
            controls.max_polar_angle = 0.0;
        }
        CameraViewMode::ThreeD => {
            transform.translation = saved.position;
            transform.look_at(saved.target, saved.up);

            controls.target = saved.target;
            controls.up = saved.up;
            controls.enable_rotate = true;
            controls.enable_pan = true;
            controls.enable_zoom = true;
            controls.min_polar_angle = 0.0;
            controls.max_polar_angle = std::f32::consts::FRAC_PI_2;
        }
    }
}

pub fn handle_camera_view_events(
    mut events: EventReader<SetCameraViewEvent>,
    mut view_state: ResMut<CameraViewState>,
    mut controls: ResMut<OrbitControls>,
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        let requested = if event.top_down {
            CameraViewMode::TopDown
        } else {
            CameraViewMode::ThreeD
        };
        if requested == view_state.mode {
            continue;
        }

        let Ok(mut transform) = camera_query.single_mut() else {
            continue;
        };

        view_state.mode = requested;
        let saved = view_state.saved;
        apply_camera_mode(requested, &mut transform, &mut controls, &saved);

        info!("Camera view switched to {:?}", requested);
        rpc_interface.send_notification(
            "camera_view_changed",
            serde_json::json!({ "top_down": event.top_down }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saved_pose() -> SavedCameraPose {
        SavedCameraPose {
            position: Vec3::new(-2.5, 4.5, 9.0),
            up: Vec3::Y,
            target: Vec3::ZERO,
        }
    }

    fn initial_transform(saved: &SavedCameraPose) -> Transform {
        let mut transform = Transform::from_translation(saved.position);
        transform.look_at(saved.target, saved.up);
        transform
    }

    #[test]
    fn toggle_round_trip_restores_saved_pose_exactly() {
        let saved = saved_pose();
        let mut transform = initial_transform(&saved);
        let mut controls = OrbitControls::default();

        apply_camera_mode(CameraViewMode::TopDown, &mut transform, &mut controls, &saved);
        apply_camera_mode(CameraViewMode::ThreeD, &mut transform, &mut controls, &saved);

        assert_eq!(transform.translation, saved.position);
        assert_eq!(controls.target, saved.target);
        assert_eq!(controls.up, saved.up);
        assert!(controls.enable_rotate);
        assert!(controls.enable_pan);
        assert_eq!(controls.max_polar_angle, std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn top_down_locks_rotation_and_pan_but_not_zoom() {
        let saved = saved_pose();
        let mut transform = initial_transform(&saved);
        let mut controls = OrbitControls::default();

        apply_camera_mode(CameraViewMode::TopDown, &mut transform, &mut controls, &saved);

        assert_eq!(
            transform.translation,
            Vec3::new(0.0, 0.0, TOP_DOWN_CAMERA_HEIGHT)
        );
        assert!(!controls.enable_rotate);
        assert!(!controls.enable_pan);
        assert!(controls.enable_zoom);
        assert_eq!(controls.min_polar_angle, 0.0);
        assert_eq!(controls.max_polar_angle, 0.0);
    }

    #[test]
    fn applying_a_state_twice_is_idempotent() {
        let saved = saved_pose();
        let mut transform = initial_transform(&saved);
        let mut controls = OrbitControls::default();

        apply_camera_mode(CameraViewMode::TopDown, &mut transform, &mut controls, &saved);
        let first = (transform.translation, controls.target);
        apply_camera_mode(CameraViewMode::TopDown, &mut transform, &mut controls, &saved);
        assert_eq!((transform.translation, controls.target), first);
    }
}
