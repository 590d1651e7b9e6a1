use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::engine::camera::orbit_camera::OrbitControls;

use super::ray::{ray_hits_obb, ray_hits_ring};
use super::state::{
    DragSession, FloorplanConfig, FloorplanState, HandleShape, ManipulationHandle,
    ManipulationMode, ManipulationStrategy,
};

/// Pick test for one handle. Only the active mode's handles are ever
/// tested, so a session can never start on a foreign handle.
pub fn pick_handle(
    origin: Vec3,
    dir: Vec3,
    shape: &HandleShape,
    xf: &GlobalTransform,
) -> Option<f32> {
    match shape {
        HandleShape::Obb(size) => ray_hits_obb(origin, dir, xf, *size),
        HandleShape::Ring { inner, outer } => ray_hits_ring(origin, dir, xf, *inner, *outer),
    }
}

// Pointer-down: cast a camera ray and intersect the active mode's handles.
// A hit opens the drag session and parks the orbit controls so camera
// movement cannot compete with the drag.
pub fn handle_pointer_down(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&GlobalTransform, &Camera), With<Camera3d>>,
    handles: Query<(Entity, &ManipulationHandle, &HandleShape, &GlobalTransform)>,
    config: Res<FloorplanConfig>,
    mut state: ResMut<FloorplanState>,
    mut controls: ResMut<OrbitControls>,
) {
    if config.strategy != ManipulationStrategy::CustomHandles {
        return;
    }
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    // No plane yet means the texture load has not resolved; ignore input.
    if !state.is_ready() || state.session.is_some() || state.mode == ManipulationMode::None {
        return;
    }

    let Ok(window) = windows.single() else { return };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };
    let Ok((cam_xf, camera)) = cameras.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(cam_xf, cursor_pos) else {
        return;
    };

    let origin = ray.origin;
    let dir = ray.direction.as_vec3();

    let mut best_hit: Option<(Entity, super::state::HandleKind, f32)> = None;
    for (entity, handle, shape, xf) in &handles {
        if handle.0.mode() != state.mode {
            continue;
        }
        if let Some(t) = pick_handle(origin, dir, shape, xf) {
            if t > 0.0 && best_hit.is_none_or(|(_, _, best_t)| t < best_t) {
                best_hit = Some((entity, handle.0, t));
            }
        }
    }

    if let Some((entity, kind, _)) = best_hit {
        controls.enabled = false;
        state.session = Some(DragSession {
            handle: kind,
            entity: Some(entity),
            start_cursor: cursor_pos,
            prev_cursor: cursor_pos,
            start_scale: state.scale,
        });
        info!("Drag session started on {:?}", kind);
    }
}

// Pointer-up ends the session and re-enables the orbit controls
// unconditionally; a missed pick never opened one in the first place.
pub fn handle_pointer_up(
    buttons: Res<ButtonInput<MouseButton>>,
    mut state: ResMut<FloorplanState>,
    mut controls: ResMut<OrbitControls>,
) {
    if !buttons.just_released(MouseButton::Left) {
        return;
    }
    if let Some(session) = state.session.take() {
        info!("Drag session ended on {:?}", session.handle);
    }
    controls.enabled = true;
}
