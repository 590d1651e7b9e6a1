use bevy::math::Isometry3d;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::interaction::GIZMO_PICK_THRESHOLD;
use constants::render_settings::{GIZMO_AXIS_LENGTH, GIZMO_RING_RADIUS, RESIZE_HANDLE_SIZE};

use crate::engine::camera::orbit_camera::OrbitControls;

use super::handles::resize_handle_position;
use super::ray::{ray_hits_ring, ray_segment_closest};
use super::state::{
    CoordinateSpace, DragSession, FloorplanConfig, FloorplanPlane, FloorplanState, HandleKind,
    ManipulationMode, ManipulationStrategy,
};

/// Orientation of a rotation ring relative to the plane: the ring lies in
/// the plane perpendicular to the axis it rotates about.
fn ring_orientation(kind: HandleKind) -> Quat {
    match kind {
        // Normal +Z: adjusts roll.
        HandleKind::RotateRingX => Quat::IDENTITY,
        // Normal +X: adjusts pitch.
        HandleKind::RotateRingY => Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        // Normal +Y: adjusts yaw.
        HandleKind::RotateRingZ => Quat::from_rotation_x(std::f32::consts::FRAC_PI_2),
        _ => Quat::IDENTITY,
    }
}

fn axis_direction(rotation: Quat, axis: Vec3, space: CoordinateSpace) -> Vec3 {
    match space {
        CoordinateSpace::Local => rotation * axis,
        CoordinateSpace::World => axis,
    }
}

// Immediate-mode drawing of the delegated gizmo: arrows in move mode,
// circles in rotate mode, a corner marker in resize mode.
pub fn draw_transform_gizmo(
    config: Res<FloorplanConfig>,
    state: Res<FloorplanState>,
    plane_query: Query<&Transform, With<FloorplanPlane>>,
    mut gizmos: Gizmos,
) {
    if config.strategy != ManipulationStrategy::DelegatedGizmo {
        return;
    }
    let Some(plane_entity) = state.plane else {
        return;
    };
    let Ok(transform) = plane_query.get(plane_entity) else {
        return;
    };
    let origin = transform.translation;

    match state.mode {
        ManipulationMode::None => {}
        ManipulationMode::Move => {
            let x_dir = axis_direction(transform.rotation, Vec3::X, state.space);
            let y_dir = axis_direction(transform.rotation, Vec3::Y, state.space);
            gizmos.arrow(
                origin,
                origin + x_dir * GIZMO_AXIS_LENGTH,
                Color::srgb(0.0, 1.0, 0.0),
            );
            gizmos.arrow(
                origin,
                origin + y_dir * GIZMO_AXIS_LENGTH,
                Color::srgb(0.0, 0.0, 1.0),
            );
        }
        ManipulationMode::Rotate => {
            let rings = [
                (HandleKind::RotateRingX, Color::srgb(1.0, 0.0, 0.0)),
                (HandleKind::RotateRingY, Color::srgb(0.0, 1.0, 0.0)),
                (HandleKind::RotateRingZ, Color::srgb(0.0, 0.0, 1.0)),
            ];
            for (kind, color) in rings {
                gizmos.circle(
                    Isometry3d::new(origin, transform.rotation * ring_orientation(kind)),
                    GIZMO_RING_RADIUS,
                    color,
                );
            }
        }
        ManipulationMode::Resize => {
            let corner = transform.transform_point(resize_handle_position(state.original_size));
            gizmos.cuboid(
                Transform::from_translation(corner)
                    .with_rotation(transform.rotation)
                    .with_scale(Vec3::splat(RESIZE_HANDLE_SIZE)),
                Color::srgb(1.0, 0.0, 0.0),
            );
        }
    }
}

// Analytic picking for the drawn gizmo: the affordances have no meshes, so
// axis arrows are picked by ray/segment proximity, rings by a widened
// annulus band, and the corner marker by ray/point distance. The session
// opened here is the same record the custom-handle picker creates.
pub fn gizmo_pointer_down(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&GlobalTransform, &Camera), With<Camera3d>>,
    plane_query: Query<&Transform, With<FloorplanPlane>>,
    config: Res<FloorplanConfig>,
    mut state: ResMut<FloorplanState>,
    mut controls: ResMut<OrbitControls>,
) {
    if config.strategy != ManipulationStrategy::DelegatedGizmo {
        return;
    }
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    if !state.is_ready() || state.session.is_some() || state.mode == ManipulationMode::None {
        return;
    }

    let Some(plane_entity) = state.plane else {
        return;
    };
    let Ok(transform) = plane_query.get(plane_entity) else {
        return;
    };
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
    let plane_pos = transform.translation;

    let mut best_hit: Option<(HandleKind, f32)> = None;
    let mut consider = |kind: HandleKind, t: Option<f32>| {
        if let Some(t) = t {
            if t > 0.0 && best_hit.is_none_or(|(_, best_t)| t < best_t) {
                best_hit = Some((kind, t));
            }
        }
    };

    match state.mode {
        ManipulationMode::None => {}
        ManipulationMode::Move => {
            for (kind, axis) in [(HandleKind::MoveAxisX, Vec3::X), (HandleKind::MoveAxisY, Vec3::Y)]
            {
                let tip = plane_pos
                    + axis_direction(transform.rotation, axis, state.space) * GIZMO_AXIS_LENGTH;
                let (distance, t) = ray_segment_closest(origin, dir, plane_pos, tip);
                consider(kind, (distance < GIZMO_PICK_THRESHOLD).then_some(t));
            }
        }
        ManipulationMode::Rotate => {
            for kind in [
                HandleKind::RotateRingX,
                HandleKind::RotateRingY,
                HandleKind::RotateRingZ,
            ] {
                let ring_xf = GlobalTransform::from(
                    Transform::from_translation(plane_pos)
                        .with_rotation(transform.rotation * ring_orientation(kind)),
                );
                consider(
                    kind,
                    ray_hits_ring(
                        origin,
                        dir,
                        &ring_xf,
                        GIZMO_RING_RADIUS - GIZMO_PICK_THRESHOLD,
                        GIZMO_RING_RADIUS + GIZMO_PICK_THRESHOLD,
                    ),
                );
            }
        }
        ManipulationMode::Resize => {
            let corner = transform.transform_point(resize_handle_position(state.original_size));
            let (distance, t) = ray_segment_closest(origin, dir, corner, corner);
            consider(
                HandleKind::ResizeCorner,
                (distance < GIZMO_PICK_THRESHOLD * 2.0).then_some(t),
            );
        }
    }

    if let Some((kind, _)) = best_hit {
        controls.enabled = false;
        state.session = Some(DragSession {
            handle: kind,
            entity: None,
            start_cursor: cursor_pos,
            prev_cursor: cursor_pos,
            start_scale: state.scale,
        });
        info!("Gizmo drag session started on {:?}", kind);
    }
}
