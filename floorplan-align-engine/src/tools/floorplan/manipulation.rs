use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::interaction::{
    MIN_PLANE_SCALE, MOVE_SENSITIVITY, RESIZE_SENSITIVITY, ROTATE_SENSITIVITY,
};

use super::handles::resize_handle_position;
use super::state::{CoordinateSpace, FloorplanPlane, FloorplanState, HandleKind};

/// Resize scaling as a pure function of the session start and the current
/// horizontal cursor position: replaying the same pointer path always
/// yields the same scale. Both axes share the factor but floor
/// independently.
pub fn compute_resize_scale(start_scale: Vec2, start_x: f32, current_x: f32) -> Vec2 {
    let factor = 1.0 + (current_x - start_x) * RESIZE_SENSITIVITY;
    Vec2::new(
        (start_scale.x * factor).max(MIN_PLANE_SCALE),
        (start_scale.y * factor).max(MIN_PLANE_SCALE),
    )
}

/// Translation step for one pointer-move event on a move arrow. The cursor
/// delta is projected onto the arrow's axis in the requested frame; screen
/// Y grows downward, hence the sign flip on the Y arrow.
pub fn move_displacement(
    rotation: Quat,
    handle: HandleKind,
    dx: f32,
    dy: f32,
    space: CoordinateSpace,
) -> Vec3 {
    let axis = match handle {
        HandleKind::MoveAxisX => Vec3::X,
        HandleKind::MoveAxisY => Vec3::Y,
        _ => return Vec3::ZERO,
    };
    let dir = match space {
        CoordinateSpace::Local => rotation * axis,
        CoordinateSpace::World => axis,
    };
    let amount = match handle {
        HandleKind::MoveAxisX => dx * MOVE_SENSITIVITY,
        HandleKind::MoveAxisY => -dy * MOVE_SENSITIVITY,
        _ => 0.0,
    };
    dir * amount
}

/// Euler accumulation for one pointer-move event on a rotation ring. Each
/// ring maps a single screen-delta axis onto a single rotation component;
/// rotations accumulate without clamping.
pub fn rotate_step(euler: Vec3, handle: HandleKind, dx: f32, dy: f32) -> Vec3 {
    let mut next = euler;
    match handle {
        HandleKind::RotateRingX => next.z -= dy * ROTATE_SENSITIVITY,
        HandleKind::RotateRingY => next.x += dy * ROTATE_SENSITIVITY,
        HandleKind::RotateRingZ => next.y += dx * ROTATE_SENSITIVITY,
        _ => {}
    }
    next
}

// Applies the active drag session to the plane transform. Shared by both
// strategies; it acts only on the session, never on the mode, so a mode
// change mid-drag has no effect here.
pub fn drag_floorplan(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut state: ResMut<FloorplanState>,
    mut plane_query: Query<&mut Transform, With<FloorplanPlane>>,
    mut handle_query: Query<&mut Transform, Without<FloorplanPlane>>,
) {
    let Some(plane_entity) = state.plane else {
        return;
    };
    let Some(mut session) = state.session else {
        return;
    };
    let Ok(window) = windows.single() else { return };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };
    if cursor_pos == session.prev_cursor {
        return;
    }
    let Ok(mut transform) = plane_query.get_mut(plane_entity) else {
        return;
    };

    let dx = cursor_pos.x - session.prev_cursor.x;
    let dy = cursor_pos.y - session.prev_cursor.y;

    match session.handle {
        HandleKind::ResizeCorner => {
            let scale = compute_resize_scale(session.start_scale, session.start_cursor.x, cursor_pos.x);
            state.scale = scale;
            transform.scale = Vec3::new(scale.x, scale.y, 1.0);

            // The corner offset stays in pre-scale dimensions; the parent
            // scale carries it. The gizmo strategy has no handle entity.
            if let Some(handle_entity) = session.entity {
                if let Ok(mut handle_transform) = handle_query.get_mut(handle_entity) {
                    handle_transform.translation = resize_handle_position(state.original_size);
                }
            }
        }
        HandleKind::MoveAxisX | HandleKind::MoveAxisY => {
            let rotation = transform.rotation;
            transform.translation +=
                move_displacement(rotation, session.handle, dx, dy, state.space);
        }
        HandleKind::RotateRingX | HandleKind::RotateRingY | HandleKind::RotateRingZ => {
            let euler = rotate_step(state.euler, session.handle, dx, dy);
            state.euler = euler;
            transform.rotation = Quat::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z);
        }
    }

    session.prev_cursor = cursor_pos;
    state.session = Some(session);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_scale_never_drops_below_the_floor() {
        let scale = compute_resize_scale(Vec2::ONE, 500.0, -10_000.0);
        assert_eq!(scale, Vec2::splat(MIN_PLANE_SCALE));

        // A negative factor inverts the geometry; both axes stop at the floor.
        let scale = compute_resize_scale(Vec2::new(0.2, 3.0), 0.0, -200.0);
        assert_eq!(scale, Vec2::splat(MIN_PLANE_SCALE));
    }

    #[test]
    fn resize_scale_is_deterministic_in_the_endpoints() {
        let start = Vec2::new(1.5, 0.8);
        // However the cursor wandered, only start and current X matter.
        let a = compute_resize_scale(start, 100.0, 260.0);
        let b = compute_resize_scale(start, 100.0, 260.0);
        assert_eq!(a, b);

        let expected = 1.0 + 160.0 * RESIZE_SENSITIVITY;
        assert!((a.x - 1.5 * expected).abs() < 1.0e-5);
        assert!((a.y - 0.8 * expected).abs() < 1.0e-5);
    }

    #[test]
    fn x_arrow_drag_displaces_along_the_local_axis() {
        let rotation = Quat::from_euler(EulerRot::XYZ, 0.4, -1.1, 2.3);
        let displacement = move_displacement(
            rotation,
            HandleKind::MoveAxisX,
            100.0,
            0.0,
            CoordinateSpace::Local,
        );
        // dx=100 at sensitivity 0.05 is 5 units, whatever the rotation.
        assert!((displacement.length() - 5.0).abs() < 1.0e-4);
        let local_x = rotation * Vec3::X;
        assert!(displacement.normalize().dot(local_x) > 0.9999);
    }

    #[test]
    fn y_arrow_inverts_screen_y() {
        let displacement = move_displacement(
            Quat::IDENTITY,
            HandleKind::MoveAxisY,
            0.0,
            40.0,
            CoordinateSpace::Local,
        );
        assert!((displacement.y + 2.0).abs() < 1.0e-5);
    }

    #[test]
    fn world_space_ignores_the_plane_rotation() {
        let rotation = Quat::from_rotation_z(1.0);
        let displacement = move_displacement(
            rotation,
            HandleKind::MoveAxisX,
            20.0,
            0.0,
            CoordinateSpace::World,
        );
        assert!((displacement - Vec3::new(1.0, 0.0, 0.0)).length() < 1.0e-5);
    }

    #[test]
    fn rings_map_screen_deltas_onto_single_axes() {
        let euler = Vec3::ZERO;
        let after_x = rotate_step(euler, HandleKind::RotateRingX, 0.0, 10.0);
        assert!((after_x.z + 0.1).abs() < 1.0e-6);

        let after_y = rotate_step(euler, HandleKind::RotateRingY, 0.0, 10.0);
        assert!((after_y.x - 0.1).abs() < 1.0e-6);

        let after_z = rotate_step(euler, HandleKind::RotateRingZ, 10.0, 0.0);
        assert!((after_z.y - 0.1).abs() < 1.0e-6);
    }

    #[test]
    fn rotation_accumulates_without_clamping() {
        let mut euler = Vec3::ZERO;
        for _ in 0..1000 {
            euler = rotate_step(euler, HandleKind::RotateRingZ, 10.0, 0.0);
        }
        // 1000 events of dx=10 at 0.01 rad/px: far past a full turn.
        assert!((euler.y - 1000.0 * 10.0 * ROTATE_SENSITIVITY).abs() < 1.0e-2);
    }
}
