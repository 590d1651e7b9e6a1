use bevy::prelude::*;
use constants::render_settings::{
    HANDLE_Z_OFFSET, MOVE_ARROW_SHAFT_RADIUS, MOVE_ARROW_TIP_LENGTH, MOVE_ARROW_TIP_RADIUS,
    MOVE_ARROW_X_LENGTH, MOVE_ARROW_Y_LENGTH, RESIZE_HANDLE_SIZE, ROTATE_RING_INNER_RADIUS,
    ROTATE_RING_OUTER_RADIUS, ROTATE_RING_RESOLUTION,
};

use super::state::{FloorplanState, HandleKind, HandleShape, ManipulationHandle, ManipulationMode};

/// Corner position the resize handle is placed at (and repositioned to
/// after each resize step, from the pre-scale plane dimensions).
pub fn resize_handle_position(original_size: Vec2) -> Vec3 {
    Vec3::new(
        original_size.x / 2.0,
        -original_size.y / 2.0,
        HANDLE_Z_OFFSET,
    )
}

/// Visibility of a handle under the given mode. Pure so the mode/visibility
/// mapping is testable away from the ECS.
pub fn handle_visibility(kind: HandleKind, mode: ManipulationMode) -> Visibility {
    if kind.mode() == mode {
        Visibility::Visible
    } else {
        Visibility::Hidden
    }
}

// Spawns all handle geometry as children of the plane so handles inherit
// its transform: one corner cube, two axis arrows (shaft + pickable tip
// cone), three rotation rings.
pub fn spawn_handles(
    commands: &mut Commands,
    plane: Entity,
    plane_size: Vec2,
    mode: ManipulationMode,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    let handle_material = |materials: &mut ResMut<Assets<StandardMaterial>>, color: Color| {
        materials.add(StandardMaterial {
            base_color: color,
            unlit: true,
            cull_mode: None,
            ..default()
        })
    };

    let red = Color::srgb(1.0, 0.0, 0.0);
    let green = Color::srgb(0.0, 1.0, 0.0);
    let blue = Color::srgb(0.0, 0.0, 1.0);

    let cube = meshes.add(Cuboid::new(
        RESIZE_HANDLE_SIZE,
        RESIZE_HANDLE_SIZE,
        RESIZE_HANDLE_SIZE,
    ));
    let ring = meshes.add(
        Annulus::new(ROTATE_RING_INNER_RADIUS, ROTATE_RING_OUTER_RADIUS)
            .mesh()
            .resolution(ROTATE_RING_RESOLUTION),
    );
    let tip = meshes.add(Cone {
        radius: MOVE_ARROW_TIP_RADIUS,
        height: MOVE_ARROW_TIP_LENGTH,
    });
    let shaft_x = meshes.add(Cylinder::new(
        MOVE_ARROW_SHAFT_RADIUS,
        MOVE_ARROW_X_LENGTH - MOVE_ARROW_TIP_LENGTH,
    ));
    let shaft_y = meshes.add(Cylinder::new(
        MOVE_ARROW_SHAFT_RADIUS,
        MOVE_ARROW_Y_LENGTH - MOVE_ARROW_TIP_LENGTH,
    ));

    let red_mat = handle_material(materials, red);
    let green_mat = handle_material(materials, green);
    let blue_mat = handle_material(materials, blue);

    // Cylinders and cones extend along local +Y; this maps them onto +X.
    let y_to_x = Quat::from_rotation_z(-std::f32::consts::FRAC_PI_2);
    let tip_obb = Vec3::new(
        MOVE_ARROW_TIP_RADIUS * 2.0,
        MOVE_ARROW_TIP_LENGTH,
        MOVE_ARROW_TIP_RADIUS * 2.0,
    );

    commands.entity(plane).with_children(|parent| {
        // Resize: corner cube
        parent.spawn((
            ManipulationHandle(HandleKind::ResizeCorner),
            HandleShape::Obb(Vec3::splat(RESIZE_HANDLE_SIZE)),
            Mesh3d(cube),
            MeshMaterial3d(red_mat.clone()),
            Transform::from_translation(resize_handle_position(plane_size)),
            handle_visibility(HandleKind::ResizeCorner, mode),
            Name::new("ResizeHandle"),
        ));

        // Move: X arrow
        let x_shaft_len = MOVE_ARROW_X_LENGTH - MOVE_ARROW_TIP_LENGTH;
        parent.spawn((
            ManipulationHandle(HandleKind::MoveAxisX),
            Mesh3d(shaft_x),
            MeshMaterial3d(green_mat.clone()),
            Transform::from_translation(Vec3::new(x_shaft_len / 2.0, 0.0, HANDLE_Z_OFFSET))
                .with_rotation(y_to_x),
            handle_visibility(HandleKind::MoveAxisX, mode),
            Name::new("MoveArrowXShaft"),
        ));
        parent.spawn((
            ManipulationHandle(HandleKind::MoveAxisX),
            HandleShape::Obb(tip_obb),
            Mesh3d(tip.clone()),
            MeshMaterial3d(green_mat.clone()),
            Transform::from_translation(Vec3::new(
                MOVE_ARROW_X_LENGTH - MOVE_ARROW_TIP_LENGTH / 2.0,
                0.0,
                HANDLE_Z_OFFSET,
            ))
            .with_rotation(y_to_x),
            handle_visibility(HandleKind::MoveAxisX, mode),
            Name::new("MoveArrowXTip"),
        ));

        // Move: Y arrow
        let y_shaft_len = MOVE_ARROW_Y_LENGTH - MOVE_ARROW_TIP_LENGTH;
        parent.spawn((
            ManipulationHandle(HandleKind::MoveAxisY),
            Mesh3d(shaft_y),
            MeshMaterial3d(blue_mat.clone()),
            Transform::from_translation(Vec3::new(0.0, y_shaft_len / 2.0, HANDLE_Z_OFFSET)),
            handle_visibility(HandleKind::MoveAxisY, mode),
            Name::new("MoveArrowYShaft"),
        ));
        parent.spawn((
            ManipulationHandle(HandleKind::MoveAxisY),
            HandleShape::Obb(tip_obb),
            Mesh3d(tip),
            MeshMaterial3d(blue_mat.clone()),
            Transform::from_translation(Vec3::new(
                0.0,
                MOVE_ARROW_Y_LENGTH - MOVE_ARROW_TIP_LENGTH / 2.0,
                HANDLE_Z_OFFSET,
            )),
            handle_visibility(HandleKind::MoveAxisY, mode),
            Name::new("MoveArrowYTip"),
        ));

        // Rotate: one ring per axis, in the XY, YZ, and XZ planes.
        let rings = [
            (
                HandleKind::RotateRingX,
                Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
                red_mat.clone(),
                "RotateRingX",
            ),
            (
                HandleKind::RotateRingY,
                Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
                green_mat.clone(),
                "RotateRingY",
            ),
            (
                HandleKind::RotateRingZ,
                Quat::from_rotation_x(std::f32::consts::FRAC_PI_2),
                blue_mat.clone(),
                "RotateRingZ",
            ),
        ];
        for (kind, rotation, material, name) in rings {
            parent.spawn((
                ManipulationHandle(kind),
                HandleShape::Ring {
                    inner: ROTATE_RING_INNER_RADIUS,
                    outer: ROTATE_RING_OUTER_RADIUS,
                },
                Mesh3d(ring.clone()),
                MeshMaterial3d(material),
                Transform::from_translation(Vec3::new(0.0, 0.0, HANDLE_Z_OFFSET))
                    .with_rotation(rotation),
                handle_visibility(kind, mode),
                Name::new(name),
            ));
        }
    });
}

// Mode changes update handle visibility immediately; an in-progress drag is
// unaffected because only pick time consults the mode.
pub fn update_handle_visibility(
    state: Res<FloorplanState>,
    mut handles: Query<(&ManipulationHandle, &mut Visibility)>,
) {
    if !state.is_changed() {
        return;
    }
    for (handle, mut visibility) in &mut handles {
        *visibility = handle_visibility(handle.0, state.mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [HandleKind; 6] = [
        HandleKind::ResizeCorner,
        HandleKind::MoveAxisX,
        HandleKind::MoveAxisY,
        HandleKind::RotateRingX,
        HandleKind::RotateRingY,
        HandleKind::RotateRingZ,
    ];

    fn visible_set(mode: ManipulationMode) -> Vec<HandleKind> {
        ALL_KINDS
            .into_iter()
            .filter(|kind| handle_visibility(*kind, mode) == Visibility::Visible)
            .collect()
    }

    #[test]
    fn mode_switch_changes_exactly_the_visibility_set() {
        assert!(visible_set(ManipulationMode::None).is_empty());
        assert_eq!(
            visible_set(ManipulationMode::Resize),
            vec![HandleKind::ResizeCorner]
        );
        assert_eq!(
            visible_set(ManipulationMode::Move),
            vec![HandleKind::MoveAxisX, HandleKind::MoveAxisY]
        );
        assert_eq!(
            visible_set(ManipulationMode::Rotate),
            vec![
                HandleKind::RotateRingX,
                HandleKind::RotateRingY,
                HandleKind::RotateRingZ
            ]
        );
    }

    #[test]
    fn resize_handle_sits_on_the_lower_right_corner() {
        let pos = resize_handle_position(Vec2::new(17.78, 10.0));
        assert!((pos.x - 8.89).abs() < 1.0e-4);
        assert!((pos.y + 5.0).abs() < 1.0e-4);
        assert_eq!(pos.z, HANDLE_Z_OFFSET);
    }
}
