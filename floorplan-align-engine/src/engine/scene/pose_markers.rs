use bevy::prelude::*;
use bevy::render::mesh::{Indices, Mesh, PrimitiveTopology};
use constants::render_settings::{
    VIEW_SECTOR_FOV, VIEW_SECTOR_LIFT, VIEW_SECTOR_RADIUS, VIEW_SECTOR_SEGMENTS,
};

use crate::engine::loading::pose_loader::ScenePoses;

#[derive(Component)]
pub struct ViewSectorMarker;

#[derive(Resource, Default)]
pub struct PoseMarkersCreated(pub bool);

// Spawns one flat field-of-view fan per pose record once the manifest has
// loaded. Markers are static; re-running is guarded by the created flag.
pub fn spawn_pose_markers(
    mut created: ResMut<PoseMarkersCreated>,
    poses: Option<Res<ScenePoses>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut commands: Commands,
) {
    if created.0 {
        return;
    }
    let Some(poses) = poses else {
        return;
    };

    for record in &poses.records {
        let mesh = create_view_sector_mesh(
            record.yaw(),
            VIEW_SECTOR_FOV,
            VIEW_SECTOR_RADIUS,
            VIEW_SECTOR_SEGMENTS,
        );
        commands.spawn((
            ViewSectorMarker,
            Mesh3d(meshes.add(mesh)),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(0.0, 1.0, 0.0),
                unlit: true,
                cull_mode: None,
                ..default()
            })),
            Transform::from_translation(
                record.translation() + Vec3::new(0.0, 0.0, VIEW_SECTOR_LIFT),
            )
            .with_rotation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)),
            Name::new(format!("ViewSector_{}", record.id)),
        ));
    }

    info!("✓ Spawned {} view-direction markers", poses.records.len());
    created.0 = true;
}

/// Triangle-fan sector mesh spanning `fov` radians centred on `yaw`.
/// Position-only, matching the other unlit helper meshes.
pub fn create_view_sector_mesh(yaw: f32, fov: f32, radius: f32, segments: usize) -> Mesh {
    let positions = sector_positions(yaw, fov, radius, segments);
    let mut indices = Vec::with_capacity(segments * 3);
    for i in 1..=segments as u32 {
        indices.extend_from_slice(&[0, i, i + 1]);
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        bevy::asset::RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

/// Fan vertices: the centre followed by `segments + 1` rim points from
/// `yaw - fov/2` to `yaw + fov/2`.
pub fn sector_positions(yaw: f32, fov: f32, radius: f32, segments: usize) -> Vec<[f32; 3]> {
    let mut positions = Vec::with_capacity(segments + 2);
    positions.push([0.0, 0.0, 0.0]);

    let start_angle = yaw - fov / 2.0;
    for i in 0..=segments {
        let angle = start_angle + (i as f32 / segments as f32) * fov;
        positions.push([angle.cos() * radius, angle.sin() * radius, 0.0]);
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_has_centre_plus_rim_vertices() {
        let positions = sector_positions(0.0, std::f32::consts::FRAC_PI_3, 1.5, 32);
        assert_eq!(positions.len(), 34);
        assert_eq!(positions[0], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn rim_vertices_sit_on_the_radius() {
        let radius = 1.5;
        for p in sector_positions(0.4, 1.0, radius, 8).iter().skip(1) {
            let r = (p[0] * p[0] + p[1] * p[1]).sqrt();
            assert!((r - radius).abs() < 1.0e-5);
        }
    }

    #[test]
    fn fan_is_centred_on_yaw() {
        let yaw = std::f32::consts::FRAC_PI_4;
        let fov = 1.0;
        let positions = sector_positions(yaw, fov, 1.0, 2);
        // Middle rim vertex points straight down the yaw heading.
        let mid = positions[2];
        assert!((mid[0] - yaw.cos()).abs() < 1.0e-5);
        assert!((mid[1] - yaw.sin()).abs() < 1.0e-5);
    }
}
