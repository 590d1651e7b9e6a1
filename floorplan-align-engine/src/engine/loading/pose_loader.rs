use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::loading::progress::LoadingProgress;
use crate::tools::floorplan::state::FloorplanConfig;

/// One camera pose as served by the pose endpoint: translation plus
/// orientation quaternion, keyed by an ordering id.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PoseRecord {
    pub id: u32,
    pub tx: f32,
    pub ty: f32,
    pub tz: f32,
    pub qx: f32,
    pub qy: f32,
    pub qz: f32,
    pub qw: f32,
}

impl PoseRecord {
    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.tx, self.ty, self.tz)
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_xyzw(self.qx, self.qy, self.qz, self.qw)
    }

    /// Heading around the scene Z axis, used to orient view-direction sectors.
    pub fn yaw(&self) -> f32 {
        self.rotation().to_euler(EulerRot::ZYX).0
    }
}

/// Pose list as a Bevy asset. Mirrors the JSON payload exactly: a bare
/// ordered array of records.
#[derive(Asset, Debug, Clone, Serialize, Deserialize, TypePath)]
#[serde(transparent)]
pub struct PoseManifest(pub Vec<PoseRecord>);

/// Loaded pose records, sorted by id for deterministic marker placement.
#[derive(Resource, Default, Clone)]
pub struct ScenePoses {
    pub records: Vec<PoseRecord>,
}

#[derive(Resource, Default)]
pub struct PoseLoader {
    handle: Option<Handle<PoseManifest>>,
}

// Start the loading process
pub fn start_loading(
    mut pose_loader: ResMut<PoseLoader>,
    config: Res<FloorplanConfig>,
    asset_server: Res<AssetServer>,
) {
    pose_loader.handle = Some(asset_server.load(&config.pose_manifest_path));
}

// Publish the pose list once the manifest asset resolves
pub fn load_poses_system(
    mut loading_progress: ResMut<LoadingProgress>,
    pose_loader: Res<PoseLoader>,
    manifests: Res<Assets<PoseManifest>>,
    mut commands: Commands,
) {
    if loading_progress.poses_loaded {
        return;
    }

    if let Some(ref handle) = pose_loader.handle {
        if let Some(manifest) = manifests.get(handle) {
            info!("✓ Loaded {} pose records", manifest.0.len());
            commands.insert_resource(ScenePoses {
                records: sorted_by_id(manifest.0.clone()),
            });
            loading_progress.poses_loaded = true;
        }
    }
}

/// The endpoint orders records by id; sorting here keeps marker placement
/// stable even when a manifest was edited by hand.
pub fn sorted_by_id(mut records: Vec<PoseRecord>) -> Vec<PoseRecord> {
    records.sort_by_key(|record| record.id);
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pose(id: u32) -> PoseRecord {
        PoseRecord {
            id,
            tx: 0.0,
            ty: 0.0,
            tz: 0.0,
            qx: 0.0,
            qy: 0.0,
            qz: 0.0,
            qw: 1.0,
        }
    }

    #[test]
    fn manifest_deserialises_bare_array() {
        let json = r#"[
            {"id": 2, "tx": 1.0, "ty": 2.0, "tz": 3.0,
             "qx": 0.0, "qy": 0.0, "qz": 0.0, "qw": 1.0}
        ]"#;
        let manifest: PoseManifest = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.0.len(), 1);
        assert_eq!(manifest.0[0].id, 2);
        assert_eq!(manifest.0[0].translation(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn records_sort_by_id() {
        let sorted = sorted_by_id(vec![pose(3), pose(1), pose(2)]);
        let ids: Vec<u32> = sorted.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn yaw_recovers_z_rotation() {
        let q = Quat::from_rotation_z(0.75);
        let record = PoseRecord {
            id: 0,
            tx: 0.0,
            ty: 0.0,
            tz: 0.0,
            qx: q.x,
            qy: q.y,
            qz: q.z,
            qw: q.w,
        };
        assert!((record.yaw() - 0.75).abs() < 1.0e-5);
    }
}
