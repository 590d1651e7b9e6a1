use bevy::prelude::*;

use crate::engine::loading::progress::LoadingProgress;
use crate::rpc::web_rpc::WebRpcInterface;
use crate::tools::floorplan::handles::spawn_handles;
use crate::tools::floorplan::state::{
    FloorplanConfig, FloorplanPlane, FloorplanState, ManipulationStrategy,
};

#[derive(Resource, Default)]
pub struct FloorplanLoader {
    handle: Option<Handle<Image>>,
    failed: bool,
}

// Start the asynchronous texture load
pub fn start_floorplan_loading(
    mut loader: ResMut<FloorplanLoader>,
    config: Res<FloorplanConfig>,
    asset_server: Res<AssetServer>,
) {
    info!("Loading floorplan texture: {}", config.texture_path);
    loader.handle = Some(asset_server.load(&config.texture_path));
}

// Build the plane and its handles once the image has decoded. Until then
// the plane reference stays unset and every interaction system no-ops.
pub fn spawn_floorplan_when_ready(
    mut loader: ResMut<FloorplanLoader>,
    mut loading_progress: ResMut<LoadingProgress>,
    mut state: ResMut<FloorplanState>,
    config: Res<FloorplanConfig>,
    asset_server: Res<AssetServer>,
    images: Res<Assets<Image>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut commands: Commands,
) {
    if state.plane.is_some() || loader.failed {
        return;
    }
    let Some(handle) = loader.handle.clone() else {
        return;
    };

    match asset_server.get_load_state(&handle) {
        Some(bevy::asset::LoadState::Loaded) => {}
        Some(bevy::asset::LoadState::Failed(_)) => {
            // The editor degrades to a non-interactive overlay; no retry.
            warn!("Floorplan texture failed to load: {}", config.texture_path);
            loader.failed = true;
            loading_progress.floorplan_failed = true;
            return;
        }
        _ => return,
    }

    let Some(image) = images.get(&handle) else {
        return;
    };

    let size = plane_dimensions(config.reference_height, image.width(), image.height());
    let depth = config.point_cloud_min_z - config.point_cloud_center.z;

    let plane = commands
        .spawn((
            FloorplanPlane,
            Mesh3d(meshes.add(Rectangle::new(size.x, size.y))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color_texture: Some(handle.clone()),
                unlit: true,
                cull_mode: None,
                alpha_mode: AlphaMode::Blend,
                ..default()
            })),
            Transform::from_translation(Vec3::new(0.0, 0.0, depth)),
            Name::new("FloorplanPlane"),
        ))
        .id();

    if config.strategy == ManipulationStrategy::CustomHandles {
        spawn_handles(
            &mut commands,
            plane,
            size,
            state.mode,
            &mut meshes,
            &mut materials,
        );
    }

    state.plane = Some(plane);
    state.original_size = size;
    state.aspect = image.width() as f32 / image.height() as f32;
    loading_progress.floorplan_loaded = true;

    info!(
        "✓ Floorplan plane created: {:.2} x {:.2} at depth {:.2}",
        size.x, size.y, depth
    );
    rpc_interface.send_notification(
        "floorplan_loaded",
        serde_json::json!({
            "width": size.x,
            "height": size.y,
            "depth": depth,
        }),
    );
}

/// Plane dimensions from the image's natural pixel size: fixed reference
/// height, width scaled by aspect ratio.
pub fn plane_dimensions(reference_height: f32, image_width: u32, image_height: u32) -> Vec2 {
    let aspect = image_width as f32 / image_height as f32;
    Vec2::new(reference_height * aspect, reference_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_width_follows_aspect_ratio() {
        let size = plane_dimensions(10.0, 1920, 1080);
        assert_eq!(size.y, 10.0);
        assert!((size.x - 10.0 * (1920.0 / 1080.0)).abs() < 1.0e-6);
    }

    #[test]
    fn portrait_images_produce_narrow_planes() {
        let size = plane_dimensions(10.0, 1080, 1920);
        assert!(size.x < size.y);
    }
}
