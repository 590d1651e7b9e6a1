use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

// Crate engine modules
use crate::engine::camera::orbit_camera::{OrbitControls, camera_controller};
use crate::engine::camera::view_mode::{
    CameraViewState, SavedCameraPose, SetCameraViewEvent, handle_camera_view_events,
};
use crate::engine::core::app_state::AppState;
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::floorplan_loader::{
    FloorplanLoader, spawn_floorplan_when_ready, start_floorplan_loading,
};
use crate::engine::loading::pose_loader::{
    PoseLoader, PoseManifest, load_poses_system, start_loading,
};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::pose_markers::{PoseMarkersCreated, spawn_pose_markers};
// Crate tools modules
use crate::tools::floorplan::FloorplanPlugin;
// Crate Web RPC modules
use crate::rpc::web_rpc::WebRpcPlugin;
// Transitions
use crate::engine::core::app_state::transition_to_running;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::core::app_state::FpsText;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers the pose manifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<PoseManifest>::new(&["json"]))
        .add_plugins(WebRpcPlugin)
        .add_plugins(FloorplanPlugin);

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<PoseLoader>()
        .init_resource::<FloorplanLoader>()
        .init_resource::<OrbitControls>()
        .init_resource::<PoseMarkersCreated>()
        .add_event::<SetCameraViewEvent>();

    // State-based system scheduling
    app.add_systems(
        Startup,
        (setup, start_loading, start_floorplan_loading).chain(),
    )
    .add_systems(
        Update,
        (load_poses_system, transition_to_running)
            .chain()
            .run_if(in_state(AppState::Loading)),
    );

    // The floorplan load is independent of the state machine: the plane
    // appears whenever its texture resolves, and interaction systems guard
    // on the plane reference instead of load ordering.
    app.add_systems(
        Update,
        (
            spawn_floorplan_when_ready,
            camera_controller,
            handle_camera_view_events,
        ),
    );

    app.add_systems(
        Update,
        spawn_pose_markers.run_if(in_state(AppState::Running)),
    );

    // Add fps_text_update_system only for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, fps_text_update_system);
    }

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands) {
    spawn_lighting(&mut commands);
    create_scene_camera(&mut commands);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
}

// Spawns the scene camera and captures its construction pose; the 2D view
// toggle restores exactly this pose on exit.
fn create_scene_camera(commands: &mut Commands) {
    let target = Vec3::ZERO;
    let up = Vec3::Y;
    let transform = Transform::from_xyz(-2.5, 4.5, 9.0).looking_at(target, up);

    commands.spawn((Camera3d::default(), transform));
    commands.insert_resource(CameraViewState::new(SavedCameraPose {
        position: transform.translation,
        up,
        target,
    }));
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
        });
}

#[cfg(not(target_arch = "wasm32"))]
fn fps_text_update_system(
    diagnostics: Res<bevy::diagnostic::DiagnosticsStore>,
    mut query: Query<&mut Text, With<FpsText>>,
) {
    for mut text in &mut query {
        if let Some(fps) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
            if let Some(value) = fps.smoothed() {
                text.0 = format!("FPS: {value:.1}");
            }
        }
    }
}
