use bevy::prelude::*;

use crate::engine::loading::progress::LoadingProgress;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States, Resource)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

#[derive(Component)]
pub struct FpsText;

// The floorplan texture load is deliberately not part of this transition:
// interaction systems guard on the plane being initialised instead.
pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.poses_loaded {
        info!("→ Transitioning to Running state");
        next_state.set(AppState::Running);
    }
}
