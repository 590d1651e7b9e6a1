use bevy::prelude::*;

#[derive(Resource, Default)]
pub struct LoadingProgress {
    pub poses_loaded: bool,
    pub floorplan_loaded: bool,
    pub floorplan_failed: bool,
}
