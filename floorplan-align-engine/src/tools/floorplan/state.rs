use bevy::prelude::*;
use constants::interaction::REFERENCE_PLANE_HEIGHT;
use serde::{Deserialize, Serialize};

/// Enumeration of manipulation modes. Exactly one is active at a time;
/// only the active mode's handles are visible and pickable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManipulationMode {
    #[default]
    None,
    Move,
    Rotate,
    Resize,
}

impl ManipulationMode {
    /// Convert string identifier to mode for RPC compatibility.
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(Self::None),
            "move" | "translate" => Some(Self::Move),
            "rotate" => Some(Self::Rotate),
            "resize" | "scale" => Some(Self::Resize),
            _ => None,
        }
    }

    /// Convert mode to string identifier for frontend communication.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Move => "move",
            Self::Rotate => "rotate",
            Self::Resize => "resize",
        }
    }
}

/// Reference frame for the delegated gizmo's translation axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateSpace {
    #[default]
    Local,
    World,
}

/// Which manipulation affordance the interactor presents. Both strategies
/// share the session record and the drag mathematics; they differ in how
/// handles are drawn and picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManipulationStrategy {
    #[default]
    CustomHandles,
    DelegatedGizmo,
}

/// Identity of a pickable handle. Each kind belongs to exactly one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    ResizeCorner,
    MoveAxisX,
    MoveAxisY,
    RotateRingX,
    RotateRingY,
    RotateRingZ,
}

impl HandleKind {
    pub fn mode(self) -> ManipulationMode {
        match self {
            Self::ResizeCorner => ManipulationMode::Resize,
            Self::MoveAxisX | Self::MoveAxisY => ManipulationMode::Move,
            Self::RotateRingX | Self::RotateRingY | Self::RotateRingZ => ManipulationMode::Rotate,
        }
    }
}

/// Transient state of one drag gesture, created on a successful pick and
/// destroyed on pointer-up. At most one exists at a time, and its handle
/// belongs to the mode that was active when the session started.
#[derive(Debug, Clone, Copy)]
pub struct DragSession {
    pub handle: HandleKind,
    pub entity: Option<Entity>,
    pub start_cursor: Vec2,
    pub prev_cursor: Vec2,
    pub start_scale: Vec2,
}

// Components
#[derive(Component)]
pub struct FloorplanPlane;

/// Marks a handle visual and names its kind. Visibility follows the active
/// mode; pick geometry is carried separately by [`HandleShape`].
#[derive(Component)]
pub struct ManipulationHandle(pub HandleKind);

/// Analytic pick geometry for a handle, tested in the handle's local frame.
#[derive(Component)]
pub enum HandleShape {
    /// Oriented box with the given full extents.
    Obb(Vec3),
    /// Flat annulus in the local XY plane.
    Ring { inner: f32, outer: f32 },
}

/// Interactor state: the plane reference (unset until the texture load
/// resolves), the active mode, the drag session, and the plane transform
/// fields the manipulation systems accumulate into.
#[derive(Resource)]
pub struct FloorplanState {
    pub plane: Option<Entity>,
    pub mode: ManipulationMode,
    pub space: CoordinateSpace,
    pub session: Option<DragSession>,
    /// Per-axis euler accumulation in XYZ order, mirroring the ring
    /// mappings (rings write single components, unclamped).
    pub euler: Vec3,
    pub scale: Vec2,
    /// Pre-scale plane dimensions; also what the corner handle is
    /// repositioned from after a resize.
    pub original_size: Vec2,
    pub aspect: f32,
}

impl Default for FloorplanState {
    fn default() -> Self {
        Self {
            plane: None,
            mode: ManipulationMode::None,
            space: CoordinateSpace::Local,
            session: None,
            euler: Vec3::ZERO,
            scale: Vec2::ONE,
            original_size: Vec2::ZERO,
            aspect: 1.0,
        }
    }
}

impl FloorplanState {
    pub fn is_ready(&self) -> bool {
        self.plane.is_some()
    }
}

/// Construction parameters for the interactor.
#[derive(Resource, Clone)]
pub struct FloorplanConfig {
    pub texture_path: String,
    pub pose_manifest_path: String,
    /// Minimum Z of the associated point cloud; the plane sits at
    /// `point_cloud_min_z - point_cloud_center.z`.
    pub point_cloud_min_z: f32,
    pub point_cloud_center: Vec3,
    pub reference_height: f32,
    pub strategy: ManipulationStrategy,
}

impl Default for FloorplanConfig {
    fn default() -> Self {
        Self {
            texture_path: "floorplans/nav_deck.png".to_string(),
            pose_manifest_path: "poses/nav_deck_poses.json".to_string(),
            point_cloud_min_z: 0.0,
            point_cloud_center: Vec3::ZERO,
            reference_height: REFERENCE_PLANE_HEIGHT,
            strategy: ManipulationStrategy::CustomHandles,
        }
    }
}

/// Event fired when a manipulation mode is requested via the settings
/// panel or RPC.
#[derive(Event)]
pub struct ModeSelectionEvent {
    pub mode: ManipulationMode,
    pub source: SelectionSource,
}

/// Event fired to switch the gizmo's coordinate space.
#[derive(Event)]
pub struct CoordinateSpaceEvent {
    pub space: CoordinateSpace,
}

/// Source of a selection for debugging and conditional logic.
#[derive(Debug, Clone, Copy)]
pub enum SelectionSource {
    Rpc,
    Panel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_kinds_map_to_their_modes() {
        assert_eq!(HandleKind::ResizeCorner.mode(), ManipulationMode::Resize);
        assert_eq!(HandleKind::MoveAxisX.mode(), ManipulationMode::Move);
        assert_eq!(HandleKind::MoveAxisY.mode(), ManipulationMode::Move);
        assert_eq!(HandleKind::RotateRingX.mode(), ManipulationMode::Rotate);
        assert_eq!(HandleKind::RotateRingY.mode(), ManipulationMode::Rotate);
        assert_eq!(HandleKind::RotateRingZ.mode(), ManipulationMode::Rotate);
    }

    #[test]
    fn mode_strings_round_trip() {
        for mode in [
            ManipulationMode::None,
            ManipulationMode::Move,
            ManipulationMode::Rotate,
            ManipulationMode::Resize,
        ] {
            assert_eq!(ManipulationMode::from_string(mode.as_str()), Some(mode));
        }
        // Gizmo-variant vocabulary maps onto the same modes.
        assert_eq!(
            ManipulationMode::from_string("translate"),
            Some(ManipulationMode::Move)
        );
        assert_eq!(
            ManipulationMode::from_string("scale"),
            Some(ManipulationMode::Resize)
        );
        assert_eq!(ManipulationMode::from_string("bogus"), None);
    }
}
