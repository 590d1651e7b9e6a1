/// Edge length of the corner resize handle cube.
pub const RESIZE_HANDLE_SIZE: f32 = 0.3;

/// Offset lifting handles off the plane surface so they are not z-fighting
/// with the floorplan texture.
pub const HANDLE_Z_OFFSET: f32 = 0.01;

pub const MOVE_ARROW_X_LENGTH: f32 = 5.0;
pub const MOVE_ARROW_Y_LENGTH: f32 = 3.0;
pub const MOVE_ARROW_SHAFT_RADIUS: f32 = 0.05;
pub const MOVE_ARROW_TIP_LENGTH: f32 = 0.5;
pub const MOVE_ARROW_TIP_RADIUS: f32 = 0.15;

pub const ROTATE_RING_INNER_RADIUS: f32 = 1.6;
pub const ROTATE_RING_OUTER_RADIUS: f32 = 1.8;
pub const ROTATE_RING_RESOLUTION: u32 = 64;

/// Canonical top-down camera height above the scene origin.
pub const TOP_DOWN_CAMERA_HEIGHT: f32 = 10.0;

/// View-direction sector fan shown at each pose record.
pub const VIEW_SECTOR_FOV: f32 = std::f32::consts::FRAC_PI_3;
pub const VIEW_SECTOR_RADIUS: f32 = 1.5;
pub const VIEW_SECTOR_SEGMENTS: usize = 32;
pub const VIEW_SECTOR_LIFT: f32 = 0.2;

/// Radius of the drawn gizmo rotation circles under the delegated strategy.
pub const GIZMO_RING_RADIUS: f32 = 1.7;
pub const GIZMO_AXIS_LENGTH: f32 = 2.5;
