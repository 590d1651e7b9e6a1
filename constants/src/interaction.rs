/// Multiplier applied to horizontal cursor travel during a resize drag.
pub const RESIZE_SENSITIVITY: f32 = 0.01;

/// Units of plane translation per pixel of cursor travel along a move arrow.
pub const MOVE_SENSITIVITY: f32 = 0.05;

/// Radians of plane rotation per pixel of cursor travel on a rotation ring.
pub const ROTATE_SENSITIVITY: f32 = 0.01;

/// Per-axis floor for the plane scale. Keeps resize drags from producing
/// degenerate or inverted geometry.
pub const MIN_PLANE_SCALE: f32 = 0.1;

/// World-space height the floorplan plane is built at; width follows the
/// image aspect ratio.
pub const REFERENCE_PLANE_HEIGHT: f32 = 10.0;

/// Pick distance for the immediate-mode gizmo axes, in world units.
pub const GIZMO_PICK_THRESHOLD: f32 = 0.25;

pub const ORBIT_ROTATE_SENSITIVITY: f32 = 0.005;
pub const ORBIT_PAN_FACTOR: f32 = 0.002;
pub const ORBIT_ZOOM_FACTOR: f32 = 0.1;
pub const ORBIT_MIN_DISTANCE: f32 = 0.5;
