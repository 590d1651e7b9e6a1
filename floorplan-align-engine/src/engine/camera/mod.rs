//! Orbit camera for scene navigation and the 2D/3D view toggle.

/// Orbit controls resource and controller system.
pub mod orbit_camera;

/// Two-state camera view machine with save-on-enter, restore-on-exit.
pub mod view_mode;
