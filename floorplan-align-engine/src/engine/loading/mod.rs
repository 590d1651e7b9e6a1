//! Asset loading and initialisation systems for the alignment scene.
//!
//! Manages the asynchronous floorplan texture load and the pose manifest
//! load with progress tracking. The two loads are independent: the pose
//! manifest gates the `AppState` transition, while the floorplan plane is
//! spawned whenever its texture resolves, and every interaction system
//! guards on the plane reference being set.

/// Floorplan texture load watcher and plane construction.
///
/// Spawns the textured plane and its manipulation handles once the image
/// has decoded and its natural dimensions are known.
pub mod floorplan_loader;

/// Pose manifest loading from JSON configuration.
///
/// Deserialises the ordered pose record list consumed by the scene markers.
pub mod pose_loader;

/// Loading progress tracking resource for state transitions.
pub mod progress;
