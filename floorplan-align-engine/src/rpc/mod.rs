//! JSON-RPC 2.0 communication layer for frontend integration.
//!
//! Implements bidirectional messaging between the Bevy engine and a hosting
//! web page via iframe postMessage, supporting both request-response and
//! notification patterns. Native builds keep the interface resource so
//! systems can queue notifications unconditionally; without a transport the
//! queue simply drains to the log.
//!
//! ## Message Flow
//!
//! ```text
//! Frontend (Parent Window)  <──postMessage──>  Bevy (iframe)
//!        │                                          │
//!        ├─ Request (with ID) ────────────────────> │
//!        │                                          ├─ Process request
//!        │ <─────────────────── Response (with ID) ─┤
//!        │                                          │
//!        │ <──────────── Notification (no ID) ──────┤
//! ```
//!
//! ## Methods
//!
//! - `set_mode`: Select manipulation mode (`none`/`move`/`rotate`/`resize`,
//!   with the gizmo-variant aliases `translate`/`scale`)
//! - `set_camera_view`: Toggle the top-down 2D view
//! - `set_coordinate_space`: Switch the gizmo between `local` and `world`
//! - `get_floorplan_state`: Current mode, space, scale, and rotation
//! - `get_fps`: Retrieve current frame rate
//!
//! ## Notifications
//!
//! - `mode_changed`, `camera_view_changed`, `floorplan_loaded`

/// JSON-RPC 2.0 bidirectional communication system.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
