//! Floorplan alignment interactor.
//!
//! Binds pointer events to manipulation of the floorplan plane overlaid on
//! the point-cloud scene, through three interchangeable manipulation modes
//! (move, rotate, resize) surfaced by the settings panel and the RPC
//! bridge.
//!
//! ## Architecture
//!
//! The interactor is one component parameterised by a manipulation
//! strategy:
//!
//! ### Custom handles (default)
//! Mesh affordances spawned as children of the plane:
//! - A corner cube for resize, two axis arrows for move, three rings for
//!   rotate
//! - Handle visibility is a pure function of the active mode
//! - Pointer-down raycasts only the active mode's handles
//!
//! ### Delegated gizmo
//! Immediate-mode gizmo drawn each frame with analytic picking:
//! - Modes map onto translate/rotate/scale affordances
//! - Adds a local/world coordinate-space selector
//!
//! Both strategies open the same [`state::DragSession`] record and share
//! the drag mathematics in [`manipulation`].
//!
//! ## Session Flow
//!
//! ```text
//! Pointer-down
//!   └─> pick active-mode handle (ray vs OBB / ring band / axis segment)
//!       ├─> disable orbit controls
//!       └─> open DragSession (start cursor, start scale)
//! Pointer-move
//!   └─> drag_floorplan() applies resize/move/rotate step
//! Pointer-up
//!   └─> close session, re-enable orbit controls
//! ```
//!
//! Every system here guards on the plane reference being set, so input
//! arriving before the texture load resolves is ignored regardless of
//! registration order.

/// Immediate-mode transform gizmo drawing and analytic picking.
pub mod gizmo;

/// Handle spawning and mode-driven visibility.
pub mod handles;

/// Drag-session mathematics shared by both strategies.
pub mod manipulation;

/// Pointer-down picking against mesh handles and session teardown.
pub mod picking;

/// Ray intersection utilities for handle selection.
///
/// Slab-method OBB tests, annulus band tests, and ray/segment proximity.
pub mod ray;

/// State resources, components, and events for the interactor.
pub mod state;

/// Settings panel UI (native only).
pub mod ui;

use bevy::prelude::*;

pub use state::{FloorplanConfig, FloorplanState, ManipulationMode, ManipulationStrategy};

use crate::rpc::web_rpc::WebRpcInterface;

use gizmo::{draw_transform_gizmo, gizmo_pointer_down};
use handles::update_handle_visibility;
use manipulation::drag_floorplan;
use picking::{handle_pointer_down, handle_pointer_up};
use state::{CoordinateSpaceEvent, ModeSelectionEvent};

#[cfg(not(target_arch = "wasm32"))]
use ui::{
    SettingsUiState, apply_collapse_state, camera_view_button_interaction,
    collapse_button_interaction, mode_button_interaction, reflect_camera_view_button,
    reflect_mode_buttons, reflect_space_button, space_button_interaction, spawn_settings_panel,
};

/// System processing mode selections from the panel or RPC. Mode changes
/// never touch an in-progress session; only handle visibility and future
/// picks are affected.
pub fn handle_mode_selection_events(
    mut events: EventReader<ModeSelectionEvent>,
    mut state: ResMut<FloorplanState>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        if state.mode == event.mode {
            continue;
        }
        state.mode = event.mode;
        info!(
            "Manipulation mode set to {} via {:?}",
            event.mode.as_str(),
            event.source
        );
        rpc_interface.send_notification(
            "mode_changed",
            serde_json::json!({ "mode": event.mode.as_str() }),
        );
    }
}

pub fn handle_coordinate_space_events(
    mut events: EventReader<CoordinateSpaceEvent>,
    mut state: ResMut<FloorplanState>,
) {
    for event in events.read() {
        if state.space != event.space {
            state.space = event.space;
            info!("Coordinate space set to {:?}", event.space);
        }
    }
}

// Registers the interactor's resources, events, and systems.
pub struct FloorplanPlugin;

impl Plugin for FloorplanPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FloorplanState>()
            .init_resource::<FloorplanConfig>()
            .add_event::<ModeSelectionEvent>()
            .add_event::<CoordinateSpaceEvent>()
            .add_systems(
                Update,
                (
                    handle_mode_selection_events,
                    handle_coordinate_space_events,
                    update_handle_visibility,
                    // Pointer flow in input order within a frame.
                    (
                        handle_pointer_down,
                        gizmo_pointer_down,
                        drag_floorplan,
                        handle_pointer_up,
                    )
                        .chain(),
                    draw_transform_gizmo,
                ),
            );

        // The settings panel is native only; WASM builds are driven by the
        // RPC bridge instead.
        #[cfg(not(target_arch = "wasm32"))]
        {
            app.init_resource::<SettingsUiState>();
            app.add_systems(
                Update,
                (
                    collapse_button_interaction,
                    apply_collapse_state,
                    mode_button_interaction,
                    reflect_mode_buttons,
                    camera_view_button_interaction,
                    reflect_camera_view_button,
                    space_button_interaction,
                    reflect_space_button,
                ),
            );
            app.add_systems(Startup, spawn_settings_panel);
        }
    }
}
