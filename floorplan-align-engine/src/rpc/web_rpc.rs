use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::camera::view_mode::SetCameraViewEvent;
use crate::tools::floorplan::state::{
    CoordinateSpace, CoordinateSpaceEvent, FloorplanState, ManipulationMode, ModeSelectionEvent,
    SelectionSource,
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC error structure following specification.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}

/// Resource managing bidirectional RPC communication with the frontend.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the frontend without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the frontend.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing the RPC communication layer for iframe deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Filter messages to ensure they contain string data.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            // Attempt JSON parsing to validate RPC format before queuing.
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        window
            .add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            .expect("Failed to register message listener");
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing an incoming RPC message from the frontend.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    floorplan: Res<FloorplanState>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut mode_events: EventWriter<ModeSelectionEvent>,
    mut view_events: EventWriter<SetCameraViewEvent>,
    mut space_events: EventWriter<CoordinateSpaceEvent>,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                if let Some(response) = handle_rpc_request(
                    &request,
                    &diagnostics,
                    &floorplan,
                    &mut mode_events,
                    &mut view_events,
                    &mut space_events,
                ) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Dropping malformed RPC message: {}", parse_error);
            }
        }
    }
}

/// Handle individual RPC request and generate response based on method.
fn handle_rpc_request(
    request: &RpcRequest,
    diagnostics: &DiagnosticsStore,
    floorplan: &FloorplanState,
    mode_events: &mut EventWriter<ModeSelectionEvent>,
    view_events: &mut EventWriter<SetCameraViewEvent>,
    space_events: &mut EventWriter<CoordinateSpaceEvent>,
) -> Option<RpcResponse> {
    // Only generate responses for requests with IDs (notifications have no ID).
    let id = request.id.clone()?;

    let result = match request.method.as_str() {
        "set_mode" => handle_set_mode(&request.params, mode_events),
        "set_camera_view" => handle_set_camera_view(&request.params, view_events),
        "set_coordinate_space" => handle_set_coordinate_space(&request.params, space_events),
        "get_floorplan_state" => handle_get_floorplan_state(floorplan),
        "get_fps" => handle_get_fps(diagnostics),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return Some(create_error_response(
                id,
                -32601,
                "Method not found",
                Some(serde_json::json!({"method": request.method})),
            ));
        }
    };

    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

/// Handle manipulation mode selection with parameter validation.
fn handle_set_mode(
    params: &serde_json::Value,
    mode_events: &mut EventWriter<ModeSelectionEvent>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct SetModeParams {
        mode: String,
    }

    let mode_params = serde_json::from_value::<SetModeParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'mode' parameter"))?;

    let mode = ManipulationMode::from_string(&mode_params.mode)
        .ok_or_else(|| RpcError::invalid_params(&format!("Unknown mode: {}", mode_params.mode)))?;

    mode_events.write(ModeSelectionEvent {
        mode,
        source: SelectionSource::Rpc,
    });

    Ok(serde_json::json!({
        "success": true,
        "mode": mode.as_str()
    }))
}

fn handle_set_camera_view(
    params: &serde_json::Value,
    view_events: &mut EventWriter<SetCameraViewEvent>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct SetCameraViewParams {
        top_down: bool,
    }

    let view_params = serde_json::from_value::<SetCameraViewParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'top_down' parameter"))?;

    view_events.write(SetCameraViewEvent {
        top_down: view_params.top_down,
    });

    Ok(serde_json::json!({
        "success": true,
        "top_down": view_params.top_down
    }))
}

fn handle_set_coordinate_space(
    params: &serde_json::Value,
    space_events: &mut EventWriter<CoordinateSpaceEvent>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct SetSpaceParams {
        space: CoordinateSpace,
    }

    let space_params = serde_json::from_value::<SetSpaceParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'space' of 'local' or 'world'"))?;

    space_events.write(CoordinateSpaceEvent {
        space: space_params.space,
    });

    Ok(serde_json::json!({ "success": true }))
}

/// Report the interactor state so the frontend can mirror it.
fn handle_get_floorplan_state(floorplan: &FloorplanState) -> Result<serde_json::Value, RpcError> {
    Ok(serde_json::json!({
        "ready": floorplan.is_ready(),
        "mode": floorplan.mode.as_str(),
        "space": floorplan.space,
        "scale": [floorplan.scale.x, floorplan.scale.y],
        "rotation": [floorplan.euler.x, floorplan.euler.y, floorplan.euler.z],
        "dragging": floorplan.session.is_some(),
    }))
}

/// Handle FPS retrieval with diagnostic system integration.
fn handle_get_fps(diagnostics: &DiagnosticsStore) -> Result<serde_json::Value, RpcError> {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps_diagnostic| fps_diagnostic.smoothed())
        .unwrap_or(0.0) as f32;

    Ok(serde_json::json!({
        "fps": fps
    }))
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the frontend.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Send notifications first.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Send responses second to maintain order.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Ok(json) = serde_json::to_string(message) {
            debug!("RPC out: {}", json);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_parse_from_frontend_json() {
        let request: RpcRequest = serde_json::from_str(
            r#"{"jsonrpc":"2.0","method":"set_mode","params":{"mode":"rotate"},"id":7}"#,
        )
        .unwrap();
        assert_eq!(request.method, "set_mode");
        assert_eq!(request.id, Some(serde_json::json!(7)));
        assert_eq!(request.params["mode"], "rotate");
    }

    #[test]
    fn notifications_serialize_without_an_id() {
        let mut interface = WebRpcInterface::default();
        interface.send_notification("mode_changed", serde_json::json!({"mode": "move"}));

        let json = serde_json::to_value(&interface.outgoing_notifications[0]).unwrap();
        assert_eq!(json["jsonrpc"], "2.0");
        assert_eq!(json["method"], "mode_changed");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn coordinate_space_params_deserialize_lowercase() {
        let value = serde_json::json!({"space": "world"});
        #[derive(Deserialize)]
        struct Params {
            space: CoordinateSpace,
        }
        let params: Params = serde_json::from_value(value).unwrap();
        assert_eq!(params.space, CoordinateSpace::World);
    }
}
