use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::engine::assets::tour_catalog::TourCatalog;
use crate::engine::camera::orbit_camera::{AutoRotateRequest, OrbitCamera};
use crate::engine::loading::catalog_loader::{TourLoadFailed, TourLoaded};
use crate::engine::scene::path_visibility::{PathVisibility, PathVisibilityRequest};
use crate::engine::scene::scene_loader::{SceneLoader, SceneTarget};
use crate::engine::scene::systems::{LoadSceneRequest, SceneChanged, SceneLoadFailed};

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
    #[serde(default)]
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

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication with the embedding page.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the parent page without expecting response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing the postMessage bridge for iframe embedding.
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
                    forward_tour_events,
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

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Only string payloads that look like JSON-RPC are queued.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        if let Err(e) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register message listener: {:?}", e);
        }
    }

    // Ownership moves to JS; the listener lives as long as the page.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

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

/// Read-only view of viewer state the RPC methods answer from.
pub struct RpcContext<'a> {
    pub catalog: Option<&'a TourCatalog>,
    pub current_scene: Option<usize>,
    pub path_visibility: &'a PathVisibility,
    pub auto_rotate: bool,
}

/// State change requested over RPC, applied as an ordinary viewer event.
#[derive(Debug, Clone, PartialEq)]
pub enum RpcCommand {
    LoadScene(SceneTarget),
    SetPathVisibility { path_id: String, visible: Option<bool> },
    SetAutoRotate(Option<bool>),
}

type MethodResult = Result<(serde_json::Value, Option<RpcCommand>), RpcError>;

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    catalog: Option<Res<TourCatalog>>,
    loader: Res<SceneLoader>,
    path_visibility: Res<PathVisibility>,
    orbit: Option<Res<OrbitCamera>>,
    mut scene_requests: EventWriter<LoadSceneRequest>,
    mut path_requests: EventWriter<PathVisibilityRequest>,
    mut rotate_requests: EventWriter<AutoRotateRequest>,
) {
    for event in events.read() {
        let request = match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => request,
            Err(parse_error) => {
                warn!("Discarding malformed RPC message: {}", parse_error);
                continue;
            }
        };
        debug!("RPC method: {}", request.method);

        let context = RpcContext {
            catalog: catalog.as_deref(),
            current_scene: loader.current_index(),
            path_visibility: &*path_visibility,
            auto_rotate: orbit.as_ref().is_some_and(|orbit| orbit.auto_rotate),
        };
        let (response, command) = handle_rpc_request(&request, &context);

        match command {
            Some(RpcCommand::LoadScene(target)) => {
                scene_requests.write(LoadSceneRequest { target });
            }
            Some(RpcCommand::SetPathVisibility { path_id, visible }) => {
                path_requests.write(PathVisibilityRequest { path_id, visible });
            }
            Some(RpcCommand::SetAutoRotate(enabled)) => {
                rotate_requests.write(AutoRotateRequest { enabled });
            }
            None => {}
        }
        if let Some(response) = response {
            rpc_interface.queue_response(response);
        }
    }
}

/// Dispatch one request. Commands are returned for notifications too; only
/// requests with an id get a response.
pub fn handle_rpc_request(
    request: &RpcRequest,
    context: &RpcContext,
) -> (Option<RpcResponse>, Option<RpcCommand>) {
    let result = match request.method.as_str() {
        "get_scenes" => handle_get_scenes(context),
        "get_current_scene" => handle_get_current_scene(context),
        "load_scene" => handle_load_scene(&request.params, context),
        "set_path_visibility" => handle_set_path_visibility(&request.params, context),
        "set_auto_rotate" => handle_set_auto_rotate(&request.params, context),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            let response = request.id.clone().map(|id| {
                create_error_response(
                    id,
                    -32601,
                    "Method not found",
                    Some(json!({"method": request.method})),
                )
            });
            return (response, None);
        }
    };

    let (response_body, command) = match result {
        Ok((value, command)) => (Ok(value), command),
        Err(error) => (Err(error), None),
    };

    let response = request.id.clone().map(|id| match response_body {
        Ok(result_value) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        },
        Err(error) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        },
    });
    (response, command)
}

fn require_catalog<'a>(context: &RpcContext<'a>) -> Result<&'a TourCatalog, RpcError> {
    context
        .catalog
        .ok_or_else(|| RpcError::internal_error("Tour data is not loaded"))
}

fn scene_summary(catalog: &TourCatalog, index: usize) -> serde_json::Value {
    match catalog.get(index) {
        Some(scene) => json!({
            "index": index,
            "id": scene.id,
            "name": catalog.display_name(index),
            "texture": scene.texture,
        }),
        None => serde_json::Value::Null,
    }
}

fn handle_get_scenes(context: &RpcContext) -> MethodResult {
    let catalog = require_catalog(context)?;
    let scenes: Vec<_> = (0..catalog.len())
        .map(|index| scene_summary(catalog, index))
        .collect();
    Ok((json!({ "scenes": scenes }), None))
}

fn handle_get_current_scene(context: &RpcContext) -> MethodResult {
    let catalog = require_catalog(context)?;
    let scene = context
        .current_scene
        .map(|index| scene_summary(catalog, index))
        .unwrap_or(serde_json::Value::Null);
    Ok((json!({ "scene": scene }), None))
}

/// Accepts `{"index": n}` or `{"id": "..."}` (numeric ids allowed).
fn handle_load_scene(params: &serde_json::Value, context: &RpcContext) -> MethodResult {
    let catalog = require_catalog(context)?;

    let target = if let Some(index) = params.get("index").and_then(serde_json::Value::as_i64) {
        SceneTarget::Index(index)
    } else {
        match params.get("id") {
            Some(serde_json::Value::String(id)) => SceneTarget::Id(id.clone()),
            Some(serde_json::Value::Number(id)) => SceneTarget::Id(id.to_string()),
            _ => return Err(RpcError::invalid_params("Expected 'index' or 'id' parameter")),
        }
    };

    let index = target
        .resolve(catalog)
        .map_err(|err| RpcError::invalid_params(&err.to_string()))?;

    Ok((
        json!({ "success": true, "index": index }),
        Some(RpcCommand::LoadScene(target)),
    ))
}

fn handle_set_path_visibility(params: &serde_json::Value, context: &RpcContext) -> MethodResult {
    #[derive(Deserialize)]
    struct PathVisibilityParams {
        path_id: String,
        visible: Option<bool>,
    }

    let parsed = serde_json::from_value::<PathVisibilityParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'path_id' and optional 'visible'"))?;

    let known = context
        .path_visibility
        .entries()
        .iter()
        .any(|(id, _)| *id == parsed.path_id);
    if !known {
        return Err(RpcError::invalid_params(&format!(
            "Unknown path: {}",
            parsed.path_id
        )));
    }

    let visible = parsed
        .visible
        .unwrap_or(!context.path_visibility.is_visible(&parsed.path_id));

    Ok((
        json!({ "success": true, "path_id": parsed.path_id, "visible": visible }),
        Some(RpcCommand::SetPathVisibility {
            path_id: parsed.path_id,
            visible: Some(visible),
        }),
    ))
}

fn handle_set_auto_rotate(params: &serde_json::Value, context: &RpcContext) -> MethodResult {
    #[derive(Deserialize)]
    struct AutoRotateParams {
        enabled: Option<bool>,
    }

    let parsed = serde_json::from_value::<AutoRotateParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected optional boolean 'enabled'"))?;
    let enabled = parsed.enabled.unwrap_or(!context.auto_rotate);

    Ok((
        json!({ "success": true, "enabled": enabled }),
        Some(RpcCommand::SetAutoRotate(Some(enabled))),
    ))
}

/// Mirror tour and scene lifecycle events to the parent page.
fn forward_tour_events(
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut tour_loaded: EventReader<TourLoaded>,
    mut tour_failed: EventReader<TourLoadFailed>,
    mut scene_changed: EventReader<SceneChanged>,
    mut scene_failed: EventReader<SceneLoadFailed>,
) {
    for event in tour_loaded.read() {
        rpc_interface.send_notification("tour_loaded", json!({ "scenes": event.scene_count }));
    }
    for event in tour_failed.read() {
        rpc_interface.send_notification("tour_load_failed", json!({ "reason": event.reason }));
    }
    for event in scene_changed.read() {
        rpc_interface.send_notification(
            "scene_changed",
            json!({ "index": event.index, "id": event.scene_id, "name": event.name }),
        );
    }
    for event in scene_failed.read() {
        rpc_interface.send_notification(
            "scene_load_failed",
            json!({ "index": event.index, "reason": event.reason }),
        );
    }
}

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

/// Send queued notifications and responses to the parent page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

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
                        debug!("No parent window; RPC message dropped");
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
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}
