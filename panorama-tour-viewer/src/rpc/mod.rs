//! JSON-RPC 2.0 bridge to the embedding page.
//!
//! When the viewer runs inside an iframe the parent window can drive it via
//! `postMessage`, and the viewer reports lifecycle events back.
//!
//! ## Message Flow
//!
//! ```text
//! Parent window  <──postMessage──>  Viewer (iframe)
//!        │                                │
//!        ├─ Request (with ID) ──────────> │
//!        │ <──────────── Response (ID) ───┤
//!        │ <──────── Notification ────────┤
//! ```
//!
//! ## Methods
//!
//! - `get_scenes`: index, id, display name and texture of every scene
//! - `get_current_scene`: the scene shown (or being loaded), or `null`
//! - `load_scene`: `{"index": n}` or `{"id": "..."}`
//! - `set_path_visibility`: `{"path_id": "...", "visible": bool?}`; omitting `visible` flips it
//! - `set_auto_rotate`: `{"enabled": bool?}`; omitting `enabled` flips it
//!
//! ## Notifications
//!
//! - `tour_loaded` / `tour_load_failed`
//! - `scene_changed` / `scene_load_failed`
//!
//! ## Error Handling
//!
//! - `-32601`: Method not found
//! - `-32602`: Invalid params (including unknown scenes and paths)
//! - `-32603`: Internal error (tour data not loaded yet)

/// postMessage listener, request dispatch and outgoing notifications.
pub mod web_rpc;
