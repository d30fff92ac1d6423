//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, runtime settings
//! and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with the tour asset loader, scene systems, UI and
/// the RPC bridge.
pub mod app_setup;

/// Application state machine and the user-facing status.
pub mod app_state;

/// Runtime settings from URL query parameters or environment variables.
pub mod config;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
