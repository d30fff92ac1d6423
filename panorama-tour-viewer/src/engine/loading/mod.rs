//! Tour data loading.
//!
//! The tour JSON is loaded through the asset server and published as the
//! `TourCatalog` resource, after which the app moves to `AppState::Running`.
//! Panorama textures are loaded per scene by the scene systems.

/// Tour data request, parse result handling and load notifications.
pub mod catalog_loader;
