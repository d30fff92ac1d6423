//! Scene construction and teardown.
//!
//! A scene is a textured inward-facing sphere, a set of cylinder paths and
//! screen-space hotspot markers. Only one scene exists at a time; switching
//! tears the old one down before the new texture is requested, and late
//! completions for superseded requests are discarded.

/// Hotspot markers, tooltips and the per-frame screen projection.
pub mod hotspots;

/// Inside-out sphere mesh and unlit material for the panorama image.
pub mod panorama;

/// Cylinder placement between path waypoints.
pub mod path_segments;

/// Per-path visibility state and the system applying toggles.
pub mod path_visibility;

/// ECS implementation of the scene presenter.
pub mod presenter;

/// Engine-independent scene switching with generation tickets.
///
/// Validates navigation targets, tracks the pending request and drives a
/// [`scene_loader::TourPresenter`] to clear and build scenes.
pub mod scene_loader;

/// Scene events and the systems that request, complete and abandon loads.
pub mod systems;
