//! Tour data model loaded from the JSON tour description.
//!
//! Scenes, paths and hotspots are immutable once the catalog asset has
//! been parsed; the catalog is then published as a resource.

/// Colour values accepted in tour data (packed integers or CSS hex strings).
pub mod colour;

/// Scene, path and hotspot descriptors plus the catalog asset itself.
pub mod tour_catalog;
