//! Camera for looking around inside the panorama sphere.
//!
//! Orbit-style controls with damping, auto-rotation and wheel zoom. Panning
//! is not offered; the view always stays centred on the sphere.

/// Orbit camera resource, controller system and auto-rotate requests.
pub mod orbit_camera;
