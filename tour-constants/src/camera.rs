/// Vertical field of view in degrees
pub const FOV_DEGREES: f32 = 75.0;

pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 2000.0;

/// Starting distance between the camera and the orbit target
pub const INITIAL_DISTANCE: f32 = 0.1;

/// Zoom limits, kept inside the panorama sphere
pub const MIN_DISTANCE: f32 = 0.01;
pub const MAX_DISTANCE: f32 = 400.0;

/// Auto-rotation speed; 1.0 is one full turn per minute
pub const AUTO_ROTATE_SPEED: f32 = 0.5;

/// Fraction of angular velocity applied (and removed) per 60 Hz frame
pub const DAMPING_FACTOR: f32 = 0.05;

/// Radians of rotation per pixel of mouse drag
pub const ROTATE_SENSITIVITY: f32 = 0.005;

/// Distance multiplier per wheel line
pub const ZOOM_STEP: f32 = 0.95;

/// Pitch is kept just shy of the poles to avoid a degenerate look-at
pub const MAX_PITCH: f32 = 1.55;
