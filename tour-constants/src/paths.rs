/// Radius of every path connector cylinder
pub const PATH_RADIUS: f32 = 3.5;

/// Radial subdivisions of a path connector cylinder
pub const PATH_RESOLUTION: u32 = 12;

/// Waypoint pairs closer than this are treated as duplicates and skipped
pub const MIN_SEGMENT_LENGTH: f32 = 0.1;

/// Emissive glow as a fraction of the path colour
pub const PATH_EMISSIVE_INTENSITY: f32 = 0.3;
