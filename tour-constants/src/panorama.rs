/// Radius of the sphere the panorama texture is mapped onto
pub const SPHERE_RADIUS: f32 = 500.0;

/// Longitudinal subdivisions of the panorama sphere
pub const SPHERE_SECTORS: u32 = 128;

/// Latitudinal subdivisions of the panorama sphere
pub const SPHERE_STACKS: u32 = 128;

/// Ambient light brightness so emissive path segments still pick up shading
pub const AMBIENT_BRIGHTNESS: f32 = 1500.0;

/// Hotspot marker edge length in logical pixels
pub const HOTSPOT_MARKER_SIZE: f32 = 32.0;

/// Tooltip panel width in logical pixels
pub const HOTSPOT_TOOLTIP_WIDTH: f32 = 220.0;
