/// Tour description fetched at startup, relative to the asset root
pub const DEFAULT_TOUR_DATA_PATH: &str = "tour-data.json";

/// Prefix for scenes that have no display name
pub const UNNAMED_SCENE_PREFIX: &str = "Scene";

pub const AUTO_ROTATE_BY_DEFAULT: bool = true;

/// Label used for a path with an empty identifier
pub fn path_label(path_id: &str, position: usize) -> String {
    if path_id.is_empty() {
        format!("Path {}", position + 1)
    } else {
        path_id.to_string()
    }
}

/// Fallback display name for an unnamed scene
pub fn unnamed_scene_label(index: usize) -> String {
    format!("{} {}", UNNAMED_SCENE_PREFIX, index + 1)
}
