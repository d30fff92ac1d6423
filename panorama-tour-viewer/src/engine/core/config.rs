use bevy::prelude::*;
use tour_constants::tour_defaults::{AUTO_ROTATE_BY_DEFAULT, DEFAULT_TOUR_DATA_PATH};

/// Runtime settings, read once at startup.
///
/// On the web these come from the page URL (`?tour=...&scene=...&autorotate=0`),
/// natively from `TOUR_DATA`, `TOUR_SCENE` and `TOUR_AUTO_ROTATE`.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Tour data JSON, relative to the asset root.
    pub tour_data_path: String,
    /// Scene id shown first; the first scene when unset.
    pub initial_scene: Option<String>,
    pub auto_rotate: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            tour_data_path: DEFAULT_TOUR_DATA_PATH.to_string(),
            initial_scene: None,
            auto_rotate: AUTO_ROTATE_BY_DEFAULT,
        }
    }
}

impl ViewerConfig {
    pub const TOUR_KEY: &'static str = "tour";
    pub const SCENE_KEY: &'static str = "scene";
    pub const AUTO_ROTATE_KEY: &'static str = "autorotate";

    /// Layer overrides from `lookup` (keyed by the query parameter names) onto `self`.
    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup(Self::TOUR_KEY).filter(|p| !p.trim().is_empty()) {
            self.tour_data_path = path.trim().to_string();
        }
        if let Some(scene) = lookup(Self::SCENE_KEY).filter(|s| !s.trim().is_empty()) {
            self.initial_scene = Some(scene.trim().to_string());
        }
        if let Some(raw) = lookup(Self::AUTO_ROTATE_KEY) {
            match parse_flag(&raw) {
                Some(enabled) => self.auto_rotate = enabled,
                None => warn!("Ignoring unrecognised {} value '{}'", Self::AUTO_ROTATE_KEY, raw),
            }
        }
        self
    }

    #[cfg(target_arch = "wasm32")]
    pub fn from_environment() -> Self {
        let params = web_sys::window()
            .and_then(|window| window.location().search().ok())
            .and_then(|search| web_sys::UrlSearchParams::new_with_str(&search).ok());

        match params {
            Some(params) => Self::default().apply_overrides(|key| params.get(key)),
            None => Self::default(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_environment() -> Self {
        Self::default().apply_overrides(|key| {
            let var = match key {
                Self::TOUR_KEY => "TOUR_DATA",
                Self::SCENE_KEY => "TOUR_SCENE",
                Self::AUTO_ROTATE_KEY => "TOUR_AUTO_ROTATE",
                _ => return None,
            };
            std::env::var(var).ok()
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_overrides() {
        let config = ViewerConfig::default().apply_overrides(lookup(&[]));
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.tour_data_path, "tour-data.json");
        assert!(config.auto_rotate);
    }

    #[test]
    fn overrides_replace_defaults() {
        let config = ViewerConfig::default().apply_overrides(lookup(&[
            ("tour", "tours/harbour.json"),
            ("scene", " lobby "),
            ("autorotate", "OFF"),
        ]));
        assert_eq!(config.tour_data_path, "tours/harbour.json");
        assert_eq!(config.initial_scene.as_deref(), Some("lobby"));
        assert!(!config.auto_rotate);
    }

    #[test]
    fn blank_or_unreadable_values_are_ignored() {
        let config = ViewerConfig::default().apply_overrides(lookup(&[
            ("tour", "  "),
            ("scene", ""),
            ("autorotate", "sometimes"),
        ]));
        assert_eq!(config, ViewerConfig::default());
    }
}
