use bevy::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};
use tour_constants::tour_defaults::unnamed_scene_label;

use super::colour::ColourValue;

/// World-space point as written in tour data (`{x, y, z}`).
/// Missing coordinates default to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl From<Position> for Vec3 {
    fn from(p: Position) -> Self {
        Vec3::new(p.x, p.y, p.z)
    }
}

/// Ordered waypoints rendered as connected cylinders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathDescriptor {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub color: Option<ColourValue>,
    #[serde(default)]
    pub points: Vec<Position>,
}

/// Hotspot behaviour. Tour data marks scene links with `"SCENE"`;
/// every other value is informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HotspotKind {
    SceneLink,
    Info,
}

impl From<String> for HotspotKind {
    fn from(value: String) -> Self {
        if value == "SCENE" {
            Self::SceneLink
        } else {
            Self::Info
        }
    }
}

impl From<HotspotKind> for String {
    fn from(kind: HotspotKind) -> Self {
        match kind {
            HotspotKind::SceneLink => "SCENE".to_string(),
            HotspotKind::Info => "INFO".to_string(),
        }
    }
}

/// Tooltip payload attached to a hotspot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HotspotContent {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl HotspotContent {
    /// Tooltips are only attached when at least one field has something to show.
    pub fn has_content(&self) -> bool {
        [&self.title, &self.text, &self.image]
            .into_iter()
            .any(|field| field.as_deref().is_some_and(|s| !s.is_empty()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotspotDescriptor {
    #[serde(rename = "type")]
    pub kind: HotspotKind,
    pub position: Position,
    #[serde(default)]
    pub color: Option<ColourValue>,
    #[serde(
        rename = "targetSceneId",
        default,
        deserialize_with = "deserialize_optional_id"
    )]
    pub target_scene_id: Option<String>,
    #[serde(default)]
    pub data: Option<HotspotContent>,
}

impl HotspotDescriptor {
    /// Tooltip content, when there is any worth displaying.
    pub fn tooltip(&self) -> Option<&HotspotContent> {
        self.data.as_ref().filter(|data| data.has_content())
    }
}

/// One panoramic viewpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneDescriptor {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub texture: String,
    #[serde(default)]
    pub paths: Vec<PathDescriptor>,
    #[serde(default)]
    pub hotspots: Vec<HotspotDescriptor>,
}

/// Complete tour as a Bevy asset. The JSON file is a bare array of scenes.
/// Inserted as a resource once loaded and never mutated afterwards.
#[derive(Asset, TypePath, Resource, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TourCatalog {
    scenes: Vec<SceneDescriptor>,
}

impl TourCatalog {
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SceneDescriptor> {
        self.scenes.get(index)
    }

    /// Linear lookup; tours hold at most a few hundred scenes.
    pub fn index_of(&self, scene_id: &str) -> Option<usize> {
        self.scenes.iter().position(|scene| scene.id == scene_id)
    }

    /// Name shown in the scene list, falling back to a 1-based label.
    pub fn display_name(&self, index: usize) -> Option<String> {
        let scene = self.scenes.get(index)?;
        Some(match scene.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => unnamed_scene_label(index),
        })
    }
}

/// Untagged identifier so `"3"` and `3` both resolve to the same scene.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => text,
            RawId::Integer(number) => number.to_string(),
            RawId::Float(number) => number.to_string(),
        }
    }
}

fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    RawId::deserialize(deserializer).map(String::from)
}

fn deserialize_optional_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<RawId>::deserialize(deserializer)?
        .map(String::from)
        .filter(|id| !id.is_empty()))
}
