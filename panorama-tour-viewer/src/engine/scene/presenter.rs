use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::hotspots::spawn_hotspot_marker;
use super::panorama::{PanoramaSphere, panorama_material, panorama_sphere_mesh};
use super::path_segments::{PathGroup, PathSegment, path_material, segment_mesh};
use super::path_visibility::PathVisibility;
use super::scene_loader::{BuiltPath, TourPresenter};
use crate::engine::assets::tour_catalog::{HotspotDescriptor, SceneDescriptor};

/// Root of every entity owned by the active scene. Despawning these
/// removes the scene completely (children go with their parents).
#[derive(Component)]
pub struct SceneVisual;

/// [`TourPresenter`] backed by the ECS: meshes in the world, markers in the UI.
#[derive(SystemParam)]
pub struct SceneCommands<'w, 's> {
    commands: Commands<'w, 's>,
    meshes: ResMut<'w, Assets<Mesh>>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
    asset_server: Res<'w, AssetServer>,
    visuals: Query<'w, 's, Entity, With<SceneVisual>>,
    path_visibility: ResMut<'w, PathVisibility>,
}

impl SceneCommands<'_, '_> {
    pub fn load_texture(&self, path: &str) -> Handle<Image> {
        self.asset_server.load(path.to_string())
    }
}

impl TourPresenter for SceneCommands<'_, '_> {
    type Texture = Handle<Image>;

    fn clear_scene(&mut self) {
        for entity in self.visuals.iter() {
            self.commands.entity(entity).despawn();
        }
    }

    fn show_panorama(&mut self, scene: &SceneDescriptor, texture: Handle<Image>) {
        let mesh = self.meshes.add(panorama_sphere_mesh());
        let material = self.materials.add(panorama_material(texture));
        self.commands.spawn((
            PanoramaSphere,
            SceneVisual,
            Name::new(format!("Panorama {}", scene.id)),
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::IDENTITY,
        ));
    }

    fn show_paths(&mut self, paths: &[BuiltPath<'_>]) {
        let group = self
            .commands
            .spawn((
                PathGroup,
                SceneVisual,
                Name::new("PathGroup"),
                Transform::IDENTITY,
                Visibility::Inherited,
            ))
            .id();

        for path in paths.iter().filter(|path| !path.segments.is_empty()) {
            let material = self.materials.add(path_material(path.descriptor));
            for placement in &path.segments {
                let mesh = self.meshes.add(segment_mesh(placement));
                let segment = self
                    .commands
                    .spawn((
                        PathSegment {
                            path_id: placement.path_id.clone(),
                        },
                        Mesh3d(mesh),
                        MeshMaterial3d(material.clone()),
                        placement.transform(),
                        Visibility::Inherited,
                    ))
                    .id();
                self.commands.entity(group).add_child(segment);
            }
        }
    }

    fn rebuild_path_panel(&mut self, path_ids: &[String]) {
        // The path panel rebuilds itself when the revision moves.
        self.path_visibility.reset(path_ids);
    }

    fn show_hotspot(&mut self, hotspot: &HotspotDescriptor) {
        let marker = spawn_hotspot_marker(&mut self.commands, &self.asset_server, hotspot);
        self.commands.entity(marker).insert(SceneVisual);
    }
}
