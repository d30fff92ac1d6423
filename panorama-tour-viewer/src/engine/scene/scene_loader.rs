use bevy::prelude::*;
use thiserror::Error;

use super::path_segments::{SegmentPlacement, build_path_segments};
use crate::engine::assets::tour_catalog::{
    HotspotDescriptor, PathDescriptor, SceneDescriptor, TourCatalog,
};

/// Where a navigation request points: a catalog position or a scene id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneTarget {
    Index(i64),
    Id(String),
}

impl SceneTarget {
    pub fn resolve(&self, catalog: &TourCatalog) -> Result<usize, NavigationError> {
        match self {
            Self::Index(index) => usize::try_from(*index)
                .ok()
                .filter(|&i| i < catalog.len())
                .ok_or(NavigationError::OutOfRange {
                    index: *index,
                    len: catalog.len(),
                }),
            Self::Id(id) => catalog
                .index_of(id)
                .ok_or_else(|| NavigationError::UnknownScene(id.clone())),
        }
    }
}

impl From<usize> for SceneTarget {
    fn from(index: usize) -> Self {
        Self::Index(index as i64)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("scene index {index} is outside a tour of {len} scenes")]
    OutOfRange { index: i64, len: usize },
    #[error("no scene has id '{0}'")]
    UnknownScene(String),
    #[error("scene request #{requested} was superseded by request #{current}")]
    Superseded { requested: u64, current: u64 },
}

/// Identifies one `load_scene` request. Completions carrying a ticket
/// older than the loader's pending one are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneTicket {
    pub index: usize,
    pub generation: u64,
}

/// One path's descriptor alongside the segments built from its waypoints.
pub struct BuiltPath<'a> {
    pub descriptor: &'a PathDescriptor,
    pub segments: Vec<SegmentPlacement>,
}

/// Render-surface and overlay operations the loader drives.
///
/// Bevy implements this over `Commands`; tests record the calls.
pub trait TourPresenter {
    type Texture;

    /// Remove every visual belonging to the previous scene.
    fn clear_scene(&mut self);
    fn show_panorama(&mut self, scene: &SceneDescriptor, texture: Self::Texture);
    /// Always called once per scene, possibly with no paths.
    fn show_paths(&mut self, paths: &[BuiltPath<'_>]);
    /// Replace the path toggles; empty during teardown.
    fn rebuild_path_panel(&mut self, path_ids: &[String]);
    fn show_hotspot(&mut self, hotspot: &HotspotDescriptor);
}

/// Bookkeeping for the scene currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveScene {
    pub index: usize,
    pub scene_id: String,
    pub generation: u64,
    pub path_ids: Vec<String>,
    pub segment_count: usize,
    pub hotspot_count: usize,
}

#[derive(Resource, Debug, Default)]
pub struct SceneLoader {
    generation: u64,
    current_index: Option<usize>,
    pending: Option<SceneTicket>,
    active: Option<ActiveScene>,
}

impl SceneLoader {
    /// Start showing the scene at `target`.
    ///
    /// Invalid targets return an error and leave every piece of state
    /// untouched. Valid targets tear the old scene down immediately; the
    /// new one is built by [`SceneLoader::complete`] once its texture is in.
    pub fn request<P: TourPresenter>(
        &mut self,
        catalog: &TourCatalog,
        target: &SceneTarget,
        presenter: &mut P,
    ) -> Result<SceneTicket, NavigationError> {
        let index = target.resolve(catalog)?;

        self.generation += 1;
        let ticket = SceneTicket {
            index,
            generation: self.generation,
        };
        self.pending = Some(ticket);
        self.current_index = Some(index);
        self.active = None;
        presenter.clear_scene();
        presenter.rebuild_path_panel(&[]);

        Ok(ticket)
    }

    /// Build the scene for `ticket` once its texture has loaded.
    pub fn complete<P: TourPresenter>(
        &mut self,
        catalog: &TourCatalog,
        ticket: SceneTicket,
        texture: P::Texture,
        presenter: &mut P,
    ) -> Result<&ActiveScene, NavigationError> {
        if self.pending != Some(ticket) {
            return Err(NavigationError::Superseded {
                requested: ticket.generation,
                current: self.generation,
            });
        }
        let scene = catalog
            .get(ticket.index)
            .ok_or(NavigationError::OutOfRange {
                index: ticket.index as i64,
                len: catalog.len(),
            })?;
        self.pending = None;

        presenter.show_panorama(scene, texture);

        let built: Vec<BuiltPath> = scene
            .paths
            .iter()
            .map(|descriptor| BuiltPath {
                descriptor,
                segments: build_path_segments(descriptor),
            })
            .collect();
        presenter.show_paths(&built);

        let mut path_ids: Vec<String> = Vec::new();
        for path in built.iter().filter(|path| !path.segments.is_empty()) {
            if !path_ids.contains(&path.descriptor.id) {
                path_ids.push(path.descriptor.id.clone());
            }
        }
        presenter.rebuild_path_panel(&path_ids);

        for hotspot in &scene.hotspots {
            presenter.show_hotspot(hotspot);
        }

        Ok(self.active.insert(ActiveScene {
            index: ticket.index,
            scene_id: scene.id.clone(),
            generation: ticket.generation,
            path_ids,
            segment_count: built.iter().map(|path| path.segments.len()).sum(),
            hotspot_count: scene.hotspots.len(),
        }))
    }

    /// Drop a request whose texture could not be loaded. Returns whether it was still pending.
    pub fn abandon(&mut self, ticket: SceneTicket) -> bool {
        if self.pending == Some(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    #[cfg(test)]
    pub fn is_pending(&self, ticket: SceneTicket) -> bool {
        self.pending == Some(ticket)
    }

    /// Most recently requested scene, whether or not it has finished loading.
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    #[cfg(test)]
    pub fn active(&self) -> Option<&ActiveScene> {
        self.active.as_ref()
    }

    #[cfg(test)]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
