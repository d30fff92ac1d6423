use bevy::asset::LoadState;
use bevy::prelude::*;

use super::presenter::SceneCommands;
use super::scene_loader::{SceneLoader, SceneTarget, SceneTicket};
use crate::engine::assets::tour_catalog::TourCatalog;
use crate::engine::core::app_state::ViewerStatus;
use crate::engine::core::config::ViewerConfig;

/// Ask the loader to show another scene. Raised by the scene list,
/// hotspot clicks and RPC.
#[derive(Event, Debug, Clone)]
pub struct LoadSceneRequest {
    pub target: SceneTarget,
}

/// A scene finished building and is now on screen.
#[derive(Event, Debug, Clone)]
pub struct SceneChanged {
    pub index: usize,
    pub scene_id: String,
    pub name: String,
}

#[derive(Event, Debug, Clone)]
pub struct SceneLoadFailed {
    pub index: usize,
    pub reason: String,
}

/// Texture in flight for the latest request. Replacing it drops the
/// previous handle, so a superseded load is released rather than shown.
#[derive(Resource, Default)]
pub struct PendingPanorama {
    request: Option<(SceneTicket, Handle<Image>)>,
}

/// Show the configured starting scene (or the first one) once the tour is in.
pub fn request_initial_scene(
    config: Res<ViewerConfig>,
    catalog: Res<TourCatalog>,
    mut requests: EventWriter<LoadSceneRequest>,
) {
    if catalog.is_empty() {
        warn!("Tour contains no scenes");
        return;
    }

    let target = match config.initial_scene.as_deref() {
        Some(id) if catalog.index_of(id).is_some() => SceneTarget::Id(id.to_string()),
        Some(id) => {
            warn!("Configured start scene '{}' not found, using the first scene", id);
            SceneTarget::from(0)
        }
        None => SceneTarget::from(0),
    };
    requests.write(LoadSceneRequest { target });
}

/// Tear down the current scene and start loading the requested one.
///
/// Only the last valid request of a frame is acted on; it supersedes the rest.
pub fn handle_scene_requests(
    mut requests: EventReader<LoadSceneRequest>,
    catalog: Option<Res<TourCatalog>>,
    mut loader: ResMut<SceneLoader>,
    mut pending: ResMut<PendingPanorama>,
    mut scene_commands: SceneCommands,
    mut status: ResMut<ViewerStatus>,
) {
    let Some(catalog) = catalog else {
        requests.clear();
        return;
    };

    let mut latest = None;
    for request in requests.read() {
        match request.target.resolve(&catalog) {
            Ok(_) => latest = Some(request.target.clone()),
            Err(err) => warn!("Ignoring scene request: {}", err),
        }
    }
    let Some(target) = latest else {
        return;
    };

    match loader.request(&catalog, &target, &mut scene_commands) {
        Ok(ticket) => {
            let Some(scene) = catalog.get(ticket.index) else {
                return;
            };
            info!(
                "Loading scene {} ('{}') from {}",
                ticket.index, scene.id, scene.texture
            );
            let texture = scene_commands.load_texture(&scene.texture);
            pending.request = Some((ticket, texture));
            *status = ViewerStatus::LoadingScene(
                catalog.display_name(ticket.index).unwrap_or_default(),
            );
        }
        Err(err) => warn!("Ignoring scene request: {}", err),
    }
}

/// Build the pending scene once its texture is in `Assets<Image>`.
pub fn finish_pending_scene(
    asset_server: Res<AssetServer>,
    images: Res<Assets<Image>>,
    catalog: Option<Res<TourCatalog>>,
    mut loader: ResMut<SceneLoader>,
    mut pending: ResMut<PendingPanorama>,
    mut scene_commands: SceneCommands,
    mut changed: EventWriter<SceneChanged>,
    mut failed: EventWriter<SceneLoadFailed>,
    mut status: ResMut<ViewerStatus>,
) {
    let (Some(catalog), Some((_, handle))) = (catalog, pending.request.as_ref()) else {
        return;
    };

    if images.contains(handle) {
        let Some((ticket, texture)) = pending.request.take() else {
            return;
        };
        match loader.complete(&catalog, ticket, texture, &mut scene_commands) {
            Ok(active) => {
                let name = catalog.display_name(active.index).unwrap_or_default();
                info!(
                    "Scene {} ready: {} segments across {} paths, {} hotspots",
                    active.index,
                    active.segment_count,
                    active.path_ids.len(),
                    active.hotspot_count
                );
                changed.write(SceneChanged {
                    index: active.index,
                    scene_id: active.scene_id.clone(),
                    name,
                });
                *status = ViewerStatus::Idle;
            }
            Err(err) => debug!("Discarding texture: {}", err),
        }
        return;
    }

    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle) {
        let Some((ticket, _)) = pending.request.take() else {
            return;
        };
        if !loader.abandon(ticket) {
            return;
        }
        let reason = err.to_string();
        error!("Panorama for scene {} failed to load: {}", ticket.index, reason);
        *status = ViewerStatus::Failed(format!(
            "Could not load {}",
            catalog.display_name(ticket.index).unwrap_or_default()
        ));
        failed.write(SceneLoadFailed {
            index: ticket.index,
            reason,
        });
    }
}
