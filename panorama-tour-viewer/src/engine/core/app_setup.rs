use bevy::asset::AssetMetaCheck;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use tour_constants::panorama::AMBIENT_BRIGHTNESS;

// Crate engine modules
use crate::engine::assets::tour_catalog::TourCatalog;
use crate::engine::camera::orbit_camera::{
    AutoRotateRequest, apply_auto_rotate_requests, orbit_camera_controller, spawn_panorama_camera,
};
use crate::engine::core::app_state::{AppState, ViewerStatus};
use crate::engine::core::config::ViewerConfig;
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::catalog_loader::{
    CatalogLoader, TourLoadFailed, TourLoaded, load_catalog_system, start_loading,
};
use crate::engine::scene::hotspots::{hotspot_interaction, update_hotspot_positions};
use crate::engine::scene::path_visibility::{
    PathVisibility, PathVisibilityRequest, apply_path_visibility,
};
use crate::engine::scene::scene_loader::SceneLoader;
use crate::engine::scene::systems::{
    LoadSceneRequest, PendingPanorama, SceneChanged, SceneLoadFailed, finish_pending_scene,
    handle_scene_requests, request_initial_scene,
};
// UI and Web RPC
use crate::rpc::web_rpc::WebRpcPlugin;
use crate::ui::TourUiPlugin;

pub fn create_app() -> App {
    let config = ViewerConfig::from_environment();
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Registers TourCatalog as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<TourCatalog>::new(&["json"]))
        .add_plugins(WebRpcPlugin)
        .add_plugins(TourUiPlugin)
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness: AMBIENT_BRIGHTNESS,
            ..default()
        })
        .insert_resource(config);

    // Initialise resources early
    app.init_resource::<CatalogLoader>()
        .init_resource::<ViewerStatus>()
        .init_resource::<SceneLoader>()
        .init_resource::<PendingPanorama>()
        .init_resource::<PathVisibility>()
        .add_event::<TourLoaded>()
        .add_event::<TourLoadFailed>()
        .add_event::<LoadSceneRequest>()
        .add_event::<SceneChanged>()
        .add_event::<SceneLoadFailed>()
        .add_event::<PathVisibilityRequest>()
        .add_event::<AutoRotateRequest>();

    app.add_systems(Startup, (spawn_panorama_camera, start_loading))
        .add_systems(
            Update,
            load_catalog_system.run_if(in_state(AppState::Loading)),
        )
        .add_systems(OnEnter(AppState::Running), request_initial_scene);

    // Camera runs in every state so the black void still responds while loading.
    app.add_systems(
        Update,
        (
            apply_auto_rotate_requests,
            orbit_camera_controller,
            update_hotspot_positions,
        )
            .chain(),
    );

    app.add_systems(
        Update,
        (
            hotspot_interaction,
            handle_scene_requests,
            finish_pending_scene,
            apply_path_visibility,
        )
            .chain()
            .run_if(in_state(AppState::Running)),
    );

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        level: Level::INFO,
        filter: "wgpu=error,naga=warn,panorama_tour_viewer=debug".to_string(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
