use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::engine::assets::tour_catalog::TourCatalog;
use crate::engine::core::app_state::{AppState, ViewerStatus};
use crate::engine::core::config::ViewerConfig;

#[derive(Resource, Default)]
pub struct CatalogLoader {
    handle: Option<Handle<TourCatalog>>,
}

#[derive(Event, Debug, Clone)]
pub struct TourLoaded {
    pub scene_count: usize,
}

#[derive(Event, Debug, Clone)]
pub struct TourLoadFailed {
    pub reason: String,
}

pub fn start_loading(
    mut catalog_loader: ResMut<CatalogLoader>,
    asset_server: Res<AssetServer>,
    config: Res<ViewerConfig>,
) {
    info!("Loading tour data from {}", config.tour_data_path);
    catalog_loader.handle = Some(asset_server.load(config.tour_data_path.clone()));
}

/// Publish the catalog as a resource once parsed, or give up on failure.
pub fn load_catalog_system(
    catalog_loader: Res<CatalogLoader>,
    asset_server: Res<AssetServer>,
    catalogs: Res<Assets<TourCatalog>>,
    mut commands: Commands,
    mut next_state: ResMut<NextState<AppState>>,
    mut status: ResMut<ViewerStatus>,
    mut loaded: EventWriter<TourLoaded>,
    mut failed: EventWriter<TourLoadFailed>,
) {
    let Some(handle) = catalog_loader.handle.as_ref() else {
        return;
    };

    if let Some(catalog) = catalogs.get(handle) {
        info!("✓ Tour loaded: {} scenes", catalog.len());
        commands.insert_resource(catalog.clone());
        loaded.write(TourLoaded {
            scene_count: catalog.len(),
        });
        *status = ViewerStatus::Idle;
        next_state.set(AppState::Running);
        return;
    }

    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle) {
        let reason = err.to_string();
        error!("Failed to load tour data: {}", reason);
        *status = ViewerStatus::Failed("Could not load the tour".to_string());
        failed.write(TourLoadFailed { reason });
        next_state.set(AppState::Failed);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::time::Duration;

    use bevy::asset::AssetMetaCheck;
    use bevy::state::app::StatesPlugin;

    use super::*;
    use crate::engine::assets::tour_catalog::tests::sample_catalog;

    /// Step the app until `done` holds; asset loads finish on the IO pool.
    pub(crate) fn update_until(app: &mut App, done: impl Fn(&World) -> bool) -> bool {
        for _ in 0..200 {
            app.update();
            if done(app.world()) {
                return true;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        false
    }

    fn loader_app(config: ViewerConfig) -> App {
        let mut app = App::new();
        app.add_plugins((
            MinimalPlugins,
            StatesPlugin,
            AssetPlugin {
                meta_check: AssetMetaCheck::Never,
                ..default()
            },
        ))
        .init_asset::<TourCatalog>()
        .init_state::<AppState>()
        .insert_resource(config)
        .init_resource::<CatalogLoader>()
        .init_resource::<ViewerStatus>()
        .add_event::<TourLoaded>()
        .add_event::<TourLoadFailed>()
        .add_systems(
            Update,
            load_catalog_system.run_if(in_state(AppState::Loading)),
        );
        app
    }

    fn state(world: &World) -> AppState {
        *world.resource::<State<AppState>>().get()
    }

    #[test]
    fn parsed_catalog_is_published_and_app_runs() {
        let mut app = loader_app(ViewerConfig::default());
        let handle = app
            .world_mut()
            .resource_mut::<Assets<TourCatalog>>()
            .add(sample_catalog());
        app.world_mut().resource_mut::<CatalogLoader>().handle = Some(handle);

        app.update();
        app.update();

        assert_eq!(state(app.world()), AppState::Running);
        assert_eq!(app.world().resource::<TourCatalog>().len(), 2);
        assert_eq!(*app.world().resource::<ViewerStatus>(), ViewerStatus::Idle);
        let loaded: Vec<TourLoaded> = app
            .world_mut()
            .resource_mut::<Events<TourLoaded>>()
            .drain()
            .collect();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].scene_count, 2);
    }

    #[test]
    fn missing_tour_data_moves_to_failed() {
        let mut app = loader_app(ViewerConfig {
            tour_data_path: "no-such-tour.json".to_string(),
            ..default()
        });
        app.add_systems(Startup, start_loading);

        assert!(update_until(&mut app, |world| state(world) == AppState::Failed));

        assert!(!app.world().contains_resource::<TourCatalog>());
        assert_eq!(
            *app.world().resource::<ViewerStatus>(),
            ViewerStatus::Failed("Could not load the tour".to_string())
        );
        let failed: Vec<TourLoadFailed> = app
            .world_mut()
            .resource_mut::<Events<TourLoadFailed>>()
            .drain()
            .collect();
        assert_eq!(failed.len(), 1);
        assert!(!failed[0].reason.is_empty());
    }

    #[test]
    fn nothing_happens_before_loading_starts() {
        let mut app = loader_app(ViewerConfig::default());
        app.update();
        app.update();
        assert_eq!(state(app.world()), AppState::Loading);
        assert!(app.world().resource::<Events<TourLoaded>>().is_empty());
    }
}
