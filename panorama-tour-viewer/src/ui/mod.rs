//! Overlay panels: scene list, path toggles, auto-rotate switch and status banner.
//!
//! Everything here is plain `bevy_ui`. Panels only raise request events
//! (`LoadSceneRequest`, `PathVisibilityRequest`, `AutoRotateRequest`) and
//! mirror resource state back; they never touch scene entities directly.

use bevy::prelude::*;

use crate::engine::core::app_state::AppState;

/// Auto-rotate toggle button.
pub mod auto_rotate;
/// Per-path visibility toggles, rebuilt for every scene.
pub mod path_panel;
/// One button per catalog scene with current-scene highlight.
pub mod scene_list;
/// Loading and failure banner.
pub mod status;
pub mod style;

use auto_rotate::{
    AutoRotateButton, auto_rotate_button_label, auto_rotate_interaction, reflect_auto_rotate,
};
use path_panel::{PathPanelList, path_toggle_interaction, rebuild_path_panel, reflect_path_toggles};
use scene_list::{SceneList, populate_scene_list, reflect_current_scene, scene_button_interaction};
use status::{spawn_status_banner, update_status_banner};
use style::{PANEL_BACKGROUND, button_bundle, list_node, section_title};

#[derive(Component)]
pub struct TourPanel;

pub struct TourUiPlugin;

impl Plugin for TourUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_tour_ui)
            .add_systems(OnEnter(AppState::Running), populate_scene_list)
            .add_systems(Update, (auto_rotate_interaction, reflect_auto_rotate))
            .add_systems(Update, update_status_banner)
            .add_systems(
                Update,
                (
                    scene_button_interaction,
                    reflect_current_scene,
                    path_toggle_interaction,
                    rebuild_path_panel,
                    reflect_path_toggles,
                )
                    .run_if(in_state(AppState::Running)),
            );
    }
}

fn spawn_tour_ui(mut commands: Commands) {
    commands
        .spawn((
            TourPanel,
            Name::new("TourPanel"),
            BackgroundColor(PANEL_BACKGROUND),
            BorderRadius::all(Val::Px(6.0)),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(12.0),
                top: Val::Px(12.0),
                width: Val::Px(240.0),
                max_height: Val::Percent(90.0),
                padding: UiRect::all(Val::Px(10.0)),
                row_gap: Val::Px(8.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                overflow: Overflow::clip_y(),
                ..default()
            },
        ))
        .with_children(|panel| {
            panel.spawn(section_title("SCENES"));
            panel.spawn((SceneList, Name::new("SceneList"), list_node()));

            panel.spawn(section_title("PATHS"));
            panel.spawn((PathPanelList, Name::new("PathPanelList"), list_node()));

            panel
                .spawn((AutoRotateButton, Name::new("AutoRotateButton"), button_bundle()))
                .with_child(auto_rotate_button_label());
        });

    spawn_status_banner(&mut commands);
}
