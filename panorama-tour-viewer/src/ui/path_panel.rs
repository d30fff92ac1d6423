use bevy::prelude::*;
use tour_constants::tour_defaults::path_label;

use super::style::{button_bundle, button_colour, label};
use crate::engine::scene::path_visibility::{PathVisibility, PathVisibilityRequest};

/// Container the path toggles are spawned into.
#[derive(Component)]
pub struct PathPanelList;

/// Toggles every segment of one logical path.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct PathToggle {
    pub path_id: String,
}

#[derive(Component, Debug, Clone)]
pub struct PathToggleLabel {
    path_id: String,
    name: String,
}

pub fn toggle_label(name: &str, visible: bool) -> String {
    format!("{} {}", if visible { "[x]" } else { "[ ]" }, name)
}

/// Rebuild the toggles whenever a scene replaces the set of paths.
pub fn rebuild_path_panel(
    mut commands: Commands,
    path_visibility: Res<PathVisibility>,
    lists: Query<Entity, With<PathPanelList>>,
    mut built_revision: Local<u64>,
) {
    if path_visibility.revision() == *built_revision {
        return;
    }
    let Ok(list) = lists.single() else {
        return;
    };
    *built_revision = path_visibility.revision();

    commands.entity(list).despawn_related::<Children>();
    commands.entity(list).with_children(|list| {
        if path_visibility.entries().is_empty() {
            list.spawn(label("No paths in this scene"));
            return;
        }
        for (position, (path_id, visible)) in path_visibility.entries().iter().enumerate() {
            let name = path_label(path_id, position);
            list.spawn((
                PathToggle {
                    path_id: path_id.clone(),
                },
                Name::new(format!("PathToggle {name}")),
                button_bundle(),
            ))
            .with_child((
                PathToggleLabel {
                    path_id: path_id.clone(),
                    name: name.clone(),
                },
                label(toggle_label(&name, *visible)),
            ));
        }
    });
}

pub fn path_toggle_interaction(
    toggles: Query<(&Interaction, &PathToggle), Changed<Interaction>>,
    mut requests: EventWriter<PathVisibilityRequest>,
) {
    for (interaction, toggle) in &toggles {
        if *interaction == Interaction::Pressed {
            requests.write(PathVisibilityRequest {
                path_id: toggle.path_id.clone(),
                visible: None,
            });
        }
    }
}

pub fn reflect_path_toggles(
    path_visibility: Res<PathVisibility>,
    mut labels: Query<(&PathToggleLabel, &mut Text)>,
    mut buttons: Query<(&Interaction, &mut BackgroundColor), With<PathToggle>>,
) {
    if path_visibility.is_changed() {
        for (toggle, mut text) in &mut labels {
            let wanted = toggle_label(&toggle.name, path_visibility.is_visible(&toggle.path_id));
            if text.0 != wanted {
                text.0 = wanted;
            }
        }
    }
    for (interaction, mut background) in &mut buttons {
        background.set_if_neq(BackgroundColor(button_colour(false, *interaction)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scene::path_visibility::apply_path_visibility;

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    fn panel_app() -> App {
        let mut app = App::new();
        app.add_event::<PathVisibilityRequest>()
            .init_resource::<PathVisibility>()
            .add_systems(
                Update,
                (
                    path_toggle_interaction,
                    apply_path_visibility,
                    rebuild_path_panel,
                    reflect_path_toggles,
                )
                    .chain(),
            );
        app.world_mut().spawn((PathPanelList, Node::default()));
        app
    }

    fn toggles(app: &mut App) -> Vec<String> {
        let mut ids: Vec<String> = app
            .world_mut()
            .query::<&PathToggle>()
            .iter(app.world())
            .map(|toggle| toggle.path_id.clone())
            .collect();
        ids.sort();
        ids
    }

    #[test]
    fn label_shows_state() {
        assert_eq!(toggle_label("Path 1", true), "[x] Path 1");
        assert_eq!(toggle_label("to-hall", false), "[ ] to-hall");
    }

    #[test]
    fn panel_is_rebuilt_for_each_scene() {
        let mut app = panel_app();
        app.world_mut()
            .resource_mut::<PathVisibility>()
            .reset(&ids(&["a", "b"]));
        app.update();
        assert_eq!(toggles(&mut app), ids(&["a", "b"]));

        app.world_mut()
            .resource_mut::<PathVisibility>()
            .reset(&ids(&["c"]));
        app.update();
        assert_eq!(toggles(&mut app), ids(&["c"]));
    }

    #[test]
    fn pressing_a_toggle_flips_its_path() {
        let mut app = panel_app();
        app.world_mut()
            .resource_mut::<PathVisibility>()
            .reset(&ids(&["a", "b"]));
        app.update();

        app.world_mut().spawn((
            PathToggle {
                path_id: "b".into(),
            },
            Interaction::Pressed,
        ));
        app.update();

        let paths = app.world().resource::<PathVisibility>();
        assert!(paths.is_visible("a"));
        assert!(!paths.is_visible("b"));
    }
}
