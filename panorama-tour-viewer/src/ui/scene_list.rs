use bevy::prelude::*;

use super::style::{button_bundle, button_colour, label};
use crate::engine::assets::tour_catalog::TourCatalog;
use crate::engine::scene::scene_loader::{SceneLoader, SceneTarget};
use crate::engine::scene::systems::LoadSceneRequest;

/// Container the scene buttons are spawned into.
#[derive(Component)]
pub struct SceneList;

/// Button `index` always requests catalog entry `index`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneButton {
    pub index: usize,
}

/// One entry per scene, in catalog order, labelled with its display name.
pub fn scene_list_entries(catalog: &TourCatalog) -> Vec<(usize, String)> {
    (0..catalog.len())
        .filter_map(|index| catalog.display_name(index).map(|name| (index, name)))
        .collect()
}

pub fn populate_scene_list(
    mut commands: Commands,
    catalog: Res<TourCatalog>,
    lists: Query<Entity, With<SceneList>>,
) {
    let Ok(list) = lists.single() else {
        return;
    };

    commands.entity(list).despawn_related::<Children>();
    commands.entity(list).with_children(|list| {
        for (index, name) in scene_list_entries(&catalog) {
            list.spawn((
                SceneButton { index },
                Name::new(format!("SceneButton{index}")),
                button_bundle(),
            ))
            .with_child(label(name));
        }
    });
}

pub fn scene_button_interaction(
    buttons: Query<(&Interaction, &SceneButton), Changed<Interaction>>,
    mut requests: EventWriter<LoadSceneRequest>,
) {
    for (interaction, button) in &buttons {
        if *interaction == Interaction::Pressed {
            requests.write(LoadSceneRequest {
                target: SceneTarget::from(button.index),
            });
        }
    }
}

/// Highlight the scene being shown (or loaded).
pub fn reflect_current_scene(
    loader: Res<SceneLoader>,
    mut buttons: Query<(&SceneButton, &Interaction, &mut BackgroundColor)>,
) {
    let current = loader.current_index();
    for (button, interaction, mut background) in &mut buttons {
        let colour = button_colour(current == Some(button.index), *interaction);
        background.set_if_neq(BackgroundColor(colour));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::tour_catalog::tests::sample_catalog;

    #[test]
    fn entries_follow_catalog_order_with_fallback_names() {
        let entries = scene_list_entries(&sample_catalog());
        assert_eq!(
            entries,
            vec![(0, "Lobby".to_string()), (1, "Scene 2".to_string())]
        );
    }

    #[test]
    fn populating_creates_one_button_per_scene() {
        let mut app = App::new();
        app.insert_resource(sample_catalog())
            .add_systems(Update, populate_scene_list);
        app.world_mut().spawn((SceneList, Node::default()));
        app.update();

        let mut indices: Vec<usize> = app
            .world_mut()
            .query::<&SceneButton>()
            .iter(app.world())
            .map(|button| button.index)
            .collect();
        indices.sort_unstable();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn pressing_button_k_requests_scene_k() {
        let mut app = App::new();
        app.add_event::<LoadSceneRequest>()
            .add_systems(Update, scene_button_interaction);
        app.world_mut()
            .spawn((SceneButton { index: 1 }, Interaction::Pressed));
        app.world_mut()
            .spawn((SceneButton { index: 0 }, Interaction::Hovered));
        app.update();

        let events = app.world().resource::<Events<LoadSceneRequest>>();
        let targets: Vec<SceneTarget> = events
            .get_cursor()
            .read(events)
            .map(|request| request.target.clone())
            .collect();
        assert_eq!(targets, vec![SceneTarget::Index(1)]);
    }
}
