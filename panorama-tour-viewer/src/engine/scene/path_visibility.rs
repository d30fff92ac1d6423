use bevy::prelude::*;

use super::path_segments::PathSegment;

/// Visibility per logical path of the active scene, in first-appearance order.
///
/// `revision` changes only when the set of paths is replaced, so the
/// panel can tell a new scene apart from a toggle.
#[derive(Resource, Debug, Default)]
pub struct PathVisibility {
    entries: Vec<(String, bool)>,
    revision: u64,
}

impl PathVisibility {
    /// Replace the tracked paths; every path starts visible.
    pub fn reset(&mut self, path_ids: &[String]) {
        self.entries = path_ids.iter().map(|id| (id.clone(), true)).collect();
        self.revision += 1;
    }

    /// Unknown paths report visible, matching freshly spawned segments.
    pub fn is_visible(&self, path_id: &str) -> bool {
        self.entries
            .iter()
            .find(|(id, _)| id == path_id)
            .is_none_or(|(_, visible)| *visible)
    }

    /// Returns false when the path is not part of the active scene.
    pub fn set(&mut self, path_id: &str, visible: bool) -> bool {
        match self.entries.iter_mut().find(|(id, _)| id == path_id) {
            Some(entry) => {
                entry.1 = visible;
                true
            }
            None => false,
        }
    }

    /// Flip a path and return its new state.
    pub fn toggle(&mut self, path_id: &str) -> Option<bool> {
        let entry = self.entries.iter_mut().find(|(id, _)| id == path_id)?;
        entry.1 = !entry.1;
        Some(entry.1)
    }

    pub fn entries(&self) -> &[(String, bool)] {
        &self.entries
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// Show, hide or flip (`visible: None`) every segment of one path.
#[derive(Event, Debug, Clone)]
pub struct PathVisibilityRequest {
    pub path_id: String,
    pub visible: Option<bool>,
}

pub fn apply_path_visibility(
    mut requests: EventReader<PathVisibilityRequest>,
    mut path_visibility: ResMut<PathVisibility>,
    mut segments: Query<(&PathSegment, &mut Visibility)>,
) {
    for request in requests.read() {
        let updated = match request.visible {
            Some(visible) => path_visibility
                .set(&request.path_id, visible)
                .then_some(visible),
            None => path_visibility.toggle(&request.path_id),
        };
        let Some(visible) = updated else {
            warn!("Ignoring visibility change for unknown path '{}'", request.path_id);
            continue;
        };

        let target = if visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        for (segment, mut visibility) in &mut segments {
            if segment.path_id == request.path_id {
                visibility.set_if_neq(target);
            }
        }
        debug!("Path '{}' visible: {}", request.path_id, visible);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn reset_makes_every_path_visible_and_bumps_revision() {
        let mut paths = PathVisibility::default();
        paths.reset(&ids(&["a", "b"]));
        paths.set("a", false);
        let revision = paths.revision();

        paths.reset(&ids(&["a", "c"]));
        assert!(paths.is_visible("a"));
        assert!(paths.is_visible("c"));
        assert_eq!(paths.entries().len(), 2);
        assert_eq!(paths.revision(), revision + 1);
    }

    #[test]
    fn toggle_flips_only_known_paths() {
        let mut paths = PathVisibility::default();
        paths.reset(&ids(&["a"]));
        assert_eq!(paths.toggle("a"), Some(false));
        assert_eq!(paths.toggle("a"), Some(true));
        assert_eq!(paths.toggle("missing"), None);
        assert!(!paths.set("missing", false));
    }

    fn app_with_segments(segments: &[&str]) -> (App, Vec<Entity>) {
        let mut app = App::new();
        app.add_event::<PathVisibilityRequest>()
            .init_resource::<PathVisibility>()
            .add_systems(Update, apply_path_visibility);

        let mut unique: Vec<String> = Vec::new();
        for id in segments {
            if !unique.iter().any(|u| u == id) {
                unique.push(id.to_string());
            }
        }
        app.world_mut()
            .resource_mut::<PathVisibility>()
            .reset(&unique);

        let entities = segments
            .iter()
            .map(|id| {
                app.world_mut()
                    .spawn((
                        PathSegment {
                            path_id: id.to_string(),
                        },
                        Visibility::Inherited,
                    ))
                    .id()
            })
            .collect();
        (app, entities)
    }

    fn visibility(app: &App, entity: Entity) -> Visibility {
        *app.world().get::<Visibility>(entity).unwrap()
    }

    #[test]
    fn hiding_a_path_touches_only_its_segments() {
        // Interleaved build order: segments of "a" are not contiguous.
        let (mut app, entities) = app_with_segments(&["a", "b", "a", "c"]);

        app.world_mut().send_event(PathVisibilityRequest {
            path_id: "a".into(),
            visible: Some(false),
        });
        app.update();

        assert_eq!(visibility(&app, entities[0]), Visibility::Hidden);
        assert_eq!(visibility(&app, entities[1]), Visibility::Inherited);
        assert_eq!(visibility(&app, entities[2]), Visibility::Hidden);
        assert_eq!(visibility(&app, entities[3]), Visibility::Inherited);
        assert!(!app.world().resource::<PathVisibility>().is_visible("a"));
    }

    #[test]
    fn toggling_twice_restores_visibility() {
        let (mut app, entities) = app_with_segments(&["a", "b"]);

        for _ in 0..2 {
            app.world_mut().send_event(PathVisibilityRequest {
                path_id: "b".into(),
                visible: None,
            });
            app.update();
        }

        assert_eq!(visibility(&app, entities[1]), Visibility::Inherited);
        assert_eq!(visibility(&app, entities[0]), Visibility::Inherited);
    }

    #[test]
    fn unknown_path_changes_nothing() {
        let (mut app, entities) = app_with_segments(&["a"]);
        app.world_mut().send_event(PathVisibilityRequest {
            path_id: "z".into(),
            visible: Some(false),
        });
        app.update();
        assert_eq!(visibility(&app, entities[0]), Visibility::Inherited);
    }
}
