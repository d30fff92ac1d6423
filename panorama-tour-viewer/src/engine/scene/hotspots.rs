use bevy::prelude::*;
use tour_constants::panorama::{HOTSPOT_MARKER_SIZE, HOTSPOT_TOOLTIP_WIDTH};

use super::scene_loader::SceneTarget;
use super::systems::LoadSceneRequest;
use crate::engine::assets::colour::resolve_colour;
use crate::engine::assets::tour_catalog::{
    HotspotContent, HotspotDescriptor, HotspotKind, TourCatalog,
};
use crate::engine::camera::orbit_camera::PanoramaCamera;

/// Screen-space marker tracking a world-space hotspot.
#[derive(Component, Debug, Clone)]
pub struct HotspotMarker {
    pub world_position: Vec3,
    pub kind: HotspotKind,
    pub target_scene_id: Option<String>,
    pub tooltip: Option<Entity>,
}

#[derive(Component)]
pub struct HotspotTooltip;

/// Project a world point into viewport pixels (origin top-left).
///
/// Returns `None` for points behind the camera, which would otherwise be
/// mirrored into view by the perspective divide.
pub fn project_to_viewport(clip_from_world: Mat4, world: Vec3, viewport: Vec2) -> Option<Vec2> {
    let clip = clip_from_world * world.extend(1.0);
    if clip.w <= 0.0 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some(Vec2::new(
        (ndc.x * 0.5 + 0.5) * viewport.x,
        (-ndc.y * 0.5 + 0.5) * viewport.y,
    ))
}

/// Scene index a marker navigates to, if it is a link with a known target.
pub fn resolve_marker_target(marker: &HotspotMarker, catalog: &TourCatalog) -> Option<usize> {
    if marker.kind != HotspotKind::SceneLink {
        return None;
    }
    let target = marker.target_scene_id.as_deref()?;
    catalog.index_of(target)
}

fn marker_glyph(kind: HotspotKind) -> &'static str {
    match kind {
        HotspotKind::SceneLink => ">",
        HotspotKind::Info => "i",
    }
}

/// Spawn the overlay marker (and its tooltip) for one hotspot. Returns the marker root.
pub fn spawn_hotspot_marker(
    commands: &mut Commands,
    asset_server: &AssetServer,
    hotspot: &HotspotDescriptor,
) -> Entity {
    let colour = resolve_colour(hotspot.color.as_ref(), Color::WHITE);
    let tooltip = hotspot
        .tooltip()
        .map(|content| spawn_tooltip(commands, asset_server, content));

    let marker = commands
        .spawn((
            HotspotMarker {
                world_position: hotspot.position.into(),
                kind: hotspot.kind,
                target_scene_id: hotspot.target_scene_id.clone(),
                tooltip,
            },
            Name::new("HotspotMarker"),
            Button,
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.55)),
            BorderColor(colour),
            BorderRadius::MAX,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Px(HOTSPOT_MARKER_SIZE),
                height: Val::Px(HOTSPOT_MARKER_SIZE),
                border: UiRect::all(Val::Px(2.0)),
                display: Display::Flex,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
            // Hidden until the first projection places it.
            Visibility::Hidden,
        ))
        .with_children(|marker| {
            marker.spawn((
                Text::new(marker_glyph(hotspot.kind)),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(colour),
            ));
        })
        .id();

    if let Some(tooltip) = tooltip {
        commands.entity(marker).add_child(tooltip);
    }
    marker
}

/// Tooltip content is shown as plain text; nothing in it is interpreted as markup.
fn spawn_tooltip(
    commands: &mut Commands,
    asset_server: &AssetServer,
    content: &HotspotContent,
) -> Entity {
    commands
        .spawn((
            HotspotTooltip,
            Name::new("HotspotTooltip"),
            BackgroundColor(Color::srgba(0.08, 0.09, 0.11, 0.92)),
            BorderRadius::all(Val::Px(5.0)),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(HOTSPOT_MARKER_SIZE + 4.0),
                left: Val::Px(0.0),
                width: Val::Px(HOTSPOT_TOOLTIP_WIDTH),
                padding: UiRect::all(Val::Px(8.0)),
                row_gap: Val::Px(4.0),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            Visibility::Hidden,
        ))
        .with_children(|tooltip| {
            if let Some(title) = content.title.as_deref().filter(|t| !t.is_empty()) {
                tooltip.spawn((
                    Text::new(title),
                    TextFont {
                        font_size: 16.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));
            }
            if let Some(text) = content.text.as_deref().filter(|t| !t.is_empty()) {
                tooltip.spawn((
                    Text::new(text),
                    TextFont {
                        font_size: 14.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.85, 0.85, 0.85)),
                ));
            }
            if let Some(image) = content.image.as_deref().filter(|i| !i.is_empty()) {
                tooltip.spawn((
                    ImageNode::new(asset_server.load(image.to_string())),
                    BorderRadius::all(Val::Px(5.0)),
                    Node {
                        width: Val::Percent(100.0),
                        margin: UiRect::top(Val::Px(5.0)),
                        ..default()
                    },
                ));
            }
        })
        .id()
}

/// Single per-frame pass over every live marker.
///
/// Markers are despawned with their scene, so nothing outlives the scene
/// that created it.
pub fn update_hotspot_positions(
    cameras: Query<(&Camera, &Transform), With<PanoramaCamera>>,
    mut markers: Query<(&HotspotMarker, &mut Node, &mut Visibility)>,
) {
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let Some(viewport) = camera.logical_viewport_size() else {
        return;
    };
    let clip_from_world = camera.clip_from_view() * camera_transform.compute_matrix().inverse();
    let half_marker = HOTSPOT_MARKER_SIZE * 0.5;

    for (marker, mut node, mut visibility) in &mut markers {
        match project_to_viewport(clip_from_world, marker.world_position, viewport) {
            Some(screen) => {
                node.left = Val::Px(screen.x - half_marker);
                node.top = Val::Px(screen.y - half_marker);
                visibility.set_if_neq(Visibility::Inherited);
            }
            None => {
                visibility.set_if_neq(Visibility::Hidden);
            }
        }
    }
}

/// Clicks navigate scene links; hovering reveals the tooltip.
pub fn hotspot_interaction(
    markers: Query<(&Interaction, &HotspotMarker), Changed<Interaction>>,
    mut tooltips: Query<&mut Visibility, (With<HotspotTooltip>, Without<HotspotMarker>)>,
    catalog: Option<Res<TourCatalog>>,
    mut requests: EventWriter<LoadSceneRequest>,
) {
    for (interaction, marker) in &markers {
        if let Some(mut visibility) = marker.tooltip.and_then(|t| tooltips.get_mut(t).ok()) {
            visibility.set_if_neq(match interaction {
                Interaction::None => Visibility::Hidden,
                _ => Visibility::Inherited,
            });
        }

        if *interaction != Interaction::Pressed {
            continue;
        }
        let Some(catalog) = catalog.as_deref() else {
            continue;
        };
        match resolve_marker_target(marker, catalog) {
            Some(index) => {
                requests.write(LoadSceneRequest {
                    target: SceneTarget::from(index),
                });
            }
            None if marker.kind == HotspotKind::SceneLink => {
                debug!(
                    "Hotspot target {:?} does not match any scene",
                    marker.target_scene_id
                );
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::tour_catalog::tests::sample_catalog;
    use crate::engine::camera::orbit_camera::OrbitCamera;
    use tour_constants::camera::{FOV_DEGREES, NEAR_PLANE};

    const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

    fn clip_from_world(eye: Vec3, target: Vec3) -> Mat4 {
        let projection = Mat4::perspective_infinite_reverse_rh(
            FOV_DEGREES.to_radians(),
            VIEWPORT.x / VIEWPORT.y,
            NEAR_PLANE,
        );
        let view = Transform::from_translation(eye).looking_at(target, Vec3::Y);
        projection * view.compute_matrix().inverse()
    }

    #[test]
    fn look_at_target_projects_to_viewport_centre() {
        let matrix = clip_from_world(Vec3::new(0.0, 0.0, 30.0), Vec3::ZERO);
        let screen = project_to_viewport(matrix, Vec3::ZERO, VIEWPORT).unwrap();
        assert!(screen.abs_diff_eq(VIEWPORT * 0.5, 1e-3));
    }

    #[test]
    fn orbit_camera_default_view_centres_its_target() {
        let orbit = OrbitCamera::default();
        let matrix = clip_from_world(orbit.eye(), orbit.target);
        let screen = project_to_viewport(matrix, Vec3::new(0.0, 0.0, -200.0), VIEWPORT).unwrap();
        assert!(screen.abs_diff_eq(VIEWPORT * 0.5, 1e-2));
    }

    #[test]
    fn right_and_up_map_to_screen_right_and_top() {
        let matrix = clip_from_world(Vec3::ZERO, Vec3::NEG_Z);
        let screen = project_to_viewport(matrix, Vec3::new(10.0, 10.0, -100.0), VIEWPORT).unwrap();
        assert!(screen.x > VIEWPORT.x * 0.5);
        assert!(screen.y < VIEWPORT.y * 0.5);
    }

    #[test]
    fn points_behind_the_camera_are_not_projected() {
        let matrix = clip_from_world(Vec3::ZERO, Vec3::NEG_Z);
        assert!(project_to_viewport(matrix, Vec3::new(0.0, 0.0, 50.0), VIEWPORT).is_none());
    }

    fn marker(kind: HotspotKind, target: Option<&str>) -> HotspotMarker {
        HotspotMarker {
            world_position: Vec3::ZERO,
            kind,
            target_scene_id: target.map(str::to_string),
            tooltip: None,
        }
    }

    #[test]
    fn only_resolvable_scene_links_navigate() {
        let catalog = sample_catalog();
        assert_eq!(
            resolve_marker_target(&marker(HotspotKind::SceneLink, Some("2")), &catalog),
            Some(1)
        );
        assert_eq!(
            resolve_marker_target(&marker(HotspotKind::SceneLink, Some("ghost")), &catalog),
            None
        );
        assert_eq!(
            resolve_marker_target(&marker(HotspotKind::SceneLink, None), &catalog),
            None
        );
        assert_eq!(
            resolve_marker_target(&marker(HotspotKind::Info, Some("2")), &catalog),
            None
        );
    }

    fn click(app: &mut App, marker: HotspotMarker) -> Vec<LoadSceneRequest> {
        app.world_mut().spawn((marker, Interaction::Pressed));
        app.update();
        let events = app.world().resource::<Events<LoadSceneRequest>>();
        events.get_cursor().read(events).cloned().collect()
    }

    fn click_app() -> App {
        let mut app = App::new();
        app.add_event::<LoadSceneRequest>()
            .insert_resource(sample_catalog())
            .add_systems(Update, hotspot_interaction);
        app
    }

    #[test]
    fn clicking_a_known_link_requests_its_scene() {
        let mut app = click_app();
        let requests = click(&mut app, marker(HotspotKind::SceneLink, Some("2")));
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].target, SceneTarget::Index(1));
    }

    #[test]
    fn clicking_an_unknown_link_is_ignored() {
        let mut app = click_app();
        let requests = click(&mut app, marker(HotspotKind::SceneLink, Some("ghost")));
        assert!(requests.is_empty());
    }
}
