use bevy::prelude::*;

use super::style::TEXT_COLOUR;
use crate::engine::core::app_state::ViewerStatus;

#[derive(Component)]
pub struct StatusBanner;

#[derive(Component)]
pub struct StatusText;

const INFO_BACKGROUND: Color = Color::srgba(0.10, 0.11, 0.13, 0.85);
const ERROR_BACKGROUND: Color = Color::srgba(0.45, 0.10, 0.10, 0.90);

pub fn spawn_status_banner(commands: &mut Commands) {
    commands
        .spawn((
            StatusBanner,
            Name::new("StatusBanner"),
            BackgroundColor(INFO_BACKGROUND),
            BorderRadius::all(Val::Px(5.0)),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(12.0),
                left: Val::Percent(50.0),
                margin: UiRect::left(Val::Px(-140.0)),
                width: Val::Px(280.0),
                padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                justify_content: JustifyContent::Center,
                ..default()
            },
        ))
        .with_child((
            StatusText,
            Text::new(""),
            TextFont {
                font_size: 15.0,
                ..default()
            },
            TextColor(TEXT_COLOUR),
        ));
}

pub fn update_status_banner(
    status: Res<ViewerStatus>,
    mut banners: Query<(&mut Node, &mut BackgroundColor), With<StatusBanner>>,
    mut texts: Query<&mut Text, With<StatusText>>,
) {
    if !status.is_changed() {
        return;
    }
    let message = status.message();

    for (mut node, mut background) in &mut banners {
        node.display = if message.is_some() {
            Display::Flex
        } else {
            Display::None
        };
        background.0 = if status.is_error() {
            ERROR_BACKGROUND
        } else {
            INFO_BACKGROUND
        };
    }
    for mut text in &mut texts {
        text.0 = message.clone().unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_hides_when_idle_and_shows_failures() {
        let mut app = App::new();
        app.init_resource::<ViewerStatus>()
            .add_systems(Startup, |mut commands: Commands| {
                spawn_status_banner(&mut commands)
            })
            .add_systems(Update, update_status_banner);
        app.update();

        let text = |app: &mut App| {
            app.world_mut()
                .query_filtered::<&Text, With<StatusText>>()
                .single(app.world())
                .unwrap()
                .0
                .clone()
        };
        assert_eq!(text(&mut app), "Loading tour...");

        *app.world_mut().resource_mut::<ViewerStatus>() =
            ViewerStatus::Failed("Could not load the tour".into());
        app.update();
        assert_eq!(text(&mut app), "Could not load the tour");

        *app.world_mut().resource_mut::<ViewerStatus>() = ViewerStatus::Idle;
        app.update();
        let display = app
            .world_mut()
            .query_filtered::<&Node, With<StatusBanner>>()
            .single(app.world())
            .unwrap()
            .display;
        assert_eq!(display, Display::None);
    }
}
