use bevy::prelude::*;

use super::style::{button_colour, label};
use crate::engine::camera::orbit_camera::{AutoRotateRequest, OrbitCamera};

#[derive(Component)]
pub struct AutoRotateButton;

#[derive(Component)]
pub struct AutoRotateLabel;

pub fn auto_rotate_label(enabled: bool) -> &'static str {
    if enabled {
        "Auto-rotate: on"
    } else {
        "Auto-rotate: off"
    }
}

pub fn auto_rotate_button_label() -> impl Bundle {
    (AutoRotateLabel, label(auto_rotate_label(true)))
}

pub fn auto_rotate_interaction(
    buttons: Query<&Interaction, (Changed<Interaction>, With<AutoRotateButton>)>,
    mut requests: EventWriter<AutoRotateRequest>,
) {
    for interaction in &buttons {
        if *interaction == Interaction::Pressed {
            requests.write(AutoRotateRequest { enabled: None });
        }
    }
}

pub fn reflect_auto_rotate(
    orbit: Option<Res<OrbitCamera>>,
    mut labels: Query<&mut Text, With<AutoRotateLabel>>,
    mut buttons: Query<(&Interaction, &mut BackgroundColor), With<AutoRotateButton>>,
) {
    let Some(orbit) = orbit else {
        return;
    };
    let wanted = auto_rotate_label(orbit.auto_rotate);
    for mut text in &mut labels {
        if text.0 != wanted {
            text.0 = wanted.to_string();
        }
    }
    for (interaction, mut background) in &mut buttons {
        background.set_if_neq(BackgroundColor(button_colour(orbit.auto_rotate, *interaction)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::camera::orbit_camera::apply_auto_rotate_requests;

    #[test]
    fn button_flips_auto_rotate_and_label_follows() {
        let mut app = App::new();
        app.add_event::<AutoRotateRequest>()
            .insert_resource(OrbitCamera::default())
            .add_systems(
                Update,
                (
                    auto_rotate_interaction,
                    apply_auto_rotate_requests,
                    reflect_auto_rotate,
                )
                    .chain(),
            );
        let text = app.world_mut().spawn(auto_rotate_button_label()).id();
        app.world_mut()
            .spawn((AutoRotateButton, Interaction::Pressed));
        app.update();

        assert!(!app.world().resource::<OrbitCamera>().auto_rotate);
        let shown = app.world().get::<Text>(text).unwrap();
        assert_eq!(shown.0, "Auto-rotate: off");
    }
}
