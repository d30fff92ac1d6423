use bevy::prelude::*;

pub const PANEL_BACKGROUND: Color = Color::srgba(0.10, 0.11, 0.13, 0.85);
pub const BUTTON_BACKGROUND: Color = Color::srgb(0.22, 0.24, 0.28);
pub const BUTTON_HOVERED: Color = Color::srgb(0.26, 0.29, 0.34);
pub const BUTTON_ACTIVE: Color = Color::srgb(0.30, 0.34, 0.40);
pub const BUTTON_BORDER: Color = Color::srgba(0.0, 0.0, 0.0, 0.25);
pub const TEXT_COLOUR: Color = Color::srgb(1.0, 1.0, 1.0);
pub const MUTED_TEXT_COLOUR: Color = Color::srgb(0.65, 0.67, 0.70);

pub fn button_node() -> Node {
    Node {
        width: Val::Percent(100.0),
        min_height: Val::Px(30.0),
        padding: UiRect::axes(Val::Px(8.0), Val::Px(4.0)),
        display: Display::Flex,
        align_items: AlignItems::Center,
        justify_content: JustifyContent::FlexStart,
        border: UiRect::all(Val::Px(1.0)),
        ..default()
    }
}

pub fn button_bundle() -> impl Bundle {
    (
        Button,
        button_node(),
        BackgroundColor(BUTTON_BACKGROUND),
        BorderColor(BUTTON_BORDER),
    )
}

pub fn label(text: impl Into<String>) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size: 15.0,
            ..default()
        },
        TextColor(TEXT_COLOUR),
    )
}

pub fn section_title(text: &str) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size: 13.0,
            ..default()
        },
        TextColor(MUTED_TEXT_COLOUR),
    )
}

pub fn list_node() -> Node {
    Node {
        width: Val::Percent(100.0),
        display: Display::Flex,
        flex_direction: FlexDirection::Column,
        row_gap: Val::Px(4.0),
        ..default()
    }
}

/// Hover and "selected" share one rule so every panel button reads the same.
pub fn button_colour(selected: bool, interaction: Interaction) -> Color {
    match (selected, interaction) {
        (true, _) | (false, Interaction::Pressed) => BUTTON_ACTIVE,
        (false, Interaction::Hovered) => BUTTON_HOVERED,
        (false, Interaction::None) => BUTTON_BACKGROUND,
    }
}
