use bevy::color::palettes::css;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Colour as written in tour data: a packed `0xRRGGBB` integer, a CSS hex
/// string (`"#ff8800"`, `"#f80"`, `"ff8800"`) or a common CSS colour name.
///
/// Anything else is kept as `Other` so one bad value cannot fail the tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColourValue {
    Packed(u32),
    Css(String),
    Other(serde_json::Value),
}

impl ColourValue {
    pub fn parse(&self) -> Option<Color> {
        match self {
            Self::Packed(rgb) => Some(Color::srgb_u8(
                ((rgb >> 16) & 0xff) as u8,
                ((rgb >> 8) & 0xff) as u8,
                (rgb & 0xff) as u8,
            )),
            Self::Css(text) => {
                let text = text.trim();
                Srgba::hex(text)
                    .ok()
                    .or_else(|| named_colour(text))
                    .map(Color::from)
            }
            Self::Other(_) => None,
        }
    }
}

fn named_colour(name: &str) -> Option<Srgba> {
    let colour = match name.to_ascii_lowercase().as_str() {
        "black" => css::BLACK,
        "white" => css::WHITE,
        "gray" | "grey" => css::GRAY,
        "silver" => css::SILVER,
        "red" => css::RED,
        "maroon" => css::MAROON,
        "orange" => css::ORANGE,
        "gold" => css::GOLD,
        "yellow" => css::YELLOW,
        "olive" => css::OLIVE,
        "lime" => css::LIME,
        "green" => css::GREEN,
        "teal" => css::TEAL,
        "aqua" | "cyan" => css::AQUA,
        "blue" => css::BLUE,
        "navy" => css::NAVY,
        "purple" => css::PURPLE,
        "fuchsia" | "magenta" => css::FUCHSIA,
        "pink" => css::PINK,
        _ => return None,
    };
    Some(colour)
}

/// Resolve an optional descriptor colour, warning when the value is present but unreadable.
pub fn resolve_colour(value: Option<&ColourValue>, fallback: Color) -> Color {
    match value {
        None => fallback,
        Some(value) => value.parse().unwrap_or_else(|| {
            warn!("Unreadable colour {:?}, using fallback", value);
            fallback
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_css_hex_with_and_without_hash() {
        let expected = Color::srgb_u8(0xff, 0x88, 0x00);
        assert_eq!(ColourValue::Css("#ff8800".into()).parse(), Some(expected));
        assert_eq!(ColourValue::Css("ff8800".into()).parse(), Some(expected));
        assert_eq!(ColourValue::Css("#f80".into()).parse(), Some(expected));
    }

    #[test]
    fn parses_packed_integer() {
        assert_eq!(
            ColourValue::Packed(0x00ff00).parse(),
            Some(Color::srgb_u8(0, 255, 0))
        );
    }

    #[test]
    fn parses_common_colour_names() {
        assert_eq!(
            ColourValue::Css("Red".into()).parse(),
            Some(Color::from(css::RED))
        );
        assert_eq!(
            ColourValue::Css(" orange ".into()).parse(),
            Some(Color::from(css::ORANGE))
        );
        assert_eq!(
            ColourValue::Css("grey".into()).parse(),
            ColourValue::Css("gray".into()).parse()
        );
    }

    #[test]
    fn unreadable_colour_falls_back() {
        let value = ColourValue::Css("not-a-colour".into());
        assert_eq!(value.parse(), None);
        assert_eq!(resolve_colour(Some(&value), Color::WHITE), Color::WHITE);
        assert_eq!(resolve_colour(None, Color::BLACK), Color::BLACK);
    }

    #[test]
    fn deserializes_either_representation() {
        let packed: ColourValue = serde_json::from_str("16711680").unwrap();
        let css: ColourValue = serde_json::from_str("\"#ff0000\"").unwrap();
        assert_eq!(packed.parse(), css.parse());
    }

    #[test]
    fn non_integer_numbers_deserialize_but_do_not_parse() {
        for raw in ["1.5", "-1", "4294967296", "true", "[1, 2, 3]"] {
            let value: ColourValue = serde_json::from_str(raw).unwrap();
            assert!(matches!(value, ColourValue::Other(_)), "{raw}");
            assert_eq!(resolve_colour(Some(&value), Color::WHITE), Color::WHITE);
        }
    }
}
