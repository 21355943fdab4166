//! Category → theme mapping.

use crate::model::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb`, lowercase.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Everything the render layer needs to dress a ready weather view.
///
/// Only [`resolve_theme`] builds these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    palette: [Color; 2],
    icon_key: &'static str,
    message: &'static str,
    recommendation: &'static str,
}

impl Theme {
    /// Gradient stops, top to bottom.
    pub fn palette(&self) -> [Color; 2] {
        self.palette
    }

    pub fn icon_key(&self) -> &'static str {
        self.icon_key
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    pub fn recommendation(&self) -> &'static str {
        self.recommendation
    }
}

/// Resolve the theme for a weather category. Total: `Other` carries the default row.
pub fn resolve_theme(category: Category) -> Theme {
    let (from, to, icon_key, message, recommendation) = match category {
        Category::Clear => (
            Color::rgb(0x4d, 0xa0, 0xb0),
            Color::rgb(0xd3, 0x9d, 0x38),
            "sunny",
            "Cielo despejado.",
            "☀️ Excelente día para lavar ropa.",
        ),
        Category::Clouds => (
            Color::rgb(0xd7, 0xd2, 0xcc),
            Color::rgb(0x30, 0x43, 0x52),
            "cloudy",
            "Nublado.",
            "🌥️ Buen clima para trabajar concentrado.",
        ),
        // Drizzle shares the rain row.
        Category::Rain | Category::Drizzle => (
            Color::rgb(0x00, 0x5c, 0x97),
            Color::rgb(0x36, 0x37, 0x95),
            "rainy",
            "Lluvia.",
            "☔ No olvides el paraguas.",
        ),
        Category::Thunderstorm => (
            Color::rgb(0x23, 0x25, 0x26),
            Color::rgb(0x41, 0x43, 0x45),
            "lightning",
            "Tormenta.",
            "⛈️ Desconecta equipos sensibles.",
        ),
        Category::Snow => (
            Color::rgb(0x83, 0xa4, 0xd4),
            Color::rgb(0xb6, 0xfb, 0xff),
            "snowy",
            "Nieve.",
            "☃️ ¡Abrígate mucho!",
        ),
        Category::Other => (
            Color::rgb(0x3a, 0x7b, 0xd5),
            Color::rgb(0x3a, 0x60, 0x73),
            "partly-cloudy",
            "Clima tranquilo.",
            "😊 Disfruta tu día.",
        ),
    };

    Theme { palette: [from, to], icon_key, message, recommendation }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(theme: &Theme) -> [String; 2] {
        theme.palette().map(|c| c.to_hex())
    }

    #[test]
    fn clear_row() {
        let theme = resolve_theme(Category::Clear);
        assert_eq!(hex(&theme), ["#4da0b0", "#d39d38"]);
        assert_eq!(theme.icon_key(), "sunny");
        assert_eq!(theme.message(), "Cielo despejado.");
        assert_eq!(theme.recommendation(), "☀️ Excelente día para lavar ropa.");
    }

    #[test]
    fn clouds_row() {
        let theme = resolve_theme(Category::Clouds);
        assert_eq!(hex(&theme), ["#d7d2cc", "#304352"]);
        assert_eq!(theme.icon_key(), "cloudy");
        assert_eq!(theme.message(), "Nublado.");
        assert!(theme.recommendation().contains("trabajar concentrado"));
    }

    #[test]
    fn rain_and_drizzle_share_a_row() {
        let rain = resolve_theme(Category::Rain);
        assert_eq!(rain, resolve_theme(Category::Drizzle));
        assert_eq!(hex(&rain), ["#005c97", "#363795"]);
        assert_eq!(rain.icon_key(), "rainy");
        assert_eq!(rain.message(), "Lluvia.");
        assert!(rain.recommendation().contains("paraguas"));
    }

    #[test]
    fn thunderstorm_row() {
        let theme = resolve_theme(Category::Thunderstorm);
        assert_eq!(hex(&theme), ["#232526", "#414345"]);
        assert_eq!(theme.icon_key(), "lightning");
        assert_eq!(theme.message(), "Tormenta.");
        assert!(theme.recommendation().contains("Desconecta"));
    }

    #[test]
    fn snow_row() {
        let theme = resolve_theme(Category::Snow);
        assert_eq!(hex(&theme), ["#83a4d4", "#b6fbff"]);
        assert_eq!(theme.icon_key(), "snowy");
        assert_eq!(theme.message(), "Nieve.");
        assert!(theme.recommendation().contains("Abrígate"));
    }

    #[test]
    fn unknown_strings_get_the_default_row() {
        let default = resolve_theme(Category::Other);
        assert_eq!(hex(&default), ["#3a7bd5", "#3a6073"]);
        assert_eq!(default.icon_key(), "partly-cloudy");
        assert_eq!(default.message(), "Clima tranquilo.");
        assert_eq!(default.recommendation(), "😊 Disfruta tu día.");

        for raw in ["Mist", "Haze", "Squall", "", "sunny"] {
            assert_eq!(resolve_theme(Category::from(raw)), default, "input: {raw:?}");
        }
    }

    #[test]
    fn color_display_is_hex() {
        assert_eq!(Color::rgb(0, 0x5c, 0xff).to_string(), "#005cff");
    }
}
