use serde::{Deserialize, Serialize};

/// Background shown behind the widget, picked from the current conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundTheme {
    ClearSky,
    Cloudy,
    Rain,
    Snow,
    Storm,
    Fog,
    Smoke,
    Haze,
    Overcast,
    #[default]
    Night,
}

/// Keyword table, first match wins. "overcast clouds" precedes the generic
/// "clouds" so the more specific phrase is reachable.
const KEYWORDS: &[(&str, BackgroundTheme)] = &[
    ("overcast clouds", BackgroundTheme::Overcast),
    ("clear", BackgroundTheme::ClearSky),
    ("clouds", BackgroundTheme::Cloudy),
    ("rain", BackgroundTheme::Rain),
    ("snow", BackgroundTheme::Snow),
    ("storm", BackgroundTheme::Storm),
    ("fog", BackgroundTheme::Fog),
    ("smoke", BackgroundTheme::Smoke),
    ("haze", BackgroundTheme::Haze),
];

impl BackgroundTheme {
    /// Map a free-text condition description to a theme.
    pub fn classify(description: &str) -> Self {
        let description = description.to_lowercase();

        KEYWORDS
            .iter()
            .find(|(keyword, _)| description.contains(keyword))
            .map(|(_, theme)| *theme)
            .unwrap_or_default()
    }

    /// Path of the background image asset.
    pub fn image_path(&self) -> &'static str {
        match self {
            BackgroundTheme::ClearSky => "/clearsky.jpg",
            BackgroundTheme::Cloudy => "/cloudybackground.jpg",
            BackgroundTheme::Rain => "/rainbackground.jpg",
            BackgroundTheme::Snow => "/snowbackground.jpg",
            BackgroundTheme::Storm => "/thunderstorm.jpg",
            BackgroundTheme::Fog => "/fogbackground.jpg",
            BackgroundTheme::Smoke => "/smoke.jpg",
            BackgroundTheme::Haze => "/haze.jpg",
            BackgroundTheme::Overcast => "/overcast.jpg",
            BackgroundTheme::Night => "/night.jpg",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BackgroundTheme::ClearSky => "clear sky",
            BackgroundTheme::Cloudy => "cloudy",
            BackgroundTheme::Rain => "rain",
            BackgroundTheme::Snow => "snow",
            BackgroundTheme::Storm => "storm",
            BackgroundTheme::Fog => "fog",
            BackgroundTheme::Smoke => "smoke",
            BackgroundTheme::Haze => "haze",
            BackgroundTheme::Overcast => "overcast",
            BackgroundTheme::Night => "night",
        }
    }
}

impl std::fmt::Display for BackgroundTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
