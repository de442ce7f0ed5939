//! Presentation mapping for weather conditions.
//!
//! WMO codes become human-readable strings, and those strings are classified
//! by keyword to pick an icon and a background theme.
//! See: https://open-meteo.com/en/docs#weathervariables

use std::fmt;

/// Convert a WMO weather code to the condition shown to the user.
pub fn condition_for_code(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Foggy",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        71 => "Slight snow",
        73 => "Moderate snow",
        75 => "Heavy snow",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}

/// Keyword class of a condition string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKind {
    Clear,
    PartlyCloudy,
    Cloudy,
    Rain,
    Snow,
    Storm,
    Fog,
    Other,
}

impl ConditionKind {
    /// Case-insensitive keyword match. The first matching class wins, so
    /// "Partly cloudy" is `PartlyCloudy` rather than `Cloudy`.
    pub fn classify(condition: &str) -> Self {
        let lower = condition.to_lowercase();
        let mentions = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

        if mentions(&["clear", "sunny"]) {
            Self::Clear
        } else if mentions(&["partly"]) {
            Self::PartlyCloudy
        } else if mentions(&["cloudy"]) {
            Self::Cloudy
        } else if mentions(&["rain", "drizzle"]) {
            Self::Rain
        } else if mentions(&["snow", "blizzard"]) {
            Self::Snow
        } else if mentions(&["storm", "thunder"]) {
            Self::Storm
        } else if mentions(&["fog", "haze"]) {
            Self::Fog
        } else {
            Self::Other
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Clear => "☀️",
            Self::PartlyCloudy => "⛅",
            Self::Cloudy => "☁️",
            Self::Rain => "🌧️",
            Self::Snow => "❄️",
            Self::Storm => "⛈️",
            Self::Fog => "🌫️",
            Self::Other => "☁️",
        }
    }

    pub fn theme(self) -> Theme {
        match self {
            Self::Clear => Theme::Sunny,
            Self::PartlyCloudy | Self::Cloudy => Theme::Cloudy,
            Self::Rain => Theme::Rainy,
            Self::Snow => Theme::Snowy,
            Self::Storm => Theme::Stormy,
            Self::Fog | Self::Other => Theme::Default,
        }
    }
}

/// Background theme of the weather view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    Stormy,
    #[default]
    Default,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Sunny => "sunny",
            Theme::Cloudy => "cloudy",
            Theme::Rainy => "rainy",
            Theme::Snowy => "snowy",
            Theme::Stormy => "stormy",
            Theme::Default => "default",
        }
    }

    /// Class name used by the rendered container, e.g. `bg-gradient-sunny`.
    pub fn css_class(&self) -> String {
        format!("bg-gradient-{}", self.as_str())
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn icon_for(condition: &str) -> &'static str {
    ConditionKind::classify(condition).icon()
}

pub fn theme_for(condition: &str) -> Theme {
    ConditionKind::classify(condition).theme()
}
