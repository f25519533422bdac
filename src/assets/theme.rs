use std::{fmt, str::FromStr};

/// Content/aesthetic category used to pick backgrounds and quotes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    /// Drive and ambition.
    #[default]
    Motivation,
    /// Stoic philosophy.
    Stoicism,
    /// Achievement.
    Success,
    /// Guiding others.
    Leadership,
    /// Joy and contentment.
    Happiness,
    /// Anything else, kept lowercased as given.
    Unknown(String),
}

impl Theme {
    /// All themes with a dedicated background set.
    pub const KNOWN: [Theme; 5] = [
        Theme::Motivation,
        Theme::Stoicism,
        Theme::Success,
        Theme::Leadership,
        Theme::Happiness,
    ];

    /// Parse a theme name case-insensitively. Never fails: unrecognised names map to
    /// [`Theme::Unknown`].
    pub fn parse(name: &str) -> Self {
        let name = name.trim().to_lowercase();
        match name.as_str() {
            "motivation" => Theme::Motivation,
            "stoicism" => Theme::Stoicism,
            "success" => Theme::Success,
            "leadership" => Theme::Leadership,
            "happiness" => Theme::Happiness,
            _ => Theme::Unknown(name),
        }
    }

    /// Lowercase theme name.
    pub fn as_str(&self) -> &str {
        match self {
            Theme::Motivation => "motivation",
            Theme::Stoicism => "stoicism",
            Theme::Success => "success",
            Theme::Leadership => "leadership",
            Theme::Happiness => "happiness",
            Theme::Unknown(name) => name,
        }
    }

    /// Background filenames curated for this theme, in table order. Empty for unknown themes.
    pub fn background_candidates(&self) -> &'static [&'static str] {
        match self {
            Theme::Motivation => &["mountain.jpg", "sunrise.jpg", "ocean.jpg"],
            Theme::Stoicism => &["stone.jpg", "ancient.jpg", "minimal.jpg"],
            Theme::Success => &["achievement.jpg", "summit.jpg", "victory.jpg"],
            Theme::Leadership => &["mountain.jpg", "path.jpg", "horizon.jpg"],
            Theme::Happiness => &["beach.jpg", "sunset.jpg", "flowers.jpg"],
            Theme::Unknown(_) => &[],
        }
    }

    /// Whether this theme has a curated background set.
    pub fn is_known(&self) -> bool {
        !matches!(self, Theme::Unknown(_))
    }
}

impl FromStr for Theme {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Theme::parse(s))
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for Theme {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for Theme {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Theme::parse(&raw))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/theme.rs"]
mod tests;
