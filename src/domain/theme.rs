use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The colour scheme the interface is drawn in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeColorStyle {
    /// Follow the device appearance setting.
    #[default]
    System,
    /// Always light.
    Light,
    /// Always dark.
    Dark,
    /// A warm, low-contrast dark palette.
    Dusk,
}

impl ThemeColorStyle {
    /// Every style, in presentation order.
    pub const ALL: [Self; 4] = [Self::System, Self::Light, Self::Dark, Self::Dusk];

    /// The persisted name of the style.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Dusk => "dusk",
        }
    }

    /// Short label for a settings picker.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::System => "Match system",
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::Dusk => "Dusk",
        }
    }

    /// One-line explanation shown under the label.
    #[must_use]
    pub const fn detail(self) -> &'static str {
        match self {
            Self::System => "Follows the device appearance setting",
            Self::Light => "Always use the light theme",
            Self::Dark => "Always use the dark theme",
            Self::Dusk => "A relaxing palette built on warm tones",
        }
    }
}

/// How large text is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontScale {
    /// The default size.
    #[default]
    Standard,
    /// Slightly larger text.
    Relaxed,
    /// Accessibility-sized text.
    Large,
}

impl FontScale {
    /// Every scale, smallest first.
    pub const ALL: [Self; 3] = [Self::Standard, Self::Relaxed, Self::Large];

    /// The persisted name of the scale.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Relaxed => "relaxed",
            Self::Large => "large",
        }
    }

    /// Short label for a settings picker.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Relaxed => "Relaxed",
            Self::Large => "Extra large",
        }
    }

    /// One-line explanation shown under the label.
    #[must_use]
    pub const fn detail(self) -> &'static str {
        match self {
            Self::Standard => "Display at the default size",
            Self::Relaxed => "Slightly larger text for easier reading",
            Self::Large => "Accessibility comes first",
        }
    }
}

impl fmt::Display for ThemeColorStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for FontScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeColorStyle {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseThemeError::ColorStyle(s.to_string()))
    }
}

impl FromStr for FontScale {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scale| scale.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseThemeError::FontScale(s.to_string()))
    }
}

/// Error returned when a theme axis name is not recognised.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseThemeError {
    /// Not one of `system`, `light`, `dark`, `dusk`.
    #[error("unknown colour style '{0}' (expected system, light, dark or dusk)")]
    ColorStyle(String),
    /// Not one of `standard`, `relaxed`, `large`.
    #[error("unknown font scale '{0}' (expected standard, relaxed or large)")]
    FontScale(String),
}

/// The user's display preferences.
///
/// Always holds exactly one value per axis. Persisted as
/// `{"colorStyle": .., "fontScale": ..}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSettings {
    /// The colour scheme.
    pub color_style: ThemeColorStyle,
    /// The text size.
    pub font_scale: FontScale,
}

impl ThemeSettings {
    /// Creates settings from both axes.
    #[must_use]
    pub const fn new(color_style: ThemeColorStyle, font_scale: FontScale) -> Self {
        Self {
            color_style,
            font_scale,
        }
    }
}
