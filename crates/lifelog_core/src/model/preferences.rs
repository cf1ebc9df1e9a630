//! Preference value types for theme and language cells.
//!
//! # Responsibility
//! - Define the persisted enum values and their resolution rules.
//!
//! # Invariants
//! - Resolution never fails: `System` always falls back to a concrete value.

use serde::{Deserialize, Serialize};

/// Persisted theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "system" => Some(Self::System),
            _ => None,
        }
    }

    /// Resolves the concrete scheme to render with.
    ///
    /// `System` follows the device, and falls back to light when the device
    /// reports nothing.
    pub fn resolve(self, device: Option<ColorScheme>) -> ColorScheme {
        match self {
            Self::Light => ColorScheme::Light,
            Self::Dark => ColorScheme::Dark,
            Self::System => device.unwrap_or(ColorScheme::Light),
        }
    }
}

/// Concrete color scheme after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    Light,
    Dark,
}

impl ColorScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Persisted language preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    En,
    Ja,
    #[default]
    System,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ja => "ja",
            Self::System => "system",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Self::En),
            "ja" => Some(Self::Ja),
            "system" => Some(Self::System),
            _ => None,
        }
    }

    /// Resolves the UI language.
    ///
    /// `System` maps the device locale's primary subtag: `ja` selects
    /// Japanese, anything else (or no locale) selects English.
    pub fn effective(self, device_locale: Option<&str>) -> EffectiveLanguage {
        match self {
            Self::En => EffectiveLanguage::En,
            Self::Ja => EffectiveLanguage::Ja,
            Self::System => match device_locale.map(primary_subtag) {
                Some(code) if code.eq_ignore_ascii_case("ja") => EffectiveLanguage::Ja,
                _ => EffectiveLanguage::En,
            },
        }
    }
}

/// Concrete UI language after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectiveLanguage {
    En,
    Ja,
}

impl EffectiveLanguage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ja => "ja",
        }
    }
}

fn primary_subtag(locale: &str) -> &str {
    locale
        .trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
}
