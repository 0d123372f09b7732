//! Theme preference values and the pure resolution rules.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The user's explicit theme choice.
///
/// Only `Light` and `Dark` are ever written to storage; `System` is
/// represented by the absence of a stored value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    System,
    Light,
    Dark,
}

impl ThemePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::System => "system",
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    /// Parse a stored value, falling back to `System` for anything unknown.
    pub fn parse(s: &str) -> Self {
        Self::parse_strict(s).unwrap_or_default()
    }

    /// Parse user input, rejecting anything outside the three known values.
    pub fn parse_strict(s: &str) -> Option<Self> {
        match s {
            "system" => Some(ThemePreference::System),
            "light" => Some(ThemePreference::Light),
            "dark" => Some(ThemePreference::Dark),
            _ => None,
        }
    }

    /// Successor in the toggle cycle: system -> light -> dark -> system.
    pub fn next(&self) -> Self {
        match self {
            ThemePreference::System => ThemePreference::Light,
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::System,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThemePreference::System => "System",
            ThemePreference::Light => "Light",
            ThemePreference::Dark => "Dark",
        }
    }

    /// Value to persist, `None` meaning "remove the entry".
    pub fn stored_value(&self) -> Option<&'static str> {
        match self {
            ThemePreference::System => None,
            other => Some(other.as_str()),
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The concrete theme applied to the document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedTheme {
    #[default]
    Light,
    Dark,
}

impl ResolvedTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolvedTheme::Light => "light",
            ResolvedTheme::Dark => "dark",
        }
    }

    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            ResolvedTheme::Dark
        } else {
            ResolvedTheme::Light
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, ResolvedTheme::Dark)
    }
}

impl fmt::Display for ResolvedTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve a preference against the environment's reported scheme.
///
/// An undetectable environment (`None`) resolves to light.
pub fn compute_theme(preference: ThemePreference, environment: Option<ResolvedTheme>) -> ResolvedTheme {
    match preference {
        ThemePreference::Light => ResolvedTheme::Light,
        ThemePreference::Dark => ResolvedTheme::Dark,
        ThemePreference::System => environment.unwrap_or_default(),
    }
}

/// Read-only view of the controller state, shaped for UI bindings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSnapshot {
    pub stored: ThemePreference,
    pub current: ResolvedTheme,
    pub is_light: bool,
    pub is_dark: bool,
    pub is_system: bool,
}

impl ThemeSnapshot {
    pub fn new(stored: ThemePreference, current: ResolvedTheme) -> Self {
        Self {
            stored,
            current,
            is_light: stored == ThemePreference::Light,
            is_dark: stored == ThemePreference::Dark,
            is_system: stored == ThemePreference::System,
        }
    }
}
