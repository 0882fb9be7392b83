//! Theme, mode override and lifecycle mode.

use serde::{Deserialize, Serialize};

/// Built-in themes a host can cycle through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Classic,
    Warm,
    Midnight,
}

impl Theme {
    /// All built-in themes in cycle order.
    pub const ALL: [Theme; 3] = [Theme::Classic, Theme::Warm, Theme::Midnight];

    /// Attribute value for this theme.
    pub fn name(self) -> &'static str {
        match self {
            Theme::Classic => "classic",
            Theme::Warm => "warm",
            Theme::Midnight => "midnight",
        }
    }

    /// Parse a theme attribute value, ignoring case and surrounding space.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Theme::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(name))
    }

    /// Cycle to the next theme.
    pub fn next(self) -> Self {
        match self {
            Theme::Classic => Theme::Warm,
            Theme::Warm => Theme::Midnight,
            Theme::Midnight => Theme::Classic,
        }
    }

    /// Whether an arbitrary theme attribute value selects the intense profile.
    pub fn is_intense_name(name: Option<&str>) -> bool {
        name.and_then(Theme::from_name) == Some(Theme::Midnight)
    }
}

/// Explicit override of the reduced-motion decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeOverride {
    #[default]
    Auto,
    Animate,
    Static,
}

impl ModeOverride {
    /// Parse the mode attribute; anything unrecognised means auto.
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("animate") => ModeOverride::Animate,
            Some("static") => ModeOverride::Static,
            _ => ModeOverride::Auto,
        }
    }

    /// Attribute value for this override, `None` for auto.
    pub fn attribute_value(self) -> Option<&'static str> {
        match self {
            ModeOverride::Auto => None,
            ModeOverride::Animate => Some("animate"),
            ModeOverride::Static => Some("static"),
        }
    }

    /// Cycle auto -> animate -> static -> auto.
    pub fn next(self) -> Self {
        match self {
            ModeOverride::Auto => ModeOverride::Animate,
            ModeOverride::Animate => ModeOverride::Static,
            ModeOverride::Static => ModeOverride::Auto,
        }
    }

    /// Combine the override with the platform preference.
    pub fn reduces_motion(self, platform_prefers_reduced: bool) -> bool {
        match self {
            ModeOverride::Static => true,
            ModeOverride::Animate => false,
            ModeOverride::Auto => platform_prefers_reduced,
        }
    }
}

/// Current state of the animation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleMode {
    /// Continuous frame loop.
    Animating,
    /// One render per layout or theme change, never a loop.
    StaticSingleFrame,
    /// Loop suspended while the view is hidden.
    Paused,
}

impl LifecycleMode {
    /// Short label for status displays.
    pub fn label(self) -> &'static str {
        match self {
            LifecycleMode::Animating => "animating",
            LifecycleMode::StaticSingleFrame => "static",
            LifecycleMode::Paused => "paused",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_parse_and_cycle() {
        assert_eq!(Theme::from_name(" Midnight "), Some(Theme::Midnight));
        assert_eq!(Theme::from_name("sepia"), None);
        assert_eq!(Theme::Midnight.next(), Theme::Classic);
        assert!(Theme::is_intense_name(Some("MIDNIGHT")));
        assert!(!Theme::is_intense_name(Some("warm")));
        assert!(!Theme::is_intense_name(None));
    }

    #[test]
    fn test_mode_override() {
        assert_eq!(ModeOverride::from_attribute(Some("Static")), ModeOverride::Static);
        assert_eq!(ModeOverride::from_attribute(Some("animate")), ModeOverride::Animate);
        assert_eq!(ModeOverride::from_attribute(Some("sometimes")), ModeOverride::Auto);
        assert_eq!(ModeOverride::from_attribute(None), ModeOverride::Auto);
    }

    #[test]
    fn test_reduces_motion() {
        assert!(ModeOverride::Static.reduces_motion(false));
        assert!(!ModeOverride::Animate.reduces_motion(true));
        assert!(ModeOverride::Auto.reduces_motion(true));
        assert!(!ModeOverride::Auto.reduces_motion(false));
    }
}
