//! Configuration file handling for bgfx.
//!
//! The file lives at `<config dir>/bgfx/config.toml`. Every field has a
//! default, so a missing file or a partial one is fine.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use bgfx_core::{DEFAULT_ACCENTS, ModeOverride, Theme};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors from loading or saving the configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// No platform config directory could be determined.
    NoConfigDir,
    /// Reading or writing the file failed.
    Io(std::io::Error),
    /// The file is not valid TOML for [`Config`].
    Parse(toml::de::Error),
    /// The configuration could not be serialized.
    Serialize(toml::ser::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoConfigDir => write!(f, "could not determine a config directory"),
            ConfigError::Io(e) => write!(f, "config file I/O failed: {e}"),
            ConfigError::Parse(e) => write!(f, "invalid config file: {e}"),
            ConfigError::Serialize(e) => write!(f, "could not serialize config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::NoConfigDir => None,
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Serialize(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

/// Accent colors for one theme. Unset entries fall back to the built-in
/// accents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    pub accent: Option<String>,
    pub accent2: Option<String>,
    pub accent3: Option<String>,
}

impl ThemeColors {
    fn new(accent: &str, accent2: &str, accent3: &str) -> Self {
        Self {
            accent: Some(accent.to_string()),
            accent2: Some(accent2.to_string()),
            accent3: Some(accent3.to_string()),
        }
    }

    /// Value for one of the three accent slots (0, 1 or 2).
    pub fn slot(&self, index: usize) -> Option<&str> {
        match index {
            0 => self.accent.as_deref(),
            1 => self.accent2.as_deref(),
            2 => self.accent3.as_deref(),
            _ => None,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Active theme name.
    pub theme: String,
    /// Animate/static override.
    pub mode: ModeOverride,
    /// Use the constrained density profile.
    pub constrained: bool,
    /// Platform reduced-motion preference.
    pub reduced_motion: bool,
    /// Device pixel ratio reported to the field.
    pub device_pixel_ratio: f64,
    /// Width of a terminal cell in pixels.
    pub cell_width: u16,
    /// Height of a terminal cell in pixels.
    pub cell_height: u16,
    /// Backdrop color that translucent strokes are blended over.
    pub backdrop: String,
    /// Accent colors per theme name.
    pub themes: BTreeMap<String, ThemeColors>,
}

impl Default for Config {
    fn default() -> Self {
        let mut themes = BTreeMap::new();
        themes.insert(
            Theme::Classic.name().to_string(),
            ThemeColors::new(DEFAULT_ACCENTS[0], DEFAULT_ACCENTS[1], DEFAULT_ACCENTS[2]),
        );
        themes.insert(
            Theme::Warm.name().to_string(),
            ThemeColors::new("#f97316", "#eab308", "#ef4444"),
        );
        themes.insert(
            Theme::Midnight.name().to_string(),
            ThemeColors::new("#a78bfa", "#38bdf8", "#22d3ee"),
        );

        Self {
            theme: Theme::Classic.name().to_string(),
            mode: ModeOverride::Auto,
            constrained: false,
            reduced_motion: false,
            device_pixel_ratio: 1.0,
            cell_width: 8,
            cell_height: 16,
            backdrop: "#0b1020".to_string(),
            themes,
        }
    }
}

impl Config {
    /// Default location of the configuration file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        ProjectDirs::from("", "", "bgfx")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from the default location, or defaults if there is no file yet.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Accent colors for a theme name, matched case-insensitively.
    pub fn theme_colors(&self, theme: &str) -> Option<&ThemeColors> {
        let theme = theme.trim();
        self.themes
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(theme))
            .map(|(_, colors)| colors)
    }
}
