//! Core types shared by the bgfx crates.
//!
//! These are plain values: colors, theme and mode selections, density
//! profiles and viewport geometry. Nothing in here touches a terminal or
//! keeps state across frames.

mod color;
mod profile;
mod theme;

pub use color::{FALLBACK_RGB, Rgb};
pub use profile::{DensityProfile, Viewport};
pub use theme::{LifecycleMode, ModeOverride, Theme};

/// Root attribute holding the active theme name.
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Root attribute holding the animate/static override.
pub const MODE_ATTRIBUTE: &str = "data-bgfx";

/// Root attribute selecting the constrained density profile when set to `1`.
pub const CONSTRAINED_ATTRIBUTE: &str = "data-constrained";

/// Style properties the palette is derived from, in palette order.
pub const ACCENT_PROPERTIES: [&str; 3] = ["--accent", "--accent2", "--accent3"];

/// Values used when an accent property is absent or blank.
pub const DEFAULT_ACCENTS: [&str; 3] = ["#f59e0b", "#22c55e", "#38bdf8"];
