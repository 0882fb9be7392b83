//! Palette derived from the document theme.

use bgfx_core::{ACCENT_PROPERTIES, DEFAULT_ACCENTS, Rgb, THEME_ATTRIBUTE, Theme};
use rand::Rng;

use crate::color::parse_color;
use crate::host::Document;

/// The three particle colors and the alpha levels for dots and lines.
///
/// Replaced wholesale when the theme changes, never edited in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: [Rgb; 3],
    dot_alpha: f64,
    line_alpha: f64,
    intense: bool,
}

impl Palette {
    /// Build a palette from resolved colors.
    ///
    /// The intense theme sits on a dark background and gets faint dots and
    /// lines; every other theme is drawn fully opaque.
    pub fn new(colors: [Rgb; 3], intense: bool) -> Self {
        let (dot_alpha, line_alpha) = if intense { (0.42, 0.22) } else { (1.0, 1.0) };
        Self {
            colors,
            dot_alpha,
            line_alpha,
            intense,
        }
    }

    /// Read the accent properties and theme attribute from a document.
    pub fn from_document<D: Document + ?Sized>(document: &D) -> Self {
        let colors = std::array::from_fn(|i| {
            let raw = document
                .style_property(ACCENT_PROPERTIES[i])
                .filter(|v| !v.trim().is_empty());
            parse_color(raw.as_deref().unwrap_or(DEFAULT_ACCENTS[i]))
        });
        let intense = Theme::is_intense_name(document.attribute(THEME_ATTRIBUTE).as_deref());
        Self::new(colors, intense)
    }

    pub fn colors(&self) -> &[Rgb; 3] {
        &self.colors
    }

    pub fn dot_alpha(&self) -> f64 {
        self.dot_alpha
    }

    pub fn line_alpha(&self) -> f64 {
        self.line_alpha
    }

    /// Whether the intense theme is active.
    pub fn is_intense(&self) -> bool {
        self.intense
    }

    /// Pick one of the three colors uniformly.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Rgb {
        self.colors[rng.random_range(0..self.colors.len())]
    }
}
