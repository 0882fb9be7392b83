//! RGB color values.

use ratatui::style::Color;

/// Amber used whenever a color string cannot be resolved.
pub const FALLBACK_RGB: Rgb = Rgb::new(245, 158, 11);

/// An opaque 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for Rgb {
    fn default() -> Self {
        FALLBACK_RGB
    }
}

impl Rgb {
    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise integer average of two colors.
    ///
    /// Not gamma-correct; lines between differently colored dots only need
    /// to look roughly in between.
    pub fn midpoint(self, other: Rgb) -> Rgb {
        let avg = |a: u8, b: u8| ((a as u16 + b as u16) >> 1) as u8;
        Rgb::new(
            avg(self.r, other.r),
            avg(self.g, other.g),
            avg(self.b, other.b),
        )
    }

    /// Composite this color with the given alpha over an opaque backdrop.
    pub fn over(self, backdrop: Rgb, alpha: f64) -> Rgb {
        let alpha = if alpha.is_finite() {
            alpha.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let mix = |fg: u8, bg: u8| {
            let v = bg as f64 + (fg as f64 - bg as f64) * alpha;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(
            mix(self.r, backdrop.r),
            mix(self.g, backdrop.g),
            mix(self.b, backdrop.b),
        )
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.r, rgb.g, rgb.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint_truncates() {
        let a = Rgb::new(255, 0, 10);
        let b = Rgb::new(0, 255, 13);
        assert_eq!(a.midpoint(b), Rgb::new(127, 127, 11));
        assert_eq!(a.midpoint(a), a);
    }

    #[test]
    fn test_over_backdrop() {
        let backdrop = Rgb::new(0, 0, 0);
        let white = Rgb::new(255, 255, 255);
        assert_eq!(white.over(backdrop, 1.0), white);
        assert_eq!(white.over(backdrop, 0.0), backdrop);
        assert_eq!(white.over(backdrop, 0.5), Rgb::new(128, 128, 128));
        // Out-of-range alpha is clamped
        assert_eq!(white.over(backdrop, 3.0), white);
        assert_eq!(white.over(backdrop, f64::NAN), backdrop);
    }

    #[test]
    fn test_into_ratatui_color() {
        let c: Color = Rgb::new(1, 2, 3).into();
        assert_eq!(c, Color::Rgb(1, 2, 3));
    }
}
