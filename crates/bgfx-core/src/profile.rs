//! Density profiles and viewport geometry.

use serde::{Deserialize, Serialize};

/// Surface area (in CSS pixels) that one particle accounts for.
const AREA_PER_PARTICLE: f64 = 28_000.0;

/// Particle density profile.
///
/// The constrained profile is meant for narrow embedded views where the
/// quadratic line pass has to stay cheap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DensityProfile {
    #[default]
    Normal,
    Constrained,
}

impl DensityProfile {
    /// Pick the profile from the environment hint attribute (`1` means constrained).
    pub fn from_hint(hint: Option<&str>) -> Self {
        match hint.map(str::trim) {
            Some("1") => DensityProfile::Constrained,
            _ => DensityProfile::Normal,
        }
    }

    /// Inclusive bounds on the particle count.
    pub fn count_range(self) -> (usize, usize) {
        match self {
            DensityProfile::Normal => (28, 120),
            DensityProfile::Constrained => (22, 55),
        }
    }

    /// Number of particles for a surface of the given size.
    pub fn particle_count(self, width: f64, height: f64) -> usize {
        let (min, max) = self.count_range();
        let raw = (width * height / AREA_PER_PARTICLE).round();
        if !raw.is_finite() || raw <= 0.0 {
            return min;
        }
        (raw as usize).clamp(min, max)
    }

    /// Maximum distance at which two particles are joined by a line.
    pub fn max_distance(self) -> f64 {
        match self {
            DensityProfile::Normal => 140.0,
            DensityProfile::Constrained => 110.0,
        }
    }

    /// Base particle speed in pixels per tick.
    ///
    /// Non-intense themes move about 10% slower.
    pub fn base_speed(self, intense: bool) -> f64 {
        let speed = match self {
            DensityProfile::Normal => 0.22,
            DensityProfile::Constrained => 0.16,
        };
        if intense { speed } else { speed * 0.9 }
    }
}

/// Host viewport in CSS pixels plus the raw device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
}

impl Viewport {
    /// Create a new viewport.
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }

    /// Width floored to whole pixels, at least 1.
    pub fn css_width(&self) -> u32 {
        floor_dimension(self.width)
    }

    /// Height floored to whole pixels, at least 1.
    pub fn css_height(&self) -> u32 {
        floor_dimension(self.height)
    }

    /// Device pixel ratio clamped to [1, 2].
    pub fn clamped_dpr(&self) -> f64 {
        if self.device_pixel_ratio.is_finite() {
            self.device_pixel_ratio.clamp(1.0, 2.0)
        } else {
            1.0
        }
    }
}

fn floor_dimension(value: f64) -> u32 {
    if value.is_finite() {
        value.floor().clamp(1.0, u32::MAX as f64) as u32
    } else {
        1
    }
}
