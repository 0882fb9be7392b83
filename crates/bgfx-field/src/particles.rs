//! Particle state and motion.

use bgfx_core::{DensityProfile, Rgb};
use rand::Rng;
use tracing::debug;

use crate::palette::Palette;

/// Distance past an edge at which a particle wraps to the opposite side.
pub const WRAP_MARGIN: f64 = 10.0;

/// A single drifting dot.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    /// Horizontal velocity in pixels per tick.
    pub vx: f64,
    /// Vertical velocity in pixels per tick.
    pub vy: f64,
    pub radius: f64,
    /// Copied from the palette at seeding time and never changed after.
    pub color: Rgb,
}

/// The full set of particles for one surface size.
#[derive(Debug, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
}

impl ParticleField {
    /// Create an empty field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every particle with a fresh random batch sized for the surface.
    pub fn seed<R: Rng + ?Sized>(
        &mut self,
        width: f64,
        height: f64,
        profile: DensityProfile,
        palette: &Palette,
        rng: &mut R,
    ) {
        let count = profile.particle_count(width, height);
        let speed = profile.base_speed(palette.is_intense());

        self.width = width;
        self.height = height;
        self.particles = (0..count)
            .map(|_| {
                let color = palette.pick(rng);
                Particle {
                    x: rng.random::<f64>() * width,
                    y: rng.random::<f64>() * height,
                    vx: random_velocity(rng, speed),
                    vy: random_velocity(rng, speed),
                    radius: rng.random_range(0.9..2.7),
                    color,
                }
            })
            .collect();

        debug!(count, width, height, ?profile, "seeded particle field");
    }

    /// Move every particle by one tick, wrapping around the surface edges.
    pub fn advance(&mut self) {
        let (max_x, max_y) = (self.width + WRAP_MARGIN, self.height + WRAP_MARGIN);

        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;

            if p.x < -WRAP_MARGIN {
                p.x = max_x;
            }
            if p.x > max_x {
                p.x = -WRAP_MARGIN;
            }
            if p.y < -WRAP_MARGIN {
                p.y = max_y;
            }
            if p.y > max_y {
                p.y = -WRAP_MARGIN;
            }
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Surface size the field was last seeded for.
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    #[cfg(test)]
    pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }
}

/// Magnitude in [0.35, 1.0) of the base speed with a random sign.
fn random_velocity<R: Rng + ?Sized>(rng: &mut R, speed: f64) -> f64 {
    let magnitude = rng.random_range(0.35..1.0) * speed;
    if rng.random_bool(0.5) {
        -magnitude
    } else {
        magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bgfx_core::FALLBACK_RGB;
    use rand::{SeedableRng, rngs::StdRng};

    fn palette(intense: bool) -> Palette {
        Palette::new(
            [Rgb::new(255, 0, 0), Rgb::new(0, 255, 0), Rgb::new(0, 0, 255)],
            intense,
        )
    }

    #[test]
    fn test_seed_counts() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut field = ParticleField::new();

        field.seed(1920.0, 1080.0, DensityProfile::Normal, &palette(true), &mut rng);
        assert_eq!(field.len(), 74);

        field.seed(1920.0, 1080.0, DensityProfile::Constrained, &palette(true), &mut rng);
        assert_eq!(field.len(), 55);

        field.seed(320.0, 240.0, DensityProfile::Normal, &palette(true), &mut rng);
        assert_eq!(field.len(), 28);
    }

    #[test]
    fn test_seed_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        let pal = palette(false);
        let mut field = ParticleField::new();
        field.seed(800.0, 600.0, DensityProfile::Normal, &pal, &mut rng);

        let speed = DensityProfile::Normal.base_speed(false);
        for p in field.particles() {
            assert!((0.0..800.0).contains(&p.x));
            assert!((0.0..600.0).contains(&p.y));
            assert!((0.9..2.7).contains(&p.radius));
            for v in [p.vx, p.vy] {
                assert!(v.abs() >= 0.35 * speed - 1e-12);
                assert!(v.abs() < speed);
            }
            assert!(pal.colors().contains(&p.color));
            assert_ne!(p.color, FALLBACK_RGB);
        }
    }

    #[test]
    fn test_seed_is_reproducible() {
        let pal = palette(true);
        let mut a = ParticleField::new();
        let mut b = ParticleField::new();
        a.seed(1000.0, 700.0, DensityProfile::Normal, &pal, &mut StdRng::seed_from_u64(3));
        b.seed(1000.0, 700.0, DensityProfile::Normal, &pal, &mut StdRng::seed_from_u64(3));
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_reseed_replaces_batch() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut field = ParticleField::new();
        field.seed(3000.0, 2000.0, DensityProfile::Normal, &palette(true), &mut rng);
        assert_eq!(field.len(), 120);
        field.seed(100.0, 100.0, DensityProfile::Constrained, &palette(true), &mut rng);
        assert_eq!(field.len(), 22);
        assert_eq!(field.size(), (100.0, 100.0));
    }

    #[test]
    fn test_advance_moves_by_velocity() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut field = ParticleField::new();
        field.seed(800.0, 600.0, DensityProfile::Normal, &palette(true), &mut rng);
        let before = field.particles().to_vec();
        field.advance();
        for (old, new) in before.iter().zip(field.particles()) {
            assert!((new.x - (old.x + old.vx)).abs() < 1e-9);
            assert!((new.y - (old.y + old.vy)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_advance_wraps_with_margin() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut field = ParticleField::new();
        field.seed(200.0, 100.0, DensityProfile::Normal, &palette(true), &mut rng);
        {
            let ps = field.particles_mut();
            ps[0].x = 209.9;
            ps[0].vx = 0.2;
            ps[1].x = -9.9;
            ps[1].vx = -0.2;
            ps[2].y = 109.95;
            ps[2].vy = 0.1;
            ps[3].y = -9.95;
            ps[3].vy = -0.1;
        }
        field.advance();
        let ps = field.particles();
        assert_eq!(ps[0].x, -WRAP_MARGIN);
        assert_eq!(ps[1].x, 200.0 + WRAP_MARGIN);
        assert_eq!(ps[2].y, -WRAP_MARGIN);
        assert_eq!(ps[3].y, 100.0 + WRAP_MARGIN);
    }

    #[test]
    fn test_advance_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut field = ParticleField::new();
        field.seed(300.0, 200.0, DensityProfile::Constrained, &palette(false), &mut rng);
        for _ in 0..5_000 {
            field.advance();
            for p in field.particles() {
                assert!((-WRAP_MARGIN..=300.0 + WRAP_MARGIN).contains(&p.x));
                assert!((-WRAP_MARGIN..=200.0 + WRAP_MARGIN).contains(&p.y));
            }
        }
    }
}
