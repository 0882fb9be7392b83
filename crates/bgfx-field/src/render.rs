//! Proximity lines and dots.

use tracing::trace;

use crate::host::{Point, Surface};
use crate::palette::Palette;
use crate::particles::Particle;

/// Counts of what one frame drew.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub lines: usize,
    pub dots: usize,
}

/// Alpha of a line between two particles at squared distance `distance_sq`.
///
/// Falls off linearly in squared distance, from `line_alpha` at zero to
/// nothing at `max_distance_sq`.
pub fn line_alpha(distance_sq: f64, max_distance_sq: f64, line_alpha: f64) -> f64 {
    if max_distance_sq <= 0.0 || distance_sq > max_distance_sq {
        return 0.0;
    }
    line_alpha * (1.0 - distance_sq / max_distance_sq)
}

/// Clear the surface and draw one frame: every line under the threshold,
/// then every dot on top.
///
/// Lines are checked for all unordered pairs, so cost grows quadratically
/// with the particle count.
pub fn draw_frame<S: Surface + ?Sized>(
    surface: &mut S,
    particles: &[Particle],
    palette: &Palette,
    max_distance_sq: f64,
) -> FrameStats {
    surface.clear();

    let mut stats = FrameStats::default();
    for (i, p) in particles.iter().enumerate() {
        for q in &particles[i + 1..] {
            let dx = p.x - q.x;
            let dy = p.y - q.y;
            let d2 = dx * dx + dy * dy;
            if d2 > max_distance_sq {
                continue;
            }

            let alpha = line_alpha(d2, max_distance_sq, palette.line_alpha());
            surface.stroke_line(
                Point::new(p.x, p.y),
                Point::new(q.x, q.y),
                p.color.midpoint(q.color),
                alpha,
            );
            stats.lines += 1;
        }
    }

    for p in particles {
        surface.fill_circle(Point::new(p.x, p.y), p.radius, p.color, palette.dot_alpha());
    }
    stats.dots = particles.len();

    trace!(lines = stats.lines, dots = stats.dots, "drew frame");
    stats
}
