//! Drifting particle field rendering for bgfx.
//!
//! Colored dots drift across a surface with toroidal wraparound, and any
//! two dots closer than a threshold are joined by a faded line. The
//! [`Controller`] owns the loop and reacts to resize, visibility, theme and
//! reduced-motion input delivered by a host through the traits in
//! [`host`].

mod color;
pub mod host;
mod lifecycle;
mod palette;
mod particles;
mod render;

#[cfg(test)]
mod testing;

pub use color::parse_color;
pub use host::{Document, FrameHandle, Point, Scheduler, Surface, TimerHandle};
pub use lifecycle::{Controller, RESIZE_DEBOUNCE, SurfaceState};
pub use palette::Palette;
pub use particles::{Particle, ParticleField, WRAP_MARGIN};
pub use render::{FrameStats, draw_frame, line_alpha};
