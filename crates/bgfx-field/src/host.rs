//! Seams between the particle field and whatever hosts it.
//!
//! A host supplies three things: a [`Surface`] to draw on, a [`Document`]
//! to read theme and environment state from, and a [`Scheduler`] that
//! hands out frame and timer callbacks. The host delivers those callbacks
//! back to the [`Controller`](crate::Controller) by handle.

use std::time::Duration;

use bgfx_core::{Rgb, Viewport};

/// A point in surface space (CSS pixels, origin top-left).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Handle of an outstanding frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Handle of an outstanding timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// A 2D drawing target.
pub trait Surface {
    /// Whether a drawing context is available. An unready surface disables
    /// the field entirely.
    fn is_ready(&self) -> bool {
        true
    }

    /// Resize the backing store to device pixels and set the CSS-to-device
    /// scale.
    fn resize(&mut self, pixel_width: u32, pixel_height: u32, device_pixel_ratio: f64);

    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Stroke a 1px line.
    fn stroke_line(&mut self, from: Point, to: Point, color: Rgb, alpha: f64);

    /// Fill a circle.
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgb, alpha: f64);
}

/// Read-only view of the hosting document.
pub trait Document {
    /// Attribute value on the root element.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Computed custom style property on the root element.
    fn style_property(&self, name: &str) -> Option<String>;

    /// Platform reduced-motion preference.
    fn prefers_reduced_motion(&self) -> bool;

    /// Whether the view is currently hidden.
    fn is_hidden(&self) -> bool;

    /// Current viewport.
    fn viewport(&self) -> Viewport;
}

/// Source of frame and timer callbacks.
///
/// Implementations only record requests; they must never call back into
/// the controller synchronously.
pub trait Scheduler {
    /// Ask for a callback on the next repaint.
    fn request_frame(&mut self) -> FrameHandle;

    /// Drop a pending frame request.
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Ask for a callback after `delay`.
    fn set_timeout(&mut self, delay: Duration) -> TimerHandle;

    /// Drop a pending timeout.
    fn clear_timeout(&mut self, handle: TimerHandle);
}
