//! In-memory host implementations for tests.

use std::collections::HashMap;
use std::time::Duration;

use bgfx_core::{Rgb, Viewport};

use crate::host::{Document, FrameHandle, Point, Scheduler, Surface, TimerHandle};

/// A document backed by plain maps.
#[derive(Debug, Clone)]
pub struct FakeDocument {
    attributes: HashMap<String, String>,
    properties: HashMap<String, String>,
    reduced_motion: bool,
    hidden: bool,
    viewport: Viewport,
}

impl Default for FakeDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeDocument {
    pub fn new() -> Self {
        Self {
            attributes: HashMap::new(),
            properties: HashMap::new(),
            reduced_motion: false,
            hidden: false,
            viewport: Viewport::new(1280.0, 720.0, 1.0),
        }
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_property(mut self, name: &str, value: &str) -> Self {
        self.set_property(name, value);
        self
    }

    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    pub fn set_property(&mut self, name: &str, value: &str) {
        self.properties.insert(name.to_string(), value.to_string());
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }
}

impl Document for FakeDocument {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }

    fn style_property(&self, name: &str) -> Option<String> {
        self.properties.get(name).cloned()
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

/// A scheduler that only records what was asked of it.
#[derive(Debug, Default)]
pub struct FakeScheduler {
    next_id: u64,
    pending_frame: Option<FrameHandle>,
    frames_requested: usize,
    frames_cancelled: usize,
    pending_timers: Vec<TimerHandle>,
    timers_cleared: usize,
    last_timeout: Option<Duration>,
}

impl FakeScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending_frame
    }

    pub fn frames_requested(&self) -> usize {
        self.frames_requested
    }

    pub fn frames_cancelled(&self) -> usize {
        self.frames_cancelled
    }

    pub fn pending_timers(&self) -> &[TimerHandle] {
        &self.pending_timers
    }

    pub fn timers_cleared(&self) -> usize {
        self.timers_cleared
    }

    pub fn last_timeout(&self) -> Option<Duration> {
        self.last_timeout
    }
}

impl Scheduler for FakeScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        self.frames_requested += 1;
        let handle = FrameHandle(self.next_id);
        self.pending_frame = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending_frame == Some(handle) {
            self.pending_frame = None;
            self.frames_cancelled += 1;
        }
    }

    fn set_timeout(&mut self, delay: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending_timers.push(handle);
        self.last_timeout = Some(delay);
        handle
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        let before = self.pending_timers.len();
        self.pending_timers.retain(|t| *t != handle);
        self.timers_cleared += before - self.pending_timers.len();
    }
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Line {
        from: Point,
        to: Point,
        color: Rgb,
        alpha: f64,
    },
    Circle {
        center: Point,
        radius: f64,
        color: Rgb,
        alpha: f64,
    },
}

/// A surface that records the calls of the current frame.
#[derive(Debug)]
pub struct RecordingSurface {
    ready: bool,
    renders: usize,
    calls: Vec<DrawCall>,
    last_resize: Option<(u32, u32, f64)>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            ready: true,
            renders: 0,
            calls: Vec::new(),
            last_resize: None,
        }
    }

    /// A surface whose drawing context is unavailable.
    pub fn without_context() -> Self {
        Self {
            ready: false,
            ..Self::new()
        }
    }

    /// Number of frames started (one clear per frame).
    pub fn renders(&self) -> usize {
        self.renders
    }

    /// Calls since the last clear, starting with that clear.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn last_resize(&self) -> Option<(u32, u32, f64)> {
        self.last_resize
    }

    pub fn last_frame_dot_alphas(&self) -> Vec<f64> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Circle { alpha, .. } => Some(*alpha),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn resize(&mut self, pixel_width: u32, pixel_height: u32, device_pixel_ratio: f64) {
        self.last_resize = Some((pixel_width, pixel_height, device_pixel_ratio));
    }

    fn clear(&mut self) {
        self.renders += 1;
        self.calls.clear();
        self.calls.push(DrawCall::Clear);
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgb, alpha: f64) {
        self.calls.push(DrawCall::Line {
            from,
            to,
            color,
            alpha,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgb, alpha: f64) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            color,
            alpha,
        });
    }
}
