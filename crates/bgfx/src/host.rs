//! Terminal implementations of the document and scheduler seams.

use std::time::{Duration, Instant};

use bgfx_config::Config;
use bgfx_core::{
    ACCENT_PROPERTIES, CONSTRAINED_ATTRIBUTE, MODE_ATTRIBUTE, ModeOverride, THEME_ATTRIBUTE,
    Viewport,
};
use bgfx_field::{Document, FrameHandle, Scheduler, TimerHandle};

/// Interval between repaints while animating (~60 fps).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Environment variable that forces the reduced-motion preference.
pub const REDUCED_MOTION_ENV: &str = "BGFX_REDUCED_MOTION";

/// Document state for a terminal window.
#[derive(Debug, Clone)]
pub struct TerminalDocument {
    config: Config,
    theme: String,
    mode: ModeOverride,
    hidden: bool,
    reduced_motion: bool,
    columns: u16,
    rows: u16,
}

impl TerminalDocument {
    /// Create a document from the configuration and the current terminal size.
    pub fn new(config: Config, columns: u16, rows: u16) -> Self {
        let reduced_motion = env_reduced_motion().unwrap_or(config.reduced_motion);
        Self {
            theme: config.theme.clone(),
            mode: config.mode,
            config,
            hidden: false,
            reduced_motion,
            columns,
            rows,
        }
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: &str) {
        self.theme = theme.to_string();
    }

    pub fn mode(&self) -> ModeOverride {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ModeOverride) {
        self.mode = mode;
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub fn set_size(&mut self, columns: u16, rows: u16) {
        self.columns = columns;
        self.rows = rows;
    }
}

impl Document for TerminalDocument {
    fn attribute(&self, name: &str) -> Option<String> {
        match name {
            THEME_ATTRIBUTE => Some(self.theme.clone()),
            MODE_ATTRIBUTE => self.mode.attribute_value().map(str::to_string),
            CONSTRAINED_ATTRIBUTE => self.config.constrained.then(|| "1".to_string()),
            _ => None,
        }
    }

    fn style_property(&self, name: &str) -> Option<String> {
        let slot = ACCENT_PROPERTIES.iter().position(|p| *p == name)?;
        self.config
            .theme_colors(&self.theme)?
            .slot(slot)
            .map(str::to_string)
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(
            self.columns as f64 * self.config.cell_width.max(1) as f64,
            self.rows as f64 * self.config.cell_height.max(1) as f64,
            self.config.device_pixel_ratio,
        )
    }
}

/// Read the reduced-motion override from the environment.
fn env_reduced_motion() -> Option<bool> {
    let value = std::env::var(REDUCED_MOTION_ENV).ok()?;
    parse_flag(&value)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Deadline-based scheduler polled by the event loop.
#[derive(Debug, Default)]
pub struct TerminalScheduler {
    next_id: u64,
    frame: Option<(FrameHandle, Instant)>,
    timers: Vec<(TimerHandle, Instant)>,
}

impl TerminalScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Earliest pending deadline, if anything is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.frame
            .iter()
            .map(|(_, at)| *at)
            .chain(self.timers.iter().map(|(_, at)| *at))
            .min()
    }

    /// Take the frame request if its deadline has passed.
    pub fn take_due_frame(&mut self, now: Instant) -> Option<FrameHandle> {
        match self.frame {
            Some((handle, at)) if at <= now => {
                self.frame = None;
                Some(handle)
            }
            _ => None,
        }
    }

    /// Take every timer whose deadline has passed, earliest first.
    pub fn take_due_timers(&mut self, now: Instant) -> Vec<TimerHandle> {
        let mut due: Vec<(TimerHandle, Instant)> = Vec::new();
        self.timers.retain(|&(handle, at)| {
            if at <= now {
                due.push((handle, at));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(_, at)| *at);
        due.into_iter().map(|(handle, _)| handle).collect()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Scheduler for TerminalScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id());
        self.frame = Some((handle, Instant::now() + FRAME_INTERVAL));
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if matches!(self.frame, Some((pending, _)) if pending == handle) {
            self.frame = None;
        }
    }

    fn set_timeout(&mut self, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id());
        self.timers.push((handle, Instant::now() + delay));
        handle
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        self.timers.retain(|(pending, _)| *pending != handle);
    }
}
