//! Animation lifecycle: loop scheduling, resize, visibility and theme.

use std::time::Duration;

use bgfx_core::{
    CONSTRAINED_ATTRIBUTE, DensityProfile, LifecycleMode, MODE_ATTRIBUTE, ModeOverride,
    THEME_ATTRIBUTE,
};
use rand::Rng;
use tracing::{debug, info, trace};

use crate::host::{Document, FrameHandle, Scheduler, Surface, TimerHandle};
use crate::palette::Palette;
use crate::particles::{Particle, ParticleField};
use crate::render::{self, FrameStats};

/// Quiet period after the last resize event before the layout is redone.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(120);

/// Surface geometry from the most recent layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceState {
    /// Width in CSS pixels.
    pub width: u32,
    /// Height in CSS pixels.
    pub height: u32,
    /// Device pixel ratio, clamped to [1, 2].
    pub device_pixel_ratio: f64,
    /// Maximum distance for a connecting line.
    pub max_distance: f64,
    /// `max_distance` squared, compared against squared pair distances.
    pub max_distance_sq: f64,
}

impl SurfaceState {
    /// Backing store width in device pixels.
    pub fn pixel_width(&self) -> u32 {
        (self.width as f64 * self.device_pixel_ratio).floor() as u32
    }

    /// Backing store height in device pixels.
    pub fn pixel_height(&self) -> u32 {
        (self.height as f64 * self.device_pixel_ratio).floor() as u32
    }
}

impl Default for SurfaceState {
    fn default() -> Self {
        let max_distance = DensityProfile::Normal.max_distance();
        Self {
            width: 0,
            height: 0,
            device_pixel_ratio: 1.0,
            max_distance,
            max_distance_sq: max_distance * max_distance,
        }
    }
}

/// Drives the particle field for one surface.
///
/// The controller holds the only frame request and the only resize timer
/// it ever has outstanding. Hosts forward their callbacks through
/// [`on_frame`](Self::on_frame), [`on_timer`](Self::on_timer),
/// [`on_resize`](Self::on_resize),
/// [`on_visibility_change`](Self::on_visibility_change) and
/// [`on_attributes_changed`](Self::on_attributes_changed).
#[derive(Debug)]
pub struct Controller<D, S, H, R> {
    document: D,
    surface: S,
    scheduler: H,
    rng: R,
    profile: DensityProfile,
    reduced_motion: bool,
    mode: LifecycleMode,
    palette: Palette,
    field: ParticleField,
    state: SurfaceState,
    frame: Option<FrameHandle>,
    resize_timer: Option<TimerHandle>,
    frames_drawn: u64,
}

impl<D, S, H, R> Controller<D, S, H, R>
where
    D: Document,
    S: Surface,
    H: Scheduler,
    R: Rng,
{
    /// Attach to a surface and start.
    ///
    /// Returns `None` when there is no surface or it has no drawing
    /// context; the field simply does not exist on such hosts.
    pub fn attach(document: D, surface: Option<S>, scheduler: H, rng: R) -> Option<Self> {
        let Some(surface) = surface else {
            debug!("no drawing surface, particle field disabled");
            return None;
        };
        if !surface.is_ready() {
            debug!("drawing surface has no context, particle field disabled");
            return None;
        }

        let mode_override =
            ModeOverride::from_attribute(document.attribute(MODE_ATTRIBUTE).as_deref());
        let reduced_motion = mode_override.reduces_motion(document.prefers_reduced_motion());
        let profile =
            DensityProfile::from_hint(document.attribute(CONSTRAINED_ATTRIBUTE).as_deref());
        let palette = Palette::from_document(&document);

        info!(?mode_override, reduced_motion, ?profile, "attaching particle field");

        let mut controller = Self {
            document,
            surface,
            scheduler,
            rng,
            profile,
            reduced_motion,
            mode: LifecycleMode::Paused,
            palette,
            field: ParticleField::new(),
            state: SurfaceState::default(),
            frame: None,
            resize_timer: None,
            frames_drawn: 0,
        };
        controller.layout();
        controller.start();
        Some(controller)
    }

    /// Tear down: cancel the outstanding frame and timer and hand the parts
    /// back to the host.
    pub fn detach(mut self) -> (D, S, H, R) {
        self.stop();
        if let Some(timer) = self.resize_timer.take() {
            self.scheduler.clear_timeout(timer);
        }
        debug!("detached particle field");
        (self.document, self.surface, self.scheduler, self.rng)
    }

    /// A frame callback fired. Stale handles are ignored.
    pub fn on_frame(&mut self, handle: FrameHandle) {
        if self.frame != Some(handle) || self.mode != LifecycleMode::Animating {
            trace!(?handle, "ignoring stale frame");
            return;
        }
        self.tick();
    }

    /// A timer callback fired. Only the pending resize timer is acted on.
    pub fn on_timer(&mut self, handle: TimerHandle) {
        if self.resize_timer != Some(handle) {
            trace!(?handle, "ignoring stale timer");
            return;
        }
        self.resize_timer = None;
        self.layout();
        self.render_once();
    }

    /// The viewport changed size. Restarts the debounce timer.
    pub fn on_resize(&mut self) {
        if let Some(timer) = self.resize_timer.take() {
            self.scheduler.clear_timeout(timer);
        }
        self.resize_timer = Some(self.scheduler.set_timeout(RESIZE_DEBOUNCE));
    }

    /// The view was hidden or shown.
    pub fn on_visibility_change(&mut self) {
        if self.mode == LifecycleMode::StaticSingleFrame {
            return;
        }
        if self.document.is_hidden() {
            self.stop();
            if self.mode != LifecycleMode::Paused {
                debug!("view hidden, pausing");
            }
            self.mode = LifecycleMode::Paused;
        } else {
            self.start();
        }
    }

    /// Root attributes changed. Only a theme change matters, and a batch
    /// naming it several times is handled once.
    pub fn on_attributes_changed(&mut self, names: &[&str]) {
        if !names.contains(&THEME_ATTRIBUTE) {
            return;
        }
        self.palette = Palette::from_document(&self.document);
        debug!(intense = self.palette.is_intense(), "theme changed, palette recomputed");
        self.reseed();
        self.render_once();
    }

    pub fn mode(&self) -> LifecycleMode {
        self.mode
    }

    /// Whether motion is reduced for the lifetime of this controller.
    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn profile(&self) -> DensityProfile {
        self.profile
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn particles(&self) -> &[Particle] {
        self.field.particles()
    }

    pub fn surface_state(&self) -> &SurfaceState {
        &self.state
    }

    /// Whether a frame request is outstanding.
    pub fn is_scheduled(&self) -> bool {
        self.frame.is_some()
    }

    /// Number of frames drawn since attaching.
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    /// Mutable access to the document so a host can change attributes
    /// before notifying the controller.
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn scheduler(&self) -> &H {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut H {
        &mut self.scheduler
    }

    /// Enter the mode the current motion and visibility state calls for.
    fn start(&mut self) {
        if self.reduced_motion {
            self.stop();
            self.mode = LifecycleMode::StaticSingleFrame;
            self.render_once();
            return;
        }
        if self.document.is_hidden() {
            self.mode = LifecycleMode::Paused;
            return;
        }
        if self.mode != LifecycleMode::Animating {
            debug!("starting animation loop");
        }
        self.mode = LifecycleMode::Animating;
        if self.frame.is_none() {
            self.tick();
        }
    }

    fn stop(&mut self) {
        if let Some(frame) = self.frame.take() {
            self.scheduler.cancel_frame(frame);
        }
    }

    /// One loop iteration: schedule the next frame, advance, draw.
    fn tick(&mut self) {
        self.frame = Some(self.scheduler.request_frame());
        self.field.advance();
        self.render_once();
    }

    /// Recompute geometry from the viewport and reseed.
    fn layout(&mut self) {
        let viewport = self.document.viewport();
        let dpr = viewport.clamped_dpr();
        let max_distance = self.profile.max_distance();
        self.state = SurfaceState {
            width: viewport.css_width(),
            height: viewport.css_height(),
            device_pixel_ratio: dpr,
            max_distance,
            max_distance_sq: max_distance * max_distance,
        };
        self.surface
            .resize(self.state.pixel_width(), self.state.pixel_height(), dpr);
        debug!(
            width = self.state.width,
            height = self.state.height,
            dpr,
            "surface resized"
        );
        self.reseed();
    }

    fn reseed(&mut self) {
        self.field.seed(
            self.state.width as f64,
            self.state.height as f64,
            self.profile,
            &self.palette,
            &mut self.rng,
        );
    }

    fn render_once(&mut self) -> FrameStats {
        self.frames_drawn += 1;
        render::draw_frame(
            &mut self.surface,
            self.field.particles(),
            &self.palette,
            self.state.max_distance_sq,
        )
    }
}
