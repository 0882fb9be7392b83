use std::io::{Write, stdout};
use std::time::{Duration, Instant};

use bgfx_config::Config;
use bgfx_core::{Rgb, THEME_ATTRIBUTE, Theme};
use bgfx_field::{Controller, parse_color};
use crossterm::{
    event::{
        self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Stylize},
    text::Line,
};
use tracing::{info, warn};

mod host;
mod logging;
mod surface;

use host::{TerminalDocument, TerminalScheduler};
use surface::CanvasSurface;

/// Longest wait for input when nothing is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

type FieldController = Controller<TerminalDocument, CanvasSurface, TerminalScheduler, StdRng>;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    logging::init()?;
    let config = Config::load()?;

    let mut terminal = ratatui::init();
    let result = run(&mut terminal, config);
    disable_focus_reporting(&mut stdout());
    ratatui::restore();
    result
}

/// Turn focus reporting back off. Failure only leaves stray focus
/// escapes in the shell, so it is logged rather than returned.
fn disable_focus_reporting<W: Write>(out: &mut W) -> bool {
    match execute!(out, DisableFocusChange) {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "could not disable focus reporting");
            false
        }
    }
}

/// Enable focus reporting and run the app until it quits.
fn run(terminal: &mut DefaultTerminal, config: Config) -> color_eyre::Result<()> {
    execute!(stdout(), EnableFocusChange)?;
    let size = terminal.size()?;
    App::new(config, size.width, size.height).run(terminal)
}

/// The main application which holds the state and logic of the application.
pub struct App {
    /// Is the application running?
    running: bool,
    /// Loaded configuration, written back when the theme or mode changes.
    config: Config,
    /// The particle field, absent if the surface could not be attached.
    field: Option<FieldController>,
    /// Frame count at the last terminal draw.
    drawn_frames: u64,
    /// Force a terminal draw on the next iteration.
    dirty: bool,
}

impl App {
    /// Construct a new instance of [`App`] for a terminal of the given size.
    pub fn new(config: Config, columns: u16, rows: u16) -> Self {
        let document = TerminalDocument::new(config.clone(), columns, rows);
        let surface = CanvasSurface::new(
            parse_color(&config.backdrop),
            config.cell_width,
            config.cell_height,
        );
        let field = Controller::attach(
            document,
            Some(surface),
            TerminalScheduler::new(),
            StdRng::from_os_rng(),
        );
        if field.is_none() {
            warn!("particle field unavailable");
        }

        Self {
            running: false,
            config,
            field,
            drawn_frames: 0,
            dirty: true,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            if self.needs_draw() {
                terminal.draw(|frame| self.render(frame))?;
                self.dirty = false;
                self.drawn_frames = self.field.as_ref().map_or(0, |f| f.frames_drawn());
            }
            self.handle_crossterm_events()?;
            self.fire_due_callbacks();
        }
        Ok(())
    }

    fn needs_draw(&self) -> bool {
        self.dirty
            || self
                .field
                .as_ref()
                .is_some_and(|f| f.frames_drawn() != self.drawn_frames)
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let color: Color = self
            .field
            .as_ref()
            .map_or(Rgb::default(), |f| f.palette().colors()[0])
            .into();

        if let Some(field) = &self.field {
            field.surface().render(frame, area);
        }

        let [_, status_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
            .areas(area);

        let status = match &self.field {
            Some(field) => format!(
                " {} · {} · {} particles   ",
                field.document().theme(),
                field.mode().label(),
                field.particles().len()
            ),
            None => " particle field unavailable   ".to_string(),
        };

        let help = Line::from(vec![
            status.fg(color),
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "t".bold().fg(color),
            " cycle theme  ".dark_gray(),
            "m".bold().fg(color),
            " cycle motion".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, status_area);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits no longer than the next scheduled frame or timer.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let timeout = self
            .field
            .as_ref()
            .and_then(|f| f.scheduler().next_deadline())
            .map_or(IDLE_POLL, |at| {
                at.saturating_duration_since(Instant::now()).min(IDLE_POLL)
            });

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(columns, rows) => self.on_resize(columns, rows),
                Event::FocusLost => self.on_focus_change(false),
                Event::FocusGained => self.on_focus_change(true),
                _ => {}
            }
        }
        Ok(())
    }

    /// Deliver every frame and timer callback that is due.
    fn fire_due_callbacks(&mut self) {
        let Some(field) = self.field.as_mut() else {
            return;
        };
        let now = Instant::now();
        for timer in field.scheduler_mut().take_due_timers(now) {
            field.on_timer(timer);
        }
        if let Some(handle) = field.scheduler_mut().take_due_frame(now) {
            field.on_frame(handle);
        }
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('t')) => self.cycle_theme(),
            (_, KeyCode::Char('m')) => self.cycle_motion(),
            _ => {}
        }
    }

    fn on_resize(&mut self, columns: u16, rows: u16) {
        if let Some(field) = self.field.as_mut() {
            field.document_mut().set_size(columns, rows);
            field.on_resize();
        }
        self.dirty = true;
    }

    fn on_focus_change(&mut self, visible: bool) {
        if let Some(field) = self.field.as_mut() {
            field.document_mut().set_hidden(!visible);
            field.on_visibility_change();
        }
        self.dirty = true;
    }

    /// Cycle through the built-in themes.
    fn cycle_theme(&mut self) {
        let Some(field) = self.field.as_mut() else {
            return;
        };
        let next = Theme::from_name(field.document().theme())
            .unwrap_or_default()
            .next();
        field.document_mut().set_theme(next.name());
        field.on_attributes_changed(&[THEME_ATTRIBUTE]);
        info!(theme = next.name(), "theme changed");

        self.config.theme = next.name().to_string();
        self.save_config();
        self.dirty = true;
    }

    /// Cycle the motion override. The override is only read when the field
    /// attaches, so the field is re-attached with the new value.
    fn cycle_motion(&mut self) {
        let Some(field) = self.field.take() else {
            return;
        };
        let (mut document, surface, scheduler, rng) = field.detach();
        let mode = document.mode().next();
        document.set_mode(mode);
        self.field = Controller::attach(document, Some(surface), scheduler, rng);
        info!(?mode, "motion override changed");

        self.config.mode = mode;
        self.save_config();
        self.dirty = true;
    }

    fn save_config(&self) {
        if let Err(e) = self.config.save() {
            warn!(error = %e, "could not save config");
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A writer whose every write fails.
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn test_disable_focus_reporting() {
        let mut out = Vec::new();
        assert!(disable_focus_reporting(&mut out));
        assert!(!out.is_empty());
    }

    #[test]
    fn test_disable_focus_reporting_failure_is_not_fatal() {
        assert!(!disable_focus_reporting(&mut BrokenPipe));
    }
}
