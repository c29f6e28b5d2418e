use std::io::stdout;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
};
use glimmer_background::{
    BackgroundSettings, BackgroundState, CellMetrics, ElementGenerator, EventHub, GenerateError,
    HostEvent, Viewport,
};
use glimmer_config::{Config, ConfigError};
use glimmer_core::GlyphColor;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use tracing::{info, warn};

mod cli;
mod logging;

use cli::Args;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    if let Some(path) = logging::log_path(args.log_file.as_deref()) {
        logging::init(&path)?;
    }

    let mut config = load_config(&args)?;
    args.apply(&mut config);
    config.validate()?;
    if args.save_config {
        match &args.config {
            Some(path) => config.save_to(path)?,
            None => {
                config.save()?;
            }
        }
    }

    // Mount before touching the terminal so configuration errors print normally
    let app = App::new(config)?;

    let terminal = ratatui::init();
    if let Err(e) = execute!(stdout(), EnableMouseCapture) {
        warn!(error = %e, "mouse capture unavailable, pointer parallax disabled");
    }
    let result = app.run(terminal);
    let _ = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

fn load_config(args: &Args) -> Result<Config, ConfigError> {
    match &args.config {
        Some(path) => Config::load_from(path),
        None => match Config::load() {
            Err(ConfigError::NoConfigDir) => Ok(Config::default()),
            other => other,
        },
    }
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    /// Host event fan-out the background listens on.
    hub: EventHub,
    background: BackgroundState,
    /// Number of remounts so far, mixed into a fixed seed.
    generation: u64,
    /// Virtual page scroll in pixels.
    scroll_px: f32,
    /// Wall time since the loop started, in milliseconds.
    elapsed_ms: u64,
    /// Terminal size at the last draw, in cells.
    viewport: (u16, u16),
}

impl App {
    /// Construct a new instance of [`App`] with a mounted, active background.
    pub fn new(config: Config) -> Result<Self, GenerateError> {
        let hub = EventHub::new();
        let mut background = mount_background(&config, 0)?;
        background.activate(&hub);
        Ok(Self {
            running: false,
            config,
            hub,
            background,
            generation: 0,
            scroll_px: 0.0,
            elapsed_ms: 0,
            viewport: (0, 0),
        })
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        let started = Instant::now();
        while self.running {
            self.elapsed_ms = started.elapsed().as_millis() as u64;
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        self.background.deactivate();
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.viewport = (area.width, area.height);

        self.background.render(frame, self.elapsed_ms);

        // Greeting sits mid-page and scrolls with it
        let cell_height = self.config.cell_height_px;
        let row = area.height as f32 / 2.0 - self.scroll_px / cell_height;
        if row >= 0.0 && row < area.height.saturating_sub(1) as f32 {
            let greeting = Paragraph::new(self.config.greeting.as_str())
                .style(Style::new().fg(GlyphColor::Rose.color()).bold())
                .alignment(Alignment::Center);
            frame.render_widget(greeting, Rect::new(area.x, area.y + row as u16, area.width, 1));
        }

        if area.height == 0 {
            return;
        }
        let settings = self.background.settings();
        let help = Line::from(vec![
            "q".bold(),
            " quit  ".dark_gray(),
            "r".bold(),
            " reseed  ".dark_gray(),
            "s".bold(),
            Span::from(format!(" speed: {}  ", settings.speed)).dark_gray(),
            "a".bold(),
            " orbs  ".dark_gray(),
            "space".bold(),
            (if self.background.is_paused() {
                " resume  "
            } else {
                " pause  "
            })
            .dark_gray(),
            "↑↓".bold(),
            " scroll".dark_gray(),
        ])
        .centered();
        let help_area = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
        frame.render_widget(help, help_area);
    }

    /// Reads the crossterm events and forwards them to the background.
    /// Polls with the frame interval as timeout so animation keeps running.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(Duration::from_millis(self.config.frame_interval_ms))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        let step = self.config.scroll_step_px;
        let page = self.viewport.1 as f32 * self.config.cell_height_px;
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('r')) => self.reseed(),
            (_, KeyCode::Char('s')) => self.cycle_speed(),
            (_, KeyCode::Char('a')) => self.toggle_ambient(),
            (_, KeyCode::Char(' ')) => self.toggle_pause(),
            (_, KeyCode::Up | KeyCode::Char('k')) => self.scroll_to(self.scroll_px - step),
            (_, KeyCode::Down | KeyCode::Char('j')) => self.scroll_to(self.scroll_px + step),
            (_, KeyCode::PageUp) => self.scroll_to(self.scroll_px - page),
            (_, KeyCode::PageDown) => self.scroll_to(self.scroll_px + page),
            (_, KeyCode::Home) => self.scroll_to(0.0),
            (_, KeyCode::End) => self.scroll_to(self.config.max_scroll_px),
            _ => {}
        }
    }

    /// Translates mouse movement into pointer events and the wheel into scroll.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        let step = self.config.scroll_step_px;
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let (width, height) = self.viewport;
                self.hub.dispatch(&HostEvent::PointerMoved {
                    x: mouse.column as f32 + 0.5,
                    y: mouse.row as f32 + 0.5,
                    viewport: Viewport::new(width as f32, height as f32),
                });
            }
            MouseEventKind::ScrollDown => self.scroll_to(self.scroll_px + step),
            MouseEventKind::ScrollUp => self.scroll_to(self.scroll_px - step),
            _ => {}
        }
    }

    /// Move the virtual page and notify the background.
    fn scroll_to(&mut self, offset: f32) {
        let offset = offset.clamp(0.0, self.config.max_scroll_px);
        if offset != self.scroll_px {
            self.scroll_px = offset;
            self.hub.dispatch(&HostEvent::Scrolled { offset });
        }
    }

    /// Remount the background with a fresh layout.
    fn reseed(&mut self) {
        let generation = self.generation + 1;
        match mount_background(&self.config, generation) {
            Ok(mut background) => {
                // Old listeners go before the new background subscribes
                self.background.deactivate();
                background.set_speed(self.background.settings().speed);
                background.set_show_ambient(self.background.settings().show_ambient);
                background.set_paused(self.background.is_paused());
                background.activate(&self.hub);
                self.background = background;
                self.generation = generation;
                self.scroll_px = 0.0;
                info!(generation, "background reseeded");
            }
            Err(e) => warn!(error = %e, "reseed failed, keeping current background"),
        }
    }

    /// Cycle through the animation speeds.
    fn cycle_speed(&mut self) {
        let speed = self.background.settings().speed.next();
        self.background.set_speed(speed);
    }

    /// Show or hide the ambient orbs.
    fn toggle_ambient(&mut self) {
        let show = !self.background.settings().show_ambient;
        self.background.set_show_ambient(show);
    }

    /// Freeze or resume the animation clock.
    fn toggle_pause(&mut self) {
        let paused = !self.background.is_paused();
        self.background.set_paused(paused);
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

/// Mount a background for `config`. A fixed seed is offset by the remount
/// generation so reseeding still changes the layout.
fn mount_background(config: &Config, generation: u64) -> Result<BackgroundState, GenerateError> {
    let settings = BackgroundSettings {
        element_count: config.element_count,
        speed: config.speed,
        pointer_smoothing: config.pointer_smoothing,
        show_ambient: config.show_ambient,
        cell_metrics: CellMetrics {
            width_px: config.cell_width_px,
            height_px: config.cell_height_px,
        },
    };
    match config.seed {
        Some(seed) => {
            let mut generator = ElementGenerator::from_seed(seed.wrapping_add(generation));
            BackgroundState::mount(settings, &mut generator)
        }
        None => BackgroundState::mount(settings, &mut ElementGenerator::from_entropy()),
    }
}
