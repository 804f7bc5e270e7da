pub mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{
        DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, KeyCode,
        KeyEvent, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use kitty_match::{
    config::{Config, ConfigStore, FileConfigStore},
    error::{AppError, Result as AppResult},
    image_loader::{HttpImageLoader, ImageLoader, NullImageLoader},
    logging,
    runtime::{
        CellSize, CrosstermEventSource, FixedTicker, PointerEvent, PointerKind, Runner,
        SwipeEvent, SwipeEventSource, Ticker,
    },
    swipe::SwipeSession,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin, Stdout},
    path::PathBuf,
    time::Duration,
};
use webbrowser::Browser;

use crate::ui::layout::{hit, summary_layout, swipe_layout};

const TICK_RATE_MS: u64 = 100;

/// swipe through cat pictures in your terminal
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    version,
    about,
    long_about = "Drag each cat card right to like it or left to pass (or use the arrow keys), then see all your matches at the end."
)]
pub struct Cli {
    /// horizontal drag distance needed to like or pass (one column is 10 units by default)
    #[clap(short = 't', long)]
    threshold: Option<f64>,

    /// base URL of the image service
    #[clap(long)]
    base_url: Option<String>,

    /// requested image width
    #[clap(long)]
    width: Option<u32>,

    /// requested image height
    #[clap(long)]
    height: Option<u32>,

    /// don't fetch images; cards stay on their placeholder
    #[clap(long)]
    no_images: bool,

    /// config file to read (and write with --save-config)
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// write the effective settings back to the config file
    #[clap(long)]
    save_config: bool,

    /// log file location
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Layer command line overrides on top of the config file
    fn apply(&self, config: &mut Config) {
        if let Some(t) = self.threshold {
            config.swipe_threshold = t;
        }
        if let Some(url) = &self.base_url {
            config.image_base_url = url.clone();
        }
        if let Some(w) = self.width {
            config.image_width = w;
        }
        if let Some(h) = self.height {
            config.image_height = h;
        }
        if self.no_images {
            config.load_images = false;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppState {
    Swiping,
    Summary,
    Help,
}

pub struct App {
    pub session: SwipeSession,
    pub cell: CellSize,
    pub show_help: bool,
    /// One-shot status message for the footer
    pub info: Option<String>,
}

impl App {
    pub fn new(session: SwipeSession, cell: CellSize) -> Self {
        Self {
            session,
            cell,
            show_help: false,
            info: None,
        }
    }

    pub fn state(&self) -> AppState {
        if self.show_help {
            AppState::Help
        } else if self.session.has_ended() {
            AppState::Summary
        } else {
            AppState::Swiping
        }
    }

    /// Apply one event. Returns true when the app should quit.
    pub fn on_event(&mut self, ev: SwipeEvent, area: Rect) -> bool {
        match ev {
            SwipeEvent::Key(key) => return self.on_key(key),
            SwipeEvent::Pointer(p) => self.on_pointer(p, area),
            // Leaving the terminal mid-drag releases the card.
            SwipeEvent::FocusLost => {
                self.session.end_gesture();
            }
            SwipeEvent::ImageReady(key) => {
                self.session.on_image_ready(key);
            }
            SwipeEvent::Resize | SwipeEvent::Tick => {}
        }
        false
    }

    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        self.info = None;

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Char('q')) => return true,
            (_, KeyCode::Esc) => {
                if !self.show_help {
                    return true;
                }
                self.show_help = false;
            }
            (_, KeyCode::Char('?')) => self.show_help = !self.show_help,
            (_, KeyCode::Char('r')) => self.restart(),
            (_, KeyCode::Char('o')) => self.open_in_browser(),
            (_, code) => match self.state() {
                AppState::Swiping => match code {
                    KeyCode::Left | KeyCode::Char('h') => {
                        self.session.dislike();
                    }
                    KeyCode::Right | KeyCode::Char('l') => {
                        self.session.like();
                    }
                    _ => {}
                },
                AppState::Summary => {
                    if code == KeyCode::Enter {
                        self.restart();
                    }
                }
                AppState::Help => {}
            },
        }
        false
    }

    pub fn on_pointer(&mut self, p: PointerEvent, area: Rect) {
        match p.kind {
            PointerKind::Down => match self.state() {
                AppState::Swiping => {
                    let layout = swipe_layout(area);
                    if hit(layout.nope_button, p.column, p.row) {
                        self.session.dislike();
                    } else if hit(layout.like_button, p.column, p.row) {
                        self.session.like();
                    } else if hit(layout.card, p.column, p.row) {
                        self.session.begin_gesture(p.point);
                    }
                }
                AppState::Summary => {
                    if hit(summary_layout(area).restart_button, p.column, p.row) {
                        self.restart();
                    }
                }
                AppState::Help => self.show_help = false,
            },
            PointerKind::Move => {
                self.session.update_gesture(p.point);
            }
            PointerKind::Up => {
                self.session.end_gesture();
            }
        }
    }

    fn restart(&mut self) {
        self.show_help = false;
        self.session.restart();
    }

    fn open_in_browser(&mut self) {
        let locator = if self.session.has_ended() {
            self.session.liked().last().map(|c| c.locator.clone())
        } else {
            self.session.current().map(|c| c.locator.clone())
        };
        let Some(locator) = locator else {
            self.info = Some("Nothing to open yet".into());
            return;
        };
        if !Browser::is_available() {
            self.info = Some("No browser available".into());
            return;
        }
        if let Err(e) = webbrowser::open(&locator) {
            tracing::warn!(error = %e, %locator, "could not open browser");
            self.info = Some(format!("Could not open browser: {e}"));
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = cli
        .config
        .as_ref()
        .map(FileConfigStore::with_path)
        .unwrap_or_default();
    let mut config = store.load();
    cli.apply(&mut config);

    let log_path = logging::init_tracing(config.log_level.as_deref(), cli.log_file.as_deref());
    // After logging is up so a bad --threshold is reported.
    config.validate();
    tracing::info!(
        log = ?log_path,
        config = %store.path().display(),
        threshold = config.swipe_threshold,
        "starting kitty-match"
    );

    if cli.save_config {
        store.save(&config)?;
    }

    let events = CrosstermEventSource::new(config.cell_size());
    let loader: Box<dyn ImageLoader> = if config.load_images {
        Box::new(HttpImageLoader::new(events.sender(), config.request_timeout())?)
    } else {
        Box::new(NullImageLoader)
    };
    let mut app = App::new(
        SwipeSession::new(config.session_config(), loader),
        config.cell_size(),
    );
    let runner = Runner::new(events, FixedTicker::new(Duration::from_millis(TICK_RATE_MS)));

    let mut terminal = setup_terminal()?;
    let res = start_tui(&mut terminal, &mut app, &runner);
    restore_terminal(&mut terminal)?;

    res
}

fn setup_terminal() -> AppResult<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().map_err(AppError::terminal)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)
        .map_err(AppError::terminal)?;
    Terminal::new(CrosstermBackend::new(stdout)).map_err(AppError::terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> AppResult<()> {
    disable_raw_mode().map_err(AppError::terminal)?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen,
    )
    .map_err(AppError::terminal)?;
    terminal.show_cursor().map_err(AppError::terminal)
}

fn start_tui<B: Backend, E: SwipeEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui(app, f))?;

        let size = terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        if app.on_event(runner.step(), area) {
            break;
        }
    }
    tracing::info!(
        decided = app.session.position(),
        liked = app.session.liked().len(),
        "quitting"
    );

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    ui::screen::current_screen(app.state()).render(app, f);
}
