pub mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use letter_twins::{
    celebration::Celebration,
    config::{Config, ConfigStore, FileConfigStore},
    layout::{board_slots, hit_test},
    logging::init_file_logging,
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, GameEventSource, Runner, Ticker},
    Difficulty, GameController, Letter, Phase,
};
use rand::seq::SliceRandom;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    style::Color,
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing::info;

const TICK_RATE_MS: u64 = 50;

/// Colours a glyph may be drawn in. Purely cosmetic.
const GLYPH_COLORS: [Color; 8] = [
    Color::LightRed,
    Color::LightGreen,
    Color::LightYellow,
    Color::LightBlue,
    Color::LightMagenta,
    Color::LightCyan,
    Color::Rgb(255, 165, 0),
    Color::White,
];

/// find the letter hiding in both circles
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Two circles of letters, one letter hiding in both. Type it or click it to earn stars."
)]
pub struct Cli {
    /// start straight at this difficulty instead of showing the menu
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// seed for round generation (same seed, same rounds)
    #[clap(long)]
    seed: Option<u64>,

    /// show which letter to look for
    #[clap(long)]
    hints: bool,

    /// path to a JSON config file (defaults to the platform config dir)
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// save the effective settings to the config file and continue
    #[clap(long)]
    write_config: bool,

    /// append diagnostic logs to this file (filter with RUST_LOG)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply command-line overrides on top of the stored config
    fn merge_into(&self, mut config: Config) -> Config {
        if self.difficulty.is_some() {
            config.difficulty = self.difficulty;
        }
        if self.hints {
            config.show_hints = true;
        }
        config
    }

    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub controller: GameController,
    pub celebration: Celebration,
    pub show_hints: bool,
    /// Cosmetic colour per glyph, in circle A then circle B order
    pub glyph_colors: Vec<Color>,
    pub spinner_frame: usize,
    styled_generation: Option<u64>,
}

impl App {
    pub fn new(controller: GameController, show_hints: bool) -> Self {
        Self {
            controller,
            celebration: Celebration::new(),
            show_hints,
            glyph_colors: Vec::new(),
            spinner_frame: 0,
            styled_generation: None,
        }
    }

    pub fn from_config(config: &Config, seed: Option<u64>) -> Self {
        let controller = match seed {
            Some(seed) => GameController::seeded(config.timing(), seed),
            None => GameController::new(config.timing()),
        };
        let mut app = Self::new(controller, config.show_hints);
        if let Some(tier) = config.difficulty {
            app.controller.select_difficulty(tier);
        }
        app
    }

    pub fn phase(&self) -> Phase {
        self.controller.session().phase()
    }

    /// Advance timers and animations by `dt`.
    pub fn on_tick(&mut self, dt: Duration) {
        self.controller.advance(dt);
        self.spinner_frame = self.spinner_frame.wrapping_add(1);

        if self.phase() == Phase::RoundResolvedCorrect {
            self.celebration.update(dt.as_secs_f64());
        } else if self.celebration.is_active {
            self.celebration.stop();
        }

        self.restyle_if_new_round();
    }

    fn restyle_if_new_round(&mut self) {
        let session = self.controller.session();
        let Some(round) = session.round() else {
            return;
        };
        if self.styled_generation == Some(session.generation()) {
            return;
        }

        let mut rng = rand::thread_rng();
        let count = round.letters_per_circle() * 2;
        self.glyph_colors = (0..count)
            .map(|_| *GLYPH_COLORS.choose(&mut rng).unwrap_or(&Color::White))
            .collect();
        self.styled_generation = Some(session.generation());
    }

    /// Submit a letter, starting the star burst on a match.
    pub fn on_letter(&mut self, letter: Letter, area: Rect) -> bool {
        let matched = self.controller.submit_letter_click(letter);
        if matched {
            let stars = self.controller.session().stars();
            self.celebration.start(stars, area.width, area.height);
        }
        matched
    }

    pub fn on_click(&mut self, column: u16, row: u16, area: Rect) -> Option<bool> {
        let round = self.controller.session().round()?;
        let slots = board_slots(area, round);
        let letter = hit_test(&slots, column, row)?;
        Some(self.on_letter(letter, area))
    }

    pub fn on_key(&mut self, key: KeyEvent, area: Rect) -> Control {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Control::Quit;
        }

        match self.phase() {
            Phase::MenuSelection => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => return Control::Quit,
                KeyCode::Char(c) => {
                    if let Some(tier) = Difficulty::from_key(c) {
                        self.controller.select_difficulty(tier);
                    }
                }
                _ => {}
            },
            _ => match key.code {
                KeyCode::Esc => {
                    self.celebration.stop();
                    self.controller.return_to_menu();
                }
                // Letters are answers, so only digits switch tier mid-game.
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    if let Some(tier) = Difficulty::from_key(c) {
                        self.celebration.stop();
                        self.controller.select_difficulty(tier);
                    }
                }
                // Only letters shown on the board act as clicks.
                KeyCode::Char(c) => {
                    let shown = Letter::new(c).filter(|letter| {
                        let round = self.controller.session().round();
                        round.is_some_and(|r| r.contains(*letter))
                    });
                    if let Some(letter) = shown {
                        self.on_letter(letter, area);
                    }
                }
                _ => {}
            },
        }

        Control::Continue
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_file_logging(path)?;
    }

    let store = cli.config_store();
    let config = cli.merge_into(store.load());
    if cli.write_config {
        store.save(&config)?;
        info!(path = %store.path().display(), "config written");
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::from_config(&config, cli.seed);
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!(score = app.controller.session().score(), "session ended");
    result
}

fn start_tui<B: Backend, E: GameEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    let mut last = Instant::now();
    terminal.draw(|f| ui(app, f))?;

    loop {
        let event = runner.step();

        // Timers advance on every event so key spam cannot starve them.
        let now = Instant::now();
        app.on_tick(now - last);
        last = now;

        let size = terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);

        match event {
            GameEvent::Key(key) => {
                if app.on_key(key, area) == Control::Quit {
                    break;
                }
            }
            GameEvent::Click { column, row } => {
                app.on_click(column, row, area);
            }
            GameEvent::Resize | GameEvent::Tick => {}
        }

        terminal.draw(|f| ui(app, f))?;
    }

    Ok(())
}

fn ui(app: &mut App, f: &mut Frame) {
    let screen = crate::ui::screen::current_screen(app.phase());
    screen.render(app, f);
}
