//! eqplot - plot equations in the terminal.

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use eqplot::app::{App, BrowseMode};
use eqplot::config::GraphConfig;
use eqplot::graph::{GraphModel, Range};
use eqplot::ui;
use eqplot::ui::formatters::color_hex;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "eqplot")]
#[command(about = "Plot y = f(x) equations in the terminal", long_about = None)]
struct Args {
    /// Equation file to load, one expression in x per line
    file: Option<PathBuf>,

    /// Equation file to append after FILE (repeatable)
    #[arg(long, value_name = "FILE")]
    append: Vec<PathBuf>,

    /// Initial x range
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
    range: Option<Vec<f64>>,

    /// Sample intervals per unit of step multiplier
    #[arg(long, value_name = "N")]
    samples: Option<usize>,

    /// Step multiplier for loaded equations
    #[arg(long, value_name = "M")]
    step_multiplier: Option<f64>,

    /// Print the sampled series and exit
    #[arg(long)]
    print: bool,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> Result<GraphConfig> {
        let mut config = GraphConfig::default();
        if let Some(ref range) = self.range {
            let (left, right) = (range[0], range[1]);
            Range::new(left, right)?;
            config.view.default_range = (left, right);
        }
        if let Some(samples) = self.samples {
            if samples == 0 {
                bail!("--samples must be at least 1");
            }
            config.sampling.base_samples = samples;
        }
        if let Some(mult) = self.step_multiplier {
            if !(mult.is_finite() && mult > 0.0) {
                bail!("--step-multiplier must be a positive number");
            }
            config.sampling.step_multiplier = mult;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        let log_path = log_path.clone();
        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting eqplot");
    } else if args.print {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    let config = args.config()?;

    if args.print {
        return print_series(&args, &config);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let mut app = App::new(config);
    if let Some(ref path) = args.file {
        app.load_file(path.clone());
    }
    for path in &args.append {
        if app.error_message.is_some() {
            break;
        }
        app.append_file(path.clone());
    }
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    if args.log.is_some() {
        tracing::info!("eqplot exited");
    }

    Ok(())
}

/// Headless mode: one tab-separated line per series.
fn print_series(args: &Args, config: &GraphConfig) -> Result<()> {
    let mut model = GraphModel::new(config);
    if let Some(ref path) = args.file {
        model.load_from_file(path)?;
    }
    for path in &args.append {
        model.append_from_file(path)?;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for series in model.series() {
        let (lo, hi) = match series.y_bounds() {
            Some((lo, hi)) => (lo.to_string(), hi.to_string()),
            None => ("-".to_string(), "-".to_string()),
        };
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            series.label,
            color_hex(series.color),
            series.points.len(),
            lo,
            hi
        )?;
    }
    for failure in model.synchronizer().failures() {
        eprintln!("warning: {}", failure);
    }
    Ok(())
}

/// Returns `true` when the app should quit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    // File browser mode
    if app.browse_mode.is_some() {
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return true,
            (KeyModifiers::NONE, KeyCode::Esc) => app.close_browser(),

            // Navigation
            (KeyModifiers::NONE, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => {
                app.file_browser.cursor_up();
            },
            (KeyModifiers::NONE, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => {
                app.file_browser.cursor_down();
            },

            // Select/Open
            (KeyModifiers::NONE, KeyCode::Enter)
            | (KeyModifiers::NONE, KeyCode::Char('l'))
            | (KeyModifiers::NONE, KeyCode::Right) => {
                app.browser_select();
            },

            // Go to parent directory
            (KeyModifiers::NONE, KeyCode::Char('h'))
            | (KeyModifiers::NONE, KeyCode::Left)
            | (KeyModifiers::NONE, KeyCode::Backspace) => {
                app.file_browser.go_to_parent();
            },

            _ => {},
        }
        return false;
    }

    let pan = app.config.view.pan_fraction;
    match (key.modifiers, key.code) {
        // Quit
        (KeyModifiers::NONE, KeyCode::Char('q')) => return true,

        // Files
        (KeyModifiers::NONE, KeyCode::Char('o')) => app.open_browser(BrowseMode::Load),
        (KeyModifiers::NONE, KeyCode::Char('a')) => app.open_browser(BrowseMode::Append),

        // Range
        (KeyModifiers::NONE, KeyCode::Left) | (KeyModifiers::NONE, KeyCode::Char('h')) => {
            app.pan(-pan);
        },
        (KeyModifiers::NONE, KeyCode::Right) | (KeyModifiers::NONE, KeyCode::Char('l')) => {
            app.pan(pan);
        },
        (_, KeyCode::Char('+')) | (KeyModifiers::NONE, KeyCode::Char('=')) => {
            app.zoom(true, None);
        },
        (KeyModifiers::NONE, KeyCode::Char('-')) => app.zoom(false, None),
        (KeyModifiers::NONE, KeyCode::Char('0')) => app.reset_range(),
        (KeyModifiers::NONE, KeyCode::Char('r')) => app.refresh(),

        // Equations
        (KeyModifiers::NONE, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => {
            app.legend_up();
        },
        (KeyModifiers::NONE, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => {
            app.legend_down();
        },
        (KeyModifiers::NONE, KeyCode::Char(' ')) => app.toggle_selected(),
        (KeyModifiers::NONE, KeyCode::Char('x')) => app.remove_selected(),

        // Points
        (KeyModifiers::NONE, KeyCode::Char('[')) => app.move_probe(-1),
        (KeyModifiers::NONE, KeyCode::Char(']')) => app.move_probe(1),
        (KeyModifiers::NONE, KeyCode::Char('y')) => app.copy_selection(),

        (KeyModifiers::SHIFT, KeyCode::Char('T')) => app.cycle_theme(),

        _ => {},
    }
    false
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.browse_mode.is_some() {
        return;
    }
    let (column, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Moved => app.mouse_moved(column, row),
        MouseEventKind::Down(MouseButton::Left) => app.mouse_down(column, row),
        MouseEventKind::Drag(MouseButton::Left) => app.mouse_dragged(column, row),
        MouseEventKind::Up(MouseButton::Left) => app.mouse_up(column, row),
        MouseEventKind::ScrollUp => app.scroll(column, row, true),
        MouseEventKind::ScrollDown => app.scroll(column, row, false),
        _ => {},
    }
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key(&mut app, key) {
                        return Ok(());
                    }
                },
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
                _ => {},
            }
        }
    }
}
