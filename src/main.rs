use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tracing_subscriber::EnvFilter;

use healthiq::app::{App, View};
use healthiq::source::{FileSource, IntakeSource, ManualSource};
use healthiq::ui::{self, Theme};
use healthiq::{events, Settings};

#[derive(Parser, Debug)]
#[command(name = "healthiq")]
#[command(about = "Terminal dashboard for personal health metrics")]
struct Args {
    /// Path to a JSON readings file, polled for changes.
    /// Without it the dashboard starts from the default readings.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Settings file (TOML). Defaults to healthiq.toml if present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Refresh interval in seconds (only used with --file)
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Seed for the random sample week
    #[arg(long)]
    seed: Option<u64>,

    /// Use the 30-day monthly pattern instead of a random week
    #[arg(long)]
    monthly: bool,

    /// Color theme: auto, dark or light
    #[arg(long, default_value = "auto")]
    theme: String,

    /// Write logs to this file (the TUI owns the terminal otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Export the series to a CSV file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Export alerts, advice and summary to a JSON file and exit
    #[arg(long)]
    report: Option<PathBuf>,
}

impl Args {
    fn is_interactive(&self) -> bool {
        self.export.is_none() && self.report.is_none()
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_deref(), args.is_interactive())?;

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(refresh) = args.refresh {
        settings.refresh_secs = refresh;
    }
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    settings.monthly |= args.monthly;

    let source: Box<dyn IntakeSource> = match args.file {
        Some(ref path) => Box::new(FileSource::new(path)),
        None => Box::new(ManualSource::new(settings.ranges.defaults().into())),
    };

    // Handle export mode (non-interactive)
    if !args.is_interactive() {
        return export_to_files(source, settings, &args);
    }

    let theme = Theme::named(&args.theme)
        .with_context(|| format!("unknown theme '{}'", args.theme))?;
    let refresh = Duration::from_secs(settings.refresh_secs.max(1));
    run_tui(source, settings, theme, refresh)
}

/// Install the tracing subscriber.
///
/// Interactive runs only log when a log file is given so output does not
/// tear the TUI.
fn init_tracing(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if !interactive => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
        None => {}
    }
    Ok(())
}

/// Run the TUI with the given intake source
fn run_tui(
    source: Box<dyn IntakeSource>,
    settings: Settings,
    theme: Theme,
    refresh_interval: Duration,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let mut app = App::with_theme(source, settings, theme);
    let _ = app.reload_data();

    let result = run_app(&mut terminal, &mut app, refresh_interval);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 14;

    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(
                    0,
                    (area.height / 2).saturating_sub(2),
                    area.width,
                    5.min(area.height),
                );
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(10),   // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::common::render_tabs(frame, app, chunks[1]);

            match app.current_view {
                View::Dashboard => ui::dashboard::render(frame, app, chunks[2]),
                View::Nutrition => ui::nutrition::render(frame, app, chunks[2]),
                View::Report => ui::report::render(frame, app, chunks[2]),
            }

            ui::common::render_status_bar(frame, app, chunks[3]);

            if app.show_detail_overlay {
                ui::detail::render_overlay(frame, app, area);
            }

            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                // Content starts after header (1) + tabs (1)
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse, 2),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        if last_refresh.elapsed() >= refresh_interval {
            let _ = app.reload_data();
            last_refresh = Instant::now();
        }
    }

    Ok(())
}

/// Evaluate once and write the requested exports.
fn export_to_files(source: Box<dyn IntakeSource>, settings: Settings, args: &Args) -> Result<()> {
    let mut app = App::with_theme(source, settings, Theme::dark());
    app.reload_data()?;
    if let Some(ref err) = app.load_error {
        anyhow::bail!("{}: {}", app.source_description(), err);
    }

    if let Some(ref path) = args.export {
        let rows = app.export_rows(path)?;
        println!("Exported {} rows to: {}", rows, path.display());
    }

    if let Some(ref path) = args.report {
        app.export_report(path)?;
        println!("Exported report to: {}", path.display());
    }

    Ok(())
}
