// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

mod app;
mod data;
mod events;
mod settings;
mod source;
mod ui;

use app::App;
use settings::Settings;
use source::{ApiSource, FileSource, MetricSource};

#[derive(Parser, Debug)]
#[command(name = "probewatch")]
#[command(about = "Terminal dashboard for monitoring probe node telemetry")]
struct Args {
    /// Controller base URL (e.g. http://127.0.0.1:8080)
    #[arg(short, long, conflicts_with = "file")]
    url: Option<String>,

    /// Replay a captured /api/nodes JSON payload instead of polling
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Optional TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds between metric polls for the selected probe
    #[arg(long)]
    detail_interval: Option<u64>,

    /// Seconds between node discovery polls
    #[arg(long)]
    discovery_interval: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(url) = args.url {
        settings.controller_url = url;
    }
    if let Some(secs) = args.detail_interval {
        settings.detail_interval_secs = secs;
    }
    if let Some(secs) = args.discovery_interval {
        settings.discovery_interval_secs = secs;
    }

    let source: Box<dyn MetricSource> = match args.file {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(ApiSource::connect(
            &settings.controller_url,
            settings.request_timeout(),
        )?),
    };

    run_tui(source, &settings)
}

/// Run the TUI with the given data source
fn run_tui(source: Box<dyn MetricSource>, settings: &Settings) -> Result<()> {
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
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    // Create the app and issue the initial node fetch
    let mut app = App::new(source, settings.poll());
    app.start();

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

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

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 72;
    const MIN_HEIGHT: u16 = 14;

    while app.running {
        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered =
                    ratatui::layout::Rect::new(0, area.height.saturating_sub(4) / 2, area.width, 5);
                frame.render_widget(paragraph, centered);
                return;
            }

            ui::render(frame, app);
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    let screen = ratatui::layout::Rect::new(0, 0, size.width, size.height);
                    events::handle_mouse_event(app, mouse, ui::node_panel_area(screen));
                }
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Service the polling loops
        app.tick();
    }

    Ok(())
}
