//! CLI entry point and command definitions.

use crate::alert;
use crate::catalog::{Catalog, Category, CategorySettings};
use crate::session::{Session, DEFAULT_ROUND_MINUTES};
use crate::ticker::{Tick, Ticker};
use crate::ui::{self, App};
use anyhow::Result;
use clap::{Parser, Subcommand};
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    terminal::{
        disable_raw_mode, enable_raw_mode, BeginSynchronizedUpdate, EndSynchronizedUpdate,
        EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use rand::Rng;
use ratatui::prelude::*;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Terminal charades: draw a random title and race the round clock.
#[derive(Parser)]
#[command(name = "charades")]
#[command(version = "0.1.0")]
#[command(about = "Terminal charades: draw a random title and race the round clock")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start a game (the default when no command is given)
    Play {
        /// Path to a catalog file ([category] sections, one title per line)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Round length in minutes
        #[arg(long, default_value_t = DEFAULT_ROUND_MINUTES)]
        minutes: u32,
    },
    /// Print one random eligible title and exit
    Pick {
        /// Path to a catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Restrict the draw to these categories (repeatable)
        #[arg(short, long)]
        category: Vec<String>,
    },
    /// Print the catalog
    List {
        /// Path to a catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Show a single category
        #[arg(long)]
        category: Option<String>,
    },
}

/// Handle the play command.
pub fn handle_play(catalog_path: Option<PathBuf>, minutes: u32) -> Result<()> {
    run_game(catalog_path, minutes)
}

/// Handle the pick command.
pub fn handle_pick(catalog_path: Option<PathBuf>, categories: Vec<String>) -> Result<()> {
    let catalog = load_catalog_or_builtin(catalog_path.as_deref());
    let settings = settings_from_names(&categories)?;

    let eligible = catalog.eligible(&settings);
    if eligible.is_empty() {
        // Nothing eligible is not an error; print nothing.
        return Ok(());
    }

    let item = eligible[rand::thread_rng().gen_range(0..eligible.len())];
    println!("{} [{}]", item.title, item.category);

    Ok(())
}

/// Handle the list command.
pub fn handle_list(catalog_path: Option<PathBuf>, category: Option<String>) -> Result<()> {
    let catalog = load_catalog_or_builtin(catalog_path.as_deref());
    let filter = match category {
        Some(name) => match Category::from_name(&name) {
            Some(category) => Some(category),
            None => anyhow::bail!(
                "unknown category: {} (expected movies, plays, songs or series)",
                name
            ),
        },
        None => None,
    };

    if catalog.is_empty() {
        println!("Catalog is empty");
        return Ok(());
    }

    for current in Category::ALL {
        if filter.is_some_and(|f| f != current) {
            continue;
        }
        println!("{}:", current);
        for item in catalog.items().iter().filter(|i| i.category == current) {
            println!("  {}", item.title);
        }
    }

    Ok(())
}

/// Build category settings from command-line names. No names means all
/// categories.
fn settings_from_names(names: &[String]) -> Result<CategorySettings> {
    if names.is_empty() {
        return Ok(CategorySettings::default());
    }

    let mut settings = CategorySettings::none();
    for name in names {
        match Category::from_name(name) {
            Some(category) => settings.enable(category),
            None => anyhow::bail!(
                "unknown category: {} (expected movies, plays, songs or series)",
                name
            ),
        }
    }
    Ok(settings)
}

/// Load a catalog file, falling back to the builtin catalog. Failures are
/// logged only; the game must still be playable.
fn load_catalog_or_builtin(path: Option<&Path>) -> Catalog {
    match path {
        Some(path) => match Catalog::load(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!("failed to load catalog {}: {}", path.display(), e);
                Catalog::builtin()
            }
        },
        None => Catalog::builtin(),
    }
}

/// Load a catalog file off the UI thread. The result lands in the event loop
/// whenever the read completes; failures are logged and nothing is sent.
fn spawn_catalog_loader(path: PathBuf) -> Receiver<Catalog> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || match Catalog::load(&path) {
        Ok(catalog) => {
            debug!("loaded {} titles from {}", catalog.len(), path.display());
            let _ = tx.send(catalog);
        }
        Err(e) => warn!("failed to load catalog {}: {}", path.display(), e),
    });
    rx
}

/// Run the game UI.
fn run_game(catalog_path: Option<PathBuf>, minutes: u32) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state; a custom catalog replaces the builtin one whenever
    // its load completes.
    let mut app = App::new(Session::with_minutes(Catalog::builtin(), minutes));
    let catalog_rx = catalog_path.map(spawn_catalog_loader);

    // Start the countdown tick source (halted until the first pick)
    let (tick_tx, tick_rx) = mpsc::channel();
    let mut ticker = Ticker::new();
    ticker.start_ticking(tick_tx);

    // Run event loop
    let result = run_event_loop(&mut terminal, &mut app, tick_rx, catalog_rx, &ticker);

    // Cleanup
    ticker.stop_ticking();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;

    result
}

/// Main event loop.
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick_rx: Receiver<Tick>,
    catalog_rx: Option<Receiver<Catalog>>,
    ticker: &Ticker,
) -> Result<()> {
    let poll_rate = Duration::from_millis(100);
    let flash_interval = Duration::from_millis(500);
    let mut last_flash = Instant::now();

    loop {
        // Draw UI with synchronized update (prevents flicker in tmux and other terminals)
        {
            let backend = terminal.backend_mut();
            queue!(backend, BeginSynchronizedUpdate)?;
        }
        terminal.draw(|frame| {
            ui::render(frame, app);
        })?;
        {
            let backend = terminal.backend_mut();
            queue!(backend, EndSynchronizedUpdate)?;
            std::io::Write::flush(backend)?;
        }

        // Handle countdown ticks (non-blocking)
        while tick_rx.try_recv().is_ok() {
            if app.on_tick() {
                // The round just expired: stop the tick schedule and fire the
                // one-shot alert.
                ticker.halt();
                if let Some(item) = app.session.current() {
                    debug!("round expired for {}", item.title);
                    alert::round_expired(&item.title);
                }
            }
        }

        // Apply a finished catalog load (non-blocking, last write wins)
        if let Some(rx) = &catalog_rx {
            while let Ok(catalog) = rx.try_recv() {
                app.session.replace_catalog(catalog);
            }
        }

        // Keep the expired round flashing until the next pick
        if app.session.is_time_up() && last_flash.elapsed() >= flash_interval {
            last_flash = Instant::now();
            app.toggle_flash();
        }

        // Handle input events
        if event::poll(poll_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if app.show_settings {
                        handle_settings_key(app, key);
                    } else {
                        handle_game_key(app, key, ticker);
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Keys on the main screen.
fn handle_game_key(app: &mut App, key: KeyEvent, ticker: &Ticker) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
            if let Some(title) = app.pick() {
                debug!("picked {}", title);
                ticker.begin_round();
            }
        }
        KeyCode::Char('s') => {
            app.open_settings();
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.adjust_timer(1);
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            app.adjust_timer(-1);
        }
        _ => {}
    }
}

/// Keys while the settings popup is open.
fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::Esc | KeyCode::Char('s') | KeyCode::Char('q') => {
            app.close_settings();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.settings_up();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.settings_down();
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
            app.toggle_selected_category();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_names_empty_means_all() {
        let settings = settings_from_names(&[]).unwrap();
        for category in Category::ALL {
            assert!(settings.is_enabled(category));
        }
    }

    #[test]
    fn test_settings_from_names_enables_only_named() {
        let names = vec!["movies".to_string(), "Songs".to_string()];
        let settings = settings_from_names(&names).unwrap();
        assert!(settings.is_enabled(Category::Movies));
        assert!(settings.is_enabled(Category::Songs));
        assert!(!settings.is_enabled(Category::Plays));
        assert!(!settings.is_enabled(Category::Series));
    }

    #[test]
    fn test_settings_from_names_rejects_unknown() {
        let names = vec!["podcasts".to_string()];
        assert!(settings_from_names(&names).is_err());
    }
}
