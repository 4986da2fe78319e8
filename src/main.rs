mod app;
mod desk;
mod domain;
mod input;
mod logging;
mod notifications;
mod persistence;
mod sound;
mod ticker;
mod ui;

use anyhow::{anyhow, Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use desk::Desk;
use domain::format::{format_time_spent, APP_TITLE};
use domain::{progress_dots, status_badge, SystemClock};
use persistence::{
    ensure_desk_dir, init_local_desk, load_settings, load_snapshot, load_tasks, log_dir, save_settings,
    settings_file, tasks_file, AlarmSource, Settings,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Instant;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "pomodesk")]
#[command(about = "A terminal focus desk: pomodoro timer coupled to a task tracker", long_about = None)]
struct Cli {
    /// Log filter written to the desk's log file (e.g. "info", "pomodesk=debug")
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .pomodesk directory in the current directory
    Init,
    /// Print settings and the task list
    Status,
    /// View or change settings
    Config {
        /// Focus session length in minutes
        #[arg(long)]
        pomodoro: Option<u32>,
        /// Short break length in minutes
        #[arg(long)]
        short_break: Option<u32>,
        /// Long break length in minutes
        #[arg(long)]
        long_break: Option<u32>,
        /// Alarm volume between 0.0 and 1.0
        #[arg(long)]
        volume: Option<f32>,
        /// Alarm sound: "system", "bell" or a path to a sound file
        #[arg(long)]
        alarm: Option<AlarmSource>,
        /// Restore default settings before applying other options
        #[arg(long)]
        reset: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let desk_dir = init_local_desk()?;
            println!("Initialized desk directory: {}", desk_dir.display());
            println!();
            println!("Pomodesk will now use this local directory for tasks and settings.");
            println!("Run 'pomodesk' to start the desk.");
            Ok(())
        }
        Some(Commands::Status) => {
            let _guard = logging::init_tracing(&cli.log_level, &log_dir()?)?;
            print_status()
        }
        Some(Commands::Config {
            pomodoro,
            short_break,
            long_break,
            volume,
            alarm,
            reset,
        }) => {
            let _guard = logging::init_tracing(&cli.log_level, &log_dir()?)?;
            let changes = ConfigChanges {
                pomodoro,
                short_break,
                long_break,
                volume,
                alarm,
                reset,
            };
            run_config(changes)
        }
        None => {
            let _guard = logging::init_tracing(&cli.log_level, &log_dir()?)?;
            run_tui()
        }
    }
}

struct ConfigChanges {
    pomodoro: Option<u32>,
    short_break: Option<u32>,
    long_break: Option<u32>,
    volume: Option<f32>,
    alarm: Option<AlarmSource>,
    reset: bool,
}

impl ConfigChanges {
    fn is_empty(&self) -> bool {
        !self.reset
            && self.pomodoro.is_none()
            && self.short_break.is_none()
            && self.long_break.is_none()
            && self.volume.is_none()
            && self.alarm.is_none()
    }

    fn apply(self, mut settings: Settings) -> Settings {
        if self.reset {
            settings = Settings::default();
        }
        if let Some(minutes) = self.pomodoro {
            settings.pomodoro_length = minutes.saturating_mul(60);
        }
        if let Some(minutes) = self.short_break {
            settings.short_break_length = minutes.saturating_mul(60);
        }
        if let Some(minutes) = self.long_break {
            settings.long_break_length = minutes.saturating_mul(60);
        }
        if let Some(volume) = self.volume {
            settings.volume = volume;
        }
        if let Some(alarm) = self.alarm {
            settings.alarm = alarm;
        }
        settings
    }
}

fn describe_settings(settings: &Settings) -> String {
    format!(
        "Pomodoro {} min · short break {} min · long break {} min · alarm {} · volume {:.0}%",
        settings.pomodoro_length / 60,
        settings.short_break_length / 60,
        settings.long_break_length / 60,
        settings.alarm,
        settings.volume * 100.0
    )
}

fn run_config(changes: ConfigChanges) -> Result<()> {
    let path = settings_file()?;
    let current = load_settings(&path)?;

    if changes.is_empty() {
        println!("{}", describe_settings(&current));
        println!("Settings file: {}", path.display());
        return Ok(());
    }

    let updated = changes.apply(current);
    updated.validate().map_err(|e| anyhow!(e))?;
    if let AlarmSource::File(sound) = &updated.alarm {
        if !sound.exists() {
            warn!(path = %sound.display(), "alarm file does not exist");
            eprintln!("Warning: alarm file not found: {}", sound.display());
        }
    }
    save_settings(&path, &updated)?;
    info!(settings = ?updated, "settings changed from the command line");
    println!("{}", describe_settings(&updated));
    Ok(())
}

fn print_status() -> Result<()> {
    let settings = load_settings(settings_file()?)?;
    let tasks = load_tasks(tasks_file()?)?;

    println!("{}", describe_settings(&settings));
    println!();
    if tasks.is_empty() {
        println!("No tasks.");
        return Ok(());
    }

    println!("Tasks (sort: {}):", tasks.sort_order().name());
    for task in tasks.sorted() {
        let mut line = format!(
            "  {} {}  {}",
            status_badge(task),
            task.description,
            progress_dots(task)
        );
        if task.time_spent_seconds > 0 {
            line.push_str(&format!("  {}", format_time_spent(task.time_spent_seconds)));
        }
        println!("{}", line);
    }
    Ok(())
}

fn load_settings_or_default() -> Result<Settings> {
    let path = settings_file()?;
    Ok(match load_settings(&path) {
        Ok(settings) => settings,
        Err(e) => {
            warn!(error = %e, "could not read settings, using defaults");
            Settings::default()
        }
    })
}

fn run_tui() -> Result<()> {
    let desk_dir = ensure_desk_dir()?;
    eprintln!("Using desk directory: {}", desk_dir.display());
    info!(dir = %desk_dir.display(), "starting desk");

    let settings = load_settings_or_default()?;
    let tasks_path = tasks_file()?;
    let snapshot = load_snapshot(&tasks_path).context("Failed to load tasks")?;
    let quotes = snapshot.quote.restore(&mut rand::thread_rng());
    let tasks = snapshot.into_store();

    let desk = Desk::new(settings.lengths(), tasks, SystemClock);
    let mut app =
        AppState::new(desk, settings, tasks_path, settings_file()?).with_quotes(quotes);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, SetTitle(APP_TITLE))?;
    terminal.show_cursor()?;

    // Credit tracked time before the final save
    if let Err(e) = app.save_on_exit() {
        error!(error = %e, "saving on exit failed");
        eprintln!("Error saving state: {}", e);
    }

    if let Err(err) = result {
        error!(error = %err, "desk stopped with an error");
        eprintln!("Error: {}", err);
    }
    info!("desk closed");

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let tick_rate = ticker::tick_duration();
    let mut shown_title = String::new();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        let title = app.desk.title();
        if title != shown_title {
            execute!(terminal.backend_mut(), SetTitle(&title))?;
            shown_title = title;
        }

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        app.tick(Instant::now());

        // Autosave if needed
        if app.needs_save || app.settings_need_save {
            app.save()?;
        }
    }
}
