mod announcer;
mod app;
mod domain;
mod input;
mod persistence;
mod speech;
mod ticker;
mod ui;

use anyhow::Result;
use app::AppState;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{derive_visible_tasks, format_time, Pace};
use persistence::{
    ensure_cadence_dir, get_cadence_dir, init_local_cadence, load_run, load_templates, run_file,
    templates_file,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "A calm, terminal-based routine runner with per-task timers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .cadence directory in the current directory
    Init,
    /// List the stored routine templates and their task counts per pace
    Templates,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let cadence_dir = init_local_cadence()?;
            println!("Initialized cadence directory: {}", cadence_dir.display());
            println!();
            println!("Cadence will now use this local directory for routines.");
            println!("Run 'cadence' to start a routine.");
            Ok(())
        }
        Some(Commands::Templates) => {
            let templates = load_templates(templates_file()?)?;
            if templates.is_empty() {
                println!("No templates stored.");
                return Ok(());
            }
            for template in &templates {
                println!("{}", template.name);
                if let Some(description) = &template.description {
                    println!("  {}", description);
                }
                for pace in Pace::all() {
                    let visible = derive_visible_tasks(&template.tasks, *pace);
                    let total_ms: i64 = visible.iter().map(|task| task.duration_ms).sum();
                    println!(
                        "  {:>6}: {} tasks, {}",
                        pace.name(),
                        visible.len(),
                        format_time(total_ms)
                    );
                }
                println!();
            }
            Ok(())
        }
        None => run_tui(),
    }
}

fn run_tui() -> Result<()> {
    ensure_cadence_dir()?;

    let cadence_dir = get_cadence_dir()?;
    eprintln!("Using cadence directory: {}", cadence_dir.display());

    // Load templates (applies the one-time visibility migration) and any
    // stored run. Deadlines are absolute instants, so a running run simply
    // picks up where the wall clock says it is.
    let templates = load_templates(templates_file()?)?;
    let run = load_run(run_file()?)?;

    let mut app = AppState::new(templates, run);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Save on exit
    if let Err(e) = app.save() {
        eprintln!("Error saving run: {}", e);
    }

    // Print any errors
    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    let should_quit = input::handle_key(app, key)?;
                    if should_quit {
                        return Ok(());
                    }
                }
            }
        }

        // Drive timers and threshold announcements
        app.tick();

        // Autosave if needed
        if app.needs_save {
            app.save()?;
        }
    }
}
