//! Pantry Detective: The Case of the Missing Scones
//!
//! A cozy terminal detective game. Read the case, follow the clues,
//! question the family, and name whoever made off with Gogo's scones.

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pantry_detective::game::CasePaths;
use pantry_detective::tui::App;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::fs::OpenOptions;
use std::io::{stdout, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Command-line options. Every path the game touches can be redirected,
/// which keeps scratch runs away from your real case notes.
#[derive(Debug, Parser)]
#[command(name = "pantry-detective", version, about = "A terminal detective game about Gogo's missing scones")]
struct Cli {
    /// Case narrative text file
    #[arg(long, default_value = "assets/case.txt")]
    case_file: PathBuf,

    /// Clue sheet, one `description|hint|relatedSuspect` line per clue
    #[arg(long, default_value = "assets/clues.txt")]
    clues_file: PathBuf,

    /// SQLite database recording player and interrogation progress
    #[arg(long, default_value = "pantry-detective.db")]
    database: PathBuf,

    /// Append-only investigation log
    #[arg(long, default_value = "investigation_log.txt")]
    investigation_log: PathBuf,

    /// Diagnostic log file (the TUI owns the terminal, so traces go here)
    #[arg(long, default_value = "pantry-detective-debug.log")]
    debug_log: PathBuf,
}

fn main() -> pantry_detective::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.debug_log)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let paths = CasePaths {
        case_file: cli.case_file,
        clues_file: cli.clues_file,
        database: cli.database,
        investigation_log: cli.investigation_log,
    };
    let mut app = App::new(paths);

    // Main loop; the terminal is restored before any error surfaces
    let run_result = run(&mut terminal, &mut app);

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    run_result?;

    println!("\n╔════════════════════════════════════════════════════════╗");
    println!("║  Thanks for playing Pantry Detective!                  ║");
    println!("║                                                        ║");
    println!("║  The kettle is on. The mystery will keep.              ║");
    println!("╚════════════════════════════════════════════════════════╝\n");

    Ok(())
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> pantry_detective::Result<()> {
    while app.running {
        // Draw
        terminal.draw(|frame| {
            app.render(frame);
        })?;

        // Handle input
        if !app.handle_input()? {
            break;
        }
    }
    Ok(())
}

/// Sends diagnostic traces to a file so the alternate screen stays clean.
/// Filter with RUST_LOG as usual.
fn init_tracing(path: &Path) -> pantry_detective::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening debug log {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
