//! # nft-tui CLI Entry Point
//!
//! ## Usage
//!
//! ```bash
//! # Default configuration (~/.config/nft-tui/config.json if present)
//! sudo nft-tui
//!
//! # Explicit configuration and log file
//! sudo nft-tui --config ./nft-tui.json --log-file /tmp/nft-tui.log
//!
//! # Print the resolved command catalog and exit (no root needed)
//! nft-tui --debug
//! ```
//!
//! ## Startup
//!
//! 1. Load the configuration; a malformed file is reported before any screen
//! 2. Check for root; otherwise print a hint and exit with status 1
//! 3. Start file logging
//! 4. Take over the terminal and run the main menu
//!
//! ## Key Bindings
//!
//! ### Menus
//! - `j` / `Down`, `k` / `Up` - Move selection
//! - `Enter` - Select
//! - `q` / `Esc` - Back
//!
//! ### Prompt
//! - `Enter` - Confirm
//! - `Backspace` - Delete last character
//! - `Ctrl+u` - Clear
//! - `Esc` - Cancel
//!
//! ### Pager
//! - `j` / `Down`, `k` / `Up` - Scroll by line
//! - `Space` / `PgDn`, `PgUp` - Scroll by page
//! - `g` / `Home`, `G` / `End` - Jump to top / bottom
//! - `q` / `Esc` - Back

use nft_tui::command::{Catalog, ProcessRunner, SetAction};
use nft_tui::config::Config;
use nft_tui::host::SystemProbe;
use nft_tui::ui::{App, CrosstermEventReader, Screen, Theme};
use nft_tui::{logging, privilege};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::net::Ipv4Addr;
use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// nft-tui - menu-driven nftables administration
#[derive(Parser, Debug)]
#[command(name = "nft-tui")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interactive terminal front end for nftables", long_about = None)]
struct Args {
    /// Configuration file (JSON)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log file (default: nft-tui.log in the local data directory)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Print the resolved command catalog and exit
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run_application(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run_application(args: Args) -> Result<()> {
    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    let catalog = Catalog::from_config(&config);

    if args.debug {
        print_catalog(&catalog);
        return Ok(());
    }

    privilege::require_root()?;

    if let Some(log_path) = args.log_file.or_else(logging::default_log_path) {
        if let Err(e) = logging::init(&log_path) {
            eprintln!("Warning: logging disabled: {e}");
        }
    }
    info!(version = env!("CARGO_PKG_VERSION"), "starting");

    // Set up panic hook to ensure terminal is restored on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
        original_hook(panic_info);
    }));

    let result = run_tui(&config, &catalog);

    let _ = panic::take_hook();
    result
}

fn run_tui(config: &Config, catalog: &Catalog) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e).context("Failed to enter alternate screen");
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(terminal) => terminal,
        Err(e) => {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            return Err(e).context("Failed to create terminal");
        }
    };
    let _ = terminal.hide_cursor();

    let theme = Theme::by_name_or_default(&config.theme).clone();
    let run_result = Screen::new(terminal, Box::new(CrosstermEventReader), theme).and_then(|mut screen| {
        let mut runner = ProcessRunner::with_max_capture(config.max_capture_bytes);
        let mut probe = SystemProbe::new(ProcessRunner::new());
        let app_result = App::new(catalog, &mut runner, &mut screen, &mut probe).run();

        // Restore terminal (always runs, even if the app failed)
        let cleanup_result = cleanup_terminal(screen.terminal_mut());
        app_result?;
        cleanup_result
    });

    if run_result.is_err() {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
    }
    info!(ok = run_result.is_ok(), "exiting");
    run_result
}

/// Clean up terminal state
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;

    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("Failed to restore terminal")?;

    terminal.show_cursor().context("Failed to show cursor")?;

    Ok(())
}

/// Print every command the menus can run, with a sample address for the
/// element commands.
fn print_catalog(catalog: &Catalog) {
    let sample = Ipv4Addr::new(192, 0, 2, 1);

    println!("=== Main menu ===");
    for action in catalog.main_menu() {
        println!("  {}", action.label);
    }

    println!("\n=== Commands ===");
    let mut jobs = vec![
        catalog.list_ruleset(),
        catalog.listening_services(),
        catalog.check_config(),
        catalog.apply_config(),
        catalog.kernel_log(),
    ];
    for set in catalog.sets() {
        jobs.push(catalog.list_set(set));
        jobs.push(catalog.add_element(set, sample));
        jobs.push(catalog.delete_element(set, sample));
        jobs.push(catalog.flush_set(set));
    }
    for job in &jobs {
        let confirm = if job.confirm.is_some() { "  (confirm)" } else { "" };
        println!("  {:<28} {}{}", job.ok_title, job.command, confirm);
    }
    println!("\n  Set menu: {}", SetAction::ALL.map(SetAction::label).join(" | "));
    println!("  Status header: {}", Catalog::host_addresses());
}
