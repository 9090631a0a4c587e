//! main.rs
//! Entry point for ils

use ils::config::Config;
use ils::core::Listing;
use ils::ui::Theme;
use ils::utils::cli::handle_args;

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_logging();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Diagnostics go to stderr, filtered by ILS_LOG (defaults to warnings only).
fn init_logging() {
    let filter = EnvFilter::try_from_env("ILS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .init();
}

fn run() -> ils::Result<()> {
    let config = Config::load();
    let theme = Theme::load(config.theme_path())?;
    let listing = Listing::new(&theme, handle_args());

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    listing.execute(&mut out)?;
    out.flush()?;
    Ok(())
}
