//! flowreport - Compile automation flow records into reports
//!
//! flowreport provides:
//! - Canonical Markdown reports with a stable table of contents
//! - Standalone, print-styled HTML rendering
//! - Paginated PDF export via wkhtmltopdf
//! - Safe, timestamped report file names

use anyhow::Result;
use clap::Parser;
use tracing::Level;

mod backends;
mod cli;
mod core;
mod export;
mod report;

fn init_logging(quiet: bool, verbose: bool) {
    let level = if verbose {
        Level::DEBUG
    } else if quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_logging(cli.quiet, cli.verbose);
    cli::run(cli)
}
