#[macro_use]
extern crate rust_i18n;

i18n!("locales", fallback = "en");

use ccsetting::cli::{self, Cli};
use ccsetting::error::CcsettingError;
use ccsetting::init_locale;
use clap::Parser;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    init_locale();
    let cli = Cli::parse();
    let options = cli.view_options().unwrap_or_else(|e| e.exit());
    init_logging(cli.verbose);

    if let Err(e) = cli::run(&options, cli.color) {
        let message = e
            .downcast_ref::<CcsettingError>()
            .map(CcsettingError::display_localized)
            .unwrap_or_else(|| format!("{e:#}"));
        eprintln!("{}", t!("messages.error", error = message));
        std::process::exit(1);
    }
}

/// Logs go to stderr so they never mix with exported JSON or Markdown on stdout.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("ccsetting=debug")
        } else {
            EnvFilter::new("ccsetting=warn")
        }
    });

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .try_init();
}
