// crop_advisor - main.rs
// Loads configuration, installs logging, then hands off to the CLI dispatcher

use std::process::exit;

use clap::Parser;
use crop_advisor::cli::{dispatch, Cli};
use crop_advisor::config::load_config;
use crop_advisor::logging::init_logging;

fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("❌ Failed to load config: {e}");
            exit(2);
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("⚠️ {e}");
    }

    if let Err(e) = dispatch(cli, config) {
        tracing::error!("{e:#}");
        exit(1);
    }
}
