//! Reelcheck CLI - Validate, clean and load movie rating datasets.

use clap::Parser;
use reelcheck_cli::commands;
use reelcheck_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> reelcheck_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load or create config
    let config_path = Config::resolve_path(cli.config.as_deref())?;
    let config = if config_path.exists() {
        Config::load_from(&config_path)?
    } else {
        let cfg = Config::default();
        if !matches!(cli.command, Command::Config(_)) {
            cfg.save_to(&config_path).ok();
        }
        cfg
    };

    init_tracing(&config.settings.log_filter);

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Check(args) => commands::execute_check(args, &config, &formatter)?,
        Command::Export(args) => commands::execute_export(args, &config, &formatter)?,
        Command::Load(args) => commands::execute_load(args, &config, &formatter)?,
        Command::Config(args) => commands::execute_config(args, &config, &config_path, &formatter)?,
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over the configured filter.
fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
