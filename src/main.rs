#![deny(unsafe_code)]
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

mod cli;
mod constants;
mod error;
mod gui;
mod pointer_speed;
mod profile;
mod settings;
mod toast;
#[cfg(windows)]
mod win32_utils;

use anyhow::Result;
use clap::Parser;
use tracing::{Level as TraceLevel, info};
use tracing_subscriber::FmtSubscriber;

use cli::Cli;
use pointer_speed::{MemoryPointerSpeed, PointerSpeedPort, SystemPointerSpeed};
use profile::ProfileController;
use settings::SettingsStore;

fn init_logging() -> Result<()> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> Result<()> {
    #[cfg(windows)]
    win32_utils::attach_parent_console();

    let cli = Cli::parse();

    init_logging()?;

    let store = match &cli.config_dir {
        Some(dir) => SettingsStore::new(dir),
        None => SettingsStore::default_location(),
    };
    info!(path = %store.path().display(), "Using settings file");

    let port: Box<dyn PointerSpeedPort> = if cli.simulate {
        info!("Simulating pointer speed in memory");
        Box::new(MemoryPointerSpeed::new(constants::speed::DEFAULT))
    } else {
        Box::new(SystemPointerSpeed::new())
    };

    let mut controller = ProfileController::start(port, store);

    match &cli.command {
        Some(command) => cli::run_command(command, &mut controller, &mut std::io::stdout()),
        None => gui::run_gui(controller, cli.gui_options()),
    }
}
