pub mod chat;
pub mod classify;
pub mod config;
pub mod doctor;

use std::path::PathBuf;

use frontdesk_core::config::{AppConfig, LoadOptions, LogFormat};

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

pub(crate) fn load_options(config_path: Option<PathBuf>) -> LoadOptions {
    LoadOptions { config_path, ..LoadOptions::default() }
}

pub(crate) fn init_logging(config: &AppConfig) {
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        LogFormat::Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        LogFormat::Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}
