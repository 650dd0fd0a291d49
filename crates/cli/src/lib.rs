pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "frontdesk",
    about = "Frontdesk assistant operator CLI",
    long_about = "Run the conversational assistants, forward images for classification, \
                  inspect effective configuration, and validate runtime readiness.",
    after_help = "Examples:\n  frontdesk chat\n  frontdesk classify tile-photo.jpg\n  frontdesk doctor --json"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a frontdesk.toml config file")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Start an interactive chat session (type `exit` to quit)")]
    Chat,
    #[command(about = "Forward an image to the classification API and print the result")]
    Classify {
        #[arg(help = "Path to the image file")]
        path: PathBuf,
    },
    #[command(about = "Inspect effective configuration values with secret redaction")]
    Config,
    #[command(about = "Validate configuration, credentials, and template readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Chat => commands::chat::run(cli.config),
        Command::Classify { path } => commands::classify::run(cli.config, &path),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run(cli.config) }
        }
        Command::Doctor { json } => commands::CommandResult {
            exit_code: 0,
            output: commands::doctor::run(cli.config, json),
        },
    };

    if !result.output.is_empty() {
        println!("{}", result.output);
    }
    ExitCode::from(result.exit_code)
}
