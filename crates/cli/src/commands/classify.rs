use std::path::{Path, PathBuf};

use frontdesk_core::config::AppConfig;
use frontdesk_outbound::ImageForwarder;

use super::{init_logging, load_options, CommandResult};

pub fn run(config_path: Option<PathBuf>, image_path: &Path) -> CommandResult {
    let config = match AppConfig::load(load_options(config_path)) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult {
                exit_code: 2,
                output: format!("config validation failed: {error}"),
            };
        }
    };
    init_logging(&config);

    if !config.imaging.enabled {
        return CommandResult {
            exit_code: 2,
            output: "imaging is not enabled; set [imaging].enabled = true (ceramics persona only)"
                .to_string(),
        };
    }

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult {
                exit_code: 1,
                output: format!("failed to initialize async runtime: {error}"),
            };
        }
    };

    let classification = runtime.block_on(async {
        let forwarder = ImageForwarder::new(config.imaging.clone())?;
        anyhow::Ok(forwarder.classify_file(image_path).await)
    });

    match classification {
        Ok(result) => {
            let exit_code = if result.is_error() { 1 } else { 0 };
            let output = serde_json::to_string_pretty(&result)
                .unwrap_or_else(|error| format!("{{\"error\":\"serialization failed: {error}\"}}"));
            CommandResult { exit_code, output }
        }
        Err(error) => CommandResult {
            exit_code: 1,
            output: format!("could not build classification client: {error}"),
        },
    }
}
