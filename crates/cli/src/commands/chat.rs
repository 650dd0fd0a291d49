use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use frontdesk_agent::{AgentRuntime, OrderNotifier};
use frontdesk_core::config::AppConfig;
use frontdesk_llm::build_client;
use frontdesk_outbound::OrderMailer;

use super::{init_logging, load_options, CommandResult};

pub fn run(config_path: Option<PathBuf>) -> CommandResult {
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

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult {
                exit_code: 1,
                output: format!("failed to initialize async runtime: {error}"),
            };
        }
    };

    match runtime.block_on(chat_loop(&config)) {
        Ok(()) => CommandResult { exit_code: 0, output: String::new() },
        Err(error) => {
            CommandResult { exit_code: 1, output: format!("chat session failed: {error}") }
        }
    }
}

async fn chat_loop(config: &AppConfig) -> Result<()> {
    let completion = build_client(config)?;
    let agent =
        AgentRuntime::new(config.assistant.persona, completion, build_notifier(config))?;
    let mut session = agent.open_session(config.history.max_turns);

    tracing::info!(
        event_name = "cli.chat.session_opened",
        session_id = %session.id,
        persona = ?session.persona,
        "chat session opened"
    );

    println!("{}\n", config.assistant.persona.greeting());
    prompt_marker()?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().eq_ignore_ascii_case("exit") {
            break;
        }

        let reply = agent.handle_message(&mut session, &line).await;
        println!("\n{reply}\n");
        prompt_marker()?;
    }

    tracing::info!(
        event_name = "cli.chat.session_closed",
        session_id = %session.id,
        "chat session closed"
    );
    Ok(())
}

fn build_notifier(config: &AppConfig) -> Option<Box<dyn OrderNotifier>> {
    config
        .mail
        .enabled
        .then(|| Box::new(OrderMailer::new(config.mail.clone())) as Box<dyn OrderNotifier>)
}

fn prompt_marker() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}
