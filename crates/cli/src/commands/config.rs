use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use frontdesk_core::config::AppConfig;
use secrecy::ExposeSecret;
use toml::Value;

use super::load_options;

pub fn run(config_path: Option<PathBuf>) -> String {
    let config = match AppConfig::load(load_options(config_path.clone())) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let file_path = detect_config_path(config_path.as_deref());
    let file_doc = load_config_file_doc(file_path.as_deref());

    let persona = config.assistant.persona;
    let api_key = config
        .llm
        .api_key
        .as_ref()
        .map(|value| redact_secret(value.expose_secret()))
        .unwrap_or_else(|| "<unset>".to_string());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    let fields: Vec<(&str, String, Option<&str>)> = vec![
        (
            "assistant.persona",
            format!("{persona:?}").to_lowercase(),
            Some("FRONTDESK_ASSISTANT_PERSONA"),
        ),
        (
            "llm.provider",
            format!("{:?}", config.llm.provider),
            Some("FRONTDESK_LLM_PROVIDER"),
        ),
        ("llm.api_key", api_key, Some("FRONTDESK_LLM_API_KEY")),
        (
            "llm.base_url",
            config.llm.effective_base_url().to_string(),
            Some("FRONTDESK_LLM_BASE_URL"),
        ),
        ("llm.model", config.llm.model_for(persona), Some("FRONTDESK_LLM_MODEL")),
        (
            "llm.max_tokens",
            config.llm.max_tokens_for(persona).to_string(),
            Some("FRONTDESK_LLM_MAX_TOKENS"),
        ),
        (
            "llm.timeout_secs",
            config.llm.timeout_secs.to_string(),
            Some("FRONTDESK_LLM_TIMEOUT_SECS"),
        ),
        (
            "history.max_turns",
            config.history.max_turns.to_string(),
            Some("FRONTDESK_HISTORY_MAX_TURNS"),
        ),
        ("mail.enabled", config.mail.enabled.to_string(), Some("FRONTDESK_MAIL_ENABLED")),
        ("mail.smtp_host", config.mail.smtp_host.clone(), Some("FRONTDESK_MAIL_SMTP_HOST")),
        (
            "mail.smtp_port",
            config.mail.smtp_port.to_string(),
            Some("FRONTDESK_MAIL_SMTP_PORT"),
        ),
        ("mail.from_address", config.mail.from_address.clone(), Some("FRONTDESK_MAIL_FROM")),
        ("mail.to_address", config.mail.to_address.clone(), Some("FRONTDESK_MAIL_TO")),
        (
            "imaging.enabled",
            config.imaging.enabled.to_string(),
            Some("FRONTDESK_IMAGING_ENABLED"),
        ),
        ("imaging.endpoint", config.imaging.endpoint.clone(), Some("FRONTDESK_IMAGING_ENDPOINT")),
        ("logging.level", config.logging.level.clone(), Some("FRONTDESK_LOGGING_LEVEL")),
        (
            "logging.format",
            format!("{:?}", config.logging.format).to_lowercase(),
            Some("FRONTDESK_LOGGING_FORMAT"),
        ),
    ];

    for (key, value, env_key) in fields {
        let source = field_source(key, env_key, file_doc.as_ref(), file_path.as_deref());
        lines.push(render_line(key, &value, source));
    }

    lines.join("\n")
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("  {key} = {value}  [{source}]")
}

fn detect_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return path.exists().then(|| path.to_path_buf());
    }

    [PathBuf::from("frontdesk.toml"), PathBuf::from("config/frontdesk.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let raw = fs::read_to_string(path?).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key: &str,
    env_key: Option<&str>,
    file_doc: Option<&Value>,
    file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_key {
        let set = env::var(env_key).map(|value| !value.trim().is_empty()).unwrap_or(false);
        if set {
            return format!("env:{env_key}");
        }
    }

    if let (Some(doc), Some(path)) = (file_doc, file_path) {
        if file_doc_has_key(doc, key) {
            return format!("file:{}", path.display());
        }
    }

    "default".to_string()
}

fn file_doc_has_key(doc: &Value, dotted_key: &str) -> bool {
    let mut current = doc;
    for part in dotted_key.split('.') {
        match current.get(part) {
            Some(next) => current = next,
            None => return false,
        }
    }
    true
}

/// Keeps a short identifying prefix so operators can tell keys apart
/// without exposing them.
fn redact_secret(secret: &str) -> String {
    if secret.len() <= 4 {
        return "****".to_string();
    }
    format!("{}****", &secret[..4])
}

#[cfg(test)]
mod tests {
    use super::{file_doc_has_key, redact_secret};

    #[test]
    fn redaction_keeps_only_a_prefix() {
        assert_eq!(redact_secret("gsk-super-secret"), "gsk-****");
        assert_eq!(redact_secret("abc"), "****");
    }

    #[test]
    fn dotted_key_lookup_walks_tables() {
        let doc: toml::Value = r#"
[llm]
model = "llama3-8b-8192"
"#
        .parse()
        .expect("doc should parse");

        assert!(file_doc_has_key(&doc, "llm.model"));
        assert!(!file_doc_has_key(&doc, "llm.api_key"));
        assert!(!file_doc_has_key(&doc, "mail.enabled"));
    }
}
