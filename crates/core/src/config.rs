use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::language::Persona;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub assistant: AssistantConfig,
    pub llm: LlmConfig,
    pub history: HistoryConfig,
    pub mail: MailConfig,
    pub imaging: ImagingConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct AssistantConfig {
    pub persona: Persona,
}

#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub provider: CompletionProvider,
    pub api_key: Option<SecretString>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// Endpoint root when none is configured: the hosted chat-completion
    /// service for the primary provider, a local generate daemon otherwise.
    pub fn effective_base_url(&self) -> &str {
        match &self.base_url {
            Some(url) => url.as_str(),
            None => match self.provider {
                CompletionProvider::ChatCompletions => "https://api.groq.com/openai/v1",
                CompletionProvider::Generate => "http://localhost:11434",
            },
        }
    }

    pub fn model_for(&self, persona: Persona) -> String {
        self.model.clone().unwrap_or_else(|| persona.default_model().to_string())
    }

    pub fn max_tokens_for(&self, persona: Persona) -> u32 {
        self.max_tokens.unwrap_or_else(|| persona.default_max_tokens())
    }
}

#[derive(Clone, Debug)]
pub struct HistoryConfig {
    pub max_turns: usize,
}

#[derive(Clone, Debug)]
pub struct MailConfig {
    pub enabled: bool,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: SecretString,
    pub from_address: String,
    pub to_address: String,
    pub attachment_path: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct ImagingConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub bearer_token: SecretString,
    pub bcase_id: String,
    pub login_user_id: String,
    pub api_data: String,
    pub decode_key: String,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionProvider {
    ChatCompletions,
    Generate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub persona: Option<Persona>,
    pub log_level: Option<String>,
    pub llm_provider: Option<CompletionProvider>,
    pub llm_model: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            assistant: AssistantConfig { persona: Persona::Ceramics },
            llm: LlmConfig {
                provider: CompletionProvider::ChatCompletions,
                api_key: None,
                base_url: None,
                model: None,
                max_tokens: None,
                timeout_secs: 30,
            },
            history: HistoryConfig { max_turns: 5 },
            mail: MailConfig {
                enabled: false,
                smtp_host: "smtp.office365.com".to_string(),
                smtp_port: 587,
                username: String::new(),
                password: String::new().into(),
                from_address: String::new(),
                to_address: String::new(),
                attachment_path: None,
            },
            imaging: ImagingConfig {
                enabled: false,
                endpoint: String::new(),
                bearer_token: String::new().into(),
                bcase_id: String::new(),
                login_user_id: String::new(),
                api_data: String::new(),
                decode_key: String::new(),
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for Persona {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ceramics" => Ok(Self::Ceramics),
            "insurance" => Ok(Self::Insurance),
            other => Err(ConfigError::Validation(format!(
                "unsupported persona `{other}` (expected ceramics|insurance)"
            ))),
        }
    }
}

impl std::str::FromStr for CompletionProvider {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "chat_completions" => Ok(Self::ChatCompletions),
            "generate" => Ok(Self::Generate),
            other => Err(ConfigError::Validation(format!(
                "unsupported completion provider `{other}` (expected chat_completions|generate)"
            ))),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

fn secret_value(value: String) -> SecretString {
    value.into()
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("frontdesk.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(assistant) = patch.assistant {
            if let Some(persona) = assistant.persona {
                self.assistant.persona = persona;
            }
        }

        if let Some(llm) = patch.llm {
            if let Some(provider) = llm.provider {
                self.llm.provider = provider;
            }
            if let Some(llm_api_key_value) = llm.api_key {
                self.llm.api_key = Some(secret_value(llm_api_key_value));
            }
            if let Some(base_url) = llm.base_url {
                self.llm.base_url = Some(base_url);
            }
            if let Some(model) = llm.model {
                self.llm.model = Some(model);
            }
            if let Some(max_tokens) = llm.max_tokens {
                self.llm.max_tokens = Some(max_tokens);
            }
            if let Some(timeout_secs) = llm.timeout_secs {
                self.llm.timeout_secs = timeout_secs;
            }
        }

        if let Some(history) = patch.history {
            if let Some(max_turns) = history.max_turns {
                self.history.max_turns = max_turns;
            }
        }

        if let Some(mail) = patch.mail {
            if let Some(enabled) = mail.enabled {
                self.mail.enabled = enabled;
            }
            if let Some(smtp_host) = mail.smtp_host {
                self.mail.smtp_host = smtp_host;
            }
            if let Some(smtp_port) = mail.smtp_port {
                self.mail.smtp_port = smtp_port;
            }
            if let Some(username) = mail.username {
                self.mail.username = username;
            }
            if let Some(mail_password_value) = mail.password {
                self.mail.password = secret_value(mail_password_value);
            }
            if let Some(from_address) = mail.from_address {
                self.mail.from_address = from_address;
            }
            if let Some(to_address) = mail.to_address {
                self.mail.to_address = to_address;
            }
            if let Some(attachment_path) = mail.attachment_path {
                self.mail.attachment_path = Some(PathBuf::from(attachment_path));
            }
        }

        if let Some(imaging) = patch.imaging {
            if let Some(enabled) = imaging.enabled {
                self.imaging.enabled = enabled;
            }
            if let Some(endpoint) = imaging.endpoint {
                self.imaging.endpoint = endpoint;
            }
            if let Some(bearer_token_value) = imaging.bearer_token {
                self.imaging.bearer_token = secret_value(bearer_token_value);
            }
            if let Some(bcase_id) = imaging.bcase_id {
                self.imaging.bcase_id = bcase_id;
            }
            if let Some(login_user_id) = imaging.login_user_id {
                self.imaging.login_user_id = login_user_id;
            }
            if let Some(api_data) = imaging.api_data {
                self.imaging.api_data = api_data;
            }
            if let Some(decode_key) = imaging.decode_key {
                self.imaging.decode_key = decode_key;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("FRONTDESK_ASSISTANT_PERSONA") {
            self.assistant.persona = value.parse()?;
        }

        if let Some(value) = read_env("FRONTDESK_LLM_PROVIDER") {
            self.llm.provider = value.parse()?;
        }
        if let Some(value) = read_env("FRONTDESK_LLM_API_KEY") {
            self.llm.api_key = Some(secret_value(value));
        }
        if let Some(value) = read_env("FRONTDESK_LLM_BASE_URL") {
            self.llm.base_url = Some(value);
        }
        if let Some(value) = read_env("FRONTDESK_LLM_MODEL") {
            self.llm.model = Some(value);
        }
        if let Some(value) = read_env("FRONTDESK_LLM_MAX_TOKENS") {
            self.llm.max_tokens = Some(parse_u32("FRONTDESK_LLM_MAX_TOKENS", &value)?);
        }
        if let Some(value) = read_env("FRONTDESK_LLM_TIMEOUT_SECS") {
            self.llm.timeout_secs = parse_u64("FRONTDESK_LLM_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("FRONTDESK_HISTORY_MAX_TURNS") {
            self.history.max_turns = parse_usize("FRONTDESK_HISTORY_MAX_TURNS", &value)?;
        }

        if let Some(value) = read_env("FRONTDESK_MAIL_ENABLED") {
            self.mail.enabled = parse_bool("FRONTDESK_MAIL_ENABLED", &value)?;
        }
        if let Some(value) = read_env("FRONTDESK_MAIL_SMTP_HOST") {
            self.mail.smtp_host = value;
        }
        if let Some(value) = read_env("FRONTDESK_MAIL_SMTP_PORT") {
            self.mail.smtp_port = parse_u16("FRONTDESK_MAIL_SMTP_PORT", &value)?;
        }
        if let Some(value) = read_env("FRONTDESK_MAIL_USERNAME") {
            self.mail.username = value;
        }
        if let Some(value) = read_env("FRONTDESK_MAIL_PASSWORD") {
            self.mail.password = secret_value(value);
        }
        if let Some(value) = read_env("FRONTDESK_MAIL_FROM") {
            self.mail.from_address = value;
        }
        if let Some(value) = read_env("FRONTDESK_MAIL_TO") {
            self.mail.to_address = value;
        }
        if let Some(value) = read_env("FRONTDESK_MAIL_ATTACHMENT_PATH") {
            self.mail.attachment_path = Some(PathBuf::from(value));
        }

        if let Some(value) = read_env("FRONTDESK_IMAGING_ENABLED") {
            self.imaging.enabled = parse_bool("FRONTDESK_IMAGING_ENABLED", &value)?;
        }
        if let Some(value) = read_env("FRONTDESK_IMAGING_ENDPOINT") {
            self.imaging.endpoint = value;
        }
        if let Some(value) = read_env("FRONTDESK_IMAGING_BEARER_TOKEN") {
            self.imaging.bearer_token = secret_value(value);
        }
        if let Some(value) = read_env("FRONTDESK_IMAGING_BCASE_ID") {
            self.imaging.bcase_id = value;
        }
        if let Some(value) = read_env("FRONTDESK_IMAGING_LOGIN_USER_ID") {
            self.imaging.login_user_id = value;
        }
        if let Some(value) = read_env("FRONTDESK_IMAGING_API_DATA") {
            self.imaging.api_data = value;
        }
        if let Some(value) = read_env("FRONTDESK_IMAGING_DECODE_KEY") {
            self.imaging.decode_key = value;
        }

        let log_level =
            read_env("FRONTDESK_LOGGING_LEVEL").or_else(|| read_env("FRONTDESK_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("FRONTDESK_LOGGING_FORMAT").or_else(|| read_env("FRONTDESK_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(persona) = overrides.persona {
            self.assistant.persona = persona;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(llm_provider) = overrides.llm_provider {
            self.llm.provider = llm_provider;
        }
        if let Some(llm_model) = overrides.llm_model {
            self.llm.model = Some(llm_model);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_llm(&self.llm)?;
        validate_history(&self.history)?;
        validate_mail(&self.mail, self.assistant.persona)?;
        validate_imaging(&self.imaging, self.assistant.persona)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("frontdesk.toml"), PathBuf::from("config/frontdesk.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_llm(llm: &LlmConfig) -> Result<(), ConfigError> {
    if llm.timeout_secs == 0 || llm.timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "llm.timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    match llm.provider {
        CompletionProvider::ChatCompletions => {
            let missing = llm
                .api_key
                .as_ref()
                .map(|value| value.expose_secret().trim().is_empty())
                .unwrap_or(true);
            if missing {
                return Err(ConfigError::Validation(
                    "llm.api_key is required for the chat_completions provider. \
                     Set FRONTDESK_LLM_API_KEY or [llm].api_key"
                        .to_string(),
                ));
            }
        }
        CompletionProvider::Generate => {
            if llm.effective_base_url().trim().is_empty() {
                return Err(ConfigError::Validation(
                    "llm.base_url is required for the generate provider".to_string(),
                ));
            }
        }
    }

    Ok(())
}

fn validate_history(history: &HistoryConfig) -> Result<(), ConfigError> {
    if history.max_turns == 0 || history.max_turns > 50 {
        return Err(ConfigError::Validation(
            "history.max_turns must be in range 1..=50".to_string(),
        ));
    }
    Ok(())
}

fn validate_mail(mail: &MailConfig, persona: Persona) -> Result<(), ConfigError> {
    if !mail.enabled {
        return Ok(());
    }

    if persona != Persona::Ceramics {
        return Err(ConfigError::Validation(
            "mail.enabled is only supported for the ceramics persona".to_string(),
        ));
    }
    if mail.smtp_host.trim().is_empty() {
        return Err(ConfigError::Validation(
            "mail.smtp_host must not be empty when mail is enabled".to_string(),
        ));
    }
    if mail.smtp_port == 0 {
        return Err(ConfigError::Validation(
            "mail.smtp_port must be greater than zero".to_string(),
        ));
    }
    if mail.username.trim().is_empty() || mail.password.expose_secret().trim().is_empty() {
        return Err(ConfigError::Validation(
            "mail.username and mail.password are required when mail is enabled".to_string(),
        ));
    }
    if mail.from_address.trim().is_empty() || mail.to_address.trim().is_empty() {
        return Err(ConfigError::Validation(
            "mail.from_address and mail.to_address are required when mail is enabled".to_string(),
        ));
    }

    Ok(())
}

fn validate_imaging(imaging: &ImagingConfig, persona: Persona) -> Result<(), ConfigError> {
    if !imaging.enabled {
        return Ok(());
    }

    if persona != Persona::Ceramics {
        return Err(ConfigError::Validation(
            "imaging.enabled is only supported for the ceramics persona".to_string(),
        ));
    }
    if !imaging.endpoint.starts_with("http://") && !imaging.endpoint.starts_with("https://") {
        return Err(ConfigError::Validation(
            "imaging.endpoint must start with http:// or https://".to_string(),
        ));
    }
    if imaging.bearer_token.expose_secret().trim().is_empty() {
        return Err(ConfigError::Validation(
            "imaging.bearer_token is required when imaging is enabled".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u16(key: &str, value: &str) -> Result<u16, ConfigError> {
    value.parse::<u16>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.parse::<usize>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.parse::<bool>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    assistant: Option<AssistantPatch>,
    llm: Option<LlmPatch>,
    history: Option<HistoryPatch>,
    mail: Option<MailPatch>,
    imaging: Option<ImagingPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct AssistantPatch {
    persona: Option<Persona>,
}

#[derive(Debug, Default, Deserialize)]
struct LlmPatch {
    provider: Option<CompletionProvider>,
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    max_tokens: Option<u32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct HistoryPatch {
    max_turns: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct MailPatch {
    enabled: Option<bool>,
    smtp_host: Option<String>,
    smtp_port: Option<u16>,
    username: Option<String>,
    password: Option<String>,
    from_address: Option<String>,
    to_address: Option<String>,
    attachment_path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ImagingPatch {
    enabled: Option<bool>,
    endpoint: Option<String>,
    bearer_token: Option<String>,
    bcase_id: Option<String>,
    login_user_id: Option<String>,
    api_data: Option<String>,
    decode_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
