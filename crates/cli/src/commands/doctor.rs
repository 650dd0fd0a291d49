use std::path::PathBuf;

use frontdesk_agent::{PromptBuilder, SlotExtractor};
use frontdesk_core::config::{AppConfig, CompletionProvider};
use frontdesk_core::{Language, SlotValues};
use serde::Serialize;

use super::load_options;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(config_path: Option<PathBuf>, json_output: bool) -> String {
    let report = build_report(config_path);

    if json_output {
        return serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                error.to_string().replace('"', "'")
            )
        });
    }

    render_human(&report)
}

fn build_report(config_path: Option<PathBuf>) -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(load_options(config_path)) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_llm_credentials(&config));
            checks.push(check_slot_patterns());
            checks.push(check_prompt_templates(&config));
            checks.push(check_mail_readiness(&config));
            checks.push(check_imaging_readiness(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            for name in
                ["llm_credentials", "slot_patterns", "prompt_templates", "mail_readiness", "imaging_readiness"]
            {
                checks.push(DoctorCheck {
                    name,
                    status: CheckStatus::Skipped,
                    details: "skipped because configuration did not load".to_string(),
                });
            }
        }
    }

    let all_ok = checks.iter().all(|check| check.status != CheckStatus::Fail);
    let overall_status = if all_ok { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_ok {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_llm_credentials(config: &AppConfig) -> DoctorCheck {
    let details = match config.llm.provider {
        CompletionProvider::ChatCompletions => {
            "api key present; format validated by config contract".to_string()
        }
        CompletionProvider::Generate => {
            format!("generate provider targets {}", config.llm.effective_base_url())
        }
    };
    DoctorCheck { name: "llm_credentials", status: CheckStatus::Pass, details }
}

fn check_slot_patterns() -> DoctorCheck {
    match SlotExtractor::new() {
        Ok(_) => DoctorCheck {
            name: "slot_patterns",
            status: CheckStatus::Pass,
            details: "slot extraction patterns compiled".to_string(),
        },
        Err(error) => DoctorCheck {
            name: "slot_patterns",
            status: CheckStatus::Fail,
            details: format!("pattern compilation failed: {error}"),
        },
    }
}

fn check_prompt_templates(config: &AppConfig) -> DoctorCheck {
    let builder = match PromptBuilder::new() {
        Ok(builder) => builder,
        Err(error) => {
            return DoctorCheck {
                name: "prompt_templates",
                status: CheckStatus::Fail,
                details: format!("template registration failed: {error}"),
            };
        }
    };

    let render = builder.render(
        config.assistant.persona,
        Language::En,
        &SlotValues::default(),
        "readiness probe",
        "",
    );
    match render {
        Ok(_) => DoctorCheck {
            name: "prompt_templates",
            status: CheckStatus::Pass,
            details: "templates registered and rendering".to_string(),
        },
        Err(error) => DoctorCheck {
            name: "prompt_templates",
            status: CheckStatus::Fail,
            details: format!("template render failed: {error}"),
        },
    }
}

fn check_mail_readiness(config: &AppConfig) -> DoctorCheck {
    if !config.mail.enabled {
        return DoctorCheck {
            name: "mail_readiness",
            status: CheckStatus::Skipped,
            details: "mail is disabled".to_string(),
        };
    }

    // Address syntax is the only thing checkable without a live send.
    let from_ok = config.mail.from_address.contains('@');
    let to_ok = config.mail.to_address.contains('@');
    if from_ok && to_ok {
        DoctorCheck {
            name: "mail_readiness",
            status: CheckStatus::Pass,
            details: format!(
                "smtp target {}:{} with configured credentials",
                config.mail.smtp_host, config.mail.smtp_port
            ),
        }
    } else {
        DoctorCheck {
            name: "mail_readiness",
            status: CheckStatus::Fail,
            details: "mail.from_address and mail.to_address must be email addresses".to_string(),
        }
    }
}

fn check_imaging_readiness(config: &AppConfig) -> DoctorCheck {
    if !config.imaging.enabled {
        return DoctorCheck {
            name: "imaging_readiness",
            status: CheckStatus::Skipped,
            details: "imaging is disabled".to_string(),
        };
    }

    DoctorCheck {
        name: "imaging_readiness",
        status: CheckStatus::Pass,
        details: format!("classification endpoint {}", config.imaging.endpoint),
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = vec![report.summary.clone()];
    for check in &report.checks {
        let status = match check.status {
            CheckStatus::Pass => "pass",
            CheckStatus::Fail => "FAIL",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("  [{status}] {} - {}", check.name, check.details));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::{build_report, CheckStatus};

    #[test]
    fn report_fails_gracefully_on_invalid_configuration() {
        // Force a deterministic validation failure so the test does not
        // depend on ambient FRONTDESK_* variables.
        std::env::set_var("FRONTDESK_ASSISTANT_PERSONA", "florist");

        let report = build_report(None);

        std::env::remove_var("FRONTDESK_ASSISTANT_PERSONA");

        assert_eq!(report.overall_status, CheckStatus::Fail);
        let config_check = report
            .checks
            .iter()
            .find(|check| check.name == "config_validation")
            .expect("config check should be present");
        assert_eq!(config_check.status, CheckStatus::Fail);
        assert!(report
            .checks
            .iter()
            .filter(|check| check.name != "config_validation")
            .all(|check| check.status == CheckStatus::Skipped));
    }
}
