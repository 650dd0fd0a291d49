use thiserror::Error;

/// Completion failures, classified by kind instead of a single broad catch.
/// Callers log the variant and surface `user_message()`; nothing here is
/// fatal to the session.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("completion transport failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("completion request was rejected with HTTP {status}")]
    Auth { status: u16 },
    #[error("completion provider rate limit hit")]
    RateLimited,
    #[error("completion API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },
    #[error("completion response was malformed: {0}")]
    MalformedResponse(String),
    #[error("completion client is not configured: {0}")]
    NotConfigured(String),
}

impl LlmError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Transport(_) | Self::MalformedResponse(_) => {
                "Sorry, I encountered an issue while generating a response. \
                 Please try again later."
            }
            Self::Auth { .. } | Self::NotConfigured(_) => {
                "The assistant is not configured correctly. Please contact support."
            }
            Self::RateLimited => {
                "The assistant is receiving too many requests right now. \
                 Please try again shortly."
            }
            Self::Api { .. } => {
                "An error occurred while talking to the assistant service. \
                 Please try again later."
            }
        }
    }
}

/// Maps a non-success HTTP status onto an error kind. Auth-shaped statuses
/// and rate limits get their own variants; everything else is a generic
/// API failure carrying the (truncated) body.
pub fn classify_status(status: u16, body: String) -> LlmError {
    match status {
        401 | 403 => LlmError::Auth { status },
        429 => LlmError::RateLimited,
        _ => LlmError::Api { status, body: truncate_body(body) },
    }
}

fn truncate_body(body: String) -> String {
    const MAX_BODY: usize = 512;
    if body.len() <= MAX_BODY {
        return body;
    }
    let mut cut = MAX_BODY;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &body[..cut])
}

#[cfg(test)]
mod tests {
    use super::{classify_status, LlmError};

    #[test]
    fn unauthorized_maps_to_auth_kind() {
        assert!(matches!(classify_status(401, String::new()), LlmError::Auth { status: 401 }));
        assert!(matches!(classify_status(403, String::new()), LlmError::Auth { status: 403 }));
    }

    #[test]
    fn too_many_requests_maps_to_rate_limit() {
        assert!(matches!(classify_status(429, String::new()), LlmError::RateLimited));
    }

    #[test]
    fn other_statuses_map_to_api_kind_with_body() {
        let error = classify_status(503, "upstream down".to_string());
        match error {
            LlmError::Api { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "upstream down");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn oversized_bodies_are_truncated() {
        let error = classify_status(500, "x".repeat(2048));
        match error {
            LlmError::Api { body, .. } => {
                assert!(body.len() < 600);
                assert!(body.ends_with("..."));
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn every_kind_has_a_safe_user_message() {
        let errors = [
            classify_status(401, String::new()),
            classify_status(429, String::new()),
            classify_status(500, String::new()),
            LlmError::MalformedResponse("no choices".to_string()),
            LlmError::NotConfigured("missing api key".to_string()),
        ];
        for error in errors {
            assert!(!error.user_message().is_empty());
        }
    }
}
