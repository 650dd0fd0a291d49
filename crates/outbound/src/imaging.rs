use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::multipart::Form;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use frontdesk_core::config::ImagingConfig;

/// Normalized result of one classification call. The upstream API answers
/// with either a JSON object or a single-element list; both collapse to
/// this shape, and every failure mode lands in `error` instead of an `Err`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImageClassification {
    pub direct: Vec<Value>,
    pub suggestions: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ImageClassification {
    pub fn from_error(message: impl Into<String>) -> Self {
        Self { direct: Vec::new(), suggestions: Vec::new(), error: Some(message.into()) }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Forwards uploaded image bytes to the external classification API:
/// base64 data-URI in a fixed-shape multipart form, one synchronous POST,
/// bearer-token auth. The boundary never panics and never returns `Err`.
pub struct ImageForwarder {
    http: reqwest::Client,
    config: ImagingConfig,
}

impl ImageForwarder {
    pub fn new(config: ImagingConfig) -> Result<Self, reqwest::Error> {
        Ok(Self { http: reqwest::Client::builder().build()?, config })
    }

    pub async fn classify_file(&self, path: &Path) -> ImageClassification {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(error) => {
                return ImageClassification::from_error(format!(
                    "could not read `{}`: {error}",
                    path.display()
                ));
            }
        };
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("png")
            .to_ascii_lowercase();

        self.classify_bytes(&bytes, &extension).await
    }

    pub async fn classify_bytes(&self, bytes: &[u8], extension: &str) -> ImageClassification {
        let data_uri = format!("data:image/{extension};base64,{}", BASE64.encode(bytes));

        let form = Form::new()
            .text("selectedBcaseId", self.config.bcase_id.clone())
            .text("loginUserId", self.config.login_user_id.clone())
            .text("api_data", self.config.api_data.clone())
            .text("decode_key", self.config.decode_key.clone())
            .text("file", data_uri);

        debug!(
            event_name = "imaging.classify.request",
            endpoint = %self.config.endpoint,
            payload_bytes = bytes.len(),
            "forwarding image for classification"
        );

        let response = match self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(self.config.bearer_token.expose_secret())
            .multipart(form)
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => return ImageClassification::from_error(error.to_string()),
        };

        let status = response.status();
        if !status.is_success() {
            return ImageClassification::from_error(format!("HTTP {}", status.as_u16()));
        }

        match response.json::<Value>().await {
            Ok(body) => normalize_response(body),
            Err(error) => {
                ImageClassification::from_error(format!("unparseable response: {error}"))
            }
        }
    }
}

/// Collapses the API's list-vs-object response shapes into one record.
/// A list answer means "take the first element"; a missing `data` section
/// yields empty match sets rather than an error.
fn normalize_response(body: Value) -> ImageClassification {
    let object = match body {
        Value::Array(items) => match items.into_iter().next() {
            Some(first) => first,
            None => return ImageClassification::from_error("empty response list"),
        },
        other => other,
    };

    if let Some(message) = object.get("error").and_then(Value::as_str) {
        return ImageClassification::from_error(message);
    }

    let direct = object
        .pointer("/data/direct")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let suggestions = object
        .pointer("/data/suggestions")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    ImageClassification { direct, suggestions, error: None }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{normalize_response, ImageClassification};

    #[test]
    fn object_response_is_normalized() {
        let result = normalize_response(json!({
            "data": {
                "direct": [{"name": "Legna Castano", "size": "30x60"}],
                "suggestions": [{"name": "Pietra Grey"}, {"name": "Ardesia"}]
            }
        }));

        assert!(!result.is_error());
        assert_eq!(result.direct.len(), 1);
        assert_eq!(result.suggestions.len(), 2);
        assert_eq!(result.direct[0]["name"], "Legna Castano");
    }

    #[test]
    fn list_response_uses_first_element() {
        let result = normalize_response(json!([
            {"data": {"direct": [], "suggestions": [{"name": "Ardesia"}]}},
            {"data": {"direct": [{"name": "ignored"}], "suggestions": []}}
        ]));

        assert!(!result.is_error());
        assert!(result.direct.is_empty());
        assert_eq!(result.suggestions.len(), 1);
    }

    #[test]
    fn upstream_error_field_is_surfaced() {
        let result = normalize_response(json!({"error": "invalid decode key"}));
        assert_eq!(result.error.as_deref(), Some("invalid decode key"));
    }

    #[test]
    fn missing_data_section_yields_empty_match_sets() {
        let result = normalize_response(json!({"status": "ok"}));
        assert!(!result.is_error());
        assert!(result.direct.is_empty());
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn http_failure_shape_matches_the_wire_contract() {
        let result = ImageClassification::from_error("HTTP 500");
        let serialized = serde_json::to_value(&result).expect("result should serialize");
        assert_eq!(serialized["error"], "HTTP 500");
    }
}
