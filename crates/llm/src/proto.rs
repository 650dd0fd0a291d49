use frontdesk_core::{Role, Turn};
use serde::{Deserialize, Serialize};

/// Request body for the OpenAI-compatible `/chat/completions` endpoint.
/// `Turn` already serializes to the `{role, content}` wire shape, so the
/// message list is borrowed straight from the conversation state.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Turn],
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub stream: bool,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Trimmed text of the first choice, or `None` when the provider
    /// returned no usable content.
    pub fn first_choice_text(&self) -> Option<String> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
    }
}

/// Request body for the Ollama-style `/api/generate` endpoint, which takes
/// a single flattened prompt instead of a message list.
#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub stream: bool,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub response: String,
}

/// Flattens a turn sequence into one prompt string: the system prompt
/// first, then `role: content` lines in order.
pub fn flatten_turns(turns: &[Turn]) -> String {
    let mut sections = Vec::with_capacity(turns.len());
    for turn in turns {
        match turn.role {
            Role::System => sections.push(turn.content.clone()),
            Role::User => sections.push(format!("user: {}", turn.content)),
            Role::Assistant => sections.push(format!("assistant: {}", turn.content)),
        }
    }
    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use frontdesk_core::Turn;

    use super::{flatten_turns, ChatCompletionRequest, ChatCompletionResponse};

    #[test]
    fn request_serializes_to_the_wire_shape() {
        let turns =
            vec![Turn::system("be helpful"), Turn::user("order Legna Castano tile")];
        let request = ChatCompletionRequest {
            model: "llama3-8b-8192",
            messages: &turns,
            temperature: 1.0,
            max_tokens: 500,
            top_p: 1.0,
            stream: false,
        };

        let value = serde_json::to_value(&request).expect("request should serialize");
        assert_eq!(value["model"], "llama3-8b-8192");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["messages"][1]["content"], "order Legna Castano tile");
        assert_eq!(value["stream"], false);
        assert_eq!(value["max_tokens"], 500);
    }

    #[test]
    fn first_choice_text_is_trimmed() {
        let response: ChatCompletionResponse = serde_json::from_value(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "  hello there  "}}]
        }))
        .expect("response should parse");

        assert_eq!(response.first_choice_text().as_deref(), Some("hello there"));
    }

    #[test]
    fn empty_choices_yield_no_text() {
        let response: ChatCompletionResponse =
            serde_json::from_value(serde_json::json!({"choices": []}))
                .expect("response should parse");
        assert!(response.first_choice_text().is_none());

        let null_content: ChatCompletionResponse = serde_json::from_value(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": null}}]
        }))
        .expect("response should parse");
        assert!(null_content.first_choice_text().is_none());
    }

    #[test]
    fn flatten_places_system_prompt_first() {
        let turns = vec![
            Turn::system("you are a tile assistant"),
            Turn::user("hello"),
            Turn::assistant("hi"),
        ];
        let prompt = flatten_turns(&turns);

        assert!(prompt.starts_with("you are a tile assistant"));
        assert!(prompt.contains("user: hello"));
        assert!(prompt.ends_with("assistant: hi"));
    }
}
