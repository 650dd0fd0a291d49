use thiserror::Error;
use tracing::{debug, info, warn};

use frontdesk_core::{Persona, SessionContext};
use frontdesk_llm::CompletionClient;

use crate::detect::LanguageDetector;
use crate::extract::SlotExtractor;
use crate::notify::{is_order_confirmation, OrderNotifier};
use crate::prompts::PromptBuilder;

/// Reply for empty or whitespace-only input; returned before any external
/// call is made.
pub const INVALID_QUESTION_REPLY: &str = "Please provide a valid question.";

const MAIL_FAILURE_REPLY: &str =
    "Sorry, I couldn't send the order confirmation email. Please try again later.";
const RENDER_FAILURE_REPLY: &str =
    "Sorry, I encountered an issue while generating a response. Please try again later.";

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("prompt template registration failed: {0}")]
    Template(#[from] tera::Error),
    #[error("slot pattern compilation failed: {0}")]
    Pattern(#[from] regex::Error),
}

/// Orchestrates one user turn end to end. Holds no per-session state; the
/// caller owns the `SessionContext` and passes it in on every turn.
pub struct AgentRuntime {
    persona: Persona,
    detector: LanguageDetector,
    extractor: SlotExtractor,
    prompts: PromptBuilder,
    completion: Box<dyn CompletionClient>,
    notifier: Option<Box<dyn OrderNotifier>>,
}

impl AgentRuntime {
    pub fn new(
        persona: Persona,
        completion: Box<dyn CompletionClient>,
        notifier: Option<Box<dyn OrderNotifier>>,
    ) -> Result<Self, AgentError> {
        Ok(Self {
            persona,
            detector: LanguageDetector::new(persona),
            extractor: SlotExtractor::new()?,
            prompts: PromptBuilder::new()?,
            completion,
            notifier,
        })
    }

    pub fn persona(&self) -> Persona {
        self.persona
    }

    pub fn open_session(&self, max_history: usize) -> SessionContext {
        SessionContext::new(self.persona, max_history)
    }

    /// Processes one inbound message and always returns something to show
    /// the user. Failures are downgraded to safe user-facing strings; the
    /// session stays usable afterwards.
    pub async fn handle_message(&self, session: &mut SessionContext, input: &str) -> String {
        if input.trim().is_empty() {
            return INVALID_QUESTION_REPLY.to_string();
        }

        if self.persona == Persona::Ceramics && is_order_confirmation(input) {
            if let Some(notifier) = &self.notifier {
                if let Err(error) = notifier.notify_order(&session.slots).await {
                    warn!(
                        event_name = "agent.order_confirmation.failed",
                        session_id = %session.id,
                        error = %error,
                        "order confirmation notification failed"
                    );
                    return MAIL_FAILURE_REPLY.to_string();
                }
                info!(
                    event_name = "agent.order_confirmation.sent",
                    session_id = %session.id,
                    item_name = %session.slots.item_name,
                    quantity = session.slots.quantity,
                    "order confirmation notification sent"
                );
            }
        }

        let language = self.detector.detect(input);
        debug!(
            event_name = "agent.language.detected",
            session_id = %session.id,
            language = language.tag(),
            "detected input language"
        );

        self.extractor.apply(input, &mut session.slots);

        let transcript = session.conversation.transcript();
        let prompt = match self.prompts.render(
            self.persona,
            language,
            &session.slots,
            input,
            &transcript,
        ) {
            Ok(prompt) => prompt,
            Err(error) => {
                warn!(
                    event_name = "agent.prompt.render_failed",
                    session_id = %session.id,
                    error = %error,
                    "system prompt rendering failed"
                );
                return RENDER_FAILURE_REPLY.to_string();
            }
        };

        session.conversation.set_system_prompt(prompt);
        session.conversation.push_user(input);

        match self.completion.complete(session.conversation.turns()).await {
            Ok(reply) => {
                session.conversation.push_assistant(reply.clone());
                reply
            }
            Err(error) => {
                warn!(
                    event_name = "agent.completion.failed",
                    session_id = %session.id,
                    error = %error,
                    "completion call failed"
                );
                error.user_message().to_string()
            }
        }
    }
}
