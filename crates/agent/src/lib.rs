//! Agent runtime - slot extraction, language routing, and orchestration
//!
//! This crate is the "brain" of the frontdesk assistants:
//! - Extracts conversational slots (tile name, size, quantity) from free
//!   text (`extract`)
//! - Detects the input language with Unicode-range overrides ahead of a
//!   statistical classifier (`detect`)
//! - Renders the per-persona, per-language system prompt (`prompts`)
//! - Orchestrates one user turn end to end (`runtime`): guard → side
//!   branches → extraction → prompt render → completion call → history
//!
//! # Safety Principle
//!
//! The model is strictly a text generator. Slot state, history bounds, and
//! the order-confirmation trigger are deterministic decisions made here,
//! never delegated to the model.

pub mod detect;
pub mod extract;
pub mod notify;
pub mod prompts;
pub mod runtime;

pub use detect::LanguageDetector;
pub use extract::SlotExtractor;
pub use notify::{is_order_confirmation, OrderNotifier};
pub use prompts::PromptBuilder;
pub use runtime::{AgentError, AgentRuntime};
