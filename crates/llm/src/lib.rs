//! Completion client - the single outbound call to a hosted model API.
//!
//! Two providers are supported, selected by `[llm].provider`:
//! - **chat_completions** - an OpenAI-compatible `/chat/completions`
//!   endpoint taking the full turn sequence (the primary, hosted path)
//! - **generate** - an Ollama-style `/api/generate` endpoint taking one
//!   flattened prompt string (self-hosted fallback)
//!
//! Neither path streams, retries, or backs off: one request, one response,
//! and any failure is classified into an `LlmError` kind that still renders
//! a safe user-facing message at the session edge.

pub mod client;
pub mod error;
pub mod proto;

pub use client::{build_client, ChatCompletionsClient, CompletionClient, GenerateClient};
pub use error::LlmError;
