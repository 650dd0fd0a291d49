//! Core domain types and configuration for the frontdesk assistants.
//!
//! This crate holds everything the rest of the workspace agrees on:
//! - **Conversation** (`conversation`) - turn log with a pinned system turn
//!   and bounded history
//! - **Session** (`session`) - per-session context owning slots + history
//!   (no process-global state)
//! - **Language / Persona** (`language`) - tagged enums for the supported
//!   languages and the two assistant personas
//! - **Configuration** (`config`) - TOML file + env overrides + validation,
//!   with secrets kept behind `secrecy`
//!
//! # Key Types
//!
//! - `SessionContext` - the unit of isolation; one per chat session
//! - `ConversationState` - append-then-trim turn log
//! - `AppConfig` - effective configuration, validated fail-fast

pub mod config;
pub mod conversation;
pub mod language;
pub mod session;

pub use conversation::{ConversationState, Role, Turn};
pub use language::{Language, Persona};
pub use session::{SessionContext, SlotValues};
