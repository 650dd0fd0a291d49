//! Outbound side channels for the ceramics assistant.
//!
//! Two independent single-shot paths, neither of which touches the
//! completion pipeline's state:
//! - **Mail** (`mail`) - order-confirmation email over SMTP/STARTTLS,
//!   HTML body interpolating the current slot values, optional on-disk
//!   attachment. One send attempt per trigger, no retry or queuing.
//! - **Imaging** (`imaging`) - uploaded image bytes base64-encoded into a
//!   fixed-shape multipart form and POSTed to an external classification
//!   API. Failures become a structured error value; nothing propagates
//!   past the forwarder boundary.

pub mod imaging;
pub mod mail;

pub use imaging::{ImageClassification, ImageForwarder};
pub use mail::{MailError, OrderMailer};
