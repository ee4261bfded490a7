//! # Lexipane Protocols
//!
//! Shared definitions for the Lexipane explanation engine: the canonical
//! explanation record, per-session request types, provider settings, the
//! command protocol exposed to the host page, and the error taxonomy.
//! Contains data types only - pipeline implementations live in the
//! `lexipane-provider` and `lexipane-runtime` crates.

pub mod command;
pub mod error;
pub mod explanation;
pub mod session;
pub mod settings;
pub mod status;

pub use command::{Command, CommandAck};
pub use explanation::{AltEntry, CanonicalExplanation, Formality, Meaning, VocabEntry};
pub use session::{AttemptOutcome, EndpointAttempt, ExplanationRequest, SessionState};
pub use settings::{ProviderKind, ProviderSettings};
pub use status::{StatusEntry, StatusLevel, StatusLog};
pub use error::{ChannelError, ExplainError, SettingsError};
