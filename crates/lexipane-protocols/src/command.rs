//! Command protocol exposed to the host page.
//!
//! Commands arrive either as structured messages or, when structured
//! messaging is unavailable, as raw JSON values from the same-document
//! fallback route. Both decode into [`Command`]. Every command is
//! acknowledged with a [`CommandAck`].

use serde::{Deserialize, Serialize};

/// A command from the host page or background context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Command {
    /// Explain the given text in the side panel.
    ExplainText { text: String },
    /// Open the side panel with the welcome view.
    OpenSidebar,
    /// Reset all plugin state: release the session, hide the panel and
    /// the floating trigger.
    ResetPluginState,
}

/// Acknowledgement for a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandAck {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CommandAck {
    pub fn ok() -> Self {
        Self { success: true, error: None }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}
