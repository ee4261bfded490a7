//! Command dispatcher.
//!
//! The engine's exposed boundary: typed commands from the structured
//! message route, plus a raw JSON decode path standing in for the
//! same-document custom-event fallback. Every command is acknowledged.

use std::sync::Arc;

use tracing::debug;

use lexipane_protocols::command::{Command, CommandAck};
use lexipane_protocols::error::ChannelError;

use crate::session::SessionController;

/// Routes commands to the session controller and panel.
pub struct CommandDispatcher {
    controller: Arc<SessionController>,
}

impl CommandDispatcher {
    pub fn new(controller: Arc<SessionController>) -> Self {
        Self { controller }
    }

    /// Handle one typed command.
    pub async fn dispatch(&self, command: Command) -> CommandAck {
        debug!("Dispatching command: {:?}", command);
        match command {
            Command::ExplainText { text } => {
                if text.trim().is_empty() {
                    return CommandAck::err(ChannelError::EmptyText.to_string());
                }
                // A concurrent-request refusal is an informational notice
                // on the panel, not a command failure.
                self.controller.explain(&text).await;
                CommandAck::ok()
            }
            Command::OpenSidebar => {
                self.controller.panel().open_welcome();
                CommandAck::ok()
            }
            Command::ResetPluginState => {
                self.controller.reset();
                CommandAck::ok()
            }
        }
    }

    /// Fallback route: decode a raw JSON value, then dispatch.
    pub async fn dispatch_value(&self, value: serde_json::Value) -> CommandAck {
        match serde_json::from_value::<Command>(value) {
            Ok(command) => self.dispatch(command).await,
            Err(e) => CommandAck::err(ChannelError::InvalidPayload(e.to_string()).to_string()),
        }
    }
}
