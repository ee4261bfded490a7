//! Explanation session controller.
//!
//! Orchestrates one user-initiated request end to end: single-flight
//! admission, settings lookup under the session timeout, routing to the
//! provider pipeline or the local stub, and degraded rendering on failure.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use lexipane_config::SettingsClient;
use lexipane_protocols::error::ExplainError;
use lexipane_protocols::session::{ExplanationRequest, SessionState};
use lexipane_protocols::settings::ProviderSettings;
use lexipane_protocols::status::StatusLog;
use lexipane_provider::{Orchestrator, ProviderPlan};

use crate::banner::ErrorBanner;
use crate::panel::Panel;
use crate::stub::local_explanation;

/// Builds a provider plan from resolved settings. Injectable so tests can
/// point plans at mock servers.
pub type Planner = Arc<dyn Fn(&ProviderSettings) -> Option<ProviderPlan> + Send + Sync>;

/// Session controller configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Bound on the settings lookup only. Provider calls are bounded by
    /// the orchestrator's per-endpoint timeouts instead, so a slow but
    /// successful call is never truncated.
    pub settings_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { settings_timeout: Duration::from_secs(60) }
    }
}

/// How a call to [`SessionController::explain`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The panel now shows a result (possibly the degraded stub).
    Rendered,
    /// Refused: another session was in flight, or the text was empty.
    Rejected,
}

/// Owns the per-request explanation lifecycle.
pub struct SessionController {
    state: Mutex<SessionState>,
    settings: SettingsClient,
    orchestrator: Orchestrator,
    planner: Planner,
    panel: Arc<Panel>,
    log: Arc<StatusLog>,
    config: SessionConfig,
}

/// Releases the session token on every exit path.
struct SessionGuard<'a> {
    state: &'a Mutex<SessionState>,
}

impl Drop for SessionGuard<'_> {
    fn drop(&mut self) {
        *self.state.lock() = SessionState::Idle;
    }
}

impl SessionController {
    pub fn new(
        settings: SettingsClient,
        orchestrator: Orchestrator,
        panel: Arc<Panel>,
        log: Arc<StatusLog>,
        config: SessionConfig,
    ) -> Self {
        Self {
            state: Mutex::new(SessionState::Idle),
            settings,
            orchestrator,
            planner: Arc::new(|settings| ProviderPlan::from_settings(settings)),
            panel,
            log,
            config,
        }
    }

    /// Replace the plan builder. Used by tests to redirect endpoints.
    pub fn with_planner(mut self, planner: Planner) -> Self {
        self.planner = planner;
        self
    }

    pub fn panel(&self) -> &Arc<Panel> {
        &self.panel
    }

    pub fn log(&self) -> &Arc<StatusLog> {
        &self.log
    }

    pub fn state(&self) -> SessionState {
        *self.state.lock()
    }

    /// Run one explanation session.
    ///
    /// Entry is refused, not queued, while another session is in flight;
    /// the refusal surfaces as an informational notice on the current view
    /// and leaves the in-flight session untouched.
    pub async fn explain(&self, text: &str) -> SessionOutcome {
        let Some(request) = ExplanationRequest::new(text) else {
            self.panel.push_notice("Nothing to explain: the selection is empty");
            return SessionOutcome::Rejected;
        };

        // Single-flight admission. The check and the flag update happen
        // under one lock acquisition, before any suspension point.
        {
            let mut state = self.state.lock();
            if state.is_active() {
                info!("Rejecting concurrent explanation request");
                self.panel
                    .push_notice("Still processing the previous request, please wait");
                self.log.info(ExplainError::ConcurrentRequest.to_string());
                return SessionOutcome::Rejected;
            }
            *state = SessionState::Active(request.request_id);
        }
        let _guard = SessionGuard { state: &self.state };

        self.panel.show_loading();
        self.log.info(format!(
            "Processing explanation request ({} chars)",
            request.source_text.len()
        ));

        let settings = match self.lookup_settings().await {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Settings lookup failed, falling back to local stub: {}", e);
                self.render_degraded(&request, &e);
                return SessionOutcome::Rendered;
            }
        };
        self.log.info(format!(
            "Settings resolved in {:.1}s",
            request.elapsed_seconds()
        ));

        match (self.planner)(&settings) {
            None => {
                self.log.info("API disabled, using local explanation");
                self.panel.show_result(local_explanation(&request.source_text));
            }
            Some(plan) => {
                debug!("Provider plan: {:?} with {} endpoints", plan.route, plan.endpoints.len());
                match self
                    .orchestrator
                    .resolve(&request.source_text, &plan, &self.log)
                    .await
                {
                    Ok(explanation) => {
                        self.log.success(format!(
                            "Request completed in {:.1}s",
                            request.elapsed_seconds()
                        ));
                        self.panel.show_result(explanation);
                    }
                    Err(e) => {
                        warn!("Provider pipeline failed: {}", e);
                        self.render_degraded(&request, &e);
                    }
                }
            }
        }

        SessionOutcome::Rendered
    }

    /// Settings lookup raced against the session timeout. The timeout
    /// covers only this lookup, per the session's concurrency contract.
    async fn lookup_settings(&self) -> Result<ProviderSettings, ExplainError> {
        self.log.info("Loading API settings");
        match timeout(self.config.settings_timeout, self.settings.fetch()).await {
            Ok(Ok(settings)) => Ok(settings),
            Ok(Err(e)) => {
                self.log.error(format!("Failed to load settings: {e}"));
                Err(ExplainError::SettingsUnavailable(e.to_string()))
            }
            Err(_) => {
                let seconds = self.config.settings_timeout.as_secs();
                self.log.error(format!("Settings lookup timed out after {seconds}s"));
                Err(ExplainError::SettingsUnavailable(format!(
                    "timed out after {seconds}s"
                )))
            }
        }
    }

    /// Degrade to the stub with a categorized banner prefixed onto its
    /// meaning, never a bare error screen.
    fn render_degraded(&self, request: &ExplanationRequest, error: &ExplainError) {
        let banner = ErrorBanner::from_error(error);
        let stub = local_explanation(&request.source_text);
        let augmented = stub.with_meaning_banner(&banner.headline());
        self.panel.show_error_result(augmented, banner);
    }

    /// Reset plugin state: release the session token and restore the idle
    /// panel.
    pub fn reset(&self) {
        info!("Resetting plugin state");
        *self.state.lock() = SessionState::Idle;
        self.panel.reset();
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
