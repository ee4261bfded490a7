//! Endpoint fallback orchestrator.
//!
//! Walks a provider's ordered endpoint chain until one yields a
//! schema-valid explanation or the chain is exhausted. Exactly one attempt
//! per endpoint, each under its own timeout, so total wall time is bounded
//! by the chain length times the per-attempt bound.

use std::time::{Duration, Instant};

use tokio::time::timeout;
use tracing::{debug, warn};

use lexipane_protocols::error::ExplainError;
use lexipane_protocols::explanation::CanonicalExplanation;
use lexipane_protocols::session::{AttemptOutcome, EndpointAttempt};
use lexipane_protocols::status::StatusLog;

use crate::client::EndpointClient;
use crate::endpoints::{ProviderPlan, ProviderRoute};
use crate::normalizer::normalize;

/// Orchestrator configuration.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Bound on each endpoint attempt. The timer cancels only its own
    /// attempt, never a sibling.
    pub attempt_timeout: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self { attempt_timeout: Duration::from_secs(30) }
    }
}

/// Walks endpoint fallback chains for any provider plan.
pub struct Orchestrator {
    client: EndpointClient,
    config: OrchestratorConfig,
}

impl Orchestrator {
    pub fn new(client: EndpointClient, config: OrchestratorConfig) -> Self {
        Self { client, config }
    }

    /// Resolve an explanation for `text` through the plan's endpoint chain.
    ///
    /// Auth and rate-limit failures are terminal on the last endpoint and
    /// surface with their exact classification; every other failure
    /// advances to the next endpoint. On exhaustion the last recorded
    /// error is returned.
    pub async fn resolve(
        &self,
        text: &str,
        plan: &ProviderPlan,
        log: &StatusLog,
    ) -> Result<CanonicalExplanation, ExplainError> {
        let total = plan.endpoints.len();
        let mut last_error: Option<ExplainError> = None;

        for (ordinal, endpoint) in plan.endpoints.iter().enumerate() {
            let is_last = ordinal + 1 == total;
            log.info(format!("Sending request to {}", endpoint.url));

            let started = Instant::now();
            let result = self.attempt(text, plan, ordinal).await;
            let latency = started.elapsed();

            match result {
                Ok(raw) => {
                    log.info(format!("Received reply ({} chars), normalizing", raw.len()));
                    match normalize(&raw) {
                        Ok(explanation) => {
                            log.record_attempt(EndpointAttempt {
                                url: endpoint.url.clone(),
                                ordinal,
                                outcome: AttemptOutcome::Success,
                                latency,
                            });
                            log.success(format!(
                                "Explanation resolved via {} in {:.1}s",
                                endpoint.url,
                                latency.as_secs_f64()
                            ));
                            return Ok(explanation);
                        }
                        Err(e) => {
                            log.record_attempt(EndpointAttempt {
                                url: endpoint.url.clone(),
                                ordinal,
                                outcome: AttemptOutcome::MalformedResponse,
                                latency,
                            });
                            log.error(format!("{e}"));
                            warn!("Normalization failed for {}: {}", endpoint.url, e);
                            last_error = Some(e);
                        }
                    }
                }
                Err(e) => {
                    log.record_attempt(EndpointAttempt {
                        url: endpoint.url.clone(),
                        ordinal,
                        outcome: e.attempt_outcome(),
                        latency,
                    });

                    let terminal = !e.advances_fallback();
                    if terminal && is_last {
                        log.error(format!("{e}"));
                        return Err(e);
                    }

                    debug!("Attempt {} of {} failed: {}", ordinal + 1, total, e);
                    if !is_last {
                        log.warning(format!("{e}, trying next endpoint"));
                    } else {
                        log.error(format!("{e}"));
                    }
                    last_error = Some(e);
                }
            }
        }

        log.error("All endpoints exhausted");
        Err(last_error.unwrap_or(ExplainError::ProviderUnavailable))
    }

    /// One endpoint attempt under its own cancellation scope.
    async fn attempt(
        &self,
        text: &str,
        plan: &ProviderPlan,
        ordinal: usize,
    ) -> Result<String, ExplainError> {
        let endpoint = &plan.endpoints[ordinal];
        let call = async {
            match plan.route {
                ProviderRoute::Free => self.client.free_reply(endpoint, text).await,
                ProviderRoute::OpenAi | ProviderRoute::DeepSeek => {
                    self.client
                        .chat_reply(endpoint, plan.credential.as_deref(), text)
                        .await
                }
            }
        };

        match timeout(self.config.attempt_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ExplainError::Timeout(self.config.attempt_timeout.as_secs())),
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
