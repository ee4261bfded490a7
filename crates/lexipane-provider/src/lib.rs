//! # Lexipane Provider
//!
//! The explanation-retrieval pipeline: builds prompts, calls provider
//! endpoints, normalizes heterogeneous replies into the canonical
//! explanation record, and walks per-provider endpoint fallback chains
//! with per-attempt timeouts.

mod api;
mod client;
mod endpoints;
mod normalizer;
mod orchestrator;
mod prompt;
mod tester;

pub use client::EndpointClient;
pub use endpoints::{Endpoint, ProviderPlan, ProviderRoute};
pub use normalizer::normalize;
pub use orchestrator::{Orchestrator, OrchestratorConfig};
pub use prompt::{SYSTEM_INSTRUCTION, build_prompt};
pub use tester::ConnectionTester;
