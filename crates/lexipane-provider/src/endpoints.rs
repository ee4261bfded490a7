//! Declarative per-provider endpoint tables.
//!
//! Each provider resolves to an ordered list of candidate endpoints with
//! the model name already mapped for that host, so the orchestrator can
//! walk any provider's chain without provider-specific branches.

use lexipane_protocols::settings::{ProviderKind, ProviderSettings};

const OPENAI_ENDPOINTS: &[&str] = &[
    "https://api.openai.com/v1/chat/completions",
    "https://api.openai-proxy.com/v1/chat/completions",
];

const DEEPSEEK_ENDPOINTS: &[&str] = &[
    "https://api.deepseek.com/chat/completions",
    "https://api.deepseek.com/v1/chat/completions",
    "https://api.deepinfra.com/v1/openai/chat/completions",
];

const FREE_ENDPOINTS: &[&str] = &[
    "https://api.free-explainer.com/explain",
    "https://api-backup.free-explainer.com/explain",
];

const OPENAI_DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Which wire contract a plan speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderRoute {
    /// Shared no-credential service, `{text, prompt, max_tokens}` in,
    /// `{explanation}` out.
    Free,
    /// OpenAI-compatible chat completions with a bearer credential.
    OpenAi,
    /// DeepSeek chat completions (also OpenAI-compatible on the wire).
    DeepSeek,
}

/// One candidate endpoint with its host-mapped model name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub url: String,
    pub model: String,
}

/// Resolved provider plan: the route, the ordered endpoint chain and the
/// credential to present, built once per session from the settings.
#[derive(Debug, Clone)]
pub struct ProviderPlan {
    pub route: ProviderRoute,
    pub endpoints: Vec<Endpoint>,
    pub credential: Option<String>,
}

impl ProviderPlan {
    /// Build the plan the settings select, or `None` when the session must
    /// take the local-stub path.
    pub fn from_settings(settings: &ProviderSettings) -> Option<Self> {
        if !settings.provider_path_available() {
            return None;
        }

        if settings.use_free_api {
            return Some(Self {
                route: ProviderRoute::Free,
                endpoints: Self::table(FREE_ENDPOINTS, ""),
                credential: None,
            });
        }

        let credential = settings.credential()?.to_string();
        match settings.api_type {
            ProviderKind::OpenAi => Some(Self {
                route: ProviderRoute::OpenAi,
                endpoints: Self::table(OPENAI_ENDPOINTS, OPENAI_DEFAULT_MODEL),
                credential: Some(credential),
            }),
            ProviderKind::DeepSeek => Some(Self {
                route: ProviderRoute::DeepSeek,
                endpoints: DEEPSEEK_ENDPOINTS
                    .iter()
                    .map(|url| Endpoint {
                        url: (*url).to_string(),
                        model: map_model_for_host(url, &settings.deepseek_model),
                    })
                    .collect(),
                credential: Some(credential),
            }),
        }
    }

    fn table(urls: &[&str], model: &str) -> Vec<Endpoint> {
        urls.iter()
            .map(|url| Endpoint { url: (*url).to_string(), model: model.to_string() })
            .collect()
    }

    /// Same plan with a replacement endpoint chain. Used by tests to point
    /// a plan at mock servers.
    pub fn with_endpoints(mut self, endpoints: Vec<Endpoint>) -> Self {
        self.endpoints = endpoints;
        self
    }
}

/// Map a requested model name onto what the host actually serves.
///
/// DeepInfra fronts the DeepSeek models under its own namespace.
fn map_model_for_host(url: &str, model: &str) -> String {
    if !url.contains("deepinfra.com") {
        return model.to_string();
    }
    match model {
        "deepseek-chat" | "deepseek-v3" => "deepseek-ai/DeepSeek-V3".to_string(),
        "deepseek-chat-v3-0324" => "deepseek-ai/DeepSeek-V3-0324".to_string(),
        "deepseek-coder" => "deepseek-ai/DeepSeek-Coder-V2".to_string(),
        _ => "deepseek-ai/DeepSeek-V3".to_string(),
    }
}
