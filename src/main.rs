//! Lexipane - explanation-retrieval engine
//!
//! CLI entry point: wires the settings store, provider pipeline and
//! session runtime together and renders the panel states to the terminal.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use lexipane_config::{
    SettingsClient, SettingsRetryConfig, SettingsStore, StoreSettingsChannel,
};
use lexipane_protocols::status::{StatusLevel, StatusLog};
use lexipane_provider::{
    ConnectionTester, EndpointClient, Orchestrator, OrchestratorConfig, ProviderPlan,
};
use lexipane_runtime::{Panel, PanelView, SessionConfig, SessionController, Tab};

/// Lexipane CLI.
#[derive(Parser)]
#[command(name = "lexipane")]
#[command(about = "Structured explanations for English text")]
#[command(version)]
struct Cli {
    /// Settings file path
    #[arg(short, long, default_value = "config/settings.toml", global = true)]
    settings: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Explain a piece of English text
    Explain {
        /// The text to explain
        text: String,

        /// Print the diagnostic status log after the result
        #[arg(long)]
        verbose: bool,
    },

    /// Test the configured API credential against its first endpoint
    TestApi,

    /// Print the resolved settings
    Settings,
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let store = SettingsStore::new(&cli.settings);

    match cli.command {
        Commands::Explain { text, verbose } => explain(store, &text, verbose).await,
        Commands::TestApi => test_api(store).await,
        Commands::Settings => show_settings(store),
    }
}

/// Run one explanation session and render the panel to the terminal.
async fn explain(store: SettingsStore, text: &str, verbose: bool) -> anyhow::Result<()> {
    let settings = SettingsClient::new(
        Arc::new(StoreSettingsChannel::new(store)),
        SettingsRetryConfig::default(),
    );
    let orchestrator = Orchestrator::new(EndpointClient::new(), OrchestratorConfig::default());
    let panel = Arc::new(Panel::new());
    let log = Arc::new(StatusLog::new());
    let controller = SessionController::new(
        settings,
        orchestrator,
        panel.clone(),
        log.clone(),
        SessionConfig::default(),
    );

    info!("Explaining {} chars of text", text.len());
    controller.explain(text).await;

    render_panel(&panel, text);

    if verbose {
        render_log(&log);
    }

    if matches!(panel.view(), PanelView::ErrorResult { .. }) {
        std::process::exit(1);
    }
    Ok(())
}

/// Render the final panel view.
fn render_panel(panel: &Panel, original_text: &str) {
    println!("Original text");
    println!("{}", "=".repeat(60));
    println!("{original_text}\n");

    match panel.view() {
        PanelView::Result { explanation, active_tab }
        | PanelView::ErrorResult { explanation, active_tab, .. } => {
            if let PanelView::ErrorResult { banner, .. } = panel.view() {
                println!("! {}", banner.headline());
                for hint in &banner.hints {
                    println!("  - {hint}");
                }
                println!("  (technical: {})\n", banner.technical);
            }

            // The active view first, then the others; in terminal mode all
            // three are printed.
            render_tab(&explanation, active_tab);
            for tab in [Tab::Meaning, Tab::Vocabulary, Tab::Alternatives] {
                if tab != active_tab {
                    render_tab(&explanation, tab);
                }
            }
        }
        other => println!("(panel state: {other:?})"),
    }

    for notice in panel.notices() {
        println!("note: {notice}");
    }
}

fn render_tab(explanation: &lexipane_protocols::explanation::CanonicalExplanation, tab: Tab) {
    match tab {
        Tab::Meaning => {
            println!("Meaning & Usage");
            println!("{}", "-".repeat(60));
            println!("{}\n", explanation.meaning.definition);
            println!("Usage context:");
            for line in &explanation.meaning.usage_context {
                println!("  - {line}");
            }
            println!("Grammar structure:");
            for line in &explanation.meaning.grammar_structure {
                println!("  - {line}");
            }
            println!("Usage notes:");
            for line in &explanation.meaning.usage_notes {
                println!("  - {line}");
            }
            println!();
        }
        Tab::Vocabulary => {
            println!("Key Vocabulary");
            println!("{}", "-".repeat(60));
            for entry in &explanation.vocabulary {
                println!("{} ({})", entry.word, entry.part_of_speech);
                println!("  {}", entry.definition);
                println!("  Usage: {}", entry.usage_example);
                println!("  Synonyms: {}", entry.synonyms);
            }
            println!();
        }
        Tab::Alternatives => {
            println!("Alternative Expressions");
            println!("{}", "-".repeat(60));
            for entry in &explanation.alternatives {
                println!("{} [{:?}]", entry.phrase, entry.formality);
                println!("  {}", entry.description);
                println!("  Example: {}", entry.example);
            }
            println!();
        }
    }
}

/// Print the diagnostic status log.
fn render_log(log: &StatusLog) {
    println!("Status log");
    println!("{}", "-".repeat(60));
    for entry in log.entries() {
        let level = match entry.level {
            StatusLevel::Info => "info",
            StatusLevel::Success => "ok",
            StatusLevel::Warning => "warn",
            StatusLevel::Error => "error",
        };
        println!("{} [{level:5}] {}", entry.at.format("%H:%M:%S%.3f"), entry.message);
    }
    for attempt in log.attempts() {
        println!(
            "attempt {} {} -> {:?} ({} ms)",
            attempt.ordinal + 1,
            attempt.url,
            attempt.outcome,
            attempt.latency.as_millis()
        );
    }
}

/// Fire a one-shot credential test against the first configured endpoint.
async fn test_api(store: SettingsStore) -> anyhow::Result<()> {
    let settings = store.load().context("failed to load settings")?;
    let Some(plan) = ProviderPlan::from_settings(&settings) else {
        bail!("API use is not enabled in the settings");
    };
    let Some(credential) = plan.credential.as_deref() else {
        bail!("the free tier needs no credential test");
    };

    let endpoint = &plan.endpoints[0];
    println!("Testing {} against {}", settings.api_type.as_str(), endpoint.url);

    let ack = ConnectionTester::new()
        .test(&endpoint.url, credential, &endpoint.model)
        .await;
    if ack.success {
        println!("Connection OK");
        Ok(())
    } else {
        bail!("connection test failed: {}", ack.error.unwrap_or_default());
    }
}

/// Print the resolved settings, credential redacted.
fn show_settings(store: SettingsStore) -> anyhow::Result<()> {
    let settings = store.load().context("failed to load settings")?;
    println!("Settings file: {}", store.path().display());
    println!("  use_api:        {}", settings.use_api);
    println!("  use_free_api:   {}", settings.use_free_api);
    println!("  api_type:       {}", settings.api_type.as_str());
    println!("  api_key:        {}", redact(&settings.api_key));
    println!("  deepseek_key:   {}", redact(&settings.deepseek_api_key));
    println!("  deepseek_model: {}", settings.deepseek_model);
    Ok(())
}

fn redact(key: &str) -> String {
    if key.is_empty() {
        "(not set)".to_string()
    } else {
        let prefix: String = key.chars().take(5).collect();
        format!("{prefix}...")
    }
}
