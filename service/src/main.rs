#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

use std::sync::Arc;
use std::time::Duration;

use congress_pulse_api::{
    app::build_app,
    build_info::BuildInfoProvider,
    config::Config,
    congress::HttpCongressClient,
    rest::AppState,
};
use cp_llm::{CompletionClient, OpenAiClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load and validate configuration first (fail-fast)
    let config = Config::load().map_err(|e| anyhow::anyhow!("{e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.level)?)
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "congress-pulse-api starting up"
    );

    let build_info = BuildInfoProvider::from_env().build_info();
    tracing::info!(
        version = %build_info.version,
        git_sha = %build_info.git_sha,
        build_time = %build_info.build_time,
        "resolved build metadata"
    );

    let congress = HttpCongressClient::new(&config.congress.base_url, &config.congress.api_key)
        .with_timeout(Duration::from_secs(config.congress.timeout_secs));

    let llm: Option<Arc<dyn CompletionClient>> = if config.llm.is_configured() {
        tracing::info!(model = %config.llm.model, "AI analysis and representative lookup enabled");
        Some(Arc::new(
            OpenAiClient::new(&config.llm.base_url, &config.llm.api_key)
                .with_timeout(Duration::from_secs(config.llm.timeout_secs)),
        ))
    } else {
        tracing::warn!("LLM API key not configured - AI features will return 503");
        None
    };

    let state = Arc::new(AppState {
        congress: Arc::new(congress),
        llm,
        congress_config: config.congress.clone(),
        llm_config: config.llm.clone(),
    });

    let app = build_app(state, build_info, &config);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Starting server at http://{addr}/api/v1");
    axum::serve(listener, app).await?;

    Ok(())
}
