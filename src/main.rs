use anyhow::Context;
use clap::Parser; // for cli
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use medical_advisor_gateway::config::Args;
use medical_advisor_gateway::rate_limit::{RateLimiter, sweeper};
use medical_advisor_gateway::router;
use medical_advisor_gateway::state::AppState;
use medical_advisor_gateway::upstream::ChatCompletionsClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to install tracing subscriber")?;

    // parse cli arguments
    let args = Args::parse();

    let completion = ChatCompletionsClient::new(
        &args.api_base,
        args.api_key.clone(),
        Duration::from_secs(args.upstream_timeout),
    )
    .context("failed to build completion client")?;
    let endpoint = completion.endpoint().to_string();

    let rate_limiter = Arc::new(RateLimiter::new(
        args.rate_limit,
        Duration::from_secs(args.rate_window),
    ));

    // spawn the background sweeper
    if args.sweep_interval > 0 {
        let limiter = Arc::clone(&rate_limiter);
        let every = Duration::from_secs(args.sweep_interval);
        tokio::spawn(async move {
            sweeper(limiter, every).await;
        });
    }

    // creating shared state
    let state = Arc::new(AppState {
        completion: Arc::new(completion),
        model: args.model.clone(),
        rate_limiter,
        trust_proxy: args.trust_proxy,
    });

    let app = router(Arc::clone(&state));

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("Server running at: http://localhost:{}", args.port);
    tracing::info!(endpoint = %endpoint, model = %args.model, "forwarding to completion API");
    tracing::info!(
        "Rate limit: {} requests per {:?}",
        state.rate_limiter.max_requests(),
        state.rate_limiter.window()
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("server error")?;

    Ok(())
}
