use std::sync::Arc;

use anyhow::Context;
use proofread_app::config::{AppConfig, Credentials};
use proofread_app::services::AppServices;
use proofread_app::web;
use proofread_logging::{parse_level, proofread_info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env = |var: &str| std::env::var(var).ok();

    let config = AppConfig::load(env).context("failed to load configuration")?;
    proofread_logging::initialize(
        config.log.destination,
        parse_level(&config.log.level),
        &config.log.file,
    );

    // Fail before binding when the primary credential is missing.
    let credentials = Credentials::from_lookup(env)?;
    let services = AppServices::from_config(&config, credentials)
        .context("failed to construct provider clients")?;
    let addr = config.bind_addr()?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    proofread_info!("listening on http://{}", addr);
    axum::serve(listener, web::router(Arc::new(services)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    proofread_info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // Without a signal handler the server runs until killed.
        std::future::pending::<()>().await;
    }
}
