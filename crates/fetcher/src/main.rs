use herald_common::config::AppConfig;
use herald_fetcher::run::Herald;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "herald_fetcher=info,herald_engine=info".into()),
        )
        .json()
        .init();

    tracing::info!("OrderHerald starting...");

    let config = AppConfig::from_env()?;

    // Sub-operation failures are swallowed and diagnosed inside the run;
    // the process exits 0 on every completed invocation.
    Herald::from_config(&config).run_once().await;

    tracing::info!("OrderHerald finished.");
    Ok(())
}
