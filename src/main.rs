use marquee_api::api::{create_router, AppState};
use marquee_api::config::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("marquee_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let state = AppState::new(&config);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "relay server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
