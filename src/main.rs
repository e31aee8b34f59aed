mod adverts;
mod app;
mod config;
mod db;
mod error;
mod extract;
mod state;
mod users;

use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

const DEFAULT_LOG_FILTER: &str = "adboard=debug,axum=info,tower_http=info";

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let fmt = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => fmt.with_target(false).json().init(),
        LogFormat::Plain => fmt.init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_tracing(LogFormat::from_env());

    let (state, pg) = state::AppState::init().await?;
    let config = state.config.clone();

    let app = app::build_app(state);
    app::serve(app, &config.host, config.port).await?;

    pg.pool().close().await;
    tracing::info!("database pool closed");
    Ok(())
}
