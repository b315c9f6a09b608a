use ebyyard_menu_api::AppConfig;
use ebyyard_menu_api::api::{AppState, router};
use ebyyard_menu_api::logging::init_logging;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_logging(&config.log_level);

    let state = AppState::new(&config)?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
