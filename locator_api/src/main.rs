use locator_api::app;
use locator_api::state::AppState;
use shared::error::InitializationError;
use shared::facility::FacilityTable;
use shared::{init_tracing, load_config};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), InitializationError> {
    init_tracing()?;

    let config = load_config()?;
    let facilities = FacilityTable::load(&config.facilities)?;
    let state = AppState::new(facilities, &config.search);

    let listen_addr = config.server.listen_addr.as_str();
    info!(name: "server.starting", "starting server at {listen_addr}");
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shared::shutdown_listener())
        .await?;

    Ok(())
}
