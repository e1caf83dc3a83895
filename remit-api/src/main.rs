use std::net::SocketAddr;

use remit_api::{app, state::AppState};
use remit_shared::models::events::GatewayEvent;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "remit_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = remit_store::app_config::Config::load()?;
    tracing::info!("Starting bank transfer gateway '{}' on port {}", config.gateway.id, config.server.port);

    let app_state = AppState::from_config(&config).await?;

    // Gateway event log
    let mut events = app_state.events_tx.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(GatewayEvent::OrderOnHold(e)) => {
                    tracing::info!("Order {} on hold ({} {})", e.order_id, e.total, e.currency)
                }
                Ok(GatewayEvent::PaymentCompleted(e)) => tracing::info!("Order {} paid", e.order_id),
                Ok(GatewayEvent::SettingsSaved(e)) => {
                    tracing::info!("Gateway {} saved with {} accounts", e.gateway_id, e.accounts)
                }
                Ok(GatewayEvent::ConfigurationWiped(e)) => {
                    tracing::warn!("Gateway {} configuration wiped", e.gateway_id)
                }
                Err(RecvError::Lagged(skipped)) => tracing::warn!("Event log skipped {} events", skipped),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
