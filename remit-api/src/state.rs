use std::sync::Arc;
use tokio::sync::broadcast;

use remit_accounts::{AccountSelector, LocaleTable};
use remit_core::{OrderProvider, SettingsStore};
use remit_order::{InMemoryOrderStore, OrderStatus, OrderStore, PaymentDetailsService, PaymentOrchestrator};
use remit_shared::models::events::GatewayEvent;
use remit_store::app_config::{Config, GatewayConfig};
use remit_store::{JsonFileSettingsStore, MemorySettingsStore, SettingsRepository};

#[derive(Clone)]
pub struct AppState {
    pub gateway: GatewayConfig,
    pub settings: SettingsRepository,
    pub orders: Arc<dyn OrderStore>,
    pub details: Arc<PaymentDetailsService>,
    pub orchestrator: Arc<PaymentOrchestrator>,
    pub events_tx: broadcast::Sender<GatewayEvent>,
}

impl AppState {
    /// Wire the gateway from configuration, opening the settings file when one is set
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let settings_store: Arc<dyn SettingsStore> = match &config.storage.settings_path {
            Some(path) => Arc::new(JsonFileSettingsStore::open(path).await?),
            None => Arc::new(MemorySettingsStore::new()),
        };
        let locale = LocaleTable::builtin().with_overrides(config.locale.clone());
        Self::build(config.gateway.clone(), settings_store, Arc::new(InMemoryOrderStore::new()), locale)
    }

    pub fn build(
        gateway: GatewayConfig,
        settings_store: Arc<dyn SettingsStore>,
        orders: Arc<InMemoryOrderStore>,
        locale: LocaleTable,
    ) -> anyhow::Result<Self> {
        let hold_status: OrderStatus = gateway.hold_status.parse()?;
        let (events_tx, _) = broadcast::channel(100);

        let settings = SettingsRepository::new(settings_store, &gateway.id);
        let provider: Arc<dyn OrderProvider> = orders.clone();
        let details = PaymentDetailsService::new(
            settings.clone(),
            provider,
            AccountSelector::new(locale),
            hold_status.clone(),
        )
        .with_icon_url(gateway.icon_url.as_deref());
        let orchestrator = PaymentOrchestrator::new(orders.clone(), hold_status, &gateway.return_url_base)
            .with_events(events_tx.clone());

        Ok(Self {
            gateway,
            settings,
            orders,
            details: Arc::new(details),
            orchestrator: Arc::new(orchestrator),
            events_tx,
        })
    }
}
