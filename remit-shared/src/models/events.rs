use uuid::Uuid;

/// Events broadcast by the gateway for whoever is listening (mailers, audit log, SSE).
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GatewayEvent {
    OrderOnHold(OrderOnHoldEvent),
    PaymentCompleted(PaymentCompletedEvent),
    SettingsSaved(SettingsSavedEvent),
    ConfigurationWiped(ConfigurationWipedEvent),
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct OrderOnHoldEvent {
    pub order_id: Uuid,
    pub status: String,
    pub note: String,
    pub total: i64,
    pub currency: String,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct PaymentCompletedEvent {
    pub order_id: Uuid,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct SettingsSavedEvent {
    pub gateway_id: String,
    pub accounts: usize,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct ConfigurationWipedEvent {
    pub gateway_id: String,
    pub timestamp: i64,
}

impl GatewayEvent {
    pub fn order_on_hold(order_id: Uuid, status: &str, note: &str, total: i64, currency: &str) -> Self {
        GatewayEvent::OrderOnHold(OrderOnHoldEvent {
            order_id,
            status: status.to_string(),
            note: note.to_string(),
            total,
            currency: currency.to_string(),
            timestamp: chrono::Utc::now().timestamp(),
        })
    }

    pub fn payment_completed(order_id: Uuid) -> Self {
        GatewayEvent::PaymentCompleted(PaymentCompletedEvent {
            order_id,
            timestamp: chrono::Utc::now().timestamp(),
        })
    }

    pub fn settings_saved(gateway_id: &str, accounts: usize) -> Self {
        GatewayEvent::SettingsSaved(SettingsSavedEvent {
            gateway_id: gateway_id.to_string(),
            accounts,
            timestamp: chrono::Utc::now().timestamp(),
        })
    }

    pub fn configuration_wiped(gateway_id: &str) -> Self {
        GatewayEvent::ConfigurationWiped(ConfigurationWipedEvent {
            gateway_id: gateway_id.to_string(),
            timestamp: chrono::Utc::now().timestamp(),
        })
    }
}
