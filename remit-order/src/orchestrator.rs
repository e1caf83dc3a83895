use remit_shared::models::events::GatewayEvent;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::info;
use uuid::Uuid;

use crate::manager::OrderError;
use crate::models::OrderStatus;
use crate::repository::OrderStore;

pub const HOLD_NOTE: &str = "Awaiting bank transfer payment.";

/// Statuses a checkout submission can no longer move an order out of
const SETTLED: [OrderStatus; 3] = [OrderStatus::Paid, OrderStatus::Completed, OrderStatus::Cancelled];

/// Result handed back to checkout
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PaymentOutcome {
    pub result: String,
    pub redirect: String,
    pub status: OrderStatus,
}

/// Moves an order forward when the customer submits checkout with bank transfer.
pub struct PaymentOrchestrator {
    orders: Arc<dyn OrderStore>,
    hold_status: OrderStatus,
    return_url_base: String,
    events: Option<broadcast::Sender<GatewayEvent>>,
}

impl PaymentOrchestrator {
    pub fn new(orders: Arc<dyn OrderStore>, hold_status: OrderStatus, return_url_base: &str) -> Self {
        Self {
            orders,
            hold_status,
            return_url_base: return_url_base.trim_end_matches('/').to_string(),
            events: None,
        }
    }

    pub fn with_events(mut self, events: broadcast::Sender<GatewayEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn hold_status(&self) -> &OrderStatus {
        &self.hold_status
    }

    /// Thank-you page URL for an order
    pub fn return_url(&self, order_id: Uuid) -> String {
        format!("{}/checkout/order-received/{}", self.return_url_base, order_id)
    }

    /// A positive total waits for the transfer in the hold status; a zero total is
    /// complete straight away.
    pub async fn process_payment(&self, order_id: Uuid) -> Result<PaymentOutcome, OrderError> {
        let order = self
            .orders
            .get_order(order_id)
            .await?
            .ok_or(OrderError::NotFound(order_id))?;

        let (target, note) = if order.total > 0 {
            (self.hold_status.clone(), Some(HOLD_NOTE))
        } else {
            (OrderStatus::Paid, None)
        };
        let updated = self
            .orders
            .transition_if(order_id, &SETTLED, target, note)
            .await?;

        let event = if updated.total > 0 {
            info!("Order {} moved to {} awaiting transfer", order_id, updated.status);
            GatewayEvent::order_on_hold(
                order_id,
                updated.status.as_str(),
                HOLD_NOTE,
                updated.total,
                &updated.currency,
            )
        } else {
            info!("Order {} has a zero total, payment complete", order_id);
            GatewayEvent::payment_completed(order_id)
        };
        let status = updated.status;

        if let Some(tx) = &self.events {
            // No subscribers is fine
            let _ = tx.send(event);
        }

        Ok(PaymentOutcome {
            result: "success".to_string(),
            redirect: self.return_url(order_id),
            status,
        })
    }
}
