use remit_core::CoreResult;
use serde::{Deserialize, Serialize};

use crate::orchestrator::PaymentOrchestrator;
use crate::repository::OrderStore;

/// One line of the admin preview picker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreviewEntry {
    /// Thank-you page of the order
    pub url: String,
    pub label: String,
}

/// Latest orders paid with the gateway, so the shop owner can open their
/// payment-details page and check what customers see.
pub async fn preview_orders(
    orders: &dyn OrderStore,
    orchestrator: &PaymentOrchestrator,
    payment_method: &str,
    limit: usize,
) -> CoreResult<Vec<PreviewEntry>> {
    let orders = orders.list_by_payment_method(payment_method, limit).await?;
    Ok(orders
        .into_iter()
        .map(|order| PreviewEntry {
            url: orchestrator.return_url(order.id),
            label: format!(
                "[{}][{}] {} {} - {}",
                order.id,
                order.currency,
                order.billing.first_name,
                order.billing.last_name,
                order.billing.email
            ),
        })
        .collect())
}
