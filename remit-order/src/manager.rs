use async_trait::async_trait;
use remit_core::{CoreError, CoreResult, OrderContext, OrderProvider};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Order, OrderStatus};
use crate::repository::OrderStore;

/// Orders held in memory, standing in for the storefront's order database
#[derive(Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<HashMap<Uuid, Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderProvider for InMemoryOrderStore {
    async fn resolve(&self, order_id: Uuid) -> CoreResult<Option<OrderContext>> {
        let orders = self.orders.read().await;
        Ok(orders
            .get(&order_id)
            .map(|o| OrderContext::new(o.id, &o.billing.country, &o.currency)))
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, order: Order) -> CoreResult<Uuid> {
        let id = order.id;
        self.orders.write().await.insert(id, order);
        Ok(id)
    }

    async fn get_order(&self, id: Uuid) -> CoreResult<Option<Order>> {
        Ok(self.orders.read().await.get(&id).cloned())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
        note: Option<&str>,
    ) -> CoreResult<Order> {
        let mut orders = self.orders.write().await;
        let order = orders
            .get_mut(&id)
            .ok_or_else(|| CoreError::NotFound(format!("order {}", id)))?;
        order.update_status(status, note);
        Ok(order.clone())
    }

    async fn transition_if(
        &self,
        id: Uuid,
        blocked: &[OrderStatus],
        status: OrderStatus,
        note: Option<&str>,
    ) -> Result<Order, OrderError> {
        let mut orders = self.orders.write().await;
        let order = orders.get_mut(&id).ok_or(OrderError::NotFound(id))?;
        if blocked.contains(&order.status) {
            return Err(OrderError::InvalidTransition {
                from: order.status.to_string(),
                to: status.to_string(),
            });
        }
        order.update_status(status, note);
        Ok(order.clone())
    }

    async fn list_by_payment_method(&self, payment_method: &str, limit: usize) -> CoreResult<Vec<Order>> {
        let orders = self.orders.read().await;
        let mut matching: Vec<Order> = orders
            .values()
            .filter(|o| o.payment_method == payment_method)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching.truncate(limit);
        Ok(matching)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid state transition from {from} to {to}")]
    InvalidTransition {
        from: String,
        to: String,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}
