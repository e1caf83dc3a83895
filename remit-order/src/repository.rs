use async_trait::async_trait;
use remit_core::{CoreResult, OrderProvider};
use uuid::Uuid;

use crate::manager::OrderError;
use crate::models::{Order, OrderStatus};

/// Order access the gateway needs beyond resolving a context
#[async_trait]
pub trait OrderStore: OrderProvider {
    async fn insert(&self, order: Order) -> CoreResult<Uuid>;

    async fn get_order(&self, id: Uuid) -> CoreResult<Option<Order>>;

    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
        note: Option<&str>,
    ) -> CoreResult<Order>;

    /// Check and update under one write: fails with `InvalidTransition` when the order
    /// currently has one of the `blocked` statuses, so concurrent callers cannot both pass.
    async fn transition_if(
        &self,
        id: Uuid,
        blocked: &[OrderStatus],
        status: OrderStatus,
        note: Option<&str>,
    ) -> Result<Order, OrderError>;

    /// Newest first, at most `limit` orders
    async fn list_by_payment_method(&self, payment_method: &str, limit: usize) -> CoreResult<Vec<Order>>;
}
