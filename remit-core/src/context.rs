use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Read-only snapshot of the order fields that drive account selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderContext {
    pub order_id: Uuid,
    /// 2-letter billing country code
    pub billing_country: String,
    /// 3-letter currency code
    pub currency: String,
}

impl OrderContext {
    pub fn new(order_id: Uuid, billing_country: &str, currency: &str) -> Self {
        Self {
            order_id,
            billing_country: billing_country.trim().to_uppercase(),
            currency: currency.trim().to_uppercase(),
        }
    }
}
