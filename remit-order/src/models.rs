use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use chrono::{DateTime, Utc};

use remit_core::CoreError;

/// Order status as the storefront knows it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    /// Waiting for the customer's transfer to arrive
    OnHold,
    /// Payment complete
    Paid,
    Completed,
    Cancelled,
    Failed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::OnHold => "on-hold",
            OrderStatus::Paid => "paid",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "on-hold" | "on_hold" => Ok(OrderStatus::OnHold),
            "paid" => Ok(OrderStatus::Paid),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            "failed" => Ok(OrderStatus::Failed),
            other => Err(CoreError::Validation(format!("unknown order status: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BillingAddress {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// 2-letter country code
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderNote {
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// The slice of a storefront order this gateway reads and updates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub payment_method: String,
    pub status: OrderStatus,
    /// Total in minor units
    pub total: i64,
    pub currency: String,
    pub billing: BillingAddress,
    pub notes: Vec<OrderNote>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn new(payment_method: &str, total: i64, currency: &str, billing: BillingAddress) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            payment_method: payment_method.to_string(),
            status: OrderStatus::Pending,
            total,
            currency: currency.trim().to_uppercase(),
            billing,
            notes: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Update order status, recording a note when one is given
    pub fn update_status(&mut self, new_status: OrderStatus, note: Option<&str>) {
        self.status = new_status;
        if let Some(text) = note {
            self.notes.push(OrderNote {
                text: text.to_string(),
                created_at: Utc::now(),
            });
        }
        self.updated_at = Utc::now();
    }

    pub fn has_status(&self, status: &OrderStatus) -> bool {
        &self.status == status
    }
}
