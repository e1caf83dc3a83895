pub mod models;
pub mod repository;
pub mod manager;
pub mod orchestrator;
pub mod details;
pub mod preview;

pub use models::{BillingAddress, Order, OrderNote, OrderStatus};
pub use repository::OrderStore;
pub use manager::{InMemoryOrderStore, OrderError};
pub use orchestrator::{PaymentOrchestrator, PaymentOutcome};
pub use details::{DetailsFormat, PaymentDetailsService, PaymentMethodInfo};
pub use preview::{preview_orders, PreviewEntry};
