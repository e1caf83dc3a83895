pub mod context;
pub mod geo;
pub mod repository;
pub mod settings;

pub use context::OrderContext;
pub use repository::{OrderProvider, SettingsStore};
pub use settings::GatewaySettings;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Settings storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
