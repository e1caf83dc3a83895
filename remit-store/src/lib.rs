pub mod app_config;
pub mod settings_store;
pub mod settings_repo;
pub mod account_form;

pub use settings_store::{JsonFileSettingsStore, MemorySettingsStore};
pub use settings_repo::SettingsRepository;
pub use account_form::AccountForm;
