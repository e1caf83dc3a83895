use remit_accounts::LocaleOverride;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    /// Extra or replacement label overrides, keyed by country code
    #[serde(default)]
    pub locale: HashMap<String, LocaleOverride>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GatewayConfig {
    /// Namespace for settings keys and the payment method id stored on orders
    #[serde(default = "default_gateway_id")]
    pub id: String,
    /// Storefront base URL; thank-you links are built from it
    pub return_url_base: String,
    /// Status an order with a positive total moves to on checkout
    #[serde(default = "default_hold_status")]
    pub hold_status: String,
    /// How many orders the admin preview lists
    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,
    pub icon_url: Option<String>,
}

fn default_gateway_id() -> String { "bank_transfer".to_string() }
fn default_hold_status() -> String { "on-hold".to_string() }
fn default_preview_limit() -> usize { 25 }

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageConfig {
    /// JSON file for settings; in-memory when unset
    pub settings_path: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Current environment file, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `REMIT__GATEWAY__HOLD_STATUS=pending`
            .add_source(environment())
            .build()?;

        s.try_deserialize()
    }

    /// Parse a TOML document without touching the environment
    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

/// `REMIT` prefix, `__` between the prefix and every nested key
fn environment() -> config::Environment {
    config::Environment::with_prefix("REMIT").separator("__")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_gateway_section() {
        let config = Config::from_toml(
            r#"
            [server]
            port = 8080

            [gateway]
            return_url_base = "https://shop.example"
            "#,
        )
        .unwrap();

        assert_eq!(config.gateway.id, "bank_transfer");
        assert_eq!(config.gateway.hold_status, "on-hold");
        assert_eq!(config.gateway.preview_limit, 25);
        assert!(config.storage.settings_path.is_none());
        assert!(config.locale.is_empty());
    }

    #[test]
    fn test_locale_overrides() {
        let config = Config::from_toml(
            r#"
            [server]
            port = 8080

            [gateway]
            return_url_base = "https://shop.example"

            [locale.FR]
            routing_number = "Code banque"
            "#,
        )
        .unwrap();

        // key case depends on the config crate's normalization; the locale table uppercases
        let fr = config
            .locale
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("fr"))
            .map(|(_, v)| v)
            .unwrap();
        assert_eq!(fr.routing_number.as_deref(), Some("Code banque"));
        assert!(fr.bic.is_none());
    }

    #[test]
    fn test_environment_overrides_nested_keys() {
        let vars: config::Map<String, String> = [
            ("REMIT__GATEWAY__HOLD_STATUS".to_string(), "pending".to_string()),
            ("REMIT_GATEWAY__ID".to_string(), "ignored".to_string()),
        ]
        .into_iter()
        .collect();

        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(
                "[server]\nport = 8080\n[gateway]\nreturn_url_base = \"https://shop.example\"\n",
                config::FileFormat::Toml,
            ))
            .add_source(environment().source(Some(vars)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.gateway.hold_status, "pending");
        assert_eq!(config.gateway.id, "bank_transfer");
    }
}
