use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::account::FieldKey;

pub const DEFAULT_ROUTING_LABEL: &str = "Routing number";
pub const DEFAULT_BIC_LABEL: &str = "SWIFT";

/// Country-specific wording for the routing number and BIC fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocaleOverride {
    #[serde(default)]
    pub routing_number: Option<String>,
    #[serde(default)]
    pub bic: Option<String>,
}

impl LocaleOverride {
    fn routing(label: &str) -> Self {
        Self {
            routing_number: Some(label.to_string()),
            bic: None,
        }
    }
}

/// Resolved labels for every display field of an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLabels {
    pub routing_number: String,
    pub bic: String,
}

impl FieldLabels {
    pub fn label(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::Currency => "Currency",
            FieldKey::AccountNumber => "Account number",
            FieldKey::RoutingNumber => self.routing_number.as_str(),
            FieldKey::Iban => "IBAN",
            FieldKey::Bic => self.bic.as_str(),
            FieldKey::Branch => "Bank",
            FieldKey::Remarks => "Remarks",
        }
    }
}

impl Default for FieldLabels {
    fn default() -> Self {
        Self {
            routing_number: DEFAULT_ROUTING_LABEL.to_string(),
            bic: DEFAULT_BIC_LABEL.to_string(),
        }
    }
}

/// Static map of country code to label overrides.
#[derive(Debug, Clone)]
pub struct LocaleTable {
    entries: HashMap<String, LocaleOverride>,
}

impl LocaleTable {
    /// The table shipped with the gateway
    pub fn builtin() -> Self {
        let mut entries = HashMap::new();
        entries.insert("AU".to_string(), LocaleOverride::routing("BSB"));
        entries.insert(
            "CA".to_string(),
            LocaleOverride {
                routing_number: Some("Transit number".to_string()),
                bic: Some("Institution number".to_string()),
            },
        );
        entries.insert("GB".to_string(), LocaleOverride::routing("Sort code"));
        entries.insert("IN".to_string(), LocaleOverride::routing("IFSC"));
        entries.insert("IT".to_string(), LocaleOverride::routing("Branch sort"));
        entries.insert("NZ".to_string(), LocaleOverride::routing("Bank code"));
        entries.insert("SE".to_string(), LocaleOverride::routing("Bank code"));
        entries.insert(
            "US".to_string(),
            LocaleOverride {
                routing_number: None,
                bic: Some("BIC".to_string()),
            },
        );
        entries.insert("ZA".to_string(), LocaleOverride::routing("Branch code"));
        Self { entries }
    }

    /// Layer extra entries over this table. A label set in `overrides` replaces the
    /// existing one; a label left unset keeps it.
    pub fn with_overrides(mut self, overrides: HashMap<String, LocaleOverride>) -> Self {
        for (country, entry) in overrides {
            let slot = self.entries.entry(country.trim().to_uppercase()).or_default();
            if entry.routing_number.is_some() {
                slot.routing_number = entry.routing_number;
            }
            if entry.bic.is_some() {
                slot.bic = entry.bic;
            }
        }
        self
    }

    pub fn lookup(&self, country_code: &str) -> Option<&LocaleOverride> {
        self.entries.get(&country_code.trim().to_uppercase())
    }

    /// Labels for a billing country, falling back to the defaults field by field
    pub fn labels_for(&self, country_code: &str) -> FieldLabels {
        let entry = self.lookup(country_code);
        FieldLabels {
            routing_number: entry
                .and_then(|e| e.routing_number.clone())
                .unwrap_or_else(|| DEFAULT_ROUTING_LABEL.to_string()),
            bic: entry
                .and_then(|e| e.bic.clone())
                .unwrap_or_else(|| DEFAULT_BIC_LABEL.to_string()),
        }
    }
}

impl Default for LocaleTable {
    fn default() -> Self {
        Self::builtin()
    }
}
