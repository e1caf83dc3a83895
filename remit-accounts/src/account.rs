use remit_shared::Masked;
use serde::{Deserialize, Serialize};

/// A receiving bank account as the shop owner entered it.
///
/// Every field is free text. Accounts have no stable id; their position in the
/// configured list is their identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    /// Comma-separated country or continent codes; empty means "everywhere, as a fallback"
    #[serde(rename = "account_scope", default)]
    pub scope: String,

    /// Free text expected to contain a 3-letter currency code
    #[serde(rename = "account_currency", default)]
    pub currency: String,

    #[serde(default)]
    pub account_number: Masked<String>,

    #[serde(default)]
    pub routing_number: Masked<String>,

    #[serde(default)]
    pub iban: Masked<String>,

    #[serde(default)]
    pub bic: Masked<String>,

    /// Name and address of the receiving bank
    #[serde(default)]
    pub branch: String,

    #[serde(default)]
    pub remarks: String,
}

/// Displayable account fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    #[serde(rename = "account_currency")]
    Currency,
    AccountNumber,
    RoutingNumber,
    Iban,
    Bic,
    Branch,
    Remarks,
}

impl FieldKey {
    pub const ALL: [FieldKey; 7] = [
        FieldKey::Currency,
        FieldKey::AccountNumber,
        FieldKey::RoutingNumber,
        FieldKey::Iban,
        FieldKey::Bic,
        FieldKey::Branch,
        FieldKey::Remarks,
    ];

    /// Key used as the CSS class of the rendered list item
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Currency => "account_currency",
            FieldKey::AccountNumber => "account_number",
            FieldKey::RoutingNumber => "routing_number",
            FieldKey::Iban => "iban",
            FieldKey::Bic => "bic",
            FieldKey::Branch => "branch",
            FieldKey::Remarks => "remarks",
        }
    }
}

impl Account {
    /// Raw value of a display field
    pub fn field(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::Currency => self.currency.as_str(),
            FieldKey::AccountNumber => self.account_number.expose().as_str(),
            FieldKey::RoutingNumber => self.routing_number.expose().as_str(),
            FieldKey::Iban => self.iban.expose().as_str(),
            FieldKey::Bic => self.bic.expose().as_str(),
            FieldKey::Branch => self.branch.as_str(),
            FieldKey::Remarks => self.remarks.as_str(),
        }
    }

    pub fn normalized_scope(&self) -> String {
        normalize(&self.scope)
    }

    pub fn normalized_currency(&self) -> String {
        normalize(&self.currency)
    }

    /// True when no field holds anything but whitespace
    pub fn is_blank(&self) -> bool {
        self.scope.trim().is_empty() && FieldKey::ALL.iter().all(|k| self.field(*k).trim().is_empty())
    }
}

/// Uppercase with all whitespace removed, the form scopes and currencies are matched in.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}
