use remit_core::OrderContext;
use serde::Serialize;
use tracing::debug;

use crate::account::{normalize, Account, FieldKey};
use crate::locale::LocaleTable;

/// Which pile an account lands in for a given order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    /// Matches the order's currency, country or continent
    Local,
    /// Unscoped fallback, shown only when nothing local has details
    Global,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailField {
    pub key: FieldKey,
    pub label: String,
    pub value: String,
}

/// One account ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountDetails {
    /// Position in the configured list
    pub index: usize,
    pub fields: Vec<DetailField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
    Details {
        bucket: Bucket,
        accounts: Vec<AccountDetails>,
    },
    /// Nothing worth showing; the caller suppresses the whole block
    NoDetails,
}

impl Selection {
    pub fn accounts(&self) -> &[AccountDetails] {
        match self {
            Selection::Details { accounts, .. } => accounts,
            Selection::NoDetails => &[],
        }
    }
}

/// Picks the accounts relevant to an order and labels their fields.
pub struct AccountSelector {
    locale: LocaleTable,
}

impl AccountSelector {
    pub fn new(locale: LocaleTable) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> &LocaleTable {
        &self.locale
    }

    /// Classify one account against an order. `None` means the account is out of scope.
    ///
    /// A currency match wins over everything. Otherwise a non-empty scope must mention
    /// the billing country or its continent. Matching is substring containment on the
    /// normalized text, so "USD (checking)" matches USD and "EU,US" matches "EU".
    pub fn classify(&self, account: &Account, ctx: &OrderContext, continent: Option<&str>) -> Option<Bucket> {
        let scope = account.normalized_scope();
        let currency = account.normalized_currency();
        let order_currency = normalize(&ctx.currency);
        let country = normalize(&ctx.billing_country);
        let continent = continent.map(normalize).unwrap_or_default();

        let same_currency = !currency.is_empty() && contains_code(&currency, &order_currency);

        if !same_currency
            && !scope.is_empty()
            && !contains_code(&scope, &country)
            && !contains_code(&scope, &continent)
        {
            return None;
        }

        if !scope.is_empty() || same_currency {
            Some(Bucket::Local)
        } else {
            Some(Bucket::Global)
        }
    }

    /// Select and label the accounts to show for an order.
    pub fn select(&self, ctx: &OrderContext, continent: Option<&str>, accounts: &[Account]) -> Selection {
        let labels = self.locale.labels_for(&ctx.billing_country);

        let mut local = Vec::new();
        let mut global = Vec::new();

        for (index, account) in accounts.iter().enumerate() {
            let bucket = match self.classify(account, ctx, continent) {
                Some(bucket) => bucket,
                None => {
                    debug!(order_id = %ctx.order_id, index, "account out of scope for order");
                    continue;
                }
            };

            let fields: Vec<DetailField> = FieldKey::ALL
                .iter()
                .filter_map(|key| {
                    let value = account.field(*key);
                    if value.trim().is_empty() {
                        return None;
                    }
                    Some(DetailField {
                        key: *key,
                        label: labels.label(*key).to_string(),
                        value: value.to_string(),
                    })
                })
                .collect();

            let details = AccountDetails { index, fields };
            match bucket {
                Bucket::Local => local.push(details),
                Bucket::Global => global.push(details),
            }
        }

        let local: Vec<_> = local.into_iter().filter(|a| !a.fields.is_empty()).collect();
        let global: Vec<_> = global.into_iter().filter(|a| !a.fields.is_empty()).collect();

        let selection = if !local.is_empty() {
            Selection::Details {
                bucket: Bucket::Local,
                accounts: local,
            }
        } else if !global.is_empty() {
            Selection::Details {
                bucket: Bucket::Global,
                accounts: global,
            }
        } else {
            Selection::NoDetails
        };

        debug!(
            order_id = %ctx.order_id,
            country = %ctx.billing_country,
            currency = %ctx.currency,
            shown = selection.accounts().len(),
            "selected accounts for order"
        );
        selection
    }
}

impl Default for AccountSelector {
    fn default() -> Self {
        Self::new(LocaleTable::builtin())
    }
}

/// Substring test where an empty code never matches.
fn contains_code(haystack: &str, code: &str) -> bool {
    !code.is_empty() && haystack.contains(code)
}
