use remit_accounts::Account;
use serde::{Deserialize, Serialize};

/// The admin account table as posted: one array per column, rows aligned by index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountForm {
    #[serde(default)]
    pub account_scope: Vec<String>,
    #[serde(default)]
    pub account_currency: Vec<String>,
    #[serde(default)]
    pub account_number: Vec<String>,
    #[serde(default)]
    pub routing_number: Vec<String>,
    #[serde(default)]
    pub iban: Vec<String>,
    #[serde(default)]
    pub bic: Vec<String>,
    #[serde(default)]
    pub branch: Vec<String>,
    #[serde(default)]
    pub remarks: Vec<String>,
}

impl AccountForm {
    /// Inverse of [`AccountForm::into_accounts`], used to prefill the table
    pub fn from_accounts(accounts: &[Account]) -> Self {
        let mut form = Self::default();
        for account in accounts {
            form.account_scope.push(account.scope.clone());
            form.account_currency.push(account.currency.clone());
            form.account_number.push(account.account_number.expose().clone());
            form.routing_number.push(account.routing_number.expose().clone());
            form.iban.push(account.iban.expose().clone());
            form.bic.push(account.bic.expose().clone());
            form.branch.push(account.branch.clone());
            form.remarks.push(account.remarks.clone());
        }
        form
    }

    /// Rebuild accounts row by row. Short columns read as empty cells, values are
    /// sanitized, and rows left entirely blank (removed or never filled) are dropped.
    pub fn into_accounts(self) -> Vec<Account> {
        let rows = [
            self.account_scope.len(),
            self.account_currency.len(),
            self.account_number.len(),
            self.routing_number.len(),
            self.iban.len(),
            self.bic.len(),
            self.branch.len(),
            self.remarks.len(),
        ]
        .into_iter()
        .max()
        .unwrap_or(0);

        (0..rows)
            .map(|i| Account {
                scope: clean_line(cell(&self.account_scope, i)),
                currency: clean_line(cell(&self.account_currency, i)),
                account_number: clean_line(cell(&self.account_number, i)).into(),
                routing_number: clean_line(cell(&self.routing_number, i)).into(),
                iban: clean_line(cell(&self.iban, i)).into(),
                bic: clean_line(cell(&self.bic, i)).into(),
                branch: clean_text(cell(&self.branch, i)),
                remarks: clean_text(cell(&self.remarks, i)),
            })
            .filter(|account| !account.is_blank())
            .collect()
    }
}

fn cell(column: &[String], i: usize) -> &str {
    column.get(i).map(String::as_str).unwrap_or("")
}

/// Single-line input: tags removed, whitespace runs collapsed to one space
fn clean_line(raw: &str) -> String {
    strip_tags(raw).split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Textarea input: tags removed, line breaks kept, each line trimmed
fn clean_text(raw: &str) -> String {
    strip_tags(raw)
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// A `<` only opens a tag when followed by a letter, `/` or `!`; any other `<` is text.
fn strip_tags(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_tag = false;
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            '<' if chars
                .peek()
                .is_some_and(|next| next.is_ascii_alphabetic() || matches!(next, '/' | '!')) =>
            {
                in_tag = true
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rows_are_rebuilt_positionally() {
        let form: AccountForm = serde_json::from_value(json!({
            "account_scope": ["GB", ""],
            "account_currency": ["GBP", "USD"],
            "account_number": ["31926819", "8310"],
            "routing_number": ["23-14-70", "026073150"],
            "iban": ["", ""],
            "bic": ["", "CMFGUS33"],
            "branch": ["Wise\nLondon", ""],
            "remarks": ["", ""]
        }))
        .unwrap();

        let accounts = form.into_accounts();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].scope, "GB");
        assert_eq!(accounts[0].branch, "Wise\nLondon");
        assert_eq!(accounts[1].currency, "USD");
        assert_eq!(accounts[1].bic.expose(), "CMFGUS33");
    }

    #[test]
    fn test_blank_rows_dropped_and_short_columns_padded() {
        let form = AccountForm {
            account_scope: vec!["".into(), "EU".into(), "".into()],
            iban: vec!["".into(), "DE89 3704 0044".into()],
            ..Default::default()
        };
        let accounts = form.into_accounts();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].scope, "EU");
        assert_eq!(accounts[0].iban.expose(), "DE89 3704 0044");
        assert_eq!(accounts[0].remarks, "");
    }

    #[test]
    fn test_values_are_sanitized() {
        let form = AccountForm {
            account_currency: vec!["  <b>USD</b>   checking ".into()],
            remarks: vec!["  Line one  \n<script>x</script>Line   two ".into()],
            ..Default::default()
        };
        let accounts = form.into_accounts();
        assert_eq!(accounts[0].currency, "USD checking");
        assert_eq!(accounts[0].remarks, "Line one\nxLine two");
    }

    #[test]
    fn test_lone_less_than_is_kept() {
        let form = AccountForm {
            branch: vec!["Bank".into()],
            remarks: vec!["Transfers < 50 EUR incur a fee<br/>, <3 <!-- x -->".into()],
            ..Default::default()
        };
        let accounts = form.into_accounts();
        assert_eq!(accounts[0].remarks, "Transfers < 50 EUR incur a fee, <3");
    }

    #[test]
    fn test_from_accounts_prefills_every_column() {
        let accounts = vec![Account {
            scope: "US".to_string(),
            routing_number: "026073150".into(),
            ..Default::default()
        }];
        let form = AccountForm::from_accounts(&accounts);
        assert_eq!(form.account_scope, vec!["US"]);
        assert_eq!(form.remarks, vec![""]);
        assert_eq!(form.into_accounts(), accounts);
    }
}
