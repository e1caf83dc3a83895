use serde::{Deserialize, Serialize};

/// Scalar options of the bank-transfer gateway, persisted as one settings object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GatewaySettings {
    #[serde(default, with = "yes_no")]
    pub enabled: bool,

    /// Payment method title shown at checkout
    #[serde(default = "default_title")]
    pub title: String,

    /// Payment method description shown at checkout
    #[serde(default = "default_description")]
    pub description: String,

    /// Included in the thank-you page and emails
    #[serde(default = "default_instructions")]
    pub instructions: String,

    /// Beneficiary of every account
    #[serde(default)]
    pub account_holder: String,

    /// Delete all settings and accounts on uninstall
    #[serde(default, with = "yes_no")]
    pub wipe_data: bool,

    /// Keys this version does not model (older single-account fields among them)
    #[serde(default, flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn default_title() -> String {
    "Pay by Bank".to_string()
}

fn default_description() -> String {
    "International transfers with domestic fees.".to_string()
}

fn default_instructions() -> String {
    [
        "- Please choose a receiving account that best fits your situation, and wire the funds using your banking facility",
        "- The receiving account type is: Checking",
        "- As payment reference use your Order number",
        "- Please mind orders won't be shipped until funds have cleared our end.",
    ]
    .join("\n")
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            title: default_title(),
            description: default_description(),
            instructions: default_instructions(),
            account_holder: String::new(),
            wipe_data: false,
            extra: serde_json::Map::new(),
        }
    }
}

impl GatewaySettings {
    /// String value of a key kept in `extra`, empty when absent or not a string
    pub fn extra_str(&self, key: &str) -> String {
        self.extra
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    }
}

/// Checkbox options persist as "yes"/"no"; booleans are accepted on the way in.
mod yes_no {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(if *value { "yes" } else { "no" })
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Flag {
            Bool(bool),
            Text(String),
        }

        Ok(match Flag::deserialize(deserializer)? {
            Flag::Bool(b) => b,
            Flag::Text(s) => s.trim().eq_ignore_ascii_case("yes"),
        })
    }
}
