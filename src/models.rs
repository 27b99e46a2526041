//! Page Models
//!
//! Data structures exchanged with the server and the vehicle-data APIs.

use std::collections::BTreeMap;

use leptos_editable_rows::SelectOption;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Lookup entry embedded by the server (`{ id, name }`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LookupOption {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub name: String,
}

impl From<LookupOption> for SelectOption {
    fn from(option: LookupOption) -> Self {
        SelectOption::new(option.id, option.name)
    }
}

/// Ids arrive as numbers from model querysets and as strings from choices
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("unsupported option id {}", other))),
    }
}

/// JSON reply of the customer form endpoint
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub next_url: Option<String>,
    pub errors: Option<Value>,
}

/// JSON reply of the bank verification endpoint
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct BankVerifyResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// NHTSA vPIC `DecodeVinValues` reply
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct VinDecodeResponse {
    #[serde(rename = "Results", default)]
    pub results: Vec<BTreeMap<String, Value>>,
}
