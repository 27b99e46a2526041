//! Page Configuration
//!
//! Optional `carify-config` JSON island; every field has a default.

use log::LevelFilter;
use serde::Deserialize;

use crate::error::FormError;

/// Element id of the configuration island
pub const CONFIG_ISLAND_ID: &str = "carify-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub customer_endpoint: String,
    pub bank_verify_endpoint: String,
    pub vpic_base_url: String,
    pub ninjas_base_url: String,
    pub ninjas_api_key: Option<String>,
    pub vin_min_length: usize,
    pub request_timeout_ms: u32,
    pub wizard_steps: u32,
    pub toast_timeout_ms: u32,
    pub log_level: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            customer_endpoint: "/carify/form/customer/".to_string(),
            bank_verify_endpoint: "/verify-bank/".to_string(),
            vpic_base_url: "https://vpic.nhtsa.dot.gov/api/vehicles".to_string(),
            ninjas_base_url: "https://api.api-ninjas.com/v1".to_string(),
            ninjas_api_key: None,
            vin_min_length: 5,
            request_timeout_ms: 10_000,
            wizard_steps: 3,
            toast_timeout_ms: 4_000,
            log_level: "info".to_string(),
        }
    }
}

impl PageConfig {
    pub fn from_json(text: &str) -> Result<Self, FormError> {
        serde_json::from_str(text).map_err(|e| FormError::Island {
            id: CONFIG_ISLAND_ID.to_string(),
            message: e.to_string(),
        })
    }

    /// Read the island from the page; absent or malformed falls back to defaults
    pub fn load(document: &web_sys::Document) -> Self {
        let Some(text) = document.get_element_by_id(CONFIG_ISLAND_ID).and_then(|el| el.text_content()) else {
            return Self::default();
        };
        match Self::from_json(&text) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("[CONFIG] {}; using defaults", err);
                Self::default()
            }
        }
    }

    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    /// API Ninjas key, if a non-blank one is configured
    pub fn ninjas_key(&self) -> Option<&str> {
        self.ninjas_api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_island_keeps_defaults() {
        let config = PageConfig::from_json(r#"{ "vin_min_length": 11, "log_level": "debug" }"#).unwrap();
        assert_eq!(config.vin_min_length, 11);
        assert_eq!(config.level_filter(), LevelFilter::Debug);
        assert_eq!(config.customer_endpoint, "/carify/form/customer/");
        assert_eq!(config.request_timeout_ms, 10_000);
    }

    #[test]
    fn test_malformed_island_is_an_error() {
        let err = PageConfig::from_json("{ vin_min_length: }").unwrap_err();
        assert!(matches!(err, FormError::Island { ref id, .. } if id == CONFIG_ISLAND_ID));
    }

    #[test]
    fn test_blank_api_key_is_ignored() {
        let config = PageConfig { ninjas_api_key: Some("  ".into()), ..Default::default() };
        assert_eq!(config.ninjas_key(), None);
        assert_eq!(PageConfig::default().level_filter(), LevelFilter::Info);
        let config = PageConfig { log_level: "chatty".into(), ..Default::default() };
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }
}
