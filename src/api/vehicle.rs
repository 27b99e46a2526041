//! Vehicle Data Lookups
//!
//! VIN autofill from NHTSA vPIC (airbag count) and API Ninjas (power and
//! mileage). The two lookups run concurrently and own disjoint fields.

use std::collections::BTreeMap;

use serde_json::Value;

use super::{encode_component, HttpRequest, Transport};
use crate::config::PageConfig;
use crate::error::FormError;
use crate::models::VinDecodeResponse;

pub const AIRBAG_FIELD: &str = "id_auto_airbags";

/// API Ninjas response key -> destination field id
pub const SPEC_FIELDS: &[(&str, &str)] = &[
    ("horsepower_hp", "id_auto_bhp"),
    ("city_mpg", "id_auto_city_mpg"),
    ("highway_mpg", "id_auto_highway_mpg"),
];

/// Destination of looked-up values
pub trait FieldSink {
    fn set_field(&self, id: &str, value: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    VinDecode,
    CarSpecs,
}

impl Lookup {
    pub fn label(self) -> &'static str {
        match self {
            Lookup::VinDecode => "VIN decode",
            Lookup::CarSpecs => "vehicle specs",
        }
    }
}

/// Airbag locations reported for the vehicle
pub fn count_airbags(result: &BTreeMap<String, Value>) -> usize {
    result
        .iter()
        .filter(|(key, _)| key.contains("AirBagLoc"))
        .filter(|(_, value)| match value {
            Value::String(text) => !text.trim().is_empty() && !text.trim().eq_ignore_ascii_case("not applicable"),
            _ => false,
        })
        .count()
}

fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) if n.as_f64().map_or(false, |f| f != 0.0) => Some(n.to_string()),
        Value::String(s) if !s.trim().is_empty() && s.trim().parse::<f64>().is_ok() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Field values from an API Ninjas body (array of cars or a single car)
pub fn spec_values(body: &Value) -> Vec<(&'static str, String)> {
    let car = match body {
        Value::Array(cars) => cars.first(),
        other => Some(other),
    };
    let Some(Value::Object(car)) = car else {
        return Vec::new();
    };
    SPEC_FIELDS
        .iter()
        .filter_map(|(key, field)| car.get(*key).and_then(truthy_text).map(|text| (*field, text)))
        .collect()
}

async fn fetch_json<T: Transport>(transport: &T, request: HttpRequest) -> Result<String, FormError> {
    let response = transport.send(request).await?;
    if !response.is_success() {
        return Err(FormError::Status(response.status));
    }
    Ok(response.body)
}

async fn fill_airbags<T: Transport, S: FieldSink>(transport: &T, config: &PageConfig, sink: &S, vin: &str) -> Result<(), FormError> {
    let url = format!(
        "{}/DecodeVinValues/{}?format=json",
        config.vpic_base_url.trim_end_matches('/'),
        encode_component(vin)
    );
    let body = fetch_json(transport, HttpRequest::get(url)).await?;
    let decoded: VinDecodeResponse = serde_json::from_str(&body)?;
    let Some(result) = decoded.results.first() else {
        log::info!("[AUTOFILL] vPIC returned no results for {}", vin);
        return Ok(());
    };
    let airbags = count_airbags(result);
    sink.set_field(AIRBAG_FIELD, &airbags.to_string());
    log::info!("[AUTOFILL] Airbags: {}", airbags);
    Ok(())
}

async fn fill_specs<T: Transport, S: FieldSink>(transport: &T, config: &PageConfig, sink: &S, vin: &str) -> Result<(), FormError> {
    let Some(key) = config.ninjas_key() else {
        log::info!("[AUTOFILL] No API Ninjas key configured, skipping vehicle specs");
        return Ok(());
    };
    let url = format!("{}/cars?vin={}", config.ninjas_base_url.trim_end_matches('/'), encode_component(vin));
    let body = fetch_json(transport, HttpRequest::get(url).header("X-Api-Key", key)).await?;
    let parsed: Value = serde_json::from_str(&body)?;
    let values = spec_values(&parsed);
    for (field, text) in &values {
        sink.set_field(field, text);
    }
    log::info!("[AUTOFILL] Filled {} vehicle spec fields", values.len());
    Ok(())
}

/// Run both lookups for `raw_vin`. VINs shorter than the configured minimum
/// issue no request. Returns the failed lookups; a failure never blocks the
/// other lookup and leaves its fields unmodified.
pub async fn autofill_vin<T: Transport, S: FieldSink>(
    transport: &T,
    config: &PageConfig,
    sink: &S,
    raw_vin: &str,
) -> Vec<(Lookup, FormError)> {
    let vin = raw_vin.trim();
    if vin.chars().count() < config.vin_min_length {
        log::debug!("[AUTOFILL] VIN too short ({} chars), not looking up", vin.chars().count());
        return Vec::new();
    }
    log::info!("[AUTOFILL] Fetching data for VIN {}", vin);

    let (airbags, specs) = futures::join!(
        fill_airbags(transport, config, sink, vin),
        fill_specs(transport, config, sink, vin)
    );

    let mut failures = Vec::new();
    if let Err(err) = airbags {
        log::error!("[AUTOFILL] vPIC error: {}", err);
        failures.push((Lookup::VinDecode, err));
    }
    if let Err(err) = specs {
        log::error!("[AUTOFILL] API Ninjas error: {}", err);
        failures.push((Lookup::CarSpecs, err));
    }
    failures
}
