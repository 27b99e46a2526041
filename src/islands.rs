//! JSON Data Islands
//!
//! Lookup tables the server embeds as JSON text in non-rendered
//! `<script type="application/json">` blocks.

#[cfg(test)]
use std::collections::HashMap;

use leptos_editable_rows::SelectOption;
use web_sys::Document;

use crate::error::FormError;
use crate::models::LookupOption;

/// Source of select options keyed by island id
pub trait OptionSource {
    fn options(&self, id: &str) -> Result<Vec<SelectOption>, FormError>;
}

pub fn parse_options(id: &str, text: &str) -> Result<Vec<SelectOption>, FormError> {
    let parsed: Vec<LookupOption> = serde_json::from_str(text).map_err(|e| FormError::Island {
        id: id.to_string(),
        message: e.to_string(),
    })?;
    Ok(parsed.into_iter().map(SelectOption::from).collect())
}

/// Islands read from the live document
pub struct DomIslands<'a> {
    document: &'a Document,
}

impl<'a> DomIslands<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }
}

impl OptionSource for DomIslands<'_> {
    fn options(&self, id: &str) -> Result<Vec<SelectOption>, FormError> {
        let text = self
            .document
            .get_element_by_id(id)
            .and_then(|el| el.text_content())
            .ok_or_else(|| FormError::MissingElement(format!("#{}", id)))?;
        parse_options(id, &text)
    }
}

/// Islands held in memory, keyed by id
#[cfg(test)]
impl OptionSource for HashMap<&str, &str> {
    fn options(&self, id: &str) -> Result<Vec<SelectOption>, FormError> {
        let text = self.get(id).ok_or_else(|| FormError::MissingElement(format!("#{}", id)))?;
        parse_options(id, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_string_ids() {
        let options = parse_options("statuses-data", r#"[{"id": 1, "name": "All OK"}, {"id": "na", "name": "NA"}]"#).unwrap();
        assert_eq!(options, vec![SelectOption::new("1", "All OK"), SelectOption::new("na", "NA")]);
    }

    #[test]
    fn test_bad_island_names_its_id() {
        let err = parse_options("areas-data", "[{\"id\": null, \"name\": \"x\"}]").unwrap_err();
        assert!(err.to_string().contains("#areas-data"));
    }

    #[test]
    fn test_missing_island() {
        let islands: HashMap<&str, &str> = HashMap::new();
        assert_eq!(islands.options("systems-data"), Err(FormError::MissingElement("#systems-data".into())));
    }
}
