//! Form Sections
//!
//! Declarative bindings for every inspection table: where its body is, which
//! button appends rows, which custom-input pairs the server-rendered rows
//! carry, and how new rows are built.

use leptos::prelude::*;
use leptos_editable_rows::{
    attach, bind_custom_input, bind_rows, ColumnSpec, RowDescriptor, RowError, RowTable, NIL,
};
use web_sys::{Document, HtmlElement, HtmlInputElement, HtmlSelectElement};

use crate::dom;
use crate::error::FormError;
use crate::islands::{DomIslands, OptionSource};

type DescriptorFn = fn(&dyn OptionSource) -> Result<RowDescriptor, FormError>;

pub struct SectionSpec {
    pub name: &'static str,
    /// CSS selector of the table body
    pub body: &'static str,
    /// Id of the button that appends a row
    pub create_button: Option<&'static str>,
    /// `(select, input)` selectors bound in every server-rendered row
    pub custom_pairs: &'static [(&'static str, &'static str)],
    /// CSS display of a shown custom input
    pub display: &'static str,
    pub descriptor: Option<DescriptorFn>,
}

const AREA: (&str, &str) = ("select.areaDropdown", "input.customAreaInput");
const STATUS: (&str, &str) = ("select.statusDropdown", "input.customStatusInput");
const SYSTEM: (&str, &str) = ("select.systemDropdown", "input.customSystemInput");
const CONDITION: (&str, &str) = ("select.conditionDropdown", "input.customConditionInput");

pub const SECTIONS: &[SectionSpec] = &[
    SectionSpec {
        name: "documents",
        body: "#doc-body",
        create_button: Some("Vehicle-Documentation"),
        custom_pairs: &[("select.documentDropdown", "input.customDocumentInput"), STATUS],
        display: "block",
        descriptor: Some(documents),
    },
    SectionSpec {
        name: "fluid levels",
        body: "#fluid-body",
        create_button: Some("fluid-create"),
        custom_pairs: &[AREA, ("select.rangeDropdown", "input.customRangeInput"), STATUS],
        display: "block",
        descriptor: Some(fluid_levels),
    },
    SectionSpec {
        name: "glass",
        body: "#glass-body",
        create_button: Some("Condition-of-class"),
        custom_pairs: &[AREA, CONDITION],
        display: "block",
        descriptor: Some(glass),
    },
    SectionSpec {
        name: "paint finish",
        body: "#paint-body",
        create_button: Some("paint-create"),
        custom_pairs: &[AREA, CONDITION],
        display: "block",
        descriptor: Some(paint_finish),
    },
    SectionSpec {
        name: "flush gaps",
        body: "#flush-body",
        create_button: Some("Flush-gaps"),
        custom_pairs: &[AREA, ("select.operationDropdown", "input.customOperationInput")],
        display: "block",
        descriptor: Some(flush_gaps),
    },
    SectionSpec {
        name: "live parameters",
        body: "#live-body",
        create_button: Some("create-live"),
        custom_pairs: &[SYSTEM, ("select.inferenceDropdown", "input.customInferenceInput")],
        display: "block",
        descriptor: Some(live_parameters),
    },
    SectionSpec {
        name: "network",
        body: "#sensor",
        create_button: Some("create_network"),
        custom_pairs: &[AREA, STATUS],
        display: "block",
        descriptor: Some(network),
    },
    SectionSpec {
        name: "system check",
        body: "#core",
        create_button: Some("create1"),
        custom_pairs: &[SYSTEM, STATUS],
        display: "block",
        descriptor: Some(system_check),
    },
    SectionSpec {
        name: "other parameters",
        body: "#other-body",
        create_button: Some("other-checks"),
        custom_pairs: &[SYSTEM, STATUS],
        display: "block",
        descriptor: Some(other_parameters),
    },
    SectionSpec {
        name: "fit and finish",
        body: "#fit-finish-body",
        create_button: Some("Fit-Finish"),
        custom_pairs: &[],
        display: "block",
        descriptor: Some(fit_finish),
    },
    SectionSpec {
        name: "rubber components",
        body: "#rubber-body",
        create_button: Some("Critical-Rubber"),
        custom_pairs: &[],
        display: "block",
        descriptor: Some(rubber_components),
    },
    SectionSpec {
        name: "floor carpets",
        body: "#interior-body",
        create_button: Some("Floor-Carpets"),
        custom_pairs: &[(".categoryDropdown", ".customCategoryInput"), (".areaDropdown", ".customAreaInput")],
        display: "inline-block",
        descriptor: Some(floor_carpets),
    },
    SectionSpec {
        name: "plastic panels",
        body: "#plastic-body",
        create_button: Some("Plastic-Panels"),
        custom_pairs: &[],
        display: "block",
        descriptor: Some(plastic_panels),
    },
    SectionSpec {
        name: "fabric and leather",
        body: "#fabric-table tbody",
        create_button: Some("Fabric-Leather"),
        custom_pairs: &[],
        display: "block",
        descriptor: Some(fabric_leather),
    },
    SectionSpec {
        name: "tyre condition",
        body: "#tyre-body",
        create_button: None,
        custom_pairs: &[("select.statusDropdown", "input.customConditionInput")],
        display: "block",
        descriptor: None,
    },
];

/// Standalone select/input pairs of the vehicle form, by element id
pub const VEHICLE_DROPDOWNS: &[(&str, &str)] = &[
    ("fuelDropdown", "customFuelInput"),
    ("transmissionDropdown", "customTransmissionInput"),
    ("engineDropdown", "customEngineInput"),
];

// ========================
// Row Descriptors
// ========================

fn lookup(
    src: &dyn OptionSource,
    island: &str,
    name: &str,
    label: &str,
    custom_name: &str,
    custom_placeholder: &str,
) -> Result<ColumnSpec, FormError> {
    Ok(ColumnSpec::select(name, label, src.options(island)?).with_custom(custom_name, custom_placeholder))
}

fn documents(src: &dyn OptionSource) -> Result<RowDescriptor, FormError> {
    Ok(RowDescriptor::new()
        .column(lookup(src, "doc-types-data", "document", "Document", "custom_document", "Custom Document")?.required())
        .column(lookup(src, "statuses-data", "status", "Status", "custom_status", "Custom Status")?)
        .column(ColumnSpec::text("remark", "Remark").placeholder("Remark").fallback(NIL))
        .confirm_save("Save this document entry?"))
}

fn fluid_levels(src: &dyn OptionSource) -> Result<RowDescriptor, FormError> {
    Ok(RowDescriptor::new()
        .column(lookup(src, "fluid-areas-data", "area", "Area", "custom_area", "Enter custom area")?.required())
        .column(lookup(src, "fluid-ranges-data", "in_range", "Range", "custom_range", "Enter custom range")?)
        .column(lookup(src, "statuses-data", "contamination", "Contamination", "custom_status", "Enter custom status")?)
        .column(ColumnSpec::text("recommendation", "Recommendation").default_value(NIL).fallback(NIL)))
}

fn glass(src: &dyn OptionSource) -> Result<RowDescriptor, FormError> {
    Ok(RowDescriptor::new()
        .column(lookup(src, "glass-areas-data", "area", "Area", "custom_area", "Custom Area")?.required())
        .column(ColumnSpec::text("brand", "Brand").placeholder("Brand").required())
        .column(lookup(src, "statuses-data", "condition", "Condition", "custom_condition", "Custom Condition")?)
        .column(ColumnSpec::choice("recommendation", "Recommendation", &[NIL, "Replace"])))
}

fn paint_finish(src: &dyn OptionSource) -> Result<RowDescriptor, FormError> {
    Ok(RowDescriptor::new()
        .column(lookup(src, "paint-areas-data", "area", "Area", "custom_area", "Enter custom area")?.required())
        .column(ColumnSpec::checkbox("repainted", "Repainted", "Repainted?"))
        .column(lookup(src, "statuses-data", "condition", "Condition", "custom_condition", "Enter custom condition")?)
        .column(ColumnSpec::text("action", "Action").default_value(NIL).fallback(NIL)))
}

fn flush_gaps(src: &dyn OptionSource) -> Result<RowDescriptor, FormError> {
    Ok(RowDescriptor::new()
        .column(lookup(src, "flush-areas-data", "area", "Area", "custom_area", "Custom area")?.required())
        .column(lookup(src, "operations-data", "operation", "Operation", "custom_operation", "Custom operation")?)
        .column(ColumnSpec::choice("observation", "Observation", &["Yes", "No"]))
        .column(ColumnSpec::choice("action", "Action", &[NIL, "Adjust"])))
}

fn live_parameters(src: &dyn OptionSource) -> Result<RowDescriptor, FormError> {
    Ok(RowDescriptor::new()
        .column(lookup(src, "parameters-data", "system", "System", "custom_system", "Enter custom system")?.required())
        .column(lookup(src, "inferences-data", "inference", "Inference", "custom_inference", "Enter custom inference")?))
}

fn network(src: &dyn OptionSource) -> Result<RowDescriptor, FormError> {
    Ok(RowDescriptor::new()
        .column(lookup(src, "areas-data", "area", "Area", "custom_area", "Enter custom area")?.required())
        .column(lookup(src, "statuses-data", "status", "Status", "custom_status", "Enter custom status")?)
        .column(ColumnSpec::text("remark", "Remark").fallback(NIL)))
}

fn system_check(src: &dyn OptionSource) -> Result<RowDescriptor, FormError> {
    Ok(RowDescriptor::new()
        .column(lookup(src, "systems-data", "system", "System", "custom_system", "Enter custom system")?.required())
        .column(lookup(src, "statuses-data", "status", "Status", "custom_status", "Enter custom status")?)
        .column(ColumnSpec::number("number_of_issues", "Number of issues")))
}

fn other_parameters(src: &dyn OptionSource) -> Result<RowDescriptor, FormError> {
    Ok(RowDescriptor::new()
        .column(lookup(src, "performance-data", "system", "System", "custom_system", "Enter custom system")?.required())
        .column(lookup(src, "statuses-data", "status", "Status", "custom_status", "Enter custom status")?)
        .column(ColumnSpec::text("recommendation", "Recommendation").default_value(NIL).fallback(NIL)))
}

fn fit_finish(_: &dyn OptionSource) -> Result<RowDescriptor, FormError> {
    Ok(RowDescriptor::new()
        .column(ColumnSpec::editable("area", "Area", "New Area").required())
        .column(ColumnSpec::choice("repainted", "Repainted", &["No", "Yes"]))
        .column(ColumnSpec::choice("condition", "Condition", &["All OK", "Not OK"]))
        .column(ColumnSpec::editable("remark", "Remark", NIL).fallback(NIL)))
}

fn rubber_components(_: &dyn OptionSource) -> Result<RowDescriptor, FormError> {
    Ok(RowDescriptor::new()
        .column(ColumnSpec::editable("area", "Area", "New Area").required())
        .column(ColumnSpec::choice("condition", "Condition", &["All OK", "Not OK"]))
        .column(ColumnSpec::choice("recommendation", "Recommendation", &[NIL, "Replace"])))
}

fn floor_carpets(_: &dyn OptionSource) -> Result<RowDescriptor, FormError> {
    Ok(RowDescriptor::new()
        .column(ColumnSpec::editable("area", "Area", "New Area").required())
        .column(ColumnSpec::choice("presence", "Presence", &["Present", "Not Present"]))
        .column(ColumnSpec::choice("condition", "Condition", &["All OK", "Not OK"]))
        .column(ColumnSpec::editable("remark", "Remark", "OK").fallback("OK")))
}

fn plastic_panels(_: &dyn OptionSource) -> Result<RowDescriptor, FormError> {
    Ok(RowDescriptor::new()
        .column(ColumnSpec::editable("area", "Area", "New Area").required())
        .column(ColumnSpec::choice("condition", "Condition", &["All OK", "Not OK"]))
        .column(ColumnSpec::editable("remark", "Remark", "OK").fallback("OK")))
}

fn fabric_leather(_: &dyn OptionSource) -> Result<RowDescriptor, FormError> {
    Ok(RowDescriptor::new()
        .column(ColumnSpec::text("area", "Area").placeholder("Enter Area").required())
        .column(ColumnSpec::choice("condition", "Condition", &["All OK", "Not OK", "NA"]))
        .column(ColumnSpec::text("recommendation", "Recommendation").default_value("OK").fallback("OK")))
}

// ========================
// Page Binding
// ========================

/// Bind one section. Returns `Ok(false)` when its table is not on this page.
fn bind_section(document: &Document, islands: &dyn OptionSource, spec: &SectionSpec) -> Result<bool, FormError> {
    let Some(body) = dom::query::<HtmlElement>(document, spec.body) else {
        return Ok(false);
    };
    let bound = bind_rows(&body, spec.custom_pairs, spec.display);
    log::debug!("[SECTIONS] {}: bound {} custom inputs", spec.name, bound);

    let (Some(button_id), Some(build)) = (spec.create_button, spec.descriptor) else {
        return Ok(true);
    };
    let Some(button) = document.get_element_by_id(button_id) else {
        log::debug!("[SECTIONS] {}: no #{} button, rows are read-only", spec.name, button_id);
        return Ok(true);
    };
    let descriptor = build(islands)?;
    let table = RwSignal::new(RowTable::new(descriptor));
    let on_reject = Callback::new(|err: RowError| dom::alert(&err.to_string()));
    attach(body, &button, table, on_reject);
    Ok(true)
}

fn bind_vehicle_dropdowns(document: &Document) -> usize {
    VEHICLE_DROPDOWNS
        .iter()
        .filter_map(|(select, input)| {
            let select = dom::by_id::<HtmlSelectElement>(document, select)?;
            let input = dom::by_id::<HtmlInputElement>(document, input)?;
            bind_custom_input(&select, &input, "block");
            Some(())
        })
        .count()
}

/// Bind every section present on the page; returns how many were found
pub fn init_sections(document: &Document) -> usize {
    let islands = DomIslands::new(document);
    let mut found = 0;
    for spec in SECTIONS {
        match bind_section(document, &islands, spec) {
            Ok(true) => found += 1,
            Ok(false) => {}
            Err(err) => log::warn!("[SECTIONS] Skipping {}: {}", spec.name, err),
        }
    }
    let dropdowns = bind_vehicle_dropdowns(document);
    if dropdowns > 0 {
        log::debug!("[SECTIONS] Bound {} vehicle dropdowns", dropdowns);
    }
    found
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use leptos_editable_rows::{ControlKind, CUSTOM_SENTINEL};

    use super::*;

    const OPTIONS: &str = r#"[{"id": 1, "name": "First"}, {"id": 2, "name": "Second"}]"#;

    fn all_islands() -> HashMap<&'static str, &'static str> {
        [
            "doc-types-data",
            "statuses-data",
            "fluid-areas-data",
            "fluid-ranges-data",
            "glass-areas-data",
            "paint-areas-data",
            "flush-areas-data",
            "operations-data",
            "parameters-data",
            "inferences-data",
            "areas-data",
            "systems-data",
            "performance-data",
        ]
        .into_iter()
        .map(|id| (id, OPTIONS))
        .collect()
    }

    #[test]
    fn test_every_section_builds_with_its_islands() {
        let islands = all_islands();
        for spec in SECTIONS {
            if let Some(build) = spec.descriptor {
                let descriptor = build(&islands).unwrap_or_else(|e| panic!("{}: {}", spec.name, e));
                assert!(!descriptor.is_empty(), "{} has no columns", spec.name);
            }
        }
    }

    #[test]
    fn test_sections_have_distinct_anchors() {
        let bodies: HashSet<_> = SECTIONS.iter().map(|s| s.body).collect();
        assert_eq!(bodies.len(), SECTIONS.len());
        let buttons: Vec<_> = SECTIONS.iter().filter_map(|s| s.create_button).collect();
        let unique: HashSet<_> = buttons.iter().collect();
        assert_eq!(unique.len(), buttons.len());
        for spec in SECTIONS {
            assert_eq!(spec.create_button.is_some(), spec.descriptor.is_some(), "{}", spec.name);
        }
    }

    #[test]
    fn test_missing_island_fails_the_section() {
        let mut islands = all_islands();
        islands.remove("fluid-ranges-data");
        let err = fluid_levels(&islands).unwrap_err();
        assert_eq!(err, FormError::MissingElement("#fluid-ranges-data".into()));
    }

    #[test]
    fn test_fluid_row_defaults_and_save() {
        let islands = all_islands();
        let mut table = RowTable::new(fluid_levels(&islands).unwrap());
        table.create_row().unwrap();
        table.set_value(1, CUSTOM_SENTINEL).unwrap();
        table.set_custom(1, "Slightly low").unwrap();
        let saved = table.save().unwrap();
        assert_eq!(saved.texts(), vec!["First", "Slightly low", "First", NIL]);
    }

    #[test]
    fn test_system_check_counts_issues() {
        let descriptor = system_check(&all_islands()).unwrap();
        assert_eq!(descriptor.columns[2].kind, ControlKind::Number { default: 0 });

        let mut table = RowTable::new(descriptor);
        table.create_row().unwrap();
        table.set_value(2, "-2").unwrap();
        assert!(matches!(table.save(), Err(RowError::InvalidNumber(_))));
        table.set_value(2, "2").unwrap();
        assert_eq!(table.save().unwrap().texts(), vec!["First", "First", "2"]);
    }

    #[test]
    fn test_glass_requires_brand() {
        let mut table = RowTable::new(glass(&all_islands()).unwrap());
        table.create_row().unwrap();
        assert_eq!(table.save().unwrap_err(), RowError::Required("Brand".into()));
        table.set_value(1, "Pilkington").unwrap();
        assert_eq!(table.save().unwrap().texts(), vec!["First", "Pilkington", "First", NIL]);
    }

    #[test]
    fn test_document_custom_entry_must_be_filled() {
        let mut table = RowTable::new(documents(&all_islands()).unwrap());
        table.create_row().unwrap();
        table.set_value(0, CUSTOM_SENTINEL).unwrap();
        assert_eq!(table.save().unwrap_err(), RowError::Required("Document".into()));
        table.set_custom(0, "PUC Certificate").unwrap();
        assert_eq!(table.save().unwrap().texts(), vec!["PUC Certificate", "First", NIL]);
    }
}
