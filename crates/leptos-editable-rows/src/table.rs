//! Editable Row Table
//!
//! DOM-free model of the rows a section appends to its table body:
//! committed rows plus at most one draft row in flight.

use thiserror::Error;

use crate::custom_input::{is_custom, on_select_change};
use crate::descriptor::{ColumnSpec, ControlKind, RowDescriptor, CUSTOM_SENTINEL};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("a row is already being edited")]
    RowInFlight,
    #[error("no row is being edited")]
    NoDraft,
    #[error("no column at index {0}")]
    NoColumn(usize),
    #[error("Please fill in {0}.")]
    Required(String),
    #[error("{0} must be a whole number of 0 or more.")]
    InvalidNumber(String),
}

/// Current value of one editable cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftCell {
    /// Text, number text, selected option value, or `"on"`/`""` for checkboxes
    pub value: String,
    /// Text of the companion input of a custom-capable select
    pub custom: String,
}

impl DraftCell {
    fn new(value: impl Into<String>) -> Self {
        Self { value: value.into(), custom: String::new() }
    }

    pub fn custom_visible(&self) -> bool {
        is_custom(&self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftRow {
    key: u64,
    cells: Vec<DraftCell>,
}

impl DraftRow {
    pub fn key(&self) -> u64 {
        self.key
    }

    pub fn cells(&self) -> &[DraftCell] {
        &self.cells
    }
}

/// Asks the user whether a save should go through
pub trait ConfirmSave {
    fn confirm(&self, message: &str) -> bool;
}

/// A frozen cell: display text plus the hidden fields that keep it submittable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedCell {
    pub text: String,
    pub fields: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedRow {
    pub key: u64,
    pub cells: Vec<CommittedCell>,
}

impl CommittedRow {
    pub fn texts(&self) -> Vec<&str> {
        self.cells.iter().map(|c| c.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowTable {
    descriptor: RowDescriptor,
    committed: Vec<CommittedRow>,
    draft: Option<DraftRow>,
    next_key: u64,
}

impl RowTable {
    pub fn new(descriptor: RowDescriptor) -> Self {
        Self {
            descriptor,
            committed: Vec::new(),
            draft: None,
            next_key: 1,
        }
    }

    pub fn descriptor(&self) -> &RowDescriptor {
        &self.descriptor
    }

    pub fn committed(&self) -> &[CommittedRow] {
        &self.committed
    }

    pub fn draft(&self) -> Option<&DraftRow> {
        self.draft.as_ref()
    }

    pub fn draft_key(&self) -> Option<u64> {
        self.draft.as_ref().map(|d| d.key)
    }

    /// Rows rendered into the table body, the action row included
    pub fn rendered_rows(&self) -> usize {
        self.committed.len() + if self.draft.is_some() { 2 } else { 0 }
    }

    /// Start a new draft row from the descriptor defaults
    pub fn create_row(&mut self) -> Result<u64, RowError> {
        if self.draft.is_some() {
            return Err(RowError::RowInFlight);
        }
        let key = self.next_key;
        self.next_key += 1;
        let cells = self.descriptor.columns.iter().map(initial_cell).collect();
        self.draft = Some(DraftRow { key, cells });
        Ok(key)
    }

    fn draft_cell_mut(&mut self, column: usize) -> Result<&mut DraftCell, RowError> {
        let draft = self.draft.as_mut().ok_or(RowError::NoDraft)?;
        draft.cells.get_mut(column).ok_or(RowError::NoColumn(column))
    }

    /// Set the value of a draft cell. Select cells follow the custom-input rule.
    pub fn set_value(&mut self, column: usize, value: impl Into<String>) -> Result<(), RowError> {
        let is_select = matches!(
            self.descriptor.columns.get(column).map(|c| &c.kind),
            Some(ControlKind::Select { .. })
        );
        let cell = self.draft_cell_mut(column)?;
        cell.value = value.into();
        if is_select {
            cell.custom = on_select_change(&cell.value).apply_to(&cell.custom);
        }
        Ok(())
    }

    /// Set the companion custom text of a select cell
    pub fn set_custom(&mut self, column: usize, text: impl Into<String>) -> Result<(), RowError> {
        let cell = self.draft_cell_mut(column)?;
        cell.custom = text.into();
        Ok(())
    }

    /// Validate the draft and freeze it into a committed row
    pub fn save(&mut self) -> Result<&CommittedRow, RowError> {
        let draft = self.draft.as_ref().ok_or(RowError::NoDraft)?;
        let cells = self
            .descriptor
            .columns
            .iter()
            .zip(&draft.cells)
            .map(|(column, cell)| commit_cell(column, cell))
            .collect::<Result<Vec<_>, _>>()?;
        let key = draft.key;
        self.draft = None;
        self.committed.push(CommittedRow { key, cells });
        Ok(&self.committed[self.committed.len() - 1])
    }

    /// Save after the descriptor's confirmation prompt, if it has one.
    /// A declined prompt returns `Ok(None)` and keeps the draft.
    pub fn save_confirmed<C: ConfirmSave>(&mut self, prompt: &C) -> Result<Option<&CommittedRow>, RowError> {
        if self.draft.is_none() {
            return Err(RowError::NoDraft);
        }
        if let Some(message) = &self.descriptor.confirm_save {
            if !prompt.confirm(message) {
                return Ok(None);
            }
        }
        self.save().map(Some)
    }

    /// Discard the draft; returns whether one existed
    pub fn cancel(&mut self) -> bool {
        self.draft.take().is_some()
    }
}

fn initial_cell(column: &ColumnSpec) -> DraftCell {
    match &column.kind {
        ControlKind::Text { default, .. } | ControlKind::Editable { default } => DraftCell::new(default.clone()),
        ControlKind::Number { default } => DraftCell::new(default.to_string()),
        ControlKind::Select { options, custom } => match (options.first(), custom) {
            (Some(first), _) => DraftCell::new(first.value.clone()),
            (None, Some(_)) => DraftCell::new(CUSTOM_SENTINEL),
            (None, None) => DraftCell::new(""),
        },
        ControlKind::Checkbox { .. } => DraftCell::new(""),
    }
}

fn non_empty_or_fallback(column: &ColumnSpec, raw: &str) -> Result<String, RowError> {
    let text = raw.trim();
    if !text.is_empty() {
        return Ok(text.to_string());
    }
    if column.required {
        return Err(RowError::Required(column.label.clone()));
    }
    Ok(column.fallback.clone().unwrap_or_default())
}

fn commit_cell(column: &ColumnSpec, cell: &DraftCell) -> Result<CommittedCell, RowError> {
    let name = column.name.clone();
    match &column.kind {
        ControlKind::Text { .. } | ControlKind::Editable { .. } => {
            let text = non_empty_or_fallback(column, &cell.value)?;
            Ok(CommittedCell { fields: vec![(name, text.clone())], text })
        }
        ControlKind::Number { .. } => {
            let raw = cell.value.trim();
            let count: u32 = raw.parse().map_err(|_| RowError::InvalidNumber(column.label.clone()))?;
            let text = count.to_string();
            Ok(CommittedCell { fields: vec![(name, text.clone())], text })
        }
        ControlKind::Select { options, custom } => {
            if let (true, Some(custom)) = (is_custom(&cell.value), custom) {
                let text = non_empty_or_fallback(column, &cell.custom)?;
                return Ok(CommittedCell {
                    fields: vec![(name, CUSTOM_SENTINEL.to_string()), (custom.name.clone(), text.clone())],
                    text,
                });
            }
            let label = options
                .iter()
                .find(|o| o.value == cell.value)
                .map(|o| o.label.clone())
                .unwrap_or_else(|| cell.value.clone());
            let text = non_empty_or_fallback(column, &label)?;
            // Server views zip the custom list with the select list row by row
            let mut fields = vec![(name, cell.value.clone())];
            if let Some(custom) = custom {
                fields.push((custom.name.clone(), String::new()));
            }
            Ok(CommittedCell { fields, text })
        }
        ControlKind::Checkbox { .. } => {
            let checked = cell.value == "on";
            Ok(CommittedCell {
                text: if checked { "Yes" } else { "No" }.to_string(),
                fields: vec![(name, if checked { "on" } else { "off" }.to_string())],
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{SelectOption, NIL};

    fn fluid_descriptor() -> RowDescriptor {
        RowDescriptor::new()
            .column(
                ColumnSpec::select(
                    "area",
                    "Area",
                    vec![SelectOption::new("1", "Engine Oil"), SelectOption::new("2", "Coolant")],
                )
                .with_custom("custom_area", "Enter custom area"),
            )
            .column(ColumnSpec::editable("range", "Range", "In Range"))
            .column(ColumnSpec::number("number_of_issues", "Number of issues"))
            .column(ColumnSpec::text("recommendation", "Recommendation").default_value(NIL))
    }

    fn table_with_committed_row() -> RowTable {
        let mut table = RowTable::new(fluid_descriptor());
        table.create_row().unwrap();
        table.set_value(0, "2").unwrap();
        table.save().unwrap();
        table
    }

    #[test]
    fn test_create_then_cancel_restores_table() {
        let mut table = table_with_committed_row();
        let before = table.clone();

        table.create_row().unwrap();
        assert_eq!(table.rendered_rows(), before.rendered_rows() + 2);
        assert!(table.cancel());

        assert_eq!(table.committed(), before.committed());
        assert_eq!(table.rendered_rows(), before.rendered_rows());
        assert!(table.draft().is_none());
    }

    #[test]
    fn test_save_freezes_filled_values() {
        let mut table = table_with_committed_row();
        let first = table.committed()[0].clone();

        table.create_row().unwrap();
        table.set_value(0, "1").unwrap();
        table.set_value(1, "Low").unwrap();
        table.set_value(2, "3").unwrap();
        table.set_value(3, "Top up").unwrap();
        let saved = table.save().unwrap().clone();

        assert_eq!(saved.texts(), vec!["Engine Oil", "Low", "3", "Top up"]);
        assert!(table.draft().is_none());
        assert_eq!(table.rendered_rows(), 2);
        assert_eq!(table.committed()[0], first);
    }

    #[test]
    fn test_defaults_fill_new_row() {
        let mut table = RowTable::new(fluid_descriptor());
        table.create_row().unwrap();
        let cells = table.draft().unwrap().cells();
        assert_eq!(cells[0].value, "1");
        assert_eq!(cells[1].value, "In Range");
        assert_eq!(cells[2].value, "0");
        assert_eq!(cells[3].value, NIL);
    }

    #[test]
    fn test_single_row_in_flight() {
        let mut table = RowTable::new(fluid_descriptor());
        let key = table.create_row().unwrap();
        assert_eq!(table.create_row(), Err(RowError::RowInFlight));
        assert_eq!(table.draft_key(), Some(key));
        assert_eq!(table.rendered_rows(), 2);
    }

    fn field_names(row: &CommittedRow) -> Vec<String> {
        let mut names: Vec<String> = row.cells.iter().flat_map(|c| c.fields.iter().map(|(n, _)| n.clone())).collect();
        names.sort();
        names
    }

    #[test]
    fn test_committed_rows_post_the_same_fields() {
        let mut table = RowTable::new(fluid_descriptor());
        table.create_row().unwrap();
        table.set_value(0, "1").unwrap();
        let listed = table.save().unwrap().clone();

        table.create_row().unwrap();
        table.set_value(0, CUSTOM_SENTINEL).unwrap();
        table.set_custom(0, "Brake Fluid").unwrap();
        let custom = table.save().unwrap().clone();

        assert_eq!(field_names(&listed), field_names(&custom));
        assert_eq!(
            listed.cells[0].fields,
            vec![("area".to_string(), "1".to_string()), ("custom_area".to_string(), String::new())]
        );
    }

    #[test]
    fn test_custom_select_commits_custom_text() {
        let mut table = RowTable::new(fluid_descriptor());
        table.create_row().unwrap();
        table.set_value(0, CUSTOM_SENTINEL).unwrap();
        assert!(table.draft().unwrap().cells()[0].custom_visible());
        table.set_custom(0, "  Brake Fluid ").unwrap();

        let saved = table.save().unwrap();
        assert_eq!(saved.cells[0].text, "Brake Fluid");
        assert_eq!(
            saved.cells[0].fields,
            vec![
                ("area".to_string(), CUSTOM_SENTINEL.to_string()),
                ("custom_area".to_string(), "Brake Fluid".to_string()),
            ]
        );
    }

    #[test]
    fn test_leaving_sentinel_clears_custom_text() {
        let mut table = RowTable::new(fluid_descriptor());
        table.create_row().unwrap();
        table.set_value(0, CUSTOM_SENTINEL).unwrap();
        table.set_custom(0, "Washer Fluid").unwrap();
        table.set_value(0, "2").unwrap();

        let cell = &table.draft().unwrap().cells()[0];
        assert!(!cell.custom_visible());
        assert_eq!(cell.custom, "");
    }

    #[test]
    fn test_number_rejects_negative_and_text() {
        let mut table = RowTable::new(fluid_descriptor());
        table.create_row().unwrap();
        for bad in ["-1", "2.5", "many", ""] {
            table.set_value(2, bad).unwrap();
            assert_eq!(table.save().unwrap_err(), RowError::InvalidNumber("Number of issues".into()));
        }
        assert!(table.draft().is_some());
        assert!(table.committed().is_empty());
    }

    #[test]
    fn test_required_and_fallback() {
        let descriptor = RowDescriptor::new()
            .column(ColumnSpec::text("brand", "Brand").required())
            .column(ColumnSpec::text("remark", "Remark").fallback(NIL));
        let mut table = RowTable::new(descriptor);
        table.create_row().unwrap();
        table.set_value(0, "   ").unwrap();

        let err = table.save().unwrap_err();
        assert_eq!(err.to_string(), "Please fill in Brand.");

        table.set_value(0, "Saint-Gobain").unwrap();
        assert_eq!(table.save().unwrap().texts(), vec!["Saint-Gobain", NIL]);
    }

    #[test]
    fn test_checkbox_commits_yes_no() {
        let descriptor = RowDescriptor::new().column(ColumnSpec::checkbox("repainted", "Repainted", "Repainted?"));
        let mut table = RowTable::new(descriptor);
        table.create_row().unwrap();
        table.set_value(0, "on").unwrap();
        let saved = table.save().unwrap();
        assert_eq!(saved.cells[0].text, "Yes");
        assert_eq!(saved.cells[0].fields, vec![("repainted".to_string(), "on".to_string())]);
    }

    struct Answer {
        accept: bool,
        asked: std::cell::RefCell<Vec<String>>,
    }

    impl Answer {
        fn new(accept: bool) -> Self {
            Self { accept, asked: Default::default() }
        }
    }

    impl ConfirmSave for Answer {
        fn confirm(&self, message: &str) -> bool {
            self.asked.borrow_mut().push(message.to_string());
            self.accept
        }
    }

    #[test]
    fn test_declined_confirmation_keeps_draft() {
        let mut table = RowTable::new(fluid_descriptor().confirm_save("Save this row?"));
        let key = table.create_row().unwrap();
        table.set_value(1, "Low").unwrap();

        let declined = Answer::new(false);
        assert_eq!(table.save_confirmed(&declined), Ok(None));
        assert_eq!(*declined.asked.borrow(), vec!["Save this row?"]);
        assert_eq!(table.draft_key(), Some(key));
        assert_eq!(table.draft().unwrap().cells()[1].value, "Low");
        assert!(table.committed().is_empty());

        let accepted = Answer::new(true);
        let saved = table.save_confirmed(&accepted).unwrap().unwrap();
        assert_eq!(saved.key, key);
        assert!(table.draft().is_none());
    }

    #[test]
    fn test_no_prompt_without_confirm_message() {
        let mut table = RowTable::new(fluid_descriptor());
        table.create_row().unwrap();
        let answer = Answer::new(false);
        assert!(table.save_confirmed(&answer).unwrap().is_some());
        assert!(answer.asked.borrow().is_empty());
        assert_eq!(table.save_confirmed(&answer), Err(RowError::NoDraft));
    }

    #[test]
    fn test_repeated_create_keeps_edited_draft() {
        let mut table = RowTable::new(fluid_descriptor());
        let key = table.create_row().unwrap();
        table.set_value(3, "Top up").unwrap();
        for _ in 0..3 {
            assert_eq!(table.create_row(), Err(RowError::RowInFlight));
        }
        let draft = table.draft().unwrap();
        assert_eq!(draft.key(), key);
        assert_eq!(draft.cells()[3].value, "Top up");
        assert_eq!(table.rendered_rows(), 2);
    }

    #[test]
    fn test_operations_without_draft() {
        let mut table = RowTable::new(fluid_descriptor());
        assert!(!table.cancel());
        assert_eq!(table.save().unwrap_err(), RowError::NoDraft);
        assert_eq!(table.set_value(0, "1"), Err(RowError::NoDraft));
        table.create_row().unwrap();
        assert_eq!(table.set_value(9, "1"), Err(RowError::NoColumn(9)));
    }
}
