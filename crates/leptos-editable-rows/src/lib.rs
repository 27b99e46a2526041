//! Leptos Editable Rows
//!
//! Descriptor-driven editable table rows for server-rendered forms.
//! A row is created in editable state, then either committed (controls
//! frozen to plain text, action row removed) or discarded.
//! At most one row per table is in flight.

mod custom_input;
mod descriptor;
mod table;
mod view;

pub use custom_input::{bind_custom_input, bind_pair_in, bind_rows, is_custom, on_bind, on_select_change, CustomInput};
pub use descriptor::{ColumnSpec, ControlKind, CustomField, RowDescriptor, SelectOption, CUSTOM_LABEL, CUSTOM_SENTINEL, NIL};
pub use table::{CommittedCell, CommittedRow, ConfirmSave, DraftCell, DraftRow, RowError, RowTable};
pub use view::{attach, EditableRows};
