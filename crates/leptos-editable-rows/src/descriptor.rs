//! Row Descriptors
//!
//! Column specifications used to materialize new editable rows.

/// Reserved option value meaning "the user types a custom value".
pub const CUSTOM_SENTINEL: &str = "__custom__";

/// Label shown for the sentinel option.
pub const CUSTOM_LABEL: &str = "Other...";

/// Default recommendation/remark text.
pub const NIL: &str = "NIL";

/// One `<option>` of a select column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self { value: value.into(), label: label.into() }
    }

    /// Option whose value and label are the same text
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self { value: text.clone(), label: text }
    }
}

/// Companion free-text input of a select column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomField {
    /// Form field name of the free-text input (e.g. `custom_area`)
    pub name: String,
    pub placeholder: String,
}

/// Control rendered in an editable cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlKind {
    Text { placeholder: String, default: String },
    /// Non-negative integer input
    Number { default: u32 },
    /// Select; `custom` appends the `Other...` sentinel and a free-text input
    Select { options: Vec<SelectOption>, custom: Option<CustomField> },
    /// contenteditable cell
    Editable { default: String },
    Checkbox { caption: String },
}

/// A single column of a row descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Form field name used for the hidden inputs of a committed row
    pub name: String,
    /// Human label, used in validation messages
    pub label: String,
    pub kind: ControlKind,
    /// Reject an empty value on save
    pub required: bool,
    /// Text committed when the value is left empty
    pub fallback: Option<String>,
}

impl ColumnSpec {
    fn new(name: impl Into<String>, label: impl Into<String>, kind: ControlKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
            fallback: None,
        }
    }

    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, ControlKind::Text { placeholder: String::new(), default: String::new() })
    }

    pub fn number(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, ControlKind::Number { default: 0 })
    }

    pub fn select(name: impl Into<String>, label: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self::new(name, label, ControlKind::Select { options, custom: None })
    }

    /// Select over plain text options (value == label)
    pub fn choice(name: impl Into<String>, label: impl Into<String>, options: &[&str]) -> Self {
        let options = options.iter().map(|o| SelectOption::plain(*o)).collect();
        Self::select(name, label, options)
    }

    pub fn editable(name: impl Into<String>, label: impl Into<String>, default: impl Into<String>) -> Self {
        Self::new(name, label, ControlKind::Editable { default: default.into() })
    }

    pub fn checkbox(name: impl Into<String>, label: impl Into<String>, caption: impl Into<String>) -> Self {
        Self::new(name, label, ControlKind::Checkbox { caption: caption.into() })
    }

    /// Placeholder of a text column; ignored for other kinds
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        if let ControlKind::Text { placeholder, .. } = &mut self.kind {
            *placeholder = text.into();
        }
        self
    }

    /// Initial value of a text or editable column
    pub fn default_value(mut self, text: impl Into<String>) -> Self {
        match &mut self.kind {
            ControlKind::Text { default, .. } | ControlKind::Editable { default } => *default = text.into(),
            _ => {}
        }
        self
    }

    /// Adds the `Other...` sentinel and a free-text input to a select column
    pub fn with_custom(mut self, name: impl Into<String>, placeholder: impl Into<String>) -> Self {
        if let ControlKind::Select { custom, .. } = &mut self.kind {
            *custom = Some(CustomField { name: name.into(), placeholder: placeholder.into() });
        }
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn fallback(mut self, text: impl Into<String>) -> Self {
        self.fallback = Some(text.into());
        self
    }

    /// Select options as rendered, sentinel included
    pub fn rendered_options(&self) -> Vec<SelectOption> {
        match &self.kind {
            ControlKind::Select { options, custom } => {
                let mut all = options.clone();
                if custom.is_some() {
                    all.push(SelectOption::new(CUSTOM_SENTINEL, CUSTOM_LABEL));
                }
                all
            }
            _ => Vec::new(),
        }
    }
}

/// Template of a table row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowDescriptor {
    pub columns: Vec<ColumnSpec>,
    /// Message of the confirmation prompt shown before saving
    pub confirm_save: Option<String>,
}

impl RowDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(mut self, column: ColumnSpec) -> Self {
        self.columns.push(column);
        self
    }

    pub fn confirm_save(mut self, message: impl Into<String>) -> Self {
        self.confirm_save = Some(message.into());
        self
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
