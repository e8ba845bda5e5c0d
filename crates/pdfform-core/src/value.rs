//! Caller-facing field values and their canonical on-disk forms.

use std::fmt;

/// A value as read from, or supplied for, a form field.
///
/// Multi-select choice fields hold a list; everything else holds text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum FieldValue {
    /// A single text token.
    Text(String),
    /// Several selected tokens, in document order.
    List(Vec<String>),
}

impl FieldValue {
    /// The empty text value.
    pub fn empty() -> Self {
        FieldValue::Text(String::new())
    }

    /// Returns the text if this is a single value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::List(_) => None,
        }
    }

    /// Returns the single token of a text value or a one-element list.
    pub fn single(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::List(items) if items.len() == 1 => Some(&items[0]),
            FieldValue::List(_) => None,
        }
    }

    /// Returns true for empty text and empty lists.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::List(items) => items.is_empty(),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(items: Vec<&str>) -> Self {
        FieldValue::List(items.into_iter().map(str::to_string).collect())
    }
}

/// One entry of a write request: a qualified field name and its new value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FillRequest {
    pub name: String,
    pub value: FieldValue,
}

impl FillRequest {
    pub fn new(name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A validated value in the form the tree writer stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedValue {
    /// Text for `/V` on the field and its widgets.
    Text(String),
    /// Checkbox state: `Yes`, `Off`, or a passed-through state name.
    Checkbox(String),
    /// Radio group addressed by `/Opt` index.
    RadioIndex { index: usize, export: String },
    /// Radio group addressed by appearance-state name.
    RadioState(String),
    /// Deselect every button of a radio group.
    RadioOff,
    /// Single choice; `index` is `None` for free text in an editable combo.
    Choice { export: String, index: Option<usize> },
    /// Multi-select choice as `(option index, export value)` in index order.
    MultiChoice(Vec<(usize, String)>),
    /// Remove the choice value.
    ChoiceClear,
}

impl NormalizedValue {
    /// The value a subsequent read is expected to report.
    pub fn to_field_value(&self) -> FieldValue {
        match self {
            NormalizedValue::Text(s)
            | NormalizedValue::Checkbox(s)
            | NormalizedValue::RadioState(s) => FieldValue::Text(s.clone()),
            NormalizedValue::RadioIndex { export, .. } | NormalizedValue::Choice { export, .. } => {
                FieldValue::Text(export.clone())
            }
            NormalizedValue::RadioOff => FieldValue::Text("Off".to_string()),
            NormalizedValue::MultiChoice(items) => {
                FieldValue::List(items.iter().map(|(_, v)| v.clone()).collect())
            }
            NormalizedValue::ChoiceClear => FieldValue::empty(),
        }
    }
}
