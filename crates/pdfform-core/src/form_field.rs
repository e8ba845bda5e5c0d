//! PDF form field types for AcroForm reading and filling.
//!
//! Provides [`FormField`], the flat, addressable record produced for every
//! named node of the field tree, and [`FieldKind`], the classified control
//! type derived from `/FT` and `/Ff`.

use crate::flags::{FieldFlags, FlagMeanings};
use crate::geometry::FieldRect;
use crate::value::FieldValue;

/// The classified type of a form field.
///
/// Derived from the `/FT` entry and the type bits of `/Ff`
/// (PDF 1.7 Tables 220, 226, 230).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FieldKind {
    /// Text field (`/FT /Tx`), or a typeless container with kids.
    Text,
    /// Button field without the radio or push-button bit.
    Checkbox,
    /// Button field with the radio bit.
    Radio,
    /// Choice field with the combo bit.
    Combo,
    /// Choice field without the combo bit.
    ListBox,
    /// Button field with the push-button bit. Never exposed to callers.
    PushButton,
    /// Signature field (`/FT /Sig`).
    Signature,
}

impl FieldKind {
    /// Return the `/FT` name for this kind.
    pub fn as_pdf_name(&self) -> &'static str {
        match self {
            Self::Text => "Tx",
            Self::Checkbox | Self::Radio | Self::PushButton => "Btn",
            Self::Combo | Self::ListBox => "Ch",
            Self::Signature => "Sig",
        }
    }

    /// Whether fields of this kind appear in the caller-visible registry.
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::PushButton)
    }

    /// Whether fields of this kind accept write requests.
    pub fn accepts_values(&self) -> bool {
        !matches!(self, Self::PushButton | Self::Signature)
    }

    /// Whether the value is mirrored into widget appearance states.
    pub fn is_button(&self) -> bool {
        matches!(self, Self::Checkbox | Self::Radio | Self::PushButton)
    }

    /// Whether the field picks from an option list.
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Combo | Self::ListBox)
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Text => "Text",
            Self::Checkbox => "Checkbox",
            Self::Radio => "Radio",
            Self::Combo => "Combo",
            Self::ListBox => "ListBox",
            Self::PushButton => "PushButton",
            Self::Signature => "Signature",
        };
        f.write_str(name)
    }
}

/// One selectable option: the text a viewer shows and the token stored in `/V`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldOption {
    /// Human-readable display text.
    pub text: String,
    /// Export value written to the document.
    pub value: String,
}

impl FieldOption {
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
        }
    }

    /// An option whose display text equals its export value.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            text: value.clone(),
            value,
        }
    }
}

/// Where a field's option list came from.
///
/// Radio groups are index-addressed when an `/Opt` array is present and
/// state-addressed when options were derived from widget appearance states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OptionSource {
    /// The field has no options.
    #[default]
    None,
    /// Fixed checkbox pair.
    Fixed,
    /// The field's `/Opt` array.
    OptArray,
    /// Appearance-state names collected from the widgets' `/AP/N`.
    AppearanceStates,
}

/// A logical form field extracted from the AcroForm field tree.
///
/// One record exists per node carrying a `/T` entry; widget kids without
/// their own `/T` are folded into the record of their named ancestor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormField {
    /// Fully-qualified name: ancestor `/T` entries joined with `.`.
    pub name: String,
    /// This node's own `/T`.
    pub partial_name: String,
    /// Classified field type.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: FieldKind,
    /// Current value, normalized for display.
    pub value: FieldValue,
    /// Default value from `/DV`.
    pub default_value: Option<FieldValue>,
    /// Label from `/TU` or `/TM`.
    pub label: Option<String>,
    /// Ordered selectable options.
    pub options: Vec<FieldOption>,
    /// How `options` was derived.
    pub option_source: OptionSource,
    /// Raw `/Ff` bitmask (inherited when the node has none).
    pub flags: u32,
    /// Decoded `/Ff` bits.
    pub flag_meanings: FlagMeanings,
    /// `/MaxLen` for text fields.
    pub max_length: Option<usize>,
    /// 0-based page index of the first widget found.
    pub page: Option<usize>,
    /// Rectangle of the first widget found.
    pub rect: Option<FieldRect>,
    /// True when the field has a named parent field.
    pub is_subfield: bool,
    /// Mirrors the `required` flag bit.
    pub required: bool,
    /// Number of widget annotations that display this field.
    pub widget_count: usize,
}

impl FormField {
    /// Return the flags as a [`FieldFlags`] bitmask.
    pub fn field_flags(&self) -> FieldFlags {
        FieldFlags::from_bits_retain(self.flags)
    }

    /// Export values of all options, in order.
    pub fn export_values(&self) -> Vec<String> {
        self.options.iter().map(|o| o.value.clone()).collect()
    }

    /// Find an option by export value, falling back to display text.
    pub fn find_option(&self, token: &str) -> Option<(usize, &FieldOption)> {
        self.options
            .iter()
            .enumerate()
            .find(|(_, o)| o.value == token)
            .or_else(|| self.options.iter().enumerate().find(|(_, o)| o.text == token))
    }

    /// Whether a radio group is addressed by option index.
    pub fn is_index_addressed(&self) -> bool {
        self.kind == FieldKind::Radio && self.option_source == OptionSource::OptArray
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(kind: FieldKind, options: Vec<FieldOption>, source: OptionSource) -> FormField {
        FormField {
            name: "f".to_string(),
            partial_name: "f".to_string(),
            kind,
            value: FieldValue::empty(),
            default_value: None,
            label: None,
            options,
            option_source: source,
            flags: 0,
            flag_meanings: FlagMeanings::default(),
            max_length: None,
            page: None,
            rect: None,
            is_subfield: false,
            required: false,
            widget_count: 1,
        }
    }

    #[test]
    fn kind_pdf_names() {
        assert_eq!(FieldKind::Text.as_pdf_name(), "Tx");
        assert_eq!(FieldKind::Checkbox.as_pdf_name(), "Btn");
        assert_eq!(FieldKind::Radio.as_pdf_name(), "Btn");
        assert_eq!(FieldKind::PushButton.as_pdf_name(), "Btn");
        assert_eq!(FieldKind::Combo.as_pdf_name(), "Ch");
        assert_eq!(FieldKind::ListBox.as_pdf_name(), "Ch");
        assert_eq!(FieldKind::Signature.as_pdf_name(), "Sig");
    }

    #[test]
    fn kind_display() {
        assert_eq!(FieldKind::ListBox.to_string(), "ListBox");
        assert_eq!(FieldKind::PushButton.to_string(), "PushButton");
    }

    #[test]
    fn push_buttons_are_hidden_and_read_only() {
        assert!(!FieldKind::PushButton.is_visible());
        assert!(!FieldKind::PushButton.accepts_values());
        assert!(FieldKind::Signature.is_visible());
        assert!(!FieldKind::Signature.accepts_values());
        assert!(FieldKind::Radio.accepts_values());
    }

    #[test]
    fn find_option_prefers_export_value() {
        let f = field(
            FieldKind::Combo,
            vec![
                FieldOption::new("United States", "US"),
                FieldOption::new("US", "USA-legacy"),
            ],
            OptionSource::OptArray,
        );
        let (idx, opt) = f.find_option("US").unwrap();
        assert_eq!(idx, 0);
        assert_eq!(opt.text, "United States");
    }

    #[test]
    fn find_option_falls_back_to_display_text() {
        let f = field(
            FieldKind::Combo,
            vec![FieldOption::new("France", "FR")],
            OptionSource::OptArray,
        );
        assert_eq!(f.find_option("France").unwrap().1.value, "FR");
        assert!(f.find_option("Spain").is_none());
    }

    #[test]
    fn index_addressed_only_for_radio_with_opt() {
        let radio = field(FieldKind::Radio, vec![], OptionSource::OptArray);
        assert!(radio.is_index_addressed());
        let derived = field(FieldKind::Radio, vec![], OptionSource::AppearanceStates);
        assert!(!derived.is_index_addressed());
        let combo = field(FieldKind::Combo, vec![], OptionSource::OptArray);
        assert!(!combo.is_index_addressed());
    }

    #[test]
    fn export_values_in_order() {
        let f = field(
            FieldKind::ListBox,
            vec![FieldOption::plain("English"), FieldOption::plain("German")],
            OptionSource::OptArray,
        );
        assert_eq!(f.export_values(), vec!["English", "German"]);
    }
}
