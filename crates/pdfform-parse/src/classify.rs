//! Field type classification and per-type metadata.
//!
//! Maps `/FT` plus the type bits of `/Ff` to a [`FieldKind`] and derives the
//! option list a field offers: `/Opt` entries for choice fields and indexed
//! radio groups, appearance-state names for option-less radio groups, and the
//! fixed checked/unchecked pair for checkboxes.

use lopdf::{Dictionary, Object, ObjectId};
use pdfform_core::{FieldFlags, FieldKind, FieldOption, OptionSource};
use tracing::warn;

use crate::document::{FormDocument, object_text};

/// Classify a field from its (possibly inherited) `/FT` and `/Ff`.
///
/// A node without `/FT` is a container and classifies as `Text`; so does an
/// unrecognized `/FT` value.
pub fn classify_kind(field_type: Option<&str>, flags: FieldFlags) -> FieldKind {
    match field_type {
        Some("Btn") if flags.contains(FieldFlags::PUSH_BUTTON) => FieldKind::PushButton,
        Some("Btn") if flags.contains(FieldFlags::RADIO) => FieldKind::Radio,
        Some("Btn") => FieldKind::Checkbox,
        Some("Ch") if flags.contains(FieldFlags::COMBO) => FieldKind::Combo,
        Some("Ch") => FieldKind::ListBox,
        Some("Sig") => FieldKind::Signature,
        _ => FieldKind::Text,
    }
}

/// Parse a choice field's `/Opt` array.
///
/// Entries are either a text string (display text equals export value) or a
/// two-element `[export, display]` array. Every entry keeps its slot so that
/// positions line up with `/I`: a pair whose display text is unreadable shows
/// its export value, and an entry with no readable text becomes an empty
/// option.
pub fn opt_entries(doc: &FormDocument, dict: &Dictionary) -> Option<Vec<FieldOption>> {
    let items = doc.dict_array(dict, b"Opt")?;
    Some(
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let option = match doc.resolve(item) {
                    Object::Array(pair) if pair.len() >= 2 => {
                        object_text(doc.resolve(&pair[0])).map(|export| {
                            match object_text(doc.resolve(&pair[1])) {
                                Some(display) => FieldOption::new(display, export),
                                None => FieldOption::plain(export),
                            }
                        })
                    }
                    Object::Array(single) if single.len() == 1 => {
                        object_text(doc.resolve(&single[0])).map(FieldOption::plain)
                    }
                    other => object_text(other).map(FieldOption::plain),
                };
                option.unwrap_or_else(|| {
                    warn!(index, entry = ?item, "unreadable /Opt entry; kept as empty option");
                    FieldOption::plain("")
                })
            })
            .collect(),
    )
}

/// Appearance-state names of a widget's `/AP/N` dictionary, in document order.
pub fn appearance_states(doc: &FormDocument, widget: &Dictionary) -> Vec<String> {
    let Some(ap) = doc.dict_dict(widget, b"AP") else {
        return Vec::new();
    };
    let Some(normal) = doc.dict_dict(ap, b"N") else {
        return Vec::new();
    };
    normal
        .iter()
        .map(|(key, _)| String::from_utf8_lossy(key).into_owned())
        .collect()
}

/// First appearance state of a widget other than `Off`.
pub fn on_state(doc: &FormDocument, widget: &Dictionary) -> Option<String> {
    appearance_states(doc, widget)
        .into_iter()
        .find(|state| state != "Off")
}

/// Derive the ordered options of a classified field.
///
/// `widgets` are the field's widget annotations in `/Kids` order.
pub fn field_options(
    doc: &FormDocument,
    kind: FieldKind,
    dict: &Dictionary,
    widgets: &[ObjectId],
) -> (Vec<FieldOption>, OptionSource) {
    match kind {
        FieldKind::Checkbox => (
            vec![
                FieldOption::new("checked", "Yes"),
                FieldOption::new("unchecked", "Off"),
            ],
            OptionSource::Fixed,
        ),
        FieldKind::Radio => radio_options(doc, dict, widgets),
        FieldKind::Combo | FieldKind::ListBox => match opt_entries(doc, dict) {
            Some(options) => (options, OptionSource::OptArray),
            None => (Vec::new(), OptionSource::None),
        },
        FieldKind::Text | FieldKind::PushButton | FieldKind::Signature => {
            (Vec::new(), OptionSource::None)
        }
    }
}

fn radio_options(
    doc: &FormDocument,
    dict: &Dictionary,
    widgets: &[ObjectId],
) -> (Vec<FieldOption>, OptionSource) {
    if let Some(entries) = opt_entries(doc, dict) {
        // Option i is shown by kid i; its export value is that kid's on-state.
        let options = entries
            .into_iter()
            .enumerate()
            .map(|(i, entry)| {
                let export = widgets
                    .get(i)
                    .and_then(|&id| doc.dictionary(id))
                    .and_then(|widget| on_state(doc, widget))
                    .unwrap_or_else(|| i.to_string());
                FieldOption::new(entry.text, export)
            })
            .collect();
        return (options, OptionSource::OptArray);
    }

    let mut states: Vec<String> = widgets
        .iter()
        .filter_map(|&id| doc.dictionary(id))
        .flat_map(|widget| appearance_states(doc, widget))
        .filter(|state| state != "Off")
        .collect();
    states.sort();
    states.dedup();
    (
        states.into_iter().map(FieldOption::plain).collect(),
        OptionSource::AppearanceStates,
    )
}
