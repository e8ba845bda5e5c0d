//! Tree writer: applies fill requests to the field tree.
//!
//! A fill runs in two phases. Every request is first resolved against the
//! registry and normalized; in strict mode an invalid option or over-long
//! value aborts here, before the document is touched. The planned values are
//! then written: `/V` on the field, `/AS` on each button widget, `/I` on list
//! boxes, and finally `/NeedAppearances` on the AcroForm.

use lopdf::{Object, ObjectId, StringFormat};
use pdfform_core::normalize::{CHECKED, OFF};
use pdfform_core::{
    FieldDiagnostic, FieldFlags, FieldKind, FillReport, FillRequest, FormError, FormOptions,
    Normalized, NormalizedValue, encode_pdf_text, normalize,
};
use tracing::{debug, info, warn};

use crate::classify::appearance_states;
use crate::document::FormDocument;
use crate::error::BackendError;
use crate::registry::{FieldNode, FieldRegistry};

/// A normalized write waiting for the mutation phase.
struct Planned<'r> {
    node: &'r FieldNode,
    value: NormalizedValue,
    /// False when the value was downgraded (reset, cleared, truncated).
    exact: bool,
}

/// Apply fill requests to `doc`.
///
/// Unknown names and non-writable fields are always skipped and reported.
/// In strict mode `InvalidOption` and `ValueTooLong` abort the whole fill
/// with the document unchanged; in lenient mode they are reported and the
/// fill continues.
pub fn apply(
    doc: &mut FormDocument,
    registry: &FieldRegistry,
    requests: &[FillRequest],
    options: &FormOptions,
) -> Result<FillReport, BackendError> {
    let mut report = FillReport::default();
    let mut plan = Vec::with_capacity(requests.len());

    for request in requests {
        let Some(node) = registry.get(&request.name) else {
            let err = FormError::UnknownField(request.name.clone());
            if options.strict {
                warn!(name = %request.name, "unknown field; skipped");
            } else {
                debug!(name = %request.name, "unknown field; skipped");
            }
            report
                .diagnostics
                .push(FieldDiagnostic::from_error(&request.name, &err));
            continue;
        };

        match normalize(&node.field, &request.value, options) {
            Ok(Normalized { value, diagnostic }) => {
                let exact = diagnostic.is_none();
                if let Some(diagnostic) = diagnostic {
                    warn!(%diagnostic, "value not applied as given");
                    report.diagnostics.push(diagnostic);
                }
                plan.push(Planned { node, value, exact });
            }
            Err(err @ FormError::NotWritable { .. }) => {
                warn!(name = %request.name, "field does not accept values; skipped");
                report
                    .diagnostics
                    .push(FieldDiagnostic::from_error(&request.name, &err));
            }
            Err(err) if options.strict => return Err(err.into()),
            Err(err) => {
                warn!(name = %request.name, error = %err, "invalid value; skipped");
                report
                    .diagnostics
                    .push(FieldDiagnostic::from_error(&request.name, &err));
            }
        }
    }

    for step in &plan {
        write_value(doc, step.node, &step.value);
        if options.flatten {
            let flags = step.node.field.flags | FieldFlags::READ_ONLY.bits();
            set_entry(doc, step.node.id, "Ff", Object::Integer(i64::from(flags)));
        }
        debug!(name = %step.node.field.name, value = ?step.value, "wrote field");
        if step.exact {
            report.applied.push(step.node.field.name.clone());
        }
    }

    if options.need_appearances && !doc.set_need_appearances() {
        warn!("document has no AcroForm; NeedAppearances not set");
    }
    info!(
        applied = report.applied.len(),
        diagnostics = report.diagnostics.len(),
        "fill complete"
    );
    Ok(report)
}

/// Write one normalized value into the field and its widgets.
pub fn write_value(doc: &mut FormDocument, node: &FieldNode, value: &NormalizedValue) {
    match value {
        NormalizedValue::Text(text) => {
            let obj = text_object(text);
            for kid in node.widget_kids() {
                set_entry(doc, kid, "V", obj.clone());
            }
            set_entry(doc, node.id, "V", obj);
        }
        NormalizedValue::Checkbox(state) => write_checkbox(doc, node, state),
        NormalizedValue::RadioIndex { index, export } => {
            set_entry(doc, node.id, "V", name_object(export));
            for (i, &widget) in node.widgets.iter().enumerate() {
                let state = if i == *index { export.as_str() } else { OFF };
                set_entry(doc, widget, "AS", name_object(state));
                if widget != node.id {
                    set_entry(doc, widget, "V", name_object(export));
                }
            }
        }
        NormalizedValue::RadioState(state) => write_radio_state(doc, node, Some(state)),
        NormalizedValue::RadioOff => write_radio_state(doc, node, None),
        NormalizedValue::Choice { export, index } => {
            set_entry(doc, node.id, "V", text_object(export));
            if node.field.kind == FieldKind::Combo {
                set_entry(doc, node.id, "AS", name_object(export));
                remove_entry(doc, node.id, b"I");
            } else {
                match index {
                    Some(i) => set_entry(doc, node.id, "I", index_array(&[*i])),
                    None => remove_entry(doc, node.id, b"I"),
                }
            }
        }
        NormalizedValue::MultiChoice(items) => {
            let values = items.iter().map(|(_, v)| text_object(v)).collect::<Vec<_>>();
            let indices = items.iter().map(|(i, _)| *i).collect::<Vec<_>>();
            set_entry(doc, node.id, "V", Object::Array(values));
            set_entry(doc, node.id, "I", index_array(&indices));
        }
        NormalizedValue::ChoiceClear => {
            remove_entry(doc, node.id, b"V");
            remove_entry(doc, node.id, b"I");
        }
    }
}

/// Set a checkbox group. Each widget shows `Yes` unless its appearance
/// dictionary only knows a different on-state, which is used instead.
fn write_checkbox(doc: &mut FormDocument, node: &FieldNode, state: &str) {
    let states: Vec<(ObjectId, String)> = node
        .widgets
        .iter()
        .map(|&widget| (widget, checkbox_widget_state(doc, widget, state)))
        .collect();
    let value = if state == OFF {
        OFF.to_string()
    } else {
        states
            .iter()
            .map(|(_, s)| s.as_str())
            .find(|s| *s != OFF)
            .unwrap_or(state)
            .to_string()
    };

    set_entry(doc, node.id, "V", name_object(&value));
    set_entry(doc, node.id, "AS", name_object(&value));
    for (widget, widget_state) in states {
        set_entry(doc, widget, "AS", name_object(&widget_state));
        if widget != node.id {
            set_entry(doc, widget, "V", name_object(&value));
        }
    }
}

fn checkbox_widget_state(doc: &FormDocument, widget: ObjectId, state: &str) -> String {
    if state == OFF {
        return OFF.to_string();
    }
    let known = doc
        .dictionary(widget)
        .map(|dict| appearance_states(doc, dict))
        .unwrap_or_default();
    if known.is_empty() || known.iter().any(|s| s == state) {
        return state.to_string();
    }
    if state == CHECKED {
        if let Some(on) = known.iter().find(|s| *s != OFF) {
            return on.clone();
        }
    }
    OFF.to_string()
}

/// Select `state` on every widget whose appearance dictionary defines it and
/// turn all other widgets off. `None` turns the whole group off.
fn write_radio_state(doc: &mut FormDocument, node: &FieldNode, state: Option<&str>) {
    let value = state.unwrap_or(OFF);
    let states: Vec<(ObjectId, &str)> = node
        .widgets
        .iter()
        .map(|&widget| {
            let selected = state.is_some_and(|s| widget_has_state(doc, widget, s));
            (widget, if selected { value } else { OFF })
        })
        .collect();

    set_entry(doc, node.id, "V", name_object(value));
    for (widget, widget_state) in states {
        set_entry(doc, widget, "AS", name_object(widget_state));
        if widget != node.id {
            set_entry(doc, widget, "V", name_object(value));
        }
    }
}

fn widget_has_state(doc: &FormDocument, widget: ObjectId, state: &str) -> bool {
    doc.dictionary(widget)
        .is_some_and(|dict| appearance_states(doc, dict).iter().any(|s| s == state))
}

fn set_entry(doc: &mut FormDocument, id: ObjectId, key: &str, value: Object) {
    match doc.dictionary_mut(id) {
        Some(dict) => dict.set(key, value),
        None => warn!(object = ?id, key, "cannot write to non-dictionary object"),
    }
}

fn remove_entry(doc: &mut FormDocument, id: ObjectId, key: &[u8]) {
    if let Some(dict) = doc.dictionary_mut(id) {
        dict.remove(key);
    }
}

/// A PDF text string: literal for ASCII, hex-encoded UTF-16BE otherwise.
fn text_object(text: &str) -> Object {
    let format = if text.is_ascii() {
        StringFormat::Literal
    } else {
        StringFormat::Hexadecimal
    };
    Object::String(encode_pdf_text(text), format)
}

fn name_object(name: &str) -> Object {
    Object::Name(name.as_bytes().to_vec())
}

fn index_array(indices: &[usize]) -> Object {
    Object::Array(
        indices
            .iter()
            .map(|&i| Object::Integer(i as i64))
            .collect(),
    )
}
