//! Value normalization: caller values to canonical on-disk values.
//!
//! [`normalize`] validates a [`FieldValue`] against a classified
//! [`FormField`] and produces the [`NormalizedValue`] the tree writer stores.
//! In strict mode a value outside the field's option set is an error; in
//! lenient mode it degrades to a reset (`Off` / cleared) and the downgrade is
//! reported as a [`FieldDiagnostic`].

use crate::error::{DiagnosticAction, DiagnosticCode, FieldDiagnostic, FormError};
use crate::flags::FieldFlags;
use crate::form_field::{FieldKind, FormField};
use crate::options::{FormOptions, MaxLengthPolicy};
use crate::value::{FieldValue, NormalizedValue};

/// Checkbox inputs read as checked (compared trimmed and lowercased).
pub const TRUTHY: &[&str] = &[
    "true",
    "yes",
    "1",
    "on",
    "checked",
    "positive",
    "是",
    "同意",
    "有",
    "对",
    "正确",
    "對",
    "正確",
    "是/yes",
    "同意/agree",
];

/// Checkbox inputs read as unchecked. The empty string is also falsy.
pub const FALSY: &[&str] = &[
    "false",
    "no",
    "0",
    "off",
    "unchecked",
    "negative",
    "否",
    "不同意",
    "无",
    "無",
    "不",
    "错",
    "錯",
    "不正确",
    "不正確",
    "否/no",
    "不同意/disagree",
];

/// Canonical checked state.
pub const CHECKED: &str = "Yes";
/// Canonical unchecked state.
pub const OFF: &str = "Off";

/// Interpret a checkbox input; `None` if it is neither truthy nor falsy.
pub fn checkbox_state(raw: &str) -> Option<bool> {
    let key = raw.trim().to_lowercase();
    let key = key.strip_prefix('/').unwrap_or(&key);
    if key.is_empty() || FALSY.contains(&key) {
        Some(false)
    } else if TRUTHY.contains(&key) {
        Some(true)
    } else {
        None
    }
}

/// Map a stored checkbox value to the value callers see.
///
/// Viewers write a variety of on-states (`On`, `1`..`5`, `Yes`); all read
/// back as `Yes`. Missing, empty, `0` and `Off` read back as `Off`. Any other
/// state name is returned unchanged.
pub fn display_checkbox(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return OFF.to_string();
    };
    let raw = raw.strip_prefix('/').unwrap_or(raw);
    match raw {
        "" | "0" | "Off" => OFF.to_string(),
        "On" | "1" | "2" | "3" | "4" | "5" | "Yes" => CHECKED.to_string(),
        other if other.eq_ignore_ascii_case("yes") || other.eq_ignore_ascii_case("on") => {
            CHECKED.to_string()
        }
        other if other.eq_ignore_ascii_case("off") => OFF.to_string(),
        other => other.to_string(),
    }
}

/// A normalized value plus the diagnostic describing any lenient downgrade.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub value: NormalizedValue,
    pub diagnostic: Option<FieldDiagnostic>,
}

impl Normalized {
    fn exact(value: NormalizedValue) -> Self {
        Self {
            value,
            diagnostic: None,
        }
    }

    fn degraded(value: NormalizedValue, diagnostic: FieldDiagnostic) -> Self {
        Self {
            value,
            diagnostic: Some(diagnostic),
        }
    }
}

/// Normalize a caller value for `field`.
///
/// Errors:
/// - `NotWritable` for signatures and push buttons.
/// - `InvalidOption` in strict mode when the value is outside the option set.
/// - `ValueTooLong` when text exceeds `/MaxLen` under [`MaxLengthPolicy::Reject`].
///
/// Lenient mode never returns `InvalidOption`; it resets radios to `Off`,
/// clears choice fields, and passes unknown checkbox states through.
pub fn normalize(
    field: &FormField,
    raw: &FieldValue,
    options: &FormOptions,
) -> Result<Normalized, FormError> {
    match field.kind {
        FieldKind::Signature | FieldKind::PushButton => Err(FormError::NotWritable {
            field: field.name.clone(),
            kind: field.kind.to_string(),
        }),
        FieldKind::Text => normalize_text(field, raw, options),
        FieldKind::Checkbox => normalize_checkbox(field, raw, options),
        FieldKind::Radio => normalize_radio(field, raw, options),
        FieldKind::Combo | FieldKind::ListBox => normalize_choice(field, raw, options),
    }
}

fn invalid(field: &FormField, raw: &FieldValue) -> FormError {
    FormError::InvalidOption {
        field: field.name.clone(),
        value: raw.to_string(),
        expected: field.export_values(),
    }
}

fn normalize_text(
    field: &FormField,
    raw: &FieldValue,
    options: &FormOptions,
) -> Result<Normalized, FormError> {
    let text = match raw {
        FieldValue::Text(s) => s.clone(),
        FieldValue::List(items) => match raw.single() {
            Some(s) => s.to_string(),
            None if options.strict => return Err(invalid(field, raw)),
            None => items.join(", "),
        },
    };

    let Some(max_length) = field.max_length else {
        return Ok(Normalized::exact(NormalizedValue::Text(text)));
    };
    let actual = text.chars().count();
    if actual <= max_length {
        return Ok(Normalized::exact(NormalizedValue::Text(text)));
    }
    match options.max_length_policy {
        MaxLengthPolicy::Reject => Err(FormError::ValueTooLong {
            field: field.name.clone(),
            max_length,
            actual,
        }),
        MaxLengthPolicy::Truncate => {
            let truncated: String = text.chars().take(max_length).collect();
            let diag = FieldDiagnostic::skipped(
                field.name.clone(),
                DiagnosticCode::Truncated,
                format!("value truncated from {actual} to {max_length} characters"),
            )
            .with_action(DiagnosticAction::Truncated);
            Ok(Normalized::degraded(NormalizedValue::Text(truncated), diag))
        }
    }
}

fn normalize_checkbox(
    field: &FormField,
    raw: &FieldValue,
    options: &FormOptions,
) -> Result<Normalized, FormError> {
    let Some(token) = raw.single() else {
        return Err(invalid(field, raw));
    };
    if let Some(checked) = checkbox_state(token) {
        let state = if checked { CHECKED } else { OFF };
        return Ok(Normalized::exact(NormalizedValue::Checkbox(state.to_string())));
    }
    // A state name the widgets actually define is accepted verbatim.
    let token = token.trim();
    let token = token.strip_prefix('/').unwrap_or(token);
    if field.options.iter().any(|o| o.value == token) {
        return Ok(Normalized::exact(NormalizedValue::Checkbox(token.to_string())));
    }
    if options.strict {
        return Err(invalid(field, raw));
    }
    Ok(Normalized::exact(NormalizedValue::Checkbox(token.to_string())))
}

fn normalize_radio(
    field: &FormField,
    raw: &FieldValue,
    options: &FormOptions,
) -> Result<Normalized, FormError> {
    let Some(token) = raw.single() else {
        return reject_or_reset(field, raw, options);
    };
    let token = token.trim();
    let token = token.strip_prefix('/').unwrap_or(token);
    if token.is_empty() || token == "None" || token == OFF {
        return Ok(Normalized::exact(NormalizedValue::RadioOff));
    }

    if field.is_index_addressed() {
        let by_index = token
            .parse::<usize>()
            .ok()
            .filter(|&i| i < field.options.len())
            .map(|i| (i, &field.options[i]));
        if let Some((index, opt)) = by_index.or_else(|| field.find_option(token)) {
            return Ok(Normalized::exact(NormalizedValue::RadioIndex {
                index,
                export: opt.value.clone(),
            }));
        }
    } else if let Some((_, opt)) = field.find_option(token) {
        return Ok(Normalized::exact(NormalizedValue::RadioState(opt.value.clone())));
    }

    reject_or_reset(field, raw, options)
}

fn reject_or_reset(
    field: &FormField,
    raw: &FieldValue,
    options: &FormOptions,
) -> Result<Normalized, FormError> {
    let err = invalid(field, raw);
    if options.strict {
        return Err(err);
    }
    let diag =
        FieldDiagnostic::from_error(field.name.clone(), &err).with_action(DiagnosticAction::ResetToOff);
    Ok(Normalized::degraded(NormalizedValue::RadioOff, diag))
}

fn normalize_choice(
    field: &FormField,
    raw: &FieldValue,
    options: &FormOptions,
) -> Result<Normalized, FormError> {
    let flags = field.field_flags();
    let multi = flags.contains(FieldFlags::MULTI_SELECT);
    let editable = field.kind == FieldKind::Combo && flags.contains(FieldFlags::EDIT);

    match raw {
        FieldValue::List(items) if multi => {
            let mut picked: Vec<(usize, String)> = Vec::with_capacity(items.len());
            let mut rejected = Vec::new();
            for item in items {
                match field.find_option(item) {
                    Some((index, opt)) => picked.push((index, opt.value.clone())),
                    None => rejected.push(item.clone()),
                }
            }
            picked.sort_by_key(|(index, _)| *index);
            picked.dedup_by_key(|(index, _)| *index);

            if rejected.is_empty() {
                return Ok(Normalized::exact(NormalizedValue::MultiChoice(picked)));
            }
            let err = FormError::InvalidOption {
                field: field.name.clone(),
                value: rejected.join(", "),
                expected: field.export_values(),
            };
            if options.strict {
                return Err(err);
            }
            let (value, action) = if picked.is_empty() {
                (NormalizedValue::ChoiceClear, DiagnosticAction::Cleared)
            } else {
                (NormalizedValue::MultiChoice(picked), DiagnosticAction::Partial)
            };
            let diag = FieldDiagnostic::from_error(field.name.clone(), &err).with_action(action);
            Ok(Normalized::degraded(value, diag))
        }
        _ => {
            let Some(token) = raw.single() else {
                return reject_or_clear(field, raw, options);
            };
            if token.is_empty() {
                return Ok(Normalized::exact(NormalizedValue::ChoiceClear));
            }
            if let Some((index, opt)) = field.find_option(token) {
                // A scalar keeps a scalar /V even on a multi-select list.
                return Ok(Normalized::exact(NormalizedValue::Choice {
                    export: opt.value.clone(),
                    index: Some(index),
                }));
            }
            if editable {
                return Ok(Normalized::exact(NormalizedValue::Choice {
                    export: token.to_string(),
                    index: None,
                }));
            }
            reject_or_clear(field, raw, options)
        }
    }
}

fn reject_or_clear(
    field: &FormField,
    raw: &FieldValue,
    options: &FormOptions,
) -> Result<Normalized, FormError> {
    let err = invalid(field, raw);
    if options.strict {
        return Err(err);
    }
    let diag =
        FieldDiagnostic::from_error(field.name.clone(), &err).with_action(DiagnosticAction::Cleared);
    Ok(Normalized::degraded(NormalizedValue::ChoiceClear, diag))
}
