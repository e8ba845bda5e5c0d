//! Error and diagnostic types for pdfform-rs.
//!
//! Provides [`FormError`] for fatal errors that stop an operation,
//! [`FieldDiagnostic`] for per-field problems that a batch fill records and
//! skips past, and [`FillReport`] for returning the skip-list alongside the
//! fields that were actually written.

use std::fmt;

/// Fatal error types for form processing.
///
/// Document-level problems (`ParseError`, `StructureError`) always abort.
/// Field-level problems (`InvalidOption`, `ValueTooLong`) abort only in
/// strict mode; in lenient mode they surface as [`FieldDiagnostic`]s instead.
#[derive(Debug, Clone, PartialEq)]
pub enum FormError {
    /// The source bytes are not a well-formed PDF.
    ParseError(String),
    /// The field tree is cyclic or nested deeper than the configured bound.
    StructureError(String),
    /// A value is not one of the field's options.
    InvalidOption {
        /// Fully-qualified field name.
        field: String,
        /// The rejected caller value.
        value: String,
        /// Accepted export values.
        expected: Vec<String>,
    },
    /// A caller-supplied name does not match any visible field.
    UnknownField(String),
    /// A text value is longer than the field's `/MaxLen`.
    ValueTooLong {
        /// Fully-qualified field name.
        field: String,
        /// The field's `/MaxLen`.
        max_length: usize,
        /// Length of the rejected value in characters.
        actual: usize,
    },
    /// The field type never accepts values (signatures).
    NotWritable {
        /// Fully-qualified field name.
        field: String,
        /// Display name of the field type.
        kind: String,
    },
    /// Re-serializing the document failed.
    SerializationError(String),
    /// A configured resource limit was exceeded.
    ResourceLimitExceeded {
        /// Name of the limit that was exceeded (e.g., "max_input_bytes").
        limit_name: String,
        /// The configured limit value.
        limit_value: usize,
        /// The actual value that exceeded the limit.
        actual_value: usize,
    },
    /// The PDF is encrypted; form filling requires an unencrypted document.
    PasswordRequired,
    /// I/O error reading or writing PDF data.
    IoError(String),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::ParseError(msg) => write!(f, "parse error: {msg}"),
            FormError::StructureError(msg) => write!(f, "structure error: {msg}"),
            FormError::InvalidOption {
                field,
                value,
                expected,
            } => write!(
                f,
                "invalid option {value:?} for field {field:?} (expected one of: {})",
                expected.join(", ")
            ),
            FormError::UnknownField(name) => write!(f, "unknown field: {name:?}"),
            FormError::ValueTooLong {
                field,
                max_length,
                actual,
            } => write!(
                f,
                "value for field {field:?} is {actual} characters long (max length: {max_length})"
            ),
            FormError::NotWritable { field, kind } => {
                write!(f, "field {field:?} of type {kind} does not accept values")
            }
            FormError::SerializationError(msg) => write!(f, "serialization error: {msg}"),
            FormError::ResourceLimitExceeded {
                limit_name,
                limit_value,
                actual_value,
            } => write!(
                f,
                "resource limit exceeded: {limit_name} (limit: {limit_value}, actual: {actual_value})"
            ),
            FormError::PasswordRequired => write!(f, "PDF is encrypted and requires a password"),
            FormError::IoError(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for FormError {}

impl From<std::io::Error> for FormError {
    fn from(err: std::io::Error) -> Self {
        FormError::IoError(err.to_string())
    }
}

impl FormError {
    /// Returns true for errors that describe a single field rather than the
    /// whole document.
    pub fn is_field_level(&self) -> bool {
        matches!(
            self,
            FormError::InvalidOption { .. }
                | FormError::UnknownField(_)
                | FormError::ValueTooLong { .. }
                | FormError::NotWritable { .. }
        )
    }
}

/// Machine-readable code for a per-field problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum DiagnosticCode {
    /// The requested name is not a visible field.
    UnknownField,
    /// The value is not one of the field's options.
    InvalidOption,
    /// The value exceeds the field's `/MaxLen`.
    ValueTooLong,
    /// The field type does not accept values.
    NotWritable,
    /// The value was shortened to the field's `/MaxLen`.
    Truncated,
}

impl DiagnosticCode {
    /// Returns the string tag for this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::UnknownField => "UNKNOWN_FIELD",
            DiagnosticCode::InvalidOption => "INVALID_OPTION",
            DiagnosticCode::ValueTooLong => "VALUE_TOO_LONG",
            DiagnosticCode::NotWritable => "NOT_WRITABLE",
            DiagnosticCode::Truncated => "TRUNCATED",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the writer did with a request that produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DiagnosticAction {
    /// The request was dropped; the field is unchanged.
    Skipped,
    /// The button group was reset to `Off`.
    ResetToOff,
    /// The choice field's value was removed.
    Cleared,
    /// The text was shortened and then written.
    Truncated,
    /// Only the valid entries of a list value were written.
    Partial,
}

/// A non-fatal, per-field problem recorded during a fill.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldDiagnostic {
    /// The field name as supplied by the caller.
    pub name: String,
    /// Machine-readable code.
    pub code: DiagnosticCode,
    /// Human-readable description.
    pub detail: String,
    /// What happened to the request.
    pub action: DiagnosticAction,
}

impl FieldDiagnostic {
    /// Create a diagnostic for a request that was dropped.
    pub fn skipped(name: impl Into<String>, code: DiagnosticCode, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code,
            detail: detail.into(),
            action: DiagnosticAction::Skipped,
        }
    }

    /// Build a dropped-request diagnostic from a field-level [`FormError`].
    pub fn from_error(name: impl Into<String>, err: &FormError) -> Self {
        let code = match err {
            FormError::UnknownField(_) => DiagnosticCode::UnknownField,
            FormError::InvalidOption { .. } => DiagnosticCode::InvalidOption,
            FormError::ValueTooLong { .. } => DiagnosticCode::ValueTooLong,
            FormError::NotWritable { .. } => DiagnosticCode::NotWritable,
            _ => DiagnosticCode::InvalidOption,
        };
        Self::skipped(name, code, err.to_string())
    }

    /// Set the action, returning the modified diagnostic (builder pattern).
    pub fn with_action(mut self, action: DiagnosticAction) -> Self {
        self.action = action;
        self
    }
}

impl fmt::Display for FieldDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.name, self.detail)
    }
}

/// Outcome of a fill: which fields were written and which requests were not
/// applied as given.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FillReport {
    /// Qualified names of fields written with the requested value.
    pub applied: Vec<String>,
    /// Requests that were not applied exactly as given.
    pub diagnostics: Vec<FieldDiagnostic>,
}

impl FillReport {
    /// Returns true if every request was applied as given.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Names of requests that left their field unchanged.
    pub fn skipped(&self) -> impl Iterator<Item = &str> {
        self.diagnostics
            .iter()
            .filter(|d| d.action == DiagnosticAction::Skipped)
            .map(|d| d.name.as_str())
    }
}
