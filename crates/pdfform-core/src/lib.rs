//! pdfform-core: Backend-independent form field types and value normalization.
//!
//! This crate provides the field model ([`FormField`], [`FieldKind`],
//! [`FieldFlags`]), caller values, the per-type [`normalize`] rules and the
//! error/diagnostic taxonomy used by pdfform-rs. It has no PDF library
//! dependency; object-graph work lives in `pdfform-parse`.

pub mod error;
pub mod flags;
pub mod form_field;
pub mod geometry;
pub mod normalize;
pub mod options;
pub mod text_string;
pub mod value;

pub use error::{DiagnosticAction, DiagnosticCode, FieldDiagnostic, FillReport, FormError};
pub use flags::{FieldFlags, FlagMeanings};
pub use form_field::{FieldKind, FieldOption, FormField, OptionSource};
pub use geometry::FieldRect;
pub use normalize::{Normalized, checkbox_state, display_checkbox, normalize};
pub use options::{FormOptions, MaxLengthPolicy};
pub use text_string::{decode_pdf_name, decode_pdf_string, encode_pdf_text};
pub use value::{FieldValue, FillRequest, NormalizedValue};
