//! pdfform: read and fill PDF AcroForm fields.
//!
//! This is the public API facade crate for pdfform-rs. It re-exports types
//! from pdfform-core and uses pdfform-parse for document access.
//!
//! # Architecture
//!
//! - **pdfform-core**: Backend-independent field model, value normalization, errors
//! - **pdfform-parse**: lopdf-backed field tree walker and writer
//! - **pdfform** (this crate): Public API that ties everything together
//!
//! # Example
//!
//! ```ignore
//! use pdfform::{FillRequest, FormOptions, fill_form, read_fields};
//!
//! let fields = read_fields(&bytes, &FormOptions::default())?;
//! let outcome = fill_form(
//!     &bytes,
//!     &[FillRequest::new("FullName", "Jane Doe"), FillRequest::new("Married", "yes")],
//!     &FormOptions::lenient(),
//! )?;
//! for diagnostic in &outcome.report.diagnostics {
//!     eprintln!("{diagnostic}");
//! }
//! ```

pub mod batch;
mod form;

pub use batch::{FillJob, fill_batch, read_batch};
pub use form::{FillOutcome, Form, fill_form, read_fields};
pub use pdfform_core;
pub use pdfform_core::{
    DiagnosticAction, DiagnosticCode, FieldDiagnostic, FieldFlags, FieldKind, FieldOption,
    FieldRect, FieldValue, FillReport, FillRequest, FlagMeanings, FormError, FormField,
    FormOptions, MaxLengthPolicy, OptionSource,
};
pub use pdfform_parse;
