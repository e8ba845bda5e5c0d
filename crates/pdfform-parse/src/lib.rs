//! pdfform-parse: lopdf-backed AcroForm reading and writing.
//!
//! This crate implements the document layer of pdfform-rs: loading a PDF,
//! walking the AcroForm field tree into a [`FieldRegistry`], and applying
//! fill requests back onto the tree. It depends on pdfform-core for the
//! shared field types and value normalization.

pub mod classify;
pub mod document;
pub mod error;
pub mod registry;
pub mod walker;
pub mod writer;

#[cfg(test)]
mod fixtures;

pub use document::FormDocument;
pub use error::BackendError;
pub use pdfform_core;
pub use registry::{FieldNode, FieldRegistry};
pub use walker::walk;
pub use writer::apply;
