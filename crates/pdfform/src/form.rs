//! Top-level form type for reading and filling AcroForm fields.

use pdfform_core::{FillReport, FillRequest, FormError, FormField, FormOptions};
use pdfform_parse::{FieldRegistry, FormDocument, apply, walk};
use tracing::debug;

/// A PDF document opened for form reading and filling.
///
/// Opening walks the field tree once; [`Form::fill`] writes into the loaded
/// document and re-reads the tree so accessors always reflect the current
/// values.
///
/// # Example
///
/// ```ignore
/// let mut form = Form::open(&bytes, None)?;
/// let report = form.fill(&[FillRequest::new("FullName", "Jane Doe")])?;
/// let output = form.to_bytes()?;
/// ```
pub struct Form {
    doc: FormDocument,
    registry: FieldRegistry,
    options: FormOptions,
}

/// Result of a fill: the serialized document and what happened per request.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FillOutcome {
    /// The filled PDF.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub bytes: Vec<u8>,
    /// Applied fields and per-field diagnostics.
    pub report: FillReport,
}

impl Form {
    /// Open a form from a file path.
    ///
    /// Convenience wrapper around [`Form::open`] that reads the file into
    /// memory first.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::IoError`] if the file cannot be read, or any error
    /// [`Form::open`] returns.
    #[cfg(feature = "std")]
    pub fn open_file(
        path: impl AsRef<std::path::Path>,
        options: Option<FormOptions>,
    ) -> Result<Self, FormError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::open(&bytes, options)
    }

    /// Open a form from bytes.
    ///
    /// # Arguments
    ///
    /// * `bytes` - Raw PDF file bytes.
    /// * `options` - Form options. Uses defaults (strict) if `None`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::ResourceLimitExceeded`] if `bytes` exceeds
    /// `max_input_bytes`, [`FormError::PasswordRequired`] for encrypted input,
    /// [`FormError::ParseError`] for malformed input, and
    /// [`FormError::StructureError`] for a cyclic or overly deep field tree.
    pub fn open(bytes: &[u8], options: Option<FormOptions>) -> Result<Self, FormError> {
        let options = options.unwrap_or_default();
        let doc = FormDocument::load_with_options(bytes, &options)?;
        let registry = walk(&doc, &options)?;
        debug!(fields = registry.len(), "opened form");
        Ok(Self {
            doc,
            registry,
            options,
        })
    }

    /// The options this form was opened with.
    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    /// Fields in tree order. Push buttons are not listed.
    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.registry.fields()
    }

    /// Fields ordered by fully-qualified name.
    pub fn fields_sorted(&self) -> Vec<&FormField> {
        let mut fields: Vec<&FormField> = self.fields().collect();
        fields.sort_by(|a, b| a.name.cmp(&b.name));
        fields
    }

    /// Look up a field by fully-qualified name.
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.registry.get(name).map(|node| &node.field)
    }

    /// Fields whose widgets sit on the given 0-based page.
    pub fn fields_on_page(&self, page: usize) -> Vec<&FormField> {
        self.fields().filter(|f| f.page == Some(page)).collect()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Apply fill requests in order.
    ///
    /// # Errors
    ///
    /// In strict mode, returns [`FormError::InvalidOption`] or
    /// [`FormError::ValueTooLong`] without modifying the document. Unknown
    /// and non-writable fields never fail the call; they are listed in the
    /// returned report.
    pub fn fill(&mut self, requests: &[FillRequest]) -> Result<FillReport, FormError> {
        let report = apply(&mut self.doc, &self.registry, requests, &self.options)?;
        self.registry = walk(&self.doc, &self.options)?;
        Ok(report)
    }

    /// Serialize the current document.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::SerializationError`] if writing fails.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>, FormError> {
        Ok(self.doc.emit()?)
    }

    /// Consume the form, returning its field records.
    pub fn into_fields(self) -> Vec<FormField> {
        self.registry.into_fields()
    }

    /// Field records as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::SerializationError`] if encoding fails.
    #[cfg(feature = "serde")]
    pub fn fields_json(&self) -> Result<String, FormError> {
        let fields: Vec<&FormField> = self.fields().collect();
        serde_json::to_string_pretty(&fields)
            .map_err(|e| FormError::SerializationError(e.to_string()))
    }
}

/// Read every field of a document.
///
/// # Errors
///
/// Same as [`Form::open`].
pub fn read_fields(bytes: &[u8], options: &FormOptions) -> Result<Vec<FormField>, FormError> {
    Ok(Form::open(bytes, Some(options.clone()))?.into_fields())
}

/// Fill a document and serialize the result.
///
/// # Errors
///
/// Document-level errors from [`Form::open`], strict-mode validation errors
/// from [`Form::fill`], and serialization errors.
pub fn fill_form(
    bytes: &[u8],
    requests: &[FillRequest],
    options: &FormOptions,
) -> Result<FillOutcome, FormError> {
    let mut form = Form::open(bytes, Some(options.clone()))?;
    let report = form.fill(requests)?;
    let bytes = form.to_bytes()?;
    Ok(FillOutcome { bytes, report })
}
