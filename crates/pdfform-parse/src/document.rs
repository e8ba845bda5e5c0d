//! Document model: a thin, mutable view over a lopdf object graph.
//!
//! [`FormDocument`] owns one parsed PDF for the duration of a read or fill.
//! Reference resolution is bounded, so dangling or cyclic references yield
//! `Null` instead of looping. All typed accessors return `Option`, keeping
//! "entry absent" distinct from a hard parse failure.

use std::collections::BTreeMap;

use lopdf::{Dictionary, Object, ObjectId};
use pdfform_core::{FormError, FormOptions, decode_pdf_name, decode_pdf_string};
use tracing::debug;

use crate::error::BackendError;

/// Maximum number of reference hops followed by [`FormDocument::resolve`].
pub const MAX_REFERENCE_HOPS: usize = 32;

static NULL: Object = Object::Null;

/// A parsed PDF whose form objects can be read and mutated in place.
#[derive(Debug)]
pub struct FormDocument {
    inner: lopdf::Document,
}

impl FormDocument {
    /// Parse a PDF from bytes.
    ///
    /// Fails with `Parse` for malformed input and `PasswordRequired` for
    /// encrypted documents.
    pub fn load(bytes: &[u8]) -> Result<Self, BackendError> {
        let inner = lopdf::Document::load_mem(bytes)
            .map_err(|e| BackendError::Parse(format!("failed to parse PDF: {e}")))?;

        if inner.is_encrypted() {
            return Err(BackendError::Core(FormError::PasswordRequired));
        }
        debug!(objects = inner.objects.len(), "loaded PDF");
        Ok(Self { inner })
    }

    /// Parse a PDF after checking its size against `options.max_input_bytes`.
    pub fn load_with_options(bytes: &[u8], options: &FormOptions) -> Result<Self, BackendError> {
        options.check_input_size(bytes.len())?;
        Self::load(bytes)
    }

    /// Wrap an already-built lopdf document.
    pub fn from_document(inner: lopdf::Document) -> Self {
        Self { inner }
    }

    /// Access the underlying lopdf document.
    pub fn inner(&self) -> &lopdf::Document {
        &self.inner
    }

    /// Consume the wrapper and return the lopdf document.
    pub fn into_inner(self) -> lopdf::Document {
        self.inner
    }

    /// Follow a reference chain to its target.
    ///
    /// Non-reference objects are returned as-is. Dangling references and
    /// chains longer than [`MAX_REFERENCE_HOPS`] resolve to `Null`.
    pub fn resolve<'a>(&'a self, obj: &'a Object) -> &'a Object {
        let mut current = obj;
        for _ in 0..MAX_REFERENCE_HOPS {
            match current {
                Object::Reference(id) => match self.inner.get_object(*id) {
                    Ok(next) => current = next,
                    Err(_) => return &NULL,
                },
                _ => return current,
            }
        }
        &NULL
    }

    /// Resolve an indirect object by id.
    pub fn object(&self, id: ObjectId) -> &Object {
        match self.inner.get_object(id) {
            Ok(obj) => self.resolve(obj),
            Err(_) => &NULL,
        }
    }

    /// Resolve an indirect object by id, expecting a dictionary.
    pub fn dictionary(&self, id: ObjectId) -> Option<&Dictionary> {
        self.object(id).as_dict().ok()
    }

    /// Mutable access to an indirect dictionary object.
    pub fn dictionary_mut(&mut self, id: ObjectId) -> Option<&mut Dictionary> {
        self.inner.get_object_mut(id).ok()?.as_dict_mut().ok()
    }

    /// Resolved value of `dict[key]`.
    pub fn dict_get<'a>(&'a self, dict: &'a Dictionary, key: &[u8]) -> Option<&'a Object> {
        let obj = self.resolve(dict.get(key).ok()?);
        match obj {
            Object::Null => None,
            other => Some(other),
        }
    }

    /// `dict[key]` as a name, without the leading `/`.
    pub fn dict_name(&self, dict: &Dictionary, key: &[u8]) -> Option<String> {
        match self.dict_get(dict, key)? {
            Object::Name(name) => Some(decode_pdf_name(name)),
            _ => None,
        }
    }

    /// `dict[key]` as text; accepts strings and names.
    pub fn dict_text(&self, dict: &Dictionary, key: &[u8]) -> Option<String> {
        object_text(self.dict_get(dict, key)?)
    }

    /// `dict[key]` as an integer; reals are truncated.
    pub fn dict_int(&self, dict: &Dictionary, key: &[u8]) -> Option<i64> {
        match self.dict_get(dict, key)? {
            Object::Integer(n) => Some(*n),
            Object::Real(r) => Some(*r as i64),
            _ => None,
        }
    }

    /// `dict[key]` as an array.
    pub fn dict_array<'a>(&'a self, dict: &'a Dictionary, key: &[u8]) -> Option<&'a [Object]> {
        match self.dict_get(dict, key)? {
            Object::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// `dict[key]` as a dictionary (stream dictionaries included).
    pub fn dict_dict<'a>(&'a self, dict: &'a Dictionary, key: &[u8]) -> Option<&'a Dictionary> {
        match self.dict_get(dict, key)? {
            Object::Dictionary(d) => Some(d),
            Object::Stream(s) => Some(&s.dict),
            _ => None,
        }
    }

    /// Object id of the document catalog.
    pub fn catalog_id(&self) -> Option<ObjectId> {
        match self.inner.trailer.get(b"Root").ok()? {
            Object::Reference(id) => Some(*id),
            _ => None,
        }
    }

    /// The document catalog.
    pub fn catalog(&self) -> Option<&Dictionary> {
        let root = self.inner.trailer.get(b"Root").ok()?;
        self.resolve(root).as_dict().ok()
    }

    /// The interactive form dictionary, whether indirect or inline.
    pub fn acroform(&self) -> Option<&Dictionary> {
        let catalog = self.catalog()?;
        self.dict_dict(catalog, b"AcroForm")
    }

    /// Mutable access to the interactive form dictionary.
    pub fn acroform_mut(&mut self) -> Option<&mut Dictionary> {
        let catalog_id = self.catalog_id()?;
        let indirect = match self.dictionary(catalog_id)?.get(b"AcroForm").ok()? {
            Object::Reference(id) => Some(*id),
            Object::Dictionary(_) => None,
            _ => return None,
        };
        match indirect {
            Some(id) => self.dictionary_mut(id),
            None => self
                .dictionary_mut(catalog_id)?
                .get_mut(b"AcroForm")
                .ok()?
                .as_dict_mut()
                .ok(),
        }
    }

    /// Page object ids keyed by 0-based page index.
    pub fn page_ids(&self) -> Vec<ObjectId> {
        let pages: BTreeMap<u32, ObjectId> = self.inner.get_pages();
        pages.into_values().collect()
    }

    /// Set `/NeedAppearances true` on the AcroForm.
    ///
    /// Overwrites any existing entry, so repeated calls leave exactly one.
    /// Returns false when the document has no AcroForm.
    pub fn set_need_appearances(&mut self) -> bool {
        match self.acroform_mut() {
            Some(acroform) => {
                acroform.set("NeedAppearances", Object::Boolean(true));
                true
            }
            None => false,
        }
    }

    /// Re-serialize the document.
    ///
    /// Output is deterministic for a given document state.
    pub fn emit(&mut self) -> Result<Vec<u8>, BackendError> {
        let mut buf = Vec::new();
        self.inner
            .save_to(&mut buf)
            .map_err(|e| BackendError::Serialize(e.to_string()))?;
        Ok(buf)
    }
}

/// Decode a string or name object as text.
pub fn object_text(obj: &Object) -> Option<String> {
    match obj {
        Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
        Object::Name(name) => Some(decode_pdf_name(name)),
        _ => None,
    }
}

/// Read a numeric object as `f64`.
pub fn object_number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(n) => Some(*n as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}
