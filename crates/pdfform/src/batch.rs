//! Processing many independent documents.
//!
//! Each document is opened, read or filled, and serialized on its own; no
//! state is shared between documents. With the `parallel` feature the work
//! is spread over rayon's thread pool, one document per task. Results keep
//! the input order either way.

use pdfform_core::{FillRequest, FormError, FormField, FormOptions};
use tracing::debug;

use crate::form::{FillOutcome, fill_form, read_fields};

/// One document to fill.
#[derive(Debug, Clone, Copy)]
pub struct FillJob<'a> {
    pub bytes: &'a [u8],
    pub requests: &'a [FillRequest],
}

impl<'a> FillJob<'a> {
    pub fn new(bytes: &'a [u8], requests: &'a [FillRequest]) -> Self {
        Self { bytes, requests }
    }
}

/// Read the fields of every document. A failing document does not affect
/// the others.
pub fn read_batch<B>(documents: &[B], options: &FormOptions) -> Vec<Result<Vec<FormField>, FormError>>
where
    B: AsRef<[u8]> + Sync,
{
    debug!(documents = documents.len(), "reading batch");
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        documents
            .par_iter()
            .map(|bytes| read_fields(bytes.as_ref(), options))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        documents
            .iter()
            .map(|bytes| read_fields(bytes.as_ref(), options))
            .collect()
    }
}

/// Fill every job. A failing job does not affect the others.
pub fn fill_batch(jobs: &[FillJob<'_>], options: &FormOptions) -> Vec<Result<FillOutcome, FormError>> {
    debug!(jobs = jobs.len(), "filling batch");
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        jobs.par_iter()
            .map(|job| fill_form(job.bytes, job.requests, options))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        jobs.iter()
            .map(|job| fill_form(job.bytes, job.requests, options))
            .collect()
    }
}
