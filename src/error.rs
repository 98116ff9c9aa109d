//! Error taxonomy for the sync pipeline.
//!
//! All three variants are fatal: a run is a single pass with no retries,
//! and nothing is written once one of these is raised. Malformed ADIF field
//! syntax is never an error by itself — the parser simply extracts nothing,
//! which surfaces here as `EmptyLog` if no record at all survives.

use thiserror::Error;

/// Errors that abort a sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Transport-level failure talking to the logbook API.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API envelope reported a failure (`RESULT=FAIL`).
    #[error("logbook API reported failure: {reason}")]
    Protocol {
        /// Reason string carried verbatim from the envelope.
        reason: String,
    },

    /// The fetch succeeded but no QSO records could be extracted.
    #[error("no QSO records found in the logbook response")]
    EmptyLog,
}
