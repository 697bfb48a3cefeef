//! Error type shared by the fetch service and the extraction engine.

use thiserror::Error;

/// Errors that can occur while fetching and extracting tide timings.
///
/// Malformed table rows are deliberately absent: they are dropped during
/// extraction and never surface here.
#[derive(Error, Debug)]
pub enum TideError {
    /// Request could not be built or sent (DNS, TLS, timeout, ...)
    #[error("fetch tide timings: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream answered with something other than 200 OK
    #[error("tide timings responded with status {0}")]
    Status(u16),

    /// Response body could not be read as an HTML document
    #[error("parse tide timings page: {0}")]
    Document(String),

    /// Extraction finished without a single usable month
    #[error("no tide data found on page")]
    NoData,
}
