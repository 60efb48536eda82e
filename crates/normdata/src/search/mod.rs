//! Federated query construction.
//!
//! This module turns user input into a routed, paginated full-text search
//! request: index routing over the provenance sources, the request body
//! itself, and the display cap applied to reported hit totals.

pub use error::SearchError;
mod query;
mod routing;

pub use query::{QUERY_FIELDS, build_request_body};
pub use routing::{ALL_INDICES, INDEX_PREFIX, Source, index_expression};

/// Cap the backend-reported total hit count for display.
///
/// Affects only the reported figure; the page of hits actually fetched and
/// the offset calculation are never influenced by the cap.
pub fn cap_total(actual_total: u64, reporting_cap: u64) -> u64 {
    actual_total.min(reporting_cap)
}

mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum SearchError {
        #[error("Unknown source selector: {0}")]
        UnknownSource(String),
        #[error(transparent)]
        Other(#[from] anyhow::Error),
    }
}
