//! Core federated search orchestration.
//!
//! This module provides the main [`NormdataSearcher`] interface: it builds
//! the request from a [`QueryParams`] value, routes it to the right indices,
//! executes it through the transport seam, and normalizes the raw hits into
//! uniform records.
//!
//! # Quick Start
//!
//! ```no_run
//! use normdata::{NormdataSearcher, QueryParams};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let searcher = NormdataSearcher::over_http("http://localhost:9200");
//!
//! let params = QueryParams::builder().term("Berlin").build();
//! let outcome = searcher.search(&params).await;
//! println!("{} of {} hits on this page", outcome.records.len(), outcome.total);
//! # }
//! ```
//!
//! # Failure policy
//!
//! [`NormdataSearcher::search`] is fail-soft: transport failures and
//! non-success responses degrade to an empty result set instead of
//! propagating. Callers that need the cause use
//! [`NormdataSearcher::try_search`].

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use tracing::{debug, instrument, warn};

use crate::{
    config::QueryParams,
    error::NormdataError,
    normalize::{NormalizedRecord, normalize_hit},
    search::{build_request_body, cap_total, index_expression},
    transport::{HttpBackend, SearchBackend},
};

/// Quiescent period before a submitted query is issued.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(400);

/// Result of one federated search: the (capped) reported total and the
/// normalized records of the requested page.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    pub total: u64,
    pub records: Vec<NormalizedRecord>,
}

impl SearchOutcome {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// The main federated searcher over a search backend.
///
/// Generic over [`SearchBackend`] so tests and embedders can substitute the
/// transport; [`NormdataSearcher::over_http`] wires up the production HTTP
/// backend.
#[derive(Debug, Clone)]
pub struct NormdataSearcher<B> {
    backend: B,
}

impl NormdataSearcher<HttpBackend> {
    /// Create a searcher talking HTTP to the given base URL.
    pub fn over_http(base_url: impl Into<String>) -> Self {
        Self::new(HttpBackend::new(base_url))
    }
}

impl<B: SearchBackend> NormdataSearcher<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Run one federated search, degrading any failure to an empty result
    /// set. Never errors, never retries.
    #[instrument(name = "Search", level = "debug", skip_all, fields(term = %params.term, page = params.page))]
    pub async fn search(&self, params: &QueryParams) -> SearchOutcome {
        match self.try_search(params).await {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(%error, "Search failed, degrading to empty result set");
                SearchOutcome::empty()
            }
        }
    }

    /// Run one federated search, propagating the cause on failure.
    ///
    /// A query with a blank term and no filters resolves to an empty
    /// outcome without issuing a backend request.
    pub async fn try_search(&self, params: &QueryParams) -> Result<SearchOutcome, NormdataError> {
        if params.is_unconstrained() {
            debug!("Unconstrained query, skipping backend request");
            return Ok(SearchOutcome::empty());
        }

        let index_expr = index_expression(&params.source_filters);
        let body = build_request_body(params);
        debug!(%index_expr, "Executing federated search");

        let response = self.backend.execute(&index_expr, &body).await?;

        let total = cap_total(response.hits.total.value, params.reporting_cap);
        let records = response.hits.hits.into_iter().map(normalize_hit).collect();

        Ok(SearchOutcome { total, records })
    }

    /// Access the underlying backend for advanced operations.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

/// Whether a further page exists after the current one.
///
/// A short page means the backend ran out of hits; a full page still ends
/// pagination once the next offset would pass the reported total.
pub fn has_next_page(page: usize, page_size: usize, fetched: usize, total: u64) -> bool {
    fetched >= page_size && ((page * page_size) as u64) < total
}

/// Debounced, race-free search submission.
///
/// User input changes are coalesced by a quiescent period
/// ([`DEFAULT_DEBOUNCE`]) so that rapid successive submissions issue at most
/// one request, and each submission carries a generation token so that only
/// the response belonging to the most recent submission is ever returned. A
/// superseded in-flight request is not cancelled; its result is discarded on
/// arrival.
pub struct SearchSession<B> {
    searcher: NormdataSearcher<B>,
    generation: AtomicU64,
    debounce: Duration,
}

impl<B: SearchBackend> SearchSession<B> {
    pub fn new(searcher: NormdataSearcher<B>) -> Self {
        Self::with_debounce(searcher, DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(searcher: NormdataSearcher<B>, debounce: Duration) -> Self {
        Self {
            searcher,
            generation: AtomicU64::new(0),
            debounce,
        }
    }

    /// Generation token of the most recent submission.
    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Submit a query; returns `Some` only if this submission is still the
    /// latest one when its response arrives.
    ///
    /// `None` means the submission was superseded: either during the
    /// debounce window (no request was issued at all) or while its request
    /// was in flight (the stale response is discarded).
    pub async fn submit(&self, params: &QueryParams) -> Option<SearchOutcome> {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        tokio::time::sleep(self.debounce).await;
        if self.generation.load(Ordering::SeqCst) != token {
            debug!(token, "Submission superseded during debounce, not issued");
            return None;
        }

        let outcome = self.searcher.search(params).await;

        if self.generation.load(Ordering::SeqCst) != token {
            debug!(token, "Stale response discarded");
            return None;
        }
        Some(outcome)
    }

    pub fn searcher(&self) -> &NormdataSearcher<B> {
        &self.searcher
    }
}
