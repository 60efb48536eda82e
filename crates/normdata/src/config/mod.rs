//! Query parameters and their builder.
//!
//! A search is fully described by one immutable [`QueryParams`] value;
//! building the request from it is a pure function (see
//! [`crate::search::build_request_body`]), which keeps the only
//! side-effecting step, executing the request, isolated in the transport
//! layer.

use crate::search::Source;

/// Default number of hits fetched per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Default ceiling on the reported total-hit count.
pub const DEFAULT_REPORTING_CAP: u64 = 100;

/// Parameters of one federated search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    /// Free-text search term; empty matches everything.
    pub term: String,
    /// Entity categories to restrict to; empty means no restriction.
    pub type_filters: Vec<String>,
    /// Sources to route to; empty targets all provenance indices.
    pub source_filters: Vec<Source>,
    /// Hits per page, at least 1.
    pub page_size: usize,
    /// 1-based page number.
    pub page: usize,
    /// Display ceiling for the reported total.
    pub reporting_cap: u64,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            term: String::new(),
            type_filters: Vec::new(),
            source_filters: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            page: 1,
            reporting_cap: DEFAULT_REPORTING_CAP,
        }
    }
}

impl QueryParams {
    pub fn builder() -> QueryParamsBuilder {
        QueryParamsBuilder::new()
    }

    /// True when nothing constrains the search: whitespace-only term and no
    /// filters. Such a query is answered with an empty result set without
    /// touching the backend.
    pub fn is_unconstrained(&self) -> bool {
        self.term.trim().is_empty()
            && self.type_filters.is_empty()
            && self.source_filters.is_empty()
    }
}

/// Builder for creating query parameters with ergonomic defaults
#[derive(Debug, Clone, Default)]
pub struct QueryParamsBuilder {
    params: QueryParams,
}

impl QueryParamsBuilder {
    /// Create a new builder with sensible defaults
    pub fn new() -> Self {
        Self {
            params: QueryParams::default(),
        }
    }

    /// Create a builder with the extended reporting ceiling (top 500)
    pub fn extended() -> Self {
        let mut builder = Self::new();
        builder.params.reporting_cap = 500;
        builder
    }

    /// Create a builder with the exhaustive reporting ceiling (top 1,000)
    pub fn exhaustive() -> Self {
        let mut builder = Self::new();
        builder.params.reporting_cap = 1000;
        builder
    }

    /// Set the free-text search term
    pub fn term(mut self, term: impl Into<String>) -> Self {
        self.params.term = term.into();
        self
    }

    /// Add an entity-type filter
    pub fn type_filter(mut self, entity_type: impl Into<String>) -> Self {
        self.params.type_filters.push(entity_type.into());
        self
    }

    /// Replace the entity-type filters
    pub fn type_filters(mut self, types: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.params.type_filters = types.into_iter().map(Into::into).collect();
        self
    }

    /// Add a source filter
    pub fn source_filter(mut self, source: Source) -> Self {
        self.params.source_filters.push(source);
        self
    }

    /// Replace the source filters
    pub fn source_filters(mut self, sources: impl IntoIterator<Item = Source>) -> Self {
        self.params.source_filters = sources.into_iter().collect();
        self
    }

    /// Set the page size (clamped to at least 1)
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.params.page_size = page_size.max(1);
        self
    }

    /// Set the 1-based page number (clamped to at least 1)
    pub fn page(mut self, page: usize) -> Self {
        self.params.page = page.max(1);
        self
    }

    /// Set the display ceiling for the reported total
    pub fn reporting_cap(mut self, cap: u64) -> Self {
        self.params.reporting_cap = cap;
        self
    }

    /// Build the final parameters
    pub fn build(self) -> QueryParams {
        self.params
    }
}
