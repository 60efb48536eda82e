//! Normdata - Federated Authority-Record Search and Normalization
//!
//! Normdata queries entity records (people, places, organizations) spread
//! across several independently-maintained authority data sources (GND,
//! Wikidata, OpenStreetMap, `GeoNames`) through one full-text search
//! backend, and normalizes the wildly heterogeneous raw hits into uniform
//! display records.
//!
//! # Quick Start
//!
//! ```no_run
//! use normdata::{NormdataSearcher, QueryParams, Source};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let searcher = NormdataSearcher::over_http("http://localhost:9200");
//!
//! // Free-text search across all sources
//! let params = QueryParams::builder().term("Lovelace").build();
//! let outcome = searcher.search(&params).await;
//! println!("{} hits", outcome.total);
//!
//! // Restricted to places from the geographic-names source
//! let params = QueryParams::builder()
//!     .term("Plön")
//!     .type_filter("Place")
//!     .source_filter(Source::Geonames)
//!     .build();
//! for record in searcher.search(&params).await.records {
//!     println!("{} [{}] {}", record.name, record.source, record.description);
//! }
//! # }
//! ```
//!
//! # Features
//!
//! - **Federated routing**: source selection translates into index patterns,
//!   with a universal wildcard when nothing is selected
//! - **Total normalization**: scalars, arrays, wrapped `{value: ...}`
//!   objects and nested combinations all collapse into plain display values
//! - **Geocoordinates and description tags**: records carry an optional
//!   resolved location and structured `key=value` facts lifted out of
//!   free-text descriptions
//! - **Race-free sessions**: [`SearchSession`] debounces rapid input and
//!   discards responses of superseded requests
//! - **Fail-soft**: backend failures degrade to an empty result set rather
//!   than surfacing as blocking errors

use once_cell::sync::OnceCell;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod config;
mod core;
pub mod error;
mod normalize;
mod search;
mod transport;

pub use config::{DEFAULT_PAGE_SIZE, DEFAULT_REPORTING_CAP, QueryParams, QueryParamsBuilder};
pub use crate::core::{
    DEFAULT_DEBOUNCE, NormdataSearcher, SearchOutcome, SearchSession, has_next_page,
};
pub use normalize::{
    DEFAULT_ENTITY_TYPE, DescriptionTag, DescriptionTags, EMPTY_COLLECTION_MARKER,
    EMPTY_METADATA_NOTE, FieldRow, GeoPoint, MISSING_VALUE_MARKER, NAME_PLACEHOLDER,
    NormalizedRecord, coordinate, extract_list, extract_single, field_rows, normalize_hit,
    parse_description,
};
pub use search::{
    ALL_INDICES, INDEX_PREFIX, QUERY_FIELDS, SearchError, Source, build_request_body, cap_total,
    index_expression,
};
pub use transport::{
    HitsEnvelope, HttpBackend, RawHit, SearchBackend, SearchResponse, TotalHits, TransportError,
};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Initialize logging for the Normdata library.
///
/// This sets up structured logging with configurable levels and filtering.
/// Call this once at the start of your application to enable detailed
/// logging output from Normdata operations.
///
/// # Arguments
///
/// * `level` - The minimum log level to display
///
/// # Examples
///
/// ```rust
/// use normdata::init_logging;
/// use tracing::Level;
///
/// init_logging(Level::INFO)?;
/// # Ok::<(), normdata::error::NormdataError>(())
/// ```
pub fn init_logging(level: impl Into<LevelFilter>) -> Result<&'static (), error::NormdataError> {
    LOGGER_INIT.get_or_try_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level.into().to_string()))?
            .add_directive("hyper_util=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        tracing_subscriber::fmt::fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .init();
        Ok(())
    })
}
