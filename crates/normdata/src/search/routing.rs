//! Index routing and provenance tokens.
//!
//! Every upstream source is indexed under the `mi-proj-` prefix followed by
//! its token and a date suffix, e.g. `mi-proj-gnd-2024.03`. The geographic
//! names source is the odd one out: its selector token is `geoname` but its
//! indices are named `geonames`.

use std::{fmt, str::FromStr};

use itertools::Itertools;
use serde::Serialize;

use super::SearchError;

/// Common prefix of every provenance index.
pub const INDEX_PREFIX: &str = "mi-proj-";

/// Wildcard expression covering all provenance indices.
pub const ALL_INDICES: &str = "mi-proj-*";

/// Provenance of a record, derived from the index it was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Gnd,
    Wikidata,
    Osm,
    Geonames,
    /// Sentinel for indices that follow none of the known conventions.
    Unknown,
}

impl Source {
    /// Sources a caller may select as filters, in display order.
    pub const SELECTABLE: [Self; 4] = [Self::Gnd, Self::Wikidata, Self::Osm, Self::Geonames];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gnd => "gnd",
            Self::Wikidata => "wikidata",
            Self::Osm => "osm",
            Self::Geonames => "geonames",
            Self::Unknown => "unknown",
        }
    }

    /// Index pattern targeting this source's indices.
    pub fn index_pattern(self) -> String {
        match self {
            // Unknown cannot be routed narrower than everything.
            Self::Unknown => ALL_INDICES.to_owned(),
            token => format!("{INDEX_PREFIX}{}*", token.as_str()),
        }
    }

    /// Derive the provenance token from an index name.
    ///
    /// Geographic-names indices are recognized by substring; all others by
    /// the third `-`-separated segment of the index name. The naming
    /// convention lives in this one function only.
    pub fn from_index_name(index: &str) -> Self {
        let index = index.to_lowercase();
        if index.contains("geonames") {
            return Self::Geonames;
        }
        match index.splitn(4, '-').nth(2) {
            Some("gnd") => Self::Gnd,
            Some("wikidata") => Self::Wikidata,
            Some("osm") => Self::Osm,
            _ => Self::Unknown,
        }
    }
}

impl FromStr for Source {
    type Err = SearchError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.to_lowercase().as_str() {
            "gnd" => Ok(Self::Gnd),
            "wikidata" => Ok(Self::Wikidata),
            "osm" => Ok(Self::Osm),
            // Singular selector alias for the plural index name.
            "geoname" | "geonames" => Ok(Self::Geonames),
            other => Err(SearchError::UnknownSource(other.to_owned())),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the target-index expression for a set of selected sources.
///
/// No selection targets every provenance index; otherwise the per-source
/// patterns are comma-joined, duplicates removed.
pub fn index_expression(sources: &[Source]) -> String {
    if sources.is_empty() {
        return ALL_INDICES.to_owned();
    }
    sources
        .iter()
        .unique()
        .map(|source| source.index_pattern())
        .join(",")
}
