//! Construction of the full-text search request body.

use serde_json::{Value, json};

use crate::config::QueryParams;

/// Text fields searched by a non-empty term, covering both plain and
/// wrapped (`.value`) layouts across the sources.
pub const QUERY_FIELDS: [&str; 6] = [
    "name",
    "name.value",
    "label",
    "description",
    "description.value",
    "identifier",
];

/// Build the search request body for the given parameters.
///
/// Pure: identical parameters always produce an identical body. An empty or
/// whitespace-only term matches everything; otherwise the term is wrapped in
/// wildcards and searched across [`QUERY_FIELDS`] with AND semantics between
/// whitespace-separated tokens. Selected entity types become an exact-match
/// filter clause. Offsets are zero-based, pages one-based.
pub fn build_request_body(params: &QueryParams) -> Value {
    let term = params.term.trim();
    let must = if term.is_empty() {
        json!({ "match_all": {} })
    } else {
        json!({
            "query_string": {
                "query": format!("*{term}*"),
                "fields": QUERY_FIELDS,
                "default_operator": "AND",
            }
        })
    };

    let filter = if params.type_filters.is_empty() {
        json!([])
    } else {
        json!([{ "terms": { "type.keyword": params.type_filters } }])
    };

    json!({
        "from": params.page.saturating_sub(1) * params.page_size,
        "size": params.page_size,
        "query": {
            "bool": {
                "must": [must],
                "filter": filter,
            }
        },
        "sort": [{ "_score": "desc" }],
    })
}
