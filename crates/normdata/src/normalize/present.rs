//! Presentation metadata for the raw fields of a normalized record.
//!
//! Fields already surfaced through a dedicated display region (name, type,
//! source, description, coordinates, logo) and backend bookkeeping fields
//! are excluded; everything else becomes a labeled row for the metadata
//! table.

use ahash::AHashSet;
use once_cell::sync::Lazy;
use serde::Serialize;

use super::{extract::extract_list, record::NormalizedRecord};

/// Rendered value marking an empty collection; rows carrying it are dropped.
pub const EMPTY_COLLECTION_MARKER: &str = "[]";

/// Indicator the caller renders when no metadata rows remain.
pub const EMPTY_METADATA_NOTE: &str = "No additional metadata";

/// Fields with a dedicated display region or internal meaning.
static EXCLUDED_FIELDS: Lazy<AHashSet<&'static str>> = Lazy::new(|| {
    [
        "id", "name", "type", "source", "description", "latitude", "longitude", "logo", "_id",
        "_index", "_score",
    ]
    .into_iter()
    .collect()
});

/// Field names that hold links without saying so in their name.
const WELL_KNOWN_LINK_FIELDS: [&str; 2] = ["mainEntityOfPage", "sameAs"];

/// One metadata table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRow {
    pub label: String,
    pub value: String,
    pub is_link: bool,
}

/// Produce the ordered metadata rows for a record.
///
/// Rows with an empty or empty-collection value are dropped. An
/// `identifier` row always sorts first; the rest follow in lexicographic
/// field-name order. An empty result means the caller should render
/// [`EMPTY_METADATA_NOTE`] instead of an empty table.
pub fn field_rows(record: &NormalizedRecord) -> Vec<FieldRow> {
    let mut fields: Vec<(&str, String)> = record
        .fields
        .iter()
        .filter(|(name, _)| !EXCLUDED_FIELDS.contains(name.as_str()))
        .map(|(name, value)| (name.as_str(), extract_list(value)))
        .filter(|(_, rendered)| !rendered.is_empty() && rendered != EMPTY_COLLECTION_MARKER)
        .collect();

    fields.sort_by_key(|(name, _)| (*name != "identifier", *name));

    fields
        .into_iter()
        .map(|(name, value)| FieldRow {
            label: humanize(name),
            is_link: is_link_field(name),
            value,
        })
        .collect()
}

/// `alternateName` -> `Alternate Name`.
fn humanize(field: &str) -> String {
    let mut label = String::with_capacity(field.len() + 4);
    for (i, ch) in field.chars().enumerate() {
        if i == 0 {
            label.extend(ch.to_uppercase());
        } else {
            if ch.is_uppercase() {
                label.push(' ');
            }
            label.push(ch);
        }
    }
    label
}

fn is_link_field(field: &str) -> bool {
    let lowered = field.to_lowercase();
    lowered.contains("url")
        || lowered.contains("link")
        || WELL_KNOWN_LINK_FIELDS.contains(&field)
}
