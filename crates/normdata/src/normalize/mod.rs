//! Result normalization.
//!
//! Converts the heterogeneous raw hits returned by the federated search into
//! uniform display records: recursive value unwrapping, geocoordinate
//! extraction, description-tag parsing, and per-field presentation metadata.
//! Everything in this module is pure and total: malformed record shapes
//! degrade to empty strings or verbatim serializations, never to errors.

mod extract;
mod geo;
mod present;
mod record;
mod tags;

pub use extract::{MISSING_VALUE_MARKER, extract_list, extract_single};
pub use geo::{GeoPoint, coordinate};
pub use present::{EMPTY_COLLECTION_MARKER, EMPTY_METADATA_NOTE, FieldRow, field_rows};
pub use record::{DEFAULT_ENTITY_TYPE, NAME_PLACEHOLDER, NormalizedRecord, normalize_hit};
pub use tags::{DescriptionTag, DescriptionTags, parse_description};
