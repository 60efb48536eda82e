//! Normalization of raw hits into uniform display records.

use serde::Serialize;
use serde_json::{Map, Value};

use super::{
    extract::extract_single,
    geo::GeoPoint,
    present::{FieldRow, field_rows},
    tags::{DescriptionTags, parse_description},
};
use crate::{search::Source, transport::RawHit};

/// Shown when no candidate name field resolves to non-empty text.
pub const NAME_PLACEHOLDER: &str = "No Title";

/// Generic category for records that carry no type field.
pub const DEFAULT_ENTITY_TYPE: &str = "Entity";

/// One uniform entity record, normalized from a raw hit.
///
/// `id` and `name` are never empty; `source` is derived purely from the
/// origin index name. The complete raw source document is preserved in
/// [`fields`](Self::fields) for the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedRecord {
    pub id: String,
    pub name: String,
    pub source: Source,
    pub entity_type: String,
    pub description: String,
    pub fields: Map<String, Value>,
}

impl NormalizedRecord {
    /// Geographic location of the record, when both coordinate fields
    /// resolve to finite numbers.
    pub fn geo_point(&self) -> Option<GeoPoint> {
        GeoPoint::from_fields(self.fields.get("latitude"), self.fields.get("longitude"))
    }

    /// Structured tags and residual free text of the description.
    pub fn description_tags(&self) -> DescriptionTags {
        parse_description(&self.description)
    }

    /// Presentation rows for the raw fields not covered by a dedicated
    /// display region. See [`crate::normalize::field_rows`].
    pub fn field_rows(&self) -> Vec<FieldRow> {
        field_rows(self)
    }
}

/// Normalize one raw hit into a uniform record.
pub fn normalize_hit(hit: RawHit) -> NormalizedRecord {
    let RawHit { index, id, source } = hit;

    let identifier = field_text(&source, "identifier");
    let id = if identifier.is_empty() { id } else { identifier };

    let name = ["name", "label"]
        .iter()
        .map(|key| field_text(&source, key))
        .find(|candidate| !candidate.is_empty())
        .unwrap_or_else(|| NAME_PLACEHOLDER.to_owned());

    let entity_type = match field_text(&source, "type") {
        text if text.is_empty() => DEFAULT_ENTITY_TYPE.to_owned(),
        text => text,
    };

    NormalizedRecord {
        id,
        name,
        source: Source::from_index_name(&index),
        entity_type,
        description: field_text(&source, "description"),
        fields: source,
    }
}

fn field_text(source: &Map<String, Value>, key: &str) -> String {
    source.get(key).map(extract_single).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn hit(index: &str, id: &str, source: Value) -> RawHit {
        RawHit {
            index: index.to_owned(),
            id: id.to_owned(),
            source: source.as_object().cloned().unwrap_or_default(),
        }
    }

    #[test]
    fn test_fully_populated_hit() {
        let record = normalize_hit(hit(
            "mi-proj-geonames-2024",
            "es-doc-9",
            json!({
                "identifier": "2845456",
                "name": [{"value": "Plön"}],
                "type": "Place",
                "description": "population=936; timezone=Europe/Berlin",
                "latitude": "54.16",
                "longitude": "10.42",
            }),
        ));

        assert_eq!(record.id, "2845456");
        assert_eq!(record.name, "Plön");
        assert_eq!(record.source, Source::Geonames);
        assert_eq!(record.entity_type, "Place");
        assert_eq!(record.description, "population=936; timezone=Europe/Berlin");
        // Raw fields survive verbatim.
        assert_eq!(record.fields["latitude"], json!("54.16"));
    }

    #[test]
    fn test_id_falls_back_to_document_id() {
        let record = normalize_hit(hit("mi-proj-gnd-1", "es-doc-3", json!({"name": "X"})));
        assert_eq!(record.id, "es-doc-3");
    }

    #[test]
    fn test_name_falls_back_to_label_then_placeholder() {
        let labeled = normalize_hit(hit(
            "mi-proj-gnd-1",
            "a",
            json!({"label": {"value": "Ada Lovelace"}}),
        ));
        assert_eq!(labeled.name, "Ada Lovelace");

        let nameless = normalize_hit(hit("mi-proj-gnd-1", "b", json!({"name": "-"})));
        assert_eq!(nameless.name, NAME_PLACEHOLDER);
    }

    #[test]
    fn test_type_falls_back_to_generic_category() {
        let record = normalize_hit(hit("mi-proj-osm-1", "c", json!({"name": "Somewhere"})));
        assert_eq!(record.entity_type, DEFAULT_ENTITY_TYPE);
    }

    #[test]
    fn test_source_comes_from_index_name_not_content() {
        let record = normalize_hit(hit(
            "mi-proj-wikidata-5",
            "d",
            json!({"name": "Q1", "source": "spoofed"}),
        ));
        assert_eq!(record.source, Source::Wikidata);
    }

    #[test]
    fn test_unrecognized_index_yields_unknown_source() {
        let record = normalize_hit(hit("scratch-index", "e", json!({"name": "X"})));
        assert_eq!(record.source, Source::Unknown);
    }

    #[test]
    fn test_geo_point_requires_both_coordinates() {
        let located = normalize_hit(hit(
            "mi-proj-geonames-1",
            "f",
            json!({"name": "X", "latitude": ["52.5"], "longitude": "13.4"}),
        ));
        let point = located.geo_point().unwrap();
        assert_eq!((point.latitude, point.longitude), (52.5, 13.4));

        let unlocated = normalize_hit(hit(
            "mi-proj-geonames-1",
            "g",
            json!({"name": "X", "longitude": "13.4"}),
        ));
        assert!(unlocated.geo_point().is_none());
    }

    #[test]
    fn test_description_tags_from_record() {
        let record = normalize_hit(hit(
            "mi-proj-geonames-1",
            "h",
            json!({"name": "X", "description": {"value": "population=12; quiet"}}),
        ));
        let parsed = record.description_tags();
        assert_eq!(parsed.tags.len(), 1);
        assert_eq!(parsed.text, "quiet");
    }
}
