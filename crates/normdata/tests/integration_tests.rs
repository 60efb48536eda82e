//! Integration tests for the federated search and normalization pipeline.
//!
//! These tests run against the full public API over in-memory backends; no
//! network is involved. The backend fixtures mimic the search backend's
//! response envelope, including the per-source value-shape quirks.

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use serde_json::{Value, json};

use normdata::{
    EMPTY_METADATA_NOTE, NormdataSearcher, QueryParams, SearchBackend, SearchResponse,
    SearchSession, Source, TransportError, has_next_page,
};

fn setup_test_env() {
    let _ = normdata::init_logging(tracing::Level::WARN);
}

/// Two-source fixture: a geographic-names place with packed description and
/// coordinates, and an authority-file person with wrapped and array values.
fn fixture_response() -> Value {
    json!({
        "took": 4,
        "hits": {
            "total": { "value": 1284, "relation": "eq" },
            "hits": [
                {
                    "_index": "mi-proj-geonames-2024",
                    "_id": "es-geo-1",
                    "_score": 9.1,
                    "_source": {
                        "identifier": "2845456",
                        "name": [{"value": "Plön"}],
                        "type": "Place",
                        "description": "population=936; timezone=Europe/Berlin; a lakeside town",
                        "latitude": ["54.16"],
                        "longitude": "10.42",
                        "alternateName": ["Ploen", "Plön am See"],
                    }
                },
                {
                    "_index": "mi-proj-gnd-2024",
                    "_id": "es-gnd-7",
                    "_score": 3.3,
                    "_source": {
                        "label": {"value": "Ada Lovelace"},
                        "type": "Person",
                        "description": {"value": "English mathematician"},
                        "mainEntityOfPage": "https://d-nb.info/gnd/118529579",
                        "profession": [{"value": "Mathematician"}, {"value": "Writer"}],
                    }
                }
            ]
        }
    })
}

/// Backend replaying a fixed response, recording what it was asked.
struct FixtureBackend {
    response: Value,
    calls: AtomicUsize,
    seen_index_expr: Mutex<Option<String>>,
}

impl FixtureBackend {
    fn new(response: Value) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
            seen_index_expr: Mutex::new(None),
        }
    }
}

impl SearchBackend for FixtureBackend {
    async fn execute(
        &self,
        index_expr: &str,
        _body: &Value,
    ) -> Result<SearchResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.seen_index_expr.lock().unwrap() = Some(index_expr.to_owned());
        Ok(serde_json::from_value(self.response.clone()).expect("fixture response"))
    }
}

/// Backend whose latency and reported total depend on the searched term,
/// for simulating out-of-order responses.
struct DelayedBackend;

impl SearchBackend for DelayedBackend {
    async fn execute(
        &self,
        _index_expr: &str,
        body: &Value,
    ) -> Result<SearchResponse, TransportError> {
        let term = body["query"]["bool"]["must"][0]["query_string"]["query"]
            .as_str()
            .unwrap_or_default();
        let (delay_ms, total) = if term.contains("slow") {
            (1000, 1)
        } else {
            (10, 2)
        };
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        Ok(serde_json::from_value(json!({
            "hits": { "total": { "value": total }, "hits": [] }
        }))
        .expect("delayed response"))
    }
}

#[tokio::test]
async fn test_full_pipeline() {
    setup_test_env();

    let searcher = NormdataSearcher::new(FixtureBackend::new(fixture_response()));
    let params = QueryParams::builder().term("Plön").build();

    let outcome = searcher.search(&params).await;

    // Reported total is capped at the default ceiling; the page is not.
    assert_eq!(outcome.total, 100);
    assert_eq!(outcome.records.len(), 2);

    let place = &outcome.records[0];
    assert_eq!(place.id, "2845456");
    assert_eq!(place.name, "Plön");
    assert_eq!(place.source, Source::Geonames);
    assert_eq!(place.entity_type, "Place");

    let person = &outcome.records[1];
    assert_eq!(person.id, "es-gnd-7", "no identifier field, document id used");
    assert_eq!(person.name, "Ada Lovelace");
    assert_eq!(person.source, Source::Gnd);
    assert_eq!(person.description, "English mathematician");
}

#[tokio::test]
async fn test_geo_and_description_tags() {
    setup_test_env();

    let searcher = NormdataSearcher::new(FixtureBackend::new(fixture_response()));
    let params = QueryParams::builder().term("Plön").build();
    let outcome = searcher.search(&params).await;

    let place = &outcome.records[0];
    let point = place.geo_point().expect("both coordinates resolve");
    assert_eq!((point.latitude, point.longitude), (54.16, 10.42));
    assert!(point.osm_url().contains("mlat=54.16"));

    let parsed = place.description_tags();
    let labels: Vec<&str> = parsed.tags.iter().map(|tag| tag.label.as_str()).collect();
    assert_eq!(labels, vec!["Population", "Timezone"]);
    assert_eq!(parsed.tags[1].value, "Europe/Berlin");
    assert_eq!(parsed.text, "a lakeside town");

    // The person record has no coordinates, so no location and no map links.
    let person = &outcome.records[1];
    assert!(person.geo_point().is_none());
    let untagged = person.description_tags();
    assert!(untagged.tags.is_empty());
    assert_eq!(untagged.text, "English mathematician");
}

#[tokio::test]
async fn test_field_presentation() {
    setup_test_env();

    let searcher = NormdataSearcher::new(FixtureBackend::new(fixture_response()));
    let params = QueryParams::builder().term("Plön").build();
    let outcome = searcher.search(&params).await;

    let place_rows = outcome.records[0].field_rows();
    let labels: Vec<&str> = place_rows.iter().map(|row| row.label.as_str()).collect();
    // Identifier first, then lexicographic; name/type/description/coords excluded.
    assert_eq!(labels, vec!["Identifier", "Alternate Name"]);
    assert_eq!(place_rows[1].value, "Ploen, Plön am See");

    let person_rows = outcome.records[1].field_rows();
    let page_row = person_rows
        .iter()
        .find(|row| row.label == "Main Entity Of Page")
        .expect("well-known link field present");
    assert!(page_row.is_link);
    let profession_row = person_rows
        .iter()
        .find(|row| row.label == "Profession")
        .expect("profession row present");
    assert!(!profession_row.is_link);
    assert_eq!(profession_row.value, "Mathematician, Writer");
}

#[tokio::test]
async fn test_source_routing_reaches_backend() {
    setup_test_env();

    let searcher = NormdataSearcher::new(FixtureBackend::new(fixture_response()));
    let params = QueryParams::builder()
        .term("Plön")
        .source_filter("geoname".parse().unwrap())
        .source_filter(Source::Gnd)
        .build();

    searcher.search(&params).await;

    let seen = searcher
        .backend()
        .seen_index_expr
        .lock()
        .unwrap()
        .clone()
        .expect("backend was called");
    assert_eq!(seen, "mi-proj-geonames*,mi-proj-gnd*");
}

#[tokio::test]
async fn test_unconstrained_query_issues_no_request() {
    setup_test_env();

    let searcher = NormdataSearcher::new(FixtureBackend::new(fixture_response()));
    let outcome = searcher.search(&QueryParams::builder().term("   ").build()).await;

    assert_eq!(outcome.total, 0);
    assert!(outcome.records.is_empty());
    assert_eq!(searcher.backend().calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_empty_state_indicator_contract() {
    setup_test_env();

    let bare = json!({
        "hits": {
            "total": { "value": 1 },
            "hits": [{
                "_index": "mi-proj-osm-1",
                "_id": "osm-1",
                "_source": { "name": "Nameless way", "type": "Thing" }
            }]
        }
    });
    let searcher = NormdataSearcher::new(FixtureBackend::new(bare));
    let outcome = searcher
        .search(&QueryParams::builder().term("way").build())
        .await;

    let rows = outcome.records[0].field_rows();
    assert!(rows.is_empty());
    // Zero rows: the caller renders the indicator, never an empty table.
    assert!(!EMPTY_METADATA_NOTE.is_empty());
}

#[tokio::test]
async fn test_pagination_against_capped_total() {
    setup_test_env();

    let searcher = NormdataSearcher::new(FixtureBackend::new(fixture_response()));
    let params = QueryParams::builder().term("Plön").page_size(2).build();
    let outcome = searcher.search(&params).await;

    // 1284 actual hits reported as 100; paging stops at the cap.
    assert!(has_next_page(1, 2, outcome.records.len(), outcome.total));
    assert!(!has_next_page(50, 2, 2, outcome.total));
}

#[tokio::test(start_paused = true)]
async fn test_stale_response_is_discarded() {
    setup_test_env();

    let session = Arc::new(SearchSession::with_debounce(
        NormdataSearcher::new(DelayedBackend),
        Duration::from_millis(400),
    ));

    // First submission: clears its debounce window, then hangs in flight.
    let slow = {
        let session = Arc::clone(&session);
        tokio::spawn(async move {
            let params = QueryParams::builder().term("slow").build();
            session.submit(&params).await
        })
    };

    // Supersede it while its request is in flight.
    tokio::time::sleep(Duration::from_millis(500)).await;
    let fast = {
        let session = Arc::clone(&session);
        tokio::spawn(async move {
            let params = QueryParams::builder().term("fast").build();
            session.submit(&params).await
        })
    };

    let slow = slow.await.unwrap();
    let fast = fast.await.unwrap();

    // The slow response arrived last but belongs to a superseded request.
    assert!(slow.is_none());
    assert_eq!(fast.expect("latest submission wins").total, 2);
}

#[tokio::test(start_paused = true)]
async fn test_rapid_submissions_coalesce_in_debounce_window() {
    setup_test_env();

    let session = Arc::new(SearchSession::with_debounce(
        NormdataSearcher::new(FixtureBackend::new(fixture_response())),
        Duration::from_millis(400),
    ));

    let first = {
        let session = Arc::clone(&session);
        tokio::spawn(async move {
            let params = QueryParams::builder().term("Pl").build();
            session.submit(&params).await
        })
    };

    // Second keystroke lands inside the first one's debounce window.
    tokio::time::sleep(Duration::from_millis(100)).await;
    let second = {
        let session = Arc::clone(&session);
        tokio::spawn(async move {
            let params = QueryParams::builder().term("Plön").build();
            session.submit(&params).await
        })
    };

    assert!(first.await.unwrap().is_none());
    assert!(second.await.unwrap().is_some());

    // The superseded submission was never issued at all.
    assert_eq!(
        session.searcher().backend().calls.load(Ordering::SeqCst),
        1
    );
}
