//! Integration tests for the states API.
//!
//! This test suite drives the full router over the bundled dataset:
//! - Listing and contiguity filtering
//! - Single-state reads and projections
//! - Adding, updating and deleting fun facts
//! - Index validation and boundary cases
//! - Unknown states and unmatched routes
//! - SQLite-backed persistence
//! - Storage failures

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use async_trait::async_trait;
use serde_json::{json, Value};
use tower::ServiceExt;

use states_api::api::{create_router, AppState};
use states_api::config::{InvalidStateStatus, ResponseSettings};
use states_api::dataset::StatesDataset;
use states_api::event_log::EventLog;
use states_api::error::{StatesError, StatesResult};
use states_api::models::FactEntry;
use states_api::store::{FactStore, InMemoryFactStore, SqliteFactStore};

// =============================================================================
// Test Helpers
// =============================================================================

fn load_dataset() -> StatesDataset {
    StatesDataset::load("./data/states.json").expect("Failed to load dataset")
}

fn create_router_with_store(store: Arc<dyn FactStore>) -> Router {
    let state = AppState::new(
        load_dataset(),
        store,
        EventLog::disabled(),
        ResponseSettings::default(),
    );
    create_router(state)
}

fn create_router_for_test() -> (Router, Arc<InMemoryFactStore>) {
    let store = Arc::new(InMemoryFactStore::new());
    (create_router_with_store(store.clone()), store)
}

async fn call(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    (status, json)
}

async fn stored_facts(store: &InMemoryFactStore, code: &str) -> Option<Vec<String>> {
    store.find(code).await.unwrap().map(|entry| entry.funfacts)
}

fn codes(states: &Value) -> Vec<String> {
    states
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["code"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_list_all_states_in_dataset_order() {
    let (router, _) = create_router_for_test();
    let (status, body) = call(&router, "GET", "/states", None).await;

    assert_eq!(status, StatusCode::OK);
    let codes = codes(&body);
    assert_eq!(codes.len(), 50);
    assert_eq!(codes.first().map(String::as_str), Some("AL"));
    assert_eq!(codes.last().map(String::as_str), Some("WY"));
    assert!(body.as_array().unwrap().iter().all(|s| s.get("funfacts").is_none()));
}

#[tokio::test]
async fn test_contig_true_excludes_alaska_and_hawaii() {
    let (router, _) = create_router_for_test();
    let (status, body) = call(&router, "GET", "/states?contig=true", None).await;

    assert_eq!(status, StatusCode::OK);
    let codes = codes(&body);
    assert_eq!(codes.len(), 48);
    assert!(!codes.contains(&"AK".to_string()));
    assert!(!codes.contains(&"HI".to_string()));
}

#[tokio::test]
async fn test_contig_false_returns_alaska_and_hawaii() {
    let (router, _) = create_router_for_test();
    let (_, body) = call(&router, "GET", "/states?contig=false", None).await;
    assert_eq!(codes(&body), vec!["AK", "HI"]);
}

#[tokio::test]
async fn test_invalid_contig_value_is_400() {
    let (router, _) = create_router_for_test();
    let (status, body) = call(&router, "GET", "/states?contig=sometimes", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_listing_includes_stored_funfacts() {
    let store = Arc::new(InMemoryFactStore::with_entries([
        FactEntry::new("OH", vec!["Birthplace of aviation".to_string()]),
        FactEntry::new("HI", vec![]),
    ]));
    let router = create_router_with_store(store);

    let (_, body) = call(&router, "GET", "/states?contig=false", None).await;
    assert_eq!(body[1]["code"], "HI");
    assert_eq!(body[1]["funfacts"], json!([]));
    assert!(body[0].get("funfacts").is_none());

    let (_, body) = call(&router, "GET", "/states", None).await;
    let ohio = body
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["code"] == "OH")
        .unwrap();
    assert_eq!(ohio["funfacts"], json!(["Birthplace of aviation"]));
}

// =============================================================================
// Single state
// =============================================================================

#[tokio::test]
async fn test_every_state_resolves_to_its_record() {
    let dataset = load_dataset();
    let (router, _) = create_router_for_test();

    for record in dataset.records() {
        let uri = format!("/states/{}", record.code.to_lowercase());
        let (status, body) = call(&router, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK, "{}", record.code);
        assert_eq!(body, serde_json::to_value(record).unwrap());
    }
}

#[tokio::test]
async fn test_single_state_with_funfacts() {
    let store = Arc::new(InMemoryFactStore::with_entries([FactEntry::new(
        "TX",
        vec!["Big".to_string()],
    )]));
    let router = create_router_with_store(store);

    let (_, body) = call(&router, "GET", "/states/TX", None).await;
    assert_eq!(body["state"], "Texas");
    assert_eq!(body["funfacts"], json!(["Big"]));
}

#[tokio::test]
async fn test_california_capital() {
    let (router, _) = create_router_for_test();
    let (status, body) = call(&router, "GET", "/states/CA/capital", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"state": "California", "capital": "Sacramento"}));
}

#[tokio::test]
async fn test_projections() {
    let (router, _) = create_router_for_test();

    let (_, body) = call(&router, "GET", "/states/ny/nickname", None).await;
    assert_eq!(body, json!({"state": "New York", "nickname": "Empire State"}));

    let (_, body) = call(&router, "GET", "/states/WY/population", None).await;
    assert_eq!(body, json!({"state": "Wyoming", "population": "578,759"}));

    let (_, body) = call(&router, "GET", "/states/HI/admission", None).await;
    assert_eq!(body, json!({"state": "Hawaii", "admitted": "1959-08-21"}));
}

#[tokio::test]
async fn test_unknown_state_on_every_route() {
    let (router, store) = create_router_for_test();
    let routes = [
        ("GET", "/states/ZZ", None),
        ("GET", "/states/ZZ/capital", None),
        ("GET", "/states/ZZ/nickname", None),
        ("GET", "/states/ZZ/population", None),
        ("GET", "/states/ZZ/admission", None),
        ("GET", "/states/ZZ/funfact", None),
        ("POST", "/states/ZZ/funfact", Some(json!({"funfacts": ["x"]}))),
        ("PATCH", "/states/ZZ/funfact", Some(json!({"index": 1, "funfact": "x"}))),
        ("DELETE", "/states/ZZ/funfact", Some(json!({"index": 1}))),
    ];

    for (method, uri, body) in routes {
        let (status, json) = call(&router, method, uri, body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
        assert_eq!(json["message"], "Invalid state abbreviation parameter");
    }
    assert!(store.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_state_status_is_configurable() {
    let state = AppState::new(
        load_dataset(),
        Arc::new(InMemoryFactStore::new()),
        EventLog::disabled(),
        ResponseSettings {
            invalid_state_status: InvalidStateStatus::BadRequest,
            ..ResponseSettings::default()
        },
    );
    let router = create_router(state);
    let (status, _) = call(&router, "GET", "/states/XX", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Fun facts
// =============================================================================

#[tokio::test]
async fn test_post_then_random_fact_only_returns_posted_values() {
    let (router, _) = create_router_for_test();

    let (status, body) = call(
        &router,
        "POST",
        "/states/OR/funfact",
        Some(json!({"funfacts": ["a", "b"]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"state": "Oregon", "stateCode": "OR", "capital": "Salem", "funfacts": ["a", "b"]})
    );

    let mut seen = HashSet::new();
    for _ in 0..40 {
        let (status, body) = call(&router, "GET", "/states/OR/funfact", None).await;
        assert_eq!(status, StatusCode::OK);
        let fact = body["funfact"].as_str().unwrap().to_string();
        assert!(fact == "a" || fact == "b", "unexpected fact {fact}");
        seen.insert(fact);
    }
    assert!(!seen.is_empty());
}

#[tokio::test]
async fn test_random_fact_without_entry_is_404() {
    let (router, _) = create_router_for_test();
    let (status, body) = call(&router, "GET", "/states/VT/funfact", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No Fun Facts found for Vermont");
}

#[tokio::test]
async fn test_post_appends_and_skips_stored_duplicates() {
    let (router, store) = create_router_for_test();
    call(&router, "POST", "/states/ks/funfact", Some(json!({"funfacts": ["flat"]}))).await;
    let (status, body) = call(
        &router,
        "POST",
        "/states/KS/funfact",
        Some(json!({"funfacts": ["flat", "windy"]})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["funfacts"], json!(["flat", "windy"]));
    assert_eq!(
        stored_facts(&store, "KS").await,
        Some(vec!["flat".to_string(), "windy".to_string()])
    );
}

#[tokio::test]
async fn test_post_validation() {
    let (router, store) = create_router_for_test();

    let (status, body) = call(&router, "POST", "/states/KS/funfact", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "State fun facts value required");

    let (status, body) = call(
        &router,
        "POST",
        "/states/KS/funfact",
        Some(json!({"funfacts": "not a list"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "State fun facts value must be an array");

    assert!(store.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_patch_twice_at_same_index() {
    let store = Arc::new(InMemoryFactStore::with_entries([FactEntry::new(
        "ME",
        vec!["a".to_string(), "b".to_string(), "c".to_string()],
    )]));
    let router = create_router_with_store(store.clone());

    let (status, _) = call(
        &router,
        "PATCH",
        "/states/ME/funfact",
        Some(json!({"index": 2, "funfact": "first"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(
        &router,
        "PATCH",
        "/states/ME/funfact",
        Some(json!({"index": 2, "funfact": "t"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["funfacts"], json!(["a", "t", "c"]));
    assert_eq!(stored_facts(&store, "ME").await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_patch_requires_text() {
    let store = Arc::new(InMemoryFactStore::with_entries([FactEntry::new(
        "ME",
        vec!["a".to_string()],
    )]));
    let router = create_router_with_store(store.clone());

    let (status, body) = call(&router, "PATCH", "/states/ME/funfact", Some(json!({"index": 1}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "State fun fact value required");
    assert_eq!(stored_facts(&store, "ME").await, Some(vec!["a".to_string()]));
}

#[tokio::test]
async fn test_patch_without_facts_is_400() {
    let (router, _) = create_router_for_test();
    let (status, body) = call(
        &router,
        "PATCH",
        "/states/NE/funfact",
        Some(json!({"index": 1, "funfact": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No Fun Facts found for Nebraska");
}

#[tokio::test]
async fn test_delete_shifts_and_keeps_empty_entry() {
    let store = Arc::new(InMemoryFactStore::with_entries([FactEntry::new(
        "RI",
        vec!["small".to_string(), "coastal".to_string()],
    )]));
    let router = create_router_with_store(store.clone());

    let (status, body) = call(&router, "DELETE", "/states/RI/funfact", Some(json!({"index": 1}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["funfacts"], json!(["coastal"]));

    let (_, body) = call(&router, "DELETE", "/states/RI/funfact", Some(json!({"index": 1}))).await;
    assert_eq!(body["funfacts"], json!([]));
    assert_eq!(stored_facts(&store, "RI").await, Some(vec![]));

    let (_, body) = call(&router, "GET", "/states/RI", None).await;
    assert_eq!(body["funfacts"], json!([]));
}

#[tokio::test]
async fn test_bad_indexes_leave_list_unchanged() {
    let facts = vec!["a".to_string(), "b".to_string()];
    let store = Arc::new(InMemoryFactStore::with_entries([FactEntry::new("NV", facts.clone())]));
    let router = create_router_with_store(store.clone());

    for index in [json!(0), json!(-1), json!(1.5), json!("1"), json!(3)] {
        let (status, _) = call(
            &router,
            "PATCH",
            "/states/NV/funfact",
            Some(json!({"index": index, "funfact": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "PATCH index {index}");

        let (status, _) = call(&router, "DELETE", "/states/NV/funfact", Some(json!({"index": index}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "DELETE index {index}");
    }

    assert_eq!(stored_facts(&store, "NV").await, Some(facts));
}

#[tokio::test]
async fn test_out_of_range_message() {
    let store = Arc::new(InMemoryFactStore::with_entries([FactEntry::new(
        "NV",
        vec!["a".to_string()],
    )]));
    let router = create_router_with_store(store);

    let (_, body) = call(&router, "DELETE", "/states/NV/funfact", Some(json!({"index": 5}))).await;
    assert_eq!(body["message"], "No Fun Fact found at that index for Nevada");
    assert_eq!(body["code"], "FACT_INDEX_OUT_OF_RANGE");
}

// =============================================================================
// Pages and persistence
// =============================================================================

#[tokio::test]
async fn test_unmatched_routes_are_404() {
    let (router, _) = create_router_for_test();
    for uri in ["/nowhere", "/states/CA/flag", "/states/CA/funfact/extra"] {
        let (status, _) = call(&router, "GET", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn test_sqlite_store_round_trip_through_api() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("facts.db");

    {
        let store = Arc::new(SqliteFactStore::open(&path).unwrap());
        let router = create_router_with_store(store);
        let (status, _) = call(
            &router,
            "POST",
            "/states/AZ/funfact",
            Some(json!({"funfacts": ["canyon", "desert"]})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        call(&router, "DELETE", "/states/AZ/funfact", Some(json!({"index": 1}))).await;
    }

    let store = Arc::new(SqliteFactStore::open(&path).unwrap());
    let router = create_router_with_store(store);
    let (_, body) = call(&router, "GET", "/states/AZ", None).await;
    assert_eq!(body["funfacts"], json!(["desert"]));
}

#[tokio::test]
async fn test_request_and_mutation_logs_are_written() {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(
        load_dataset(),
        Arc::new(InMemoryFactStore::new()),
        EventLog::new(dir.path()),
        ResponseSettings::default(),
    );
    let router = create_router(state);

    call(&router, "POST", "/states/UT/funfact", Some(json!({"funfacts": ["bees"]}))).await;

    let requests = std::fs::read_to_string(dir.path().join("reqLog.txt")).unwrap();
    assert!(requests.contains("POST\t-\t/states/UT/funfact"));
    let funfacts = std::fs::read_to_string(dir.path().join("funfactLog.txt")).unwrap();
    assert!(funfacts.contains("CREATE: Added fun facts to UT"));
}

// =============================================================================
// Storage failures
// =============================================================================

/// A store whose every call fails.
struct UnavailableStore;

#[async_trait]
impl FactStore for UnavailableStore {
    async fn find(&self, _state_code: &str) -> StatesResult<Option<FactEntry>> {
        Err(StatesError::storage("disk gone"))
    }

    async fn find_all(&self) -> StatesResult<Vec<FactEntry>> {
        Err(StatesError::storage("disk gone"))
    }

    async fn upsert(&self, _entry: FactEntry) -> StatesResult<FactEntry> {
        Err(StatesError::storage("disk gone"))
    }

    async fn save(&self, _entry: FactEntry) -> StatesResult<FactEntry> {
        Err(StatesError::storage("disk gone"))
    }
}

fn create_failing_router(log: EventLog, responses: ResponseSettings) -> Router {
    create_router(AppState::new(
        load_dataset(),
        Arc::new(UnavailableStore),
        log,
        responses,
    ))
}

const STORE_ROUTES: [(&str, &str); 4] = [
    ("GET", "/states"),
    ("GET", "/states/NV"),
    ("GET", "/states/NV/funfact"),
    ("POST", "/states/NV/funfact"),
];

#[tokio::test]
async fn test_storage_failure_is_500_and_logged() {
    let dir = tempfile::tempdir().unwrap();
    let router = create_failing_router(EventLog::new(dir.path()), ResponseSettings::default());

    for (method, uri) in STORE_ROUTES {
        let body = (method == "POST").then(|| json!({"funfacts": ["neon"]}));
        let (status, error) = call(&router, method, uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
        assert_eq!(error["code"], "STORAGE_ERROR");
        assert_eq!(error["details"], "disk gone");
    }

    let errors = std::fs::read_to_string(dir.path().join("errorLog.txt")).unwrap();
    for (method, uri) in STORE_ROUTES {
        let line = format!("ERROR: {method} {uri} - disk gone");
        assert!(errors.contains(&line), "missing '{line}' in {errors}");
    }
}

#[tokio::test]
async fn test_storage_details_can_be_masked() {
    let dir = tempfile::tempdir().unwrap();
    let responses = ResponseSettings {
        expose_storage_errors: false,
        ..ResponseSettings::default()
    };
    let router = create_failing_router(EventLog::new(dir.path()), responses);

    for (method, uri) in STORE_ROUTES {
        let body = (method == "POST").then(|| json!({"funfacts": ["neon"]}));
        let (status, error) = call(&router, method, uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
        assert_eq!(error["code"], "STORAGE_ERROR");
        assert!(error.get("details").is_none(), "{method} {uri}");
    }

    let errors = std::fs::read_to_string(dir.path().join("errorLog.txt")).unwrap();
    assert!(errors.contains("ERROR: GET /states - disk gone"));
}
