//! Router tests against a scripted in-memory driver.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use people_core::{ConnectivityStatus, PeopleDriver, Person, ReadError, Thing};
use serde_json::Value;
use tower::ServiceExt as _;

use people_api::{router, AppState, ServiceInfo};

const PERSON: &str = "60e54253-1e94-38df-83b1-a39804d1ac18";
const ALTERNATE: &str = "70f4732b-7f7d-30a1-9c29-0cceec23760e";
const CANONICAL: &str = "2d3e16e0-61cb-4322-8aff-3b01c59f4daa";
const BROKEN: &str = "0ee8e7b7-bac9-4db1-b94b-5605ce1d2907";
const DUPLICATED: &str = "638fc0c1-c4d9-4be4-b6d9-c97a057e7d1b";

#[derive(Default)]
struct ScriptedDriver {
    people: HashMap<String, Person>,
    healthy: bool,
    reads: Mutex<Vec<(String, String)>>,
}

fn person(uuid: &str, label: &str) -> Person {
    Person {
        base: Thing {
            id: format!("http://api.ft.com/things/{uuid}"),
            api_url: format!("http://api.ft.com/people/{uuid}"),
            pref_label: Some(label.to_string()),
        },
        types: vec![
            "http://www.ft.com/ontology/core/Thing".to_string(),
            "http://www.ft.com/ontology/concept/Concept".to_string(),
            "http://www.ft.com/ontology/person/Person".to_string(),
        ],
        direct_type: Some("http://www.ft.com/ontology/person/Person".to_string()),
        ..Default::default()
    }
}

#[async_trait]
impl PeopleDriver for ScriptedDriver {
    async fn read(&self, id: &str, transaction_id: &str) -> Result<Option<Person>, ReadError> {
        self.reads
            .lock()
            .unwrap()
            .push((id.to_string(), transaction_id.to_string()));
        match id {
            BROKEN => Err(ReadError::Connection("connection refused".to_string())),
            DUPLICATED => Err(ReadError::DataIntegrity {
                id: id.to_string(),
                count: 2,
            }),
            _ => Ok(self.people.get(id).cloned()),
        }
    }

    async fn check_connectivity(&self) -> ConnectivityStatus {
        if self.healthy {
            ConnectivityStatus::ok("Connectivity to neo4j is ok")
        } else {
            ConnectivityStatus::failed("Error connecting to neo4j")
        }
    }
}

fn scripted(healthy: bool) -> Arc<ScriptedDriver> {
    let mut people = HashMap::new();
    people.insert(PERSON.to_string(), person(PERSON, "Neil Cole"));
    people.insert(ALTERNATE.to_string(), person(CANONICAL, "Someone"));
    Arc::new(ScriptedDriver {
        people,
        healthy,
        ..Default::default()
    })
}

fn state(driver: Arc<ScriptedDriver>) -> AppState {
    AppState {
        driver,
        cache_max_age: Duration::from_secs(30),
        service: Arc::new(ServiceInfo {
            system_code: "public-people-api".to_string(),
            name: "Public People API".to_string(),
            description: "test".to_string(),
        }),
    }
}

async fn send(driver: Arc<ScriptedDriver>, method: &str, uri: &str) -> Response {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("X-Request-Id", "tid_router_test")
        .body(Body::empty())
        .unwrap();
    router(state(driver), false).oneshot(req).await.unwrap()
}

async fn json_body(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn text_body(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn get_person_returns_document_with_cache_header() {
    let resp = send(scripted(true), "GET", &format!("/people/{PERSON}")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CACHE_CONTROL).unwrap(),
        "max-age=30, public"
    );
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "tid_router_test");

    let body = json_body(resp).await;
    assert_eq!(body["id"], format!("http://api.ft.com/things/{PERSON}"));
    assert_eq!(body["prefLabel"], "Neil Cole");
    assert_eq!(body["memberships"], Value::Array(Vec::new()));
}

#[tokio::test]
async fn transaction_id_reaches_driver() {
    let driver = scripted(true);
    send(driver.clone(), "GET", &format!("/people/{PERSON}")).await;
    let reads = driver.reads.lock().unwrap();
    assert_eq!(reads.as_slice(), &[(PERSON.to_string(), "tid_router_test".to_string())]);
}

#[tokio::test]
async fn uppercase_uuid_is_read_lowercase() {
    let driver = scripted(true);
    let resp = send(
        driver.clone(),
        "GET",
        &format!("/people/{}", PERSON.to_ascii_uppercase()),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["prefLabel"], "Neil Cole");

    let reads = driver.reads.lock().unwrap();
    assert_eq!(reads[0].0, PERSON);
}

#[tokio::test]
async fn invalid_uuid_is_bad_request_without_reading() {
    let driver = scripted(true);
    let resp = send(driver.clone(), "GET", "/people/BOO").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["message"], "Invalid uuid");
    assert!(driver.reads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_person_is_not_found() {
    let resp = send(
        scripted(true),
        "GET",
        "/people/00000000-0000-0000-0000-000000000000",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(resp).await["message"], "Person not found.");
}

#[tokio::test]
async fn concorded_person_redirects_to_canonical() {
    let resp = send(scripted(true), "GET", &format!("/people/{ALTERNATE}")).await;
    assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        &format!("/people/{CANONICAL}")
    );
    assert_eq!(
        json_body(resp).await["message"],
        format!("Person {ALTERNATE} is concorded to {CANONICAL}.")
    );
}

#[tokio::test]
async fn backend_failures_are_generic_internal_errors() {
    for uuid in [BROKEN, DUPLICATED] {
        let resp = send(scripted(true), "GET", &format!("/people/{uuid}")).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(resp).await["message"],
            "Person could not be retrieved"
        );
    }
}

#[tokio::test]
async fn post_is_method_not_allowed() {
    let resp = send(scripted(true), "POST", &format!("/people/{PERSON}")).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn health_reports_backend_state() {
    let resp = send(scripted(true), "GET", "/__health").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["systemCode"], "public-people-api");
    assert_eq!(body["checks"][0]["checkOutput"], "Connectivity to neo4j is ok");

    let body = json_body(send(scripted(false), "GET", "/__health").await).await;
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn good_to_go_follows_backend() {
    let resp = send(scripted(true), "GET", "/__gtg").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(text_body(resp).await, "OK");

    let resp = send(scripted(false), "GET", "/__gtg").await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(text_body(resp).await, "Error connecting to neo4j");
}

#[tokio::test]
async fn ping_and_build_info() {
    let resp = send(scripted(true), "GET", "/__ping").await;
    assert_eq!(text_body(resp).await, "pong");

    let body = json_body(send(scripted(true), "GET", "/__build-info").await).await;
    assert_eq!(body["name"], "Public People API");
    assert!(body["version"].is_string());
}
