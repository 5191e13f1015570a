//! `GET /people/{uuid}`.

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use people_core::ontology::uuid_from_uri;
use people_core::HasIdentity;
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

pub const REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Read one person. The correlation token is taken from `X-Request-Id`
/// (generated when absent) and echoed on every response.
pub async fn get_person(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    headers: HeaderMap,
) -> Response {
    let transaction_id = transaction_id(&headers);

    let mut response = match read_person(&state, &uuid, &transaction_id).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    };
    if let Ok(value) = HeaderValue::from_str(&transaction_id) {
        response.headers_mut().insert(REQUEST_ID, value);
    }
    response
}

async fn read_person(
    state: &AppState,
    uuid: &str,
    transaction_id: &str,
) -> Result<Response, ApiError> {
    if !is_canonical_uuid(uuid) {
        return Err(ApiError::invalid_uuid());
    }
    // Graph identifiers are stored lowercase.
    let uuid = uuid.to_ascii_lowercase();
    let uuid = uuid.as_str();

    let person = match state.driver.read(uuid, transaction_id).await {
        Ok(Some(person)) => person,
        Ok(None) => return Err(ApiError::person_not_found()),
        Err(e) => {
            tracing::error!(
                uuid = %uuid,
                transaction_id = %transaction_id,
                integrity = e.is_integrity_violation(),
                error = %e,
                "Person could not be retrieved"
            );
            return Err(ApiError::person_unavailable());
        }
    };

    let canonical = uuid_from_uri(person.id());
    if canonical != uuid {
        tracing::debug!(uuid = %uuid, canonical = %canonical, "Redirecting to canonical person");
        return Ok(redirect(uuid, canonical));
    }

    let cache_control = format!("max-age={}, public", state.cache_max_age.as_secs());
    let mut response = (StatusCode::OK, Json(person)).into_response();
    if let Ok(value) = HeaderValue::from_str(&cache_control) {
        response.headers_mut().insert(header::CACHE_CONTROL, value);
    }
    Ok(response)
}

fn redirect(requested: &str, canonical: &str) -> Response {
    let location = format!("/people/{canonical}");
    let body = Json(json!({
        "message": format!("Person {requested} is concorded to {canonical}.")
    }));

    let mut response = (StatusCode::MOVED_PERMANENTLY, body).into_response();
    if let Ok(value) = HeaderValue::from_str(&location) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    response
}

/// Only the hyphenated 36-character form is accepted.
fn is_canonical_uuid(raw: &str) -> bool {
    raw.len() == 36 && Uuid::parse_str(raw).is_ok()
}

fn transaction_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("tid_{}", Uuid::new_v4()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_shape() {
        assert!(is_canonical_uuid("60e54253-1e94-38df-83b1-a39804d1ac18"));
        assert!(!is_canonical_uuid("BOO"));
        assert!(!is_canonical_uuid("60e542531e9438df83b1a39804d1ac18"));
        assert!(!is_canonical_uuid("60e54253-1e94-38df-83b1-a39804d1ac1g"));
    }

    #[test]
    fn test_transaction_id_from_header_or_generated() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID, HeaderValue::from_static("tid_abc"));
        assert_eq!(transaction_id(&headers), "tid_abc");

        let generated = transaction_id(&HeaderMap::new());
        assert!(generated.starts_with("tid_"));
        assert_eq!(generated.len(), 40);
    }
}
