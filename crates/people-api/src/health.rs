//! Admin endpoints: health report, good-to-go, ping and build info.

use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use people_core::ConnectivityStatus;
use serde::Serialize;
use serde_json::json;

use crate::AppState;

/// Overall budget for the health report. Driver probes use a shorter one.
const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);

const PANIC_GUIDE: &str =
    "https://sites.google.com/a/ft.com/ft-technology-service-transition/home/run-book-library/public-people-api";

/// Identity of this deployment as shown in the health report.
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    pub system_code: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub schema_version: u8,
    pub system_code: String,
    pub name: String,
    pub description: String,
    pub checks: Vec<CheckResult>,
    pub ok: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub id: String,
    pub name: String,
    pub ok: bool,
    pub severity: u8,
    pub business_impact: String,
    pub technical_summary: String,
    pub panic_guide: String,
    pub check_output: String,
    pub last_updated: String,
}

async fn backend_status(state: &AppState) -> ConnectivityStatus {
    match tokio::time::timeout(HEALTH_TIMEOUT, state.driver.check_connectivity()).await {
        Ok(status) => status,
        Err(_) => ConnectivityStatus::failed("Backend connectivity check timed out"),
    }
}

fn backend_check(status: ConnectivityStatus) -> CheckResult {
    CheckResult {
        id: "check-people-backend".to_string(),
        name: "Check connectivity to the people backend".to_string(),
        ok: status.healthy,
        severity: 1,
        business_impact: "Unable to respond to Public People api requests".to_string(),
        technical_summary: "Cannot reach the configured backend (Neo4j or the concepts API). \
                            Check that it is up and reachable from this service."
            .to_string(),
        panic_guide: PANIC_GUIDE.to_string(),
        check_output: status.message,
        last_updated: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    }
}

/// `GET /__health`. Always 200; the `ok` flag carries the verdict.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let check = backend_check(backend_status(&state).await);
    let ok = check.ok;
    if !ok {
        tracing::warn!(output = %check.check_output, "Health check failing");
    }

    Json(HealthReport {
        schema_version: 1,
        system_code: state.service.system_code.clone(),
        name: state.service.name.clone(),
        description: state.service.description.clone(),
        checks: vec![check],
        ok,
    })
}

/// `GET /__gtg`: 200 `OK` when the backend answers, 503 otherwise.
pub async fn good_to_go(State(state): State<AppState>) -> impl IntoResponse {
    let status = backend_status(&state).await;
    if status.healthy {
        (StatusCode::OK, "OK".to_string())
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, status.message)
    }
}

pub async fn ping() -> &'static str {
    "pong"
}

pub async fn build_info(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "name": state.service.name,
        "systemCode": state.service.system_code,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
