//! API handlers.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::composites::{parse_step_text, CompositeResource, StepKeyword};
use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::RouteEntry;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

fn error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteView {
    #[serde(flatten)]
    pub entry: RouteEntry,
    pub template_url: String,
}

pub async fn list_routes(State(state): State<AppState>) -> Json<Vec<RouteView>> {
    let table = state.routes.load();
    Json(
        table
            .entries()
            .iter()
            .map(|entry| RouteView {
                template_url: table.template_url(entry),
                entry: entry.clone(),
            })
            .collect(),
    )
}

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedView {
    pub pattern: String,
    pub template_id: String,
    pub template_url: String,
    pub controller_id: String,
    pub params: BTreeMap<String, String>,
}

pub async fn resolve(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ResolveQuery>,
) -> Response {
    let matched = state.routes.load().lookup(&query.path);
    metrics::record_route_lookup(matched.is_some());

    match matched {
        Some(m) => {
            tracing::debug!(
                request_id = %request_id(&headers),
                path = %query.path,
                pattern = %m.entry.path_pattern,
                controller = %m.entry.controller_id,
                "Route resolved"
            );
            Json(ResolvedView {
                pattern: m.entry.path_pattern,
                template_id: m.entry.template_id,
                template_url: m.template_url,
                controller_id: m.entry.controller_id,
                params: m.params,
            })
            .into_response()
        }
        None => {
            tracing::info!(request_id = %request_id(&headers), path = %query.path, "No route matched");
            error(StatusCode::NOT_FOUND, format!("no route matches {}", query.path))
        }
    }
}

pub async fn get_composite(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Json<CompositeResource> {
    Json(state.loader.fetch(&identifier).await)
}

pub async fn list_composites(State(state): State<AppState>, headers: HeaderMap) -> Response {
    match state.loader.list_composites().await {
        Ok(classes) => Json(classes).into_response(),
        Err(e) => {
            tracing::warn!(request_id = %request_id(&headers), error = %e, "Listing composites failed");
            error(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateStepRequest {
    pub step_text: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidateStepResponse {
    pub step_text: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub keyword: Option<String>,
}

pub async fn validate_step(Json(request): Json<ValidateStepRequest>) -> Json<ValidateStepResponse> {
    let keyword = parse_step_text(&request.step_text).map(|(k, _)| StepKeyword::as_str(k).to_string());
    Json(ValidateStepResponse {
        valid: keyword.is_some(),
        keyword,
        step_text: request.step_text,
    })
}
