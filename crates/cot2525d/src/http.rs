//! HTTP responder: routes, handlers, and response shaping.
//!
//! Image responses carry `Content-Type: image/png`, an exact
//! `Content-Length`, and a content `ETag`. Every failure path answers with
//! an empty body.

use std::sync::Arc;

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE, ETAG, IF_NONE_MATCH};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use cot2525_core::{decode, Sidc};
use cot2525_store::{resolve_cot, resolve_sidc, StoreError, StoreResult, Symbol, SymbolStore};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

pub const PNG_CONTENT_TYPE: &str = "image/png";
pub const IMAGE_CACHE_CONTROL: &str = "public, max-age=86400";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn SymbolStore>,
    fallback: bool,
}

impl AppState {
    pub fn new(store: Arc<dyn SymbolStore>, fallback: bool) -> Self {
        Self { store, fallback }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(image_by_query))
        .route("/cot/:cot", get(image_by_path))
        .route("/sidc/:sidc", get(image_by_sidc))
        .route("/decode", get(decode_cot))
        .route("/healthz", get(healthz))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct CotQuery {
    cot: Option<String>,
}

/// JSON body of `GET /decode`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecodeResponse {
    pub cot: String,
    pub sidc: Sidc,
    pub unknown: bool,
}

/// Non-empty `cot` from the query string. Malformed queries (duplicate keys,
/// bad encoding) count as missing.
fn query_cot(query: Result<Query<CotQuery>, QueryRejection>) -> Option<String> {
    match query {
        Ok(Query(CotQuery { cot })) => cot.filter(|c| !c.is_empty()),
        Err(rejection) => {
            debug!(error = %rejection, "rejected query string");
            None
        }
    }
}

/// Path parameter, or `None` when it is not valid percent-encoded UTF-8.
fn path_param(path: Result<Path<String>, PathRejection>) -> Option<String> {
    match path {
        Ok(Path(raw)) => Some(raw),
        Err(rejection) => {
            debug!(error = %rejection, "rejected path parameter");
            None
        }
    }
}

async fn image_by_query(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<CotQuery>, QueryRejection>,
) -> Response {
    match query_cot(query) {
        Some(cot) => serve_cot(&state, &cot, &headers).await,
        None => empty(StatusCode::BAD_REQUEST),
    }
}

async fn image_by_path(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    match path_param(path) {
        Some(cot) => serve_cot(&state, &cot, &headers).await,
        None => empty(StatusCode::BAD_REQUEST),
    }
}

async fn image_by_sidc(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    let Some(raw) = path_param(path) else {
        return empty(StatusCode::BAD_REQUEST);
    };
    let raw = raw.strip_suffix(".png").unwrap_or(&raw);
    let sidc: Sidc = match raw.parse() {
        Ok(sidc) => sidc,
        Err(e) => {
            debug!(sidc = %raw, error = %e, "rejected SIDC path segment");
            return empty(StatusCode::BAD_REQUEST);
        }
    };
    let found = resolve_sidc(state.store.as_ref(), sidc).await;
    respond(found, &headers)
}

async fn decode_cot(query: Result<Query<CotQuery>, QueryRejection>) -> Response {
    let Some(cot) = query_cot(query) else {
        return empty(StatusCode::BAD_REQUEST);
    };
    let sidc = decode(&cot);
    Json(DecodeResponse {
        cot,
        sidc,
        unknown: sidc.is_unknown(),
    })
    .into_response()
}

async fn healthz() -> Json<serde_json::Value> {
    Json(json!({"ok": true}))
}

async fn serve_cot(state: &AppState, cot: &str, headers: &HeaderMap) -> Response {
    let found = resolve_cot(state.store.as_ref(), cot, state.fallback).await;
    respond(found, headers)
}

fn respond(found: StoreResult<Option<Symbol>>, headers: &HeaderMap) -> Response {
    match found {
        Ok(Some(symbol)) => image_response(symbol, headers),
        Ok(None) | Err(StoreError::NotFound { .. }) => empty(StatusCode::NOT_FOUND),
        Err(StoreError::InvalidKey { key }) => {
            debug!(key = %key, "rejected symbol key");
            empty(StatusCode::BAD_REQUEST)
        }
        Err(e) => {
            warn!(event = "symbol.store_error", error = %e);
            empty(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn image_response(symbol: Symbol, headers: &HeaderMap) -> Response {
    let etag = format!("\"{}\"", symbol.etag);
    if etag_matches(headers, &etag) {
        return (StatusCode::NOT_MODIFIED, [(ETAG, etag)]).into_response();
    }
    let len = symbol.bytes.len();
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, PNG_CONTENT_TYPE.to_string()),
            (CONTENT_LENGTH, len.to_string()),
            (ETAG, etag),
            (CACHE_CONTROL, IMAGE_CACHE_CONTROL.to_string()),
        ],
        symbol.bytes,
    )
        .into_response()
}

fn etag_matches(headers: &HeaderMap, etag: &str) -> bool {
    headers
        .get(IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| {
            v.split(',')
                .map(str::trim)
                .any(|tag| tag == "*" || tag == etag || tag.strip_prefix("W/") == Some(etag))
        })
}

fn empty(status: StatusCode) -> Response {
    status.into_response()
}
