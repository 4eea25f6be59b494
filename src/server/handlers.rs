use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, RawQuery, State},
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_TYPE, USER_AGENT},
        HeaderMap, HeaderName, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use std::net::SocketAddr;

use super::state::AppState;
use crate::format::OutputFormat;
use crate::orchestrator::RouteReply;
use crate::request::ParamMap;
use crate::telemetry::{log_request, RequestLog};
use crate::types::{BulkRequest, RouteRequestBody};
use crate::{Error, ErrorContext};

pub const TOOK_HEADER: &str = "x-gh-took";
const GPX_ATTACHMENT: &str = "attachment;filename=GraphHopper.gpx";

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

/// GET /route
pub async fn route_get(
    State(state): State<AppState>,
    connect: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    let params = ParamMap::from_query(query.as_deref().unwrap_or_default());
    let reply = state.orchestrator().route_get(&params).await;
    finish("GET /route", reply, connect, &headers)
}

/// POST /route
pub async fn route_post(
    State(state): State<AppState>,
    connect: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    payload: Result<Json<RouteRequestBody>, JsonRejection>,
) -> Response {
    let reply = match payload {
        Ok(Json(body)) => state.orchestrator().route_post(body).await,
        Err(rejection) => state
            .orchestrator()
            .reject(OutputFormat::Json, &body_error(&rejection)),
    };
    finish("POST /route", reply, connect, &headers)
}

/// POST /route/bulk
pub async fn route_bulk(
    State(state): State<AppState>,
    connect: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    payload: Result<Json<BulkRequest>, JsonRejection>,
) -> Response {
    let params = ParamMap::from_query(query.as_deref().unwrap_or_default());
    let reply = match payload {
        Ok(Json(body)) => state.orchestrator().route_bulk(&params, body).await,
        Err(rejection) => {
            let format = OutputFormat::from_param(params.first("type"));
            state.orchestrator().reject(format, &body_error(&rejection))
        }
    };
    finish("POST /route/bulk", reply, connect, &headers)
}

fn body_error(rejection: &JsonRejection) -> Error {
    Error::invalid_argument_with_context(
        rejection.body_text(),
        ErrorContext::new()
            .with_field_path("body")
            .with_source("http"),
    )
}

/// Logs the request and turns the reply into a response.
fn finish(
    endpoint: &'static str,
    reply: RouteReply,
    connect: Option<ConnectInfo<SocketAddr>>,
    headers: &HeaderMap,
) -> Response {
    let remote_addr = connect
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_default();
    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    log_request(
        &RequestLog::new(endpoint, reply.summary.clone())
            .with_caller(remote_addr, user_agent)
            .with_took(reply.took_ms),
    );

    let mut out = HeaderMap::new();
    out.insert(CONTENT_TYPE, HeaderValue::from_static(reply.content_type));
    if reply.is_success() {
        out.insert(HeaderName::from_static(TOOK_HEADER), HeaderValue::from(reply.took_ms));
        if reply.attachment_name().is_some() {
            out.insert(CONTENT_DISPOSITION, HeaderValue::from_static(GPX_ATTACHMENT));
        }
    }
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_REQUEST);
    (status, out, reply.body).into_response()
}
